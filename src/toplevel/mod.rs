//! Window data model shared by the session, the backends and the launcher layer.

mod action;
mod target;

pub use action::{Action, ActionRequest, Mutation, PendingMutation};
pub use target::{Target, WindowMatcher};

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ControlError;

/// Identifier of a toplevel, stable for the lifetime of one connection.
///
/// This is the protocol object id of the toplevel handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub u32);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WindowId {
    type Err = ControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(WindowId)
            .map_err(|_| ControlError::InvalidTarget(s.to_string()))
    }
}

bitflags! {
    /// State flags reported by the compositor for a toplevel.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct ToplevelState: u8 {
        const MAXIMIZED = 1 << 0;
        const MINIMIZED = 1 << 1;
        const ACTIVATED = 1 << 2;
        const FULLSCREEN = 1 << 3;
    }
}

impl ToplevelState {
    /// Decode the protocol's `state` array (native-endian `u32` values).
    ///
    /// Values outside 0..=3 are ignored, as are trailing partial words.
    pub fn from_wire(bytes: &[u8]) -> Self {
        let mut state = Self::empty();
        for chunk in bytes.chunks_exact(4) {
            if let Ok(arr) = <[u8; 4]>::try_from(chunk) {
                match u32::from_ne_bytes(arr) {
                    0 => state |= Self::MAXIMIZED,
                    1 => state |= Self::MINIMIZED,
                    2 => state |= Self::ACTIVATED,
                    3 => state |= Self::FULLSCREEN,
                    _ => {}
                }
            }
        }
        state
    }

    /// Lowercase names of the set flags, in declaration order.
    pub fn labels(&self) -> Vec<&'static str> {
        self.iter_names()
            .map(|(name, _)| match name {
                "MAXIMIZED" => "maximized",
                "MINIMIZED" => "minimized",
                "ACTIVATED" => "activated",
                _ => "fullscreen",
            })
            .collect()
    }
}

/// A window announced by the compositor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toplevel {
    pub id: WindowId,
    pub title: String,
    pub app_id: String,
    #[serde(default)]
    pub state: ToplevelState,
}

impl Toplevel {
    /// An entry with no title or app id yet, as created on announcement.
    pub fn new(id: WindowId) -> Self {
        Self {
            id,
            title: String::new(),
            app_id: String::new(),
            state: ToplevelState::empty(),
        }
    }
}

/// Windows keyed by id, ordered so listings are stable.
pub type WindowMap = BTreeMap<WindowId, Toplevel>;
