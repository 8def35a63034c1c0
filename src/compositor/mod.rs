//! Compositor abstraction for window management.
//!
//! This module provides a trait-based abstraction that launcher-facing code
//! uses to list windows and act on them. The wlroots implementation runs one
//! short control session per call over the foreign-toplevel protocol.

mod base;
mod wlroots;

pub use base::{display_label, ensure_mutation, filter_excluded_windows, is_excluded_window};
pub use wlroots::WlrootsCompositor;

use std::fmt;

use crate::error::ControlError;
use crate::toplevel::{Action, Target, Toplevel};

/// Trait for compositor window management operations.
///
/// Implementations must be thread-safe (Send + Sync) so a launcher can call
/// them from whichever thread refreshes its item list.
pub trait Compositor: Send + Sync {
    /// List all open windows.
    fn list_windows(&self) -> Result<Vec<Toplevel>, ControlError>;

    /// Perform a mutating action on one window.
    ///
    /// `list` and other non-mutating actions are rejected with
    /// [`ControlError::NotAMutation`] before anything is sent.
    fn perform(&self, action: Action, target: Target) -> Result<(), ControlError>;

    /// Get the compositor name for logging/debugging.
    fn name(&self) -> &'static str;
}

impl fmt::Debug for dyn Compositor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Compositor({})", self.name())
    }
}
