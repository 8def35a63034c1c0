use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ControlError;

/// The closed set of things a session can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Snapshot all windows
    List,
    /// Focus the window (`focus` is accepted as an alias)
    Activate,
    Maximize,
    Minimize,
    Fullscreen,
    Unmaximize,
    Unminimize,
    Unfullscreen,
    /// Ask the client to close the window
    Close,
}

impl Action {
    /// Every action, in the order the launcher presents them.
    pub const ALL: [Action; 9] = [
        Action::List,
        Action::Activate,
        Action::Maximize,
        Action::Minimize,
        Action::Fullscreen,
        Action::Unmaximize,
        Action::Unminimize,
        Action::Unfullscreen,
        Action::Close,
    ];

    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::List => "list",
            Action::Activate => "activate",
            Action::Maximize => "maximize",
            Action::Minimize => "minimize",
            Action::Fullscreen => "fullscreen",
            Action::Unmaximize => "unmaximize",
            Action::Unminimize => "unminimize",
            Action::Unfullscreen => "unfullscreen",
            Action::Close => "close",
        }
    }

    /// Whether the action needs a target window.
    pub fn needs_target(&self) -> bool {
        !matches!(self, Action::List)
    }

    /// Map the action to its request with the fixed arguments filled in.
    pub fn request(&self) -> ActionRequest {
        let pending = match self {
            Action::List => return ActionRequest::List,
            Action::Activate => PendingMutation::Activate,
            Action::Maximize => PendingMutation::SetMaximized(true),
            Action::Unmaximize => PendingMutation::SetMaximized(false),
            Action::Minimize => PendingMutation::SetMinimized(true),
            Action::Unminimize => PendingMutation::SetMinimized(false),
            Action::Fullscreen => PendingMutation::SetFullscreen(true),
            Action::Unfullscreen => PendingMutation::SetFullscreen(false),
            Action::Close => PendingMutation::Close,
        };
        ActionRequest::Mutate(pending)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "focus" => Ok(Action::Activate),
            _ => Action::ALL
                .into_iter()
                .find(|action| action.as_str() == s)
                .ok_or_else(|| ControlError::UnrecognizedAction(s.to_string())),
        }
    }
}

/// What a session was asked to do, before any server state is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionRequest {
    List,
    Mutate(PendingMutation),
}

/// A window mutation whose arguments are not all known yet.
///
/// Activation needs the seat, which only exists once the connection has
/// finished its initial sync, so it stays unresolved until then.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingMutation {
    Activate,
    SetMaximized(bool),
    SetMinimized(bool),
    SetFullscreen(bool),
    Close,
}

impl PendingMutation {
    /// Bind the deferred arguments, producing an invocable mutation.
    pub fn resolve<S>(self, seat: Option<S>) -> Result<Mutation<S>, ControlError> {
        Ok(match self {
            PendingMutation::Activate => Mutation::Activate {
                seat: seat.ok_or(ControlError::NoSeat)?,
            },
            PendingMutation::SetMaximized(on) => Mutation::SetMaximized(on),
            PendingMutation::SetMinimized(on) => Mutation::SetMinimized(on),
            PendingMutation::SetFullscreen(on) => Mutation::SetFullscreen(on),
            PendingMutation::Close => Mutation::Close,
        })
    }
}

impl From<PendingMutation> for Action {
    fn from(pending: PendingMutation) -> Self {
        match pending {
            PendingMutation::Activate => Action::Activate,
            PendingMutation::SetMaximized(true) => Action::Maximize,
            PendingMutation::SetMaximized(false) => Action::Unmaximize,
            PendingMutation::SetMinimized(true) => Action::Minimize,
            PendingMutation::SetMinimized(false) => Action::Unminimize,
            PendingMutation::SetFullscreen(true) => Action::Fullscreen,
            PendingMutation::SetFullscreen(false) => Action::Unfullscreen,
            PendingMutation::Close => Action::Close,
        }
    }
}

/// A fully resolved request to send for one window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation<S> {
    Activate { seat: S },
    SetMaximized(bool),
    SetMinimized(bool),
    SetFullscreen(bool),
    Close,
}

impl<S> Mutation<S> {
    /// Protocol request name, for logging.
    pub fn request_name(&self) -> &'static str {
        match self {
            Mutation::Activate { .. } => "activate",
            Mutation::SetMaximized(true) => "set_maximized",
            Mutation::SetMaximized(false) => "unset_maximized",
            Mutation::SetMinimized(true) => "set_minimized",
            Mutation::SetMinimized(false) => "unset_minimized",
            Mutation::SetFullscreen(true) => "set_fullscreen",
            Mutation::SetFullscreen(false) => "unset_fullscreen",
            Mutation::Close => "close",
        }
    }
}
