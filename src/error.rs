//! Domain-specific error types for wlctrl.
//!
//! This module provides structured error types for the control session and
//! the configuration layer, so callers can tell argument mistakes apart from
//! connection trouble and map them to exit codes.

use thiserror::Error;

use crate::toplevel::{Action, WindowId};

/// Exit code for a successful run.
pub const EXIT_OK: u8 = 0;
/// Exit code for a bad action, target or selector.
pub const EXIT_ARG_ERROR: u8 = 1;
/// Exit code when no window matched the target.
pub const EXIT_NO_MATCH: u8 = 2;
/// Exit code when a selector matched more than one window.
pub const EXIT_MULTIPLE_MATCHES: u8 = 3;
/// Exit code for connection, protocol and other runtime failures.
pub const EXIT_FAILURE: u8 = 4;

/// Errors raised while building or running a control session.
#[derive(Error, Debug)]
pub enum ControlError {
    /// No Wayland display could be reached.
    #[error("Failed to connect to Wayland display: {0}")]
    Connect(#[from] wayland_client::ConnectError),

    /// The event queue failed for a reason other than a closed socket.
    #[error("Wayland dispatch failed: {0}")]
    Dispatch(#[from] wayland_client::DispatchError),

    /// The compositor does not advertise a required global.
    #[error("Compositor does not support {0}")]
    GlobalMissing(&'static str),

    /// Activation was requested but the compositor announced no seat.
    #[error("No Wayland seat available to activate the window")]
    NoSeat,

    /// The action name is not part of the vocabulary.
    #[error("Unrecognized action '{0}'")]
    UnrecognizedAction(String),

    /// The window token could not be read as a window id.
    #[error("Invalid window id '{0}'")]
    InvalidTarget(String),

    /// A mutating action was requested without a target.
    #[error("Action '{0}' requires a target window")]
    MissingTarget(Action),

    /// A listing action was passed where a window action is expected.
    #[error("Action '{0}' does not act on a window")]
    NotAMutation(Action),

    /// The target id is not in the registry.
    #[error("Window {0} not found")]
    WindowNotFound(WindowId),

    /// The id now belongs to a window of another application.
    #[error("Window {id} is no longer a '{app_id}' window")]
    WindowChanged { id: WindowId, app_id: String },

    /// The selector matched no window.
    #[error("No window matches {0}")]
    NoMatch(String),

    /// The selector matched several windows.
    #[error("{count} windows match {selector}")]
    MultipleMatches { selector: String, count: usize },

    /// The bound handle is too old for the request.
    #[error("Request '{request}' needs protocol version 2, compositor offers {version}")]
    UnsupportedRequest { request: &'static str, version: u32 },
}

impl ControlError {
    /// Exit code the command line reports for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::UnrecognizedAction(_)
            | Self::InvalidTarget(_)
            | Self::MissingTarget(_)
            | Self::NotAMutation(_) => EXIT_ARG_ERROR,
            Self::WindowNotFound(_) | Self::WindowChanged { .. } | Self::NoMatch(_) => {
                EXIT_NO_MATCH
            }
            Self::MultipleMatches { .. } => EXIT_MULTIPLE_MATCHES,
            _ => EXIT_FAILURE,
        }
    }
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config directory could not be determined.
    #[error("Config directory not found")]
    NoDirFound,

    /// Failed to read the config file.
    #[error("Failed to read config file: {0}")]
    ReadFailed(#[source] std::io::Error),

    /// Failed to parse the config file.
    #[error("Failed to parse config: {0}")]
    ParseFailed(#[source] toml::de::Error),
}
