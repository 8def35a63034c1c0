//! Runs one control session to completion.

use tracing::{debug, warn};

use super::{Backend, ControlSession, SessionState};
use crate::error::ControlError;
use crate::toplevel::{Action, ActionRequest, Target, WindowId, WindowMap};
use crate::wayland::WaylandBackend;

/// Terminal result of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A `list` session finished with this snapshot.
    Listed(WindowMap),
    /// A mutation was sent and acknowledged.
    Applied,
    /// The transport went away before the session finished.
    Interrupted { state: SessionState },
}

impl Outcome {
    /// The window snapshot, if this was a completed listing.
    pub fn into_windows(self) -> Option<WindowMap> {
        match self {
            Outcome::Listed(windows) => Some(windows),
            _ => None,
        }
    }
}

/// Drive a session over `backend` until the transport closes.
///
/// A disconnect ends the loop without an error. On any other error the
/// transport is shut down and the error returned.
pub fn run<B: Backend>(
    backend: &mut B,
    request: ActionRequest,
    target: Option<Target>,
) -> Result<Outcome, ControlError> {
    let mut session = ControlSession::new(backend, request, target)?;

    loop {
        match session.step() {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                session.abort();
                return Err(e);
            }
        }
    }

    let outcome = session.into_outcome();
    if let Outcome::Interrupted { state } = &outcome {
        warn!(%state, "Compositor connection closed before the session finished");
    }
    Ok(outcome)
}

/// Connect to the compositor from the environment and run one action.
pub fn wlctrl(action: Action, target: Option<Target>) -> Result<Outcome, ControlError> {
    if action.needs_target() && target.is_none() {
        return Err(ControlError::MissingTarget(action));
    }

    let mut backend = WaylandBackend::connect()?;
    debug!(%action, "Connected, starting session");
    run(&mut backend, action.request(), target)
}

/// Like [`wlctrl`], taking the action name and window token as text.
///
/// Both are validated before any connection is made.
pub fn wlctrl_named(action: &str, window: Option<&str>) -> Result<Outcome, ControlError> {
    let action: Action = action.parse()?;
    let target = window
        .map(|token| token.parse::<WindowId>().map(Target::Id))
        .transpose()?;
    wlctrl(action, target)
}
