//! wlroots compositor implementation over the foreign-toplevel protocol.

use tracing::{debug, warn};

use super::{Compositor, ensure_mutation};
use crate::error::ControlError;
use crate::session::{Outcome, wlctrl};
use crate::toplevel::{Action, Target, Toplevel};

/// Compositor client opening a fresh connection for every call.
///
/// Sessions share nothing, so concurrent calls are independent. Without a
/// reachable display every call fails with [`ControlError::Connect`].
pub struct WlrootsCompositor;

impl Compositor for WlrootsCompositor {
    fn list_windows(&self) -> Result<Vec<Toplevel>, ControlError> {
        match wlctrl(Action::List, None)? {
            Outcome::Listed(windows) => {
                debug!(count = windows.len(), "Listed windows");
                Ok(windows.into_values().collect())
            }
            outcome => {
                warn!(?outcome, "Window listing did not complete");
                Ok(Vec::new())
            }
        }
    }

    fn perform(&self, action: Action, target: Target) -> Result<(), ControlError> {
        ensure_mutation(action)?;
        match wlctrl(action, Some(target))? {
            Outcome::Applied => Ok(()),
            outcome => {
                warn!(%action, ?outcome, "Window action did not complete");
                Ok(())
            }
        }
    }

    fn name(&self) -> &'static str {
        "wlroots"
    }
}
