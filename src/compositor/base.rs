//! Common helpers for turning compositor windows into launcher entries.

use crate::error::ControlError;
use crate::toplevel::{Action, Toplevel};

/// Human-readable label for a window.
///
/// Shows the title, followed by the app id in parentheses unless the title
/// already names the app (compared case-insensitively). A window without a
/// title falls back to its app id.
pub fn display_label(title: &str, app_id: &str) -> String {
    if title.is_empty() {
        return app_id.to_string();
    }
    if app_id.is_empty() || title.to_lowercase().contains(&app_id.to_lowercase()) {
        return title.to_string();
    }
    format!("{} ({})", title, app_id)
}

/// Check if a window's app id is in the exclusion list.
///
/// Used to hide the launcher itself (and anything else configured) from
/// the window list.
pub fn is_excluded_window(app_id: &str, excluded: &[String]) -> bool {
    excluded.iter().any(|e| e.eq_ignore_ascii_case(app_id))
}

/// Filter a list of windows to exclude configured app ids.
pub fn filter_excluded_windows(windows: Vec<Toplevel>, excluded: &[String]) -> Vec<Toplevel> {
    windows
        .into_iter()
        .filter(|w| !is_excluded_window(&w.app_id, excluded))
        .collect()
}

/// Reject actions that do not change a window, such as `list`.
pub fn ensure_mutation(action: Action) -> Result<(), ControlError> {
    if action.needs_target() {
        Ok(())
    } else {
        Err(ControlError::NotAMutation(action))
    }
}
