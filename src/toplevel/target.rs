use std::fmt;

use super::{WindowId, WindowMap};
use crate::error::ControlError;

/// Selects windows by app id and/or title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowMatcher {
    /// Exact app id
    pub app_id: Option<String>,
    /// Case-insensitive substring of the title
    pub title: Option<String>,
}

impl WindowMatcher {
    pub fn is_empty(&self) -> bool {
        self.app_id.is_none() && self.title.is_none()
    }

    pub fn matches(&self, app_id: &str, title: &str) -> bool {
        let app_ok = self.app_id.as_deref().is_none_or(|want| want == app_id);
        let title_ok = self
            .title
            .as_deref()
            .is_none_or(|want| title.to_lowercase().contains(&want.to_lowercase()));
        app_ok && title_ok
    }
}

impl fmt::Display for WindowMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.app_id, &self.title) {
            (Some(app_id), Some(title)) => write!(f, "app_id={app_id} title~{title}"),
            (Some(app_id), None) => write!(f, "app_id={app_id}"),
            (None, Some(title)) => write!(f, "title~{title}"),
            (None, None) => f.write_str("any window"),
        }
    }
}

/// The window an action applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Id(WindowId),
    /// An id taken from an earlier listing, still expected to show `app_id`.
    ///
    /// Ids are only stable within one connection, so a later session may
    /// hand the same id to another window.
    Checked { id: WindowId, app_id: String },
    Matching(WindowMatcher),
}

impl Target {
    /// Pick exactly one window from the registry snapshot.
    pub fn resolve(&self, windows: &WindowMap) -> Result<WindowId, ControlError> {
        match self {
            Target::Id(id) if windows.contains_key(id) => Ok(*id),
            Target::Id(id) => Err(ControlError::WindowNotFound(*id)),
            Target::Checked { id, app_id } => match windows.get(id) {
                Some(window) if window.app_id == *app_id => Ok(*id),
                Some(_) => Err(ControlError::WindowChanged {
                    id: *id,
                    app_id: app_id.clone(),
                }),
                None => Err(ControlError::WindowNotFound(*id)),
            },
            Target::Matching(matcher) => {
                let found: Vec<WindowId> = windows
                    .values()
                    .filter(|w| matcher.matches(&w.app_id, &w.title))
                    .map(|w| w.id)
                    .collect();
                match found.as_slice() {
                    [id] => Ok(*id),
                    [] => Err(ControlError::NoMatch(matcher.to_string())),
                    _ => Err(ControlError::MultipleMatches {
                        selector: matcher.to_string(),
                        count: found.len(),
                    }),
                }
            }
        }
    }
}

impl From<WindowId> for Target {
    fn from(id: WindowId) -> Self {
        Target::Id(id)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Id(id) => write!(f, "window {id}"),
            Target::Checked { id, app_id } => write!(f, "window {id} ({app_id})"),
            Target::Matching(matcher) => write!(f, "{matcher}"),
        }
    }
}
