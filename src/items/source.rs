//! Window source feeding a launcher's item list.

use std::sync::Arc;
use tracing::debug;

use super::window::WindowItem;
use crate::compositor::{Compositor, filter_excluded_windows};
use crate::config::AppConfig;
use crate::error::ControlError;
use crate::toplevel::Action;

/// Lists every window on every workspace as launcher items.
pub struct WindowSource {
    compositor: Arc<dyn Compositor>,
    exclude_app_ids: Vec<String>,
    sort_lexically: bool,
}

impl WindowSource {
    pub fn new(compositor: Arc<dyn Compositor>, config: &AppConfig) -> Self {
        Self {
            compositor,
            exclude_app_ids: config.exclude_app_ids.clone(),
            sort_lexically: config.sort_lexically,
        }
    }

    pub fn name(&self) -> &'static str {
        "Window List"
    }

    pub fn description(&self) -> &'static str {
        "All windows on all workspaces"
    }

    pub fn icon_name(&self) -> &'static str {
        "preferences-system-windows"
    }

    /// Fetch the current windows.
    ///
    /// A listing cut short by a disconnect yields no items.
    pub fn items(&self) -> Result<Vec<WindowItem>, ControlError> {
        let windows = self.compositor.list_windows()?;
        let windows = filter_excluded_windows(windows, &self.exclude_app_ids);

        let mut items: Vec<WindowItem> =
            windows.into_iter().map(WindowItem::from_toplevel).collect();
        if self.sort_lexically {
            items.sort_by_cached_key(|item| item.label.to_lowercase());
        }

        debug!(
            compositor = self.compositor.name(),
            count = items.len(),
            "Collected window items"
        );
        Ok(items)
    }

    /// Run an action on an item from this source.
    ///
    /// The window must still belong to the item's application.
    pub fn run(&self, item: &WindowItem, action: Action) -> Result<(), ControlError> {
        self.compositor.perform(action, item.target())
    }
}
