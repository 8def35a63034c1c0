//! Configuration type definitions.

use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// App ids hidden from the window list (e.g. the launcher itself).
    pub exclude_app_ids: Vec<String>,
    /// Sort launcher items by label instead of compositor order.
    pub sort_lexically: bool,
    /// Default output format of `wlctrl list` and `wlctrl items`.
    pub list_format: ListFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            exclude_app_ids: Vec::new(),
            sort_lexically: true,
            list_format: ListFormat::Text,
        }
    }
}

/// Output format for listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListFormat {
    /// Tab-separated lines
    #[default]
    Text,
    /// A JSON array
    Json,
}
