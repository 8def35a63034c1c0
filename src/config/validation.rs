//! Configuration validation utilities.
//!
//! Provides validation for configuration values, returning warnings for
//! non-fatal issues that should be logged but don't prevent startup.

use super::types::AppConfig;

/// Non-fatal validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    /// The field that has an issue.
    pub field: String,
    /// A description of the issue.
    pub message: String,
}

/// Validate the entire config, returning warnings for non-fatal issues.
pub fn validate_config(config: &AppConfig) -> Vec<ValidationWarning> {
    let mut warnings = vec![];

    for (i, app_id) in config.exclude_app_ids.iter().enumerate() {
        if app_id.trim().is_empty() {
            warnings.push(ValidationWarning {
                field: format!("exclude_app_ids[{}]", i),
                message: "Empty app id excludes windows that report no app id.".to_string(),
            });
        } else if app_id.trim() != app_id {
            warnings.push(ValidationWarning {
                field: format!("exclude_app_ids[{}]", i),
                message: format!(
                    "App id '{}' has surrounding whitespace and will never match.",
                    app_id
                ),
            });
        }
    }

    warnings
}
