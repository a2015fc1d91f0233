//! Semantic validation of a parsed configuration.

use super::{ConfigError, PipelineConfig};
use std::collections::HashSet;

/// Check fields serde cannot: column names, chart heights, output filenames.
pub fn validate(config: &PipelineConfig) -> Result<(), ConfigError> {
    let columns = config.input.columns.all();
    for (field, name) in ["title", "author", "publication_date"].iter().zip(columns) {
        if name.trim().is_empty() {
            return Err(ConfigError::Invalid(format!(
                "input.columns.{field} must not be empty"
            )));
        }
    }
    let distinct: HashSet<&str> = columns.into_iter().collect();
    if distinct.len() != columns.len() {
        return Err(ConfigError::Invalid(
            "input.columns must name three different headers".to_string(),
        ));
    }

    if config.input.path.as_os_str().is_empty() {
        return Err(ConfigError::Invalid("input.path must not be empty".to_string()));
    }
    if matches!(config.input.sheet.as_deref(), Some(s) if s.trim().is_empty()) {
        return Err(ConfigError::Invalid(
            "input.sheet must not be empty when set".to_string(),
        ));
    }

    config
        .report
        .validate()
        .map_err(|e| ConfigError::Invalid(e.to_string()))
}
