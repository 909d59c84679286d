//! Dashboard configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::query::SortSpec;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Table settings that are fixed for the lifetime of a dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    /// Page sizes the user may choose from
    pub page_sizes: Vec<usize>,
    /// Initial page size, one of `page_sizes`
    pub default_page_size: usize,
    /// Initial sort
    pub default_sort: SortSpec,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            page_sizes: vec![5, 10, 25],
            default_page_size: 5,
            default_sort: SortSpec::default(),
        }
    }
}

impl DashboardConfig {
    /// Parse and validate a JSON config. Missing keys take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_sizes.is_empty() {
            return Err(ConfigError::Invalid("page_sizes must not be empty".into()));
        }
        if self.page_sizes.contains(&0) {
            return Err(ConfigError::Invalid("page sizes must be positive".into()));
        }
        if !self.allows_page_size(self.default_page_size) {
            return Err(ConfigError::Invalid(format!(
                "default_page_size {} is not one of {:?}",
                self.default_page_size, self.page_sizes
            )));
        }
        Ok(())
    }

    pub fn allows_page_size(&self, size: usize) -> bool {
        self.page_sizes.contains(&size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SortKey;

    #[test]
    fn test_default_is_valid() {
        assert!(DashboardConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = DashboardConfig::from_json(
            r#"{"default_sort": {"key": "collectedOn", "direction": "descending"}}"#,
        )
        .unwrap();
        assert_eq!(config.page_sizes, vec![5, 10, 25]);
        assert_eq!(config.default_sort, SortSpec::descending(SortKey::CollectedOn));
    }

    #[test]
    fn test_default_page_size_must_be_allowed() {
        let result = DashboardConfig::from_json(r#"{"page_sizes": [10, 20]}"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let result = DashboardConfig::from_json(r#"{"page_sizes": [0, 5]}"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
