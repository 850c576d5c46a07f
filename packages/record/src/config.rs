//! Domain configuration injected into the [`Validator`](crate::Validator).

use std::{fs, path};

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use thiserror::Error;

lazy_static! {
    static ref DONATION_DOMAIN: DomainConfig = DomainConfig {
        projects: ["FAO", "ILO", "IMO", "ITU", "WHO"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        item_types: [
            "water",
            "clothes",
            "grains",
            "money",
            "toys",
            "medicine",
            "tents",
            "packed food",
            "flashlight",
            "matchbox",
            "lantern",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
        key_length: 64,
    };
}

/// Errors loading a [`DomainConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read domain config {}: {source}", path.display())]
    Io {
        path: path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid domain config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid domain config: {0}")]
    Invalid(String),
}

/// The fixed vocabularies records are checked against.
///
/// Missing fields in a config file fall back to the donation defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DomainConfig {
    /// Known project codes.
    pub projects: Vec<String>,
    /// Known item categories.
    pub item_types: Vec<String>,
    /// Exact length of record keys (transaction ids).
    pub key_length: usize,
}

impl Default for DomainConfig {
    fn default() -> Self {
        DONATION_DOMAIN.clone()
    }
}

impl DomainConfig {
    pub fn new(
        projects: impl IntoIterator<Item = impl Into<String>>,
        item_types: impl IntoIterator<Item = impl Into<String>>,
        key_length: usize,
    ) -> Self {
        Self {
            projects: projects.into_iter().map(Into::into).collect(),
            item_types: item_types.into_iter().map(Into::into).collect(),
            key_length,
        }
    }

    /// Parse a config from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: DomainConfig = serde_json::from_str(text)?;
        config.check()?;
        Ok(config)
    }

    /// Load a config from a JSON file.
    pub fn from_json_file(file: &path::Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(file).map_err(|source| ConfigError::Io {
            path: file.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.key_length == 0 {
            return Err(ConfigError::Invalid(
                "keyLength must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_donation_domain() {
        let config = DomainConfig::default();
        assert_eq!(config.projects, vec!["FAO", "ILO", "IMO", "ITU", "WHO"]);
        assert!(config.item_types.iter().any(|t| t == "packed food"));
        assert_eq!(config.item_types.len(), 11);
        assert_eq!(config.key_length, 64);
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let config = DomainConfig::from_json_str(r#"{"projects": ["UNICEF"]}"#).unwrap();
        assert_eq!(config.projects, vec!["UNICEF"]);
        assert_eq!(config.item_types, DomainConfig::default().item_types);
        assert_eq!(config.key_length, 64);
    }

    #[test]
    fn zero_key_length_is_rejected() {
        let result = DomainConfig::from_json_str(r#"{"keyLength": 0}"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("domain.json");
        fs::write(&file, r#"{"itemTypes": ["books"], "keyLength": 8}"#).unwrap();

        let config = DomainConfig::from_json_file(&file).unwrap();
        assert_eq!(config.item_types, vec!["books"]);
        assert_eq!(config.key_length, 8);
    }

    #[test]
    fn missing_file_names_path() {
        let err = DomainConfig::from_json_file(path::Path::new("/nonexistent/domain.json"))
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/domain.json"));
    }
}
