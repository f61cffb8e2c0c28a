//! Configuration for the sweep
//!
//! The dry-run switch lives here and is threaded into the corrector at
//! construction; there is no module-level mode flag. Loadable from a
//! TOML file with the following structure:
//!
//! ```toml
//! dry_run = false
//! publish = true
//! report_page = "Wikidata:WikiProject Books/ISBN errors"
//! oauth_token = "..."
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Everything externally meaningful about a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// SPARQL endpoint for the initial property scans
    pub query_endpoint: String,
    /// Action API endpoint for claim and page writes
    pub api_endpoint: String,
    /// Property holding ISBN-13 values
    pub isbn13_property: String,
    /// Property holding ISBN-10 values
    pub isbn10_property: String,
    /// Fixed, well-known page the error report is published to
    pub report_page: String,
    /// User-Agent sent with every request
    pub user_agent: String,
    /// OAuth bearer token; required for any write
    pub oauth_token: Option<String>,
    /// When true (the default), log intended writes without applying them
    pub dry_run: bool,
    /// When false, skip the report page even in live mode
    pub publish: bool,
    /// Edit summary for claim corrections
    pub claim_summary: String,
    /// Edit summary for report page updates
    pub report_summary: String,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            query_endpoint: wikidata_client::DEFAULT_QUERY_ENDPOINT.to_string(),
            api_endpoint: wikidata_client::DEFAULT_API_ENDPOINT.to_string(),
            isbn13_property: "P212".to_string(),
            isbn10_property: "P957".to_string(),
            report_page: "Wikidata:WikiProject Books/ISBN errors".to_string(),
            user_agent: "isbnsweep/0.1 (https://github.com/isbnsweep/isbnsweep)".to_string(),
            oauth_token: None,
            dry_run: true,
            publish: true,
            claim_summary: "Fix ISBN hyphenation".to_string(),
            report_summary: "Update ISBN error report".to_string(),
        }
    }
}

/// Errors that can occur when loading a config file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("TOML parse error: {0}")]
    Parse(String),
}

impl SweepConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        toml::from_str(&text).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SweepConfig::default();
        assert!(config.dry_run);
        assert!(config.publish);
        assert_eq!(config.isbn13_property, "P212");
        assert_eq!(config.isbn10_property, "P957");
        assert!(config.oauth_token.is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: SweepConfig = toml::from_str(
            r#"
            dry_run = false
            report_page = "User:Example/ISBN"
            oauth_token = "secret"
            "#,
        )
        .unwrap();
        assert!(!config.dry_run);
        assert_eq!(config.report_page, "User:Example/ISBN");
        assert_eq!(config.oauth_token.as_deref(), Some("secret"));
        assert_eq!(config.isbn13_property, "P212");
    }
}
