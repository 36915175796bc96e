use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::FilterConfigError;

pub const DEFAULT_CONTEXT_LINES: usize = 3;

/// How secret material in diff lines is treated
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SecretHandling {
    /// Replace values that look like secret material with a redaction marker
    #[default]
    Suppress,
    /// Leave secret values untouched
    Show,
    /// Append the base64-decoded value where decoding succeeds
    Decode,
}

impl std::str::FromStr for SecretHandling {
    type Err = FilterConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "suppress" => Ok(SecretHandling::Suppress),
            "show" => Ok(SecretHandling::Show),
            "decode" => Ok(SecretHandling::Decode),
            other => Err(FilterConfigError::UnknownSecretHandling(other.to_string())),
        }
    }
}

/// User-selected exclusions applied before display and statistics
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FilterOptions {
    /// Remove whole metadata.* blocks (labels, annotations, managed fields, ...)
    pub ignore_labels: bool,
    pub secret_handling: SecretHandling,
    /// Context lines kept around each change when trimming groups
    pub context_lines: usize,
    /// Kinds whose blocks are dropped entirely, matched case-insensitively
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suppress_kinds: Vec<String>,
    /// Lines matching this pattern are dropped; invalid patterns are skipped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suppress_regex: Option<String>,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            ignore_labels: false,
            secret_handling: SecretHandling::default(),
            context_lines: DEFAULT_CONTEXT_LINES,
            suppress_kinds: Vec::new(),
            suppress_regex: None,
        }
    }
}

impl FilterOptions {
    /// Check the suppression pattern without applying it. The filter chain
    /// itself stays fail-open; this is for callers that want to warn early.
    pub fn validate(&self) -> Result<(), FilterConfigError> {
        if let Some(pattern) = &self.suppress_regex {
            Regex::new(pattern).map_err(|source| FilterConfigError::InvalidSuppressRegex {
                pattern: pattern.clone(),
                source,
            })?;
        }
        Ok(())
    }

    pub fn suppresses_kind(&self, kind: &str) -> bool {
        self.suppress_kinds
            .iter()
            .any(|k| k.eq_ignore_ascii_case(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let options = FilterOptions::default();
        assert!(!options.ignore_labels);
        assert_eq!(options.secret_handling, SecretHandling::Suppress);
        assert_eq!(options.context_lines, DEFAULT_CONTEXT_LINES);
        assert!(options.suppress_kinds.is_empty());
        assert!(options.suppress_regex.is_none());
    }

    #[test]
    fn test_deserialize_partial() {
        let options: FilterOptions = serde_json::from_value(json!({
            "ignore_labels": true,
            "secret_handling": "decode",
            "suppress_kinds": ["ConfigMap", "secret"]
        }))
        .unwrap();

        assert!(options.ignore_labels);
        assert_eq!(options.secret_handling, SecretHandling::Decode);
        assert_eq!(options.context_lines, DEFAULT_CONTEXT_LINES);
        assert_eq!(options.suppress_kinds.len(), 2);
    }

    #[test]
    fn test_suppresses_kind_case_insensitive() {
        let options = FilterOptions {
            suppress_kinds: vec!["configmap".to_string()],
            ..Default::default()
        };
        assert!(options.suppresses_kind("ConfigMap"));
        assert!(options.suppresses_kind("CONFIGMAP"));
        assert!(!options.suppresses_kind("Secret"));
    }

    #[test]
    fn test_validate_rejects_bad_regex() {
        let options = FilterOptions {
            suppress_regex: Some("[invalid".to_string()),
            ..Default::default()
        };
        assert!(options.validate().is_err());

        let options = FilterOptions {
            suppress_regex: Some("^checksum/".to_string()),
            ..Default::default()
        };
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_secret_handling_from_str() {
        assert_eq!("suppress".parse::<SecretHandling>().unwrap(), SecretHandling::Suppress);
        assert_eq!("decode".parse::<SecretHandling>().unwrap(), SecretHandling::Decode);
        assert!("redact".parse::<SecretHandling>().is_err());
    }
}
