use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterConfigError {
    #[error("Invalid suppression regex '{pattern}': {source}")]
    InvalidSuppressRegex {
        pattern: String,
        source: regex::Error,
    },

    #[error("Unknown secret handling mode '{0}', expected suppress, show or decode")]
    UnknownSecretHandling(String),
}
