use std::path::Path;

use thiserror::Error;

/// Validation failure for a single user-supplied value.
///
/// Always recoverable: the prompt step re-displays the error and blocks for
/// another attempt.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The named filesystem entry is absent.
    #[error("Error: {0} file does not exist.")]
    FileNotFound(String),

    /// The value is not in the allowed set.
    #[error("Invalid option specified")]
    InvalidChoice,

    /// The value is empty where a non-empty value is required.
    #[error("Please provide a valid input")]
    Empty,
}

/// Rule applied to one prompt value.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// The value must name an existing file. The filesystem is checked on
    /// every call, so a file created between attempts is accepted on the
    /// next prompt.
    FileExists,
    /// The value must be one of the allowed literals.
    OneOf(&'static [&'static str]),
    /// The value must be non-empty.
    NonEmpty,
    /// Anything goes, empty included.
    Optional,
}

/// Validate `value` against `rule`, returning the accepted value unchanged.
pub fn validate(value: &str, rule: &Rule) -> Result<String, ValidationError> {
    match rule {
        Rule::FileExists => {
            if Path::new(value).is_file() {
                Ok(value.to_string())
            } else if value.is_empty() {
                Err(ValidationError::Empty)
            } else {
                Err(ValidationError::FileNotFound(value.to_string()))
            }
        }
        Rule::OneOf(allowed) => {
            if allowed.contains(&value) {
                Ok(value.to_string())
            } else {
                Err(ValidationError::InvalidChoice)
            }
        }
        Rule::NonEmpty => {
            if value.trim().is_empty() {
                Err(ValidationError::Empty)
            } else {
                Ok(value.to_string())
            }
        }
        Rule::Optional => Ok(value.to_string()),
    }
}
