//! Error types for the assistant.
//!
//! All errors are construction-time: a validated engine never fails at
//! resolution time.

use aerogrid_core::error::AerogridError;

/// Errors from knowledge-base loading and engine construction.
#[derive(Debug, thiserror::Error)]
pub enum AssistError {
    #[error("default response cannot be empty")]
    EmptyDefault,
    #[error("duplicate pattern (case-insensitive): {0:?}")]
    DuplicatePattern(String),
    #[error("empty response for pattern {0:?}")]
    EmptyResponse(String),
    #[error("pattern normalizes to nothing: {0:?}")]
    DegeneratePattern(String),
    #[error("override rule has no tokens")]
    EmptyOverride,
    #[error("override token normalizes to nothing: {0:?}")]
    DegenerateOverrideToken(String),
    #[error("failed to read knowledge file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse knowledge file: {0}")]
    Parse(String),
}

impl From<AssistError> for AerogridError {
    fn from(err: AssistError) -> Self {
        AerogridError::Assist(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            AssistError::EmptyDefault.to_string(),
            "default response cannot be empty"
        );
        assert_eq!(
            AssistError::DuplicatePattern("Hotspot".to_string()).to_string(),
            "duplicate pattern (case-insensitive): \"Hotspot\""
        );
        assert_eq!(
            AssistError::DegeneratePattern("?!".to_string()).to_string(),
            "pattern normalizes to nothing: \"?!\""
        );
        assert_eq!(
            AssistError::EmptyOverride.to_string(),
            "override rule has no tokens"
        );
        assert_eq!(
            AssistError::Parse("bad toml".to_string()).to_string(),
            "failed to parse knowledge file: bad toml"
        );
    }

    #[test]
    fn test_conversion_to_aerogrid_error() {
        let err: AerogridError = AssistError::EmptyDefault.into();
        assert!(matches!(err, AerogridError::Assist(_)));
        assert!(err.to_string().contains("default response"));
    }
}
