use thiserror::Error;

/// Top-level error type for the Aerogrid system.
///
/// Each variant wraps a subsystem-specific error. Subsystem crates define
/// their own error types and implement `From<SubsystemError> for
/// AerogridError` so that the `?` operator works seamlessly across crate
/// boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AerogridError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Monitor error: {0}")]
    Monitor(String),

    #[error("Assistant error: {0}")]
    Assist(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Shutdown in progress")]
    ShuttingDown,
}

impl From<toml::de::Error> for AerogridError {
    fn from(err: toml::de::Error) -> Self {
        AerogridError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for AerogridError {
    fn from(err: toml::ser::Error) -> Self {
        AerogridError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for AerogridError {
    fn from(err: serde_json::Error) -> Self {
        AerogridError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Aerogrid operations.
pub type Result<T> = std::result::Result<T, AerogridError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AerogridError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let aero_err: AerogridError = io_err.into();
        assert!(matches!(aero_err, AerogridError::Io(_)));
        assert!(aero_err.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_from_toml_de() {
        let bad_toml = "invalid = [[[";
        let err: std::result::Result<toml::Value, _> = toml::from_str(bad_toml);
        assert!(err.is_err());
        let aero_err: AerogridError = err.unwrap_err().into();
        assert!(matches!(aero_err, AerogridError::Config(_)));
    }

    #[test]
    fn test_error_from_serde_json() {
        let bad_json = "{ invalid json }";
        let err: std::result::Result<serde_json::Value, _> = serde_json::from_str(bad_json);
        assert!(err.is_err());
        let aero_err: AerogridError = err.unwrap_err().into();
        assert!(matches!(aero_err, AerogridError::Serialization(_)));
    }

    #[test]
    fn test_error_display_all_variants() {
        let cases: Vec<(AerogridError, &str)> = vec![
            (
                AerogridError::Config("bad key".to_string()),
                "Configuration error: bad key",
            ),
            (
                AerogridError::Monitor("grid not ready".to_string()),
                "Monitor error: grid not ready",
            ),
            (
                AerogridError::Assist("bad knowledge set".to_string()),
                "Assistant error: bad knowledge set",
            ),
            (
                AerogridError::Api("unreachable".to_string()),
                "API error: unreachable",
            ),
            (
                AerogridError::Serialization("invalid json".to_string()),
                "Serialization error: invalid json",
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.to_string(), expected);
        }
    }

    #[test]
    fn test_result_type_with_question_mark() {
        fn inner() -> Result<String> {
            let io_result: std::result::Result<i32, std::io::Error> = Ok(42);
            let _value = io_result?;
            Ok("success".to_string())
        }

        assert_eq!(inner().unwrap(), "success");
    }

    #[test]
    fn test_error_debug_impl() {
        let err = AerogridError::Config("test debug".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("Config"));
        assert!(debug_str.contains("test debug"));
    }
}
