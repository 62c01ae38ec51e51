//! Application layer errors

use thiserror::Error;
use crate::domain::entities::CarId;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Command and callback handling errors.
///
/// The `Display` text is what the user sees in chat.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Malformed callback payload: {0}")]
    MalformedPayload(String),

    #[error("Unknown route: {0}")]
    UnknownRoute(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StorageError> for CommandError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(_) => CommandError::NotFound(err.to_string()),
            StorageError::Poisoned => CommandError::Internal(err.to_string()),
        }
    }
}

/// Storage errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("no car with id {0}")]
    NotFound(CarId),

    #[error("store lock poisoned")]
    Poisoned,
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_surface_as_bot_errors() {
        let err: BotError = ConfigError::InvalidValue("insurance.default-page-size".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Configuration error: Invalid value: insurance.default-page-size"
        );
    }

    #[test]
    fn test_storage_errors_map_to_user_messages() {
        assert_eq!(
            CommandError::from(StorageError::NotFound(7)).to_string(),
            "Not found: no car with id 7"
        );
        assert!(matches!(CommandError::from(StorageError::Poisoned), CommandError::Internal(_)));
    }
}
