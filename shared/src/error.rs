use serde::{Deserialize, Serialize};
use serde_json::Error as JsonError;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum SharedError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    MissingField(String),

    #[error("Insufficient wallet balance. You need {needed}₹ but have {available}₹. Please add funds to your wallet.")]
    InsufficientBalance { needed: f64, available: f64 },

    #[error("{0}")]
    ConfirmationRequired(String),

    #[error("The edit window for this item has closed")]
    EditWindowClosed,

    #[error("{0}")]
    NotAllowed(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conversion error: {0}")]
    Conversion(String),
}

impl SharedError {
    /// True for failures the API reported with a non-success status.
    pub fn is_api(&self) -> bool {
        matches!(self, SharedError::Api { .. })
    }

    /// True for failures raised before any request left the client.
    pub fn is_client_side(&self) -> bool {
        matches!(
            self,
            SharedError::Validation(_)
                | SharedError::MissingField(_)
                | SharedError::InsufficientBalance { .. }
                | SharedError::EditWindowClosed
                | SharedError::NotAllowed(_)
        )
    }

    /// Prefixes the message with the operation that failed, e.g.
    /// "Registration failed: contest is full".
    pub fn context(&self, operation: &str) -> String {
        format!("{}: {}", operation, self)
    }
}

impl From<ValidationErrors> for SharedError {
    fn from(errors: ValidationErrors) -> Self {
        // Surface the first human-readable message rather than the field dump.
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| errors.to_string());
        Self::Validation(message)
    }
}

impl From<JsonError> for SharedError {
    fn from(error: JsonError) -> Self {
        Self::Conversion(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SharedError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_api_error_displays_server_message() {
        let err = SharedError::Api {
            status: 400,
            message: "Contest is full".to_string(),
        };
        assert_eq!(err.to_string(), "Contest is full");
        assert_eq!(err.context("Registration failed"), "Registration failed: Contest is full");
        assert!(err.is_api());
        assert!(!err.is_client_side());
    }

    #[test]
    fn test_insufficient_balance_message_names_both_amounts() {
        let err = SharedError::InsufficientBalance {
            needed: 50.0,
            available: 30.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("50₹"));
        assert!(msg.contains("30₹"));
        assert!(err.is_client_side());
    }

    #[test]
    fn test_json_error_converts_to_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let err: SharedError = json_err.into();
        assert!(matches!(err, SharedError::Conversion(_)));
    }

    #[test]
    fn test_error_round_trips_through_json() {
        let err = SharedError::NotAllowed("no".to_string());
        let json = serde_json::to_string(&err).unwrap();
        let back: SharedError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, back);
    }
}
