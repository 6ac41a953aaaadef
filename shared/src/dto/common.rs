use serde::{Deserialize, Serialize};

use crate::error::SharedError;

/// Error body returned with non-success statuses. The API uses `error` on
/// most routes and `message` on a few; the registration route may also ask
/// for an explicit confirmation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub requires_confirmation: bool,
    #[serde(default)]
    pub confirmation_message: Option<String>,
}

impl ErrorResponse {
    /// The human-readable reason, whichever field carries it.
    pub fn reason(&self) -> String {
        self.error
            .clone()
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| "Unknown error occurred".to_string())
    }

    /// Converts the body into the client error taxonomy.
    pub fn into_error(self, status: u16) -> SharedError {
        if self.requires_confirmation {
            let prompt = self
                .confirmation_message
                .clone()
                .unwrap_or_else(|| self.reason());
            return SharedError::ConfirmationRequired(prompt);
        }
        if status == 404 {
            return SharedError::NotFound(self.reason());
        }
        SharedError::Api {
            status,
            message: self.reason(),
        }
    }
}

/// Query parameters for paged list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    pub per_page: u32,
}

impl PageQuery {
    pub fn to_query_string(self) -> String {
        format!("per_page={}", self.per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_reason_prefers_error_then_message() {
        let both = ErrorResponse {
            error: Some("Contest is full".into()),
            message: Some("ignored".into()),
            ..Default::default()
        };
        assert_eq!(both.reason(), "Contest is full");

        let message_only: ErrorResponse =
            serde_json::from_str(r#"{"message": "Invalid amount"}"#).unwrap();
        assert_eq!(message_only.reason(), "Invalid amount");

        assert_eq!(ErrorResponse::default().reason(), "Unknown error occurred");
    }

    #[test]
    fn test_into_error_confirmation() {
        let body: ErrorResponse = serde_json::from_str(
            r#"{"requires_confirmation": true, "confirmation_message": "Really pay 50₹?"}"#,
        )
        .unwrap();
        assert_eq!(
            body.into_error(400),
            SharedError::ConfirmationRequired("Really pay 50₹?".into())
        );
    }

    #[test]
    fn test_into_error_status_mapping() {
        let body = ErrorResponse {
            error: Some("No registration".into()),
            ..Default::default()
        };
        assert_eq!(
            body.clone().into_error(404),
            SharedError::NotFound("No registration".into())
        );
        assert_eq!(
            body.into_error(409),
            SharedError::Api {
                status: 409,
                message: "No registration".into()
            }
        );
    }
}
