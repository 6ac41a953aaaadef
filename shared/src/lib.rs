pub mod models {
    pub mod chat;
    pub mod contest;
    pub mod registration;
    pub mod user;
    pub mod wallet;
}

pub mod dto {
    pub mod auth;
    pub mod chat;
    pub mod common;
    pub mod dashboard;
    pub mod registration;
    pub mod wallet;
}

pub mod catalogue;
pub mod config;
pub mod edit_window;
pub mod error;
pub mod gateway;
pub mod lobby;
pub mod moderation;
pub mod polling;
pub mod registration_flow;
pub mod session;
pub mod timestamp;
pub mod validation;

// Re-export commonly used items
pub use error::{Result, SharedError};

// Re-export models
pub use models::{
    chat::{ChatMessage, Participant},
    contest::{Contest, ContestStatus, GameType},
    registration::{PlayerDetails, PlayerField, Registration},
    user::User,
    wallet::{Transaction, TransactionType, WalletStats},
};

// Re-export DTOs
pub use dto::{
    auth::{CurrentUserResponse, LoginRequest, LoginResponse},
    chat::{MessageBody, MessageList, ParticipantList},
    common::{ErrorResponse, PageQuery},
    dashboard::{JoinedContest, MyContests},
    registration::{RegisterRequest, RegistrationEnvelope, RegistrationList},
    wallet::{AddFundsRequest, AddFundsResponse, TransactionList},
};

pub use gateway::{ChatGateway, ContestGateway};
pub use registration_flow::{FlowEvent, FlowState, RegistrationFlow};
pub use session::{Session, SessionAction};

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_registration_payload_shape() {
        let players = PlayerDetails::default()
            .with(1, PlayerField::Name, "Ghost".to_string())
            .with(1, PlayerField::Uid, "5123".to_string());
        let json = serde_json::to_value(RegisterRequest::confirmed(players)).unwrap();
        assert_eq!(json["player1_name"], "Ghost");
        assert_eq!(json["player1_uid"], "5123");
        assert_eq!(json["confirmed"], true);
    }

    #[test]
    fn test_error_body_to_error() {
        let body: ErrorResponse = serde_json::from_str(
            r#"{"requires_confirmation": true, "confirmation_message": "Sure?"}"#,
        )
        .unwrap();
        assert_eq!(
            body.into_error(400),
            SharedError::ConfirmationRequired("Sure?".to_string())
        );
    }
}
