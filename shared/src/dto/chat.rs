use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{Result, SharedError};
use crate::models::chat::{ChatMessage, Participant};

/// Body of send, announce and edit message requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct MessageBody {
    #[validate(length(min = 1, max = 1000, message = "Message must be between 1 and 1000 characters"))]
    pub message: String,
}

impl MessageBody {
    /// Trims the draft; blank drafts are not sent.
    pub fn from_draft(draft: &str) -> Result<Self> {
        let body = Self {
            message: draft.trim().to_string(),
        };
        body.validate().map_err(SharedError::from)?;
        Ok(body)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageList {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParticipantList {
    #[serde(default)]
    pub participants: Vec<Participant>,
}
