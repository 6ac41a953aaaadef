use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Prefix the API prepends to admin announcements.
pub const ANNOUNCEMENT_PREFIX: &str = "📢 ANNOUNCEMENT: ";

/// A message in a contest lobby chat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: i64,
    pub contest_id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub username: String,
    /// Whether the author is an admin.
    #[serde(default)]
    pub is_admin: bool,
    pub message: String,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    /// Sent through the announcement endpoint.
    #[serde(default)]
    pub is_admin_message: bool,
}

impl ChatMessage {
    /// Body without the announcement prefix, used to seed the edit box.
    pub fn editable_text(&self) -> &str {
        self.message
            .strip_prefix(ANNOUNCEMENT_PREFIX)
            .unwrap_or(&self.message)
    }

    /// Avatar initial; "U" when the author has no username.
    pub fn initial(&self) -> String {
        self.username
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "U".to_string())
    }
}

/// A user currently registered in the contest, as listed by
/// `GET /contests/{id}/participants`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub user_id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub seat_number: Option<u32>,
    #[serde(default)]
    pub team_number: Option<u32>,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::TimeZone;

    pub fn sent_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap()
    }

    pub fn message(id: i64, user_id: i64, body: &str) -> ChatMessage {
        ChatMessage {
            id,
            contest_id: 7,
            user_id,
            username: format!("user{}", user_id),
            is_admin: false,
            message: body.to_string(),
            created_at: sent_at(),
            is_admin_message: false,
        }
    }
}
