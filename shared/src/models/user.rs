use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Accepts a rank sent either as a string or as a number.
fn loose_rank<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(rank)) => Some(rank),
        Some(serde_json::Value::Number(rank)) => Some(rank.to_string()),
        _ => None,
    })
}

/// The signed-in account as cached by the client. `wallet_balance` is a
/// snapshot; the API owns the real balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub wallet_balance: f64,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default, deserialize_with = "loose_rank")]
    pub rank: Option<String>,
    #[serde(default, with = "crate::timestamp::optional")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn with_balance(&self, wallet_balance: f64) -> Self {
        Self {
            wallet_balance,
            ..self.clone()
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn player(id: i64, wallet_balance: f64) -> User {
        User {
            id,
            username: format!("user{}", id),
            email: format!("user{}@example.com", id),
            wallet_balance,
            is_admin: false,
            rank: None,
            created_at: None,
        }
    }

    pub fn admin(id: i64) -> User {
        User {
            is_admin: true,
            username: "admin".to_string(),
            ..player(id, 0.0)
        }
    }
}
