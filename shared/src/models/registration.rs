use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::edit_window::EditWindow;
use crate::models::contest::GameType;

/// Highest player slot a registration can carry (Squad).
pub const MAX_PLAYERS: usize = 4;

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Which half of a player slot a form field refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerField {
    Name,
    Uid,
}

/// The in-game identities entered for a registration, flattened the way the
/// API sends them (`player1_name`, `player1_uid`, ... `player4_uid`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerDetails {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub player1_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub player1_uid: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub player2_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub player2_uid: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub player3_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub player3_uid: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub player4_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub player4_uid: String,
    /// Optional in-game team or clan name. Only the lobby editor sets it;
    /// left empty it is omitted from request bodies.
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "String::is_empty"
    )]
    pub game_name: String,
}

impl PlayerDetails {
    /// Name and UID of player `n` (1-based). Out-of-range slots read as empty.
    pub fn player(&self, n: usize) -> (&str, &str) {
        match n {
            1 => (self.player1_name.as_str(), self.player1_uid.as_str()),
            2 => (self.player2_name.as_str(), self.player2_uid.as_str()),
            3 => (self.player3_name.as_str(), self.player3_uid.as_str()),
            4 => (self.player4_name.as_str(), self.player4_uid.as_str()),
            _ => ("", ""),
        }
    }

    fn slot_mut(&mut self, n: usize, field: PlayerField) -> Option<&mut String> {
        let slot = match (n, field) {
            (1, PlayerField::Name) => &mut self.player1_name,
            (1, PlayerField::Uid) => &mut self.player1_uid,
            (2, PlayerField::Name) => &mut self.player2_name,
            (2, PlayerField::Uid) => &mut self.player2_uid,
            (3, PlayerField::Name) => &mut self.player3_name,
            (3, PlayerField::Uid) => &mut self.player3_uid,
            (4, PlayerField::Name) => &mut self.player4_name,
            (4, PlayerField::Uid) => &mut self.player4_uid,
            _ => return None,
        };
        Some(slot)
    }

    /// Returns a copy with one field replaced; used by form inputs.
    pub fn with(&self, n: usize, field: PlayerField, value: String) -> Self {
        let mut next = self.clone();
        if let Some(slot) = next.slot_mut(n, field) {
            *slot = value;
        }
        next
    }

    pub fn with_game_name(&self, game_name: String) -> Self {
        Self {
            game_name,
            ..self.clone()
        }
    }

    /// Filled players for the given format, skipping slots it does not use.
    pub fn roster(&self, game_type: GameType) -> Vec<(usize, &str, &str)> {
        (1..=game_type.player_count())
            .map(|n| {
                let (name, uid) = self.player(n);
                (n, name, uid)
            })
            .filter(|(_, name, _)| !name.is_empty())
            .collect()
    }
}

/// A user's fee-paid entry into a contest. Seat and team numbers are
/// assigned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub id: i64,
    pub user_id: i64,
    pub contest_id: i64,
    #[serde(default)]
    pub seat_number: u32,
    #[serde(default)]
    pub team_number: Option<u32>,
    #[serde(flatten)]
    pub players: PlayerDetails,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

impl Registration {
    /// Owner edits are accepted only inside the edit window.
    pub fn can_edit(&self, window: EditWindow, now: DateTime<Utc>) -> bool {
        window.registration_can_edit(self.created_at, now)
    }

    /// Admin accounts and seat 0 are bookkeeping rows, not competitors.
    pub fn is_participant(&self) -> bool {
        let admin_name = self
            .username
            .as_deref()
            .map(|u| u.to_lowercase().contains("admin"))
            .unwrap_or(false);
        !admin_name && !self.is_admin && self.seat_number != 0
    }
}
