use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Team format of a contest. Decides how many player slots a registration carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameType {
    Solo,
    Duo,
    Squad,
}

impl GameType {
    /// Number of name/UID pairs a registration must fill.
    pub fn player_count(self) -> usize {
        match self {
            GameType::Solo => 1,
            GameType::Duo => 2,
            GameType::Squad => 4,
        }
    }

    pub fn is_team(self) -> bool {
        self != GameType::Solo
    }

    /// Footnote shown under the registration form.
    pub fn requirement_hint(self) -> &'static str {
        match self {
            GameType::Solo => "Solo: 1 player name + 1 UID required",
            GameType::Duo => "Duo: 2 player names + 2 UIDs required",
            GameType::Squad => "Squad: 4 player names + 4 UIDs required",
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameType::Solo => "Solo",
            GameType::Duo => "Duo",
            GameType::Squad => "Squad",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContestStatus {
    Open,
    Full,
    Ongoing,
    Completed,
    Cancelled,
}

impl ContestStatus {
    /// Statuses offered by the catalogue filter, in display order.
    pub const FILTERABLE: [ContestStatus; 4] = [
        ContestStatus::Open,
        ContestStatus::Full,
        ContestStatus::Ongoing,
        ContestStatus::Completed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContestStatus::Open => "open",
            ContestStatus::Full => "full",
            ContestStatus::Ongoing => "ongoing",
            ContestStatus::Completed => "completed",
            ContestStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ContestStatus::Open => "Open for Registration",
            ContestStatus::Full => "Full",
            ContestStatus::Ongoing => "Ongoing",
            ContestStatus::Completed => "Completed",
            ContestStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for ContestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A priced competitive event as returned by `GET /contests/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contest {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub game_name: String,
    pub game_type: GameType,
    pub entry_fee: f64,
    #[serde(default)]
    pub prize_pool: f64,
    pub max_slots: u32,
    pub current_slots: u32,
    #[serde(with = "crate::timestamp")]
    pub match_time: DateTime<Utc>,
    pub status: ContestStatus,
    #[serde(default)]
    pub registration_locked: bool,
    #[serde(default)]
    pub contest_info: Option<String>,
    #[serde(default)]
    pub creator_username: Option<String>,
}

impl Contest {
    /// New registrations are accepted only while the contest is open and unlocked.
    pub fn accepts_registrations(&self) -> bool {
        self.status == ContestStatus::Open && !self.registration_locked
    }

    pub fn remaining_slots(&self) -> u32 {
        self.max_slots.saturating_sub(self.current_slots)
    }

    /// Client-side balance precheck. The API still decides.
    pub fn is_affordable(&self, balance: f64) -> bool {
        balance >= self.entry_fee
    }

    /// Fill ratio in percent, for the slots progress bar.
    pub fn fill_percent(&self) -> f64 {
        if self.max_slots == 0 {
            return 100.0;
        }
        f64::from(self.current_slots) / f64::from(self.max_slots) * 100.0
    }

    /// Catalogue search: case-insensitive match on title or game type.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.title.to_lowercase().contains(&term)
            || self.game_type.to_string().to_lowercase().contains(&term)
    }

    /// Why registration is closed, when it is.
    pub fn closed_reason(&self) -> Option<&'static str> {
        if self.registration_locked {
            Some("Registration has been locked by the admin.")
        } else if self.status != ContestStatus::Open {
            Some("This contest is no longer accepting new registrations.")
        } else {
            None
        }
    }
}
