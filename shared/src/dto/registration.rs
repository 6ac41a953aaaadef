use serde::{Deserialize, Serialize};

use crate::models::registration::{PlayerDetails, Registration};

/// Body of `POST /contests/{id}/register`.
///
/// The only constructor sets `confirmed`, so a request built by this crate
/// always carries the flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisterRequest {
    #[serde(flatten)]
    players: PlayerDetails,
    confirmed: bool,
}

impl RegisterRequest {
    pub fn confirmed(players: PlayerDetails) -> Self {
        Self {
            players,
            confirmed: true,
        }
    }

    pub fn players(&self) -> &PlayerDetails {
        &self.players
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }
}

/// `{ "registration": ... }` as returned by the registration routes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationEnvelope {
    #[serde(default)]
    pub registration: Option<Registration>,
}

/// `GET /contests/{id}/registrations` and `GET /user/registrations`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistrationList {
    #[serde(default)]
    pub registrations: Vec<Registration>,
}

impl RegistrationList {
    pub fn contains_contest(&self, contest_id: i64) -> bool {
        self.registrations.iter().any(|r| r.contest_id == contest_id)
    }
}
