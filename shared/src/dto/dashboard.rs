use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::contest::{Contest, ContestStatus, GameType};

/// The contest half of a `/my-contests` entry; only what the dashboard shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinedContestInfo {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    pub game_type: GameType,
    #[serde(default)]
    pub status: Option<ContestStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participation {
    #[serde(with = "crate::timestamp")]
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinedContest {
    pub contest: JoinedContestInfo,
    pub participation: Participation,
}

/// `GET /my-contests`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MyContests {
    #[serde(default)]
    pub joined_contests: Vec<JoinedContest>,
}

impl MyContests {
    /// The first `limit` entries, in the order the API sent them.
    pub fn recent(&self, limit: usize) -> &[JoinedContest] {
        &self.joined_contests[..self.joined_contests.len().min(limit)]
    }
}

/// Open contests worth featuring: the first `limit` still taking entries.
pub fn open_preview(contests: &[Contest], limit: usize) -> Vec<&Contest> {
    contests
        .iter()
        .filter(|c| c.status == ContestStatus::Open)
        .take(limit)
        .collect()
}
