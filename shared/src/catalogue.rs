//! Which call to action a contest gets in the catalogue and on its details page.

use crate::models::contest::{Contest, ContestStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContestAction {
    EnterLobby,
    Join,
    ViewDetails,
    RegistrationClosed,
}

impl ContestAction {
    pub fn label(self) -> &'static str {
        match self {
            ContestAction::EnterLobby => "See Lobby",
            ContestAction::Join => "Join Contest",
            ContestAction::ViewDetails => "View Details",
            ContestAction::RegistrationClosed => "Registration Closed",
        }
    }
}

/// Catalogue card button and whether it is enabled.
pub fn card_action(contest: &Contest, registered: bool) -> (ContestAction, bool) {
    let enabled = contest.status != ContestStatus::Completed;
    let action = match (registered, contest.status) {
        (true, ContestStatus::Open | ContestStatus::Full) => ContestAction::EnterLobby,
        (true, _) => ContestAction::ViewDetails,
        (false, ContestStatus::Open) => ContestAction::Join,
        (false, _) => ContestAction::ViewDetails,
    };
    (action, enabled)
}

/// Primary button on the details page.
pub fn details_action(contest: &Contest, registered: bool) -> ContestAction {
    if registered {
        ContestAction::EnterLobby
    } else if contest.accepts_registrations() {
        ContestAction::Join
    } else {
        ContestAction::RegistrationClosed
    }
}

/// Applies the search box to an already status-filtered list.
pub fn search<'a>(contests: &'a [Contest], term: &str) -> Vec<&'a Contest> {
    let term = term.trim();
    contests
        .iter()
        .filter(|c| term.is_empty() || c.matches_search(term))
        .collect()
}
