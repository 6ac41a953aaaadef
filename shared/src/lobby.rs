//! Participant roster shown in the contest lobby.

use std::collections::BTreeMap;

use crate::models::contest::GameType;
use crate::models::registration::Registration;

/// How the lobby lays out competitors.
#[derive(Debug, Clone, PartialEq)]
pub enum Roster<'a> {
    /// Solo contests list individual seats in seat order.
    Seats(Vec<&'a Registration>),
    /// Team contests group seats by team number; registrations without a
    /// team land under team 0.
    Teams(BTreeMap<u32, Vec<&'a Registration>>),
}

impl Roster<'_> {
    pub fn len(&self) -> usize {
        match self {
            Roster::Seats(seats) => seats.len(),
            Roster::Teams(teams) => teams.values().map(Vec::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Drops admin bookkeeping rows and orders the rest by seat.
pub fn participants(registrations: &[Registration]) -> Vec<&Registration> {
    let mut list: Vec<_> = registrations.iter().filter(|r| r.is_participant()).collect();
    list.sort_by_key(|r| r.seat_number);
    list
}

pub fn roster(game_type: GameType, registrations: &[Registration]) -> Roster<'_> {
    let list = participants(registrations);
    if !game_type.is_team() {
        return Roster::Seats(list);
    }
    let mut teams: BTreeMap<u32, Vec<&Registration>> = BTreeMap::new();
    for registration in list {
        teams
            .entry(registration.team_number.unwrap_or(0))
            .or_default()
            .push(registration);
    }
    Roster::Teams(teams)
}
