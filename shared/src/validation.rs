//! Client-side checks that run before any request is sent.

use log::debug;

use crate::error::{Result, SharedError};
use crate::models::contest::{Contest, GameType};
use crate::models::registration::PlayerDetails;

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn pair_missing(players: &PlayerDetails, n: usize) -> bool {
    let (name, uid) = players.player(n);
    blank(name) || blank(uid)
}

/// Checks that every slot the format needs is filled. Player 1 is reported
/// field by field; team slots are reported as a group.
pub fn validate_players(game_type: GameType, players: &PlayerDetails) -> Result<()> {
    if blank(&players.player1_name) {
        return Err(SharedError::MissingField("Player 1 name is required".to_string()));
    }
    if blank(&players.player1_uid) {
        return Err(SharedError::MissingField("Player 1 UID is required".to_string()));
    }
    match game_type {
        GameType::Solo => {}
        GameType::Duo => {
            if pair_missing(players, 2) {
                return Err(SharedError::MissingField(
                    "Player 2 name and UID are required for Duo contests".to_string(),
                ));
            }
        }
        GameType::Squad => {
            if (2..=4).any(|n| pair_missing(players, n)) {
                return Err(SharedError::MissingField(
                    "All four players' names and UIDs are required for Squad contests".to_string(),
                ));
            }
        }
    }
    Ok(())
}

/// Balance precheck against the cached wallet balance.
pub fn check_balance(contest: &Contest, balance: f64) -> Result<()> {
    if contest.is_affordable(balance) {
        Ok(())
    } else {
        debug!(
            "Balance {} below entry fee {} for contest {}",
            balance, contest.entry_fee, contest.id
        );
        Err(SharedError::InsufficientBalance {
            needed: contest.entry_fee,
            available: balance,
        })
    }
}

/// Form label for a player field; Solo contests address the user directly.
pub fn player_label(game_type: GameType, n: usize, uid: bool) -> String {
    match (game_type, uid) {
        (GameType::Solo, false) => "Your Game Name".to_string(),
        (GameType::Solo, true) => "Your Game UID".to_string(),
        (_, false) => format!("Player {} Name", n),
        (_, true) => format!("Player {} UID", n),
    }
}

pub fn player_placeholder(game_name: &str, n: usize, uid: bool) -> String {
    let what = if uid { "UID" } else { "name" };
    format!("Enter player {}'s {} {}", n, game_name, what)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::contest::fixtures::contest;
    use crate::models::registration::PlayerField;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn filled(count: usize) -> PlayerDetails {
        (1..=count).fold(PlayerDetails::default(), |p, n| {
            p.with(n, PlayerField::Name, format!("p{}", n))
                .with(n, PlayerField::Uid, format!("{}", 1000 + n))
        })
    }

    fn missing(err: Result<()>) -> String {
        match err {
            Err(SharedError::MissingField(msg)) => msg,
            other => panic!("expected MissingField, got {:?}", other),
        }
    }

    #[rstest]
    #[case(GameType::Solo, 1)]
    #[case(GameType::Duo, 2)]
    #[case(GameType::Squad, 4)]
    fn test_exactly_enough_players_pass(#[case] game_type: GameType, #[case] count: usize) {
        assert_eq!(validate_players(game_type, &filled(count)), Ok(()));
    }

    #[test]
    fn test_player_one_checked_field_by_field() {
        assert_eq!(
            missing(validate_players(GameType::Solo, &PlayerDetails::default())),
            "Player 1 name is required"
        );
        let name_only = PlayerDetails::default().with(1, PlayerField::Name, "Ghost".into());
        assert_eq!(
            missing(validate_players(GameType::Solo, &name_only)),
            "Player 1 UID is required"
        );
    }

    #[test]
    fn test_whitespace_counts_as_blank() {
        let spaces = filled(1).with(1, PlayerField::Uid, "   ".into());
        assert_eq!(
            missing(validate_players(GameType::Solo, &spaces)),
            "Player 1 UID is required"
        );
    }

    #[test]
    fn test_duo_needs_second_player() {
        assert_eq!(
            missing(validate_players(GameType::Duo, &filled(1))),
            "Player 2 name and UID are required for Duo contests"
        );
    }

    #[test]
    fn test_squad_with_two_players_cites_all_four() {
        assert_eq!(
            missing(validate_players(GameType::Squad, &filled(2))),
            "All four players' names and UIDs are required for Squad contests"
        );
    }

    #[test]
    fn test_check_balance() {
        let c = contest(GameType::Solo, 50.0);
        assert_eq!(check_balance(&c, 50.0), Ok(()));
        assert_eq!(
            check_balance(&c, 30.0),
            Err(SharedError::InsufficientBalance {
                needed: 50.0,
                available: 30.0
            })
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(player_label(GameType::Solo, 1, false), "Your Game Name");
        assert_eq!(player_label(GameType::Squad, 3, true), "Player 3 UID");
        assert_eq!(player_placeholder("BGMI", 2, false), "Enter player 2's BGMI name");
    }
}
