//! Confirmation protocol for the irreversible, fee-debiting registration.
//!
//! ```text
//! Idle ──request──▶ Confirming ──confirm──▶ Submitting ──ok──▶ Done
//!   ▲                   │                     │    │
//!   └──────cancel───────┘                     │    └──error──▶ Failed
//!   ▲                                         ▼
//!   └──────cancel────────────────────── Reconfirming ──confirm──▶ Submitting
//! ```
//!
//! The machine never performs I/O. Entering `Submitting` makes a
//! `RegisterRequest` available through [`RegistrationFlow::submission`];
//! the caller sends it and feeds the outcome back as
//! [`FlowEvent::Resolved`].

use chrono::{DateTime, Utc};
use log::{debug, error, warn};

use crate::dto::registration::RegisterRequest;
use crate::edit_window::EditWindow;
use crate::error::{Result, SharedError};
use crate::models::contest::{Contest, GameType};
use crate::models::registration::{PlayerDetails, Registration};
use crate::validation::{check_balance, validate_players};

pub const UNREGISTER_DENIED: &str =
    "Unregistration is not allowed. All contest registrations are final with no refunds.";

/// Text of the blocking dialog shown before the first submission.
pub fn confirmation_prompt(entry_fee: f64) -> String {
    format!(
        "IMPORTANT WARNING:\n\n\
         Once you register for this contest, you CANNOT:\n\
         • Unregister from the contest\n\
         • Get a refund of your entry fee (₹{})\n\
         • Change your mind after registration\n\n\
         Your entry fee will be permanently deducted from your wallet.\n\n\
         Are you absolutely sure you want to proceed with registration?",
        entry_fee
    )
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlowState {
    Idle,
    Confirming { prompt: String },
    Submitting { attempt: u32 },
    /// The API asked for confirmation again; `prompt` is its message.
    Reconfirming { prompt: String },
    Done(Registration),
    Failed(SharedError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlowEvent {
    /// User pressed Register with the given form contents and cached balance.
    Request { players: PlayerDetails, balance: f64 },
    Confirm,
    Cancel,
    Resolved(Result<Registration>),
    /// Dismiss a failure and return to the form.
    Reset,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationFlow {
    contest: Contest,
    players: Option<PlayerDetails>,
    attempts: u32,
    state: FlowState,
}

impl RegistrationFlow {
    pub fn new(contest: Contest) -> Self {
        Self {
            contest,
            players: None,
            attempts: 0,
            state: FlowState::Idle,
        }
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn contest(&self) -> &Contest {
        &self.contest
    }

    /// Number of submissions sent so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Whether the Register button is enabled. Disabled while a dialog or
    /// request is pending, after success, and when the cached balance cannot
    /// cover the entry fee.
    pub fn can_submit(&self, balance: f64) -> bool {
        matches!(self.state, FlowState::Idle | FlowState::Failed(_))
            && self.contest.is_affordable(balance)
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, FlowState::Submitting { .. })
    }

    /// Prompt of the dialog currently blocking the flow, if any.
    pub fn prompt(&self) -> Option<&str> {
        match &self.state {
            FlowState::Confirming { prompt } | FlowState::Reconfirming { prompt } => Some(prompt),
            _ => None,
        }
    }

    /// The request to send while in `Submitting`, tagged with its attempt
    /// number so the caller can tell consecutive submissions apart.
    pub fn submission(&self) -> Option<(u32, RegisterRequest)> {
        match (&self.state, &self.players) {
            (FlowState::Submitting { attempt }, Some(players)) => {
                Some((*attempt, RegisterRequest::confirmed(players.clone())))
            }
            _ => None,
        }
    }

    /// Unregistration is refused in every state without touching the network.
    pub fn unregister(&self) -> SharedError {
        debug!("Unregister requested for contest {}; refused", self.contest.id);
        SharedError::NotAllowed(UNREGISTER_DENIED.to_string())
    }

    pub fn handle(&mut self, event: FlowEvent) {
        let next = match (std::mem::replace(&mut self.state, FlowState::Idle), event) {
            (FlowState::Idle | FlowState::Failed(_), FlowEvent::Request { players, balance }) => {
                self.begin(players, balance)
            }
            (FlowState::Confirming { .. } | FlowState::Reconfirming { .. }, FlowEvent::Confirm) => {
                self.attempts += 1;
                FlowState::Submitting {
                    attempt: self.attempts,
                }
            }
            (FlowState::Confirming { .. } | FlowState::Reconfirming { .. }, FlowEvent::Cancel) => {
                FlowState::Idle
            }
            (FlowState::Submitting { .. }, FlowEvent::Resolved(Ok(registration))) => {
                FlowState::Done(registration)
            }
            (FlowState::Submitting { .. }, FlowEvent::Resolved(Err(SharedError::ConfirmationRequired(prompt)))) => {
                warn!(
                    "Contest {} asked for confirmation after a confirmed submission",
                    self.contest.id
                );
                FlowState::Reconfirming { prompt }
            }
            (FlowState::Submitting { .. }, FlowEvent::Resolved(Err(e))) => {
                if e.is_api() {
                    warn!("Contest {} refused the registration: {}", self.contest.id, e);
                } else {
                    error!("Registration for contest {} did not reach the API: {}", self.contest.id, e);
                }
                FlowState::Failed(e)
            }
            (FlowState::Failed(_), FlowEvent::Reset) => FlowState::Idle,
            (state, event) => {
                debug!("Ignoring {:?} in state {:?}", event, state);
                state
            }
        };
        debug!("Registration flow for contest {} -> {:?}", self.contest.id, next);
        self.state = next;
    }

    fn begin(&mut self, players: PlayerDetails, balance: f64) -> FlowState {
        let checked = validate_players(self.contest.game_type, &players)
            .and_then(|_| check_balance(&self.contest, balance));
        match checked {
            Ok(()) => {
                self.players = Some(players);
                FlowState::Confirming {
                    prompt: confirmation_prompt(self.contest.entry_fee),
                }
            }
            Err(e) => FlowState::Failed(e),
        }
    }
}

/// Checks an edit to an existing registration. The window is tested first so
/// an expired registration never reports field errors.
pub fn prepare_update(
    registration: &Registration,
    game_type: GameType,
    players: PlayerDetails,
    window: EditWindow,
    now: DateTime<Utc>,
) -> Result<PlayerDetails> {
    if !registration.can_edit(window, now) {
        return Err(SharedError::EditWindowClosed);
    }
    validate_players(game_type, &players)?;
    Ok(players)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::contest::fixtures::contest;
    use crate::models::contest::GameType;
    use crate::models::registration::fixtures::{created_at, registration};
    use chrono::Duration;
    use crate::models::registration::PlayerField;
    use pretty_assertions::assert_eq;
    use test_log::test;

    fn solo_players() -> PlayerDetails {
        PlayerDetails::default()
            .with(1, PlayerField::Name, "Ghost".into())
            .with(1, PlayerField::Uid, "5123".into())
    }

    fn confirming_flow() -> RegistrationFlow {
        let mut flow = RegistrationFlow::new(contest(GameType::Solo, 50.0));
        flow.handle(FlowEvent::Request {
            players: solo_players(),
            balance: 100.0,
        });
        flow
    }

    #[test]
    fn test_prompt_names_fee_and_finality() {
        let prompt = confirmation_prompt(50.0);
        assert!(prompt.contains("Unregister from the contest"));
        assert!(prompt.contains("refund of your entry fee (₹50)"));
        assert!(prompt.contains("permanently deducted"));
    }

    #[test]
    fn test_happy_path() {
        let mut flow = confirming_flow();
        assert_eq!(flow.prompt(), Some(confirmation_prompt(50.0).as_str()));
        assert_eq!(flow.submission(), None);

        flow.handle(FlowEvent::Confirm);
        let (attempt, request) = flow.submission().unwrap();
        assert_eq!(attempt, 1);
        assert!(request.is_confirmed());
        assert!(flow.is_busy());

        let reg = registration(1, 12, None);
        flow.handle(FlowEvent::Resolved(Ok(reg.clone())));
        assert_eq!(flow.state(), &FlowState::Done(reg));
        assert!(!flow.can_submit(100.0));
    }

    #[test]
    fn test_cancel_returns_to_idle_without_submission() {
        let mut flow = confirming_flow();
        flow.handle(FlowEvent::Cancel);
        assert_eq!(flow.state(), &FlowState::Idle);
        assert_eq!(flow.attempts(), 0);
    }

    #[test]
    fn test_insufficient_balance_never_reaches_confirmation() {
        let mut flow = RegistrationFlow::new(contest(GameType::Solo, 50.0));
        assert!(!flow.can_submit(30.0));
        flow.handle(FlowEvent::Request {
            players: solo_players(),
            balance: 30.0,
        });
        assert!(matches!(
            flow.state(),
            FlowState::Failed(SharedError::InsufficientBalance { .. })
        ));
        flow.handle(FlowEvent::Confirm);
        assert_eq!(flow.submission(), None);
        assert_eq!(flow.attempts(), 0);
    }

    #[test]
    fn test_validation_failure_blocks_before_prompt() {
        let mut flow = RegistrationFlow::new(contest(GameType::Squad, 10.0));
        flow.handle(FlowEvent::Request {
            players: solo_players(),
            balance: 100.0,
        });
        assert_eq!(
            flow.state(),
            &FlowState::Failed(SharedError::MissingField(
                "All four players' names and UIDs are required for Squad contests".into()
            ))
        );
        assert_eq!(flow.prompt(), None);
    }

    #[test]
    fn test_server_pushback_reprompts_then_resubmits() {
        let mut flow = confirming_flow();
        flow.handle(FlowEvent::Confirm);
        flow.handle(FlowEvent::Resolved(Err(SharedError::ConfirmationRequired(
            "Server says: are you sure?".into(),
        ))));
        assert_eq!(flow.prompt(), Some("Server says: are you sure?"));
        assert_eq!(flow.submission(), None);

        flow.handle(FlowEvent::Confirm);
        let (attempt, request) = flow.submission().unwrap();
        assert_eq!(attempt, 2);
        assert!(request.is_confirmed());
    }

    #[test]
    fn test_pushback_declined_goes_idle() {
        let mut flow = confirming_flow();
        flow.handle(FlowEvent::Confirm);
        flow.handle(FlowEvent::Resolved(Err(SharedError::ConfirmationRequired("again".into()))));
        flow.handle(FlowEvent::Cancel);
        assert_eq!(flow.state(), &FlowState::Idle);
        assert_eq!(flow.attempts(), 1);
    }

    #[test]
    fn test_api_failure_then_reset() {
        let mut flow = confirming_flow();
        flow.handle(FlowEvent::Confirm);
        let err = SharedError::Api {
            status: 400,
            message: "Contest is full".into(),
        };
        flow.handle(FlowEvent::Resolved(Err(err.clone())));
        assert_eq!(flow.state(), &FlowState::Failed(err));
        assert!(flow.can_submit(100.0));

        flow.handle(FlowEvent::Reset);
        assert_eq!(flow.state(), &FlowState::Idle);
    }

    #[test]
    fn test_stray_events_are_ignored() {
        let mut flow = RegistrationFlow::new(contest(GameType::Solo, 50.0));
        flow.handle(FlowEvent::Confirm);
        flow.handle(FlowEvent::Resolved(Ok(registration(1, 1, None))));
        assert_eq!(flow.state(), &FlowState::Idle);

        let mut busy = confirming_flow();
        busy.handle(FlowEvent::Confirm);
        busy.handle(FlowEvent::Request {
            players: solo_players(),
            balance: 100.0,
        });
        assert!(busy.is_busy());
    }

    #[test]
    fn test_unregister_refused_in_every_state() {
        let mut flow = confirming_flow();
        let before = flow.clone();
        assert_eq!(flow.unregister(), SharedError::NotAllowed(UNREGISTER_DENIED.into()));
        assert_eq!(flow, before);

        flow.handle(FlowEvent::Confirm);
        flow.handle(FlowEvent::Resolved(Ok(registration(1, 3, None))));
        assert_eq!(flow.unregister().to_string(), UNREGISTER_DENIED);
    }

    #[test]
    fn test_prepare_update_inside_window() {
        let reg = registration(1, 4, None);
        let now = created_at() + Duration::minutes(5);
        assert_eq!(
            prepare_update(&reg, GameType::Solo, solo_players(), EditWindow::default(), now),
            Ok(solo_players())
        );
    }

    #[test]
    fn test_prepare_update_after_window_ignores_fields() {
        let reg = registration(1, 4, None);
        let now = created_at() + Duration::seconds(301);
        assert_eq!(
            prepare_update(&reg, GameType::Squad, PlayerDetails::default(), EditWindow::default(), now),
            Err(SharedError::EditWindowClosed)
        );
    }

    #[test]
    fn test_prepare_update_validates_format() {
        let reg = registration(1, 4, Some(1));
        assert!(matches!(
            prepare_update(&reg, GameType::Duo, solo_players(), EditWindow::default(), created_at()),
            Err(SharedError::MissingField(_))
        ));
    }
}
