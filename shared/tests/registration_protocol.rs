//! Registration and chat moderation driven end to end over an in-memory
//! gateway that counts every call it receives.

#![cfg(not(target_arch = "wasm32"))]

use std::cell::{Cell, RefCell};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;

use shared::edit_window::EditWindow;
use shared::gateway::registration_status;
use shared::registration_flow::UNREGISTER_DENIED;
use shared::{
    ChatGateway, ChatMessage, Contest, ContestGateway, ContestStatus, FlowEvent, FlowState,
    GameType, MessageBody, Participant, PlayerDetails, PlayerField, RegisterRequest,
    Registration, RegistrationFlow, Result, SharedError, User,
};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap()
}

fn contest(game_type: GameType, entry_fee: f64) -> Contest {
    Contest {
        id: 7,
        title: "Friday Night Royale".into(),
        game_name: "BGMI".into(),
        game_type,
        entry_fee,
        prize_pool: 1000.0,
        max_slots: 100,
        current_slots: 10,
        match_time: t0() + Duration::days(1),
        status: ContestStatus::Open,
        registration_locked: false,
        contest_info: None,
        creator_username: None,
    }
}

fn players(count: usize) -> PlayerDetails {
    (1..=count).fold(PlayerDetails::default(), |p, n| {
        p.with(n, PlayerField::Name, format!("p{}", n))
            .with(n, PlayerField::Uid, format!("{}", 9000 + n))
    })
}

fn user(id: i64, is_admin: bool) -> User {
    User {
        id,
        username: if is_admin { "admin".into() } else { format!("user{}", id) },
        email: String::new(),
        wallet_balance: 0.0,
        is_admin,
        rank: None,
        created_at: None,
    }
}

/// Records every call; `register` answers from a queue of scripted outcomes.
#[derive(Default)]
struct CountingGateway {
    calls: Cell<u32>,
    sent: RefCell<Vec<RegisterRequest>>,
    outcomes: RefCell<Vec<Result<Registration>>>,
}

impl CountingGateway {
    fn scripted(outcomes: Vec<Result<Registration>>) -> Self {
        Self {
            outcomes: RefCell::new(outcomes),
            ..Default::default()
        }
    }

    fn bump(&self) {
        self.calls.set(self.calls.get() + 1);
    }
}

#[async_trait(?Send)]
impl ContestGateway for CountingGateway {
    async fn get_contest(&self, _contest_id: i64) -> Result<Contest> {
        self.bump();
        Ok(contest(GameType::Solo, 50.0))
    }

    async fn my_registration(&self, _contest_id: i64) -> Result<Option<Registration>> {
        self.bump();
        Err(SharedError::Network("offline".into()))
    }

    async fn register(&self, contest_id: i64, request: &RegisterRequest) -> Result<Registration> {
        self.bump();
        self.sent.borrow_mut().push(request.clone());
        let mut outcomes = self.outcomes.borrow_mut();
        if outcomes.is_empty() {
            return Ok(registration(contest_id, request.players().clone()));
        }
        outcomes.remove(0)
    }

    async fn update_registration(
        &self,
        contest_id: i64,
        players: &PlayerDetails,
    ) -> Result<Registration> {
        self.bump();
        Ok(registration(contest_id, players.clone()))
    }
}

#[async_trait(?Send)]
impl ChatGateway for CountingGateway {
    async fn list_messages(&self, _contest_id: i64, _per_page: u32) -> Result<Vec<ChatMessage>> {
        self.bump();
        Ok(Vec::new())
    }

    async fn participants(&self, _contest_id: i64) -> Result<Vec<Participant>> {
        self.bump();
        Ok(Vec::new())
    }

    async fn send_message(&self, _contest_id: i64, _body: &MessageBody) -> Result<()> {
        self.bump();
        Ok(())
    }

    async fn send_announcement(&self, _contest_id: i64, _body: &MessageBody) -> Result<()> {
        self.bump();
        Ok(())
    }

    async fn edit_message(&self, _contest_id: i64, _id: i64, _body: &MessageBody) -> Result<()> {
        self.bump();
        Ok(())
    }

    async fn delete_message(&self, _contest_id: i64, _id: i64) -> Result<()> {
        self.bump();
        Ok(())
    }
}

fn registration(contest_id: i64, players: PlayerDetails) -> Registration {
    Registration {
        id: 1,
        user_id: 1,
        contest_id,
        seat_number: 11,
        team_number: None,
        players,
        created_at: t0(),
        username: Some("user1".into()),
        is_admin: false,
    }
}

/// Runs the flow the way the registration form does: send whatever the
/// machine exposes, feed the answer back, repeat until it stops asking.
async fn drive(flow: &mut RegistrationFlow, gateway: &CountingGateway, confirm_every_prompt: bool) {
    loop {
        if flow.prompt().is_some() {
            flow.handle(if confirm_every_prompt {
                FlowEvent::Confirm
            } else {
                FlowEvent::Cancel
            });
        }
        match flow.submission() {
            Some((_, request)) => {
                let outcome = gateway.register(flow.contest().id, &request).await;
                flow.handle(FlowEvent::Resolved(outcome));
            }
            None if flow.prompt().is_none() => break,
            None => {}
        }
    }
}

#[tokio::test]
async fn confirmed_registration_sends_confirmed_flag_once() {
    let gateway = CountingGateway::default();
    let mut flow = RegistrationFlow::new(contest(GameType::Solo, 50.0));
    flow.handle(FlowEvent::Request {
        players: players(1),
        balance: 100.0,
    });
    drive(&mut flow, &gateway, true).await;

    assert!(matches!(flow.state(), FlowState::Done(_)));
    assert_eq!(gateway.calls.get(), 1);
    assert!(gateway.sent.borrow().iter().all(RegisterRequest::is_confirmed));
}

#[tokio::test]
async fn declined_confirmation_sends_nothing() {
    let gateway = CountingGateway::default();
    let mut flow = RegistrationFlow::new(contest(GameType::Solo, 50.0));
    flow.handle(FlowEvent::Request {
        players: players(1),
        balance: 100.0,
    });
    drive(&mut flow, &gateway, false).await;

    assert_eq!(flow.state(), &FlowState::Idle);
    assert_eq!(gateway.calls.get(), 0);
}

#[tokio::test]
async fn insufficient_balance_sends_nothing() {
    let gateway = CountingGateway::default();
    let mut flow = RegistrationFlow::new(contest(GameType::Solo, 50.0));
    assert!(!flow.can_submit(30.0));
    flow.handle(FlowEvent::Request {
        players: players(1),
        balance: 30.0,
    });
    drive(&mut flow, &gateway, true).await;

    assert_eq!(gateway.calls.get(), 0);
    match flow.state() {
        FlowState::Failed(err) => assert!(err.to_string().contains("You need 50₹ but have 30₹")),
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn squad_with_two_players_sends_nothing() {
    let gateway = CountingGateway::default();
    let mut flow = RegistrationFlow::new(contest(GameType::Squad, 10.0));
    flow.handle(FlowEvent::Request {
        players: players(2),
        balance: 100.0,
    });
    drive(&mut flow, &gateway, true).await;

    assert_eq!(gateway.calls.get(), 0);
    assert_eq!(
        flow.state(),
        &FlowState::Failed(SharedError::MissingField(
            "All four players' names and UIDs are required for Squad contests".into()
        ))
    );
}

#[tokio::test]
async fn server_pushback_is_confirmed_and_retried() {
    let gateway = CountingGateway::scripted(vec![Err(SharedError::ConfirmationRequired(
        "This entry fee is non-refundable. Continue?".into(),
    ))]);
    let mut flow = RegistrationFlow::new(contest(GameType::Duo, 20.0));
    flow.handle(FlowEvent::Request {
        players: players(2),
        balance: 20.0,
    });
    drive(&mut flow, &gateway, true).await;

    assert!(matches!(flow.state(), FlowState::Done(_)));
    assert_eq!(gateway.calls.get(), 2);
    assert_eq!(flow.attempts(), 2);
    assert!(gateway.sent.borrow().iter().all(RegisterRequest::is_confirmed));
}

#[tokio::test]
async fn unregister_makes_no_calls_in_any_state() {
    let gateway = CountingGateway::default();
    let mut flow = RegistrationFlow::new(contest(GameType::Solo, 50.0));
    assert_eq!(flow.unregister().to_string(), UNREGISTER_DENIED);

    flow.handle(FlowEvent::Request {
        players: players(1),
        balance: 100.0,
    });
    assert_eq!(flow.unregister().to_string(), UNREGISTER_DENIED);

    drive(&mut flow, &gateway, true).await;
    let calls = gateway.calls.get();
    assert_eq!(flow.unregister().to_string(), UNREGISTER_DENIED);
    assert_eq!(gateway.calls.get(), calls);
}

#[tokio::test]
async fn failed_probe_reads_as_not_registered() {
    let gateway = CountingGateway::default();
    assert_eq!(registration_status(&gateway, 7).await, None);
    assert_eq!(gateway.calls.get(), 1);
}

#[tokio::test]
async fn moderation_gates_chat_calls() {
    let gateway = CountingGateway::default();
    let msg = ChatMessage {
        id: 3,
        contest_id: 7,
        user_id: 2,
        username: "user2".into(),
        is_admin: false,
        message: "gg".into(),
        created_at: t0(),
        is_admin_message: false,
    };
    let inside = t0() + Duration::seconds(299);
    let outside = t0() + Duration::seconds(301);

    let body = shared::moderation::authorize_edit(&msg, &user(2, false), "gg wp", EditWindow::default(), inside).unwrap();
    gateway.edit_message(7, msg.id, &body).await.unwrap();

    assert_eq!(
        shared::moderation::authorize_delete(&msg, &user(2, false), EditWindow::default(), outside),
        Err(SharedError::EditWindowClosed)
    );
    shared::moderation::authorize_delete(&msg, &user(9, true), EditWindow::default(), outside).unwrap();
    gateway.delete_message(7, msg.id).await.unwrap();

    assert_eq!(gateway.calls.get(), 2);
}

#[tokio::test]
async fn registration_edit_respects_window() {
    let gateway = CountingGateway::default();
    let reg = registration(7, players(1));

    let update = shared::registration_flow::prepare_update(
        &reg,
        GameType::Solo,
        players(1),
        EditWindow::default(),
        t0() + Duration::seconds(299),
    )
    .unwrap();
    gateway.update_registration(7, &update).await.unwrap();

    let late = shared::registration_flow::prepare_update(
        &reg,
        GameType::Solo,
        players(1),
        EditWindow::default(),
        t0() + Duration::seconds(301),
    );
    assert_eq!(late, Err(SharedError::EditWindowClosed));
    assert_eq!(gateway.calls.get(), 1);
}
