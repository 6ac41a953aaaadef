use std::rc::Rc;

use chrono::Utc;
use log::{debug, error};
use shared::registration_flow::{prepare_update, UNREGISTER_DENIED};
use shared::validation::{player_label, player_placeholder};
use shared::{
    Contest, ContestGateway, FlowEvent, FlowState, GameType, PlayerDetails, PlayerField,
    Registration, RegistrationFlow, SharedError,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::api::client::ApiClient;
use crate::auth::use_session;
use crate::components::common_modal::Modal;
use crate::components::contest::confirmation_modal::RegistrationConfirmModal;
use crate::config::Config;
use crate::hooks::use_poll;

/// How often the summary re-checks the edit window.
const WINDOW_RECHECK_MS: u32 = 15_000;

/// Refusals raised before any request read as a correction to make.
fn failure_title(error: &SharedError, failed: &str) -> String {
    if error.is_client_side() {
        "Check your registration".to_string()
    } else {
        failed.to_string()
    }
}

#[derive(Clone, PartialEq)]
struct FlowStore(RegistrationFlow);

impl Reducible for FlowStore {
    type Action = FlowEvent;

    fn reduce(self: Rc<Self>, action: FlowEvent) -> Rc<Self> {
        let mut flow = self.0.clone();
        flow.handle(action);
        Rc::new(Self(flow))
    }
}

#[derive(Properties, Clone, PartialEq)]
pub struct PlayerFieldsProps {
    pub game_type: GameType,
    pub game_name: String,
    pub players: PlayerDetails,
    pub on_change: Callback<PlayerDetails>,
    #[prop_or_default]
    pub disabled: bool,
}

/// One name/UID pair per slot the game type needs.
#[function_component(PlayerFields)]
pub fn player_fields(props: &PlayerFieldsProps) -> Html {
    let field = |n: usize, which: PlayerField| {
        let uid = which == PlayerField::Uid;
        let (name, uid_value) = props.players.player(n);
        let value = (if uid { uid_value } else { name }).to_string();
        let oninput = {
            let players = props.players.clone();
            let on_change = props.on_change.clone();
            Callback::from(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                on_change.emit(players.with(n, which, input.value()));
            })
        };
        html! {
            <div>
                <label class="block text-sm font-medium text-gray-700">
                    {player_label(props.game_type, n, uid)}{" *"}
                </label>
                <input
                    type="text"
                    class="mt-1 block w-full rounded-md border border-gray-300 px-3 py-2 text-sm"
                    placeholder={player_placeholder(&props.game_name, n, uid)}
                    {value}
                    {oninput}
                    disabled={props.disabled}
                />
            </div>
        }
    };

    html! {
        <div class="space-y-4">
            { for (1..=props.game_type.player_count()).map(|n| html! {
                <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                    { field(n, PlayerField::Name) }
                    { field(n, PlayerField::Uid) }
                </div>
            }) }
            <p class="text-xs text-gray-500">{props.game_type.requirement_hint()}</p>
        </div>
    }
}

#[derive(Properties, Clone, PartialEq)]
pub struct RegistrationFormProps {
    pub contest: Contest,
    pub on_registered: Callback<Registration>,
}

/// New registration behind the confirmation protocol.
#[function_component(RegistrationForm)]
pub fn registration_form(props: &RegistrationFormProps) -> Html {
    let session = use_session();
    let players = use_state(PlayerDetails::default);
    let flow = {
        let contest = props.contest.clone();
        use_reducer_eq(move || FlowStore(RegistrationFlow::new(contest)))
    };
    let balance = session.as_ref().map(|s| s.session.balance()).unwrap_or(0.0);

    // Sends whatever the machine exposes; a new attempt number means a new send.
    let submission = flow.0.submission();
    {
        let dispatcher = flow.dispatcher();
        let contest_id = props.contest.id;
        let pending = submission.clone();
        use_effect_with(submission.map(|(attempt, _)| attempt), move |_| {
            if let Some((attempt, request)) = pending {
                debug!("Submitting registration attempt {}", attempt);
                spawn_local(async move {
                    let outcome = ApiClient.register(contest_id, &request).await;
                    dispatcher.dispatch(FlowEvent::Resolved(outcome));
                });
            }
            || ()
        });
    }

    let done = match flow.0.state() {
        FlowState::Done(registration) => Some(registration.clone()),
        _ => None,
    };
    {
        let session = session.clone();
        let on_registered = props.on_registered.clone();
        use_effect_with(done, move |done| {
            if let Some(registration) = done {
                if let Some(session) = session {
                    session.refresh();
                }
                on_registered.emit(registration.clone());
            }
            || ()
        });
    }

    let onsubmit = {
        let flow = flow.clone();
        let players = players.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            flow.dispatch(FlowEvent::Request {
                players: (*players).clone(),
                balance,
            });
        })
    };

    let on_change = {
        let players = players.clone();
        Callback::from(move |next: PlayerDetails| players.set(next))
    };

    let on_confirm = {
        let flow = flow.clone();
        Callback::from(move |_| flow.dispatch(FlowEvent::Confirm))
    };
    let on_cancel = {
        let flow = flow.clone();
        Callback::from(move |_| flow.dispatch(FlowEvent::Cancel))
    };
    let on_error_close = {
        let flow = flow.clone();
        Callback::from(move |_| flow.dispatch(FlowEvent::Reset))
    };

    let failure = match flow.0.state() {
        FlowState::Failed(e) => Some(e.clone()),
        _ => None,
    };
    let contest = &props.contest;
    let submitting = flow.0.is_busy();

    html! {
        <div class="bg-white rounded-lg shadow p-6">
            <h2 class="text-xl font-semibold mb-4">{"Register for this contest"}</h2>

            if !contest.is_affordable(balance) {
                <div class="mb-4 rounded-md bg-red-50 border border-red-200 p-4 text-sm text-red-700">
                    {SharedError::InsufficientBalance { needed: contest.entry_fee, available: balance }.to_string()}
                </div>
            }

            <form class="space-y-6" {onsubmit}>
                <PlayerFields
                    game_type={contest.game_type}
                    game_name={contest.game_name.clone()}
                    players={(*players).clone()}
                    {on_change}
                    disabled={submitting}
                />
                <button
                    type="submit"
                    disabled={!flow.0.can_submit(balance)}
                    class="w-full py-2 px-4 rounded-md text-white bg-indigo-600 hover:bg-indigo-700 disabled:opacity-50"
                >
                    if submitting {
                        {"Registering..."}
                    } else {
                        {format!("Register (₹{})", contest.entry_fee)}
                    }
                </button>
            </form>

            <RegistrationConfirmModal
                prompt={flow.0.prompt().map(str::to_string)}
                {on_confirm}
                {on_cancel}
            />
            <Modal
                is_open={failure.is_some()}
                title={failure.as_ref().map(|e| failure_title(e, "Registration failed")).unwrap_or_default()}
                message={failure.as_ref().map(|e| e.to_string()).unwrap_or_default()}
                on_close={on_error_close}
            />
        </div>
    }
}

#[derive(Properties, Clone, PartialEq)]
pub struct RegistrationSummaryProps {
    pub contest: Contest,
    pub registration: Registration,
    pub on_edit: Callback<()>,
    #[prop_or_default]
    pub in_lobby: bool,
}

/// Existing registration, with an Edit button while the window is open.
#[function_component(RegistrationSummary)]
pub fn registration_summary(props: &RegistrationSummaryProps) -> Html {
    let notice = use_state(|| None::<String>);
    let trigger = use_force_update();
    use_poll(props.registration.id, WINDOW_RECHECK_MS, move || {
        trigger.force_update()
    });

    let registration = &props.registration;
    let now = Utc::now();
    let window = Config::policy().edit_window();
    let editable = registration.can_edit(window, now);

    let on_unregister = {
        let notice = notice.clone();
        Callback::from(move |_| {
            debug!("Unregister refused client-side");
            notice.set(Some(UNREGISTER_DENIED.to_string()));
        })
    };
    let on_notice_close = {
        let notice = notice.clone();
        Callback::from(move |_| notice.set(None))
    };
    let on_edit = {
        let on_edit = props.on_edit.clone();
        Callback::from(move |_| on_edit.emit(()))
    };

    html! {
        <div class="bg-white rounded-lg shadow p-6 space-y-4">
            <h2 class="text-xl font-semibold">{"You're registered"}</h2>
            <div class="flex gap-6 text-sm">
                <span>{format!("Seat #{}", registration.seat_number)}</span>
                if let Some(team) = registration.team_number {
                    <span>{format!("Team {}", team)}</span>
                }
                if props.in_lobby && !registration.players.game_name.is_empty() {
                    <span>{format!("Game Name: {}", registration.players.game_name)}</span>
                }
            </div>
            <ul class="text-sm divide-y">
                { for registration.players.roster(props.contest.game_type).into_iter().map(|(n, name, uid)| html! {
                    <li class="py-1">
                        <span class="font-medium">{player_label(props.contest.game_type, n, false)}{": "}</span>
                        {name}{" ("}{uid}{")"}
                    </li>
                }) }
            </ul>
            if editable {
                <div class="flex items-center gap-3">
                    <button onclick={on_edit} class="px-3 py-1 rounded-md bg-indigo-600 text-white text-sm">{"Edit"}</button>
                    if let Some(left) = window.remaining(registration.created_at, now) {
                        <span class="text-xs text-gray-500">
                            {format!("Editable for {} more min", left.num_minutes() + 1)}
                        </span>
                    }
                </div>
            }
            <p class="text-xs text-gray-500">
                {"Registrations are final. Entry fees are non-refundable and you cannot unregister."}
            </p>
            <button onclick={on_unregister} class="text-xs text-red-600 underline">{"Unregister"}</button>
            <Modal
                is_open={notice.is_some()}
                title={"Not allowed".to_string()}
                message={(*notice).clone().unwrap_or_default()}
                on_close={on_notice_close}
            />
        </div>
    }
}

#[derive(Properties, Clone, PartialEq)]
pub struct RegistrationEditorProps {
    pub contest: Contest,
    pub registration: Registration,
    pub on_saved: Callback<Registration>,
    pub on_cancel: Callback<()>,
    /// The lobby editor also exposes the team/game name.
    #[prop_or_default]
    pub in_lobby: bool,
}

/// Edit mode: `PUT` inside the window, then back to the summary.
#[function_component(RegistrationEditor)]
pub fn registration_editor(props: &RegistrationEditorProps) -> Html {
    let players = {
        let initial = props.registration.players.clone();
        use_state(move || initial)
    };
    let saving = use_state(|| false);
    let failure = use_state(|| None::<SharedError>);

    let onsubmit = {
        let players = players.clone();
        let saving = saving.clone();
        let failure = failure.clone();
        let registration = props.registration.clone();
        let game_type = props.contest.game_type;
        let on_saved = props.on_saved.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let update = match prepare_update(
                &registration,
                game_type,
                (*players).clone(),
                Config::policy().edit_window(),
                Utc::now(),
            ) {
                Ok(update) => update,
                Err(e) => {
                    failure.set(Some(e));
                    return;
                }
            };
            saving.set(true);
            let saving = saving.clone();
            let failure = failure.clone();
            let on_saved = on_saved.clone();
            let contest_id = registration.contest_id;
            spawn_local(async move {
                match ApiClient.update_registration(contest_id, &update).await {
                    Ok(saved) => on_saved.emit(saved),
                    Err(e) => {
                        error!("Registration update failed: {}", e);
                        failure.set(Some(e));
                    }
                }
                saving.set(false);
            });
        })
    };

    let on_change = {
        let players = players.clone();
        Callback::from(move |next: PlayerDetails| players.set(next))
    };
    let on_game_name = {
        let players = players.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            players.set(players.with_game_name(input.value()));
        })
    };
    let on_cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_| on_cancel.emit(()))
    };
    let on_error_close = {
        let failure = failure.clone();
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_| {
            let closed = matches!(*failure, Some(SharedError::EditWindowClosed));
            failure.set(None);
            if closed {
                on_cancel.emit(());
            }
        })
    };

    html! {
        <div class="bg-white rounded-lg shadow p-6">
            <h2 class="text-xl font-semibold mb-4">{"Edit registration"}</h2>
            <form class="space-y-6" {onsubmit}>
                if props.in_lobby {
                    <div>
                        <label class="block text-sm font-medium text-gray-700">{"Game Name"}</label>
                        <input
                            type="text"
                            class="mt-1 block w-full rounded-md border border-gray-300 px-3 py-2 text-sm"
                            placeholder="Your in-game name"
                            value={players.game_name.clone()}
                            oninput={on_game_name}
                            disabled={*saving}
                        />
                    </div>
                }
                <PlayerFields
                    game_type={props.contest.game_type}
                    game_name={props.contest.game_name.clone()}
                    players={(*players).clone()}
                    {on_change}
                    disabled={*saving}
                />
                <div class="flex gap-3">
                    <button type="submit" disabled={*saving} class="px-4 py-2 rounded-md bg-indigo-600 text-white disabled:opacity-50">
                        if *saving { {"Saving..."} } else { {"Save changes"} }
                    </button>
                    <button type="button" onclick={on_cancel} class="px-4 py-2 rounded-md bg-gray-100">{"Cancel"}</button>
                </div>
            </form>
            <Modal
                is_open={failure.is_some()}
                title={(*failure).as_ref().map(|e| failure_title(e, "Update failed")).unwrap_or_default()}
                message={(*failure).as_ref().map(|e| e.to_string()).unwrap_or_default()}
                on_close={on_error_close}
            />
        </div>
    }
}

#[derive(Properties, Clone, PartialEq)]
pub struct RegistrationPanelProps {
    pub contest: Contest,
    pub registration: Registration,
    #[prop_or_default]
    pub on_changed: Callback<Registration>,
    #[prop_or_default]
    pub in_lobby: bool,
}

/// Summary that flips into the editor and back.
#[function_component(RegistrationPanel)]
pub fn registration_panel(props: &RegistrationPanelProps) -> Html {
    let editing = use_state(|| false);

    let on_edit = {
        let editing = editing.clone();
        Callback::from(move |_| editing.set(true))
    };
    let on_cancel = {
        let editing = editing.clone();
        Callback::from(move |_| editing.set(false))
    };
    let on_saved = {
        let editing = editing.clone();
        let on_changed = props.on_changed.clone();
        Callback::from(move |saved: Registration| {
            editing.set(false);
            on_changed.emit(saved);
        })
    };

    if *editing {
        html! {
            <RegistrationEditor
                contest={props.contest.clone()}
                registration={props.registration.clone()}
                {on_saved}
                {on_cancel}
                in_lobby={props.in_lobby}
            />
        }
    } else {
        html! {
            <RegistrationSummary
                contest={props.contest.clone()}
                registration={props.registration.clone()}
                {on_edit}
                in_lobby={props.in_lobby}
            />
        }
    }
}
