use log::{debug, error};
use shared::catalogue::{details_action, ContestAction};
use shared::gateway::registration_status;
use shared::timestamp::format_match_time;
use shared::{Contest, ContestGateway, Registration};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::client::ApiClient;
use crate::Route;

#[derive(Properties, PartialEq)]
pub struct ContestDetailsProps {
    pub contest_id: i64,
}

#[function_component(ContestDetails)]
pub fn contest_details(props: &ContestDetailsProps) -> Html {
    let navigator = use_navigator();
    let contest = use_state(|| None::<Contest>);
    let registration = use_state(|| None::<Registration>);

    // Both requests go out together and may land in either order.
    {
        let contest = contest.clone();
        let registration = registration.clone();
        let navigator = navigator.clone();
        use_effect_with(props.contest_id, move |contest_id| {
            let contest_id = *contest_id;
            spawn_local(async move {
                match ApiClient.get_contest(contest_id).await {
                    Ok(found) => contest.set(Some(found)),
                    Err(e) => {
                        error!("Failed to load contest {}: {}", contest_id, e);
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Contests);
                        }
                    }
                }
            });
            spawn_local(async move {
                let found = registration_status(&ApiClient, contest_id).await;
                debug!("Contest {} registered: {}", contest_id, found.is_some());
                registration.set(found);
            });
            || ()
        });
    }

    let Some(contest) = (*contest).clone() else {
        return html! { <p class="p-6 text-gray-500">{"Loading contest..."}</p> };
    };

    let action = details_action(&contest, registration.is_some());
    let onclick = {
        let navigator = navigator.clone();
        let contest_id = contest.id;
        Callback::from(move |_| {
            let route = match action {
                ContestAction::EnterLobby => Route::Lobby { id: contest_id },
                ContestAction::Join => Route::Register { id: contest_id },
                _ => return,
            };
            if let Some(navigator) = &navigator {
                navigator.push(&route);
            }
        })
    };

    html! {
        <div class="max-w-3xl mx-auto p-6 space-y-6">
            <div class="bg-white rounded-lg shadow p-6 space-y-3">
                <div class="flex justify-between items-start">
                    <h1 class="text-2xl font-bold">{&contest.title}</h1>
                    <span class="text-xs px-2 py-1 rounded bg-gray-100">{contest.status.label()}</span>
                </div>
                <p class="text-gray-600">{format!("{} · {}", contest.game_name, contest.game_type)}</p>
                <p>{format_match_time(contest.match_time)}</p>
                <dl class="grid grid-cols-2 gap-4 text-sm">
                    <div><dt class="text-gray-500">{"Entry fee"}</dt><dd>{format!("₹{}", contest.entry_fee)}</dd></div>
                    <div><dt class="text-gray-500">{"Prize pool"}</dt><dd>{format!("₹{}", contest.prize_pool)}</dd></div>
                    <div><dt class="text-gray-500">{"Slots"}</dt><dd>{format!("{}/{}", contest.current_slots, contest.max_slots)}</dd></div>
                    <div><dt class="text-gray-500">{"Remaining"}</dt><dd>{contest.remaining_slots()}</dd></div>
                </dl>
                if let Some(info) = &contest.contest_info {
                    <p class="text-sm whitespace-pre-line">{info}</p>
                }
                if let Some(creator) = &contest.creator_username {
                    <p class="text-xs text-gray-500">{format!("Hosted by {}", creator)}</p>
                }
                if let Some(reason) = contest.closed_reason().filter(|_| registration.is_none()) {
                    <p class="text-sm text-red-600">{reason}</p>
                }
            </div>
            <button
                {onclick}
                disabled={action == ContestAction::RegistrationClosed}
                class="w-full py-3 rounded-md bg-indigo-600 text-white disabled:opacity-50"
            >
                {if action == ContestAction::EnterLobby { "Enter Lobby" } else { action.label() }}
            </button>
        </div>
    }
}
