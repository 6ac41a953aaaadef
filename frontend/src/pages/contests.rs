use std::collections::HashSet;

use log::error;
use shared::catalogue::{card_action, search, ContestAction};
use shared::timestamp::format_match_time;
use shared::{Contest, ContestStatus};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api;
use crate::Route;

fn parse_status(raw: &str) -> ContestStatus {
    ContestStatus::FILTERABLE
        .into_iter()
        .find(|s| s.as_str() == raw)
        .unwrap_or(ContestStatus::Open)
}

/// Where a catalogue card's button leads.
fn action_route(action: ContestAction, contest_id: i64) -> Route {
    match action {
        ContestAction::EnterLobby => Route::Lobby { id: contest_id },
        ContestAction::Join => Route::Register { id: contest_id },
        ContestAction::ViewDetails | ContestAction::RegistrationClosed => {
            Route::ContestDetails { id: contest_id }
        }
    }
}

#[function_component(Contests)]
pub fn contests() -> Html {
    let status = use_state(|| ContestStatus::Open);
    let term = use_state(String::new);
    let contests = use_state(Vec::<Contest>::new);
    let registered = use_state(HashSet::<i64>::new);
    let loading = use_state(|| true);
    let failure = use_state(|| None::<String>);
    let navigator = use_navigator();

    {
        let contests = contests.clone();
        let loading = loading.clone();
        let failure = failure.clone();
        use_effect_with(*status, move |status| {
            let status = *status;
            loading.set(true);
            spawn_local(async move {
                match api::contests::list_contests(status).await {
                    Ok(list) => {
                        contests.set(list);
                        failure.set(None);
                    }
                    Err(e) => {
                        error!("Failed to load contests: {}", e);
                        failure.set(Some(e.context("Failed to load contests")));
                    }
                }
                loading.set(false);
            });
            || ()
        });
    }

    {
        let registered = registered.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                if let Ok(list) = api::contests::user_registrations().await {
                    registered.set(list.registrations.iter().map(|r| r.contest_id).collect());
                }
            });
            || ()
        });
    }

    let on_status = {
        let status = status.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            status.set(parse_status(&select.value()));
        })
    };

    let on_search = {
        let term = term.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            term.set(input.value());
        })
    };

    let card = |contest: &Contest| {
        let (action, enabled) = card_action(contest, registered.contains(&contest.id));
        let onclick = {
            let navigator = navigator.clone();
            let route = action_route(action, contest.id);
            Callback::from(move |_| {
                if let Some(navigator) = &navigator {
                    navigator.push(&route);
                }
            })
        };
        html! {
            <div key={contest.id} class="bg-white rounded-lg shadow p-5 flex flex-col gap-3">
                <div class="flex justify-between items-start">
                    <h3 class="text-lg font-semibold">{&contest.title}</h3>
                    <span class="text-xs px-2 py-1 rounded bg-gray-100">{contest.status.label()}</span>
                </div>
                <p class="text-sm text-gray-600">{format!("{} · {}", contest.game_name, contest.game_type)}</p>
                <p class="text-sm">{format_match_time(contest.match_time)}</p>
                <div class="flex justify-between text-sm">
                    <span>{format!("Entry ₹{}", contest.entry_fee)}</span>
                    <span>{format!("Prize ₹{}", contest.prize_pool)}</span>
                </div>
                <div class="w-full bg-gray-200 rounded h-2">
                    <div class="bg-indigo-600 h-2 rounded" style={format!("width: {:.0}%", contest.fill_percent())}></div>
                </div>
                <p class="text-xs text-gray-500">{format!("{}/{} slots", contest.current_slots, contest.max_slots)}</p>
                <button
                    {onclick}
                    disabled={!enabled}
                    class="mt-auto py-2 rounded-md bg-indigo-600 text-white text-sm disabled:opacity-50"
                >
                    {action.label()}
                </button>
            </div>
        }
    };

    let visible = search(&contests, &term);
    let body = if *loading {
        html! { <p class="text-gray-500">{"Loading contests..."}</p> }
    } else if let Some(message) = &*failure {
        html! { <p class="text-red-600">{message}</p> }
    } else if visible.is_empty() {
        html! { <p class="text-gray-500">{"No contests found."}</p> }
    } else {
        html! {
            <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                { for visible.into_iter().map(card) }
            </div>
        }
    };

    html! {
        <div class="max-w-6xl mx-auto p-6 space-y-6">
            <div class="flex flex-col md:flex-row gap-4 justify-between">
                <h1 class="text-2xl font-bold">{"Contests"}</h1>
                <div class="flex gap-3">
                    <input
                        type="search"
                        class="border rounded-md px-3 py-2 text-sm"
                        placeholder="Search by title or game type"
                        value={(*term).clone()}
                        oninput={on_search}
                    />
                    <select class="border rounded-md px-3 py-2 text-sm" onchange={on_status}>
                        { for ContestStatus::FILTERABLE.into_iter().map(|s| html! {
                            <option value={s.as_str()} selected={s == *status}>{s.label()}</option>
                        }) }
                    </select>
                </div>
            </div>
            {body}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_status_defaults_to_open() {
        assert_eq!(parse_status("ongoing"), ContestStatus::Ongoing);
        assert_eq!(parse_status("bogus"), ContestStatus::Open);
    }

    #[test]
    fn test_action_route() {
        assert_eq!(action_route(ContestAction::Join, 3), Route::Register { id: 3 });
        assert_eq!(action_route(ContestAction::EnterLobby, 3), Route::Lobby { id: 3 });
        assert_eq!(action_route(ContestAction::ViewDetails, 3), Route::ContestDetails { id: 3 });
    }
}
