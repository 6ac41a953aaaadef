use log::{debug, error};
use shared::gateway::registration_status;
use shared::lobby::{roster, Roster};
use shared::timestamp::format_match_time;
use shared::{Contest, ContestGateway, Registration};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::{self, client::ApiClient};
use crate::components::contest::chat::Chat;
use crate::components::contest::registration_form::RegistrationPanel;
use crate::Route;

#[derive(Properties, PartialEq)]
pub struct ContestLobbyProps {
    pub contest_id: i64,
}

fn seat_row(registration: &Registration) -> Html {
    let name = registration
        .username
        .clone()
        .unwrap_or_else(|| registration.players.player1_name.clone());
    html! {
        <li key={registration.id} class="flex justify-between py-1 text-sm">
            <span>{format!("#{} {}", registration.seat_number, name)}</span>
            <span class="text-gray-500">{&registration.players.player1_name}</span>
        </li>
    }
}

#[function_component(ContestLobby)]
pub fn contest_lobby(props: &ContestLobbyProps) -> Html {
    let navigator = use_navigator();
    let contest = use_state(|| None::<Contest>);
    let registrations = use_state(Vec::<Registration>::new);
    let mine = use_state(|| None::<Registration>);

    {
        let contest = contest.clone();
        let registrations = registrations.clone();
        let mine = mine.clone();
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
                match api::contests::contest_registrations(contest_id).await {
                    Ok(list) => registrations.set(list),
                    Err(e) => debug!("Roster unavailable for contest {}: {}", contest_id, e),
                }
            });
            spawn_local(async move {
                mine.set(registration_status(&ApiClient, contest_id).await);
            });
            || ()
        });
    }

    let on_changed = {
        let mine = mine.clone();
        let registrations = registrations.clone();
        Callback::from(move |saved: Registration| {
            let updated = registrations
                .iter()
                .map(|r| if r.id == saved.id { saved.clone() } else { r.clone() })
                .collect();
            registrations.set(updated);
            mine.set(Some(saved));
        })
    };

    let Some(contest) = (*contest).clone() else {
        return html! { <p class="p-6 text-gray-500">{"Loading lobby..."}</p> };
    };

    let roster_view = match roster(contest.game_type, &registrations) {
        Roster::Seats(seats) if seats.is_empty() => html! {
            <p class="text-sm text-gray-500">{"No participants yet."}</p>
        },
        Roster::Seats(seats) => html! {
            <ul class="divide-y">{ for seats.into_iter().map(seat_row) }</ul>
        },
        Roster::Teams(teams) => html! {
            <div class="space-y-3">
                { for teams.into_iter().map(|(team, members)| html! {
                    <div key={team}>
                        <h4 class="text-sm font-semibold">{format!("Team {}", team)}</h4>
                        <ul class="divide-y">{ for members.into_iter().map(seat_row) }</ul>
                    </div>
                }) }
            </div>
        },
    };

    html! {
        <div class="max-w-6xl mx-auto p-6 grid grid-cols-1 lg:grid-cols-3 gap-6">
            <div class="space-y-6">
                <div class="bg-white rounded-lg shadow p-5">
                    <h1 class="text-xl font-bold">{&contest.title}</h1>
                    <p class="text-sm text-gray-600">{format_match_time(contest.match_time)}</p>
                    <p class="text-sm">{format!("{}/{} slots filled", contest.current_slots, contest.max_slots)}</p>
                </div>
                if let Some(registration) = (*mine).clone() {
                    <RegistrationPanel contest={contest.clone()} {registration} {on_changed} in_lobby=true />
                }
                <div class="bg-white rounded-lg shadow p-5">
                    <h3 class="font-semibold mb-2">{"Participants"}</h3>
                    {roster_view}
                </div>
            </div>
            <div class="lg:col-span-2">
                <Chat contest_id={contest.id} />
            </div>
        </div>
    }
}
