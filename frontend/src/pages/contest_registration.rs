use log::error;
use shared::gateway::registration_status;
use shared::{Contest, ContestGateway, Registration};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::client::ApiClient;
use crate::components::contest::registration_form::{RegistrationForm, RegistrationPanel};
use crate::Route;

#[derive(Properties, PartialEq)]
pub struct ContestRegistrationProps {
    pub contest_id: i64,
}

/// Shows the form for new entrants and the summary for existing ones.
#[function_component(ContestRegistration)]
pub fn contest_registration(props: &ContestRegistrationProps) -> Html {
    let navigator = use_navigator();
    let contest = use_state(|| None::<Contest>);
    let registration = use_state(|| None::<Registration>);
    let probed = use_state(|| false);

    {
        let contest = contest.clone();
        let registration = registration.clone();
        let probed = probed.clone();
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
                registration.set(registration_status(&ApiClient, contest_id).await);
                probed.set(true);
            });
            || ()
        });
    }

    let on_registered = {
        let navigator = navigator.clone();
        let registration = registration.clone();
        Callback::from(move |created: Registration| {
            let contest_id = created.contest_id;
            registration.set(Some(created));
            if let Some(navigator) = &navigator {
                navigator.push(&Route::Lobby { id: contest_id });
            }
        })
    };
    let on_changed = {
        let registration = registration.clone();
        Callback::from(move |saved: Registration| registration.set(Some(saved)))
    };

    let (Some(contest), true) = ((*contest).clone(), *probed) else {
        return html! { <p class="p-6 text-gray-500">{"Loading..."}</p> };
    };

    let body = match (*registration).clone() {
        Some(existing) => html! {
            <RegistrationPanel contest={contest.clone()} registration={existing} {on_changed} />
        },
        None => match contest.closed_reason() {
            Some(reason) => html! {
                <div class="bg-white rounded-lg shadow p-6 text-red-600">{reason}</div>
            },
            None => html! {
                <RegistrationForm contest={contest.clone()} {on_registered} />
            },
        },
    };

    html! {
        <div class="max-w-3xl mx-auto p-6 space-y-6">
            <div>
                <h1 class="text-2xl font-bold">{&contest.title}</h1>
                <p class="text-gray-600">{format!("{} · {} · Entry ₹{}", contest.game_name, contest.game_type, contest.entry_fee)}</p>
            </div>
            {body}
        </div>
    }
}
