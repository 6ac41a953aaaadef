use log::debug;
use shared::SessionAction;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::events::SubmitEvent;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api;
use crate::auth::use_session;
use crate::Route;

#[function_component(Login)]
pub fn login() -> Html {
    let email = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(String::new);
    let loading = use_state(|| false);

    let session = use_session();
    let navigator = use_navigator();
    let signed_in = session
        .as_ref()
        .map(|s| s.session.is_authenticated())
        .unwrap_or(false);

    // Redirect to the catalogue once a session exists
    {
        let navigator = navigator.clone();
        use_effect_with(signed_in, move |signed_in| {
            if *signed_in {
                debug!("Session present, leaving login page");
                if let Some(navigator) = navigator {
                    navigator.push(&Route::Dashboard);
                }
            }
            || ()
        });
    }

    let onsubmit = {
        let email = email.clone();
        let password = password.clone();
        let error = error.clone();
        let loading = loading.clone();
        let session = session.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let email = email.trim().to_string();
            let password = password.to_string();

            if email.is_empty() || password.is_empty() {
                error.set("Please enter both email and password".to_string());
                return;
            }

            loading.set(true);
            error.set(String::new());
            let error = error.clone();
            let loading = loading.clone();
            let session = session.clone();
            spawn_local(async move {
                match api::auth::login(email, password).await {
                    Ok(response) => {
                        if let Some(session) = session {
                            session.dispatch.emit(SessionAction::SignedIn {
                                user: response.user,
                                token: response.access_token,
                            });
                        }
                    }
                    Err(e) => error.set(e.to_string()),
                }
                loading.set(false);
            });
        })
    };

    let onemailchange = {
        let email = email.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            email.set(input.value());
        })
    };

    let onpasswordchange = {
        let password = password.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    html! {
        <div class="min-h-screen flex items-center justify-center bg-gray-50 py-12 px-4">
            <div class="max-w-md w-full space-y-8">
                <h2 class="mt-6 text-center text-3xl font-extrabold text-gray-900">
                    {"Sign in to Contest Arena"}
                </h2>
                <form class="mt-8 space-y-6" {onsubmit}>
                    <div class="rounded-md shadow-sm -space-y-px">
                        <div>
                            <label for="email" class="sr-only">{"Email address"}</label>
                            <input
                                id="email"
                                type="email"
                                required=true
                                class="appearance-none rounded-t-md relative block w-full px-3 py-2 border border-gray-300 text-gray-900 sm:text-sm"
                                placeholder="Email address"
                                onchange={onemailchange}
                            />
                        </div>
                        <div>
                            <label for="password" class="sr-only">{"Password"}</label>
                            <input
                                id="password"
                                type="password"
                                required=true
                                class="appearance-none rounded-b-md relative block w-full px-3 py-2 border border-gray-300 text-gray-900 sm:text-sm"
                                placeholder="Password"
                                onchange={onpasswordchange}
                            />
                        </div>
                    </div>

                    if !error.is_empty() {
                        <div class="text-red-500 text-sm text-center">{error.to_string()}</div>
                    }

                    <button
                        type="submit"
                        disabled={*loading}
                        class="w-full flex justify-center py-2 px-4 text-sm font-medium rounded-md text-white bg-indigo-600 hover:bg-indigo-700 disabled:opacity-50"
                    >
                        if *loading { {"Signing in..."} } else { {"Sign in"} }
                    </button>
                </form>
            </div>
        </div>
    }
}
