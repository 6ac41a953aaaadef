use log::{debug, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsValue;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::auth::{use_session, SessionProvider};
use crate::components::nav::Nav;
use crate::config::Config;

pub mod api;
pub mod auth;
pub mod components;
pub mod config;
pub mod hooks;
pub mod pages {
    pub mod contest_details;
    pub mod contest_lobby;
    pub mod contest_registration;
    pub mod contests;
    pub mod dashboard;
    pub mod login;
    pub mod not_found;
    pub mod profile;
    pub mod wallet;
}

use pages::{
    contest_details::ContestDetails, contest_lobby::ContestLobby,
    contest_registration::ContestRegistration, contests::Contests, dashboard::Dashboard,
    login::Login, not_found::NotFound, profile::Profile, wallet::Wallet,
};

#[derive(Clone, Routable, PartialEq, Debug)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/dashboard")]
    Dashboard,
    #[at("/profile")]
    Profile,
    #[at("/contests")]
    Contests,
    #[at("/contests/:id")]
    ContestDetails { id: i64 },
    #[at("/contests/:id/register")]
    Register { id: i64 },
    #[at("/contests/:id/lobby")]
    Lobby { id: i64 },
    #[at("/wallet")]
    Wallet,
    #[not_found]
    #[at("/404")]
    NotFound,
}

#[function_component(App)]
fn app() -> Html {
    debug!("App component rendering");
    html! {
        <SessionProvider>
            <BrowserRouter>
                <div class="app-container min-h-screen bg-gray-50">
                    <Nav />
                    <main class="flex-1">
                        <Switch<Route> render={switch} />
                    </main>
                </div>
            </BrowserRouter>
        </SessionProvider>
    }
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub children: Children,
}

/// Renders children only for a signed-in user; everyone else goes to login.
#[function_component(ProtectedRoute)]
pub fn protected_route(props: &Props) -> Html {
    let session = use_session();
    let navigator = use_navigator();
    let is_authenticated = session
        .as_ref()
        .map(|s| s.session.is_authenticated())
        .unwrap_or(false);

    use_effect_with(is_authenticated, move |is_auth| {
        if !*is_auth {
            if let Some(navigator) = navigator {
                navigator.push(&Route::Login);
            }
        }
        || ()
    });

    if is_authenticated {
        html! { <>{props.children.clone()}</> }
    } else {
        html! {}
    }
}

fn switch(routes: Route) -> Html {
    debug!("Route switch: {:?}", routes);
    match routes {
        Route::Home => html! { <Redirect<Route> to={Route::Dashboard} /> },
        Route::Login => html! { <Login /> },
        Route::Dashboard => html! {
            <ProtectedRoute>
                <Dashboard />
            </ProtectedRoute>
        },
        Route::Profile => html! {
            <ProtectedRoute>
                <Profile />
            </ProtectedRoute>
        },
        Route::Contests => html! {
            <ProtectedRoute>
                <Contests />
            </ProtectedRoute>
        },
        Route::ContestDetails { id } => html! {
            <ProtectedRoute>
                <ContestDetails contest_id={id} />
            </ProtectedRoute>
        },
        Route::Register { id } => html! {
            <ProtectedRoute>
                <ContestRegistration contest_id={id} />
            </ProtectedRoute>
        },
        Route::Lobby { id } => html! {
            <ProtectedRoute>
                <ContestLobby contest_id={id} />
            </ProtectedRoute>
        },
        Route::Wallet => html! {
            <ProtectedRoute>
                <Wallet />
            </ProtectedRoute>
        },
        Route::NotFound => html! { <NotFound /> },
    }
}

#[wasm_bindgen]
pub async fn run_app() -> Result<(), JsValue> {
    wasm_logger::init(wasm_logger::Config::new(Config::log_level()));
    console_error_panic_hook::set_once();
    info!("Logger and panic hook ready; API at {}", Config::api_base_url());

    yew::Renderer::<App>::new().render();
    info!("Application mounted");

    Ok(())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    wasm_bindgen_futures::spawn_local(async {
        if let Err(e) = run_app().await {
            log::error!("Failed to start app: {:?}", e);
        }
    });
    Ok(())
}
