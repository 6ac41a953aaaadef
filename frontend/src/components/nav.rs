use yew::prelude::*;
use yew_router::prelude::*;

use crate::auth::use_session;
use crate::Route;

#[function_component(Nav)]
pub fn nav() -> Html {
    let session = use_session();
    let navigator = use_navigator();

    let Some(session) = session.filter(|s| s.session.is_authenticated()) else {
        return html! {
            <nav class="bg-white shadow px-6 py-3">
                <span class="font-bold text-indigo-600">{"Contest Arena"}</span>
            </nav>
        };
    };

    let on_logout_click = {
        let session = session.clone();
        Callback::from(move |_| {
            session.sign_out();
            if let Some(navigator) = &navigator {
                navigator.push(&Route::Login);
            }
        })
    };

    let username = session.user().map(|u| u.username.clone()).unwrap_or_default();

    html! {
        <nav class="bg-white shadow px-6 py-3 flex items-center justify-between">
            <div class="flex items-center gap-6">
                <Link<Route> to={Route::Dashboard} classes="font-bold text-indigo-600">{"Contest Arena"}</Link<Route>>
                <Link<Route> to={Route::Dashboard} classes="text-sm text-gray-700">{"Dashboard"}</Link<Route>>
                <Link<Route> to={Route::Contests} classes="text-sm text-gray-700">{"Contests"}</Link<Route>>
                <Link<Route> to={Route::Wallet} classes="text-sm text-gray-700">{"Wallet"}</Link<Route>>
                <Link<Route> to={Route::Profile} classes="text-sm text-gray-700">{"Profile"}</Link<Route>>
            </div>
            <div class="flex items-center gap-4 text-sm">
                <span class="px-2 py-1 rounded bg-green-50 text-green-700">{format!("₹{:.2}", session.session.balance())}</span>
                <span>{username}</span>
                if session.session.is_admin() {
                    <span class="px-1 rounded bg-red-100 text-red-700 text-xs">{"Admin"}</span>
                }
                <button onclick={on_logout_click} class="text-gray-600 hover:text-gray-900">{"Logout"}</button>
            </div>
        </nav>
    }
}
