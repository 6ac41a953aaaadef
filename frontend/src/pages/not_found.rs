use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <div class="not-found-page text-center py-24">
            <h1 class="text-3xl font-bold">{"404 - Page Not Found"}</h1>
            <p class="mt-2 text-gray-600">{"The page you're looking for doesn't exist."}</p>
            <Link<Route> to={Route::Contests} classes="mt-6 inline-block text-indigo-600 underline">
                {"Back to contests"}
            </Link<Route>>
        </div>
    }
}
