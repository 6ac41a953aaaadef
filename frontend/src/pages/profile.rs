use shared::timestamp::format_date;
use shared::User;
use yew::prelude::*;

use crate::auth::use_session;

/// Label/value rows shown for the cached user.
fn profile_rows(user: &User) -> Vec<(&'static str, String)> {
    vec![
        ("Username", user.username.clone()),
        ("Email", user.email.clone()),
        ("Rank", user.rank.clone().unwrap_or_else(|| "Unranked".to_string())),
        ("Wallet Balance", format!("{:.2}₹", user.wallet_balance)),
        (
            "Member since",
            user.created_at
                .map(format_date)
                .unwrap_or_else(|| "Unknown".to_string()),
        ),
    ]
}

#[function_component(Profile)]
pub fn profile() -> Html {
    let session = use_session();
    let Some(user) = session.as_ref().and_then(|s| s.user().cloned()) else {
        return html! {};
    };

    html! {
        <div class="max-w-2xl mx-auto p-6 space-y-6">
            <h1 class="text-3xl font-bold text-center">{"Profile"}</h1>
            <div class="bg-white rounded-lg shadow p-6">
                <h2 class="text-lg font-semibold mb-4">{"User Information"}</h2>
                <dl class="space-y-2 text-sm">
                    { for profile_rows(&user).into_iter().map(|(label, value)| html! {
                        <div class="flex gap-2">
                            <dt class="font-semibold">{format!("{}:", label)}</dt>
                            <dd>{value}</dd>
                        </div>
                    }) }
                </dl>
            </div>
        </div>
    }
}
