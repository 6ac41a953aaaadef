use log::error;
use shared::dto::dashboard::open_preview;
use shared::timestamp::format_date;
use shared::{Contest, ContestStatus, MyContests, WalletStats};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api;
use crate::auth::use_session;
use crate::config::Config;
use crate::Route;

#[derive(Clone, Default, PartialEq)]
struct Overview {
    stats: Option<WalletStats>,
    open: Vec<Contest>,
    mine: MyContests,
    failures: Vec<String>,
}

async fn load_overview() -> Overview {
    let mut overview = Overview::default();
    match api::wallet::stats().await {
        Ok(stats) => overview.stats = Some(stats),
        Err(e) => overview.failures.push(e.context("Wallet stats")),
    }
    match api::contests::list_contests(ContestStatus::Open).await {
        Ok(open) => overview.open = open,
        Err(e) => overview.failures.push(e.context("Open contests")),
    }
    match api::contests::my_contests().await {
        Ok(mine) => overview.mine = mine,
        Err(e) => overview.failures.push(e.context("Recent activity")),
    }
    for failure in &overview.failures {
        error!("Dashboard load failed: {}", failure);
    }
    overview
}

#[function_component(Dashboard)]
pub fn dashboard() -> Html {
    let session = use_session();
    let overview = use_state(|| None::<Overview>);

    {
        let overview = overview.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                overview.set(Some(load_overview().await));
            });
            || ()
        });
    }

    let Some(overview) = (*overview).clone() else {
        return html! {
            <div class="flex items-center justify-center min-h-[60vh] text-gray-500">{"Loading..."}</div>
        };
    };

    let policy = Config::policy();
    let username = session
        .as_ref()
        .and_then(|s| s.user().map(|u| u.username.clone()))
        .unwrap_or_default();
    let balance = session.as_ref().map(|s| s.session.balance()).unwrap_or(0.0);
    let stats = overview.stats.clone().unwrap_or_default();
    let open = open_preview(&overview.open, policy.dashboard_open_contests);
    let recent = overview.mine.recent(policy.dashboard_recent_activity);

    html! {
        <div class="max-w-6xl mx-auto p-6 space-y-8">
            <div class="text-center space-y-2">
                <h1 class="text-3xl font-bold">{format!("Welcome back, {}!", username)}</h1>
                <p class="text-gray-500">{"Ready to dominate the competition? Check out the latest contests below."}</p>
            </div>

            if !overview.failures.is_empty() {
                <div class="rounded-md bg-yellow-50 border border-yellow-200 p-3 text-sm text-yellow-800">
                    {format!("Some sections could not be loaded. {}", overview.failures.join(". "))}
                </div>
            }

            <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                <div class="bg-white rounded-lg shadow p-4"><p class="text-xs text-gray-500">{"Wallet Balance"}</p><p class="text-xl font-bold">{format!("{:.2}₹", balance)}</p></div>
                <div class="bg-white rounded-lg shadow p-4"><p class="text-xs text-gray-500">{"Total Spent"}</p><p class="text-xl font-bold">{format!("{:.2}₹", stats.total_spent)}</p></div>
                <div class="bg-white rounded-lg shadow p-4"><p class="text-xs text-gray-500">{"Total Won"}</p><p class="text-xl font-bold">{format!("{:.2}₹", stats.total_winnings)}</p></div>
                <div class="bg-white rounded-lg shadow p-4"><p class="text-xs text-gray-500">{"Net Profit"}</p><p class="text-xl font-bold">{stats.net_profit_label()}</p></div>
            </div>

            <div class="bg-white rounded-lg shadow p-6 flex flex-wrap gap-3">
                <Link<Route> to={Route::Contests} classes="px-4 py-2 rounded-md bg-indigo-600 text-white text-sm">{"Browse Contests"}</Link<Route>>
                <Link<Route> to={Route::Wallet} classes="px-4 py-2 rounded-md bg-gray-100 text-sm">{"Add Funds"}</Link<Route>>
                <Link<Route> to={Route::Profile} classes="px-4 py-2 rounded-md bg-gray-100 text-sm">{"View Profile"}</Link<Route>>
            </div>

            <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                <div class="bg-white rounded-lg shadow p-6 space-y-3">
                    <h2 class="text-lg font-semibold">{"Open Contests"}</h2>
                    if open.is_empty() {
                        <p class="text-sm text-gray-500">{"No open contests available"}</p>
                    }
                    { for open.into_iter().map(|contest| html! {
                        <div key={contest.id} class="border rounded-lg p-4 flex justify-between items-center">
                            <div>
                                <h4 class="font-medium">{&contest.title}</h4>
                                <p class="text-xs text-gray-500">
                                    {format!(
                                        "{} · Entry {}₹ · Prize {}₹ · {}/{}",
                                        contest.game_type,
                                        contest.entry_fee,
                                        contest.prize_pool,
                                        contest.current_slots,
                                        contest.max_slots
                                    )}
                                </p>
                            </div>
                            <Link<Route> to={Route::ContestDetails { id: contest.id }} classes="text-sm text-indigo-600">{"View"}</Link<Route>>
                        </div>
                    }) }
                    <Link<Route> to={Route::Contests} classes="text-sm text-indigo-600 underline">{"View all contests"}</Link<Route>>
                </div>

                <div class="bg-white rounded-lg shadow p-6 space-y-3">
                    <h2 class="text-lg font-semibold">{"My Recent Activity"}</h2>
                    if recent.is_empty() {
                        <p class="text-sm text-gray-500">{"No recent activity"}</p>
                    }
                    { for recent.iter().map(|item| html! {
                        <div key={item.contest.id} class="border rounded-lg p-4 flex justify-between items-center">
                            <div>
                                <h4 class="font-medium">{&item.contest.title}</h4>
                                <p class="text-xs text-gray-500">{format!("Game: {}", item.contest.game_type)}</p>
                                <p class="text-xs text-gray-500">{format!("Joined: {}", format_date(item.participation.joined_at))}</p>
                            </div>
                            <Link<Route> to={Route::ContestDetails { id: item.contest.id }} classes="text-sm text-indigo-600">{"View"}</Link<Route>>
                        </div>
                    }) }
                </div>
            </div>
        </div>
    }
}
