use log::{error, info};
use shared::timestamp::format_message_time;
use shared::{AddFundsRequest, Transaction, WalletStats};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::api;
use crate::auth::use_session;
use crate::components::common_modal::Modal;
use crate::config::Config;

fn overview_error(failed: &[String]) -> Option<String> {
    (!failed.is_empty()).then(|| failed.join(". "))
}

/// Loads stats and recent history; any failure is summarised in `load_error`.
fn load_overview(
    stats: UseStateHandle<Option<WalletStats>>,
    history: UseStateHandle<Vec<Transaction>>,
    load_error: UseStateHandle<Option<String>>,
) {
    let per_page = Config::policy().recent_transactions_page_size;
    spawn_local(async move {
        let mut failed = Vec::new();
        match api::wallet::stats().await {
            Ok(found) => stats.set(Some(found)),
            Err(e) => {
                error!("Failed to load wallet stats: {}", e);
                failed.push(e.context("Couldn't load wallet stats"));
            }
        }
        match api::wallet::transactions(per_page).await {
            Ok(list) => history.set(list),
            Err(e) => {
                error!("Failed to load transactions: {}", e);
                failed.push(e.context("Couldn't load recent transactions"));
            }
        }
        load_error.set(overview_error(&failed));
    });
}

#[function_component(Wallet)]
pub fn wallet() -> Html {
    let session = use_session();
    let amount = use_state(String::new);
    let busy = use_state(|| false);
    let notice = use_state(|| None::<(String, String)>);
    let stats = use_state(|| None::<WalletStats>);
    let history = use_state(Vec::<Transaction>::new);
    let load_error = use_state(|| None::<String>);

    {
        let stats = stats.clone();
        let history = history.clone();
        let load_error = load_error.clone();
        use_effect_with((), move |_| {
            load_overview(stats, history, load_error);
            || ()
        });
    }

    let on_amount = {
        let amount = amount.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            amount.set(input.value());
        })
    };

    let onsubmit = {
        let amount = amount.clone();
        let busy = busy.clone();
        let notice = notice.clone();
        let stats = stats.clone();
        let history = history.clone();
        let load_error = load_error.clone();
        let session = session.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let request = match AddFundsRequest::from_input(&amount, Config::policy().max_top_up) {
                Ok(request) => request,
                Err(e) => {
                    notice.set(Some(("Invalid amount".to_string(), e.to_string())));
                    return;
                }
            };
            busy.set(true);
            let amount = amount.clone();
            let busy = busy.clone();
            let notice = notice.clone();
            let stats = stats.clone();
            let history = history.clone();
            let load_error = load_error.clone();
            let session = session.clone();
            spawn_local(async move {
                match api::wallet::add_funds(&request).await {
                    Ok(response) => {
                        info!("Wallet topped up to {}", response.new_balance);
                        if let Some(session) = &session {
                            session.set_balance(response.new_balance);
                        }
                        amount.set(String::new());
                        let message = response
                            .message
                            .unwrap_or_else(|| format!("Added ₹{} to your wallet", request.amount));
                        notice.set(Some(("Funds added".to_string(), message)));
                        load_overview(stats, history, load_error);
                    }
                    Err(e) => notice.set(Some(("Top-up failed".to_string(), e.to_string()))),
                }
                busy.set(false);
            });
        })
    };

    let on_notice_close = {
        let notice = notice.clone();
        Callback::from(move |_| notice.set(None))
    };

    let balance = session.as_ref().map(|s| s.session.balance()).unwrap_or(0.0);
    let max_top_up = Config::policy().max_top_up;
    let (title, message) = (*notice).clone().unwrap_or_default();

    html! {
        <div class="max-w-4xl mx-auto p-6 space-y-6">
            <div class="bg-white rounded-lg shadow p-6">
                <p class="text-sm text-gray-500">{"Wallet balance"}</p>
                <p class="text-3xl font-bold">{format!("₹{:.2}", balance)}</p>
            </div>

            <form class="bg-white rounded-lg shadow p-6 space-y-4" {onsubmit}>
                <h2 class="text-lg font-semibold">{"Add funds"}</h2>
                <input
                    type="number"
                    min="1"
                    max={max_top_up.to_string()}
                    step="0.01"
                    class="w-full border rounded-md px-3 py-2"
                    placeholder="Amount in ₹"
                    value={(*amount).clone()}
                    oninput={on_amount}
                />
                <p class="text-xs text-gray-500">{format!("Test mode: no real payment is taken. Maximum ₹{} per transaction.", max_top_up)}</p>
                <button type="submit" disabled={*busy} class="px-4 py-2 rounded-md bg-indigo-600 text-white disabled:opacity-50">
                    if *busy { {"Processing..."} } else { {"Add funds"} }
                </button>
            </form>

            if let Some(message) = &*load_error {
                <div class="rounded-md bg-yellow-50 border border-yellow-200 p-3 text-sm text-yellow-800">
                    {message}
                </div>
            }

            if let Some(stats) = &*stats {
                <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                    <div class="bg-white rounded-lg shadow p-4"><p class="text-xs text-gray-500">{"Total added"}</p><p>{format!("₹{:.2}", stats.total_added)}</p></div>
                    <div class="bg-white rounded-lg shadow p-4"><p class="text-xs text-gray-500">{"Total spent"}</p><p>{format!("₹{:.2}", stats.total_spent)}</p></div>
                    <div class="bg-white rounded-lg shadow p-4"><p class="text-xs text-gray-500">{"Winnings"}</p><p>{format!("₹{:.2}", stats.total_winnings)}</p></div>
                    <div class="bg-white rounded-lg shadow p-4"><p class="text-xs text-gray-500">{"Net profit"}</p><p>{stats.net_profit_label()}</p></div>
                </div>
            }

            <div class="bg-white rounded-lg shadow p-6">
                <h2 class="text-lg font-semibold mb-3">{"Recent transactions"}</h2>
                if history.is_empty() {
                    <p class="text-sm text-gray-500">{"No transactions yet."}</p>
                }
                <ul class="divide-y">
                    { for history.iter().map(|t| html! {
                        <li key={t.id} class="flex justify-between py-2 text-sm">
                            <div>
                                <p>{&t.description}</p>
                                <p class="text-xs text-gray-500">{format_message_time(t.created_at)}</p>
                            </div>
                            <span class={if t.kind.is_credit() { "text-green-600" } else { "text-red-600" }}>
                                {t.signed_amount()}
                            </span>
                        </li>
                    }) }
                </ul>
            </div>

            <Modal is_open={notice.is_some()} {title} {message} on_close={on_notice_close} />
        </div>
    }
}
