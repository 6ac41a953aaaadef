use crate::api::api_url;
use crate::api::utils::{authenticated_get, authenticated_post, build, send_json, with_json};
use log::debug;
use shared::{
    AddFundsRequest, AddFundsResponse, PageQuery, Result, Transaction, TransactionList,
    WalletStats,
};

/// Payments are mocked; the request is validated before it gets here.
pub async fn add_funds(request: &AddFundsRequest) -> Result<AddFundsResponse> {
    debug!("Adding {} to wallet", request.amount);
    send_json(with_json(authenticated_post(&api_url("/wallet/add-funds")), request)?).await
}

pub async fn stats() -> Result<WalletStats> {
    send_json(build(authenticated_get(&api_url("/wallet/stats")))?).await
}

pub async fn transactions(per_page: u32) -> Result<Vec<Transaction>> {
    let query = PageQuery { per_page }.to_query_string();
    let url = api_url(&format!("/wallet/transactions?{}", query));
    let body: TransactionList = send_json(build(authenticated_get(&url))?).await?;
    Ok(body.transactions)
}
