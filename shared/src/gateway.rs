//! The REST API as seen by the client. The browser build implements these
//! traits over `gloo-net`; tests use in-memory fakes.

use async_trait::async_trait;
use log::debug;

use crate::dto::chat::MessageBody;
use crate::dto::registration::RegisterRequest;
use crate::error::Result;
use crate::models::chat::{ChatMessage, Participant};
use crate::models::contest::Contest;
use crate::models::registration::{PlayerDetails, Registration};

#[async_trait(?Send)]
pub trait ContestGateway {
    /// `GET /contests/{id}`
    async fn get_contest(&self, contest_id: i64) -> Result<Contest>;

    /// `GET /contests/{id}/registration`
    async fn my_registration(&self, contest_id: i64) -> Result<Option<Registration>>;

    /// `POST /contests/{id}/register`
    async fn register(&self, contest_id: i64, request: &RegisterRequest) -> Result<Registration>;

    /// `PUT /contests/{id}/registration`
    async fn update_registration(
        &self,
        contest_id: i64,
        players: &PlayerDetails,
    ) -> Result<Registration>;
}

#[async_trait(?Send)]
pub trait ChatGateway {
    /// `GET /contests/{id}/messages?per_page=N`
    async fn list_messages(&self, contest_id: i64, per_page: u32) -> Result<Vec<ChatMessage>>;

    /// `GET /contests/{id}/participants`
    async fn participants(&self, contest_id: i64) -> Result<Vec<Participant>>;

    /// `POST /contests/{id}/messages`
    async fn send_message(&self, contest_id: i64, body: &MessageBody) -> Result<()>;

    /// `POST /contests/{id}/messages/admin`
    async fn send_announcement(&self, contest_id: i64, body: &MessageBody) -> Result<()>;

    /// `PUT /contests/{id}/messages/{message_id}`
    async fn edit_message(&self, contest_id: i64, message_id: i64, body: &MessageBody)
        -> Result<()>;

    /// `DELETE /contests/{id}/messages/{message_id}`
    async fn delete_message(&self, contest_id: i64, message_id: i64) -> Result<()>;
}

/// Probes whether the current user is registered. Any failure, including a
/// network error, reads as "not registered".
pub async fn registration_status<G>(gateway: &G, contest_id: i64) -> Option<Registration>
where
    G: ContestGateway + ?Sized,
{
    match gateway.my_registration(contest_id).await {
        Ok(registration) => registration,
        Err(e) => {
            debug!("Registration probe for contest {} treated as absent: {}", contest_id, e);
            None
        }
    }
}
