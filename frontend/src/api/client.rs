//! `ContestGateway` and `ChatGateway` over the HTTP API functions.

use async_trait::async_trait;
use shared::{
    ChatGateway, ChatMessage, Contest, ContestGateway, MessageBody, Participant, PlayerDetails,
    RegisterRequest, Registration, Result,
};

use crate::api::{chat, contests};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ApiClient;

#[async_trait(?Send)]
impl ContestGateway for ApiClient {
    async fn get_contest(&self, contest_id: i64) -> Result<Contest> {
        contests::get_contest(contest_id).await
    }

    async fn my_registration(&self, contest_id: i64) -> Result<Option<Registration>> {
        contests::my_registration(contest_id).await
    }

    async fn register(&self, contest_id: i64, request: &RegisterRequest) -> Result<Registration> {
        contests::register(contest_id, request).await
    }

    async fn update_registration(
        &self,
        contest_id: i64,
        players: &PlayerDetails,
    ) -> Result<Registration> {
        contests::update_registration(contest_id, players).await
    }
}

#[async_trait(?Send)]
impl ChatGateway for ApiClient {
    async fn list_messages(&self, contest_id: i64, per_page: u32) -> Result<Vec<ChatMessage>> {
        chat::list_messages(contest_id, per_page).await
    }

    async fn participants(&self, contest_id: i64) -> Result<Vec<Participant>> {
        chat::participants(contest_id).await
    }

    async fn send_message(&self, contest_id: i64, body: &MessageBody) -> Result<()> {
        chat::send_message(contest_id, body).await
    }

    async fn send_announcement(&self, contest_id: i64, body: &MessageBody) -> Result<()> {
        chat::send_announcement(contest_id, body).await
    }

    async fn edit_message(&self, contest_id: i64, message_id: i64, body: &MessageBody)
        -> Result<()> {
        chat::edit_message(contest_id, message_id, body).await
    }

    async fn delete_message(&self, contest_id: i64, message_id: i64) -> Result<()> {
        chat::delete_message(contest_id, message_id).await
    }
}
