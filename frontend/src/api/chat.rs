use crate::api::api_url;
use crate::api::utils::{
    authenticated_delete, authenticated_get, authenticated_post, authenticated_put, build,
    send_empty, send_json, with_json,
};
use log::debug;
use shared::{ChatMessage, MessageBody, MessageList, PageQuery, Participant, ParticipantList, Result};

fn messages_path(contest_id: i64) -> String {
    format!("/contests/{}/messages", contest_id)
}

pub async fn list_messages(contest_id: i64, per_page: u32) -> Result<Vec<ChatMessage>> {
    let query = PageQuery { per_page }.to_query_string();
    let url = api_url(&format!("{}?{}", messages_path(contest_id), query));
    let body: MessageList = send_json(build(authenticated_get(&url))?).await?;
    Ok(body.messages)
}

pub async fn participants(contest_id: i64) -> Result<Vec<Participant>> {
    let url = api_url(&format!("/contests/{}/participants", contest_id));
    let body: ParticipantList = send_json(build(authenticated_get(&url))?).await?;
    Ok(body.participants)
}

pub async fn send_message(contest_id: i64, body: &MessageBody) -> Result<()> {
    debug!("Sending message to contest {}", contest_id);
    let url = api_url(&messages_path(contest_id));
    send_empty(with_json(authenticated_post(&url), body)?).await
}

pub async fn send_announcement(contest_id: i64, body: &MessageBody) -> Result<()> {
    debug!("Sending announcement to contest {}", contest_id);
    let url = api_url(&format!("{}/admin", messages_path(contest_id)));
    send_empty(with_json(authenticated_post(&url), body)?).await
}

pub async fn edit_message(contest_id: i64, message_id: i64, body: &MessageBody) -> Result<()> {
    debug!("Editing message {} in contest {}", message_id, contest_id);
    let url = api_url(&format!("{}/{}", messages_path(contest_id), message_id));
    send_empty(with_json(authenticated_put(&url), body)?).await
}

pub async fn delete_message(contest_id: i64, message_id: i64) -> Result<()> {
    debug!("Deleting message {} in contest {}", message_id, contest_id);
    let url = api_url(&format!("{}/{}", messages_path(contest_id), message_id));
    send_empty(build(authenticated_delete(&url))?).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_messages_path() {
        assert_eq!(messages_path(7), "/contests/7/messages");
    }
}
