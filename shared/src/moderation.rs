//! Permission checks run before a chat edit or delete is sent.

use chrono::{DateTime, Utc};

use crate::dto::chat::MessageBody;
use crate::edit_window::EditWindow;
use crate::error::{Result, SharedError};
use crate::models::chat::ChatMessage;
use crate::models::user::User;

fn authorize(message: &ChatMessage, actor: &User, window: EditWindow, now: DateTime<Utc>) -> Result<()> {
    if window.message_can_mutate(message, actor, now) {
        Ok(())
    } else if message.user_id == actor.id {
        Err(SharedError::EditWindowClosed)
    } else {
        Err(SharedError::NotAllowed(
            "You can only change your own messages".to_string(),
        ))
    }
}

pub fn authorize_edit(
    message: &ChatMessage,
    actor: &User,
    draft: &str,
    window: EditWindow,
    now: DateTime<Utc>,
) -> Result<MessageBody> {
    authorize(message, actor, window, now)?;
    MessageBody::from_draft(draft)
}

pub fn authorize_delete(
    message: &ChatMessage,
    actor: &User,
    window: EditWindow,
    now: DateTime<Utc>,
) -> Result<()> {
    authorize(message, actor, window, now)
}
