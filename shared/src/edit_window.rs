//! Owner edit window for registrations and chat messages.
//!
//! Both resources may be changed by their owner for a fixed span after
//! creation, boundary included. Chat messages additionally yield to admins at
//! any age; registrations do not. The predicates take `now` explicitly and
//! must be re-evaluated on every check since the answer changes with time.
//! Clock skew between client and server is not corrected.

use chrono::{DateTime, Duration, Utc};

use crate::config::EDIT_WINDOW_MINUTES;
use crate::models::chat::ChatMessage;
use crate::models::user::User;

/// Length of the window, normally taken from
/// [`PolicyConfig::edit_window`](crate::config::PolicyConfig::edit_window).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditWindow(Duration);

impl Default for EditWindow {
    fn default() -> Self {
        Self::minutes(EDIT_WINDOW_MINUTES)
    }
}

impl EditWindow {
    pub fn minutes(minutes: i64) -> Self {
        Self(Duration::minutes(minutes))
    }

    /// Whether `now` still falls inside the window opened at `created_at`.
    pub fn contains(&self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(created_at) <= self.0
    }

    /// Registration edits follow the window for every actor, admins included.
    pub fn registration_can_edit(&self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        self.contains(created_at, now)
    }

    /// Admins may edit or delete any message; authors only their own and
    /// only inside the window.
    pub fn message_can_mutate(&self, message: &ChatMessage, actor: &User, now: DateTime<Utc>) -> bool {
        if actor.is_admin {
            return true;
        }
        message.user_id == actor.id && self.contains(message.created_at, now)
    }

    /// Time left before the window closes, or `None` once it has.
    pub fn remaining(&self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> Option<Duration> {
        let left = self.0 - now.signed_duration_since(created_at);
        (left >= Duration::zero()).then_some(left)
    }
}
