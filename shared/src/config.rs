use serde::{Deserialize, Serialize};

use crate::edit_window::EditWindow;

/// Length of the owner edit window for registrations and chat messages.
pub const EDIT_WINDOW_MINUTES: i64 = 5;

/// Period between chat refreshes in the contest lobby.
pub const CHAT_POLL_INTERVAL_MS: u32 = 3_000;

/// Largest amount accepted by a single wallet top-up.
pub const MAX_TOP_UP: f64 = 10_000.0;

/// Client-side policy knobs. The defaults match what the API enforces; any
/// field left out of a serialized override keeps its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub edit_window_minutes: i64,
    pub chat_poll_interval_ms: u32,
    pub max_top_up: f64,
    pub messages_page_size: u32,
    pub recent_transactions_page_size: u32,
    pub dashboard_open_contests: usize,
    pub dashboard_recent_activity: usize,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            edit_window_minutes: EDIT_WINDOW_MINUTES,
            chat_poll_interval_ms: CHAT_POLL_INTERVAL_MS,
            max_top_up: MAX_TOP_UP,
            messages_page_size: 100,
            recent_transactions_page_size: 5,
            dashboard_open_contests: 6,
            dashboard_recent_activity: 5,
        }
    }
}

impl PolicyConfig {
    pub fn edit_window(&self) -> EditWindow {
        EditWindow::minutes(self.edit_window_minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::wallet::AddFundsRequest;
    use chrono::{Duration, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = PolicyConfig::default();
        assert_eq!(config.edit_window(), EditWindow::minutes(5));
        assert_eq!(config.chat_poll_interval_ms, 3_000);
        assert_eq!(config.messages_page_size, 100);
    }

    #[test]
    fn test_partial_override_from_json() {
        let config: PolicyConfig = serde_json::from_str(r#"{"edit_window_minutes": 10}"#).unwrap();
        assert_eq!(config.edit_window(), EditWindow::minutes(10));
        assert_eq!(config.chat_poll_interval_ms, CHAT_POLL_INTERVAL_MS);
        assert_eq!(config.max_top_up, MAX_TOP_UP);
        assert_eq!(config.recent_transactions_page_size, 5);
    }

    #[test]
    fn test_empty_override_is_default() {
        let config: PolicyConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, PolicyConfig::default());
    }

    #[test]
    fn test_overrides_reach_the_checks() {
        let config = PolicyConfig {
            edit_window_minutes: 10,
            max_top_up: 500.0,
            ..PolicyConfig::default()
        };
        let created = Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap();
        let later = created + Duration::minutes(9) + Duration::seconds(59);
        assert!(config.edit_window().registration_can_edit(created, later));
        assert!(AddFundsRequest::from_input("499", config.max_top_up).is_ok());
        assert!(AddFundsRequest::from_input("501", config.max_top_up).is_err());
    }
}
