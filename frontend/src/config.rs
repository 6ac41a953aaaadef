use log::{warn, Level};
use shared::config::PolicyConfig;

/// Build-time settings. Trunk (dev) and nginx (prod) both proxy `/api` to the
/// backend, so the relative default works in either setup.
pub struct Config;

impl Config {
    pub fn api_base_url() -> String {
        option_env!("CONTEST_API_BASE")
            .unwrap_or("/api")
            .trim_end_matches('/')
            .to_string()
    }

    pub fn log_level() -> Level {
        parse_level(option_env!("CONTEST_LOG_LEVEL"))
    }

    /// Policy defaults, optionally overridden at build time by a JSON
    /// object in `CONTEST_POLICY` (e.g. `{"edit_window_minutes": 10}`).
    pub fn policy() -> PolicyConfig {
        parse_policy(option_env!("CONTEST_POLICY"))
    }

    pub fn chat_poll_interval_ms() -> u32 {
        Self::policy().chat_poll_interval_ms
    }

    /// Period of the background refresh of the signed-in user.
    pub fn session_refresh_interval_ms() -> u32 {
        300_000
    }
}

fn parse_policy(raw: Option<&str>) -> PolicyConfig {
    match raw.map(serde_json::from_str::<PolicyConfig>) {
        Some(Ok(policy)) => policy,
        Some(Err(e)) => {
            warn!("Ignoring malformed CONTEST_POLICY: {}", e);
            PolicyConfig::default()
        }
        None => PolicyConfig::default(),
    }
}

fn parse_level(raw: Option<&str>) -> Level {
    raw.and_then(|s| s.parse().ok()).unwrap_or(Level::Debug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level(None), Level::Debug);
        assert_eq!(parse_level(Some("warn")), Level::Warn);
        assert_eq!(parse_level(Some("loud")), Level::Debug);
    }

    #[test]
    fn test_parse_policy_override() {
        let policy = parse_policy(Some(r#"{"edit_window_minutes": 10, "max_top_up": 500}"#));
        assert_eq!(policy.edit_window_minutes, 10);
        assert_eq!(policy.max_top_up, 500.0);
        assert_eq!(policy.messages_page_size, 100);
        assert_eq!(parse_policy(Some("not json")), PolicyConfig::default());
        assert_eq!(parse_policy(None), PolicyConfig::default());
    }

    #[test]
    fn test_poll_interval_matches_policy() {
        assert_eq!(Config::chat_poll_interval_ms(), 3_000);
    }
}
