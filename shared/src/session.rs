//! The signed-in user as held by the client.
//!
//! `Session::apply` is the only way to change it. The frontend wraps it in a
//! Yew reducer so every component reads the same record and the last
//! dispatched action wins.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::models::user::User;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: Option<User>,
    pub token: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    SignedIn { user: User, token: String },
    /// Replaces the cached user, e.g. after `GET /auth/me`.
    UpdateUser(User),
    /// New wallet balance reported by the API.
    BalanceChanged(f64),
    SignedOut,
}

impl Session {
    pub fn apply(&self, action: SessionAction) -> Session {
        debug!("Session action: {:?}", action);
        match action {
            SessionAction::SignedIn { user, token } => Session {
                user: Some(user),
                token: Some(token),
            },
            SessionAction::UpdateUser(user) => Session {
                user: Some(user),
                token: self.token.clone(),
            },
            SessionAction::BalanceChanged(balance) => Session {
                user: self.user.as_ref().map(|u| u.with_balance(balance)),
                token: self.token.clone(),
            },
            SessionAction::SignedOut => Session::default(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().map(|u| u.is_admin).unwrap_or(false)
    }

    /// Cached wallet balance; zero when signed out.
    pub fn balance(&self) -> f64 {
        self.user.as_ref().map(|u| u.wallet_balance).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::fixtures::{admin, player};
    use pretty_assertions::assert_eq;

    fn signed_in() -> Session {
        Session::default().apply(SessionAction::SignedIn {
            user: player(1, 30.0),
            token: "tok".into(),
        })
    }

    #[test]
    fn test_sign_in_and_out() {
        let session = signed_in();
        assert!(session.is_authenticated());
        assert!(!session.is_admin());
        assert_eq!(session.apply(SessionAction::SignedOut), Session::default());
    }

    #[test]
    fn test_balance_change_keeps_token() {
        let session = signed_in().apply(SessionAction::BalanceChanged(130.0));
        assert_eq!(session.balance(), 130.0);
        assert_eq!(session.token.as_deref(), Some("tok"));
    }

    #[test]
    fn test_balance_change_while_signed_out_is_noop() {
        let session = Session::default().apply(SessionAction::BalanceChanged(10.0));
        assert_eq!(session, Session::default());
        assert_eq!(session.balance(), 0.0);
    }

    #[test]
    fn test_last_update_wins() {
        let session = signed_in()
            .apply(SessionAction::UpdateUser(player(1, 80.0)))
            .apply(SessionAction::UpdateUser(admin(1)));
        assert!(session.is_admin());
        assert_eq!(session.balance(), 0.0);
    }

    #[test]
    fn test_persisted_form_round_trips() {
        let session = signed_in();
        let json = serde_json::to_string(&session).unwrap();
        assert_eq!(serde_json::from_str::<Session>(&json).unwrap(), session);
    }
}
