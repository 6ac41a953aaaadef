use std::rc::Rc;

use gloo_storage::{LocalStorage, Storage};
use log::{debug, error, warn};
use shared::{Session, SessionAction, SharedError, User};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::{self, utils::TOKEN_KEY};
use crate::config::Config;
use crate::hooks::use_poll;

const USER_KEY: &str = "user";

/// Reducer wrapper around [`Session`] that mirrors every change into
/// LocalStorage so a reload keeps the user signed in.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState(pub Session);

impl SessionState {
    fn restore() -> Self {
        let user = LocalStorage::get::<User>(USER_KEY).ok();
        let token = LocalStorage::get::<String>(TOKEN_KEY).ok();
        Self(Session { user, token })
    }

    fn persist(&self) {
        match (&self.0.user, &self.0.token) {
            (Some(user), Some(token)) => {
                if let Err(e) = LocalStorage::set(USER_KEY, user) {
                    error!("Failed to store user in local storage: {}", e);
                }
                if let Err(e) = LocalStorage::set(TOKEN_KEY, token) {
                    error!("Failed to store token in local storage: {}", e);
                }
            }
            _ => {
                LocalStorage::delete(USER_KEY);
                LocalStorage::delete(TOKEN_KEY);
            }
        }
    }
}

impl Reducible for SessionState {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = Self(self.0.apply(action));
        next.persist();
        Rc::new(next)
    }
}

/// What components see of the session. All writes go through `dispatch`.
#[derive(Clone, PartialEq)]
pub struct SessionContext {
    pub session: Session,
    pub dispatch: Callback<SessionAction>,
}

impl SessionContext {
    pub fn user(&self) -> Option<&User> {
        self.session.user.as_ref()
    }

    pub fn update_user(&self, user: User) {
        self.dispatch.emit(SessionAction::UpdateUser(user));
    }

    pub fn set_balance(&self, balance: f64) {
        self.dispatch.emit(SessionAction::BalanceChanged(balance));
    }

    pub fn sign_out(&self) {
        self.dispatch.emit(SessionAction::SignedOut);
    }

    /// Re-reads the user from the API, e.g. after a fee was debited.
    pub fn refresh(&self) {
        refresh_user(self.clone());
    }
}

fn refresh_user(session: SessionContext) {
    spawn_local(async move {
        match api::auth::current_user().await {
            Ok(user) => session.update_user(user),
            Err(SharedError::Api { status: 401, .. }) => {
                warn!("Session rejected by the API; signing out");
                session.sign_out();
            }
            Err(e) => debug!("User refresh failed: {}", e),
        }
    });
}

#[hook]
pub fn use_session() -> Option<SessionContext> {
    use_context::<SessionContext>()
}

#[derive(Properties, Clone, PartialEq)]
pub struct SessionProviderProps {
    #[prop_or_default]
    pub children: Children,
}

#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let state = use_reducer_eq(SessionState::restore);
    let dispatcher = state.dispatcher();
    let dispatch = use_callback((), move |action: SessionAction, _| dispatcher.dispatch(action));

    let context = SessionContext {
        session: state.0.clone(),
        dispatch,
    };

    {
        let context = context.clone();
        let signed_in = state.0.is_authenticated();
        use_poll(
            signed_in,
            Config::session_refresh_interval_ms(),
            move || {
                if signed_in {
                    context.refresh();
                }
            },
        );
    }

    html! {
        <ContextProvider<SessionContext> context={context}>
            {props.children.clone()}
        </ContextProvider<SessionContext>>
    }
}
