use crate::components::forms::{required, Form, FormAction, ValidationErrors};
use crate::effect::Effect;
use crate::environment::types::User;
use crate::environment::Environment;
use crate::store::AppAction;

#[derive(Clone, Eq, PartialEq)]
pub enum AuthAction {
    /// Ask the server whether the stored token still names a session.
    Check,
    Checked(Result<User, String>),
    Login { name: String, password: String },
    LoggedIn(Result<User, String>),
    Logout,
    LoggedOut(Result<(), String>),
}

// Manual impl so credentials never end up in trace logs.
impl std::fmt::Debug for AuthAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Check => write!(f, "Check"),
            Self::Checked(result) => f.debug_tuple("Checked").field(result).finish(),
            Self::Login { name, .. } => f.debug_struct("Login").field("name", name).finish(),
            Self::LoggedIn(result) => f.debug_tuple("LoggedIn").field(result).finish(),
            Self::Logout => write!(f, "Logout"),
            Self::LoggedOut(result) => f.debug_tuple("LoggedOut").field(result).finish(),
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct State {
    pub user: Option<User>,
    pub logged_in: bool,
    /// Session restore ran, whichever way it went.
    pub checked: bool,
    pub checking: bool,
    pub logging_in: bool,
    pub error: Option<String>,
}

/// Validate the login form; on success dispatch the login flow.
pub fn login(name: &str, password: &str, _environment: &Environment) -> Effect<AppAction> {
    let mut errors = ValidationErrors::default();
    errors.check("name", required(name, "Name or email address is required"));
    errors.check("password", required(password, "Password is required"));
    if !errors.is_empty() {
        return Effect::action(FormAction::Invalid(Form::Login, errors).into());
    }
    Effect::action(
        AuthAction::Login {
            name: name.trim().to_string(),
            password: password.to_string(),
        }
        .into(),
    )
}

pub fn reduce(
    action: &AppAction,
    state: &mut State,
    environment: &Environment,
) -> Effect<AppAction> {
    let AppAction::Auth(action) = action else {
        return Effect::NONE;
    };
    log::trace!("{action:?}");
    match action {
        AuthAction::Check => {
            if !environment.api.has_token() {
                state.checked = true;
                return Effect::NONE;
            }
            state.checking = true;
            let api = environment.api.clone();
            Effect::future(async move { api.get_user().await }, |result| {
                AuthAction::Checked(result).into()
            })
        }
        AuthAction::Checked(result) => {
            state.checking = false;
            state.checked = true;
            // an invalid token is a fresh visit, not an error to render
            if let Ok(user) = result {
                state.user = Some(user.clone());
                state.logged_in = true;
            }
            Effect::NONE
        }
        AuthAction::Login { name, password } => {
            state.logging_in = true;
            state.error = None;
            let api = environment.api.clone();
            let name = name.clone();
            let password = password.clone();
            Effect::future(async move { api.login(name, password).await }, |result| {
                AuthAction::LoggedIn(result).into()
            })
        }
        AuthAction::LoggedIn(result) => {
            state.logging_in = false;
            match result {
                Ok(user) => {
                    state.user = Some(user.clone());
                    state.logged_in = true;
                    state.checked = true;
                }
                Err(e) => state.error = Some(e.clone()),
            }
            Effect::NONE
        }
        AuthAction::Logout => {
            let api = environment.api.clone();
            Effect::future(async move { api.logout().await }, |result| {
                AuthAction::LoggedOut(result).into()
            })
        }
        AuthAction::LoggedOut(result) => {
            if let Err(e) = result {
                log::error!("logout failed: {e}");
            }
            // the local session ends either way
            *state = State {
                checked: true,
                ..State::default()
            };
            Effect::NONE
        }
    }
}
