use strum_macros::Display;

use crate::components::auth::AuthAction;
use crate::components::change_password::ChangeAction;
use crate::components::recover_password::RecoverAction;
use crate::components::upload::UploadAction;
use crate::effect::Effect;
use crate::environment::Environment;
use crate::store::AppAction;

/// Field name to human-readable message. Built fresh per validation,
/// never mutated after it left the validating creator.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ValidationErrors {
    entries: im::HashMap<&'static str, String>,
}

impl ValidationErrors {
    /// Record the outcome of one rule. Rules for a field run in order and
    /// a later failing rule replaces the earlier message.
    pub fn check(&mut self, field: &'static str, failure: Option<&str>) {
        if let Some(message) = failure {
            self.entries.insert(field, message.to_string());
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries.get(field).map(|message| message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

// Rules. Each returns the message only when the rule fails; whitespace-only
// input counts as missing.

pub fn required<'a>(value: &str, message: &'a str) -> Option<&'a str> {
    value.trim().is_empty().then_some(message)
}

pub fn min_length<'a>(value: &str, min: usize, message: &'a str) -> Option<&'a str> {
    (!value.trim().is_empty() && value.chars().count() < min).then_some(message)
}

pub fn max_length<'a>(value: &str, max: usize, message: &'a str) -> Option<&'a str> {
    (value.chars().count() > max).then_some(message)
}

pub fn must_match<'a>(value: &str, other: &str, message: &'a str) -> Option<&'a str> {
    (!value.trim().is_empty() && !other.trim().is_empty() && value != other).then_some(message)
}

/// The forms the app renders inline errors for.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Hash)]
pub enum Form {
    Login,
    Upload,
    RecoverPassword,
    ChangePassword,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FormAction {
    Invalid(Form, ValidationErrors),
    Reset(Form),
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct State {
    pub errors: im::HashMap<Form, ValidationErrors>,
}

impl State {
    pub fn errors_for(&self, form: Form) -> Option<&ValidationErrors> {
        self.errors.get(&form)
    }
}

/// Mirrors every form's validation outcome in one place, so the rendering
/// layer has a single slice to look at. The dedicated slices stay the
/// source of truth for their own submission flow.
pub fn reduce(
    action: &AppAction,
    state: &mut State,
    _environment: &Environment,
) -> Effect<AppAction> {
    match action {
        AppAction::Forms(FormAction::Invalid(form, errors)) => {
            state.errors.insert(*form, errors.clone());
        }
        AppAction::Forms(FormAction::Reset(form)) => {
            state.errors.remove(form);
        }
        AppAction::ChangePassword(ChangeAction::FormInvalid(errors)) => {
            state.errors.insert(Form::ChangePassword, errors.clone());
        }
        AppAction::ChangePassword(ChangeAction::Reset)
        | AppAction::ChangePassword(ChangeAction::Pending { .. }) => {
            state.errors.remove(&Form::ChangePassword);
        }
        AppAction::RecoverPassword(RecoverAction::FormInvalid(errors)) => {
            state.errors.insert(Form::RecoverPassword, errors.clone());
        }
        AppAction::RecoverPassword(RecoverAction::Reset)
        | AppAction::RecoverPassword(RecoverAction::Pending) => {
            state.errors.remove(&Form::RecoverPassword);
        }
        AppAction::Upload(UploadAction::Invalid(errors)) => {
            state.errors.insert(Form::Upload, errors.clone());
        }
        AppAction::Upload(UploadAction::Reset) | AppAction::Upload(UploadAction::Pending) => {
            state.errors.remove(&Form::Upload);
        }
        AppAction::Auth(AuthAction::LoggedIn(Ok(_))) => {
            state.errors.remove(&Form::Login);
        }
        _ => {}
    }
    Effect::NONE
}
