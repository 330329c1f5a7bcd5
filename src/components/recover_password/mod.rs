use crate::components::forms::{required, ValidationErrors};
use crate::effect::Effect;
use crate::environment::Environment;
use crate::store::AppAction;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RecoverAction {
    Reset,
    FormInvalid(ValidationErrors),
    Pending,
    Submitted(Result<(), String>),
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct State {
    pub errors: ValidationErrors,
    pub submitting: bool,
    /// The recovery mail went out; the user is told to check their inbox.
    pub recovered: bool,
    pub error: Option<String>,
}

pub fn reset_form() -> Effect<AppAction> {
    Effect::action(RecoverAction::Reset.into())
}

pub fn submit_form(name_or_email: &str, environment: &Environment) -> Effect<AppAction> {
    let mut errors = ValidationErrors::default();
    errors.check(
        "nameOrEmail",
        required(name_or_email, "Name or email address is required"),
    );
    if !errors.is_empty() {
        return Effect::action(RecoverAction::FormInvalid(errors).into());
    }

    let api = environment.api.clone();
    let name_or_email = name_or_email.trim().to_string();
    Effect::merge2(
        Effect::action(RecoverAction::Pending.into()),
        Effect::future(
            async move { api.recover_password(name_or_email).await },
            |result| RecoverAction::Submitted(result).into(),
        ),
    )
}

pub fn reduce(
    action: &AppAction,
    state: &mut State,
    _environment: &Environment,
) -> Effect<AppAction> {
    let AppAction::RecoverPassword(action) = action else {
        return Effect::NONE;
    };
    log::trace!("{action:?}");
    match action {
        RecoverAction::Reset => {
            *state = State::default();
        }
        RecoverAction::FormInvalid(errors) => {
            state.errors = errors.clone();
            state.recovered = false;
        }
        RecoverAction::Pending => {
            state.submitting = true;
            state.errors = ValidationErrors::default();
            state.error = None;
        }
        RecoverAction::Submitted(result) => {
            state.submitting = false;
            match result {
                Ok(()) => state.recovered = true,
                Err(e) => state.error = Some(e.clone()),
            }
        }
    }
    Effect::NONE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Api;

    fn environment() -> Environment {
        Environment::new(Api::new("http://localhost:5000", None).unwrap())
    }

    #[test]
    fn blank_input_never_issues_a_call() {
        let effect = submit_form("  ", &environment());
        let Effect::Action(AppAction::RecoverPassword(RecoverAction::FormInvalid(errors))) = effect
        else {
            panic!("expected a form-invalid action");
        };
        assert_eq!(
            errors.get("nameOrEmail"),
            Some("Name or email address is required")
        );
    }

    #[test]
    fn valid_input_submits() {
        let effect = submit_form("demo@example.com", &environment());
        let Effect::Multiple(effects) = effect else {
            panic!("expected a pending + future pair");
        };
        assert!(matches!(
            effects[0],
            Effect::Action(AppAction::RecoverPassword(RecoverAction::Pending))
        ));
        assert!(matches!(effects[1], Effect::Future(_)));
    }

    #[test]
    fn settlement_marks_the_mail_as_sent() {
        let environment = environment();
        let mut state = State::default();
        reduce(&RecoverAction::Pending.into(), &mut state, &environment);
        assert!(state.submitting);
        reduce(
            &RecoverAction::Submitted(Ok(())).into(),
            &mut state,
            &environment,
        );
        assert!(state.recovered);
        assert!(!state.submitting);
    }
}
