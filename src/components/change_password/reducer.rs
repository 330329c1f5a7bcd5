use crate::components::forms::{min_length, must_match, required, ValidationErrors};
use crate::effect::Effect;
use crate::environment::Environment;
use crate::store::AppAction;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ChangeAction {
    Reset,
    FormInvalid(ValidationErrors),
    Pending {
        logged_in: bool,
    },
    Submitted {
        result: Result<(), String>,
        logged_in: bool,
    },
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct State {
    pub errors: ValidationErrors,
    pub submitting: bool,
    pub changed: bool,
    pub error: Option<String>,
    /// Whether the last submission came from a logged-in session. The
    /// rendering layer uses this to pick the follow-up route.
    pub from_logged_in: Option<bool>,
}

pub fn reset_form() -> Effect<AppAction> {
    Effect::action(ChangeAction::Reset.into())
}

/// Validate locally, then either report the errors or submit the change.
/// `logged_in` is caller metadata and travels through both phases
/// unchanged.
pub fn submit_form(
    password: &str,
    password_confirm: &str,
    code: &str,
    logged_in: bool,
    environment: &Environment,
) -> Effect<AppAction> {
    let errors = validate(password, password_confirm);
    if !errors.is_empty() {
        return Effect::action(ChangeAction::FormInvalid(errors).into());
    }

    let api = environment.api.clone();
    let password = password.to_string();
    let code = code.to_string();
    Effect::merge2(
        Effect::action(ChangeAction::Pending { logged_in }.into()),
        Effect::future(
            async move { api.change_password(password, code).await },
            move |result| ChangeAction::Submitted { result, logged_in }.into(),
        ),
    )
}

fn validate(password: &str, password_confirm: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    errors.check("password", required(password, "Password is required"));
    errors.check(
        "password",
        min_length(
            password,
            6,
            "Password must be at least 6 characters long",
        ),
    );
    errors.check(
        "passwordConfirm",
        required(password_confirm, "Please confirm your new password"),
    );
    errors.check(
        "passwordConfirm",
        must_match(password_confirm, password, "The passwords do not match"),
    );
    errors
}

pub fn reduce(
    action: &AppAction,
    state: &mut State,
    _environment: &Environment,
) -> Effect<AppAction> {
    let AppAction::ChangePassword(action) = action else {
        return Effect::NONE;
    };
    log::trace!("{action:?}");
    match action {
        ChangeAction::Reset => {
            *state = State::default();
        }
        ChangeAction::FormInvalid(errors) => {
            state.errors = errors.clone();
            state.changed = false;
        }
        ChangeAction::Pending { logged_in } => {
            state.submitting = true;
            state.errors = ValidationErrors::default();
            state.error = None;
            state.from_logged_in = Some(*logged_in);
        }
        ChangeAction::Submitted { result, logged_in } => {
            state.submitting = false;
            state.from_logged_in = Some(*logged_in);
            match result {
                Ok(()) => state.changed = true,
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

    fn form_errors(effect: Effect<AppAction>) -> ValidationErrors {
        match effect {
            Effect::Action(AppAction::ChangePassword(ChangeAction::FormInvalid(errors))) => errors,
            other => panic!("expected a form-invalid action, got {other:?}"),
        }
    }

    #[test]
    fn empty_password_is_required() {
        for password in ["", "   ", "\t"] {
            let errors = form_errors(submit_form(password, "", "code1", false, &environment()));
            assert_eq!(errors.get("password"), Some("Password is required"));
        }
    }

    #[test]
    fn short_password_overrides_the_required_message() {
        let effect = submit_form("abc12", "abc12", "code1", true, &environment());
        let errors = form_errors(effect);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get("password"),
            Some("Password must be at least 6 characters long")
        );
    }

    #[test]
    fn missing_confirmation_is_the_only_error_for_a_valid_password() {
        let errors = form_errors(submit_form("abcdef", "", "code1", false, &environment()));
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get("passwordConfirm"),
            Some("Please confirm your new password")
        );
    }

    #[test]
    fn mismatched_confirmation_is_reported() {
        let errors = form_errors(submit_form("abcdef", "abcxyz", "code1", false, &environment()));
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get("passwordConfirm"),
            Some("The passwords do not match")
        );
    }

    #[test]
    fn valid_input_submits_with_the_callers_login_flag() {
        let effect = submit_form("abcdef", "abcdef", "code1", true, &environment());
        let Effect::Multiple(effects) = effect else {
            panic!("expected a pending + future pair");
        };
        assert!(matches!(
            effects[0],
            Effect::Action(AppAction::ChangePassword(ChangeAction::Pending {
                logged_in: true
            }))
        ));
        assert!(matches!(effects[1], Effect::Future(_)));
    }

    #[test]
    fn reset_form_is_idempotent() {
        let Effect::Action(first) = reset_form() else {
            panic!("reset is a plain action");
        };
        let Effect::Action(second) = reset_form() else {
            panic!("reset is a plain action");
        };
        assert_eq!(first, second);
    }

    #[test]
    fn settlement_updates_the_slice() {
        let environment = environment();
        let mut state = State::default();

        reduce(
            &ChangeAction::Pending { logged_in: true }.into(),
            &mut state,
            &environment,
        );
        assert!(state.submitting);
        assert_eq!(state.from_logged_in, Some(true));

        reduce(
            &ChangeAction::Submitted {
                result: Err("API Error: change_password code expired".to_string()),
                logged_in: true,
            }
            .into(),
            &mut state,
            &environment,
        );
        assert!(!state.submitting);
        assert!(!state.changed);
        assert!(state.error.is_some());

        reduce(
            &ChangeAction::Submitted {
                result: Ok(()),
                logged_in: true,
            }
            .into(),
            &mut state,
            &environment,
        );
        assert!(state.changed);
    }

    #[test]
    fn unrecognized_actions_are_a_no_op() {
        let environment = environment();
        let mut state = State {
            changed: true,
            ..State::default()
        };
        let before = state.clone();
        reduce(
            &AppAction::Tags(crate::components::tags::TagAction::Load),
            &mut state,
            &environment,
        );
        assert_eq!(state, before);
    }
}
