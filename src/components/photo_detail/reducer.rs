use crate::components::forms::{max_length, required, ValidationErrors};
use crate::effect::Effect;
use crate::environment::types::PhotoDetail;
use crate::environment::Environment;
use crate::store::AppAction;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DetailAction {
    Load(i64),
    Loaded(Result<PhotoDetail, String>),
    ToggleEdit,
    UpdateTitle(String),
    UpdatedTitle {
        id: i64,
        title: String,
        result: Result<(), String>,
    },
    /// Space-separated taglist, as typed into the edit field.
    UpdateTags(String),
    UpdatedTags {
        id: i64,
        tags: Vec<String>,
        result: Result<(), String>,
    },
    Delete,
    Deleted {
        id: i64,
        result: Result<(), String>,
    },
    VoteUp,
    VoteDown,
    Voted {
        id: i64,
        up: bool,
        result: Result<(), String>,
    },
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct State {
    pub photo: Option<PhotoDetail>,
    pub is_loading: bool,
    pub editing: bool,
    pub edit_errors: ValidationErrors,
    pub error: Option<String>,
}

pub fn reduce(
    action: &AppAction,
    state: &mut State,
    environment: &Environment,
) -> Effect<AppAction> {
    let AppAction::PhotoDetail(action) = action else {
        return Effect::NONE;
    };
    log::trace!("{action:?}");
    match action {
        DetailAction::Load(id) => {
            state.is_loading = true;
            state.error = None;
            state.editing = false;
            let id = *id;
            let api = environment.api.clone();
            Effect::future(async move { api.photo_detail(id).await }, |result| {
                DetailAction::Loaded(result).into()
            })
        }
        DetailAction::Loaded(result) => {
            state.is_loading = false;
            match result {
                Ok(photo) => state.photo = Some(photo.clone()),
                Err(e) => state.error = Some(e.clone()),
            }
            Effect::NONE
        }
        DetailAction::ToggleEdit => {
            let can_edit = state
                .photo
                .as_ref()
                .map(|photo| photo.perms.edit)
                .unwrap_or(false);
            state.editing = can_edit && !state.editing;
            if !state.editing {
                state.edit_errors = ValidationErrors::default();
            }
            Effect::NONE
        }
        DetailAction::UpdateTitle(title) => {
            let Some(photo) = state.photo.as_ref().filter(|photo| photo.perms.edit) else {
                return Effect::NONE;
            };
            let mut errors = ValidationErrors::default();
            errors.check("title", required(title, "Title is required"));
            errors.check("title", max_length(title, 200, "Title is too long"));
            if !errors.is_empty() {
                state.edit_errors = errors;
                return Effect::NONE;
            }
            let id = photo.id;
            let title = title.trim().to_string();
            let sent_title = title.clone();
            let api = environment.api.clone();
            Effect::future(
                async move { api.update_title(id, sent_title).await },
                move |result| DetailAction::UpdatedTitle { id, title, result }.into(),
            )
        }
        DetailAction::UpdatedTitle { id, title, result } => {
            match result {
                Ok(()) => {
                    if let Some(photo) = state.photo.as_mut().filter(|photo| photo.id == *id) {
                        photo.title = title.clone();
                    }
                    state.editing = false;
                    state.edit_errors = ValidationErrors::default();
                }
                Err(e) => state.error = Some(e.clone()),
            }
            Effect::NONE
        }
        DetailAction::UpdateTags(taglist) => {
            let Some(photo) = state.photo.as_ref().filter(|photo| photo.perms.edit) else {
                return Effect::NONE;
            };
            let id = photo.id;
            let tags: Vec<String> = taglist
                .split_whitespace()
                .map(|tag| tag.to_string())
                .collect();
            let sent_tags = tags.clone();
            let api = environment.api.clone();
            Effect::future(
                async move { api.update_tags(id, sent_tags).await },
                move |result| DetailAction::UpdatedTags { id, tags, result }.into(),
            )
        }
        DetailAction::UpdatedTags { id, tags, result } => {
            match result {
                Ok(()) => {
                    if let Some(photo) = state.photo.as_mut().filter(|photo| photo.id == *id) {
                        photo.tags = tags.clone();
                    }
                    state.editing = false;
                }
                Err(e) => state.error = Some(e.clone()),
            }
            Effect::NONE
        }
        DetailAction::Delete => {
            let Some(photo) = state.photo.as_ref().filter(|photo| photo.perms.delete) else {
                return Effect::NONE;
            };
            let id = photo.id;
            let api = environment.api.clone();
            Effect::future(async move { api.delete_photo(id).await }, move |result| {
                DetailAction::Deleted { id, result }.into()
            })
        }
        DetailAction::Deleted { id, result } => {
            match result {
                Ok(()) => {
                    // the photos slice prunes its list on the same action
                    if state.photo.as_ref().map(|photo| photo.id) == Some(*id) {
                        state.photo = None;
                        state.editing = false;
                    }
                }
                Err(e) => state.error = Some(e.clone()),
            }
            Effect::NONE
        }
        DetailAction::VoteUp => vote(state, environment, true),
        DetailAction::VoteDown => vote(state, environment, false),
        DetailAction::Voted { id, up, result } => {
            match result {
                Ok(()) => {
                    if let Some(photo) = state.photo.as_mut().filter(|photo| photo.id == *id) {
                        if *up {
                            photo.up_votes += 1;
                        } else {
                            photo.down_votes += 1;
                        }
                        // one vote per photo per user
                        photo.perms.vote = false;
                    }
                }
                Err(e) => state.error = Some(e.clone()),
            }
            Effect::NONE
        }
    }
}

fn vote(state: &mut State, environment: &Environment, up: bool) -> Effect<AppAction> {
    let Some(photo) = state.photo.as_ref().filter(|photo| photo.perms.vote) else {
        return Effect::NONE;
    };
    let id = photo.id;
    let api = environment.api.clone();
    Effect::future(
        async move {
            if up {
                api.vote_up(id).await
            } else {
                api.vote_down(id).await
            }
        },
        move |result| DetailAction::Voted { id, up, result }.into(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::types::Permissions;
    use crate::environment::Api;

    fn environment() -> Environment {
        Environment::new(Api::new("http://localhost:5000", None).unwrap())
    }

    fn detail(id: i64, perms: Permissions) -> PhotoDetail {
        PhotoDetail {
            id,
            owner_name: "ana".to_string(),
            title: "Alps".to_string(),
            perms,
            ..PhotoDetail::default()
        }
    }

    fn editable() -> Permissions {
        Permissions {
            edit: true,
            delete: true,
            vote: false,
        }
    }

    #[test]
    fn toggle_edit_needs_the_permission() {
        let environment = environment();
        let mut state = State {
            photo: Some(detail(1, Permissions::default())),
            ..State::default()
        };
        reduce(&DetailAction::ToggleEdit.into(), &mut state, &environment);
        assert!(!state.editing);

        state.photo = Some(detail(1, editable()));
        reduce(&DetailAction::ToggleEdit.into(), &mut state, &environment);
        assert!(state.editing);
    }

    #[test]
    fn blank_title_never_issues_a_call() {
        let environment = environment();
        let mut state = State {
            photo: Some(detail(1, editable())),
            ..State::default()
        };
        let effect = reduce(
            &DetailAction::UpdateTitle("  ".to_string()).into(),
            &mut state,
            &environment,
        );
        assert!(matches!(effect, Effect::Nothing));
        assert_eq!(state.edit_errors.get("title"), Some("Title is required"));
    }

    #[test]
    fn title_update_settles_into_the_loaded_photo() {
        let environment = environment();
        let mut state = State {
            photo: Some(detail(1, editable())),
            editing: true,
            ..State::default()
        };
        let effect = reduce(
            &DetailAction::UpdateTitle("Dolomites".to_string()).into(),
            &mut state,
            &environment,
        );
        assert!(matches!(effect, Effect::Future(_)));

        reduce(
            &DetailAction::UpdatedTitle {
                id: 1,
                title: "Dolomites".to_string(),
                result: Ok(()),
            }
            .into(),
            &mut state,
            &environment,
        );
        assert_eq!(state.photo.as_ref().unwrap().title, "Dolomites");
        assert!(!state.editing);
    }

    #[test]
    fn votes_apply_once() {
        let environment = environment();
        let mut state = State {
            photo: Some(detail(
                1,
                Permissions {
                    vote: true,
                    ..Permissions::default()
                },
            )),
            ..State::default()
        };
        let effect = reduce(&DetailAction::VoteUp.into(), &mut state, &environment);
        assert!(matches!(effect, Effect::Future(_)));

        reduce(
            &DetailAction::Voted {
                id: 1,
                up: true,
                result: Ok(()),
            }
            .into(),
            &mut state,
            &environment,
        );
        let photo = state.photo.as_ref().unwrap();
        assert_eq!(photo.up_votes, 1);
        assert!(!photo.perms.vote);

        // a second attempt is refused locally
        let effect = reduce(&DetailAction::VoteUp.into(), &mut state, &environment);
        assert!(matches!(effect, Effect::Nothing));
    }

    #[test]
    fn delete_clears_the_detail() {
        let environment = environment();
        let mut state = State {
            photo: Some(detail(7, editable())),
            ..State::default()
        };
        let effect = reduce(&DetailAction::Delete.into(), &mut state, &environment);
        assert!(matches!(effect, Effect::Future(_)));

        reduce(
            &DetailAction::Deleted {
                id: 7,
                result: Ok(()),
            }
            .into(),
            &mut state,
            &environment,
        );
        assert!(state.photo.is_none());
    }

    #[test]
    fn settlement_for_another_photo_is_ignored() {
        let environment = environment();
        let mut state = State {
            photo: Some(detail(1, editable())),
            ..State::default()
        };
        reduce(
            &DetailAction::UpdatedTitle {
                id: 99,
                title: "Other".to_string(),
                result: Ok(()),
            }
            .into(),
            &mut state,
            &environment,
        );
        assert_eq!(state.photo.as_ref().unwrap().title, "Alps");
    }
}
