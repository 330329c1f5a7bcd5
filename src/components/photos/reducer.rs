use crate::components::photo_detail::DetailAction;
use crate::components::upload::UploadAction;
use crate::effect::Effect;
use crate::environment::types::{Photo, PhotoList, PhotoOrder};
use crate::environment::Environment;
use crate::store::AppAction;

use super::{AnyPhotoProvider, LatestPhotosProvider};

#[derive(Clone, Eq, PartialEq)]
pub enum PhotosAction {
    /// Fetch the first page from the current provider.
    Load,
    LoadPage(i64),
    Loaded(Result<PhotoList, String>),
    SetProvider(AnyPhotoProvider),
    SetOrder(PhotoOrder),
}

impl std::fmt::Debug for PhotosAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Load => write!(f, "Load"),
            Self::LoadPage(page) => f.debug_tuple("LoadPage").field(page).finish(),
            Self::Loaded(_) => f.debug_tuple("Loaded").finish(),
            Self::SetProvider(provider) => f.debug_tuple("SetProvider").field(provider).finish(),
            Self::SetOrder(order) => f.debug_tuple("SetOrder").field(order).finish(),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct State {
    pub provider: AnyPhotoProvider,
    pub photos: im::Vector<Photo>,
    pub total: i64,
    pub current_page: i64,
    pub num_pages: i64,
    pub order: PhotoOrder,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl State {
    pub fn new(environment: &Environment) -> Self {
        Self {
            provider: AnyPhotoProvider::new(
                LatestPhotosProvider::new(environment.clone()),
                &"latest",
            ),
            photos: Default::default(),
            total: 0,
            current_page: 0,
            num_pages: 0,
            order: Default::default(),
            is_loading: false,
            error: None,
        }
    }

    pub fn can_load_more(&self) -> bool {
        self.current_page < self.num_pages
    }
}

pub fn reduce(
    action: &AppAction,
    state: &mut State,
    _environment: &Environment,
) -> Effect<AppAction> {
    match action {
        AppAction::Photos(action) => {
            log::trace!("{action:?}");
            match action {
                PhotosAction::Load => request_page(state, 1),
                PhotosAction::LoadPage(page) => request_page(state, *page),
                PhotosAction::Loaded(result) => {
                    state.is_loading = false;
                    match result {
                        Ok(list) => merge_page(state, list),
                        Err(e) => state.error = Some(e.clone()),
                    }
                    Effect::NONE
                }
                PhotosAction::SetProvider(provider) => {
                    if state.provider != *provider {
                        state.provider = provider.clone();
                        state.photos.clear();
                        state.total = 0;
                        state.current_page = 0;
                        state.num_pages = 0;
                    }
                    Effect::action(PhotosAction::Load.into())
                }
                PhotosAction::SetOrder(order) => {
                    state.order = *order;
                    Effect::action(PhotosAction::Load.into())
                }
            }
        }
        // a fresh upload belongs at the top of the list
        AppAction::Upload(UploadAction::Submitted(Ok(photo))) => {
            state.photos.push_front(photo.clone());
            state.total += 1;
            Effect::NONE
        }
        AppAction::PhotoDetail(DetailAction::Deleted { id, result: Ok(()) }) => {
            let before = state.photos.len();
            state.photos.retain(|photo| photo.id != *id);
            state.total -= (before - state.photos.len()) as i64;
            Effect::NONE
        }
        AppAction::PhotoDetail(DetailAction::Voted {
            id,
            up,
            result: Ok(()),
        }) => {
            for photo in state.photos.iter_mut() {
                if photo.id == *id {
                    if *up {
                        photo.up_votes += 1;
                    } else {
                        photo.down_votes += 1;
                    }
                }
            }
            Effect::NONE
        }
        AppAction::PhotoDetail(DetailAction::UpdatedTitle {
            id,
            title,
            result: Ok(()),
        }) => {
            for photo in state.photos.iter_mut() {
                if photo.id == *id {
                    photo.title = title.clone();
                }
            }
            Effect::NONE
        }
        _ => Effect::NONE,
    }
}

fn request_page(state: &mut State, page: i64) -> Effect<AppAction> {
    state.is_loading = true;
    state.error = None;
    let ft = state.provider.request(page, state.order);
    Effect::future(ft, |result| PhotosAction::Loaded(result).into())
}

/// The first page replaces the list, later pages append.
fn merge_page(state: &mut State, list: &PhotoList) {
    if list.current_page > 1 {
        state.photos.extend(list.photos.iter().cloned());
    } else {
        state.photos = list.photos.iter().cloned().collect();
    }
    state.total = list.total;
    state.current_page = list.current_page;
    state.num_pages = list.num_pages;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::photos::SearchPhotosProvider;
    use crate::environment::Api;
    use chrono::Utc;

    fn environment() -> Environment {
        Environment::new(Api::new("http://localhost:5000", None).unwrap())
    }

    fn photo(id: i64, title: &str) -> Photo {
        Photo {
            id,
            owner_id: 1,
            title: title.to_string(),
            filename: format!("{id}.jpg"),
            up_votes: 0,
            down_votes: 0,
            created_at: Utc::now(),
        }
    }

    fn page(photos: Vec<Photo>, current_page: i64, num_pages: i64) -> PhotoList {
        let total = photos.len() as i64;
        PhotoList {
            photos,
            total,
            current_page,
            num_pages,
        }
    }

    #[test]
    fn load_sets_the_pending_phase() {
        let environment = environment();
        let mut state = State::new(&environment);
        let effect = reduce(&PhotosAction::Load.into(), &mut state, &environment);
        assert!(state.is_loading);
        assert!(matches!(effect, Effect::Future(_)));
    }

    #[test]
    fn first_page_replaces_later_pages_append() {
        let environment = environment();
        let mut state = State::new(&environment);
        reduce(
            &PhotosAction::Loaded(Ok(page(vec![photo(1, "a"), photo(2, "b")], 1, 2))).into(),
            &mut state,
            &environment,
        );
        assert_eq!(state.photos.len(), 2);
        assert!(state.can_load_more());

        reduce(
            &PhotosAction::Loaded(Ok(page(vec![photo(3, "c")], 2, 2))).into(),
            &mut state,
            &environment,
        );
        assert_eq!(state.photos.len(), 3);
        assert!(!state.can_load_more());

        reduce(
            &PhotosAction::Loaded(Ok(page(vec![photo(9, "z")], 1, 1))).into(),
            &mut state,
            &environment,
        );
        assert_eq!(state.photos.len(), 1);
    }

    #[test]
    fn switching_provider_clears_and_reloads() {
        let environment = environment();
        let mut state = State::new(&environment);
        reduce(
            &PhotosAction::Loaded(Ok(page(vec![photo(1, "a")], 1, 1))).into(),
            &mut state,
            &environment,
        );

        let search = AnyPhotoProvider::new(
            SearchPhotosProvider::new(environment.clone(), "cats"),
            &("search", "cats"),
        );
        let effect = reduce(
            &PhotosAction::SetProvider(search).into(),
            &mut state,
            &environment,
        );
        assert!(state.photos.is_empty());
        assert!(matches!(
            effect,
            Effect::Action(AppAction::Photos(PhotosAction::Load))
        ));
    }

    #[test]
    fn a_settled_upload_lands_at_the_top() {
        let environment = environment();
        let mut state = State::new(&environment);
        reduce(
            &PhotosAction::Loaded(Ok(page(vec![photo(1, "a")], 1, 1))).into(),
            &mut state,
            &environment,
        );
        reduce(
            &AppAction::Upload(UploadAction::Submitted(Ok(photo(2, "new")))),
            &mut state,
            &environment,
        );
        assert_eq!(state.photos[0].id, 2);
        assert_eq!(state.total, 2);
    }

    #[test]
    fn a_settled_delete_prunes_the_list() {
        let environment = environment();
        let mut state = State::new(&environment);
        reduce(
            &PhotosAction::Loaded(Ok(page(vec![photo(1, "a"), photo(2, "b")], 1, 1))).into(),
            &mut state,
            &environment,
        );
        reduce(
            &AppAction::PhotoDetail(DetailAction::Deleted {
                id: 1,
                result: Ok(()),
            }),
            &mut state,
            &environment,
        );
        assert_eq!(state.photos.len(), 1);
        assert_eq!(state.photos[0].id, 2);
        assert_eq!(state.total, 1);
    }

    #[test]
    fn a_settled_vote_patches_the_listed_counts() {
        let environment = environment();
        let mut state = State::new(&environment);
        reduce(
            &PhotosAction::Loaded(Ok(page(vec![photo(1, "a")], 1, 1))).into(),
            &mut state,
            &environment,
        );
        reduce(
            &AppAction::PhotoDetail(DetailAction::Voted {
                id: 1,
                up: true,
                result: Ok(()),
            }),
            &mut state,
            &environment,
        );
        assert_eq!(state.photos[0].up_votes, 1);
    }

    #[test]
    fn unrecognized_actions_keep_the_list_allocation() {
        let environment = environment();
        let mut state = State::new(&environment);
        reduce(
            &PhotosAction::Loaded(Ok(page(vec![photo(1, "a")], 1, 1))).into(),
            &mut state,
            &environment,
        );
        let before = state.photos.clone();
        reduce(
            &crate::components::tags::TagAction::Filter("alps".to_string()).into(),
            &mut state,
            &environment,
        );
        assert!(state.photos.ptr_eq(&before));
    }
}
