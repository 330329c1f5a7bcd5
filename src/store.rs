use std::collections::VecDeque;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::components::auth::{self, AuthAction};
use crate::components::change_password::{self, ChangeAction};
use crate::components::forms::{self, FormAction};
use crate::components::messages::{self, MessageAction};
use crate::components::photo_detail::{self, DetailAction};
use crate::components::photos::{self, PhotosAction};
use crate::components::recover_password::{self, RecoverAction};
use crate::components::tags::{self, TagAction};
use crate::components::upload::{self, UploadAction};
use crate::effect::Effect;
use crate::environment::Environment;

/// Every action the app knows, one variant per domain. Each slice reducer
/// sees every action and ignores the ones it does not recognize.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AppAction {
    Photos(PhotosAction),
    PhotoDetail(DetailAction),
    Auth(AuthAction),
    Messages(MessageAction),
    Upload(UploadAction),
    Tags(TagAction),
    RecoverPassword(RecoverAction),
    ChangePassword(ChangeAction),
    Forms(FormAction),
}

impl From<PhotosAction> for AppAction {
    fn from(action: PhotosAction) -> Self {
        AppAction::Photos(action)
    }
}

impl From<DetailAction> for AppAction {
    fn from(action: DetailAction) -> Self {
        AppAction::PhotoDetail(action)
    }
}

impl From<AuthAction> for AppAction {
    fn from(action: AuthAction) -> Self {
        AppAction::Auth(action)
    }
}

impl From<MessageAction> for AppAction {
    fn from(action: MessageAction) -> Self {
        AppAction::Messages(action)
    }
}

impl From<UploadAction> for AppAction {
    fn from(action: UploadAction) -> Self {
        AppAction::Upload(action)
    }
}

impl From<TagAction> for AppAction {
    fn from(action: TagAction) -> Self {
        AppAction::Tags(action)
    }
}

impl From<RecoverAction> for AppAction {
    fn from(action: RecoverAction) -> Self {
        AppAction::RecoverPassword(action)
    }
}

impl From<ChangeAction> for AppAction {
    fn from(action: ChangeAction) -> Self {
        AppAction::ChangePassword(action)
    }
}

impl From<FormAction> for AppAction {
    fn from(action: FormAction) -> Self {
        AppAction::Forms(action)
    }
}

/// The whole application state. The slice set is fixed here, at compile
/// time, and every dispatch rebuilds slices only through their reducers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub photos: photos::State,
    pub photo_detail: photo_detail::State,
    pub auth: auth::State,
    pub messages: messages::State,
    pub upload: upload::State,
    pub tags: tags::State,
    pub recover_password: recover_password::State,
    pub change_password: change_password::State,
    pub forms: forms::State,
}

impl AppState {
    pub fn new(environment: &Environment) -> Self {
        Self {
            photos: photos::State::new(environment),
            photo_detail: Default::default(),
            auth: Default::default(),
            messages: Default::default(),
            upload: Default::default(),
            tags: Default::default(),
            recover_password: Default::default(),
            change_password: Default::default(),
            forms: Default::default(),
        }
    }

    fn reduce(&mut self, action: &AppAction, environment: &Environment) -> Effect<AppAction> {
        Effect::Multiple(vec![
            guarded("photos", &mut self.photos, |state| {
                photos::reduce(action, state, environment)
            }),
            guarded("photo_detail", &mut self.photo_detail, |state| {
                photo_detail::reduce(action, state, environment)
            }),
            guarded("auth", &mut self.auth, |state| {
                auth::reduce(action, state, environment)
            }),
            guarded("messages", &mut self.messages, |state| {
                messages::reduce(action, state, environment)
            }),
            guarded("upload", &mut self.upload, |state| {
                upload::reduce(action, state, environment)
            }),
            guarded("tags", &mut self.tags, |state| {
                tags::reduce(action, state, environment)
            }),
            guarded("recover_password", &mut self.recover_password, |state| {
                recover_password::reduce(action, state, environment)
            }),
            guarded("change_password", &mut self.change_password, |state| {
                change_password::reduce(action, state, environment)
            }),
            guarded("forms", &mut self.forms, |state| {
                forms::reduce(action, state, environment)
            }),
        ])
    }
}

/// A panicking reducer must not take the other slices down with it: log,
/// restore the slice to its pre-dispatch value, carry on. Slices are im
/// backed, so the snapshot clone is cheap.
fn guarded<S: Clone>(
    slice: &'static str,
    state: &mut S,
    reduce: impl FnOnce(&mut S) -> Effect<AppAction>,
) -> Effect<AppAction> {
    let snapshot = state.clone();
    match catch_unwind(AssertUnwindSafe(|| reduce(state))) {
        Ok(effect) => effect,
        Err(_) => {
            log::error!("reducer '{slice}' panicked, slice state restored");
            *state = snapshot;
            Effect::NONE
        }
    }
}

/// Everything the app kicks off on startup: session restore, the front
/// page, the tag list.
pub fn boot() -> Effect<AppAction> {
    Effect::merge3(
        Effect::action(AuthAction::Check.into()),
        Effect::action(PhotosAction::Load.into()),
        Effect::action(TagAction::Load.into()),
    )
}

/// Owns the state and the dispatch cycle. Exactly one action runs through
/// all reducers at a time; settled asynchronous calls come back through
/// the channel and are dispatched like any other action.
pub struct Store {
    state: AppState,
    environment: Environment,
    sender: flume::Sender<AppAction>,
    receiver: flume::Receiver<AppAction>,
}

impl Store {
    pub fn new(environment: Environment) -> Self {
        let (sender, receiver) = flume::unbounded();
        Self {
            state: AppState::new(&environment),
            environment,
            sender,
            receiver,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn dispatch(&mut self, action: impl Into<AppAction>) {
        let mut queue = VecDeque::new();
        queue.push_back(action.into());
        self.drain(&mut queue);
    }

    /// Entry point for action creators: run whatever they produced.
    pub fn dispatch_effect(&mut self, effect: Effect<AppAction>) {
        let mut queue = VecDeque::new();
        self.schedule(effect, &mut queue);
        self.drain(&mut queue);
    }

    fn drain(&mut self, queue: &mut VecDeque<AppAction>) {
        while let Some(action) = queue.pop_front() {
            log::trace!("{action:?}");
            let effect = self.state.reduce(&action, &self.environment);
            self.schedule(effect, queue);
        }
    }

    fn schedule(&self, effect: Effect<AppAction>, queue: &mut VecDeque<AppAction>) {
        match effect {
            Effect::Nothing => {}
            Effect::Action(action) => queue.push_back(action),
            Effect::Multiple(effects) => {
                for effect in effects {
                    self.schedule(effect, queue);
                }
            }
            Effect::Future(future) => {
                let sender = self.sender.clone();
                tokio::spawn(async move {
                    let _ = sender.send(future.await);
                });
            }
        }
    }

    /// Wait for the next settled asynchronous call and run it through the
    /// reducers. Settlement order between in-flight calls is whatever the
    /// server produced; the last write wins.
    pub async fn settle(&mut self) {
        if let Ok(action) = self.receiver.recv_async().await {
            self.dispatch(action);
        }
    }

    /// Drive the store until the process ends.
    pub async fn run(&mut self) {
        loop {
            self.settle().await;
        }
    }
}
