use itertools::Itertools;
use strum_macros::{Display, EnumIter};

use crate::effect::Effect;
use crate::environment::types::TagCount;
use crate::environment::Environment;
use crate::store::AppAction;

#[derive(Default, Clone, Copy, Debug, Display, EnumIter, Eq, PartialEq)]
pub enum TagOrder {
    Name,
    #[default]
    Total,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TagAction {
    Load,
    Loaded(Result<Vec<TagCount>, String>),
    Filter(String),
    Order(TagOrder),
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct State {
    pub tags: im::Vector<TagCount>,
    pub filter: String,
    pub order: TagOrder,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl State {
    /// The tags the list renders: filtered by the typed term, sorted by
    /// the selected order.
    pub fn visible(&self) -> Vec<TagCount> {
        let term = self.filter.trim().to_lowercase();
        self.tags
            .iter()
            .filter(|tag| term.is_empty() || tag.name.to_lowercase().contains(&term))
            .cloned()
            .sorted_by(|a, b| match self.order {
                TagOrder::Name => a.name.cmp(&b.name),
                TagOrder::Total => b.num_photos.cmp(&a.num_photos),
            })
            .collect()
    }
}

pub fn reduce(
    action: &AppAction,
    state: &mut State,
    environment: &Environment,
) -> Effect<AppAction> {
    let AppAction::Tags(action) = action else {
        return Effect::NONE;
    };
    log::trace!("{action:?}");
    match action {
        TagAction::Load => {
            state.is_loading = true;
            state.error = None;
            let api = environment.api.clone();
            Effect::future(async move { api.get_tags().await }, |result| {
                TagAction::Loaded(result).into()
            })
        }
        TagAction::Loaded(result) => {
            state.is_loading = false;
            match result {
                Ok(tags) => state.tags = tags.iter().cloned().collect(),
                Err(e) => state.error = Some(e.clone()),
            }
            Effect::NONE
        }
        TagAction::Filter(term) => {
            state.filter = term.clone();
            Effect::NONE
        }
        TagAction::Order(order) => {
            state.order = *order;
            Effect::NONE
        }
    }
}
