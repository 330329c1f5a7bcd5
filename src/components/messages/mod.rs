use debug_panic::debug_panic;

use crate::components::auth::AuthAction;
use crate::effect::Effect;
use crate::environment::types::Message;
use crate::environment::Environment;
use crate::store::AppAction;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MessageAction {
    /// A decoded activity broadcast arrived from the socket layer.
    New(Message),
    Delete(usize),
    Clear,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct State {
    /// Newest first.
    pub messages: im::Vector<Message>,
}

pub fn reduce(
    action: &AppAction,
    state: &mut State,
    _environment: &Environment,
) -> Effect<AppAction> {
    match action {
        AppAction::Messages(MessageAction::New(message)) => {
            state.messages.push_front(message.clone());
        }
        AppAction::Messages(MessageAction::Delete(index)) => {
            if *index >= state.messages.len() {
                debug_panic!("message index {} out of range", index);
                return Effect::NONE;
            }
            state.messages.remove(*index);
        }
        AppAction::Messages(MessageAction::Clear) => {
            state.messages.clear();
        }
        // the feed belongs to the session
        AppAction::Auth(AuthAction::LoggedOut(Ok(()))) => {
            state.messages.clear();
        }
        _ => {}
    }
    Effect::NONE
}
