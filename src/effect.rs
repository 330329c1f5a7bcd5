use std::future::Future;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;

/// A description of what should happen after a reducer ran: nothing, one or
/// more follow-up actions, or an asynchronous call whose settled value is
/// mapped back onto an action and dispatched whenever it arrives.
pub enum Effect<A> {
    Nothing,
    Action(A),
    Multiple(Vec<Effect<A>>),
    Future(BoxFuture<'static, A>),
}

impl<A> Effect<A> {
    pub const NONE: Self = Effect::Nothing;

    pub fn action(action: A) -> Self {
        Effect::Action(action)
    }

    /// Wrap one asynchronous call. The pending phase is whatever the caller
    /// dispatches alongside; `map` turns the settled output into the
    /// success / failure action.
    pub fn future<T, F, M>(future: F, map: M) -> Self
    where
        T: Send + 'static,
        F: Future<Output = T> + Send + 'static,
        M: FnOnce(T) -> A + Send + 'static,
        A: 'static,
    {
        Effect::Future(async move { map(future.await) }.boxed())
    }

    pub fn merge2(a: Self, b: Self) -> Self {
        Effect::Multiple(vec![a, b])
    }

    pub fn merge3(a: Self, b: Self, c: Self) -> Self {
        Effect::Multiple(vec![a, b, c])
    }
}

impl<A> std::fmt::Debug for Effect<A>
where
    A: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Effect::Nothing => write!(f, "Nothing"),
            Effect::Action(action) => f.debug_tuple("Action").field(action).finish(),
            Effect::Multiple(effects) => f.debug_tuple("Multiple").field(effects).finish(),
            Effect::Future(_) => f.debug_tuple("Future").finish(),
        }
    }
}
