pub mod components;
pub mod effect;
pub mod environment;
pub mod store;

pub use effect::Effect;
pub use environment::{Api, Environment};
pub use store::{AppAction, AppState, Store};
