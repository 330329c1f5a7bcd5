mod reducer;

pub use reducer::{login, reduce, AuthAction, State};
