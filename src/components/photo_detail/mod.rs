mod reducer;

pub use reducer::{reduce, DetailAction, State};
