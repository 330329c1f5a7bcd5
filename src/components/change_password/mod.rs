mod reducer;

pub use reducer::{reduce, reset_form, submit_form, ChangeAction, State};
