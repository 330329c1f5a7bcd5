mod action;
mod reducer;
mod state;

pub use action::UploadAction;
pub use reducer::{reduce, submit_form};
pub use state::State;
