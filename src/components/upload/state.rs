use std::path::PathBuf;

use crate::components::forms::ValidationErrors;
use crate::environment::types::Photo;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct State {
    pub title: String,
    pub taglist: String,
    pub file: Option<PathBuf>,
    pub errors: ValidationErrors,
    pub uploading: bool,
    pub uploaded: Option<Photo>,
    pub error: Option<String>,
}

impl State {
    /// The taglist field holds space-separated tags, as the server expects.
    pub fn tags(&self) -> Vec<String> {
        self.taglist
            .split_whitespace()
            .map(|tag| tag.to_string())
            .collect()
    }
}
