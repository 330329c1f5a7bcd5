pub mod api;
pub mod types;

pub use api::Api;

/// Everything reducers need besides their own state. Cheap to clone;
/// handed by reference into every reduce call.
#[derive(Clone)]
pub struct Environment {
    pub api: Api,
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment").finish()
    }
}

impl Environment {
    pub fn new(api: Api) -> Self {
        Self { api }
    }
}
