use std::path::PathBuf;

use crate::components::forms::ValidationErrors;
use crate::environment::types::Photo;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum UploadAction {
    SetTitle(String),
    SetTaglist(String),
    /// The user picked a file; the view shows it as the preview.
    ChooseFile(PathBuf),
    ClearFile,
    Invalid(ValidationErrors),
    Pending,
    Submitted(Result<Photo, String>),
    Reset,
}
