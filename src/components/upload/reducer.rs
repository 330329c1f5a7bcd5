use std::path::Path;

use crate::components::forms::{max_length, required, ValidationErrors};
use crate::effect::Effect;
use crate::environment::Environment;
use crate::store::AppAction;

use super::{State, UploadAction};

/// Validate the upload form; on success start the multipart upload.
pub fn submit_form(
    title: &str,
    taglist: &str,
    file: Option<&Path>,
    environment: &Environment,
) -> Effect<AppAction> {
    let mut errors = ValidationErrors::default();
    errors.check("title", required(title, "Title is required"));
    errors.check("title", max_length(title, 200, "Title is too long"));
    if file.is_none() {
        errors.check("photo", Some("Please choose a photo to upload"));
    }
    if !errors.is_empty() {
        return Effect::action(UploadAction::Invalid(errors).into());
    }

    let Some(path) = file.map(Path::to_path_buf) else {
        return Effect::NONE;
    };
    let api = environment.api.clone();
    let title = title.trim().to_string();
    let taglist = taglist.trim().to_string();
    Effect::merge2(
        Effect::action(UploadAction::Pending.into()),
        Effect::future(
            async move { api.upload(title, taglist, &path).await },
            |result| UploadAction::Submitted(result).into(),
        ),
    )
}

pub fn reduce(
    action: &AppAction,
    state: &mut State,
    _environment: &Environment,
) -> Effect<AppAction> {
    let AppAction::Upload(action) = action else {
        return Effect::NONE;
    };
    log::trace!("{action:?}");
    match action {
        UploadAction::SetTitle(title) => {
            state.title = title.clone();
        }
        UploadAction::SetTaglist(taglist) => {
            state.taglist = taglist.clone();
        }
        UploadAction::ChooseFile(path) => {
            state.file = Some(path.clone());
        }
        UploadAction::ClearFile => {
            state.file = None;
        }
        UploadAction::Invalid(errors) => {
            state.errors = errors.clone();
        }
        UploadAction::Pending => {
            state.uploading = true;
            state.errors = ValidationErrors::default();
            state.error = None;
        }
        UploadAction::Submitted(result) => {
            state.uploading = false;
            match result {
                // the photos slice picks the new photo up on its own
                Ok(photo) => state.uploaded = Some(photo.clone()),
                Err(e) => state.error = Some(e.clone()),
            }
        }
        UploadAction::Reset => {
            *state = State::default();
        }
    }
    Effect::NONE
}
