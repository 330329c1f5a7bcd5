use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use url::Url;

use super::types::{Photo, PhotoDetail, PhotoList, PhotoOrder, TagCount, User};

/// The remote photo service. One async call per operation; every call
/// settles into a `Result` that reducers can store directly.
#[derive(Clone)]
pub struct Api {
    base: Url,
    client: reqwest::Client,
    token: Arc<Mutex<Option<String>>>,
}

impl std::fmt::Debug for Api {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Api").field("base", &self.base).finish()
    }
}

#[derive(Deserialize)]
struct Session {
    token: String,
    user: User,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl Api {
    pub fn new(base: impl AsRef<str>, token: Option<String>) -> Result<Self, String> {
        let base = Url::parse(base.as_ref()).map_err(|e| format!("Invalid base url: {e}"))?;
        Ok(Self {
            base,
            client: reqwest::Client::new(),
            token: Arc::new(Mutex::new(token)),
        })
    }

    pub fn has_token(&self) -> bool {
        self.token
            .lock()
            .map(|token| token.is_some())
            .unwrap_or(false)
    }

    fn token(&self) -> Option<String> {
        self.token.lock().ok()?.clone()
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{path}", self.base.as_str().trim_end_matches('/'))
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.client.request(method, self.endpoint(path));
        if let Some(token) = self.token() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    // Auth

    pub async fn login(&self, identifier: String, password: String) -> Result<User, String> {
        log::trace!("Login");
        let response = self
            .request(reqwest::Method::POST, "auth/")
            .json(&json!({ "identifier": identifier, "password": password }))
            .send()
            .await
            .string_error("login")?;
        let session: Session = expect_json(response, "login").await?;
        if let Ok(mut token) = self.token.lock() {
            token.replace(session.token);
        }
        Ok(session.user)
    }

    /// Restore the session user, if the stored token is still valid.
    pub async fn get_user(&self) -> Result<User, String> {
        log::trace!("Get User");
        let response = self
            .request(reqwest::Method::GET, "auth/")
            .send()
            .await
            .string_error("get_user")?;
        expect_json(response, "get_user").await
    }

    pub async fn logout(&self) -> Result<(), String> {
        log::trace!("Logout");
        let response = self
            .request(reqwest::Method::DELETE, "auth/")
            .send()
            .await
            .string_error("logout")?;
        if let Ok(mut token) = self.token.lock() {
            token.take();
        }
        expect_ok(response, "logout").await
    }

    pub async fn change_password(&self, password: String, code: String) -> Result<(), String> {
        log::trace!("Change Password");
        let response = self
            .request(reqwest::Method::PUT, "auth/changepass")
            .json(&json!({ "password": password, "code": code }))
            .send()
            .await
            .string_error("change_password")?;
        expect_ok(response, "change_password").await
    }

    pub async fn recover_password(&self, name_or_email: String) -> Result<(), String> {
        log::trace!("Recover Password");
        let response = self
            .request(reqwest::Method::PUT, "auth/recoverpass")
            .json(&json!({ "email": name_or_email }))
            .send()
            .await
            .string_error("recover_password")?;
        expect_ok(response, "recover_password").await
    }

    // Photos

    pub async fn get_photos(&self, page: i64, order: PhotoOrder) -> Result<PhotoList, String> {
        log::trace!("Photos page {page}");
        let order: &'static str = order.into();
        let path = format!("photos/?page={page}&orderBy={order}");
        let response = self
            .request(reqwest::Method::GET, &path)
            .send()
            .await
            .string_error("get_photos")?;
        expect_json(response, "get_photos").await
    }

    pub async fn search_photos(&self, query: String, page: i64) -> Result<PhotoList, String> {
        log::trace!("Search photos");
        let path = format!("photos/search?page={page}&q={}", urlencoding::encode(&query));
        let response = self
            .request(reqwest::Method::GET, &path)
            .send()
            .await
            .string_error("search_photos")?;
        expect_json(response, "search_photos").await
    }

    pub async fn photos_by_owner(&self, owner_id: i64, page: i64) -> Result<PhotoList, String> {
        log::trace!("Photos of owner {owner_id}");
        let path = format!("photos/owner/{owner_id}?page={page}");
        let response = self
            .request(reqwest::Method::GET, &path)
            .send()
            .await
            .string_error("photos_by_owner")?;
        expect_json(response, "photos_by_owner").await
    }

    pub async fn photo_detail(&self, id: i64) -> Result<PhotoDetail, String> {
        log::trace!("Photo detail {id}");
        let response = self
            .request(reqwest::Method::GET, &format!("photos/{id}"))
            .send()
            .await
            .string_error("photo_detail")?;
        expect_json(response, "photo_detail").await
    }

    pub async fn upload(
        &self,
        title: String,
        taglist: String,
        path: &Path,
    ) -> Result<Photo, String> {
        log::trace!("Upload");
        let Some(content_type) = photo_content_type(path) else {
            return Err("Invalid photo".to_string());
        };
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("photo")
            .to_string();
        let bytes = tokio::fs::read(path).await.string_error("upload")?;
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename)
            .mime_str(content_type)
            .string_error("upload")?;
        let form = reqwest::multipart::Form::new()
            .text("title", title)
            .text("taglist", taglist)
            .part("photo", part);
        let response = self
            .request(reqwest::Method::POST, "photos/")
            .multipart(form)
            .send()
            .await
            .string_error("upload")?;
        expect_json(response, "upload").await
    }

    pub async fn delete_photo(&self, id: i64) -> Result<(), String> {
        log::trace!("Delete photo {id}");
        let response = self
            .request(reqwest::Method::DELETE, &format!("photos/{id}"))
            .send()
            .await
            .string_error("delete_photo")?;
        expect_ok(response, "delete_photo").await
    }

    pub async fn update_title(&self, id: i64, title: String) -> Result<(), String> {
        log::trace!("Update title {id}");
        let response = self
            .request(reqwest::Method::PATCH, &format!("photos/{id}/title"))
            .json(&json!({ "title": title }))
            .send()
            .await
            .string_error("update_title")?;
        expect_ok(response, "update_title").await
    }

    pub async fn update_tags(&self, id: i64, tags: Vec<String>) -> Result<(), String> {
        log::trace!("Update tags {id}");
        let response = self
            .request(reqwest::Method::PATCH, &format!("photos/{id}/tags"))
            .json(&json!({ "tags": tags }))
            .send()
            .await
            .string_error("update_tags")?;
        expect_ok(response, "update_tags").await
    }

    pub async fn vote_up(&self, id: i64) -> Result<(), String> {
        log::trace!("Vote up {id}");
        let response = self
            .request(reqwest::Method::PATCH, &format!("photos/{id}/upvote"))
            .send()
            .await
            .string_error("vote_up")?;
        expect_ok(response, "vote_up").await
    }

    pub async fn vote_down(&self, id: i64) -> Result<(), String> {
        log::trace!("Vote down {id}");
        let response = self
            .request(reqwest::Method::PATCH, &format!("photos/{id}/downvote"))
            .send()
            .await
            .string_error("vote_down")?;
        expect_ok(response, "vote_down").await
    }

    // Tags

    pub async fn get_tags(&self) -> Result<Vec<TagCount>, String> {
        log::trace!("Tags");
        let response = self
            .request(reqwest::Method::GET, "tags/")
            .send()
            .await
            .string_error("get_tags")?;
        expect_json(response, "get_tags").await
    }
}

fn photo_content_type(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

async fn expect_json<T: DeserializeOwned>(
    response: reqwest::Response,
    call: &'static str,
) -> Result<T, String> {
    let status = response.status();
    if !status.is_success() {
        return Err(status_error(call, status, response.text().await.ok()));
    }
    response.json::<T>().await.string_error(call)
}

async fn expect_ok(response: reqwest::Response, call: &'static str) -> Result<(), String> {
    let status = response.status();
    if !status.is_success() {
        return Err(status_error(call, status, response.text().await.ok()));
    }
    Ok(())
}

/// Prefer the server's `{"message": ...}` body over the bare status line.
fn status_error(call: &'static str, status: reqwest::StatusCode, body: Option<String>) -> String {
    let detail = body
        .as_deref()
        .and_then(|text| serde_json::from_str::<ApiErrorBody>(text).ok())
        .map(|e| e.message)
        .unwrap_or_else(|| status.to_string());
    let message = format!("API Error: {call} {detail}");
    log::error!("{message}");
    message
}

trait ResultExt {
    type Output;
    fn string_error(self, call: &'static str) -> Result<Self::Output, String>;
}

impl<T, E: std::fmt::Debug> ResultExt for Result<T, E> {
    type Output = T;
    fn string_error(self, call: &'static str) -> Result<T, String> {
        self.map_err(|e| {
            let string_error = format!("API Error: {call} {e:?}");
            log::error!("{string_error}");
            string_error
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_rooted_at_api() {
        let api = Api::new("http://localhost:5000", None).unwrap();
        assert_eq!(api.endpoint("photos/"), "http://localhost:5000/api/photos/");
        assert_eq!(
            api.endpoint("auth/changepass"),
            "http://localhost:5000/api/auth/changepass"
        );
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(Api::new("not a url", None).is_err());
    }

    #[test]
    fn only_photo_files_have_a_content_type() {
        assert_eq!(
            photo_content_type(Path::new("/tmp/cat.JPG")),
            Some("image/jpeg")
        );
        assert_eq!(
            photo_content_type(Path::new("/tmp/cat.png")),
            Some("image/png")
        );
        assert_eq!(photo_content_type(Path::new("/tmp/cat.pdf")), None);
        assert_eq!(photo_content_type(Path::new("/tmp/cat")), None);
    }

    #[test]
    fn server_message_wins_over_status_line() {
        let message = status_error(
            "delete_photo",
            reqwest::StatusCode::FORBIDDEN,
            Some(r#"{"message": "You're not allowed to delete this photo"}"#.to_string()),
        );
        assert_eq!(
            message,
            "API Error: delete_photo You're not allowed to delete this photo"
        );

        let fallback = status_error("delete_photo", reqwest::StatusCode::FORBIDDEN, None);
        assert_eq!(fallback, "API Error: delete_photo 403 Forbidden");
    }
}
