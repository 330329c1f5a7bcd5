use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, IntoStaticStr};

// API Types

#[derive(Default, Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
    /// Ids of the photos this user already voted on
    #[serde(default)]
    pub votes: Vec<i64>,
}

#[derive(Default, Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub filename: String,
    #[serde(default)]
    pub up_votes: i64,
    #[serde(default)]
    pub down_votes: i64,
    pub created_at: DateTime<Utc>,
}

/// One page of photos, as the server returns it.
#[derive(Default, Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PhotoList {
    pub photos: Vec<Photo>,
    pub total: i64,
    pub current_page: i64,
    pub num_pages: i64,
}

#[derive(Default, Clone, Copy, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Permissions {
    pub edit: bool,
    pub delete: bool,
    pub vote: bool,
}

#[derive(Default, Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PhotoDetail {
    pub id: i64,
    pub owner_id: i64,
    pub owner_name: String,
    pub title: String,
    pub filename: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub up_votes: i64,
    #[serde(default)]
    pub down_votes: i64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub perms: Permissions,
}

#[derive(Default, Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TagCount {
    pub name: String,
    pub num_photos: i64,
}

/// Sort order for photo pages. The static string is the `orderBy`
/// query parameter value.
#[derive(Default, Clone, Copy, Debug, Eq, PartialEq, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum PhotoOrder {
    #[default]
    Created,
    Votes,
}

// Activity feed

/// What happened to a photo, as broadcast by the server.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, Eq, PartialEq, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MessageKind {
    PhotoUploaded,
    PhotoUpdated,
    PhotoDeleted,
}

#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub sender: String,
    pub photo_id: i64,
    pub kind: MessageKind,
    pub received: DateTime<Utc>,
}

impl Message {
    pub fn new(sender: impl Into<String>, photo_id: i64, kind: MessageKind) -> Self {
        Self {
            sender: sender.into(),
            photo_id,
            kind,
            received: Utc::now(),
        }
    }
}
