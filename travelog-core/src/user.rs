//! The authenticated identity and the credential payloads sent to the API.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    /// A storage path or absolute URL; resolve with
    /// [`resolve_url`](crate::media::resolve_url) before display.
    #[serde(rename = "profilePic", default, skip_serializing_if = "Option::is_none")]
    pub profile_pic: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}
