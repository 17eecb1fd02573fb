//! The external REST collaborator boundary.
//!
//! The controller talks to the API only through this trait. [`HttpApi`]
//! (crate::http) implements it over reqwest; tests drive the controller
//! against an in-memory stub instead.

use crate::entry::{Entry, EntryPatch};
use crate::error::Result;
use crate::location::Point;
use crate::media::{MediaRef, MediaUpload};
use crate::user::{Credentials, NewUser, User};

#[allow(async_fn_in_trait)]
pub trait Api {
    /// `GET /auth/me` — the current session's user, or `Error::Auth` when
    /// there is none.
    async fn me(&self) -> Result<User>;
    /// `POST /auth/login`
    async fn login(&mut self, credentials: &Credentials) -> Result<User>;
    /// `POST /auth/register`
    async fn register(&mut self, new_user: &NewUser) -> Result<User>;
    /// `POST /auth/logout`
    async fn logout(&mut self) -> Result<()>;

    /// `POST /entries` — multipart: title, description, the canonical
    /// `{lat,lng}` location as a JSON string, and one `media` part per file.
    async fn create_entry(
        &mut self,
        title: &str,
        description: &str,
        location: Point,
        media: &[MediaUpload],
    ) -> Result<Entry>;
    /// `GET /entries/user` — the caller's active entries, newest first.
    async fn list_active(&self) -> Result<Vec<Entry>>;
    /// `GET /entries/recent` — newest first; callers truncate to taste.
    async fn list_recent(&self) -> Result<Vec<Entry>>;
    /// `GET /entries/archive`
    async fn list_archived(&self) -> Result<Vec<Entry>>;

    /// `DELETE /entries/:id` — active -> archived.
    async fn archive(&mut self, id: &str) -> Result<()>;
    /// `PUT /entries/archive/:id/restore` — archived -> active.
    async fn restore(&mut self, id: &str) -> Result<()>;
    /// `DELETE /entries/archive/:id` — archived -> gone for good.
    async fn delete_forever(&mut self, id: &str) -> Result<()>;

    /// `PUT /entries/:id` — title, description and location only.
    async fn update_entry(&mut self, id: &str, patch: &EntryPatch) -> Result<Entry>;
    /// `POST /entries/:id/media` — returns only the newly stored refs.
    async fn append_media(&mut self, id: &str, media: &[MediaUpload]) -> Result<Vec<MediaRef>>;
    /// `DELETE /entries/:id/media/:media_id`
    async fn remove_media(&mut self, id: &str, media_id: &str) -> Result<()>;

    /// `POST /user/avatar` — returns the new `profilePic` path.
    async fn upload_avatar(&mut self, upload: &MediaUpload) -> Result<String>;
}
