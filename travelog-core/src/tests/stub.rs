//! An in-memory stand-in for the REST collaborator.
//!
//! Entries live in one vector with the `archived` flag deciding the
//! partition, which is how the real backend stores them too. Every call is
//! recorded so tests can assert that an operation never reached the
//! "network"; flipping `fail` makes every subsequent call come back as a
//! transient failure.

use crate::api::Api;
use crate::entry::{Entry, EntryPatch};
use crate::error::{Error, Result};
use crate::location::Point;
use crate::media::{MediaRef, MediaUpload};
use crate::tests::mk_user;
use crate::user::{Credentials, NewUser, User};
use std::cell::RefCell;

#[derive(Default)]
pub struct StubApi {
    pub user: Option<User>,
    pub entries: Vec<Entry>,
    pub fail: bool,
    calls: RefCell<Vec<&'static str>>,
    next_id: u32,
}

impl StubApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn logged_in() -> Self {
        Self {
            user: Some(mk_user()),
            ..Self::default()
        }
    }

    pub fn with_entries(entries: Vec<Entry>) -> Self {
        Self {
            user: Some(mk_user()),
            entries,
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    fn called(&self, op: &'static str) -> Result<()> {
        self.calls.borrow_mut().push(op);
        if self.fail {
            Err(Error::Transient("stub collaborator offline".to_string()))
        } else {
            Ok(())
        }
    }

    fn fresh_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}{}", self.next_id)
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut Entry> {
        self.entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| Error::Transient(format!("no entry {id}")))
    }
}

impl Api for StubApi {
    async fn me(&self) -> Result<User> {
        self.called("me")?;
        self.user
            .clone()
            .ok_or_else(|| Error::Auth("no session".to_string()))
    }

    async fn login(&mut self, credentials: &Credentials) -> Result<User> {
        self.called("login")?;
        let mut user = mk_user();
        user.email = credentials.email.clone();
        self.user = Some(user.clone());
        Ok(user)
    }

    async fn register(&mut self, new_user: &NewUser) -> Result<User> {
        self.called("register")?;
        let user = User {
            id: "u-new".to_string(),
            name: new_user.name.clone(),
            email: new_user.email.clone(),
            profile_pic: None,
        };
        self.user = Some(user.clone());
        Ok(user)
    }

    async fn logout(&mut self) -> Result<()> {
        self.called("logout")?;
        self.user = None;
        Ok(())
    }

    async fn create_entry(
        &mut self,
        title: &str,
        description: &str,
        location: Point,
        media: &[MediaUpload],
    ) -> Result<Entry> {
        self.called("create_entry")?;
        let media = media
            .iter()
            .map(|m| MediaRef {
                id: self.fresh_id("m"),
                url: format!("/uploads/{}", m.file_name),
            })
            .collect();
        let entry = Entry {
            id: self.fresh_id("e"),
            title: title.to_string(),
            description: description.to_string(),
            location: Some(location.into()),
            media,
            archived: false,
            created_at: None,
        };
        // newest first, like the backend's sort order
        self.entries.insert(0, entry.clone());
        Ok(entry)
    }

    async fn list_active(&self) -> Result<Vec<Entry>> {
        self.called("list_active")?;
        Ok(self.entries.iter().filter(|e| !e.archived).cloned().collect())
    }

    async fn list_recent(&self) -> Result<Vec<Entry>> {
        self.called("list_recent")?;
        Ok(self.entries.iter().filter(|e| !e.archived).cloned().collect())
    }

    async fn list_archived(&self) -> Result<Vec<Entry>> {
        self.called("list_archived")?;
        Ok(self.entries.iter().filter(|e| e.archived).cloned().collect())
    }

    async fn archive(&mut self, id: &str) -> Result<()> {
        self.called("archive")?;
        self.find_mut(id)?.archived = true;
        Ok(())
    }

    async fn restore(&mut self, id: &str) -> Result<()> {
        self.called("restore")?;
        self.find_mut(id)?.archived = false;
        Ok(())
    }

    async fn delete_forever(&mut self, id: &str) -> Result<()> {
        self.called("delete_forever")?;
        self.find_mut(id)?;
        self.entries.retain(|e| e.id != id);
        Ok(())
    }

    async fn update_entry(&mut self, id: &str, patch: &EntryPatch) -> Result<Entry> {
        self.called("update_entry")?;
        let location = patch.location.map(Into::into);
        let entry = self.find_mut(id)?;
        entry.title = patch.title.clone();
        entry.description = patch.description.clone();
        if location.is_some() {
            entry.location = location;
        }
        Ok(entry.clone())
    }

    async fn append_media(&mut self, id: &str, media: &[MediaUpload]) -> Result<Vec<MediaRef>> {
        self.called("append_media")?;
        let new_refs: Vec<MediaRef> = media
            .iter()
            .map(|m| MediaRef {
                id: self.fresh_id("m"),
                url: format!("/uploads/{}", m.file_name),
            })
            .collect();
        let entry = self.find_mut(id)?;
        entry.media.extend(new_refs.iter().cloned());
        Ok(new_refs)
    }

    async fn remove_media(&mut self, id: &str, media_id: &str) -> Result<()> {
        self.called("remove_media")?;
        let entry = self.find_mut(id)?;
        entry.media.retain(|m| m.id != media_id);
        Ok(())
    }

    async fn upload_avatar(&mut self, upload: &MediaUpload) -> Result<String> {
        self.called("upload_avatar")?;
        let profile_pic = format!("/uploads/avatars/{}", upload.file_name);
        if let Some(user) = &mut self.user {
            user.profile_pic = Some(profile_pic.clone());
        }
        Ok(profile_pic)
    }
}
