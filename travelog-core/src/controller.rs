//! The entry lifecycle controller.
//!
//! [`Travelog`] is the facade views talk to: it owns the session, the
//! client-side mirror of the two entry partitions ([`EntryStore`]) and the
//! API collaborator. Every mutating operation follows the same shape --
//! check the precondition locally, call the collaborator, and touch local
//! state only after the collaborator confirms success. A failed call leaves
//! the store exactly as it was.

use crate::api::Api;
use crate::config::Config;
use crate::entry::{Entry, EntryDraft, EntryPatch, LifecycleState};
use crate::error::{Error, Result};
use crate::media::{resolve_url, MediaRef, MediaUpload};
use crate::session::Session;
use crate::user::{Credentials, NewUser, User};
use tracing::{debug, warn};

/// A liveness stamp taken before an asynchronous fetch.
///
/// Applying the fetched result is refused if the store moved on in the
/// meantime (navigation, logout), so a late response can never overwrite
/// state it no longer belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewToken(u64);

/// The in-memory mirror of the active and archived partitions.
///
/// Order within each partition is whatever the server returned, which is
/// newest-first; locally created entries are prepended to keep that
/// ordering.
#[derive(Debug, Default)]
pub struct EntryStore {
    active: Vec<Entry>,
    archived: Vec<Entry>,
    epoch: u64,
}

impl EntryStore {
    pub fn active(&self) -> &[Entry] {
        &self.active
    }

    pub fn archived(&self) -> &[Entry] {
        &self.archived
    }

    /// Looks the entry up in either partition.
    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.active
            .iter()
            .chain(self.archived.iter())
            .find(|e| e.id == id)
    }

    /// Which lifecycle partition holds this id, or `None` when the store has
    /// never seen it (unknown or already deleted).
    pub fn state_of(&self, id: &str) -> Option<LifecycleState> {
        if self.active.iter().any(|e| e.id == id) {
            Some(LifecycleState::Active)
        } else if self.archived.iter().any(|e| e.id == id) {
            Some(LifecycleState::Archived)
        } else {
            None
        }
    }

    /// Stamps the current view. Pair with [`apply_lists`](Self::apply_lists).
    pub fn view_token(&self) -> ViewToken {
        ViewToken(self.epoch)
    }

    /// Invalidates outstanding view tokens, e.g. on navigation.
    pub fn invalidate(&mut self) {
        self.epoch += 1;
    }

    /// Replaces both partitions, unless the token is stale. Returns whether
    /// the result was applied.
    pub(crate) fn apply_lists(
        &mut self,
        token: ViewToken,
        active: Vec<Entry>,
        archived: Vec<Entry>,
    ) -> bool {
        if token.0 != self.epoch {
            warn!("dropping stale entry lists (view changed mid-fetch)");
            return false;
        }
        self.active = active;
        self.archived = archived;
        true
    }

    pub(crate) fn clear(&mut self) {
        self.invalidate();
        self.active.clear();
        self.archived.clear();
    }

    fn insert_active(&mut self, entry: Entry) {
        self.active.insert(0, entry);
    }

    fn move_to_archived(&mut self, id: &str) {
        if let Some(pos) = self.active.iter().position(|e| e.id == id) {
            let mut entry = self.active.remove(pos);
            entry.archived = true;
            self.archived.insert(0, entry);
        }
    }

    fn move_to_active(&mut self, id: &str) {
        if let Some(pos) = self.archived.iter().position(|e| e.id == id) {
            let mut entry = self.archived.remove(pos);
            entry.archived = false;
            self.active.insert(0, entry);
        }
    }

    fn remove_archived(&mut self, id: &str) {
        self.archived.retain(|e| e.id != id);
    }

    fn entry_mut(&mut self, id: &str) -> Option<&mut Entry> {
        self.active
            .iter_mut()
            .chain(self.archived.iter_mut())
            .find(|e| e.id == id)
    }
}

/// The central struct for all Travelog operations.
///
/// Generic over the [`Api`] collaborator so the whole lifecycle can run
/// against an in-memory stub in tests.
pub struct Travelog<A: Api> {
    pub config: Config,
    pub session: Session,
    pub store: EntryStore,
    api: A,
}

impl<A: Api> Travelog<A> {
    /// Creates a new `Travelog` instance with a specific `Config` and
    /// collaborator.
    pub fn with_config(config: Config, api: A) -> Self {
        Self {
            config,
            session: Session::default(),
            store: EntryStore::default(),
            api,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    #[cfg(test)]
    pub(crate) fn api_mut(&mut self) -> &mut A {
        &mut self.api
    }

    /// On startup: ask the API who is logged in. A 401 is not an error, it
    /// just means there is no session.
    pub async fn bootstrap(&mut self) -> Result<Option<&User>> {
        match self.api.me().await {
            Ok(user) => {
                debug!(name = %user.name, "session bootstrapped");
                Ok(Some(self.session.user.insert(user)))
            }
            Err(Error::Auth(_)) => {
                self.session.user = None;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub async fn login(&mut self, credentials: &Credentials) -> Result<&User> {
        let user = self.api.login(credentials).await?;
        Ok(self.session.user.insert(user))
    }

    pub async fn register(&mut self, new_user: &NewUser) -> Result<&User> {
        let user = self.api.register(new_user).await?;
        Ok(self.session.user.insert(user))
    }

    /// Logs out and tears the context down: user, entry lists, outstanding
    /// view tokens.
    pub async fn logout(&mut self) -> Result<()> {
        self.api.logout().await?;
        self.session.user = None;
        self.store.clear();
        Ok(())
    }

    /// Creates an entry from the draft.
    ///
    /// A draft without a location (or with an empty title/description) is
    /// refused before any network traffic. On success the new entry is
    /// prepended to the active list and the draft is reset for the next one.
    pub async fn create(&mut self, draft: &mut EntryDraft) -> Result<Entry> {
        let Some(location) = draft.location else {
            return Err(Error::Validation(
                "pick a location on the map first".to_string(),
            ));
        };
        if draft.title.trim().is_empty() || draft.description.trim().is_empty() {
            return Err(Error::Validation(
                "title and description are required".to_string(),
            ));
        }
        let entry = self
            .api
            .create_entry(&draft.title, &draft.description, location, &draft.media)
            .await?;
        self.store.insert_active(entry.clone());
        draft.clear();
        Ok(entry)
    }

    /// Fetches both partitions and applies them under a view token. Returns
    /// `false` when the result arrived late and was dropped.
    pub async fn refresh(&mut self) -> Result<bool> {
        let token = self.store.view_token();
        let active = self.api.list_active().await?;
        let archived = self.api.list_archived().await?;
        Ok(self.store.apply_lists(token, active, archived))
    }

    /// The newest `limit` entries from the shared recent feed. The server
    /// returns newest-first; we only truncate.
    pub async fn recent(&self, limit: usize) -> Result<Vec<Entry>> {
        let mut entries = self.api.list_recent().await?;
        entries.truncate(limit);
        Ok(entries)
    }

    /// `active -> archived`. Archiving an already-archived entry is a
    /// graceful no-op; an unknown id is a precondition failure.
    pub async fn archive(&mut self, id: &str) -> Result<()> {
        match self.store.state_of(id) {
            Some(LifecycleState::Active) => {
                self.api.archive(id).await?;
                self.store.move_to_archived(id);
                Ok(())
            }
            Some(LifecycleState::Archived) => Ok(()),
            _ => Err(Error::Precondition(format!("no active entry {id}"))),
        }
    }

    /// `archived -> active`, the exact inverse of [`archive`](Self::archive).
    pub async fn restore(&mut self, id: &str) -> Result<()> {
        match self.store.state_of(id) {
            Some(LifecycleState::Archived) => {
                self.api.restore(id).await?;
                self.store.move_to_active(id);
                Ok(())
            }
            Some(LifecycleState::Active) => Ok(()),
            _ => Err(Error::Precondition(format!("no archived entry {id}"))),
        }
    }

    /// `archived -> deleted`, the terminal transition. Only reachable from
    /// the archived partition; the call is refused (and never sent) from any
    /// other state. Asking the user for confirmation is the view's job.
    pub async fn permanently_delete(&mut self, id: &str) -> Result<()> {
        if self.store.state_of(id) != Some(LifecycleState::Archived) {
            return Err(Error::Precondition(format!(
                "entry {id} is not archived; only archived entries can be deleted"
            )));
        }
        self.api.delete_forever(id).await?;
        self.store.remove_archived(id);
        Ok(())
    }

    /// Updates title, description and location in place. Media is never
    /// touched by this operation, whatever the server echoes back.
    pub async fn update_fields(&mut self, id: &str, patch: &EntryPatch) -> Result<()> {
        if self.store.state_of(id).is_none() {
            return Err(Error::Precondition(format!("unknown or deleted entry {id}")));
        }
        let updated = self.api.update_entry(id, patch).await?;
        if let Some(entry) = self.store.entry_mut(id) {
            entry.title = updated.title;
            entry.description = updated.description;
            entry.location = updated.location;
        }
        Ok(())
    }

    /// Uploads new media and appends the returned refs to the entry's list.
    /// Existing media is never reordered or replaced.
    pub async fn append_media(
        &mut self,
        id: &str,
        uploads: &[MediaUpload],
    ) -> Result<Vec<MediaRef>> {
        if uploads.is_empty() {
            return Err(Error::Validation("no media files selected".to_string()));
        }
        if self.store.state_of(id).is_none() {
            return Err(Error::Precondition(format!("unknown or deleted entry {id}")));
        }
        let new_refs = self.api.append_media(id, uploads).await?;
        if let Some(entry) = self.store.entry_mut(id) {
            entry.media.extend(new_refs.iter().cloned());
        }
        Ok(new_refs)
    }

    /// Deletes one media item from the remote record, then from the local
    /// copy.
    pub async fn remove_media(&mut self, id: &str, media_id: &str) -> Result<()> {
        if self.store.state_of(id).is_none() {
            return Err(Error::Precondition(format!("unknown or deleted entry {id}")));
        }
        self.api.remove_media(id, media_id).await?;
        if let Some(entry) = self.store.entry_mut(id) {
            entry.media.retain(|m| m.id != media_id);
        }
        Ok(())
    }

    /// Uploads a new profile picture; the session's user is updated only on
    /// success.
    pub async fn upload_avatar(&mut self, upload: &MediaUpload) -> Result<String> {
        let profile_pic = self.api.upload_avatar(upload).await?;
        if let Some(user) = &mut self.session.user {
            user.profile_pic = Some(profile_pic.clone());
        }
        Ok(profile_pic)
    }

    /// Resolves a storage-relative media path for display.
    pub fn file_url(&self, path: &str) -> String {
        resolve_url(&self.config.storage_base_url, path)
    }
}
