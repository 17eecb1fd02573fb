pub mod api;
pub mod config;
pub mod controller;
pub mod entry;
pub mod error;
pub mod http;
pub mod location;
pub mod media;
pub mod session;
pub mod user;

#[cfg(test)]
pub(crate) mod tests;

pub use api::Api;
pub use config::Config;
pub use controller::{EntryStore, Travelog, ViewToken};
pub use entry::{Entry, EntryDraft, EntryPatch, LifecycleState};
pub use error::{Error, Result};
pub use http::HttpApi;
pub use location::{normalize, LocationInput, Point};
pub use media::{classify, resolve_url, MediaKind, MediaRef, MediaUpload};
pub use session::{Prefs, Session, SessionStore};
pub use user::{Credentials, NewUser, User};
