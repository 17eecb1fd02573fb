//! Shared fixtures for controller tests.

pub mod stub;

use crate::entry::{Entry, EntryDraft};
use crate::location::{LocationInput, Point};
use crate::media::MediaUpload;
use crate::user::User;

pub(crate) fn mk_user() -> User {
    User {
        id: "u1".to_string(),
        name: "Ana".to_string(),
        email: "ana@example.com".to_string(),
        profile_pic: None,
    }
}

pub(crate) fn mk_entry(id: &str, title: &str) -> Entry {
    Entry {
        id: id.to_string(),
        title: title.to_string(),
        description: format!("About {title}"),
        location: Some(LocationInput::from(Point::new(10.0, 20.0))),
        media: Vec::new(),
        archived: false,
        created_at: None,
    }
}

pub(crate) fn mk_draft(title: &str, location: Option<Point>) -> EntryDraft {
    EntryDraft {
        title: title.to_string(),
        description: format!("About {title}"),
        location,
        media: Vec::new(),
    }
}

pub(crate) fn mk_upload(file_name: &str) -> MediaUpload {
    MediaUpload {
        file_name: file_name.to_string(),
        bytes: vec![0xde, 0xad, 0xbe, 0xef],
    }
}
