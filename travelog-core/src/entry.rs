//! The journal entry model and the states it moves through.

use crate::location::{self, LocationInput, Point};
use crate::media::{MediaRef, MediaUpload};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::AsRefStr;

/// Where an entry sits in its life.
///
/// `Draft` exists only client-side, before creation. The only backward
/// transition is `Archived -> Active` (restore); nothing comes back from
/// `Deleted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum LifecycleState {
    Draft,
    Active,
    Archived,
    Deleted,
}

/// A user-authored geotagged record, as the API returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationInput>,
    /// Insertion order; there is no reordering operation.
    #[serde(default)]
    pub media: Vec<MediaRef>,
    #[serde(default)]
    pub archived: bool,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Entry {
    /// The canonical location, or `None` if the wire value had neither
    /// accepted shape.
    pub fn normalized_location(&self) -> Option<Point> {
        location::normalize(self.location.as_ref())
    }

    pub fn state(&self) -> LifecycleState {
        if self.archived {
            LifecycleState::Archived
        } else {
            LifecycleState::Active
        }
    }
}

/// The creation form's state: everything gathered before `create` is issued.
#[derive(Debug, Default)]
pub struct EntryDraft {
    pub title: String,
    pub description: String,
    /// Picked via a prior user interaction (a map click in the original UI).
    /// `create` refuses to run while this is `None`.
    pub location: Option<Point>,
    pub media: Vec<MediaUpload>,
}

impl EntryDraft {
    /// Resets the form after a successful creation.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// The three mutable fields of an existing entry. Media is never touched by
/// a field update.
#[derive(Debug, Clone, Serialize)]
pub struct EntryPatch {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Point>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_either_location_shape() {
        let json = r#"{
            "_id": "e1",
            "title": "Beach",
            "description": "Sunny",
            "location": {"type": "Point", "coordinates": [20.0, 10.0]},
            "media": [{"_id": "m1", "url": "/uploads/a.png"}],
            "archived": false
        }"#;
        let entry: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.normalized_location(), Some(Point::new(10.0, 20.0)));
        assert_eq!(entry.state(), LifecycleState::Active);
        assert_eq!(entry.media.len(), 1);
    }

    #[test]
    fn missing_optional_fields_default() {
        let json = r#"{"_id": "e2", "title": "T", "description": "D"}"#;
        let entry: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.normalized_location(), None);
        assert!(entry.media.is_empty());
        assert!(!entry.archived);
        assert!(entry.created_at.is_none());
    }

    #[test]
    fn garbage_location_still_deserializes() {
        let json = r#"{"_id": "e3", "title": "T", "description": "D", "location": 42}"#;
        let entry: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.normalized_location(), None);
    }

    #[test]
    fn draft_clear_resets_every_field() {
        let mut draft = EntryDraft {
            title: "Beach".into(),
            description: "Sunny".into(),
            location: Some(Point::new(10.0, 20.0)),
            media: vec![MediaUpload {
                file_name: "a.png".into(),
                bytes: vec![1, 2, 3],
            }],
        };
        draft.clear();
        assert!(draft.title.is_empty());
        assert!(draft.description.is_empty());
        assert!(draft.location.is_none());
        assert!(draft.media.is_empty());
    }
}
