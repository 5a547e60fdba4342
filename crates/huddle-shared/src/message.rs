//! Domain model for chat messages.
//!
//! Every struct derives `Serialize` and `Deserialize` so the snapshot can
//! be handed directly to the UI layer and persisted as a JSON blob in the
//! local cache.  Optional fields carry `#[serde(default)]` so a cached
//! snapshot written by an older revision still decodes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::MessageId;

/// A geographic position attached to a message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Snapshot of the sender's identity at send time, not a live reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Author {
    /// Device id of the sender.
    pub id: String,
    /// Display name chosen on the start screen.
    pub display_name: String,
    /// Avatar URL; empty string when the sender has none.
    #[serde(default)]
    pub avatar_url: String,
}

/// A single chat message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// Unique message identifier, assigned by the sender at creation time.
    pub id: MessageId,
    /// Message text; empty when an image or location is attached.
    #[serde(default)]
    pub text: String,
    /// When the message was composed, by the sender's local clock.
    pub created_at: DateTime<Utc>,
    /// Sender identity snapshot.
    pub author: Author,
    /// URL of an uploaded image attachment, owned by the object store.
    #[serde(default)]
    pub image: Option<String>,
    /// Attached geographic position.
    #[serde(default)]
    pub location: Option<GeoPoint>,
}

impl Message {
    /// Whether the message carries any content at all.
    ///
    /// The send pipeline never produces an empty message, but the model
    /// does not forbid one.
    pub fn has_content(&self) -> bool {
        !self.text.is_empty() || self.image.is_some() || self.location.is_some()
    }
}

/// A partially populated message supplied to the send pipeline before the
/// id and timestamp are finalized by the sender.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    pub text: Option<String>,
    pub image: Option<String>,
    pub location: Option<GeoPoint>,
}

impl Draft {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn image(url: impl Into<String>) -> Self {
        Self {
            image: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn location(point: GeoPoint) -> Self {
        Self {
            location: Some(point),
            ..Self::default()
        }
    }

    /// Turn the draft into a full [`Message`]: assign a fresh id, stamp it
    /// with the sender's local clock, and snapshot the author identity.
    pub fn finalize(self, author: Author) -> Message {
        Message {
            id: MessageId::new(),
            text: self.text.unwrap_or_default(),
            created_at: Utc::now(),
            author,
            image: self.image,
            location: self.location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author() -> Author {
        Author {
            id: "device-1".into(),
            display_name: "Ada".into(),
            avatar_url: String::new(),
        }
    }

    #[test]
    fn finalize_assigns_id_and_timestamp() {
        let before = Utc::now();
        let msg = Draft::text("hello").finalize(author());

        assert_eq!(msg.text, "hello");
        assert_eq!(msg.author.display_name, "Ada");
        assert!(msg.created_at >= before);
        assert!(msg.image.is_none());
        assert!(msg.location.is_none());
    }

    #[test]
    fn finalize_assigns_distinct_ids() {
        let a = Draft::text("a").finalize(author());
        let b = Draft::text("b").finalize(author());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn one_field_drafts_have_content() {
        let img = Draft::image("https://cdn.example/pic.png").finalize(author());
        assert!(img.has_content());
        assert!(img.text.is_empty());

        let loc = Draft::location(GeoPoint {
            latitude: 52.52,
            longitude: 13.405,
        })
        .finalize(author());
        assert!(loc.has_content());

        let empty = Draft::default().finalize(author());
        assert!(!empty.has_content());
    }

    #[test]
    fn snapshot_json_round_trip() {
        let msg = Draft::text("persisted").finalize(author());
        let blob = serde_json::to_vec(&vec![msg.clone()]).unwrap();
        let restored: Vec<Message> = serde_json::from_slice(&blob).unwrap();
        assert_eq!(restored, vec![msg]);
    }

    #[test]
    fn snapshot_tolerates_absent_optional_fields() {
        let blob = format!(
            r#"[{{"id":"{}","created_at":"2026-08-30T10:00:00Z","author":{{"id":"d","display_name":"Ada"}}}}]"#,
            uuid::Uuid::new_v4()
        );
        let restored: Vec<Message> = serde_json::from_str(&blob).unwrap();
        assert_eq!(restored[0].text, "");
        assert_eq!(restored[0].author.avatar_url, "");
        assert!(restored[0].image.is_none());
        assert!(restored[0].location.is_none());
    }
}
