//! The remote document schema.
//!
//! The remote store dictates this shape: the message fields plus a
//! `deviceId` tag, with `createdAt` carried as an opaque server timestamp
//! (epoch milliseconds).  Decoding validates the schema in one place and
//! applies the defaulting rules, instead of trusting each field access:
//! missing `text` and author `avatar` default to the empty string, missing
//! `image`/`location` default to absent, and the timestamp is converted to
//! a concrete point in time before any ordering or display use.

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::error::RecordError;
use crate::message::{Author, GeoPoint, Message};
use crate::types::{DeviceId, MessageId};

/// Author snapshot as stored in a remote document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteAuthor {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub avatar: String,
}

/// A single document in the remote message collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteRecord {
    /// Device id of the sending session.
    pub device_id: String,
    pub id: MessageId,
    #[serde(default)]
    pub text: String,
    /// Server timestamp in epoch milliseconds.
    pub created_at: i64,
    pub author: RemoteAuthor,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub location: Option<GeoPoint>,
}

impl RemoteRecord {
    /// Build the outgoing record for a locally composed message.
    pub fn from_message(message: &Message, device_id: &DeviceId) -> Self {
        Self {
            device_id: device_id.0.clone(),
            id: message.id,
            text: message.text.clone(),
            created_at: message.created_at.timestamp_millis(),
            author: RemoteAuthor {
                id: message.author.id.clone(),
                display_name: message.author.display_name.clone(),
                avatar: message.author.avatar_url.clone(),
            },
            image: message.image.clone(),
            location: message.location,
        }
    }

    /// Decode into the domain [`Message`], converting the server timestamp.
    pub fn into_message(self) -> Result<Message, RecordError> {
        let created_at = DateTime::from_timestamp_millis(self.created_at)
            .ok_or(RecordError::TimestampOutOfRange(self.created_at))?;

        Ok(Message {
            id: self.id,
            text: self.text,
            created_at,
            author: Author {
                id: self.author.id,
                display_name: self.author.display_name,
                avatar_url: self.author.avatar,
            },
            image: self.image,
            location: self.location,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn decode_defaults_missing_fields() {
        let json = format!(
            r#"{{"deviceId":"dev","id":"{}","createdAt":1756500000000,
                "author":{{"id":"dev","displayName":"Ada"}}}}"#,
            Uuid::new_v4()
        );
        let record: RemoteRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record.text, "");
        assert_eq!(record.author.avatar, "");
        assert!(record.image.is_none());
        assert!(record.location.is_none());

        let msg = record.into_message().unwrap();
        assert_eq!(msg.text, "");
        assert_eq!(msg.author.avatar_url, "");
        assert!(msg.image.is_none());
        assert!(msg.location.is_none());
    }

    #[test]
    fn timestamp_converted_at_the_boundary() {
        let record = RemoteRecord {
            device_id: "dev".into(),
            id: MessageId::new(),
            text: "hi".into(),
            created_at: 1_756_500_000_000,
            author: RemoteAuthor {
                id: "dev".into(),
                display_name: "Ada".into(),
                avatar: String::new(),
            },
            image: None,
            location: None,
        };

        let msg = record.into_message().unwrap();
        assert_eq!(msg.created_at.timestamp_millis(), 1_756_500_000_000);
    }

    #[test]
    fn unrepresentable_timestamp_is_rejected() {
        let record = RemoteRecord {
            device_id: "dev".into(),
            id: MessageId::new(),
            text: String::new(),
            created_at: i64::MAX,
            author: RemoteAuthor {
                id: "dev".into(),
                display_name: "Ada".into(),
                avatar: String::new(),
            },
            image: None,
            location: None,
        };

        assert!(matches!(
            record.into_message(),
            Err(RecordError::TimestampOutOfRange(_))
        ));
    }

    #[test]
    fn outgoing_record_mirrors_the_message() {
        let msg = crate::message::Draft::location(GeoPoint {
            latitude: 48.85,
            longitude: 2.35,
        })
        .finalize(Author {
            id: "dev".into(),
            display_name: "Ada".into(),
            avatar_url: "https://cdn.example/a.png".into(),
        });

        let record = RemoteRecord::from_message(&msg, &DeviceId("dev".into()));
        assert_eq!(record.device_id, "dev");
        assert_eq!(record.id, msg.id);
        assert_eq!(record.created_at, msg.created_at.timestamp_millis());
        assert_eq!(record.author.avatar, "https://cdn.example/a.png");
        assert_eq!(record.location, msg.location);
    }
}
