//! # huddle-shared
//!
//! Domain model shared between the local store and the chat session:
//! the message shape, draft composition, the remote record schema with
//! its defaulting decode rules, and identity newtypes.

pub mod constants;
pub mod message;
pub mod record;
pub mod types;

mod error;

pub use error::RecordError;
pub use message::{Author, Draft, GeoPoint, Message};
pub use record::{RemoteAuthor, RemoteRecord};
pub use types::{DeviceId, MessageId};
