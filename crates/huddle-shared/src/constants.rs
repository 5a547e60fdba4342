/// Application name
pub const APP_NAME: &str = "Huddle";

/// Fixed cache key for the message snapshot.
///
/// Single-room design: one key per device. If multi-room support is ever
/// added this must become a key derived from the room identifier.
pub const CACHE_KEY: &str = "messages";

/// Object-store path prefix for uploaded image attachments.
pub const IMAGE_PATH_PREFIX: &str = "images";

/// Capacity of the session command and event channels.
pub const SESSION_CHANNEL_CAPACITY: usize = 64;
