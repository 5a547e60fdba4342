use thiserror::Error;

/// Errors produced when decoding a remote record into a [`crate::Message`].
#[derive(Error, Debug)]
pub enum RecordError {
    /// The server timestamp does not map to a representable point in time.
    #[error("Timestamp out of range: {0} ms")]
    TimestampOutOfRange(i64),
}
