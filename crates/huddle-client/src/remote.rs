//! Backend collaborator contracts.
//!
//! The realtime document store, the object store and the identity provider
//! are managed services; the core only sees these traits.  Implementations
//! adapt a concrete vendor SDK, tests use in-memory fakes.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use huddle_shared::{DeviceId, RemoteRecord};

/// Errors crossing a backend collaborator boundary.
#[derive(Error, Debug)]
pub enum RemoteError {
    /// Network / transport failure.  The core logs these and never retries.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The collaborator rejected the operation.
    #[error("Rejected: {0}")]
    Rejected(String),
}

/// The realtime message collection.
///
/// The subscription delivers the **full** result set, newest-first, on
/// every change to the queried collection; never partial diffs.  Dropping
/// the receiver detaches the subscription.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Subscribe to the message collection ordered by `createdAt`
    /// descending.
    async fn subscribe(&self) -> Result<mpsc::Receiver<Vec<RemoteRecord>>, RemoteError>;

    /// Create a new document.  Fire-and-forget: the core consumes no
    /// return value beyond the error, which it logs.
    async fn add(&self, record: RemoteRecord) -> Result<(), RemoteError>;
}

/// Blob storage for uploaded attachments.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload `bytes` under `path` and return a durable, fetchable URL.
    async fn upload(&self, bytes: Vec<u8>, path: &str) -> Result<String, RemoteError>;
}

/// Anonymous per-device identity.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The identity already established for this device, if any.
    async fn current(&self) -> Option<DeviceId>;

    /// Create a fresh anonymous identity.
    async fn create_anonymous(&self) -> Result<DeviceId, RemoteError>;
}
