//! Device-side collaborator contracts.
//!
//! Connectivity, the image pickers and geolocation live behind these
//! traits.  Permission denial and user cancellation are both reported as
//! `Ok(None)` so they never surface past the attachment helpers.

use async_trait::async_trait;
use thiserror::Error;

use huddle_shared::GeoPoint;

/// A device API call failed for a reason other than denial/cancel.
#[derive(Error, Debug)]
#[error("Device error: {0}")]
pub struct DeviceError(pub String);

/// Network reachability, polled once when a session starts.
#[async_trait]
pub trait ConnectivityMonitor: Send + Sync {
    /// Whether the network is currently reachable.
    async fn current_state(&self) -> bool;
}

/// An image selected from the library or captured by the camera.
#[derive(Debug, Clone)]
pub struct PickedImage {
    /// File name the upload path is derived from.
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Camera and photo-library access.
#[async_trait]
pub trait MediaSource: Send + Sync {
    /// Pick an image from the device library.
    async fn pick_image(&self) -> Result<Option<PickedImage>, DeviceError>;

    /// Capture a photo with the camera.
    async fn capture_photo(&self) -> Result<Option<PickedImage>, DeviceError>;
}

/// Geolocation access.
#[async_trait]
pub trait LocationSource: Send + Sync {
    /// Obtain a position fix.
    async fn current_position(&self) -> Result<Option<GeoPoint>, DeviceError>;
}
