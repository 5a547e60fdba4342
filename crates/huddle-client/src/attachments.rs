//! Attachment actions: image and location sends.
//!
//! Thin helpers around the send pipeline.  Each one obtains a payload
//! from a device collaborator, uploads it where needed, and routes a
//! one-field draft through [`SessionHandle::send`].  Permission denial
//! and user cancellation are no-ops; upload and transport errors are
//! logged and the send is not attempted.  None of these actions consult
//! the composer gate.

use std::sync::Arc;

use tracing::{debug, warn};

use huddle_shared::constants::IMAGE_PATH_PREFIX;
use huddle_shared::Draft;

use crate::device::{DeviceError, LocationSource, MediaSource, PickedImage};
use crate::remote::ObjectStore;
use crate::session::SessionHandle;

/// Attachment entry points offered next to the composer.
pub struct AttachmentActions {
    session: SessionHandle,
    objects: Arc<dyn ObjectStore>,
    media: Arc<dyn MediaSource>,
    location: Arc<dyn LocationSource>,
}

impl AttachmentActions {
    pub fn new(
        session: SessionHandle,
        objects: Arc<dyn ObjectStore>,
        media: Arc<dyn MediaSource>,
        location: Arc<dyn LocationSource>,
    ) -> Self {
        Self {
            session,
            objects,
            media,
            location,
        }
    }

    /// Pick an image from the library, upload it and send it.
    pub async fn send_library_image(&self) {
        let picked = self.media.pick_image().await;
        self.upload_and_send(picked).await;
    }

    /// Capture a photo, upload it and send it.
    pub async fn send_camera_photo(&self) {
        let picked = self.media.capture_photo().await;
        self.upload_and_send(picked).await;
    }

    /// Obtain a position fix and send it.
    pub async fn send_current_location(&self) {
        match self.location.current_position().await {
            Ok(Some(point)) => {
                let _ = self.session.send(vec![Draft::location(point)]).await;
            }
            Ok(None) => debug!("location denied or unavailable"),
            Err(e) => warn!(error = %e, "position fix failed"),
        }
    }

    async fn upload_and_send(&self, picked: Result<Option<PickedImage>, DeviceError>) {
        let image = match picked {
            Ok(Some(image)) => image,
            Ok(None) => {
                debug!("image pick denied or cancelled");
                return;
            }
            Err(e) => {
                warn!(error = %e, "image pick failed");
                return;
            }
        };

        let path = format!("{}/{}", IMAGE_PATH_PREFIX, image.name);
        match self.objects.upload(image.bytes, &path).await {
            Ok(url) => {
                let _ = self.session.send(vec![Draft::image(url)]).await;
            }
            Err(e) => warn!(error = %e, "image upload failed, send not attempted"),
        }
    }
}
