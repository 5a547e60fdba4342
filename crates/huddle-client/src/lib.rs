//! # huddle-client
//!
//! The chat session core: local-first message synchronization and the
//! send pipeline.  A [`ChatSession`] owns the message list for one room,
//! keeps it mirrored between the in-memory state, the on-device cache and
//! the remote message store, and emits [`SessionEvent`]s for the
//! presentation layer to render.
//!
//! The remote store, identity provider, object store and device APIs are
//! opaque collaborators behind the traits in [`remote`] and [`device`].

pub mod attachments;
pub mod device;
pub mod events;
pub mod remote;
pub mod session;
pub mod state;

pub use attachments::AttachmentActions;
pub use device::{ConnectivityMonitor, DeviceError, LocationSource, MediaSource, PickedImage};
pub use events::SessionEvent;
pub use remote::{IdentityProvider, MessageStore, ObjectStore, RemoteError};
pub use session::{ChatSession, RoomContext, SessionError, SessionHandle};

use tracing_subscriber::{fmt, EnvFilter};

/// Install the default tracing subscriber for a host application.
///
/// Honors `RUST_LOG` when set, otherwise defaults to debug output for the
/// huddle crates and warnings for everything else.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("huddle_client=debug,huddle_store=info,warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
