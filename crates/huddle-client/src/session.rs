//! Chat session lifecycle and event loop.
//!
//! A session is one mounted chat screen.  `start` loads the cached
//! snapshot, polls connectivity once, resolves the device identity and
//! subscribes to the remote store, then spawns the session task.  All
//! state mutation happens inside that task: commands (send, clear-cache,
//! stop) and remote snapshot deliveries are serialized through the same
//! `select!` loop, so a send never races a snapshot application.
//!
//! Subscriptions are scoped acquisitions: the task owns the snapshot
//! receiver and the cache handle, and both are released exactly once when
//! the task returns.  A `start` that fails owns nothing that needs
//! detaching.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use huddle_shared::constants::SESSION_CHANNEL_CAPACITY;
use huddle_shared::{Author, DeviceId, Draft, RemoteRecord};
use huddle_store::SnapshotCache;

use crate::device::ConnectivityMonitor;
use crate::events::SessionEvent;
use crate::remote::{IdentityProvider, MessageStore, RemoteError};
use crate::state::SessionState;

/// Errors surfaced by the session to its host.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Identity resolution failed.  Chat is unusable without an identity;
    /// the host renders a blocked state instead of crashing.
    #[error("Identity resolution failed: {0}")]
    Identity(RemoteError),

    /// The remote subscription could not be established.
    #[error("Remote subscription failed: {0}")]
    Subscribe(RemoteError),

    /// The session task has already stopped.
    #[error("Session stopped")]
    Stopped,
}

/// Room/display context supplied by the start screen.  The color is
/// opaque to the session and only carried for the presentation layer.
#[derive(Debug, Clone)]
pub struct RoomContext {
    pub display_name: String,
    pub color: String,
}

/// Commands sent *into* the session task.
#[derive(Debug)]
enum SessionCommand {
    Send(Vec<Draft>),
    ClearCache,
    Stop,
}

/// Cloneable handle for enqueueing work from composers and attachment
/// helpers.
#[derive(Clone)]
pub struct SessionHandle {
    cmd_tx: mpsc::Sender<SessionCommand>,
}

impl SessionHandle {
    /// Queue drafts into the send pipeline.  Every draft is finalized and
    /// forwarded to the remote store exactly once.
    pub async fn send(&self, drafts: Vec<Draft>) -> Result<(), SessionError> {
        self.cmd_tx
            .send(SessionCommand::Send(drafts))
            .await
            .map_err(|_| SessionError::Stopped)
    }

    /// Drop the persisted snapshot and clear the in-memory list.
    pub async fn clear_cache(&self) -> Result<(), SessionError> {
        self.cmd_tx
            .send(SessionCommand::ClearCache)
            .await
            .map_err(|_| SessionError::Stopped)
    }
}

/// A live chat session.
pub struct ChatSession {
    handle: SessionHandle,
    event_rx: mpsc::Receiver<SessionEvent>,
    task: JoinHandle<()>,
    device_id: DeviceId,
    room: RoomContext,
    composer_enabled: bool,
}

impl ChatSession {
    /// Bring the message list into existence and keep it live.
    ///
    /// In order: load the cached snapshot (read or parse failure is
    /// logged and non-fatal), poll connectivity once to gate the
    /// composer, resolve the device identity (existing, else anonymous
    /// creation), subscribe to the remote store, spawn the session task.
    pub async fn start(
        room: RoomContext,
        cache: SnapshotCache,
        store: Arc<dyn MessageStore>,
        identity: Arc<dyn IdentityProvider>,
        connectivity: Arc<dyn ConnectivityMonitor>,
    ) -> Result<Self, SessionError> {
        let initial = match cache.load_snapshot() {
            Ok(Some(messages)) => messages,
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "failed to load cached snapshot, starting empty");
                Vec::new()
            }
        };

        // Polled once; gates the composer only, never sync behavior.
        let composer_enabled = connectivity.current_state().await;
        if !composer_enabled {
            info!("network unreachable at start, composer withheld");
        }

        let device_id = match identity.current().await {
            Some(id) => id,
            None => identity
                .create_anonymous()
                .await
                .map_err(SessionError::Identity)?,
        };
        debug!(device = %device_id.short(), "identity resolved");

        let snapshot_rx = store.subscribe().await.map_err(SessionError::Subscribe)?;

        let (cmd_tx, cmd_rx) = mpsc::channel(SESSION_CHANNEL_CAPACITY);
        let (event_tx, event_rx) = mpsc::channel(SESSION_CHANNEL_CAPACITY);

        let task = tokio::spawn(session_loop(SessionTask {
            state: SessionState::new(initial),
            cache,
            store,
            author: Author {
                id: device_id.0.clone(),
                display_name: room.display_name.clone(),
                avatar_url: String::new(),
            },
            device_id: device_id.clone(),
            cmd_rx,
            snapshot_rx,
            event_tx,
        }));

        info!(room = %room.display_name, "chat session started");

        Ok(Self {
            handle: SessionHandle { cmd_tx },
            event_rx,
            task,
            device_id,
            room,
            composer_enabled,
        })
    }

    /// Whether the text composer should be shown.  Attachment actions are
    /// not gated by this flag.
    pub fn composer_enabled(&self) -> bool {
        self.composer_enabled
    }

    pub fn device_id(&self) -> &DeviceId {
        &self.device_id
    }

    pub fn room(&self) -> &RoomContext {
        &self.room
    }

    /// A cloneable handle for composers and attachment helpers.
    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    /// See [`SessionHandle::send`].
    pub async fn send(&self, drafts: Vec<Draft>) -> Result<(), SessionError> {
        self.handle.send(drafts).await
    }

    /// See [`SessionHandle::clear_cache`].
    pub async fn clear_cache(&self) -> Result<(), SessionError> {
        self.handle.clear_cache().await
    }

    /// Receive the next presentation event.  `None` once the session has
    /// stopped.
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        self.event_rx.recv().await
    }

    /// Detach from the remote store and tear the session down.
    ///
    /// Consumes the session, so teardown runs exactly once; no state
    /// mutation happens after this returns.  In-flight collaborator calls
    /// complete against closed channels and their results are discarded.
    pub async fn stop(self) {
        let _ = self.handle.cmd_tx.send(SessionCommand::Stop).await;
        // Release the event receiver first so a task blocked on a full
        // event channel can observe the closure and exit.
        drop(self.event_rx);
        let _ = self.task.await;
        info!("chat session stopped");
    }
}

/// Everything the session task owns.
struct SessionTask {
    state: SessionState,
    cache: SnapshotCache,
    store: Arc<dyn MessageStore>,
    author: Author,
    device_id: DeviceId,
    cmd_rx: mpsc::Receiver<SessionCommand>,
    snapshot_rx: mpsc::Receiver<Vec<RemoteRecord>>,
    event_tx: mpsc::Sender<SessionEvent>,
}

async fn session_loop(mut task: SessionTask) {
    // Surface the cached snapshot before any remote delivery.
    task.emit_messages().await;

    let mut remote_closed = false;
    loop {
        tokio::select! {
            cmd = task.cmd_rx.recv() => match cmd {
                Some(SessionCommand::Send(drafts)) => task.handle_send(drafts).await,
                Some(SessionCommand::ClearCache) => task.handle_clear_cache().await,
                Some(SessionCommand::Stop) | None => break,
            },
            delivery = task.snapshot_rx.recv(), if !remote_closed => match delivery {
                Some(records) => task.handle_remote_snapshot(records).await,
                None => {
                    warn!("remote subscription ended");
                    remote_closed = true;
                }
            },
        }
    }

    debug!("session loop ended");
}

impl SessionTask {
    /// Send pipeline: finalize, prepend, persist, forward each draft.
    async fn handle_send(&mut self, drafts: Vec<Draft>) {
        if drafts.is_empty() {
            return;
        }

        let sent = self.state.append_drafts(drafts, &self.author);
        self.persist();

        for message in &sent {
            let record = RemoteRecord::from_message(message, &self.device_id);
            if let Err(e) = self.store.add(record).await {
                warn!(msg_id = %message.id, error = %e, "remote write failed, send abandoned");
                self.emit(SessionEvent::SendFailed { id: message.id }).await;
            }
        }

        self.emit_messages().await;
    }

    /// A remote delivery is authoritative; pending local sends are
    /// overlaid until the store echoes them.
    async fn handle_remote_snapshot(&mut self, records: Vec<RemoteRecord>) {
        let mut decoded = Vec::with_capacity(records.len());
        for record in records {
            match record.into_message() {
                Ok(message) => decoded.push(message),
                Err(e) => warn!(error = %e, "dropping undecodable remote record"),
            }
        }

        debug!(count = decoded.len(), "remote snapshot delivered");
        self.state.apply_remote_snapshot(decoded);
        self.persist();
        self.emit_messages().await;
    }

    async fn handle_clear_cache(&mut self) {
        if let Err(e) = self.cache.clear_snapshot() {
            warn!(error = %e, "failed to clear cached snapshot");
        }
        self.state.clear();
        self.emit_messages().await;
    }

    /// Cache failures are non-fatal; the in-memory state stays
    /// authoritative for the session.
    fn persist(&self) {
        if let Err(e) = self.cache.save_snapshot(self.state.messages()) {
            warn!(error = %e, "failed to persist snapshot");
        }
    }

    async fn emit_messages(&mut self) {
        self.emit(SessionEvent::MessagesChanged {
            messages: self.state.messages().to_vec(),
            pending: self.state.pending_ids(),
        })
        .await;
    }

    async fn emit(&mut self, event: SessionEvent) {
        if self.event_tx.send(event).await.is_err() {
            debug!("presentation layer detached, event dropped");
        }
    }
}
