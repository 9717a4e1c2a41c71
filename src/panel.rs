//! The profile drawer controller.
//!
//! A [`ProfilePanel`] composes the presence feed, the memoizing projector and
//! the deletion controller. All methods take `&self` so a host can keep
//! reading the panel while a delete is outstanding.

use crate::config::DrawerConfig;
use crate::deletion::{DeleteOutcome, DeletionController};
use crate::host::PanelHost;
use crate::presence::PresenceFeed;
use anyhow::Result;
use drawer_core::conversation::{Conversation, User};
use drawer_core::error::WorkflowError;
use drawer_core::net::HttpClient;
use drawer_core::projection::{PanelMetadata, Projector};
use drawer_core::workflow::DeletionState;
use log::{debug, info};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub const CONFIRMATION_TITLE: &str = "Delete Conversation";
pub const CONFIRMATION_BODY: &str =
    "Are you sure you want to delete this conversation? This action cannot be undone.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmationView {
    pub title: &'static str,
    pub body: &'static str,
    /// False while the delete request is outstanding.
    pub actions_enabled: bool,
}

/// Headless render model of the drawer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelView {
    pub open: bool,
    pub metadata: PanelMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation: Option<ConfirmationView>,
}

#[derive(Debug)]
struct Snapshot {
    conversation: Conversation,
    counterpart: Option<User>,
}

pub struct ProfilePanel {
    open: AtomicBool,
    snapshot: Mutex<Snapshot>,
    projector: Mutex<Projector>,
    presence: PresenceFeed,
    deletion: DeletionController,
    host: Arc<dyn PanelHost>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ProfilePanel {
    pub fn builder() -> ProfilePanelBuilder {
        ProfilePanelBuilder::new()
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    /// Applies the host's visibility flag.
    pub fn set_open(&self, open: bool) {
        self.open.store(open, Ordering::SeqCst);
    }

    /// Closes the drawer through the host. An outstanding delete keeps
    /// running.
    pub fn close(&self) {
        if self.deletion.is_in_flight() {
            debug!("Closing panel while a delete is in flight");
        }
        self.open.store(false, Ordering::SeqCst);
        self.host.close();
    }

    /// Replaces the conversation snapshot the panel describes.
    pub fn set_conversation(&self, conversation: Conversation, counterpart: Option<User>) {
        let mut snapshot = lock(&self.snapshot);
        if snapshot.conversation.id != conversation.id
            && !self.deletion.retarget(&conversation.id)
        {
            info!(
                "Delete for {} still in flight, {} becomes the target once it settles",
                snapshot.conversation.id, conversation.id
            );
        }
        snapshot.conversation = conversation;
        snapshot.counterpart = counterpart;
    }

    pub fn conversation_id(&self) -> String {
        lock(&self.snapshot).conversation.id.clone()
    }

    /// Display fields for the current snapshot and presence.
    pub fn metadata(&self) -> PanelMetadata {
        let active = self.presence.snapshot();
        let snapshot = lock(&self.snapshot);
        let kind = snapshot.conversation.kind(snapshot.counterpart.as_ref());
        lock(&self.projector).project(kind, &active)
    }

    /// Projection work performed so far.
    pub fn metadata_computations(&self) -> u64 {
        lock(&self.projector).computations()
    }

    pub fn view(&self) -> PanelView {
        let confirmation = self.is_confirmation_open().then(|| ConfirmationView {
            title: CONFIRMATION_TITLE,
            body: CONFIRMATION_BODY,
            actions_enabled: !self.is_delete_in_flight(),
        });
        PanelView {
            open: self.is_open(),
            metadata: self.metadata(),
            confirmation,
        }
    }

    pub fn deletion_state(&self) -> DeletionState {
        self.deletion.state()
    }

    pub fn is_confirmation_open(&self) -> bool {
        self.deletion.is_confirmation_open()
    }

    pub fn is_delete_in_flight(&self) -> bool {
        self.deletion.is_in_flight()
    }

    /// Number of delete requests issued by this panel.
    pub fn delete_attempts(&self) -> u64 {
        self.deletion.attempts()
    }

    /// Conversation the next confirmed delete will address.
    pub fn delete_target(&self) -> String {
        self.deletion.target()
    }

    pub fn open_confirmation(&self) -> Result<(), WorkflowError> {
        self.deletion.open_confirmation()
    }

    pub fn cancel_confirmation(&self) -> Result<(), WorkflowError> {
        self.deletion.cancel()
    }

    pub async fn confirm_delete(&self) -> DeleteOutcome {
        let outcome = self.deletion.confirm().await;
        if outcome.is_deleted() {
            self.open.store(false, Ordering::SeqCst);
        }
        outcome
    }
}

#[derive(Default)]
pub struct ProfilePanelBuilder {
    conversation: Option<Conversation>,
    counterpart: Option<User>,
    presence: Option<PresenceFeed>,
    http_client: Option<Arc<dyn HttpClient>>,
    host: Option<Arc<dyn PanelHost>>,
    config: Option<DrawerConfig>,
    open: bool,
}

impl ProfilePanelBuilder {
    fn new() -> Self {
        Self::default()
    }

    pub fn with_conversation(mut self, conversation: Conversation) -> Self {
        self.conversation = Some(conversation);
        self
    }

    /// The resolved other participant of a direct conversation.
    pub fn with_counterpart(mut self, counterpart: Option<User>) -> Self {
        self.counterpart = counterpart;
        self
    }

    /// Shares an existing presence feed. A private empty feed is used if
    /// none is given.
    pub fn with_presence(mut self, presence: PresenceFeed) -> Self {
        self.presence = Some(presence);
        self
    }

    pub fn with_http_client<C>(mut self, client: C) -> Self
    where
        C: HttpClient + 'static,
    {
        self.http_client = Some(Arc::new(client));
        self
    }

    pub fn with_shared_http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn with_host(mut self, host: Arc<dyn PanelHost>) -> Self {
        self.host = Some(host);
        self
    }

    pub fn with_config(mut self, config: DrawerConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }

    pub fn build(self) -> Result<ProfilePanel> {
        let conversation = self
            .conversation
            .ok_or_else(|| anyhow::anyhow!("A conversation is required to build a panel"))?;
        let http_client = self
            .http_client
            .ok_or_else(|| anyhow::anyhow!("An HTTP client is required to build a panel"))?;
        let host = self
            .host
            .ok_or_else(|| anyhow::anyhow!("A panel host is required to build a panel"))?;
        let config = Arc::new(self.config.unwrap_or_default());

        info!("Building profile panel for conversation {}", conversation.id);
        let deletion =
            DeletionController::new(conversation.id.clone(), http_client, host.clone(), config);

        Ok(ProfilePanel {
            open: AtomicBool::new(self.open),
            snapshot: Mutex::new(Snapshot {
                conversation,
                counterpart: self.counterpart,
            }),
            projector: Mutex::new(Projector::new()),
            presence: self.presence.unwrap_or_default(),
            deletion,
            host,
        })
    }
}
