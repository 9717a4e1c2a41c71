use crate::config::DrawerConfig;
use crate::error::DeleteError;
use crate::host::PanelHost;
use drawer_core::error::WorkflowError;
use drawer_core::net::{HttpClient, HttpRequest};
use drawer_core::workflow::{DeleteTicket, DeletionState, DeletionWorkflow};
use log::{debug, info, warn};
use scopeguard::ScopeGuard;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// How a call to [`DeletionController::confirm`] ended.
#[derive(Debug)]
pub enum DeleteOutcome {
    /// The conversation was deleted and the host was told to move on.
    Deleted,
    /// The request failed; the user was notified and may retry.
    Failed(DeleteError),
    /// The confirm was refused without touching the network.
    Ignored(WorkflowError),
}

impl DeleteOutcome {
    pub fn is_deleted(&self) -> bool {
        matches!(self, DeleteOutcome::Deleted)
    }
}

/// Drives a [`DeletionWorkflow`] against the network and the host.
///
/// The workflow lock is never held across the request, so a second confirm
/// arriving mid-request observes `InFlight` and is ignored.
pub struct DeletionController {
    workflow: Mutex<DeletionWorkflow>,
    http_client: Arc<dyn HttpClient>,
    host: Arc<dyn PanelHost>,
    config: Arc<DrawerConfig>,
}

impl DeletionController {
    pub fn new(
        conversation_id: impl Into<String>,
        http_client: Arc<dyn HttpClient>,
        host: Arc<dyn PanelHost>,
        config: Arc<DrawerConfig>,
    ) -> Self {
        Self {
            workflow: Mutex::new(DeletionWorkflow::new(conversation_id)),
            http_client,
            host,
            config,
        }
    }

    fn workflow(&self) -> MutexGuard<'_, DeletionWorkflow> {
        self.workflow.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> DeletionState {
        self.workflow().state()
    }

    pub fn is_in_flight(&self) -> bool {
        self.workflow().is_in_flight()
    }

    pub fn is_confirmation_open(&self) -> bool {
        self.workflow().is_confirmation_open()
    }

    pub fn attempts(&self) -> u64 {
        self.workflow().attempts()
    }

    /// Switches the delete target. Returns `false` when the switch waits for
    /// the outstanding request to settle.
    pub fn retarget(&self, conversation_id: &str) -> bool {
        self.workflow().retarget(conversation_id)
    }

    pub fn target(&self) -> String {
        self.workflow().next_target().to_string()
    }

    pub fn open_confirmation(&self) -> Result<(), WorkflowError> {
        self.workflow().open_confirmation()
    }

    pub fn cancel(&self) -> Result<(), WorkflowError> {
        self.workflow().cancel()
    }

    /// Confirms the pending deletion and performs it.
    pub async fn confirm(&self) -> DeleteOutcome {
        let confirmed = self.workflow().confirm();
        let ticket = match confirmed {
            Ok(ticket) => ticket,
            Err(e) => {
                debug!("Ignoring delete confirmation: {e}");
                return DeleteOutcome::Ignored(e);
            }
        };

        // Releases the workflow if this future is dropped mid-request.
        let guard = scopeguard::guard(ticket, |ticket| {
            if self.workflow().abandon(&ticket).is_ok() {
                warn!(
                    "Delete attempt {} for conversation {} dropped before settling",
                    ticket.attempt, ticket.conversation_id
                );
            }
        });

        let result = self.send_delete(&guard).await;
        let ticket = ScopeGuard::into_inner(guard);

        let settled = self.workflow().settle(&ticket, result);
        match settled {
            Ok(Ok(())) => {
                info!("Conversation {} deleted", ticket.conversation_id);
                self.host.close();
                self.host.navigate(&self.config.conversations_path);
                self.host.refresh_listing();
                DeleteOutcome::Deleted
            }
            Ok(Err(e)) => {
                warn!(
                    "Failed to delete conversation {}: {e}",
                    ticket.conversation_id
                );
                self.host.notify_error(&self.config.failure_message);
                DeleteOutcome::Failed(e)
            }
            Err(e) => {
                warn!("Delete attempt {} settled out of order: {e}", ticket.attempt);
                DeleteOutcome::Ignored(e)
            }
        }
    }

    async fn send_delete(&self, ticket: &DeleteTicket) -> Result<(), DeleteError> {
        let url = self.config.delete_url(&ticket.conversation_id);
        info!(
            "Deleting conversation {} (attempt {})",
            ticket.conversation_id, ticket.attempt
        );
        let response = self.http_client.execute(HttpRequest::delete(url)).await?;
        if !response.is_success() {
            return Err(DeleteError::Status(response.status_code));
        }
        Ok(())
    }
}
