//! Confirmation-gated deletion state machine.
//!
//! The machine performs no I/O. The caller receives a [`DeleteTicket`] when
//! a confirm is accepted, performs the request, and hands the ticket back to
//! [`DeletionWorkflow::settle`]. Only the ticket of the outstanding attempt
//! is accepted, so every attempt settles exactly once.

use crate::error::WorkflowError;
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeletionState {
    #[default]
    Idle,
    ConfirmPending,
    InFlight,
}

/// The outstanding delete request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteTicket {
    pub conversation_id: String,
    pub attempt: u64,
}

#[derive(Debug, Clone)]
pub struct DeletionWorkflow {
    conversation_id: String,
    state: DeletionState,
    attempts: u64,
    outstanding: Option<u64>,
    /// Target to switch to once the outstanding request is released.
    pending_target: Option<String>,
}

impl DeletionWorkflow {
    pub fn new(conversation_id: impl Into<String>) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            state: DeletionState::Idle,
            attempts: 0,
            outstanding: None,
            pending_target: None,
        }
    }

    pub fn state(&self) -> DeletionState {
        self.state
    }

    pub fn conversation_id(&self) -> &str {
        &self.conversation_id
    }

    pub fn is_in_flight(&self) -> bool {
        self.state == DeletionState::InFlight
    }

    /// Whether the confirmation surface should be visible.
    pub fn is_confirmation_open(&self) -> bool {
        matches!(
            self.state,
            DeletionState::ConfirmPending | DeletionState::InFlight
        )
    }

    /// Number of delete requests issued so far.
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    /// Points the workflow at another conversation.
    ///
    /// While a request is outstanding the switch is deferred until that
    /// request settles or is abandoned, and `false` is returned. The
    /// outstanding ticket keeps its original target.
    pub fn retarget(&mut self, conversation_id: impl Into<String>) -> bool {
        let conversation_id = conversation_id.into();
        if self.is_in_flight() {
            debug!(
                "Deferring switch from {} to {} until attempt {} settles",
                self.conversation_id, conversation_id, self.attempts
            );
            self.pending_target = Some(conversation_id);
            return false;
        }
        self.conversation_id = conversation_id;
        self.state = DeletionState::Idle;
        true
    }

    /// Conversation the next confirm will address.
    pub fn next_target(&self) -> &str {
        self.pending_target
            .as_deref()
            .unwrap_or(&self.conversation_id)
    }

    pub fn open_confirmation(&mut self) -> Result<(), WorkflowError> {
        match self.state {
            DeletionState::InFlight => Err(WorkflowError::InFlight),
            DeletionState::Idle | DeletionState::ConfirmPending => {
                self.state = DeletionState::ConfirmPending;
                Ok(())
            }
        }
    }

    /// Dismisses the confirmation without deleting. No-op when idle.
    pub fn cancel(&mut self) -> Result<(), WorkflowError> {
        match self.state {
            DeletionState::InFlight => Err(WorkflowError::InFlight),
            DeletionState::Idle | DeletionState::ConfirmPending => {
                self.state = DeletionState::Idle;
                Ok(())
            }
        }
    }

    pub fn confirm(&mut self) -> Result<DeleteTicket, WorkflowError> {
        match self.state {
            DeletionState::InFlight => Err(WorkflowError::InFlight),
            DeletionState::Idle => Err(WorkflowError::NotConfirming(self.state)),
            DeletionState::ConfirmPending => {
                self.attempts += 1;
                self.outstanding = Some(self.attempts);
                self.state = DeletionState::InFlight;
                debug!(
                    "Delete attempt {} for conversation {} is in flight",
                    self.attempts, self.conversation_id
                );
                Ok(DeleteTicket {
                    conversation_id: self.conversation_id.clone(),
                    attempt: self.attempts,
                })
            }
        }
    }

    /// Records the outcome of the outstanding request and returns to idle.
    ///
    /// The outcome is passed through so callers can chain on it.
    pub fn settle<T, E>(
        &mut self,
        ticket: &DeleteTicket,
        outcome: Result<T, E>,
    ) -> Result<Result<T, E>, WorkflowError> {
        self.release(ticket)?;
        debug!(
            "Delete attempt {} settled ({})",
            ticket.attempt,
            if outcome.is_ok() { "ok" } else { "failed" }
        );
        Ok(outcome)
    }

    /// Releases the outstanding request without an outcome, used when the
    /// driver is dropped before the request settles.
    pub fn abandon(&mut self, ticket: &DeleteTicket) -> Result<(), WorkflowError> {
        self.release(ticket)?;
        debug!("Delete attempt {} abandoned", ticket.attempt);
        Ok(())
    }

    fn release(&mut self, ticket: &DeleteTicket) -> Result<(), WorkflowError> {
        if self.outstanding != Some(ticket.attempt) {
            return Err(WorkflowError::StaleTicket {
                attempt: ticket.attempt,
            });
        }
        self.outstanding = None;
        self.state = DeletionState::Idle;
        if let Some(target) = self.pending_target.take() {
            debug!("Switching delete target to {target}");
            self.conversation_id = target;
        }
        Ok(())
    }
}
