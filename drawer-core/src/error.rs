use crate::workflow::DeletionState;
use thiserror::Error;

/// Transitions the deletion workflow refuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("a delete request is already in flight")]
    InFlight,
    #[error("cannot confirm deletion from {0:?}, the confirmation is not open")]
    NotConfirming(DeletionState),
    #[error("delete attempt {attempt} has already settled")]
    StaleTicket { attempt: u64 },
}
