use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeleteError {
    #[error("delete request failed: {0}")]
    Transport(#[from] anyhow::Error),
    #[error("delete request rejected with status {0}")]
    Status(u16),
}
