// Re-export core modules so hosts only need this crate
pub use drawer_core::{conversation, memo, net, projection, workflow};

pub mod config;
pub mod deletion;
pub mod error;
pub mod host;
pub mod panel;
pub mod presence;

pub use config::DrawerConfig;
pub use deletion::{DeleteOutcome, DeletionController};
pub use drawer_core::WorkflowError;
pub use error::DeleteError;
pub use host::{EventBus, PanelHost};
pub use panel::{PanelView, ProfilePanel};
pub use presence::PresenceFeed;
