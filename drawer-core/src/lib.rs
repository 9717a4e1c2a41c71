pub mod conversation;
pub mod error;
pub mod memo;
pub mod net;
pub mod presence;
pub mod projection;
pub mod workflow;

pub use conversation::{Conversation, ConversationKind, User, other_user};
pub use error::WorkflowError;
pub use presence::{ActiveSet, PresenceStatus, resolve_presence};
pub use projection::{Avatar, PanelMetadata, Projector, project};
pub use workflow::{DeleteTicket, DeletionState, DeletionWorkflow};
