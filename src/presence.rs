use drawer_core::presence::ActiveSet;
use log::debug;
use std::sync::Arc;
use tokio::sync::watch;

/// Process-wide source of active-set snapshots.
///
/// Every update publishes a whole new snapshot; readers keep whichever
/// `Arc<ActiveSet>` they took and never observe a partial update. Clones
/// share the same channel.
#[derive(Debug, Clone)]
pub struct PresenceFeed {
    sender: Arc<watch::Sender<Arc<ActiveSet>>>,
}

impl Default for PresenceFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl PresenceFeed {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(Arc::new(ActiveSet::new()));
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Replaces the whole member list, as on a fresh subscription.
    pub fn set<I, S>(&self, members: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let snapshot: ActiveSet = members.into_iter().collect();
        debug!("Presence snapshot replaced ({} active)", snapshot.len());
        self.sender.send_replace(Arc::new(snapshot));
    }

    pub fn add(&self, identity: impl Into<String>) {
        let identity = identity.into();
        debug!("Presence member added: {identity}");
        self.sender
            .send_modify(|current| *current = Arc::new(current.with_member(identity)));
    }

    pub fn remove(&self, identity: &str) {
        debug!("Presence member removed: {identity}");
        self.sender
            .send_modify(|current| *current = Arc::new(current.without_member(identity)));
    }

    pub fn snapshot(&self) -> Arc<ActiveSet> {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<ActiveSet>> {
        self.sender.subscribe()
    }
}
