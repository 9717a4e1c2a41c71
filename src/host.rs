//! Outbound signals from the panel to whatever hosts it.

use std::sync::Arc;
use tokio::sync::broadcast;

// The size of the broadcast channel buffer.
const CHANNEL_CAPACITY: usize = 16;

/// Fire-and-forget callbacks the host provides. None of them may block.
pub trait PanelHost: Send + Sync {
    /// Close the drawer.
    fn close(&self);
    /// Navigate to `path`.
    fn navigate(&self, path: &str);
    /// Refresh any cached conversation listing.
    fn refresh_listing(&self);
    /// Show a transient failure notification.
    fn notify_error(&self, message: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelClosed;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequested {
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRefreshRequested;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
}

// Macro to generate EventBus fields and constructor
macro_rules! define_event_bus {
    ($(($field:ident, $type:ty)),* $(,)?) => {
        /// Typed event bus with one broadcast channel per signal.
        #[derive(Debug)]
        pub struct EventBus {
            $(
                pub $field: broadcast::Sender<$type>,
            )*
        }

        impl EventBus {
            pub fn new() -> Self {
                Self {
                    $(
                        $field: broadcast::channel(CHANNEL_CAPACITY).0,
                    )*
                }
            }
        }
    };
}

define_event_bus! {
    (panel_closed, Arc<PanelClosed>),
    (navigation, Arc<NavigationRequested>),
    (listing_refresh, Arc<ListingRefreshRequested>),
    (notification, Arc<Notification>),
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

// Sends fail only when nobody is subscribed, which is fine for signals.
impl PanelHost for EventBus {
    fn close(&self) {
        let _ = self.panel_closed.send(Arc::new(PanelClosed));
    }

    fn navigate(&self, path: &str) {
        let _ = self.navigation.send(Arc::new(NavigationRequested {
            path: path.to_string(),
        }));
    }

    fn refresh_listing(&self) {
        let _ = self.listing_refresh.send(Arc::new(ListingRefreshRequested));
    }

    fn notify_error(&self, message: &str) {
        let _ = self.notification.send(Arc::new(Notification {
            message: message.to_string(),
        }));
    }
}
