//! Fire-and-forget dispatch to the host notification facility.
//!
//! The host shell implements [`Notifier`] over its local-notification
//! plugin. Permission is requested once at startup; denial downgrades every
//! later dispatch to a logged no-op. The timer state machine never waits on
//! or reacts to the outcome of a dispatch.

use std::sync::Arc;

use tracing::{debug, warn};

/// Channel the completion alerts are posted to.
pub const TIMER_CHANNEL_ID: &str = "timer_completion";
pub const TIMER_CHANNEL_NAME: &str = "Timer Completion";
/// High importance, for sound and vibration.
pub const TIMER_CHANNEL_IMPORTANCE: u8 = 5;

const TITLE: &str = "Timer Completed!";

/// Outcome of the host permission prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, uniffi::Enum)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// Host-side notification facility.
#[uniffi::export(with_foreign)]
pub trait Notifier: Send + Sync {
    fn request_permission(&self) -> PermissionStatus;
    fn create_channel(&self, id: String, name: String, importance: u8);
    fn schedule(&self, title: String, body: String, channel_id: String);
}

/// Permission-aware wrapper the brew session dispatches through.
#[derive(uniffi::Object)]
pub struct NotificationDispatch {
    notifier: Arc<dyn Notifier>,
    granted: bool,
}

#[uniffi::export]
impl NotificationDispatch {
    /// Request permission and, when granted, set up the completion channel.
    #[uniffi::constructor]
    pub fn init(notifier: Arc<dyn Notifier>) -> Arc<Self> {
        let granted = notifier.request_permission() == PermissionStatus::Granted;
        if granted {
            notifier.create_channel(
                TIMER_CHANNEL_ID.to_string(),
                TIMER_CHANNEL_NAME.to_string(),
                TIMER_CHANNEL_IMPORTANCE,
            );
        } else {
            warn!("notification permission not granted; completion alerts disabled");
        }
        Arc::new(NotificationDispatch { notifier, granted })
    }

    /// Alert for a completed pour stage with more stages left.
    pub fn pour_complete(&self, pour: u32, of: u32) {
        self.dispatch(format!("Pour {pour} of {of} complete"));
    }

    /// Alert for the end of the last stage.
    pub fn brew_complete(&self) {
        self.dispatch("Brewing Complete".to_string());
    }
}

impl NotificationDispatch {
    fn dispatch(&self, body: String) {
        if !self.granted {
            debug!(%body, "notification skipped, permission denied");
            return;
        }
        debug!(%body, "scheduling notification");
        self.notifier
            .schedule(TITLE.to_string(), body, TIMER_CHANNEL_ID.to_string());
    }
}
