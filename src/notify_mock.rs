use std::sync::Mutex;

use crate::notify::{Notifier, PermissionStatus};

/// One captured `schedule` call.
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduledNote {
    pub title: String,
    pub body: String,
    pub channel_id: String,
}

/// In-memory [`Notifier`] that records instead of alerting.
#[derive(Debug, Default)]
pub struct MockNotifier {
    granted: bool,
    pub channels: Mutex<Vec<String>>,
    pub scheduled: Mutex<Vec<ScheduledNote>>,
}

impl MockNotifier {
    pub fn granted() -> Self {
        MockNotifier {
            granted: true,
            ..Default::default()
        }
    }

    pub fn denied() -> Self {
        MockNotifier::default()
    }

    /// Bodies of every scheduled notification, in dispatch order.
    pub fn bodies(&self) -> Vec<String> {
        self.scheduled
            .lock()
            .unwrap()
            .iter()
            .map(|note| note.body.clone())
            .collect()
    }
}

impl Notifier for MockNotifier {
    fn request_permission(&self) -> PermissionStatus {
        if self.granted {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        }
    }

    fn create_channel(&self, id: String, _name: String, _importance: u8) {
        self.channels.lock().unwrap().push(id);
    }

    fn schedule(&self, title: String, body: String, channel_id: String) {
        self.scheduled.lock().unwrap().push(ScheduledNote {
            title,
            body,
            channel_id,
        });
    }
}
