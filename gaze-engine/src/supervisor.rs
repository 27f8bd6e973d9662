//! Last-resort surfacing of collaborator errors

use std::collections::BTreeSet;

use tracing::{debug, error, warn};

use crate::collaborators::{Notification, NotificationId, Services, Sound};
use crate::error::ServiceError;

/// Surfaces errors to the user and holds input until they are acknowledged
///
/// There is no retry or recovery here: input is suspended, the error is
/// shown, and input resumes once the user acknowledges the notification.
#[derive(Debug, Clone, Default)]
pub struct ErrorSupervisor {
    next_id: u64,
    awaiting: BTreeSet<NotificationId>,
}

impl ErrorSupervisor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suspend input, sound the error cue and show the error
    pub fn on_error(&mut self, err: &ServiceError, services: &mut Services) -> NotificationId {
        error!("Error reported by {}: {}", err.source_name, err.message);

        services.input.suspend();
        services.audio.play(Sound::Error);
        self.notify(Notification::error("Uh-oh!", err.message.clone()), services)
    }

    /// Show a notification; input resumes when it is acknowledged
    pub fn notify(&mut self, notification: Notification, services: &mut Services) -> NotificationId {
        self.next_id += 1;
        let id = NotificationId(self.next_id);
        self.awaiting.insert(id);
        services.notifier.notify(id, notification);
        id
    }

    /// Dismiss a notification, resuming input once none are left open
    ///
    /// Returns false (and does nothing) for unknown or already acknowledged ids.
    pub fn acknowledge(&mut self, id: NotificationId, services: &mut Services) -> bool {
        if !self.awaiting.remove(&id) {
            warn!("Acknowledgement for unknown notification {}", id);
            return false;
        }
        if self.awaiting.is_empty() {
            services.input.resume();
        } else {
            debug!("{} notifications still open, input stays suspended", self.awaiting.len());
        }
        true
    }

    /// Notifications shown but not yet acknowledged
    pub fn awaiting_acknowledgement(&self) -> usize {
        self.awaiting.len()
    }
}
