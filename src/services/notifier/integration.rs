//! Host Event Hook Integration
//!
//! Glue between the host's issue lifecycle callbacks and the notifier.
//! Formatting and channel resolution run on the caller's thread; the HTTP
//! call is spawned so the host's save path never waits on Telegram.

use tokio::task::JoinHandle;
use tracker_telegram_core::{Issue, Journal, NotificationEvent, NotificationSink};

use super::service::NotifierService;
use super::types::DeliveryOutcome;

/// Called by the host after an issue is created or edited.
///
/// Returns the handle of the spawned delivery, or `None` when nothing was
/// sent: the event was suppressed, or no Tokio runtime is available.
/// Callers are free to drop the handle.
pub fn dispatch_on_event(
    event: NotificationEvent,
    service: &NotifierService,
) -> Option<JoinHandle<DeliveryOutcome>> {
    let handle = match tokio::runtime::Handle::try_current() {
        Ok(handle) => handle,
        Err(_) => {
            tracing::warn!(
                "No async runtime; dropping Telegram notification for issue #{}",
                event.issue().id
            );
            return None;
        }
    };

    let delivery = match service.prepare(&event) {
        Ok(delivery) => delivery,
        Err(reason) => {
            tracing::debug!(
                "Telegram notification for issue #{} {} in {} suppressed: {}",
                event.issue().id,
                event.label(),
                event.issue().project.name,
                reason
            );
            return None;
        }
    };

    tracing::debug!(
        "Dispatching Telegram notification for issue #{} {} in {} (chat id resolved: {})",
        delivery.issue_id,
        event.label(),
        delivery.project,
        delivery.message.chat_id.is_some()
    );

    let service = service.clone();
    // Fire-and-forget: the host does not wait for delivery
    Some(handle.spawn(async move { service.deliver(delivery).await }))
}

impl NotificationSink for NotifierService {
    fn on_issue_created(&self, issue: &Issue) {
        dispatch_on_event(
            NotificationEvent::Created {
                issue: issue.clone(),
            },
            self,
        );
    }

    fn on_issue_updated(&self, issue: &Issue, journal: &Journal) {
        dispatch_on_event(
            NotificationEvent::Edited {
                issue: issue.clone(),
                journal: journal.clone(),
            },
            self,
        );
    }
}
