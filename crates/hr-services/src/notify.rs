//! Notification sink.
//!
//! Fire-and-forget internal messages: the sink only enqueues rows, delivery
//! is the transport's problem. Consumed by the leave, discipline and
//! document workflows.

use std::sync::Arc;

use hr_auth::Principal;
use hr_core::traits::Id;
use hr_core::{HrError, HrResult};
use hr_models::Notification;

use crate::store::Store;

pub struct Notifier {
    store: Arc<dyn Store>,
}

impl Notifier {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Enqueue a notification for one user.
    pub async fn notify(
        &self,
        user_id: Id,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> HrResult<Notification> {
        let notification = Notification::new(user_id, title, message);
        tracing::debug!(user_id, title = %notification.title, "enqueueing notification");
        self.store.insert_notification(notification).await
    }

    /// Enqueue a notification carrying a deep link.
    pub async fn notify_with_link(
        &self,
        user_id: Id,
        title: impl Into<String>,
        message: impl Into<String>,
        link: impl Into<String>,
    ) -> HrResult<Notification> {
        let notification = Notification::new(user_id, title, message).with_link(link);
        self.store.insert_notification(notification).await
    }

    /// The caller's own notifications, newest first.
    pub async fn list(&self, principal: &Principal) -> HrResult<Vec<Notification>> {
        self.store.notifications_for_user(principal.user_id).await
    }

    /// Mark one of the caller's notifications as read. Owner only.
    pub async fn mark_read(&self, principal: &Principal, id: Id) -> HrResult<Notification> {
        let notification = self
            .store
            .notification_by_id(id)
            .await?
            .ok_or_else(|| HrError::not_found("Notification", id))?;
        if notification.user_id != principal.user_id {
            return Err(HrError::forbidden("not your notification"));
        }
        self.store.mark_notification_read(id).await?;
        Ok(Notification {
            is_read: true,
            ..notification
        })
    }
}
