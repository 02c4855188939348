//! Notification list trait - external watch list driven by alliance membership

use async_trait::async_trait;
use thiserror::Error;

/// Tag identifying this module as the reason a name is on the list
pub const NOTIFY_TAG: &str = "alliance";

/// Errors from the notification-list gateway
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Notification gateway is gone")]
    Closed,
}

/// External notification-list gateway.
///
/// Adds and removes are idempotent from the caller's point of view: adding a
/// name already on the list, or removing an absent one, is a no-op. Delivery
/// guarantees belong to the implementation.
#[async_trait]
pub trait NotifyList: Send + Sync {
    async fn add(&self, name: &str, tag: &str) -> Result<(), NotifyError>;

    async fn remove(&self, name: &str, tag: &str) -> Result<(), NotifyError>;
}
