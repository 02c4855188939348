//! Directory client trait - async fetch of an org roster by org id

use async_trait::async_trait;
use thiserror::Error;

use crate::entities::Roster;

/// Errors from the remote people directory
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Roster request failed: {0}")]
    Request(String),

    #[error("Directory returned status {0}")]
    Status(u16),

    #[error("Malformed roster payload: {0}")]
    Decode(String),
}

/// Remote people-directory client.
///
/// A failed fetch is treated by the sync engine as "no reconciliation for
/// this org this pass"; it never aborts a batch.
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// Fetch the current roster of `org_id`. `force_refresh` bypasses any
    /// directory-side caching.
    async fn fetch_roster(&self, org_id: i32, force_refresh: bool)
        -> Result<Roster, DirectoryError>;
}
