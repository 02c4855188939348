//! Service context - dependency container for services
//!
//! Holds the repositories, external collaborators, and the membership index
//! the sync engine services operate on.

use std::sync::Arc;
use std::time::Duration;

use alliance_core::traits::{
    DirectoryClient, MemberRepository, NotifyList, OrgDirectory, OrgRepository,
};

use super::index::MembershipIndex;

/// Service context containing all dependencies
///
/// Cloning is cheap; every field is shared. Per-org sync units each get a
/// clone so they can run concurrently.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    org_repo: Arc<dyn OrgRepository>,
    member_repo: Arc<dyn MemberRepository>,
    org_directory: Arc<dyn OrgDirectory>,

    // External collaborators
    directory: Arc<dyn DirectoryClient>,
    notify: Arc<dyn NotifyList>,

    // Derived read cache
    index: Arc<MembershipIndex>,

    // Bot identity, skipped during reconciliation
    bot_name: String,
    // Per-fetch timeout; a timed-out fetch counts as a failed one
    fetch_timeout: Duration,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        org_repo: Arc<dyn OrgRepository>,
        member_repo: Arc<dyn MemberRepository>,
        org_directory: Arc<dyn OrgDirectory>,
        directory: Arc<dyn DirectoryClient>,
        notify: Arc<dyn NotifyList>,
        index: Arc<MembershipIndex>,
        bot_name: impl Into<String>,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            org_repo,
            member_repo,
            org_directory,
            directory,
            notify,
            index,
            bot_name: bot_name.into(),
            fetch_timeout,
        }
    }

    /// Get the alliance org repository
    pub fn org_repo(&self) -> &dyn OrgRepository {
        self.org_repo.as_ref()
    }

    /// Get the member repository
    pub fn member_repo(&self) -> &dyn MemberRepository {
        self.member_repo.as_ref()
    }

    /// Get the read-only org directory
    pub fn org_directory(&self) -> &dyn OrgDirectory {
        self.org_directory.as_ref()
    }

    /// Get the remote people-directory client
    pub fn directory(&self) -> &dyn DirectoryClient {
        self.directory.as_ref()
    }

    /// Get the notification-list gateway
    pub fn notify(&self) -> &dyn NotifyList {
        self.notify.as_ref()
    }

    /// Get the membership index
    pub fn index(&self) -> &MembershipIndex {
        self.index.as_ref()
    }

    /// The bot's own character name
    pub fn bot_name(&self) -> &str {
        &self.bot_name
    }

    /// Per-fetch timeout for roster downloads
    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("bot_name", &self.bot_name)
            .field("fetch_timeout", &self.fetch_timeout)
            .field("index_len", &self.index.len())
            .finish()
    }
}
