//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{AllianceMember, AllianceOrg, Organization};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Org Repository
// ============================================================================

/// One entry of the joined alliance listing (registry x org directory x members)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgListing {
    pub org: AllianceOrg,
    /// Display name from the org directory
    pub name: String,
    pub member_count: i64,
}

#[async_trait]
pub trait OrgRepository: Send + Sync {
    /// List all registered alliance orgs
    async fn find_all(&self) -> RepoResult<Vec<AllianceOrg>>;

    /// Register a new org. Fails with `DomainError::AlreadyMember` if a row
    /// for the same org id already exists.
    async fn insert(&self, org: &AllianceOrg) -> RepoResult<()>;

    /// Delete an org registration. Returns `false` if no row existed.
    async fn delete(&self, org_id: i32) -> RepoResult<bool>;

    /// Joined listing with display names and member counts, ordered by org
    /// name ascending. Orgs whose member rows are all gone do not appear.
    async fn list_with_members(&self) -> RepoResult<Vec<OrgListing>>;
}

// ============================================================================
// Member Repository
// ============================================================================

/// All row mutations one reconciliation pass wants to apply for one org.
///
/// The repository applies the whole diff inside a single transaction: either
/// every mutation is committed or none is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterDiff {
    /// The org being reconciled
    pub org_id: i32,
    /// Names first observed in the fetched roster, inserted with mode `org`.
    /// The insert is an upsert on name so that a name already live under a
    /// different org is re-pointed, never duplicated.
    pub inserts: Vec<(String, i32)>,
    /// Manually-added names confirmed by the roster, promoted `add` -> `org`
    pub promotions: Vec<String>,
    /// Rank refreshes for names already stored
    pub rank_updates: Vec<(String, i32)>,
    /// Stored `org`-mode names of this org no longer present upstream,
    /// hard-deleted
    pub removals: Vec<String>,
}

impl RosterDiff {
    pub fn new(org_id: i32) -> Self {
        Self {
            org_id,
            ..Self::default()
        }
    }

    /// Whether the diff would touch any row at all
    pub fn is_noop(&self) -> bool {
        self.inserts.is_empty()
            && self.promotions.is_empty()
            && self.rank_updates.is_empty()
            && self.removals.is_empty()
    }
}

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Load every member row, across all orgs
    async fn find_all(&self) -> RepoResult<Vec<AllianceMember>>;

    /// Load the member rows of one org
    async fn find_by_org(&self, org_id: i32) -> RepoResult<Vec<AllianceMember>>;

    /// Load every non-tombstoned row, used to rebuild the membership index
    async fn find_active(&self) -> RepoResult<Vec<AllianceMember>>;

    /// Apply one org's reconciliation diff atomically
    async fn apply_diff(&self, diff: &RosterDiff) -> RepoResult<()>;

    /// Delete all member rows of one org, returning how many were removed
    async fn delete_by_org(&self, org_id: i32) -> RepoResult<u64>;
}

// ============================================================================
// Org Directory (read-only, owned by the org-list importer)
// ============================================================================

#[async_trait]
pub trait OrgDirectory: Send + Sync {
    /// Look up an organization by its external id
    async fn find_by_id(&self, id: i32) -> RepoResult<Option<Organization>>;
}
