//! # alliance-core
//!
//! Domain layer containing entities, the membership-mode state machine, and
//! the traits (ports) the sync engine needs from its collaborators.
//! This crate has zero dependencies on infrastructure (database, HTTP, etc.).

pub mod entities;
pub mod error;
pub mod traits;

// Re-export commonly used types at crate root
pub use entities::{
    AllianceMember, AllianceOrg, MemberMode, Organization, Roster, RosterMember,
    UNRANKED_GUILD_RANK,
};
pub use error::DomainError;
pub use traits::{
    DirectoryClient, DirectoryError, MemberRepository, NotifyError, NotifyList, OrgDirectory,
    OrgListing, OrgRepository, RepoResult, RosterDiff, NOTIFY_TAG,
};
