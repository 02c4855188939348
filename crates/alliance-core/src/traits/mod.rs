//! Traits (ports) the sync engine requires from its collaborators

mod directory;
mod notify;
mod repositories;

pub use directory::{DirectoryClient, DirectoryError};
pub use notify::{NotifyError, NotifyList, NOTIFY_TAG};
pub use repositories::{
    MemberRepository, OrgDirectory, OrgListing, OrgRepository, RepoResult, RosterDiff,
};
