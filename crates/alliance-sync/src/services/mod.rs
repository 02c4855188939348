//! Sync engine services
//!
//! This module contains the service layer of the roster synchronization
//! engine: the dependency container, the membership index, the per-org
//! reconciler, the org registry, and the batch orchestrator.

pub mod context;
pub mod error;
pub mod index;
pub mod reconciler;
pub mod registry;
pub mod sync;

#[cfg(test)]
pub(crate) mod testing;

// Re-export all services for convenience
pub use context::ServiceContext;
pub use error::{ServiceError, ServiceResult};
pub use index::MembershipIndex;
pub use reconciler::{RosterReconciler, RosterSummary};
pub use registry::{AllianceRegistry, RemovedOrg};
pub use sync::{OrgOutcome, RosterSyncService, SyncReport};
