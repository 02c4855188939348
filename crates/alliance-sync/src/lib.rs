//! # alliance-sync
//!
//! Application layer of the alliance roster synchronization engine: the
//! per-org reconciler, the org registry, the batch sync orchestrator, the
//! in-memory membership index, and the channel-backed notification-list
//! gateway. The binary in this crate wires everything into a daemon with a
//! recurring sync loop.

pub mod notify;
pub mod services;

// Re-export commonly used types at crate root
pub use notify::{ChannelNotifyList, NotifyCommand};
pub use services::{
    AllianceRegistry, MembershipIndex, OrgOutcome, RemovedOrg, RosterReconciler,
    RosterSummary, RosterSyncService, ServiceContext, ServiceError, ServiceResult, SyncReport,
};
