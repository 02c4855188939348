//! Guild roster reconciler
//!
//! Applies one fetched roster snapshot to the membership store: inserts
//! newly-observed members, promotes confirmed manual entries, refreshes
//! ranks, and sweeps members that left the org. All row mutations for one
//! org commit as a single transaction; membership-index and
//! notification-list effects run only after the commit succeeds.

use std::collections::HashMap;

use tracing::{info, instrument};

use alliance_core::entities::{AllianceMember, MemberMode, Roster};
use alliance_core::error::DomainError;
use alliance_core::traits::{RosterDiff, NOTIFY_TAG};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Outcome of one org's reconciliation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterSummary {
    pub org_id: i32,
    /// Display name reported by the directory, used for completion notices
    pub org_name: String,
    /// Members first observed this pass
    pub added: usize,
    /// Previously-stored members confirmed by this roster
    pub updated: usize,
    /// Members hard-deleted because they left the org
    pub removed: usize,
}

/// Roster reconciler
pub struct RosterReconciler<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RosterReconciler<'a> {
    /// Create a new RosterReconciler
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Reconcile one org's fetched roster against the store.
    ///
    /// A roster with zero members is rejected as a transient directory
    /// glitch and the org's stored state is left untouched.
    #[instrument(skip(self, roster), fields(org_id = roster.org_id, org = %roster.org_name))]
    pub async fn reconcile(&self, roster: &Roster) -> ServiceResult<RosterSummary> {
        if roster.is_empty() {
            return Err(DomainError::EmptyRoster(roster.org_name.clone()).into());
        }

        // Snapshot every current row once, keyed by name. Names are unique
        // across the whole store, not just within this org.
        let mut stored: HashMap<String, AllianceMember> = self
            .ctx
            .member_repo()
            .find_all()
            .await?
            .into_iter()
            .map(|m| (m.name.clone(), m))
            .collect();

        let mut diff = RosterDiff::new(roster.org_id);
        // index refreshes, applied after commit
        let mut confirmed: Vec<(String, i32)> = Vec::new();
        // gateway adds, only for rows that actually change
        let mut notify_adds: Vec<String> = Vec::new();
        // tombstoned names the directory still lists
        let mut dropped: Vec<String> = Vec::new();

        for member in &roster.members {
            // the bot itself must never become a tracked alliance member
            if member.name.eq_ignore_ascii_case(self.ctx.bot_name()) {
                continue;
            }

            match stored.remove(&member.name) {
                Some(row) => match row.mode {
                    MemberMode::Del => dropped.push(member.name.clone()),
                    MemberMode::Add => {
                        // manual entry confirmed upstream, sync owns it now
                        diff.promotions.push(member.name.clone());
                        diff.rank_updates.push((member.name.clone(), member.rank));
                        notify_adds.push(member.name.clone());
                        confirmed.push((member.name.clone(), member.rank));
                    }
                    MemberMode::Org => {
                        diff.rank_updates.push((member.name.clone(), member.rank));
                        confirmed.push((member.name.clone(), member.rank));
                    }
                },
                None => {
                    diff.inserts.push((member.name.clone(), member.rank));
                    notify_adds.push(member.name.clone());
                    confirmed.push((member.name.clone(), member.rank));
                }
            }
        }

        // Sweep rows of this org the roster no longer lists. Manual entries
        // are never auto-removed and tombstones stay put; rows of other orgs
        // are not ours to touch.
        for (name, row) in &stored {
            if row.org_id == roster.org_id && row.mode == MemberMode::Org {
                diff.removals.push(name.clone());
            }
        }

        self.ctx.member_repo().apply_diff(&diff).await?;

        // The transaction is durable from here on; derived cache and
        // external list follow.
        for (name, rank) in &confirmed {
            self.ctx.index().insert(name, *rank);
        }
        for name in &notify_adds {
            self.ctx.notify().add(name, NOTIFY_TAG).await.ok();
        }
        for name in &dropped {
            // tombstones stay off the list; tell the gateway only on the
            // pass that actually drops the name from the index
            if self.ctx.index().remove(name) {
                self.ctx.notify().remove(name, NOTIFY_TAG).await.ok();
            }
        }
        for name in &diff.removals {
            self.ctx.index().remove(name);
            self.ctx.notify().remove(name, NOTIFY_TAG).await.ok();
        }

        let summary = RosterSummary {
            org_id: roster.org_id,
            org_name: roster.org_name.clone(),
            added: diff.inserts.len(),
            updated: diff.rank_updates.len(),
            removed: diff.removals.len(),
        };

        info!(
            added = summary.added,
            updated = summary.updated,
            removed = summary.removed,
            "Finished roster update for {}",
            summary.org_name
        );

        Ok(summary)
    }
}
