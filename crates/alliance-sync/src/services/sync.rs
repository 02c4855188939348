//! Roster sync orchestrator
//!
//! Fans out one fetch-then-reconcile unit per alliance org and resolves
//! exactly once after every unit has settled. Failures stay contained to
//! their own org: a dead directory, a malformed payload, a timed-out fetch,
//! or a rolled-back transaction is logged, counted, and never aborts the
//! rest of the batch.

use tokio::task::JoinSet;
use tokio::time::timeout;
use tracing::{error, info, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::reconciler::{RosterReconciler, RosterSummary};

/// How one org's sync unit settled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrgOutcome {
    /// Roster fetched and reconciled
    Reconciled(RosterSummary),
    /// Roster fetched but empty; stored state left untouched
    Skipped { org_id: i32 },
    /// Fetch failed, timed out, or the reconciliation pass rolled back
    Failed { org_id: i32 },
}

impl OrgOutcome {
    /// Whether the unit ended in a reconciled roster
    pub fn is_reconciled(&self) -> bool {
        matches!(self, Self::Reconciled(_))
    }
}

/// Tally of one sync batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// How many orgs the batch covered
    pub orgs: usize,
    pub reconciled: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl SyncReport {
    fn record(&mut self, outcome: &OrgOutcome) {
        match outcome {
            OrgOutcome::Reconciled(_) => self.reconciled += 1,
            OrgOutcome::Skipped { .. } => self.skipped += 1,
            OrgOutcome::Failed { .. } => self.failed += 1,
        }
    }
}

/// Roster sync orchestrator
#[derive(Clone)]
pub struct RosterSyncService {
    ctx: ServiceContext,
}

impl RosterSyncService {
    /// Create a new RosterSyncService
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Synchronize every alliance org's roster.
    ///
    /// The returned future resolves exactly once, after all fetch+reconcile
    /// units have settled; with zero registered orgs it resolves
    /// immediately. Callers wanting a completion action compose it onto this
    /// future instead of passing a callback.
    #[instrument(skip(self))]
    pub async fn sync_all(&self) -> ServiceResult<SyncReport> {
        let orgs = self.ctx.org_repo().find_all().await?;

        info!(orgs = orgs.len(), "Starting alliance roster update");

        let mut report = SyncReport {
            orgs: orgs.len(),
            ..SyncReport::default()
        };

        if orgs.is_empty() {
            info!("Finished alliance roster update");
            return Ok(report);
        }

        let mut units = JoinSet::new();
        for org in orgs {
            let ctx = self.ctx.clone();
            units.spawn(async move { sync_org(&ctx, org.org_id).await });
        }

        // Draining the JoinSet is the single owner of batch completion:
        // every unit is observed settling exactly once.
        while let Some(joined) = units.join_next().await {
            match joined {
                Ok(outcome) => report.record(&outcome),
                Err(e) => {
                    error!(error = %e, "Roster sync unit panicked");
                    report.failed += 1;
                }
            }
        }

        info!(
            reconciled = report.reconciled,
            skipped = report.skipped,
            failed = report.failed,
            "Finished alliance roster update"
        );

        Ok(report)
    }

    /// Synchronize a single org's roster: a batch of one, used after a
    /// manual org add so the caller can await that org's completion.
    #[instrument(skip(self))]
    pub async fn sync_one(&self, org_id: i32) -> OrgOutcome {
        sync_org(&self.ctx, org_id).await
    }
}

/// One org's fetch-then-reconcile unit. Infallible by design: every failure
/// mode is folded into the outcome so the batch can keep counting.
async fn sync_org(ctx: &ServiceContext, org_id: i32) -> OrgOutcome {
    let fetched = timeout(
        ctx.fetch_timeout(),
        ctx.directory().fetch_roster(org_id, true),
    )
    .await;

    let roster = match fetched {
        Err(_) => {
            error!(org_id, "Roster fetch timed out");
            return OrgOutcome::Failed { org_id };
        }
        Ok(Err(e)) => {
            error!(org_id, error = %e, "Error downloading the guild roster");
            return OrgOutcome::Failed { org_id };
        }
        Ok(Ok(roster)) => roster,
    };

    match RosterReconciler::new(ctx).reconcile(&roster).await {
        Ok(summary) => OrgOutcome::Reconciled(summary),
        Err(e) if e.is_empty_roster() => {
            error!(org_id, "{e}");
            OrgOutcome::Skipped { org_id }
        }
        Err(e) => {
            error!(org_id, error = %e, "Roster reconciliation failed");
            OrgOutcome::Failed { org_id }
        }
    }
}
