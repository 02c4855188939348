//! Alliance org registry
//!
//! CRUD over which organizations are members of the alliance. Removing an
//! org cascades: its member rows are deleted, each name leaves the
//! notification list and the membership index.

use tracing::{info, instrument};

use alliance_core::entities::{AllianceOrg, Organization};
use alliance_core::error::DomainError;
use alliance_core::traits::{OrgListing, NOTIFY_TAG};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Outcome of removing an org from the alliance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedOrg {
    pub org_id: i32,
    /// Display name, if the org directory still knows the org
    pub name: Option<String>,
    /// How many member rows were deleted along with the org
    pub members_removed: u64,
}

/// Alliance org registry service
pub struct AllianceRegistry<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AllianceRegistry<'a> {
    /// Create a new AllianceRegistry
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register an org in the alliance.
    ///
    /// The org must exist in the org directory. Returns the created
    /// registration together with the directory entry; the caller follows up
    /// with `RosterSyncService::sync_one` to pull the roster in and gets the
    /// completion signal from that future.
    #[instrument(skip(self))]
    pub async fn add_org(
        &self,
        org_id: i32,
        operator: &str,
    ) -> ServiceResult<(AllianceOrg, Organization)> {
        let organization = self
            .ctx
            .org_directory()
            .find_by_id(org_id)
            .await?
            .ok_or(DomainError::UnknownOrg(org_id))?;

        let org = AllianceOrg::new(org_id, operator);
        self.ctx.org_repo().insert(&org).await?;

        info!(org_id, org = %organization.name, operator, "Org added to the alliance");

        Ok((org, organization))
    }

    /// Remove an org and all of its members from the alliance
    #[instrument(skip(self))]
    pub async fn remove_org(&self, org_id: i32) -> ServiceResult<RemovedOrg> {
        if !self.ctx.org_repo().delete(org_id).await? {
            return Err(DomainError::NotMember(org_id).into());
        }

        let members = self.ctx.member_repo().find_by_org(org_id).await?;
        let members_removed = self.ctx.member_repo().delete_by_org(org_id).await?;

        for member in &members {
            self.ctx.notify().remove(&member.name, NOTIFY_TAG).await.ok();
            self.ctx.index().remove(&member.name);
        }

        let name = self
            .ctx
            .org_directory()
            .find_by_id(org_id)
            .await?
            .map(|o| o.name);

        info!(org_id, members_removed, "Org removed from the alliance");

        Ok(RemovedOrg {
            org_id,
            name,
            members_removed,
        })
    }

    /// Joined listing of all alliance orgs with member counts, ordered by
    /// org name ascending
    #[instrument(skip(self))]
    pub async fn list_orgs(&self) -> ServiceResult<Vec<OrgListing>> {
        Ok(self.ctx.org_repo().list_with_members().await?)
    }
}

#[cfg(test)]
mod tests {
    use alliance_core::entities::MemberMode;

    use crate::services::testing::{seeded_member, test_context, TestHarness};
    use crate::services::ServiceError;

    use super::*;

    #[tokio::test]
    async fn test_add_org_registers_known_org() {
        let harness = TestHarness::new();
        harness.store.seed_directory(10, "Troet", "Clan", 12);
        let ctx = test_context(&harness);

        let (org, organization) = AllianceRegistry::new(&ctx)
            .add_org(10, "Admin")
            .await
            .unwrap();

        assert_eq!(org.org_id, 10);
        assert_eq!(org.added_by.as_deref(), Some("Admin"));
        assert_eq!(organization.name, "Troet");
        assert_eq!(harness.store.org_ids(), vec![10]);
    }

    #[tokio::test]
    async fn test_add_org_rejects_unknown_org() {
        let harness = TestHarness::new();
        let ctx = test_context(&harness);

        let err = AllianceRegistry::new(&ctx)
            .add_org(77, "Admin")
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert!(harness.store.org_ids().is_empty());
    }

    #[tokio::test]
    async fn test_add_org_twice_is_a_conflict() {
        let harness = TestHarness::new();
        harness.store.seed_directory(10, "Troet", "Clan", 12);
        let ctx = test_context(&harness);
        let registry = AllianceRegistry::new(&ctx);

        registry.add_org(10, "Admin").await.unwrap();
        let err = registry.add_org(10, "Admin").await.unwrap_err();

        assert!(err.is_conflict());
        assert_eq!(harness.store.org_ids(), vec![10]);
    }

    #[tokio::test]
    async fn test_remove_org_cascades_members() {
        let harness = TestHarness::new();
        harness.store.seed_directory(10, "Troet", "Clan", 12);
        harness.store.seed_org(10);
        for name in ["P1", "P2", "P3"] {
            harness.store.seed(seeded_member(name, 10, 4, MemberMode::Org));
        }
        harness.store.seed(seeded_member("P9", 99, 1, MemberMode::Org));
        let ctx = test_context(&harness);
        for name in ["P1", "P2", "P3", "P9"] {
            ctx.index().insert(name, 4);
        }

        let removed = AllianceRegistry::new(&ctx).remove_org(10).await.unwrap();

        assert_eq!(removed.members_removed, 3);
        assert_eq!(removed.name.as_deref(), Some("Troet"));
        assert!(harness.store.member("P1").is_none());
        assert!(harness.store.member("P9").is_some());
        assert!(!ctx.index().contains("P2"));
        assert!(ctx.index().contains("P9"));

        let mut removed_names = harness.notify.removed_names();
        removed_names.sort();
        assert_eq!(removed_names, vec!["P1", "P2", "P3"]);
    }

    #[tokio::test]
    async fn test_remove_org_twice_fails_with_not_member() {
        let harness = TestHarness::new();
        harness.store.seed_org(10);
        let ctx = test_context(&harness);
        let registry = AllianceRegistry::new(&ctx);

        registry.remove_org(10).await.unwrap();
        let err = registry.remove_org(10).await.unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Domain(DomainError::NotMember(10))
        ));
    }

    #[tokio::test]
    async fn test_list_orgs_is_ordered_by_name() {
        let harness = TestHarness::new();
        harness.store.seed_directory(10, "Troet", "Clan", 12);
        harness.store.seed_directory(20, "Athen Paladins", "Omni", 30);
        harness.store.seed_org(10);
        harness.store.seed_org(20);
        harness.store.seed(seeded_member("P1", 10, 4, MemberMode::Org));
        harness.store.seed(seeded_member("P2", 20, 4, MemberMode::Org));
        harness.store.seed(seeded_member("P3", 20, 4, MemberMode::Del));
        let ctx = test_context(&harness);

        let listings = AllianceRegistry::new(&ctx).list_orgs().await.unwrap();

        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].name, "Athen Paladins");
        assert_eq!(listings[0].member_count, 2);
        assert_eq!(listings[1].name, "Troet");
        assert_eq!(listings[1].member_count, 1);
    }

    #[tokio::test]
    async fn test_list_skips_orgs_without_member_rows() {
        let harness = TestHarness::new();
        harness.store.seed_directory(10, "Troet", "Clan", 12);
        harness.store.seed_org(10);
        let ctx = test_context(&harness);

        // joined listing, so an org with zero member rows does not appear
        let listings = AllianceRegistry::new(&ctx).list_orgs().await.unwrap();
        assert!(listings.is_empty());
    }
}
