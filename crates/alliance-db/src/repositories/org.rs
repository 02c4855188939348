//! PostgreSQL implementation of OrgRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use alliance_core::entities::AllianceOrg;
use alliance_core::error::DomainError;
use alliance_core::traits::{OrgListing, OrgRepository, RepoResult};

use crate::mappers::listing_from_model;
use crate::models::{AllianceOrgModel, OrgListingModel};

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of OrgRepository
#[derive(Clone)]
pub struct PgOrgRepository {
    pool: PgPool,
}

impl PgOrgRepository {
    /// Create a new PgOrgRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrgRepository for PgOrgRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> RepoResult<Vec<AllianceOrg>> {
        let rows = sqlx::query_as::<_, AllianceOrgModel>(
            r#"
            SELECT org_id, added_at, added_by FROM alliance_orgs
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(AllianceOrg::from).collect())
    }

    #[instrument(skip(self, org), fields(org_id = org.org_id))]
    async fn insert(&self, org: &AllianceOrg) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO alliance_orgs (org_id, added_at, added_by)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(org.org_id)
        .bind(org.added_at)
        .bind(&org.added_by)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyMember(org.org_id)))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, org_id: i32) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM alliance_orgs WHERE org_id = $1
            "#,
        )
        .bind(org_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn list_with_members(&self) -> RepoResult<Vec<OrgListing>> {
        let rows = sqlx::query_as::<_, OrgListingModel>(
            r#"
            SELECT a.org_id, a.added_at, a.added_by, o.name, COUNT(m.name) AS member_count
            FROM alliance_orgs a
            JOIN organizations o ON (a.org_id = o.id)
            JOIN alliance_members m ON (m.org_id = a.org_id)
            GROUP BY a.org_id, a.added_at, a.added_by, o.name
            ORDER BY o.name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(listing_from_model).collect())
    }
}
