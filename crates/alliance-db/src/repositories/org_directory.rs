//! PostgreSQL implementation of the read-only org directory lookup

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use alliance_core::entities::Organization;
use alliance_core::traits::{OrgDirectory, RepoResult};

use crate::models::OrganizationModel;

use super::error::map_db_error;

/// Read-only lookup into the organizations table maintained by the
/// org-list importer
#[derive(Clone)]
pub struct PgOrgDirectory {
    pool: PgPool,
}

impl PgOrgDirectory {
    /// Create a new PgOrgDirectory
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrgDirectory for PgOrgDirectory {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i32) -> RepoResult<Option<Organization>> {
        let row = sqlx::query_as::<_, OrganizationModel>(
            r#"
            SELECT id, name, faction, num_members FROM organizations WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.map(Organization::from))
    }
}
