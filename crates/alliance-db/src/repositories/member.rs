//! PostgreSQL implementation of MemberRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use alliance_core::entities::{AllianceMember, MemberMode};
use alliance_core::traits::{MemberRepository, RepoResult, RosterDiff};

use crate::mappers::member_from_model;
use crate::models::AllianceMemberModel;

use super::error::map_db_error;

/// PostgreSQL implementation of MemberRepository
#[derive(Clone)]
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    /// Create a new PgMemberRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> RepoResult<Vec<AllianceMember>> {
        let rows = sqlx::query_as::<_, AllianceMemberModel>(
            r#"
            SELECT name, org_id, rank, mode FROM alliance_members
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(member_from_model).collect()
    }

    #[instrument(skip(self))]
    async fn find_by_org(&self, org_id: i32) -> RepoResult<Vec<AllianceMember>> {
        let rows = sqlx::query_as::<_, AllianceMemberModel>(
            r#"
            SELECT name, org_id, rank, mode FROM alliance_members WHERE org_id = $1
            "#,
        )
        .bind(org_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(member_from_model).collect()
    }

    #[instrument(skip(self))]
    async fn find_active(&self) -> RepoResult<Vec<AllianceMember>> {
        let rows = sqlx::query_as::<_, AllianceMemberModel>(
            r#"
            SELECT name, org_id, rank, mode FROM alliance_members WHERE mode != 'del'
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(member_from_model).collect()
    }

    /// Apply one org's reconciliation diff in a single transaction.
    ///
    /// The insert is an upsert on name: a name already live under another
    /// org is re-pointed to the reconciled org instead of duplicated, and a
    /// tombstoned name is never overwritten (the WHERE guard keeps 'del'
    /// rows untouched even if a concurrent pass tombstoned the name after
    /// the diff was computed).
    #[instrument(skip(self, diff), fields(org_id = diff.org_id))]
    async fn apply_diff(&self, diff: &RosterDiff) -> RepoResult<()> {
        if diff.is_noop() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        for (name, rank) in &diff.inserts {
            sqlx::query(
                r#"
                INSERT INTO alliance_members (name, org_id, rank, mode)
                VALUES ($1, $2, $3, 'org')
                ON CONFLICT (name) DO UPDATE
                SET org_id = EXCLUDED.org_id, rank = EXCLUDED.rank, mode = 'org'
                WHERE alliance_members.mode != 'del'
                "#,
            )
            .bind(name)
            .bind(diff.org_id)
            .bind(rank)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        for name in &diff.promotions {
            sqlx::query(
                r#"
                UPDATE alliance_members SET mode = $1 WHERE name = $2 AND mode = $3
                "#,
            )
            .bind(MemberMode::Org.as_str())
            .bind(name)
            .bind(MemberMode::Add.as_str())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        for (name, rank) in &diff.rank_updates {
            sqlx::query(
                r#"
                UPDATE alliance_members SET rank = $1 WHERE name = $2
                "#,
            )
            .bind(rank)
            .bind(name)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        for name in &diff.removals {
            sqlx::query(
                r#"
                DELETE FROM alliance_members WHERE name = $1 AND org_id = $2
                "#,
            )
            .bind(name)
            .bind(diff.org_id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_by_org(&self, org_id: i32) -> RepoResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM alliance_members WHERE org_id = $1
            "#,
        )
        .bind(org_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
