//! Org database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the alliance_orgs table
#[derive(Debug, Clone, FromRow)]
pub struct AllianceOrgModel {
    pub org_id: i32,
    pub added_at: DateTime<Utc>,
    pub added_by: Option<String>,
}

/// Database model for the organizations directory table
#[derive(Debug, Clone, FromRow)]
pub struct OrganizationModel {
    pub id: i32,
    pub name: String,
    pub faction: String,
    pub num_members: i32,
}

/// Joined listing row (alliance_orgs x organizations x alliance_members)
#[derive(Debug, Clone, FromRow)]
pub struct OrgListingModel {
    pub org_id: i32,
    pub added_at: DateTime<Utc>,
    pub added_by: Option<String>,
    pub name: String,
    pub member_count: i64,
}
