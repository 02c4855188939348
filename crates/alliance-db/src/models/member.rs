//! Member database model

use sqlx::FromRow;

/// Database model for the alliance_members table
#[derive(Debug, Clone, FromRow)]
pub struct AllianceMemberModel {
    pub name: String,
    pub org_id: i32,
    pub rank: i32,
    /// One of "org", "add", "del"; parsed by the mapper
    pub mode: String,
}
