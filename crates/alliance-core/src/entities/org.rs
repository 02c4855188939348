//! Alliance org entity - an organization that is a member of the alliance

use chrono::{DateTime, Utc};

/// An organization registered in the alliance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllianceOrg {
    /// External org identifier, unique within the registry
    pub org_id: i32,
    /// When the org was added to the alliance
    pub added_at: DateTime<Utc>,
    /// Name of the operator who added it, if known
    pub added_by: Option<String>,
}

impl AllianceOrg {
    /// Create a new registration for `org_id`, added now by `operator`
    pub fn new(org_id: i32, operator: impl Into<String>) -> Self {
        Self {
            org_id,
            added_at: Utc::now(),
            added_by: Some(operator.into()),
        }
    }
}
