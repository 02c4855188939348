//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("No organization with ID {0} found in the org directory")]
    UnknownOrg(i32),

    #[error("Organization {0} is not a member of this alliance")]
    NotMember(i32),

    #[error("Member not found: {0}")]
    MemberNotFound(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Organization {0} is already a member of this alliance")]
    AlreadyMember(i32),

    // =========================================================================
    // Roster Errors
    // =========================================================================
    #[error("The organization {0} has no members. Not changing its roster")]
    EmptyRoster(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UnknownOrg(_) | Self::NotMember(_) | Self::MemberNotFound(_)
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::AlreadyMember(_))
    }

    /// Check if this error is transient and the pass should be retried later
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::EmptyRoster(_) | Self::Database(_))
    }
}
