//! AllianceMember entity <-> model mapper

use alliance_core::entities::{AllianceMember, MemberMode};
use alliance_core::error::DomainError;

use crate::models::AllianceMemberModel;

/// Convert an AllianceMemberModel row into the domain entity.
///
/// A mode string outside org/add/del means the table was tampered with; it
/// surfaces as a database error rather than a panic.
pub fn member_from_model(model: AllianceMemberModel) -> Result<AllianceMember, DomainError> {
    let mode: MemberMode = model
        .mode
        .parse()
        .map_err(|e| DomainError::Database(format!("{e}")))?;

    Ok(AllianceMember {
        name: model.name,
        org_id: model.org_id,
        rank: model.rank,
        mode,
    })
}
