//! Organization entity - a row in the external org directory
//!
//! The org directory (`organizations` table) is maintained by a separate
//! importer; the sync engine only reads it to validate manual adds and to
//! resolve display names.

/// An organization as known to the org directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    pub id: i32,
    pub name: String,
    pub faction: String,
    pub num_members: i32,
}
