//! Database models with SQLx `FromRow` derives

mod member;
mod org;

pub use member::AllianceMemberModel;
pub use org::{AllianceOrgModel, OrgListingModel, OrganizationModel};
