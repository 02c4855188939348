//! AllianceOrg entity <-> model mappers

use alliance_core::entities::{AllianceOrg, Organization};
use alliance_core::traits::OrgListing;

use crate::models::{AllianceOrgModel, OrgListingModel, OrganizationModel};

impl From<AllianceOrgModel> for AllianceOrg {
    fn from(model: AllianceOrgModel) -> Self {
        AllianceOrg {
            org_id: model.org_id,
            added_at: model.added_at,
            added_by: model.added_by,
        }
    }
}

impl From<OrganizationModel> for Organization {
    fn from(model: OrganizationModel) -> Self {
        Organization {
            id: model.id,
            name: model.name,
            faction: model.faction,
            num_members: model.num_members,
        }
    }
}

/// Convert a joined listing row into the domain listing entry
pub fn listing_from_model(model: OrgListingModel) -> OrgListing {
    OrgListing {
        org: AllianceOrg {
            org_id: model.org_id,
            added_at: model.added_at,
            added_by: model.added_by,
        },
        name: model.name,
        member_count: model.member_count,
    }
}
