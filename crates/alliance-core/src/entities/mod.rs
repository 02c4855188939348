//! Domain entities - core business objects

mod member;
mod org;
mod organization;
mod roster;

pub use member::{AllianceMember, MemberMode, UNRANKED_GUILD_RANK};
pub use org::AllianceOrg;
pub use organization::Organization;
pub use roster::{Roster, RosterMember};
