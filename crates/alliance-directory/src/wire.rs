//! Wire format of the people-directory roster endpoint

use serde::Deserialize;

use alliance_core::entities::{Roster, RosterMember, UNRANKED_GUILD_RANK};

/// One member entry as serialized by the directory
#[derive(Debug, Deserialize)]
pub struct WireMember {
    pub name: String,
    /// Missing for freshly-listed characters the directory has not ranked yet
    #[serde(default)]
    pub rank_id: Option<i32>,
}

/// Roster payload as serialized by the directory
#[derive(Debug, Deserialize)]
pub struct WireRoster {
    pub id: i32,
    pub name: String,
    pub faction: String,
    #[serde(default)]
    pub members: Vec<WireMember>,
}

impl WireRoster {
    /// Convert the wire payload into the domain roster
    pub fn into_roster(self) -> Roster {
        Roster {
            org_id: self.id,
            org_name: self.name,
            faction: self.faction,
            members: self
                .members
                .into_iter()
                .map(|m| RosterMember {
                    name: m.name,
                    rank: m.rank_id.unwrap_or(UNRANKED_GUILD_RANK),
                })
                .collect(),
        }
    }
}
