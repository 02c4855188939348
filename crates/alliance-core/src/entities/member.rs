//! Alliance member entity - one player's relationship to one alliance org

use std::fmt;
use std::str::FromStr;

/// Guild rank reported when the directory cannot resolve a member's rank.
pub const UNRANKED_GUILD_RANK: i32 = 6;

/// How a member record entered the roster and who owns its lifecycle.
///
/// - `Org`: confirmed present by automatic sync; removed when the upstream
///   roster no longer lists the name.
/// - `Add`: manually added; sync may promote it to `Org` but never removes it.
/// - `Del`: tombstone; confirmed absent or manually removed. Kept in the
///   store so a later sync pass cannot resurrect the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberMode {
    Org,
    Add,
    Del,
}

impl MemberMode {
    /// Stable string form used in the database and wire formats
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Org => "org",
            Self::Add => "add",
            Self::Del => "del",
        }
    }
}

impl fmt::Display for MemberMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown mode string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown member mode: {0}")]
pub struct ParseMemberModeError(pub String);

impl FromStr for MemberMode {
    type Err = ParseMemberModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "org" => Ok(Self::Org),
            "add" => Ok(Self::Add),
            "del" => Ok(Self::Del),
            other => Err(ParseMemberModeError(other.to_string())),
        }
    }
}

/// Alliance member entity (one row per player name, globally unique)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllianceMember {
    /// Player name, case-preserved as reported by the directory
    pub name: String,
    /// The alliance org this member currently belongs to
    pub org_id: i32,
    /// External guild rank, `UNRANKED_GUILD_RANK` when unresolved
    pub rank: i32,
    pub mode: MemberMode,
}

impl AllianceMember {
    /// Create a new member as observed in a fetched roster
    pub fn from_roster(name: impl Into<String>, org_id: i32, rank: i32) -> Self {
        Self {
            name: name.into(),
            org_id,
            rank,
            mode: MemberMode::Org,
        }
    }

    /// Whether this record is a tombstone
    #[inline]
    pub fn is_tombstone(&self) -> bool {
        self.mode == MemberMode::Del
    }
}
