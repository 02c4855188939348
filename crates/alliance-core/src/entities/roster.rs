//! Roster entity - a snapshot of an org's members from the directory

/// One member as reported by the remote directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterMember {
    pub name: String,
    pub rank: i32,
}

/// A fetched snapshot of an organization's current roster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    pub org_id: i32,
    pub org_name: String,
    pub faction: String,
    pub members: Vec<RosterMember>,
}

impl Roster {
    /// Whether the directory reported no members at all.
    ///
    /// An empty roster is treated as a transient directory glitch, never as
    /// "everyone left": reconciliation rejects it without touching the store.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
