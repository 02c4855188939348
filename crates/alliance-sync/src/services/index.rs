//! Membership index - derived in-memory name -> rank mapping
//!
//! Read-optimized cache over the membership store, holding every member row
//! with mode != del. Rebuilt fully at process start and kept in sync by the
//! reconciler and the registry; readers (the access-level resolver) never
//! mutate it. Safe under concurrent per-org reconciliations.

use dashmap::DashMap;

use alliance_core::traits::{MemberRepository, RepoResult};

/// In-memory name -> rank mapping for all live alliance members
#[derive(Debug, Default)]
pub struct MembershipIndex {
    members: DashMap<String, i32>,
}

impl MembershipIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the index from the store, replacing all current entries.
    /// Returns the number of live members loaded.
    pub async fn rebuild(&self, repo: &dyn MemberRepository) -> RepoResult<usize> {
        let members = repo.find_active().await?;
        self.members.clear();
        for member in &members {
            self.members.insert(member.name.clone(), member.rank);
        }
        Ok(members.len())
    }

    /// Insert or refresh one member's rank
    pub fn insert(&self, name: &str, rank: i32) {
        self.members.insert(name.to_string(), rank);
    }

    /// Remove a member. Returns whether the name was present.
    pub fn remove(&self, name: &str) -> bool {
        self.members.remove(name).is_some()
    }

    /// Look up a member's rank; `None` means the name holds no alliance
    /// membership
    pub fn lookup(&self, name: &str) -> Option<i32> {
        self.members.get(name).map(|entry| *entry.value())
    }

    /// Whether the name is a live alliance member
    pub fn contains(&self, name: &str) -> bool {
        self.members.contains_key(name)
    }

    /// Number of live members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the index holds no members
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
