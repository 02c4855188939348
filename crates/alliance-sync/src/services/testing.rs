//! In-memory test doubles for the service-layer tests
//!
//! `MemoryStore` mirrors the SQL semantics of the Postgres repositories,
//! including the tombstone-guarded upsert, so the reconciler tests exercise
//! the same behavior the database enforces.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use alliance_core::entities::{
    AllianceMember, AllianceOrg, MemberMode, Organization, Roster, RosterMember,
};
use alliance_core::error::DomainError;
use alliance_core::traits::{
    DirectoryClient, DirectoryError, MemberRepository, NotifyError, NotifyList, OrgDirectory,
    OrgListing, OrgRepository, RepoResult, RosterDiff,
};

use crate::notify::NotifyCommand;
use crate::services::context::ServiceContext;
use crate::services::index::MembershipIndex;

// ============================================================================
// Store
// ============================================================================

/// In-memory store implementing all three repository traits
#[derive(Default)]
pub(crate) struct MemoryStore {
    orgs: Mutex<Vec<AllianceOrg>>,
    members: Mutex<HashMap<String, AllianceMember>>,
    directory: Mutex<HashMap<i32, Organization>>,
    fail_diff: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_members(members: HashMap<String, AllianceMember>) -> Self {
        Self {
            members: Mutex::new(members),
            ..Self::default()
        }
    }

    pub fn seed(&self, member: AllianceMember) {
        self.members
            .lock()
            .unwrap()
            .insert(member.name.clone(), member);
    }

    pub fn seed_org(&self, org_id: i32) {
        self.orgs.lock().unwrap().push(AllianceOrg {
            org_id,
            added_at: Utc::now(),
            added_by: Some("Admin".to_string()),
        });
    }

    pub fn seed_directory(&self, id: i32, name: &str, faction: &str, num_members: i32) {
        self.directory.lock().unwrap().insert(
            id,
            Organization {
                id,
                name: name.to_string(),
                faction: faction.to_string(),
                num_members,
            },
        );
    }

    /// Make the next apply_diff fail as if the commit was rolled back
    pub fn fail_next_diff(&self) {
        self.fail_diff.store(true, Ordering::SeqCst);
    }

    pub fn member(&self, name: &str) -> Option<AllianceMember> {
        self.members.lock().unwrap().get(name).cloned()
    }

    pub fn all_members(&self) -> Vec<AllianceMember> {
        let mut members: Vec<_> = self.members.lock().unwrap().values().cloned().collect();
        members.sort_by(|a, b| a.name.cmp(&b.name));
        members
    }

    pub fn org_ids(&self) -> Vec<i32> {
        let mut ids: Vec<_> = self.orgs.lock().unwrap().iter().map(|o| o.org_id).collect();
        ids.sort_unstable();
        ids
    }
}

#[async_trait]
impl OrgRepository for MemoryStore {
    async fn find_all(&self) -> RepoResult<Vec<AllianceOrg>> {
        Ok(self.orgs.lock().unwrap().clone())
    }

    async fn insert(&self, org: &AllianceOrg) -> RepoResult<()> {
        let mut orgs = self.orgs.lock().unwrap();
        if orgs.iter().any(|o| o.org_id == org.org_id) {
            return Err(DomainError::AlreadyMember(org.org_id));
        }
        orgs.push(org.clone());
        Ok(())
    }

    async fn delete(&self, org_id: i32) -> RepoResult<bool> {
        let mut orgs = self.orgs.lock().unwrap();
        let before = orgs.len();
        orgs.retain(|o| o.org_id != org_id);
        Ok(orgs.len() < before)
    }

    async fn list_with_members(&self) -> RepoResult<Vec<OrgListing>> {
        let orgs = self.orgs.lock().unwrap();
        let members = self.members.lock().unwrap();
        let directory = self.directory.lock().unwrap();

        let mut listings: Vec<OrgListing> = orgs
            .iter()
            .filter_map(|org| {
                let name = directory.get(&org.org_id)?.name.clone();
                let member_count = members.values().filter(|m| m.org_id == org.org_id).count();
                // joined listing: zero member rows means no row in the join
                if member_count == 0 {
                    return None;
                }
                Some(OrgListing {
                    org: org.clone(),
                    name,
                    member_count: member_count as i64,
                })
            })
            .collect();
        listings.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(listings)
    }
}

#[async_trait]
impl MemberRepository for MemoryStore {
    async fn find_all(&self) -> RepoResult<Vec<AllianceMember>> {
        Ok(self.members.lock().unwrap().values().cloned().collect())
    }

    async fn find_by_org(&self, org_id: i32) -> RepoResult<Vec<AllianceMember>> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .values()
            .filter(|m| m.org_id == org_id)
            .cloned()
            .collect())
    }

    async fn find_active(&self) -> RepoResult<Vec<AllianceMember>> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .values()
            .filter(|m| m.mode != MemberMode::Del)
            .cloned()
            .collect())
    }

    async fn apply_diff(&self, diff: &RosterDiff) -> RepoResult<()> {
        if self.fail_diff.swap(false, Ordering::SeqCst) {
            return Err(DomainError::Database("injected commit failure".to_string()));
        }

        let mut members = self.members.lock().unwrap();

        for (name, rank) in &diff.inserts {
            match members.entry(name.clone()) {
                Entry::Occupied(mut entry) => {
                    let row = entry.get_mut();
                    // upsert guard: tombstones are never overwritten
                    if row.mode != MemberMode::Del {
                        row.org_id = diff.org_id;
                        row.rank = *rank;
                        row.mode = MemberMode::Org;
                    }
                }
                Entry::Vacant(entry) => {
                    entry.insert(AllianceMember {
                        name: name.clone(),
                        org_id: diff.org_id,
                        rank: *rank,
                        mode: MemberMode::Org,
                    });
                }
            }
        }

        for name in &diff.promotions {
            if let Some(row) = members.get_mut(name) {
                if row.mode == MemberMode::Add {
                    row.mode = MemberMode::Org;
                }
            }
        }

        for (name, rank) in &diff.rank_updates {
            if let Some(row) = members.get_mut(name) {
                row.rank = *rank;
            }
        }

        for name in &diff.removals {
            if members.get(name).is_some_and(|m| m.org_id == diff.org_id) {
                members.remove(name);
            }
        }

        Ok(())
    }

    async fn delete_by_org(&self, org_id: i32) -> RepoResult<u64> {
        let mut members = self.members.lock().unwrap();
        let before = members.len();
        members.retain(|_, m| m.org_id != org_id);
        Ok((before - members.len()) as u64)
    }
}

#[async_trait]
impl OrgDirectory for MemoryStore {
    async fn find_by_id(&self, id: i32) -> RepoResult<Option<Organization>> {
        Ok(self.directory.lock().unwrap().get(&id).cloned())
    }
}

// ============================================================================
// Notification list
// ============================================================================

/// NotifyList double recording every gateway call
#[derive(Default)]
pub(crate) struct RecordingNotify {
    events: Mutex<Vec<NotifyCommand>>,
}

impl RecordingNotify {
    pub fn added_names(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                NotifyCommand::Add { name, .. } => Some(name.clone()),
                NotifyCommand::Remove { .. } => None,
            })
            .collect()
    }

    pub fn removed_names(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                NotifyCommand::Remove { name, .. } => Some(name.clone()),
                NotifyCommand::Add { .. } => None,
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().unwrap().is_empty()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

#[async_trait]
impl NotifyList for RecordingNotify {
    async fn add(&self, name: &str, tag: &str) -> Result<(), NotifyError> {
        self.events.lock().unwrap().push(NotifyCommand::Add {
            name: name.to_string(),
            tag: tag.to_string(),
        });
        Ok(())
    }

    async fn remove(&self, name: &str, tag: &str) -> Result<(), NotifyError> {
        self.events.lock().unwrap().push(NotifyCommand::Remove {
            name: name.to_string(),
            tag: tag.to_string(),
        });
        Ok(())
    }
}

// ============================================================================
// Directory client
// ============================================================================

/// What a canned fetch should do
pub(crate) enum CannedFetch {
    Roster(Roster),
    Fail,
    /// Never resolves; exercises the per-fetch timeout
    Hang,
}

/// DirectoryClient double serving canned rosters
#[derive(Default)]
pub(crate) struct StaticDirectory {
    canned: Mutex<HashMap<i32, CannedFetch>>,
    fetches: AtomicUsize,
}

impl StaticDirectory {
    pub fn set(&self, org_id: i32, fetch: CannedFetch) {
        self.canned.lock().unwrap().insert(org_id, fetch);
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DirectoryClient for StaticDirectory {
    async fn fetch_roster(
        &self,
        org_id: i32,
        _force_refresh: bool,
    ) -> Result<Roster, DirectoryError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let roster = {
            let canned = self.canned.lock().unwrap();
            match canned.get(&org_id) {
                Some(CannedFetch::Roster(roster)) => Ok(roster.clone()),
                Some(CannedFetch::Fail) => Err(DirectoryError::Status(502)),
                Some(CannedFetch::Hang) => Err(DirectoryError::Request(String::new())),
                None => {
                    return Err(DirectoryError::Request(format!(
                        "no canned roster for org {org_id}"
                    )))
                }
            }
        };
        if matches!(
            self.canned.lock().unwrap().get(&org_id),
            Some(CannedFetch::Hang)
        ) {
            std::future::pending::<()>().await;
        }
        roster
    }
}

// ============================================================================
// Harness
// ============================================================================

/// Bundle of doubles a test wires a ServiceContext from
pub(crate) struct TestHarness {
    pub store: Arc<MemoryStore>,
    pub notify: Arc<RecordingNotify>,
    pub directory: Arc<StaticDirectory>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
            notify: Arc::new(RecordingNotify::default()),
            directory: Arc::new(StaticDirectory::default()),
        }
    }
}

/// Build a ServiceContext over a harness with a fresh membership index
pub(crate) fn test_context(harness: &TestHarness) -> ServiceContext {
    ServiceContext::new(
        harness.store.clone(),
        harness.store.clone(),
        harness.store.clone(),
        harness.directory.clone(),
        harness.notify.clone(),
        Arc::new(MembershipIndex::new()),
        "Testbot",
        Duration::from_secs(5),
    )
}

/// Shorthand roster constructor
pub(crate) fn make_roster(org_id: i32, org_name: &str, members: &[(&str, i32)]) -> Roster {
    Roster {
        org_id,
        org_name: org_name.to_string(),
        faction: "Clan".to_string(),
        members: members
            .iter()
            .map(|(name, rank)| RosterMember {
                name: (*name).to_string(),
                rank: *rank,
            })
            .collect(),
    }
}

/// Shorthand member-row constructor
pub(crate) fn seeded_member(name: &str, org_id: i32, rank: i32, mode: MemberMode) -> AllianceMember {
    AllianceMember {
        name: name.to_string(),
        org_id,
        rank,
        mode,
    }
}
