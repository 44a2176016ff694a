//! Report lifecycle
//!
//! Owns the in-memory report collection. Every mutation replaces the whole
//! persisted collection, matching the store's whole-value semantics. Derived
//! views are pure queries recomputed on demand.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{Report, ReportDraft, ReportStatus, User, WorkHours, UNSET_TIME_LABEL};
use crate::store::{keys, StorageArea};

/// Soft-deleted reports are purged this long after deletion
pub const TRASH_RETENTION_MS: i64 = 30 * 24 * 60 * 60 * 1000;

/// The report lifecycle controller
pub struct ReportJournal {
    store: Arc<dyn StorageArea>,
    reports: Vec<Report>,
}

impl ReportJournal {
    /// Load the journal from the store, purging expired trash
    ///
    /// Unreadable or absent data yields an empty collection; a load failure
    /// never propagates past this point.
    pub fn load(store: Arc<dyn StorageArea>) -> Self {
        let reports = match store.load(keys::REPORTS) {
            Ok(Some(value)) => match serde_json::from_value::<Vec<Report>>(value) {
                Ok(list) => list,
                Err(e) => {
                    log::warn!("[journal] Discarding unreadable report collection: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("[journal] Failed to read report collection: {}", e);
                Vec::new()
            }
        };

        let mut journal = Self { store, reports };
        match journal.purge_expired(Utc::now()) {
            Ok(purged) if purged > 0 => {
                log::info!("[journal] Purged {} expired reports from trash", purged)
            }
            Err(e) => log::warn!("[journal] Failed to persist after purge: {}", e),
            _ => {}
        }
        journal
    }

    fn persist(&self) -> Result<()> {
        let value = serde_json::to_value(&self.reports)?;
        self.store.save(keys::REPORTS, &value)
    }

    /// Create a report from form input and prepend it to the collection
    ///
    /// With no signed-in user this is a silent no-op returning `None`,
    /// never an error.
    pub fn add_report(
        &mut self,
        current_user: Option<&User>,
        draft: ReportDraft,
        is_draft: bool,
    ) -> Result<Option<Report>> {
        let Some(user) = current_user else {
            log::debug!("[journal] Ignoring report submission with no signed-in user");
            return Ok(None);
        };

        let now = Utc::now();
        let report = Report {
            id: format!("r-{}", now.timestamp_millis()),
            user_id: user.id.clone(),
            user_name: user.name.clone(),
            user_avatar: if user.avatar.is_empty() {
                User::default_avatar(&user.name)
            } else {
                user.avatar.clone()
            },
            user_mbti: user.mbti.clone(),
            timestamp: now,
            status: ReportStatus::Done,
            content: draft.content,
            blockers: draft.blockers,
            plan_for_tomorrow: draft.plan_for_tomorrow,
            breaks: draft.breaks,
            files: draft.files,
            links: draft
                .links
                .into_iter()
                .filter(|l| !l.trim().is_empty())
                .collect(),
            department: if user.department.is_empty() {
                "Operations".to_string()
            } else {
                user.department.clone()
            },
            date: draft.date.unwrap_or_else(|| now.date_naive()),
            work_hours: WorkHours {
                start: draft.start.unwrap_or_else(|| UNSET_TIME_LABEL.to_string()),
                end: draft.end.unwrap_or_else(|| UNSET_TIME_LABEL.to_string()),
            },
            optimized_summary: draft.optimized_summary,
            is_draft,
            is_deleted: false,
            deleted_at: None,
        };

        self.reports.insert(0, report.clone());
        self.persist()?;
        Ok(Some(report))
    }

    /// Soft-delete a report
    ///
    /// Idempotent: re-trashing refreshes `deleted_at`. Returns whether a
    /// report matched. The caller surfaces the undo affordance.
    pub fn move_to_trash(&mut self, id: &str) -> Result<bool> {
        let Some(report) = self.reports.iter_mut().find(|r| r.id == id) else {
            return Ok(false);
        };
        report.is_deleted = true;
        report.deleted_at = Some(Utc::now());
        self.persist()?;
        Ok(true)
    }

    /// Clear a report's soft-delete marker
    pub fn restore(&mut self, id: &str) -> Result<bool> {
        let Some(report) = self.reports.iter_mut().find(|r| r.id == id) else {
            return Ok(false);
        };
        report.is_deleted = false;
        report.deleted_at = None;
        self.persist()?;
        Ok(true)
    }

    /// Permanently remove every trashed report owned by `user_id`
    pub fn empty_trash(&mut self, user_id: &str) -> Result<usize> {
        let before = self.reports.len();
        self.reports
            .retain(|r| !(r.is_deleted && r.user_id == user_id));
        let removed = before - self.reports.len();
        if removed > 0 {
            self.persist()?;
        }
        Ok(removed)
    }

    /// Permanently remove trashed reports deleted 30 or more days before `now`
    ///
    /// A trashed report with no deletion timestamp never expires under this
    /// rule; only `empty_trash` removes it.
    pub fn purge_expired(&mut self, now: DateTime<Utc>) -> Result<usize> {
        let before = self.reports.len();
        self.reports.retain(|r| {
            if r.is_deleted {
                if let Some(deleted_at) = r.deleted_at {
                    return (now - deleted_at).num_milliseconds() < TRASH_RETENTION_MS;
                }
            }
            true
        });
        let removed = before - self.reports.len();
        if removed > 0 {
            self.persist()?;
        }
        Ok(removed)
    }

    /// Replace a draft with a freshly submitted report
    ///
    /// The new entity takes the draft's fields under a new id and timestamp;
    /// the source draft goes to trash rather than being updated in place.
    pub fn promote(&mut self, id: &str) -> Result<Option<Report>> {
        let Some(draft) = self
            .reports
            .iter()
            .find(|r| r.id == id && r.is_draft && !r.is_deleted)
            .cloned()
        else {
            return Ok(None);
        };

        let now = Utc::now();
        let report = Report {
            id: format!("r-{}", now.timestamp_millis()),
            timestamp: now,
            status: ReportStatus::Done,
            is_draft: false,
            is_deleted: false,
            deleted_at: None,
            ..draft
        };

        self.reports.insert(0, report.clone());
        if let Some(old) = self.reports.iter_mut().find(|r| r.id == id) {
            old.is_deleted = true;
            old.deleted_at = Some(now);
        }
        self.persist()?;
        Ok(Some(report))
    }

    // ------------------------------------------------------------------
    // Derived views
    // ------------------------------------------------------------------

    /// All reports that are not in the trash
    pub fn active_reports(&self) -> Vec<&Report> {
        self.reports.iter().filter(|r| !r.is_deleted).collect()
    }

    /// Active, submitted (non-draft) reports; the dashboard/export source
    pub fn submitted(&self) -> Vec<&Report> {
        self.reports
            .iter()
            .filter(|r| !r.is_deleted && !r.is_draft)
            .collect()
    }

    /// Trashed reports owned by `user_id`
    pub fn trash_reports(&self, user_id: &str) -> Vec<&Report> {
        self.reports
            .iter()
            .filter(|r| r.is_deleted && r.user_id == user_id)
            .collect()
    }

    /// Submitted reports owned by `user_id`, optionally filtered by a
    /// case-insensitive substring match against date, content, or blockers
    pub fn history(&self, user_id: &str, query: Option<&str>) -> Vec<&Report> {
        let list = self
            .reports
            .iter()
            .filter(|r| !r.is_deleted && !r.is_draft && r.user_id == user_id);

        let q = query.map(str::trim).unwrap_or_default().to_lowercase();
        if q.is_empty() {
            return list.collect();
        }

        list.filter(|r| {
            r.date.to_string().contains(&q)
                || r.content.to_lowercase().contains(&q)
                || r.blockers.to_lowercase().contains(&q)
        })
        .collect()
    }

    /// Active drafts owned by `user_id`
    pub fn drafts(&self, user_id: &str) -> Vec<&Report> {
        self.reports
            .iter()
            .filter(|r| !r.is_deleted && r.is_draft && r.user_id == user_id)
            .collect()
    }

    /// Look up a report by id, trashed or not
    pub fn get(&self, id: &str) -> Option<&Report> {
        self.reports.iter().find(|r| r.id == id)
    }

    /// Total number of reports held, including trash
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::{Duration, NaiveDate};
    use serde_json::json;

    fn test_user() -> User {
        User {
            id: "u-1".to_string(),
            name: "Ada Lovelace".to_string(),
            role: "Team Member".to_string(),
            avatar: String::new(),
            department: "Engineering".to_string(),
            mbti: Some("INTJ".to_string()),
            email: "ada@example.com".to_string(),
        }
    }

    fn journal() -> ReportJournal {
        ReportJournal::load(Arc::new(MemoryStore::new()))
    }

    fn draft_with(content: &str) -> ReportDraft {
        ReportDraft {
            content: content.to_string(),
            ..Default::default()
        }
    }

    // ========================================================================
    // Creation
    // ========================================================================

    #[test]
    fn test_add_report_appears_first_as_done() {
        let user = test_user();
        let mut journal = journal();

        journal
            .add_report(Some(&user), draft_with("Set up CI"), false)
            .unwrap();
        let created = journal
            .add_report(
                Some(&user),
                ReportDraft {
                    content: "Shipped X".to_string(),
                    date: NaiveDate::from_ymd_opt(2024, 1, 1),
                    ..Default::default()
                },
                false,
            )
            .unwrap()
            .unwrap();

        let active = journal.active_reports();
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].id, created.id);
        assert_eq!(active[0].content, "Shipped X");
        assert_eq!(active[0].status, ReportStatus::Done);
        assert!(!active[0].is_draft);
        assert_eq!(active[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn test_add_report_without_session_is_noop() {
        let mut journal = journal();
        let result = journal.add_report(None, draft_with("orphan"), false).unwrap();
        assert!(result.is_none());
        assert!(journal.is_empty());
    }

    #[test]
    fn test_add_report_defaults_unset_fields() {
        let user = test_user();
        let mut journal = journal();

        let report = journal
            .add_report(Some(&user), ReportDraft::default(), false)
            .unwrap()
            .unwrap();

        assert_eq!(report.work_hours.start, UNSET_TIME_LABEL);
        assert_eq!(report.work_hours.end, UNSET_TIME_LABEL);
        assert!(report.blockers.is_empty());
        assert!(report.breaks.is_empty());
        assert_eq!(report.date, Utc::now().date_naive());
        assert_eq!(report.user_name, "Ada Lovelace");
        assert_eq!(report.user_mbti.as_deref(), Some("INTJ"));
        // Blank avatar falls back to the generated one
        assert!(report.user_avatar.contains("ui-avatars.com"));
    }

    #[test]
    fn test_add_report_drops_blank_links() {
        let user = test_user();
        let mut journal = journal();

        let report = journal
            .add_report(
                Some(&user),
                ReportDraft {
                    links: vec![
                        "https://example.com/pr/1".to_string(),
                        "   ".to_string(),
                        String::new(),
                    ],
                    ..Default::default()
                },
                false,
            )
            .unwrap()
            .unwrap();

        assert_eq!(report.links, vec!["https://example.com/pr/1".to_string()]);
    }

    // ========================================================================
    // Trash lifecycle
    // ========================================================================

    #[test]
    fn test_trash_sets_deleted_at() {
        let user = test_user();
        let mut journal = journal();
        let id = journal
            .add_report(Some(&user), draft_with("x"), false)
            .unwrap()
            .unwrap()
            .id;

        assert!(journal.move_to_trash(&id).unwrap());
        let report = journal.get(&id).unwrap();
        assert!(report.is_deleted);
        assert!(report.deleted_at.is_some());
        assert!(journal.active_reports().is_empty());
        assert_eq!(journal.trash_reports("u-1").len(), 1);
    }

    #[test]
    fn test_trash_then_restore_roundtrips() {
        let user = test_user();
        let mut journal = journal();
        let before = journal
            .add_report(Some(&user), draft_with("keep me"), false)
            .unwrap()
            .unwrap();

        journal.move_to_trash(&before.id).unwrap();
        assert!(journal.restore(&before.id).unwrap());

        let after = journal.get(&before.id).unwrap();
        assert_eq!(*after, before);
        assert!(!after.is_deleted);
        assert!(after.deleted_at.is_none());
    }

    #[test]
    fn test_trash_is_idempotent_and_refreshes_timestamp() {
        let user = test_user();
        let mut journal = journal();
        let id = journal
            .add_report(Some(&user), draft_with("x"), false)
            .unwrap()
            .unwrap()
            .id;

        journal.move_to_trash(&id).unwrap();
        let first = journal.get(&id).unwrap().deleted_at.unwrap();
        journal.move_to_trash(&id).unwrap();
        let second = journal.get(&id).unwrap().deleted_at.unwrap();
        assert!(second >= first);
        assert!(journal.get(&id).unwrap().is_deleted);
    }

    #[test]
    fn test_trash_unknown_id_matches_nothing() {
        let mut journal = journal();
        assert!(!journal.move_to_trash("r-404").unwrap());
        assert!(!journal.restore("r-404").unwrap());
    }

    #[test]
    fn test_empty_trash_only_removes_own_deleted() {
        let mine = test_user();
        let theirs = User {
            id: "u-2".to_string(),
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            ..test_user()
        };
        let mut journal = journal();

        let my_trashed = journal
            .add_report(Some(&mine), draft_with("mine, trashed"), false)
            .unwrap()
            .unwrap()
            .id;
        let my_active = journal
            .add_report(Some(&mine), draft_with("mine, active"), false)
            .unwrap()
            .unwrap()
            .id;
        let their_trashed = journal
            .add_report(Some(&theirs), draft_with("theirs, trashed"), false)
            .unwrap()
            .unwrap()
            .id;

        journal.move_to_trash(&my_trashed).unwrap();
        journal.move_to_trash(&their_trashed).unwrap();

        assert_eq!(journal.empty_trash("u-1").unwrap(), 1);
        assert!(journal.get(&my_trashed).is_none());
        assert!(journal.get(&my_active).is_some());
        assert!(journal.get(&their_trashed).is_some());
    }

    // ========================================================================
    // Retention purge
    // ========================================================================

    #[test]
    fn test_purge_boundary() {
        let user = test_user();
        let mut journal = journal();
        let id = journal
            .add_report(Some(&user), draft_with("x"), false)
            .unwrap()
            .unwrap()
            .id;
        journal.move_to_trash(&id).unwrap();
        let deleted_at = journal.get(&id).unwrap().deleted_at.unwrap();

        // One second shy of 30 days: survives
        let almost = deleted_at + Duration::milliseconds(TRASH_RETENTION_MS - 1_000);
        assert_eq!(journal.purge_expired(almost).unwrap(), 0);
        assert!(journal.get(&id).is_some());

        // One second past 30 days: gone
        let past = deleted_at + Duration::milliseconds(TRASH_RETENTION_MS + 1_000);
        assert_eq!(journal.purge_expired(past).unwrap(), 1);
        assert!(journal.get(&id).is_none());
    }

    #[test]
    fn test_purge_exactly_thirty_days_removes() {
        let user = test_user();
        let mut journal = journal();
        let id = journal
            .add_report(Some(&user), draft_with("x"), false)
            .unwrap()
            .unwrap()
            .id;
        journal.move_to_trash(&id).unwrap();
        let deleted_at = journal.get(&id).unwrap().deleted_at.unwrap();

        let exact = deleted_at + Duration::milliseconds(TRASH_RETENTION_MS);
        assert_eq!(journal.purge_expired(exact).unwrap(), 1);
    }

    #[test]
    fn test_purge_skips_deleted_without_timestamp() {
        // A record trashed by an older version that never stamped deletedAt
        let store = Arc::new(MemoryStore::new());
        store
            .save(
                keys::REPORTS,
                &json!([{
                    "id": "r-legacy",
                    "userId": "u-1",
                    "userName": "Ada",
                    "userAvatar": "",
                    "timestamp": "2020-01-01T00:00:00Z",
                    "status": "DONE",
                    "content": "ancient",
                    "department": "Engineering",
                    "date": "2020-01-01",
                    "isDeleted": true
                }]),
            )
            .unwrap();

        let journal = ReportJournal::load(store);
        assert!(journal.get("r-legacy").is_some());
    }

    #[test]
    fn test_load_purges_expired_trash() {
        let store = Arc::new(MemoryStore::new());
        let old = Utc::now() - Duration::days(31);
        let recent = Utc::now() - Duration::days(10);
        store
            .save(
                keys::REPORTS,
                &json!([
                    {
                        "id": "r-old",
                        "userId": "u-1",
                        "userName": "Ada",
                        "userAvatar": "",
                        "timestamp": old.to_rfc3339(),
                        "status": "DONE",
                        "content": "expired",
                        "department": "Engineering",
                        "date": "2024-01-01",
                        "isDeleted": true,
                        "deletedAt": old.to_rfc3339()
                    },
                    {
                        "id": "r-recent",
                        "userId": "u-1",
                        "userName": "Ada",
                        "userAvatar": "",
                        "timestamp": recent.to_rfc3339(),
                        "status": "DONE",
                        "content": "still recoverable",
                        "department": "Engineering",
                        "date": "2024-01-20",
                        "isDeleted": true,
                        "deletedAt": recent.to_rfc3339()
                    }
                ]),
            )
            .unwrap();

        let journal = ReportJournal::load(store);
        assert!(journal.get("r-old").is_none());
        assert!(journal.get("r-recent").is_some());
    }

    #[test]
    fn test_load_tolerates_corrupted_collection() {
        let store = Arc::new(MemoryStore::new());
        store
            .save(keys::REPORTS, &json!({"definitely": "not a report array"}))
            .unwrap();

        let journal = ReportJournal::load(store);
        assert!(journal.is_empty());
    }

    // ========================================================================
    // Queries
    // ========================================================================

    #[test]
    fn test_history_filter_matches_content_blockers_and_date() {
        let user = test_user();
        let mut journal = journal();

        journal
            .add_report(
                Some(&user),
                ReportDraft {
                    content: "Fixed the login page".to_string(),
                    blockers: "Waiting on the Blocker team".to_string(),
                    date: NaiveDate::from_ymd_opt(2024, 3, 1),
                    ..Default::default()
                },
                false,
            )
            .unwrap();
        journal
            .add_report(
                Some(&user),
                ReportDraft {
                    content: "Nothing notable".to_string(),
                    date: NaiveDate::from_ymd_opt(2024, 4, 2),
                    ..Default::default()
                },
                false,
            )
            .unwrap();

        let hits = journal.history("u-1", Some("BLOCKER"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].content, "Fixed the login page");

        // Date substring match
        let by_date = journal.history("u-1", Some("2024-04"));
        assert_eq!(by_date.len(), 1);
        assert_eq!(by_date[0].content, "Nothing notable");

        // Blank query returns everything submitted
        assert_eq!(journal.history("u-1", Some("   ")).len(), 2);
        assert_eq!(journal.history("u-1", None).len(), 2);
    }

    #[test]
    fn test_history_excludes_drafts_trash_and_other_users() {
        let mine = test_user();
        let theirs = User {
            id: "u-2".to_string(),
            email: "grace@example.com".to_string(),
            ..test_user()
        };
        let mut journal = journal();

        journal
            .add_report(Some(&mine), draft_with("submitted"), false)
            .unwrap();
        journal
            .add_report(Some(&mine), draft_with("a draft"), true)
            .unwrap();
        journal
            .add_report(Some(&theirs), draft_with("someone else"), false)
            .unwrap();
        let trashed = journal
            .add_report(Some(&mine), draft_with("trashed"), false)
            .unwrap()
            .unwrap()
            .id;
        journal.move_to_trash(&trashed).unwrap();

        let history = journal.history("u-1", None);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].content, "submitted");

        let drafts = journal.drafts("u-1");
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].content, "a draft");
    }

    // ========================================================================
    // Draft promotion
    // ========================================================================

    #[test]
    fn test_promote_replaces_draft_with_new_entity() {
        let user = test_user();
        let mut journal = journal();
        let draft = journal
            .add_report(
                Some(&user),
                ReportDraft {
                    content: "draft text".to_string(),
                    date: NaiveDate::from_ymd_opt(2024, 5, 5),
                    ..Default::default()
                },
                true,
            )
            .unwrap()
            .unwrap();

        let promoted = journal.promote(&draft.id).unwrap().unwrap();
        assert_ne!(promoted.id, draft.id);
        assert!(!promoted.is_draft);
        assert_eq!(promoted.status, ReportStatus::Done);
        assert_eq!(promoted.content, "draft text");
        assert_eq!(promoted.date, draft.date);

        // The source draft landed in trash
        let old = journal.get(&draft.id).unwrap();
        assert!(old.is_deleted);
        assert!(old.deleted_at.is_some());
        assert!(journal.drafts("u-1").is_empty());
    }

    #[test]
    fn test_promote_rejects_non_drafts() {
        let user = test_user();
        let mut journal = journal();
        let id = journal
            .add_report(Some(&user), draft_with("already submitted"), false)
            .unwrap()
            .unwrap()
            .id;

        assert!(journal.promote(&id).unwrap().is_none());
        assert!(journal.promote("r-404").unwrap().is_none());
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    #[test]
    fn test_mutations_persist_whole_collection() {
        let store: Arc<dyn StorageArea> = Arc::new(MemoryStore::new());
        let user = test_user();

        let mut journal = ReportJournal::load(Arc::clone(&store));
        let id = journal
            .add_report(Some(&user), draft_with("persisted"), false)
            .unwrap()
            .unwrap()
            .id;
        journal.move_to_trash(&id).unwrap();

        // A fresh load sees the trashed report
        let reloaded = ReportJournal::load(store);
        let report = reloaded.get(&id).unwrap();
        assert!(report.is_deleted);
        assert_eq!(report.content, "persisted");
    }
}
