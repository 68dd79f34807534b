//! The in-memory application collection and its mirror in key-value storage.
//!
//! Every mutation writes the whole collection back; there are no incremental
//! writes. Display order is never stored, `query` computes it each call.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::dto::application_dto::ApplicationPayload;
use crate::error::{Error, Result};
use crate::models::application::{ApplicationStatus, JobApplication};
use crate::models::query::{SortKey, StatusFilter};
use crate::models::stats::{ApplicationStats, StatusCount};
use crate::storage::{KeyValueStorage, APPLICATIONS_KEY, CORRUPT_APPLICATIONS_KEY};
use crate::utils::salary::extract_salary;
use crate::utils::time;

pub const DEFAULT_TIMELINE_LIMIT: usize = 5;

pub struct ApplicationStore {
    storage: Arc<dyn KeyValueStorage>,
    applications: Vec<JobApplication>,
    /// Records taken out by `begin_edit` and not yet committed or cancelled.
    editing: HashMap<String, JobApplication>,
}

impl ApplicationStore {
    /// Reads the collection once. Absent, unreadable or malformed data never
    /// fails startup: the store starts empty and malformed content is parked
    /// under `jobs.corrupt`.
    pub fn load(storage: Arc<dyn KeyValueStorage>) -> Self {
        let applications = match storage.get(APPLICATIONS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<JobApplication>>(&raw) {
                Ok(applications) => applications,
                Err(e) => {
                    warn!(error = %e, "Stored applications are malformed; starting empty");
                    if let Err(e) = storage.set(CORRUPT_APPLICATIONS_KEY, &raw) {
                        warn!(error = %e, "Could not preserve malformed applications");
                    }
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Could not read stored applications; starting empty");
                Vec::new()
            }
        };

        info!(count = applications.len(), "Loaded applications");
        Self {
            storage,
            applications,
            editing: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.applications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.applications.is_empty()
    }

    pub fn all(&self) -> &[JobApplication] {
        &self.applications
    }

    pub fn get(&self, id: &str) -> Option<&JobApplication> {
        self.applications.iter().find(|a| a.id == id)
    }

    pub fn add(&mut self, payload: ApplicationPayload) -> Result<JobApplication> {
        let payload = payload.normalized();
        payload.validate()?;

        let application = build_application(Uuid::new_v4().to_string(), time::now(), payload);
        let snapshot = self.applications.clone();
        self.applications.push(application.clone());
        self.persist_or_rollback(snapshot)?;

        info!(id = %application.id, company = %application.company, "Application added");
        Ok(application)
    }

    /// Takes the record out of the collection and hands back its fields for
    /// an edit form. The removal is not persisted until `commit_edit`.
    /// Opening an edit that is already pending hands back the same draft.
    pub fn begin_edit(&mut self, id: &str) -> Option<ApplicationPayload> {
        if let Some(pending) = self.editing.get(id) {
            debug!(id, "Edit reopened");
            return Some(ApplicationPayload::from(pending));
        }

        let index = self.applications.iter().position(|a| a.id == id)?;
        let application = self.applications.remove(index);
        let draft = ApplicationPayload::from(&application);
        self.editing.insert(application.id.clone(), application);

        debug!(id, "Edit started");
        Some(draft)
    }

    /// Re-inserts an edited record under its original id and creation time.
    /// Works both after `begin_edit` and as a direct update of a stored record.
    pub fn commit_edit(&mut self, id: &str, payload: ApplicationPayload) -> Result<JobApplication> {
        let payload = payload.normalized();
        payload.validate()?;

        let snapshot = self.applications.clone();
        let pending = self.editing.remove(id);
        let created_at = match &pending {
            Some(original) => original.created_at,
            None => {
                let index = self
                    .applications
                    .iter()
                    .position(|a| a.id == id)
                    .ok_or_else(|| Error::NotFound(format!("Application {} not found", id)))?;
                self.applications.remove(index).created_at
            }
        };

        let application = build_application(id.to_string(), created_at, payload);
        self.applications.push(application.clone());
        if let Err(e) = self.persist_or_rollback(snapshot) {
            if let Some(original) = pending {
                self.editing.insert(original.id.clone(), original);
            }
            return Err(e);
        }

        info!(id, "Application updated");
        Ok(application)
    }

    /// Puts a record taken out by `begin_edit` back untouched. Returns whether
    /// there was anything to restore.
    pub fn cancel_edit(&mut self, id: &str) -> bool {
        match self.editing.remove(id) {
            Some(application) => {
                self.applications.push(application);
                debug!(id, "Edit cancelled");
                true
            }
            None => false,
        }
    }

    /// Deleting an unknown id is a no-op, not an error. A pending edit of
    /// the record is dropped too, so it cannot be restored afterwards.
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        let snapshot = self.applications.clone();
        self.applications.retain(|a| a.id != id);
        let pending = self.editing.remove(id);
        let removed = self.applications.len() != snapshot.len() || pending.is_some();

        if let Err(e) = self.persist_or_rollback(snapshot) {
            if let Some(original) = pending {
                self.editing.insert(original.id.clone(), original);
            }
            return Err(e);
        }
        if removed {
            info!(id, "Application deleted");
        }
        Ok(removed)
    }

    pub fn query(&self, search: &str, status: StatusFilter, sort: SortKey) -> Vec<JobApplication> {
        let needle = search.trim().to_lowercase();
        let mut matches: Vec<JobApplication> = self
            .applications
            .iter()
            .filter(|a| status.matches(a.status) && matches_search(a, &needle))
            .cloned()
            .collect();

        match sort {
            SortKey::DateAsc => matches.sort_by(|a, b| a.date.cmp(&b.date)),
            SortKey::DateDesc => matches.sort_by(|a, b| b.date.cmp(&a.date)),
            SortKey::Title => matches.sort_by(|a, b| compare_text(&a.title, &b.title)),
            SortKey::Company => matches.sort_by(|a, b| compare_text(&a.company, &b.company)),
            SortKey::SalaryDesc => matches.sort_by(|a, b| {
                extract_salary(b.salary.as_deref()).total_cmp(&extract_salary(a.salary.as_deref()))
            }),
        }
        matches
    }

    pub fn stats(&self) -> ApplicationStats {
        let count = |f: fn(&JobApplication) -> bool| self.applications.iter().filter(|a| f(a)).count();

        ApplicationStats {
            total: self.applications.len(),
            active: count(|a| a.status.is_active()),
            interview: count(|a| a.status == ApplicationStatus::Interview),
            offer: count(|a| a.status == ApplicationStatus::Offer),
        }
    }

    /// Count for every status, zeros included, in chart order.
    pub fn status_breakdown(&self) -> Vec<StatusCount> {
        ApplicationStatus::ALL
            .into_iter()
            .map(|status| StatusCount {
                status,
                count: self.applications.iter().filter(|a| a.status == status).count(),
            })
            .collect()
    }

    /// Most recent applications by date.
    pub fn timeline(&self, limit: usize) -> Vec<JobApplication> {
        let mut recent = self.applications.clone();
        recent.sort_by(|a, b| b.date.cmp(&a.date));
        recent.truncate(limit);
        recent
    }

    pub fn persist(&self) -> Result<()> {
        let serialized = serde_json::to_string(&self.applications)?;
        self.storage.set(APPLICATIONS_KEY, &serialized)
    }

    /// Persists, or restores `snapshot` so memory never runs ahead of storage.
    fn persist_or_rollback(&mut self, snapshot: Vec<JobApplication>) -> Result<()> {
        if let Err(e) = self.persist() {
            warn!(error = %e, "Persisting applications failed; change rolled back");
            self.applications = snapshot;
            return Err(e);
        }
        Ok(())
    }
}

fn build_application(
    id: String,
    created_at: chrono::DateTime<chrono::Utc>,
    payload: ApplicationPayload,
) -> JobApplication {
    JobApplication {
        id,
        title: payload.title,
        company: payload.company,
        date: payload.date.unwrap_or_else(time::today),
        status: payload.status,
        priority: payload.priority,
        url: payload.url,
        location: payload.location,
        salary: payload.salary,
        notes: payload.notes,
        interview: payload.interview,
        created_at,
    }
}

fn matches_search(application: &JobApplication, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    application.title.to_lowercase().contains(needle)
        || application.company.to_lowercase().contains(needle)
        || application
            .location
            .as_deref()
            .is_some_and(|location| location.to_lowercase().contains(needle))
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use chrono::NaiveDate;

    struct FailingStorage;

    impl KeyValueStorage for FailingStorage {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(Error::Storage("disk full".to_string()))
        }

        fn remove(&self, _key: &str) -> Result<()> {
            Ok(())
        }
    }

    fn empty_store() -> (ApplicationStore, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        (ApplicationStore::load(storage.clone()), storage)
    }

    fn payload(title: &str, company: &str, status: ApplicationStatus) -> ApplicationPayload {
        ApplicationPayload {
            title: title.to_string(),
            company: company.to_string(),
            status,
            ..Default::default()
        }
    }

    fn dated(title: &str, day: u32) -> ApplicationPayload {
        ApplicationPayload {
            date: NaiveDate::from_ymd_opt(2024, 1, day),
            ..payload(title, "Acme", ApplicationStatus::Applied)
        }
    }

    fn with_salary(title: &str, salary: Option<&str>) -> ApplicationPayload {
        ApplicationPayload {
            salary: salary.map(str::to_string),
            ..payload(title, "Acme", ApplicationStatus::Applied)
        }
    }

    #[test]
    fn add_assigns_id_and_persists() {
        let (mut store, storage) = empty_store();

        let created = store
            .add(payload("Engineer", "Acme", ApplicationStatus::Applied))
            .unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&created.id), Some(&created));
        assert_eq!(created.date, time::today());

        let raw = storage.get(APPLICATIONS_KEY).unwrap().unwrap();
        let stored: Vec<JobApplication> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored, vec![created]);
    }

    #[test]
    fn ids_are_unique() {
        let (mut store, _) = empty_store();
        let a = store.add(payload("A", "Acme", ApplicationStatus::Saved)).unwrap();
        let b = store.add(payload("A", "Acme", ApplicationStatus::Saved)).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn blank_required_fields_leave_collection_untouched() {
        let (mut store, storage) = empty_store();
        store.add(payload("Engineer", "Acme", ApplicationStatus::Applied)).unwrap();
        let before = storage.get(APPLICATIONS_KEY).unwrap();

        for bad in [
            payload("", "Acme", ApplicationStatus::Applied),
            payload("Engineer", "   ", ApplicationStatus::Applied),
            payload(" ", "", ApplicationStatus::Applied),
        ] {
            assert!(matches!(store.add(bad), Err(Error::Validation(_))));
        }

        assert_eq!(store.len(), 1);
        assert_eq!(storage.get(APPLICATIONS_KEY).unwrap(), before);
    }

    #[test]
    fn text_fields_are_trimmed() {
        let (mut store, _) = empty_store();
        let created = store
            .add(ApplicationPayload {
                location: Some("  ".into()),
                notes: Some(" call back ".into()),
                ..payload("  Engineer ", " Acme", ApplicationStatus::Applied)
            })
            .unwrap();

        assert_eq!(created.title, "Engineer");
        assert_eq!(created.company, "Acme");
        assert_eq!(created.location, None);
        assert_eq!(created.notes.as_deref(), Some("call back"));
    }

    #[test]
    fn remove_is_idempotent() {
        let (mut store, _) = empty_store();
        let keep = store.add(payload("Keep", "Acme", ApplicationStatus::Applied)).unwrap();
        let gone = store.add(payload("Gone", "Acme", ApplicationStatus::Applied)).unwrap();

        assert!(store.remove(&gone.id).unwrap());
        assert!(!store.remove(&gone.id).unwrap());
        assert!(!store.remove("no-such-id").unwrap());

        let ids: Vec<_> = store
            .query("", StatusFilter::All, SortKey::DateDesc)
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec![keep.id]);
    }

    #[test]
    fn query_does_not_mutate() {
        let (mut store, _) = empty_store();
        store.add(dated("B", 2)).unwrap();
        store.add(dated("A", 1)).unwrap();
        store.add(dated("C", 3)).unwrap();
        let before = store.all().to_vec();

        let first = store.query("", StatusFilter::All, SortKey::Title);
        let second = store.query("", StatusFilter::All, SortKey::Title);

        assert_eq!(first, second);
        assert_eq!(store.all(), before.as_slice());
    }

    #[test]
    fn search_matches_title_company_and_location_case_insensitively() {
        let (mut store, _) = empty_store();
        store
            .add(ApplicationPayload {
                location: Some("Berlin".into()),
                ..payload("Engineer", "Acme", ApplicationStatus::Applied)
            })
            .unwrap();
        store.add(payload("Designer", "Globex", ApplicationStatus::Applied)).unwrap();

        let titles = |term: &str| -> Vec<String> {
            store
                .query(term, StatusFilter::All, SortKey::Title)
                .into_iter()
                .map(|a| a.title)
                .collect()
        };

        assert_eq!(titles("ENGIN"), vec!["Engineer"]);
        assert_eq!(titles("globex"), vec!["Designer"]);
        assert_eq!(titles("berl"), vec!["Engineer"]);
        assert!(titles("paris").is_empty());
        assert_eq!(titles(""), vec!["Designer", "Engineer"]);
    }

    #[test]
    fn status_filter_returns_only_that_status() {
        let (mut store, _) = empty_store();
        store.add(payload("A", "Acme", ApplicationStatus::Applied)).unwrap();
        store.add(payload("B", "Acme", ApplicationStatus::Offer)).unwrap();
        store.add(payload("C", "Acme", ApplicationStatus::Offer)).unwrap();

        let offers = store.query("", StatusFilter::Only(ApplicationStatus::Offer), SortKey::Title);
        assert_eq!(offers.len(), 2);
        assert!(offers.iter().all(|a| a.status == ApplicationStatus::Offer));
    }

    #[test]
    fn sorts_by_date_both_ways() {
        let (mut store, _) = empty_store();
        store.add(dated("Middle", 15)).unwrap();
        store.add(dated("Oldest", 1)).unwrap();
        store.add(dated("Newest", 30)).unwrap();

        let order = |sort| -> Vec<String> {
            store
                .query("", StatusFilter::All, sort)
                .into_iter()
                .map(|a| a.title)
                .collect()
        };

        assert_eq!(order(SortKey::DateDesc), vec!["Newest", "Middle", "Oldest"]);
        assert_eq!(order(SortKey::DateAsc), vec!["Oldest", "Middle", "Newest"]);
    }

    #[test]
    fn title_sort_is_non_decreasing() {
        let (mut store, _) = empty_store();
        for title in ["delta", "Alpha", "charlie", "Bravo", "alpha"] {
            store.add(payload(title, "Acme", ApplicationStatus::Applied)).unwrap();
        }

        let titles: Vec<String> = store
            .query("", StatusFilter::All, SortKey::Title)
            .into_iter()
            .map(|a| a.title.to_lowercase())
            .collect();
        assert!(titles.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn salary_sort_puts_unparseable_last() {
        let (mut store, _) = empty_store();
        store.add(with_salary("Mid", Some("$50,000 - $80,000"))).unwrap();
        store.add(with_salary("None", None)).unwrap();
        store.add(with_salary("Top", Some("$120,000 - $160,000"))).unwrap();

        let titles: Vec<String> = store
            .query("", StatusFilter::All, SortKey::SalaryDesc)
            .into_iter()
            .map(|a| a.title)
            .collect();
        assert_eq!(titles, vec!["Top", "Mid", "None"]);
    }

    #[test]
    fn stats_scenario() {
        let (mut store, _) = empty_store();
        store.add(payload("Engineer", "Acme", ApplicationStatus::Applied)).unwrap();
        store.add(payload("Designer", "Acme", ApplicationStatus::Interview)).unwrap();

        assert_eq!(
            store.stats(),
            ApplicationStats {
                total: 2,
                active: 2,
                interview: 1,
                offer: 0,
            }
        );
    }

    #[test]
    fn offers_and_rejections_are_not_active() {
        let (mut store, _) = empty_store();
        store.add(payload("A", "Acme", ApplicationStatus::Offer)).unwrap();
        store.add(payload("B", "Acme", ApplicationStatus::Rejected)).unwrap();
        store.add(payload("C", "Acme", ApplicationStatus::Saved)).unwrap();

        let stats = store.stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.active, 1);
        assert_eq!(stats.offer, 1);
    }

    #[test]
    fn status_breakdown_lists_every_status() {
        let (mut store, _) = empty_store();
        store.add(payload("A", "Acme", ApplicationStatus::Interview)).unwrap();
        store.add(payload("B", "Acme", ApplicationStatus::Interview)).unwrap();

        let breakdown = store.status_breakdown();
        let statuses: Vec<_> = breakdown.iter().map(|c| c.status).collect();
        assert_eq!(statuses, ApplicationStatus::ALL.to_vec());
        assert_eq!(breakdown[2].count, 2);
        assert_eq!(breakdown.iter().map(|c| c.count).sum::<usize>(), 2);
    }

    #[test]
    fn timeline_keeps_most_recent() {
        let (mut store, _) = empty_store();
        for day in 1..=7 {
            store.add(dated(&format!("Day {}", day), day)).unwrap();
        }

        let titles: Vec<String> = store
            .timeline(DEFAULT_TIMELINE_LIMIT)
            .into_iter()
            .map(|a| a.title)
            .collect();
        assert_eq!(titles, vec!["Day 7", "Day 6", "Day 5", "Day 4", "Day 3"]);
    }

    #[test]
    fn begin_edit_removes_without_persisting() {
        let (mut store, storage) = empty_store();
        let created = store.add(payload("Engineer", "Acme", ApplicationStatus::Applied)).unwrap();
        let persisted = storage.get(APPLICATIONS_KEY).unwrap();

        let draft = store.begin_edit(&created.id).unwrap();

        assert_eq!(draft.title, "Engineer");
        assert_eq!(draft.date, Some(created.date));
        assert!(store.get(&created.id).is_none());
        assert_eq!(storage.get(APPLICATIONS_KEY).unwrap(), persisted);
        assert!(store.begin_edit("missing").is_none());
    }

    #[test]
    fn commit_edit_keeps_id_and_created_at() {
        let (mut store, _) = empty_store();
        let created = store.add(payload("Engineer", "Acme", ApplicationStatus::Applied)).unwrap();

        let mut draft = store.begin_edit(&created.id).unwrap();
        draft.status = ApplicationStatus::Interview;
        draft.title = "Senior Engineer".into();
        let updated = store.commit_edit(&created.id, draft).unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&created.id).unwrap().title, "Senior Engineer");
        assert_eq!(store.stats().interview, 1);
    }

    #[test]
    fn invalid_commit_keeps_edit_pending() {
        let (mut store, _) = empty_store();
        let created = store.add(payload("Engineer", "Acme", ApplicationStatus::Applied)).unwrap();
        store.begin_edit(&created.id).unwrap();

        let result = store.commit_edit(&created.id, payload("", "Acme", ApplicationStatus::Applied));
        assert!(matches!(result, Err(Error::Validation(_))));

        assert!(store.cancel_edit(&created.id));
        assert_eq!(store.get(&created.id), Some(&created));
    }

    #[test]
    fn commit_without_begin_updates_in_place() {
        let (mut store, _) = empty_store();
        let created = store.add(payload("Engineer", "Acme", ApplicationStatus::Applied)).unwrap();

        let updated = store
            .commit_edit(&created.id, payload("Engineer", "Acme", ApplicationStatus::Offer))
            .unwrap();
        assert_eq!(updated.status, ApplicationStatus::Offer);
        assert_eq!(store.len(), 1);

        let missing = store.commit_edit("nope", payload("X", "Y", ApplicationStatus::Saved));
        assert!(matches!(missing, Err(Error::NotFound(_))));
    }

    #[test]
    fn cancel_edit_restores_record() {
        let (mut store, _) = empty_store();
        let created = store.add(payload("Engineer", "Acme", ApplicationStatus::Applied)).unwrap();

        store.begin_edit(&created.id).unwrap();
        assert!(store.cancel_edit(&created.id));
        assert!(!store.cancel_edit(&created.id));
        assert_eq!(store.get(&created.id), Some(&created));
    }

    #[test]
    fn remove_during_edit_cannot_be_undone_by_cancel() {
        let (mut store, storage) = empty_store();
        let created = store.add(payload("Engineer", "Acme", ApplicationStatus::Applied)).unwrap();

        store.begin_edit(&created.id).unwrap();
        assert!(store.remove(&created.id).unwrap());

        assert!(!store.cancel_edit(&created.id));
        assert!(store.get(&created.id).is_none());
        assert!(store
            .query("", StatusFilter::All, SortKey::DateDesc)
            .iter()
            .all(|a| a.id != created.id));

        let committed = store.commit_edit(&created.id, payload("Engineer", "Acme", ApplicationStatus::Offer));
        assert!(matches!(committed, Err(Error::NotFound(_))));

        let reloaded = ApplicationStore::load(storage);
        assert!(reloaded.is_empty());
    }

    #[test]
    fn reopening_pending_edit_returns_same_draft() {
        let (mut store, _) = empty_store();
        let created = store.add(payload("Engineer", "Acme", ApplicationStatus::Interview)).unwrap();

        let first = store.begin_edit(&created.id).unwrap();
        let second = store.begin_edit(&created.id).unwrap();
        assert_eq!(first, second);

        assert!(store.cancel_edit(&created.id));
        assert_eq!(store.len(), 1);
        assert!(!store.cancel_edit(&created.id));
    }

    #[test]
    fn persist_then_load_round_trips() {
        let (mut store, storage) = empty_store();
        store
            .add(ApplicationPayload {
                salary: Some("$90,000".into()),
                location: Some("Remote".into()),
                ..payload("Engineer", "Acme", ApplicationStatus::Interview)
            })
            .unwrap();
        store.add(payload("Designer", "Globex", ApplicationStatus::Saved)).unwrap();

        let reloaded = ApplicationStore::load(storage);
        assert_eq!(reloaded.all(), store.all());
    }

    #[test]
    fn malformed_storage_loads_empty_and_is_preserved() {
        let storage = Arc::new(MemoryStorage::with_entry(APPLICATIONS_KEY, "{not json"));
        let store = ApplicationStore::load(storage.clone());

        assert!(store.is_empty());
        assert_eq!(
            storage.get(CORRUPT_APPLICATIONS_KEY).unwrap().as_deref(),
            Some("{not json")
        );
    }

    #[test]
    fn storage_failure_is_reported() {
        let mut store = ApplicationStore::load(Arc::new(FailingStorage));
        let result = store.add(payload("Engineer", "Acme", ApplicationStatus::Applied));
        assert!(matches!(result, Err(Error::Storage(_))));
        assert!(store.is_empty());
    }
}
