use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use super::filter::{FilterMatcher, HistoryFilter};
use crate::models::{GenerationResult, HistoryEntry, LanguageTag};
use crate::storage::{HISTORY_KEY, KeyValueStore, StorageError, Written};

/// Ordered, persisted collection of past generations (newest first).
///
/// The in-memory collection is the source of truth for the session. Every
/// mutation re-serializes the whole collection; a failed write is reported
/// through [`Written`] and never undoes the mutation.
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
    storage: Arc<dyn KeyValueStore>,
}

impl HistoryStore {
    /// Load the collection from storage. Never fails: a missing, unreadable, or
    /// malformed value yields an empty collection.
    ///
    /// Entries stored without an id, or with a repeated one, get a fresh id that
    /// is written back immediately so it stays the same on the next load.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let (entries, ids_assigned) = load_entries(storage.as_ref());
        debug!(count = entries.len(), ids_assigned, "loaded history");

        let store = Self { entries, storage };
        if ids_assigned > 0 {
            // Failure is already logged; the ids still hold for this session
            let _ = store.persist();
        }
        store
    }

    /// Record a successful generation as the new head of the collection
    pub fn record(&mut self, result: GenerationResult) -> Written<HistoryEntry> {
        self.record_at(result, Utc::now())
    }

    /// Like [`record`](Self::record) with an explicit clock reading.
    ///
    /// If `now` is not strictly after the current head's timestamp the entry is
    /// stamped one microsecond after the head, keeping head-first order strictly
    /// decreasing in time.
    pub fn record_at(&mut self, result: GenerationResult, now: DateTime<Utc>) -> Written<HistoryEntry> {
        let timestamp = match self.entries.first() {
            Some(head) if now <= head.timestamp => head.timestamp + Duration::microseconds(1),
            _ => now,
        };

        let entry = HistoryEntry::from_result(result, timestamp);
        self.entries.insert(0, entry.clone());
        debug!(id = %entry.id, language = %entry.language, "recorded history entry");

        Written::new(entry, self.persist())
    }

    /// Flip the favorite flag of the entry with the given id.
    ///
    /// Returns `None` (and changes nothing) if no entry has that id.
    pub fn toggle_favorite_by_id(&mut self, id: Uuid) -> Option<Written<HistoryEntry>> {
        let entry = self.entries.iter_mut().find(|e| e.id == id)?;
        entry.favorite = !entry.favorite;
        let entry = entry.clone();
        Some(Written::new(entry, self.persist()))
    }

    /// Flip the favorite flag of the entry at `position` in the view produced by
    /// `filter`. The position is resolved to the entry's id first, so an active
    /// filter never redirects the toggle to a different entry.
    pub fn toggle_favorite(
        &mut self,
        filter: &HistoryFilter,
        position: usize,
    ) -> Option<Written<HistoryEntry>> {
        let id = self.query(filter).get(position)?.id;
        self.toggle_favorite_by_id(id)
    }

    /// Remove every entry and delete the stored value.
    ///
    /// Irreversible; callers must obtain explicit confirmation first.
    pub fn clear(&mut self) -> Written<usize> {
        let removed = self.entries.len();
        self.entries.clear();
        Written::new(removed, self.storage.remove(HISTORY_KEY))
    }

    /// Borrowed view of the entries matching `filter`, head-first
    pub fn query<'a, 'f>(&'a self, filter: &'f HistoryFilter) -> HistoryView<'a, 'f> {
        HistoryView { entries: &self.entries, filter }
    }

    pub fn get(&self, id: Uuid) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries whose id starts with `prefix` (hyphens optional)
    pub fn find_by_id_prefix(&self, prefix: &str) -> Vec<&HistoryEntry> {
        let prefix = prefix.to_lowercase().replace('-', "");
        if prefix.is_empty() {
            return Vec::new();
        }
        self.entries.iter().filter(|e| e.id.simple().to_string().starts_with(&prefix)).collect()
    }

    /// Backing collection, head-first
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> HistoryStats {
        let mut counts: HashMap<&LanguageTag, usize> = HashMap::new();
        for entry in &self.entries {
            *counts.entry(&entry.language).or_default() += 1;
        }

        let mut by_language: Vec<(LanguageTag, usize)> =
            counts.into_iter().map(|(tag, count)| (tag.clone(), count)).collect();
        by_language.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.as_str().cmp(b.0.as_str())));

        HistoryStats {
            total: self.entries.len(),
            favorites: self.entries.iter().filter(|e| e.favorite).count(),
            by_language,
            newest: self.entries.first().map(|e| e.timestamp),
            oldest: self.entries.last().map(|e| e.timestamp),
        }
    }

    fn persist(&self) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.entries)
            .map_err(|source| StorageError::Serialize { key: HISTORY_KEY.to_string(), source })?;
        self.storage.set(HISTORY_KEY, &json).inspect_err(|e| {
            warn!("Failed to persist history ({} entries): {}", self.entries.len(), e);
        })
    }
}

/// Deserialize the stored collection, degrading to empty on any failure.
///
/// Returns the entries and how many of them were given a new id.
fn load_entries(storage: &dyn KeyValueStore) -> (Vec<HistoryEntry>, usize) {
    let raw = match storage.get(HISTORY_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return (Vec::new(), 0),
        Err(e) => {
            warn!("Failed to read stored history, starting empty: {}", e);
            return (Vec::new(), 0);
        }
    };

    let mut entries: Vec<HistoryEntry> = match serde_json::from_str(&raw) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Stored history is malformed, starting empty: {}", e);
            return (Vec::new(), 0);
        }
    };

    // Older records carry no id and hand-edited files may repeat one
    let mut seen = HashSet::new();
    let mut assigned = 0;
    for entry in &mut entries {
        if entry.id.is_nil() || !seen.insert(entry.id) {
            entry.id = Uuid::new_v4();
            seen.insert(entry.id);
            assigned += 1;
        }
    }
    if assigned > 0 {
        warn!("Assigned new ids to {} history entries", assigned);
    }

    (entries, assigned)
}

/// Lazy, uncached projection of the history through a filter.
///
/// Every call to [`iter`](Self::iter) re-reads the backing collection, so a
/// view never serves stale results.
///
/// Entries borrow from the store for `'a`, independently of how long the
/// filter (`'f`) lives.
#[derive(Clone, Copy)]
pub struct HistoryView<'a, 'f> {
    entries: &'a [HistoryEntry],
    filter: &'f HistoryFilter,
}

impl<'a, 'f> HistoryView<'a, 'f> {
    pub fn iter(&self) -> HistoryIter<'a, 'f> {
        HistoryIter { inner: self.entries.iter(), matcher: self.filter.matcher() }
    }

    /// Entry at `position` within the filtered view
    pub fn get(&self, position: usize) -> Option<&'a HistoryEntry> {
        self.iter().nth(position)
    }

    pub fn count(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl<'a, 'f> IntoIterator for HistoryView<'a, 'f> {
    type Item = &'a HistoryEntry;
    type IntoIter = HistoryIter<'a, 'f>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct HistoryIter<'a, 'f> {
    inner: std::slice::Iter<'a, HistoryEntry>,
    matcher: FilterMatcher<'f>,
}

impl<'a> Iterator for HistoryIter<'a, '_> {
    type Item = &'a HistoryEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let matcher = &self.matcher;
        self.inner.by_ref().find(|entry| matcher.matches(entry))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

/// Summary counts over the whole collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryStats {
    pub total: usize,
    pub favorites: usize,
    /// Entry count per language, most used first
    pub by_language: Vec<(LanguageTag, usize)>,
    pub newest: Option<DateTime<Utc>>,
    pub oldest: Option<DateTime<Utc>>,
}
