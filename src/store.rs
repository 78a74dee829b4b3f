//! Progress Persistence
//!
//! Saves and restores session state through a single named JSON slot,
//! overwritten on every save. The slot is one JSON object: `words` (the
//! queue), `completed`, `missed`, and an optional `filter`. There is no
//! schema version; a slot that fails to parse is treated as absent.

use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::WordCatalog;
use crate::filter::filter_match;
use crate::queue::SessionState;
use crate::types::{FilterSpec, WordEntry};

/// File name of the persistence slot.
pub const SLOT_FILE: &str = "flashcards.json";

// ============================================================
// Errors
// ============================================================

/// Storage error type.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

// ============================================================
// Wire format
// ============================================================

/// On-disk shape of a saved session.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SavedSession {
    /// Queue snapshot, head first.
    words: Vec<WordEntry>,
    completed: Vec<WordEntry>,
    missed: u32,
    #[serde(default)]
    filter: Option<FilterSpec>,
}

// ============================================================
// ProgressStore
// ============================================================

/// Slot-file persistence for session progress.
pub struct ProgressStore {
    path: PathBuf,
}

impl ProgressStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// A store using the standard slot file name inside `dir`.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self::new(dir.as_ref().join(SLOT_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the slot with the given state. Creates the parent
    /// directory on first save.
    pub fn save(&self, state: &SessionState) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let saved = SavedSession {
            words: state.queue.iter().cloned().collect(),
            completed: state.completed.clone(),
            missed: state.miss_count,
            filter: Some(state.active_filter.clone()),
        };

        let json = serde_json::to_string(&saved)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Restore the saved session, or `None` when there is nothing
    /// usable to restore.
    ///
    /// Any failure (missing slot, malformed JSON, wrong shape) degrades
    /// to `None` so the caller can start a fresh session; malformed
    /// slots are logged, never propagated. The queue is re-derived by
    /// re-filtering the saved snapshots through the saved filter, so
    /// entries that drifted out of the filter's scope between sessions
    /// are dropped rather than trusted. A missing filter falls back to
    /// the catalog's all-inclusive filter.
    pub fn load(&self, catalog: &WordCatalog) -> Option<SessionState> {
        let saved = match self.read_slot() {
            Ok(saved) => saved,
            Err(StorageError::Io(err)) if err.kind() == io::ErrorKind::NotFound => return None,
            Err(err) => {
                tracing::warn!(error = %err, path = %self.path.display(), "discarding unreadable save slot");
                return None;
            }
        };

        let filter = saved
            .filter
            .unwrap_or_else(|| catalog.all_filter());

        let queue: VecDeque<WordEntry> = saved
            .words
            .iter()
            .filter(|word| filter_match(word, &filter))
            .cloned()
            .collect();

        let dropped = saved.words.len() - queue.len();
        if dropped > 0 {
            tracing::warn!(dropped, "saved cards no longer match the saved filter");
        }

        Some(SessionState {
            queue,
            completed: saved.completed,
            miss_count: saved.missed,
            active_filter: filter,
        })
    }

    /// Delete the slot. Missing slots are fine.
    pub fn clear(&self) -> StorageResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn read_slot(&self) -> StorageResult<SavedSession> {
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WordClass;
    use tempfile::TempDir;

    fn word(hanzi: &str, lesson: u32, class: WordClass) -> WordEntry {
        WordEntry {
            hanzi: hanzi.to_string(),
            pinyin: "x".to_string(),
            lesson,
            word_class: class,
            definition: format!("{hanzi} definition"),
            variants: Vec::new(),
            simplified: None,
        }
    }

    fn catalog() -> WordCatalog {
        WordCatalog::from_entries(vec![
            word("a", 1, WordClass::Noun),
            word("b", 1, WordClass::Verb),
            word("c", 2, WordClass::Noun),
        ])
    }

    fn state_with_queue(words: Vec<WordEntry>, filter: FilterSpec) -> SessionState {
        SessionState {
            queue: words.into(),
            completed: vec![],
            miss_count: 0,
            active_filter: filter,
        }
    }

    #[test]
    fn load_returns_none_without_a_slot() {
        let dir = TempDir::new().unwrap();
        let store = ProgressStore::in_dir(dir.path());
        assert!(store.load(&catalog()).is_none());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = ProgressStore::in_dir(dir.path());
        let catalog = catalog();

        let mut state = state_with_queue(
            vec![word("b", 1, WordClass::Verb), word("c", 2, WordClass::Noun)],
            catalog.all_filter(),
        );
        state.completed.push(word("a", 1, WordClass::Noun));
        state.miss_count = 4;

        store.save(&state).unwrap();
        let restored = store.load(&catalog).unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn load_refilters_the_saved_queue() {
        let dir = TempDir::new().unwrap();
        let store = ProgressStore::in_dir(dir.path());

        // the saved queue claims "c" (lesson 2), but the saved filter
        // only admits lesson 1 - drift must be dropped on load
        let filter = FilterSpec::new([1], [WordClass::Noun, WordClass::Verb]);
        let state = state_with_queue(
            vec![
                word("a", 1, WordClass::Noun),
                word("c", 2, WordClass::Noun),
                word("b", 1, WordClass::Verb),
            ],
            filter,
        );
        store.save(&state).unwrap();

        let restored = store.load(&catalog()).unwrap();
        let hanzi: Vec<&str> = restored.queue.iter().map(|w| w.hanzi.as_str()).collect();
        assert_eq!(hanzi, vec!["a", "b"]);
    }

    #[test]
    fn load_with_null_filter_uses_the_all_inclusive_filter() {
        let dir = TempDir::new().unwrap();
        let store = ProgressStore::in_dir(dir.path());
        let catalog = catalog();

        fs::write(
            store.path(),
            r#"{"words":[{"hanzi":"a","pinyin":"x","lesson":1,"type":"n.","definition":"a definition"}],"completed":[],"missed":0,"filter":null}"#,
        )
        .unwrap();

        let restored = store.load(&catalog).unwrap();
        assert_eq!(restored.active_filter, catalog.all_filter());
        assert_eq!(restored.queue.len(), 1);
    }

    #[test]
    fn malformed_slots_degrade_to_none() {
        let dir = TempDir::new().unwrap();
        let store = ProgressStore::in_dir(dir.path());
        let catalog = catalog();

        for bad in [
            "not json at all",
            "{}",
            r#"{"words":"wrong","completed":[],"missed":0}"#,
            r#"{"words":[],"completed":[],"missed":"three"}"#,
        ] {
            fs::write(store.path(), bad).unwrap();
            assert!(store.load(&catalog).is_none(), "accepted: {bad}");
        }
    }

    #[test]
    fn save_overwrites_the_previous_slot() {
        let dir = TempDir::new().unwrap();
        let store = ProgressStore::in_dir(dir.path());
        let catalog = catalog();
        let filter = catalog.all_filter();

        store
            .save(&state_with_queue(vec![word("a", 1, WordClass::Noun)], filter.clone()))
            .unwrap();
        store
            .save(&state_with_queue(vec![word("b", 1, WordClass::Verb)], filter))
            .unwrap();

        let restored = store.load(&catalog).unwrap();
        assert_eq!(restored.queue.len(), 1);
        assert_eq!(restored.queue[0].hanzi, "b");
    }

    #[test]
    fn clear_removes_the_slot_and_tolerates_absence() {
        let dir = TempDir::new().unwrap();
        let store = ProgressStore::in_dir(dir.path());
        let catalog = catalog();

        store.clear().unwrap();
        store
            .save(&state_with_queue(vec![word("a", 1, WordClass::Noun)], catalog.all_filter()))
            .unwrap();
        store.clear().unwrap();
        assert!(store.load(&catalog).is_none());
    }
}
