//! Study Session
//!
//! Composition root that wires the queue engine to the progress store.
//! Persistence follows a save-on-write policy: every mutation persists
//! the new state synchronously, and a failed save degrades to a warning
//! so at most one mutation of progress can be lost.

use crate::catalog::WordCatalog;
use crate::queue::{EngineResult, QueueEngine, QueueOptions, SessionPhase, SessionState};
use crate::store::ProgressStore;
use crate::types::{FilterSpec, Score, WordEntry};

/// A study session bound to a persistence slot.
pub struct StudySession {
    engine: QueueEngine,
    store: ProgressStore,
}

impl StudySession {
    /// Open a session: restore saved progress when a usable slot
    /// exists, otherwise start fresh over the full catalog.
    ///
    /// Loading happens here, once, at the request of the caller; it is
    /// never a side effect of construction elsewhere.
    pub fn open(
        catalog: WordCatalog,
        store: ProgressStore,
        options: QueueOptions,
    ) -> EngineResult<Self> {
        let engine = match store.load(&catalog) {
            Some(state) => {
                tracing::info!(
                    remaining = state.queue.len(),
                    completed = state.completed.len(),
                    "restored saved session"
                );
                QueueEngine::from_state(catalog, state, options)
            }
            None => {
                tracing::info!("no saved progress; starting a fresh session");
                QueueEngine::new(catalog, options)?
            }
        };

        Ok(Self { engine, store })
    }

    pub fn current(&self) -> Option<&WordEntry> {
        self.engine.current()
    }

    pub fn phase(&self) -> SessionPhase {
        self.engine.phase()
    }

    pub fn score(&self) -> Score {
        self.engine.score()
    }

    pub fn state(&self) -> &SessionState {
        self.engine.state()
    }

    pub fn catalog(&self) -> &WordCatalog {
        self.engine.catalog()
    }

    pub fn mark_correct(&mut self) -> EngineResult<()> {
        self.engine.mark_correct()?;
        self.persist();
        Ok(())
    }

    pub fn mark_incorrect(&mut self) -> EngineResult<()> {
        self.engine.mark_incorrect()?;
        self.persist();
        Ok(())
    }

    pub fn apply_filter(&mut self, filter: FilterSpec) -> EngineResult<()> {
        self.engine.apply_filter(filter)?;
        self.persist();
        Ok(())
    }

    pub fn reset(&mut self, filter: FilterSpec) -> EngineResult<()> {
        self.engine.reset(filter)?;
        self.persist();
        Ok(())
    }

    /// Fire-and-forget save.
    fn persist(&self) {
        if let Err(err) = self.store.save(self.engine.state()) {
            tracing::warn!(error = %err, "failed to persist session progress");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WordClass;
    use tempfile::TempDir;

    fn catalog() -> WordCatalog {
        let entries = vec![
            WordEntry {
                hanzi: "a".to_string(),
                pinyin: "x".to_string(),
                lesson: 1,
                word_class: WordClass::Noun,
                definition: "a definition".to_string(),
                variants: Vec::new(),
                simplified: None,
            },
            WordEntry {
                hanzi: "b".to_string(),
                pinyin: "x".to_string(),
                lesson: 2,
                word_class: WordClass::Verb,
                definition: "b definition".to_string(),
                variants: Vec::new(),
                simplified: None,
            },
        ];
        WordCatalog::from_entries(entries)
    }

    fn options() -> QueueOptions {
        QueueOptions { seed: Some(11) }
    }

    #[test]
    fn answers_are_persisted_immediately() {
        let dir = TempDir::new().unwrap();
        let store = ProgressStore::in_dir(dir.path());
        let mut session = StudySession::open(catalog(), store, options()).unwrap();

        session.mark_correct().unwrap();

        // a second store over the same slot sees the mutation
        let reread = ProgressStore::in_dir(dir.path());
        let restored = reread.load(&catalog()).unwrap();
        assert_eq!(restored.completed.len(), 1);
        assert_eq!(restored.queue.len(), 1);
    }

    #[test]
    fn reopening_restores_progress() {
        let dir = TempDir::new().unwrap();
        {
            let store = ProgressStore::in_dir(dir.path());
            let mut session = StudySession::open(catalog(), store, options()).unwrap();
            session.mark_incorrect().unwrap();
            session.mark_correct().unwrap();
        }

        let store = ProgressStore::in_dir(dir.path());
        let session = StudySession::open(catalog(), store, options()).unwrap();
        let score = session.score();
        assert_eq!(score.correct, 1);
        assert_eq!(score.incorrect, 1);
        assert_eq!(score.remaining, 1);
    }

    #[test]
    fn rejected_filter_is_not_persisted() {
        let dir = TempDir::new().unwrap();
        let store = ProgressStore::in_dir(dir.path());
        let mut session = StudySession::open(catalog(), store, options()).unwrap();
        let before = session.state().clone();

        assert!(session.apply_filter(FilterSpec::default()).is_err());

        let reread = ProgressStore::in_dir(dir.path());
        // nothing was saved yet: the open itself does not persist, and
        // the rejected filter must not either
        assert!(reread.load(&catalog()).is_none());
        assert_eq!(session.state(), &before);
    }
}
