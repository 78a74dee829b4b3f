//! Flashcard Queue Engine
//!
//! Owns the mutable session state and drives the study state machine:
//!
//! - A session is ACTIVE while the queue is non-empty and COMPLETE once
//!   it drains
//! - Correct answers retire the head into the completed set; incorrect
//!   answers recycle it to the back of the queue
//! - Filter changes rebuild the queue and must be validated before any
//!   state is touched
//!
//! The queue is a uniformly shuffled permutation of the filtered
//! catalog. The engine owns a `ChaCha8Rng`; tests seed it through
//! [`QueueOptions`] for deterministic ordering.

use std::collections::{HashSet, VecDeque};

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use crate::catalog::WordCatalog;
use crate::filter;
use crate::types::{FilterSpec, Score, WordEntry, WordId};

// ============================================================
// Errors
// ============================================================

/// Queue engine error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The requested filter selects no studyable word. Raised before any
    /// state mutation; the message is shown to the user verbatim.
    #[error("Filters must contain at least one word.")]
    EmptyFilter,

    /// An answer was recorded against an exhausted queue.
    #[error("the session is complete; no card to answer")]
    EmptyQueue,
}

pub type EngineResult<T> = Result<T, EngineError>;

// ============================================================
// Session state
// ============================================================

/// Study phase derived from the queue length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// At least one card remains.
    Active,
    /// The queue is exhausted; only `reset` or a widening
    /// `apply_filter` leaves this phase.
    Complete,
}

/// The mutable state of one study session.
///
/// Replaced wholesale by `reset`; individual entries are never edited
/// in place.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    /// FIFO working set; the head is the current card.
    pub queue: VecDeque<WordEntry>,
    /// Words answered correctly this session, in completion order.
    pub completed: Vec<WordEntry>,
    /// Incorrect-answer counter; never decremented.
    pub miss_count: u32,
    /// The filter the queue was last built from.
    pub active_filter: FilterSpec,
}

impl SessionState {
    /// An empty state carrying only a filter, for engine construction.
    pub fn empty(active_filter: FilterSpec) -> Self {
        Self {
            queue: VecDeque::new(),
            completed: Vec::new(),
            miss_count: 0,
            active_filter,
        }
    }

    /// Identities of every completed word.
    pub fn completed_ids(&self) -> HashSet<WordId> {
        self.completed.iter().map(WordEntry::id).collect()
    }

    pub fn phase(&self) -> SessionPhase {
        if self.queue.is_empty() {
            SessionPhase::Complete
        } else {
            SessionPhase::Active
        }
    }

    pub fn score(&self) -> Score {
        Score {
            correct: self.completed.len(),
            incorrect: self.miss_count,
            remaining: self.queue.len(),
        }
    }
}

// ============================================================
// Queue construction
// ============================================================

/// Build a fresh study queue: filter the words, drop excluded
/// identities, and shuffle uniformly (Fisher-Yates via `shuffle`).
///
/// Membership depends only on `(words, filter, exclude)`; repeated
/// calls differ in ordering, never in membership.
pub fn build_queue<R: Rng>(
    words: &[WordEntry],
    filter: &FilterSpec,
    exclude: &HashSet<WordId>,
    rng: &mut R,
) -> Vec<WordEntry> {
    let mut eligible: Vec<WordEntry> = filter::filter_words(words, filter)
        .into_iter()
        .filter(|word| !exclude.contains(&word.id()))
        .cloned()
        .collect();
    eligible.shuffle(rng);
    eligible
}

// ============================================================
// Engine
// ============================================================

/// Engine construction options.
#[derive(Debug, Clone, Default)]
pub struct QueueOptions {
    /// Random seed for reproducible shuffles (tests). `None` seeds from
    /// the system clock.
    pub seed: Option<u64>,
}

/// The flashcard queue engine. Single-threaded; every operation is a
/// synchronous in-memory mutation.
pub struct QueueEngine {
    catalog: WordCatalog,
    state: SessionState,
    rng: ChaCha8Rng,
}

impl QueueEngine {
    /// Start a brand-new session over the full catalog.
    ///
    /// Fails with [`EngineError::EmptyFilter`] only when the catalog
    /// itself is empty.
    pub fn new(catalog: WordCatalog, options: QueueOptions) -> EngineResult<Self> {
        let all = catalog.all_filter();
        let mut engine = Self::from_state(catalog, SessionState::empty(all.clone()), options);
        engine.reset(all)?;
        Ok(engine)
    }

    /// Restore an engine around previously persisted state.
    pub fn from_state(catalog: WordCatalog, state: SessionState, options: QueueOptions) -> Self {
        let seed = options.seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(42)
        });

        Self {
            catalog,
            state,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn catalog(&self) -> &WordCatalog {
        &self.catalog
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The current card, or `None` when the session is complete.
    pub fn current(&self) -> Option<&WordEntry> {
        self.state.queue.front()
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase()
    }

    pub fn score(&self) -> Score {
        self.state.score()
    }

    /// Retire the current card into the completed set.
    pub fn mark_correct(&mut self) -> EngineResult<()> {
        let word = self.state.queue.pop_front().ok_or(EngineError::EmptyQueue)?;
        tracing::debug!(word = %word.id(), remaining = self.state.queue.len(), "correct");
        self.state.completed.push(word);
        Ok(())
    }

    /// Recycle the current card to the back of the queue and count the
    /// miss. Queue length is unchanged.
    pub fn mark_incorrect(&mut self) -> EngineResult<()> {
        let word = self.state.queue.pop_front().ok_or(EngineError::EmptyQueue)?;
        tracing::debug!(word = %word.id(), misses = self.state.miss_count + 1, "incorrect");
        self.state.miss_count += 1;
        self.state.queue.push_back(word);
        Ok(())
    }

    /// Rebuild the queue from a new filter, keeping completed words out.
    ///
    /// Validates before committing: when the filter selects nothing
    /// studyable the existing state is left untouched. The in-progress
    /// head stays at the front of the new queue when still eligible, so
    /// answering is not interrupted mid-card.
    pub fn apply_filter(&mut self, filter: FilterSpec) -> EngineResult<()> {
        let completed = self.state.completed_ids();
        let mut queue = build_queue(self.catalog.entries(), &filter, &completed, &mut self.rng);
        if queue.is_empty() {
            return Err(EngineError::EmptyFilter);
        }

        if let Some(head) = self.state.queue.front() {
            let head_id = head.id();
            if let Some(position) = queue.iter().position(|word| word.id() == head_id) {
                let head = queue.remove(position);
                queue.insert(0, head);
            }
        }

        tracing::debug!(words = queue.len(), "filter applied");
        self.state.queue = queue.into();
        self.state.active_filter = filter;
        Ok(())
    }

    /// Discard all progress and start over with the given filter.
    pub fn reset(&mut self, filter: FilterSpec) -> EngineResult<()> {
        let queue = build_queue(self.catalog.entries(), &filter, &HashSet::new(), &mut self.rng);
        if queue.is_empty() {
            return Err(EngineError::EmptyFilter);
        }

        tracing::debug!(words = queue.len(), "session reset");
        self.state = SessionState {
            queue: queue.into(),
            completed: Vec::new(),
            miss_count: 0,
            active_filter: filter,
        };
        Ok(())
    }
}
