//! # kapian - Classical Chinese flashcard study engine
//!
//! This crate implements the core of a vocabulary flashcard study tool:
//!
//! - **Word catalog** - immutable vocabulary entries with variant senses
//! - **Filtering** - lesson/class filters evaluated against every
//!   effective sense of a word
//! - **Queue engine** - shuffled working queue, correct/incorrect
//!   answer handling, session state machine
//! - **Progress store** - JSON slot persistence with drift-guarded
//!   restore
//! - **Pleco export** - tab-separated flashcard/dictionary text formats
//!
//! Presentation is deliberately out of the library: a front end consumes
//! [`StudySession`] (or [`QueueEngine`] directly), renders the current
//! card, and calls back into the answer and filter operations.
//!
//! ## Example
//!
//! ```rust
//! use kapian::{QueueEngine, QueueOptions, WordCatalog};
//!
//! let catalog = WordCatalog::builtin().clone();
//! let mut engine = QueueEngine::new(catalog, QueueOptions::default()).unwrap();
//! while let Some(word) = engine.current() {
//!     let _front = &word.hanzi;
//!     engine.mark_correct().unwrap();
//! }
//! ```

// ============================================================
// Modules
// ============================================================

pub mod catalog;
pub mod config;
pub mod filter;
pub mod logging;
pub mod pleco;
pub mod queue;
pub mod session;
pub mod store;
pub mod types;

// ============================================================
// Re-exports
// ============================================================

pub use catalog::WordCatalog;
pub use config::Config;
pub use filter::{effective_senses, filter_match, filter_words, sense_matches};
pub use pleco::{dictionary_export, flashcard_export, Flashcard};
pub use queue::{
    build_queue, EngineError, EngineResult, QueueEngine, QueueOptions, SessionPhase, SessionState,
};
pub use session::StudySession;
pub use store::{ProgressStore, StorageError, StorageResult};
pub use types::{FilterSpec, Score, Sense, WordClass, WordEntry, WordId, WordVariant};
