//! Word Catalog
//!
//! The immutable vocabulary set a session studies from. The built-in
//! catalog is embedded in the binary and parsed on first use; tests and
//! alternative front ends can supply their own entries.

use std::collections::BTreeSet;
use std::sync::{Arc, OnceLock};

use crate::filter::effective_senses;
use crate::types::{FilterSpec, WordClass, WordEntry};

/// Built-in word list, lessons 1-5 of the Classical Chinese course.
const BUILTIN_WORDLIST: &str = include_str!("../data/wordlist.json");

static BUILTIN: OnceLock<WordCatalog> = OnceLock::new();

/// Read-only ordered word set. Cloning is cheap; the entries are shared.
#[derive(Debug, Clone)]
pub struct WordCatalog {
    entries: Arc<Vec<WordEntry>>,
}

impl WordCatalog {
    /// The embedded word list.
    ///
    /// Parsed once per process, on first call rather than at import time.
    pub fn builtin() -> &'static WordCatalog {
        BUILTIN.get_or_init(|| {
            let entries: Vec<WordEntry> = serde_json::from_str(BUILTIN_WORDLIST)
                .expect("embedded wordlist.json must parse");
            WordCatalog::from_entries(entries)
        })
    }

    pub fn from_entries(entries: Vec<WordEntry>) -> Self {
        Self {
            entries: Arc::new(entries),
        }
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct lesson numbers across every effective sense, ascending.
    ///
    /// Variant lessons count: a filter offering only primary lessons
    /// could never select a variant-only sense.
    pub fn lessons(&self) -> Vec<u32> {
        let mut lessons = BTreeSet::new();
        for entry in self.entries.iter() {
            for sense in effective_senses(entry) {
                lessons.insert(sense.lesson);
            }
        }
        lessons.into_iter().collect()
    }

    /// Distinct word classes across every effective sense, in display order.
    pub fn classes(&self) -> Vec<WordClass> {
        let mut classes = BTreeSet::new();
        for entry in self.entries.iter() {
            for sense in effective_senses(entry) {
                classes.insert(sense.word_class);
            }
        }
        classes.into_iter().collect()
    }

    /// The all-inclusive filter: every lesson and class in the catalog.
    pub fn all_filter(&self) -> FilterSpec {
        FilterSpec::new(self.lessons(), self.classes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::filter_words;

    #[test]
    fn builtin_catalog_parses_and_is_nonempty() {
        let catalog = WordCatalog::builtin();
        assert!(!catalog.is_empty());
        // lesson 1 of the course has eight words
        let lesson_one = catalog
            .entries()
            .iter()
            .filter(|w| w.lesson == 1)
            .count();
        assert_eq!(lesson_one, 8);
    }

    #[test]
    fn lessons_include_variant_only_lessons() {
        let catalog = WordCatalog::builtin();
        let lessons = catalog.lessons();
        // 子 has a lesson 10 variant even though no primary sense reaches 10
        assert!(lessons.contains(&10));
        // sorted ascending
        let mut sorted = lessons.clone();
        sorted.sort_unstable();
        assert_eq!(lessons, sorted);
    }

    #[test]
    fn all_filter_matches_the_entire_catalog() {
        let catalog = WordCatalog::builtin();
        let all = catalog.all_filter();
        let matched = filter_words(catalog.entries(), &all);
        assert_eq!(matched.len(), catalog.len());
    }

    #[test]
    fn builtin_is_shared_between_calls() {
        let a = WordCatalog::builtin();
        let b = WordCatalog::builtin();
        assert!(Arc::ptr_eq(&a.entries, &b.entries));
    }
}
