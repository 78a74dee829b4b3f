//! Word Filtering
//!
//! Pure functions that decide which word entries are in scope for a
//! study session:
//!
//! - Sense expansion: a word's effective senses are its primary sense
//!   plus each variant merged over it
//! - Filter matching: OR across senses, AND across the lesson/class
//!   dimensions within a sense

use crate::types::{FilterSpec, Sense, WordEntry};

/// Expand a word entry into its effective senses.
///
/// The result always starts with the primary sense; each variant
/// follows, inheriting any field it does not override. For an entry
/// with `n` variants the result has length `n + 1`.
pub fn effective_senses(entry: &WordEntry) -> Vec<Sense> {
    let mut senses = Vec::with_capacity(entry.variants.len() + 1);
    senses.push(Sense {
        pinyin: entry.pinyin.clone(),
        lesson: entry.lesson,
        word_class: entry.word_class,
        definition: entry.definition.clone(),
    });
    for variant in &entry.variants {
        senses.push(Sense {
            pinyin: variant.pinyin.clone().unwrap_or_else(|| entry.pinyin.clone()),
            lesson: variant.lesson.unwrap_or(entry.lesson),
            word_class: variant.word_class.unwrap_or(entry.word_class),
            definition: variant.definition.clone(),
        });
    }
    senses
}

/// Whether a single sense satisfies both filter dimensions.
pub fn sense_matches(sense: &Sense, filter: &FilterSpec) -> bool {
    filter.lessons.contains(&sense.lesson) && filter.classes.contains(&sense.word_class)
}

/// Whether any effective sense of the entry satisfies the filter.
pub fn filter_match(entry: &WordEntry, filter: &FilterSpec) -> bool {
    effective_senses(entry)
        .iter()
        .any(|sense| sense_matches(sense, filter))
}

/// Entries for which [`filter_match`] is true, in their original order.
///
/// An empty result is not an error here; callers that need a non-empty
/// working set reject it themselves.
pub fn filter_words<'a>(words: &'a [WordEntry], filter: &FilterSpec) -> Vec<&'a WordEntry> {
    words
        .iter()
        .filter(|word| filter_match(word, filter))
        .collect()
}
