//! Common Types
//!
//! Shared data structures used across the filtering, queueing, and
//! persistence modules.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

// ==================== Word Classes ====================

/// Grammatical category of a word sense.
///
/// Serialized with the abbreviations used by the word list data
/// (`"n."`, `"t.v."`, ...), so persisted snapshots stay compatible with
/// the exported flashcard formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WordClass {
    #[serde(rename = "n.")]
    Noun,
    #[serde(rename = "pron.")]
    Pronoun,
    #[serde(rename = "v.")]
    Verb,
    #[serde(rename = "t.v.")]
    TransitiveVerb,
    #[serde(rename = "s.v.")]
    StativeVerb,
    #[serde(rename = "adv.")]
    Adverb,
    #[serde(rename = "conj.")]
    Conjunction,
    #[serde(rename = "g.p.")]
    GrammaticalParticle,
    #[serde(rename = "other")]
    Other,
}

impl WordClass {
    /// Every word class, in display order.
    pub const ALL: [WordClass; 9] = [
        WordClass::Noun,
        WordClass::Pronoun,
        WordClass::Verb,
        WordClass::TransitiveVerb,
        WordClass::StativeVerb,
        WordClass::Adverb,
        WordClass::Conjunction,
        WordClass::GrammaticalParticle,
        WordClass::Other,
    ];

    /// The abbreviation shown on cards and stored in the word list.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            WordClass::Noun => "n.",
            WordClass::Pronoun => "pron.",
            WordClass::Verb => "v.",
            WordClass::TransitiveVerb => "t.v.",
            WordClass::StativeVerb => "s.v.",
            WordClass::Adverb => "adv.",
            WordClass::Conjunction => "conj.",
            WordClass::GrammaticalParticle => "g.p.",
            WordClass::Other => "other",
        }
    }

    /// The expanded English name, used for tooltips and help text.
    pub fn full_name(&self) -> &'static str {
        match self {
            WordClass::Noun => "noun",
            WordClass::Pronoun => "pronoun",
            WordClass::Verb => "verb",
            WordClass::TransitiveVerb => "transitive verb",
            WordClass::StativeVerb => "stative verb",
            WordClass::Adverb => "adverb",
            WordClass::Conjunction => "conjunction",
            WordClass::GrammaticalParticle => "grammatical particle",
            WordClass::Other => "other",
        }
    }

    /// Parse an abbreviation back into a class.
    pub fn from_abbreviation(s: &str) -> Option<Self> {
        WordClass::ALL
            .iter()
            .copied()
            .find(|class| class.abbreviation() == s)
    }
}

impl fmt::Display for WordClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

// ==================== Word Entries ====================

/// A secondary sense attached to a word entry.
///
/// Only `definition` is required; any unset field inherits the parent
/// entry's value when the variant is expanded into a full sense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordVariant {
    pub definition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinyin: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub word_class: Option<WordClass>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lesson: Option<u32>,
}

/// One vocabulary item: the primary sense plus any number of variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordEntry {
    /// Character(s) shown on the card front.
    pub hanzi: String,
    pub pinyin: String,
    /// Lesson introducing the primary sense; lower lessons are earlier.
    pub lesson: u32,
    #[serde(rename = "type")]
    pub word_class: WordClass,
    pub definition: String,
    #[serde(rename = "other", default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<WordVariant>,
    /// Alternate character form; presentation-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simplified: Option<String>,
}

impl WordEntry {
    /// Stable identity for queue/completed bookkeeping.
    ///
    /// The hanzi string alone is not unique across the catalog, so
    /// identity is the composite of hanzi and the primary lesson.
    pub fn id(&self) -> WordId {
        WordId {
            hanzi: self.hanzi.clone(),
            lesson: self.lesson,
        }
    }
}

/// Composite identity key for a word entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WordId {
    pub hanzi: String,
    pub lesson: u32,
}

impl fmt::Display for WordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.hanzi, self.lesson)
    }
}

/// One effective meaning of a word entry: the primary sense, or a
/// variant merged over it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sense {
    pub pinyin: String,
    pub lesson: u32,
    pub word_class: WordClass,
    pub definition: String,
}

// ==================== Filters ====================

/// A (lessons, classes) pair selecting which senses are in scope.
///
/// A word entry matches when at least one of its effective senses has
/// its lesson in `lessons` AND its class in `classes`. Serialized with
/// the word list's field names (`lesson`, `type`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(rename = "lesson")]
    pub lessons: BTreeSet<u32>,
    #[serde(rename = "type")]
    pub classes: BTreeSet<WordClass>,
}

impl FilterSpec {
    pub fn new<L, C>(lessons: L, classes: C) -> Self
    where
        L: IntoIterator<Item = u32>,
        C: IntoIterator<Item = WordClass>,
    {
        Self {
            lessons: lessons.into_iter().collect(),
            classes: classes.into_iter().collect(),
        }
    }

    /// True when either dimension is empty, so no sense can match.
    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty() || self.classes.is_empty()
    }
}

// ==================== Score ====================

/// Session score summary consumed by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub correct: usize,
    pub incorrect: u32,
    pub remaining: usize,
}
