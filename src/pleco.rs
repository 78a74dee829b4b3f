//! Pleco Export
//!
//! Pure text transformers that render the catalog as Pleco-importable
//! flashcards. Pleco's import format is tab-separated
//! `hanzi<TAB>pinyin<TAB>definition` lines, with private-use control
//! characters for line breaks and bold runs inside the definition, and
//! `//`-prefixed category headers grouping cards into folders.

use std::collections::BTreeMap;

use crate::filter::effective_senses;
use crate::types::WordEntry;

/// Pleco newline control character.
pub const PLECO_NEWLINE: char = '\u{EAB1}';
/// Pleco bold-on control character.
pub const PLECO_BOLD: char = '\u{EAB2}';
/// Pleco bold-off control character.
pub const PLECO_BOLD_END: char = '\u{EAB3}';

/// Category folder every exported lesson lives under.
pub const CATEGORY_ROOT: &str = "Classical Chinese For Everyone";

/// One export card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flashcard {
    pub hanzi: String,
    pub pinyin: String,
    pub definition: String,
}

/// Distinct lessons across the word's senses, in first-appearance order.
pub fn sense_lessons(word: &WordEntry) -> Vec<u32> {
    let mut lessons = Vec::new();
    for sense in effective_senses(word) {
        if !lessons.contains(&sense.lesson) {
            lessons.push(sense.lesson);
        }
    }
    lessons
}

/// Render a word entry as a single card.
///
/// Every effective sense becomes one definition line: the class
/// abbreviation in bold, the gloss, and the sense's reading in
/// parentheses when it differs from the primary. A bold `Lessons`
/// footer lists the distinct sense lessons.
pub fn to_flashcard(word: &WordEntry) -> Flashcard {
    let senses = effective_senses(word);

    let mut lines = Vec::with_capacity(senses.len());
    for sense in &senses {
        let mut line = format!(
            "{}{}{} {}",
            PLECO_BOLD,
            sense.word_class.abbreviation(),
            PLECO_BOLD_END,
            sense.definition
        );
        if sense.pinyin != word.pinyin {
            line.push_str(&format!(" ({})", sense.pinyin));
        }
        lines.push(line);
    }

    let lessons = sense_lessons(word)
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    let newline = PLECO_NEWLINE.to_string();
    let mut definition = lines.join(&newline);
    definition.push(PLECO_NEWLINE);
    definition.push(PLECO_NEWLINE);
    definition.push_str(&format!("{}Lessons{} {}", PLECO_BOLD, PLECO_BOLD_END, lessons));

    Flashcard {
        hanzi: word.hanzi.clone(),
        pinyin: word.pinyin.clone(),
        definition,
    }
}

/// `hanzi<TAB>pinyin<TAB>definition`.
pub fn to_text_line(card: &Flashcard) -> String {
    format!("{}\t{}\t{}", card.hanzi, card.pinyin, card.definition)
}

/// Flat export: one line per catalog entry, catalog order.
pub fn dictionary_export(words: &[WordEntry]) -> String {
    words
        .iter()
        .map(|word| to_text_line(&to_flashcard(word)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Grouped export: cards under one `// .../Lesson N` category header per
/// distinct sense lesson, categories in ascending lesson order. A word
/// with senses in several lessons appears under each of them.
pub fn flashcard_export(words: &[WordEntry]) -> String {
    let mut categories: BTreeMap<u32, Vec<String>> = BTreeMap::new();
    for word in words {
        let line = to_text_line(&to_flashcard(word));
        for lesson in sense_lessons(word) {
            categories.entry(lesson).or_default().push(line.clone());
        }
    }

    categories
        .into_iter()
        .map(|(lesson, lines)| {
            let mut section = format!("// {}/Lesson {}", CATEGORY_ROOT, lesson);
            for line in lines {
                section.push('\n');
                section.push_str(&line);
            }
            section
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
