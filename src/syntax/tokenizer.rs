//! Line tokenizer
//!
//! Turns one line of text into classified spans. Each character holds at
//! most one classification tag: rules are applied in table order and a later
//! rule overwrites an earlier one. The result depends on nothing but the rule
//! table and the line text.

use crate::position::Span;

use super::rules::{RuleTable, WORD_PUNCTUATION};
use super::tags::Tag;

/// A whitespace-delimited word and its character column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Word<'a> {
    column: usize,
    text: &'a str,
}

impl<'a> Word<'a> {
    /// Strip surrounding punctuation, returning the stripped text and its column.
    /// The column is that of the first kept character, so `(self)` yields
    /// columns 1..5, not the word's own column 0 with the stripped length.
    fn stripped(&self) -> (usize, &'a str) {
        let trimmed_start = self.text.trim_start_matches(WORD_PUNCTUATION);
        let lead = self.text[..self.text.len() - trimmed_start.len()].chars().count();
        (self.column + lead, trimmed_start.trim_end_matches(WORD_PUNCTUATION))
    }
}

/// Split a line on whitespace, keeping each word's original column
fn split_words(text: &str) -> Vec<Word<'_>> {
    let mut words = Vec::new();
    let mut current: Option<(usize, usize)> = None;

    for (column, (byte, ch)) in text.char_indices().enumerate() {
        if ch.is_whitespace() {
            if let Some((start_col, start_byte)) = current.take() {
                words.push(Word {
                    column: start_col,
                    text: &text[start_byte..byte],
                });
            }
        } else if current.is_none() {
            current = Some((column, byte));
        }
    }
    if let Some((start_col, start_byte)) = current {
        words.push(Word {
            column: start_col,
            text: &text[start_byte..],
        });
    }

    words
}

/// Classify one line. Spans are returned in column order and never overlap.
pub fn tokenize_line(table: &RuleTable, line: usize, text: &str) -> Vec<(Span, Tag)> {
    // byte offset -> character column, with an entry for the end of the line
    let mut columns = vec![0; text.len() + 1];
    let mut char_count = 0;
    for (byte, ch) in text.char_indices() {
        for slot in &mut columns[byte..byte + ch.len_utf8()] {
            *slot = char_count;
        }
        char_count += 1;
    }
    columns[text.len()] = char_count;

    let mut painted: Vec<Option<Tag>> = vec![None; char_count];
    let words = split_words(text);
    let mut claimed = vec![false; words.len()];

    for rule in table.rules() {
        if !rule.is_word_rule() {
            for (start, end) in rule.find_all(text) {
                for slot in &mut painted[columns[start]..columns[end]] {
                    *slot = Some(rule.tag);
                }
            }
            continue;
        }

        // the first word rule to accept a word owns it
        for (word, taken) in words.iter().zip(claimed.iter_mut()) {
            if *taken {
                continue;
            }
            let (column, stripped) = word.stripped();
            if stripped.is_empty() || !rule.matches_word(stripped) {
                continue;
            }
            *taken = true;
            let end = column + stripped.chars().count();
            for slot in &mut painted[column..end] {
                *slot = Some(rule.tag);
            }
        }
    }

    let mut spans = Vec::new();
    let mut run: Option<(usize, Tag)> = None;
    for (column, tag) in painted.iter().copied().enumerate() {
        match (run, tag) {
            (Some((_, current)), Some(next)) if current == next => {}
            _ => {
                if let Some((start, current)) = run.take() {
                    spans.push((Span::new(line, start, column), current));
                }
                run = tag.map(|next| (column, next));
            }
        }
    }
    if let Some((start, current)) = run {
        spans.push((Span::new(line, start, char_count), current));
    }

    spans
}
