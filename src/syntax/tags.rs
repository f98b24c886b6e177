//! Tags applied to spans of text
//!
//! Classification tags come out of the line tokenizer. `Match` is applied by
//! find-all and `Selection` marks the active text selection; neither is ever
//! produced by classification.

use super::style::{Color, Style};

/// Visual classification of a span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tag {
    /// Import/definition keywords and `self`
    Keyword1,
    /// Control-flow keywords
    KeywordFlow,
    /// `None`, `True`, `False`
    KeywordCaps,
    /// Built-in function calls
    KeywordFunc,
    /// `@decorator` tokens
    Decorator,
    /// Numeric literals
    Digit,
    /// String literals
    String,
    /// Find-all match
    Match,
    /// Active text selection
    Selection,
}

impl Tag {
    /// Every tag, in declaration order
    pub const ALL: [Tag; 9] = [
        Tag::Keyword1,
        Tag::KeywordFlow,
        Tag::KeywordCaps,
        Tag::KeywordFunc,
        Tag::Decorator,
        Tag::Digit,
        Tag::String,
        Tag::Match,
        Tag::Selection,
    ];

    /// Get the default style for this tag
    pub fn default_style(&self) -> Style {
        match self {
            Tag::Keyword1 => Style::fg(Color::Rgb(0xff, 0xa5, 0x00)),
            Tag::KeywordFlow => Style::fg(Color::Magenta),
            Tag::KeywordCaps => Style::fg(Color::Blue).with_bold(),
            Tag::KeywordFunc => Style::fg(Color::BrightBlack),
            Tag::Decorator => Style::fg(Color::Rgb(0xf0, 0xe6, 0x8c)),
            Tag::Digit => Style::fg(Color::Red),
            Tag::String => Style::fg(Color::Green),
            Tag::Match => Style::fg(Color::Red).with_bg(Color::Yellow),
            Tag::Selection => Style::reverse(),
        }
    }

    /// Tag name as used in the config file
    pub fn name(&self) -> &'static str {
        match self {
            Tag::Keyword1 => "keyword1",
            Tag::KeywordFlow => "keywordflow",
            Tag::KeywordCaps => "keywordcaps",
            Tag::KeywordFunc => "keywordfunc",
            Tag::Decorator => "decorator",
            Tag::Digit => "digit",
            Tag::String => "string",
            Tag::Match => "match",
            Tag::Selection => "sel",
        }
    }

    /// Parse a tag from its config name
    pub fn from_name(name: &str) -> Option<Self> {
        Tag::ALL.into_iter().find(|tag| tag.name() == name)
    }

    /// Drawing order, lowest first. Find-all matches always end up on top.
    pub fn priority(&self) -> u8 {
        match self {
            Tag::Selection => 1,
            Tag::Match => 2,
            _ => 0,
        }
    }
}
