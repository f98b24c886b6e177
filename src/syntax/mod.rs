//! Syntax tagging
//!
//! This module provides the tagging infrastructure used for:
//! - Python-style classification (keywords, strings, numbers, decorators)
//! - Find-all match highlighting
//! - Selection highlighting

mod retagger;
mod rules;
mod style;
mod tags;
mod tokenizer;

pub use retagger::Retagger;
pub use style::{Color, Style};
pub use tags::Tag;
