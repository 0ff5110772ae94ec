//! Herald Spellcheck - Warn about likely typos in commit messages
//!
//! A [`Dictionary`] reports misspelled ranges of the message. Words the
//! project already uses ([`IgnoreWords`]) and identifiers written in
//! camelCase, PascalCase or ALL CAPS are filtered out by [`find_typos`], and
//! whatever remains is rendered as a [`TypoReport`].

mod dictionary;
mod ignore;
mod report;
mod typos;
mod words;

pub use dictionary::{Dictionary, WordList};
pub use ignore::{IgnoreSources, IgnoreWords};
pub use report::TypoReport;
pub use typos::find_typos;
pub use words::split_out_words;

/// Result type for spellcheck operations
pub type Result<T> = std::result::Result<T, herald_core::error::SpellcheckError>;
