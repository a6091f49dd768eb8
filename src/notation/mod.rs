//! Move notation codec.
//!
//! Reads human-written move lines into canonical [`MoveToken`] sequences, writes
//! token sequences back out, and inverts lines while keeping parenthesized groups
//! together. Everything here is pure and synchronous.
//!
//! [`MoveToken`]: crate::model::MoveToken

mod aliases;
mod invert;
mod parser;

pub(crate) use aliases::canonical_alias;
pub(crate) use invert::invert;
pub(crate) use parser::{parse, serialize};

/// Typographic apostrophe accepted in place of `'`.
const CURLY_APOSTROPHE: char = '\u{2019}';

fn normalize_apostrophes(line: &str) -> String {
    line.replace(CURLY_APOSTROPHE, "'")
}
