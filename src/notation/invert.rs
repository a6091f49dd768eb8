use super::normalize_apostrophes;
use regex::Regex;
use std::sync::LazyLock;

/// A parenthesized group (shortest match) or a single run of non-space characters.
static CHUNK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(.*?\)|\S+").expect("chunk pattern is valid"));

/// A unit of notation text as seen by the inverter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Chunk<'a> {
    Move(&'a str),
    /// Contents of a group, without the surrounding parentheses.
    Group(&'a str),
}

impl<'a> Chunk<'a> {
    fn classify(text: &'a str) -> Self {
        match text.strip_prefix('(').and_then(|t| t.strip_suffix(')')) {
            Some(inner) => Chunk::Group(inner),
            None => Chunk::Move(text),
        }
    }

    fn inverted(self) -> String {
        match self {
            Chunk::Move(m) => flip_prime(m),
            Chunk::Group(inner) => {
                let moves: Vec<String> = inner.split_whitespace().rev().map(flip_prime).collect();
                format!("({})", moves.join(" "))
            }
        }
    }
}

fn flip_prime(m: &str) -> String {
    match m.strip_suffix('\'') {
        Some(base) => base.to_string(),
        None => format!("{m}'"),
    }
}

/// Invert a moves line, e.g. `R' U L` -> `L' U' R`.
///
/// Groups stay atomic in the outer reversal, but their own contents are reversed
/// and flipped too. Purely lexical; unknown moves pass through.
pub(crate) fn invert(line: &str) -> String {
    let normalized = normalize_apostrophes(line);
    let chunks: Vec<Chunk<'_>> = CHUNK
        .find_iter(&normalized)
        .map(|m| Chunk::classify(m.as_str()))
        .collect();

    chunks
        .into_iter()
        .rev()
        .map(Chunk::inverted)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::parse;

    #[test]
    fn reverses_and_flips() {
        assert_eq!(invert("R U R'"), "U' R' U");
    }

    #[test]
    fn groups_stay_together() {
        assert_eq!(invert("(R U) R'"), "R (U' R')");
        assert_eq!(invert("F (R U R' U') F'"), "F (U R U' R') F'");
    }

    #[test]
    fn empty_input() {
        assert_eq!(invert(""), "");
        assert_eq!(invert("   "), "");
        assert_eq!(invert("()"), "()");
    }

    #[test]
    fn lexical_only() {
        assert_eq!(invert("Q2 Foo'"), "Foo Q2'");
        assert_eq!(invert("(R U"), "U' (R'");
    }

    #[test]
    fn curly_prime_is_flipped() {
        assert_eq!(invert("R\u{2019} U"), "U' R");
    }

    #[test]
    fn double_inversion_restores_line() {
        for line in ["R U R' U'", "r U2 x' M E' S", "Rw u y z'"] {
            assert_eq!(parse(&invert(&invert(line))).unwrap(), parse(line).unwrap());
        }
    }
}
