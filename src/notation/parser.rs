use super::aliases::{canonical_alias, lookup};
use super::normalize_apostrophes;
use crate::error::NotationError;
use crate::model::MoveToken;
use regex::Regex;
use std::sync::LazyLock;

/// One move specifier: base letters, an optional double-turn `2`, an optional prime.
static MOVE_CHUNK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([UDRLFBMESudrlfbxyzw]+)(2)?(')?$").expect("move chunk pattern is valid")
});

/// Convert a moves line to tokens, e.g. `U' R2` -> `[U', R, R]`.
///
/// Parentheses are dropped before splitting, so groups carry no meaning here.
pub(crate) fn parse(line: &str) -> Result<Vec<MoveToken>, NotationError> {
    let normalized = normalize_apostrophes(line).replace(['(', ')'], "");
    let mut tokens = Vec::new();

    for chunk in normalized.split_whitespace() {
        let caps = MOVE_CHUNK
            .captures(chunk)
            .ok_or_else(|| NotationError::InvalidMove(chunk.to_string()))?;

        let mut key = caps[1].to_string();
        if caps.get(3).is_some() {
            key.push('\'');
        }
        let token = lookup(&key).ok_or(NotationError::UnknownRotation(key))?;

        let count = if caps.get(2).is_some() { 2 } else { 1 };
        tokens.extend(std::iter::repeat(token).take(count));
    }

    Ok(tokens)
}

/// Convert tokens back to a moves line using each token's canonical spelling.
pub(crate) fn serialize(tokens: &[MoveToken]) -> Result<String, NotationError> {
    let aliases = tokens
        .iter()
        .map(|&t| canonical_alias(t).ok_or(NotationError::UnknownToken(t)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(aliases.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MoveToken::*;

    #[test]
    fn parses_basic_trigger() {
        assert_eq!(parse("R U R' U'").unwrap(), vec![R, U, RPrime, UPrime]);
    }

    #[test]
    fn double_turn_repeats_token() {
        assert_eq!(parse("R2").unwrap(), vec![R, R]);
        assert_eq!(parse("U2'").unwrap(), vec![UPrime, UPrime]);
    }

    #[test]
    fn wide_aliases_agree() {
        assert_eq!(parse("Rw").unwrap(), parse("r").unwrap());
        assert_eq!(parse("r").unwrap(), vec![Rw]);
    }

    #[test]
    fn rejects_letters_outside_notation() {
        assert_eq!(parse("Q"), Err(NotationError::InvalidMove("Q".into())));
        assert_eq!(parse("1"), Err(NotationError::InvalidMove("1".into())));
        assert_eq!(parse("R3"), Err(NotationError::InvalidMove("R3".into())));
        assert_eq!(parse("R'2"), Err(NotationError::InvalidMove("R'2".into())));
    }

    #[test]
    fn unknown_combinations_are_reported_by_key() {
        assert_eq!(
            parse("Rw'"),
            Err(NotationError::UnknownRotation("Rw'".into()))
        );
        assert_eq!(parse("MU"), Err(NotationError::UnknownRotation("MU".into())));
    }

    #[test]
    fn aborts_at_first_bad_chunk() {
        assert_eq!(
            parse("R U Q Rw'"),
            Err(NotationError::InvalidMove("Q".into()))
        );
    }

    #[test]
    fn accepts_curly_apostrophe_and_strips_parens() {
        assert_eq!(parse("R\u{2019} (U F)").unwrap(), vec![RPrime, U, F]);
        assert_eq!(parse("  (x y') \t z2  ").unwrap(), vec![X, YPrime, Z, Z]);
    }

    #[test]
    fn blank_line_is_empty() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("   ( ) ").unwrap().is_empty());
    }

    #[test]
    fn serialize_uses_canonical_spelling() {
        assert_eq!(serialize(&[Rw, Uw, XPrime]).unwrap(), "Rw Uw x'");
        assert_eq!(serialize(&parse("r R2").unwrap()).unwrap(), "Rw R R");
        assert_eq!(serialize(&[]).unwrap(), "");
    }

    #[test]
    fn every_token_survives_serialize_then_parse() {
        let line = serialize(&MoveToken::ALL).unwrap();
        assert_eq!(parse(&line).unwrap(), MoveToken::ALL.to_vec());
    }
}
