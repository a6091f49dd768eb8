use crate::model::MoveToken;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Notation spellings, in declaration order. When several spellings share a token,
/// the first one listed is the canonical form used for output.
pub(crate) const ALIASES: &[(&str, MoveToken)] = &[
    ("U", MoveToken::U),
    ("U'", MoveToken::UPrime),
    ("Uw", MoveToken::Uw),
    ("u", MoveToken::Uw),
    ("D", MoveToken::D),
    ("D'", MoveToken::DPrime),
    ("Dw", MoveToken::Dw),
    ("d", MoveToken::Dw),
    ("R", MoveToken::R),
    ("R'", MoveToken::RPrime),
    ("Rw", MoveToken::Rw),
    ("r", MoveToken::Rw),
    ("L", MoveToken::L),
    ("L'", MoveToken::LPrime),
    ("Lw", MoveToken::Lw),
    ("l", MoveToken::Lw),
    ("F", MoveToken::F),
    ("F'", MoveToken::FPrime),
    ("Fw", MoveToken::Fw),
    ("f", MoveToken::Fw),
    ("B", MoveToken::B),
    ("B'", MoveToken::BPrime),
    ("Bw", MoveToken::Bw),
    ("b", MoveToken::Bw),
    ("M", MoveToken::M),
    ("M'", MoveToken::MPrime),
    ("E", MoveToken::E),
    ("E'", MoveToken::EPrime),
    ("S", MoveToken::S),
    ("S'", MoveToken::SPrime),
    ("x", MoveToken::X),
    ("x'", MoveToken::XPrime),
    ("y", MoveToken::Y),
    ("y'", MoveToken::YPrime),
    ("z", MoveToken::Z),
    ("z'", MoveToken::ZPrime),
];

static FORWARD: LazyLock<HashMap<&'static str, MoveToken>> =
    LazyLock::new(|| ALIASES.iter().copied().collect());

static REVERSE: LazyLock<HashMap<MoveToken, &'static str>> = LazyLock::new(|| {
    let mut map = HashMap::with_capacity(MoveToken::ALL.len());
    for &(alias, token) in ALIASES {
        map.entry(token).or_insert(alias);
    }
    map
});

/// Resolve a lookup key such as `R'` or `Rw` to its token.
pub(crate) fn lookup(key: &str) -> Option<MoveToken> {
    FORWARD.get(key).copied()
}

/// The spelling used when writing `token` back out.
pub(crate) fn canonical_alias(token: MoveToken) -> Option<&'static str> {
    REVERSE.get(&token).copied()
}
