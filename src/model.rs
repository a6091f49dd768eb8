use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Default animation time for one quarter turn.
pub const DEFAULT_SPEED: Duration = Duration::from_millis(200);

/// Speed used when replaying an initial sequence before handing control to the user.
pub const WARM_UP_SPEED: Duration = Duration::from_millis(1);

/// Every quarter turn is issued to the executor with this angle.
pub const QUARTER_TURN_DEGREES: f32 = 90.0;

#[derive(Debug, Clone, Serialize)]
pub struct PlayConfig {
    #[serde(with = "humantime_serde")]
    pub speed: Duration,
    pub initial_sequence: Option<String>,
    pub echo_events: bool,
}

/// One atomic rotation in the closed move vocabulary.
///
/// Face and slice turns and whole-cube rotations come in a normal and a primed
/// variant; wide turns only exist in their normal form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MoveToken {
    U,
    UPrime,
    Uw,
    D,
    DPrime,
    Dw,
    R,
    RPrime,
    Rw,
    L,
    LPrime,
    Lw,
    F,
    FPrime,
    Fw,
    B,
    BPrime,
    Bw,
    M,
    MPrime,
    E,
    EPrime,
    S,
    SPrime,
    X,
    XPrime,
    Y,
    YPrime,
    Z,
    ZPrime,
}

impl MoveToken {
    pub const ALL: [MoveToken; 30] = [
        MoveToken::U,
        MoveToken::UPrime,
        MoveToken::Uw,
        MoveToken::D,
        MoveToken::DPrime,
        MoveToken::Dw,
        MoveToken::R,
        MoveToken::RPrime,
        MoveToken::Rw,
        MoveToken::L,
        MoveToken::LPrime,
        MoveToken::Lw,
        MoveToken::F,
        MoveToken::FPrime,
        MoveToken::Fw,
        MoveToken::B,
        MoveToken::BPrime,
        MoveToken::Bw,
        MoveToken::M,
        MoveToken::MPrime,
        MoveToken::E,
        MoveToken::EPrime,
        MoveToken::S,
        MoveToken::SPrime,
        MoveToken::X,
        MoveToken::XPrime,
        MoveToken::Y,
        MoveToken::YPrime,
        MoveToken::Z,
        MoveToken::ZPrime,
    ];

    pub fn is_prime(self) -> bool {
        matches!(
            self,
            MoveToken::UPrime
                | MoveToken::DPrime
                | MoveToken::RPrime
                | MoveToken::LPrime
                | MoveToken::FPrime
                | MoveToken::BPrime
                | MoveToken::MPrime
                | MoveToken::EPrime
                | MoveToken::SPrime
                | MoveToken::XPrime
                | MoveToken::YPrime
                | MoveToken::ZPrime
        )
    }

    /// The base rotation this token drives, ignoring direction.
    pub fn base(self) -> BaseMove {
        match self {
            MoveToken::U | MoveToken::UPrime => BaseMove::U,
            MoveToken::Uw => BaseMove::Uw,
            MoveToken::D | MoveToken::DPrime => BaseMove::D,
            MoveToken::Dw => BaseMove::Dw,
            MoveToken::R | MoveToken::RPrime => BaseMove::R,
            MoveToken::Rw => BaseMove::Rw,
            MoveToken::L | MoveToken::LPrime => BaseMove::L,
            MoveToken::Lw => BaseMove::Lw,
            MoveToken::F | MoveToken::FPrime => BaseMove::F,
            MoveToken::Fw => BaseMove::Fw,
            MoveToken::B | MoveToken::BPrime => BaseMove::B,
            MoveToken::Bw => BaseMove::Bw,
            MoveToken::M | MoveToken::MPrime => BaseMove::M,
            MoveToken::E | MoveToken::EPrime => BaseMove::E,
            MoveToken::S | MoveToken::SPrime => BaseMove::S,
            MoveToken::X | MoveToken::XPrime => BaseMove::X,
            MoveToken::Y | MoveToken::YPrime => BaseMove::Y,
            MoveToken::Z | MoveToken::ZPrime => BaseMove::Z,
        }
    }
}

impl fmt::Display for MoveToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match crate::notation::canonical_alias(*self) {
            Some(alias) => f.write_str(alias),
            None => write!(f, "{self:?}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// What a base rotation physically turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationTarget {
    /// Individual layers along an axis, issued in order.
    Layers(&'static [u8]),
    WholeCube,
}

/// Fixed executor parameters for one base rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub axis: Axis,
    pub target: RotationTarget,
    /// Direction flag sent for the unprimed move; primed moves invert it.
    pub backwards: bool,
}

/// The 18 rotations the executor knows how to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseMove {
    U,
    D,
    R,
    L,
    F,
    B,
    Uw,
    Dw,
    Rw,
    Lw,
    Fw,
    Bw,
    M,
    E,
    S,
    X,
    Y,
    Z,
}

impl BaseMove {
    pub fn binding(self) -> Binding {
        use RotationTarget::{Layers, WholeCube};
        let (axis, target, backwards) = match self {
            BaseMove::U => (Axis::Y, Layers(&[0]), true),
            BaseMove::D => (Axis::Y, Layers(&[2]), false),
            BaseMove::R => (Axis::Z, Layers(&[2]), false),
            BaseMove::L => (Axis::Z, Layers(&[0]), true),
            BaseMove::F => (Axis::X, Layers(&[0]), true),
            BaseMove::B => (Axis::X, Layers(&[2]), false),
            BaseMove::Uw => (Axis::Y, Layers(&[0, 1]), true),
            BaseMove::Dw => (Axis::Y, Layers(&[2, 1]), false),
            BaseMove::Rw => (Axis::Z, Layers(&[2, 1]), false),
            BaseMove::Lw => (Axis::Z, Layers(&[0, 1]), true),
            BaseMove::Fw => (Axis::X, Layers(&[0, 1]), true),
            BaseMove::Bw => (Axis::X, Layers(&[2, 1]), false),
            BaseMove::M => (Axis::Z, Layers(&[1]), true),
            BaseMove::E => (Axis::Y, Layers(&[1]), false),
            BaseMove::S => (Axis::X, Layers(&[1]), true),
            // Whole-cube rotations use the renderer's axes, not the notation letter.
            BaseMove::X => (Axis::Z, WholeCube, false),
            BaseMove::Y => (Axis::Y, WholeCube, true),
            BaseMove::Z => (Axis::X, WholeCube, true),
        };
        Binding {
            axis,
            target,
            backwards,
        }
    }
}

/// Options for the whole sequence; only timing can be set globally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlobalMotionOptions {
    pub speed: Option<Duration>,
}

/// Per-call options. Unset fields fall back to the player's defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionOptions {
    pub speed: Option<Duration>,
    pub prime: Option<bool>,
}

impl From<GlobalMotionOptions> for MotionOptions {
    fn from(global: GlobalMotionOptions) -> Self {
        Self {
            speed: global.speed,
            prime: None,
        }
    }
}

/// Options after merging defaults, caller overrides and token direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedMotion {
    pub speed: Duration,
    pub prime: bool,
}

/// Input accepted by `Player::play`: either a resolved token or a notation line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveInput {
    Token(MoveToken),
    Line(String),
}

impl From<MoveToken> for MoveInput {
    fn from(token: MoveToken) -> Self {
        MoveInput::Token(token)
    }
}

impl From<&str> for MoveInput {
    fn from(line: &str) -> Self {
        MoveInput::Line(line.to_string())
    }
}

/// Lifecycle notifications emitted by the move queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueEvent {
    QueueStarted,
    QueueEnded,
    MoveFailed { message: String },
    Info(String),
}

impl QueueEvent {
    /// Render a human-readable message for CLI layers.
    pub fn to_message(&self) -> String {
        match self {
            QueueEvent::QueueStarted => "queue started".to_string(),
            QueueEvent::QueueEnded => "queue ended".to_string(),
            QueueEvent::MoveFailed { message } => format!("move failed: {message}"),
            QueueEvent::Info(msg) => msg.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlaybackReport {
    pub timestamp_utc: String,
    pub input: String,
    pub notation: String,
    pub tokens: usize,
    pub executed: u64,
    pub failed: u64,
    #[serde(with = "humantime_serde")]
    pub elapsed: Duration,
    pub config: PlayConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_has_thirty_distinct_tokens() {
        let mut seen = std::collections::HashSet::new();
        for t in MoveToken::ALL {
            assert!(seen.insert(t));
        }
        assert_eq!(seen.len(), 30);
        assert_eq!(MoveToken::ALL.iter().filter(|t| t.is_prime()).count(), 12);
    }

    #[test]
    fn wide_turns_cover_two_layers() {
        for base in [BaseMove::Uw, BaseMove::Rw, BaseMove::Bw] {
            match base.binding().target {
                RotationTarget::Layers(layers) => assert_eq!(layers.len(), 2),
                RotationTarget::WholeCube => panic!("{base:?} should turn layers"),
            }
        }
        assert_eq!(BaseMove::X.binding().target, RotationTarget::WholeCube);
    }

    #[test]
    fn playback_report_serializes_humantime_durations() {
        let report = PlaybackReport {
            timestamp_utc: "2026-01-01T00:00:00Z".into(),
            input: "R U2".into(),
            notation: "R U U".into(),
            tokens: 3,
            executed: 3,
            failed: 0,
            elapsed: Duration::from_millis(600),
            config: PlayConfig {
                speed: DEFAULT_SPEED,
                initial_sequence: None,
                echo_events: false,
            },
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["elapsed"], "600ms");
        assert_eq!(json["config"]["speed"], "200ms");
        assert_eq!(json["config"]["initial_sequence"], serde_json::Value::Null);
    }

    #[test]
    fn primed_token_shares_base() {
        assert_eq!(MoveToken::UPrime.base(), MoveToken::U.base());
        assert_eq!(MoveToken::Rw.base(), BaseMove::Rw);
        assert!(!MoveToken::Rw.is_prime());
    }
}
