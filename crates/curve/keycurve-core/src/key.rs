//! Key data model: keys, tangent modes and the host keyframe shape.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::scalar::CurveFloat;

/// Continuity policy of a key.
///
/// `ManualDissociated` and `ManualEqual` form the manual group; the rest are
/// automatic and have their tangents derived from neighbouring keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TangentMode {
    /// In/out tangents are set by the caller and never touched.
    #[default]
    ManualDissociated,
    /// In/out tangents are forced equal (averaged) but not derived from geometry.
    ManualEqual,
    /// Both tangents are infinite: hold the value, then jump.
    Step,
    /// Both tangents are zero.
    Flat,
    /// Tangents are the secant slopes to the adjacent keys.
    Straight,
    /// Tangents are the mean of the adjacent secants. May overshoot.
    Smooth,
    /// Like `Smooth` but clamped so the curve cannot overshoot its keys.
    SmoothClamped,
}

impl TangentMode {
    pub const ALL: [TangentMode; 7] = [
        TangentMode::ManualDissociated,
        TangentMode::ManualEqual,
        TangentMode::Step,
        TangentMode::Flat,
        TangentMode::Straight,
        TangentMode::Smooth,
        TangentMode::SmoothClamped,
    ];

    #[inline]
    pub fn is_manual(self) -> bool {
        matches!(self, TangentMode::ManualDissociated | TangentMode::ManualEqual)
    }

    #[inline]
    pub fn is_automatic(self) -> bool {
        !self.is_manual()
    }

    /// Flag value used by hosts that store the mode as a bit set.
    #[inline]
    pub fn bits(self) -> u8 {
        match self {
            TangentMode::ManualDissociated => 1 << 0,
            TangentMode::ManualEqual => 1 << 1,
            TangentMode::Step => 1 << 2,
            TangentMode::Flat => 1 << 3,
            TangentMode::Straight => 1 << 4,
            TangentMode::Smooth => 1 << 5,
            TangentMode::SmoothClamped => 1 << 6,
        }
    }

    /// Decode a host flag value. Only a single recognized flag is accepted;
    /// group masks and unknown bits yield `None`.
    pub fn from_bits(bits: u8) -> Option<TangentMode> {
        TangentMode::ALL.into_iter().find(|mode| mode.bits() == bits)
    }

    pub fn name(self) -> &'static str {
        match self {
            TangentMode::ManualDissociated => "ManualDissociated",
            TangentMode::ManualEqual => "ManualEqual",
            TangentMode::Step => "Step",
            TangentMode::Flat => "Flat",
            TangentMode::Straight => "Straight",
            TangentMode::Smooth => "Smooth",
            TangentMode::SmoothClamped => "SmoothClamped",
        }
    }
}

impl fmt::Display for TangentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognized tangent mode name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownTangentMode;

impl FromStr for TangentMode {
    type Err = UnknownTangentMode;

    /// Mode names are matched ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        TangentMode::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
            .ok_or(UnknownTangentMode)
    }
}

/// A point the curve passes through exactly.
///
/// An infinite tangent on either side of a segment turns that segment into a
/// step holding the left key's value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Key<F = f64> {
    pub time: F,
    pub value: F,
    pub in_tangent: F,
    pub out_tangent: F,
    #[serde(default)]
    pub tangent_mode: TangentMode,
}

impl<F: CurveFloat> Key<F> {
    /// Manual key with zero tangents.
    pub fn new(time: F, value: F) -> Self {
        Self::with_tangents(time, value, F::ZERO, F::ZERO)
    }

    /// Manual key with explicit tangents.
    pub fn with_tangents(time: F, value: F, in_tangent: F, out_tangent: F) -> Self {
        Self {
            time,
            value,
            in_tangent,
            out_tangent,
            tangent_mode: TangentMode::ManualDissociated,
        }
    }

    /// Key whose tangents are resolved from its neighbours.
    pub fn with_mode(time: F, value: F, tangent_mode: TangentMode) -> Self {
        Self {
            time,
            value,
            in_tangent: F::ZERO,
            out_tangent: F::ZERO,
            tangent_mode,
        }
    }

    #[inline]
    pub fn is_step_in(&self) -> bool {
        self.in_tangent.is_infinite()
    }

    #[inline]
    pub fn is_step_out(&self) -> bool {
        self.out_tangent.is_infinite()
    }
}

/// Host animation-curve keyframe: the four-field shape external engines use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub time: f64,
    pub value: f64,
    #[serde(rename = "inTangent")]
    pub in_tangent: f64,
    #[serde(rename = "outTangent")]
    pub out_tangent: f64,
}

impl Keyframe {
    pub fn new(time: f64, value: f64, in_tangent: f64, out_tangent: f64) -> Self {
        Self {
            time,
            value,
            in_tangent,
            out_tangent,
        }
    }

    pub(crate) fn to_key<F: CurveFloat>(self) -> Key<F> {
        Key::with_tangents(
            F::from_f64(self.time),
            F::from_f64(self.value),
            F::from_f64(self.in_tangent),
            F::from_f64(self.out_tangent),
        )
    }

    pub(crate) fn from_key<F: CurveFloat>(key: &Key<F>) -> Self {
        Self {
            time: key.time.as_f64(),
            value: key.value.as_f64(),
            in_tangent: key.in_tangent.as_f64(),
            out_tangent: key.out_tangent.as_f64(),
        }
    }
}

impl From<[f64; 4]> for Keyframe {
    fn from(v: [f64; 4]) -> Self {
        Keyframe::new(v[0], v[1], v[2], v[3])
    }
}

impl From<(f64, f64, f64, f64)> for Keyframe {
    fn from((time, value, in_tangent, out_tangent): (f64, f64, f64, f64)) -> Self {
        Keyframe::new(time, value, in_tangent, out_tangent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_round_trip_single_flags_only() {
        for mode in TangentMode::ALL {
            assert_eq!(TangentMode::from_bits(mode.bits()), Some(mode));
        }
        let manual_group = TangentMode::ManualDissociated.bits() | TangentMode::ManualEqual.bits();
        assert_eq!(TangentMode::from_bits(manual_group), None);
        assert_eq!(TangentMode::from_bits(0), None);
        assert_eq!(TangentMode::from_bits(0x80), None);
    }

    #[test]
    fn parse_names_case_insensitively() {
        assert_eq!("smoothclamped".parse(), Ok(TangentMode::SmoothClamped));
        assert_eq!(" Step ".parse(), Ok(TangentMode::Step));
        assert!("Bouncy".parse::<TangentMode>().is_err());
    }

    #[test]
    fn keyframe_json_uses_host_field_names() {
        let kf = Keyframe::new(1.0, 2.0, 0.5, -0.5);
        let json = serde_json::to_string(&kf).unwrap();
        assert!(json.contains("\"inTangent\":0.5"));
        let back: Keyframe = serde_json::from_str(&json).unwrap();
        assert_eq!(back, kf);
    }
}
