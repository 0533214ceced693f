//! keycurve core
//!
//! Piecewise cubic Hermite keyframe curves. A [`Curve`] keeps a time-sorted,
//! unique key set, resolves automatic tangents from neighbouring keys,
//! compiles every segment into a cached cubic in curve time and samples
//! values, slopes and extrema from that cache.
//!
//! [`HermiteCurve`] stores `f64`; [`FastFloatCurve`] runs the same
//! mathematics in `f32`.

pub mod codec;
mod compile;
pub mod config;
pub mod cursor;
pub mod curve;
pub mod error;
pub mod eval;
pub mod key;
pub mod scalar;
mod store;
mod tangents;

// Re-exports for consumers (host adapters)
pub use codec::{format_key, parse_record, ParsedRecord};
pub use config::Config;
pub use cursor::KeyCursor;
pub use curve::{Curve, FastFloatCurve, HermiteCurve};
pub use error::{ConfigError, CurveError, RecordError};
pub use eval::Extrema;
pub use key::{Key, Keyframe, TangentMode, UnknownTangentMode};
pub use scalar::CurveFloat;

/// Curve operation result type
pub type Result<T> = core::result::Result<T, CurveError>;
