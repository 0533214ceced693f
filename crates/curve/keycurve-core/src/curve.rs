//! The curve value: key store, compiled caches and domain endpoints.

use std::ops::Index;

use once_cell::unsync::OnceCell;

use crate::compile::{compile_derivatives, compile_segments, DerivativeSegment, Segment};
use crate::config::Config;
use crate::key::{Key, Keyframe};
use crate::scalar::CurveFloat;
use crate::store::sorted_unique;
use crate::tangents::resolve_tangents;

/// Piecewise cubic Hermite curve over a sorted, unique key set.
///
/// Segments are recompiled eagerly on every mutation, so value queries never
/// see a stale cache. The derivative cache is built on the first tangent
/// query after a mutation and dropped by the next one.
///
/// A curve is a single-owner value with no internal locking. Cloning copies
/// keys and caches.
#[derive(Clone, Debug)]
pub struct Curve<F: CurveFloat = f64> {
    pub(crate) keys: Vec<Key<F>>,
    pub(crate) version: u64,
    pub(crate) auto_tangents: bool,
    pub(crate) segments: Vec<Segment<F>>,
    pub(crate) derivatives: OnceCell<Vec<DerivativeSegment<F>>>,
    pub(crate) first_time: F,
    pub(crate) first_value: F,
    pub(crate) last_time: F,
    pub(crate) last_value: F,
}

/// Full precision curve.
pub type HermiteCurve = Curve<f64>;

/// Reduced precision curve with the same mathematics.
pub type FastFloatCurve = Curve<f32>;

impl<F: CurveFloat> Default for Curve<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: CurveFloat> Curve<F> {
    /// Empty curve in manual tangent mode.
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        Self::from_sorted(Vec::with_capacity(config.initial_capacity), config.auto_tangents)
    }

    /// Build from keys in any order. Keys sharing a time are collapsed to the
    /// one that came first in `keys`.
    pub fn from_keys(keys: impl IntoIterator<Item = Key<F>>) -> Self {
        let (keys, _) = sorted_unique(keys.into_iter().collect());
        Self::from_sorted(keys, false)
    }

    /// Build from host keyframes. All keys are `ManualDissociated`.
    pub fn from_keyframes(keyframes: impl IntoIterator<Item = Keyframe>) -> Self {
        Self::from_keys(keyframes.into_iter().map(Keyframe::to_key))
    }

    /// Host keyframes in time order.
    pub fn to_keyframes(&self) -> Vec<Keyframe> {
        self.keys.iter().map(Keyframe::from_key).collect()
    }

    /// `keys` must already be sorted and unique.
    pub(crate) fn from_sorted(keys: Vec<Key<F>>, auto_tangents: bool) -> Self {
        let mut curve = Self {
            keys,
            version: 0,
            auto_tangents,
            segments: Vec::new(),
            derivatives: OnceCell::new(),
            first_time: F::ZERO,
            first_value: F::ZERO,
            last_time: F::ZERO,
            last_value: F::ZERO,
        };
        if curve.auto_tangents {
            resolve_tangents(&mut curve.keys);
        }
        curve.rebuild();
        curve
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[inline]
    pub fn keys(&self) -> &[Key<F>] {
        &self.keys
    }

    #[inline]
    pub fn key(&self, index: usize) -> Option<&Key<F>> {
        self.keys.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Key<F>> {
        self.keys.iter()
    }

    /// Mutation counter. Advances on every change to keys, modes or the
    /// auto-tangent flag.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    #[inline]
    pub fn auto_tangents(&self) -> bool {
        self.auto_tangents
    }

    /// Time of the first key, zero when empty.
    #[inline]
    pub fn first_time(&self) -> F {
        self.first_time
    }

    #[inline]
    pub fn first_value(&self) -> F {
        self.first_value
    }

    #[inline]
    pub fn last_time(&self) -> F {
        self.last_time
    }

    #[inline]
    pub fn last_value(&self) -> F {
        self.last_value
    }

    /// Enable or disable automatic tangents. Enabling resolves every
    /// automatic key immediately.
    pub fn set_auto_tangents(&mut self, enabled: bool) {
        if self.auto_tangents == enabled {
            return;
        }
        log::debug!("curve auto tangents {}", if enabled { "on" } else { "off" });
        self.auto_tangents = enabled;
        self.mutated();
    }

    /// Resolve automatic tangents now, even when the curve is in manual mode.
    pub fn adjust_tangents(&mut self) {
        resolve_tangents(&mut self.keys);
        self.version = self.version.wrapping_add(1);
        self.rebuild();
    }

    /// Called after every change to the key store.
    pub(crate) fn mutated(&mut self) {
        self.version = self.version.wrapping_add(1);
        if self.auto_tangents {
            resolve_tangents(&mut self.keys);
        }
        self.rebuild();
    }

    fn rebuild(&mut self) {
        compile_segments(&self.keys, &mut self.segments);
        self.derivatives = OnceCell::new();
        match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => {
                self.first_time = first.time;
                self.first_value = first.value;
                self.last_time = last.time;
                self.last_value = last.value;
            }
            _ => {
                self.first_time = F::ZERO;
                self.first_value = F::ZERO;
                self.last_time = F::ZERO;
                self.last_value = F::ZERO;
            }
        }
    }

    pub(crate) fn derivatives(&self) -> &[DerivativeSegment<F>] {
        self.derivatives.get_or_init(|| {
            log::debug!("building derivative cache for {} segments", self.segments.len());
            compile_derivatives(&self.segments)
        })
    }
}

impl<F: CurveFloat> Index<usize> for Curve<F> {
    type Output = Key<F>;

    /// Panics when `index` is out of range, like slice indexing.
    fn index(&self, index: usize) -> &Key<F> {
        &self.keys[index]
    }
}

impl<'a, F: CurveFloat> IntoIterator for &'a Curve<F> {
    type Item = &'a Key<F>;
    type IntoIter = std::slice::Iter<'a, Key<F>>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}

impl<F: CurveFloat> FromIterator<Key<F>> for Curve<F> {
    fn from_iter<I: IntoIterator<Item = Key<F>>>(iter: I) -> Self {
        Self::from_keys(iter)
    }
}
