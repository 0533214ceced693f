//! Sampling: values, slopes, extrema and synthesized tangent keys.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::compile::segment_index;
use crate::curve::Curve;
use crate::key::Key;
use crate::scalar::CurveFloat;

/// Global minimum and maximum of a curve over its key range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Extrema<F = f64> {
    pub min_time: F,
    pub min_value: F,
    pub max_time: F,
    pub max_value: F,
}

impl<F: CurveFloat> Extrema<F> {
    fn at(time: F, value: F) -> Self {
        Self {
            min_time: time,
            min_value: value,
            max_time: time,
            max_value: value,
        }
    }

    /// Earlier candidates win ties.
    fn include(&mut self, time: F, value: F) {
        if value < self.min_value {
            self.min_time = time;
            self.min_value = value;
        }
        if value > self.max_value {
            self.max_time = time;
            self.max_value = value;
        }
    }
}

impl<F: CurveFloat> Curve<F> {
    /// Value at `time`, clamped to the first/last key value outside the key
    /// range. Exact at every key time. An empty curve evaluates to zero.
    pub fn evaluate(&self, time: F) -> F {
        if self.at_or_before_start(time) {
            return self.first_value;
        }
        if time >= self.last_time {
            return self.last_value;
        }
        self.sample_inside(time)
    }

    /// Like [`evaluate`](Self::evaluate), but outside the key range the first
    /// or last segment's polynomial is extrapolated instead of clamping.
    pub fn evaluate_unclamped(&self, time: F) -> F {
        let Some(last) = self.segments.last() else {
            return self.first_value;
        };
        if time >= self.last_time {
            return if time == self.last_time {
                self.last_value
            } else {
                last.value(time)
            };
        }
        self.sample_inside(time)
    }

    /// True for times not strictly after the first key, NaN included.
    #[inline]
    fn at_or_before_start(&self, time: F) -> bool {
        time.partial_cmp(&self.first_time) != Some(Ordering::Greater)
    }

    /// Segment lookup for `time < last_time`; times before the first key
    /// fall into the first segment.
    #[inline]
    fn sample_inside(&self, time: F) -> F {
        let seg = &self.segments[segment_index(&self.segments, |s| s.start_time, time)];
        if time == seg.start_time {
            seg.start_value
        } else {
            seg.value(time)
        }
    }

    /// First derivative at `time`. At or beyond the ends of the key range the
    /// boundary key's own out/in tangent is returned. An empty curve has
    /// slope zero.
    pub fn find_tangent(&self, time: F) -> F {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return F::ZERO;
        };
        if self.at_or_before_start(time) {
            return first.out_tangent;
        }
        if time >= self.last_time {
            return last.in_tangent;
        }
        let derivatives = self.derivatives();
        derivatives[segment_index(derivatives, |d| d.start_time, time)].slope(time)
    }

    /// Global extrema over the key range. Each segment contributes its end
    /// values and any stationary point strictly inside it.
    ///
    /// An empty curve reports all zeros; a single key reports itself for both.
    pub fn find_min_max(&self) -> Extrema<F> {
        let mut extrema = Extrema::at(self.first_time, self.first_value);
        for seg in &self.segments {
            extrema.include(seg.start_time, seg.start_value);
            extrema.include(seg.end_time, seg.end_value);
            for t in seg.stationary_points().into_iter().flatten() {
                extrema.include(t, seg.value(t));
            }
        }
        extrema
    }

    /// Manual key at `time` matching the curve's current value and slope.
    ///
    /// `None` when the curve has fewer than two keys or the sampled value or
    /// slope is not finite.
    pub fn create_tangent_key(&self, time: F) -> Option<Key<F>> {
        if self.keys.len() < 2 {
            return None;
        }
        let value = self.evaluate(time);
        let tangent = self.find_tangent(time);
        if !value.is_finite() || !tangent.is_finite() {
            return None;
        }
        Some(Key::with_tangents(time, value, tangent, tangent))
    }
}
