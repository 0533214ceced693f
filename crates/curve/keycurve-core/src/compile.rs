//! Segment compilation.
//!
//! Each adjacent key pair becomes a cubic `a·t³ + b·t² + c·t + d` expressed
//! directly in curve time, so sampling is one Horner evaluation with no
//! normalisation or basis functions.

use crate::key::Key;
use crate::scalar::CurveFloat;

/// Compiled cubic between two adjacent keys.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Segment<F> {
    pub start_time: F,
    pub start_value: F,
    pub end_time: F,
    pub end_value: F,
    pub a: F,
    pub b: F,
    pub c: F,
    pub d: F,
}

impl<F: CurveFloat> Segment<F> {
    /// Solve the Hermite boundary conditions `h(t0)=p0, h(t1)=p1,
    /// h'(t0)=m0, h'(t1)=m1` for global-time coefficients.
    pub fn compile(k0: &Key<F>, k1: &Key<F>) -> Self {
        let t0 = k0.time;
        let p0 = k0.value;
        let mut seg = Segment {
            start_time: t0,
            start_value: p0,
            end_time: k1.time,
            end_value: k1.value,
            a: F::ZERO,
            b: F::ZERO,
            c: F::ZERO,
            d: p0,
        };
        if k0.is_step_out() || k1.is_step_in() {
            return seg;
        }

        let m0 = k0.out_tangent;
        let m1 = k1.in_tangent;
        let dt = k1.time - t0;
        let slope = (k1.value - p0) / dt;

        // Local form p0 + m0·s + c2·s² + c3·s³ with s = t - t0.
        let c2 = (F::THREE * slope - F::TWO * m0 - m1) / dt;
        let c3 = (m0 + m1 - F::TWO * slope) / (dt * dt);

        // Expand about t0.
        let t0_2 = t0 * t0;
        seg.a = c3;
        seg.b = c2 - F::THREE * c3 * t0;
        seg.c = m0 - F::TWO * c2 * t0 + F::THREE * c3 * t0_2;
        seg.d = p0 - m0 * t0 + c2 * t0_2 - c3 * t0_2 * t0;
        seg
    }

    #[inline]
    pub fn value(&self, t: F) -> F {
        ((self.a * t + self.b) * t + self.c) * t + self.d
    }

    /// Times strictly inside the segment where the derivative vanishes.
    pub fn stationary_points(&self) -> [Option<F>; 2] {
        let inside = |t: F| (t > self.start_time && t < self.end_time).then_some(t);
        let [r0, r1] = quadratic_roots(F::THREE * self.a, F::TWO * self.b, self.c);
        [r0.and_then(inside), r1.and_then(inside)]
    }
}

/// Derivative of a [`Segment`]: `3a·t² + 2b·t + c`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct DerivativeSegment<F> {
    pub start_time: F,
    pub a: F,
    pub b: F,
    pub c: F,
}

impl<F: CurveFloat> DerivativeSegment<F> {
    pub fn from_segment(seg: &Segment<F>) -> Self {
        Self {
            start_time: seg.start_time,
            a: F::THREE * seg.a,
            b: F::TWO * seg.b,
            c: seg.c,
        }
    }

    #[inline]
    pub fn slope(&self, t: F) -> F {
        (self.a * t + self.b) * t + self.c
    }
}

/// Rebuild `out` so it holds one segment per adjacent key pair.
pub(crate) fn compile_segments<F: CurveFloat>(keys: &[Key<F>], out: &mut Vec<Segment<F>>) {
    out.clear();
    out.extend(keys.windows(2).map(|w| Segment::compile(&w[0], &w[1])));
    log::trace!("compiled {} curve segments", out.len());
}

pub(crate) fn compile_derivatives<F: CurveFloat>(
    segments: &[Segment<F>],
) -> Vec<DerivativeSegment<F>> {
    segments.iter().map(DerivativeSegment::from_segment).collect()
}

/// Index of the segment whose start time is the greatest one `<= t`.
/// Times before the first segment map to segment 0.
#[inline]
pub(crate) fn segment_index<F: CurveFloat, S>(
    segments: &[S],
    start_time: impl Fn(&S) -> F,
    t: F,
) -> usize {
    segments
        .partition_point(|s| start_time(s) <= t)
        .saturating_sub(1)
}

/// Real roots of `a·x² + b·x + c`, degrading to the linear case when `a` is
/// zero. Uses the cancellation-free form of the quadratic formula.
fn quadratic_roots<F: CurveFloat>(a: F, b: F, c: F) -> [Option<F>; 2] {
    if a == F::ZERO {
        if b == F::ZERO {
            return [None, None];
        }
        return [Some(-c / b), None];
    }
    let disc = b * b - F::from_f64(4.0) * a * c;
    if disc < F::ZERO {
        return [None, None];
    }
    let root = disc.sqrt();
    let q = if b.is_sign_negative() {
        -F::HALF * (b - root)
    } else {
        -F::HALF * (b + root)
    };
    if q == F::ZERO {
        // b == 0 and c == 0: double root at the origin.
        return [Some(F::ZERO), None];
    }
    [Some(q / a), Some(c / q)]
}
