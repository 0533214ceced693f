//! Tangent resolution for automatic keys.
//!
//! Runs over the whole key slice and rewrites `in_tangent`/`out_tangent` of
//! every key whose mode is not `ManualDissociated`. Times and values are
//! never touched, so each key only reads its neighbours' positions.

use crate::key::{Key, TangentMode};
use crate::scalar::CurveFloat;

/// Largest tangent, as a multiple of the limiting secant, that keeps a
/// clamped segment monotone.
const CLAMP_FACTOR: f64 = 3.0;

#[inline]
fn secant<F: CurveFloat>(a: &Key<F>, b: &Key<F>) -> F {
    (b.value - a.value) / (b.time - a.time)
}

/// Recompute tangents of all non-dissociated keys from neighbour geometry.
pub(crate) fn resolve_tangents<F: CurveFloat>(keys: &mut [Key<F>]) {
    let n = keys.len();
    for i in 0..n {
        if keys[i].tangent_mode == TangentMode::ManualDissociated {
            continue;
        }
        let (in_tangent, out_tangent) = if i == 0 {
            endpoint_tangents(&keys[0], keys.get(1), keys.get(2), true)
        } else if i == n - 1 {
            let far = if n >= 3 { keys.get(n - 3) } else { None };
            endpoint_tangents(&keys[i], keys.get(n - 2), far, false)
        } else {
            interior_tangents(&keys[i - 1], &keys[i], &keys[i + 1])
        };
        keys[i].in_tangent = in_tangent;
        keys[i].out_tangent = out_tangent;
    }
}

/// Tangents of the first or last key. `near` and `far` are the closest and
/// second-closest neighbours, when they exist.
fn endpoint_tangents<F: CurveFloat>(
    key: &Key<F>,
    near: Option<&Key<F>>,
    far: Option<&Key<F>>,
    leading: bool,
) -> (F, F) {
    let t = match key.tangent_mode {
        TangentMode::ManualDissociated => return (key.in_tangent, key.out_tangent),
        TangentMode::Flat => F::ZERO,
        TangentMode::Step => F::INFINITY,
        // Only the side facing the curve matters at an endpoint.
        TangentMode::ManualEqual => {
            if leading {
                key.out_tangent
            } else {
                key.in_tangent
            }
        }
        TangentMode::Straight => near.map_or(F::ZERO, |near| secant(key, near)),
        TangentMode::Smooth | TangentMode::SmoothClamped => {
            let Some(near) = near else {
                return (F::ZERO, F::ZERO);
            };
            let s_near = secant(key, near);
            let estimate = match far {
                Some(far) => F::TWO * s_near - secant(key, far),
                None => s_near,
            };
            if key.tangent_mode == TangentMode::SmoothClamped {
                clamp_endpoint(estimate, s_near)
            } else {
                estimate
            }
        }
    };
    (t, t)
}

fn interior_tangents<F: CurveFloat>(prev: &Key<F>, key: &Key<F>, next: &Key<F>) -> (F, F) {
    let s_prev = secant(prev, key);
    let s_next = secant(key, next);
    match key.tangent_mode {
        TangentMode::ManualDissociated => (key.in_tangent, key.out_tangent),
        TangentMode::ManualEqual => {
            let t = (key.in_tangent + key.out_tangent) * F::HALF;
            (t, t)
        }
        TangentMode::Flat => (F::ZERO, F::ZERO),
        TangentMode::Step => (F::INFINITY, F::INFINITY),
        TangentMode::Straight => (s_prev, s_next),
        TangentMode::Smooth => {
            let t = (s_prev + s_next) * F::HALF;
            (t, t)
        }
        TangentMode::SmoothClamped => {
            let t = clamp_interior(s_prev, s_next);
            (t, t)
        }
    }
}

/// Mean of the adjacent secants, zero at a local extremum, otherwise limited
/// to `CLAMP_FACTOR` times the shallower secant.
fn clamp_interior<F: CurveFloat>(s_prev: F, s_next: F) -> F {
    if s_prev * s_next <= F::ZERO {
        return F::ZERO;
    }
    let mean = (s_prev + s_next) * F::HALF;
    let limit = F::from_f64(CLAMP_FACTOR) * s_prev.abs().min(s_next.abs());
    if mean.abs() > limit {
        if mean.is_sign_negative() {
            -limit
        } else {
            limit
        }
    } else {
        mean
    }
}

/// Endpoint estimate may not flip sign against the nearest secant nor exceed
/// `CLAMP_FACTOR` times it.
fn clamp_endpoint<F: CurveFloat>(estimate: F, s_near: F) -> F {
    if estimate * s_near <= F::ZERO {
        return F::ZERO;
    }
    let limit = F::from_f64(CLAMP_FACTOR) * s_near;
    if estimate.abs() > limit.abs() {
        limit
    } else {
        estimate
    }
}
