//! Fail-fast key enumeration that survives between borrows.
//!
//! [`Curve::iter`] borrows the curve, so the compiler already rules out
//! mutation while it runs. A [`KeyCursor`] is for owners that interleave
//! stepping with other work: it holds no borrow and instead checks the
//! curve's mutation version on every step.

use crate::curve::Curve;
use crate::error::CurveError;
use crate::key::Key;
use crate::scalar::CurveFloat;
use crate::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyCursor {
    version: u64,
    index: usize,
}

impl KeyCursor {
    /// Next key, `None` once exhausted, or an error if `curve` changed since
    /// the cursor was created.
    pub fn advance<F: CurveFloat>(&mut self, curve: &Curve<F>) -> Option<Result<Key<F>>> {
        if curve.version() != self.version {
            return Some(Err(CurveError::ConcurrentModification {
                expected: self.version,
                found: curve.version(),
            }));
        }
        let key = *curve.key(self.index)?;
        self.index += 1;
        Some(Ok(key))
    }

    /// Index of the key the next step yields.
    pub fn position(&self) -> usize {
        self.index
    }
}

impl<F: CurveFloat> Curve<F> {
    pub fn cursor(&self) -> KeyCursor {
        KeyCursor {
            version: self.version(),
            index: 0,
        }
    }
}
