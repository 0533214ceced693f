//! Key store: sorted, unique-time insertion, replacement and removal.

use std::cmp::Ordering;

use crate::curve::Curve;
use crate::error::CurveError;
use crate::key::{Key, TangentMode};
use crate::scalar::CurveFloat;
use crate::Result;

/// Stable sort by time, then drop every key whose time equals the previous
/// survivor's. The first key of each time in input order is kept. Keys with
/// a non-finite time are dropped too. Returns the survivors and the number dropped.
pub(crate) fn sorted_unique<F: CurveFloat>(mut keys: Vec<Key<F>>) -> (Vec<Key<F>>, usize) {
    let before = keys.len();
    keys.retain(|k| k.time.is_finite());
    keys.sort_by(|a, b| a.time.partial_cmp(&b.time).unwrap_or(Ordering::Equal));
    keys.dedup_by(|later, earlier| later.time == earlier.time);
    let dropped = before - keys.len();
    (keys, dropped)
}

impl<F: CurveFloat> Curve<F> {
    /// Position where a key at `time` belongs, and whether that slot is
    /// already taken by a key with the same time.
    #[inline]
    fn slot(&self, time: F) -> (usize, bool) {
        let index = self.keys.partition_point(|k| k.time < time);
        let taken = self.keys.get(index).is_some_and(|k| k.time == time);
        (index, taken)
    }

    fn check_time(time: F) -> Result<()> {
        if time.is_finite() {
            Ok(())
        } else {
            Err(CurveError::InvalidTime {
                time: time.as_f64(),
            })
        }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.keys.len() {
            Ok(())
        } else {
            Err(CurveError::IndexOutOfRange {
                index,
                len: self.keys.len(),
            })
        }
    }

    /// Insert `key` in time order and return its index. Rejected with
    /// [`CurveError::DuplicateTime`] if a key already sits at that time; the
    /// curve is left untouched in that case.
    pub fn add_key(&mut self, key: Key<F>) -> Result<usize> {
        Self::check_time(key.time)?;
        let (index, taken) = self.slot(key.time);
        if taken {
            return Err(CurveError::DuplicateTime {
                time: key.time.as_f64(),
            });
        }
        self.keys.insert(index, key);
        self.mutated();
        Ok(index)
    }

    /// Insert `key`, overwriting any key already at its time. Only fails on a
    /// non-finite time.
    pub fn add_or_replace_key(&mut self, key: Key<F>) -> Result<usize> {
        Self::check_time(key.time)?;
        let (index, taken) = self.slot(key.time);
        if taken {
            self.keys[index] = key;
        } else {
            self.keys.insert(index, key);
        }
        self.mutated();
        Ok(index)
    }

    /// Replace the key at `index` with `key` and return the new index.
    ///
    /// If the time is unchanged the key is updated in place. Otherwise the
    /// replacement is rejected when its time collides with another key, and
    /// the curve is left untouched.
    pub fn replace_key(&mut self, index: usize, key: Key<F>) -> Result<usize> {
        self.check_index(index)?;
        Self::check_time(key.time)?;
        if self.keys[index].time == key.time {
            self.keys[index] = key;
            self.mutated();
            return Ok(index);
        }
        // The old key has a different time, so any hit here is another key.
        if self.slot(key.time).1 {
            return Err(CurveError::DuplicateTime {
                time: key.time.as_f64(),
            });
        }
        self.keys.remove(index);
        let (new_index, _) = self.slot(key.time);
        self.keys.insert(new_index, key);
        self.mutated();
        Ok(new_index)
    }

    /// Remove and return the key at `index`.
    pub fn remove_key(&mut self, index: usize) -> Result<Key<F>> {
        self.check_index(index)?;
        let removed = self.keys.remove(index);
        self.mutated();
        Ok(removed)
    }

    pub fn clear(&mut self) {
        self.keys.clear();
        self.mutated();
    }

    /// Assign `mode` to every key.
    pub fn set_keys_tangent_mode(&mut self, mode: TangentMode) {
        for key in &mut self.keys {
            key.tangent_mode = mode;
        }
        self.mutated();
    }

    /// Host flag variant of [`set_keys_tangent_mode`](Self::set_keys_tangent_mode).
    /// Values that are not a single recognized flag are ignored and `false`
    /// is returned.
    pub fn set_keys_tangent_mode_bits(&mut self, bits: u8) -> bool {
        match TangentMode::from_bits(bits) {
            Some(mode) => {
                self.set_keys_tangent_mode(mode);
                true
            }
            None => false,
        }
    }

    pub fn set_key_tangent_mode(&mut self, index: usize, mode: TangentMode) -> Result<()> {
        self.check_index(index)?;
        self.keys[index].tangent_mode = mode;
        self.mutated();
        Ok(())
    }
}
