//! Randomness: the injectable source, the index selector and the shuffle.

use rand::Rng;
use rand::rngs::StdRng;

use crate::error::{DrawError, DrawResult};

/// A source of uniformly distributed integers.
///
/// The session only ever asks for values below a bound, so this is the whole
/// surface a test double has to provide.
pub trait RandomSource {
    /// Return a value uniformly distributed in `0..bound`. `bound` is never 0.
    fn below(&mut self, bound: u64) -> u64;
}

impl RandomSource for StdRng {
    fn below(&mut self, bound: u64) -> u64 {
        self.random_range(0..bound)
    }
}

/// Replays a fixed sequence of values, each reduced modulo the requested bound.
///
/// The sequence wraps around when exhausted. An empty script always yields 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    values: Vec<u64>,
    cursor: usize,
}

impl ScriptedSource {
    /// Create a source replaying `values` in order.
    pub fn new(values: impl Into<Vec<u64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Number of values handed out so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedSource {
    fn below(&mut self, bound: u64) -> u64 {
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value % bound
    }
}

/// Pick a uniformly distributed index in `0..n`.
///
/// Fails with [`DrawError::InvalidArgument`] when `n` is 0.
pub fn pick_index<R: RandomSource + ?Sized>(rng: &mut R, n: usize) -> DrawResult<usize> {
    if n == 0 {
        return Err(DrawError::InvalidArgument(
            "cannot pick from zero options".to_string(),
        ));
    }
    Ok(rng.below(n as u64) as usize)
}

/// Return a uniformly random permutation of `items` (Fisher-Yates).
///
/// The input is left untouched.
pub fn shuffle<T: Clone, R: RandomSource + ?Sized>(rng: &mut R, items: &[T]) -> Vec<T> {
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.below(i as u64 + 1) as usize;
        out.swap(i, j);
    }
    out
}

/// Draw a value uniformly from the inclusive range `min..=max`.
pub(crate) fn between<R: RandomSource + ?Sized>(rng: &mut R, min: u64, max: u64) -> u64 {
    if max <= min {
        return min;
    }
    // Saturates on the full u64 range, which never reaches u64::MAX itself.
    min + rng.below((max - min).saturating_add(1))
}
