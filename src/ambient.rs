//! Operations drawing from the thread-local generator.
//!
//! These take no generator argument and use [`rand::rng()`] instead. Draws
//! are made in program order on the calling thread.
//!
//! ```
//! let mut v = vec!['a', 'b', 'c', 'd'];
//! randperm::ambient::derangement(&mut v);
//! assert!(v.iter().zip("abcd".chars()).all(|(&x, y)| x != y));
//! ```

use crate::engine;
use crate::error::{Error, RetryPolicy};

/// Effectful form of [`engine::fisher_yates`].
#[inline]
pub fn shuffle<T>(buf: &mut [T]) {
    engine::fisher_yates(buf, &mut rand::rng())
}

/// Effectful form of [`engine::partial_fisher_yates`], returning the
/// randomized tail of length `min(k, buf.len())`.
#[inline]
pub fn shuffle_k<T>(k: usize, buf: &mut [T]) -> &mut [T] {
    engine::partial_fisher_yates(buf, k, &mut rand::rng()).0
}

/// Effectful form of [`engine::sample_without_replacement`].
#[inline]
pub fn sample_without_replacement<T>(k: usize, buf: &mut [T]) -> &[T] {
    engine::sample_without_replacement(buf, k, &mut rand::rng())
}

/// Effectful form of [`engine::sattolo`].
#[inline]
pub fn maximal_cycle<T>(buf: &mut [T]) {
    engine::sattolo(buf, &mut rand::rng())
}

/// Effectful form of [`engine::derange`].
#[inline]
pub fn derangement<T: PartialEq>(buf: &mut [T]) {
    engine::derange(buf, &mut rand::rng())
}

/// Effectful form of [`engine::try_derange`].
#[inline]
pub fn try_derangement<T: PartialEq>(buf: &mut [T], policy: RetryPolicy) -> Result<(), Error> {
    engine::try_derange(buf, &mut rand::rng(), policy)
}
