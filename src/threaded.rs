//! Operations with an explicitly threaded generator.
//!
//! Each function takes the generator state by value and returns the state
//! left after its last draw, so no draw is ever reused:
//!
//! ```
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//! use randperm::threaded;
//!
//! let g = SmallRng::seed_from_u64(7);
//! let mut v = [1, 2, 3, 4];
//! let g = threaded::shuffle(&mut v, g);
//! let (sample, _g) = threaded::sample_without_replacement(2, &mut v, g);
//! assert_eq!(sample.len(), 2);
//! ```
//!
//! For buffers of length 0 or 1 the generator comes back untouched.

use crate::engine;
use crate::error::{Error, RetryPolicy};
use crate::source::{SplitGen, Threaded};

/// Explicit-generator form of [`engine::fisher_yates`].
pub fn shuffle<T, G: SplitGen>(buf: &mut [T], state: G) -> G {
    let mut source = Threaded::new(state);
    engine::fisher_yates(buf, &mut source);
    source.into_inner()
}

/// Explicit-generator form of [`engine::partial_fisher_yates`], returning
/// the randomized tail of length `min(k, buf.len())`.
pub fn shuffle_k<T, G: SplitGen>(k: usize, buf: &mut [T], state: G) -> (&mut [T], G) {
    let mut source = Threaded::new(state);
    let (sample, _) = engine::partial_fisher_yates(buf, k, &mut source);
    (sample, source.into_inner())
}

/// Explicit-generator form of [`engine::sample_without_replacement`].
pub fn sample_without_replacement<T, G: SplitGen>(k: usize, buf: &mut [T], state: G) -> (&[T], G) {
    let (sample, state) = shuffle_k(k, buf, state);
    (&*sample, state)
}

/// Explicit-generator form of [`engine::sattolo`].
pub fn maximal_cycle<T, G: SplitGen>(buf: &mut [T], state: G) -> G {
    let mut source = Threaded::new(state);
    engine::sattolo(buf, &mut source);
    source.into_inner()
}

/// Explicit-generator form of [`engine::derange`].
pub fn derangement<T: PartialEq, G: SplitGen>(buf: &mut [T], state: G) -> G {
    let mut source = Threaded::new(state);
    engine::derange(buf, &mut source);
    source.into_inner()
}

/// Explicit-generator form of [`engine::try_derange`]. The generator state
/// is returned whether or not a derangement was found.
pub fn try_derangement<T: PartialEq, G: SplitGen>(
    buf: &mut [T],
    state: G,
    policy: RetryPolicy,
) -> (Result<(), Error>, G) {
    let mut source = Threaded::new(state);
    let result = engine::try_derange(buf, &mut source, policy);
    (result, source.into_inner())
}
