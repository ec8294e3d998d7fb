//! # randperm
//!
//! Uniform random permutations of slices and arrays, performed in place:
//! full shuffles, partial shuffles, single-cycle (Sattolo) shuffles and
//! derangements.
//!
//! Each algorithm is written once against [`IndexSource`]. It can be driven
//! by any [`rand::Rng`] borrowed from the caller's context, by a generator
//! threaded through the call by value (see [`threaded`]), or by the
//! thread-local generator (see [`ambient`], behind the `thread_rng` feature).
//!
//! ## Examples
//!
//! ```
//! use randperm::Permute;
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//!
//! let mut rng = SmallRng::seed_from_u64(0);
//! let mut arr = [1, 2, 3, 4, 5];
//!
//! arr.maximal_cycle(&mut rng);
//! assert!(arr.iter().enumerate().all(|(i, &x)| x != i + 1));
//!
//! let sample = arr.sample_without_replacement(2, &mut rng);
//! assert_eq!(sample.len(), 2);
//! ```

#![no_std]
#![warn(missing_docs, rust_2018_idioms)]

extern crate alloc;

#[cfg(feature = "thread_rng")]
pub mod ambient;
pub mod engine;
mod error;
pub mod source;
pub mod threaded;

pub use error::{Error, RetryPolicy};
pub use source::{FromFn, IndexSource, SplitGen, Threaded};

/// Trait for permuting arrays and slices in place.
pub trait Permute<T>: internal::Sealed {
    /// Shuffles uniformly over all orderings.
    ///
    /// ```
    /// # use randperm::Permute;
    /// # use rand::{rngs::SmallRng, SeedableRng};
    /// let mut v = vec![1, 2, 3, 4];
    /// v.shuffle(&mut SmallRng::seed_from_u64(1));
    /// v.sort();
    /// assert_eq!(v, [1, 2, 3, 4]);
    /// ```
    fn shuffle<S: IndexSource + ?Sized>(&mut self, source: &mut S);

    /// Performs the first `k` steps of a shuffle, randomizing the last
    /// `min(k, len)` positions, and returns them.
    ///
    /// `k >= len - 1` amounts to a full shuffle. `k == 0` draws nothing and
    /// returns an empty slice.
    fn shuffle_k<S: IndexSource + ?Sized>(&mut self, k: usize, source: &mut S) -> &mut [T];

    /// Selects `min(k, len)` elements uniformly without replacement.
    ///
    /// The selection is moved to the end of `self` and returned; the rest of
    /// `self` is left in an unspecified order.
    fn sample_without_replacement<S: IndexSource + ?Sized>(
        &mut self,
        k: usize,
        source: &mut S,
    ) -> &[T];

    /// Shuffles into a single cycle covering every position.
    fn maximal_cycle<S: IndexSource + ?Sized>(&mut self, source: &mut S);

    /// Shuffles so that no element stays at its position.
    ///
    /// Elements must be pairwise distinct. Retries until it succeeds; see
    /// [`engine::derange`] for the running-time caveats.
    ///
    /// ```
    /// # use randperm::Permute;
    /// # use rand::{rngs::SmallRng, SeedableRng};
    /// let mut arr = [1, 2, 3];
    /// arr.derangement(&mut SmallRng::seed_from_u64(2));
    /// assert!(arr == [2, 3, 1] || arr == [3, 1, 2]);
    /// ```
    fn derangement<S: IndexSource + ?Sized>(&mut self, source: &mut S)
    where
        T: PartialEq;

    /// Like [`derangement`](Permute::derangement), giving up according to
    /// `policy`. On error `self` is unchanged.
    fn try_derangement<S: IndexSource + ?Sized>(
        &mut self,
        source: &mut S,
        policy: RetryPolicy,
    ) -> Result<(), Error>
    where
        T: PartialEq;
}

impl<T> Permute<T> for [T] {
    #[inline]
    fn shuffle<S: IndexSource + ?Sized>(&mut self, source: &mut S) {
        engine::fisher_yates(self, source)
    }

    #[inline]
    fn shuffle_k<S: IndexSource + ?Sized>(&mut self, k: usize, source: &mut S) -> &mut [T] {
        engine::partial_fisher_yates(self, k, source).0
    }

    #[inline]
    fn sample_without_replacement<S: IndexSource + ?Sized>(
        &mut self,
        k: usize,
        source: &mut S,
    ) -> &[T] {
        engine::sample_without_replacement(self, k, source)
    }

    #[inline]
    fn maximal_cycle<S: IndexSource + ?Sized>(&mut self, source: &mut S) {
        engine::sattolo(self, source)
    }

    #[inline]
    fn derangement<S: IndexSource + ?Sized>(&mut self, source: &mut S)
    where
        T: PartialEq,
    {
        engine::derange(self, source)
    }

    #[inline]
    fn try_derangement<S: IndexSource + ?Sized>(
        &mut self,
        source: &mut S,
        policy: RetryPolicy,
    ) -> Result<(), Error>
    where
        T: PartialEq,
    {
        engine::try_derange(self, source, policy)
    }
}

impl<T, const N: usize> Permute<T> for [T; N] {
    #[inline]
    fn shuffle<S: IndexSource + ?Sized>(&mut self, source: &mut S) {
        self.as_mut_slice().shuffle(source)
    }

    #[inline]
    fn shuffle_k<S: IndexSource + ?Sized>(&mut self, k: usize, source: &mut S) -> &mut [T] {
        self.as_mut_slice().shuffle_k(k, source)
    }

    #[inline]
    fn sample_without_replacement<S: IndexSource + ?Sized>(
        &mut self,
        k: usize,
        source: &mut S,
    ) -> &[T] {
        self.as_mut_slice().sample_without_replacement(k, source)
    }

    #[inline]
    fn maximal_cycle<S: IndexSource + ?Sized>(&mut self, source: &mut S) {
        self.as_mut_slice().maximal_cycle(source)
    }

    #[inline]
    fn derangement<S: IndexSource + ?Sized>(&mut self, source: &mut S)
    where
        T: PartialEq,
    {
        self.as_mut_slice().derangement(source)
    }

    #[inline]
    fn try_derangement<S: IndexSource + ?Sized>(
        &mut self,
        source: &mut S,
        policy: RetryPolicy,
    ) -> Result<(), Error>
    where
        T: PartialEq,
    {
        self.as_mut_slice().try_derangement(source, policy)
    }
}

mod internal {
    pub trait Sealed {}

    impl<T> Sealed for [T] {}
    impl<T, const N: usize> Sealed for [T; N] {}
}
