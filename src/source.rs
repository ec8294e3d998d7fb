//! Random-index sources.
//!
//! Every algorithm in [`engine`](crate::engine) is written once against
//! [`IndexSource`]. Two calling conventions plug into it:
//!
//! * Any [`rand::Rng`] is an `IndexSource` directly. Draws happen against
//!   whatever generator the caller's context owns, e.g. the thread-local
//!   [`rand::rng()`](https://docs.rs/rand/latest/rand/fn.rng.html).
//! * A value-threaded generator ([`SplitGen`]) is wrapped in [`Threaded`],
//!   which feeds the state returned by each draw into the next one and hands
//!   the final state back through [`Threaded::into_inner`].

use core::fmt;

use rand::Rng;

/// A source of uniformly distributed indexes.
pub trait IndexSource {
    /// Draws an integer uniformly from the inclusive range `[lo, hi]`.
    ///
    /// Callers must ensure `lo <= hi`. Implementations may panic otherwise.
    fn draw(&mut self, lo: usize, hi: usize) -> usize;
}

impl<R: Rng + ?Sized> IndexSource for R {
    #[inline]
    fn draw(&mut self, lo: usize, hi: usize) -> usize {
        debug_assert!(lo <= hi, "empty index range [{lo}, {hi}]");
        self.random_range(lo..=hi)
    }
}

/// A generator that is threaded by value: each draw consumes the current
/// state and returns the next one alongside the index.
pub trait SplitGen: Sized {
    /// Draws an integer uniformly from `[lo, hi]`, returning it together
    /// with the successor state.
    fn split_draw(self, lo: usize, hi: usize) -> (usize, Self);
}

impl<R: Rng> SplitGen for R {
    #[inline]
    fn split_draw(mut self, lo: usize, hi: usize) -> (usize, Self) {
        let i = IndexSource::draw(&mut self, lo, hi);
        (i, self)
    }
}

/// Adapts a [`SplitGen`] into an [`IndexSource`].
///
/// If [`SplitGen::split_draw`] panics the state is lost and the adapter is
/// poisoned: any later draw or [`into_inner`](Threaded::into_inner) panics.
pub struct Threaded<G> {
    // `None` only after a panicking draw.
    state: Option<G>,
}

const POISONED: &str = "generator state lost to a panicking draw";

impl<G: SplitGen> Threaded<G> {
    /// Starts threading from the given generator state.
    #[inline]
    pub fn new(state: G) -> Self {
        Self { state: Some(state) }
    }

    /// Returns the state produced by the last draw, or the initial state if
    /// nothing was drawn.
    #[inline]
    pub fn into_inner(self) -> G {
        self.state.expect(POISONED)
    }
}

impl<G: SplitGen> IndexSource for Threaded<G> {
    #[inline]
    fn draw(&mut self, lo: usize, hi: usize) -> usize {
        let state = self.state.take().expect(POISONED);
        let (i, next) = state.split_draw(lo, hi);
        self.state = Some(next);
        i
    }
}

impl<G: fmt::Debug> fmt::Debug for Threaded<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Threaded").field(&self.state).finish()
    }
}

/// An [`IndexSource`] backed by a closure.
///
/// The closure receives `(lo, hi)` and must return a value in `[lo, hi]`.
/// Handy for replaying a recorded draw sequence.
#[derive(Clone, Copy)]
pub struct FromFn<F>(pub F);

impl<F: FnMut(usize, usize) -> usize> IndexSource for FromFn<F> {
    #[inline]
    fn draw(&mut self, lo: usize, hi: usize) -> usize {
        let i = (self.0)(lo, hi);
        debug_assert!((lo..=hi).contains(&i), "{i} drawn outside [{lo}, {hi}]");
        i
    }
}

impl<F> fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FromFn(..)")
    }
}
