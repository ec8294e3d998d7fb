//! Errors and retry configuration for the rejection-sampled derangement.

use core::num::NonZeroUsize;

use thiserror::Error;

/// Errors reported by the bounded operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Every permitted attempt produced a fixed point. The buffer is unchanged.
    #[error("no derangement found after {attempts} attempts")]
    AttemptsExhausted {
        /// Number of rejected attempts.
        attempts: usize,
    },
}

/// How many shuffle attempts a derangement may make before giving up.
///
/// The expected number of attempts approaches `e` for large inputs, so even
/// small caps fail rarely on valid input. A cap mainly guards against inputs
/// with duplicate elements, for which no derangement by value may exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: Option<NonZeroUsize>,
}

impl RetryPolicy {
    /// Retries until a derangement is found.
    #[inline]
    pub const fn unbounded() -> Self {
        Self { max_attempts: None }
    }

    /// Gives up after `max_attempts` rejected attempts.
    #[inline]
    pub const fn bounded(max_attempts: NonZeroUsize) -> Self {
        Self {
            max_attempts: Some(max_attempts),
        }
    }

    /// Returns the attempt cap, if any.
    #[inline]
    pub const fn max_attempts(&self) -> Option<NonZeroUsize> {
        self.max_attempts
    }

    /// Whether another attempt is allowed after `made` attempts.
    #[inline]
    pub(crate) fn allows(&self, made: usize) -> bool {
        self.max_attempts.map_or(true, |max| made < max.get())
    }
}
