//! In-place permutation algorithms.
//!
//! Each algorithm walks an index `i` from the high end of the buffer down,
//! swapping `buf[i]` with a position drawn from an [`IndexSource`]. Buffers
//! of length 0 or 1 are returned untouched and no index is drawn.

use alloc::vec::Vec;

use tracing::{debug, instrument, trace, warn};

use crate::error::{Error, RetryPolicy};
use crate::source::IndexSource;

/// Fisher-Yates-Knuth shuffle.
///
/// Every one of the `n!` orderings is equally likely. Draws exactly `n - 1`
/// indexes for `n >= 2`.
#[inline]
pub fn fisher_yates<T, S: IndexSource + ?Sized>(buf: &mut [T], source: &mut S) {
    let n = buf.len();
    partial_fisher_yates(buf, n, source);
}

/// Runs only the first `min(k, n - 1)` steps of [`fisher_yates`].
///
/// Returns `(sample, rest)`: `sample` is the last `min(k, n)` positions and
/// holds a uniformly random `k`-subset of the input in random order, `rest`
/// is everything before it. With `k >= n - 1` this is a full shuffle.
pub fn partial_fisher_yates<'a, T, S: IndexSource + ?Sized>(
    buf: &'a mut [T],
    k: usize,
    source: &mut S,
) -> (&'a mut [T], &'a mut [T]) {
    let n = buf.len();
    let k = k.min(n);
    let split = n - k;

    // Position 0 needs no step: with a single candidate left the draw is forced.
    for i in (split.max(1)..n).rev() {
        let j = source.draw(0, i);
        buf.swap(i, j);
    }

    let (rest, sample) = buf.split_at_mut(split);
    (sample, rest)
}

/// Picks `min(k, n)` distinct positions uniformly and returns them, in
/// random order, as the tail of `buf`.
#[inline]
pub fn sample_without_replacement<'a, T, S: IndexSource + ?Sized>(
    buf: &'a mut [T],
    k: usize,
    source: &mut S,
) -> &'a mut [T] {
    partial_fisher_yates(buf, k, source).0
}

/// Sattolo's algorithm.
///
/// Produces a uniformly random permutation consisting of a single cycle of
/// length `n`, one of `(n - 1)!` possibilities.
pub fn sattolo<T, S: IndexSource + ?Sized>(buf: &mut [T], source: &mut S) {
    let n = buf.len();
    for i in (1..n).rev() {
        // `j` must exclude `i`, otherwise shorter cycles can appear.
        let j = source.draw(0, i - 1);
        buf.swap(i, j);
    }
}

/// Rearranges `buf` so that no element stays at its position.
///
/// Whole Fisher-Yates shuffles are attempted and rejected until one has no
/// fixed point, comparing by value against the input. Expected attempts
/// approach `e` as `n` grows, but there is no upper bound on the running
/// time. Elements are expected to be pairwise distinct; if they are not,
/// a derangement by value may not exist and this never returns. Use
/// [`try_derange`] to cap the number of attempts.
///
/// Buffers of length 0 or 1 are left unchanged.
pub fn derange<T: PartialEq, S: IndexSource + ?Sized>(buf: &mut [T], source: &mut S) {
    if let Err(err) = try_derange(buf, source, RetryPolicy::unbounded()) {
        unreachable!("unbounded derangement gave up: {err}");
    }
}

/// [`derange`] with a bounded number of attempts.
///
/// On [`Error::AttemptsExhausted`] the buffer is unchanged.
#[instrument(level = "debug", skip_all, fields(len = buf.len()))]
pub fn try_derange<T: PartialEq, S: IndexSource + ?Sized>(
    buf: &mut [T],
    source: &mut S,
    policy: RetryPolicy,
) -> Result<(), Error> {
    let n = buf.len();
    if n <= 1 {
        return Ok(());
    }

    // Attempts shuffle positions rather than elements, so `buf` keeps the
    // original values for comparison and is written only once.
    let mut perm: Vec<usize> = (0..n).collect();
    let mut attempts = 0;
    loop {
        if !policy.allows(attempts) {
            warn!(attempts, "no derangement within retry limit");
            return Err(Error::AttemptsExhausted { attempts });
        }
        attempts += 1;

        for (i, p) in perm.iter_mut().enumerate() {
            *p = i;
        }
        fisher_yates(&mut perm, source);

        match perm.iter().enumerate().position(|(i, &p)| buf[p] == buf[i]) {
            Some(fixed) => trace!(attempt = attempts, fixed, "rejected shuffle"),
            None => break,
        }
    }

    debug!(attempts, "derangement accepted");
    gather(buf, &mut perm);
    Ok(())
}

/// Moves the element at `perm[i]` to position `i` for every `i`.
///
/// `perm` must be a permutation of `0..buf.len()`. It is used as scratch
/// space: each entry is overwritten with its own index once placed.
fn gather<T>(buf: &mut [T], perm: &mut [usize]) {
    debug_assert_eq!(buf.len(), perm.len());
    for start in 0..perm.len() {
        let mut i = start;
        loop {
            let from = perm[i];
            perm[i] = i;
            if from == start {
                break;
            }
            buf.swap(i, from);
            i = from;
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;
    use core::num::NonZeroUsize;

    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;
    use crate::source::FromFn;

    /// Records every requested range and answers with `pick(lo, hi)`.
    fn recording(
        log: &mut Vec<(usize, usize)>,
        pick: fn(usize, usize) -> usize,
    ) -> FromFn<impl FnMut(usize, usize) -> usize + '_> {
        FromFn(move |lo: usize, hi: usize| {
            log.push((lo, hi));
            pick(lo, hi)
        })
    }

    /// Length of the cycle through 0 of `perm`, read as `i -> perm[i]`.
    fn cycle_len(perm: &[usize]) -> usize {
        let mut len = 1;
        let mut i = perm[0];
        while i != 0 {
            i = perm[i];
            len += 1;
        }
        len
    }

    #[test]
    fn short_buffers_draw_nothing() {
        let mut log = Vec::new();
        let mut src = recording(&mut log, |_, _| unreachable!());

        let mut empty: [u8; 0] = [];
        let mut one = [7];
        fisher_yates(&mut empty, &mut src);
        fisher_yates(&mut one, &mut src);
        sattolo(&mut empty, &mut src);
        sattolo(&mut one, &mut src);
        derange(&mut empty, &mut src);
        derange(&mut one, &mut src);
        assert!(sample_without_replacement(&mut empty, 3, &mut src).is_empty());
        assert_eq!(sample_without_replacement(&mut one, 3, &mut src), [7]);

        assert_eq!(one, [7]);
        drop(src);
        assert!(log.is_empty());
    }

    #[test]
    fn fisher_yates_draw_ranges() {
        let mut log = Vec::new();
        let mut buf = [0, 1, 2, 3, 4];
        fisher_yates(&mut buf, &mut recording(&mut log, |lo, _| lo));
        assert_eq!(log, [(0, 4), (0, 3), (0, 2), (0, 1)]);
        assert_eq!(buf, [1, 2, 3, 4, 0]);
    }

    #[test]
    fn fisher_yates_self_swaps_are_identity() {
        let mut log = Vec::new();
        let mut buf = [0, 1, 2, 3];
        fisher_yates(&mut buf, &mut recording(&mut log, |_, hi| hi));
        assert_eq!(log.len(), 3);
        assert_eq!(buf, [0, 1, 2, 3]);
    }

    #[test]
    fn sattolo_excludes_current_index() {
        let mut log = Vec::new();
        let mut buf = [0, 1, 2, 3];
        sattolo(&mut buf, &mut recording(&mut log, |_, hi| hi));
        assert_eq!(log, [(0, 2), (0, 1), (0, 0)]);
        assert_eq!(cycle_len(&buf), 4);
    }

    #[test]
    fn sattolo_single_cycle() {
        let mut rng = SmallRng::seed_from_u64(5);
        for n in 2..40 {
            for _ in 0..20 {
                let mut buf: Vec<usize> = (0..n).collect();
                sattolo(&mut buf, &mut rng);
                assert_eq!(cycle_len(&buf), n, "{buf:?}");
            }
        }
    }

    #[test]
    fn partial_draw_counts() {
        let mut rng = SmallRng::seed_from_u64(11);
        for (k, draws) in [(0, 0), (1, 1), (3, 3), (5, 5), (6, 5), (100, 5)] {
            let mut log = Vec::new();
            let mut buf = [0, 1, 2, 3, 4, 5];
            let (sample, rest) = partial_fisher_yates(
                &mut buf,
                k,
                &mut recording(&mut log, |lo, hi| if hi > lo { lo + 1 } else { lo }),
            );
            assert_eq!(sample.len(), k.min(6));
            assert_eq!(rest.len(), 6 - k.min(6));
            assert_eq!(log.len(), draws);
            assert!(log.iter().all(|&(lo, _)| lo == 0));

            // Same shape with a real generator.
            let mut buf = [0, 1, 2, 3, 4, 5];
            let (sample, _) = partial_fisher_yates(&mut buf, k, &mut rng);
            assert_eq!(sample.len(), k.min(6));
        }
    }

    #[test]
    fn sample_is_distinct_subset() {
        let mut rng = SmallRng::seed_from_u64(13);
        for k in 0..12 {
            let mut buf: Vec<u32> = (0..10).collect();
            let mut sample = sample_without_replacement(&mut buf, k, &mut rng).to_vec();
            assert_eq!(sample.len(), k.min(10));
            sample.sort_unstable();
            sample.dedup();
            assert_eq!(sample.len(), k.min(10));
            assert!(sample.iter().all(|&x| x < 10));
        }
    }

    #[test]
    fn derange_three() {
        let mut rng = SmallRng::seed_from_u64(17);
        let mut seen = [0usize; 2];
        for _ in 0..200 {
            let mut buf = [1, 2, 3];
            derange(&mut buf, &mut rng);
            match buf {
                [2, 3, 1] => seen[0] += 1,
                [3, 1, 2] => seen[1] += 1,
                other => panic!("{other:?} has a fixed point"),
            }
        }
        assert!(seen.iter().all(|&c| c > 0));
    }

    #[test]
    fn derange_has_no_fixed_point() {
        let mut rng = SmallRng::seed_from_u64(19);
        for n in 2..30 {
            let original: Vec<usize> = (0..n).map(|i| i * 3).collect();
            let mut buf = original.clone();
            derange(&mut buf, &mut rng);
            assert!(buf.iter().zip(&original).all(|(a, b)| a != b));
            let mut sorted = buf.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, original);
        }
    }

    #[test]
    fn bounded_derange_gives_up_untouched() {
        // Always drawing `hi` yields the identity, which is never accepted.
        let mut buf = vec!['a', 'b', 'c'];
        let policy = RetryPolicy::bounded(NonZeroUsize::new(4).unwrap());
        let result = try_derange(&mut buf, &mut FromFn(|_: usize, hi: usize| hi), policy);
        assert_eq!(result, Err(Error::AttemptsExhausted { attempts: 4 }));
        assert_eq!(buf, ['a', 'b', 'c']);
    }

    #[test]
    fn bounded_derange_rejects_duplicates() {
        let mut rng = SmallRng::seed_from_u64(23);
        let mut buf = [1, 1, 2];
        let policy = RetryPolicy::bounded(NonZeroUsize::new(50).unwrap());
        assert!(try_derange(&mut buf, &mut rng, policy).is_err());
        assert_eq!(buf, [1, 1, 2]);
    }

    #[test]
    fn derange_retries_from_identity() {
        // First attempt: all self-swaps (identity, rejected). Second attempt:
        // always swap with 0, giving the rotation [1, 2, 3, 0].
        let mut calls = 0;
        let mut src = FromFn(|lo: usize, hi: usize| {
            calls += 1;
            if calls <= 3 {
                hi
            } else {
                lo
            }
        });
        let mut buf = [0, 1, 2, 3];
        try_derange(&mut buf, &mut src, RetryPolicy::unbounded()).unwrap();
        assert_eq!(buf, [1, 2, 3, 0]);
        assert_eq!(calls, 6);
    }

    #[test]
    fn gather_applies_permutation() {
        let mut buf = ['a', 'b', 'c', 'd', 'e'];
        let mut perm = [3, 0, 4, 1, 2];
        gather(&mut buf, &mut perm);
        assert_eq!(buf, ['d', 'a', 'e', 'b', 'c']);
        assert_eq!(perm, [0, 1, 2, 3, 4]);
    }
}
