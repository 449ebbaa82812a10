//! Retry-pool sampling.
//!
//! Sampling is uniform and without replacement, over an injected random
//! source so retry selection is deterministic under a fixed seed.

use rand::seq::index;
use rand::Rng;

/// Draw up to `requested` elements from `pool` uniformly at random without
/// replacement.
///
/// When the pool is smaller than the request, the whole pool is drawn (in
/// random order) rather than failing.
pub fn sample_without_replacement<T, R>(pool: &[T], requested: usize, rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    let amount = requested.min(pool.len());
    index::sample(rng, pool.len(), amount)
        .into_iter()
        .map(|i| pool[i].clone())
        .collect()
}
