//! Randomised speaking order.

use rand::Rng;
use tracing::debug;

/// Returns a uniformly shuffled copy of `items` using the thread-local RNG.
pub fn shuffle<T: Clone>(items: &[T]) -> Vec<T> {
    let mut rng = rand::rng();
    shuffle_with(items, &mut rng)
}

/// Returns a shuffled copy of `items` drawn from `rng`.
///
/// Walks from the last index down to 1 and swaps each slot with a uniformly
/// chosen slot at or before it, so every permutation is equally likely.
pub fn shuffle_with<T: Clone, R: Rng>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();

    for i in (1..shuffled.len()).rev() {
        let j = rng.random_range(0..=i);
        shuffled.swap(i, j);
    }

    debug!("Shuffled {} participants", shuffled.len());
    shuffled
}
