//! Shared mechanics: shuffling, the session clock and deferred actions.

mod clock;
mod timeline;

pub use clock::*;
pub use timeline::*;

use rand::Rng;

/// Uniform Fisher-Yates shuffle in place.
///
/// Walks from the last index down to 1, swapping each slot with a uniformly
/// chosen slot in `[0, i]`.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}
