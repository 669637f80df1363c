use crate::interview::random::RandomSource;

/// Fisher–Yates shuffle in place: swap a uniformly chosen element of the
/// unshuffled prefix into its last slot, then shrink the prefix by one.
pub fn shuffle<T>(items: &mut [T], rng: &dyn RandomSource) {
    for remaining in (1..=items.len()).rev() {
        let pick = rng.int_in(0, remaining as i64) as usize;
        items.swap(pick, remaining - 1);
    }
}
