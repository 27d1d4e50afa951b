use crate::util::error::CapacityOverflow;
use crate::util::result::ResultExtension;

/// Bucket counts used by [`HashMap`](super::HashMap), in the order that a map grows through them.
/// Each is roughly double the last, and prime so that `hash % cap` spreads poorly distributed
/// hashes.
pub(crate) const PRIME_CAPACITIES: [usize; 26] = [
    53, 97, 193, 389, 769, 1543, 3079, 6151, 12289, 24593, 49157, 98317, 196613, 393241, 786433,
    1572869, 3145739, 6291469, 12582917, 25165843, 50331653, 100663319, 201326611, 402653189,
    805306457, 1610612741,
];

/// The factor applied to the capacity once a map outgrows the last tabulated prime.
pub(crate) const GROWTH_FACTOR: usize = 2;

pub(crate) const LOAD_FACTOR_NUMERATOR: usize = 9;
pub(crate) const LOAD_FACTOR_DENOMINATOR: usize = 10;

/// The capacity of every newly constructed map.
pub(crate) const INITIAL: usize = PRIME_CAPACITIES[0];

/// Returns the capacity following `cap`: the smallest tabulated prime greater than `cap`, or
/// `cap * GROWTH_FACTOR` when `cap` is already past the end of the table.
///
/// # Panics
/// Panics with [`CapacityOverflow`] if the doubled capacity doesn't fit in a `usize`.
pub(crate) fn next(cap: usize) -> usize {
    match PRIME_CAPACITIES.iter().find(|prime| **prime > cap) {
        Some(prime) => *prime,
        None => cap.checked_mul(GROWTH_FACTOR).ok_or(CapacityOverflow).throw(),
    }
}

/// Determines whether `len` entries spread over `cap` buckets exceed the maximum load factor. A
/// load factor of exactly 9/10 is still acceptable.
pub(crate) const fn overloaded(len: usize, cap: usize) -> bool {
    // Widened so that neither side can overflow for any pair of usizes.
    len as u128 * LOAD_FACTOR_DENOMINATOR as u128 > cap as u128 * LOAD_FACTOR_NUMERATOR as u128
}
