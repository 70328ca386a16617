//! Content hashing
//!
//! Gantree: L0_Foundation → ContentHash
//!
//! Deterministic hashes used by collaborators to detect that a system was
//! built from different inputs. `FxHasher` is unkeyed, so equal inputs hash
//! equally across processes.

use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};

/// Hash any `Hash` value with a fixed, unkeyed hasher
pub fn content_hash<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = FxHasher::default();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Combine component hashes in order
pub fn combine_hashes(hashes: &[u64]) -> u64 {
    content_hash(hashes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantum::Qubit;

    #[test]
    fn test_equal_values_hash_equal() {
        let a = Qubit::new("Q08", 7.65143, 7.29543);
        let b = Qubit::new("Q08", 7.65143, 7.29543);
        assert_eq!(content_hash(&a), content_hash(&b));
    }

    #[test]
    fn test_frequency_change_changes_hash() {
        let a = Qubit::new("Q08", 7.65143, 7.29543);
        let b = Qubit::new("Q08", 7.65144, 7.29543);
        assert_ne!(content_hash(&a), content_hash(&b));
    }

    #[test]
    fn test_combine_is_order_sensitive() {
        assert_ne!(combine_hashes(&[1, 2]), combine_hashes(&[2, 1]));
    }
}
