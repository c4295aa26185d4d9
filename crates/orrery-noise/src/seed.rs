//! Deterministic seed derivation.
//!
//! Every random choice in the core flows from an explicit seed. A scene seed
//! is combined with a label (usually a body name) so that each body gets its
//! own reproducible stream regardless of registration order.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Combine a base seed with a label into a well-distributed `u64` (SipHash).
pub fn derive_seed(base: u64, label: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    base.hash(&mut hasher);
    label.hash(&mut hasher);
    hasher.finish()
}

/// A ChaCha8 stream for `(base, label)`.
pub fn seeded_rng(base: u64, label: &str) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(derive_seed(base, label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    #[test]
    fn test_derive_seed_deterministic() {
        assert_eq!(derive_seed(999, "Earth"), derive_seed(999, "Earth"));
    }

    #[test]
    fn test_derive_seed_label_sensitive() {
        assert_ne!(derive_seed(42, "Earth"), derive_seed(42, "Mars"));
    }

    #[test]
    fn test_derive_seed_base_sensitive() {
        assert_ne!(derive_seed(0, "Earth"), derive_seed(1, "Earth"));
    }

    #[test]
    fn test_seeded_rng_sequences_match() {
        let mut a = seeded_rng(42, "orbits");
        let mut b = seeded_rng(42, "orbits");
        for _ in 0..1000 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }
}
