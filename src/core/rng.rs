//! Dice Random Number Generator
//!
//! Xorshift128+ seeded through SplitMix64. Fast and uniform, not
//! cryptographically secure. Seeds are derived per roll so no generator
//! state is shared between requests.

use sha2::{Digest, Sha256};

/// Number of faces on the dare die.
pub const DIE_FACES: u8 = 6;

/// PRNG using the Xorshift128+ algorithm.
///
/// Given the same seed the sequence is identical on every platform, which
/// keeps roll handling testable.
///
/// # Example
///
/// ```
/// use love_dice::core::rng::DiceRng;
///
/// let mut rng = DiceRng::new(12345);
/// let roll = rng.roll_die();
/// assert!((1..=6).contains(&roll));
/// ```
#[derive(Clone, Debug)]
pub struct DiceRng {
    state: [u64; 2],
}

impl Default for DiceRng {
    fn default() -> Self {
        Self::new(0)
    }
}

impl DiceRng {
    /// Create a new RNG from a 64-bit seed.
    pub fn new(seed: u64) -> Self {
        let mut s = seed;
        let state0 = splitmix64(&mut s);
        let state1 = splitmix64(&mut s);

        // Xorshift must never start from all zeros
        let state = if state0 == 0 && state1 == 0 {
            [1, 1]
        } else {
            [state0, state1]
        };

        Self { state }
    }

    /// Create an RNG for a single roll against a proposal.
    ///
    /// Mixes the proposal ID with fresh UUID v4 entropy so repeated rolls on
    /// the same proposal are independent.
    pub fn for_roll(proposal_id: &str) -> Self {
        let nonce = uuid::Uuid::new_v4();
        Self::new(derive_roll_seed(proposal_id, nonce.as_bytes()))
    }

    /// Generate the next 64-bit random value.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let s0 = self.state[0];
        let mut s1 = self.state[1];
        let result = s0.wrapping_add(s1);

        s1 ^= s0;
        self.state[0] = s0.rotate_left(24) ^ s1 ^ (s1 << 16);
        self.state[1] = s1.rotate_left(37);

        result
    }

    /// Generate a random integer in range [0, max).
    ///
    /// Rejects the biased tail of the u64 range so every value is equally likely.
    pub fn next_int(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        let max = max as u64;
        let zone = u64::MAX - (u64::MAX % max);
        loop {
            let v = self.next_u64();
            if v < zone {
                return (v % max) as u32;
            }
        }
    }

    /// Generate a random integer in range [min, max].
    pub fn next_int_range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        min + self.next_int(max - min + 1)
    }

    /// Roll the dare die: uniform over 1..=6.
    pub fn roll_die(&mut self) -> u8 {
        self.next_int_range(1, DIE_FACES as u32) as u8
    }
}

/// SplitMix64 for seed initialization.
#[inline]
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

/// Derive a roll seed from a proposal ID and a nonce.
pub fn derive_roll_seed(proposal_id: &str, nonce: &[u8]) -> u64 {
    let mut hasher = Sha256::new();

    // Domain separator
    hasher.update(b"LOVE_DICE_ROLL_V1");
    hasher.update(proposal_id.as_bytes());
    hasher.update(nonce);

    let hash = hasher.finalize();
    let mut seed = [0u8; 8];
    seed.copy_from_slice(&hash[..8]);
    u64::from_le_bytes(seed)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rng_determinism() {
        let mut rng1 = DiceRng::new(12345);
        let mut rng2 = DiceRng::new(12345);

        for _ in 0..1000 {
            assert_eq!(rng1.next_u64(), rng2.next_u64());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = DiceRng::new(12345);
        let mut rng2 = DiceRng::new(54321);

        assert_ne!(rng1.next_u64(), rng2.next_u64());
    }

    #[test]
    fn test_next_int() {
        let mut rng = DiceRng::new(1234);

        for _ in 0..1000 {
            assert!(rng.next_int(100) < 100);
        }

        assert_eq!(rng.next_int(0), 0);
        assert_eq!(rng.next_int(1), 0);
    }

    #[test]
    fn test_next_int_range() {
        let mut rng = DiceRng::new(5678);

        for _ in 0..1000 {
            let val = rng.next_int_range(3, 9);
            assert!((3..=9).contains(&val));
        }

        assert_eq!(rng.next_int_range(5, 5), 5);
    }

    #[test]
    fn test_every_face_comes_up() {
        let mut rng = DiceRng::new(42);
        let mut seen = [0u32; 6];

        for _ in 0..6000 {
            seen[(rng.roll_die() - 1) as usize] += 1;
        }

        // Roughly 1000 each; loose bounds keep this stable
        for count in seen {
            assert!(count > 800 && count < 1200, "face count {count}");
        }
    }

    #[test]
    fn test_derive_roll_seed() {
        let seed1 = derive_roll_seed("proposal-1", &[1u8; 16]);
        let seed2 = derive_roll_seed("proposal-1", &[1u8; 16]);
        assert_eq!(seed1, seed2);

        let seed3 = derive_roll_seed("proposal-1", &[2u8; 16]);
        assert_ne!(seed1, seed3);

        let seed4 = derive_roll_seed("proposal-2", &[1u8; 16]);
        assert_ne!(seed1, seed4);
    }

    proptest! {
        #[test]
        fn roll_is_always_a_die_face(seed in any::<u64>()) {
            let mut rng = DiceRng::new(seed);
            for _ in 0..32 {
                let roll = rng.roll_die();
                prop_assert!((1..=DIE_FACES).contains(&roll));
            }
        }
    }
}
