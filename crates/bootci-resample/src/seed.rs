//! Seeds for the resampling random number generator.

use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng,
    distr::{Distribution, StandardUniform},
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seed for deterministic resampling.
///
/// This is a 128-bit (16-byte) seed used to initialize the generator that picks
/// resample indices. Using the same seed produces the same sequence of draws, so
/// bootstrap results are reproducible across runs.
///
/// Seeds are written as 32-digit hexadecimal strings, both by [`fmt::Display`] and by
/// the serde implementation.
///
/// # Example
///
/// ```
/// use bootci_resample::seed::ResampleSeed;
///
/// let seed: ResampleSeed = "0000000000000000000000000000002a".parse().unwrap();
/// assert_eq!(seed, ResampleSeed::from_u128(42));
/// assert_eq!(seed.to_string(), "0000000000000000000000000000002a");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResampleSeed([u8; 16]);

impl Default for ResampleSeed {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl ResampleSeed {
    /// The fixed seed used when none is given.
    pub const DEFAULT: Self = Self::from_u128(1);

    /// Creates a seed from a 128-bit number (big-endian byte order).
    #[must_use]
    pub const fn from_u128(num: u128) -> Self {
        Self(num.to_be_bytes())
    }

    /// Returns the seed as a 128-bit number.
    #[must_use]
    pub const fn to_u128(self) -> u128 {
        u128::from_be_bytes(self.0)
    }

    /// Creates a new generator seeded with this seed.
    #[must_use]
    pub fn to_rng<R>(self) -> R
    where
        R: SeedableRng<Seed = [u8; 16]>,
    {
        R::from_seed(self.0)
    }
}

impl fmt::Display for ResampleSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.to_u128())
    }
}

/// Error parsing a [`ResampleSeed`] from a hex string.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid hex seed {input:?}: {reason}")]
pub struct ParseSeedError {
    input: String,
    reason: String,
}

impl FromStr for ResampleSeed {
    type Err = ParseSeedError;

    fn from_str(hex_str: &str) -> Result<Self, Self::Err> {
        if hex_str.len() != 32 {
            return Err(ParseSeedError {
                input: hex_str.to_owned(),
                reason: format!("expected 32 characters, got {}", hex_str.len()),
            });
        }
        let num = u128::from_str_radix(hex_str, 16).map_err(|e| ParseSeedError {
            input: hex_str.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self::from_u128(num))
    }
}

impl Serialize for ResampleSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ResampleSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `ResampleSeed` values using the standard random distribution.
impl Distribution<ResampleSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ResampleSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        ResampleSeed(seed)
    }
}

#[cfg(test)]
mod tests {
    use rand::RngCore as _;
    use rand_pcg::Pcg32;

    use super::*;

    mod serialization {
        use super::*;

        #[test]
        fn test_roundtrip_random_seed() {
            let seed: ResampleSeed = rand::rng().random();
            let serialized = serde_json::to_string(&seed).unwrap();
            let deserialized: ResampleSeed = serde_json::from_str(&serialized).unwrap();
            assert_eq!(seed, deserialized);
        }

        #[test]
        fn test_default_seed_format() {
            let serialized = serde_json::to_string(&ResampleSeed::DEFAULT).unwrap();
            assert_eq!(serialized, "\"00000000000000000000000000000001\"");
        }

        #[test]
        fn test_known_value_sequential_bytes() {
            // Big-endian: bytes appear in order as hex pairs
            let seed = ResampleSeed([
                0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
                0x32, 0x10,
            ]);
            let serialized = serde_json::to_string(&seed).unwrap();
            assert_eq!(serialized, "\"0123456789abcdeffedcba9876543210\"");
        }

        #[test]
        fn test_deserialize_uppercase_hex() {
            let json = "\"0123456789ABCDEFFEDCBA9876543210\"";
            let deserialized: ResampleSeed = serde_json::from_str(json).unwrap();
            assert_eq!(
                deserialized.to_u128(),
                0x0123_4567_89AB_CDEF_FEDC_BA98_7654_3210
            );
        }

        #[test]
        fn test_error_invalid_hex_characters() {
            let json = "\"ghijklmnopqrstuvwxyzghijklmnopqr\"";
            let err = serde_json::from_str::<ResampleSeed>(json).unwrap_err();
            assert!(err.to_string().contains("invalid hex"));
        }

        #[test]
        fn test_error_wrong_length() {
            for json in ["\"\"", "\"0123456789abcdef0123456789abcde\""] {
                let err = serde_json::from_str::<ResampleSeed>(json).unwrap_err();
                assert!(err.to_string().contains("expected 32 characters"));
            }
        }
    }

    #[test]
    fn test_same_seed_same_stream() {
        let seed = ResampleSeed::from_u128(0x1234_5678_9ABC_DEF0);
        let mut rng1: Pcg32 = seed.to_rng();
        let mut rng2: Pcg32 = seed.to_rng();
        for _ in 0..20 {
            assert_eq!(rng1.next_u64(), rng2.next_u64());
        }
    }

    #[test]
    fn test_different_seeds_different_streams() {
        let mut rng1: Pcg32 = ResampleSeed::from_u128(1).to_rng();
        let mut rng2: Pcg32 = ResampleSeed::from_u128(2).to_rng();
        let draws1: Vec<_> = (0..8).map(|_| rng1.next_u64()).collect();
        let draws2: Vec<_> = (0..8).map(|_| rng2.next_u64()).collect();
        assert_ne!(draws1, draws2);
    }
}
