//! Deterministic RNG using PCG32 with BLAKE3 seed derivation.
//!
//! Every random decision made during one expansion flows through a single
//! generator created here, so a fixed seed reproduces the output byte for byte.

use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Creates a PCG32 RNG from an optional seed.
///
/// `Some(seed)` gives a reproducible stream; `None` seeds from OS entropy.
pub fn create_rng(seed: Option<u64>) -> Pcg32 {
    match seed {
        Some(seed) => Pcg32::seed_from_u64(seed),
        None => Pcg32::from_entropy(),
    }
}

/// Derives the seed for one item of a batch from the batch's base seed.
///
/// Uses BLAKE3 over the little-endian base seed and index so neighbouring
/// items get independent streams rather than `seed + 1` correlations.
///
/// # Arguments
/// * `base_seed` - The seed the caller supplied for the whole batch
/// * `index` - The 0-indexed position of the item in the batch
pub fn derive_batch_seed(base_seed: u64, index: u64) -> u64 {
    let mut input = Vec::with_capacity(16);
    input.extend_from_slice(&base_seed.to_le_bytes());
    input.extend_from_slice(&index.to_le_bytes());

    let hash = blake3::hash(&input);

    // Truncate to u64 (first 8 bytes, little-endian)
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(bytes)
}
