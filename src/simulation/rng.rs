// src/simulation/rng.rs

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// What a random stream is used for. Each SKU gets one stream per purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamPurpose {
    DemandNoise,
    LeadTime,
}

/// Builds an independent ChaCha stream for one SKU and purpose.
///
/// Streams share the run seed and differ only in stream id. A SKU's draws
/// depend on its index and the seed, never on how many draws other SKUs made.
pub fn sku_stream(seed: u64, sku_index: usize, purpose: StreamPurpose) -> ChaCha20Rng {
    let offset = match purpose {
        StreamPurpose::DemandNoise => 0,
        StreamPurpose::LeadTime => 1,
    };
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    rng.set_stream(sku_index as u64 * 2 + offset);
    rng
}
