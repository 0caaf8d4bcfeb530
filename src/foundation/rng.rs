/// SplitMix64 stream generator.
#[derive(Clone, Copy, Debug)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    /// Start a stream from `seed`.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next raw 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        mix64(self.state)
    }

    /// Next value in `[0, 1)` with 53 bits of precision.
    pub fn next_f64_01(&mut self) -> f64 {
        unit_from_bits(self.next_u64())
    }
}

/// SplitMix64 finalizer.
pub fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Pure hash of `(seed, index, channel)` into `[0, 1)`.
///
/// Separate channels give independent values for the same index (position, size, color...).
pub fn unit_hash(seed: u64, index: u64, channel: u64) -> f64 {
    let a = mix64(seed ^ index.wrapping_mul(0xD6E8_FEB8_6659_FD93));
    let b = mix64(a ^ channel.wrapping_mul(0xA076_1D64_78BD_642F));
    unit_from_bits(b)
}

fn unit_from_bits(v: u64) -> f64 {
    ((v >> 11) as f64) * (1.0 / ((1u64 << 53) as f64))
}
