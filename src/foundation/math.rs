use crate::foundation::error::{ShowcaseError, ShowcaseResult};

#[derive(Clone, Copy, Debug)]
pub(crate) struct Fnv1a64(u64);

impl Fnv1a64 {
    pub(crate) const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01B3;

    pub(crate) fn new_default() -> Self {
        Self(Self::OFFSET_BASIS)
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= u64::from(b);
            h = h.wrapping_mul(Self::PRIME);
        }
        self.0 = h;
    }

    pub(crate) fn finish(self) -> u64 {
        self.0
    }
}

/// Hex-encoded FNV-1a digest, used to fingerprint fetched SVG sources.
pub(crate) fn content_hash_hex(bytes: &[u8]) -> String {
    let mut h = Fnv1a64::new_default();
    h.write_bytes(bytes);
    format!("{:016x}", h.finish())
}

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

/// Linear mix `a + (b - a) * t / 255` on 8-bit channels, rounded.
pub(crate) fn lerp_u8(a: u8, b: u8, t: u8) -> u8 {
    let it = 255u16 - u16::from(t);
    let av = mul_div255_u16(u16::from(a), it);
    let bv = mul_div255_u16(u16::from(b), u16::from(t));
    (av + bv).min(255) as u8
}

/// Small seedable random source.
///
/// Every random decision in the pipeline (rotation, random layout, output name) draws from an
/// explicit `Rng64`, so a fixed seed reproduces a run exactly.
#[derive(Clone, Copy, Debug)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Seed from the wall clock and process id.
    pub fn from_entropy() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        let mut h = Fnv1a64::new_default();
        h.write_bytes(&nanos.to_le_bytes());
        h.write_bytes(&std::process::id().to_le_bytes());
        Self::new(h.finish())
    }

    pub fn next_u64(&mut self) -> u64 {
        // SplitMix64
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    pub fn next_f64_01(&mut self) -> f64 {
        // 53 bits of precision.
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }

    /// Uniform integer in `[lo, hi]`, both inclusive.
    pub fn range_inclusive(&mut self, lo: i64, hi: i64) -> ShowcaseResult<i64> {
        if lo > hi {
            return Err(ShowcaseError::range(format!(
                "empty range for randint({lo}, {hi})"
            )));
        }
        let span = (hi as i128 - lo as i128 + 1) as u128;
        // Rejection sampling keeps the draw unbiased.
        let zone = (u128::from(u64::MAX) + 1) / span * span;
        loop {
            let v = u128::from(self.next_u64());
            if v < zone {
                return Ok((lo as i128 + (v % span) as i128) as i64);
            }
        }
    }

    pub fn range_u32(&mut self, lo: u32, hi: u32) -> ShowcaseResult<u32> {
        Ok(self.range_inclusive(i64::from(lo), i64::from(hi))? as u32)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
