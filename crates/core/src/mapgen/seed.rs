//! Deterministic seed mixing and random-stream helpers for map generation.

use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

pub(crate) const CARVING_STREAM: u64 = 0;
const ROOM_STREAM_BASE: u64 = 0x1000;

pub(super) fn mix_seed_stream(seed: u64, stream: u64) -> u64 {
    let mut mixed = seed ^ stream.wrapping_mul(0xD6E8_FD9A_5B89_7A4D);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xC4CE_B9FE_1A85_EC53);
    mixed ^ (mixed >> 33)
}

pub(super) fn stream_rng(seed: u64, stream: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(mix_seed_stream(seed, stream))
}

/// Independent stream for one room, keyed by its row-major layout slot so the
/// outcome does not depend on the order rooms are populated in.
pub(super) fn room_rng(seed: u64, layout_slot: usize) -> ChaCha8Rng {
    stream_rng(seed, ROOM_STREAM_BASE + layout_slot as u64)
}

/// Uniform draw in `[0, 1)`.
pub fn unit_f32<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    (rng.next_u32() >> 8) as f32 / (1_u32 << 24) as f32
}

/// Uniform index in `0..len`. `len` must be non-zero.
pub fn index_below<R: Rng + ?Sized>(rng: &mut R, len: usize) -> usize {
    debug_assert!(len > 0);
    (rng.next_u64() % len as u64) as usize
}
