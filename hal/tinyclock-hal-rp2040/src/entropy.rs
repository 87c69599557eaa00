//! Seed material from the ring oscillator
//!
//! The ROSC `RANDOMBIT` register samples the free-running oscillator and
//! jitters between reads. Not a cryptographic source.

use embassy_rp::pac;

/// Fold 64 oscillator samples into `mix`
pub fn rosc_seed(mix: u64) -> u64 {
    (0..64).fold(mix, |seed, _| {
        let bit = u64::from(pac::ROSC.randombit().read().randombit());
        seed.rotate_left(1) ^ bit
    })
}
