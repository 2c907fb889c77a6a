//! Seeded random source for level generation
//!
//! Each level owns its own stream, built from a seed string. The string is
//! hashed with 64-bit FNV-1a and fed to PCG32, both published algorithms, so
//! a given seed string yields the same draws on every host.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a hash of a seed string
pub fn hash_seed(seed: &str) -> u64 {
    seed.bytes()
        .fold(FNV_OFFSET, |h, b| (h ^ b as u64).wrapping_mul(FNV_PRIME))
}

/// Seed string for a level index
pub fn level_seed(index: u32) -> String {
    format!("lv-{index}")
}

/// Deterministic uniform source in [0, 1)
#[derive(Debug, Clone)]
pub struct LevelRng {
    rng: Pcg32,
    draws: u32,
}

impl LevelRng {
    pub fn from_seed_str(seed: &str) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(hash_seed(seed)),
            draws: 0,
        }
    }

    pub fn for_level(index: u32) -> Self {
        Self::from_seed_str(&level_seed(index))
    }

    /// Next uniform value in [0, 1)
    pub fn uniform(&mut self) -> f32 {
        self.draws += 1;
        self.rng.random::<f32>()
    }

    /// `min + (max - min) * uniform()`
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.uniform()
    }

    /// True with probability `p`
    pub fn chance(&mut self, p: f32) -> bool {
        self.uniform() < p
    }

    /// Number of values drawn so far
    pub fn draws(&self) -> u32 {
        self.draws
    }
}
