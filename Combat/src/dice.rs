use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// One labeled batch of d10 results
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRollRecord {
    pub label: String,
    pub results: Vec<u8>,
}

/// Seeded d10 source.
///
/// All randomness in a tactical action flows through one roller, and every
/// batch is logged, so the same seed replays to the same outcome.
#[derive(Clone, Debug)]
pub struct DiceRoller {
    rng: ChaCha8Rng,
    log: Vec<DiceRollRecord>,
}

impl DiceRoller {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            log: Vec::new(),
        }
    }

    /// Roll `count` ten-sided dice, results 1..=10
    pub fn roll(&mut self, count: u32, label: impl Into<String>) -> Vec<u8> {
        let results: Vec<u8> = (0..count).map(|_| self.rng.gen_range(1..=10)).collect();
        self.log.push(DiceRollRecord {
            label: label.into(),
            results: results.clone(),
        });
        results
    }

    pub fn log(&self) -> &[DiceRollRecord] {
        &self.log
    }

    pub fn take_log(&mut self) -> Vec<DiceRollRecord> {
        std::mem::take(&mut self.log)
    }
}

/// Count results at or above the hit threshold
pub fn calculate_hits(results: &[u8], hit_on: u8) -> u32 {
    results.iter().filter(|roll| **roll >= hit_on).count() as u32
}
