use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// End-of-song rating ⭐
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Performance {
    pub score: u8,
    pub message: &'static str,
}

/// Lower bound of each bracket, highest first
const BRACKETS: [(u8, &str); 7] = [
    (90, "excellent"),
    (80, "great"),
    (70, "very good"),
    (60, "good, keep going"),
    (50, "don't give up"),
    (30, "keep practicing"),
    (0, "just have fun"),
];

pub fn message_for(score: u8) -> &'static str {
    BRACKETS
        .iter()
        .find(|(floor, _)| score >= *floor)
        .map(|(_, msg)| *msg)
        .unwrap_or(BRACKETS[BRACKETS.len() - 1].1)
}

/// Produces the pseudo-random score shown after each song.
/// Purely cosmetic, nothing is persisted.
pub struct Evaluator {
    rng: StdRng,
}

impl Evaluator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic sequence, for tests and demos
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn rate(&mut self) -> Performance {
        let score: u8 = self.rng.random_range(0..=100);
        Performance {
            score,
            message: message_for(score),
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}
