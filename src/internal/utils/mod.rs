use rand::{rngs::StdRng, Rng, SeedableRng};

mod node;

pub(crate) use node::{Head, Link, Node, NodeId, Nodes, Tower};

/// Default ceiling on the level a node can be drawn at.
pub const DEFAULT_MAX_LEVEL: usize = 32;

/// Probability of promoting a node by one more level.
pub(crate) const P: f64 = 0.25;

pub(crate) trait GeneratesLevel {
    /// Draws a level in `0..=ceiling`.
    fn gen_level(&mut self, ceiling: usize) -> usize;
}

/// Source of node levels: repeated independent coin flips biased at [P](P).
pub(crate) struct LevelRng {
    rng: StdRng,
}

impl LevelRng {
    pub(crate) fn new() -> Self {
        LevelRng {
            rng: StdRng::from_entropy(),
        }
    }

    pub(crate) fn seeded(seed: u64) -> Self {
        LevelRng {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl GeneratesLevel for LevelRng {
    fn gen_level(&mut self, ceiling: usize) -> usize {
        let mut level = 0;

        while level < ceiling && self.rng.gen::<f64>() < P {
            level += 1;
        }

        level
    }
}

#[cfg(test)]
mod utils_test {
    use super::*;

    #[test]
    fn test_gen_level_respects_ceiling() {
        let mut levels = LevelRng::new();

        for ceiling in 0..8 {
            for _ in 0..1_000 {
                assert!(levels.gen_level(ceiling) <= ceiling);
            }
        }

        assert_eq!(levels.gen_level(0), 0);
    }

    #[test]
    fn test_gen_level_distribution() {
        let mut levels = LevelRng::seeded(0xdead_beef);
        let draws = 100_000;

        let promoted = (0..draws)
            .filter(|_| levels.gen_level(DEFAULT_MAX_LEVEL) > 0)
            .count();

        // roughly a quarter of all nodes leave level 0
        let ratio = promoted as f64 / draws as f64;
        println!("promoted ratio: {}", ratio);
        assert!((0.2..0.3).contains(&ratio));
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = LevelRng::seeded(42);
        let mut b = LevelRng::seeded(42);

        for _ in 0..1_000 {
            assert_eq!(a.gen_level(16), b.gen_level(16));
        }
    }
}
