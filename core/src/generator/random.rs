use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Uniform draws over the palette from a seeded small RNG, so equal seeds replay equal games.
#[derive(Clone, Debug)]
pub struct RandomTokens {
    seed: u64,
    rng: SmallRng,
}

impl RandomTokens {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl TokenSource for RandomTokens {
    fn next_token(&mut self, palette: u8) -> Token {
        Token::new(self.rng.random_range(0..palette.max(1)))
    }
}
