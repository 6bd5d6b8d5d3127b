use core::ops::RangeInclusive;
use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;
use crate::{GameError, Result};

/// Seeded uniform generator over an inclusive range.
#[derive(Clone, Debug)]
pub struct RandomNumberGenerator {
    rng: SmallRng,
    min: u32,
    max: u32,
}

impl RandomNumberGenerator {
    pub fn new(seed: u64, range: RangeInclusive<u32>) -> Result<Self> {
        let (min, max) = range.into_inner();
        if min > max {
            return Err(GameError::EmptyRange);
        }
        Ok(Self {
            rng: SmallRng::seed_from_u64(seed),
            min,
            max,
        })
    }
}

impl NumberGenerator for RandomNumberGenerator {
    fn generate(&mut self) -> u32 {
        self.rng.random_range(self.min..=self.max)
    }
}
