//! Unique identifier sources for generated layer names

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const RANDOM_ID_LEN: usize = 8;

/// Source of identifiers used to disambiguate generated names
pub trait NameGenerator {
    fn next_id(&mut self) -> String;
}

/// Deterministic ids `0`, `1`, `2`, ...
#[derive(Debug, Default, Clone)]
pub struct CounterNameGenerator {
    next: u64,
}

impl CounterNameGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NameGenerator for CounterNameGenerator {
    fn next_id(&mut self) -> String {
        let id = self.next;
        self.next += 1;
        id.to_string()
    }
}

/// Random ids of eight lowercase ASCII letters
#[derive(Debug, Clone)]
pub struct RandomNameGenerator {
    rng: StdRng,
}

impl RandomNameGenerator {
    pub fn new() -> Self {
        Self { rng: StdRng::from_os_rng() }
    }

    /// Reproducible ids
    pub fn with_seed(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for RandomNameGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl NameGenerator for RandomNameGenerator {
    fn next_id(&mut self) -> String {
        (0..RANDOM_ID_LEN).map(|_| char::from(self.rng.random_range(b'a'..=b'z'))).collect()
    }
}
