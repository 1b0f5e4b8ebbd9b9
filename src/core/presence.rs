//! Presence flags for newly created contacts.
//!
//! Presence is cosmetic and random, but the source is injected so tests can
//! pin it and runs can be replayed with a seed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait PresenceSource: Send {
    fn next_online(&mut self) -> bool;
}

/// Coin flip backed by a seedable `StdRng`.
pub struct SeededPresence {
    rng: StdRng,
}

impl SeededPresence {
    /// `None` seeds from the OS, `Some(seed)` gives a reproducible sequence.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { rng }
    }
}

impl PresenceSource for SeededPresence {
    fn next_online(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }
}

/// Always answers the same.
#[derive(Debug, Clone, Copy)]
pub struct FixedPresence(pub bool);

impl PresenceSource for FixedPresence {
    fn next_online(&mut self) -> bool {
        self.0
    }
}
