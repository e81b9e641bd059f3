//! Local identifier generation.

use rand::{Rng, SeedableRng, rngs::StdRng};
use std::sync::Mutex;
use uuid::{Builder, Uuid};

/// Source of fresh local identifiers.
///
/// Implementations must return the hyphenated UUID text form. Uniqueness only
/// has to hold within a single store's lifetime, so cryptographic randomness
/// is not required.
pub trait IdGenerator {
    /// Produce a new identifier.
    fn generate(&self) -> String;
}

impl<G: IdGenerator + ?Sized> IdGenerator for Box<G> {
    fn generate(&self) -> String {
        (**self).generate()
    }
}

/// Random version 4 UUIDs from the platform RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Reproducible version 4 UUIDs drawn from a seeded RNG.
///
/// Two generators built from the same seed yield the same sequence.
#[derive(Debug)]
pub struct SeededIdGenerator {
    rng: Mutex<StdRng>,
}

impl SeededIdGenerator {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl IdGenerator for SeededIdGenerator {
    fn generate(&self) -> String {
        let mut bytes = [0u8; 16];
        match self.rng.lock() {
            Ok(mut rng) => rng.fill(&mut bytes),
            Err(poisoned) => poisoned.into_inner().fill(&mut bytes),
        }
        // Stamps the version nibble to 4 and the RFC 4122 variant bits.
        Builder::from_random_bytes(bytes).into_uuid().to_string()
    }
}
