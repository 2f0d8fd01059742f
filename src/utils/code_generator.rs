//! Random code generation for short links and API keys.
//!
//! Codes are drawn independently and uniformly from the 62-symbol alphabet
//! `[a-zA-Z0-9]`. The generator is a general-purpose PRNG, not a CSPRNG; it
//! owns its entropy source so tests can seed it deterministically.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};

/// Symbols a generated code may contain.
pub const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of generated short codes (62^6 ≈ 5.6 × 10^10 possible codes).
pub const SHORT_CODE_LENGTH: usize = 6;

/// Length of generated API keys.
pub const API_KEY_LENGTH: usize = 32;

/// Shared random code generator.
///
/// Holds its RNG behind a mutex so a single instance can be shared between
/// services and request tasks.
pub struct CodeGenerator {
    rng: Mutex<StdRng>,
}

impl CodeGenerator {
    /// Creates a generator driven by the given RNG.
    pub fn new(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }

    /// Creates a generator seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// Creates a deterministic generator. Identical seeds yield identical codes.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Returns a string of exactly `length` characters from [`ALPHABET`].
    pub fn generate(&self, length: usize) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);

        (0..length)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect()
    }

    /// Generates a short link code.
    pub fn short_code(&self) -> String {
        self.generate(SHORT_CODE_LENGTH)
    }

    /// Generates a user API key.
    pub fn api_key(&self) -> String {
        self.generate(API_KEY_LENGTH)
    }
}
