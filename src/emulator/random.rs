use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Somewhere to get random bytes from, for the `CXKK` instruction.
///
/// Swap in [`SeededRandom`] or [`FixedRandom`] to make runs reproducible.
pub trait RandomSource {
    /// A byte uniformly distributed over `0..=255`.
    fn next_byte(&mut self) -> u8;
}

/// Draws from the thread-local generator. Not reproducible.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_byte(&mut self) -> u8 {
        rand::random::<u8>()
    }
}

/// A seeded generator that yields the same sequence for the same seed.
#[derive(Debug, Clone)]
pub struct SeededRandom(StdRng);

impl SeededRandom {
    pub fn new(seed: u64) -> SeededRandom {
        SeededRandom(StdRng::seed_from_u64(seed))
    }
}

impl RandomSource for SeededRandom {
    fn next_byte(&mut self) -> u8 {
        self.0.gen::<u8>()
    }
}

/// Always returns the same byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedRandom(pub u8);

impl RandomSource for FixedRandom {
    fn next_byte(&mut self) -> u8 {
        self.0
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_byte(&mut self) -> u8 {
        (**self).next_byte()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_byte(&mut self) -> u8 {
        (**self).next_byte()
    }
}
