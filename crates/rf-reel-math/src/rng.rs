//! Random stop providers
//!
//! The math core never generates randomness itself: it asks a
//! [`StopProvider`] for one stop per reel and reduces it modulo the strip
//! length when building the window.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::symbols::ReelGroup;

/// Source of reel stops
pub trait StopProvider {
    /// A stop in `0..exclusive_upper_bound`. Values outside the range are
    /// tolerated; the window reduces them modulo the strip length.
    fn next(&mut self, exclusive_upper_bound: usize) -> usize;
}

impl<P: StopProvider + ?Sized> StopProvider for &mut P {
    fn next(&mut self, exclusive_upper_bound: usize) -> usize {
        (**self).next(exclusive_upper_bound)
    }
}

/// Stops drawn uniformly from any `rand` generator
#[derive(Debug, Clone)]
pub struct RngStops<R> {
    rng: R,
}

impl<R: Rng> RngStops<R> {
    /// Wrap a random generator
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Get the wrapped generator back
    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl RngStops<ChaCha20Rng> {
    /// Reproducible stops from a seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha20Rng::seed_from_u64(seed))
    }

    /// Reproducible stops from a seed on an independent stream.
    ///
    /// Spin `n` of a batch uses stream `n`, so each spin's stops do not
    /// depend on how many spins ran before it.
    pub fn seeded_stream(seed: u64, stream: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        rng.set_stream(stream);
        Self::new(rng)
    }
}

impl<R: Rng> StopProvider for RngStops<R> {
    fn next(&mut self, exclusive_upper_bound: usize) -> usize {
        if exclusive_upper_bound == 0 {
            return 0;
        }
        self.rng.random_range(0..exclusive_upper_bound)
    }
}

/// Replays recorded stops in order; cycles if asked for more than recorded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedStops {
    stops: Vec<usize>,
    cursor: usize,
}

impl FixedStops {
    /// Replay `stops`, cycling when exhausted
    pub fn new(stops: Vec<usize>) -> Self {
        Self { stops, cursor: 0 }
    }
}

impl StopProvider for FixedStops {
    fn next(&mut self, _exclusive_upper_bound: usize) -> usize {
        if self.stops.is_empty() {
            return 0;
        }
        let stop = self.stops[self.cursor % self.stops.len()];
        self.cursor += 1;
        stop
    }
}

/// Draw one stop per reel, bounded by each reel's strip length
pub fn draw_stops(reel_group: &ReelGroup, provider: &mut impl StopProvider) -> Vec<usize> {
    reel_group
        .reels
        .iter()
        .map(|reel| provider.next(reel.strip.len()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::{Reel, ReelStrip, Symbol};

    fn group(lengths: &[u32]) -> ReelGroup {
        ReelGroup::new(
            lengths
                .iter()
                .map(|&len| {
                    Reel::new(3, (0..len).map(|i| Symbol::new(i, format!("S{i}"))).collect::<ReelStrip>())
                })
                .collect(),
        )
    }

    #[test]
    fn test_seeded_is_repeatable() {
        let reels = group(&[7, 11, 13, 17, 19]);
        let a = draw_stops(&reels, &mut RngStops::seeded(42));
        let b = draw_stops(&reels, &mut RngStops::seeded(42));
        assert_eq!(a, b);
        assert!(a.iter().zip([7, 11, 13, 17, 19]).all(|(&s, len)| s < len));
    }

    #[test]
    fn test_streams_differ() {
        let reels = group(&[1000, 1000, 1000, 1000, 1000]);
        let a = draw_stops(&reels, &mut RngStops::seeded_stream(7, 0));
        let b = draw_stops(&reels, &mut RngStops::seeded_stream(7, 1));
        assert_ne!(a, b);
    }

    #[test]
    fn test_fixed_stops_replay() {
        let reels = group(&[7, 7, 7]);
        let mut fixed = FixedStops::new(vec![1, 14, 23]);
        assert_eq!(draw_stops(&reels, &mut fixed), vec![1, 14, 23]);
        assert_eq!(fixed.next(7), 1);
        assert_eq!(FixedStops::new(Vec::new()).next(7), 0);
    }
}
