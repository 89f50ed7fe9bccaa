use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const OCCUPANCY_UPPER_BOUND: u8 = 100;

/// Source of the synthesized occupancy percentage attached to each result.
/// Implementations must yield values in `0..OCCUPANCY_UPPER_BOUND`.
pub trait OccupancySource {
    fn next_occupancy(&mut self) -> u8;
}

pub struct RandomOccupancy {
    rng: StdRng,
}

impl RandomOccupancy {
    pub fn from_entropy() -> Self {
        RandomOccupancy {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        RandomOccupancy {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl OccupancySource for RandomOccupancy {
    fn next_occupancy(&mut self) -> u8 {
        self.rng.gen_range(0..OCCUPANCY_UPPER_BOUND)
    }
}

/// Replays a fixed sequence, cycling when exhausted. Values are reduced
/// modulo the upper bound.
pub struct FixedOccupancy {
    values: Vec<u8>,
    position: usize,
}

impl FixedOccupancy {
    pub fn new(values: &[u8]) -> Self {
        FixedOccupancy {
            values: values.to_vec(),
            position: 0,
        }
    }
}

impl OccupancySource for FixedOccupancy {
    fn next_occupancy(&mut self) -> u8 {
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.position % self.values.len()];
        self.position += 1;
        value % OCCUPANCY_UPPER_BOUND
    }
}

impl<F: FnMut() -> u8> OccupancySource for F {
    fn next_occupancy(&mut self) -> u8 {
        self() % OCCUPANCY_UPPER_BOUND
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_random_occupancy_in_range() {
        let mut source = RandomOccupancy::from_entropy();
        for _ in 0..1000 {
            assert!(source.next_occupancy() < OCCUPANCY_UPPER_BOUND);
        }
    }

    #[test]
    fn test_seeded_occupancy_reproducible() {
        let mut a = RandomOccupancy::seeded(7);
        let mut b = RandomOccupancy::seeded(7);
        let seq_a = (0..10).map(|_| a.next_occupancy()).collect::<Vec<_>>();
        let seq_b = (0..10).map(|_| b.next_occupancy()).collect::<Vec<_>>();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn test_fixed_occupancy_cycles() {
        let mut source = FixedOccupancy::new(&[10, 250, 99]);
        assert_eq!(source.next_occupancy(), 10);
        assert_eq!(source.next_occupancy(), 50);
        assert_eq!(source.next_occupancy(), 99);
        assert_eq!(source.next_occupancy(), 10);
    }

    #[test]
    fn test_closure_source() {
        let mut counter = 0u8;
        let mut source = || {
            counter += 1;
            counter
        };
        assert_eq!(source.next_occupancy(), 1);
        assert_eq!(source.next_occupancy(), 2);
    }
}
