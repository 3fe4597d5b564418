use super::{START_ANGLE_RANGE, SWEEP_RANGE};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Where a focus sweep starts and how far it turns, in degrees.
pub trait AngleSource {
    /// In `[0, 90)`.
    fn start_angle(&mut self) -> i32;
    /// In `[0, 120)`.
    fn range(&mut self) -> i32;
}

#[derive(Debug, Clone)]
pub struct RandomAngles<R = StdRng> {
    rng: R,
}

impl RandomAngles<StdRng> {
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAngles<StdRng> {
    fn default() -> Self {
        Self::from_os_rng()
    }
}

impl<R: Rng> RandomAngles<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> AngleSource for RandomAngles<R> {
    fn start_angle(&mut self) -> i32 {
        self.rng.random_range(0..START_ANGLE_RANGE)
    }

    fn range(&mut self) -> i32 {
        self.rng.random_range(0..SWEEP_RANGE)
    }
}

/// Always hands out the same pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedAngles {
    pub start: i32,
    pub range: i32,
}

impl FixedAngles {
    pub fn new(start: i32, range: i32) -> Self {
        Self { start, range }
    }
}

impl AngleSource for FixedAngles {
    fn start_angle(&mut self) -> i32 {
        self.start
    }

    fn range(&mut self) -> i32 {
        self.range
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_angles_stay_in_range() {
        let mut angles = RandomAngles::seeded(7);
        for _ in 0..500 {
            assert!((0..START_ANGLE_RANGE).contains(&angles.start_angle()));
            assert!((0..SWEEP_RANGE).contains(&angles.range()));
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = RandomAngles::seeded(42);
        let mut b = RandomAngles::seeded(42);
        let left: Vec<_> = (0..8).map(|_| (a.start_angle(), a.range())).collect();
        let right: Vec<_> = (0..8).map(|_| (b.start_angle(), b.range())).collect();
        assert_eq!(left, right);
    }
}
