//! RNG trait abstraction for the pixel simulation
//!
//! Every probabilistic rule draws from an explicitly passed `WorldRng`, so
//! the whole simulation can be replayed from a seed:
//! - `rand::thread_rng()` or any seeded `rand` generator (native host)
//! - scripted fakes in tests

use rand_distr::{Distribution, Normal};

/// Random number generator trait for the pixel simulation
pub trait WorldRng {
    /// Generate random boolean with 50% probability
    fn gen_bool(&mut self) -> bool;

    /// Generate random f32 in [0.0, 1.0)
    fn gen_f32(&mut self) -> f32;

    /// Check if random value is less than probability threshold
    fn check_probability(&mut self, probability: f32) -> bool {
        self.gen_f32() < probability
    }

    /// Uniform f32 in [min, max); returns `min` for an empty range
    fn gen_range_f32(&mut self, min: f32, max: f32) -> f32 {
        if min >= max {
            return min;
        }
        min + (max - min) * self.gen_f32()
    }

    /// Sample a normal distribution (Box-Muller over `gen_f32`)
    fn gen_normal(&mut self, mean: f32, std_dev: f32) -> f32 {
        let u1 = self.gen_f32().max(f32::MIN_POSITIVE);
        let u2 = self.gen_f32();
        let z = (-2.0 * u1.ln()).sqrt() * (std::f32::consts::TAU * u2).cos();
        mean + std_dev * z
    }
}

// Blanket implementation for any type implementing rand::Rng
// This covers ThreadRng as well as the seeded xoshiro generators
impl<T: ?Sized + rand::Rng> WorldRng for T {
    fn gen_bool(&mut self) -> bool {
        rand::Rng::r#gen(self)
    }

    fn gen_f32(&mut self) -> f32 {
        rand::Rng::r#gen(self)
    }

    fn gen_range_f32(&mut self, min: f32, max: f32) -> f32 {
        if min >= max {
            return min;
        }
        rand::Rng::gen_range(self, min..max)
    }

    fn gen_normal(&mut self, mean: f32, std_dev: f32) -> f32 {
        match Normal::new(mean, std_dev) {
            Ok(normal) => normal.sample(self),
            Err(_) => mean,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    #[test]
    fn test_world_rng_gen_bool() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(12345);

        let mut seen_true = false;
        let mut seen_false = false;

        for _ in 0..100 {
            if rng.gen_bool() {
                seen_true = true;
            } else {
                seen_false = true;
            }
        }

        assert!(seen_true);
        assert!(seen_false);
    }

    #[test]
    fn test_world_rng_gen_f32() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(12345);

        for _ in 0..100 {
            let val = rng.gen_f32();
            assert!(val >= 0.0);
            assert!(val < 1.0);
        }
    }

    #[test]
    fn test_world_rng_check_probability_bounds() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(12345);

        for _ in 0..100 {
            assert!(rng.check_probability(1.0));
            assert!(!rng.check_probability(0.0));
        }
    }

    #[test]
    fn test_gen_range_stays_in_range() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(7);

        for _ in 0..200 {
            let val = rng.gen_range_f32(5.0, 10.0);
            assert!((5.0..10.0).contains(&val));
        }
    }

    #[test]
    fn test_gen_range_empty_range_returns_min() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(7);
        assert_eq!(rng.gen_range_f32(3.0, 3.0), 3.0);
        assert_eq!(rng.gen_range_f32(4.0, 1.0), 4.0);
    }

    #[test]
    fn test_gen_normal_zero_deviation_is_mean() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(7);
        assert_eq!(rng.gen_normal(2.5, 0.0), 2.5);
    }

    #[test]
    fn test_gen_normal_mean_is_roughly_centred() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(99);
        let samples = 2000;
        let sum: f32 = (0..samples).map(|_| rng.gen_normal(0.0, 5.0)).sum();
        let mean = sum / samples as f32;
        assert!(mean.abs() < 0.5, "sample mean {mean} too far from 0");
    }

    /// Scripted generator exercising the trait's default methods
    struct Cycle {
        values: Vec<f32>,
        index: usize,
    }

    impl WorldRng for Cycle {
        fn gen_bool(&mut self) -> bool {
            self.gen_f32() < 0.5
        }

        fn gen_f32(&mut self) -> f32 {
            let value = self.values[self.index % self.values.len()];
            self.index += 1;
            value
        }
    }

    #[test]
    fn test_default_methods_use_gen_f32() {
        let mut rng = Cycle {
            values: vec![0.25, 0.75],
            index: 0,
        };

        assert_eq!(rng.gen_range_f32(0.0, 4.0), 1.0);
        assert_eq!(rng.gen_range_f32(0.0, 4.0), 3.0);
        assert!(rng.check_probability(0.3));
        assert!(!rng.check_probability(0.3));
        assert!(rng.gen_normal(1.0, 2.0).is_finite());
    }

    #[test]
    fn test_world_rng_deterministic() {
        let mut rng1 = Xoshiro256StarStar::seed_from_u64(42);
        let mut rng2 = Xoshiro256StarStar::seed_from_u64(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_f32(), rng2.gen_f32());
            assert_eq!(rng1.gen_normal(0.0, 3.0), rng2.gen_normal(0.0, 3.0));
        }
    }
}
