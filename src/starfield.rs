use crate::constants::{
    STAR_COUNT, STAR_MAX_SIZE, STAR_MAX_TWINKLE, STAR_MIN_SIZE, STAR_MIN_TWINKLE,
};
use rand::Rng;
use std::f64::consts::TAU;
use std::time::Duration;

/// A static background star
#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    /// Horizontal position, percent of the background width
    pub left: f64,
    /// Vertical position, percent of the background height
    pub top: f64,
    /// Size in pixels
    pub size: f64,
    /// Length of one twinkle cycle
    pub duration: Duration,
}

impl Star {
    /// Brightness in [0, 1] at time `now`, cycling once per `duration`
    pub fn brightness(&self, now: Duration) -> f64 {
        let cycle = now.as_secs_f64() / self.duration.as_secs_f64();
        0.5 + 0.5 * (cycle * TAU).cos()
    }
}

/// Generates the star field, each star independently randomized
pub fn create_stars<R: Rng + ?Sized>(rng: &mut R) -> Vec<Star> {
    (0..STAR_COUNT)
        .map(|_| Star {
            left: rng.gen_range(0.0..=100.0),
            top: rng.gen_range(0.0..=100.0),
            size: rng.gen_range(STAR_MIN_SIZE..=STAR_MAX_SIZE),
            duration: Duration::from_secs_f64(
                rng.gen_range(STAR_MIN_TWINKLE.as_secs_f64()..=STAR_MAX_TWINKLE.as_secs_f64()),
            ),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(7)]
    #[case(0xdead_beef)]
    fn produces_one_hundred_stars_in_range(#[case] seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let stars = create_stars(&mut rng);
        assert_eq!(stars.len(), 100);
        for star in &stars {
            assert!((0.0..=100.0).contains(&star.left));
            assert!((0.0..=100.0).contains(&star.top));
            assert!((1.0..=3.0).contains(&star.size));
            assert!(star.duration >= Duration::from_secs(2));
            assert!(star.duration <= Duration::from_secs(5));
        }
    }

    #[test]
    fn stars_are_independently_placed() {
        let mut rng = StdRng::seed_from_u64(1);
        let stars = create_stars(&mut rng);
        assert!(stars.windows(2).any(|w| w[0].left != w[1].left));
    }

    #[test]
    fn twinkle_returns_to_full_brightness_each_cycle() {
        let star = Star {
            left: 0.0,
            top: 0.0,
            size: 1.0,
            duration: Duration::from_secs(4),
        };
        assert!((star.brightness(Duration::ZERO) - 1.0).abs() < 1e-9);
        assert!(star.brightness(Duration::from_secs(2)).abs() < 1e-9);
        assert!((star.brightness(Duration::from_secs(4)) - 1.0).abs() < 1e-9);
    }
}
