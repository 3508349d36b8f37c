use crate::constants::COMET_LIFETIME;
use crate::math::Point;
use rand::Rng;
use std::time::Duration;

/// A comet streaking across the background.
///
/// Only the start position is stored; where the comet is at any moment is a
/// function of its age.
#[derive(Clone, Debug, PartialEq)]
pub struct Comet {
    /// Horizontal start position, percent of the background width
    pub left: f64,
    /// Scene time at which the comet was appended
    pub born: Duration,
}

impl Comet {
    pub fn new<R: Rng + ?Sized>(rng: &mut R, born: Duration) -> Self {
        Comet {
            left: rng.gen_range(0.0..=100.0),
            born,
        }
    }

    /// Fraction of the flight completed at `now`, in [0, 1]
    pub fn progress(&self, now: Duration) -> f64 {
        let age = now.saturating_sub(self.born);
        (age.as_secs_f64() / COMET_LIFETIME.as_secs_f64()).min(1.0)
    }

    /// Head position in pixels on a background of `width` x `height` pixels.
    /// The comet falls from the top edge, drifting right by a third of the
    /// width over its life.
    pub fn head(&self, now: Duration, width: f64, height: f64) -> Point {
        let t = self.progress(now);
        Point::new(
            self.left / 100.0 * width + t * width / 3.0,
            t * height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn starts_at_top_edge() {
        let mut rng = StdRng::seed_from_u64(3);
        let comet = Comet::new(&mut rng, Duration::from_secs(4));
        assert!((0.0..=100.0).contains(&comet.left));
        let head = comet.head(Duration::from_secs(4), 800.0, 400.0);
        assert_eq!(head.y, 0.0);
        assert!((head.x - comet.left * 8.0).abs() < 1e-9);
    }

    #[test]
    fn reaches_bottom_at_end_of_life() {
        let comet = Comet {
            left: 10.0,
            born: Duration::ZERO,
        };
        assert_eq!(comet.progress(Duration::from_millis(1500)), 0.5);
        let head = comet.head(Duration::from_millis(3000), 900.0, 300.0);
        assert_eq!(head, Point::new(390.0, 300.0));
        assert_eq!(comet.progress(Duration::from_secs(10)), 1.0);
    }
}
