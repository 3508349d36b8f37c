//! Particle bursts.
//!
//! Opacity and scale are kept in whole hundredths so that a particle fades
//! out after exactly 100 / 2 = 50 update steps.

use crate::constants::{
    PARTICLES_PER_BURST, PARTICLE_MAX_SPEED, PARTICLE_MIN_SPEED, PARTICLE_STEP_HUNDREDTHS,
};
use crate::math::Point;
use crossterm::style::Color;
use rand::Rng;
use std::f64::consts::TAU;

/// What a particle did on one frame callback
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Moved and faded; wants another frame
    Advanced,
    /// Fully transparent; must be removed and never scheduled again
    Faded,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Point,
    pub velocity: Point,
    pub color: Color,
    opacity: u32,
    scale: u32,
    steps: u32,
}

impl Particle {
    pub fn new(origin: Point, angle: f64, speed: f64, color: Color) -> Self {
        let (sin, cos) = angle.sin_cos();
        Particle {
            position: origin,
            velocity: Point::new(cos * speed, sin * speed),
            color,
            opacity: 100,
            scale: 100,
            steps: 0,
        }
    }

    pub fn opacity(&self) -> f64 {
        self.opacity as f64 / 100.0
    }

    pub fn scale(&self) -> f64 {
        self.scale as f64 / 100.0
    }

    /// Number of update steps applied so far
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Runs one frame of the particle's animation
    pub fn advance(&mut self) -> Step {
        if self.opacity == 0 {
            return Step::Faded;
        }
        self.position += self.velocity;
        self.opacity = self.opacity.saturating_sub(PARTICLE_STEP_HUNDREDTHS);
        self.scale += PARTICLE_STEP_HUNDREDTHS;
        self.steps += 1;
        Step::Advanced
    }
}

/// Creates one burst of particles at `origin`, each with its own random
/// heading and speed
pub fn burst<R: Rng + ?Sized>(rng: &mut R, origin: Point, color: Color) -> Vec<Particle> {
    (0..PARTICLES_PER_BURST)
        .map(|_| {
            let angle = rng.gen_range(0.0..=TAU);
            let speed = rng.gen_range(PARTICLE_MIN_SPEED..=PARTICLE_MAX_SPEED);
            Particle::new(origin, angle, speed, color)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const WHITE: Color = Color::Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    #[test]
    fn burst_creates_ten_particles_at_origin() {
        let mut rng = StdRng::seed_from_u64(11);
        let origin = Point::new(40.0, 80.0);
        let particles = burst(&mut rng, origin, WHITE);
        assert_eq!(particles.len(), 10);
        for p in &particles {
            assert_eq!(p.position, origin);
            assert_eq!(p.opacity(), 1.0);
            assert_eq!(p.scale(), 1.0);
            let speed = (p.velocity.x.powi(2) + p.velocity.y.powi(2)).sqrt();
            assert!((2.0 - 1e-9..=4.0 + 1e-9).contains(&speed));
        }
    }

    #[test]
    fn fades_after_exactly_fifty_steps() {
        let mut p = Particle::new(Point::default(), 0.0, 2.0, WHITE);
        for _ in 0..50 {
            assert_eq!(p.advance(), Step::Advanced);
        }
        assert_eq!(p.opacity(), 0.0);
        assert_eq!(p.steps(), 50);
        assert_eq!(p.advance(), Step::Faded);
        assert_eq!(p.steps(), 50);
    }

    #[test]
    fn opacity_strictly_decreases_and_scale_grows() {
        let mut p = Particle::new(Point::default(), 1.0, 3.0, WHITE);
        let (mut opacity, mut scale) = (p.opacity(), p.scale());
        while p.advance() == Step::Advanced {
            assert!((opacity - p.opacity() - 0.02).abs() < 1e-9);
            assert!((p.scale() - scale - 0.02).abs() < 1e-9);
            opacity = p.opacity();
            scale = p.scale();
        }
        assert!((scale - 2.0).abs() < 1e-9);
    }

    #[test]
    fn moves_by_fixed_velocity() {
        let mut p = Particle::new(Point::new(10.0, 10.0), 0.0, 3.0, WHITE);
        p.advance();
        p.advance();
        assert!((p.position.x - 16.0).abs() < 1e-9);
        assert!((p.position.y - 10.0).abs() < 1e-9);
    }
}
