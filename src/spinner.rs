//! The spinner container: its 3D transform and the ring of dots it carries.

use crate::math::{
    cubic_bezier, multiply_matrices, multiply_matrix_vector, rotation_x, rotation_y, Point,
};
use crate::vertex::Vertex;
use std::f64::consts::TAU;
use std::time::Duration;

/// A `rotateX(x) rotateY(y)` transform, in degrees
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rotation {
    pub x: f64,
    pub y: f64,
}

impl Rotation {
    pub const NEUTRAL: Rotation = Rotation { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Rotation { x, y }
    }

    pub fn matrix(&self) -> [[f64; 3]; 3] {
        multiply_matrices(&rotation_x(self.x), &rotation_y(self.y))
    }

    fn lerp(self, to: Rotation, t: f64) -> Rotation {
        Rotation::new(self.x + (to.x - self.x) * t, self.y + (to.y - self.y) * t)
    }
}

/// `cubic-bezier(0.4, 0, 0.2, 1)`
fn ease_out(progress: f64) -> f64 {
    cubic_bezier(0.4, 0.0, 0.2, 1.0, progress)
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Tween {
    from: Rotation,
    start: Duration,
    duration: Duration,
}

/// Container transform with transition semantics: with no transition a new
/// transform shows immediately, otherwise it eases from whatever is on
/// screen at the time it was applied.
#[derive(Clone, Debug, Default)]
pub struct Spinner {
    applied: Rotation,
    transition: Option<Duration>,
    tween: Option<Tween>,
}

impl Spinner {
    pub fn new() -> Self {
        Self::default()
    }

    /// The transform most recently applied
    pub fn transform(&self) -> Rotation {
        self.applied
    }

    pub fn transition(&self) -> Option<Duration> {
        self.transition
    }

    /// Sets or clears the transition. Clearing it also ends any running tween.
    pub fn set_transition(&mut self, transition: Option<Duration>) {
        self.transition = transition;
        if transition.is_none() {
            self.tween = None;
        }
    }

    pub fn set_transform(&mut self, rotation: Rotation, now: Duration) {
        let from = self.displayed(now);
        self.applied = rotation;
        self.tween = self.transition.map(|duration| Tween {
            from,
            start: now,
            duration,
        });
    }

    /// The rotation on screen at `now`
    pub fn displayed(&self, now: Duration) -> Rotation {
        match self.tween {
            Some(tween) if !tween.duration.is_zero() => {
                let elapsed = now.saturating_sub(tween.start).as_secs_f64();
                let progress = elapsed / tween.duration.as_secs_f64();
                tween.from.lerp(self.applied, ease_out(progress))
            }
            _ => self.applied,
        }
    }
}

/// Places `count` points evenly on a flat ring of `radius` pixels, rotates
/// the ring and projects it orthographically around `center`
pub fn ring(count: usize, center: Point, radius: f64, rotation: Rotation) -> Vec<Vertex> {
    let matrix = rotation.matrix();
    (0..count)
        .map(|i| {
            let angle = TAU * i as f64 / count as f64;
            let (sin, cos) = angle.sin_cos();
            let position = multiply_matrix_vector(&matrix, &[cos * radius, sin * radius, 0.0]);
            Vertex {
                position,
                screen_position: Point::new(center.x + position[0], center.y + position[1]),
            }
        })
        .collect()
}
