//! Fixed effect parameters. None of these are user configurable.

use std::time::Duration;

/// Virtual pixels per terminal cell, horizontally.
pub const CELL_WIDTH: f64 = 8.0;
/// Virtual pixels per terminal cell, vertically.
pub const CELL_HEIGHT: f64 = 16.0;

pub const STAR_COUNT: usize = 100;
pub const STAR_MIN_SIZE: f64 = 1.0;
pub const STAR_MAX_SIZE: f64 = 3.0;
pub const STAR_MIN_TWINKLE: Duration = Duration::from_secs(2);
pub const STAR_MAX_TWINKLE: Duration = Duration::from_secs(5);

pub const COMET_INTERVAL: Duration = Duration::from_millis(4000);
pub const COMET_LIFETIME: Duration = Duration::from_millis(3000);

pub const PARTICLES_PER_BURST: usize = 10;
pub const PARTICLE_MIN_SPEED: f64 = 2.0;
pub const PARTICLE_MAX_SPEED: f64 = 4.0;
/// Opacity lost and scale gained per frame, in hundredths.
pub const PARTICLE_STEP_HUNDREDTHS: u32 = 2;

/// Degrees of rotation per pixel of pointer travel.
pub const DRAG_DEGREES_PER_PIXEL: f64 = 0.5;
pub const SETTLE_DURATION: Duration = Duration::from_millis(1000);
pub const BOUNCE_HOLD: Duration = Duration::from_millis(150);
pub const BOUNCE_DEGREES: f64 = 2.0;

pub const SPHERE_PERIOD: Duration = Duration::from_secs(12);
pub const SPHERE_HOVER_PERIOD: Duration = Duration::from_secs(20);
pub const HOVER_CUE_VOLUME: f32 = 0.1;

/// Ring radius as a fraction of the smaller stage dimension.
pub const RING_RADIUS_RATIO: f64 = 0.3;
/// Hit radius around a dot, in cells.
pub const DOT_HIT_CELLS: f64 = 1.5;
