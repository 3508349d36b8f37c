//! Per-dot state and the container drag gesture.

use crate::constants::{DRAG_DEGREES_PER_PIXEL, SPHERE_HOVER_PERIOD, SPHERE_PERIOD};
use crate::math::Point;
use crate::spinner::Rotation;
use crossterm::style::Color;
use std::time::Duration;

/// Spin direction of a dot's sphere
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Normal,
    Reverse,
}

impl Direction {
    pub fn toggled(self) -> Self {
        match self {
            Direction::Normal => Direction::Reverse,
            Direction::Reverse => Direction::Normal,
        }
    }

    fn sign(self) -> f64 {
        match self {
            Direction::Normal => 1.0,
            Direction::Reverse => -1.0,
        }
    }
}

/// An interactive dot: a spinning sphere with a colored surface
#[derive(Clone, Debug, PartialEq)]
pub struct Dot {
    pub surface: Color,
    pub direction: Direction,
    /// Time for one full sphere revolution
    pub period: Duration,
    /// Revolution progress in [0, 1)
    pub phase: f64,
}

impl Dot {
    pub fn new(surface: Color) -> Self {
        Dot {
            surface,
            direction: Direction::Normal,
            period: SPHERE_PERIOD,
            phase: 0.0,
        }
    }

    pub fn toggle_direction(&mut self) {
        self.direction = self.direction.toggled();
    }

    pub fn slow_down(&mut self) {
        self.period = SPHERE_HOVER_PERIOD;
    }

    pub fn restore_speed(&mut self) {
        self.period = SPHERE_PERIOD;
    }

    /// Advances the sphere's revolution by `dt`
    pub fn spin(&mut self, dt: Duration) {
        let turns = dt.as_secs_f64() / self.period.as_secs_f64() * self.direction.sign();
        self.phase = (self.phase + turns).rem_euclid(1.0);
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging {
        start: Point,
    },
    /// Released; the bounce sequence is still playing
    Settling,
}

/// Drag-to-rotate gesture on the spinner container
#[derive(Clone, Debug, Default)]
pub struct DragGesture {
    phase: DragPhase,
}

impl DragGesture {
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    /// Starts a drag from any phase. A pending bounce is left alone.
    pub fn begin(&mut self, at: Point) {
        self.phase = DragPhase::Dragging { start: at };
    }

    /// Rotation for the pointer being at `at`, or `None` when not dragging
    pub fn track(&self, at: Point) -> Option<Rotation> {
        match self.phase {
            DragPhase::Dragging { start } => {
                let delta = at - start;
                Some(Rotation::new(
                    -delta.y * DRAG_DEGREES_PER_PIXEL,
                    delta.x * DRAG_DEGREES_PER_PIXEL,
                ))
            }
            _ => None,
        }
    }

    /// Ends a drag. Returns false if there was no drag to end.
    pub fn release(&mut self) -> bool {
        if !self.is_dragging() {
            return false;
        }
        self.phase = DragPhase::Settling;
        true
    }

    /// Called when the bounce sequence finishes
    pub fn settle(&mut self) {
        if self.phase == DragPhase::Settling {
            self.phase = DragPhase::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const RED: Color = Color::Rgb { r: 255, g: 0, b: 0 };

    #[test]
    fn double_toggle_restores_direction() {
        let mut dot = Dot::new(RED);
        dot.toggle_direction();
        assert_eq!(dot.direction, Direction::Reverse);
        dot.toggle_direction();
        assert_eq!(dot.direction, Direction::Normal);
    }

    #[test]
    fn hover_changes_period() {
        let mut dot = Dot::new(RED);
        dot.slow_down();
        assert_eq!(dot.period, Duration::from_secs(20));
        dot.restore_speed();
        assert_eq!(dot.period, Duration::from_secs(12));
    }

    #[test]
    fn spin_follows_direction() {
        let mut dot = Dot::new(RED);
        dot.spin(Duration::from_secs(3));
        assert!((dot.phase - 0.25).abs() < 1e-9);
        dot.toggle_direction();
        dot.spin(Duration::from_secs(6));
        assert!((dot.phase - 0.75).abs() < 1e-9);
    }

    #[rstest]
    #[case(Point::new(100.0, 100.0), Point::new(120.0, 140.0), Rotation::new(-20.0, 10.0))]
    #[case(Point::new(50.0, 50.0), Point::new(30.0, 10.0), Rotation::new(20.0, -10.0))]
    #[case(Point::new(0.0, 0.0), Point::new(0.0, 0.0), Rotation::new(-0.0, 0.0))]
    fn drag_rotation_is_half_degree_per_pixel(
        #[case] down: Point,
        #[case] to: Point,
        #[case] expected: Rotation,
    ) {
        let mut drag = DragGesture::default();
        drag.begin(down);
        assert_eq!(drag.track(to), Some(expected));
    }

    #[test]
    fn tracking_is_a_no_op_unless_dragging() {
        let mut drag = DragGesture::default();
        assert_eq!(drag.track(Point::new(10.0, 10.0)), None);
        drag.begin(Point::default());
        assert!(drag.release());
        assert_eq!(drag.track(Point::new(10.0, 10.0)), None);
        assert!(!drag.release());
    }

    #[test]
    fn settling_returns_to_idle_only_from_settling() {
        let mut drag = DragGesture::default();
        drag.begin(Point::default());
        drag.release();
        assert_eq!(drag.phase(), DragPhase::Settling);
        drag.begin(Point::new(5.0, 5.0));
        drag.settle();
        assert!(drag.is_dragging());
        drag.release();
        drag.settle();
        assert_eq!(drag.phase(), DragPhase::Idle);
    }
}
