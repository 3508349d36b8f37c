use crossterm::style::Color;
use std::ops::{Add, AddAssign, Sub};

/// A point or vector in virtual pixel space
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, other: Point) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

/// Multiplies a 3x3 matrix by a 3-dimensional vector
pub fn multiply_matrix_vector(matrix: &[[f64; 3]; 3], vector: &[f64; 3]) -> [f64; 3] {
    let mut result = [0.0; 3];
    for i in 0..3 {
        for j in 0..3 {
            result[i] += matrix[i][j] * vector[j];
        }
    }
    result
}

/// Multiplies two 3x3 matrices
pub fn multiply_matrices(a: &[[f64; 3]; 3], b: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    let mut result = [[0.0; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            for k in 0..3 {
                result[i][j] += a[i][k] * b[k][j];
            }
        }
    }
    result
}

/// Rotation about the X-axis, angle in degrees
pub fn rotation_x(degrees: f64) -> [[f64; 3]; 3] {
    let (sin, cos) = degrees.to_radians().sin_cos();
    [[1.0, 0.0, 0.0], [0.0, cos, -sin], [0.0, sin, cos]]
}

/// Rotation about the Y-axis, angle in degrees
pub fn rotation_y(degrees: f64) -> [[f64; 3]; 3] {
    let (sin, cos) = degrees.to_radians().sin_cos();
    [[cos, 0.0, sin], [0.0, 1.0, 0.0], [-sin, 0.0, cos]]
}

/// Evaluates a CSS `cubic-bezier(x1, y1, x2, y2)` timing function at `progress`
pub fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, progress: f64) -> f64 {
    if progress <= 0.0 {
        return 0.0;
    }
    if progress >= 1.0 {
        return 1.0;
    }

    let bezier = |a: f64, b: f64, t: f64| {
        let u = 1.0 - t;
        3.0 * u * u * t * a + 3.0 * u * t * t * b + t * t * t
    };

    // x(t) is monotonic for x1, x2 in [0, 1], so bisection always converges
    let (mut lo, mut hi) = (0.0, 1.0);
    let mut t = progress;
    for _ in 0..48 {
        let x = bezier(x1, x2, t);
        if (x - progress).abs() < 1e-9 {
            break;
        }
        if x < progress {
            lo = t;
        } else {
            hi = t;
        }
        t = (lo + hi) / 2.0;
    }
    bezier(y1, y2, t)
}

/// Scales a color towards black by `intensity`
pub fn apply_lighting(color: Color, intensity: f64) -> Color {
    let (r, g, b) = rgb(color);
    let scale = |c: u8| (c as f64 * intensity).clamp(0.0, 255.0) as u8;
    Color::Rgb {
        r: scale(r),
        g: scale(g),
        b: scale(b),
    }
}

/// Best-effort RGB components of a terminal color
pub fn rgb(color: Color) -> (u8, u8, u8) {
    match color {
        Color::Rgb { r, g, b } => (r, g, b),
        Color::Black => (0, 0, 0),
        Color::Red | Color::DarkRed => (205, 49, 49),
        Color::Green | Color::DarkGreen => (13, 188, 121),
        Color::Yellow | Color::DarkYellow => (229, 229, 16),
        Color::Blue | Color::DarkBlue => (36, 114, 200),
        Color::Magenta | Color::DarkMagenta => (188, 63, 188),
        Color::Cyan | Color::DarkCyan => (17, 168, 205),
        Color::Grey | Color::DarkGrey => (128, 128, 128),
        _ => (255, 255, 255),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(1.0, 1.0)]
    #[case(-0.5, 0.0)]
    #[case(1.5, 1.0)]
    fn bezier_clamps_endpoints(#[case] progress: f64, #[case] expected: f64) {
        assert_eq!(cubic_bezier(0.4, 0.0, 0.2, 1.0, progress), expected);
    }

    #[test]
    fn linear_bezier_is_identity() {
        for step in 1..10 {
            let p = step as f64 / 10.0;
            assert!((cubic_bezier(1.0 / 3.0, 1.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0, p) - p).abs() < 1e-6);
        }
    }

    #[test]
    fn ease_out_runs_ahead_of_linear() {
        let eased = cubic_bezier(0.4, 0.0, 0.2, 1.0, 0.5);
        assert!(eased > 0.5 && eased < 1.0);
    }

    #[test]
    fn rotations_compose_to_identity() {
        let m = multiply_matrices(&rotation_x(30.0), &rotation_x(-30.0));
        let v = multiply_matrix_vector(&m, &[1.0, 2.0, 3.0]);
        for (a, b) in v.iter().zip([1.0, 2.0, 3.0]) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn quarter_turn_about_y_maps_x_to_negative_z() {
        let v = multiply_matrix_vector(&rotation_y(90.0), &[1.0, 0.0, 0.0]);
        assert!(v[0].abs() < 1e-9);
        assert!((v[2] + 1.0).abs() < 1e-9);
    }

    #[test]
    fn lighting_darkens_rgb() {
        let c = apply_lighting(Color::Rgb { r: 200, g: 100, b: 50 }, 0.5);
        assert_eq!(c, Color::Rgb { r: 100, g: 50, b: 25 });
    }
}
