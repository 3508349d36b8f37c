use crate::math::Point;

/// A rotated ring point with its position on screen
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    /// Position relative to the ring centre after rotation, in pixels
    pub position: [f64; 3],
    pub screen_position: Point,
}

impl Vertex {
    /// Depth towards the viewer; larger is closer
    pub fn depth(&self) -> f64 {
        self.position[2]
    }
}
