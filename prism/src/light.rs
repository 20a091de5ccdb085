use crate::{Color, Point};

/// A light source with no size, radiating from a single point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Point,
    pub intensity: Color,
}

impl PointLight {
    pub fn new(position: Point, intensity: Color) -> Self {
        Self {
            position,
            intensity,
        }
    }
}

impl Default for PointLight {
    /// A white light at the origin.
    fn default() -> Self {
        Self::new(Point::origin(), Color::white())
    }
}
