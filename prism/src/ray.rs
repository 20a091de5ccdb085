use crate::{Matrix, Point, Vector};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point,
    pub direction: Vector,
}

impl Ray {
    pub fn new(origin: Point, direction: Vector) -> Self {
        Self { origin, direction }
    }

    /// The point at distance `t` along the ray.
    pub fn position(&self, t: f64) -> Point {
        self.origin + self.direction * t
    }

    /// Direction is left unnormalized, so `t` values stay comparable
    /// between object space and world space.
    pub fn transform(&self, matrix: &Matrix) -> Self {
        Self::new(*matrix * self.origin, *matrix * self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compute_point_from_distance() {
        let ray = Ray::new(Point::new(2., 3., 4.), Vector::new(1., 0., 0.));
        assert_eq!(ray.position(0.), Point::new(2., 3., 4.));
        assert_eq!(ray.position(1.), Point::new(3., 3., 4.));
        assert_eq!(ray.position(-1.), Point::new(1., 3., 4.));
        assert_eq!(ray.position(2.5), Point::new(4.5, 3., 4.));
    }

    #[test]
    fn translating_ray() {
        let ray = Ray::new(Point::new(1., 2., 3.), Vector::new(0., 1., 0.));
        let moved = ray.transform(&Matrix::translation(3., 4., 5.));
        assert_eq!(moved.origin, Point::new(4., 6., 8.));
        assert_eq!(moved.direction, Vector::new(0., 1., 0.));
    }

    #[test]
    fn scaling_ray() {
        let ray = Ray::new(Point::new(1., 2., 3.), Vector::new(0., 1., 0.));
        let scaled = ray.transform(&Matrix::scaling(2., 3., 4.));
        assert_eq!(scaled.origin, Point::new(2., 6., 12.));
        assert_eq!(scaled.direction, Vector::new(0., 3., 0.));
    }
}
