use super::{triangle::Triangle, Geometry, ShapeId};
use crate::{intersection::Intersection, Point, Ray, Vector};

/// A triangle whose normal is interpolated between per-vertex normals,
/// using the barycentric u and v recorded on each intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothTriangle {
    triangle: Triangle,
    n1: Vector,
    n2: Vector,
    n3: Vector,
}

impl SmoothTriangle {
    pub fn new(p1: Point, p2: Point, p3: Point, n1: Vector, n2: Vector, n3: Vector) -> Self {
        Self {
            triangle: Triangle::new(p1, p2, p3),
            n1,
            n2,
            n3,
        }
    }

    pub fn triangle(&self) -> &Triangle {
        &self.triangle
    }

    pub fn normals(&self) -> [Vector; 3] {
        [self.n1, self.n2, self.n3]
    }
}

impl Geometry for SmoothTriangle {
    fn local_intersect(&self, id: ShapeId, ray: &Ray) -> Vec<Intersection> {
        self.triangle.local_intersect(id, ray)
    }

    fn local_normal_at(&self, _point: Point, hit: &Intersection) -> Vector {
        self.n2 * hit.u + self.n3 * hit.v + self.n1 * (1. - hit.u - hit.v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equal;

    fn smooth_triangle() -> SmoothTriangle {
        SmoothTriangle::new(
            Point::new(0., 1., 0.),
            Point::new(-1., 0., 0.),
            Point::new(1., 0., 0.),
            Vector::new(0., 1., 0.),
            Vector::new(-1., 0., 0.),
            Vector::new(1., 0., 0.),
        )
    }

    #[test]
    fn intersection_stores_u_and_v() {
        let ray = Ray::new(Point::new(-0.2, 0.3, -2.), Vector::new(0., 0., 1.));
        let xs = smooth_triangle().local_intersect(ShapeId::default(), &ray);
        assert_eq!(xs.len(), 1);
        assert!(equal(xs[0].u, 0.45));
        assert!(equal(xs[0].v, 0.25));
    }

    #[test]
    fn normal_is_interpolated_from_u_and_v() {
        let hit = Intersection::with_uv(1., ShapeId::default(), 0.45, 0.25);
        let normal = smooth_triangle().local_normal_at(Point::origin(), &hit);
        assert_eq!(normal, Vector::new(-0.2, 0.3, 0.));
    }
}
