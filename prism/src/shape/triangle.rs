use super::{Geometry, ShapeId};
use crate::{intersection::Intersection, Point, Ray, Vector, EPSILON};

/// A flat triangle. Edges and normal are computed once, up front.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    p1: Point,
    p2: Point,
    p3: Point,
    e1: Vector,
    e2: Vector,
    normal: Vector,
}

impl Triangle {
    pub fn new(p1: Point, p2: Point, p3: Point) -> Self {
        let e1 = p2 - p1;
        let e2 = p3 - p1;
        let normal = e2.cross(&e1).norm();
        Self {
            p1,
            p2,
            p3,
            e1,
            e2,
            normal,
        }
    }

    pub fn vertices(&self) -> [Point; 3] {
        [self.p1, self.p2, self.p3]
    }

    pub fn edges(&self) -> [Vector; 2] {
        [self.e1, self.e2]
    }

    pub fn normal(&self) -> Vector {
        self.normal
    }

    /// Möller–Trumbore: returns (t, u, v) for a ray that crosses the triangle.
    pub(crate) fn barycentric_hit(&self, ray: &Ray) -> Option<(f64, f64, f64)> {
        let dir_cross_e2 = ray.direction.cross(&self.e2);
        let det = self.e1.dot(&dir_cross_e2);
        if det.abs() < EPSILON {
            return None;
        }

        let f = 1. / det;
        let p1_to_origin = ray.origin - self.p1;
        let u = f * p1_to_origin.dot(&dir_cross_e2);
        if !(0. ..=1.).contains(&u) {
            return None;
        }

        let origin_cross_e1 = p1_to_origin.cross(&self.e1);
        let v = f * ray.direction.dot(&origin_cross_e1);
        if v < 0. || u + v > 1. {
            return None;
        }

        let t = f * self.e2.dot(&origin_cross_e1);
        Some((t, u, v))
    }
}

impl Geometry for Triangle {
    fn local_intersect(&self, id: ShapeId, ray: &Ray) -> Vec<Intersection> {
        self.barycentric_hit(ray)
            .map(|(t, u, v)| vec![Intersection::with_uv(t, id, u, v)])
            .unwrap_or_default()
    }

    fn local_normal_at(&self, _point: Point, _hit: &Intersection) -> Vector {
        self.normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Triangle {
        Triangle::new(
            Point::new(0., 1., 0.),
            Point::new(-1., 0., 0.),
            Point::new(1., 0., 0.),
        )
    }

    fn intersect(origin: Point, direction: Vector) -> Vec<Intersection> {
        triangle().local_intersect(ShapeId::default(), &Ray::new(origin, direction))
    }

    #[test]
    fn construct_triangle() {
        let t = triangle();
        assert_eq!(t.edges(), [Vector::new(-1., -1., 0.), Vector::new(1., -1., 0.)]);
        assert_eq!(t.normal(), Vector::new(0., 0., -1.));
        assert_eq!(t.vertices()[0], Point::new(0., 1., 0.));
    }

    #[test]
    fn normal_is_constant() {
        let t = triangle();
        let hit = Intersection::new(0., ShapeId::default());
        for point in [
            Point::new(0., 0.5, 0.),
            Point::new(-0.5, 0.75, 0.),
            Point::new(0.5, 0.25, 0.),
        ] {
            assert_eq!(t.local_normal_at(point, &hit), t.normal());
        }
    }

    #[test]
    fn ray_parallel_to_triangle_misses() {
        assert!(intersect(Point::new(0., -1., -2.), Vector::new(0., 1., 0.)).is_empty());
    }

    #[test]
    fn ray_misses_each_edge() {
        let direction = Vector::new(0., 0., 1.);
        assert!(intersect(Point::new(1., 1., -2.), direction).is_empty());
        assert!(intersect(Point::new(-1., 1., -2.), direction).is_empty());
        assert!(intersect(Point::new(0., -1., -2.), direction).is_empty());
    }

    #[test]
    fn ray_strikes_triangle() {
        let xs = intersect(Point::new(0., 0.5, -2.), Vector::new(0., 0., 1.));
        assert_eq!(xs.len(), 1);
        assert_eq!(xs[0].t, 2.);
    }
}
