use super::{Geometry, ShapeId};
use crate::{intersection::Intersection, Point, Ray, Vector, EPSILON};

/// The infinite xz plane.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Plane;

impl Geometry for Plane {
    fn local_intersect(&self, id: ShapeId, ray: &Ray) -> Vec<Intersection> {
        // parallel or coplanar rays never register a hit
        if ray.direction.y.abs() < EPSILON {
            return vec![];
        }
        let t = -ray.origin.y / ray.direction.y;
        vec![Intersection::new(t, id)]
    }

    fn local_normal_at(&self, _point: Point, _hit: &Intersection) -> Vector {
        Vector::new(0., 1., 0.)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_of_plane_is_constant_everywhere() {
        let hit = Intersection::new(0., ShapeId::default());
        for point in [
            Point::origin(),
            Point::new(10., 0., -10.),
            Point::new(-5., 0., 150.),
        ] {
            assert_eq!(Plane.local_normal_at(point, &hit), Vector::new(0., 1., 0.));
        }
    }

    #[test]
    fn intersect_ray_parallel_to_plane() {
        let ray = Ray::new(Point::new(0., 10., 0.), Vector::new(0., 0., 1.));
        assert!(Plane.local_intersect(ShapeId::default(), &ray).is_empty());
    }

    #[test]
    fn intersect_with_coplanar_ray() {
        let ray = Ray::new(Point::origin(), Vector::new(0., 0., 1.));
        assert!(Plane.local_intersect(ShapeId::default(), &ray).is_empty());
    }

    #[test]
    fn ray_intersecting_plane_from_above_and_below() {
        let id = ShapeId::default();
        let from_above = Ray::new(Point::new(0., 1., 0.), Vector::new(0., -1., 0.));
        let from_below = Ray::new(Point::new(0., -1., 0.), Vector::new(0., 1., 0.));
        for ray in [from_above, from_below] {
            let xs = Plane.local_intersect(id, &ray);
            assert_eq!(xs.len(), 1);
            assert_eq!(xs[0].t, 1.);
            assert_eq!(xs[0].object, id);
        }
    }
}
