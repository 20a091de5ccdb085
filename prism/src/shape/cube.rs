use super::{Geometry, ShapeId};
use crate::{intersection::Intersection, Point, Ray, Vector, EPSILON};

/// An axis-aligned cube spanning -1 to 1 on every axis.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Cube;

/// Where the ray enters and leaves the slab between -1 and 1 on one axis.
fn check_axis(origin: f64, direction: f64) -> (f64, f64) {
    let tmin_numerator = -1. - origin;
    let tmax_numerator = 1. - origin;

    let (tmin, tmax) = if direction.abs() >= EPSILON {
        (tmin_numerator / direction, tmax_numerator / direction)
    } else {
        (tmin_numerator * f64::INFINITY, tmax_numerator * f64::INFINITY)
    };

    if tmin > tmax {
        (tmax, tmin)
    } else {
        (tmin, tmax)
    }
}

impl Geometry for Cube {
    fn local_intersect(&self, id: ShapeId, ray: &Ray) -> Vec<Intersection> {
        let (xtmin, xtmax) = check_axis(ray.origin.x, ray.direction.x);
        let (ytmin, ytmax) = check_axis(ray.origin.y, ray.direction.y);
        let (ztmin, ztmax) = check_axis(ray.origin.z, ray.direction.z);

        let tmin = xtmin.max(ytmin).max(ztmin);
        let tmax = xtmax.min(ytmax).min(ztmax);

        if tmin > tmax {
            return vec![];
        }
        vec![Intersection::new(tmin, id), Intersection::new(tmax, id)]
    }

    /// The face normal is picked by whichever coordinate is largest in magnitude.
    fn local_normal_at(&self, point: Point, _hit: &Intersection) -> Vector {
        let (x, y, z) = (point.x.abs(), point.y.abs(), point.z.abs());
        let maxc = x.max(y).max(z);

        if maxc == x {
            Vector::new(point.x, 0., 0.)
        } else if maxc == y {
            Vector::new(0., point.y, 0.)
        } else {
            Vector::new(0., 0., point.z)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_intersects_each_face() {
        let cases = [
            (Point::new(5., 0.5, 0.), Vector::new(-1., 0., 0.), 4., 6.),
            (Point::new(-5., 0.5, 0.), Vector::new(1., 0., 0.), 4., 6.),
            (Point::new(0.5, 5., 0.), Vector::new(0., -1., 0.), 4., 6.),
            (Point::new(0.5, -5., 0.), Vector::new(0., 1., 0.), 4., 6.),
            (Point::new(0.5, 0., 5.), Vector::new(0., 0., -1.), 4., 6.),
            (Point::new(0.5, 0., -5.), Vector::new(0., 0., 1.), 4., 6.),
            (Point::new(0., 0.5, 0.), Vector::new(0., 0., 1.), -1., 1.),
        ];
        for (origin, direction, t1, t2) in cases {
            let xs = Cube.local_intersect(ShapeId::default(), &Ray::new(origin, direction));
            assert_eq!(xs.len(), 2, "ray from {origin:?}");
            assert_eq!(xs[0].t, t1);
            assert_eq!(xs[1].t, t2);
        }
    }

    #[test]
    fn ray_misses_cube() {
        let cases = [
            (Point::new(-2., 0., 0.), Vector::new(0.2673, 0.5345, 0.8018)),
            (Point::new(0., -2., 0.), Vector::new(0.8018, 0.2673, 0.5345)),
            (Point::new(0., 0., -2.), Vector::new(0.5345, 0.8018, 0.2673)),
            (Point::new(2., 0., 2.), Vector::new(0., 0., -1.)),
            (Point::new(0., 2., 2.), Vector::new(0., -1., 0.)),
            (Point::new(2., 2., 0.), Vector::new(-1., 0., 0.)),
        ];
        for (origin, direction) in cases {
            let xs = Cube.local_intersect(ShapeId::default(), &Ray::new(origin, direction));
            assert!(xs.is_empty(), "ray from {origin:?}");
        }
    }

    #[test]
    fn normal_on_surface_of_cube() {
        let hit = Intersection::new(0., ShapeId::default());
        let cases = [
            (Point::new(1., 0.5, -0.8), Vector::new(1., 0., 0.)),
            (Point::new(-1., -0.2, 0.9), Vector::new(-1., 0., 0.)),
            (Point::new(-0.4, 1., -0.1), Vector::new(0., 1., 0.)),
            (Point::new(0.3, -1., -0.7), Vector::new(0., -1., 0.)),
            (Point::new(-0.6, 0.3, 1.), Vector::new(0., 0., 1.)),
            (Point::new(0.4, 0.4, -1.), Vector::new(0., 0., -1.)),
            (Point::new(1., 1., 1.), Vector::new(1., 0., 0.)),
            (Point::new(-1., -1., -1.), Vector::new(-1., 0., 0.)),
        ];
        for (point, expected) in cases {
            assert_eq!(Cube.local_normal_at(point, &hit), expected);
        }
    }
}
