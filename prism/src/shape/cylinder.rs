use super::{Geometry, ShapeId};
use crate::{intersection::Intersection, Point, Ray, Vector, EPSILON};

/// A cylinder of radius 1 around the y axis,
/// optionally truncated to `minimum < y < maximum` and capped at both ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylinder {
    pub minimum: f64,
    pub maximum: f64,
    pub closed: bool,
}

impl Cylinder {
    pub fn new(minimum: f64, maximum: f64, closed: bool) -> Self {
        Self {
            minimum,
            maximum,
            closed,
        }
    }

    /// Adds the intersections with the end caps, if the cylinder is closed
    /// and the ray isn't running parallel to them.
    fn intersect_caps(&self, id: ShapeId, ray: &Ray, xs: &mut Vec<Intersection>) {
        if !self.closed || ray.direction.y.abs() < EPSILON {
            return;
        }
        for cap in [self.minimum, self.maximum] {
            let t = (cap - ray.origin.y) / ray.direction.y;
            if within_radius(ray, t, 1.) {
                xs.push(Intersection::new(t, id));
            }
        }
    }
}

impl Default for Cylinder {
    /// Infinitely long and open.
    fn default() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY, false)
    }
}

/// Whether the ray at `t` lies within `radius` of the y axis.
/// Shared with cones, whose cap radius is the cap's |y|.
pub(crate) fn within_radius(ray: &Ray, t: f64, radius: f64) -> bool {
    let x = ray.origin.x + t * ray.direction.x;
    let z = ray.origin.z + t * ray.direction.z;
    x.powi(2) + z.powi(2) <= radius.powi(2) + EPSILON
}

impl Geometry for Cylinder {
    fn local_intersect(&self, id: ShapeId, ray: &Ray) -> Vec<Intersection> {
        let mut xs = vec![];

        let a = ray.direction.x.powi(2) + ray.direction.z.powi(2);

        // a ray parallel to the y axis can only hit the caps
        if a.abs() >= EPSILON {
            let b = 2. * ray.origin.x * ray.direction.x + 2. * ray.origin.z * ray.direction.z;
            let c = ray.origin.x.powi(2) + ray.origin.z.powi(2) - 1.;
            let discriminant = b.powi(2) - 4. * a * c;

            if discriminant >= 0. {
                let t0 = (-b - discriminant.sqrt()) / (2. * a);
                let t1 = (-b + discriminant.sqrt()) / (2. * a);
                for t in [t0.min(t1), t0.max(t1)] {
                    let y = ray.origin.y + t * ray.direction.y;
                    if self.minimum < y && y < self.maximum {
                        xs.push(Intersection::new(t, id));
                    }
                }
            }
        }

        self.intersect_caps(id, ray, &mut xs);
        xs
    }

    fn local_normal_at(&self, point: Point, _hit: &Intersection) -> Vector {
        let dist = point.x.powi(2) + point.z.powi(2);

        if dist < 1. && point.y >= self.maximum - EPSILON {
            Vector::new(0., 1., 0.)
        } else if dist < 1. && point.y <= self.minimum + EPSILON {
            Vector::new(0., -1., 0.)
        } else {
            Vector::new(point.x, 0., point.z)
        }
    }
}
