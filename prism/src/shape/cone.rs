use super::{cylinder::within_radius, Geometry, ShapeId};
use crate::{intersection::Intersection, Point, Ray, Vector, EPSILON};

/// A double-napped cone around the y axis, with its apex at the origin
/// and a radius equal to |y|. Truncation and caps work as for cylinders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cone {
    pub minimum: f64,
    pub maximum: f64,
    pub closed: bool,
}

impl Cone {
    pub fn new(minimum: f64, maximum: f64, closed: bool) -> Self {
        Self {
            minimum,
            maximum,
            closed,
        }
    }

    fn within_bounds(&self, ray: &Ray, t: f64) -> bool {
        let y = ray.origin.y + t * ray.direction.y;
        self.minimum < y && y < self.maximum
    }

    fn intersect_caps(&self, id: ShapeId, ray: &Ray, xs: &mut Vec<Intersection>) {
        if !self.closed || ray.direction.y.abs() < EPSILON {
            return;
        }
        for cap in [self.minimum, self.maximum] {
            let t = (cap - ray.origin.y) / ray.direction.y;
            if within_radius(ray, t, cap.abs()) {
                xs.push(Intersection::new(t, id));
            }
        }
    }
}

impl Default for Cone {
    fn default() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY, false)
    }
}

impl Geometry for Cone {
    fn local_intersect(&self, id: ShapeId, ray: &Ray) -> Vec<Intersection> {
        let (origin, direction) = (ray.origin, ray.direction);
        let a = direction.x.powi(2) - direction.y.powi(2) + direction.z.powi(2);
        let b = 2. * origin.x * direction.x - 2. * origin.y * direction.y
            + 2. * origin.z * direction.z;
        let c = origin.x.powi(2) - origin.y.powi(2) + origin.z.powi(2);

        let mut xs = vec![];

        if a.abs() < EPSILON {
            // parallel to one of the cone's halves: at most one side hit
            if b.abs() >= EPSILON {
                let t = -c / (2. * b);
                if self.within_bounds(ray, t) {
                    xs.push(Intersection::new(t, id));
                }
            }
        } else {
            let discriminant = b.powi(2) - 4. * a * c;
            if discriminant >= 0. {
                let t0 = (-b - discriminant.sqrt()) / (2. * a);
                let t1 = (-b + discriminant.sqrt()) / (2. * a);
                for t in [t0.min(t1), t0.max(t1)] {
                    if self.within_bounds(ray, t) {
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

        if dist < self.maximum.powi(2) && point.y >= self.maximum - EPSILON {
            Vector::new(0., 1., 0.)
        } else if dist < self.minimum.powi(2) && point.y <= self.minimum + EPSILON {
            Vector::new(0., -1., 0.)
        } else {
            let mut y = dist.sqrt();
            if point.y > 0. {
                y = -y;
            }
            Vector::new(point.x, y, point.z)
        }
    }
}
