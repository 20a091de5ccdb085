use super::{Geometry, ShapeId};
use crate::{intersection::Intersection, Point, Ray, Vector};

/// A unit sphere centered at the origin.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Sphere;

impl Geometry for Sphere {
    /// Solves |origin + t * direction|^2 = 1 for t.
    /// A tangent ray still produces two (equal) intersections.
    fn local_intersect(&self, id: ShapeId, ray: &Ray) -> Vec<Intersection> {
        // the vector from the sphere's center to the ray origin
        let sphere_to_ray = ray.origin - Point::origin();

        let a = ray.direction.dot(&ray.direction);
        let b = 2. * ray.direction.dot(&sphere_to_ray);
        let c = sphere_to_ray.dot(&sphere_to_ray) - 1.;

        let discriminant = b.powi(2) - 4. * a * c;
        if discriminant < 0. {
            return vec![];
        }

        let t1 = (-b - discriminant.sqrt()) / (2. * a);
        let t2 = (-b + discriminant.sqrt()) / (2. * a);
        vec![Intersection::new(t1, id), Intersection::new(t2, id)]
    }

    fn local_normal_at(&self, point: Point, _hit: &Intersection) -> Vector {
        point - Point::origin()
    }
}
