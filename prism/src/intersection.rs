use crate::{
    shape::{ShapeArena, ShapeId},
    Point, Ray, Result, Vector, EPSILON,
};

pub trait Intersect {
    /// Computes the intersections of the given ray with this object, sorted by t.
    fn intersect(&self, ray: &Ray) -> Result<Vec<Intersection>>;
}

/// A ray crossing a shape's surface at distance `t`.
/// `u` and `v` are barycentric coordinates, only meaningful for triangles.
#[derive(Debug, Clone, Copy)]
pub struct Intersection {
    pub t: f64,
    pub object: ShapeId,
    pub u: f64,
    pub v: f64,
}

impl Intersection {
    pub fn new(t: f64, object: ShapeId) -> Self {
        Self::with_uv(t, object, 0., 0.)
    }

    pub fn with_uv(t: f64, object: ShapeId, u: f64, v: f64) -> Self {
        Self { t, object, u, v }
    }

    /// Precomputes everything shading needs to know about this intersection:
    /// the point (in world space) where it occurred, the eye and normal vectors,
    /// the points just above and below the surface, and the refractive indices
    /// on either side of it.
    ///
    /// `intersections` is the full, sorted list this intersection came from.
    pub fn prepare_computations(
        &self,
        ray: &Ray,
        intersections: &[Intersection],
        shapes: &ShapeArena,
    ) -> Result<Computations> {
        let point = ray.position(self.t);
        let eye_vector = -ray.direction;
        let normal_vector = shapes.normal_at(self.object, point, self)?;

        // a normal pointing away from the eye means the hit is inside the shape
        let inside = normal_vector.dot(&eye_vector) < 0.;
        let normal_vector = if inside {
            -normal_vector
        } else {
            normal_vector
        };

        let reflect_vector = ray.direction.reflect(&normal_vector);
        let over_point = point + normal_vector * EPSILON;
        let under_point = point - normal_vector * EPSILON;

        let (n1, n2) = self.refractive_indices(intersections, shapes)?;

        Ok(Computations {
            t: self.t,
            object: self.object,
            point,
            eye_vector,
            normal_vector,
            inside,
            over_point,
            under_point,
            reflect_vector,
            n1,
            n2,
        })
    }

    /// n1 belongs to the material being exited and n2 to the one being entered.
    /// Replays the intersections in order, tracking which shapes the ray is inside of.
    fn refractive_indices(
        &self,
        intersections: &[Intersection],
        shapes: &ShapeArena,
    ) -> Result<(f64, f64)> {
        let mut containers: Vec<ShapeId> = vec![];
        let mut n1 = 1.;
        let mut n2 = 1.;

        for intersection in intersections {
            let is_hit = intersection == self;

            if is_hit {
                n1 = refractive_index_of(containers.last(), shapes)?;
            }

            match containers
                .iter()
                .position(|&object| object == intersection.object)
            {
                Some(position) => {
                    containers.remove(position);
                }
                None => containers.push(intersection.object),
            }

            if is_hit {
                n2 = refractive_index_of(containers.last(), shapes)?;
                break;
            }
        }

        Ok((n1, n2))
    }
}

/// Empty containers mean the ray is travelling through vacuum.
fn refractive_index_of(container: Option<&ShapeId>, shapes: &ShapeArena) -> Result<f64> {
    match container {
        Some(&id) => Ok(shapes.get(id)?.material().refractive_index),
        None => Ok(1.),
    }
}

/// Two intersections are the same when they hit the same shape at the same distance.
impl PartialEq for Intersection {
    fn eq(&self, other: &Self) -> bool {
        self.t == other.t && self.object == other.object
    }
}

/// Finds the intersection that hits the object:
/// the first one with a non-negative t in a list sorted by t.
pub fn hit(intersections: &[Intersection]) -> Option<&Intersection> {
    intersections.iter().find(|intersection| intersection.t >= 0.)
}

#[derive(Debug, Clone, Copy)]
pub struct Computations {
    pub t: f64,
    pub object: ShapeId,
    pub point: Point,
    pub eye_vector: Vector,
    pub normal_vector: Vector,
    pub inside: bool,
    pub over_point: Point,
    pub under_point: Point,
    pub reflect_vector: Vector,
    pub n1: f64,
    pub n2: f64,
}

impl Computations {
    /// Computes the Schlick approximation for Fresnel effect
    /// (i.e. the fraction of light reflected by a transparent surface).
    pub fn schlick(&self) -> f64 {
        // find the cosine of the angle between the eye and the normal vectors
        let mut cos = self.eye_vector.dot(&self.normal_vector);

        if self.n1 > self.n2 {
            let n = self.n1 / self.n2;
            let sin2_t = n.powi(2) * (1. - cos.powi(2));
            if sin2_t > 1. {
                // total internal reflection
                return 1.;
            }

            // when n1 > n2, use cos(theta_t) instead
            cos = (1. - sin2_t).sqrt();
        }

        let r0 = ((self.n1 - self.n2) / (self.n1 + self.n2)).powi(2);
        r0 + (1. - r0) * (1. - cos).powi(5)
    }
}
