pub mod camera;
pub mod canvas;
pub mod color;
pub mod config;
mod error;
pub mod intersection;
pub mod light;
pub mod material;
pub mod matrix;
pub mod pattern;
pub mod ray;
pub mod shape;
pub mod transformation;
mod tuple;
pub mod world;

pub use color::Color;
pub use error::RayTracerError;
pub use matrix::Matrix;
pub use ray::Ray;
pub use tuple::{Point, Vector};

pub type Result<T> = std::result::Result<T, RayTracerError>;

/// Tolerance used for every floating point comparison in the crate.
pub const EPSILON: f64 = 1e-5;

pub fn equal(a: f64, b: f64) -> bool {
    let c = a - b;
    c.abs() < EPSILON
}

pub mod prelude {
    pub use crate::camera::Camera;
    pub use crate::canvas::Canvas;
    pub use crate::config::RenderConfig;
    pub use crate::intersection::{hit, Computations, Intersect, Intersection};
    pub use crate::light::PointLight;
    pub use crate::material::Material;
    pub use crate::pattern::{
        checkers_pattern::CheckersPattern, gradient_pattern::GradientPattern,
        ring_pattern::RingPattern, stripe_pattern::StripePattern, Pattern,
    };
    pub use crate::shape::{
        cone::Cone,
        csg::CsgOperation,
        cylinder::Cylinder,
        smooth_triangle::SmoothTriangle,
        triangle::Triangle,
        Shape, ShapeArena, ShapeId, ShapeKind,
    };
    pub use crate::transformation::view_transformation;
    pub use crate::world::World;
    pub use crate::{Color, Matrix, Point, Ray, RayTracerError, Vector, EPSILON};
}
