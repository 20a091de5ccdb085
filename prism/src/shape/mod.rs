//! The scene graph.
//!
//! Shapes live in a [`ShapeArena`] and refer to each other through [`ShapeId`] handles:
//! composites own the ids of their children, and every attached child keeps
//! a non-owning `parent` id pointing back at its composite.
//! The arena is what knows how to walk those links, so it hosts the logic
//! shared by every shape: converting between world and object space,
//! transforming rays before intersection and normals after.

use std::fmt::Debug;

use log::debug;
use once_cell::sync::OnceCell;
use slotmap::{new_key_type, SlotMap};

use crate::{
    error::RayTracerError,
    intersection::Intersection,
    material::Material,
    Matrix, Point, Ray, Result, Vector,
};

pub mod cone;
pub mod csg;
pub mod cube;
pub mod cylinder;
pub mod group;
pub mod plane;
pub mod smooth_triangle;
pub mod sphere;
pub mod triangle;

use self::{
    cone::Cone,
    csg::{Csg, CsgOperation},
    cube::Cube,
    cylinder::Cylinder,
    group::Group,
    plane::Plane,
    smooth_triangle::SmoothTriangle,
    sphere::Sphere,
    triangle::Triangle,
};

new_key_type! {
    /// Handle to a shape stored in a [`ShapeArena`].
    pub struct ShapeId;
}

/// What every primitive knows about itself, in its own object space.
pub trait Geometry {
    /// Intersections of an object-space ray with this primitive, tagged with `id`.
    /// Not necessarily sorted.
    fn local_intersect(&self, id: ShapeId, ray: &Ray) -> Vec<Intersection>;

    /// The object-space normal at `point`. `hit` is the intersection
    /// that produced the point, for shapes that interpolate over it.
    fn local_normal_at(&self, point: Point, hit: &Intersection) -> Vector;
}

#[derive(Debug)]
pub enum ShapeKind {
    Sphere(Sphere),
    Plane(Plane),
    Cube(Cube),
    Cylinder(Cylinder),
    Cone(Cone),
    Triangle(Triangle),
    SmoothTriangle(SmoothTriangle),
    Group(Group),
    Csg(Csg),
}

impl ShapeKind {
    /// The primitive behind this shape, or None for composites.
    pub fn geometry(&self) -> Option<&dyn Geometry> {
        match self {
            ShapeKind::Sphere(sphere) => Some(sphere),
            ShapeKind::Plane(plane) => Some(plane),
            ShapeKind::Cube(cube) => Some(cube),
            ShapeKind::Cylinder(cylinder) => Some(cylinder),
            ShapeKind::Cone(cone) => Some(cone),
            ShapeKind::Triangle(triangle) => Some(triangle),
            ShapeKind::SmoothTriangle(triangle) => Some(triangle),
            ShapeKind::Group(_) | ShapeKind::Csg(_) => None,
        }
    }

    pub fn is_composite(&self) -> bool {
        self.geometry().is_none()
    }
}

impl From<Sphere> for ShapeKind {
    fn from(value: Sphere) -> Self {
        ShapeKind::Sphere(value)
    }
}

impl From<Plane> for ShapeKind {
    fn from(value: Plane) -> Self {
        ShapeKind::Plane(value)
    }
}

impl From<Cube> for ShapeKind {
    fn from(value: Cube) -> Self {
        ShapeKind::Cube(value)
    }
}

impl From<Cylinder> for ShapeKind {
    fn from(value: Cylinder) -> Self {
        ShapeKind::Cylinder(value)
    }
}

impl From<Cone> for ShapeKind {
    fn from(value: Cone) -> Self {
        ShapeKind::Cone(value)
    }
}

impl From<Triangle> for ShapeKind {
    fn from(value: Triangle) -> Self {
        ShapeKind::Triangle(value)
    }
}

impl From<SmoothTriangle> for ShapeKind {
    fn from(value: SmoothTriangle) -> Self {
        ShapeKind::SmoothTriangle(value)
    }
}

impl From<Group> for ShapeKind {
    fn from(value: Group) -> Self {
        ShapeKind::Group(value)
    }
}

/// A node of the scene graph: a primitive or composite,
/// placed by its transformation relative to its parent (or the world).
#[derive(Debug)]
pub struct Shape {
    kind: ShapeKind,
    transformation: Matrix,
    inverse: OnceCell<Matrix>,
    material: Material,
    parent: Option<ShapeId>,
}

impl Shape {
    pub fn new(kind: impl Into<ShapeKind>) -> Self {
        Self {
            kind: kind.into(),
            transformation: Matrix::identity(),
            inverse: OnceCell::new(),
            material: Material::default(),
            parent: None,
        }
    }

    pub fn sphere() -> Self {
        Self::new(Sphere)
    }

    /// A sphere with a transparent, glass-like material
    /// (transparency = 1, refractive_index = 1.5).
    pub fn glass_sphere() -> Self {
        Self::sphere().with_material(Material {
            transparency: 1.,
            refractive_index: 1.5,
            ..Default::default()
        })
    }

    pub fn plane() -> Self {
        Self::new(Plane)
    }

    pub fn cube() -> Self {
        Self::new(Cube)
    }

    /// An empty group. Children are attached through [`ShapeArena::add_child`].
    pub fn group() -> Self {
        Self::new(Group::default())
    }

    pub fn with_transformation(mut self, transformation: Matrix) -> Self {
        self.set_transformation(transformation);
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn transformation(&self) -> Matrix {
        self.transformation
    }

    pub fn set_transformation(&mut self, transformation: Matrix) {
        self.transformation = transformation;
        self.inverse = OnceCell::new();
    }

    /// The inverse transformation, computed on first use.
    /// Fails if the transformation is singular.
    pub fn inverse(&self) -> Result<Matrix> {
        let inverse = self
            .inverse
            .get_or_try_init(|| self.transformation.inverse())?;
        Ok(*inverse)
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    pub fn parent(&self) -> Option<ShapeId> {
        self.parent
    }

    pub fn casts_shadow(&self) -> bool {
        self.material.casts_shadow
    }

    pub fn as_group(&self) -> Option<&Group> {
        match &self.kind {
            ShapeKind::Group(group) => Some(group),
            _ => None,
        }
    }

    pub fn as_csg(&self) -> Option<&Csg> {
        match &self.kind {
            ShapeKind::Csg(csg) => Some(csg),
            _ => None,
        }
    }
}

/// Owns every shape of a scene, plus the list of top-level shapes.
///
/// Shapes are inserted detached; they then become either top-level objects
/// ([`add_object`](Self::add_object), [`add_root`](Self::add_root)),
/// group children ([`add_child`](Self::add_child)),
/// or CSG operands ([`add_csg`](Self::add_csg)), but never more than one of those.
#[derive(Debug, Default)]
pub struct ShapeArena {
    shapes: SlotMap<ShapeId, Shape>,
    roots: Vec<ShapeId>,
}

impl ShapeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Stores a shape without placing it anywhere in the scene yet.
    pub fn insert(&mut self, shape: Shape) -> ShapeId {
        self.shapes.insert(shape)
    }

    /// Stores a shape as a top-level object of the scene.
    pub fn add_object(&mut self, shape: Shape) -> ShapeId {
        let id = self.insert(shape);
        self.roots.push(id);
        debug!("added top-level shape {id:?}");
        id
    }

    /// Promotes a detached shape (usually a group or a CSG) to the top level.
    pub fn add_root(&mut self, id: ShapeId) -> Result<()> {
        self.ensure_detached(id)?;
        self.roots.push(id);
        debug!("added top-level shape {id:?}");
        Ok(())
    }

    /// Attaches `child` to the group `parent`, setting the child's back reference.
    pub fn add_child(&mut self, parent: ShapeId, child: ShapeId) -> Result<()> {
        if self.get(parent)?.as_group().is_none() {
            return Err(RayTracerError::NotAGroup(parent));
        }
        self.get(child)?;
        if child == parent || self.is_ancestor(child, parent) {
            return Err(RayTracerError::CyclicAttachment { parent, child });
        }
        self.ensure_detached(child)?;

        self.get_mut(child)?.parent = Some(parent);
        if let ShapeKind::Group(group) = &mut self.get_mut(parent)?.kind {
            group.push(child);
        }
        debug!("attached {child:?} to group {parent:?}");
        Ok(())
    }

    /// Combines two detached shapes into a new, detached CSG shape.
    pub fn add_csg(
        &mut self,
        operation: CsgOperation,
        left: ShapeId,
        right: ShapeId,
    ) -> Result<ShapeId> {
        self.ensure_detached(left)?;
        self.ensure_detached(right)?;
        if left == right {
            return Err(RayTracerError::AlreadyAttached(right));
        }

        let id = self.insert(Shape::new(ShapeKind::Csg(Csg::new(operation, left, right))));
        self.get_mut(left)?.parent = Some(id);
        self.get_mut(right)?.parent = Some(id);
        debug!("built {operation:?} CSG {id:?} from {left:?} and {right:?}");
        Ok(id)
    }

    pub fn get(&self, id: ShapeId) -> Result<&Shape> {
        self.shapes.get(id).ok_or(RayTracerError::UnknownShape(id))
    }

    pub fn get_mut(&mut self, id: ShapeId) -> Result<&mut Shape> {
        self.shapes.get_mut(id).ok_or(RayTracerError::UnknownShape(id))
    }

    /// The top-level shapes, in the order they were added.
    pub fn roots(&self) -> &[ShapeId] {
        &self.roots
    }

    /// Intersects a world-space (or parent-space) ray with the shape,
    /// recursing into composites. The result is sorted by `t`.
    pub fn intersect(&self, id: ShapeId, ray: &Ray) -> Result<Vec<Intersection>> {
        let shape = self.get(id)?;
        let local_ray = ray.transform(&shape.inverse()?);

        let mut xs = match &shape.kind {
            ShapeKind::Group(group) => group.intersect_children(self, &local_ray)?,
            ShapeKind::Csg(csg) => csg.intersect_operands(self, &local_ray)?,
            primitive => primitive
                .geometry()
                .map(|geometry| geometry.local_intersect(id, &local_ray))
                .unwrap_or_default(),
        };
        xs.sort_unstable_by(|a, b| a.t.total_cmp(&b.t));
        Ok(xs)
    }

    /// Converts a world-space point into the shape's object space,
    /// going through every ancestor from the top down.
    pub fn world_to_object(&self, id: ShapeId, point: Point) -> Result<Point> {
        let shape = self.get(id)?;
        let point = match shape.parent {
            Some(parent) => self.world_to_object(parent, point)?,
            None => point,
        };
        Ok(shape.inverse()? * point)
    }

    /// Converts an object-space normal into world space,
    /// going through every ancestor from the shape up.
    pub fn normal_to_world(&self, id: ShapeId, normal: Vector) -> Result<Vector> {
        let shape = self.get(id)?;
        let normal = (shape.inverse()?.transpose() * normal).norm();
        match shape.parent {
            Some(parent) => self.normal_to_world(parent, normal),
            None => Ok(normal),
        }
    }

    /// The world-space surface normal of a primitive at a world-space point.
    pub fn normal_at(&self, id: ShapeId, world_point: Point, hit: &Intersection) -> Result<Vector> {
        let geometry = self
            .get(id)?
            .kind
            .geometry()
            .ok_or(RayTracerError::NoSurface(id))?;
        let local_point = self.world_to_object(id, world_point)?;
        let local_normal = geometry.local_normal_at(local_point, hit);
        self.normal_to_world(id, local_normal)
    }

    /// True if `shape` is `container` itself or sits anywhere below it.
    pub fn includes(&self, container: ShapeId, shape: ShapeId) -> bool {
        if container == shape {
            return true;
        }
        match self.shapes.get(container).map(|s| &s.kind) {
            Some(ShapeKind::Group(group)) => group
                .children()
                .iter()
                .any(|&child| self.includes(child, shape)),
            Some(ShapeKind::Csg(csg)) => {
                self.includes(csg.left(), shape) || self.includes(csg.right(), shape)
            }
            _ => false,
        }
    }

    fn ensure_detached(&self, id: ShapeId) -> Result<()> {
        if self.get(id)?.parent.is_some() || self.roots.contains(&id) {
            return Err(RayTracerError::AlreadyAttached(id));
        }
        Ok(())
    }

    fn is_ancestor(&self, candidate: ShapeId, id: ShapeId) -> bool {
        let mut current = self.shapes.get(id).and_then(|shape| shape.parent);
        while let Some(ancestor) = current {
            if ancestor == candidate {
                return true;
            }
            current = self.shapes.get(ancestor).and_then(|shape| shape.parent);
        }
        false
    }
}
