use super::{ShapeArena, ShapeId};
use crate::{intersection::Intersection, Ray, Result};

/// An ordered collection of child shapes that share the group's transformation.
#[derive(Debug, Default)]
pub struct Group {
    children: Vec<ShapeId>,
}

impl Group {
    pub fn children(&self) -> &[ShapeId] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub(crate) fn push(&mut self, child: ShapeId) {
        self.children.push(child);
    }

    /// `ray` is already in the group's object space; each child applies its own transformation.
    pub(crate) fn intersect_children(
        &self,
        shapes: &ShapeArena,
        ray: &Ray,
    ) -> Result<Vec<Intersection>> {
        let mut xs = vec![];
        for &child in &self.children {
            xs.extend(shapes.intersect(child, ray)?);
        }
        Ok(xs)
    }
}
