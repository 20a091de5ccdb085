use std::str::FromStr;

use super::{ShapeArena, ShapeId};
use crate::{error::RayTracerError, intersection::Intersection, Ray, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsgOperation {
    Union,
    Intersection,
    Difference,
}

impl CsgOperation {
    /// Whether an intersection survives the operation.
    ///
    /// `left_hit` says which operand was hit; `inside_left` and `inside_right`
    /// say whether the ray is currently inside each operand.
    pub fn intersection_allowed(&self, left_hit: bool, inside_left: bool, inside_right: bool) -> bool {
        match self {
            CsgOperation::Union => (left_hit && !inside_right) || (!left_hit && !inside_left),
            CsgOperation::Intersection => (left_hit && inside_right) || (!left_hit && inside_left),
            CsgOperation::Difference => (left_hit && !inside_right) || (!left_hit && inside_left),
        }
    }
}

impl FromStr for CsgOperation {
    type Err = RayTracerError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "union" => Ok(CsgOperation::Union),
            "intersection" => Ok(CsgOperation::Intersection),
            "difference" => Ok(CsgOperation::Difference),
            _ => Err(RayTracerError::InvalidCsgOperation(s.to_string())),
        }
    }
}

/// Constructive solid geometry: two operands combined by a set operation.
/// Built through [`ShapeArena::add_csg`], which also links the operands back to it.
#[derive(Debug)]
pub struct Csg {
    operation: CsgOperation,
    left: ShapeId,
    right: ShapeId,
}

impl Csg {
    pub(crate) fn new(operation: CsgOperation, left: ShapeId, right: ShapeId) -> Self {
        Self {
            operation,
            left,
            right,
        }
    }

    pub fn operation(&self) -> CsgOperation {
        self.operation
    }

    pub fn left(&self) -> ShapeId {
        self.left
    }

    pub fn right(&self) -> ShapeId {
        self.right
    }

    pub(crate) fn intersect_operands(
        &self,
        shapes: &ShapeArena,
        ray: &Ray,
    ) -> Result<Vec<Intersection>> {
        let mut xs = shapes.intersect(self.left, ray)?;
        xs.extend(shapes.intersect(self.right, ray)?);
        xs.sort_unstable_by(|a, b| a.t.total_cmp(&b.t));
        Ok(self.filter_intersections(shapes, &xs))
    }

    /// Sweeps a sorted list of the operands' intersections,
    /// keeping the ones that lie on the combined surface.
    pub fn filter_intersections(
        &self,
        shapes: &ShapeArena,
        xs: &[Intersection],
    ) -> Vec<Intersection> {
        let mut inside_left = false;
        let mut inside_right = false;
        let mut result = vec![];

        for intersection in xs {
            let left_hit = shapes.includes(self.left, intersection.object);

            if self
                .operation
                .intersection_allowed(left_hit, inside_left, inside_right)
            {
                result.push(*intersection);
            }

            if left_hit {
                inside_left = !inside_left;
            } else {
                inside_right = !inside_right;
            }
        }

        result
    }
}
