use thiserror::Error;

use crate::{matrix::MatrixError, shape::ShapeId};

#[derive(Debug, Error)]
pub enum RayTracerError {
    #[error(transparent)]
    Matrix(#[from] MatrixError),

    #[error("unknown CSG operation: {0}")]
    InvalidCsgOperation(String),

    #[error("shape {0:?} does not exist in this scene")]
    UnknownShape(ShapeId),

    #[error("shape {0:?} already belongs to a composite or to the top level of the scene")]
    AlreadyAttached(ShapeId),

    #[error("attaching {child:?} to {parent:?} would create a cycle")]
    CyclicAttachment { parent: ShapeId, child: ShapeId },

    #[error("shape {0:?} is not a group")]
    NotAGroup(ShapeId),

    #[error("shape {0:?} is a composite and has no surface normal of its own")]
    NoSurface(ShapeId),
}
