use crate::{Matrix, Point, Vector};

impl Matrix {
    pub fn translation(x: f64, y: f64, z: f64) -> Self {
        Self::new(&[
            &[1., 0., 0., x],
            &[0., 1., 0., y],
            &[0., 0., 1., z],
            &[0., 0., 0., 1.],
        ])
    }

    pub fn scaling(x: f64, y: f64, z: f64) -> Self {
        Self::new(&[
            &[x, 0., 0., 0.],
            &[0., y, 0., 0.],
            &[0., 0., z, 0.],
            &[0., 0., 0., 1.],
        ])
    }

    /// Rotation around the x axis by `r` radians (left-handed).
    pub fn rotation_x(r: f64) -> Self {
        let (sin, cos) = r.sin_cos();
        Self::new(&[
            &[1., 0., 0., 0.],
            &[0., cos, -sin, 0.],
            &[0., sin, cos, 0.],
            &[0., 0., 0., 1.],
        ])
    }

    pub fn rotation_y(r: f64) -> Self {
        let (sin, cos) = r.sin_cos();
        Self::new(&[
            &[cos, 0., sin, 0.],
            &[0., 1., 0., 0.],
            &[-sin, 0., cos, 0.],
            &[0., 0., 0., 1.],
        ])
    }

    pub fn rotation_z(r: f64) -> Self {
        let (sin, cos) = r.sin_cos();
        Self::new(&[
            &[cos, -sin, 0., 0.],
            &[sin, cos, 0., 0.],
            &[0., 0., 1., 0.],
            &[0., 0., 0., 1.],
        ])
    }

    /// Each factor moves one coordinate in proportion to another,
    /// e.g. `x_y` moves x in proportion to y.
    pub fn shearing(x_y: f64, x_z: f64, y_x: f64, y_z: f64, z_x: f64, z_y: f64) -> Self {
        Self::new(&[
            &[1., x_y, x_z, 0.],
            &[y_x, 1., y_z, 0.],
            &[z_x, z_y, 1., 0.],
            &[0., 0., 0., 1.],
        ])
    }

    // Fluent versions: each call applies its transformation after
    // everything already chained, so they read in the order they happen.

    pub fn translate(self, x: f64, y: f64, z: f64) -> Self {
        Self::translation(x, y, z) * self
    }

    pub fn scale(self, x: f64, y: f64, z: f64) -> Self {
        Self::scaling(x, y, z) * self
    }

    pub fn rotate_x(self, r: f64) -> Self {
        Self::rotation_x(r) * self
    }

    pub fn rotate_y(self, r: f64) -> Self {
        Self::rotation_y(r) * self
    }

    pub fn rotate_z(self, r: f64) -> Self {
        Self::rotation_z(r) * self
    }

    pub fn shear(self, x_y: f64, x_z: f64, y_x: f64, y_z: f64, z_x: f64, z_y: f64) -> Self {
        Self::shearing(x_y, x_z, y_x, y_z, z_x, z_y) * self
    }
}

/// Orients the world relative to an eye at `from` looking at `to`.
pub fn view_transformation(from: Point, to: Point, up: Vector) -> Matrix {
    let forward = (to - from).norm();
    let left = forward.cross(&up.norm());
    let true_up = left.cross(&forward);
    let orientation = Matrix::new(&[
        &[left.x, left.y, left.z, 0.],
        &[true_up.x, true_up.y, true_up.z, 0.],
        &[-forward.x, -forward.y, -forward.z, 0.],
        &[0., 0., 0., 1.],
    ]);
    orientation * Matrix::translation(-from.x, -from.y, -from.z)
}
