use std::ops::{Index, Mul};

use thiserror::Error;

use crate::{equal, Point, Vector};

type Result<T> = std::result::Result<T, MatrixError>;

#[derive(Debug, Error)]
pub enum MatrixError {
    #[error("Attempted to calculate an inverse of a non-invertible matrix")]
    NonInvertible,
}

/// A square matrix of up to 4x4 elements.
/// Storage is always 4x4; `size` tells how much of it is in use,
/// so that submatrices (3x3, 2x2) can share the same type and stay `Copy`.
#[derive(Clone, Copy, Debug)]
pub struct Matrix {
    data: [[f64; 4]; 4],
    size: usize,
}

impl Matrix {
    /// Builds a matrix from rows. Panics if the input isn't square
    /// or is larger than 4x4; meant for literals in code and tests.
    pub fn new(rows: &[&[f64]]) -> Self {
        let size = rows.len();
        assert!(size <= 4, "matrices larger than 4x4 are not supported");
        let mut data = [[0.; 4]; 4];
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), size, "matrix rows must form a square");
            data[i][..size].copy_from_slice(row);
        }
        Self { data, size }
    }

    pub fn identity() -> Self {
        let mut data = [[0.; 4]; 4];
        for (i, row) in data.iter_mut().enumerate() {
            row[i] = 1.;
        }
        Self { data, size: 4 }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn transpose(&self) -> Self {
        let mut transposed = *self;
        for i in 0..self.size {
            for j in 0..self.size {
                transposed.data[j][i] = self.data[i][j];
            }
        }
        transposed
    }

    /// Laplace expansion along the first row, bottoming out at 2x2.
    pub fn determinant(&self) -> f64 {
        match self.size {
            0 => 1.,
            1 => self.data[0][0],
            2 => self.data[0][0] * self.data[1][1] - self.data[0][1] * self.data[1][0],
            _ => (0..self.size)
                .map(|j| self.data[0][j] * self.cofactor(0, j))
                .sum(),
        }
    }

    pub fn submatrix(&self, row_index: usize, column_index: usize) -> Self {
        let mut data = [[0.; 4]; 4];
        let rows = (0..self.size).filter(|&i| i != row_index);
        for (new_i, i) in rows.enumerate() {
            let columns = (0..self.size).filter(|&j| j != column_index);
            for (new_j, j) in columns.enumerate() {
                data[new_i][new_j] = self.data[i][j];
            }
        }
        Self {
            data,
            size: self.size - 1,
        }
    }

    pub fn minor(&self, row_index: usize, column_index: usize) -> f64 {
        self.submatrix(row_index, column_index).determinant()
    }

    pub fn cofactor(&self, row_index: usize, column_index: usize) -> f64 {
        let minor = self.minor(row_index, column_index);
        if (row_index + column_index) % 2 == 0 {
            minor
        } else {
            -minor
        }
    }

    pub fn is_invertible(&self) -> bool {
        self.determinant() != 0.0
    }

    /// Inverts through the adjugate. Only an exactly zero determinant is rejected.
    pub fn inverse(&self) -> Result<Self> {
        let det = self.determinant();
        if det == 0.0 {
            return Err(MatrixError::NonInvertible);
        }

        let mut inverse = *self;
        for row in 0..self.size {
            for column in 0..self.size {
                // transposed on the way in
                inverse.data[column][row] = self.cofactor(row, column) / det;
            }
        }
        Ok(inverse)
    }

    fn transform(&self, x: f64, y: f64, z: f64, w: f64) -> [f64; 3] {
        let mut out = [0.; 3];
        for (row, value) in out.iter_mut().enumerate() {
            let r = &self.data[row];
            *value = r[0] * x + r[1] * y + r[2] * z + r[3] * w;
        }
        out
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl Index<usize> for Matrix {
    type Output = [f64];

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index][..self.size]
    }
}

impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        if self.size != other.size {
            return false;
        }
        (0..self.size).all(|i| (0..self.size).all(|j| equal(self.data[i][j], other.data[i][j])))
    }
}

impl Mul<Self> for Matrix {
    type Output = Self;

    /// Only meaningful for 4x4 matrices.
    fn mul(self, other: Self) -> Self {
        let mut data = [[0.; 4]; 4];
        for (row, out_row) in data.iter_mut().enumerate() {
            for (col, value) in out_row.iter_mut().enumerate() {
                *value = (0..4).map(|k| self.data[row][k] * other.data[k][col]).sum();
            }
        }
        Self { data, size: 4 }
    }
}

impl Mul<Point> for Matrix {
    type Output = Point;

    /// Points carry w = 1, so they pick up translation.
    fn mul(self, rhs: Point) -> Point {
        let [x, y, z] = self.transform(rhs.x, rhs.y, rhs.z, 1.);
        Point::new(x, y, z)
    }
}

impl Mul<Vector> for Matrix {
    type Output = Vector;

    /// Vectors carry w = 0 and the resulting w is discarded,
    /// which is what transforming normals by an inverse transpose needs.
    fn mul(self, rhs: Vector) -> Vector {
        let [x, y, z] = self.transform(rhs.x, rhs.y, rhs.z, 0.);
        Vector::new(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Matrix {
        Matrix::new(&[
            &[1.0, 2.0, 3.0, 4.0],
            &[5.0, 6.0, 7.0, 8.0],
            &[9.0, 8.0, 7.0, 6.0],
            &[5.0, 4.0, 3.0, 2.0],
        ])
    }

    #[test]
    fn build_4x4_matrix() {
        let m = Matrix::new(&[
            &[1.0, 2.0, 3.0, 4.0],
            &[5.5, 6.5, 7.5, 8.5],
            &[9.0, 10.0, 11.0, 12.0],
            &[13.5, 14.5, 15.5, 16.5],
        ]);
        assert_eq!(m[0][3], 4.0);
        assert_eq!(m[1][2], 7.5);
        assert_eq!(m[3][0], 13.5);
        assert_eq!(m.size(), 4);
    }

    #[test]
    fn build_small_matrices() {
        let m = Matrix::new(&[&[-3.0, 5.0], &[1.0, -2.0]]);
        assert_eq!(m[1][1], -2.0);
        assert_eq!(m[0].len(), 2);

        let m = Matrix::new(&[&[-3.0, 5.0, 0.0], &[1.0, -2.0, 7.0], &[0.0, 1.0, 1.0]]);
        assert_eq!(m[2][2], 1.0);
    }

    #[test]
    fn matrix_equality() {
        let b = Matrix::new(&[
            &[2.0, 3.0, 4.0, 5.0],
            &[6.0, 7.0, 8.0, 9.0],
            &[8.0, 7.0, 6.0, 5.0],
            &[4.0, 3.0, 2.0, 1.0],
        ]);
        assert_eq!(sample(), sample());
        assert_ne!(sample(), b);
    }

    #[test]
    fn multiply_matrices() {
        let b = Matrix::new(&[
            &[-2.0, 1.0, 2.0, 3.0],
            &[3.0, 2.0, 1.0, -1.0],
            &[4.0, 3.0, 6.0, 5.0],
            &[1.0, 2.0, 7.0, 8.0],
        ]);
        let expected = Matrix::new(&[
            &[20.0, 22.0, 50.0, 48.0],
            &[44.0, 54.0, 114.0, 108.0],
            &[40.0, 58.0, 110.0, 102.0],
            &[16.0, 26.0, 46.0, 42.0],
        ]);
        assert_eq!(sample() * b, expected);
        assert_eq!(sample() * Matrix::identity(), sample());
    }

    #[test]
    fn multiply_matrix_by_point_and_vector() {
        let a = Matrix::new(&[
            &[1.0, 2.0, 3.0, 4.0],
            &[2.0, 4.0, 4.0, 2.0],
            &[8.0, 6.0, 4.0, 1.0],
            &[0.0, 0.0, 0.0, 1.0],
        ]);
        assert_eq!(a * Point::new(1., 2., 3.), Point::new(18., 24., 33.));
        // the fourth column only applies to points
        assert_eq!(a * Vector::new(1., 2., 3.), Vector::new(14., 22., 32.));
    }

    #[test]
    fn transpose_matrix() {
        let a = Matrix::new(&[
            &[0.0, 9.0, 3.0, 0.0],
            &[9.0, 8.0, 0.0, 8.0],
            &[1.0, 8.0, 5.0, 3.0],
            &[0.0, 0.0, 5.0, 8.0],
        ]);
        let expected = Matrix::new(&[
            &[0.0, 9.0, 1.0, 0.0],
            &[9.0, 8.0, 8.0, 0.0],
            &[3.0, 0.0, 5.0, 5.0],
            &[0.0, 8.0, 3.0, 8.0],
        ]);
        assert_eq!(a.transpose(), expected);
        assert_eq!(Matrix::identity().transpose(), Matrix::identity());
    }

    #[test]
    fn submatrices_shrink() {
        let a = Matrix::new(&[&[1.0, 5.0, 0.0], &[-3.0, 2.0, 7.0], &[0.0, 6.0, -3.0]]);
        assert_eq!(a.submatrix(0, 2), Matrix::new(&[&[-3.0, 2.0], &[0.0, 6.0]]));

        let a = Matrix::new(&[
            &[-6., 1., 1., 6.],
            &[-8., 5., 8., 6.],
            &[-1., 0., 8., 2.],
            &[-7., 1., -1., 1.],
        ]);
        let expected = Matrix::new(&[&[-6.0, 1.0, 6.0], &[-8.0, 8.0, 6.0], &[-7.0, -1.0, 1.0]]);
        assert_eq!(a.submatrix(2, 1), expected);
    }

    #[test]
    fn minors_and_cofactors() {
        let a = Matrix::new(&[&[3.0, 5.0, 0.0], &[2.0, -1.0, -7.0], &[6.0, -1.0, 5.0]]);
        assert_eq!(a.minor(0, 0), -12.0);
        assert_eq!(a.cofactor(0, 0), -12.0);
        assert_eq!(a.minor(1, 0), 25.0);
        assert_eq!(a.cofactor(1, 0), -25.0);
    }

    #[test]
    fn determinants() {
        assert_eq!(Matrix::new(&[&[1.0, 5.0], &[-3.0, 2.0]]).determinant(), 17.0);

        let a = Matrix::new(&[&[1.0, 2.0, 6.0], &[-5.0, 8.0, -4.0], &[2.0, 6.0, 4.0]]);
        assert_eq!(a.determinant(), -196.0);

        let a = Matrix::new(&[
            &[-2., -8., 3., 5.],
            &[-3., 1., 7., 3.],
            &[1., 2., -9., 6.],
            &[-6., 7., 7., -9.],
        ]);
        assert_eq!(a.cofactor(0, 3), 51.0);
        assert_eq!(a.determinant(), -4071.0);
    }

    #[test]
    fn singular_matrix_has_no_inverse() {
        let a = Matrix::new(&[
            &[-4., 2., -2., -3.],
            &[9., 6., 2., 6.],
            &[0., -5., 1., -5.],
            &[0., 0., 0., 0.],
        ]);
        assert!(!a.is_invertible());
        assert!(matches!(a.inverse(), Err(MatrixError::NonInvertible)));
    }

    #[test]
    fn calculate_inverse() {
        let a = Matrix::new(&[
            &[-5., 2., 6., -8.],
            &[1., -5., 1., 8.],
            &[7., 7., -6., -7.],
            &[1., -3., 7., 4.],
        ]);
        let b = a.inverse().unwrap();
        assert_eq!(a.determinant(), 532.0);
        assert!(equal(b[3][2], -160.0 / 532.0));
        assert!(equal(b[2][3], 105.0 / 532.0));

        let expected = Matrix::new(&[
            &[0.21805, 0.45113, 0.24060, -0.04511],
            &[-0.80827, -1.45677, -0.44361, 0.52068],
            &[-0.07895, -0.22368, -0.05263, 0.19737],
            &[-0.52256, -0.81391, -0.30075, 0.30639],
        ]);
        assert_eq!(b, expected);
    }

    #[test]
    fn inverse_of_another_matrix() {
        let a = Matrix::new(&[
            &[9., 3., 0., 9.],
            &[-5., -2., -6., -3.],
            &[-4., 9., 6., 4.],
            &[-7., 6., 6., 2.],
        ]);
        let expected = Matrix::new(&[
            &[-0.04074, -0.07778, 0.14444, -0.22222],
            &[-0.07778, 0.03333, 0.36667, -0.33333],
            &[-0.02901, -0.14630, -0.10926, 0.12963],
            &[0.17778, 0.06667, -0.26667, 0.33333],
        ]);
        assert_eq!(a.inverse().unwrap(), expected);
    }

    #[test]
    fn multiplying_a_product_by_inverse_gives_original_matrix() {
        let a = Matrix::new(&[
            &[3., -9., 7., 3.],
            &[3., -8., 2., -9.],
            &[-4., 4., 4., 1.],
            &[-6., 5., -1., 1.],
        ]);
        let b = Matrix::new(&[
            &[8., 2., 2., 2.],
            &[3., -1., 7., 0.],
            &[7., 0., 5., 4.],
            &[6., -2., 0., 5.],
        ]);
        let c = a * b;
        assert_eq!(c * b.inverse().unwrap(), a);
        assert_eq!(a * a.inverse().unwrap(), Matrix::identity());
    }

    #[test]
    fn inverse_of_inverse_is_original() {
        let a = Matrix::new(&[
            &[-5., 2., 6., -8.],
            &[1., -5., 1., 8.],
            &[7., 7., -6., -7.],
            &[1., -3., 7., 4.],
        ]);
        assert_eq!(a.inverse().unwrap().inverse().unwrap(), a);
        assert_eq!(
            Matrix::identity().inverse().unwrap(),
            Matrix::identity()
        );
    }
}
