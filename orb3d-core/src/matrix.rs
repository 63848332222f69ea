/// Row-major 4x4 matrix stored as four packed row-vectors
use crate::vector::Vec3;
use approx::{AbsDiffEq, RelativeEq};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// A 4x4 matrix of f32 in row-major order.
///
/// Storage is four rows of four lanes at 16-byte alignment. Every
/// constructor fully initializes all sixteen elements; `Default` is the
/// identity. Consumers that need column-major data (fixed-function
/// graphics pipelines) transpose before use — no operation here does so
/// implicitly.
#[repr(C, align(16))]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Mat4 {
    rows: [[f32; 4]; 4],
}

impl Mat4 {
    pub fn identity() -> Self {
        Self {
            rows: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    pub fn zero() -> Self {
        Self {
            rows: [[0.0; 4]; 4],
        }
    }

    pub fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        Self { rows }
    }

    pub fn at(&self, row: usize, col: usize) -> f32 {
        self.rows[row][col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.rows[row][col] = value;
    }

    pub fn row(&self, row: usize) -> [f32; 4] {
        self.rows[row]
    }

    pub fn transpose(&self) -> Self {
        let mut rows = [[0.0f32; 4]; 4];
        for (i, row) in self.rows.iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                rows[j][i] = *value;
            }
        }
        Self { rows }
    }

    /// Transforms `point` as a homogeneous point (w = 1).
    ///
    /// Returns the resulting (x, y, z) without performing a perspective
    /// divide; callers needing projected coordinates divide by the clip w
    /// themselves (see [`crate::Camera::project_to_screen`]).
    pub fn transform_point(&self, point: &Vec3) -> Vec3 {
        let [x, y, z] = self.transform_lanes(point, 1.0);
        Vec3::new(x, y, z)
    }

    /// Transforms `vector` as a homogeneous direction (w = 0); translation
    /// has no effect. Used for normals and directions.
    pub fn transform_vector(&self, vector: &Vec3) -> Vec3 {
        let [x, y, z] = self.transform_lanes(vector, 0.0);
        Vec3::new(x, y, z)
    }

    fn transform_lanes(&self, v: &Vec3, w: f32) -> [f32; 3] {
        let mut out = [0.0f32; 3];
        for (lane, row) in out.iter_mut().zip(&self.rows) {
            *lane = row[0] * v.x() + row[1] * v.y() + row[2] * v.z() + row[3] * w;
        }
        out
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

/// Standard row-major matrix product; not commutative.
impl Mul for Mat4 {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        let mut rows = [[0.0f32; 4]; 4];
        for i in 0..4 {
            // row_i(result) = sum_k A[i][k] * B[k][:]
            for k in 0..4 {
                let a = self.rows[i][k];
                for j in 0..4 {
                    rows[i][j] += a * other.rows[k][j];
                }
            }
        }
        Self { rows }
    }
}

impl Add for Mat4 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        let mut rows = self.rows;
        for (row, other_row) in rows.iter_mut().zip(&other.rows) {
            for (value, other_value) in row.iter_mut().zip(other_row) {
                *value += other_value;
            }
        }
        Self { rows }
    }
}

impl Sub for Mat4 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        let mut rows = self.rows;
        for (row, other_row) in rows.iter_mut().zip(&other.rows) {
            for (value, other_value) in row.iter_mut().zip(other_row) {
                *value -= other_value;
            }
        }
        Self { rows }
    }
}

impl Mul<f32> for Mat4 {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        let mut rows = self.rows;
        for row in &mut rows {
            for value in row.iter_mut() {
                *value *= scalar;
            }
        }
        Self { rows }
    }
}

impl AbsDiffEq for Mat4 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.rows
            .iter()
            .flatten()
            .zip(other.rows.iter().flatten())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Mat4 {
    fn default_max_relative() -> f32 {
        f32::EPSILON
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.rows
            .iter()
            .flatten()
            .zip(other.rows.iter().flatten())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

impl fmt::Display for Mat4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "| ")?;
            for value in row {
                write!(f, "{value:8.3} ")?;
            }
            write!(f, "|")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_default_is_identity() {
        assert_eq!(Mat4::default(), Mat4::identity());
    }

    #[test]
    fn test_identity_is_multiplicative_neutral() {
        let m = Mat4::from_rows([
            [1.0, 2.0, 3.0, 4.0],
            [5.0, 6.0, 7.0, 8.0],
            [9.0, 10.0, 11.0, 12.0],
            [13.0, 14.0, 15.0, 16.0],
        ]);
        assert_eq!(Mat4::identity() * m, m);
        assert_eq!(m * Mat4::identity(), m);
    }

    #[test]
    fn test_multiplication_is_not_commutative() {
        let a = Mat4::from_rows([
            [0.0, 1.0, 0.0, 0.0],
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        let b = Mat4::from_rows([
            [1.0, 0.0, 0.0, 2.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        assert_ne!(a * b, b * a);
    }

    #[test]
    fn test_multiplication_row_major_order() {
        let translate = Mat4::translation(&Vec3::new(1.0, 0.0, 0.0));
        let scale = Mat4::scaling_uniform(2.0);
        // Row-major: (scale * translate) scales after translating the point
        let p = Vec3::new(1.0, 0.0, 0.0);
        let scaled_then_translated = (translate * scale).transform_point(&p);
        assert_abs_diff_eq!(scaled_then_translated, Vec3::new(3.0, 0.0, 0.0));
        let translated_then_scaled = (scale * translate).transform_point(&p);
        assert_abs_diff_eq!(translated_then_scaled, Vec3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn test_elementwise_arithmetic() {
        let m = Mat4::identity();
        assert_eq!((m + m).at(0, 0), 2.0);
        assert_eq!((m - m), Mat4::zero());
        assert_eq!((m * 3.0).at(2, 2), 3.0);
        assert_eq!((m * 3.0).at(2, 1), 0.0);
    }

    #[test]
    fn test_transpose_involution() {
        let m = Mat4::from_rows([
            [1.0, 2.0, 3.0, 4.0],
            [5.0, 6.0, 7.0, 8.0],
            [9.0, 10.0, 11.0, 12.0],
            [13.0, 14.0, 15.0, 16.0],
        ]);
        assert_eq!(m.transpose().transpose(), m);
        assert_eq!(m.transpose().at(0, 1), 5.0);
    }

    #[test]
    fn test_transform_point_applies_translation() {
        let m = Mat4::translation(&Vec3::new(1.0, 2.0, 3.0));
        let p = m.transform_point(&Vec3::new(1.0, 1.0, 1.0));
        assert_abs_diff_eq!(p, Vec3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn test_transform_vector_ignores_translation() {
        let m = Mat4::translation(&Vec3::new(1.0, 2.0, 3.0));
        let v = m.transform_vector(&Vec3::new(1.0, 1.0, 1.0));
        assert_abs_diff_eq!(v, Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_transform_point_no_perspective_divide() {
        // Perspective row 3 = [0, 0, -1, 0]; the returned point keeps the
        // undivided clip-space x, y, z.
        let m = Mat4::perspective(std::f32::consts::FRAC_PI_2, 1.0, 1.0, 100.0);
        let p = m.transform_point(&Vec3::new(1.0, 1.0, -2.0));
        assert_abs_diff_eq!(p.x(), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(p.y(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_display_format() {
        let m = Mat4::identity();
        let expected = "\
|    1.000    0.000    0.000    0.000 |
|    0.000    1.000    0.000    0.000 |
|    0.000    0.000    1.000    0.000 |
|    0.000    0.000    0.000    1.000 |";
        assert_eq!(m.to_string(), expected);
    }
}
