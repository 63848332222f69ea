/// Linear solver: determinant, invertibility test, Gauss-Jordan inverse
use crate::matrix::Mat4;

/// Pivot magnitudes below this are treated as singular during elimination.
const PIVOT_EPSILON: f32 = 1e-10;

impl Mat4 {
    /// Determinant by Laplace cofactor expansion along row 0.
    ///
    /// Each 3x3 minor is evaluated directly; the size is fixed, so there
    /// is no recursion.
    pub fn determinant(&self) -> f32 {
        let mut det = 0.0;
        for col in 0..4 {
            let mut minor = [0.0f32; 9];
            let mut idx = 0;
            for i in 1..4 {
                for j in 0..4 {
                    if j != col {
                        minor[idx] = self.at(i, j);
                        idx += 1;
                    }
                }
            }

            let det3 = minor[0] * (minor[4] * minor[8] - minor[5] * minor[7])
                - minor[1] * (minor[3] * minor[8] - minor[5] * minor[6])
                + minor[2] * (minor[3] * minor[7] - minor[4] * minor[6]);

            let sign = if col % 2 == 0 { 1.0 } else { -1.0 };
            det += self.at(0, col) * sign * det3;
        }
        det
    }

    pub fn is_invertible(&self, epsilon: f32) -> bool {
        self.determinant().abs() > epsilon
    }

    /// Inverse by Gauss-Jordan elimination on the augmented [A | I] matrix
    /// with partial pivoting.
    ///
    /// If any elimination step finds no pivot of magnitude at least 1e-10,
    /// the matrix is treated as singular and the identity is returned;
    /// this method never signals failure. Callers that must distinguish a
    /// truly invertible matrix check [`Mat4::is_invertible`] or
    /// [`Mat4::determinant`] first.
    pub fn inverse(&self) -> Self {
        let mut aug = [[0.0f32; 8]; 4];
        for i in 0..4 {
            for j in 0..4 {
                aug[i][j] = self.at(i, j);
                aug[i][j + 4] = if i == j { 1.0 } else { 0.0 };
            }
        }

        for i in 0..4 {
            // Partial pivoting: pick the largest-magnitude entry in the
            // remaining rows of column i.
            let mut pivot_row = i;
            let mut max_val = aug[i][i].abs();
            for k in (i + 1)..4 {
                let val = aug[k][i].abs();
                if val > max_val {
                    max_val = val;
                    pivot_row = k;
                }
            }

            if max_val < PIVOT_EPSILON {
                return Self::identity();
            }

            if pivot_row != i {
                aug.swap(i, pivot_row);
            }

            // Scale the pivot row so the pivot entry becomes 1
            let inv_pivot = 1.0 / aug[i][i];
            for value in &mut aug[i] {
                *value *= inv_pivot;
            }

            // Eliminate column i from every other row
            for k in 0..4 {
                if k == i {
                    continue;
                }
                let factor = aug[k][i];
                for j in 0..8 {
                    aug[k][j] -= factor * aug[i][j];
                }
            }
        }

        let mut result = Self::zero();
        for i in 0..4 {
            for j in 0..4 {
                result.set(i, j, aug[i][j + 4]);
            }
        }
        result
    }
}
