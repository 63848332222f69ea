/// Best-effort decomposition of a composed transform matrix
use crate::matrix::Mat4;
use crate::vector::Vec3;

/// Translation, XYZ Euler rotation (radians), and scale recovered from a
/// composed matrix by [`Mat4::decompose`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decomposed {
    pub translation: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Mat4 {
    /// Recovers translation, scale, and XYZ Euler rotation.
    ///
    /// Best effort: a negative determinant negates the whole scale vector,
    /// since a reflection cannot be attributed to a single axis
    /// unambiguously. The Euler extraction is not robust near +/-90
    /// degrees of pitch (gimbal lock).
    pub fn decompose(&self) -> Decomposed {
        let translation = Vec3::new(self.at(0, 3), self.at(1, 3), self.at(2, 3));

        let col = |j: usize| Vec3::new(self.at(0, j), self.at(1, j), self.at(2, j));
        let mut scale = Vec3::new(col(0).length(), col(1).length(), col(2).length());
        if self.determinant() < 0.0 {
            scale = -scale;
        }

        // Remove scale from the 3x3 block, one column at a time; an exactly
        // zero scale component leaves its column untouched.
        let mut r = *self;
        for (j, s) in [scale.x(), scale.y(), scale.z()].into_iter().enumerate() {
            if s != 0.0 {
                for i in 0..3 {
                    r.set(i, j, r.at(i, j) / s);
                }
            }
        }

        // XYZ-convention Euler angles from the normalized rotation block
        let rotation = Vec3::new(
            r.at(2, 1).atan2(r.at(2, 2)),
            (-r.at(2, 0)).atan2((r.at(2, 1) * r.at(2, 1) + r.at(2, 2) * r.at(2, 2)).sqrt()),
            r.at(1, 0).atan2(r.at(0, 0)),
        );

        Decomposed {
            translation,
            rotation,
            scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_decompose_translation_only() {
        let d = Mat4::translation(&Vec3::new(1.0, 2.0, 3.0)).decompose();
        assert_abs_diff_eq!(d.translation, Vec3::new(1.0, 2.0, 3.0));
        assert_abs_diff_eq!(d.scale, Vec3::one());
        assert_abs_diff_eq!(d.rotation, Vec3::zero());
    }

    #[test]
    fn test_decompose_composed_transform() {
        let translation = Vec3::new(-1.0, 4.0, 2.0);
        let angles = Vec3::new(0.3, 0.4, -0.2);
        let scale = Vec3::new(2.0, 3.0, 0.5);

        // XYZ convention composes as Rz * Ry * Rx
        let m = Mat4::translation(&translation)
            * Mat4::rotation_z(angles.z())
            * Mat4::rotation_y(angles.y())
            * Mat4::rotation_x(angles.x())
            * Mat4::scaling(&scale);

        let d = m.decompose();
        assert_abs_diff_eq!(d.translation, translation, epsilon = 1e-5);
        assert_abs_diff_eq!(d.scale, scale, epsilon = 1e-5);
        assert_abs_diff_eq!(d.rotation, angles, epsilon = 1e-5);
    }

    #[test]
    fn test_decompose_reflection_negates_scale() {
        let d = Mat4::scaling(&Vec3::new(-1.0, 1.0, 1.0)).decompose();
        // The sign spreads over the whole scale vector by contract
        assert_abs_diff_eq!(d.scale, Vec3::new(-1.0, -1.0, -1.0));
    }

    #[test]
    fn test_decompose_zero_scale_column_is_skipped() {
        let d = Mat4::scaling(&Vec3::new(2.0, 0.0, 1.0)).decompose();
        assert_abs_diff_eq!(d.scale, Vec3::new(2.0, 0.0, 1.0));
        // No NaN leaks out of the skipped division
        assert!(!d.rotation.x().is_nan());
        assert!(!d.rotation.y().is_nan());
        assert!(!d.rotation.z().is_nan());
    }
}
