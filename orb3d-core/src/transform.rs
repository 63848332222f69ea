/// Transform factories: translation, rotation, scale, view, projection
use crate::matrix::Mat4;
use crate::vector::Vec3;

/// All angles are in radians. Every factory returns a row-major matrix;
/// see [`Mat4`] for the row/column boundary contract.
impl Mat4 {
    pub fn translation(t: &Vec3) -> Self {
        let mut m = Self::identity();
        m.set(0, 3, t.x());
        m.set(1, 3, t.y());
        m.set(2, 3, t.z());
        m
    }

    /// Right-handed rotation about the x axis.
    pub fn rotation_x(angle: f32) -> Self {
        let (sin_a, cos_a) = angle.sin_cos();
        let mut m = Self::identity();
        m.set(1, 1, cos_a);
        m.set(1, 2, -sin_a);
        m.set(2, 1, sin_a);
        m.set(2, 2, cos_a);
        m
    }

    /// Right-handed rotation about the y axis.
    pub fn rotation_y(angle: f32) -> Self {
        let (sin_a, cos_a) = angle.sin_cos();
        let mut m = Self::identity();
        m.set(0, 0, cos_a);
        m.set(0, 2, sin_a);
        m.set(2, 0, -sin_a);
        m.set(2, 2, cos_a);
        m
    }

    /// Right-handed rotation about the z axis.
    pub fn rotation_z(angle: f32) -> Self {
        let (sin_a, cos_a) = angle.sin_cos();
        let mut m = Self::identity();
        m.set(0, 0, cos_a);
        m.set(0, 1, -sin_a);
        m.set(1, 0, sin_a);
        m.set(1, 1, cos_a);
        m
    }

    /// Rotation about an arbitrary axis via Rodrigues' formula.
    ///
    /// The axis is normalized internally, so a non-unit axis yields a
    /// silently corrected rotation rather than an error.
    pub fn rotation(axis: &Vec3, angle: f32) -> Self {
        let axis = axis.normalized();
        let (sin_a, cos_a) = angle.sin_cos();
        let k = 1.0 - cos_a;
        let (x, y, z) = (axis.x(), axis.y(), axis.z());

        let mut m = Self::identity();
        m.set(0, 0, cos_a + x * x * k);
        m.set(0, 1, x * y * k - z * sin_a);
        m.set(0, 2, x * z * k + y * sin_a);
        m.set(1, 0, y * x * k + z * sin_a);
        m.set(1, 1, cos_a + y * y * k);
        m.set(1, 2, y * z * k - x * sin_a);
        m.set(2, 0, z * x * k - y * sin_a);
        m.set(2, 1, z * y * k + x * sin_a);
        m.set(2, 2, cos_a + z * z * k);
        m
    }

    pub fn scaling(scale: &Vec3) -> Self {
        let mut m = Self::identity();
        m.set(0, 0, scale.x());
        m.set(1, 1, scale.y());
        m.set(2, 2, scale.z());
        m
    }

    pub fn scaling_uniform(scale: f32) -> Self {
        Self::scaling(&Vec3::new(scale, scale, scale))
    }

    /// Right-handed perspective projection mapping depth to [-1, 1] NDC.
    ///
    /// `fov` is the full vertical field of view in radians.
    pub fn perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let tan_half_fov = (fov * 0.5).tan();
        let mut m = Self::zero();
        m.set(0, 0, 1.0 / (aspect * tan_half_fov));
        m.set(1, 1, 1.0 / tan_half_fov);
        m.set(2, 2, -(far + near) / (far - near));
        m.set(2, 3, -(2.0 * far * near) / (far - near));
        m.set(3, 2, -1.0);
        m
    }

    /// Orthographic box-to-NDC projection.
    pub fn orthographic(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let mut m = Self::zero();
        m.set(0, 0, 2.0 / (right - left));
        m.set(1, 1, 2.0 / (top - bottom));
        m.set(2, 2, -2.0 / (far - near));
        m.set(0, 3, -(right + left) / (right - left));
        m.set(1, 3, -(top + bottom) / (top - bottom));
        m.set(2, 3, -(far + near) / (far - near));
        m.set(3, 3, 1.0);
        m
    }

    /// Classic gluLookAt view matrix.
    ///
    /// Rotation rows are the camera basis (row0 = side, row1 = up,
    /// row2 = -forward); the translation column moves the world so the
    /// camera sits at the origin. Column-major consumers transpose the
    /// result themselves.
    pub fn look_at(eye: &Vec3, center: &Vec3, up: &Vec3) -> Self {
        let f = (*center - *eye).normalized();
        let s = f.cross(up).normalized();
        let u = s.cross(&f);

        let mut m = Self::identity();
        m.set(0, 0, s.x());
        m.set(0, 1, s.y());
        m.set(0, 2, s.z());
        m.set(1, 0, u.x());
        m.set(1, 1, u.y());
        m.set(1, 2, u.z());
        m.set(2, 0, -f.x());
        m.set(2, 1, -f.y());
        m.set(2, 2, -f.z());
        m.set(0, 3, -s.dot(eye));
        m.set(1, 3, -u.dot(eye));
        m.set(2, 3, f.dot(eye));
        m
    }
}
