/// Camera with dirty-flag memoized view and projection matrices
use crate::matrix::Mat4;
use crate::vector::Vec3;
use std::f32::consts::PI;

/// Projection parameters for a [`Camera`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    Perspective {
        /// Full vertical field of view in radians.
        fov: f32,
        aspect: f32,
        near: f32,
        far: f32,
    },
    Orthographic {
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    },
}

/// A look-at camera.
///
/// The view and projection matrices are cached and recomputed only when
/// position, target, up, or the projection parameters change; the getters
/// take `&mut self` because a read may refresh the cache.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    position: Vec3,
    target: Vec3,
    up: Vec3,
    projection: Projection,

    view: Mat4,
    proj: Mat4,
    view_dirty: bool,
    proj_dirty: bool,
}

impl Camera {
    pub fn new(position: Vec3, target: Vec3, up: Vec3) -> Self {
        Self {
            position,
            target,
            up,
            projection: Projection::Perspective {
                fov: 45.0 * PI / 180.0,
                aspect: 16.0 / 9.0,
                near: 0.1,
                far: 100.0,
            },
            view: Mat4::identity(),
            proj: Mat4::identity(),
            view_dirty: true,
            proj_dirty: true,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.view_dirty = true;
    }

    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
        self.view_dirty = true;
    }

    pub fn set_up(&mut self, up: Vec3) {
        self.up = up;
        self.view_dirty = true;
    }

    /// Re-aims the camera at `target` without moving it.
    pub fn look_at(&mut self, target: Vec3) {
        self.set_target(target);
    }

    /// Moves the camera and its target together.
    pub fn translate(&mut self, offset: Vec3) {
        self.position = self.position + offset;
        self.target = self.target + offset;
        self.view_dirty = true;
    }

    /// Rotates the look direction by `yaw` about the world y axis, then by
    /// `pitch` about the camera's right axis. Angles in radians.
    pub fn rotate(&mut self, yaw: f32, pitch: f32) {
        let forward = (self.target - self.position).normalized();
        let right = forward.cross(&self.up).normalized();

        let forward = Mat4::rotation_y(yaw).transform_vector(&forward);
        let forward = Mat4::rotation(&right, pitch).transform_vector(&forward);

        self.target = self.position + forward;
        self.view_dirty = true;
    }

    pub fn set_perspective(&mut self, fov: f32, aspect: f32, near: f32, far: f32) {
        self.projection = Projection::Perspective {
            fov,
            aspect,
            near,
            far,
        };
        self.proj_dirty = true;
    }

    pub fn set_orthographic(
        &mut self,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) {
        self.projection = Projection::Orthographic {
            left,
            right,
            bottom,
            top,
            near,
            far,
        };
        self.proj_dirty = true;
    }

    /// Unit vector from the camera towards its target.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalized()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(&self.up).normalized()
    }

    pub fn view_matrix(&mut self) -> Mat4 {
        if self.view_dirty {
            self.view = Mat4::look_at(&self.position, &self.target, &self.up);
            self.view_dirty = false;
        }
        self.view
    }

    pub fn projection_matrix(&mut self) -> Mat4 {
        if self.proj_dirty {
            self.proj = match self.projection {
                Projection::Perspective {
                    fov,
                    aspect,
                    near,
                    far,
                } => Mat4::perspective(fov, aspect, near, far),
                Projection::Orthographic {
                    left,
                    right,
                    bottom,
                    top,
                    near,
                    far,
                } => Mat4::orthographic(left, right, bottom, top, near, far),
            };
            self.proj_dirty = false;
        }
        self.proj
    }

    /// Projection composed with view.
    pub fn view_projection_matrix(&mut self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Projects a world-space point through the model-view-projection
    /// transform to screen coordinates plus depth.
    ///
    /// [`Mat4::transform_point`] leaves the perspective divide to the
    /// caller, so the clip w (row 3 of the MVP applied to the point) is
    /// recomputed and divided out here. Returns `None` for points behind
    /// the camera or outside the [-1, 1] NDC square.
    pub fn project_to_screen(
        &mut self,
        point: &Vec3,
        model: &Mat4,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let mvp = self.view_projection_matrix() * *model;
        let clip = mvp.transform_point(point);

        let bottom = mvp.row(3);
        let w = bottom[0] * point.x() + bottom[1] * point.y() + bottom[2] * point.z() + bottom[3];
        if w.abs() < 1e-6 {
            return None;
        }

        let ndc_x = clip.x() / w;
        let ndc_y = clip.y() / w;
        let ndc_z = clip.z() / w;

        if !(-1.0..=1.0).contains(&ndc_x) || !(-1.0..=1.0).contains(&ndc_y) || w < 0.0 {
            return None;
        }

        let screen_x = (ndc_x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc_y) * 0.5 * height as f32;

        Some((screen_x, screen_y, ndc_z))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 5.0), Vec3::zero(), Vec3::up())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_view_matrix_is_cached() {
        let mut camera = Camera::default();
        let first = camera.view_matrix();
        assert!(!camera.view_dirty);
        assert_eq!(camera.view_matrix(), first);
    }

    #[test]
    fn test_set_position_invalidates_view() {
        let mut camera = Camera::default();
        let before = camera.view_matrix();
        camera.set_position(Vec3::new(0.0, 0.0, 10.0));
        assert!(camera.view_dirty);
        let after = camera.view_matrix();
        assert_ne!(before, after);
        assert_abs_diff_eq!(after.at(2, 3), -10.0, epsilon = 1e-6);
    }

    #[test]
    fn test_set_perspective_invalidates_projection() {
        let mut camera = Camera::default();
        let before = camera.projection_matrix();
        camera.set_perspective(FRAC_PI_2, 1.0, 1.0, 100.0);
        let after = camera.projection_matrix();
        assert_ne!(before, after);
        assert_abs_diff_eq!(after.at(0, 0), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_view_recovers_eye() {
        let mut camera = Camera::default();
        let recovered = camera.view_matrix().inverse().transform_point(&Vec3::zero());
        assert_abs_diff_eq!(recovered, camera.position(), epsilon = 1e-4);
    }

    #[test]
    fn test_translate_moves_position_and_target() {
        let mut camera = Camera::default();
        camera.translate(Vec3::new(1.0, 2.0, 0.0));
        assert_abs_diff_eq!(camera.position(), Vec3::new(1.0, 2.0, 5.0));
        assert_abs_diff_eq!(camera.target(), Vec3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn test_rotate_keeps_position() {
        let mut camera = Camera::default();
        camera.rotate(0.3, 0.1);
        assert_abs_diff_eq!(camera.position(), Vec3::new(0.0, 0.0, 5.0));
        assert_abs_diff_eq!(camera.forward().length(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_project_target_lands_at_screen_center() {
        let mut camera = Camera::default();
        camera.set_perspective(FRAC_PI_2, 1.0, 0.1, 100.0);
        let (x, y, _depth) = camera
            .project_to_screen(&Vec3::zero(), &Mat4::identity(), 200, 100)
            .unwrap();
        assert_abs_diff_eq!(x, 100.0, epsilon = 1e-3);
        assert_abs_diff_eq!(y, 50.0, epsilon = 1e-3);
    }

    #[test]
    fn test_project_point_behind_camera_is_clipped() {
        let mut camera = Camera::default();
        camera.set_perspective(FRAC_PI_2, 1.0, 0.1, 100.0);
        let behind = Vec3::new(0.0, 0.0, 10.0);
        assert!(camera
            .project_to_screen(&behind, &Mat4::identity(), 200, 100)
            .is_none());
    }

    #[test]
    fn test_view_projection_composition_order() {
        let mut camera = Camera::default();
        let expected = camera.projection_matrix() * camera.view_matrix();
        assert_eq!(camera.view_projection_matrix(), expected);
    }
}
