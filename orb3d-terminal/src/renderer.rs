/// ASCII rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use orb3d_core::{Camera, Mat4, Mesh, Triangle, Vec3};
use std::io::Write;

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// ASCII renderer that converts 3D meshes to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
        }
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.char_buffer.fill(' ');
    }

    pub fn render_mesh(&mut self, mesh: &Mesh, model: &Mat4, camera: &mut Camera) {
        for triangle in mesh.triangles() {
            self.render_triangle(&triangle, model, camera);
        }
    }

    fn render_triangle(&mut self, triangle: &Triangle, model: &Mat4, camera: &mut Camera) {
        let mut screen_coords = [(0.0f32, 0.0f32, 0.0f32); 3];
        for (coord, vertex) in screen_coords.iter_mut().zip(&triangle.vertices) {
            match camera.project_to_screen(
                &vertex.position,
                model,
                self.width as u32,
                self.height as u32,
            ) {
                Some(projected) => *coord = projected,
                None => return, // Triangle is clipped
            }
        }

        // Shade by the world-space face normal against a fixed light
        let normal = model.transform_vector(&triangle.face_normal());
        let light_dir = (camera.position() - camera.target()).normalized();
        let brightness = normal.dot(&light_dir).max(0.0);

        let char_index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32) as usize;
        let character = LUMINOSITY_RAMP[char_index.min(LUMINOSITY_RAMP.len() - 1)];

        self.rasterize_triangle(&screen_coords, character);
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32); 3], character: char) {
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        // Bounding box clipped to screen bounds
        let min_x = (v0.0.min(v1.0).min(v2.0).floor() as i32).max(0);
        let max_x = (v0.0.max(v1.0).max(v2.0).ceil() as i32).min(self.width as i32 - 1);
        let min_y = (v0.1.min(v1.1).min(v2.1).floor() as i32).max(0);
        let max_y = (v0.1.max(v1.1).max(v2.1).ceil() as i32).min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                if let Some((w0, w1, w2)) =
                    barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py))
                {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;

                        let idx = y as usize * self.width + x as usize;
                        if depth < self.depth_buffer[idx] {
                            self.depth_buffer[idx] = depth;
                            self.char_buffer[idx] = character;
                        }
                    }
                }
            }
        }
    }

    /// Overlays a world-space line, depth-tested against rendered meshes.
    pub fn render_line(&mut self, from: &Vec3, to: &Vec3, camera: &mut Camera, character: char) {
        let identity = Mat4::identity();
        let a = camera.project_to_screen(from, &identity, self.width as u32, self.height as u32);
        let b = camera.project_to_screen(to, &identity, self.width as u32, self.height as u32);
        let (Some(a), Some(b)) = (a, b) else {
            return;
        };

        let steps = ((b.0 - a.0).abs().max((b.1 - a.1).abs()).ceil() as usize).max(1);
        for step in 0..=steps {
            let t = step as f32 / steps as f32;
            let x = a.0 + (b.0 - a.0) * t;
            let y = a.1 + (b.1 - a.1) * t;
            let depth = a.2 + (b.2 - a.2) * t;

            if x < 0.0 || y < 0.0 || x >= self.width as f32 || y >= self.height as f32 {
                continue;
            }
            let idx = y as usize * self.width + x as usize;
            if depth < self.depth_buffer[idx] {
                self.depth_buffer[idx] = depth;
                self.char_buffer[idx] = character;
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let c = self.char_buffer[y * self.width + x];

                // Color based on character intensity
                let color = match c {
                    ' ' | '.' | ':' => Color::DarkGrey,
                    '-' | '=' => Color::Grey,
                    '+' | '*' => Color::White,
                    '#' | '%' | '@' => Color::Cyan,
                    _ => Color::White,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            writer.queue(Print('\n'))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use orb3d_core::Vec3;

    fn test_camera() -> Camera {
        let mut camera = Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::zero(), Vec3::up());
        camera.set_perspective(std::f32::consts::FRAC_PI_2, 1.0, 0.1, 100.0);
        camera
    }

    #[test]
    fn test_barycentric_inside() {
        let (w0, w1, w2) =
            barycentric((0.0, 0.0), (10.0, 0.0), (0.0, 10.0), (2.0, 2.0)).unwrap();
        assert!(w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0);
        assert!((w0 + w1 + w2 - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_barycentric_degenerate_triangle() {
        assert!(barycentric((0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (1.0, 1.0)).is_none());
    }

    #[test]
    fn test_render_mesh_fills_center() {
        let mut renderer = AsciiRenderer::new(40, 40);
        let mut camera = test_camera();
        renderer.render_mesh(&Mesh::cube(2.0), &Mat4::identity(), &mut camera);

        let center = renderer.char_buffer[20 * 40 + 20];
        assert_ne!(center, ' ');
    }

    #[test]
    fn test_depth_buffer_keeps_nearer_fragment() {
        let mut renderer = AsciiRenderer::new(10, 10);
        renderer.depth_buffer[0] = 0.5;
        renderer.char_buffer[0] = 'a';

        // Farther fragment loses
        renderer.rasterize_triangle(&[(0.0, 0.0, 0.9), (2.0, 0.0, 0.9), (0.0, 2.0, 0.9)], 'b');
        assert_eq!(renderer.char_buffer[0], 'a');

        // Nearer fragment wins
        renderer.rasterize_triangle(&[(0.0, 0.0, 0.1), (2.0, 0.0, 0.1), (0.0, 2.0, 0.1)], 'c');
        assert_eq!(renderer.char_buffer[0], 'c');
    }

    #[test]
    fn test_clear_resets_buffers() {
        let mut renderer = AsciiRenderer::new(4, 4);
        renderer.char_buffer[5] = '@';
        renderer.depth_buffer[5] = 0.0;
        renderer.clear();
        assert!(renderer.char_buffer.iter().all(|&c| c == ' '));
        assert!(renderer.depth_buffer.iter().all(|&d| d == f32::INFINITY));
    }
}
