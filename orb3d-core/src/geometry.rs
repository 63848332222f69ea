/// Geometry primitives and procedural meshes for 3D rendering
use crate::vector::Vec3;
use std::f32::consts::PI;

/// A 3D vertex with position and normal.
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self { position, normal }
    }
}

/// A triangle face borrowed out of a [`Mesh`].
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Face normal from the winding order of the triangle's vertices.
    pub fn face_normal(&self) -> Vec3 {
        let edge1 = self.vertices[1].position - self.vertices[0].position;
        let edge2 = self.vertices[2].position - self.vertices[0].position;
        edge1.cross(&edge2).normalized()
    }
}

/// An indexed triangle mesh.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, vertex: Vertex) {
        self.vertices.push(vertex);
    }

    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.extend_from_slice(&[i0, i1, i2]);
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterates the mesh's faces as resolved [`Triangle`]s.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.indices.chunks_exact(3).map(|chunk| {
            Triangle::new(
                self.vertices[chunk[0] as usize],
                self.vertices[chunk[1] as usize],
                self.vertices[chunk[2] as usize],
            )
        })
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    /// Axis-aligned cube centered at the origin, 4 vertices per face so
    /// normals stay flat.
    pub fn cube(size: f32) -> Self {
        let half = size * 0.5;
        let corners = [
            Vec3::new(-half, -half, -half),
            Vec3::new(half, -half, -half),
            Vec3::new(half, half, -half),
            Vec3::new(-half, half, -half),
            Vec3::new(-half, -half, half),
            Vec3::new(half, -half, half),
            Vec3::new(half, half, half),
            Vec3::new(-half, half, half),
        ];

        // (outward normal, corner indices in CCW order seen from outside)
        let faces: [(Vec3, [usize; 4]); 6] = [
            (Vec3::new(0.0, 0.0, -1.0), [0, 3, 2, 1]),
            (Vec3::new(0.0, 0.0, 1.0), [4, 5, 6, 7]),
            (Vec3::new(-1.0, 0.0, 0.0), [0, 4, 7, 3]),
            (Vec3::new(1.0, 0.0, 0.0), [1, 2, 6, 5]),
            (Vec3::new(0.0, -1.0, 0.0), [0, 1, 5, 4]),
            (Vec3::new(0.0, 1.0, 0.0), [3, 7, 6, 2]),
        ];

        let mut mesh = Self::new();
        for (normal, corner_ids) in faces {
            let base = mesh.vertex_count() as u32;
            for id in corner_ids {
                mesh.add_vertex(Vertex::new(corners[id], normal));
            }
            mesh.add_triangle(base, base + 1, base + 2);
            mesh.add_triangle(base, base + 2, base + 3);
        }
        mesh
    }

    /// UV sphere centered at the origin with `segments` latitude rings and
    /// `2 * segments` points per ring.
    pub fn sphere(radius: f32, segments: u32) -> Self {
        debug_assert!(segments >= 2, "sphere needs at least 2 segments");
        let mut mesh = Self::new();

        mesh.add_vertex(Vertex::new(Vec3::new(0.0, radius, 0.0), Vec3::up()));

        let points_per_ring = segments * 2;
        for lat in 1..segments {
            let theta = lat as f32 * PI / segments as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();

            for lon in 0..points_per_ring {
                let phi = lon as f32 * 2.0 * PI / points_per_ring as f32;
                let (sin_phi, cos_phi) = phi.sin_cos();

                let position = Vec3::new(
                    radius * sin_theta * cos_phi,
                    radius * cos_theta,
                    radius * sin_theta * sin_phi,
                );
                mesh.add_vertex(Vertex::new(position, position.normalized()));
            }
        }

        mesh.add_vertex(Vertex::new(Vec3::new(0.0, -radius, 0.0), -Vec3::up()));

        // Top cap
        for i in 0..points_per_ring {
            let next = (i + 1) % points_per_ring;
            mesh.add_triangle(0, i + 1, next + 1);
        }

        // Quads between adjacent rings
        let rings = segments - 1;
        for ring in 0..rings - 1 {
            let current = 1 + ring * points_per_ring;
            let below = 1 + (ring + 1) * points_per_ring;
            for i in 0..points_per_ring {
                let next = (i + 1) % points_per_ring;
                mesh.add_triangle(current + i, below + i, current + next);
                mesh.add_triangle(current + next, below + i, below + next);
            }
        }

        // Bottom cap
        let last_ring = 1 + (rings - 1) * points_per_ring;
        let bottom = mesh.vertex_count() as u32 - 1;
        for i in 0..points_per_ring {
            let next = (i + 1) % points_per_ring;
            mesh.add_triangle(last_ring + next, last_ring + i, bottom);
        }

        mesh
    }

    /// Flat quad in the xz plane facing +y.
    pub fn plane(width: f32, depth: f32) -> Self {
        let (hw, hd) = (width * 0.5, depth * 0.5);
        let mut mesh = Self::new();
        mesh.add_vertex(Vertex::new(Vec3::new(-hw, 0.0, -hd), Vec3::up()));
        mesh.add_vertex(Vertex::new(Vec3::new(hw, 0.0, -hd), Vec3::up()));
        mesh.add_vertex(Vertex::new(Vec3::new(hw, 0.0, hd), Vec3::up()));
        mesh.add_vertex(Vertex::new(Vec3::new(-hw, 0.0, hd), Vec3::up()));
        mesh.add_triangle(0, 1, 2);
        mesh.add_triangle(0, 2, 3);
        mesh
    }

    /// Single triangle in the xz plane facing +y.
    pub fn triangle(size: f32) -> Self {
        let half = size * 0.5;
        let mut mesh = Self::new();
        mesh.add_vertex(Vertex::new(Vec3::new(0.0, 0.0, half), Vec3::up()));
        mesh.add_vertex(Vertex::new(Vec3::new(-half, 0.0, -half), Vec3::up()));
        mesh.add_vertex(Vertex::new(Vec3::new(half, 0.0, -half), Vec3::up()));
        mesh.add_triangle(0, 1, 2);
        mesh
    }

    /// Recomputes smooth vertex normals by averaging face normals over the
    /// shared vertices.
    pub fn calculate_normals(&mut self) {
        for vertex in &mut self.vertices {
            vertex.normal = Vec3::zero();
        }

        for chunk in self.indices.chunks_exact(3) {
            let [i0, i1, i2] = [chunk[0] as usize, chunk[1] as usize, chunk[2] as usize];
            let edge1 = self.vertices[i1].position - self.vertices[i0].position;
            let edge2 = self.vertices[i2].position - self.vertices[i0].position;
            let normal = edge1.cross(&edge2).normalized();

            for i in [i0, i1, i2] {
                self.vertices[i].normal = self.vertices[i].normal + normal;
            }
        }

        for vertex in &mut self.vertices {
            vertex.normal.normalize();
        }
    }
}
