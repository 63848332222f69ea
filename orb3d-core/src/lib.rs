/// ORB3D Core Library - Math kernel and camera for 3D rendering
///
/// This library provides the stateless core for 3D rendering: a packed
/// 4-lane vector and row-major 4x4 matrix kernel, transform factories,
/// a small linear solver, matrix decomposition, a memoizing camera, and
/// mesh geometry primitives.

pub mod camera;
pub mod decompose;
pub mod geometry;
pub mod matrix;
pub mod solve;
pub mod transform;
pub mod vector;

// Re-export commonly used types
pub use camera::{Camera, Projection};
pub use decompose::Decomposed;
pub use geometry::{Mesh, Triangle, Vertex};
pub use matrix::Mat4;
pub use vector::Vec3;
