/// Packed 3-component vector with a reserved fourth lane
use approx::{AbsDiffEq, RelativeEq};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// A 3D vector stored as four packed f32 lanes.
///
/// The fourth lane is padding for 16-byte alignment and is always exactly
/// zero after every constructor and operator; it is never observable.
/// Treating a vector as a homogeneous point (w = 1) is done per-operation
/// by [`crate::Mat4::transform_point`], never stored here.
#[repr(C, align(16))]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vec3 {
    lanes: [f32; 4],
}

impl Vec3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            lanes: [x, y, z, 0.0],
        }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn one() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    pub fn up() -> Self {
        Self::new(0.0, 1.0, 0.0)
    }

    pub fn right() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    pub fn forward() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    pub fn x(&self) -> f32 {
        self.lanes[0]
    }

    pub fn y(&self) -> f32 {
        self.lanes[1]
    }

    pub fn z(&self) -> f32 {
        self.lanes[2]
    }

    pub fn set_x(&mut self, x: f32) {
        self.lanes[0] = x;
    }

    pub fn set_y(&mut self, y: f32) {
        self.lanes[1] = y;
    }

    pub fn set_z(&mut self, z: f32) {
        self.lanes[2] = z;
    }

    /// Dot product. The padding lane is always zero, so folding all four
    /// lanes into the reduction is safe.
    pub fn dot(&self, other: &Self) -> f32 {
        self.lanes[0] * other.lanes[0]
            + self.lanes[1] * other.lanes[1]
            + self.lanes[2] * other.lanes[2]
            + self.lanes[3] * other.lanes[3]
    }

    /// Right-handed cross product.
    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y() * other.z() - self.z() * other.y(),
            self.z() * other.x() - self.x() * other.z(),
            self.x() * other.y() - self.y() * other.x(),
        )
    }

    pub fn length_squared(&self) -> f32 {
        self.dot(self)
    }

    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Returns the unit vector pointing in the same direction, or the zero
    /// vector when the length is at most 1e-8.
    pub fn normalized(&self) -> Self {
        let len = self.length();
        if len > 1e-8 {
            *self * (1.0 / len)
        } else {
            Self::zero()
        }
    }

    /// In-place variant of [`Vec3::normalized`].
    pub fn normalize(&mut self) {
        *self = self.normalized();
    }
}

impl Default for Vec3 {
    fn default() -> Self {
        Self::zero()
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            lanes: [
                self.lanes[0] + other.lanes[0],
                self.lanes[1] + other.lanes[1],
                self.lanes[2] + other.lanes[2],
                0.0,
            ],
        }
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            lanes: [
                self.lanes[0] - other.lanes[0],
                self.lanes[1] - other.lanes[1],
                self.lanes[2] - other.lanes[2],
                0.0,
            ],
        }
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            lanes: [
                self.lanes[0] * scalar,
                self.lanes[1] * scalar,
                self.lanes[2] * scalar,
                0.0,
            ],
        }
    }
}

impl Mul<Vec3> for f32 {
    type Output = Vec3;

    fn mul(self, vec: Vec3) -> Vec3 {
        vec * self
    }
}

/// Elementwise product.
impl Mul for Vec3 {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        Self {
            lanes: [
                self.lanes[0] * other.lanes[0],
                self.lanes[1] * other.lanes[1],
                self.lanes[2] * other.lanes[2],
                0.0,
            ],
        }
    }
}

impl Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self {
        self * -1.0
    }
}

impl AbsDiffEq for Vec3 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.x().abs_diff_eq(&other.x(), epsilon)
            && self.y().abs_diff_eq(&other.y(), epsilon)
            && self.z().abs_diff_eq(&other.z(), epsilon)
    }
}

impl RelativeEq for Vec3 {
    fn default_max_relative() -> f32 {
        f32::EPSILON
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.x().relative_eq(&other.x(), epsilon, max_relative)
            && self.y().relative_eq(&other.y(), epsilon, max_relative)
            && self.z().relative_eq(&other.z(), epsilon, max_relative)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x(), self.y(), self.z())
    }
}
