//! Spatial types

use serde::{Deserialize, Serialize};

/// Column-major 4x4 matrix, the layout instance records carry
pub type Mat4 = [[f32; 4]; 4];

pub const MAT4_IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// A 3D vector
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Position, Euler rotation (degrees) and scale of a crowd entity.
///
/// The animation layer treats this as opaque: it only converts it to the
/// matrix stored alongside the entity's frame samples.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    /// Rotation in degrees (pitch, yaw, roll)
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Column-major TRS matrix, rotation applied in ZYX order
    pub fn to_matrix(&self) -> Mat4 {
        let (sx, cx) = self.rotation.x.to_radians().sin_cos();
        let (sy, cy) = self.rotation.y.to_radians().sin_cos();
        let (sz, cz) = self.rotation.z.to_radians().sin_cos();

        // Rotation basis columns
        let x_axis = [cy * cz, cy * sz, -sy];
        let y_axis = [sx * sy * cz - cx * sz, sx * sy * sz + cx * cz, sx * cy];
        let z_axis = [cx * sy * cz + sx * sz, cx * sy * sz - sx * cz, cx * cy];

        let s = self.scale;
        [
            [x_axis[0] * s.x, x_axis[1] * s.x, x_axis[2] * s.x, 0.0],
            [y_axis[0] * s.y, y_axis[1] * s.y, y_axis[2] * s.y, 0.0],
            [z_axis[0] * s.z, z_axis[1] * s.z, z_axis[2] * s.z, 0.0],
            [self.position.x, self.position.y, self.position.z, 1.0],
        ]
    }
}
