//! Position and orientation handed back to the host.

use bytemuck::{Pod, Zeroable};
use glam::{Quat, Vec3};

/// Resulting placement of an agent after a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        orientation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self { position, orientation }
    }

    /// Unit vector the transform faces.
    pub fn forward(&self) -> Vec3 {
        self.orientation * crate::math::FORWARD
    }

    pub fn to_raw(&self) -> TransformRaw {
        TransformRaw {
            position: self.position.to_array(),
            _pad: 0.0,
            orientation: self.orientation.to_array(),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Plain-old-data transform for uploading straight into host buffers.
///
/// Laid out as `vec3 position` padded to 16 bytes, then `vec4 orientation`
/// (`x, y, z, w`), 32 bytes per agent.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct TransformRaw {
    pub position: [f32; 3],
    pub _pad: f32,
    pub orientation: [f32; 4],
}

impl From<TransformRaw> for Transform {
    fn from(raw: TransformRaw) -> Self {
        Self {
            position: Vec3::from_array(raw.position),
            orientation: Quat::from_array(raw.orientation),
        }
    }
}
