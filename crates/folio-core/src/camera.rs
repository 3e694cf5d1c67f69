//! Scroll-synchronized camera rig.
//!
//! The camera never moves directly: section changes retarget it, and every
//! frame eases position and rotation toward the target by a fixed fraction,
//! which reads as a slow cinematic drift rather than a snap.

use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};

use crate::constants::{CAMERA_EASE, CAMERA_FOV_Y, CAMERA_ZFAR, CAMERA_ZNEAR};

/// Camera pose for one page section. Configuration data, not computed.
#[derive(Clone, Copy, Debug)]
pub struct CameraPreset {
    pub position: Vec3,
    /// Euler rotation; only x and y are used.
    pub rotation: Vec2,
}

/// One preset per page section, in section order: hero, about, experience,
/// tech, contact. Section indices beyond this table are clamped to the last
/// entry.
pub const CAMERA_PRESETS: [CameraPreset; 5] = [
    CameraPreset {
        position: Vec3::new(0.0, 0.0, 1.0),
        rotation: Vec2::new(0.0, 0.0),
    },
    CameraPreset {
        position: Vec3::new(0.3, -0.2, 0.8),
        rotation: Vec2::new(0.1, 0.3),
    },
    CameraPreset {
        position: Vec3::new(-0.2, 0.3, 0.9),
        rotation: Vec2::new(-0.1, -0.2),
    },
    CameraPreset {
        position: Vec3::new(0.2, 0.1, 0.7),
        rotation: Vec2::new(0.05, 0.15),
    },
    CameraPreset {
        position: Vec3::new(-0.3, -0.1, 0.85),
        rotation: Vec2::new(-0.05, -0.25),
    },
];

#[derive(Clone, Debug)]
pub struct CameraRig {
    pub position: Vec3,
    pub rotation: Vec3,
    target_position: Vec3,
    target_rotation: Vec3,
}

impl CameraRig {
    /// Starts exactly at preset 0; the only discontinuity allowed.
    pub fn new() -> Self {
        let first = &CAMERA_PRESETS[0];
        let rotation = Vec3::new(first.rotation.x, first.rotation.y, 0.0);
        Self {
            position: first.position,
            rotation,
            target_position: first.position,
            target_rotation: rotation,
        }
    }

    pub fn retarget(&mut self, preset_index: usize) {
        let preset = &CAMERA_PRESETS[preset_index.min(CAMERA_PRESETS.len() - 1)];
        self.target_position = preset.position;
        self.target_rotation = Vec3::new(preset.rotation.x, preset.rotation.y, 0.0);
    }

    /// One frame of fractional approach, componentwise.
    pub fn step(&mut self) {
        self.position += (self.target_position - self.position) * CAMERA_EASE;
        self.rotation += (self.target_rotation - self.rotation) * CAMERA_EASE;
    }

    pub fn target_position(&self) -> Vec3 {
        self.target_position
    }

    pub fn target_rotation(&self) -> Vec3 {
        self.target_rotation
    }

    /// World-to-view matrix from the current (eased) pose.
    pub fn view_matrix(&self) -> Mat4 {
        let orientation = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, 0.0);
        Mat4::from_rotation_translation(orientation, self.position).inverse()
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(CAMERA_FOV_Y, aspect, CAMERA_ZNEAR, CAMERA_ZFAR)
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new()
    }
}
