//! Orbit camera that trails the ball
//!
//! The orbit angle (degrees) is driven by horizontal cursor motion. The first
//! cursor event only records a baseline, so the camera does not jump to
//! wherever the pointer happened to enter the window.

use glam::{Mat4, Vec3};

use crate::consts::*;

#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Azimuth around the ball (degrees)
    pub angle_deg: f32,
    /// Horizontal distance from the ball
    pub distance: f32,
    /// Height above the ball
    pub height: f32,
    /// Degrees per pixel of cursor motion
    pub sensitivity: f32,
    /// Cursor X from the previous move event; `None` until the first one
    last_cursor_x: Option<f64>,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(MOUSE_SENSITIVITY)
    }
}

impl OrbitCamera {
    pub fn new(sensitivity: f32) -> Self {
        Self {
            angle_deg: 0.0,
            distance: CAMERA_DISTANCE,
            height: CAMERA_HEIGHT,
            sensitivity,
            last_cursor_x: None,
        }
    }

    /// Feed a cursor-move event (window pixel coordinates)
    pub fn on_cursor_moved(&mut self, x: f64) {
        let Some(last_x) = self.last_cursor_x.replace(x) else {
            return;
        };
        let delta = (x - last_x) as f32 * self.sensitivity;
        self.angle_deg -= delta;
    }

    /// Forget the cursor baseline (pointer left the window)
    pub fn reset_cursor(&mut self) {
        self.last_cursor_x = None;
    }

    /// Camera position for a given look-at target
    pub fn eye(&self, target: Vec3) -> Vec3 {
        let angle = self.angle_deg.to_radians();
        target
            + Vec3::new(
                self.distance * angle.cos(),
                self.height,
                self.distance * angle.sin(),
            )
    }

    /// Right-handed view matrix looking at `target` with +Y up
    pub fn view_matrix(&self, target: Vec3) -> Mat4 {
        Mat4::look_at_rh(self.eye(target), target, Vec3::Y)
    }
}

/// Perspective projection with wgpu's [0, 1] depth range
pub fn projection_matrix(fov_deg: f32, aspect: f32) -> Mat4 {
    Mat4::perspective_rh(fov_deg.to_radians(), aspect, Z_NEAR, Z_FAR)
}
