//! Per-frame render input
//!
//! Turns the game state and camera into matrices and colors; no GPU types.

use glam::{Mat4, Vec3};

use super::vertex::colors;
use crate::camera::{OrbitCamera, projection_matrix};
use crate::sim::GameState;

/// Which uploaded mesh an item draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshKind {
    Cube,
    Sphere,
}

/// One object to draw
#[derive(Debug, Clone, Copy)]
pub struct DrawItem {
    pub mesh: MeshKind,
    pub model: Mat4,
    pub color: [f32; 4],
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone)]
pub struct Scene {
    pub projection: Mat4,
    pub view: Mat4,
    pub camera_pos: Vec3,
    /// Platform first, then ball
    pub items: [DrawItem; 2],
}

impl Scene {
    pub fn view_proj(&self) -> Mat4 {
        self.projection * self.view
    }
}

/// Build the scene for the current state
pub fn build_scene(state: &GameState, camera: &OrbitCamera, aspect: f32, fov_deg: f32) -> Scene {
    let target = state.ball.pos;

    let platform = DrawItem {
        mesh: MeshKind::Cube,
        model: Mat4::from_translation(state.platform.pos) * Mat4::from_scale(state.platform.size()),
        color: colors::PLATFORM,
    };
    let ball = DrawItem {
        mesh: MeshKind::Sphere,
        model: Mat4::from_translation(state.ball.pos)
            * Mat4::from_scale(Vec3::splat(state.ball.radius())),
        color: colors::BALL,
    };

    Scene {
        projection: projection_matrix(fov_deg, aspect.max(f32::EPSILON)),
        view: camera.view_matrix(target),
        camera_pos: camera.eye(target),
        items: [platform, ball],
    }
}
