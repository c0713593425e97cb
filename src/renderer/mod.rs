//! WebGPU rendering module
//!
//! Meshes are built once at startup; each frame the game hands over a
//! [`Scene`] with the camera matrices and one model matrix per object.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderInitError, RenderState, scaled_surface_size};
pub use scene::{DrawItem, MeshKind, Scene, build_scene};
