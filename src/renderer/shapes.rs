//! Procedural mesh generation
//!
//! Both meshes are unit-sized and centered on the origin; the model matrix
//! scales them to the ball radius or platform extents.

use std::f32::consts::PI;

use super::vertex::Vertex;

/// Indexed triangle list
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

/// Latitude/longitude sphere
///
/// Produces `(latitudes + 1) * (longitudes + 1)` vertices (the seam column is
/// duplicated) and two triangles per grid cell, including the degenerate ones
/// at the poles.
pub fn uv_sphere(radius: f32, latitudes: u32, longitudes: u32) -> Mesh {
    let latitudes = latitudes.max(2);
    let longitudes = longitudes.max(3);

    let mut vertices = Vec::with_capacity(((latitudes + 1) * (longitudes + 1)) as usize);
    for i in 0..=latitudes {
        let theta = i as f32 * PI / latitudes as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();

        for j in 0..=longitudes {
            let phi = j as f32 * 2.0 * PI / longitudes as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();

            let normal = [cos_phi * sin_theta, cos_theta, sin_phi * sin_theta];
            let position = [normal[0] * radius, normal[1] * radius, normal[2] * radius];
            vertices.push(Vertex::new(position, normal));
        }
    }

    let mut indices = Vec::with_capacity((latitudes * longitudes * 6) as usize);
    for i in 0..latitudes {
        for j in 0..longitudes {
            let first = i * (longitudes + 1) + j;
            let second = first + longitudes + 1;

            indices.extend_from_slice(&[first, second, first + 1]);
            indices.extend_from_slice(&[second, second + 1, first + 1]);
        }
    }

    Mesh { vertices, indices }
}

/// Axis-aligned cube spanning -0.5..0.5 on every axis, flat normals per face
pub fn unit_cube() -> Mesh {
    // (normal, tangent u, tangent v) per face
    const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ];
    const CORNERS: [(f32, f32); 4] = [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (n, u, v) in FACES {
        let base = vertices.len() as u32;
        for (cu, cv) in CORNERS {
            let position = [
                n[0] * 0.5 + u[0] * cu + v[0] * cv,
                n[1] * 0.5 + u[1] * cu + v[1] * cv,
                n[2] * 0.5 + u[2] * cu + v[2] * cv,
            ];
            vertices.push(Vertex::new(position, n));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    Mesh { vertices, indices }
}
