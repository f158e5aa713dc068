#![forbid(unsafe_code)]

//! Solid-mesh rendering pipeline.
//!
//! Per frame: rotate every vertex (Y axis, then X axis), perspective-project
//! onto the frame, flat-shade each triangle against a single directional
//! light, depth-sort, then fill through the ordered-dither mask.
//!
//! Triangles referencing missing vertices and triangles with a zero-length
//! normal are skipped. Shading normals are flipped toward positive Z before
//! lighting so winding order in the source file does not matter.

use core::cmp::Ordering;

use wrlview_scene::{Mesh, Vec3};

use crate::dither;
use crate::frame::Frame;

/// Directional light with an ambient floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub direction: Vec3,
    pub ambient: f32,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            direction: Vec3::new(0.0, 0.0, -1.0),
            ambient: 0.2,
        }
    }
}

/// Parameters for one solid-mesh draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidParams {
    pub angle_x: f32,
    pub angle_y: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub color: u8,
    pub lighting: Lighting,
}

impl SolidParams {
    #[must_use]
    pub fn new(angle_x: f32, angle_y: f32, color: u8) -> Self {
        Self {
            angle_x,
            angle_y,
            offset_x: 0.0,
            offset_y: 0.0,
            color,
            lighting: Lighting::default(),
        }
    }
}

/// Perspective focal distance: a vertex at `z == FOCAL` sits on the eye.
const FOCAL: f32 = 300.0;

#[derive(Debug, Clone, Copy)]
struct ShadedTriangle {
    depth: f32,
    p1: (f32, f32),
    p2: (f32, f32),
    p3: (f32, f32),
    brightness: f32,
}

/// Render a mesh into the frame.
pub fn draw_mesh(frame: &mut Frame, mesh: &Mesh, params: &SolidParams) {
    let center_x = f32::from(frame.width()) / 2.0 + params.offset_x;
    let center_y = f32::from(frame.height()) / 2.0 + params.offset_y;

    let (sin_x, cos_x) = params.angle_x.sin_cos();
    let (sin_y, cos_y) = params.angle_y.sin_cos();

    let mut rotated = Vec::with_capacity(mesh.vertices.len());
    let mut projected = Vec::with_capacity(mesh.vertices.len());
    for v in &mesh.vertices {
        let rx = v.x * cos_y - v.z * sin_y;
        let rz = v.x * sin_y + v.z * cos_y;
        let ry = v.y * cos_x - rz * sin_x;
        let depth = v.y * sin_x + rz * cos_x;
        rotated.push(Vec3::new(rx, ry, depth));

        let perspective = FOCAL / (FOCAL - depth);
        projected.push((rx * perspective + center_x, ry * perspective + center_y));
    }

    let mut shaded = Vec::with_capacity(mesh.triangles.len());
    for tri in &mesh.triangles {
        let [a, b, c] = *tri;
        if a >= rotated.len() || b >= rotated.len() || c >= rotated.len() {
            continue;
        }

        let edge1 = rotated[b] - rotated[a];
        let edge2 = rotated[c] - rotated[a];
        let Some(mut normal) = edge1.cross(edge2).normalized() else {
            continue;
        };
        if normal.z <= 0.0 {
            normal = -normal;
        }

        let diffuse = (-normal.dot(params.lighting.direction)).max(0.0);
        let ambient = params.lighting.ambient;
        let brightness = (ambient + diffuse * (1.0 - ambient)).min(1.0);

        let depth = (rotated[a].z + rotated[b].z + rotated[c].z) / 3.0;
        shaded.push(ShadedTriangle {
            depth,
            p1: projected[a],
            p2: projected[b],
            p3: projected[c],
            brightness,
        });
    }

    shaded.sort_by(|a, b| b.depth.partial_cmp(&a.depth).unwrap_or(Ordering::Equal));

    for tri in &shaded {
        fill_dithered_triangle(frame, tri.p1, tri.p2, tri.p3, params.color, tri.brightness);
    }
}

/// Signed area test: positive when `p` lies left of the `a -> b` edge.
#[inline]
fn edge(a: (f32, f32), b: (f32, f32), p: (f32, f32)) -> f32 {
    (p.0 - a.0) * (b.1 - a.1) - (p.1 - a.1) * (b.0 - a.0)
}

/// Fill one screen-space triangle through the dither mask.
fn fill_dithered_triangle(
    frame: &mut Frame,
    p1: (f32, f32),
    p2: (f32, f32),
    p3: (f32, f32),
    color: u8,
    brightness: f32,
) {
    let (mut p2, mut p3) = (p2, p3);
    if edge(p1, p2, p3) < 0.0 {
        core::mem::swap(&mut p2, &mut p3);
    }

    let min_x = (p1.0.min(p2.0).min(p3.0).max(0.0)) as i32;
    let max_x = (p1.0.max(p2.0).max(p3.0).min(f32::from(frame.width()) - 1.0)) as i32;
    let min_y = (p1.1.min(p2.1).min(p3.1).max(0.0)) as i32;
    let max_y = (p1.1.max(p2.1).max(p3.1).min(f32::from(frame.height()) - 1.0)) as i32;

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let p = (x as f32, y as f32);
            if edge(p1, p2, p) >= 0.0
                && edge(p2, p3, p) >= 0.0
                && edge(p3, p1, p) >= 0.0
                && dither::keeps(brightness, x, y)
            {
                frame.pset(x, y, color);
            }
        }
    }
}
