// Software rasterizer.
//
// CPU twin of the GPU pipeline: triangles with perspective-correct
// color-coordinate interpolation and a depth test for the classification
// pass, depth-tested blended lines for the wireframe overlay. Non-macOS
// builds render through this path; on macOS it is the parity reference for
// the Metal backend.

use glam::{Mat4, Vec2, Vec3, Vec4};

use super::field::{shade_fragment, FieldParams};
use super::frame::{ClassifiedFrame, DisplayFrame};
use crate::geometry::{SurfaceMesh, WireframeMesh};

// Wire fragments more than this far behind the stored surface depth are
// discarded.
pub const WIREFRAME_DEPTH_EPSILON: f32 = 1e-4;

pub const WIREFRAME_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
pub const WIREFRAME_ALPHA: f32 = 0.1;

#[derive(Debug, Clone, Copy)]
struct ProjectedVertex {
    screen: Vec2,
    ndc_z: f32,
    inv_w: f32,
    coord_over_w: Vec3,
}

fn project(mvp: &Mat4, position: Vec3, width: f32, height: f32) -> Option<(Vec2, f32, f32)> {
    let clip = *mvp * Vec4::new(position.x, position.y, position.z, 1.0);
    if clip.w <= 1e-6 {
        return None;
    }
    let inv_w = 1.0 / clip.w;
    let ndc = Vec3::new(clip.x, clip.y, clip.z) * inv_w;
    // Bottom-origin screen coordinates: NDC +y is up, row 0 is the bottom.
    let screen = Vec2::new(
        (ndc.x * 0.5 + 0.5) * width,
        (ndc.y * 0.5 + 0.5) * height,
    );
    Some((screen, ndc.z, inv_w))
}

fn edge(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

pub fn draw_surface(mesh: &SurfaceMesh, mvp: &Mat4, field: &FieldParams, frame: &mut ClassifiedFrame) {
    let width = frame.width() as f32;
    let height = frame.height() as f32;

    for triangle in mesh.indices.chunks_exact(3) {
        let mut projected = [None; 3];
        for (slot, &index) in projected.iter_mut().zip(triangle) {
            let vertex = &mesh.vertices[index as usize];
            *slot = project(mvp, vertex.position, width, height).map(|(screen, ndc_z, inv_w)| {
                ProjectedVertex {
                    screen,
                    ndc_z,
                    inv_w,
                    coord_over_w: vertex.color_coord * inv_w,
                }
            });
        }
        let [Some(a), Some(b), Some(c)] = projected else {
            continue;
        };

        let area = edge(a.screen, b.screen, c.screen);
        if area.abs() < 1e-8 {
            continue;
        }
        let sign = area.signum();

        let min_x = a.screen.x.min(b.screen.x).min(c.screen.x).floor().max(0.0) as u32;
        let max_x = (a.screen.x.max(b.screen.x).max(c.screen.x).ceil() as i64)
            .clamp(0, frame.width() as i64) as u32;
        let min_y = a.screen.y.min(b.screen.y).min(c.screen.y).floor().max(0.0) as u32;
        let max_y = (a.screen.y.max(b.screen.y).max(c.screen.y).ceil() as i64)
            .clamp(0, frame.height() as i64) as u32;

        for y in min_y..max_y {
            for x in min_x..max_x {
                let sample = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let w0 = edge(b.screen, c.screen, sample) * sign;
                let w1 = edge(c.screen, a.screen, sample) * sign;
                let w2 = edge(a.screen, b.screen, sample) * sign;
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }
                let inv_area = 1.0 / (area * sign);
                let (l0, l1, l2) = (w0 * inv_area, w1 * inv_area, w2 * inv_area);

                // NDC z is affine in screen space; color coordinates need the
                // perspective-correct divide.
                let depth = l0 * a.ndc_z + l1 * b.ndc_z + l2 * c.ndc_z;
                if !(0.0..=1.0).contains(&depth) {
                    continue;
                }
                let inv_w = l0 * a.inv_w + l1 * b.inv_w + l2 * c.inv_w;
                let coord =
                    (l0 * a.coord_over_w + l1 * b.coord_over_w + l2 * c.coord_over_w) / inv_w;

                // Culled fragments are discarded outright: they write
                // neither color nor depth, so interior cross sections stay
                // visible behind culled surfaces and the background keeps
                // the OUTSIDE sentinel from the clear.
                let pixel = shade_fragment(coord, field);
                if pixel.is_outside() {
                    continue;
                }
                frame.shade(x, y, depth, pixel);
            }
        }
    }
}

// Blended wireframe overlay. Each fragment compares against the depth the
// classification pass wrote, then alpha-blends a faint white line into the
// display image; depth is never written.
pub fn draw_wireframe(
    wire: &WireframeMesh,
    mvp: &Mat4,
    frame: &ClassifiedFrame,
    display: &mut DisplayFrame,
) {
    let width = frame.width() as f32;
    let height = frame.height() as f32;

    for segment in wire.vertices.chunks_exact(2) {
        let Some((start, z0, _)) = project(mvp, segment[0], width, height) else {
            continue;
        };
        let Some((end, z1, _)) = project(mvp, segment[1], width, height) else {
            continue;
        };

        let delta = end - start;
        let steps = delta.x.abs().max(delta.y.abs()).ceil() as i32;
        if steps == 0 {
            continue;
        }
        for step in 0..=steps {
            let t = step as f32 / steps as f32;
            let point = start + delta * t;
            let x = point.x.floor() as i64;
            let y = point.y.floor() as i64;
            if !frame.in_bounds(x, y) {
                continue;
            }
            let (x, y) = (x as u32, y as u32);
            let depth = z0 + (z1 - z0) * t;
            if depth > frame.depth_at(x, y) + WIREFRAME_DEPTH_EPSILON {
                continue;
            }
            display.blend(x, y, WIREFRAME_COLOR, WIREFRAME_ALPHA);
        }
    }
}
