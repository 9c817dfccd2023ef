// Camera-aligned cross sections.
//
// When interior fragments become visible (unmatched culling, HideOther),
// the field shader needs geometry inside the volume to shade. This slices
// the selected sub-box with planes of constant camera depth and fan-
// triangulates each intersection polygon. The angular sort is sound here
// because a plane section of a convex box is convex.

use glam::{Mat4, Vec2, Vec3};
use rayon::prelude::*;

use super::{color_coord_to_position, SliceBox, SurfaceMesh, Vertex, CROSS_SECTION_SCALE};

struct SectionCorners {
    coords: [Vec3; 8],
    positions: [Vec3; 8],
    rotated: [Vec3; 8],
}

impl SectionCorners {
    fn new(slice: &SliceBox, rotation: &Mat4, size: f32) -> Self {
        let mut coords = [Vec3::ZERO; 8];
        let mut positions = [Vec3::ZERO; 8];
        let mut rotated = [Vec3::ZERO; 8];
        for index in 0..8 {
            coords[index] = slice.corner(index);
            positions[index] = color_coord_to_position(coords[index], size);
            rotated[index] = rotation.transform_point3(positions[index]);
        }
        Self {
            coords,
            positions,
            rotated,
        }
    }
}

// Edge list from the shared corner convention, each edge emitted once.
fn box_edges() -> Vec<(usize, usize)> {
    let mut edges = Vec::with_capacity(12);
    for index in 0..8 {
        for axis in 0..3 {
            if (index >> axis) & 1 == 1 {
                edges.push((index, index ^ (1 << axis)));
            }
        }
    }
    edges
}

// Intersect all twelve edges with the plane of camera depth `z`; the
// returned ring is sorted by angle around its centroid in the rotated
// XY plane. Positions and color coordinates are interpolated with the
// same parameter, so the ring lives in model space like every other
// surface triangle.
fn section_ring(corners: &SectionCorners, edges: &[(usize, usize)], z: f32) -> Option<Vec<Vertex>> {
    let mut ring: Vec<(Vertex, Vec2)> = Vec::with_capacity(6);

    for &(a, b) in edges {
        let za = corners.rotated[a].z;
        let zb = corners.rotated[b].z;
        if za == zb || (za - z) * (zb - z) > 0.0 {
            continue;
        }
        let t = (z - za) / (zb - za);
        let vertex = Vertex {
            position: corners.positions[a].lerp(corners.positions[b], t),
            color_coord: corners.coords[a].lerp(corners.coords[b], t),
        };
        let rotated = corners.rotated[a].lerp(corners.rotated[b], t);
        ring.push((vertex, Vec2::new(rotated.x, rotated.y)));
    }

    if ring.len() < 3 {
        return None;
    }

    let centroid = ring.iter().fold(Vec2::ZERO, |sum, (_, xy)| sum + *xy) / ring.len() as f32;
    ring.sort_by(|(_, a), (_, b)| {
        let angle_a = (a.y - centroid.y).atan2(a.x - centroid.x);
        let angle_b = (b.y - centroid.y).atan2(b.x - centroid.x);
        angle_a.total_cmp(&angle_b)
    });

    Some(ring.into_iter().map(|(vertex, _)| vertex).collect())
}

pub fn cross_sections(slice: &SliceBox, rotation: &Mat4, size: f32) -> SurfaceMesh {
    let corners = SectionCorners::new(slice, rotation, size);
    let edges = box_edges();

    let z_min = corners
        .rotated
        .iter()
        .fold(f32::INFINITY, |acc, q| acc.min(q.z));
    let z_max = corners
        .rotated
        .iter()
        .fold(f32::NEG_INFINITY, |acc, q| acc.max(q.z));

    let step = size * CROSS_SECTION_SCALE;
    let plane_count = ((z_max - z_min) / step) as usize;

    // Planes sit at half-step offsets so a section never degenerates to a
    // corner or an edge of the box.
    let rings: Vec<Vec<Vertex>> = (0..plane_count)
        .into_par_iter()
        .filter_map(|index| {
            let z = z_min + (index as f32 + 0.5) * step;
            section_ring(&corners, &edges, z)
        })
        .collect();

    let mut mesh = SurfaceMesh::default();
    for ring in rings {
        mesh.append_fan(&ring);
    }
    mesh
}
