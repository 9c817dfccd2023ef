// Polar cylinder meshes.
//
// For polar views two axes are reinterpreted: the angular axis holds theta
// in [0, 1] (wrapping), the radial axis holds the disc diameter in [0, 1],
// and the remaining axis is the cylinder height. Vertices carry disc
// coordinates in their color_coord so the fragment stage can recover
// (radius, angle) with the centered atan2 remap; positions reuse the same
// disc coordinates, which is what makes the mesh a cylinder.

use std::f32::consts::TAU;

use glam::Vec3;

use super::{
    color_coord_to_position, SliceBox, SurfaceMesh, Vertex, WireframeMesh,
    CYLINDER_RADIAL_SEGMENTS,
};

// Which axis plays which polar role, as indices into the axis order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolarAxes {
    pub angular: usize,
    pub radial: usize,
    pub height: usize,
}

// Chord midpoints sit short of the true circle by the sagitta of half a
// segment; callers shift the radial axis inward by this much to keep the
// outer circle inside the axis-aligned viewport.
pub fn radial_axis_offset(diameter: f32) -> f32 {
    let half_segment_angle = std::f32::consts::PI / CYLINDER_RADIAL_SEGMENTS as f32;
    diameter * (1.0 - half_segment_angle.cos())
}

// Disc coordinates for (theta, diameter). The angular slot carries the
// cosine component so that theta 0 lands on the +X side of the disc.
pub(crate) fn disc_coord(theta: f32, diameter: f32) -> (f32, f32) {
    let angle = theta * TAU;
    (
        0.5 + 0.5 * diameter * angle.cos(),
        0.5 + 0.5 * diameter * angle.sin(),
    )
}

fn color_coord(polar: PolarAxes, theta: f32, diameter: f32, height: f32) -> Vec3 {
    let (u, v) = disc_coord(theta, diameter);
    let mut coord = Vec3::ZERO;
    coord[polar.angular] = u;
    coord[polar.radial] = v;
    coord[polar.height] = height;
    coord
}

fn vertex(polar: PolarAxes, theta: f32, diameter: f32, height: f32, size: f32) -> Vertex {
    let coord = color_coord(polar, theta, diameter, height);
    Vertex {
        position: color_coord_to_position(coord, size),
        color_coord: coord,
    }
}

#[derive(Debug, Clone, Copy)]
struct CylinderRanges {
    theta: (f32, f32),
    diameter: (f32, f32),
    height: (f32, f32),
    segments: usize,
}

impl CylinderRanges {
    fn from_slice(slice: &SliceBox, polar: PolarAxes) -> Self {
        let theta = (slice.lo[polar.angular], slice.hi[polar.angular]);
        let span = (theta.1 - theta.0).max(0.0);
        let segments = ((span * CYLINDER_RADIAL_SEGMENTS as f32).ceil() as usize).max(1);
        Self {
            theta,
            diameter: (slice.lo[polar.radial], slice.hi[polar.radial]),
            height: (slice.lo[polar.height], slice.hi[polar.height]),
            segments,
        }
    }

    fn is_wedged(&self) -> bool {
        self.theta.1 - self.theta.0 < 1.0
    }

    fn theta_at(&self, segment: usize) -> f32 {
        let t = segment as f32 / self.segments as f32;
        self.theta.0 + (self.theta.1 - self.theta.0) * t
    }
}

// Full cylinder surface: top and bottom annular faces, outer band, inner
// band when the inner diameter is nonzero, and two flat wedge faces when
// the angular range does not wrap the full circle.
pub fn surface(slice: &SliceBox, polar: PolarAxes, size: f32) -> SurfaceMesh {
    let ranges = CylinderRanges::from_slice(slice, polar);
    let (d0, d1) = ranges.diameter;
    let (h0, h1) = ranges.height;
    let mut mesh = SurfaceMesh::default();

    for segment in 0..ranges.segments {
        let a = ranges.theta_at(segment);
        let b = ranges.theta_at(segment + 1);

        // Annular top and bottom faces.
        for h in [h0, h1] {
            mesh.append_quad([
                vertex(polar, a, d0, h, size),
                vertex(polar, b, d0, h, size),
                vertex(polar, a, d1, h, size),
                vertex(polar, b, d1, h, size),
            ]);
        }

        // Outer cylindrical band.
        mesh.append_quad([
            vertex(polar, a, d1, h0, size),
            vertex(polar, b, d1, h0, size),
            vertex(polar, a, d1, h1, size),
            vertex(polar, b, d1, h1, size),
        ]);

        // Inner band only exists for a ring selection.
        if d0 > 0.0 {
            mesh.append_quad([
                vertex(polar, a, d0, h0, size),
                vertex(polar, b, d0, h0, size),
                vertex(polar, a, d0, h1, size),
                vertex(polar, b, d0, h1, size),
            ]);
        }
    }

    if ranges.is_wedged() {
        for theta in [ranges.theta.0, ranges.theta.1] {
            mesh.append_quad([
                vertex(polar, theta, d0, h0, size),
                vertex(polar, theta, d1, h0, size),
                vertex(polar, theta, d0, h1, size),
                vertex(polar, theta, d1, h1, size),
            ]);
        }
    }

    mesh
}

fn arc_points(
    polar: PolarAxes,
    theta: (f32, f32),
    diameter: f32,
    height: f32,
    segments: usize,
    size: f32,
) -> Vec<Vec3> {
    (0..=segments)
        .map(|segment| {
            let t = segment as f32 / segments as f32;
            let angle = theta.0 + (theta.1 - theta.0) * t;
            color_coord_to_position(color_coord(polar, angle, diameter, height), size)
        })
        .collect()
}

// Sliced-wedge arcs, full-cylinder circles, wedge-face outlines and four
// generator lines spaced at quarter turns along the cylinder body.
pub fn wireframe(slice: &SliceBox, polar: PolarAxes, size: f32) -> WireframeMesh {
    let ranges = CylinderRanges::from_slice(slice, polar);
    let (d0, d1) = ranges.diameter;
    let (h0, h1) = ranges.height;
    let mut mesh = WireframeMesh::default();

    // Top and bottom arcs of the selection.
    for h in [h0, h1] {
        mesh.push_polyline(&arc_points(polar, ranges.theta, d1, h, ranges.segments, size));
    }

    // Full unit cylinder for reference.
    for h in [0.0, 1.0] {
        mesh.push_polyline(&arc_points(
            polar,
            (0.0, 1.0),
            1.0,
            h,
            CYLINDER_RADIAL_SEGMENTS,
            size,
        ));
    }

    if ranges.is_wedged() {
        for theta in [ranges.theta.0, ranges.theta.1] {
            let outline = [
                color_coord(polar, theta, d0, h0),
                color_coord(polar, theta, d1, h0),
                color_coord(polar, theta, d1, h1),
                color_coord(polar, theta, d0, h1),
                color_coord(polar, theta, d0, h0),
            ]
            .map(|coord| color_coord_to_position(coord, size));
            mesh.push_polyline(&outline);
        }
    }

    for quarter in 0..4 {
        let theta = quarter as f32 / 4.0;
        mesh.push_segment(
            color_coord_to_position(color_coord(polar, theta, 1.0, 0.0), size),
            color_coord_to_position(color_coord(polar, theta, 1.0, 1.0), size),
        );
    }

    mesh
}
