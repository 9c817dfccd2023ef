// Geometry Module
//
// Mesh generation for the color-field renderer: the 2D slice face, the
// sliced cube, the sliced cylinder wedge used by polar views, the matching
// wireframes, and the camera-aligned cross-section polygons that let the
// field shader fill the interior of a culled volume.

pub mod cross_section;
pub mod cube;
pub mod cylinder;

use glam::Vec3;

// Edge length of the 3D cube in camera units.
pub const CUBE_SIZE_3D: f32 = 1.1;

// Segments used to approximate a full circle of the polar cylinder.
pub const CYLINDER_RADIAL_SEGMENTS: usize = 16;

// Cross-section plane spacing as a fraction of the cube size.
pub const CROSS_SECTION_SCALE: f32 = 1.0 / 64.0;

// One field vertex: where it sits in model space and which color-space
// coordinates it represents. The fragment stage interpolates `color_coord`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub color_coord: Vec3,
}

// Triangle mesh with u16 indices; quads are emitted as two triangles with
// the shared (b, b+1, b+2, b+1, b+2, b+3) pattern.
#[derive(Debug, Clone, Default)]
pub struct SurfaceMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl SurfaceMesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    // Corners ordered so that consecutive-index triangles cover the quad:
    // (00, 01, 10, 11) over the two varying axes.
    pub fn append_quad(&mut self, corners: [Vertex; 4]) {
        let base = self.vertices.len() as u16;
        self.vertices.extend_from_slice(&corners);
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 1, base + 2, base + 3]);
    }

    pub fn append_fan(&mut self, ring: &[Vertex]) {
        if ring.len() < 3 {
            return;
        }
        let base = self.vertices.len() as u16;
        self.vertices.extend_from_slice(ring);
        for i in 0..ring.len() as u16 - 2 {
            self.indices.extend_from_slice(&[base, base + i + 1, base + i + 2]);
        }
    }
}

// Wireframe geometry as a flat line list: every consecutive pair of
// positions is one segment.
#[derive(Debug, Clone, Default)]
pub struct WireframeMesh {
    pub vertices: Vec<Vec3>,
}

impl WireframeMesh {
    pub fn segment_count(&self) -> usize {
        self.vertices.len() / 2
    }

    pub fn push_segment(&mut self, a: Vec3, b: Vec3) {
        self.vertices.push(a);
        self.vertices.push(b);
    }

    pub fn push_polyline(&mut self, points: &[Vec3]) {
        for pair in points.windows(2) {
            self.push_segment(pair[0], pair[1]);
        }
    }
}

// Centers the unit color cube on the origin at the requested size.
pub fn color_coord_to_position(coord: Vec3, size: f32) -> Vec3 {
    (coord - Vec3::splat(0.5)) * size
}

// Normalized [lo, hi] slice ranges per axis, in axis order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliceBox {
    pub lo: Vec3,
    pub hi: Vec3,
}

impl SliceBox {
    pub fn full() -> Self {
        Self {
            lo: Vec3::ZERO,
            hi: Vec3::ONE,
        }
    }

    // Corner addressing shared by faces, wireframe edges and cross-section
    // edges: bit k of `index` selects hi (1) against lo (0) on axis k.
    pub fn corner(&self, index: usize) -> Vec3 {
        Vec3::new(
            if index & 1 != 0 { self.hi.x } else { self.lo.x },
            if index & 2 != 0 { self.hi.y } else { self.lo.y },
            if index & 4 != 0 { self.hi.z } else { self.lo.z },
        )
    }
}
