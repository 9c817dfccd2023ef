// Cartesian cube meshes.
//
// Faces and edges are derived from the 3-bit corner convention on SliceBox:
// face (axis, direction) collects the four corners whose axis bit equals
// the direction, edges connect i to i ^ (1 << axis).

use glam::Vec3;

use super::{color_coord_to_position, SliceBox, SurfaceMesh, Vertex, WireframeMesh};

fn vertex(coord: Vec3, size: f32) -> Vertex {
    Vertex {
        position: color_coord_to_position(coord, size),
        color_coord: coord,
    }
}

// The four corners of face (axis, direction) in quad order. Corners come
// out sorted by index, which enumerates the two free axes in binary
// counting order, exactly what append_quad expects.
fn face_corners(slice: &SliceBox, axis: usize, direction: usize) -> [Vec3; 4] {
    let mut corners = [Vec3::ZERO; 4];
    let mut found = 0usize;
    for index in 0..8 {
        if (index >> axis) & 1 == direction {
            corners[found] = slice.corner(index);
            found += 1;
        }
    }
    corners
}

// All six faces of the sliced sub-box as a triangle mesh.
pub fn surface(slice: &SliceBox, size: f32) -> SurfaceMesh {
    let mut mesh = SurfaceMesh::default();
    for axis in 0..3 {
        for direction in 0..2 {
            let corners = face_corners(slice, axis, direction);
            mesh.append_quad(corners.map(|coord| vertex(coord, size)));
        }
    }
    mesh
}

// The single face whose fixed axis is `fixed_axis`, flattened onto the
// camera plane: the fixed position component collapses to zero while the
// color coordinate keeps the slice value.
pub fn face_2d(slice: &SliceBox, fixed_axis: usize, size: f32) -> SurfaceMesh {
    let mut mesh = SurfaceMesh::default();
    let corners = face_corners(slice, fixed_axis, 0);
    mesh.append_quad(corners.map(|coord| {
        let mut position = color_coord_to_position(coord, size);
        position[fixed_axis] = 0.0;
        Vertex {
            position,
            color_coord: coord,
        }
    }));
    mesh
}

fn push_box_edges(mesh: &mut WireframeMesh, slice: &SliceBox, size: f32) {
    for index in 0..8 {
        for axis in 0..3 {
            // Emit each edge once: only from the corner whose axis bit is set.
            if (index >> axis) & 1 == 1 {
                let a = slice.corner(index);
                let b = slice.corner(index ^ (1 << axis));
                mesh.push_segment(
                    color_coord_to_position(a, size),
                    color_coord_to_position(b, size),
                );
            }
        }
    }
}

// Twelve edges of the sliced sub-box plus the twelve edges of the full
// unit cube, in one buffer.
pub fn wireframe(slice: &SliceBox, size: f32) -> WireframeMesh {
    let mut mesh = WireframeMesh::default();
    push_box_edges(&mut mesh, slice, size);
    push_box_edges(&mut mesh, &SliceBox::full(), size);
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> SliceBox {
        SliceBox::full()
    }

    #[test]
    fn surface_emits_six_faces() {
        let mesh = surface(&unit_box(), 2.0);
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        // Color coordinates stay in the unit interval regardless of size.
        for v in &mesh.vertices {
            for c in [v.color_coord.x, v.color_coord.y, v.color_coord.z] {
                assert!((0.0..=1.0).contains(&c));
            }
        }
    }

    #[test]
    fn surface_respects_slice_ranges() {
        let slice = SliceBox {
            lo: Vec3::new(0.25, 0.0, 0.5),
            hi: Vec3::new(0.75, 1.0, 1.0),
        };
        let mesh = surface(&slice, 1.0);
        for v in &mesh.vertices {
            assert!((0.25..=0.75).contains(&v.color_coord.x));
            assert!((0.0..=1.0).contains(&v.color_coord.y));
            assert!((0.5..=1.0).contains(&v.color_coord.z));
        }
    }

    #[test]
    fn face_2d_flattens_the_fixed_axis() {
        let slice = SliceBox {
            lo: Vec3::new(0.5, 0.0, 0.0),
            hi: Vec3::new(0.5, 1.0, 1.0),
        };
        let mesh = face_2d(&slice, 0, 2.0);
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        for v in &mesh.vertices {
            assert_eq!(v.position.x, 0.0);
            assert_eq!(v.color_coord.x, 0.5);
        }
        // Free axes still span the full quad in both position and color.
        let ys: Vec<f32> = mesh.vertices.iter().map(|v| v.color_coord.y).collect();
        assert!(ys.contains(&0.0) && ys.contains(&1.0));
    }

    #[test]
    fn wireframe_carries_sliced_and_unit_edges() {
        let slice = SliceBox {
            lo: Vec3::splat(0.2),
            hi: Vec3::splat(0.8),
        };
        let mesh = wireframe(&slice, 1.0);
        assert_eq!(mesh.segment_count(), 24);
    }

    #[test]
    fn edge_rule_does_not_duplicate_edges() {
        let mesh = wireframe(&unit_box(), 1.0);
        // The sliced box and unit box coincide here; each half contributes
        // exactly the 12 unique cube edges.
        let mut seen = std::collections::HashSet::new();
        for pair in mesh.vertices.chunks(2).take(12) {
            let mut key: Vec<String> = pair.iter().map(|v| format!("{:?}", v)).collect();
            key.sort();
            assert!(seen.insert(key.join("|")), "duplicate edge {:?}", pair);
        }
        assert_eq!(seen.len(), 12);
    }
}
