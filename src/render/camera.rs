// Camera Implementation
//
// Fixed-orbit camera for the color-field views. The host UI supplies the
// rotation matrix; this module owns projection, the camera offset, the
// viewport-fitting size used by 2D slices, and the per-axis rotation that
// maps a slice face onto the screen.

use glam::{Mat4, Vec3, Vec4};

pub const FOV_Y_RADIANS: f32 = std::f32::consts::FRAC_PI_4;
pub const CAMERA_DISTANCE: f32 = 3.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    width: u32,
    height: u32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(FOV_Y_RADIANS, self.aspect(), NEAR_PLANE, FAR_PLANE)
    }

    pub fn view(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, -CAMERA_DISTANCE))
    }

    pub fn mvp(&self, rotation: &Mat4) -> Mat4 {
        self.projection() * self.view() * *rotation
    }

    // World-space size that exactly fills the vertical field of view at the
    // camera distance; 2D slice faces are generated at this size.
    pub fn fit_size_2d(&self) -> f32 {
        2.0 * (FOV_Y_RADIANS / 2.0).tan() * CAMERA_DISTANCE
    }
}

// Rotation that brings the face fixed on `fixed_axis` into the camera
// plane with the first free axis on screen X and the second on screen Y.
pub fn face_rotation(fixed_axis: usize) -> Mat4 {
    match fixed_axis {
        0 => Mat4::from_cols(Vec4::Z, Vec4::X, Vec4::Y, Vec4::W),
        1 => Mat4::from_cols(Vec4::X, Vec4::Z, Vec4::Y, Vec4::W),
        _ => Mat4::IDENTITY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_size_spans_the_vertical_view_exactly() {
        let camera = Camera::new(256, 256);
        let half = camera.fit_size_2d() / 2.0;
        let clip = camera.mvp(&Mat4::IDENTITY) * Vec4::new(0.0, half, 0.0, 1.0);
        let ndc_y = clip.y / clip.w;
        assert!((ndc_y - 1.0).abs() < 1e-5, "ndc y {}", ndc_y);
    }

    #[test]
    fn face_rotations_route_free_axes_to_screen() {
        // Fixed red: green lands on screen X, blue on screen Y.
        let r = face_rotation(0);
        assert_eq!(r.transform_vector3(Vec3::Y), Vec3::X);
        assert_eq!(r.transform_vector3(Vec3::Z), Vec3::Y);

        // Fixed green: red on X, blue on Y.
        let r = face_rotation(1);
        assert_eq!(r.transform_vector3(Vec3::X), Vec3::X);
        assert_eq!(r.transform_vector3(Vec3::Z), Vec3::Y);

        assert_eq!(face_rotation(2), Mat4::IDENTITY);
    }

    #[test]
    fn camera_rejects_degenerate_dimensions() {
        let camera = Camera::new(0, 0);
        assert_eq!((camera.width(), camera.height()), (1, 1));
        assert_eq!(camera.aspect(), 1.0);
    }
}
