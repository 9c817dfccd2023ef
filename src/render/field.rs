// Field evaluation rules.
//
// The per-fragment algorithm of the classification pass and the per-pixel
// rules of the display pass, as pure functions. The software rasterizer
// calls these directly; the Metal shaders mirror them expression for
// expression so that readback and on-screen pixels agree.

use std::f32::consts::TAU;

use glam::Vec3;

use crate::color::{
    classify, convert, HslColor, HsvColor, MetricId, Palette, RgbColor, SpaceId, NO_MATCH,
    OUTSIDE_COLOR_SPACE,
};

// Dimming factor applied to non-highlighted regions in DimOther mode.
pub const DIM_FACTOR: f32 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightMode {
    DimOther,
    HideOther,
    Boundary,
}

// One classified framebuffer texel: sRGB bytes plus the palette index in
// the alpha slot. idx 254 is "no palette match", 255 is "outside the
// color space" (rgb undefined there).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedPixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub idx: u8,
}

impl ClassifiedPixel {
    pub const fn outside() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            idx: OUTSIDE_COLOR_SPACE,
        }
    }

    pub fn is_outside(&self) -> bool {
        self.idx == OUTSIDE_COLOR_SPACE
    }

    pub fn is_no_match(&self) -> bool {
        self.idx == NO_MATCH
    }

    pub fn bytes(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.idx]
    }

    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self {
            r: bytes[0],
            g: bytes[1],
            b: bytes[2],
            idx: bytes[3],
        }
    }

    fn rgb_f32(&self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

// Everything the classification pass needs per fragment.
#[derive(Debug, Clone)]
pub struct FieldParams {
    pub space: SpaceId,
    // (angular axis, radial axis) when the polar remap is active.
    pub polar_axes: Option<(usize, usize)>,
    pub palette: Palette,
    pub metric: MetricId,
    pub threshold: f32,
    pub highlight_mode: HighlightMode,
    pub highlight_index: Option<usize>,
    pub show_unmatched: bool,
}

// Per-fragment field evaluation. An `outside()` result means the fragment
// is culled: rasterizers discard it without writing color or depth, so the
// framebuffer keeps the OUTSIDE sentinel from the clear there.
pub fn shade_fragment(coord: Vec3, params: &FieldParams) -> ClassifiedPixel {
    let mut coord = coord;

    if let Some((angular, radial)) = params.polar_axes {
        let u = coord[angular] * 2.0 - 1.0;
        let v = coord[radial] * 2.0 - 1.0;
        let radius = (u * u + v * v).sqrt();
        if radius > 1.0 {
            return ClassifiedPixel::outside();
        }
        let mut angle = v.atan2(u) / TAU;
        if angle < 0.0 {
            angle += 1.0;
        }
        coord[angular] = angle;
        coord[radial] = radius;
    }

    let rgb = match params.space {
        SpaceId::Rgb => RgbColor::clamped(coord.x, coord.y, coord.z),
        SpaceId::Hsv => convert::hsv_to_rgb(HsvColor {
            h: coord.x,
            s: coord.y,
            v: coord.z,
        }),
        SpaceId::Hsl => convert::hsl_to_rgb(HslColor {
            h: coord.x,
            s: coord.y,
            l: coord.z,
        }),
    };

    let idx = classify(rgb, &params.palette, params.metric, params.threshold);

    if idx == NO_MATCH && !params.show_unmatched {
        return ClassifiedPixel::outside();
    }
    if params.highlight_mode == HighlightMode::HideOther {
        if let Some(highlight) = params.highlight_index {
            if idx != highlight as u8 {
                return ClassifiedPixel::outside();
            }
        }
    }

    let [r, g, b] = rgb.to_bytes();
    ClassifiedPixel { r, g, b, idx }
}

// Display-pass settings; a subset of the request that pass B consumes.
#[derive(Debug, Clone, Copy)]
pub struct DisplayParams {
    pub show_boundaries: bool,
    pub highlight_mode: HighlightMode,
    pub highlight_index: Option<usize>,
    pub show_unmatched: bool,
}

impl DisplayParams {
    fn hide_other_active(&self) -> bool {
        self.highlight_mode == HighlightMode::HideOther && self.highlight_index.is_some()
    }
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

// Boundary strokes contrast against the local luminance: light regions get
// a black stroke, dark regions a white one.
pub fn boundary_color(rgb: [f32; 3]) -> [f32; 3] {
    let luminance = 0.299 * rgb[0] + 0.587 * rgb[1] + 0.114 * rgb[2];
    let t = smoothstep(0.3, 0.7, luminance);
    [1.0 - t, 1.0 - t, 1.0 - t]
}

fn boundary_against(
    center: &ClassifiedPixel,
    neighbor: &ClassifiedPixel,
    params: &DisplayParams,
) -> bool {
    if neighbor.is_outside() || neighbor.idx == center.idx {
        return false;
    }
    if params.hide_other_active() {
        return false;
    }
    if params.highlight_mode == HighlightMode::Boundary {
        if let Some(highlight) = params.highlight_index {
            let highlight = highlight as u8;
            return center.idx == highlight || neighbor.idx == highlight;
        }
    }
    params.show_boundaries
}

// The visible color for one display pixel; None means fully transparent.
// `left` and `below` are the screen-left and screen-down neighbors in the
// classified framebuffer.
pub fn display_pixel(
    center: ClassifiedPixel,
    left: Option<ClassifiedPixel>,
    below: Option<ClassifiedPixel>,
    params: &DisplayParams,
) -> Option<[u8; 3]> {
    if center.is_outside() {
        return None;
    }
    if center.is_no_match() && !params.show_unmatched {
        return None;
    }
    if params.hide_other_active() && Some(center.idx as usize) != params.highlight_index {
        return None;
    }

    let rgb = center.rgb_f32();
    let is_boundary = left
        .map(|n| boundary_against(&center, &n, params))
        .unwrap_or(false)
        || below
            .map(|n| boundary_against(&center, &n, params))
            .unwrap_or(false);

    let out = if is_boundary {
        boundary_color(rgb)
    } else if params.highlight_mode == HighlightMode::DimOther {
        match params.highlight_index {
            Some(highlight) if center.idx != highlight as u8 => {
                [rgb[0] * DIM_FACTOR, rgb[1] * DIM_FACTOR, rgb[2] * DIM_FACTOR]
            }
            _ => rgb,
        }
    } else {
        rgb
    };

    Some([
        (out[0] * 255.0).round() as u8,
        (out[1] * 255.0).round() as u8,
        (out[2] * 255.0).round() as u8,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::NamedColor;

    fn primaries() -> Palette {
        Palette::new(vec![
            NamedColor::new("Red", RgbColor::from_bytes(255, 0, 0)),
            NamedColor::new("Green", RgbColor::from_bytes(0, 255, 0)),
        ])
        .unwrap()
    }

    fn base_params() -> FieldParams {
        FieldParams {
            space: SpaceId::Rgb,
            polar_axes: None,
            palette: Palette::empty(),
            metric: MetricId::RgbEuclidean,
            threshold: 2.0,
            highlight_mode: HighlightMode::DimOther,
            highlight_index: None,
            show_unmatched: true,
        }
    }

    #[test]
    fn rgb_fragment_passes_coordinates_through() {
        let pixel = shade_fragment(Vec3::new(0.5, 0.0, 1.0), &base_params());
        assert_eq!((pixel.r, pixel.g, pixel.b), (128, 0, 255));
        assert_eq!(pixel.idx, NO_MATCH);
    }

    #[test]
    fn polar_fragments_outside_the_disk_are_outside_the_space() {
        let mut params = base_params();
        params.space = SpaceId::Hsl;
        params.polar_axes = Some((0, 1));
        let corner = shade_fragment(Vec3::new(1.0, 1.0, 0.5), &params);
        assert!(corner.is_outside());

        // Disc center is achromatic at the fixed lightness.
        let center = shade_fragment(Vec3::new(0.5, 0.5, 0.5), &params);
        assert_eq!((center.r, center.g, center.b), (128, 128, 128));
    }

    #[test]
    fn polar_remap_recovers_angle_and_radius() {
        let mut params = base_params();
        params.space = SpaceId::Hsv;
        params.polar_axes = Some((0, 1));
        // Rightmost point of the disc: hue 0, full saturation, value 1.
        let pixel = shade_fragment(Vec3::new(1.0, 0.5, 1.0), &params);
        assert_eq!((pixel.r, pixel.g, pixel.b), (255, 0, 0));
    }

    #[test]
    fn unmatched_fragments_cull_when_hidden() {
        let mut params = base_params();
        params.show_unmatched = false;
        let pixel = shade_fragment(Vec3::new(0.2, 0.4, 0.6), &params);
        assert!(pixel.is_outside());
    }

    #[test]
    fn hide_other_culls_non_highlighted_fragments() {
        let mut params = base_params();
        params.palette = primaries();
        params.highlight_mode = HighlightMode::HideOther;
        params.highlight_index = Some(0);
        let red = shade_fragment(Vec3::new(1.0, 0.0, 0.0), &params);
        assert_eq!(red.idx, 0);
        let green = shade_fragment(Vec3::new(0.0, 1.0, 0.0), &params);
        assert!(green.is_outside());
    }

    fn display_defaults() -> DisplayParams {
        DisplayParams {
            show_boundaries: true,
            highlight_mode: HighlightMode::DimOther,
            highlight_index: None,
            show_unmatched: true,
        }
    }

    fn px(idx: u8) -> ClassifiedPixel {
        ClassifiedPixel {
            r: 200,
            g: 100,
            b: 50,
            idx,
        }
    }

    #[test]
    fn outside_and_hidden_pixels_are_transparent() {
        let params = display_defaults();
        assert_eq!(display_pixel(ClassifiedPixel::outside(), None, None, &params), None);

        let mut hidden = params;
        hidden.show_unmatched = false;
        assert_eq!(display_pixel(px(NO_MATCH), None, None, &hidden), None);

        let mut hide_other = params;
        hide_other.highlight_mode = HighlightMode::HideOther;
        hide_other.highlight_index = Some(1);
        assert_eq!(display_pixel(px(0), None, None, &hide_other), None);
        assert!(display_pixel(px(1), None, None, &hide_other).is_some());
    }

    #[test]
    fn differing_neighbors_trigger_boundaries() {
        let params = display_defaults();
        let out = display_pixel(px(0), Some(px(1)), None, &params).unwrap();
        // Mid-luminance sample lands between white and black; the stroke is
        // gray, not the region color.
        assert_eq!(out[0], out[1]);
        assert_eq!(out[1], out[2]);

        let plain = display_pixel(px(0), Some(px(0)), Some(px(0)), &params).unwrap();
        assert_eq!(plain, [200, 100, 50]);
    }

    #[test]
    fn outside_neighbors_do_not_trigger_boundaries() {
        let params = display_defaults();
        let out = display_pixel(px(0), Some(ClassifiedPixel::outside()), None, &params).unwrap();
        assert_eq!(out, [200, 100, 50]);
    }

    #[test]
    fn boundary_mode_strokes_only_the_highlighted_region() {
        let mut params = display_defaults();
        params.highlight_mode = HighlightMode::Boundary;
        params.highlight_index = Some(0);
        params.show_boundaries = false;

        // Edge between highlight and another region is stroked.
        assert_ne!(
            display_pixel(px(1), Some(px(0)), None, &params).unwrap(),
            [200, 100, 50]
        );
        // Edge between two non-highlighted regions is not.
        assert_eq!(
            display_pixel(px(1), Some(px(2)), None, &params).unwrap(),
            [200, 100, 50]
        );
    }

    #[test]
    fn dim_other_scales_non_highlighted_pixels() {
        let mut params = display_defaults();
        params.highlight_index = Some(1);
        let out = display_pixel(px(0), None, None, &params).unwrap();
        assert_eq!(out, [80, 40, 20]);
        let kept = display_pixel(px(1), None, None, &params).unwrap();
        assert_eq!(kept, [200, 100, 50]);
    }

    #[test]
    fn boundary_color_contrasts_with_luminance() {
        assert_eq!(boundary_color([0.0, 0.0, 0.0]), [1.0, 1.0, 1.0]);
        assert_eq!(boundary_color([1.0, 1.0, 1.0]), [0.0, 0.0, 0.0]);
    }
}
