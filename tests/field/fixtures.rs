use crate::field::tolerances::SampleLevel;
use colorspace_visualization::color::{NamedColor, Palette, RgbColor, SpaceId};
use colorspace_visualization::render::{AxisSlices, RenderRequest, ViewMode};
use glam::Mat4;

// Uniform grid over [0, 1]^3, density keyed on the sample level.
pub fn color_grid(samples: usize) -> Vec<[f32; 3]> {
    let mut out = Vec::with_capacity(samples * samples * samples);
    let step = (samples - 1).max(1) as f32;
    for i in 0..samples {
        for j in 0..samples {
            for k in 0..samples {
                out.push([i as f32 / step, j as f32 / step, k as f32 / step]);
            }
        }
    }
    out
}

// Awkward inputs the grids tend to miss.
pub fn edge_case_colors() -> Vec<[f32; 3]> {
    vec![
        [0.0, 0.0, 0.0],
        [1.0, 1.0, 1.0],
        [0.5, 0.5, 0.5],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 1.0],
        [1.0, 0.0, 1.0],
        [1.0, 0.999, 0.998],
        [0.001, 0.0, 0.002],
        [128.0 / 255.0, 128.0 / 255.0, 127.0 / 255.0],
    ]
}

pub fn primary_palette() -> Palette {
    Palette::new(vec![
        NamedColor::new("Red", RgbColor::from_bytes(255, 0, 0)),
        NamedColor::new("Green", RgbColor::from_bytes(0, 255, 0)),
        NamedColor::new("Blue", RgbColor::from_bytes(0, 0, 255)),
    ])
    .expect("primary palette fits")
}

pub fn web_palette() -> Palette {
    Palette::new(vec![
        NamedColor::new("Black", RgbColor::from_bytes(0, 0, 0)),
        NamedColor::new("White", RgbColor::from_bytes(255, 255, 255)),
        NamedColor::new("Maroon", RgbColor::from_bytes(128, 0, 0)),
        NamedColor::new("Olive", RgbColor::from_bytes(128, 128, 0)),
        NamedColor::new("Navy", RgbColor::from_bytes(0, 0, 128)),
        NamedColor::new("Teal", RgbColor::from_bytes(0, 128, 128)),
        NamedColor::new("Silver", RgbColor::from_bytes(192, 192, 192)),
    ])
    .expect("web palette fits")
}

// A small spread of requests exercising both view modes, both metrics and
// the polar remap; used by the parity suite.
pub fn representative_requests(level: SampleLevel) -> Vec<RenderRequest> {
    let mut requests = Vec::new();

    let slices = AxisSlices::single(SpaceId::Rgb, "r", 128).expect("valid slice");
    let mut request = RenderRequest::new(SpaceId::Rgb, slices, ViewMode::Slice2D);
    request.palette = Palette::empty();
    requests.push(request);

    let slices = AxisSlices::single(SpaceId::Hsv, "v", 100).expect("valid slice");
    let mut request = RenderRequest::new(SpaceId::Hsv, slices, ViewMode::Slice2D);
    request.palette = primary_palette();
    request.metric = colorspace_visualization::color::MetricId::RgbEuclidean;
    request.threshold = 2.0;
    requests.push(request);

    let slices = AxisSlices::single(SpaceId::Hsl, "l", 50).expect("valid slice");
    let mut request = RenderRequest::new(SpaceId::Hsl, slices, ViewMode::Slice2D);
    request.polar = true;
    request.palette = web_palette();
    requests.push(request);

    let mut request = RenderRequest::new(
        SpaceId::Hsv,
        AxisSlices::full_volume(SpaceId::Hsv),
        ViewMode::Volume3D,
    );
    request.palette = web_palette();
    request.rotation = Mat4::from_rotation_y(0.7) * Mat4::from_rotation_x(-0.4);
    requests.push(request);

    if level == SampleLevel::Nightly {
        let slices = AxisSlices::volume(SpaceId::Hsv, &[("h", 90, 270), ("s", 0, 100), ("v", 0, 100)])
            .expect("valid wedge");
        let mut request = RenderRequest::new(SpaceId::Hsv, slices, ViewMode::Volume3D);
        request.polar = true;
        request.palette = primary_palette();
        request.rotation = Mat4::from_rotation_x(-0.9);
        requests.push(request);

        let mut request = RenderRequest::new(
            SpaceId::Rgb,
            AxisSlices::full_volume(SpaceId::Rgb),
            ViewMode::Volume3D,
        );
        request.palette = primary_palette();
        request.highlight_mode =
            colorspace_visualization::render::HighlightMode::HideOther;
        request.highlight_index = Some(1);
        request.rotation = Mat4::from_rotation_y(2.2);
        requests.push(request);
    }

    requests
}
