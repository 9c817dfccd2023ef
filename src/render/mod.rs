// Render Module
//
// CPU side of the two-pass color-field pipeline: render requests and their
// validation, scene assembly (surface, cross sections, wireframe, MVP),
// the software rasterizer fallback, frame coalescing, and pixel readback.
// The native Metal backend in `render_metal` consumes the same scenes.

pub mod camera;
pub mod field;
pub mod frame;
pub mod raster;
pub mod scheduler;

use std::fmt;
use std::time::Instant;

use glam::{Mat4, Vec2};

use crate::color::{NamedColor, Palette, RgbColor, SpaceId};
use crate::color::MetricId;
use crate::debug;
use crate::geometry::cylinder::PolarAxes;
use crate::geometry::{cross_section, cube, cylinder, SliceBox};
use crate::geometry::{SurfaceMesh, WireframeMesh, CUBE_SIZE_3D};

pub use camera::Camera;
pub use field::{ClassifiedPixel, DisplayParams, FieldParams, HighlightMode};
pub use frame::{ClassifiedFrame, DisplayFrame};
pub use scheduler::FrameScheduler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Slice2D,
    Volume3D,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SliceError {
    UnknownAxis { key: String },
    AxisValueOutOfRange { axis: String, value: i32 },
    InvertedRange { axis: String, lo: i32, hi: i32 },
}

impl fmt::Display for SliceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SliceError::UnknownAxis { key } => write!(f, "unknown axis '{}'", key),
            SliceError::AxisValueOutOfRange { axis, value } => {
                write!(f, "value {} out of range for axis '{}'", value, axis)
            }
            SliceError::InvertedRange { axis, lo, hi } => {
                write!(f, "inverted range [{}, {}] on axis '{}'", lo, hi, axis)
            }
        }
    }
}

impl std::error::Error for SliceError {}

// One [lo, hi] integer range on an axis; lo == hi pins a 2D slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisSlice {
    pub axis_key: &'static str,
    pub lo: i32,
    pub hi: i32,
}

// Per-axis slice ranges in UI units, validated against a space's axes.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisSlices {
    entries: Vec<AxisSlice>,
}

impl AxisSlices {
    // The single fixed axis of a 2D view.
    pub fn single(space: SpaceId, axis_key: &str, value: i32) -> Result<Self, SliceError> {
        let axis = space.space().axis(axis_key).ok_or_else(|| SliceError::UnknownAxis {
            key: axis_key.to_string(),
        })?;
        if !axis.contains(value) {
            return Err(SliceError::AxisValueOutOfRange {
                axis: axis.key.to_string(),
                value,
            });
        }
        Ok(Self {
            entries: vec![AxisSlice {
                axis_key: axis.key,
                lo: value,
                hi: value,
            }],
        })
    }

    // A sub-box of a 3D view; all three axes must be given.
    pub fn volume(space: SpaceId, ranges: &[(&str, i32, i32)]) -> Result<Self, SliceError> {
        let mut entries = Vec::with_capacity(ranges.len());
        for &(key, lo, hi) in ranges {
            let axis = space.space().axis(key).ok_or_else(|| SliceError::UnknownAxis {
                key: key.to_string(),
            })?;
            for value in [lo, hi] {
                if !axis.contains(value) {
                    return Err(SliceError::AxisValueOutOfRange {
                        axis: axis.key.to_string(),
                        value,
                    });
                }
            }
            if lo > hi {
                return Err(SliceError::InvertedRange {
                    axis: axis.key.to_string(),
                    lo,
                    hi,
                });
            }
            entries.push(AxisSlice {
                axis_key: axis.key,
                lo,
                hi,
            });
        }
        Ok(Self { entries })
    }

    pub fn full_volume(space: SpaceId) -> Self {
        let entries = space
            .space()
            .axes()
            .iter()
            .map(|axis| AxisSlice {
                axis_key: axis.key,
                lo: axis.min,
                hi: axis.max,
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[AxisSlice] {
        &self.entries
    }

    fn entry(&self, key: &str) -> Option<&AxisSlice> {
        self.entries.iter().find(|entry| entry.axis_key == key)
    }

    // Normalized [lo, hi] per axis in axis order; axes without an entry
    // span their full range (the free axes of a 2D slice).
    pub(crate) fn resolve(&self, space: SpaceId) -> SliceBox {
        let mut slice = SliceBox::full();
        for (index, axis) in space.space().axes().iter().enumerate() {
            if let Some(entry) = self.entry(axis.key) {
                slice.lo[index] = axis.normalize(entry.lo);
                slice.hi[index] = axis.normalize(entry.hi);
            }
        }
        slice
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestError {
    Slice(SliceError),
    SliceShape { mode: ViewMode, entries: usize },
    PolarUnsupported { space: SpaceId },
    HighlightIndexOutOfRange { index: usize, palette_len: usize },
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::Slice(err) => err.fmt(f),
            RequestError::SliceShape { mode, entries } => {
                write!(f, "{:?} expects a different slice shape, got {} entries", mode, entries)
            }
            RequestError::PolarUnsupported { space } => {
                write!(f, "{} has no axis usable as a polar angle", space)
            }
            RequestError::HighlightIndexOutOfRange { index, palette_len } => {
                write!(f, "highlight index {} outside palette of {}", index, palette_len)
            }
        }
    }
}

impl std::error::Error for RequestError {}

impl From<SliceError> for RequestError {
    fn from(err: SliceError) -> Self {
        RequestError::Slice(err)
    }
}

// The unit of work handed to a renderer.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub space: SpaceId,
    pub slices: AxisSlices,
    pub mode: ViewMode,
    pub polar: bool,
    pub show_boundaries: bool,
    pub palette: Palette,
    pub metric: MetricId,
    pub threshold: f32,
    pub highlight_mode: HighlightMode,
    pub highlight_index: Option<usize>,
    pub show_unmatched: bool,
    pub rotation: Mat4,
}

impl RenderRequest {
    pub fn new(space: SpaceId, slices: AxisSlices, mode: ViewMode) -> Self {
        let metric = crate::color::DistanceMetric::delta_e();
        Self {
            space,
            slices,
            mode,
            polar: false,
            show_boundaries: true,
            palette: Palette::empty(),
            metric: metric.id,
            threshold: metric.default_threshold,
            highlight_mode: HighlightMode::DimOther,
            highlight_index: None,
            show_unmatched: true,
            rotation: Mat4::IDENTITY,
        }
    }

    pub fn validate(&self) -> Result<(), RequestError> {
        let space = self.space.space();

        for entry in self.slices.entries() {
            let axis = space.axis(entry.axis_key).ok_or_else(|| SliceError::UnknownAxis {
                key: entry.axis_key.to_string(),
            })?;
            for value in [entry.lo, entry.hi] {
                if !axis.contains(value) {
                    return Err(SliceError::AxisValueOutOfRange {
                        axis: axis.key.to_string(),
                        value,
                    }
                    .into());
                }
            }
            if entry.lo > entry.hi {
                return Err(SliceError::InvertedRange {
                    axis: axis.key.to_string(),
                    lo: entry.lo,
                    hi: entry.hi,
                }
                .into());
            }
        }

        match self.mode {
            ViewMode::Slice2D => {
                let fixed = self.slices.entries();
                if fixed.len() != 1 || fixed[0].lo != fixed[0].hi {
                    return Err(RequestError::SliceShape {
                        mode: self.mode,
                        entries: fixed.len(),
                    });
                }
            }
            ViewMode::Volume3D => {
                let covered = space
                    .axes()
                    .iter()
                    .all(|axis| self.slices.entry(axis.key).is_some());
                if self.slices.entries().len() != 3 || !covered {
                    return Err(RequestError::SliceShape {
                        mode: self.mode,
                        entries: self.slices.entries().len(),
                    });
                }
            }
        }

        if self.polar && space.polar_axis().is_none() {
            return Err(RequestError::PolarUnsupported { space: self.space });
        }

        if let Some(index) = self.highlight_index {
            if index >= self.palette.len() {
                return Err(RequestError::HighlightIndexOutOfRange {
                    index,
                    palette_len: self.palette.len(),
                });
            }
        }

        Ok(())
    }

    // The fixed axis of a 2D slice, by index into the space's axis order.
    fn fixed_axis_index(&self) -> Option<usize> {
        let entry = self.slices.entries().first()?;
        self.space.space().axis_index(entry.axis_key)
    }

    fn hide_other_active(&self) -> bool {
        self.highlight_mode == HighlightMode::HideOther && self.highlight_index.is_some()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderStats {
    pub surface_triangles: usize,
    pub cross_section_triangles: usize,
    pub wireframe_segments: usize,
    pub dropped_coalesced: u64,
    pub render_ms: f32,
    pub aborted: bool,
}

// Everything one render submits to a backend.
pub(crate) struct Scene {
    pub surface: SurfaceMesh,
    pub wireframe: Option<WireframeMesh>,
    pub mvp: Mat4,
    pub field: FieldParams,
    pub display: DisplayParams,
    pub cross_section_triangles: usize,
}

// Axis-aligned bounding box of a cylinder wedge in disc coordinates, used
// to bound polar cross sections; the radius test in the fragment stage
// trims whatever the box overshoots.
fn polar_cross_section_box(slice: &SliceBox, polar: PolarAxes) -> SliceBox {
    let theta = (slice.lo[polar.angular], slice.hi[polar.angular]);
    let diameters = [slice.lo[polar.radial], slice.hi[polar.radial]];

    let mut min = Vec2::splat(f32::INFINITY);
    let mut max = Vec2::splat(f32::NEG_INFINITY);
    let mut consider = |t: f32, d: f32| {
        let (u, v) = cylinder::disc_coord(t, d);
        min = min.min(Vec2::new(u, v));
        max = max.max(Vec2::new(u, v));
    };

    for d in diameters {
        consider(theta.0, d);
        consider(theta.1, d);
    }
    // Quarter-turn extremes reached inside the angular range.
    let first = (theta.0 * 4.0).ceil() as i32;
    let last = (theta.1 * 4.0).floor() as i32;
    for quarter in first..=last {
        consider(quarter as f32 / 4.0, diameters[1]);
    }
    if diameters[0] == 0.0 {
        consider(0.0, 0.0);
    }

    let mut out = *slice;
    out.lo[polar.angular] = min.x;
    out.hi[polar.angular] = max.x;
    out.lo[polar.radial] = min.y;
    out.hi[polar.radial] = max.y;
    out
}

pub(crate) fn build_scene(request: &RenderRequest, camera: &Camera) -> Result<Scene, RequestError> {
    request.validate()?;

    let space = request.space.space();
    let slice = request.slices.resolve(request.space);
    let needs_interior = !request.show_unmatched || request.hide_other_active();

    let mut field = FieldParams {
        space: request.space,
        polar_axes: None,
        palette: request.palette.clone(),
        metric: request.metric,
        threshold: request.threshold,
        highlight_mode: request.highlight_mode,
        highlight_index: request.highlight_index,
        show_unmatched: request.show_unmatched,
    };
    let display = DisplayParams {
        show_boundaries: request.show_boundaries,
        highlight_mode: request.highlight_mode,
        highlight_index: request.highlight_index,
        show_unmatched: request.show_unmatched,
    };

    let scene = match request.mode {
        ViewMode::Slice2D => {
            let Some(fixed) = request.fixed_axis_index() else {
                return Err(RequestError::SliceShape {
                    mode: request.mode,
                    entries: request.slices.entries().len(),
                });
            };
            let size = camera.fit_size_2d();

            if request.polar {
                let fixed_key = space.axes()[fixed].key;
                match space.available_polar_axis(fixed_key) {
                    Some(hue) => {
                        let angular = space.axis_index(hue.key).unwrap_or(0);
                        let radial = (0..3)
                            .find(|&axis| axis != fixed && axis != angular)
                            .unwrap_or(angular);
                        field.polar_axes = Some((angular, radial));
                    }
                    None => {
                        // The would-be angle is the fixed axis: fall back to
                        // the Cartesian face.
                        debug!("polar requested with hue fixed; rendering Cartesian");
                    }
                }
            }

            Scene {
                surface: cube::face_2d(&slice, fixed, size),
                wireframe: None,
                mvp: camera.mvp(&camera::face_rotation(fixed)),
                field,
                display,
                cross_section_triangles: 0,
            }
        }
        ViewMode::Volume3D => {
            let size = CUBE_SIZE_3D;
            let polar = if request.polar {
                space.polar_axis().map(|hue| {
                    let angular = space.axis_index(hue.key).unwrap_or(0);
                    let mut remaining = (0..3).filter(|&axis| axis != angular);
                    let radial = remaining.next().unwrap_or(1);
                    let height = remaining.next().unwrap_or(2);
                    PolarAxes {
                        angular,
                        radial,
                        height,
                    }
                })
            } else {
                None
            };

            let (mut surface, wireframe) = match polar {
                Some(polar_axes) => {
                    field.polar_axes = Some((polar_axes.angular, polar_axes.radial));
                    (
                        cylinder::surface(&slice, polar_axes, size),
                        cylinder::wireframe(&slice, polar_axes, size),
                    )
                }
                None => (cube::surface(&slice, size), cube::wireframe(&slice, size)),
            };

            let mut cross_section_triangles = 0;
            if needs_interior {
                let section_box = match polar {
                    Some(polar_axes) => polar_cross_section_box(&slice, polar_axes),
                    None => slice,
                };
                let sections =
                    cross_section::cross_sections(&section_box, &request.rotation, size);
                cross_section_triangles = sections.triangle_count();
                let base = surface.vertices.len() as u16;
                surface.vertices.extend_from_slice(&sections.vertices);
                surface
                    .indices
                    .extend(sections.indices.iter().map(|index| index + base));
            }

            Scene {
                surface,
                wireframe: Some(wireframe),
                mvp: camera.mvp(&request.rotation),
                field,
                display,
                cross_section_triangles,
            }
        }
    };

    Ok(scene)
}

// CPU renderer: owns the classified framebuffer, the display image and the
// palette snapshot pixel readback answers from. Also the software fallback
// the Metal bridge uses when no native device exists.
pub struct Renderer {
    camera: Camera,
    frame: ClassifiedFrame,
    display: DisplayFrame,
    palette: Palette,
    scheduler: FrameScheduler,
    last_stats: RenderStats,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            camera: Camera::new(width, height),
            frame: ClassifiedFrame::new(width, height),
            display: DisplayFrame::new(width, height),
            palette: Palette::empty(),
            scheduler: FrameScheduler::new(),
            last_stats: RenderStats::default(),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
        self.frame = ClassifiedFrame::new(width, height);
        self.display = DisplayFrame::new(width, height);
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn render_now(&mut self, request: &RenderRequest) -> Result<RenderStats, RequestError> {
        // An immediate render supersedes any coalesced one.
        self.scheduler.cancel_pending();
        self.submit(request)
    }

    pub fn render_deferred(&mut self, request: RenderRequest) {
        self.scheduler.defer(request);
    }

    // Frame hook: run the surviving deferred request, if any.
    pub fn pump_deferred(&mut self) -> Option<Result<RenderStats, RequestError>> {
        let request = self.scheduler.take()?;
        Some(self.submit(&request))
    }

    fn submit(&mut self, request: &RenderRequest) -> Result<RenderStats, RequestError> {
        let started = Instant::now();
        let scene = build_scene(request, &self.camera)?;

        // Snapshot the palette so readback stays consistent with what was
        // rendered until the next submit.
        self.palette = request.palette.clone();

        self.frame.clear();
        raster::draw_surface(&scene.surface, &scene.mvp, &scene.field, &mut self.frame);
        frame::compose_display(&self.frame, &scene.display, &mut self.display);

        let wireframe_segments = match &scene.wireframe {
            Some(wire) => {
                raster::draw_wireframe(wire, &scene.mvp, &self.frame, &mut self.display);
                wire.segment_count()
            }
            None => 0,
        };

        let stats = RenderStats {
            surface_triangles: scene.surface.triangle_count() - scene.cross_section_triangles,
            cross_section_triangles: scene.cross_section_triangles,
            wireframe_segments,
            dropped_coalesced: self.scheduler.dropped_count(),
            render_ms: started.elapsed().as_secs_f32() * 1_000.0,
            aborted: false,
        };
        debug!(
            "rendered {:?} {}: {} surface tris, {} section tris, {} wire segments in {:.2}ms",
            request.mode,
            request.space,
            stats.surface_triangles,
            stats.cross_section_triangles,
            stats.wireframe_segments,
            stats.render_ms
        );
        self.last_stats = stats;
        Ok(stats)
    }

    // The CPU path completes synchronously; this exists so callers can
    // treat both backends uniformly before reading pixels back.
    pub fn wait_for_render(&self) {}

    // Canvas coordinates are top-origin; the framebuffer is bottom-origin,
    // so readback flips y exactly once, here.
    pub fn color_at(&self, x: i32, y: i32) -> (Option<RgbColor>, Option<NamedColor>) {
        if x < 0 || y < 0 {
            return (None, None);
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.frame.width() || y >= self.frame.height() {
            return (None, None);
        }
        let pixel = self.frame.pixel(x, self.frame.height() - 1 - y);
        if pixel.is_outside() {
            return (None, None);
        }
        let rgb = RgbColor::from_bytes(pixel.r, pixel.g, pixel.b);
        let named = self.palette.get(pixel.idx as usize).cloned();
        (Some(rgb), named)
    }

    pub fn palette_snapshot(&self) -> &Palette {
        &self.palette
    }

    // Used by backends that rasterize elsewhere but still answer readback
    // through this renderer's palette.
    pub(crate) fn snapshot_palette(&mut self, palette: &Palette) {
        self.palette = palette.clone();
    }

    pub fn classified_frame(&self) -> &ClassifiedFrame {
        &self.frame
    }

    pub fn display_frame(&self) -> &DisplayFrame {
        &self.display
    }

    pub fn last_stats(&self) -> RenderStats {
        self.last_stats
    }
}
