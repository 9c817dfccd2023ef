// Metal renderer bridge.
//
// Application-facing orchestrator over the two-pass pipeline. On macOS it
// drives the native Metal context; everywhere else (and whenever no Metal
// device exists in headless mode) it falls back to the CPU rasterizer in
// `crate::render`. Scene assembly, request validation, frame coalescing
// and the palette snapshot live in the shared `render::Renderer`.

mod context;
mod surface;

use std::fmt;

use winit::window::Window;

use crate::color::{NamedColor, RgbColor};
use crate::render::{
    build_scene, FrameScheduler, RenderRequest, RenderStats, Renderer, RequestError,
};
use crate::{info, warn};

#[derive(Debug)]
pub enum RenderError {
    UnsupportedGpu(String),
    ShaderCompile(String),
    PipelineLink(String),
    TargetIncomplete(String),
    Submit(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::UnsupportedGpu(log) => write!(f, "unsupported GPU: {}", log),
            RenderError::ShaderCompile(log) => write!(f, "shader compile failed: {}", log),
            RenderError::PipelineLink(log) => write!(f, "pipeline link failed: {}", log),
            RenderError::TargetIncomplete(log) => write!(f, "render target incomplete: {}", log),
            RenderError::Submit(log) => write!(f, "render submit failed: {}", log),
        }
    }
}

impl std::error::Error for RenderError {}

pub struct MetalOrchestrator {
    inner: Renderer,
    native: Option<context::MetalContext>,
    native_surface: Option<surface::MetalSurface>,
    scheduler: FrameScheduler,
    last_stats: RenderStats,
}

impl MetalOrchestrator {
    // Presenting orchestrator; requires a working Metal device because the
    // CPU fallback has no path onto a drawable.
    pub fn try_new(window: &Window) -> Result<Self, RenderError> {
        let size = window.inner_size();
        let native = context::MetalContext::new_presented(size.width, size.height)?;
        let native_surface = surface::MetalSurface::new(window, native.device_ref())
            .map_err(RenderError::UnsupportedGpu)?;
        info!(
            "Metal orchestrator ready: {}x{} presented",
            size.width, size.height
        );
        Ok(Self {
            inner: Renderer::new(size.width, size.height),
            native: Some(native),
            native_surface: Some(native_surface),
            scheduler: FrameScheduler::new(),
            last_stats: RenderStats::default(),
        })
    }

    // Headless orchestrator for tests and tools: native when a device
    // exists, CPU rasterizer otherwise.
    pub fn try_new_headless(width: u32, height: u32) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::TargetIncomplete(format!(
                "degenerate canvas {}x{}",
                width, height
            )));
        }
        let native = match context::MetalContext::new_headless(width, height) {
            Ok(native) => {
                info!("Metal orchestrator ready: {}x{} headless", width, height);
                Some(native)
            }
            Err(err) => {
                warn!("native Metal unavailable, using CPU rasterizer: {}", err);
                None
            }
        };
        Ok(Self {
            inner: Renderer::new(width, height),
            native,
            native_surface: None,
            scheduler: FrameScheduler::new(),
            last_stats: RenderStats::default(),
        })
    }

    pub fn has_native_pipeline(&self) -> bool {
        self.native.is_some()
    }

    pub fn resize(&mut self, width: u32, height: u32, scale_factor: f64) {
        self.inner.resize(width, height);
        if let Some(native) = self.native.as_mut() {
            native.resize(width, height);
        }
        if let Some(surface) = self.native_surface.as_ref() {
            surface.resize(width, height, scale_factor);
        }
    }

    // Immediate submit; supersedes any coalesced request. GPU failures
    // abort the render with a warning and leave the previous classified
    // framebuffer intact, so readback keeps answering.
    pub fn render_now(&mut self, request: &RenderRequest) -> Result<RenderStats, RequestError> {
        self.scheduler.cancel_pending();
        self.submit(request)
    }

    // Frame-coalesced submit: within one frame only the latest deferred
    // request survives.
    pub fn render_deferred(&mut self, request: RenderRequest) {
        self.scheduler.defer(request);
    }

    // Frame hook: submit whatever deferred request survived this frame.
    pub fn pump_deferred(&mut self) -> Option<Result<RenderStats, RequestError>> {
        let request = self.scheduler.take()?;
        Some(self.submit(&request))
    }

    fn submit(&mut self, request: &RenderRequest) -> Result<RenderStats, RequestError> {
        let Some(native) = self.native.as_mut() else {
            let mut stats = self.inner.render_now(request)?;
            stats.dropped_coalesced = self.scheduler.dropped_count();
            self.last_stats = stats;
            return Ok(stats);
        };

        let started = std::time::Instant::now();
        let scene = build_scene(request, self.inner.camera())?;
        self.inner.snapshot_palette(&request.palette);

        let submitted = match self.native_surface.as_ref() {
            Some(surface) => native.render_presented(surface, &scene),
            None => native.render_headless(&scene),
        };

        let mut stats = RenderStats {
            surface_triangles: scene.surface.triangle_count() - scene.cross_section_triangles,
            cross_section_triangles: scene.cross_section_triangles,
            wireframe_segments: scene
                .wireframe
                .as_ref()
                .map_or(0, |wire| wire.segment_count()),
            dropped_coalesced: self.scheduler.dropped_count(),
            render_ms: started.elapsed().as_secs_f32() * 1_000.0,
            aborted: false,
        };
        if let Err(err) = submitted {
            warn!("render aborted, framebuffer keeps previous contents: {}", err);
            stats.aborted = true;
        }
        self.last_stats = stats;
        Ok(stats)
    }

    // Blocks until every submitted GPU command has finished; readback is
    // only coherent after this returns.
    pub fn wait_for_render(&self) {
        match self.native.as_ref() {
            Some(native) => native.wait_for_render(),
            None => self.inner.wait_for_render(),
        }
    }

    pub fn color_at(&self, x: i32, y: i32) -> (Option<RgbColor>, Option<NamedColor>) {
        let Some(native) = self.native.as_ref() else {
            return self.inner.color_at(x, y);
        };

        let camera = self.inner.camera();
        if x < 0 || y < 0 || x as u32 >= camera.width() || y as u32 >= camera.height() {
            return (None, None);
        }
        let [r, g, b, idx] = native.read_pixel(x as u32, y as u32);
        if idx == crate::color::OUTSIDE_COLOR_SPACE {
            return (None, None);
        }
        let rgb = RgbColor::from_bytes(r, g, b);
        let named = self.inner.palette_snapshot().get(idx as usize).cloned();
        (Some(rgb), named)
    }

    // Diagnostic readback of one classified framebuffer texel in canvas
    // coordinates; parity tests compare this against the CPU pipeline.
    pub fn classified_bytes_at(&self, x: u32, y: u32) -> [u8; 4] {
        match self.native.as_ref() {
            Some(native) => native.read_pixel(x, y),
            None => {
                let frame = self.inner.classified_frame();
                frame.pixel(x, frame.height() - 1 - y).bytes()
            }
        }
    }

    // Same for the composed display image (headless contexts only keep a
    // readable copy; presented frames live in the drawable).
    pub fn display_bytes_at(&self, x: u32, y: u32) -> [u8; 4] {
        match self.native.as_ref() {
            Some(native) => native.read_display_pixel(x, y),
            None => {
                let display = self.inner.display_frame();
                display.pixel(x, display.height() - 1 - y)
            }
        }
    }

    pub fn last_stats(&self) -> RenderStats {
        self.last_stats
    }
}
