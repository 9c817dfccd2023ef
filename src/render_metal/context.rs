use super::surface::MetalSurface;
use super::RenderError;
use crate::render::Scene;

#[cfg(target_os = "macos")]
use crate::color::{MetricId, SpaceId, MAX_PALETTE_COLORS};
#[cfg(target_os = "macos")]
use crate::memory::pod::{self, Pod};
#[cfg(target_os = "macos")]
use crate::render::raster::{WIREFRAME_ALPHA, WIREFRAME_DEPTH_EPSILON};
#[cfg(target_os = "macos")]
use crate::render::HighlightMode;

#[cfg(target_os = "macos")]
#[repr(C)]
#[derive(Debug, Copy, Clone)]
struct TransformUniform {
    mvp: [[f32; 4]; 4],
}

#[cfg(target_os = "macos")]
unsafe impl Pod for TransformUniform {}

#[cfg(target_os = "macos")]
#[repr(C)]
#[derive(Debug, Copy, Clone)]
struct FieldUniform {
    space_id: u32,
    polar_angular: i32,
    polar_radial: i32,
    metric_id: u32,
    threshold: f32,
    palette_count: u32,
    highlight_mode: u32,
    highlight_index: i32,
    show_unmatched: u32,
    padding: [u32; 3],
    // RGB triples; slots past palette_count are never read.
    palette: [f32; 3 * MAX_PALETTE_COLORS],
}

#[cfg(target_os = "macos")]
unsafe impl Pod for FieldUniform {}

#[cfg(target_os = "macos")]
#[repr(C)]
#[derive(Debug, Copy, Clone)]
struct DisplayUniform {
    highlight_mode: u32,
    highlight_index: i32,
    show_unmatched: u32,
    show_boundaries: u32,
}

#[cfg(target_os = "macos")]
unsafe impl Pod for DisplayUniform {}

#[cfg(target_os = "macos")]
#[repr(C)]
#[derive(Debug, Copy, Clone)]
struct WireUniform {
    depth_epsilon: f32,
    alpha: f32,
    padding: [f32; 2],
}

#[cfg(target_os = "macos")]
unsafe impl Pod for WireUniform {}

#[cfg(target_os = "macos")]
fn space_code(space: SpaceId) -> u32 {
    match space {
        SpaceId::Rgb => 0,
        SpaceId::Hsv => 1,
        SpaceId::Hsl => 2,
    }
}

#[cfg(target_os = "macos")]
fn metric_code(metric: MetricId) -> u32 {
    match metric {
        MetricId::DeltaE => 0,
        MetricId::RgbEuclidean => 1,
    }
}

#[cfg(target_os = "macos")]
fn highlight_code(mode: HighlightMode) -> u32 {
    match mode {
        HighlightMode::DimOther => 0,
        HighlightMode::HideOther => 1,
        HighlightMode::Boundary => 2,
    }
}

#[cfg(target_os = "macos")]
fn field_uniform(scene: &Scene) -> FieldUniform {
    let field = &scene.field;
    let mut palette = [0.0f32; 3 * MAX_PALETTE_COLORS];
    for (index, entry) in field.palette.colors().iter().enumerate() {
        let [r, g, b] = entry.rgb.components();
        palette[3 * index] = r;
        palette[3 * index + 1] = g;
        palette[3 * index + 2] = b;
    }
    let (polar_angular, polar_radial) = match field.polar_axes {
        Some((angular, radial)) => (angular as i32, radial as i32),
        None => (-1, -1),
    };
    FieldUniform {
        space_id: space_code(field.space),
        polar_angular,
        polar_radial,
        metric_id: metric_code(field.metric),
        threshold: field.threshold,
        palette_count: field.palette.len() as u32,
        highlight_mode: highlight_code(field.highlight_mode),
        highlight_index: field.highlight_index.map_or(-1, |index| index as i32),
        show_unmatched: u32::from(field.show_unmatched),
        padding: [0; 3],
        palette,
    }
}

#[cfg(target_os = "macos")]
fn display_uniform(scene: &Scene) -> DisplayUniform {
    let display = &scene.display;
    DisplayUniform {
        highlight_mode: highlight_code(display.highlight_mode),
        highlight_index: display.highlight_index.map_or(-1, |index| index as i32),
        show_unmatched: u32::from(display.show_unmatched),
        show_boundaries: u32::from(display.show_boundaries),
    }
}

#[cfg(target_os = "macos")]
pub struct MetalContext {
    device: metal::Device,
    command_queue: metal::CommandQueue,
    field_pipeline: metal::RenderPipelineState,
    display_pipeline: metal::RenderPipelineState,
    wireframe_pipeline: metal::RenderPipelineState,
    depth_state: metal::DepthStencilState,
    classified_texture: metal::Texture,
    depth_texture: metal::Texture,
    display_texture: metal::Texture,
    position_buffer: metal::Buffer,
    coord_buffer: metal::Buffer,
    index_buffer: metal::Buffer,
    wire_buffer: metal::Buffer,
    transform_buffer: metal::Buffer,
    field_buffer: metal::Buffer,
    display_uniform_buffer: metal::Buffer,
    wire_uniform_buffer: metal::Buffer,
    readback_buffer: metal::Buffer,
    display_readback_buffer: metal::Buffer,
    display_format: metal::MTLPixelFormat,
    width: u32,
    height: u32,
    index_count: usize,
    wire_vertex_count: usize,
    last_command_buffer: Option<metal::CommandBuffer>,
}

#[cfg(target_os = "macos")]
impl MetalContext {
    // Presented contexts target the layer's format, headless ones an
    // offscreen RGBA target the tests can read back.
    pub fn new_presented(width: u32, height: u32) -> Result<Self, RenderError> {
        Self::new(width, height, MetalSurface::PIXEL_FORMAT)
    }

    pub fn new_headless(width: u32, height: u32) -> Result<Self, RenderError> {
        Self::new(width, height, metal::MTLPixelFormat::RGBA8Unorm)
    }

    fn new(
        width: u32,
        height: u32,
        display_format: metal::MTLPixelFormat,
    ) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::TargetIncomplete(format!(
                "degenerate canvas {}x{}",
                width, height
            )));
        }

        let device = metal::Device::system_default()
            .ok_or_else(|| RenderError::UnsupportedGpu("Metal device unavailable".to_string()))?;
        let command_queue = device.new_command_queue();
        let compile_options = metal::CompileOptions::new();

        let field_library = device
            .new_library_with_source(include_str!("shaders/compute.metal"), &compile_options)
            .map_err(|err| RenderError::ShaderCompile(format!("compute.metal: {err}")))?;
        let display_library = device
            .new_library_with_source(include_str!("shaders/render.metal"), &compile_options)
            .map_err(|err| RenderError::ShaderCompile(format!("render.metal: {err}")))?;
        let wire_library = device
            .new_library_with_source(include_str!("shaders/wireframe.metal"), &compile_options)
            .map_err(|err| RenderError::ShaderCompile(format!("wireframe.metal: {err}")))?;

        let function = |library: &metal::Library, name: &str| {
            library
                .get_function(name, None)
                .map_err(|err| RenderError::ShaderCompile(format!("{name} not found: {err}")))
        };

        let field_pipeline = {
            let desc = metal::RenderPipelineDescriptor::new();
            desc.set_vertex_function(Some(&function(&field_library, "compute_vertex")?));
            desc.set_fragment_function(Some(&function(&field_library, "compute_fragment")?));
            let color = desc
                .color_attachments()
                .object_at(0)
                .ok_or_else(|| RenderError::PipelineLink("missing color attachment".to_string()))?;
            color.set_pixel_format(metal::MTLPixelFormat::RGBA8Unorm);
            desc.set_depth_attachment_pixel_format(metal::MTLPixelFormat::Depth32Float);
            device
                .new_render_pipeline_state(&desc)
                .map_err(|err| RenderError::PipelineLink(format!("field pipeline: {err}")))?
        };

        let display_pipeline = {
            let desc = metal::RenderPipelineDescriptor::new();
            desc.set_vertex_function(Some(&function(&display_library, "render_vertex")?));
            desc.set_fragment_function(Some(&function(&display_library, "render_fragment")?));
            let color = desc
                .color_attachments()
                .object_at(0)
                .ok_or_else(|| RenderError::PipelineLink("missing color attachment".to_string()))?;
            color.set_pixel_format(display_format);
            device
                .new_render_pipeline_state(&desc)
                .map_err(|err| RenderError::PipelineLink(format!("display pipeline: {err}")))?
        };

        let wireframe_pipeline = {
            let desc = metal::RenderPipelineDescriptor::new();
            desc.set_vertex_function(Some(&function(&wire_library, "wireframe_vertex")?));
            desc.set_fragment_function(Some(&function(&wire_library, "wireframe_fragment")?));
            let color = desc
                .color_attachments()
                .object_at(0)
                .ok_or_else(|| RenderError::PipelineLink("missing color attachment".to_string()))?;
            color.set_pixel_format(display_format);
            color.set_blending_enabled(true);
            color.set_rgb_blend_operation(metal::MTLBlendOperation::Add);
            color.set_alpha_blend_operation(metal::MTLBlendOperation::Add);
            color.set_source_rgb_blend_factor(metal::MTLBlendFactor::SourceAlpha);
            color.set_source_alpha_blend_factor(metal::MTLBlendFactor::SourceAlpha);
            color.set_destination_rgb_blend_factor(metal::MTLBlendFactor::OneMinusSourceAlpha);
            color.set_destination_alpha_blend_factor(metal::MTLBlendFactor::OneMinusSourceAlpha);
            device
                .new_render_pipeline_state(&desc)
                .map_err(|err| RenderError::PipelineLink(format!("wireframe pipeline: {err}")))?
        };

        let depth_state = {
            let desc = metal::DepthStencilDescriptor::new();
            desc.set_depth_compare_function(metal::MTLCompareFunction::Less);
            desc.set_depth_write_enabled(true);
            device.new_depth_stencil_state(&desc)
        };

        let classified_texture = Self::create_target(
            &device,
            width,
            height,
            metal::MTLPixelFormat::RGBA8Unorm,
            "classified-framebuffer",
        );
        let depth_texture = Self::create_target(
            &device,
            width,
            height,
            metal::MTLPixelFormat::Depth32Float,
            "classified-depth",
        );
        let display_texture = Self::create_target(
            &device,
            width,
            height,
            display_format,
            "display-target",
        );

        let readback_bytes = (width * height * 4) as usize;
        let context = Self {
            position_buffer: Self::create_shared_buffer(&device, 256, "field-positions"),
            coord_buffer: Self::create_shared_buffer(&device, 256, "field-color-coords"),
            index_buffer: Self::create_shared_buffer(&device, 256, "field-indices"),
            wire_buffer: Self::create_shared_buffer(&device, 256, "wireframe-positions"),
            transform_buffer: Self::create_shared_buffer(
                &device,
                std::mem::size_of::<TransformUniform>(),
                "transform-uniform",
            ),
            field_buffer: Self::create_shared_buffer(
                &device,
                std::mem::size_of::<FieldUniform>(),
                "field-uniform",
            ),
            display_uniform_buffer: Self::create_shared_buffer(
                &device,
                std::mem::size_of::<DisplayUniform>(),
                "display-uniform",
            ),
            wire_uniform_buffer: Self::create_shared_buffer(
                &device,
                std::mem::size_of::<WireUniform>(),
                "wireframe-uniform",
            ),
            readback_buffer: Self::create_shared_buffer(&device, readback_bytes, "classified-readback"),
            display_readback_buffer: Self::create_shared_buffer(
                &device,
                readback_bytes,
                "display-readback",
            ),
            device,
            command_queue,
            field_pipeline,
            display_pipeline,
            wireframe_pipeline,
            depth_state,
            classified_texture,
            depth_texture,
            display_texture,
            display_format,
            width,
            height,
            index_count: 0,
            wire_vertex_count: 0,
            last_command_buffer: None,
        };
        Ok(context)
    }

    pub fn device_ref(&self) -> &metal::DeviceRef {
        self.device.as_ref()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        let width = width.max(1);
        let height = height.max(1);
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.classified_texture = Self::create_target(
            &self.device,
            width,
            height,
            metal::MTLPixelFormat::RGBA8Unorm,
            "classified-framebuffer",
        );
        self.depth_texture = Self::create_target(
            &self.device,
            width,
            height,
            metal::MTLPixelFormat::Depth32Float,
            "classified-depth",
        );
        self.display_texture =
            Self::create_target(&self.device, width, height, self.display_format, "display-target");
        let readback_bytes = (width * height * 4) as usize;
        self.readback_buffer =
            Self::create_shared_buffer(&self.device, readback_bytes, "classified-readback");
        self.display_readback_buffer =
            Self::create_shared_buffer(&self.device, readback_bytes, "display-readback");
        self.last_command_buffer = None;
    }

    // Render into the next drawable of a presenting surface.
    pub fn render_presented(
        &mut self,
        surface: &MetalSurface,
        scene: &Scene,
    ) -> Result<(), String> {
        let drawable = surface
            .next_drawable()
            .ok_or_else(|| "metal layer returned no drawable".to_string())?;
        let command_buffer = self.encode(scene, Some(drawable.texture()), false)?;
        command_buffer.present_drawable(drawable);
        command_buffer.commit();
        self.last_command_buffer = Some(command_buffer.to_owned());
        Ok(())
    }

    // Render into the owned offscreen display target.
    pub fn render_headless(&mut self, scene: &Scene) -> Result<(), String> {
        let command_buffer = self.encode(scene, None, true)?;
        command_buffer.commit();
        self.last_command_buffer = Some(command_buffer.to_owned());
        Ok(())
    }

    // `target` defaults to the owned offscreen display texture.
    fn encode(
        &mut self,
        scene: &Scene,
        target: Option<&metal::TextureRef>,
        capture_display: bool,
    ) -> Result<metal::CommandBuffer, String> {
        self.upload_scene(scene)?;
        let target = match target {
            Some(texture) => texture,
            None => self.display_texture.as_ref(),
        };

        let command_buffer = self.command_queue.new_command_buffer();
        command_buffer.set_label("color-field-render");

        // Pass A: rasterize the field into the classified framebuffer. The
        // clear alpha of 1.0 is the OUTSIDE_COLOR_SPACE sentinel.
        {
            let pass = metal::RenderPassDescriptor::new();
            let color = pass
                .color_attachments()
                .object_at(0)
                .ok_or_else(|| "missing pass A color attachment".to_string())?;
            color.set_texture(Some(self.classified_texture.as_ref()));
            color.set_load_action(metal::MTLLoadAction::Clear);
            color.set_store_action(metal::MTLStoreAction::Store);
            color.set_clear_color(metal::MTLClearColor::new(0.0, 0.0, 0.0, 1.0));
            let depth = pass
                .depth_attachment()
                .ok_or_else(|| "missing pass A depth attachment".to_string())?;
            depth.set_texture(Some(self.depth_texture.as_ref()));
            depth.set_load_action(metal::MTLLoadAction::Clear);
            depth.set_store_action(metal::MTLStoreAction::Store);
            depth.set_clear_depth(1.0);

            let encoder = command_buffer.new_render_command_encoder(pass);
            encoder.set_render_pipeline_state(&self.field_pipeline);
            encoder.set_depth_stencil_state(&self.depth_state);
            encoder.set_cull_mode(metal::MTLCullMode::None);
            encoder.set_vertex_buffer(0, Some(self.position_buffer.as_ref()), 0);
            encoder.set_vertex_buffer(1, Some(self.coord_buffer.as_ref()), 0);
            encoder.set_vertex_buffer(2, Some(self.transform_buffer.as_ref()), 0);
            encoder.set_fragment_buffer(0, Some(self.field_buffer.as_ref()), 0);
            if self.index_count > 0 {
                encoder.draw_indexed_primitives(
                    metal::MTLPrimitiveType::Triangle,
                    self.index_count as u64,
                    metal::MTLIndexType::UInt16,
                    self.index_buffer.as_ref(),
                    0,
                );
            }
            encoder.end_encoding();
        }

        // Pass B: full-screen resolve of the classified framebuffer.
        {
            let pass = metal::RenderPassDescriptor::new();
            let color = pass
                .color_attachments()
                .object_at(0)
                .ok_or_else(|| "missing pass B color attachment".to_string())?;
            color.set_texture(Some(target));
            color.set_load_action(metal::MTLLoadAction::Clear);
            color.set_store_action(metal::MTLStoreAction::Store);
            color.set_clear_color(metal::MTLClearColor::new(0.0, 0.0, 0.0, 0.0));

            let encoder = command_buffer.new_render_command_encoder(pass);
            encoder.set_render_pipeline_state(&self.display_pipeline);
            encoder.set_fragment_texture(0, Some(self.classified_texture.as_ref()));
            encoder.set_fragment_buffer(0, Some(self.display_uniform_buffer.as_ref()), 0);
            encoder.draw_primitives(metal::MTLPrimitiveType::TriangleStrip, 0, 4);
            encoder.end_encoding();
        }

        // Wireframe overlay: blended lines, depth-tested in the fragment
        // stage against the pass A depth texture, never writing depth.
        if self.wire_vertex_count > 0 {
            let pass = metal::RenderPassDescriptor::new();
            let color = pass
                .color_attachments()
                .object_at(0)
                .ok_or_else(|| "missing wireframe color attachment".to_string())?;
            color.set_texture(Some(target));
            color.set_load_action(metal::MTLLoadAction::Load);
            color.set_store_action(metal::MTLStoreAction::Store);

            let encoder = command_buffer.new_render_command_encoder(pass);
            encoder.set_render_pipeline_state(&self.wireframe_pipeline);
            encoder.set_vertex_buffer(0, Some(self.wire_buffer.as_ref()), 0);
            encoder.set_vertex_buffer(1, Some(self.transform_buffer.as_ref()), 0);
            encoder.set_fragment_texture(0, Some(self.depth_texture.as_ref()));
            encoder.set_fragment_buffer(0, Some(self.wire_uniform_buffer.as_ref()), 0);
            encoder.draw_primitives(
                metal::MTLPrimitiveType::Line,
                0,
                self.wire_vertex_count as u64,
            );
            encoder.end_encoding();
        }

        // Stage the classified framebuffer (and, headless, the display
        // image) for CPU readback.
        {
            let blit = command_buffer.new_blit_command_encoder();
            self.blit_texture(blit, self.classified_texture.as_ref(), &self.readback_buffer);
            if capture_display {
                self.blit_texture(blit, target, &self.display_readback_buffer);
            }
            blit.end_encoding();
        }

        Ok(command_buffer.to_owned())
    }

    fn blit_texture(
        &self,
        blit: &metal::BlitCommandEncoderRef,
        texture: &metal::TextureRef,
        buffer: &metal::Buffer,
    ) {
        blit.copy_from_texture_to_buffer(
            texture,
            0,
            0,
            metal::MTLOrigin { x: 0, y: 0, z: 0 },
            metal::MTLSize {
                width: self.width as u64,
                height: self.height as u64,
                depth: 1,
            },
            buffer.as_ref(),
            0,
            (self.width * 4) as u64,
            0,
            metal::MTLBlitOption::empty(),
        );
    }

    fn upload_scene(&mut self, scene: &Scene) -> Result<(), String> {
        let positions: Vec<[f32; 3]> = scene
            .surface
            .vertices
            .iter()
            .map(|vertex| vertex.position.to_array())
            .collect();
        let coords: Vec<[f32; 3]> = scene
            .surface
            .vertices
            .iter()
            .map(|vertex| vertex.color_coord.to_array())
            .collect();
        let wires: Vec<[f32; 3]> = scene
            .wireframe
            .as_ref()
            .map(|wire| wire.vertices.iter().map(|vertex| vertex.to_array()).collect())
            .unwrap_or_default();

        Self::ensure_capacity(&self.device, &mut self.position_buffer, &positions, "field-positions");
        Self::ensure_capacity(&self.device, &mut self.coord_buffer, &coords, "field-color-coords");
        Self::ensure_capacity(&self.device, &mut self.index_buffer, &scene.surface.indices, "field-indices");
        Self::ensure_capacity(&self.device, &mut self.wire_buffer, &wires, "wireframe-positions");

        Self::write_pod_slice(self.position_buffer.as_ref(), &positions)?;
        Self::write_pod_slice(self.coord_buffer.as_ref(), &coords)?;
        Self::write_pod_slice(self.index_buffer.as_ref(), &scene.surface.indices)?;
        Self::write_pod_slice(self.wire_buffer.as_ref(), &wires)?;
        self.index_count = scene.surface.indices.len();
        self.wire_vertex_count = wires.len();

        let transform = TransformUniform {
            mvp: scene.mvp.to_cols_array_2d(),
        };
        Self::write_pod(self.transform_buffer.as_ref(), &transform)?;
        Self::write_pod(self.field_buffer.as_ref(), &field_uniform(scene))?;
        Self::write_pod(self.display_uniform_buffer.as_ref(), &display_uniform(scene))?;
        let wire_uniform = WireUniform {
            depth_epsilon: WIREFRAME_DEPTH_EPSILON,
            alpha: WIREFRAME_ALPHA,
            padding: [0.0; 2],
        };
        Self::write_pod(self.wire_uniform_buffer.as_ref(), &wire_uniform)?;
        Ok(())
    }

    pub fn wait_for_render(&self) {
        if let Some(command_buffer) = &self.last_command_buffer {
            command_buffer.wait_until_completed();
        }
    }

    // One classified texel in canvas coordinates (top-origin rows, which is
    // how the blit laid the texture out in the staging buffer).
    pub fn read_pixel(&self, x: u32, y: u32) -> [u8; 4] {
        debug_assert!(x < self.width && y < self.height);
        let offset = ((y * self.width + x) * 4) as usize;
        let bytes = unsafe {
            std::slice::from_raw_parts(
                self.readback_buffer.contents() as *const u8,
                (self.width * self.height * 4) as usize,
            )
        };
        [bytes[offset], bytes[offset + 1], bytes[offset + 2], bytes[offset + 3]]
    }

    pub fn read_display_pixel(&self, x: u32, y: u32) -> [u8; 4] {
        debug_assert!(x < self.width && y < self.height);
        let offset = ((y * self.width + x) * 4) as usize;
        let bytes = unsafe {
            std::slice::from_raw_parts(
                self.display_readback_buffer.contents() as *const u8,
                (self.width * self.height * 4) as usize,
            )
        };
        [bytes[offset], bytes[offset + 1], bytes[offset + 2], bytes[offset + 3]]
    }

    fn create_target(
        device: &metal::Device,
        width: u32,
        height: u32,
        format: metal::MTLPixelFormat,
        label: &str,
    ) -> metal::Texture {
        let desc = metal::TextureDescriptor::new();
        desc.set_texture_type(metal::MTLTextureType::D2);
        desc.set_pixel_format(format);
        desc.set_width(width.max(1) as u64);
        desc.set_height(height.max(1) as u64);
        desc.set_depth(1);
        desc.set_mipmap_level_count(1);
        desc.set_storage_mode(metal::MTLStorageMode::Private);
        desc.set_usage(metal::MTLTextureUsage::RenderTarget | metal::MTLTextureUsage::ShaderRead);
        let texture = device.new_texture(&desc);
        texture.set_label(label);
        texture
    }

    fn create_shared_buffer(device: &metal::Device, bytes: usize, label: &str) -> metal::Buffer {
        let buffer = device.new_buffer(
            bytes.max(256) as u64,
            metal::MTLResourceOptions::StorageModeShared,
        );
        buffer.set_label(label);
        buffer
    }

    fn ensure_capacity<T: Pod>(
        device: &metal::Device,
        buffer: &mut metal::Buffer,
        data: &[T],
        label: &str,
    ) {
        let required = std::mem::size_of_val(data);
        if required > buffer.length() as usize {
            *buffer = Self::create_shared_buffer(device, required.next_power_of_two(), label);
        }
    }

    fn write_pod<T: Pod>(buffer: &metal::BufferRef, data: &T) -> Result<(), String> {
        Self::write_pod_slice(buffer, std::slice::from_ref(data))
    }

    fn write_pod_slice<T: Pod>(buffer: &metal::BufferRef, data: &[T]) -> Result<(), String> {
        let bytes = pod::bytes_of(data);
        if bytes.len() > buffer.length() as usize {
            return Err(format!(
                "buffer write overflow: {} bytes > {} bytes",
                bytes.len(),
                buffer.length()
            ));
        }
        if bytes.is_empty() {
            return Ok(());
        }
        unsafe {
            std::ptr::copy_nonoverlapping(
                bytes.as_ptr(),
                buffer.contents() as *mut u8,
                bytes.len(),
            );
        }
        Ok(())
    }
}

#[cfg(not(target_os = "macos"))]
pub struct MetalContext;

#[cfg(not(target_os = "macos"))]
impl MetalContext {
    pub fn new_presented(_width: u32, _height: u32) -> Result<Self, RenderError> {
        Err(RenderError::UnsupportedGpu(
            "native Metal backend is only available on macOS".to_string(),
        ))
    }

    pub fn new_headless(_width: u32, _height: u32) -> Result<Self, RenderError> {
        Err(RenderError::UnsupportedGpu(
            "native Metal backend is only available on macOS".to_string(),
        ))
    }

    pub fn device_ref(&self) -> &() {
        &()
    }

    pub fn resize(&mut self, _width: u32, _height: u32) {}

    pub fn render_presented(
        &mut self,
        _surface: &MetalSurface,
        _scene: &Scene,
    ) -> Result<(), String> {
        Ok(())
    }

    pub fn render_headless(&mut self, _scene: &Scene) -> Result<(), String> {
        Ok(())
    }

    pub fn wait_for_render(&self) {}

    pub fn read_pixel(&self, _x: u32, _y: u32) -> [u8; 4] {
        [0, 0, 0, 255]
    }

    pub fn read_display_pixel(&self, _x: u32, _y: u32) -> [u8; 4] {
        [0; 4]
    }
}
