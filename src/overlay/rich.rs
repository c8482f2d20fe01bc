//! Rich overlay: egui debugger window painted through the host renderer.
//!
//! Once per frame the overlay composes an egui window (GPU capture button,
//! live metrics, memory pool lines), tessellates it, and submits the result
//! through [`RendererHooks::paint`]. The host renderer's mutable state is a
//! single-writer resource the overlay borrows: everything it touches is
//! captured in a [`RendererSnapshot`] before the submission and restored
//! right after, so the surrounding frame never observes the overlay's state
//! changes.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::config::DebugConfig;
use crate::memory::{MemoryProvider, POOL_LINES, PoolUsage};
#[cfg(feature = "live-metrics")]
use crate::metrics::{FrameMetrics, LiveMetrics, MetricsControl, MetricsGroup};

/// File extension for GPU capture dumps.
const CAPTURE_EXT: &str = "gxc";

/// Handle to a linked shader program in the host renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramId(pub u32);

/// Blend factors the host renderer exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendFactor {
    Zero,
    One,
    SrcColor,
    OneMinusSrcColor,
    SrcAlpha,
    OneMinusSrcAlpha,
    DstColor,
    OneMinusDstColor,
    DstAlpha,
    OneMinusDstAlpha,
}

/// State the overlay borrows from the host renderer.
///
/// Getter/setter pairs cover exactly the state the overlay's own draw
/// submission disturbs. [`RendererHooks::paint`] runs the overlay's pipeline
/// and must leave the active program unbound when it returns; flag and factor
/// state it may leave however it likes, the snapshot puts those back.
pub trait RendererHooks {
    fn active_program(&self) -> Option<ProgramId>;
    fn bind_program(&mut self, program: ProgramId);
    fn unbind_program(&mut self);

    fn blend_enabled(&self) -> bool;
    fn set_blend_enabled(&mut self, enabled: bool);
    fn blend_factors(&self) -> (BlendFactor, BlendFactor);
    fn set_blend_factors(&mut self, src: BlendFactor, dst: BlendFactor);

    fn cull_enabled(&self) -> bool;
    fn set_cull_enabled(&mut self, enabled: bool);
    fn depth_test_enabled(&self) -> bool;
    fn set_depth_test_enabled(&mut self, enabled: bool);
    fn scissor_test_enabled(&self) -> bool;
    fn set_scissor_test_enabled(&mut self, enabled: bool);

    fn set_viewport(&mut self, width: u32, height: u32);

    /// Submit the tessellated overlay through the renderer.
    fn paint(
        &mut self,
        primitives: Vec<egui::ClippedPrimitive>,
        textures_delta: egui::TexturesDelta,
    ) -> Result<()>;
}

/// Arms a one-shot GPU capture of the next frame into `path`.
pub trait CaptureTrigger {
    fn trigger_next_frame(&mut self, path: &Path) -> Result<()>;
}

/// Transient capture of the renderer state the overlay disturbs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RendererSnapshot {
    pub program: Option<ProgramId>,
    pub blend_enabled: bool,
    pub blend_factors: (BlendFactor, BlendFactor),
    pub cull_enabled: bool,
    pub depth_test_enabled: bool,
    pub scissor_test_enabled: bool,
}

impl RendererSnapshot {
    /// Record the renderer state before the overlay paints.
    pub fn capture(renderer: &impl RendererHooks) -> Self {
        Self {
            program: renderer.active_program(),
            blend_enabled: renderer.blend_enabled(),
            blend_factors: renderer.blend_factors(),
            cull_enabled: renderer.cull_enabled(),
            depth_test_enabled: renderer.depth_test_enabled(),
            scissor_test_enabled: renderer.scissor_test_enabled(),
        }
    }

    /// Put every recorded field back.
    ///
    /// Re-binding is skipped when no program was bound beforehand; the paint
    /// contract guarantees the program slot is already empty at this point.
    /// Blend factors are restored even when blend ends up disabled, so no
    /// stale factors surface when the host re-enables blending later.
    pub fn restore(&self, renderer: &mut impl RendererHooks) {
        if let Some(program) = self.program {
            renderer.bind_program(program);
        }
        let (src, dst) = self.blend_factors;
        renderer.set_blend_factors(src, dst);
        renderer.set_blend_enabled(self.blend_enabled);
        renderer.set_cull_enabled(self.cull_enabled);
        renderer.set_depth_test_enabled(self.depth_test_enabled);
        renderer.set_scissor_test_enabled(self.scissor_test_enabled);
    }
}

/// Capture dump filename: `cap_<appid>-<DD>_<MM>_<YYYY>-<HH>_<MM>_<SS>.gxc`.
fn capture_filename(app_id: &str, now: chrono::NaiveDateTime) -> String {
    format!(
        "cap_{}-{}.{}",
        app_id,
        now.format("%d_%m_%Y-%H_%M_%S"),
        CAPTURE_EXT
    )
}

/// Rich-mode overlay: the cindergl debugger window.
pub struct RichOverlay {
    ctx: egui::Context,
    /// Window visibility; the window's close button clears it.
    open: bool,
    app_id: String,
    capture_dir: PathBuf,
}

impl RichOverlay {
    pub fn new(config: &DebugConfig) -> Self {
        Self {
            ctx: egui::Context::default(),
            open: true,
            app_id: config.app_id.clone(),
            capture_dir: config.capture_dir.clone(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Compose and paint one debugger frame.
    ///
    /// Window position and size default to (150, 20) / 300x200 on first open
    /// only; egui preserves user-dragged placement afterwards. After the
    /// frame is built the renderer state is snapshotted, the overlay painted
    /// at the current display size, and the snapshot restored.
    #[cfg(feature = "live-metrics")]
    pub fn draw<C: MetricsControl>(
        &mut self,
        renderer: &mut impl RendererHooks,
        mem: &impl MemoryProvider,
        live: Option<&mut LiveMetrics<C>>,
        metrics: Option<&FrameMetrics>,
        capture: &mut impl CaptureTrigger,
        display_size: [f32; 2],
    ) {
        if !self.open {
            return;
        }
        // `run` may invoke the closure more than once per frame, so the live
        // stream handle is reborrowed instead of moved.
        let mut live = live;
        let ctx = self.ctx.clone();
        let full_output = ctx.run(raw_input_for(display_size), |ctx| {
            self.window(ctx, |ui, overlay| {
                overlay.capture_button(ui, capture);
                if let Some(live) = live.as_deref_mut() {
                    metrics_menu(ui, live);
                    ui.separator();
                    if let Some(m) = metrics {
                        metrics_summary(ui, m);
                        ui.separator();
                        group_details(ui, live.group(), m);
                        ui.separator();
                    }
                }
                pool_lines(ui, mem);
            });
        });
        self.submit(renderer, full_output, display_size);
    }

    /// Compose and paint one debugger frame (no metrics integration).
    #[cfg(not(feature = "live-metrics"))]
    pub fn draw(
        &mut self,
        renderer: &mut impl RendererHooks,
        mem: &impl MemoryProvider,
        capture: &mut impl CaptureTrigger,
        display_size: [f32; 2],
    ) {
        if !self.open {
            return;
        }
        let ctx = self.ctx.clone();
        let full_output = ctx.run(raw_input_for(display_size), |ctx| {
            self.window(ctx, |ui, overlay| {
                overlay.capture_button(ui, capture);
                ui.separator();
                pool_lines(ui, mem);
            });
        });
        self.submit(renderer, full_output, display_size);
    }

    /// Build the debugger window shell around `contents`.
    fn window(
        &mut self,
        ctx: &egui::Context,
        contents: impl FnOnce(&mut egui::Ui, &mut Self),
    ) {
        let mut open = self.open;
        egui::Window::new("cindergl debugger")
            .open(&mut open)
            .default_pos([150.0, 20.0])
            .default_size([300.0, 200.0])
            .show(ctx, |ui| contents(ui, self));
        self.open = open;
    }

    fn capture_button(&mut self, ui: &mut egui::Ui, capture: &mut impl CaptureTrigger) {
        if ui.button("Perform GPU capture").clicked() {
            let filename = capture_filename(&self.app_id, chrono::Local::now().naive_local());
            let path = self.capture_dir.join(filename);
            match capture.trigger_next_frame(&path) {
                Ok(()) => {
                    tracing::info!(path = %path.display(), "GPU capture armed for next frame");
                }
                Err(err) => {
                    tracing::warn!(%err, path = %path.display(), "GPU capture request failed");
                }
            }
        }
    }

    /// Snapshot renderer state, paint the overlay, restore the snapshot.
    fn submit(
        &self,
        renderer: &mut impl RendererHooks,
        full_output: egui::FullOutput,
        display_size: [f32; 2],
    ) {
        let snapshot = RendererSnapshot::capture(renderer);
        if snapshot.program.is_some() {
            renderer.unbind_program();
        }
        renderer.set_viewport(display_size[0] as u32, display_size[1] as u32);

        let primitives = self
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        if let Err(err) = renderer.paint(primitives, full_output.textures_delta) {
            tracing::warn!(%err, "overlay paint submission failed");
        }

        snapshot.restore(renderer);
    }
}

fn raw_input_for(display_size: [f32; 2]) -> egui::RawInput {
    egui::RawInput {
        screen_rect: Some(egui::Rect::from_min_size(
            egui::Pos2::ZERO,
            egui::vec2(display_size[0], display_size[1]),
        )),
        ..Default::default()
    }
}

fn pool_lines(ui: &mut egui::Ui, mem: &impl MemoryProvider) {
    for (pool, label) in POOL_LINES {
        ui.label(PoolUsage::measure(mem, pool).format_line(label));
    }
}

#[cfg(feature = "live-metrics")]
fn metrics_menu<C: MetricsControl>(ui: &mut egui::Ui, live: &mut LiveMetrics<C>) {
    ui.menu_button("Change metrics type", |ui| {
        for group in MetricsGroup::ALL {
            if ui
                .selectable_label(live.group() == group, group.label())
                .clicked()
            {
                live.set_group(group);
                ui.close();
            }
        }
    });
}

#[cfg(feature = "live-metrics")]
fn metrics_summary(ui: &mut egui::Ui, m: &FrameMetrics) {
    ui.label(format!("Frame number: {}", m.frame_number));
    ui.label(format!("Frame duration: {}us", m.frame_duration_us));
    ui.label(format!(
        "GPU activity: {}us ({:.0}%)",
        m.gpu_active_us,
        m.gpu_activity_percent()
    ));
    ui.label(format!("Scenes per frame: {}", m.scene_count));
}

/// Fields shown below the summary, switched on the active counter group.
#[cfg(feature = "live-metrics")]
fn group_details(ui: &mut egui::Ui, group: MetricsGroup, m: &FrameMetrics) {
    match group {
        MetricsGroup::ParamBuffer => {
            ui.label(format!(
                "Partial Rendering: {}",
                if m.partial_render { "Yes" } else { "No" }
            ));
            ui.label(format!(
                "Param Buffer Outage: {}",
                if m.vertex_jobs_paused { "Yes" } else { "No" }
            ));
            ui.label(format!(
                "Param Buffer Peak Usage: {} Bytes",
                m.param_buffer_peak_bytes
            ));
        }
        MetricsGroup::ShaderCores => {
            ui.label(format!(
                "Vertex jobs: {} (Time: {}us)",
                m.vertex_job_count,
                FrameMetrics::job_time_us(m.vertex_job_ticks)
            ));
            ui.label(format!(
                "Core Vertex Processing: {:.2}%",
                FrameMetrics::per_job(m.core_vertex_busy_pct, m.vertex_job_count)
            ));
            ui.separator();
            ui.label(format!(
                "Fragment jobs: {} (Time: {}us)",
                m.fragment_job_count,
                FrameMetrics::job_time_us(m.fragment_job_ticks)
            ));
            ui.label(format!(
                "Core Fragment Processing: {:.2}%",
                FrameMetrics::per_job(m.core_fragment_busy_pct, m.fragment_job_count)
            ));
            ui.separator();
            ui.label(format!(
                "Dependent Texture Reads: {:.2}%",
                FrameMetrics::per_job(m.dependent_tex_read_pct, m.fragment_job_count)
            ));
            ui.label(format!(
                "Non-Dependent Texture Reads: {:.2}%",
                FrameMetrics::per_job(m.independent_tex_read_pct, m.fragment_job_count)
            ));
            ui.separator();
            ui.label(format!(
                "Firmware jobs: {} (Time: {}us)",
                m.firmware_job_count,
                FrameMetrics::job_time_us(m.firmware_job_ticks)
            ));
        }
        MetricsGroup::Throughput => {
            ui.label(format!(
                "Vertex jobs: {} (Time: {}us)",
                m.vertex_job_count,
                FrameMetrics::job_time_us(m.vertex_job_ticks)
            ));
            ui.label(format!("Front-end primitives (Input): {}", m.input_primitives));
            ui.label(format!("Tiler primitives (Output): {}", m.tiled_primitives));
            ui.label(format!("Front-end vertices (Input): {}", m.input_vertices));
            ui.label(format!("Tiler vertices (Output): {}", m.tiled_vertices));
            ui.separator();
            ui.label(format!(
                "Fragment jobs: {} (Time: {}us)",
                m.fragment_job_count,
                FrameMetrics::job_time_us(m.fragment_job_ticks)
            ));
            ui.label(format!(
                "Rasterized pixels before HSR: {}",
                m.pixels_before_hsr
            ));
            ui.label(format!("Rasterized output pixels: {}", m.output_pixels));
            ui.label(format!("Rasterized output samples: {}", m.output_samples));
            ui.separator();
            ui.label(format!(
                "Firmware jobs: {} (Time: {}us)",
                m.firmware_job_count,
                FrameMetrics::job_time_us(m.firmware_job_ticks)
            ));
        }
        MetricsGroup::Memory => {
            ui.label(format!(
                "Vertex jobs: {} (Time: {}us)",
                m.vertex_job_count,
                FrameMetrics::job_time_us(m.vertex_job_ticks)
            ));
            ui.label(format!(
                "Tiler memory writes: {} bytes",
                m.tiler_writes_bytes
            ));
            ui.separator();
            ui.label(format!(
                "Fragment jobs: {} (Time: {}us)",
                m.fragment_job_count,
                FrameMetrics::job_time_us(m.fragment_job_ticks)
            ));
            ui.label(format!(
                "Param fetch memory reads: {} bytes",
                m.param_fetch_reads_bytes
            ));
            ui.separator();
            ui.label(format!(
                "Firmware jobs: {} (Time: {}us)",
                m.firmware_job_count,
                FrameMetrics::job_time_us(m.firmware_job_ticks)
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryPool;
    use rand::Rng;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Renderer double that tracks its state like the host state machine.
    #[derive(Debug, Clone, PartialEq)]
    struct MockRenderer {
        program: Option<ProgramId>,
        blend: bool,
        factors: (BlendFactor, BlendFactor),
        cull: bool,
        depth: bool,
        scissor: bool,
        viewport: (u32, u32),
        paint_count: usize,
    }

    impl MockRenderer {
        fn new() -> Self {
            Self {
                program: None,
                blend: false,
                factors: (BlendFactor::One, BlendFactor::Zero),
                cull: false,
                depth: false,
                scissor: false,
                viewport: (0, 0),
                paint_count: 0,
            }
        }

        fn state(&self) -> RendererSnapshot {
            RendererSnapshot {
                program: self.program,
                blend_enabled: self.blend,
                blend_factors: self.factors,
                cull_enabled: self.cull,
                depth_test_enabled: self.depth,
                scissor_test_enabled: self.scissor,
            }
        }
    }

    impl RendererHooks for MockRenderer {
        fn active_program(&self) -> Option<ProgramId> {
            self.program
        }
        fn bind_program(&mut self, program: ProgramId) {
            self.program = Some(program);
        }
        fn unbind_program(&mut self) {
            self.program = None;
        }
        fn blend_enabled(&self) -> bool {
            self.blend
        }
        fn set_blend_enabled(&mut self, enabled: bool) {
            self.blend = enabled;
        }
        fn blend_factors(&self) -> (BlendFactor, BlendFactor) {
            self.factors
        }
        fn set_blend_factors(&mut self, src: BlendFactor, dst: BlendFactor) {
            self.factors = (src, dst);
        }
        fn cull_enabled(&self) -> bool {
            self.cull
        }
        fn set_cull_enabled(&mut self, enabled: bool) {
            self.cull = enabled;
        }
        fn depth_test_enabled(&self) -> bool {
            self.depth
        }
        fn set_depth_test_enabled(&mut self, enabled: bool) {
            self.depth = enabled;
        }
        fn scissor_test_enabled(&self) -> bool {
            self.scissor
        }
        fn set_scissor_test_enabled(&mut self, enabled: bool) {
            self.scissor = enabled;
        }
        fn set_viewport(&mut self, width: u32, height: u32) {
            self.viewport = (width, height);
        }
        fn paint(
            &mut self,
            _primitives: Vec<egui::ClippedPrimitive>,
            _textures_delta: egui::TexturesDelta,
        ) -> Result<()> {
            // The overlay pipeline blends with scissoring and no depth/cull,
            // and leaves the program slot unbound per the trait contract.
            self.blend = true;
            self.factors = (BlendFactor::SrcAlpha, BlendFactor::OneMinusSrcAlpha);
            self.scissor = true;
            self.depth = false;
            self.cull = false;
            self.paint_count += 1;
            Ok(())
        }
    }

    struct MockCapture {
        requests: Vec<PathBuf>,
    }

    impl CaptureTrigger for MockCapture {
        fn trigger_next_frame(&mut self, path: &Path) -> Result<()> {
            self.requests.push(path.to_path_buf());
            Ok(())
        }
    }

    struct QuarterUsed;

    impl MemoryProvider for QuarterUsed {
        fn total_bytes(&self, _pool: MemoryPool) -> u64 {
            512 * 1024 * 1024
        }
        fn free_bytes(&self, _pool: MemoryPool) -> u64 {
            384 * 1024 * 1024
        }
    }

    fn random_factor(rng: &mut Pcg32) -> BlendFactor {
        const FACTORS: [BlendFactor; 10] = [
            BlendFactor::Zero,
            BlendFactor::One,
            BlendFactor::SrcColor,
            BlendFactor::OneMinusSrcColor,
            BlendFactor::SrcAlpha,
            BlendFactor::OneMinusSrcAlpha,
            BlendFactor::DstColor,
            BlendFactor::OneMinusDstColor,
            BlendFactor::DstAlpha,
            BlendFactor::OneMinusDstAlpha,
        ];
        FACTORS[rng.random_range(0..FACTORS.len())]
    }

    fn random_renderer(rng: &mut Pcg32) -> MockRenderer {
        let mut renderer = MockRenderer::new();
        renderer.program = if rng.random_bool(0.5) {
            Some(ProgramId(rng.random_range(1..=64)))
        } else {
            None
        };
        renderer.blend = rng.random_bool(0.5);
        renderer.factors = (random_factor(rng), random_factor(rng));
        renderer.cull = rng.random_bool(0.5);
        renderer.depth = rng.random_bool(0.5);
        renderer.scissor = rng.random_bool(0.5);
        renderer
    }

    #[test]
    fn test_snapshot_restore_round_trips_random_states() {
        let mut rng = Pcg32::seed_from_u64(0x5EED);
        for _ in 0..256 {
            let mut renderer = random_renderer(&mut rng);
            let before = renderer.state();

            let snapshot = RendererSnapshot::capture(&renderer);
            if snapshot.program.is_some() {
                renderer.unbind_program();
            }
            renderer.set_viewport(960, 544);
            renderer.paint(Vec::new(), egui::TexturesDelta::default()).unwrap();
            snapshot.restore(&mut renderer);

            assert_eq!(renderer.state(), before);
        }
    }

    fn test_overlay() -> RichOverlay {
        RichOverlay::new(&DebugConfig {
            app_id: "GAME42".to_string(),
            ..DebugConfig::default()
        })
    }

    #[cfg(feature = "live-metrics")]
    fn draw_once(overlay: &mut RichOverlay, renderer: &mut MockRenderer, capture: &mut MockCapture) {
        struct NopControl;
        impl MetricsControl for NopControl {
            fn live_stop(&mut self) {}
            fn live_set_group(&mut self, _group: MetricsGroup) {}
            fn live_start(&mut self) {}
        }
        let mut live = LiveMetrics::new(NopControl);
        let metrics = FrameMetrics {
            frame_number: 3,
            frame_duration_us: 16_666,
            gpu_active_us: 4_000,
            ..Default::default()
        };
        overlay.draw(
            renderer,
            &QuarterUsed,
            Some(&mut live),
            Some(&metrics),
            capture,
            [960.0, 544.0],
        );
    }

    #[cfg(not(feature = "live-metrics"))]
    fn draw_once(overlay: &mut RichOverlay, renderer: &mut MockRenderer, capture: &mut MockCapture) {
        overlay.draw(renderer, &QuarterUsed, capture, [960.0, 544.0]);
    }

    #[test]
    fn test_draw_paints_and_restores_state() {
        let mut rng = Pcg32::seed_from_u64(0xCAFE);
        for _ in 0..32 {
            let mut renderer = random_renderer(&mut rng);
            let before = renderer.state();
            let mut capture = MockCapture { requests: Vec::new() };
            let mut overlay = test_overlay();

            draw_once(&mut overlay, &mut renderer, &mut capture);

            assert_eq!(renderer.paint_count, 1);
            assert_eq!(renderer.viewport, (960, 544));
            assert_eq!(renderer.state(), before);
            // No capture without the button being clicked.
            assert!(capture.requests.is_empty());
        }
    }

    #[test]
    fn test_closed_overlay_skips_painting() {
        let mut renderer = MockRenderer::new();
        let mut capture = MockCapture { requests: Vec::new() };
        let mut overlay = test_overlay();
        overlay.toggle();
        assert!(!overlay.is_open());

        draw_once(&mut overlay, &mut renderer, &mut capture);
        assert_eq!(renderer.paint_count, 0);
    }

    #[test]
    fn test_capture_filename_encodes_app_id_and_timestamp() {
        let when = chrono::NaiveDate::from_ymd_opt(2026, 8, 29)
            .unwrap()
            .and_hms_opt(13, 5, 9)
            .unwrap();
        assert_eq!(
            capture_filename("GAME42", when),
            "cap_GAME42-29_08_2026-13_05_09.gxc"
        );
    }
}
