//! Live GPU performance counters.
//!
//! On devkit hardware the native driver streams one group of performance
//! counters at a time into a per-frame snapshot. The snapshot is overwritten
//! every frame and is only meaningful for the frame that just completed; the
//! overlay reads it, never writes it.
//!
//! Switching the active group tears the stream down and brings it back up,
//! so the host's frame index into the stream restarts from zero.

/// Per-frame GPU counter snapshot published by the driver.
///
/// All fields describe the frame that just completed. Job time counters tick
/// at four ticks per microsecond; use [`FrameMetrics::job_time_us`] when
/// displaying them.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameMetrics {
    /// Frame sequence number as counted by the driver.
    pub frame_number: u32,
    /// Wall time of the frame in microseconds.
    pub frame_duration_us: u32,
    /// Time the GPU spent busy during the frame, in microseconds.
    pub gpu_active_us: u32,
    /// Scenes submitted during the frame.
    pub scene_count: u32,

    /// The frame was flushed in multiple partial renders.
    pub partial_render: bool,
    /// Vertex work stalled waiting on parameter buffer space.
    pub vertex_jobs_paused: bool,
    /// Parameter buffer high-water mark in bytes.
    pub param_buffer_peak_bytes: u64,

    pub vertex_job_count: u32,
    pub vertex_job_ticks: u64,
    pub fragment_job_count: u32,
    pub fragment_job_ticks: u64,
    pub firmware_job_count: u32,
    pub firmware_job_ticks: u64,

    /// Shader core busy percentages, accumulated over every job of the frame.
    /// Divide by the matching job count for a per-job average.
    pub core_vertex_busy_pct: f32,
    pub core_fragment_busy_pct: f32,
    pub dependent_tex_read_pct: f32,
    pub independent_tex_read_pct: f32,

    /// Primitives and vertices entering the front end and leaving the tiler.
    pub input_primitives: u32,
    pub tiled_primitives: u32,
    pub input_vertices: u32,
    pub tiled_vertices: u32,

    /// Rasterizer throughput around hidden surface removal.
    pub pixels_before_hsr: u32,
    pub output_pixels: u32,
    pub output_samples: u32,

    /// Memory interface traffic in bytes.
    pub tiler_writes_bytes: u32,
    pub param_fetch_reads_bytes: u32,
}

impl FrameMetrics {
    /// Convert a job time counter to microseconds (4 ticks per microsecond).
    pub fn job_time_us(ticks: u64) -> u64 {
        ticks / 4
    }

    /// GPU-busy share of the frame, zero when the frame duration is unknown.
    pub fn gpu_activity_percent(&self) -> f32 {
        if self.frame_duration_us == 0 {
            0.0
        } else {
            100.0 * self.gpu_active_us as f32 / self.frame_duration_us as f32
        }
    }

    /// Average an accumulated percentage over a job count, zero when no jobs ran.
    pub fn per_job(total_pct: f32, jobs: u32) -> f32 {
        if jobs == 0 { 0.0 } else { total_pct / jobs as f32 }
    }
}

/// Mutually exclusive live counter groups the driver can stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetricsGroup {
    /// Parameter buffer pressure: partial renders, stalls, peak usage.
    #[default]
    ParamBuffer,
    /// Shader core workload percentages per stage.
    ShaderCores,
    /// Primitive, vertex, and pixel throughput.
    Throughput,
    /// Memory interface read/write traffic.
    Memory,
}

impl MetricsGroup {
    /// Every group, in menu order.
    pub const ALL: [MetricsGroup; 4] = [
        MetricsGroup::ParamBuffer,
        MetricsGroup::ShaderCores,
        MetricsGroup::Throughput,
        MetricsGroup::Memory,
    ];

    /// Menu label for the group.
    pub fn label(&self) -> &'static str {
        match self {
            MetricsGroup::ParamBuffer => "Param Buffer",
            MetricsGroup::ShaderCores => "Shader Cores",
            MetricsGroup::Throughput => "Throughput",
            MetricsGroup::Memory => "Memory",
        }
    }
}

/// Driver-side control surface for the live counter stream.
pub trait MetricsControl {
    fn live_stop(&mut self);
    fn live_set_group(&mut self, group: MetricsGroup);
    fn live_start(&mut self);
}

/// Live counter stream state: the active group and a frame index that
/// restarts whenever the stream does.
#[derive(Debug)]
pub struct LiveMetrics<C: MetricsControl> {
    control: C,
    group: MetricsGroup,
    frame_index: u32,
}

impl<C: MetricsControl> LiveMetrics<C> {
    pub fn new(control: C) -> Self {
        Self {
            control,
            group: MetricsGroup::default(),
            frame_index: 0,
        }
    }

    /// Currently streamed counter group.
    pub fn group(&self) -> MetricsGroup {
        self.group
    }

    /// Frames observed since the stream last (re)started.
    pub fn frame_index(&self) -> u32 {
        self.frame_index
    }

    /// Count a completed frame against the current stream.
    pub fn advance_frame(&mut self) {
        self.frame_index = self.frame_index.wrapping_add(1);
    }

    /// Switch the streamed group: stop, reconfigure, restart.
    ///
    /// The frame index resets to zero because the restarted stream has no
    /// continuity with the old one.
    pub fn set_group(&mut self, group: MetricsGroup) {
        self.group = group;
        self.control.live_stop();
        self.control.live_set_group(group);
        self.control.live_start();
        self.frame_index = 0;
        tracing::debug!(group = group.label(), "live metrics stream restarted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records the order of control calls so stream restarts can be verified.
    #[derive(Default)]
    struct RecordingControl {
        calls: Vec<String>,
    }

    impl MetricsControl for RecordingControl {
        fn live_stop(&mut self) {
            self.calls.push("stop".into());
        }
        fn live_set_group(&mut self, group: MetricsGroup) {
            self.calls.push(format!("set:{}", group.label()));
        }
        fn live_start(&mut self) {
            self.calls.push("start".into());
        }
    }

    #[test]
    fn test_default_group_is_param_buffer() {
        let live = LiveMetrics::new(RecordingControl::default());
        assert_eq!(live.group(), MetricsGroup::ParamBuffer);
        assert_eq!(live.frame_index(), 0);
    }

    #[test]
    fn test_set_group_restarts_stream_in_order() {
        let mut live = LiveMetrics::new(RecordingControl::default());
        live.set_group(MetricsGroup::Throughput);
        assert_eq!(live.group(), MetricsGroup::Throughput);
        assert_eq!(
            live.control.calls,
            vec!["stop", "set:Throughput", "start"]
        );
    }

    #[test]
    fn test_set_group_resets_frame_index() {
        let mut live = LiveMetrics::new(RecordingControl::default());
        for _ in 0..120 {
            live.advance_frame();
        }
        assert_eq!(live.frame_index(), 120);

        live.set_group(MetricsGroup::Memory);
        assert_eq!(live.frame_index(), 0);
    }

    #[test]
    fn test_gpu_activity_percent() {
        let metrics = FrameMetrics {
            frame_duration_us: 16_666,
            gpu_active_us: 8_333,
            ..Default::default()
        };
        let pct = metrics.gpu_activity_percent();
        assert!((pct - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_gpu_activity_percent_zero_duration() {
        let metrics = FrameMetrics {
            gpu_active_us: 1_000,
            ..Default::default()
        };
        assert_eq!(metrics.gpu_activity_percent(), 0.0);
    }

    #[test]
    fn test_job_time_tick_conversion() {
        assert_eq!(FrameMetrics::job_time_us(4_000), 1_000);
        assert_eq!(FrameMetrics::job_time_us(3), 0);
    }

    #[test]
    fn test_per_job_average_guards_zero_jobs() {
        assert_eq!(FrameMetrics::per_job(250.0, 0), 0.0);
        assert_eq!(FrameMetrics::per_job(250.0, 5), 50.0);
    }
}
