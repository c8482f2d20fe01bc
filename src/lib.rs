//! Debug instrumentation for the cindergl translation layer.
//!
//! cindergl maps desktop OpenGL onto the fixed-function native GPU interface of
//! a constrained embedded device. This crate is its diagnostics surface: an
//! on-screen memory/GPU-metrics overlay, best-effort file logging, and a
//! driver error code translator. The translation core itself (GL state machine,
//! command batching, shader cache, allocator) lives in the host library and is
//! reached only through the traits defined here.
//!
//! # Overview
//!
//! - [`overlay`] - On-screen diagnostics in one of two build-time variants:
//!   a lightweight bitmap blit into the scanout buffer (`fixed-overlay`),
//!   or an egui debugger window (`rich-overlay`).
//! - [`memory`] - Per-pool usage lines shared by both overlay variants.
//! - [`metrics`] - Live GPU performance counter snapshots and stream control
//!   (`live-metrics`, devkit builds only).
//! - [`logger`] - Append-only file logging (`file-log`).
//! - [`driver_err`] - Native driver error code names (`error-strings`).
//!
//! # Design Principles
//!
//! - **Diagnostics never hurt the host**: every failure is absorbed locally.
//!   Formatting truncates instead of overflowing, division by zero is guarded,
//!   file errors are swallowed, unknown error codes map to a sentinel string.
//! - **Borrow, never own**: the overlay reads allocator and counter state live
//!   through provider traits and borrows the frame buffer or renderer state
//!   only for the duration of a single draw call.
//! - **Single-threaded**: everything here runs interleaved in the host frame
//!   loop. The rich overlay's save/restore of renderer state is a borrowing
//!   discipline, not a locking one.

pub mod config;
#[cfg(feature = "error-strings")]
pub mod driver_err;
#[cfg(any(feature = "file-log", all(feature = "fixed-overlay", not(feature = "rich-overlay"))))]
mod fmtbuf;
#[cfg(feature = "file-log")]
pub mod logger;
pub mod memory;
#[cfg(feature = "live-metrics")]
pub mod metrics;
pub mod overlay;

pub use config::DebugConfig;
pub use memory::{MemoryPool, MemoryProvider, POOL_LINES, PoolUsage};

#[cfg(feature = "live-metrics")]
pub use metrics::{FrameMetrics, LiveMetrics, MetricsControl, MetricsGroup};

#[cfg(feature = "file-log")]
pub use logger::FileLogger;

#[cfg(all(feature = "fixed-overlay", not(feature = "rich-overlay")))]
pub use overlay::fixed::{FixedOverlay, Framebuffer};

#[cfg(feature = "rich-overlay")]
pub use overlay::rich::{
    BlendFactor, CaptureTrigger, ProgramId, RendererHooks, RendererSnapshot, RichOverlay,
};
