//! On-screen diagnostic overlay.
//!
//! Two build-time variants render the same logical overlay:
//!
//! - [`fixed`] blits a bitmap font straight into the caller's scanout buffer.
//!   No UI library, no retained state beyond a line cursor.
//! - [`rich`] composes an egui debugger window each frame and paints it
//!   through the host renderer, saving and restoring the renderer's state
//!   around its own submission.
//!
//! Exactly one variant is linked. `rich-overlay` takes precedence when both
//! features are enabled.

#[cfg(all(feature = "fixed-overlay", not(feature = "rich-overlay")))]
pub mod fixed;
#[cfg(all(feature = "fixed-overlay", not(feature = "rich-overlay")))]
mod font;
#[cfg(feature = "rich-overlay")]
pub mod rich;
