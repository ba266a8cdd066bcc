//! Terminal renderer.
//!
//! The page is composed into a [`FrameBuffer`] of cells; the [`DiffRenderer`]
//! compares frames and emits ANSI for changed cells only, wrapped in
//! synchronized-output markers for flicker-free updates.

pub mod ansi;
pub mod buffer;
pub mod diff;
pub mod output;
pub mod text;

pub use buffer::{BorderStyle, FrameBuffer};
pub use diff::DiffRenderer;
pub use output::{OutputBuffer, StatefulCellRenderer};
pub use text::{string_width, truncate_text, wrap_text};
