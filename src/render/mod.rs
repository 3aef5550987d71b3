//! Raster backend.
//!
//! # Algorithms
//!
//! - **Bresenham's Line**: one-pixel tick marks
//! - **Midpoint Circle**: filled circular markers
//! - Axis-aligned thick segments for frame lines and error bars
//!
//! # References
//!
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."

mod primitives;

pub use primitives::{draw_circle, draw_hline, draw_line, draw_rect_outline, draw_vline, Drawable};
