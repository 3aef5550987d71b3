//! # calib-plot
//!
//! Declarative scatter plots with vertical error bars for detector calibration
//! reports, rendered to SVG or PNG without any plotting runtime.
//!
//! A figure is a [`plot::PlotSpec`] (points, axis titles and ranges, text
//! annotations) laid out by a [`plot::ScatterRenderer`] under an immutable
//! [`plot::PlotStyle`]. Labels accept a subset of ROOT's TLatex markup
//! (`#bf{}`, `#it{}`, `#scale[f]{}`, `_{}`, `^{}`).
//!
//! ## Quick Start
//!
//! ```rust
//! use calib_plot::prelude::*;
//!
//! let spec = PlotSpec::builder(
//!     AxisSpec::new("V_{thrs} (mV)", 194.22, 223.71),
//!     AxisSpec::new("Muon cluster size", 0.0, 4.0),
//! )
//! .point(200.0, 2.350164, 0.1501929)
//! .point(210.0, 2.51343, 0.1849057)
//! .point(220.0, 2.43778, 0.1063492)
//! .annotation(Annotation::new("#bf{CMS Front-End electronics}", 0.15, 0.9))
//! .build()?;
//!
//! let figure = ScatterRenderer::new(PlotStyle::report()).render(&spec)?;
//! let svg = figure.to_svg();
//! assert_eq!(svg.matches(r#"class="marker""#).count(), 3);
//! # Ok::<(), calib_plot::Error>(())
//! ```
//!
//! Figures can also be described in YAML, see [`config::FigureConfig`], and
//! the report's own figures are available in [`presets`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color type and hex parsing.
pub mod color;

/// Core framebuffer for pixel rendering.
pub mod framebuffer;

/// Geometric primitives (points, rectangles).
pub mod geometry;

/// Scale functions for data-to-pixel mappings.
pub mod scale;

/// Label markup parsing.
pub mod markup;

// ============================================================================
// Plotting Modules
// ============================================================================

/// Figure description, style, layout and rendered scene.
pub mod plot;

/// YAML figure descriptions.
pub mod config;

/// Built-in report figures.
pub mod presets;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Rasterization primitives.
pub mod render;

/// Output encoders (PNG, SVG).
pub mod output;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for calib-plot operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use calib_plot::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::Rgba;
    pub use crate::error::{Error, Result, ValidationError};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::geometry::{Point, Rect};
    pub use crate::output::{OutputFormat, TextAnchor};
    pub use crate::plot::{
        Annotation, AnnotationStyle, AxisSpec, DataPoint, Figure, PlotSpec, PlotStyle, ScatterRenderer,
    };
    pub use crate::presets::ThresholdScan;
    pub use crate::scale::{LinearScale, Scale};
}
