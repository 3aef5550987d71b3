//! Scatter plots with vertical error bars.
//!
//! A [`PlotSpec`] describes the data, axes and annotations of one figure. A
//! [`ScatterRenderer`] configured with a [`PlotStyle`] lays it out into a
//! [`Figure`], which encodes to SVG or PNG.

mod figure;
mod renderer;
mod spec;
mod style;

pub use figure::{AxisLayout, ErrorBar, Figure, Label, Marker, Tick};
pub use renderer::ScatterRenderer;
pub use spec::{Annotation, AnnotationStyle, AxisSpec, DataPoint, PlotSpec, PlotSpecBuilder};
pub use style::{Margins, PlotStyle};
