//! Scatter plot layout.

use super::figure::{AxisLayout, ErrorBar, Figure, Label, Marker, Tick};
use super::spec::{Annotation, AxisSpec, PlotSpec};
use super::style::PlotStyle;
use crate::error::Result;
use crate::geometry::{Point, Rect};
use crate::markup::Markup;
use crate::output::TextAnchor;
use crate::scale::{format_tick, LinearScale, Scale};
use log::{debug, warn};

/// Distance unit of the x title offset, in title font sizes.
const X_TITLE_UNIT: f32 = 2.0;
/// Distance unit of the y title offset, in title font sizes.
const Y_TITLE_UNIT: f32 = 1.55;
/// Baseline drop that vertically centers a y tick label on its tick.
const LABEL_CENTERING: f32 = 0.35;

/// Lays out marker + error-bar scatter plots.
///
/// Holds only an immutable style and can render any number of figures.
///
/// # Example
///
/// ```
/// use calib_plot::plot::{AxisSpec, PlotSpec, PlotStyle, ScatterRenderer};
///
/// let spec = PlotSpec::builder(
///     AxisSpec::new("V_{thrs} (mV)", 194.22, 223.71),
///     AxisSpec::new("Muon cluster size", 0.0, 4.0),
/// )
/// .point(200.0, 2.350164, 0.1501929)
/// .build()
/// .unwrap();
///
/// let figure = ScatterRenderer::new(PlotStyle::report()).render(&spec).unwrap();
/// assert_eq!(figure.markers().len(), 1);
/// assert!(figure.to_svg().contains(r#"class="marker""#));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScatterRenderer {
    style: PlotStyle,
}

impl ScatterRenderer {
    /// Create a renderer with the given style.
    #[must_use]
    pub fn new(style: PlotStyle) -> Self {
        Self { style }
    }

    /// Lay out a figure.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Validation`] if `spec` breaks an invariant, and
    /// [`crate::Error::InvalidDimensions`] or [`crate::Error::InvalidStyle`] if
    /// a style parameter is out of range.
    pub fn render(&self, spec: &PlotSpec) -> Result<Figure> {
        spec.validate()?;
        self.style.validate()?;

        let style = &self.style;
        let frame = style.frame();
        let x_axis = spec.x_axis();
        let y_axis = spec.y_axis();
        debug!(
            "rendering {} points, x [{}, {}], y [{}, {}], frame {:?}",
            spec.points().len(),
            x_axis.min,
            x_axis.max,
            y_axis.min,
            y_axis.max,
            frame
        );

        let x_scale = LinearScale::new((x_axis.min, x_axis.max), (frame.x, frame.right()))?;
        let y_scale = LinearScale::new((y_axis.min, y_axis.max), (frame.bottom(), frame.y))?;

        let mut markers = Vec::with_capacity(spec.points().len());
        let mut error_bars = Vec::with_capacity(spec.points().len());
        for (index, point) in spec.points().iter().enumerate() {
            let center = Point::new(x_scale.scale(point.x), y_scale.scale(point.y));
            let in_frame = frame.contains(center);
            if !in_frame {
                warn!("point {index} ({}, {}) lies outside the plot frame and is not drawn", point.x, point.y);
            }

            markers.push(Marker { center, radius: style.marker_radius, in_frame });
            error_bars.push(ErrorBar::new(center.x, center.y, y_scale.scale_length(point.y_error), style, frame));
        }

        let figure = Figure {
            style: style.clone(),
            frame,
            markers,
            error_bars,
            x_axis: self.x_axis_layout(x_axis, &x_scale, frame),
            y_axis: self.y_axis_layout(y_axis, &y_scale, frame),
            annotations: spec.annotations().iter().map(|a| self.place_annotation(a)).collect(),
        };
        debug!(
            "laid out {} ticks on x, {} ticks on y, {} annotations",
            figure.x_axis.ticks.len(),
            figure.y_axis.ticks.len(),
            figure.annotations.len()
        );
        Ok(figure)
    }

    fn text(&self, content: Markup, position: Point, font_size: f32, anchor: TextAnchor) -> Label {
        Label { content, position, font_size, anchor, color: self.style.text_color, rotation: 0.0 }
    }

    /// Tick values with their formatted labels.
    fn tick_values(&self, scale: &LinearScale) -> Vec<(f64, String)> {
        let step = scale.tick_step(self.style.tick_target);
        scale.ticks(self.style.tick_target).into_iter().map(|v| (v, format_tick(v, step))).collect()
    }

    fn x_axis_layout(&self, axis: &AxisSpec, scale: &LinearScale, frame: Rect) -> AxisLayout {
        let style = &self.style;
        let label_px = style.font_px(style.label_size);
        let title_px = style.font_px(style.title_size);
        let label_y = frame.bottom() + style.font_px(style.label_offset) + label_px;

        let ticks = self
            .tick_values(scale)
            .into_iter()
            .map(|(value, text)| {
                let position = scale.scale(value);
                let label = self.text(Markup::literal(&text), Point::new(position, label_y), label_px, TextAnchor::Middle);
                Tick { value, position, label }
            })
            .collect();

        let title_y = frame.bottom() + style.x_title_offset * X_TITLE_UNIT * title_px;
        let title = self.text(Markup::parse(&axis.title), Point::new(frame.right(), title_y), title_px, TextAnchor::End);

        AxisLayout { ticks, title }
    }

    fn y_axis_layout(&self, axis: &AxisSpec, scale: &LinearScale, frame: Rect) -> AxisLayout {
        let style = &self.style;
        let label_px = style.font_px(style.label_size);
        let title_px = style.font_px(style.title_size);
        let label_x = frame.x - style.font_px(style.label_offset);

        let ticks = self
            .tick_values(scale)
            .into_iter()
            .map(|(value, text)| {
                let position = scale.scale(value);
                let anchor = Point::new(label_x, position + LABEL_CENTERING * label_px);
                let label = self.text(Markup::literal(&text), anchor, label_px, TextAnchor::End);
                Tick { value, position, label }
            })
            .collect();

        let title_x = frame.x - style.y_title_offset * Y_TITLE_UNIT * title_px;
        let title = Label {
            rotation: -90.0,
            ..self.text(Markup::parse(&axis.title), Point::new(title_x, frame.y), title_px, TextAnchor::End)
        };

        AxisLayout { ticks, title }
    }

    /// Map a normalized position (origin bottom-left) to canvas pixels.
    fn place_annotation(&self, annotation: &Annotation) -> Label {
        let (nx, ny) = annotation.position;
        let position =
            Point::new((nx * f64::from(self.style.width)) as f32, ((1.0 - ny) * f64::from(self.style.height)) as f32);
        Label {
            content: Markup::parse(&annotation.text),
            position,
            font_size: self.style.font_px(annotation.style.font_size),
            anchor: annotation.style.align,
            color: annotation.style.color,
            rotation: 0.0,
        }
    }
}
