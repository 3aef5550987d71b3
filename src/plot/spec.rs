//! Declarative description of one figure.

use crate::color::Rgba;
use crate::error::{Axis, Result, ValidationError};
use crate::output::TextAnchor;
use serde::Deserialize;

/// One measurement: a position and a symmetric vertical error.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DataPoint {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
    /// Half-height of the error bar, in y units.
    #[serde(default)]
    pub y_error: f64,
}

impl DataPoint {
    /// Create a data point.
    #[must_use]
    pub const fn new(x: f64, y: f64, y_error: f64) -> Self {
        Self { x, y, y_error }
    }

    fn validate(&self, index: usize) -> std::result::Result<(), ValidationError> {
        for (field, value) in [("x", self.x), ("y", self.y), ("y_error", self.y_error)] {
            if !value.is_finite() {
                return Err(ValidationError::NonFinite { index, field });
            }
        }
        if self.y_error < 0.0 {
            return Err(ValidationError::NegativeError { index, value: self.y_error });
        }
        Ok(())
    }
}

/// Title and bounds of one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisSpec {
    /// Axis title, in label markup.
    pub title: String,
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl AxisSpec {
    /// Create an axis description.
    #[must_use]
    pub fn new(title: impl Into<String>, min: f64, max: f64) -> Self {
        Self { title: title.into(), min, max }
    }

    fn validate(&self, axis: Axis) -> std::result::Result<(), ValidationError> {
        if self.min.is_finite() && self.max.is_finite() && self.min < self.max {
            Ok(())
        } else {
            Err(ValidationError::InvalidAxisRange { axis, min: self.min, max: self.max })
        }
    }
}

/// Appearance of an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnnotationStyle {
    /// Font size as a fraction of the canvas height.
    pub font_size: f32,
    /// Horizontal alignment relative to the position.
    pub align: TextAnchor,
    /// Text color.
    pub color: Rgba,
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self { font_size: 0.04, align: TextAnchor::Start, color: Rgba::BLACK }
    }
}

/// Fixed text placed at a normalized canvas position.
///
/// `(0, 0)` is the bottom-left corner of the canvas and `(1, 1)` the top-right;
/// the position is the left end of the text baseline by default.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// Text, in label markup.
    pub text: String,
    /// Normalized `(x, y)` position.
    pub position: (f64, f64),
    /// Appearance.
    pub style: AnnotationStyle,
}

impl Annotation {
    /// Annotation with the default style.
    #[must_use]
    pub fn new(text: impl Into<String>, x: f64, y: f64) -> Self {
        Self { text: text.into(), position: (x, y), style: AnnotationStyle::default() }
    }

    /// Replace the style.
    #[must_use]
    pub fn with_style(mut self, style: AnnotationStyle) -> Self {
        self.style = style;
        self
    }
}

/// Complete, validated description of one figure.
///
/// Only obtainable through [`PlotSpec::builder`], so every `PlotSpec` holds at
/// least one point, non-negative finite errors and proper axis ranges.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSpec {
    points: Vec<DataPoint>,
    x_axis: AxisSpec,
    y_axis: AxisSpec,
    annotations: Vec<Annotation>,
}

impl PlotSpec {
    /// Start building a spec with the two axes.
    #[must_use]
    pub fn builder(x_axis: AxisSpec, y_axis: AxisSpec) -> PlotSpecBuilder {
        PlotSpecBuilder { points: Vec::new(), x_axis, y_axis, annotations: Vec::new() }
    }

    /// Data points in drawing order.
    #[must_use]
    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    /// Horizontal axis.
    #[must_use]
    pub fn x_axis(&self) -> &AxisSpec {
        &self.x_axis
    }

    /// Vertical axis.
    #[must_use]
    pub fn y_axis(&self) -> &AxisSpec {
        &self.y_axis
    }

    /// Text overlays in drawing order.
    #[must_use]
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Re-check the invariants.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self) -> Result<()> {
        validate_points(&self.points)?;
        self.x_axis.validate(Axis::X)?;
        self.y_axis.validate(Axis::Y)?;
        Ok(())
    }
}

fn validate_points(points: &[DataPoint]) -> std::result::Result<(), ValidationError> {
    if points.is_empty() {
        return Err(ValidationError::EmptyPoints);
    }
    points.iter().enumerate().try_for_each(|(index, point)| point.validate(index))
}

/// Builder for [`PlotSpec`].
#[derive(Debug, Clone)]
pub struct PlotSpecBuilder {
    points: Vec<DataPoint>,
    x_axis: AxisSpec,
    y_axis: AxisSpec,
    annotations: Vec<Annotation>,
}

impl PlotSpecBuilder {
    /// Append a point.
    #[must_use]
    pub fn point(mut self, x: f64, y: f64, y_error: f64) -> Self {
        self.points.push(DataPoint::new(x, y, y_error));
        self
    }

    /// Append several points.
    #[must_use]
    pub fn points(mut self, points: impl IntoIterator<Item = DataPoint>) -> Self {
        self.points.extend(points);
        self
    }

    /// Append an annotation.
    #[must_use]
    pub fn annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Append several annotations.
    #[must_use]
    pub fn annotations(mut self, annotations: impl IntoIterator<Item = Annotation>) -> Self {
        self.annotations.extend(annotations);
        self
    }

    /// Validate and freeze the figure description.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Validation`] if there are no points, a point has a
    /// negative or non-finite value, or an axis range is empty.
    pub fn build(self) -> Result<PlotSpec> {
        let spec = PlotSpec {
            points: self.points,
            x_axis: self.x_axis,
            y_axis: self.y_axis,
            annotations: self.annotations,
        };
        spec.validate()?;
        Ok(spec)
    }
}
