//! YAML figure descriptions.
//!
//! ```yaml
//! points:
//!   - {x: 200, y: 2.350164, y_error: 0.1501929}
//!   - {x: 210, y: 2.51343, y_error: 0.1849057}
//! x_axis: {title: "V_{thrs} (mV)", min: 194.22, max: 223.71}
//! y_axis: {title: "Muon cluster size"}
//! annotations:
//!   - {text: "#bf{CMS Front-End electronics}", x: 0.15, y: 0.9}
//! style:
//!   marker_color: "#0000ff"
//! ```
//!
//! Omitted axis bounds are derived from the data and padded by 10% of the span.

use crate::error::{Error, Result};
use crate::plot::{Annotation, AnnotationStyle, AxisSpec, DataPoint, PlotSpec, PlotStyle};
use crate::scale::padded_range;
use serde::Deserialize;
use std::path::Path;

/// Fraction of the data span added on each side of a derived axis range.
pub const AUTO_RANGE_PADDING: f64 = 0.1;

/// Axis entry of a figure file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AxisConfig {
    /// Axis title, in label markup.
    #[serde(default)]
    pub title: String,
    /// Lower bound; derived from the data when absent.
    pub min: Option<f64>,
    /// Upper bound; derived from the data when absent.
    pub max: Option<f64>,
}

impl AxisConfig {
    fn resolve(&self, values: &[f64]) -> AxisSpec {
        let (auto_min, auto_max) = match (self.min, self.max) {
            (Some(min), Some(max)) => (min, max),
            _ => padded_range(values, AUTO_RANGE_PADDING).unwrap_or((0.0, 1.0)),
        };
        let min = self.min.unwrap_or(auto_min);
        let max = self.max.unwrap_or(auto_max);
        if self.min.is_none() || self.max.is_none() {
            log::debug!("axis \"{}\" range derived from data: [{min}, {max}]", self.title);
        }
        AxisSpec::new(self.title.clone(), min, max)
    }
}

/// Annotation entry of a figure file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnnotationConfig {
    /// Text, in label markup.
    pub text: String,
    /// Normalized horizontal position.
    pub x: f64,
    /// Normalized vertical position (0 at the bottom).
    pub y: f64,
    /// Appearance.
    #[serde(default)]
    pub style: AnnotationStyle,
}

impl From<AnnotationConfig> for Annotation {
    fn from(config: AnnotationConfig) -> Self {
        Annotation::new(config.text, config.x, config.y).with_style(config.style)
    }
}

/// A figure description as read from YAML.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FigureConfig {
    /// Data points.
    #[serde(default)]
    pub points: Vec<DataPoint>,
    /// Horizontal axis.
    #[serde(default)]
    pub x_axis: AxisConfig,
    /// Vertical axis.
    #[serde(default)]
    pub y_axis: AxisConfig,
    /// Text overlays.
    #[serde(default)]
    pub annotations: Vec<AnnotationConfig>,
    /// Style overrides on top of the report style.
    #[serde(default)]
    pub style: PlotStyle,
}

impl FigureConfig {
    /// Loads a figure description from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("loading figure config {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses a figure description from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigParse`] with the line number if parsing fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map(|l| l.line()).unwrap_or(0);
            Error::ConfigParse { line, message: e.to_string() }
        })
    }

    /// Resolve omitted axis bounds and validate into a [`PlotSpec`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the result breaks a [`PlotSpec`] invariant.
    pub fn into_spec(self) -> Result<PlotSpec> {
        let xs: Vec<f64> = self.points.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = self
            .points
            .iter()
            .flat_map(|p| [(p.y - p.y_error).max(f64::MIN), (p.y + p.y_error).min(f64::MAX)])
            .collect();

        PlotSpec::builder(self.x_axis.resolve(&xs), self.y_axis.resolve(&ys))
            .points(self.points)
            .annotations(self.annotations.into_iter().map(Annotation::from))
            .build()
    }
}
