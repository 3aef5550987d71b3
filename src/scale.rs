//! Scale functions for data-to-pixel mappings.
//!
//! Axis ranges are supplied by the caller; a scale never looks at the data it
//! maps. [`data_extent`] and [`padded_range`] exist for callers that want a range
//! derived from data instead.

use crate::error::{Error, Result};

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the domain extent.
    fn domain(&self) -> (D, D);

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

/// Linear scale from data coordinates to canvas pixels.
#[derive(Debug, Clone, Copy)]
pub struct LinearScale {
    domain_min: f64,
    domain_max: f64,
    range_min: f32,
    range_max: f32,
}

impl LinearScale {
    /// Create a new linear scale.
    ///
    /// The range may be inverted (`range.0 > range.1`), which is how the y axis
    /// maps upwards-growing data onto downwards-growing pixel rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the domain is empty or not finite.
    pub fn new(domain: (f64, f64), range: (f32, f32)) -> Result<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(Error::ScaleDomain("Domain bounds must be finite".to_string()));
        }
        if domain.0 == domain.1 {
            return Err(Error::ScaleDomain("Domain min and max cannot be equal".to_string()));
        }

        Ok(Self { domain_min: domain.0, domain_max: domain.1, range_min: range.0, range_max: range.1 })
    }

    /// `(k, w)` where `w = k * (domain_max - domain_min)` is finite.
    ///
    /// `k` is 1, or 0.5 when the width itself overflows `f64`.
    fn span(&self) -> (f64, f64) {
        let width = self.domain_max - self.domain_min;
        if width.is_finite() {
            (1.0, width)
        } else {
            (0.5, self.domain_max * 0.5 - self.domain_min * 0.5)
        }
    }

    /// Pixel length of a data-space distance (always non-negative).
    #[must_use]
    pub fn scale_length(&self, length: f64) -> f32 {
        let (k, width) = self.span();
        let ratio = f64::from(self.range_max - self.range_min) * k / width;
        (length * ratio).abs() as f32
    }

    /// Invert the scale (pixel to domain).
    #[must_use]
    pub fn invert(&self, value: f32) -> f64 {
        let (k, width) = self.span();
        let t = f64::from(value - self.range_min) / f64::from(self.range_max - self.range_min);
        self.domain_min + t * width / k
    }

    /// Spacing of the ticks returned by [`LinearScale::ticks`].
    #[must_use]
    pub fn tick_step(&self, target: usize) -> f64 {
        let (k, width) = self.span();
        nice_step(width / k, target)
    }

    /// Tick positions at a "nice" step inside the domain.
    ///
    /// Aims for about `target` intervals. Never returns more than
    /// `4 * target + 2` ticks, and stops early once consecutive multiples of the
    /// step are no longer distinct at the domain's magnitude.
    #[must_use]
    pub fn ticks(&self, target: usize) -> Vec<f64> {
        let (lo, hi) = if self.domain_min <= self.domain_max {
            (self.domain_min, self.domain_max)
        } else {
            (self.domain_max, self.domain_min)
        };
        let step = self.tick_step(target);
        let tolerance = step * 1e-9;
        let limit = target.max(1) * 4 + 2;

        let first = (lo / step - 1e-9).ceil();
        let mut ticks: Vec<f64> = Vec::new();
        for i in 0..limit {
            let value = (first + i as f64) * step;
            if !value.is_finite() || value > hi + tolerance {
                break;
            }
            let value = if value.abs() < tolerance { 0.0 } else { value };
            if ticks.last().is_some_and(|&last| value <= last) {
                break;
            }
            ticks.push(value);
        }
        ticks
    }
}

impl Scale<f64, f32> for LinearScale {
    fn scale(&self, value: f64) -> f32 {
        let (k, width) = self.span();
        let t = (value * k - self.domain_min * k) / width;
        (f64::from(self.range_min) + t * f64::from(self.range_max - self.range_min)) as f32
    }

    fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f32, f32) {
        (self.range_min, self.range_max)
    }
}

/// Round `span / target` to 1, 2 or 5 times a power of ten.
#[must_use]
pub fn nice_step(span: f64, target: usize) -> f64 {
    let raw = span.abs() / target.max(1) as f64;
    if raw <= 0.0 || !raw.is_finite() {
        return 1.0;
    }

    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized < 1.5 {
        1.0
    } else if normalized < 3.0 {
        2.0
    } else if normalized < 7.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Format a tick value with just enough decimals for the given step.
#[must_use]
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step > 0.0 && step.is_finite() {
        (-step.log10().floor()).max(0.0) as usize
    } else {
        0
    };
    format!("{value:.decimals$}")
}

/// Minimum and maximum of `values`, or `None` when empty or non-finite.
#[must_use]
pub fn data_extent(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() || !values.iter().all(|v| v.is_finite()) {
        return None;
    }
    let init = (f64::INFINITY, f64::NEG_INFINITY);
    Some(values.iter().fold(init, |(min, max), &v| (min.min(v), max.max(v))))
}

/// Range covering `values` padded by `fraction` of the span on both sides.
///
/// A degenerate extent (all values equal) is widened by one unit or by
/// `fraction` of the value, whichever is larger. The result stays finite.
#[must_use]
pub fn padded_range(values: &[f64], fraction: f64) -> Option<(f64, f64)> {
    let (min, max) = data_extent(values)?;
    let pad = if max > min {
        fraction * (max * 0.5 - min * 0.5) * 2.0
    } else {
        (fraction * min.abs()).max(1.0)
    };
    Some(((min - pad).max(f64::MIN), (max + pad).min(f64::MAX)))
}
