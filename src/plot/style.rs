//! Immutable figure style.

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::framebuffer::MAX_SIDE as MAX_CANVAS_SIDE;
use crate::geometry::Rect;
use serde::Deserialize;
/// Largest `tick_target`.
pub const MAX_TICK_TARGET: usize = 100;
/// Largest title offset, in title font sizes.
const MAX_TITLE_OFFSET: f32 = 10.0;

/// Margins between the canvas edge and the plot frame, as canvas fractions.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Margins {
    /// Left margin (fraction of width).
    pub left: f32,
    /// Right margin (fraction of width).
    pub right: f32,
    /// Top margin (fraction of height).
    pub top: f32,
    /// Bottom margin (fraction of height).
    pub bottom: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self { left: 0.12, right: 0.05, top: 0.05, bottom: 0.10 }
    }
}

/// Visual parameters of a figure.
///
/// Font sizes and the label offset are fractions of the canvas height. Title
/// offsets are in units of the title font size, as in ROOT's `SetTitleOffset`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlotStyle {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Frame placement.
    pub margins: Margins,
    /// Canvas fill.
    pub background: Rgba,
    /// Frame and tick color.
    pub frame_color: Rgba,
    /// Frame line width in pixels.
    pub frame_width: f32,
    /// Marker fill.
    pub marker_color: Rgba,
    /// Marker radius in pixels.
    pub marker_radius: f32,
    /// Error bar color.
    pub error_bar_color: Rgba,
    /// Error bar line width in pixels.
    pub error_bar_width: f32,
    /// Half-width of the caps at the error bar ends, in pixels (0 for none).
    pub cap_half_width: f32,
    /// Tick label font size.
    pub label_size: f32,
    /// Gap between the axis and its tick labels.
    pub label_offset: f32,
    /// Axis title font size.
    pub title_size: f32,
    /// Distance of the x title below the axis.
    pub x_title_offset: f32,
    /// Distance of the y title left of the axis.
    pub y_title_offset: f32,
    /// Tick length as a fraction of the perpendicular frame extent.
    pub tick_length: f32,
    /// Approximate number of tick intervals per axis.
    pub tick_target: usize,
    /// Color of labels and titles.
    pub text_color: Rgba,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self::report()
    }
}

impl PlotStyle {
    /// Style of the calibration report figures.
    #[must_use]
    pub fn report() -> Self {
        Self {
            width: 800,
            height: 776,
            margins: Margins::default(),
            background: Rgba::WHITE,
            frame_color: Rgba::BLACK,
            frame_width: 1.0,
            marker_color: Rgba::BLUE,
            marker_radius: 4.0,
            error_bar_color: Rgba::BLUE,
            error_bar_width: 2.0,
            cap_half_width: 0.0,
            label_size: 0.035,
            label_offset: 0.01,
            title_size: 0.035,
            x_title_offset: 1.2,
            y_title_offset: 1.8,
            tick_length: 0.03,
            tick_target: 5,
            text_color: Rgba::BLACK,
        }
    }

    /// Check that every parameter is finite and within its range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] for an empty or oversized canvas or
    /// margins that leave no room for the frame, and [`Error::InvalidStyle`]
    /// for out-of-range line widths, radii, font sizes, offsets or tick targets.
    pub fn validate(&self) -> Result<()> {
        let m = self.margins;
        let fractions_ok = [m.left, m.right, m.top, m.bottom].iter().all(|f| (0.0..1.0).contains(f))
            && m.left + m.right < 1.0
            && m.top + m.bottom < 1.0;
        let sides = 1..=MAX_CANVAS_SIDE;
        if !sides.contains(&self.width) || !sides.contains(&self.height) || !fractions_ok {
            return Err(Error::InvalidDimensions { width: self.width, height: self.height });
        }

        let max_len = MAX_CANVAS_SIDE as f32;
        check_range("frame_width", self.frame_width, 0.0, max_len)?;
        check_range("marker_radius", self.marker_radius, 0.0, max_len)?;
        check_range("error_bar_width", self.error_bar_width, 0.0, max_len)?;
        check_range("cap_half_width", self.cap_half_width, 0.0, max_len)?;
        check_range("label_size", self.label_size, 0.0, 1.0)?;
        check_range("label_offset", self.label_offset, 0.0, 1.0)?;
        check_range("title_size", self.title_size, 0.0, 1.0)?;
        check_range("tick_length", self.tick_length, 0.0, 1.0)?;
        check_range("x_title_offset", self.x_title_offset, 0.0, MAX_TITLE_OFFSET)?;
        check_range("y_title_offset", self.y_title_offset, 0.0, MAX_TITLE_OFFSET)?;
        if !(1..=MAX_TICK_TARGET).contains(&self.tick_target) {
            return Err(Error::InvalidStyle {
                field: "tick_target",
                value: self.tick_target as f64,
                min: 1.0,
                max: MAX_TICK_TARGET as f64,
            });
        }
        Ok(())
    }

    /// Plot frame in canvas pixels.
    #[must_use]
    pub fn frame(&self) -> Rect {
        let w = self.width as f32;
        let h = self.height as f32;
        let m = self.margins;
        Rect::new(m.left * w, m.top * h, (1.0 - m.left - m.right) * w, (1.0 - m.top - m.bottom) * h)
    }

    /// Pixel size of a font given as a fraction of the canvas height.
    #[must_use]
    pub fn font_px(&self, fraction: f32) -> f32 {
        fraction * self.height as f32
    }
}

fn check_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidStyle { field, value: f64::from(value), min: f64::from(min), max: f64::from(max) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_report_defaults() {
        let style = PlotStyle::default();
        assert_eq!(style, PlotStyle::report());
        assert_eq!((style.width, style.height), (800, 776));
        assert_eq!(style.marker_color, Rgba::from_hex("#0000ff").unwrap());
        assert_relative_eq!(style.error_bar_width, 2.0);
        assert_relative_eq!(style.label_size, 0.035);
    }

    #[test]
    fn test_frame_from_margins() {
        let frame = PlotStyle::report().frame();
        assert_relative_eq!(frame.x, 96.0, epsilon = 1e-3);
        assert_relative_eq!(frame.y, 38.8, epsilon = 1e-4);
        assert_relative_eq!(frame.right(), 760.0, epsilon = 1e-3);
        assert_relative_eq!(frame.bottom(), 698.4, epsilon = 1e-3);
    }

    #[test]
    fn test_validate_rejects_bad_canvas() {
        assert!(PlotStyle::report().validate().is_ok());

        let empty = PlotStyle { width: 0, ..PlotStyle::report() };
        assert!(matches!(empty.validate(), Err(Error::InvalidDimensions { width: 0, .. })));

        let squeezed = PlotStyle { margins: Margins { left: 0.6, right: 0.5, ..Margins::default() }, ..PlotStyle::report() };
        assert!(squeezed.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_canvas() {
        let huge = PlotStyle { width: 100_000, height: 100_000, ..PlotStyle::report() };
        assert!(matches!(huge.validate(), Err(Error::InvalidDimensions { width: 100_000, .. })));

        let edge = PlotStyle { width: MAX_CANVAS_SIDE, ..PlotStyle::report() };
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_fields() {
        let cases = [
            ("marker_radius", PlotStyle { marker_radius: 3.0e9, ..PlotStyle::report() }),
            ("marker_radius", PlotStyle { marker_radius: f32::NAN, ..PlotStyle::report() }),
            ("error_bar_width", PlotStyle { error_bar_width: -1.0, ..PlotStyle::report() }),
            ("frame_width", PlotStyle { frame_width: f32::INFINITY, ..PlotStyle::report() }),
            ("cap_half_width", PlotStyle { cap_half_width: 1e6, ..PlotStyle::report() }),
            ("label_size", PlotStyle { label_size: 2.0, ..PlotStyle::report() }),
            ("y_title_offset", PlotStyle { y_title_offset: 50.0, ..PlotStyle::report() }),
            ("tick_target", PlotStyle { tick_target: 0, ..PlotStyle::report() }),
            ("tick_target", PlotStyle { tick_target: 1_000_000, ..PlotStyle::report() }),
        ];
        for (expected, style) in cases {
            match style.validate() {
                Err(Error::InvalidStyle { field, .. }) => assert_eq!(field, expected),
                other => panic!("{expected}: expected InvalidStyle, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_partial_yaml_override() {
        let style: PlotStyle = serde_yaml_ng::from_str("width: 400\nmarker_color: '#ff0000'\nmargins: {left: 0.2}").unwrap();
        assert_eq!(style.width, 400);
        assert_eq!(style.height, 776);
        assert_eq!(style.marker_color, Rgba::RED);
        assert_relative_eq!(style.margins.left, 0.2);
        assert_relative_eq!(style.margins.right, 0.05);
    }
}
