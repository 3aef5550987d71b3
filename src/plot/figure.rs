//! Rendered scene and its encodings.

use super::style::PlotStyle;
use crate::color::Rgba;
use crate::error::Result;
use crate::framebuffer::Framebuffer;
use crate::geometry::{Point, Rect};
use crate::markup::Markup;
use crate::output::{OutputFormat, PngEncoder, SvgElement, SvgEncoder, TextAnchor};
use crate::render::{draw_circle, draw_hline, draw_line, draw_rect_outline, draw_vline, Drawable};
use std::path::Path;

/// A data point's marker in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    /// Center.
    pub center: Point,
    /// Radius in pixels.
    pub radius: f32,
    /// Whether the center lies inside the plot frame.
    pub in_frame: bool,
}

impl Drawable for Marker {
    fn draw(&self, fb: &mut Framebuffer, color: Rgba) {
        if !self.in_frame {
            return;
        }
        draw_circle(
            fb,
            self.center.x.round() as i32,
            self.center.y.round() as i32,
            self.radius.round() as i32,
            color,
        );
    }
}

/// A vertical error bar in canvas pixels, already clipped to the frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorBar {
    /// Horizontal position.
    pub x: f32,
    /// Upper end (smaller pixel y).
    pub y_top: f32,
    /// Lower end (larger pixel y).
    pub y_bottom: f32,
    /// Unclipped half-height, i.e. the error scaled to pixels.
    pub half_height: f32,
    /// Line width in pixels.
    pub width: f32,
    /// Half-width of the end caps (0 for none).
    pub cap_half_width: f32,
    visible: bool,
}

impl ErrorBar {
    pub(crate) fn new(x: f32, center_y: f32, half_height: f32, style: &PlotStyle, frame: Rect) -> Self {
        let y_top = frame.clamp_y(center_y - half_height);
        let y_bottom = frame.clamp_y(center_y + half_height);
        let x_in_frame = x >= frame.x && x <= frame.right();
        Self {
            x,
            y_top,
            y_bottom,
            half_height,
            width: style.error_bar_width,
            cap_half_width: style.cap_half_width,
            visible: half_height > 0.0 && x_in_frame && y_bottom > y_top,
        }
    }

    /// False for zero errors and bars clipped away entirely.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    fn thickness(&self) -> u32 {
        self.width.round().max(1.0) as u32
    }
}

impl Drawable for ErrorBar {
    fn draw(&self, fb: &mut Framebuffer, color: Rgba) {
        if !self.visible {
            return;
        }
        let thickness = self.thickness();
        draw_vline(fb, self.x, self.y_top, self.y_bottom, thickness, color);
        if self.cap_half_width > 0.0 {
            let (left, right) = (self.x - self.cap_half_width, self.x + self.cap_half_width);
            draw_hline(fb, left, right, self.y_top, thickness, color);
            draw_hline(fb, left, right, self.y_bottom, thickness, color);
        }
    }
}

/// A positioned piece of text.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    /// Parsed content.
    pub content: Markup,
    /// Anchor point on the baseline.
    pub position: Point,
    /// Font size in pixels.
    pub font_size: f32,
    /// Alignment relative to the anchor.
    pub anchor: TextAnchor,
    /// Color.
    pub color: Rgba,
    /// Clockwise rotation in degrees about the anchor.
    pub rotation: f32,
}

impl Label {
    fn to_svg_element(&self) -> SvgElement {
        SvgElement::Text {
            x: self.position.x,
            y: self.position.y,
            content: self.content.clone(),
            font_size: self.font_size,
            fill: self.color,
            anchor: self.anchor,
            rotation: self.rotation,
        }
    }
}

/// One axis tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Data value.
    pub value: f64,
    /// Pixel coordinate along the axis.
    pub position: f32,
    /// Formatted value.
    pub label: Label,
}

/// Ticks and title of one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLayout {
    /// Ticks in increasing value order.
    pub ticks: Vec<Tick>,
    /// Axis title.
    pub title: Label,
}

/// A laid-out figure, independent of the output format.
///
/// Produced by [`super::ScatterRenderer::render`].
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub(crate) style: PlotStyle,
    pub(crate) frame: Rect,
    pub(crate) markers: Vec<Marker>,
    pub(crate) error_bars: Vec<ErrorBar>,
    pub(crate) x_axis: AxisLayout,
    pub(crate) y_axis: AxisLayout,
    pub(crate) annotations: Vec<Label>,
}

impl Figure {
    /// Canvas size in pixels.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.style.width, self.style.height)
    }

    /// Plot frame in canvas pixels.
    #[must_use]
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// One marker per data point, in data order.
    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// One error bar per data point, in data order.
    #[must_use]
    pub fn error_bars(&self) -> &[ErrorBar] {
        &self.error_bars
    }

    /// Horizontal axis layout.
    #[must_use]
    pub fn x_axis(&self) -> &AxisLayout {
        &self.x_axis
    }

    /// Vertical axis layout.
    #[must_use]
    pub fn y_axis(&self) -> &AxisLayout {
        &self.y_axis
    }

    /// Placed annotations.
    #[must_use]
    pub fn annotations(&self) -> &[Label] {
        &self.annotations
    }

    /// Tick marks as segments, x axis first.
    fn tick_segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let frame = self.frame;
        let x_len = self.style.tick_length * frame.height;
        let y_len = self.style.tick_length * frame.width;

        let x_ticks = self
            .x_axis
            .ticks
            .iter()
            .map(move |t| (Point::new(t.position, frame.bottom()), Point::new(t.position, frame.bottom() - x_len)));
        let y_ticks = self
            .y_axis
            .ticks
            .iter()
            .map(move |t| (Point::new(frame.x, t.position), Point::new(frame.x + y_len, t.position)));
        x_ticks.chain(y_ticks)
    }

    /// Every text item: tick labels, titles, then annotations.
    fn labels(&self) -> impl Iterator<Item = &Label> {
        let axes = [&self.x_axis, &self.y_axis];
        axes.into_iter()
            .flat_map(|axis| axis.ticks.iter().map(|t| &t.label).chain(std::iter::once(&axis.title)))
            .chain(self.annotations.iter())
    }

    /// Vector encoder holding the whole figure.
    #[must_use]
    pub fn to_svg_encoder(&self) -> SvgEncoder {
        let style = &self.style;
        let frame = self.frame;
        let mut encoder = SvgEncoder::new(style.width, style.height)
            .background(Some(style.background))
            .rect_outline(frame.x, frame.y, frame.width, frame.height, style.frame_color, style.frame_width);
        self.push_vector_shapes(&mut encoder);
        for label in self.labels() {
            encoder.add_element(label.to_svg_element());
        }
        encoder
    }

    fn push_vector_shapes(&self, encoder: &mut SvgEncoder) {
        let style = &self.style;

        for (from, to) in self.tick_segments() {
            encoder.add_element(SvgElement::Line {
                x1: from.x,
                y1: from.y,
                x2: to.x,
                y2: to.y,
                stroke: style.frame_color,
                stroke_width: style.frame_width,
                class: Some("tick"),
            });
        }

        for bar in self.error_bars.iter().filter(|bar| bar.is_visible()) {
            encoder.add_element(SvgElement::Line {
                x1: bar.x,
                y1: bar.y_top,
                x2: bar.x,
                y2: bar.y_bottom,
                stroke: style.error_bar_color,
                stroke_width: bar.width,
                class: Some("error-bar"),
            });
            if bar.cap_half_width > 0.0 {
                for y in [bar.y_top, bar.y_bottom] {
                    encoder.add_element(SvgElement::Line {
                        x1: bar.x - bar.cap_half_width,
                        y1: y,
                        x2: bar.x + bar.cap_half_width,
                        y2: y,
                        stroke: style.error_bar_color,
                        stroke_width: bar.width,
                        class: Some("error-cap"),
                    });
                }
            }
        }

        for marker in self.markers.iter().filter(|m| m.in_frame) {
            encoder.add_element(SvgElement::Circle {
                cx: marker.center.x,
                cy: marker.center.y,
                r: marker.radius,
                fill: style.marker_color,
                class: Some("marker"),
            });
        }
    }

    /// Render to an SVG document.
    #[must_use]
    pub fn to_svg(&self) -> String {
        self.to_svg_encoder().render()
    }

    /// Rasterize frame, ticks, error bars and markers. Text is not rasterized.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidDimensions`] for an empty canvas.
    pub fn to_framebuffer(&self) -> Result<Framebuffer> {
        let style = &self.style;
        let mut fb = Framebuffer::new(style.width, style.height)?;
        fb.clear(style.background);

        let frame_thickness = style.frame_width.round().max(1.0) as u32;
        draw_rect_outline(&mut fb, self.frame, style.frame_color, frame_thickness);
        for (from, to) in self.tick_segments() {
            let (x0, y0) = (from.x.round() as i32, from.y.round() as i32);
            draw_line(&mut fb, x0, y0, to.x.round() as i32, to.y.round() as i32, style.frame_color);
        }

        for bar in &self.error_bars {
            bar.draw(&mut fb, style.error_bar_color);
        }
        for marker in &self.markers {
            marker.draw(&mut fb, style.marker_color);
        }

        Ok(fb)
    }

    /// Raster shapes embedded as a PNG image, with vector text on top.
    ///
    /// # Errors
    ///
    /// Returns an error if rasterization or PNG encoding fails.
    pub fn to_embedded_svg(&self) -> Result<String> {
        let fb = self.to_framebuffer()?;
        let mut encoder = SvgEncoder::from_framebuffer(&fb)?;
        for label in self.labels() {
            encoder.add_element(label.to_svg_element());
        }
        Ok(encoder.render())
    }

    /// Encode the raster rendering as PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if rasterization or PNG encoding fails.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        PngEncoder::to_bytes(&self.to_framebuffer()?)
    }

    /// Write the SVG rendering to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_svg<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.to_svg_encoder().write_to_file(&path)?;
        log::info!("wrote {}", path.as_ref().display());
        Ok(())
    }

    /// Write the PNG rendering to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if rasterization, encoding or writing fails.
    pub fn write_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        PngEncoder::write_to_file(&self.to_framebuffer()?, &path)?;
        log::info!("wrote {}", path.as_ref().display());
        Ok(())
    }

    /// Write to a file, choosing the format from its extension.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnsupportedFormat`] for extensions other than
    /// `svg` and `png`, or any error of the chosen writer.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        match OutputFormat::from_path(path.as_ref())? {
            OutputFormat::Svg => self.write_svg(path),
            OutputFormat::Png => self.write_png(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Rect {
        Rect::new(10.0, 10.0, 80.0, 80.0)
    }

    #[test]
    fn test_error_bar_zero_is_invisible() {
        let bar = ErrorBar::new(50.0, 50.0, 0.0, &PlotStyle::report(), frame());
        assert!(!bar.is_visible());

        let mut fb = Framebuffer::new(100, 100).unwrap();
        bar.draw(&mut fb, Rgba::BLUE);
        assert_eq!(fb.count_pixels(Rgba::BLUE), 0);
    }

    #[test]
    fn test_error_bar_clipped_to_frame() {
        let bar = ErrorBar::new(50.0, 85.0, 20.0, &PlotStyle::report(), frame());
        assert!(bar.is_visible());
        assert!((bar.y_top - 65.0).abs() < f32::EPSILON);
        assert!((bar.y_bottom - 90.0).abs() < f32::EPSILON);
        assert!((bar.half_height - 20.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_error_bar_outside_frame_is_invisible() {
        let beside = ErrorBar::new(95.0, 50.0, 5.0, &PlotStyle::report(), frame());
        assert!(!beside.is_visible());

        let below = ErrorBar::new(50.0, 200.0, 5.0, &PlotStyle::report(), frame());
        assert!(!below.is_visible());
    }

    #[test]
    fn test_error_bar_draw_with_caps() {
        let style = PlotStyle { cap_half_width: 3.0, ..PlotStyle::report() };
        let bar = ErrorBar::new(50.0, 50.0, 10.0, &style, frame());

        let mut fb = Framebuffer::new(100, 100).unwrap();
        bar.draw(&mut fb, Rgba::BLUE);

        assert_eq!(fb.get_pixel(50, 45), Some(Rgba::BLUE));
        assert_eq!(fb.get_pixel(47, 40), Some(Rgba::BLUE));
        assert_eq!(fb.get_pixel(53, 60), Some(Rgba::BLUE));
        assert_eq!(fb.get_pixel(45, 50), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_marker_outside_frame_not_drawn() {
        let marker = Marker { center: Point::new(5.0, 5.0), radius: 3.0, in_frame: false };
        let mut fb = Framebuffer::new(20, 20).unwrap();
        marker.draw(&mut fb, Rgba::BLUE);
        assert_eq!(fb.count_pixels(Rgba::BLUE), 0);

        let marker = Marker { in_frame: true, ..marker };
        marker.draw(&mut fb, Rgba::BLUE);
        assert!(fb.count_pixels(Rgba::BLUE) > 0);
    }
}
