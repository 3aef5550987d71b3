//! SVG output encoder.
//!
//! Produces vector SVG (markers, error bars, frame and text) and can embed a
//! raster framebuffer as a base64 PNG underneath vector text.

use crate::color::Rgba;
use crate::error::Result;
use crate::framebuffer::Framebuffer;
use crate::markup::{Markup, Shift};
use base64::{engine::general_purpose::STANDARD, Engine};
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Font stack matching ROOT's default text font (Helvetica, code 42).
const FONT_FAMILY: &str = "Helvetica, Arial, sans-serif";

/// Size of sub/superscript text relative to its run.
const SCRIPT_SCALE: f32 = 0.7;

/// SVG encoder for vector and embedded-raster output.
#[derive(Debug, Clone)]
pub struct SvgEncoder {
    width: u32,
    height: u32,
    /// Background color (None for transparent)
    background: Option<Rgba>,
    elements: Vec<SvgElement>,
}

/// An SVG element.
///
/// Field names match SVG attribute names.
#[derive(Debug, Clone)]
#[allow(missing_docs)]
pub enum SvgElement {
    /// Rectangle
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<Rgba>,
        stroke: Option<Rgba>,
        stroke_width: f32,
    },
    /// Circle
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
        fill: Rgba,
        class: Option<&'static str>,
    },
    /// Line
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke: Rgba,
        stroke_width: f32,
        class: Option<&'static str>,
    },
    /// Text, possibly styled, optionally rotated about its anchor point
    Text {
        x: f32,
        y: f32,
        content: Markup,
        font_size: f32,
        fill: Rgba,
        anchor: TextAnchor,
        rotation: f32,
    },
    /// Embedded raster image (base64 PNG data URI)
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        data: String,
    },
}

/// Text anchor position for SVG text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    /// Align text start at position (left-aligned)
    #[default]
    Start,
    /// Center text at position
    Middle,
    /// Align text end at position (right-aligned)
    End,
}

impl TextAnchor {
    fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

impl SvgEncoder {
    /// Create a new SVG encoder with given dimensions and a white background.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, background: Some(Rgba::WHITE), elements: Vec::new() }
    }

    /// Create from a framebuffer (embeds as raster image).
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn from_framebuffer(fb: &Framebuffer) -> Result<Self> {
        let mut encoder = Self::new(fb.width(), fb.height()).background(None);

        let png_bytes = super::PngEncoder::to_bytes(fb)?;
        let data_uri = format!("data:image/png;base64,{}", STANDARD.encode(&png_bytes));

        encoder.add_element(SvgElement::Image {
            x: 0.0,
            y: 0.0,
            width: fb.width() as f32,
            height: fb.height() as f32,
            data: data_uri,
        });

        Ok(encoder)
    }

    /// Set background color (None for transparent).
    #[must_use]
    pub fn background(mut self, color: Option<Rgba>) -> Self {
        self.background = color;
        self
    }

    /// Add an unfilled rectangle outline.
    #[must_use]
    pub fn rect_outline(mut self, x: f32, y: f32, width: f32, height: f32, stroke: Rgba, stroke_width: f32) -> Self {
        self.elements.push(SvgElement::Rect { x, y, width, height, fill: None, stroke: Some(stroke), stroke_width });
        self
    }

    /// Add a raw element.
    pub fn add_element(&mut self, element: SvgElement) {
        self.elements.push(element);
    }

    /// Render to SVG string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut svg = String::with_capacity(4096);

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            self.width, self.height, self.width, self.height
        );

        if let Some(bg) = self.background {
            let _ = writeln!(svg, r#"  <rect width="100%" height="100%" fill="{}"/>"#, bg.to_css());
        }

        for element in &self.elements {
            let _ = writeln!(svg, "  {}", element_to_svg(element));
        }

        svg.push_str("</svg>\n");
        svg
    }

    /// Write to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(self.render().as_bytes())?;
        Ok(())
    }
}

/// Escape XML special characters.
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}

fn class_attr(class: Option<&'static str>) -> String {
    class.map(|c| format!(r#" class="{c}""#)).unwrap_or_default()
}

/// Text content: escaped plain text, or one `<tspan>` per styled run.
fn text_content(content: &Markup, font_size: f32) -> String {
    if content.is_plain() {
        return escape_xml(&content.plain_text());
    }

    let mut out = String::new();
    for run in content.runs() {
        let mut attrs = String::new();
        if run.bold {
            attrs.push_str(r#" font-weight="bold""#);
        }
        if run.italic {
            attrs.push_str(r#" font-style="italic""#);
        }
        if let Some(color) = run.color {
            let _ = write!(attrs, r#" fill="{}""#, color.to_css());
        }

        let mut size = font_size * run.scale;
        match run.shift {
            Shift::Baseline => {}
            Shift::Sub => {
                size *= SCRIPT_SCALE;
                attrs.push_str(r#" baseline-shift="sub""#);
            }
            Shift::Super => {
                size *= SCRIPT_SCALE;
                attrs.push_str(r#" baseline-shift="super""#);
            }
        }
        if (size - font_size).abs() > f32::EPSILON {
            let _ = write!(attrs, r#" font-size="{size}""#);
        }

        let _ = write!(out, "<tspan{attrs}>{}</tspan>", escape_xml(&run.text));
    }
    out
}

/// Convert an SVG element to its string representation.
fn element_to_svg(element: &SvgElement) -> String {
    match element {
        SvgElement::Rect { x, y, width, height, fill, stroke, stroke_width } => {
            let fill_attr = fill.map(Rgba::to_css).unwrap_or_else(|| "none".to_string());
            let stroke_attr = stroke
                .map(|s| format!(r#" stroke="{}" stroke-width="{stroke_width}""#, s.to_css()))
                .unwrap_or_default();
            format!(r#"<rect x="{x}" y="{y}" width="{width}" height="{height}" fill="{fill_attr}"{stroke_attr}/>"#)
        }
        SvgElement::Circle { cx, cy, r, fill, class } => {
            format!(r#"<circle{} cx="{cx}" cy="{cy}" r="{r}" fill="{}"/>"#, class_attr(*class), fill.to_css())
        }
        SvgElement::Line { x1, y1, x2, y2, stroke, stroke_width, class } => {
            format!(
                r#"<line{} x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{}" stroke-width="{stroke_width}"/>"#,
                class_attr(*class),
                stroke.to_css()
            )
        }
        SvgElement::Text { x, y, content, font_size, fill, anchor, rotation } => {
            let transform = if rotation.abs() > f32::EPSILON {
                format!(r#" transform="rotate({rotation} {x} {y})""#)
            } else {
                String::new()
            };
            format!(
                r#"<text x="{x}" y="{y}" font-size="{font_size}" fill="{}" text-anchor="{}" font-family="{FONT_FAMILY}"{transform}>{}</text>"#,
                fill.to_css(),
                anchor.as_str(),
                text_content(content, *font_size)
            )
        }
        SvgElement::Image { x, y, width, height, data } => {
            format!(r#"<image x="{x}" y="{y}" width="{width}" height="{height}" xlink:href="{data}"/>"#)
        }
    }
}
