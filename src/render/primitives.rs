//! Primitive rendering functions.
//!
//! Integer rasterization of the few shapes a figure needs: straight segments
//! (frame, ticks, error bars), filled circles (markers) and rectangle outlines.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::geometry::Rect;

/// Something that can rasterize itself onto a framebuffer.
pub trait Drawable {
    /// Draw this item to a framebuffer in the given color.
    fn draw(&self, fb: &mut Framebuffer, color: Rgba);
}

// ============================================================================
// Line Drawing
// ============================================================================

/// Draw a one-pixel line using Bresenham's algorithm.
pub fn draw_line(fb: &mut Framebuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba) {
    let (x0, y0, x1, y1) = (i64::from(x0), i64::from(y0), i64::from(x1), i64::from(y1));
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let (mut x, mut y) = (x0, y0);

    loop {
        plot(fb, x, y, color);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Draw a vertical segment `thickness` pixels wide, centered on `x`.
///
/// Both end rows are included.
pub fn draw_vline(fb: &mut Framebuffer, x: f32, y_top: f32, y_bottom: f32, thickness: u32, color: Rgba) {
    let (top, bottom) = if y_top <= y_bottom { (y_top, y_bottom) } else { (y_bottom, y_top) };
    let thickness = i64::from(thickness.max(1));
    let left = (f64::from(x) - thickness as f64 / 2.0).round() as i64;
    let top = top.round() as i64;
    let bottom = bottom.round() as i64;

    fill_clipped(fb, left, top, thickness, bottom.saturating_sub(top).saturating_add(1), color);
}

/// Draw a horizontal segment `thickness` pixels tall, centered on `y`.
///
/// Both end columns are included.
pub fn draw_hline(fb: &mut Framebuffer, x_left: f32, x_right: f32, y: f32, thickness: u32, color: Rgba) {
    let (left, right) = if x_left <= x_right { (x_left, x_right) } else { (x_right, x_left) };
    let thickness = i64::from(thickness.max(1));
    let top = (f64::from(y) - thickness as f64 / 2.0).round() as i64;
    let left = left.round() as i64;
    let right = right.round() as i64;

    fill_clipped(fb, left, top, right.saturating_sub(left).saturating_add(1), thickness, color);
}

// ============================================================================
// Rectangle Drawing
// ============================================================================

/// Draw a rectangle outline with the given line thickness, inside the rectangle.
pub fn draw_rect_outline(fb: &mut Framebuffer, rect: Rect, color: Rgba, thickness: u32) {
    let t = i64::from(thickness.max(1));
    let x = rect.x.round() as i64;
    let y = rect.y.round() as i64;
    let w = rect.width.round() as i64;
    let h = rect.height.round() as i64;

    fill_clipped(fb, x, y, w, t, color);
    fill_clipped(fb, x, y.saturating_add(h).saturating_sub(t), w, t, color);
    fill_clipped(fb, x, y, t, h, color);
    fill_clipped(fb, x.saturating_add(w).saturating_sub(t), y, t, h, color);
}

// ============================================================================
// Circle Drawing
// ============================================================================

/// Draw a filled circle using the midpoint algorithm.
pub fn draw_circle(fb: &mut Framebuffer, cx: i32, cy: i32, radius: i32, color: Rgba) {
    let (cx, cy, radius) = (i64::from(cx), i64::from(cy), i64::from(radius));
    if radius <= 0 {
        if radius == 0 {
            plot(fb, cx, cy, color);
        }
        return;
    }

    let rows = 0..i64::from(fb.height());
    let mut x = radius;
    let mut y = 0_i64;
    let mut err = 1 - radius;

    while x >= y {
        for (half, row) in [(x, cy + y), (x, cy - y), (y, cy + x), (y, cy - x)] {
            if rows.contains(&row) {
                fill_clipped(fb, cx - half, row, 2 * half + 1, 1, color);
            }
        }

        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

/// Fill a rectangle given in signed coordinates, clipped to the framebuffer.
fn fill_clipped(fb: &mut Framebuffer, x: i64, y: i64, w: i64, h: i64, color: Rgba) {
    let x_start = x.max(0);
    let y_start = y.max(0);
    let x_end = x.saturating_add(w).min(i64::from(fb.width()));
    let y_end = y.saturating_add(h).min(i64::from(fb.height()));

    if x_start < x_end && y_start < y_end {
        fb.fill_rect(
            x_start as u32,
            y_start as u32,
            (x_end - x_start) as u32,
            (y_end - y_start) as u32,
            color,
        );
    }
}

#[inline]
fn plot(fb: &mut Framebuffer, x: i64, y: i64, color: Rgba) {
    if let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) {
        fb.set_pixel(x, y, color);
    }
}
