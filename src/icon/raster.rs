//! Raster back-end: draws the composition into an RGBA canvas and saves PNG.
//!
//! Coverage is decided per pixel centre with no anti-aliasing, so output is
//! exact and repeatable. The bitmap carries three food groups (green, red,
//! yellow), each in one flat colour; the brown bar is vector-only.

use image::{ImageError, ImageFormat, Rgba, RgbaImage};
use tracing::{debug, info};

use super::{check_size, Composition, IconSpec, Item, Role, Shape, PALETTE, PROPORTIONS};
use crate::error::{Error, Result};

const MIN_STROKE: u32 = 1;

/// Render the icon for `size` into a transparent `size` x `size` image.
pub fn render_raster(size: u32) -> Result<RgbaImage> {
    check_size(size)?;
    check_canvas(size)?;
    let composition = Composition::for_size(size);
    let stroke_width = i64::from(PROPORTIONS.outline_width(size, MIN_STROKE));

    let mut canvas = Canvas::new(size);
    for item in composition.items.iter().filter(|i| i.role != Role::Brown) {
        canvas.draw(item, stroke_width);
    }
    Ok(canvas.image)
}

/// `RgbaImage::new` panics when `size * size * 4` overflows `usize`.
fn check_canvas(size: u32) -> Result<()> {
    let edge = usize::try_from(size).map_err(|_| Error::CanvasTooLarge(size))?;
    edge.checked_mul(edge)
        .and_then(|n| n.checked_mul(4))
        .map(|_| ())
        .ok_or(Error::CanvasTooLarge(size))
}

/// Bitmap fill: one colour per food group, shapes keep their own otherwise.
fn raster_fill(item: &Item) -> Rgba<u8> {
    match item.role {
        Role::Green => PALETTE.green,
        Role::Red => PALETTE.tomato,
        Role::Yellow => PALETTE.yellow,
        _ => item.fill,
    }
    .to_rgba()
}

/// Render `spec.size` and save it as PNG at `spec.output_path`.
/// The parent directory must already exist.
pub fn write_raster(spec: &IconSpec) -> Result<()> {
    let image = render_raster(spec.size)?;
    image
        .save_with_format(&spec.output_path, ImageFormat::Png)
        .map_err(|e| match e {
            ImageError::IoError(source) => Error::io(&spec.output_path, source),
            source => Error::Encode {
                path: spec.output_path.clone(),
                source,
            },
        })?;
    info!(
        "Generated {} ({}x{})",
        spec.output_path.display(),
        spec.size,
        spec.size
    );
    Ok(())
}

struct Canvas {
    image: RgbaImage,
    size: i64,
}

impl Canvas {
    fn new(size: u32) -> Self {
        Self {
            // Zeroed buffer: fully transparent.
            image: RgbaImage::new(size, size),
            size: i64::from(size),
        }
    }

    fn draw(&mut self, item: &Item, stroke_width: i64) {
        let fill = raster_fill(item);
        debug!("{:?}: {:?}", item.role, item.shape);
        match item.shape {
            Shape::RoundedRect {
                x,
                y,
                width,
                height,
                radius,
            } => self.fill_rounded_rect(x, y, width, height, radius, fill),
            Shape::Circle { cx, cy, r } => self.fill_ellipse(cx, cy, r, r, fill),
            Shape::Ellipse { cx, cy, rx, ry } => self.fill_ellipse(cx, cy, rx, ry, fill),
        }
        if let Some(color) = item.stroke {
            let (cx, cy, rx, ry) = match item.shape {
                Shape::Circle { cx, cy, r } => (cx, cy, r, r),
                Shape::Ellipse { cx, cy, rx, ry } => (cx, cy, rx, ry),
                // Outlines are only defined for round shapes.
                Shape::RoundedRect { .. } => return,
            };
            self.stroke_ellipse(cx, cy, rx, ry, stroke_width, color.to_rgba());
        }
    }

    /// Clip `[lo, hi)` to the canvas.
    fn span(&self, lo: i64, hi: i64) -> std::ops::Range<u32> {
        let lo = lo.clamp(0, self.size);
        let hi = hi.clamp(0, self.size);
        lo as u32..hi.max(lo) as u32
    }

    fn fill_rounded_rect(&mut self, x: i64, y: i64, w: i64, h: i64, radius: i64, color: Rgba<u8>) {
        if w <= 0 || h <= 0 {
            return;
        }
        let r = radius.clamp(0, w.min(h) / 2) as f64;
        let (left, top) = (x as f64 + r, y as f64 + r);
        let (right, bottom) = ((x + w) as f64 - r, (y + h) as f64 - r);

        for py in self.span(y, y + h) {
            for px in self.span(x, x + w) {
                let fx = f64::from(px) + 0.5;
                let fy = f64::from(py) + 0.5;
                // Distance to the nearest point of the inner (radius-shrunk) rectangle.
                let dx = fx - fx.clamp(left, right);
                let dy = fy - fy.clamp(top, bottom);
                if dx * dx + dy * dy <= r * r {
                    self.image.put_pixel(px, py, color);
                }
            }
        }
    }

    fn fill_ellipse(&mut self, cx: i64, cy: i64, rx: i64, ry: i64, color: Rgba<u8>) {
        if rx <= 0 || ry <= 0 {
            return;
        }
        for py in self.span(cy - ry - 1, cy + ry + 1) {
            for px in self.span(cx - rx - 1, cx + rx + 1) {
                if in_ellipse(px, py, cx, cy, rx, ry) {
                    self.image.put_pixel(px, py, color);
                }
            }
        }
    }

    /// Paint the band between the ellipse edge and `width` pixels inside it.
    fn stroke_ellipse(&mut self, cx: i64, cy: i64, rx: i64, ry: i64, width: i64, color: Rgba<u8>) {
        if rx <= 0 || ry <= 0 || width <= 0 {
            return;
        }
        let (irx, iry) = (rx - width, ry - width);
        for py in self.span(cy - ry - 1, cy + ry + 1) {
            for px in self.span(cx - rx - 1, cx + rx + 1) {
                if !in_ellipse(px, py, cx, cy, rx, ry) {
                    continue;
                }
                if irx <= 0 || iry <= 0 || !in_ellipse(px, py, cx, cy, irx, iry) {
                    self.image.put_pixel(px, py, color);
                }
            }
        }
    }
}

fn in_ellipse(px: u32, py: u32, cx: i64, cy: i64, rx: i64, ry: i64) -> bool {
    let dx = (f64::from(px) + 0.5 - cx as f64) / rx as f64;
    let dy = (f64::from(py) + 0.5 - cy as f64) / ry as f64;
    dx * dx + dy * dy <= 1.0
}
