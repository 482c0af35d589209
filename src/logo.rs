use std::path::Path;

use image::{
    Rgba, RgbaImage,
    imageops::{self, FilterType},
};

use crate::{
    Error,
    types::{BORDER_ARC, BORDER_STROKE, LOGO_HEIGHT, LOGO_WIDTH},
};

pub(crate) const BLACK: Rgba<u8> = Rgba([0x00, 0x00, 0x00, 0xFF]);
pub(crate) const WHITE: Rgba<u8> = Rgba([0xFF, 0xFF, 0xFF, 0xFF]);

/// Outline drawn around an inserted logo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Border {
    /// Width of the arc that rounds each corner. The corner radius is half of it.
    pub arc: u32,
    /// Stroke width, centered on the logo bounds.
    pub stroke: f32,
    /// Stroke colour. Defaults to white.
    pub color: Rgba<u8>,
}

impl Default for Border {
    fn default() -> Self {
        Border {
            arc: BORDER_ARC,
            stroke: BORDER_STROKE,
            color: WHITE,
        }
    }
}

/// Size a logo is drawn at.
///
/// With `need_compress` each axis is capped on its own, so a 200x100 logo
/// becomes 60x60 rather than keeping its aspect ratio.
pub fn logo_dimensions(width: u32, height: u32, need_compress: bool) -> (u32, u32) {
    if need_compress {
        (width.min(LOGO_WIDTH), height.min(LOGO_HEIGHT))
    } else {
        (width, height)
    }
}

/// Loads the logo at `logo_path` and draws it, with a border, in the middle of `canvas`.
pub fn insert_logo(canvas: &mut RgbaImage, logo_path: &Path, need_compress: bool) -> Result<(), Error> {
    if !logo_path.exists() {
        return Err(Error::LogoNotFound(logo_path.to_path_buf()));
    }

    let logo = image::open(logo_path)?.to_rgba8();
    let (width, height) = logo_dimensions(logo.width(), logo.height(), need_compress);
    let logo = if (width, height) == logo.dimensions() {
        logo
    } else {
        imageops::resize(&logo, width, height, FilterType::Triangle)
    };

    let x = (i64::from(canvas.width()) - i64::from(width)) / 2;
    let y = (i64::from(canvas.height()) - i64::from(height)) / 2;
    tracing::debug!(x, y, width, height, "inserting logo");

    imageops::overlay(canvas, &logo, x, y);
    draw_rounded_border(canvas, x, y, width, height, &Border::default());
    Ok(())
}

/// Strokes a rounded rectangle whose path runs along the given bounds.
pub fn draw_rounded_border(
    canvas: &mut RgbaImage,
    x: i64,
    y: i64,
    width: u32,
    height: u32,
    border: &Border,
) {
    let half_w = width as f32 / 2.0;
    let half_h = height as f32 / 2.0;
    let radius = (border.arc as f32 / 2.0).min(half_w).min(half_h);
    let center_x = x as f32 + half_w;
    let center_y = y as f32 + half_h;
    let half_stroke = border.stroke / 2.0;

    let reach = border.stroke.ceil() as i64 + 1;
    let x0 = (x - reach).max(0);
    let y0 = (y - reach).max(0);
    let x1 = (x + i64::from(width) + reach).min(i64::from(canvas.width()));
    let y1 = (y + i64::from(height) + reach).min(i64::from(canvas.height()));

    for py in y0..y1 {
        for px in x0..x1 {
            // Signed distance from the pixel center to the rounded rectangle path.
            let qx = (px as f32 + 0.5 - center_x).abs() - (half_w - radius);
            let qy = (py as f32 + 0.5 - center_y).abs() - (half_h - radius);
            let outside = qx.max(0.0).hypot(qy.max(0.0));
            let inside = qx.max(qy).min(0.0);
            let distance = outside + inside - radius;

            if distance.abs() <= half_stroke {
                canvas.put_pixel(px as u32, py as u32, border.color);
            }
        }
    }
}
