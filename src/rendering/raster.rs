/// Executes paint commands onto an RGB canvas

use image::{imageops, Rgb, RgbImage};

use crate::rendering::font::TitleFont;
use crate::rendering::layout::{PosterLayout, Rect, Size};
use crate::rendering::paint::PaintCommand;
use crate::{Error, Quad, Result};

pub fn rasterize(
    layout: &PosterLayout,
    images: &Quad<&RgbImage>,
    commands: &[PaintCommand],
    font: &TitleFont,
) -> Result<RgbImage> {
    let Size { width, height } = layout.canvas;
    if layout.canvas.rgb_byte_len().is_none() {
        return Err(Error::ConfigError(format!(
            "cannot allocate a {}x{} poster canvas",
            width, height
        )));
    }
    let mut canvas = RgbImage::new(width, height);

    for cmd in commands {
        match cmd {
            PaintCommand::Fill { rgb } => {
                for px in canvas.pixels_mut() {
                    *px = Rgb(*rgb);
                }
            }
            PaintCommand::Text { x, y, text, rgb } => {
                font.draw_text(&mut canvas, *x, *y, text, Rgb(*rgb));
            }
            PaintCommand::Blit { x, y, cell } => {
                imageops::replace(&mut canvas, *images.get(*cell), *x as i64, *y as i64);
            }
            PaintCommand::Outline { rect, stroke, rgb } => {
                stroke_rect(&mut canvas, *rect, *stroke, Rgb(*rgb));
            }
        }
    }
    Ok(canvas)
}

/// Draw `stroke` nested one-pixel frames inside `rect`, clipped to the canvas.
fn stroke_rect(canvas: &mut RgbImage, rect: Rect, stroke: u32, color: Rgb<u8>) {
    for inset in 0..stroke {
        if rect.width <= inset * 2 || rect.height <= inset * 2 {
            break;
        }
        let left = rect.x + inset;
        let top = rect.y + inset;
        let right = rect.right() - 1 - inset;
        let bottom = rect.bottom() - 1 - inset;
        for x in left..=right {
            put_clipped(canvas, x, top, color);
            put_clipped(canvas, x, bottom, color);
        }
        for y in top..=bottom {
            put_clipped(canvas, left, y, color);
            put_clipped(canvas, right, y, color);
        }
    }
}

fn put_clipped(canvas: &mut RgbImage, x: u32, y: u32, color: Rgb<u8>) {
    if x < canvas.width() && y < canvas.height() {
        canvas.put_pixel(x, y, color);
    }
}
