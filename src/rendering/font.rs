//! Title font lookup.
//!
//! The preferred face is a TrueType/OpenType file. When it cannot be found or
//! parsed, titles are drawn with a built-in 8x8 bitmap font instead; that
//! branch is an expected outcome reported through [`FontFallback`], not an
//! error.

use std::fmt;
use std::path::{Path, PathBuf};

use ab_glyph::{point, Font, FontArc, PxScale, ScaleFont};
use font8x8::UnicodeFonts;
use image::{Rgb, RgbImage};

const BUILTIN_GLYPH_SIZE: u32 = 8;

/// Directories searched for a bare font file name after the working directory.
const FONT_SEARCH_DIRS: &[&str] = &[
    "/usr/share/fonts/truetype/msttcorefonts",
    "/usr/share/fonts/truetype",
    "/usr/share/fonts/TTF",
    "/usr/share/fonts",
    "/Library/Fonts",
    "/System/Library/Fonts/Supplemental",
    "C:\\Windows\\Fonts",
];

/// Why the preferred font was not used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontFallback {
    /// No font path was configured
    NotConfigured,
    /// The file was not found in the working directory or system font dirs
    NotFound(PathBuf),
    /// The file exists but could not be read or parsed as a font
    Unusable { path: PathBuf, reason: String },
}

impl fmt::Display for FontFallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontFallback::NotConfigured => write!(f, "no title font configured"),
            FontFallback::NotFound(p) => write!(f, "font {} not found", p.display()),
            FontFallback::Unusable { path, reason } => {
                write!(f, "font {} unusable: {}", path.display(), reason)
            }
        }
    }
}

/// Font used to draw cell titles.
#[derive(Clone)]
pub enum TitleFont {
    Preferred { font: FontArc, scale: PxScale },
    /// Built-in bitmap glyphs, each pixel drawn as a `scale` x `scale` block
    Builtin { scale: u32 },
}

impl fmt::Debug for TitleFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TitleFont::Preferred { scale, .. } => f
                .debug_struct("Preferred")
                .field("scale", &scale.y)
                .finish(),
            TitleFont::Builtin { scale } => {
                f.debug_struct("Builtin").field("scale", scale).finish()
            }
        }
    }
}

impl TitleFont {
    /// Try the preferred face, otherwise fall back to the built-in font.
    pub fn load(path: Option<&Path>, size: f32) -> (TitleFont, Option<FontFallback>) {
        let outcome = match path {
            None => Err(FontFallback::NotConfigured),
            Some(p) => Self::load_preferred(p, size),
        };
        match outcome {
            Ok(font) => (font, None),
            Err(reason) => {
                log::warn!("Using built-in title font: {}", reason);
                (Self::builtin(size), Some(reason))
            }
        }
    }

    pub fn builtin(size: f32) -> TitleFont {
        let scale = (size / BUILTIN_GLYPH_SIZE as f32).round().max(1.0) as u32;
        TitleFont::Builtin { scale }
    }

    fn load_preferred(path: &Path, size: f32) -> Result<TitleFont, FontFallback> {
        let resolved =
            resolve_font_path(path).ok_or_else(|| FontFallback::NotFound(path.to_path_buf()))?;
        let bytes = std::fs::read(&resolved).map_err(|e| FontFallback::Unusable {
            path: resolved.clone(),
            reason: e.to_string(),
        })?;
        let font = FontArc::try_from_vec(bytes).map_err(|e| FontFallback::Unusable {
            path: resolved.clone(),
            reason: e.to_string(),
        })?;
        log::debug!("Loaded title font {}", resolved.display());
        Ok(TitleFont::Preferred {
            font,
            scale: PxScale::from(size),
        })
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, TitleFont::Builtin { .. })
    }

    /// Draw `text` with its top-left corner at (`x`, `y`). Pixels falling
    /// outside the canvas are dropped.
    pub fn draw_text(&self, canvas: &mut RgbImage, x: u32, y: u32, text: &str, color: Rgb<u8>) {
        match self {
            TitleFont::Preferred { font, scale } => {
                draw_outlined(canvas, font, *scale, x, y, text, color)
            }
            TitleFont::Builtin { scale } => draw_bitmap(canvas, *scale, x, y, text, color),
        }
    }
}

fn resolve_font_path(path: &Path) -> Option<PathBuf> {
    if path.is_file() {
        return Some(path.to_path_buf());
    }
    // only bare names are looked up in the system directories
    if path.components().count() != 1 {
        return None;
    }
    FONT_SEARCH_DIRS
        .iter()
        .map(|dir| Path::new(dir).join(path))
        .find(|candidate| candidate.is_file())
}

fn draw_outlined(
    canvas: &mut RgbImage,
    font: &FontArc,
    scale: PxScale,
    x: u32,
    y: u32,
    text: &str,
    color: Rgb<u8>,
) {
    let scaled = font.as_scaled(scale);
    let baseline = y as f32 + scaled.ascent();
    let mut caret = x as f32;
    let mut previous = None;

    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(prev) = previous {
            caret += scaled.kern(prev, id);
        }
        let glyph = id.with_scale_and_position(scale, point(caret, baseline));
        caret += scaled.h_advance(id);
        previous = Some(id);

        let Some(outlined) = font.outline_glyph(glyph) else {
            continue;
        };
        let bounds = outlined.px_bounds();
        outlined.draw(|gx, gy, coverage| {
            let px = bounds.min.x as i64 + gx as i64;
            let py = bounds.min.y as i64 + gy as i64;
            blend_pixel(canvas, px, py, color, coverage);
        });
    }
}

fn draw_bitmap(canvas: &mut RgbImage, scale: u32, x: u32, y: u32, text: &str, color: Rgb<u8>) {
    let advance = BUILTIN_GLYPH_SIZE * scale;
    for (i, c) in text.chars().enumerate() {
        let rows = font8x8::BASIC_FONTS
            .get(c)
            .or_else(|| font8x8::BASIC_FONTS.get('?'))
            .unwrap_or([0; 8]);
        let gx = x as i64 + i as i64 * advance as i64;
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..BUILTIN_GLYPH_SIZE {
                if bits & (1 << col) == 0 {
                    continue;
                }
                for dy in 0..scale {
                    for dx in 0..scale {
                        let px = gx + (col * scale + dx) as i64;
                        let py = y as i64 + (row as u32 * scale + dy) as i64;
                        blend_pixel(canvas, px, py, color, 1.0);
                    }
                }
            }
        }
    }
}

fn blend_pixel(canvas: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>, coverage: f32) {
    if x < 0 || y < 0 || x >= canvas.width() as i64 || y >= canvas.height() as i64 {
        return;
    }
    let alpha = coverage.clamp(0.0, 1.0);
    let dst = canvas.get_pixel_mut(x as u32, y as u32);
    for ch in 0..3 {
        let blended = dst.0[ch] as f32 * (1.0 - alpha) + color.0[ch] as f32 * alpha;
        dst.0[ch] = blended.round() as u8;
    }
}
