//! Poster composition: load the four diagrams, lay them out, write the result.

use std::path::{Path, PathBuf};

use image::{ImageReader, RgbImage};

use crate::rendering::font::{FontFallback, TitleFont};
use crate::rendering::layout::PosterLayout;
use crate::rendering::{self, Cell};
use crate::{output, Error, PosterConfig, Quad, Result};

/// Summary of a successful run
#[derive(Debug, Clone)]
pub struct PosterReport {
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Set when titles were drawn with the built-in font
    pub font_fallback: Option<FontFallback>,
}

/// A composed canvas that has not been written anywhere yet
#[derive(Debug, Clone)]
pub struct ComposedPoster {
    pub canvas: RgbImage,
    pub layout: PosterLayout,
    pub font_fallback: Option<FontFallback>,
}

pub struct PosterComposer {
    config: PosterConfig,
}

impl PosterComposer {
    pub fn new(config: PosterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PosterConfig {
        &self.config
    }

    /// Check that every input exists, then decode them in grid order.
    ///
    /// The existence check covers all four files before any decoding, so a
    /// missing file is reported without touching the others.
    pub fn load_cells(&self) -> Result<Quad<Cell>> {
        for (pos, source) in self.config.inputs.iter() {
            if !source.path.is_file() {
                log::debug!("{} input missing: {}", pos.label(), source.path.display());
                return Err(Error::MissingInput(source.path.clone()));
            }
        }

        self.config.inputs.each_ref().try_map(|_, source| {
            let image = load_rgb(&source.path)?;
            log::debug!(
                "Loaded {} ({}x{})",
                source.path.display(),
                image.width(),
                image.height()
            );
            Ok(Cell::new(source.title.clone(), image))
        })
    }

    /// Compose already loaded cells with this composer's settings.
    pub fn compose(&self, cells: &Quad<Cell>) -> Result<ComposedPoster> {
        let (font, font_fallback) =
            TitleFont::load(self.config.font_path.as_deref(), self.config.font_size);
        let (canvas, layout) = rendering::compose(
            cells,
            self.config.padding,
            self.config.title_height,
            self.config.border_width,
            &font,
        )?;
        Ok(ComposedPoster {
            canvas,
            layout,
            font_fallback,
        })
    }

    /// Load, compose and persist the poster.
    pub fn run(&self) -> Result<PosterReport> {
        let cells = self.load_cells()?;
        let poster = self.compose(&cells)?;
        output::save_image(&self.config.output, &poster.canvas)?;
        log::info!(
            "Wrote poster {} ({}x{})",
            self.config.output.display(),
            poster.layout.canvas.width,
            poster.layout.canvas.height
        );
        Ok(PosterReport {
            output: self.config.output.clone(),
            width: poster.layout.canvas.width,
            height: poster.layout.canvas.height,
            font_fallback: poster.font_fallback,
        })
    }
}

/// Decode by content; the extension is only a hint when sniffing fails.
fn load_rgb(path: &Path) -> Result<RgbImage> {
    let reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| Error::io(path, e))?;
    let img = reader.decode().map_err(|source| Error::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.to_rgb8())
}
