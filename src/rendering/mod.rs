//! Poster rendering: layout, paint commands, rasterization and title fonts

pub mod font;
pub mod layout;
pub mod paint;
pub mod raster;

use image::RgbImage;

use crate::rendering::font::TitleFont;
use crate::rendering::layout::{PosterLayout, Size};
use crate::{Quad, Result};

/// One titled image in the grid.
#[derive(Debug, Clone)]
pub struct Cell {
    pub title: String,
    pub image: RgbImage,
}

impl Cell {
    pub fn new(title: impl Into<String>, image: RgbImage) -> Self {
        Self {
            title: title.into(),
            image,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.image.width(), self.image.height())
    }
}

/// Lay out the four cells and draw them onto a fresh white canvas.
///
/// Fails with [`crate::Error::ConfigError`] when the padding, title height
/// and image sizes add up to a canvas too large to allocate.
pub fn compose(
    cells: &Quad<Cell>,
    padding: u32,
    title_height: u32,
    border_width: u32,
    font: &TitleFont,
) -> Result<(RgbImage, PosterLayout)> {
    let sizes = cells.each_ref().map(|_, c| c.size());
    let layout = PosterLayout::compute(&sizes, padding, title_height)?;
    log::debug!(
        "Poster layout: rows {}/{}, cols {}/{}, canvas {}x{}",
        layout.top_row_height,
        layout.bottom_row_height,
        layout.left_col_width,
        layout.right_col_width,
        layout.canvas.width,
        layout.canvas.height
    );

    let titles = cells.each_ref().map(|_, c| c.title.as_str());
    let commands = paint::paint_list(&layout, &titles, border_width);
    let images = cells.each_ref().map(|_, c| &c.image);
    let canvas = raster::rasterize(&layout, &images, &commands, font)?;
    Ok((canvas, layout))
}
