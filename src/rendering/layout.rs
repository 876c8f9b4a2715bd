/// Grid layout for the four-cell poster.
///
/// Rows are as tall as their tallest image plus the title strip, columns as
/// wide as their widest image. Images are never scaled, so heterogeneous
/// sizes can neither overlap nor be clipped.

use crate::{Error, GridPosition, Quad, Result};

/// Largest RGB canvas, in bytes, the composer will allocate.
pub const MAX_CANVAS_BYTES: u64 = 4 << 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Bytes of an 8-bit RGB buffer this size, if it fits in memory at all.
    pub fn rgb_byte_len(&self) -> Option<usize> {
        let bytes = (self.width as u64)
            .checked_mul(self.height as u64)?
            .checked_mul(3)?;
        usize::try_from(bytes).ok().filter(|b| *b as u64 <= MAX_CANVAS_BYTES)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Exclusive right edge
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// True when the two rectangles share at least one pixel.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn fits_within(&self, size: Size) -> bool {
        self.right() <= size.width && self.bottom() <= size.height
    }
}

/// Derived placement of the four cells on the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosterLayout {
    pub padding: u32,
    pub title_height: u32,
    pub top_row_height: u32,
    pub bottom_row_height: u32,
    pub left_col_width: u32,
    pub right_col_width: u32,
    pub canvas: Size,
    /// Top-left corner of each cell; the title is drawn here
    pub origins: Quad<Point>,
    /// Where each image lands, `title_height` below its origin
    pub images: Quad<Rect>,
}

impl PosterLayout {
    /// Fails when the canvas would not fit in `u32` pixels per side or
    /// exceed [`MAX_CANVAS_BYTES`].
    pub fn compute(sizes: &Quad<Size>, padding: u32, title_height: u32) -> Result<Self> {
        let too_large = || {
            Error::ConfigError(format!(
                "poster too large (padding {}, title height {})",
                padding, title_height
            ))
        };

        let top_row_height = sizes
            .top_left
            .height
            .max(sizes.top_right.height)
            .checked_add(title_height)
            .ok_or_else(too_large)?;
        let bottom_row_height = sizes
            .bottom_left
            .height
            .max(sizes.bottom_right.height)
            .checked_add(title_height)
            .ok_or_else(too_large)?;
        let left_col_width = sizes.top_left.width.max(sizes.bottom_left.width);
        let right_col_width = sizes.top_right.width.max(sizes.bottom_right.width);

        let margins = padding.checked_mul(3).ok_or_else(too_large)?;
        let canvas = Size {
            width: left_col_width
                .checked_add(right_col_width)
                .and_then(|w| w.checked_add(margins))
                .ok_or_else(too_large)?,
            height: top_row_height
                .checked_add(bottom_row_height)
                .and_then(|h| h.checked_add(margins))
                .ok_or_else(too_large)?,
        };
        if canvas.rgb_byte_len().is_none() {
            return Err(Error::ConfigError(format!(
                "poster canvas {}x{} exceeds {} bytes",
                canvas.width, canvas.height, MAX_CANVAS_BYTES
            )));
        }

        // every offset below is bounded by the canvas size
        let left_x = padding;
        let right_x = padding + left_col_width + padding;
        let top_y = padding;
        let bottom_y = padding + top_row_height + padding;

        let origins = Quad::from_fn(|pos| match pos {
            GridPosition::TopLeft => Point { x: left_x, y: top_y },
            GridPosition::TopRight => Point { x: right_x, y: top_y },
            GridPosition::BottomLeft => Point { x: left_x, y: bottom_y },
            GridPosition::BottomRight => Point { x: right_x, y: bottom_y },
        });

        let images = Quad::from_fn(|pos| {
            let origin = origins.get(pos);
            let size = sizes.get(pos);
            Rect {
                x: origin.x,
                y: origin.y + title_height,
                width: size.width,
                height: size.height,
            }
        });

        Ok(Self {
            padding,
            title_height,
            top_row_height,
            bottom_row_height,
            left_col_width,
            right_col_width,
            canvas,
            origins,
            images,
        })
    }

    pub fn origin(&self, pos: GridPosition) -> Point {
        *self.origins.get(pos)
    }

    pub fn image_rect(&self, pos: GridPosition) -> Rect {
        *self.images.get(pos)
    }

    /// The strip above an image reserved for its title.
    pub fn title_rect(&self, pos: GridPosition) -> Rect {
        let origin = self.origin(pos);
        let width = match pos {
            GridPosition::TopLeft | GridPosition::BottomLeft => self.left_col_width,
            GridPosition::TopRight | GridPosition::BottomRight => self.right_col_width,
        };
        Rect {
            x: origin.x,
            y: origin.y,
            width,
            height: self.title_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizes(tl: (u32, u32), tr: (u32, u32), bl: (u32, u32), br: (u32, u32)) -> Quad<Size> {
        Quad {
            top_left: Size::new(tl.0, tl.1),
            top_right: Size::new(tr.0, tr.1),
            bottom_left: Size::new(bl.0, bl.1),
            bottom_right: Size::new(br.0, br.1),
        }
    }

    #[test]
    fn compute_matches_reference_dimensions() {
        let layout = PosterLayout::compute(
            &sizes((100, 80), (120, 80), (100, 90), (120, 90)),
            40,
            60,
        )
        .unwrap();
        assert_eq!(layout.top_row_height, 140);
        assert_eq!(layout.bottom_row_height, 150);
        assert_eq!(layout.left_col_width, 100);
        assert_eq!(layout.right_col_width, 120);
        assert_eq!(layout.canvas, Size::new(340, 410));

        assert_eq!(layout.origin(GridPosition::TopLeft), Point { x: 40, y: 40 });
        assert_eq!(layout.origin(GridPosition::TopRight), Point { x: 180, y: 40 });
        assert_eq!(layout.origin(GridPosition::BottomLeft), Point { x: 40, y: 220 });
        assert_eq!(layout.origin(GridPosition::BottomRight), Point { x: 180, y: 220 });

        let br = layout.image_rect(GridPosition::BottomRight);
        assert_eq!((br.x, br.y, br.width, br.height), (180, 280, 120, 90));
    }

    #[test]
    fn asymmetric_images_use_row_and_column_maxima() {
        let layout =
            PosterLayout::compute(&sizes((10, 500), (700, 5), (300, 1), (2, 40)), 8, 20).unwrap();
        assert_eq!(layout.top_row_height, 520);
        assert_eq!(layout.bottom_row_height, 60);
        assert_eq!(layout.left_col_width, 300);
        assert_eq!(layout.right_col_width, 700);
        assert_eq!(layout.canvas, Size::new(1024, 604));
    }

    #[test]
    fn zero_padding_and_empty_images() {
        let layout = PosterLayout::compute(&sizes((0, 0), (0, 0), (0, 0), (0, 0)), 0, 0).unwrap();
        assert_eq!(layout.canvas, Size::new(0, 0));
        for pos in GridPosition::ALL {
            assert_eq!(layout.origin(pos), Point { x: 0, y: 0 });
        }
    }

    #[test]
    fn images_and_titles_stay_inside_and_never_overlap() {
        let dims = [0u32, 1, 37, 250];
        let mut checked = 0usize;
        for &a in &dims {
            for &b in &dims {
                for &c in &dims {
                    for &d in &dims {
                        // widths cycle through one permutation, heights through another
                        let q = sizes((a, d), (b, c), (c, a), (d, b));
                        let layout = PosterLayout::compute(&q, 40, 60).unwrap();
                        let mut rects = Vec::new();
                        for pos in GridPosition::ALL {
                            let img = layout.image_rect(pos);
                            let title = layout.title_rect(pos);
                            assert!(img.fits_within(layout.canvas), "{:?} escapes canvas", pos);
                            assert!(title.fits_within(layout.canvas));
                            rects.push(img);
                            rects.push(title);
                        }
                        for i in 0..rects.len() {
                            for j in (i + 1)..rects.len() {
                                assert!(
                                    !rects[i].intersects(&rects[j]),
                                    "{:?} overlaps {:?}",
                                    rects[i],
                                    rects[j]
                                );
                            }
                        }
                        checked += 1;
                    }
                }
            }
        }
        assert_eq!(checked, 256);
    }

    #[test]
    fn oversized_padding_is_rejected() {
        let q = sizes((10, 10), (10, 10), (10, 10), (10, 10));
        let res = PosterLayout::compute(&q, 2_000_000_000, 60);
        assert!(matches!(res, Err(Error::ConfigError(_))));
    }

    #[test]
    fn oversized_title_height_is_rejected() {
        let q = sizes((10, 10), (10, u32::MAX - 5), (10, 10), (10, 10));
        assert!(matches!(PosterLayout::compute(&q, 0, 60), Err(Error::ConfigError(_))));
    }

    #[test]
    fn canvas_beyond_byte_budget_is_rejected() {
        // each side fits in u32, the RGB buffer does not fit the budget
        let q = sizes((40_000, 40_000), (40_000, 40_000), (40_000, 40_000), (40_000, 40_000));
        let err = PosterLayout::compute(&q, 40, 60).unwrap_err();
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn rgb_byte_len_checks_overflow() {
        assert_eq!(Size::new(10, 10).rgb_byte_len(), Some(300));
        assert_eq!(Size::new(u32::MAX, u32::MAX).rgb_byte_len(), None);
    }

    #[test]
    fn rect_intersection_edges() {
        let a = Rect { x: 0, y: 0, width: 10, height: 10 };
        let touching = Rect { x: 10, y: 0, width: 5, height: 5 };
        let inside = Rect { x: 9, y: 9, width: 5, height: 5 };
        assert!(!a.intersects(&touching));
        assert!(a.intersects(&inside));
        assert!(a.fits_within(Size::new(10, 10)));
        assert!(!inside.fits_within(Size::new(10, 10)));
    }
}
