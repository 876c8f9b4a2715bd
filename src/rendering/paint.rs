/// Paint command list for a poster

use crate::rendering::layout::{PosterLayout, Rect};
use crate::{GridPosition, Quad};

pub const WHITE: [u8; 3] = [255, 255, 255];
pub const BLACK: [u8; 3] = [0, 0, 0];

#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    /// Cover the whole canvas
    Fill { rgb: [u8; 3] },
    Text {
        x: u32,
        y: u32,
        text: String,
        rgb: [u8; 3],
    },
    /// Copy the image of `cell` with its top-left corner at (x, y)
    Blit { x: u32, y: u32, cell: GridPosition },
    /// Rectangle outline; `stroke` pixels thick, drawn inward from `rect`
    Outline { rect: Rect, stroke: u32, rgb: [u8; 3] },
}

/// Commands for the whole poster: background first, then each cell in grid
/// order as title, image, border.
pub fn paint_list(
    layout: &PosterLayout,
    titles: &Quad<&str>,
    border_width: u32,
) -> Vec<PaintCommand> {
    let mut cmds = Vec::with_capacity(1 + GridPosition::ALL.len() * 3);
    cmds.push(PaintCommand::Fill { rgb: WHITE });

    for pos in GridPosition::ALL {
        let origin = layout.origin(pos);
        let image = layout.image_rect(pos);
        cmds.push(PaintCommand::Text {
            x: origin.x,
            y: origin.y,
            text: titles.get(pos).to_string(),
            rgb: BLACK,
        });
        cmds.push(PaintCommand::Blit {
            x: image.x,
            y: image.y,
            cell: pos,
        });
        if border_width > 0 {
            // corners (x, y) and (x + w, y + h) are both on the border
            cmds.push(PaintCommand::Outline {
                rect: Rect {
                    width: image.width + 1,
                    height: image.height + 1,
                    ..image
                },
                stroke: border_width,
                rgb: BLACK,
            });
        }
    }
    cmds
}
