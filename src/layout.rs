//! Fixed layout configuration and the pixel-to-cell coordinate mapping.

use iced::Color;
use once_cell::sync::Lazy;

use crate::r#move::Cell;

/// Shared immutable layout and color configuration, constructed once and
/// passed by reference into the mapper and the renderer.
pub struct Layout {
    pub window_width: f32,
    pub window_height: f32,
    /// Board size as a fraction of the window, per axis.
    pub board_fraction_x: f32,
    pub board_fraction_y: f32,
    pub line_width: f32,
    pub bold_line_width: f32,
    pub glyph_line_width: f32,
    /// Fraction of a cell covered by the piece glyph.
    pub piece_inset: f32,
    pub background: Color,
    pub empty_cell: Color,
    pub recent_cell: Color,
    pub active_outline: Color,
    pub x_color: Color,
    pub o_color: Color,
}

pub static LAYOUT: Lazy<Layout> = Lazy::new(Layout::default);

impl Default for Layout {
    fn default() -> Self {
        Layout {
            window_width: 720.0,
            window_height: 720.0,
            board_fraction_x: 0.875,
            board_fraction_y: 0.875,
            line_width: 1.0,
            bold_line_width: 3.0,
            glyph_line_width: 5.0,
            piece_inset: 0.8,
            background: Color::WHITE,
            empty_cell: Color::from_rgb8(250, 250, 250),
            recent_cell: Color::from_rgb8(255, 236, 160),
            active_outline: Color::from_rgb8(0, 191, 255),
            x_color: Color::from_rgb8(200, 40, 40),
            o_color: Color::from_rgb8(40, 70, 200),
        }
    }
}

impl Layout {
    pub fn board_width(&self) -> f32 {
        self.board_fraction_x * self.window_width
    }

    pub fn board_height(&self) -> f32 {
        self.board_fraction_y * self.window_height
    }

    pub fn margin_x(&self) -> f32 {
        (self.window_width - self.board_width()) / 2.0
    }

    pub fn margin_y(&self) -> f32 {
        (self.window_height - self.board_height()) / 2.0
    }

    pub fn square_width(&self) -> f32 {
        self.board_width() / 9.0
    }

    pub fn square_height(&self) -> f32 {
        self.board_height() / 9.0
    }

    /// Top-left pixel of the given cell.
    pub fn cell_origin(&self, rank: usize, column: usize) -> (f32, f32) {
        (
            self.margin_x() + column as f32 * self.square_width(),
            self.margin_y() + rank as f32 * self.square_height(),
        )
    }

    /// Top-left pixel of the given sub-board's 3x3 region.
    pub fn sub_board_origin(&self, sub: usize) -> (f32, f32) {
        self.cell_origin((sub / 3) * 3, (sub % 3) * 3)
    }

    /// Maps a pointer position to a cell, or `None` when the position is
    /// outside the board.
    ///
    /// The half-square offset before rounding biases the hit test towards
    /// the nearest cell center instead of flooring to the top-left corner,
    /// so a click near a cell boundary resolves to the closer cell.
    pub fn cell_at(&self, x: f32, y: f32) -> Option<Cell> {
        let square_width = self.square_width();
        let square_height = self.square_height();
        let column = ((x + square_width / 2.0 - self.margin_x()) / square_width).round() as i32 - 1;
        let rank = ((y + square_height / 2.0 - self.margin_y()) / square_height).round() as i32 - 1;
        if (0..=8).contains(&rank) && (0..=8).contains(&column) {
            Some((rank as usize, column as usize))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_cell_center_maps_to_itself() {
        let layout = Layout::default();
        for rank in 0..9 {
            for column in 0..9 {
                let (x, y) = layout.cell_origin(rank, column);
                let cx = x + layout.square_width() / 2.0;
                let cy = y + layout.square_height() / 2.0;
                assert_eq!(layout.cell_at(cx, cy), Some((rank, column)));
            }
        }
    }

    #[test]
    fn test_outside_the_board_maps_to_none() {
        let layout = Layout::default();
        assert_eq!(layout.cell_at(1.0, 1.0), None);
        assert_eq!(layout.cell_at(layout.window_width - 1.0, 360.0), None);
        assert_eq!(layout.cell_at(360.0, 1.0), None);
        assert_eq!(layout.cell_at(360.0, layout.window_height - 1.0), None);
        assert_eq!(layout.cell_at(0.0, 0.0), None);
    }

    #[test]
    fn test_column_boundary_resolves_to_the_right_cell() {
        let layout = Layout::default();
        // exact boundary between columns 2 and 3: the half-square offset
        // makes it round up into column 3
        let (boundary_x, _) = layout.cell_origin(0, 3);
        let (_, y_center) = layout.cell_origin(4, 0);
        let cy = y_center + layout.square_height() / 2.0;
        assert_eq!(layout.cell_at(boundary_x, cy), Some((4, 3)));
        // a nudge to the left falls into column 2
        assert_eq!(layout.cell_at(boundary_x - 1.0, cy), Some((4, 2)));
    }

    #[test]
    fn test_rank_boundary_resolves_to_the_lower_cell() {
        let layout = Layout::default();
        let (_, boundary_y) = layout.cell_origin(6, 0);
        let (x_center, _) = layout.cell_origin(0, 1);
        let cx = x_center + layout.square_width() / 2.0;
        assert_eq!(layout.cell_at(cx, boundary_y), Some((6, 1)));
        assert_eq!(layout.cell_at(cx, boundary_y - 1.0), Some((5, 1)));
    }

    #[test]
    fn test_geometry_derivation() {
        let layout = Layout::default();
        assert_eq!(layout.board_width(), 630.0);
        assert_eq!(layout.margin_x(), 45.0);
        assert_eq!(layout.square_width(), 70.0);
        assert_eq!(layout.cell_origin(0, 0), (45.0, 45.0));
        assert_eq!(layout.sub_board_origin(4), (255.0, 255.0));
    }
}
