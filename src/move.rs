//! Defines the representation of a move.

use crate::constants::Player;

/// A cell on the 9x9 grid as `(rank, column)`, both in `0..=8`, origin at
/// the top-left.
pub type Cell = (usize, usize);

/// Index (0-8, row-major) of the sub-board containing `cell`.
pub fn sub_board_of(cell: Cell) -> usize {
    (cell.0 / 3) * 3 + cell.1 / 3
}

/// Index (0-8, row-major) of `cell` within its own sub-board. This is also
/// the sub-board the opponent is sent to by the linkage rule.
pub fn cell_in_sub_board(cell: Cell) -> usize {
    (cell.0 % 3) * 3 + cell.1 % 3
}

/// A single move: which side plays into which cell. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    side: Player,
    cell: Cell,
}

impl Move {
    pub fn new(side: Player, cell: Cell) -> Self {
        Move { side, cell }
    }

    pub fn side(&self) -> Player {
        self.side
    }

    pub fn cell(&self) -> Cell {
        self.cell
    }

    pub fn rank(&self) -> usize {
        self.cell.0
    }

    pub fn column(&self) -> usize {
        self.cell.1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// verify row-major sub-board indexing, the renderer and the rules
    /// engine both rely on it
    fn test_sub_board_of() {
        assert_eq!(sub_board_of((0, 0)), 0);
        assert_eq!(sub_board_of((0, 8)), 2);
        assert_eq!(sub_board_of((2, 2)), 0);
        assert_eq!(sub_board_of((3, 0)), 3);
        assert_eq!(sub_board_of((4, 4)), 4);
        assert_eq!(sub_board_of((5, 6)), 5);
        assert_eq!(sub_board_of((8, 0)), 6);
        assert_eq!(sub_board_of((8, 8)), 8);
    }

    #[test]
    fn test_cell_in_sub_board() {
        assert_eq!(cell_in_sub_board((0, 0)), 0);
        assert_eq!(cell_in_sub_board((4, 4)), 4);
        assert_eq!(cell_in_sub_board((3, 3)), 0);
        assert_eq!(cell_in_sub_board((5, 8)), 8);
        assert_eq!(cell_in_sub_board((7, 2)), 5);
    }

    #[test]
    fn test_move_accessors() {
        let mv = Move::new(Player::X, (4, 7));
        assert_eq!(mv.side(), Player::X);
        assert_eq!(mv.cell(), (4, 7));
        assert_eq!(mv.rank(), 4);
        assert_eq!(mv.column(), 7);
    }
}
