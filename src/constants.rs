//! Constants and core types for ultimate tic-tac-toe.

// +1 for X, -1 for O, so the two sides are encoded symmetrically and
// `opponent` is a sign flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i8)]
pub enum Player {
    X = 1,
    O = -1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i8)]
pub enum Piece {
    Empty = 0,
    X = 1,
    O = -1,
}

impl Player {
    /// Get the opponent of the current player.
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// The piece this player puts on the board.
    pub fn piece(self) -> Piece {
        match self {
            Player::X => Piece::X,
            Player::O => Piece::O,
        }
    }
}

impl Piece {
    /// Get the player associated with a piece.
    /// Returns `None` if the piece is `Empty`.
    pub fn player(self) -> Option<Player> {
        match self {
            Piece::X => Some(Player::X),
            Piece::O => Some(Player::O),
            Piece::Empty => None,
        }
    }
}

/// The eight winning lines of a 3x3 grid, as cell indices 0-8 in
/// row-major order. Used both for sub-boards and for the macro grid of
/// won sub-boards.
pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];
