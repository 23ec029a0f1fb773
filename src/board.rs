//! The rules engine for ultimate tic-tac-toe.
//!
//! Owns cell state, legality checking, win/draw detection and the
//! active-sub-board constraint. The GUI and the text UI only touch it
//! through the checked/unchecked apply operations and read-only queries.

use crate::constants::{Piece, Player, WIN_LINES};
use crate::r#move::{cell_in_sub_board, sub_board_of, Cell, Move};
use std::fmt;

/// Overall game status: either a side to move, or a finished outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Active(Player),
    Won(Player),
    Draw,
}

impl Status {
    pub fn is_active(&self) -> bool {
        matches!(self, Status::Active(_))
    }
}

/// Represents the full state of an ultimate tic-tac-toe game.
///
/// A sub-board is *closed* once it has a winner or no empty cell left;
/// closed sub-boards accept no further moves. `active_board` is the
/// sub-board the next move must land in, `None` meaning any open one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Piece; 81],
    sub_winners: [Option<Player>; 9],
    active_board: Option<usize>,
    last_cell: Option<Cell>,
    status: Status,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Board {
            cells: [Piece::Empty; 81],
            sub_winners: [None; 9],
            active_board: None,
            last_cell: None,
            status: Status::Active(Player::X),
        }
    }

    fn idx(rank: usize, column: usize) -> usize {
        rank * 9 + column
    }

    pub fn piece_at(&self, rank: usize, column: usize) -> Piece {
        self.cells[Self::idx(rank, column)]
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn side_to_move(&self) -> Option<Player> {
        match self.status {
            Status::Active(side) => Some(side),
            _ => None,
        }
    }

    /// The sub-board the next move must land in; `None` means any open one.
    pub fn active_board(&self) -> Option<usize> {
        self.active_board
    }

    /// The most recently played cell, if any move has been made.
    pub fn last_played(&self) -> Option<Cell> {
        self.last_cell
    }

    /// Iterates the 81-array indices of sub-board `sub`'s nine cells.
    fn sub_cells(sub: usize) -> impl Iterator<Item = usize> {
        let base_rank = (sub / 3) * 3;
        let base_col = (sub % 3) * 3;
        (0..9).map(move |i| Self::idx(base_rank + i / 3, base_col + i % 3))
    }

    fn sub_board_full(&self, sub: usize) -> bool {
        Self::sub_cells(sub).all(|i| self.cells[i] != Piece::Empty)
    }

    fn sub_board_open(&self, sub: usize) -> bool {
        self.sub_winners[sub].is_none() && !self.sub_board_full(sub)
    }

    fn sub_won_by(&self, sub: usize, side: Player) -> bool {
        let base_rank = (sub / 3) * 3;
        let base_col = (sub % 3) * 3;
        let piece = side.piece();
        WIN_LINES.iter().any(|line| {
            line.iter()
                .all(|&i| self.piece_at(base_rank + i / 3, base_col + i % 3) == piece)
        })
    }

    fn macro_won_by(&self, side: Player) -> bool {
        WIN_LINES
            .iter()
            .any(|line| line.iter().all(|&sub| self.sub_winners[sub] == Some(side)))
    }

    /// Checked apply: validates the move and mutates only if it is legal.
    /// Returns whether the move was accepted. A rejected move leaves the
    /// board untouched.
    pub fn try_move(&mut self, mv: Move) -> bool {
        let Status::Active(side) = self.status else {
            return false;
        };
        if mv.side() != side {
            return false;
        }
        let (rank, column) = mv.cell();
        if rank > 8 || column > 8 {
            return false;
        }
        if self.piece_at(rank, column) != Piece::Empty {
            return false;
        }
        let sub = sub_board_of(mv.cell());
        if !self.sub_board_open(sub) {
            return false;
        }
        if let Some(active) = self.active_board {
            if active != sub {
                return false;
            }
        }
        self.apply(mv);
        true
    }

    /// Unchecked apply: mutates unconditionally. Only for moves from a
    /// trusted source, i.e. the engine's own picks.
    pub fn force_move(&mut self, mv: Move) {
        self.apply(mv);
    }

    fn apply(&mut self, mv: Move) {
        let (rank, column) = mv.cell();
        let side = mv.side();
        self.cells[Self::idx(rank, column)] = side.piece();
        self.last_cell = Some(mv.cell());

        let sub = sub_board_of(mv.cell());
        if self.sub_winners[sub].is_none() && self.sub_won_by(sub, side) {
            self.sub_winners[sub] = Some(side);
        }

        // Linkage rule: the opponent is sent to the sub-board mirroring the
        // cell just played, unless that sub-board is closed.
        let target = cell_in_sub_board(mv.cell());
        self.active_board = if self.sub_board_open(target) {
            Some(target)
        } else {
            None
        };

        self.status = if self.macro_won_by(side) {
            Status::Won(side)
        } else if (0..9).all(|sub| !self.sub_board_open(sub)) {
            Status::Draw
        } else {
            Status::Active(side.opponent())
        };
    }

    /// All moves the side to move may currently make. Empty once the game
    /// is over.
    pub fn legal_moves(&self) -> Vec<Move> {
        let Status::Active(side) = self.status else {
            return Vec::new();
        };
        let subs: Vec<usize> = match self.active_board {
            Some(sub) => vec![sub],
            None => (0..9).filter(|&sub| self.sub_board_open(sub)).collect(),
        };
        subs.into_iter()
            .flat_map(Self::sub_cells)
            .filter(|&i| self.cells[i] == Piece::Empty)
            .map(|i| Move::new(side, (i / 9, i % 9)))
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in 0..9 {
            if rank > 0 && rank % 3 == 0 {
                writeln!(f, "------+-------+------")?;
            }
            for column in 0..9 {
                if column > 0 {
                    write!(f, "{}", if column % 3 == 0 { " | " } else { " " })?;
                }
                let glyph = match self.piece_at(rank, column) {
                    Piece::X => 'X',
                    Piece::O => 'O',
                    Piece::Empty => '.',
                };
                write!(f, "{}", glyph)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
