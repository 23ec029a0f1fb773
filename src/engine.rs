//! The Monte-Carlo opponent.
//!
//! A flat Monte-Carlo search: every legal reply is scored by a fixed number
//! of uniformly random playouts and the best total wins. Moves that end the
//! game on the spot are taken without sampling.

use rand::{rngs::ThreadRng, Rng};

use crate::board::{Board, Status};
use crate::constants::Player;
use crate::r#move::Move;

pub struct Engine {
    playouts: u32,
}

impl Engine {
    /// `playouts` is the number of random games sampled per candidate move.
    pub fn new(playouts: u32) -> Self {
        Engine { playouts }
    }

    /// Picks a move for the side to move on `board`.
    ///
    /// The board must still be active; the returned move is always legal
    /// for the given position.
    pub fn pick_move(&self, board: &Board) -> Move {
        let me = board
            .side_to_move()
            .expect("pick_move called on a finished game");
        let moves = board.legal_moves();
        debug_assert!(!moves.is_empty());

        // An immediately winning move needs no sampling.
        for &mv in &moves {
            let mut after = board.clone();
            after.force_move(mv);
            if after.status() == Status::Won(me) {
                return mv;
            }
        }

        let mut rng = rand::thread_rng();
        let mut best = moves[0];
        let mut best_score = i64::MIN;
        for &mv in &moves {
            let mut after = board.clone();
            after.force_move(mv);
            let mut score = 0i64;
            for _ in 0..self.playouts {
                score += i64::from(Self::playout(after.clone(), me, &mut rng));
            }
            if score > best_score {
                best_score = score;
                best = mv;
            }
        }
        best
    }

    /// Plays uniformly random moves to the end of the game; +1/-1/0 from
    /// `me`'s perspective.
    fn playout(mut board: Board, me: Player, rng: &mut ThreadRng) -> i32 {
        loop {
            match board.status() {
                Status::Won(side) => return if side == me { 1 } else { -1 },
                Status::Draw => return 0,
                Status::Active(_) => {
                    let moves = board.legal_moves();
                    let mv = moves[rng.gen_range(0..moves.len())];
                    board.force_move(mv);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r#move::sub_board_of;

    #[test]
    fn test_reply_stays_in_the_forced_sub_board() {
        let mut board = Board::new();
        assert!(board.try_move(Move::new(Player::X, (4, 4))));

        let engine = Engine::new(8);
        let mv = engine.pick_move(&board);
        assert_eq!(mv.side(), Player::O);
        assert_eq!(sub_board_of(mv.cell()), 4);
        assert!(board.try_move(mv));
    }

    #[test]
    fn test_picked_move_is_legal_with_any_sub_board_active() {
        let mut board = Board::new();
        board.force_move(Move::new(Player::X, (0, 0)));
        board.force_move(Move::new(Player::X, (0, 1)));
        board.force_move(Move::new(Player::X, (0, 2)));
        // sub-board 0 is won, (0, 3) mirrors into it, so any board is active
        board.force_move(Move::new(Player::O, (0, 3)));
        assert_eq!(board.active_board(), None);

        let engine = Engine::new(8);
        let mv = engine.pick_move(&board);
        assert!(board.try_move(mv));
    }

    #[test]
    fn test_takes_an_immediate_macro_win() {
        let mut board = Board::new();
        // X owns sub-boards 0 and 1 and two thirds of sub-board 2
        for column in 0..8 {
            board.force_move(Move::new(Player::X, (0, column)));
        }
        // (3, 5) mirrors to sub-board 2, where (0, 8) completes the game
        board.force_move(Move::new(Player::O, (3, 5)));
        assert_eq!(board.active_board(), Some(2));
        assert_eq!(board.side_to_move(), Some(Player::X));

        let engine = Engine::new(8);
        let mv = engine.pick_move(&board);
        assert_eq!(mv.cell(), (0, 8));
        board.force_move(mv);
        assert_eq!(board.status(), Status::Won(Player::X));
    }
}
