//! The textual user interface, a windowless fallback around the same
//! rules engine and opponent as the GUI.

use crate::board::{Board, Status};
use crate::constants::Player;
use crate::engine::Engine;
use crate::r#move::{Cell, Move};
use std::io;

const HUMAN_SIDE: Player = Player::X;
const ENGINE_PLAYOUTS: u32 = 400;

/// Runs the main game loop for the text-based UI.
pub fn run() {
    let mut board = Board::new();
    let engine = Engine::new(ENGINE_PLAYOUTS);

    println!("--- Ultimate Tic-Tac-Toe ---");
    println!("Enter moves as 'rank column', both 0-8 from the top-left (e.g. 4 4).");
    println!("Type 'exit' to quit.");

    loop {
        println!();
        println!("{}", board);

        let side = match board.status() {
            Status::Won(side) => {
                println!("{:?} wins!", side);
                break;
            }
            Status::Draw => {
                println!("Draw!");
                break;
            }
            Status::Active(side) => side,
        };
        match board.active_board() {
            Some(sub) => println!("Active sub-board: {}", sub),
            None => println!("Active sub-board: any"),
        }

        if side == HUMAN_SIDE {
            print!("Your move: ");
            io::Write::flush(&mut io::stdout()).expect("flush failed!");

            let mut input = String::new();
            io::stdin().read_line(&mut input).unwrap();
            let input = input.trim();

            if input == "exit" {
                break;
            }

            match parse_cell(input) {
                Some(cell) if board.try_move(Move::new(side, cell)) => {}
                _ => {
                    println!("Invalid or illegal move. Please try again.");
                    continue;
                }
            }
        } else {
            println!("Computer is thinking...");
            let mv = engine.pick_move(&board);
            println!("Computer plays: {} {}", mv.rank(), mv.column());
            board.force_move(mv);
        }
    }
}

/// Parses a cell from "rank column" notation with both coordinates in 0-8.
fn parse_cell(input: &str) -> Option<Cell> {
    let mut parts = input.split_whitespace();
    let rank: usize = parts.next()?.parse().ok()?;
    let column: usize = parts.next()?.parse().ok()?;
    if parts.next().is_some() || rank > 8 || column > 8 {
        return None;
    }
    Some((rank, column))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cell() {
        assert_eq!(parse_cell("4 4"), Some((4, 4)));
        assert_eq!(parse_cell("0 8"), Some((0, 8)));
        assert_eq!(parse_cell("  3   7 "), Some((3, 7)));
        assert_eq!(parse_cell("9 0"), None);
        assert_eq!(parse_cell("1"), None);
        assert_eq!(parse_cell("1 2 3"), None);
        assert_eq!(parse_cell("a b"), None);
        assert_eq!(parse_cell(""), None);
    }
}
