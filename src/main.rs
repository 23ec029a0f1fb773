pub mod constants;
pub mod r#move;
pub mod board;
pub mod engine;
pub mod layout;
pub mod gui;
pub mod tui;

fn main() -> iced::Result {
    gui::run()
    // tui::run() is the windowless alternative.
}
