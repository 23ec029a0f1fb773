//! The GUI for ultimate tic-tac-toe, built with Iced.
//!
//! This file follows the Elm architecture, a Model-View-Update pattern:
//! - `UltimateApp` is the Model: it holds the entire state of the application.
//! - `Message` is the Update trigger: it defines all events that can change the state.
//! - `update` is the Update logic: it processes messages to transition the state.
//! - `view` is the View: it renders the UI based on the current state.
//!
//! The board mutates on the update thread only. The engine's search runs as
//! a background task whose result comes back as a `Message`, so a slow
//! search never blocks input handling or repaints, and no two mutations can
//! ever race.

use iced::mouse::{Button as MouseButton, Cursor, Event as MouseEvent};
use iced::widget::canvas::event::Status as EventStatus;
use iced::widget::canvas::{self, Event as CanvasEvent, Frame, Geometry, Path, Program, Stroke};
use iced::widget::{text, Button, Column, Container};
use iced::{
    executor, Application, Command, Element, Length, Pixels, Point, Rectangle, Renderer, Settings,
    Size, Theme,
};
use std::sync::{Arc, Mutex};

use crate::board::{Board, Status};
use crate::constants::Player;
use crate::engine::Engine;
use crate::layout::{Layout, LAYOUT};
use crate::r#move::{Cell, Move};

/// The side the human plays; the engine drives the other one.
const HUMAN_SIDE: Player = Player::X;
/// Playouts per candidate move in the background search.
const ENGINE_PLAYOUTS: u32 = 160;

pub fn run() -> iced::Result {
    UltimateApp::run(Settings {
        window: iced::window::Settings {
            size: Size::new(LAYOUT.window_width + 40.0, LAYOUT.window_height + 120.0),
            ..iced::window::Settings::default()
        },
        ..Settings::default()
    })
}

#[derive(Debug, Clone)]
enum Message {
    NewGame,
    CellClicked(Cell),
    EngineMoved(Move),
}

/// The main application state (the "Model").
struct UltimateApp {
    board: Arc<Mutex<Board>>,
    engine: Arc<Engine>,
    game_state: GameState,
    board_cache: canvas::Cache,
}

/// Represents the current high-level state of the game.
enum GameState {
    PlayerTurn,
    EngineThinking,
    GameOver(String),
}

fn outcome_message(status: Status) -> Option<String> {
    match status {
        Status::Active(_) => None,
        Status::Won(side) => Some(format!("{:?} wins!", side)),
        Status::Draw => Some("Draw!".to_string()),
    }
}

// --- Application Logic ---

impl Application for UltimateApp {
    type Executor = executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = ();

    fn new(_flags: ()) -> (Self, Command<Message>) {
        let engine = Engine::new(ENGINE_PLAYOUTS);
        let mut board = Board::new();
        // When the human plays the second side, the engine opens before the
        // first frame is drawn.
        if HUMAN_SIDE != Player::X {
            let mv = engine.pick_move(&board);
            board.force_move(mv);
        }

        let app = UltimateApp {
            board: Arc::new(Mutex::new(board)),
            engine: Arc::new(engine),
            game_state: GameState::PlayerTurn,
            board_cache: canvas::Cache::new(),
        };
        (app, Command::none())
    }

    fn title(&self) -> String {
        String::from("Ultimate Tic-Tac-Toe")
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match self.game_state {
            GameState::PlayerTurn => match message {
                Message::CellClicked(cell) => self.handle_cell_clicked(cell),
                Message::NewGame => self.handle_new_game(),
                _ => Command::none(),
            },
            GameState::EngineThinking => match message {
                Message::EngineMoved(mv) => self.handle_engine_moved(mv),
                // Clicks while the engine is computing are dropped, not queued.
                _ => Command::none(),
            },
            GameState::GameOver(_) => match message {
                Message::NewGame => self.handle_new_game(),
                _ => Command::none(),
            },
        }
    }

    fn view(&'_ self) -> Element<'_, Message> {
        let status_text = match &self.game_state {
            GameState::PlayerTurn => "Your turn",
            GameState::EngineThinking => "Engine is thinking...",
            GameState::GameOver(ref msg) => msg.as_str(),
        };

        let board_canvas = canvas::Canvas::new(BoardCanvas::new(
            &self.board,
            &self.board_cache,
            &LAYOUT,
        ))
        .width(Length::Fixed(LAYOUT.window_width))
        .height(Length::Fixed(LAYOUT.window_height));

        let content = Column::new()
            .spacing(10)
            .align_items(iced::Alignment::Center)
            .push(text(status_text).size(Pixels(24.0)))
            .push(board_canvas)
            .push(Button::new(text("New Game")).on_press(Message::NewGame));

        Container::new(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x()
            .center_y()
            .into()
    }
}

// --- Update Helper Functions ---

impl UltimateApp {
    /// A click resolved to a cell while it is the player's turn.
    fn handle_cell_clicked(&mut self, cell: Cell) -> Command<Message> {
        let (redraw, command) = self.apply_cell_click(cell);
        if redraw {
            self.board_cache.clear();
        }
        command
    }

    /// Applies a click to the board and reports whether the frame is due a
    /// repaint. A rejected move leaves the board untouched but still
    /// requests exactly one repaint; the redraw is idempotent.
    fn apply_cell_click(&mut self, cell: Cell) -> (bool, Command<Message>) {
        let board_lock = self.board.clone();
        let mut board = board_lock.lock().unwrap();
        let side = match board.status() {
            Status::Active(side) => side,
            // The board can be finished while the state machine still says
            // PlayerTurn; treat the click as a no-op either way.
            _ => return (false, Command::none()),
        };

        if !board.try_move(Move::new(side, cell)) {
            return (true, Command::none());
        }

        if let Some(msg) = outcome_message(board.status()) {
            self.game_state = GameState::GameOver(msg);
            return (true, Command::none());
        }

        // Hand off to the engine on a background task. The search works on
        // a snapshot and the result is published back as a message, so the
        // board is never touched from another thread.
        let snapshot = board.clone();
        drop(board);
        self.game_state = GameState::EngineThinking;
        let engine = Arc::clone(&self.engine);
        let command = Command::perform(
            async move {
                tokio::task::spawn_blocking(move || engine.pick_move(&snapshot))
                    .await
                    .expect("engine task panicked")
            },
            Message::EngineMoved,
        );
        (true, command)
    }

    /// The background search finished; apply its move and hand control back.
    fn handle_engine_moved(&mut self, mv: Move) -> Command<Message> {
        let board_lock = self.board.clone();
        let mut board = board_lock.lock().unwrap();
        // The engine is trusted to return a legal move for the snapshot it
        // was given, so validation is skipped.
        board.force_move(mv);
        self.board_cache.clear();
        self.game_state = match outcome_message(board.status()) {
            Some(msg) => GameState::GameOver(msg),
            None => GameState::PlayerTurn,
        };
        Command::none()
    }

    /// Resets the application to the initial state for a new game.
    fn handle_new_game(&mut self) -> Command<Message> {
        let mut board = Board::new();
        if HUMAN_SIDE != Player::X {
            let mv = self.engine.pick_move(&board);
            board.force_move(mv);
        }
        self.board = Arc::new(Mutex::new(board));
        self.game_state = GameState::PlayerTurn;
        self.board_cache.clear();
        Command::none()
    }
}

// --- Canvas Drawing Logic ---

struct BoardCanvas<'a> {
    board: &'a Mutex<Board>,
    cache: &'a canvas::Cache,
    layout: &'static Layout,
}

impl<'a> BoardCanvas<'a> {
    fn new(board: &'a Mutex<Board>, cache: &'a canvas::Cache, layout: &'static Layout) -> Self {
        Self {
            board,
            cache,
            layout,
        }
    }
}

impl<'a> Program<Message> for BoardCanvas<'a> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<Geometry> {
        let geometry = self.cache.draw(renderer, bounds.size(), |frame| {
            let board = self.board.lock().unwrap();
            draw_board(frame, &board, self.layout);
        });
        vec![geometry]
    }

    fn update(
        &self,
        _state: &mut Self::State,
        event: CanvasEvent,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> (EventStatus, Option<Message>) {
        if let CanvasEvent::Mouse(MouseEvent::ButtonPressed(MouseButton::Left)) = event {
            if let Some(position) = cursor.position_in(bounds) {
                // A click outside the board is a legitimate no-op.
                if let Some(cell) = self.layout.cell_at(position.x, position.y) {
                    return (EventStatus::Captured, Some(Message::CellClicked(cell)));
                }
            }
        }
        (EventStatus::Ignored, None)
    }
}

// --- Canvas Drawing Helper Functions ---

/// Draws the whole frame from the current board state. Stateless: every
/// redraw recomputes the full picture, there is no incremental diffing.
fn draw_board(frame: &mut Frame, board: &Board, layout: &Layout) {
    let margin_x = layout.margin_x();
    let margin_y = layout.margin_y();
    let board_width = layout.board_width();
    let board_height = layout.board_height();
    let square_width = layout.square_width();
    let square_height = layout.square_height();

    // Color the whole background
    let background = Path::rectangle(Point::ORIGIN, frame.size());
    frame.fill(&background, layout.background);

    // Board outline
    let outline = Path::rectangle(
        Point::new(margin_x, margin_y),
        Size::new(board_width, board_height),
    );
    frame.stroke(&outline, Stroke::default().with_width(layout.line_width));

    // The squares
    for rank in 0..9 {
        for column in 0..9 {
            draw_square(frame, board, layout, rank, column);
        }
    }

    // Bold sub-board separators after the 3rd and 6th cell in each axis
    let bold = Stroke::default().with_width(layout.bold_line_width);
    for i in [3.0_f32, 6.0] {
        let y = margin_y + i * square_height;
        frame.stroke(
            &Path::line(Point::new(margin_x, y), Point::new(margin_x + board_width, y)),
            bold.clone(),
        );
        let x = margin_x + i * square_width;
        frame.stroke(
            &Path::line(Point::new(x, margin_y), Point::new(x, margin_y + board_height)),
            bold.clone(),
        );
    }

    // Active sub-board marker; omitted entirely once the game is over
    if let Some((origin, size)) = active_outline_rect(board, layout) {
        let stroke = Stroke::default()
            .with_width(layout.bold_line_width)
            .with_color(layout.active_outline);
        frame.stroke(&Path::rectangle(origin, size), stroke);
    }
}

/// Extent of the active-area outline: the forced sub-board's 3x3 region,
/// the whole board when any sub-board may be played, `None` once the game
/// is over.
fn active_outline_rect(board: &Board, layout: &Layout) -> Option<(Point, Size)> {
    if !board.status().is_active() {
        return None;
    }
    Some(match board.active_board() {
        Some(sub) => {
            let (x, y) = layout.sub_board_origin(sub);
            (
                Point::new(x, y),
                Size::new(3.0 * layout.square_width(), 3.0 * layout.square_height()),
            )
        }
        None => (
            Point::new(layout.margin_x(), layout.margin_y()),
            Size::new(layout.board_width(), layout.board_height()),
        ),
    })
}

fn draw_square(frame: &mut Frame, board: &Board, layout: &Layout, rank: usize, column: usize) {
    let (x, y) = layout.cell_origin(rank, column);
    let width = layout.square_width();
    let height = layout.square_height();

    let fill = if board.last_played() == Some((rank, column)) {
        layout.recent_cell
    } else {
        layout.empty_cell
    };
    let rect = Path::rectangle(Point::new(x, y), Size::new(width, height));
    frame.fill(&rect, fill);
    frame.stroke(&rect, Stroke::default().with_width(layout.line_width));

    match board.piece_at(rank, column).player() {
        Some(Player::X) => draw_x(frame, layout, x, y, width, height),
        Some(Player::O) => draw_o(frame, layout, x, y, width, height),
        None => {}
    }
}

fn draw_x(frame: &mut Frame, layout: &Layout, x: f32, y: f32, width: f32, height: f32) {
    let inset = layout.piece_inset;
    let left = x + (1.0 - inset) / 2.0 * width;
    let top = y + (1.0 - inset) / 2.0 * height;
    let right = left + inset * width;
    let bottom = top + inset * height;
    let stroke = Stroke::default()
        .with_width(layout.glyph_line_width)
        .with_color(layout.x_color);
    frame.stroke(&Path::line(Point::new(left, top), Point::new(right, bottom)), stroke.clone());
    frame.stroke(&Path::line(Point::new(right, top), Point::new(left, bottom)), stroke);
}

fn draw_o(frame: &mut Frame, layout: &Layout, x: f32, y: f32, width: f32, height: f32) {
    let inset = layout.piece_inset;
    let center = Point::new(x + width / 2.0, y + height / 2.0);
    let radius = inset * width.min(height) / 2.0;
    frame.stroke(
        &Path::circle(center, radius),
        Stroke::default()
            .with_width(layout.glyph_line_width)
            .with_color(layout.o_color),
    );
}
