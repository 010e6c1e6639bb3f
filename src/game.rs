//! Game state engine
//!
//! [`Game`] owns the board, the side to move, the outcome, and the last-move
//! marker, and is the only place any of them are mutated. The presentation
//! layer holds one instance and reads it back after every call.

use thiserror::Error;
use tracing::{debug, info};

use crate::board::{Board, Pos, Stone};
use crate::rules;

/// Why a move was not applied.
///
/// Callers that only care about success can treat any variant as the same
/// failure signal; the GUI shows the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("position is outside the board")]
    OutOfBounds,
    #[error("cell is already occupied")]
    Occupied,
    #[error("game is already over")]
    GameOver,
}

/// Game outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Win(Stone),
    Draw,
}

/// Game state engine for one Gomoku session
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    turn: Stone,
    outcome: Outcome,
    last_move: Option<Pos>,
    winning_line: Option<[Pos; 5]>,
}

impl Game {
    /// New game: empty board, Black to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: Stone::Black,
            outcome: Outcome::InProgress,
            last_move: None,
            winning_line: None,
        }
    }

    /// Return every field to its initial value. Never fails.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.turn = Stone::Black;
        self.outcome = Outcome::InProgress;
        self.last_move = None;
        self.winning_line = None;
        debug!("game reset");
    }

    /// Attempt to place a stone for the side to move.
    ///
    /// The move is always attributed to the engine's own turn; there is no
    /// player argument to forge. A rejected move has no effect on any field.
    ///
    /// On success the outcome is settled in strict order: five-in-a-row win
    /// at the new stone first, then draw if the board is full, otherwise the
    /// turn passes to the opponent.
    pub fn play(&mut self, row: i32, col: i32) -> Result<(), MoveError> {
        if self.outcome != Outcome::InProgress {
            return Err(MoveError::GameOver);
        }
        if !Pos::is_valid(row, col) {
            return Err(MoveError::OutOfBounds);
        }
        let pos = Pos::new(row as u8, col as u8);
        if !self.board.is_empty(pos) {
            return Err(MoveError::Occupied);
        }

        let mover = self.turn;
        self.board.place_stone(pos, mover);
        self.last_move = Some(pos);
        debug!(row = pos.row, col = pos.col, stone = ?mover, "stone placed");

        if let Some(line) = rules::find_five_line_at_pos(&self.board, pos, mover) {
            // Turn stays with the winner; it is meaningless once the game ends.
            self.outcome = Outcome::Win(mover);
            self.winning_line = Some(line);
            info!(winner = ?mover, "five in a row");
        } else if self.board.is_full() {
            self.outcome = Outcome::Draw;
            info!("board full, game drawn");
        } else {
            self.turn = mover.opponent();
        }

        Ok(())
    }

    /// Board state, for rendering all cells.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Stone at raw coordinates; `None` off the board.
    #[inline]
    pub fn stone_at(&self, row: i32, col: i32) -> Option<Stone> {
        if Pos::is_valid(row, col) {
            Some(self.board.get(Pos::new(row as u8, col as u8)))
        } else {
            None
        }
    }

    /// Side to move. Unchanged by a win, stale once the game is over.
    #[inline]
    pub fn turn(&self) -> Stone {
        self.turn
    }

    #[inline]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Most recent accepted move, for highlighting.
    #[inline]
    pub fn last_move(&self) -> Option<Pos> {
        self.last_move
    }

    /// The five winning positions once the outcome is a win.
    #[inline]
    pub fn winning_line(&self) -> Option<[Pos; 5]> {
        self.winning_line
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.outcome != Outcome::InProgress
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BOARD_SIZE, TOTAL_CELLS};

    /// Full-board coloring with no run longer than 2 in any direction:
    /// blocks of two, shifted by two every row. Black gets 113 cells,
    /// matching the first player's share of 225 moves.
    fn pattern_stone(row: usize, col: usize) -> Stone {
        if (col + 2 * row) % 4 < 2 {
            Stone::Black
        } else {
            Stone::White
        }
    }

    fn snapshot(game: &Game) -> (u32, Stone, Outcome, Option<Pos>) {
        (
            game.board().stone_count(),
            game.turn(),
            game.outcome(),
            game.last_move(),
        )
    }

    #[test]
    fn test_initial_state() {
        let game = Game::new();
        assert!(game.board().is_board_empty());
        assert_eq!(game.turn(), Stone::Black);
        assert_eq!(game.outcome(), Outcome::InProgress);
        assert_eq!(game.last_move(), None);
        assert_eq!(game.winning_line(), None);
        assert!(!game.is_over());
    }

    #[test]
    fn test_turn_alternation() {
        let mut game = Game::new();
        let moves = [(0, 0), (1, 1), (2, 2), (3, 3), (4, 4), (5, 5)];
        for (k, (r, c)) in moves.iter().enumerate() {
            let expected = if k % 2 == 0 { Stone::Black } else { Stone::White };
            assert_eq!(game.turn(), expected);
            game.play(*r, *c).unwrap();
        }
        assert_eq!(game.outcome(), Outcome::InProgress);
    }

    #[test]
    fn test_move_is_attributed_to_current_turn() {
        let mut game = Game::new();
        game.play(7, 7).unwrap();
        game.play(8, 8).unwrap();
        assert_eq!(game.stone_at(7, 7), Some(Stone::Black));
        assert_eq!(game.stone_at(8, 8), Some(Stone::White));
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let mut game = Game::new();
        for (r, c) in [(-1, 0), (0, -1), (15, 0), (0, 15), (100, 100)] {
            assert_eq!(game.play(r, c), Err(MoveError::OutOfBounds));
        }
        assert!(game.board().is_board_empty());
        assert_eq!(game.turn(), Stone::Black);
        assert_eq!(game.last_move(), None);
    }

    #[test]
    fn test_occupied_rejection_is_idempotent() {
        let mut game = Game::new();
        game.play(7, 7).unwrap();
        let before = snapshot(&game);

        for _ in 0..3 {
            assert_eq!(game.play(7, 7), Err(MoveError::Occupied));
            assert_eq!(snapshot(&game), before);
        }
        // Rejected move never flips the turn
        assert_eq!(game.turn(), Stone::White);
    }

    #[test]
    fn test_stone_at_queries() {
        let mut game = Game::new();
        game.play(3, 4).unwrap();
        assert_eq!(game.stone_at(3, 4), Some(Stone::Black));
        assert_eq!(game.stone_at(0, 0), Some(Stone::Empty));
        assert_eq!(game.stone_at(-1, 0), None);
        assert_eq!(game.stone_at(0, 15), None);
    }

    #[test]
    fn test_last_move_tracking() {
        let mut game = Game::new();
        assert_eq!(game.last_move(), None);
        game.play(7, 7).unwrap();
        assert_eq!(game.last_move(), Some(Pos::new(7, 7)));
        game.play(0, 14).unwrap();
        assert_eq!(game.last_move(), Some(Pos::new(0, 14)));
        // Rejection leaves it alone
        let _ = game.play(7, 7);
        assert_eq!(game.last_move(), Some(Pos::new(0, 14)));
    }

    #[test]
    fn test_horizontal_win_any_order() {
        // Black fills row 7 cols 3..=7 in scattered order, White plays in
        // row 0. The win fires exactly on the fifth stone of the line.
        let mut game = Game::new();
        let black = [(7, 3), (7, 5), (7, 7), (7, 4), (7, 6)];
        let white = [(0, 0), (0, 1), (0, 2), (0, 3)];

        for i in 0..4 {
            game.play(black[i].0, black[i].1).unwrap();
            assert_eq!(game.outcome(), Outcome::InProgress);
            game.play(white[i].0, white[i].1).unwrap();
            assert_eq!(game.outcome(), Outcome::InProgress);
        }
        game.play(black[4].0, black[4].1).unwrap();

        assert_eq!(game.outcome(), Outcome::Win(Stone::Black));
        assert!(game.is_over());
        // Winner keeps the turn marker
        assert_eq!(game.turn(), Stone::Black);
        let line = game.winning_line().unwrap();
        assert_eq!(line[0], Pos::new(7, 3));
        assert_eq!(line[4], Pos::new(7, 7));
    }

    #[test]
    fn test_vertical_and_diagonal_wins() {
        // Vertical
        let mut game = Game::new();
        for i in 0..4 {
            game.play(i, 0).unwrap();
            game.play(i, 10).unwrap();
        }
        game.play(4, 0).unwrap();
        assert_eq!(game.outcome(), Outcome::Win(Stone::Black));

        // Diagonal, won by White
        let mut game = Game::new();
        for i in 0..4 {
            game.play(14, i).unwrap(); // Black, bottom row
            game.play(i, i).unwrap(); // White, main diagonal
        }
        game.play(13, 7).unwrap();
        game.play(4, 4).unwrap();
        assert_eq!(game.outcome(), Outcome::Win(Stone::White));

        // Anti-diagonal
        let mut game = Game::new();
        for i in 0..4 {
            game.play(4 + i, 8 - i).unwrap();
            game.play(14, i).unwrap();
        }
        game.play(8, 4).unwrap();
        assert_eq!(game.outcome(), Outcome::Win(Stone::Black));
    }

    #[test]
    fn test_four_is_not_a_win() {
        let mut game = Game::new();
        for i in 0..4 {
            game.play(7, 3 + i).unwrap();
            game.play(0, i).unwrap();
        }
        assert_eq!(game.outcome(), Outcome::InProgress);
    }

    #[test]
    fn test_gap_is_not_a_win() {
        // Black: cols 3,4,5,6,8 of row 7 with col 7 left empty
        let mut game = Game::new();
        let black = [(7, 3), (7, 4), (7, 5), (7, 6), (7, 8)];
        let white = [(0, 0), (0, 2), (0, 4), (0, 6), (0, 8)];
        for i in 0..5 {
            game.play(black[i].0, black[i].1).unwrap();
            game.play(white[i].0, white[i].1).unwrap();
        }
        assert_eq!(game.outcome(), Outcome::InProgress);
    }

    #[test]
    fn test_no_post_terminal_mutation() {
        let mut game = Game::new();
        for i in 0..4 {
            game.play(7, 3 + i).unwrap();
            game.play(0, i).unwrap();
        }
        game.play(7, 7).unwrap();
        assert_eq!(game.outcome(), Outcome::Win(Stone::Black));

        let before = snapshot(&game);
        let line = game.winning_line();
        // Empty cell, occupied cell, out of bounds: all rejected the same way
        assert_eq!(game.play(10, 10), Err(MoveError::GameOver));
        assert_eq!(game.play(7, 7), Err(MoveError::GameOver));
        assert_eq!(game.play(-1, -1), Err(MoveError::GameOver));
        assert_eq!(snapshot(&game), before);
        assert_eq!(game.winning_line(), line);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut game = Game::new();
        for i in 0..4 {
            game.play(7, 3 + i).unwrap();
            game.play(0, i).unwrap();
        }
        game.play(7, 7).unwrap();
        assert!(game.is_over());

        game.reset();
        assert!(game.board().is_board_empty());
        assert_eq!(game.turn(), Stone::Black);
        assert_eq!(game.outcome(), Outcome::InProgress);
        assert_eq!(game.last_move(), None);
        assert_eq!(game.winning_line(), None);

        // Play continues normally after reset
        game.play(7, 7).unwrap();
        assert_eq!(game.stone_at(7, 7), Some(Stone::Black));
    }

    #[test]
    fn test_draw_on_full_board() {
        // Interleave the pattern's black and white cells so each color lands
        // on its own cells; no run ever exceeds 2, so the 225th move draws.
        let mut blacks = Vec::new();
        let mut whites = Vec::new();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                match pattern_stone(row, col) {
                    Stone::Black => blacks.push((row as i32, col as i32)),
                    _ => whites.push((row as i32, col as i32)),
                }
            }
        }
        assert_eq!(blacks.len(), 113);
        assert_eq!(whites.len(), 112);

        let mut game = Game::new();
        for k in 0..TOTAL_CELLS {
            assert_eq!(game.outcome(), Outcome::InProgress);
            let (r, c) = if k % 2 == 0 { blacks[k / 2] } else { whites[k / 2] };
            game.play(r, c).unwrap();
        }

        assert_eq!(game.outcome(), Outcome::Draw);
        assert!(game.board().is_full());
        assert_eq!(game.winning_line(), None);
        assert_eq!(game.play(0, 0), Err(MoveError::GameOver));
    }

    #[test]
    fn test_win_takes_precedence_over_draw() {
        // Recolor the draw pattern so its only five is vertical in column 0
        // (rows 0..=4, Black) and save (0, 0) for the very last move: the
        // 225th move both fills the board and completes the five.
        let recolored = |row: usize, col: usize| match (row, col) {
            (1, 0) | (3, 0) => Stone::Black,
            (14, 8) | (14, 12) => Stone::White,
            _ => pattern_stone(row, col),
        };

        let mut blacks = Vec::new();
        let mut whites = Vec::new();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if (row, col) == (0, 0) {
                    continue;
                }
                match recolored(row, col) {
                    Stone::Black => blacks.push((row as i32, col as i32)),
                    _ => whites.push((row as i32, col as i32)),
                }
            }
        }
        assert_eq!(blacks.len(), 112);
        assert_eq!(whites.len(), 112);

        let mut game = Game::new();
        for k in 0..TOTAL_CELLS - 1 {
            assert_eq!(game.outcome(), Outcome::InProgress);
            let (r, c) = if k % 2 == 0 { blacks[k / 2] } else { whites[k / 2] };
            game.play(r, c).unwrap();
        }
        assert_eq!(game.turn(), Stone::Black);
        game.play(0, 0).unwrap();

        assert!(game.board().is_full());
        assert_eq!(game.outcome(), Outcome::Win(Stone::Black));
        let line = game.winning_line().unwrap();
        assert_eq!(line[0], Pos::new(0, 0));
        assert_eq!(line[4], Pos::new(4, 0));
    }
}
