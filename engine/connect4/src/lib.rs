//! Connect Four rules engine.
//!
//! Connect Four is a two-player connection game where players drop colored
//! checkers into a 7-column, 6-row vertically suspended grid. The first
//! player to form a horizontal, vertical, or diagonal line of four checkers
//! wins; a full top row with no winner is a tie.
//!
//! # Board Layout
//!
//! The board is stored in row-major order, with row 0 at the bottom:
//! ```text
//! Row 5: [35][36][37][38][39][40][41]  <- Top
//! Row 4: [28][29][30][31][32][33][34]
//! Row 3: [21][22][23][24][25][26][27]
//! Row 2: [14][15][16][17][18][19][20]
//! Row 1: [ 7][ 8][ 9][10][11][12][13]
//! Row 0: [ 0][ 1][ 2][ 3][ 4][ 5][ 6]  <- Bottom
//!         Col 0  1  2  3  4  5  6
//! ```
//!
//! Win and tie detection are incremental: only the four line directions
//! through the last-placed cell are scanned, never the whole board. This is
//! what makes the board cheap enough to use as a shared scratch instance for
//! move-sequence replay in the search engine.
//!
//! # Usage
//!
//! ```rust
//! use connect4::{Board, Color, Column, Outcome};
//!
//! let mut board = Board::new();
//! assert_eq!(board.to_move(), Color::Red);
//! assert_eq!(board.simulate(Column::CENTER), Outcome::Continue);
//! assert_eq!(board.to_move(), Color::Yellow);
//! ```

use thiserror::Error;

/// Board dimensions
pub const COLS: usize = 7;
pub const ROWS: usize = 6;
pub const BOARD_SIZE: usize = COLS * ROWS; // 42

/// Checker color. Red moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Yellow,
}

impl Color {
    /// The other color.
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::Red => Color::Yellow,
            Color::Yellow => Color::Red,
        }
    }
}

/// Classification of a move applied to a board.
///
/// `Invalid` is a normal, expected result (dropping into a full column), not
/// an error: the caller scores it as an immediate loss for the mover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Legal move, game goes on.
    Continue,
    /// The move completed four in a row for its mover.
    Win,
    /// The move filled the top row without a winner.
    Tie,
    /// The column was already full; the board was not modified.
    Invalid,
}

/// Error returned when constructing a [`Column`] from an out-of-range index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("column index {0} out of range for a 7-column board")]
pub struct InvalidColumn(pub u8);

/// A validated column index in `0..7`. Using a newtype so out-of-range
/// indices are rejected at the external boundary instead of deep in the
/// search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Column(u8);

impl Column {
    /// All columns, left to right. Index `i` is column `i`.
    pub const ALL: [Column; COLS] = [
        Column(0),
        Column(1),
        Column(2),
        Column(3),
        Column(4),
        Column(5),
        Column(6),
    ];

    /// The center column, the conventional fallback move.
    pub const CENTER: Column = Column(3);

    /// Validate a raw index.
    pub fn new(index: u8) -> Result<Column, InvalidColumn> {
        if (index as usize) < COLS {
            Ok(Column(index))
        } else {
            Err(InvalidColumn(index))
        }
    }

    /// The column index as a usize, always `< 7`.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<u8> for Column {
    type Error = InvalidColumn;

    fn try_from(index: u8) -> Result<Column, InvalidColumn> {
        Column::new(index)
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Connect Four board state.
///
/// Cells fill bottom-up per column (gravity): a cell above an empty cell in
/// the same column is always empty. The per-column heights are maintained
/// alongside the cells so legality checks and drops are O(1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Row-major cells with row 0 at the bottom.
    cells: [Option<Color>; BOARD_SIZE],
    /// Number of checkers in each column (0-6).
    heights: [u8; COLS],
    /// Whose turn it is.
    to_move: Color,
}

impl Board {
    /// An empty board with Red to move.
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
            heights: [0; COLS],
            to_move: Color::Red,
        }
    }

    /// Clear all cells and give the move back to Red. Used to recycle one
    /// scratch board across many replays instead of allocating per replay.
    pub fn reset(&mut self) {
        self.cells = [None; BOARD_SIZE];
        self.heights = [0; COLS];
        self.to_move = Color::Red;
    }

    /// The color to move next.
    #[inline]
    pub fn to_move(&self) -> Color {
        self.to_move
    }

    /// The cell at (col, row), `None` if empty.
    #[inline]
    pub fn cell(&self, col: Column, row: usize) -> Option<Color> {
        self.cells[Self::pos(col.index(), row)]
    }

    /// True iff the column's top cell is empty.
    #[inline]
    pub fn is_legal(&self, col: Column) -> bool {
        self.heights[col.index()] < ROWS as u8
    }

    #[inline]
    fn pos(col: usize, row: usize) -> usize {
        row * COLS + col
    }

    /// Place a checker in the lowest empty cell of the column and return the
    /// row it landed in, or `None` without mutation if the column is full.
    pub fn drop_checker(&mut self, col: Column, color: Color) -> Option<usize> {
        let c = col.index();
        if self.heights[c] >= ROWS as u8 {
            return None;
        }
        let row = self.heights[c] as usize;
        self.cells[Self::pos(c, row)] = Some(color);
        self.heights[c] += 1;
        Some(row)
    }

    /// Classify the board immediately after `color` was placed at
    /// (col, row): `Win` if that cell completes four in a row in any of the
    /// four line directions, `Tie` if the top row is now entirely full, else
    /// `Continue`. Only lines through the last-placed cell are scanned.
    pub fn outcome_after(&self, col: Column, row: usize, color: Color) -> Outcome {
        // Direction vectors: horizontal, vertical, diagonal /, diagonal \
        let directions: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

        for (dc, dr) in directions {
            let mut count = 1; // the checker just placed

            let (mut c, mut r) = (col.index() as i32 + dc, row as i32 + dr);
            while c >= 0 && c < COLS as i32 && r >= 0 && r < ROWS as i32 {
                if self.cells[Self::pos(c as usize, r as usize)] == Some(color) {
                    count += 1;
                    c += dc;
                    r += dr;
                } else {
                    break;
                }
            }

            let (mut c, mut r) = (col.index() as i32 - dc, row as i32 - dr);
            while c >= 0 && c < COLS as i32 && r >= 0 && r < ROWS as i32 {
                if self.cells[Self::pos(c as usize, r as usize)] == Some(color) {
                    count += 1;
                    c -= dc;
                    r -= dr;
                } else {
                    break;
                }
            }

            if count >= 4 {
                return Outcome::Win;
            }
        }

        // Top row full means every column is full (gravity).
        if self.heights.iter().all(|&h| h >= ROWS as u8) {
            return Outcome::Tie;
        }

        Outcome::Continue
    }

    /// Apply one move for the color to move: legality, drop, outcome. The
    /// to-move color toggles only on `Continue`; `Invalid` leaves the board
    /// untouched.
    pub fn simulate(&mut self, col: Column) -> Outcome {
        let color = self.to_move;
        let row = match self.drop_checker(col, color) {
            Some(row) => row,
            None => return Outcome::Invalid,
        };

        match self.outcome_after(col, row, color) {
            Outcome::Continue => {
                self.to_move = color.opponent();
                Outcome::Continue
            }
            terminal => terminal,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    fn col(i: u8) -> Column {
        Column::new(i).unwrap()
    }

    /// Full-board reference scanner used to cross-check the incremental
    /// detection: looks for any four consecutive same-colored cells anywhere.
    fn brute_force_winner(board: &Board) -> Option<Color> {
        let directions: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];
        for c in 0..COLS as i32 {
            for r in 0..ROWS as i32 {
                let start = match board.cell(Column::ALL[c as usize], r as usize) {
                    Some(color) => color,
                    None => continue,
                };
                for (dc, dr) in directions {
                    let mut run = 0;
                    for i in 0..4 {
                        let (cc, rr) = (c + dc * i, r + dr * i);
                        if cc < 0 || cc >= COLS as i32 || rr < 0 || rr >= ROWS as i32 {
                            break;
                        }
                        if board.cell(Column::ALL[cc as usize], rr as usize) == Some(start) {
                            run += 1;
                        } else {
                            break;
                        }
                    }
                    if run == 4 {
                        return Some(start);
                    }
                }
            }
        }
        None
    }

    #[test]
    fn column_validation() {
        for i in 0..7u8 {
            assert_eq!(Column::new(i).unwrap().index(), i as usize);
        }
        assert_eq!(Column::new(7), Err(InvalidColumn(7)));
        assert!(Column::try_from(200u8).is_err());
        assert_eq!(Column::CENTER.index(), 3);
    }

    #[test]
    fn initial_board() {
        let board = Board::new();
        assert_eq!(board.to_move(), Color::Red);
        for c in Column::ALL {
            assert!(board.is_legal(c));
            for r in 0..ROWS {
                assert_eq!(board.cell(c, r), None);
            }
        }
    }

    #[test]
    fn drop_lands_at_bottom_then_stacks() {
        let mut board = Board::new();
        assert_eq!(board.drop_checker(col(3), Color::Red), Some(0));
        assert_eq!(board.drop_checker(col(3), Color::Yellow), Some(1));
        assert_eq!(board.cell(col(3), 0), Some(Color::Red));
        assert_eq!(board.cell(col(3), 1), Some(Color::Yellow));
        assert_eq!(board.cell(col(3), 2), None);
    }

    #[test]
    fn simulate_first_move_continues() {
        // Scenario: empty board, Red to move, center column is legal.
        let mut board = Board::new();
        assert!(board.is_legal(col(3)));
        assert_eq!(board.simulate(col(3)), Outcome::Continue);
        assert_eq!(board.to_move(), Color::Yellow);
    }

    #[test]
    fn horizontal_win_on_bottom_row() {
        // Red at (0,0), (1,0), (2,0); dropping Red at column 3 wins.
        let mut board = Board::new();
        for c in 0..3 {
            board.drop_checker(col(c), Color::Red);
        }
        assert_eq!(board.simulate(col(3)), Outcome::Win);
        // No toggle on a terminal move.
        assert_eq!(board.to_move(), Color::Red);
    }

    #[test]
    fn vertical_win() {
        let mut board = Board::new();
        // Red stacks column 0, Yellow stacks column 1.
        for _ in 0..3 {
            assert_eq!(board.simulate(col(0)), Outcome::Continue);
            assert_eq!(board.simulate(col(1)), Outcome::Continue);
        }
        assert_eq!(board.simulate(col(0)), Outcome::Win);
    }

    #[test]
    fn ascending_diagonal_win() {
        let mut board = Board::new();
        // Red builds (0,0), (1,1), (2,2), (3,3); Yellow fills underneath in
        // columns 5 and 6 to stay out of the way.
        let moves = [0, 5, 1, 6, 1, 5, 2, 6, 2, 5, 2, 6, 3, 5, 3, 6, 3];
        for (i, &m) in moves.iter().enumerate() {
            let outcome = board.simulate(col(m));
            if i + 1 < moves.len() {
                assert_eq!(outcome, Outcome::Continue, "move {} ({})", i, m);
            } else {
                assert_eq!(outcome, Outcome::Win);
            }
        }
    }

    #[test]
    fn descending_diagonal_win() {
        let mut board = Board::new();
        // Red at (3,0), (2,1), (1,2), (0,3).
        let moves = [3, 2, 2, 1, 1, 0, 1, 0, 0, 4, 0];
        for (i, &m) in moves.iter().enumerate() {
            let outcome = board.simulate(col(m));
            if i + 1 < moves.len() {
                assert_eq!(outcome, Outcome::Continue, "move {} ({})", i, m);
            } else {
                assert_eq!(outcome, Outcome::Win);
            }
        }
    }

    #[test]
    fn full_top_row_is_tie() {
        // Column fills that avoid any four in a row:
        // even columns R R Y Y R R, odd columns Y Y R R Y Y.
        let mut board = Board::new();
        let even = [Color::Red, Color::Red, Color::Yellow, Color::Yellow, Color::Red, Color::Red];
        let odd = [Color::Yellow, Color::Yellow, Color::Red, Color::Red, Color::Yellow, Color::Yellow];
        for c in Column::ALL {
            let fill = if c.index() % 2 == 0 { even } else { odd };
            for color in fill {
                board.drop_checker(c, color);
            }
        }
        assert_eq!(brute_force_winner(&board), None);
        // The last checker placed was Red at the top of column 6.
        assert_eq!(board.outcome_after(col(6), 5, Color::Red), Outcome::Tie);
    }

    #[test]
    fn full_column_is_invalid_without_mutation() {
        let mut board = Board::new();
        for _ in 0..ROWS {
            board.simulate(col(0));
        }
        assert!(!board.is_legal(col(0)));

        let before = board.clone();
        assert_eq!(board.simulate(col(0)), Outcome::Invalid);
        assert_eq!(board, before);
    }

    #[test]
    fn reset_clears_everything() {
        let mut board = Board::new();
        board.simulate(col(2));
        board.simulate(col(2));
        board.reset();
        assert_eq!(board, Board::new());
    }

    #[test]
    fn incremental_detection_matches_brute_force_under_random_play() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        for _ in 0..200 {
            let mut board = Board::new();
            loop {
                let legal: Vec<Column> = Column::ALL
                    .into_iter()
                    .filter(|&c| board.is_legal(c))
                    .collect();
                if legal.is_empty() {
                    break;
                }
                let mover = board.to_move();
                let pick = legal[rng.gen_range(0..legal.len())];
                match board.simulate(pick) {
                    Outcome::Continue => {
                        assert_eq!(brute_force_winner(&board), None);
                    }
                    Outcome::Win => {
                        assert_eq!(brute_force_winner(&board), Some(mover));
                        break;
                    }
                    Outcome::Tie => {
                        assert_eq!(brute_force_winner(&board), None);
                        break;
                    }
                    Outcome::Invalid => unreachable!("only legal columns were offered"),
                }
            }
        }
    }
}
