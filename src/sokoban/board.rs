//! Sokoban board, coordinates and the text parser

use crate::error::{PuzzleError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell coordinate, 0-based (row, col)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The neighbouring coordinate in `direction`, if it is on a
    /// `rows` x `cols` board
    /// `None` when the step would leave the non-negative quadrant
    pub fn step(self, direction: Direction) -> Option<Position> {
        let (dr, dc) = direction.delta();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        Some(Position { row, col })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A player move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// (row, col) offset
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn from_delta(delta: (isize, isize)) -> Option<Direction> {
        Direction::ALL.into_iter().find(|d| d.delta() == delta)
    }

    pub fn symbol(self) -> char {
        match self {
            Direction::Up => 'U',
            Direction::Down => 'D',
            Direction::Left => 'L',
            Direction::Right => 'R',
        }
    }

    /// Accepts `U D L R` in either case
    pub fn from_symbol(symbol: char) -> Option<Direction> {
        match symbol.to_ascii_uppercase() {
            'U' => Some(Direction::Up),
            'D' => Some(Direction::Down),
            'L' => Some(Direction::Left),
            'R' => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Render a move list as `UDLR` symbols
pub fn format_moves(moves: &[Direction]) -> String {
    moves.iter().map(|m| m.symbol()).collect()
}

/// Static terrain of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Wall,
    Floor,
    Goal,
}

impl CellKind {
    pub fn is_passable(self) -> bool {
        self != CellKind::Wall
    }
}

/// Board terrain; movable entities live in `BoardState` and `Snapshot`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub rows: usize,
    pub cols: usize,
    cells: Vec<CellKind>,
}

impl Board {
    pub fn new(rows: usize, cols: usize, cells: Vec<CellKind>) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(PuzzleError::EmptyBoard);
        }
        if cells.len() != rows * cols {
            return Err(PuzzleError::InvalidDimensions {
                expected_rows: rows,
                expected_cols: cols,
                rows: cells.len() / cols,
                cols,
            });
        }
        Ok(Self { rows, cols, cells })
    }

    pub fn get(&self, pos: Position) -> CellKind {
        self.cells[pos.row * self.cols + pos.col]
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    pub fn is_wall(&self, pos: Position) -> bool {
        self.get(pos) == CellKind::Wall
    }

    pub fn is_goal(&self, pos: Position) -> bool {
        self.get(pos) == CellKind::Goal
    }

    pub fn is_passable(&self, pos: Position) -> bool {
        self.get(pos).is_passable()
    }

    pub fn neighbour(&self, pos: Position, direction: Direction) -> Option<Position> {
        pos.step(direction).filter(|&next| self.contains(next))
    }

    /// Passable orthogonal neighbours of `pos`
    pub fn passable_neighbours(&self, pos: Position) -> Vec<Position> {
        Direction::ALL
            .into_iter()
            .filter_map(|d| self.neighbour(pos, d))
            .filter(|&n| self.is_passable(n))
            .collect()
    }

    /// All coordinates in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Position { row, col }))
    }

    pub fn passable_positions(&self) -> Vec<Position> {
        self.positions().filter(|&p| self.is_passable(p)).collect()
    }

    pub fn wall_positions(&self) -> Vec<Position> {
        self.positions().filter(|&p| self.is_wall(p)).collect()
    }

    pub fn goals(&self) -> Vec<Position> {
        self.positions().filter(|&p| self.is_goal(p)).collect()
    }

    /// Wall or off the board
    fn is_blocked(&self, pos: Position, direction: Direction) -> bool {
        self.neighbour(pos, direction).map_or(true, |n| self.is_wall(n))
    }

    /// A non-goal floor cell with two perpendicular blocked sides; a box
    /// pushed there can never leave
    pub fn is_dead_square(&self, pos: Position) -> bool {
        if self.get(pos) != CellKind::Floor {
            return false;
        }
        let vertical = self.is_blocked(pos, Direction::Up) || self.is_blocked(pos, Direction::Down);
        let horizontal = self.is_blocked(pos, Direction::Left) || self.is_blocked(pos, Direction::Right);
        vertical && horizontal
    }

    pub fn dead_squares(&self) -> Vec<Position> {
        self.positions().filter(|&p| self.is_dead_square(p)).collect()
    }
}

/// A parsed board with the initial player and box positions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    pub board: Board,
    pub player: Position,
    /// Box identities are their indices here
    pub boxes: Vec<Position>,
}

impl BoardState {
    /// Parse the text format, one line per row:
    ///
    /// `#` wall, `.` or space floor, `P` player, `B` box, `G` goal,
    /// `*` box on goal, `+` player on goal.
    pub fn parse(content: &str) -> Result<Self> {
        let lines: Vec<&str> = content
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .collect();

        // Only empty lines around the board are dropped; an all-space line is a floor row
        let start = lines.iter().position(|line| !line.is_empty()).unwrap_or(lines.len());
        let end = lines
            .iter()
            .rposition(|line| !line.is_empty())
            .map_or(start, |last| last + 1);

        let rows: Vec<Vec<char>> = lines[start..end]
            .iter()
            .map(|line| line.chars().collect())
            .collect();

        Self::from_rows(&rows)
    }

    /// Build from a character matrix
    pub fn from_rows(rows: &[Vec<char>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if cols == 0 {
            return Err(PuzzleError::EmptyBoard);
        }

        let mut cells = Vec::with_capacity(rows.len() * cols);
        let mut players = Vec::new();
        let mut boxes = Vec::new();

        for (row, line) in rows.iter().enumerate() {
            if line.len() != cols {
                return Err(PuzzleError::RaggedRows {
                    row,
                    len: line.len(),
                    expected: cols,
                });
            }

            for (col, &code) in line.iter().enumerate() {
                let pos = Position { row, col };
                let kind = match code {
                    '#' => CellKind::Wall,
                    '.' | ' ' => CellKind::Floor,
                    'G' => CellKind::Goal,
                    'P' => {
                        players.push(pos);
                        CellKind::Floor
                    }
                    '+' => {
                        players.push(pos);
                        CellKind::Goal
                    }
                    'B' => {
                        boxes.push(pos);
                        CellKind::Floor
                    }
                    '*' => {
                        boxes.push(pos);
                        CellKind::Goal
                    }
                    _ => return Err(PuzzleError::InvalidCellCode { row, col, code }),
                };
                cells.push(kind);
            }
        }

        if players.len() != 1 {
            return Err(PuzzleError::PlayerCount(players.len()));
        }

        Ok(Self {
            board: Board::new(rows.len(), cols, cells)?,
            player: players[0],
            boxes,
        })
    }

    /// Render back to the text format
    pub fn to_text(&self) -> String {
        let mut result = String::with_capacity(self.board.rows * (self.board.cols + 1));
        for row in 0..self.board.rows {
            for col in 0..self.board.cols {
                let pos = Position { row, col };
                let goal = self.board.is_goal(pos);
                let ch = if pos == self.player {
                    if goal { '+' } else { 'P' }
                } else if self.boxes.contains(&pos) {
                    if goal { '*' } else { 'B' }
                } else {
                    match self.board.get(pos) {
                        CellKind::Wall => '#',
                        CellKind::Floor => '.',
                        CellKind::Goal => 'G',
                    }
                };
                result.push(ch);
            }
            result.push('\n');
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_board() {
        let state = BoardState::parse("#####\n#PBG#\n#####\n").unwrap();
        assert_eq!(state.board.rows, 3);
        assert_eq!(state.board.cols, 5);
        assert_eq!(state.player, Position::new(1, 1));
        assert_eq!(state.boxes, vec![Position::new(1, 2)]);
        assert_eq!(state.board.goals(), vec![Position::new(1, 3)]);
        assert!(state.board.is_passable(Position::new(1, 2)));
        assert!(state.board.is_wall(Position::new(0, 2)));
    }

    #[test]
    fn test_parse_combined_codes() {
        let state = BoardState::parse("#####\n#+*B#\n# G #\n#####").unwrap();
        assert_eq!(state.player, Position::new(1, 1));
        assert!(state.board.is_goal(state.player));
        assert_eq!(state.boxes, vec![Position::new(1, 2), Position::new(1, 3)]);
        assert_eq!(state.board.goals().len(), 3);
        assert_eq!(state.board.get(Position::new(2, 1)), CellKind::Floor);
        assert_eq!(state.to_text(), "#####\n#+*B#\n#.G.#\n#####\n");
    }

    #[test]
    fn test_parse_keeps_all_space_rows() {
        let state = BoardState::parse("\nP.BG\n    \n....\n\n").unwrap();
        assert_eq!(state.board.rows, 3);
        assert_eq!(state.board.cols, 4);
        assert_eq!(state.board.get(Position::new(1, 2)), CellKind::Floor);
        assert_eq!(state.board.goals(), vec![Position::new(0, 3)]);
        assert_eq!(state.to_text(), "P.BG\n....\n....\n");

        // An empty line inside the board is a zero-width row, not a separator
        assert_eq!(
            BoardState::parse("P.BG\n\n....\n"),
            Err(PuzzleError::RaggedRows { row: 1, len: 0, expected: 4 })
        );
    }

    #[test]
    fn test_neighbours_stay_on_board() {
        let state = BoardState::parse("P.\nBG\n").unwrap();
        let board = &state.board;
        assert!(board.contains(Position::new(1, 1)));
        assert!(!board.contains(Position::new(2, 0)));
        assert_eq!(board.neighbour(Position::new(1, 1), Direction::Right), None);
        assert_eq!(board.neighbour(Position::new(1, 1), Direction::Down), None);
        assert_eq!(
            board.neighbour(Position::new(0, 1), Direction::Down),
            Some(Position::new(1, 1))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(BoardState::parse(""), Err(PuzzleError::EmptyBoard));
        assert_eq!(
            BoardState::parse("###\n#P#\n##\n"),
            Err(PuzzleError::RaggedRows { row: 2, len: 2, expected: 3 })
        );
        assert_eq!(
            BoardState::parse("####\n#Px#\n####\n"),
            Err(PuzzleError::InvalidCellCode { row: 1, col: 2, code: 'x' })
        );
        assert_eq!(BoardState::parse("###\n#.#\n###\n"), Err(PuzzleError::PlayerCount(0)));
        assert_eq!(BoardState::parse("####\n#PP#\n####\n"), Err(PuzzleError::PlayerCount(2)));
    }

    #[test]
    fn test_direction_table() {
        for direction in Direction::ALL {
            assert_eq!(Direction::from_delta(direction.delta()), Some(direction));
            assert_eq!(Direction::from_symbol(direction.symbol()), Some(direction));
            assert_eq!(direction.opposite().opposite(), direction);
        }
        assert_eq!(Direction::from_delta((1, 1)), None);
        assert_eq!(Direction::from_delta((0, 2)), None);
        assert_eq!(Direction::from_symbol('r'), Some(Direction::Right));
        assert_eq!(format_moves(&[Direction::Right, Direction::Down]), "RD");
    }

    #[test]
    fn test_position_step_stays_on_board() {
        let origin = Position::new(0, 0);
        assert_eq!(origin.step(Direction::Up), None);
        assert_eq!(origin.step(Direction::Left), None);
        assert_eq!(origin.step(Direction::Down), Some(Position::new(1, 0)));
        assert_eq!(Position::new(2, 2).step(Direction::Right), Some(Position::new(2, 3)));
    }

    #[test]
    fn test_dead_squares() {
        let state = BoardState::parse("\
#####
#P..#
#.B.#
#...#
#.G.#
#####
")
        .unwrap();
        let board = &state.board;

        let dead = board.dead_squares();
        assert_eq!(
            dead,
            vec![
                Position::new(1, 1),
                Position::new(1, 3),
                Position::new(4, 1),
                Position::new(4, 3),
            ]
        );
        // Goal pockets stay usable
        assert!(!board.is_dead_square(Position::new(4, 2)));
        // Walls are never dead squares
        assert!(!board.is_dead_square(Position::new(0, 0)));
    }

    #[test]
    fn test_board_edges_count_as_blocked() {
        let state = BoardState::parse("P.B.G").unwrap();
        let board = &state.board;
        assert!(board.is_dead_square(Position::new(0, 0)));
        assert!(!board.is_dead_square(Position::new(0, 2)));
        assert!(!board.is_dead_square(Position::new(0, 4)));
    }
}
