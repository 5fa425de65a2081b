//! Board replay with group-capture rules.

use std::fmt;

use crate::error::SgfError;
use crate::moves::{Move, MoveKind};

/// The occupancy of one intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Black,
    White,
}

impl Cell {
    fn opponent(self) -> Cell {
        match self {
            Cell::Black => Cell::White,
            Cell::White => Cell::Black,
            Cell::Empty => Cell::Empty,
        }
    }
}

pub type Point = (usize, usize);

/// A size x size stone map plus running capture counts. `captures_by_*`
/// count the stones TAKEN by that color, not lost by it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub size: usize,
    cells: Vec<Cell>,
    pub captures_by_black: usize,
    pub captures_by_white: usize,
}

impl Board {
    pub fn new(size: usize) -> Board {
        Board {
            size,
            cells: vec![Cell::Empty; size * size],
            captures_by_black: 0,
            captures_by_white: 0,
        }
    }

    /// Replay `moves[0..upto]` in order against an empty board. `upto`
    /// past the end of the sequence is clamped to it.
    ///
    /// Every call starts from scratch; nothing is cached between
    /// requests. Replay is deterministic: the same `(size, moves, upto)`
    /// always produces an identical board.
    pub fn replay(size: usize, moves: &[Move], upto: usize) -> Result<Board, SgfError> {
        let mut board = Board::new(size);
        for (move_index, mv) in moves.iter().take(upto.min(moves.len())).enumerate() {
            board.apply(mv, move_index)?;
        }
        Ok(board)
    }

    /// Apply one move.
    ///
    /// `Remove` clears the point unconditionally and never touches the
    /// capture counts. A played stone overwrites the point, then every
    /// adjacent opposing group with no liberties left is taken off the
    /// board and credited to the placing color. The placing color's own
    /// liberties are never inspected: records are assumed legal, so a
    /// suicide move simply leaves its group on the board.
    fn apply(&mut self, mv: &Move, move_index: usize) -> Result<(), SgfError> {
        if mv.x >= self.size || mv.y >= self.size {
            return Err(SgfError::OutOfBounds {
                x: mv.x,
                y: mv.y,
                size: self.size,
                move_index,
            });
        }

        let idx = self.idx(mv.x, mv.y);
        let stone = match mv.kind {
            MoveKind::Remove => {
                self.cells[idx] = Cell::Empty;
                return Ok(());
            }
            MoveKind::Black => Cell::Black,
            MoveKind::White => Cell::White,
        };

        self.cells[idx] = stone;
        let captured = self.capture_dead_neighbors(mv.x, mv.y, stone.opponent());
        match stone {
            Cell::Black => self.captures_by_black += captured,
            Cell::White => self.captures_by_white += captured,
            Cell::Empty => unreachable!(),
        }
        Ok(())
    }

    /// Remove every `opponent` group adjacent to (x, y) that has no
    /// liberties; returns how many stones came off. Removal happens
    /// group by group, so a group touching the new stone on two sides is
    /// only counted once: after the first removal its points are empty.
    fn capture_dead_neighbors(&mut self, x: usize, y: usize, opponent: Cell) -> usize {
        let adjacent: Vec<Point> = self.neighbors(x, y).collect();
        let mut captured = 0;
        for (nx, ny) in adjacent {
            if self.get(nx, ny) == opponent && self.group_liberties(nx, ny) == 0 {
                let mut group = Vec::new();
                self.collect_group(nx, ny, &mut group);
                for &(gx, gy) in &group {
                    let i = self.idx(gx, gy);
                    self.cells[i] = Cell::Empty;
                }
                captured += group.len();
            }
        }
        captured
    }

    pub fn get(&self, x: usize, y: usize) -> Cell {
        self.cells[self.idx(x, y)]
    }

    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.size + x
    }

    /// 4-connected neighbors within the board.
    fn neighbors(&self, x: usize, y: usize) -> impl Iterator<Item = Point> + '_ {
        let s = self.size;
        let mut v = Vec::new();
        if x > 0 {
            v.push((x - 1, y));
        }
        if x + 1 < s {
            v.push((x + 1, y));
        }
        if y > 0 {
            v.push((x, y - 1));
        }
        if y + 1 < s {
            v.push((x, y + 1));
        }
        v.into_iter()
    }

    /// Flood the same-color group containing (x, y) into `out`.
    fn collect_group(&self, x: usize, y: usize, out: &mut Vec<Point>) {
        let color = self.get(x, y);
        if color == Cell::Empty {
            return;
        }
        let mut stack = vec![(x, y)];
        let mut visited = vec![false; self.size * self.size];
        while let Some((cx, cy)) = stack.pop() {
            let i = self.idx(cx, cy);
            if visited[i] {
                continue;
            }
            visited[i] = true;
            out.push((cx, cy));
            for (nx, ny) in self.neighbors(cx, cy) {
                let ni = self.idx(nx, ny);
                if !visited[ni] && self.get(nx, ny) == color {
                    stack.push((nx, ny));
                }
            }
        }
    }

    /// Liberty count of the group containing (x, y); 0 for an empty
    /// point. Shared liberties may be counted more than once, which is
    /// irrelevant for the zero-liberty test this feeds.
    fn group_liberties(&self, x: usize, y: usize) -> usize {
        let color = self.get(x, y);
        if color == Cell::Empty {
            return 0;
        }
        let mut stack = vec![(x, y)];
        let mut visited = vec![false; self.size * self.size];
        let mut liberties = 0;
        while let Some((cx, cy)) = stack.pop() {
            let i = self.idx(cx, cy);
            if visited[i] {
                continue;
            }
            visited[i] = true;
            for (nx, ny) in self.neighbors(cx, cy) {
                let ni = self.idx(nx, ny);
                match self.get(nx, ny) {
                    Cell::Empty => liberties += 1,
                    c if c == color && !visited[ni] => stack.push((nx, ny)),
                    _ => {}
                }
            }
        }
        liberties
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.size {
            for x in 0..self.size {
                let ch = match self.get(x, y) {
                    Cell::Black => 'X',
                    Cell::White => 'O',
                    Cell::Empty => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(x: usize, y: usize, kind: MoveKind) -> Move {
        Move {
            x,
            y,
            kind,
            labels: Vec::new(),
            symbols: Vec::new(),
        }
    }

    fn count_stones(board: &Board, cell: Cell) -> usize {
        let mut count = 0;
        for y in 0..board.size {
            for x in 0..board.size {
                if board.get(x, y) == cell {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn test_setup_then_move() {
        // AB[dd] then B[pd] on a 19x19 board.
        let moves = [mv(3, 3, MoveKind::Black), mv(15, 3, MoveKind::Black)];
        let board = Board::replay(19, &moves, 2).unwrap();

        assert_eq!(count_stones(&board, Cell::Black), 2);
        assert_eq!(board.get(3, 3), Cell::Black);
        assert_eq!(board.get(15, 3), Cell::Black);
        assert_eq!(board.captures_by_black, 0);
        assert_eq!(board.captures_by_white, 0);
    }

    #[test]
    fn test_prefix_replay() {
        let moves = [mv(3, 3, MoveKind::Black), mv(15, 3, MoveKind::Black)];
        let board = Board::replay(19, &moves, 1).unwrap();
        assert_eq!(count_stones(&board, Cell::Black), 1);
        assert_eq!(board.get(15, 3), Cell::Empty);
    }

    #[test]
    fn test_upto_clamped() {
        let moves = [mv(0, 0, MoveKind::Black)];
        let board = Board::replay(9, &moves, 100).unwrap();
        assert_eq!(board.get(0, 0), Cell::Black);
    }

    #[test]
    fn test_remove_clears_point() {
        let moves = [mv(4, 4, MoveKind::Black), mv(4, 4, MoveKind::Remove)];
        let board = Board::replay(9, &moves, 2).unwrap();
        assert_eq!(board.get(4, 4), Cell::Empty);
        assert_eq!(board.captures_by_black, 0);
        assert_eq!(board.captures_by_white, 0);
    }

    #[test]
    fn test_single_stone_capture() {
        // Black surrounds the white stone at (4, 4) on all four sides.
        let moves = [
            mv(4, 4, MoveKind::White),
            mv(3, 4, MoveKind::Black),
            mv(5, 4, MoveKind::Black),
            mv(4, 3, MoveKind::Black),
            mv(4, 5, MoveKind::Black),
        ];
        let before = Board::replay(9, &moves, 4).unwrap();
        assert_eq!(before.get(4, 4), Cell::White);
        assert_eq!(before.captures_by_black, 0);

        let after = Board::replay(9, &moves, 5).unwrap();
        assert_eq!(after.get(4, 4), Cell::Empty);
        assert_eq!(after.captures_by_black, 1);
        assert_eq!(after.captures_by_white, 0);
        assert_eq!(count_stones(&after, Cell::White), 0);
    }

    #[test]
    fn test_group_capture_counts_every_stone() {
        // A two-stone white group at (1,0)-(2,0) against the top edge,
        // captured when black fills its last liberty.
        let moves = [
            mv(1, 0, MoveKind::White),
            mv(2, 0, MoveKind::White),
            mv(0, 0, MoveKind::Black),
            mv(1, 1, MoveKind::Black),
            mv(2, 1, MoveKind::Black),
            mv(3, 0, MoveKind::Black),
        ];
        let board = Board::replay(9, &moves, 6).unwrap();
        assert_eq!(board.captures_by_black, 2);
        assert_eq!(board.get(1, 0), Cell::Empty);
        assert_eq!(board.get(2, 0), Cell::Empty);
    }

    #[test]
    fn test_capture_credited_to_white() {
        let moves = [
            mv(0, 0, MoveKind::Black),
            mv(1, 0, MoveKind::White),
            mv(0, 1, MoveKind::White),
        ];
        let board = Board::replay(9, &moves, 3).unwrap();
        assert_eq!(board.captures_by_white, 1);
        assert_eq!(board.captures_by_black, 0);
        assert_eq!(board.get(0, 0), Cell::Empty);
    }

    #[test]
    fn test_suicide_left_on_board() {
        // White fills the corner point whose group then has no
        // liberties. No legality check: the stone stays.
        let moves = [
            mv(1, 0, MoveKind::Black),
            mv(0, 1, MoveKind::Black),
            mv(0, 0, MoveKind::White),
        ];
        let board = Board::replay(9, &moves, 3).unwrap();
        assert_eq!(board.get(0, 0), Cell::White);
        assert_eq!(board.captures_by_black, 0);
        assert_eq!(board.captures_by_white, 0);
    }

    #[test]
    fn test_capture_takes_precedence_over_suicide() {
        // Black plays into the corner and captures the adjacent white
        // stone first, which restores a liberty for the new stone.
        let moves = [
            mv(1, 0, MoveKind::White),
            mv(0, 1, MoveKind::Black),
            mv(2, 0, MoveKind::Black),
            mv(1, 1, MoveKind::Black),
            mv(0, 0, MoveKind::Black),
        ];
        let board = Board::replay(9, &moves, 5).unwrap();
        assert_eq!(board.get(0, 0), Cell::Black);
        assert_eq!(board.get(1, 0), Cell::Empty);
        assert_eq!(board.captures_by_black, 1);
    }

    #[test]
    fn test_out_of_bounds_fails_fast() {
        let moves = [mv(0, 0, MoveKind::Black), mv(9, 3, MoveKind::Black)];
        let err = Board::replay(9, &moves, 2).unwrap_err();
        match err {
            SgfError::OutOfBounds {
                x,
                y,
                size,
                move_index,
            } => {
                assert_eq!((x, y), (9, 3));
                assert_eq!(size, 9);
                assert_eq!(move_index, 1);
            }
            other => panic!("expected OutOfBounds, got {other:?}"),
        }
    }

    #[test]
    fn test_replay_is_deterministic() {
        let moves = [
            mv(4, 4, MoveKind::White),
            mv(3, 4, MoveKind::Black),
            mv(5, 4, MoveKind::Black),
            mv(4, 3, MoveKind::Black),
            mv(4, 5, MoveKind::Black),
        ];
        let a = Board::replay(9, &moves, 5).unwrap();
        let b = Board::replay(9, &moves, 5).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_display_grid() {
        let moves = [mv(0, 0, MoveKind::Black), mv(2, 1, MoveKind::White)];
        let board = Board::replay(3, &moves, 2).unwrap();
        assert_eq!(board.to_string(), "X . . \n. . O \n. . . \n");
    }
}
