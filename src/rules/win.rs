//! Win condition checking
//!
//! A player wins by placing `win_length` (default five) or more stones in an
//! unbroken horizontal, vertical or diagonal line. Overlines count.

use crate::board::{Board, Pos, Stone, DIRECTIONS};

/// Result of scanning one line through a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRun {
    /// Stones of the scanned color in an unbroken run through the position,
    /// including the position itself
    pub consecutive: usize,
    /// Ends of the run that stop on an empty cell (0, 1 or 2)
    pub open_ends: u8,
}

/// Count the run through `pos` along `(dr, dc)` for `stone`.
///
/// Walks at most `win_length - 1` steps each way. The cell at `pos` counts as
/// one stone whatever it holds, so this also scores hypothetical placements.
/// An end is open only when its walk stops on an empty cell; the board edge,
/// an opposing stone and the step limit all leave it closed.
pub fn run_length(
    board: &Board,
    pos: Pos,
    dr: i32,
    dc: i32,
    stone: Stone,
    win_length: usize,
) -> LineRun {
    let mut consecutive = 1;
    let mut open_ends = 0;
    let reach = win_length.saturating_sub(1) as i32;

    for sign in [1, -1] {
        for i in 1..=reach {
            let r = i32::from(pos.row) + sign * i * dr;
            let c = i32::from(pos.col) + sign * i * dc;
            match board.get_at(r, c) {
                Some(s) if s == stone => consecutive += 1,
                Some(Stone::Empty) => {
                    open_ends += 1;
                    break;
                }
                _ => break,
            }
        }
    }

    LineRun {
        consecutive,
        open_ends,
    }
}

/// Fast win check at a specific position.
///
/// Uses the stone at `pos` and only looks at the four lines through it, so
/// it must be called right after a (real or speculative) placement there.
#[inline]
pub fn check_win(board: &Board, pos: Pos, win_length: usize) -> bool {
    let stone = board.get(pos);
    if stone == Stone::Empty {
        return false;
    }
    DIRECTIONS
        .iter()
        .any(|&(dr, dc)| run_length(board, pos, dr, dc, stone, win_length).consecutive >= win_length)
}

/// Check whether placing `stone` at the empty cell `pos` would win.
///
/// The board is borrowed mutably for the probe and restored before returning.
pub fn wins_with(board: &mut Board, pos: Pos, stone: Stone, win_length: usize) -> bool {
    board.place_stone(pos, stone);
    let won = check_win(board, pos, win_length);
    board.remove_stone(pos);
    won
}

/// Positions of the winning line through `pos`, if there is one.
///
/// Returns every stone of the run (more than `win_length` on an overline),
/// ordered from the negative end to the positive end.
pub fn winning_line(board: &Board, pos: Pos, win_length: usize) -> Option<Vec<Pos>> {
    let stone = board.get(pos);
    if stone == Stone::Empty {
        return None;
    }

    for &(dr, dc) in &DIRECTIONS {
        let mut line = vec![pos];

        // Extend in negative direction first
        let mut r = i32::from(pos.row) - dr;
        let mut c = i32::from(pos.col) - dc;
        while let Some(prev) = board.pos_at(r, c) {
            if board.get(prev) != stone {
                break;
            }
            line.insert(0, prev);
            r -= dr;
            c -= dc;
        }

        // Extend in positive direction
        r = i32::from(pos.row) + dr;
        c = i32::from(pos.col) + dc;
        while let Some(next) = board.pos_at(r, c) {
            if board.get(next) != stone {
                break;
            }
            line.push(next);
            r += dr;
            c += dc;
        }

        if line.len() >= win_length {
            return Some(line);
        }
    }
    None
}

/// Check if `stone` has a winning line anywhere on the board.
pub fn has_any_five(board: &Board, stone: Stone, win_length: usize) -> bool {
    board
        .stones_of(stone)
        .any(|pos| check_win(board, pos, win_length))
}

/// Winner of the position, if either side has a completed line.
pub fn check_winner(board: &Board, win_length: usize) -> Option<Stone> {
    [Stone::Black, Stone::White]
        .into_iter()
        .find(|&stone| has_any_five(board, stone, win_length))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_five_in_row_horizontal() {
        let mut board = Board::new();
        for i in 0..5 {
            board.place_stone(Pos::new(7, i), Stone::Black);
        }
        assert!(check_win(&board, Pos::new(7, 2), 5));
        assert!(has_any_five(&board, Stone::Black, 5));
        assert!(!has_any_five(&board, Stone::White, 5));
    }

    #[test]
    fn test_five_in_row_vertical() {
        let mut board = Board::new();
        for i in 0..5 {
            board.place_stone(Pos::new(i, 9), Stone::Black);
        }
        assert!(check_win(&board, Pos::new(4, 9), 5));
    }

    #[test]
    fn test_five_in_row_diagonal() {
        let mut board = Board::new();
        for i in 0..5 {
            board.place_stone(Pos::new(i, i), Stone::White);
        }
        assert!(check_win(&board, Pos::new(0, 0), 5));

        let mut anti = Board::new();
        for i in 0..5 {
            anti.place_stone(Pos::new(i, 10 - i), Stone::White);
        }
        assert!(check_win(&anti, Pos::new(2, 8), 5));
    }

    #[test]
    fn test_six_in_row_also_wins() {
        let mut board = Board::new();
        for i in 0..6 {
            board.place_stone(Pos::new(9, i), Stone::Black);
        }
        assert!(check_win(&board, Pos::new(9, 5), 5));
        assert_eq!(winning_line(&board, Pos::new(9, 0), 5).map(|l| l.len()), Some(6));
    }

    #[test]
    fn test_four_in_row_not_win() {
        let mut board = Board::new();
        for i in 0..4 {
            board.place_stone(Pos::new(9, i), Stone::Black);
        }
        assert!(!check_win(&board, Pos::new(9, 3), 5));
        assert_eq!(check_winner(&board, 5), None);
    }

    #[test]
    fn test_empty_cell_never_wins() {
        let board = Board::new();
        assert!(!check_win(&board, Pos::new(7, 7), 5));
        assert!(winning_line(&board, Pos::new(7, 7), 5).is_none());
    }

    #[test]
    fn test_wins_with_restores_board() {
        let mut board = Board::new();
        for i in 0..4 {
            board.place_stone(Pos::new(3, i + 2), Stone::White);
        }
        let before = board.clone();
        assert!(wins_with(&mut board, Pos::new(3, 6), Stone::White, 5));
        assert!(wins_with(&mut board, Pos::new(3, 1), Stone::White, 5));
        assert!(!wins_with(&mut board, Pos::new(3, 1), Stone::Black, 5));
        assert_eq!(board, before);
    }

    #[test]
    fn test_run_length_open_ends() {
        let mut board = Board::new();
        // _XXX_ with the probe on the middle stone
        for c in 5..8 {
            board.place_stone(Pos::new(7, c), Stone::Black);
        }
        let run = run_length(&board, Pos::new(7, 6), 0, 1, Stone::Black, 5);
        assert_eq!(run, LineRun { consecutive: 3, open_ends: 2 });

        // OXXX_ : one side blocked by an opponent
        board.place_stone(Pos::new(7, 4), Stone::White);
        let run = run_length(&board, Pos::new(7, 6), 0, 1, Stone::Black, 5);
        assert_eq!(run, LineRun { consecutive: 3, open_ends: 1 });
    }

    #[test]
    fn test_run_length_edge_is_closed() {
        let mut board = Board::new();
        board.place_stone(Pos::new(0, 0), Stone::Black);
        board.place_stone(Pos::new(0, 1), Stone::Black);
        let run = run_length(&board, Pos::new(0, 0), 0, 1, Stone::Black, 5);
        assert_eq!(run, LineRun { consecutive: 2, open_ends: 1 });
    }

    #[test]
    fn test_run_length_hypothetical_placement() {
        let mut board = Board::new();
        board.place_stone(Pos::new(7, 5), Stone::Black);
        board.place_stone(Pos::new(7, 7), Stone::Black);
        // (7,6) is empty but is treated as holding the probed stone
        let run = run_length(&board, Pos::new(7, 6), 0, 1, Stone::Black, 5);
        assert_eq!(run.consecutive, 3);
    }

    #[test]
    fn test_run_length_step_limit() {
        let mut board = Board::new();
        for c in 0..9 {
            board.place_stone(Pos::new(7, c), Stone::Black);
        }
        let run = run_length(&board, Pos::new(7, 4), 0, 1, Stone::Black, 5);
        assert_eq!(run, LineRun { consecutive: 9, open_ends: 0 });
    }

    /// Brute-force reference: any `win_length` window of identical stones
    /// on a line through `pos`.
    fn reference_win(board: &Board, pos: Pos, win_length: usize) -> bool {
        let stone = board.get(pos);
        if stone == Stone::Empty {
            return false;
        }
        let n = win_length as i32;
        DIRECTIONS.iter().any(|&(dr, dc)| {
            (0..n).any(|shift| {
                (0..n).all(|k| {
                    let r = i32::from(pos.row) + (k - shift) * dr;
                    let c = i32::from(pos.col) + (k - shift) * dc;
                    board.get_at(r, c) == Some(stone)
                })
            })
        })
    }

    #[test]
    fn test_check_win_every_run_on_small_board() {
        let size = 7;
        let empty = Board::with_size(size);
        for &(dr, dc) in &DIRECTIONS {
            for start in 0..size * size {
                let start = Pos::from_index(start, size);
                for len in 1..=4 {
                    let run: Option<Vec<Pos>> = (0..len)
                        .map(|k| empty.pos_at(i32::from(start.row) + k * dr, i32::from(start.col) + k * dc))
                        .collect();
                    let Some(run) = run else {
                        continue;
                    };
                    let mut board = empty.clone();
                    for &p in &run {
                        board.place_stone(p, Stone::Black);
                    }
                    for &p in &run {
                        assert_eq!(check_win(&board, p, 4), len == 4, "{:?} len {}", p, len);
                    }
                    for idx in 0..size * size {
                        let pos = Pos::from_index(idx, size);
                        assert_eq!(check_win(&board, pos, 4), reference_win(&board, pos, 4));
                    }
                }
            }
        }
    }

    #[test]
    fn test_check_win_matches_brute_force_small_board() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..400 {
            let mut board = Board::with_size(7);
            for idx in 0..49 {
                let stone = match rng.gen_range(0..3) {
                    0 => Stone::Empty,
                    1 => Stone::Black,
                    _ => Stone::White,
                };
                if stone != Stone::Empty {
                    board.place_stone(Pos::from_index(idx, 7), stone);
                }
            }
            for idx in 0..49 {
                let pos = Pos::from_index(idx, 7);
                assert_eq!(
                    check_win(&board, pos, 4),
                    reference_win(&board, pos, 4),
                    "mismatch at {:?} on\n{}",
                    pos,
                    board.render()
                );
            }
        }
    }
}
