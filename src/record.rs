//! Move history and game transcript export
//!
//! The transcript is plain text: a header, one numbered line per move, and a
//! diagram of the final position.
//!
//! ```text
//! Gomoku Game Record
//! Board: 15x15
//! Win length: 5
//! Engine: Black
//! Moves: 2
//!
//! 1. Black H8 (7,7)
//! 2. White H7 (6,7)
//!
//! Final position:
//!     A B C ...
//! ```

use crate::board::{Board, Pos, Stone};

pub const RECORD_TITLE: &str = "Gomoku Game Record";

/// One recorded move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub row: u8,
    pub col: u8,
    pub stone: Stone,
}

impl MoveRecord {
    pub fn new(pos: Pos, stone: Stone) -> Self {
        Self {
            row: pos.row,
            col: pos.col,
            stone,
        }
    }

    pub fn pos(&self) -> Pos {
        Pos::new(self.row, self.col)
    }
}

/// Append-only list of moves for the current game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveHistory {
    moves: Vec<MoveRecord>,
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, pos: Pos, stone: Stone) {
        self.moves.push(MoveRecord::new(pos, stone));
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn last(&self) -> Option<&MoveRecord> {
        self.moves.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MoveRecord> {
        self.moves.iter()
    }
}

/// Render the transcript of `history` ending in `board`.
///
/// `self_is_black` is the side the engine played. Pure: neither the history
/// nor the board is modified.
pub fn export_game_record(
    history: &MoveHistory,
    board: &Board,
    win_length: usize,
    self_is_black: bool,
) -> String {
    let size = board.size();
    let engine_side = if self_is_black { Stone::Black } else { Stone::White };

    let mut out = String::new();
    out.push_str(RECORD_TITLE);
    out.push('\n');
    out.push_str(&format!("Board: {size}x{size}\n"));
    out.push_str(&format!("Win length: {win_length}\n"));
    out.push_str(&format!("Engine: {}\n", engine_side.name()));
    out.push_str(&format!("Moves: {}\n", history.len()));
    out.push('\n');

    if !history.is_empty() {
        for (n, mv) in history.iter().enumerate() {
            out.push_str(&format!(
                "{}. {} {} ({},{})\n",
                n + 1,
                mv.stone.name(),
                mv.pos().label(),
                mv.row,
                mv.col
            ));
        }
        out.push('\n');
    }

    out.push_str("Final position:\n");
    out.push_str(&board.render());
    out
}

/// Header fields read back from a transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    pub board_size: usize,
    pub win_length: usize,
    pub engine_side: Stone,
    pub moves: usize,
}

/// Parse the header written by [`export_game_record`].
pub fn parse_header(text: &str) -> Option<RecordHeader> {
    let mut lines = text.lines();
    if lines.next()? != RECORD_TITLE {
        return None;
    }

    let board = lines.next()?.strip_prefix("Board: ")?;
    let (rows, cols) = board.split_once('x')?;
    let board_size: usize = rows.parse().ok()?;
    if cols.parse::<usize>().ok()? != board_size {
        return None;
    }

    let win_length = lines.next()?.strip_prefix("Win length: ")?.parse().ok()?;
    let engine_side = match lines.next()?.strip_prefix("Engine: ")? {
        "Black" => Stone::Black,
        "White" => Stone::White,
        _ => return None,
    };
    let moves = lines.next()?.strip_prefix("Moves: ")?.parse().ok()?;

    Some(RecordHeader {
        board_size,
        win_length,
        engine_side,
        moves,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_history_has_header_and_no_moves() {
        let board = Board::new();
        let text = export_game_record(&MoveHistory::new(), &board, 5, true);

        assert!(text.starts_with("Gomoku Game Record\nBoard: 15x15\n"));
        assert!(text.contains("Moves: 0\n"));
        assert!(!text.contains("1. "));
        assert!(text.ends_with(&board.render()));
        assert_eq!(
            parse_header(&text),
            Some(RecordHeader {
                board_size: 15,
                win_length: 5,
                engine_side: Stone::Black,
                moves: 0,
            })
        );
    }

    #[test]
    fn test_move_lines() {
        let mut board = Board::new();
        let mut history = MoveHistory::new();
        for (pos, stone) in [
            (Pos::new(7, 7), Stone::Black),
            (Pos::new(6, 7), Stone::White),
        ] {
            board.place_stone(pos, stone);
            history.push(pos, stone);
        }

        let text = export_game_record(&history, &board, 5, false);
        assert!(text.contains("\n1. Black H8 (7,7)\n2. White H7 (6,7)\n"));
        assert!(text.contains("Engine: White\n"));
        assert_eq!(parse_header(&text).map(|h| h.moves), Some(2));
    }

    #[test]
    fn test_export_is_deterministic_and_pure() {
        let mut board = Board::with_size(9);
        let mut history = MoveHistory::new();
        board.place_stone(Pos::new(4, 4), Stone::Black);
        history.push(Pos::new(4, 4), Stone::Black);
        let (board_before, history_before) = (board.clone(), history.clone());

        let a = export_game_record(&history, &board, 4, true);
        let b = export_game_record(&history, &board, 4, true);
        assert_eq!(a, b);
        assert_eq!(board, board_before);
        assert_eq!(history, history_before);
        assert_eq!(parse_header(&a).map(|h| (h.board_size, h.win_length)), Some((9, 4)));
    }

    #[test]
    fn test_history_clear() {
        let mut history = MoveHistory::new();
        history.push(Pos::new(1, 2), Stone::White);
        assert_eq!(history.last().map(|m| m.pos()), Some(Pos::new(1, 2)));
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn test_parse_header_rejects_other_text() {
        assert_eq!(parse_header("hello"), None);
        assert_eq!(parse_header(""), None);
    }
}
