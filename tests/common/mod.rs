// Rust-upgrade (https://github.com/rust-lang/rust/issues/46379):
//   remove `#[allow(dead_code)]` before public functions.

use classic_chess::board::{Board, TurnOutcome};
use classic_chess::coord::{Col, Coord, Row};
use classic_chess::error::TurnError;
use classic_chess::grid::Grid;
use classic_chess::piece::{PieceKind, PieceOnBoard, piece_from_ascii};
use classic_chess::force::Force;
use classic_chess::util::as_single_char;
use itertools::Itertools;


#[derive(Clone, Copy, Debug)]
pub struct PieceMatcher {
    pub kind: PieceKind,
    pub force: Force,
}

pub trait PieceIs {
    fn is(self, matcher: PieceMatcher) -> bool;
}

impl PieceIs for Option<PieceOnBoard> {
    fn is(self, matcher: PieceMatcher) -> bool {
        if let Some(piece) = self {
            piece.kind == matcher.kind && piece.force == matcher.force
        } else {
            false
        }
    }
}

#[macro_export]
macro_rules! piece {
    ($force:ident $kind:ident) => {
        common::PieceMatcher {
            force: classic_chess::force::Force::$force,
            kind: classic_chess::piece::PieceKind::$kind,
        }
    };
}

// Applies a move given by named squares: `turn!(board, E2 -> E4)`.
#[macro_export]
macro_rules! turn {
    ($board:expr, $from:ident -> $to:ident) => {
        $board.try_turn(
            classic_chess::coord::Coord::$from.to_xy(),
            classic_chess::coord::Coord::$to.to_xy(),
        )
    };
}

// Applies space-separated moves like "e2-e4 e7-e5". Stops at the first rejection.
#[allow(dead_code)]
pub fn replay_log(board: &mut Board, log: &str) -> Result<Vec<TurnOutcome>, TurnError> {
    log.split_whitespace()
        .map(|notation| {
            let (from, to) = notation
                .split('-')
                .map(|square| Coord::from_algebraic(square).unwrap())
                .collect_tuple()
                .unwrap();
            board.try_turn(from.to_xy(), to.to_xy())
        })
        .collect()
}

// Builds a board from an 8-line diagram, rank 8 on top. '.' is an empty cell,
// uppercase letters are white pieces and lowercase letters are black pieces.
#[allow(dead_code)]
pub fn parse_board(board_str: &str, total_moves: u32) -> Result<Board, String> {
    let rows = board_str
        .split('\n')
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(|line| line.split_ascii_whitespace().collect_vec())
        .collect_vec();
    assert_eq!(rows.len(), 8);
    assert!(rows.iter().all(|row| row.len() == 8));
    let mut grid = Grid::new();
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, piece_str) in row.iter().enumerate() {
            let piece_char =
                as_single_char(piece_str).ok_or_else(|| format!("Invalid piece: {}", piece_str))?;
            let coord = Coord::new(
                Row::from_zero_based(row_idx as u8),
                Col::from_zero_based(col_idx as u8),
            );
            let piece = if piece_char == '.' {
                None
            } else {
                let (kind, force) = piece_from_ascii(piece_char)
                    .ok_or_else(|| format!("Invalid piece: {}", piece_char))?;
                Some(PieceOnBoard::new(kind, force))
            };
            grid[coord] = piece;
        }
    }
    Ok(Board::new_from_grid(grid, total_moves))
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn without_move_counts(grid: &Grid) -> Vec<(Coord, PieceKind, Force)> {
        grid.pieces().map(|(pos, piece)| (pos, piece.kind, piece.force)).collect()
    }

    #[test]
    fn parse_board_opening() {
        let board_str = "
            r n b q k b n r
            p p p . p p p p
            . . . . . . . .
            . . . p . . . .
            . . . . P . . .
            . . . . . . . .
            P P P P . P P P
            R N B Q K B N R
        ";
        let board = parse_board(board_str, 2).unwrap();

        let mut board_expected = Board::new();
        replay_log(&mut board_expected, "e2-e4 d7-d5").unwrap();

        assert_eq!(without_move_counts(board.grid()), without_move_counts(board_expected.grid()));
        assert_eq!(board.active_force(), board_expected.active_force());
    }
}
