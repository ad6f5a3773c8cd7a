use classic_chess::Board;
use classic_chess::coord::{Col, NUM_COLS};
use classic_chess::piece::PieceOnBoard;
use console::Style;
use itertools::Itertools;

use crate::config::{ConsoleConfig, PieceStyle};


fn piece_char(piece: Option<PieceOnBoard>, style: PieceStyle) -> char {
    match (piece, style) {
        (None, PieceStyle::Letters) => '.',
        (None, PieceStyle::Unicode) => ' ',
        (Some(piece), PieceStyle::Letters) => piece.display_letter(),
        (Some(piece), PieceStyle::Unicode) => piece.pictogram(),
    }
}

fn render_file_header() -> String {
    let files: String = Col::all().map(|col| format_square(col.to_algebraic())).collect();
    format!("{}{}{}\n", format_square(' '), files, format_square(' '))
}

pub fn render_board(board: &Board, config: &ConsoleConfig) -> String {
    let colors = [
        Style::new().color256(233).on_color256(230),
        Style::new().color256(233).on_color256(222),
    ];
    let mut ret = render_file_header();
    for row_cells in &board.cells().chunks(NUM_COLS as usize) {
        let row_cells = row_cells.collect_vec();
        let rank = format_square(row_cells[0].0.row.to_algebraic());
        ret.push_str(&rank);
        for (coord, piece) in row_cells {
            let square = format_square(piece_char(piece, config.pieces));
            if config.colored {
                let color_idx = (coord.row.to_zero_based() + coord.col.to_zero_based()) % 2;
                ret.push_str(&colors[usize::from(color_idx)].apply_to(square).to_string());
            } else {
                ret.push_str(&square);
            }
        }
        ret.push_str(&rank);
        ret.push('\n');
    }
    ret.push_str(&render_file_header());
    ret
}

fn format_square(ch: char) -> String { format!(" {} ", ch) }


#[cfg(test)]
mod tests {
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use super::*;

    fn plain(pieces: PieceStyle) -> ConsoleConfig {
        ConsoleConfig { pieces, colored: false, ..ConsoleConfig::default() }
    }

    #[test]
    fn initial_board_in_letters() {
        let rendered = render_board(&Board::new(), &plain(PieceStyle::Letters));
        let squeezed = rendered.lines().map(|line| line.split_whitespace().join(" ")).join("\n");
        assert_eq!(squeezed, indoc! {"
            a b c d e f g h
            8 r n b q k b n r 8
            7 p p p p p p p p 7
            6 . . . . . . . . 6
            5 . . . . . . . . 5
            4 . . . . . . . . 4
            3 . . . . . . . . 3
            2 P P P P P P P P 2
            1 R N B Q K B N R 1
            a b c d e f g h"
        });
    }

    #[test]
    fn initial_board_in_pictograms() {
        let rendered = render_board(&Board::new(), &plain(PieceStyle::Unicode));
        let lines = rendered.lines().collect_vec();
        assert_eq!(lines.len(), 10);
        assert!(lines[1].contains('♜'));
        assert!(lines[8].contains('♔'));
    }
}
