use crate::coord::{Col, Coord, NUM_ROWS, Row};
use crate::force::Force;
use crate::grid::Grid;
use crate::piece::{PieceKind, PieceOnBoard};


pub const STARTING_PIECE_ROW: [PieceKind; 8] = {
    use PieceKind::*;
    [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook]
};

fn new_white(kind: PieceKind) -> PieceOnBoard {
    PieceOnBoard::new(kind, Force::White)
}

fn setup_white_pawns_on_2nd_row(grid: &mut Grid) {
    for col in Col::all() {
        grid[Coord::new(Row::_2, col)] = Some(new_white(PieceKind::Pawn));
    }
}

fn setup_black_pieces_mirrorlike(grid: &mut Grid) {
    for (coord, piece) in grid.pieces_of(Force::White).collect::<Vec<_>>() {
        let mirror_row = Row::from_zero_based(NUM_ROWS - coord.row.to_zero_based() - 1);
        let mirror_coord = Coord::new(mirror_row, coord.col);
        assert!(grid[mirror_coord].is_none(), "{:?}", grid);
        grid[mirror_coord] = Some(PieceOnBoard::new(piece.kind, Force::Black));
    }
}

pub fn generate_starting_grid() -> Grid {
    let mut grid = Grid::new();
    for (col, kind) in Col::all().zip(STARTING_PIECE_ROW) {
        grid[Coord::new(Row::_1, col)] = Some(new_white(kind));
    }
    setup_white_pawns_on_2nd_row(&mut grid);
    setup_black_pieces_mirrorlike(&mut grid);
    grid
}
