use std::{fmt, ops};

use ndarray::{Array, Array2};
use scopeguard::ScopeGuard;
use serde::{Deserialize, Serialize};

use crate::coord::{Coord, NUM_COLS, NUM_ROWS};
use crate::force::Force;
use crate::piece::{PieceKind, PieceOnBoard};


// Fixed 8x8 grid. Each cell owns at most one piece.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    data: Array2<Option<PieceOnBoard>>,
}

impl Grid {
    pub fn new() -> Self {
        Grid {
            data: Array::from_elem((NUM_ROWS as usize, NUM_COLS as usize), None),
        }
    }

    pub fn is_free(&self, pos: Coord) -> bool { self[pos].is_none() }

    pub fn pieces(&self) -> impl Iterator<Item = (Coord, PieceOnBoard)> + '_ {
        Coord::all().filter_map(|pos| self[pos].map(|piece| (pos, piece)))
    }

    pub fn pieces_of(&self, force: Force) -> impl Iterator<Item = (Coord, PieceOnBoard)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.force == force)
    }

    pub fn count(&self, kind: PieceKind, force: Force) -> usize {
        self.pieces_of(force).filter(|(_, piece)| piece.kind == kind).count()
    }

    // Moves the piece without any bookkeeping. Returns the piece that stood on `to`.
    #[track_caller]
    pub fn relocate(&mut self, from: Coord, to: Coord) -> Option<PieceOnBoard> {
        let piece = self[from].take();
        assert!(piece.is_some(), "Relocating from an empty cell {from:?}");
        std::mem::replace(&mut self[to], piece)
    }

    // Relocates a piece for the lifetime of the returned guard. When the guard goes
    // out of scope (including during unwinding) the piece returns to `from` and
    // whatever stood on `to` is put back.
    #[track_caller]
    pub fn scoped_relocation<'a>(
        &'a mut self, from: Coord, to: Coord,
    ) -> ScopeGuard<&'a mut Self, impl FnOnce(&'a mut Self) + 'a> {
        let captured = self.relocate(from, to);
        scopeguard::guard(self, move |grid: &'a mut Self| {
            grid[from] = grid[to].take();
            grid[to] = captured;
        })
    }
}

impl Default for Grid {
    fn default() -> Self { Self::new() }
}

impl ops::Index<Coord> for Grid {
    type Output = Option<PieceOnBoard>;
    fn index(&self, pos: Coord) -> &Self::Output {
        &self.data[coord_to_index(pos)]
    }
}

impl ops::IndexMut<Coord> for Grid {
    fn index_mut(&mut self, pos: Coord) -> &mut Self::Output {
        &mut self.data[coord_to_index(pos)]
    }
}

fn coord_to_index(pos: Coord) -> [usize; 2] {
    [
        pos.row.to_zero_based() as usize,
        pos.col.to_zero_based() as usize,
    ]
}

fn debug_format_piece(piece: &PieceOnBoard) -> String {
    format!("{:?}-{:?}-{}", piece.force, piece.kind, piece.move_count())
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid ")?;
        f.debug_map()
            .entries(self.pieces().map(|(pos, piece)| (pos.to_algebraic(), debug_format_piece(&piece))))
            .finish()
    }
}
