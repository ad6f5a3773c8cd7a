use derive_new::new;
use enum_map::Enum;
use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::coord::Coord;
use crate::error::TurnError;
use crate::force::Force;
use crate::movement::{Displacement, displacements};


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Enum, EnumIter, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

// A piece standing on a board cell. The board owns it; moving the piece moves the value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, new, Serialize, Deserialize)]
pub struct PieceOnBoard {
    pub kind: PieceKind,
    pub force: Force,
    #[new(value = "0")]
    move_count: u32,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum CastleDirection {
    ASide,
    HSide,
}

impl PieceKind {
    pub fn to_full_algebraic(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub fn from_algebraic_char(notation: char) -> Option<Self> {
        match notation {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }

    pub fn can_jump_over_pieces(self) -> bool { self == PieceKind::Knight }

    pub fn is_promotable(self) -> bool { self == PieceKind::Pawn }

    pub fn displacements(self, force: Force) -> &'static [Displacement] {
        displacements(self, force)
    }
}

impl PieceOnBoard {
    pub fn with_move_count(kind: PieceKind, force: Force, move_count: u32) -> Self {
        PieceOnBoard { kind, force, move_count }
    }

    pub fn move_count(&self) -> u32 { self.move_count }

    pub fn has_moved(&self) -> bool { self.move_count != 0 }

    // Called once per relocation of this piece, castling legs included.
    pub fn increment_move_count(&mut self) { self.move_count += 1; }

    pub fn displacements(&self) -> &'static [Displacement] {
        self.kind.displacements(self.force)
    }

    pub fn get_move(&self, from: Coord, to: Coord) -> Result<Displacement, TurnError> {
        let offset = to - from;
        self.displacements()
            .iter()
            .rev()
            .find(|d| d.offset() == offset)
            .copied()
            .ok_or(TurnError::IllegalMoveShape)
    }

    // Uppercase for white, lowercase for black.
    pub fn display_letter(&self) -> char {
        let letter = self.kind.to_full_algebraic();
        match self.force {
            Force::White => letter,
            Force::Black => letter.to_ascii_lowercase(),
        }
    }

    pub fn pictogram(&self) -> char { piece_to_pictogram(self.kind, self.force) }
}

// Inverse of `PieceOnBoard::display_letter`.
pub fn piece_from_ascii(ch: char) -> Option<(PieceKind, Force)> {
    let force = if ch.is_ascii_uppercase() { Force::White } else { Force::Black };
    PieceKind::from_algebraic_char(ch.to_ascii_uppercase()).map(|kind| (kind, force))
}

pub fn piece_to_pictogram(piece_kind: PieceKind, force: Force) -> char {
    use self::Force::*;
    use self::PieceKind::*;
    match (force, piece_kind) {
        (White, Pawn) => '♙',
        (White, Knight) => '♘',
        (White, Bishop) => '♗',
        (White, Rook) => '♖',
        (White, Queen) => '♕',
        (White, King) => '♔',
        (Black, Pawn) => '♟',
        (Black, Knight) => '♞',
        (Black, Bishop) => '♝',
        (Black, Rook) => '♜',
        (Black, Queen) => '♛',
        (Black, King) => '♚',
    }
}
