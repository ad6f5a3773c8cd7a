// Movement catalog: for every piece kind, the relative displacements it may make,
// together with the constraints attached to each of them.
//
// Tables are built once on first use and never mutated. Black's pawn table is a
// sign-mirrored copy of white's; every other kind shares a single table.

use enum_map::{EnumMap, enum_map};
use itertools::Itertools;
use lazy_static::lazy_static;

use crate::force::Force;
use crate::piece::PieceKind;


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Displacement {
    pub dx: i8,
    pub dy: i8,
    pub must_capture: bool,
    pub must_not_capture: bool,
    pub must_be_first_move: bool,
    pub must_be_castling: bool,
}

#[derive(Clone, Copy, Default, Debug)]
pub struct DisplacementFlags {
    pub must_capture: bool,
    pub must_not_capture: bool,
    pub must_be_first_move: bool,
    pub must_be_castling: bool,
}

impl Displacement {
    pub const fn plain(dx: i8, dy: i8) -> Self {
        Displacement {
            dx,
            dy,
            must_capture: false,
            must_not_capture: false,
            must_be_first_move: false,
            must_be_castling: false,
        }
    }

    #[track_caller]
    pub fn with_flags(dx: i8, dy: i8, flags: DisplacementFlags) -> Self {
        assert!(
            !(flags.must_capture && flags.must_not_capture),
            "Displacement ({dx}, {dy}) cannot both require and forbid capture"
        );
        Displacement {
            dx,
            dy,
            must_capture: flags.must_capture,
            must_not_capture: flags.must_not_capture,
            must_be_first_move: flags.must_be_first_move,
            must_be_castling: flags.must_be_castling,
        }
    }

    pub fn offset(&self) -> (i8, i8) { (self.dx, self.dy) }

    // Unit step along the displacement. Only meaningful for straight or diagonal lines.
    pub fn unit_step(&self) -> (i8, i8) { (self.dx.signum(), self.dy.signum()) }

    fn mirrored(&self) -> Self {
        Displacement { dx: -self.dx, dy: -self.dy, ..*self }
    }
}


fn straight_lines() -> Vec<Displacement> {
    let steps = (-7..=7).filter(|&i| i != 0).collect_vec();
    steps.iter().map(|&i| Displacement::plain(0, i))
        .chain(steps.iter().map(|&i| Displacement::plain(i, 0)))
        .collect()
}

fn diagonal_lines() -> Vec<Displacement> {
    let steps = (-7..=7).filter(|&i| i != 0).collect_vec();
    steps.iter().map(|&i| Displacement::plain(i, i))
        .chain(steps.iter().map(|&i| Displacement::plain(i, -i)))
        .collect()
}

fn knight_jumps() -> Vec<Displacement> {
    [(1, 2), (2, 1)].into_iter()
        .cartesian_product([(1, 1), (1, -1), (-1, 1), (-1, -1)])
        .map(|((dx, dy), (sx, sy))| Displacement::plain(dx * sx, dy * sy))
        .collect()
}

fn king_steps() -> Vec<Displacement> {
    let castling = DisplacementFlags { must_be_castling: true, ..Default::default() };
    (-1..=1).cartesian_product(-1..=1)
        .filter(|&(dx, dy)| (dx, dy) != (0, 0))
        .map(|(dx, dy)| Displacement::plain(dx, dy))
        .chain([
            Displacement::with_flags(2, 0, castling),
            Displacement::with_flags(-2, 0, castling),
        ])
        .collect()
}

// Written for white, which advances towards row 0.
fn white_pawn_moves() -> Vec<Displacement> {
    let push = DisplacementFlags { must_not_capture: true, ..Default::default() };
    let double_push = DisplacementFlags { must_be_first_move: true, ..push };
    let capture = DisplacementFlags { must_capture: true, ..Default::default() };
    vec![
        Displacement::with_flags(0, -1, push),
        Displacement::with_flags(0, -2, double_push),
        Displacement::with_flags(1, -1, capture),
        Displacement::with_flags(-1, -1, capture),
    ]
}

fn build_catalog() -> EnumMap<PieceKind, EnumMap<Force, Vec<Displacement>>> {
    let symmetric = |moves: Vec<Displacement>| enum_map! { _ => moves.clone() };
    let white_pawn = white_pawn_moves();
    let black_pawn = white_pawn.iter().map(Displacement::mirrored).collect_vec();
    enum_map! {
        PieceKind::Pawn => enum_map! {
            Force::White => white_pawn.clone(),
            Force::Black => black_pawn.clone(),
        },
        PieceKind::Rook => symmetric(straight_lines()),
        PieceKind::Bishop => symmetric(diagonal_lines()),
        PieceKind::Knight => symmetric(knight_jumps()),
        PieceKind::Queen => symmetric(straight_lines().into_iter().chain(diagonal_lines()).collect()),
        PieceKind::King => symmetric(king_steps()),
    }
}

lazy_static! {
    static ref CATALOG: EnumMap<PieceKind, EnumMap<Force, Vec<Displacement>>> = build_catalog();
}

pub fn displacements(kind: PieceKind, force: Force) -> &'static [Displacement] {
    &CATALOG[kind][force]
}
