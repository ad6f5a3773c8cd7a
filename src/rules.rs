// Move validation and position evaluation. Everything here works on a bare `Grid`
// and never leaves it modified: simulated moves are undone before returning.

use std::iter;

use itertools::Itertools;

use crate::coord::Coord;
use crate::error::TurnError;
use crate::force::Force;
use crate::grid::Grid;
use crate::internal_error_message;
use crate::movement::Displacement;
use crate::piece::PieceKind;


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ValidationMode {
    // Regular move by the side to move.
    Normal,

    // Dry run: "could this piece capture on the target cell?" The target may be empty.
    // Turn order is not checked and non-capturing displacements never qualify.
    Attack,

    // Candidate reply while looking for a way out of check. Same rules as `Normal`
    // except that the mover is not required to be on turn.
    Escape,
}

pub fn coords_from_xy(from: (i8, i8), to: (i8, i8)) -> Result<(Coord, Coord), TurnError> {
    let from = Coord::from_xy(from.0, from.1).ok_or(TurnError::OutOfBounds)?;
    let to = Coord::from_xy(to.0, to.1).ok_or(TurnError::OutOfBounds)?;
    Ok((from, to))
}

// Checks a proposed move. The first violated rule wins. Returns the catalog entry
// that matched the move.
pub fn validate_move(
    grid: &Grid, active_force: Force, from: Coord, to: Coord, mode: ValidationMode,
) -> Result<Displacement, TurnError> {
    let dry_run = mode == ValidationMode::Attack;
    let piece = grid[from].ok_or(TurnError::EmptySource)?;
    let displacement = piece.get_move(from, to)?;
    if displacement.must_be_first_move && piece.has_moved() {
        return Err(TurnError::NotFirstMove);
    }

    let target = grid[to];
    if let Some(target) = target {
        if target.force == piece.force {
            return Err(TurnError::FriendlyFire);
        }
        // Only reachable from a custom position where the side not on move is in check.
        if !dry_run && target.kind == PieceKind::King {
            return Err(TurnError::KingCapture);
        }
    }
    if !dry_run && displacement.must_capture && target.is_none() {
        return Err(TurnError::NothingToCapture);
    }
    // Castling never captures, so it does not count as an attack either.
    let non_capturing = displacement.must_not_capture || displacement.must_be_castling;
    if non_capturing && (target.is_some() || dry_run) {
        return Err(TurnError::CannotCaptureThisWay);
    }

    if !piece.kind.can_jump_over_pieces() && !has_linear_passage(grid, from, to, &displacement) {
        return Err(TurnError::BlockedPath);
    }

    if mode == ValidationMode::Normal && piece.force != active_force {
        return Err(TurnError::WrongTurn);
    }
    Ok(displacement)
}

// Tests that cells between `from` (exclusive) and `to` (exclusive) are free.
fn has_linear_passage(grid: &Grid, from: Coord, to: Coord, displacement: &Displacement) -> bool {
    let step = displacement.unit_step();
    iter::successors(from.offset(step), |pos| pos.offset(step))
        .take_while(|&pos| pos != to)
        .all(|pos| grid.is_free(pos))
}

pub fn is_cell_under_attack(grid: &Grid, pos: Coord, attacker: Force) -> bool {
    grid.pieces_of(attacker).any(|(from, _)| {
        from != pos && validate_move(grid, attacker, from, pos, ValidationMode::Attack).is_ok()
    })
}

pub fn find_king(grid: &Grid, force: Force) -> Coord {
    let kings = grid
        .pieces_of(force)
        .filter(|(_, piece)| piece.kind == PieceKind::King)
        .map(|(pos, _)| pos)
        .collect_vec();
    match kings.as_slice() {
        [king_pos] => *king_pos,
        _ => panic!(
            "{}",
            internal_error_message!("expected one {force} king, found {}", kings.len())
        ),
    }
}

pub fn is_check(grid: &Grid, force: Force) -> bool {
    is_cell_under_attack(grid, find_king(grid, force), force.opponent())
}

// Whether moving `from` -> `to` would leave the mover's king attacked.
// Grid is guaranteed to be returned intact.
pub fn exposes_own_king(grid: &mut Grid, from: Coord, to: Coord) -> bool {
    let Some(piece) = grid[from] else {
        return false;
    };
    let probe = grid.scoped_relocation(from, to);
    is_check(&probe, piece.force)
}

// True iff no move by `force` gets its king out of attack. Castling is not probed:
// it is never allowed while in check.
// Grid is guaranteed to be returned intact.
pub fn is_mate(grid: &mut Grid, force: Force) -> bool {
    let pieces = grid.pieces_of(force).collect_vec();
    for (from, piece) in pieces {
        for displacement in piece.displacements() {
            if displacement.must_be_castling {
                continue;
            }
            let Some(to) = from.offset(displacement.offset()) else {
                continue;
            };
            if validate_move(grid, force, from, to, ValidationMode::Escape).is_err() {
                continue;
            }
            let probe = grid.scoped_relocation(from, to);
            if !is_check(&probe, force) {
                return false;
            }
        }
    }
    true
}

pub fn can_piece_move(grid: &Grid, active_force: Force, from: Coord) -> Result<bool, TurnError> {
    let piece = grid[from].ok_or(TurnError::EmptySource)?;
    // Castling has its own preconditions and is not considered here.
    Ok(piece.displacements().iter().filter(|d| !d.must_be_castling).any(|displacement| {
        from.offset(displacement.offset()).is_some_and(|to| {
            validate_move(grid, active_force, from, to, ValidationMode::Normal).is_ok()
        })
    }))
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::piece::PieceOnBoard;

    fn place(grid: &mut Grid, pos: Coord, kind: PieceKind, force: Force) {
        grid[pos] = Some(PieceOnBoard::new(kind, force));
    }

    fn kings_only() -> Grid {
        let mut grid = Grid::new();
        place(&mut grid, Coord::E1, PieceKind::King, Force::White);
        place(&mut grid, Coord::E8, PieceKind::King, Force::Black);
        grid
    }

    #[test]
    fn pawn_push_cannot_attack() {
        let mut grid = kings_only();
        place(&mut grid, Coord::D2, PieceKind::Pawn, Force::White);
        assert!(!is_cell_under_attack(&grid, Coord::D3, Force::White));
        assert!(is_cell_under_attack(&grid, Coord::C3, Force::White));
        assert!(is_cell_under_attack(&grid, Coord::E3, Force::White));
    }

    #[test]
    fn dry_run_does_not_need_a_victim() {
        let mut grid = kings_only();
        place(&mut grid, Coord::D2, PieceKind::Pawn, Force::White);
        let normal = validate_move(&grid, Force::White, Coord::D2, Coord::E3, ValidationMode::Normal);
        assert_eq!(normal, Err(TurnError::NothingToCapture));
        let dry = validate_move(&grid, Force::White, Coord::D2, Coord::E3, ValidationMode::Attack);
        assert!(dry.is_ok());
    }

    #[test]
    fn validation_order() {
        let mut grid = kings_only();
        place(&mut grid, Coord::A1, PieceKind::Rook, Force::Black);
        place(&mut grid, Coord::A2, PieceKind::Knight, Force::Black);
        // Blocked path is reported before wrong turn.
        assert_eq!(
            validate_move(&grid, Force::White, Coord::A1, Coord::A5, ValidationMode::Normal),
            Err(TurnError::BlockedPath)
        );
        // Friendly fire is reported before blocked path.
        assert_eq!(
            validate_move(&grid, Force::White, Coord::A1, Coord::A2, ValidationMode::Normal),
            Err(TurnError::FriendlyFire)
        );
        assert_eq!(
            validate_move(&grid, Force::White, Coord::A2, Coord::B4, ValidationMode::Normal),
            Err(TurnError::WrongTurn)
        );
        assert!(validate_move(&grid, Force::White, Coord::A2, Coord::B4, ValidationMode::Escape).is_ok());
    }

    #[test]
    fn king_does_not_attack_through_castling_shape() {
        // Deliberate: a castling shape is never a capture, so it never threatens a cell.
        let grid = kings_only();
        assert!(!is_cell_under_attack(&grid, Coord::G1, Force::White));
        assert!(is_cell_under_attack(&grid, Coord::F1, Force::White));
    }

    #[test]
    fn king_cannot_be_captured() {
        let mut grid = kings_only();
        place(&mut grid, Coord::E4, PieceKind::Rook, Force::White);
        assert_eq!(
            validate_move(&grid, Force::White, Coord::E4, Coord::E8, ValidationMode::Normal),
            Err(TurnError::KingCapture)
        );
        assert_eq!(
            validate_move(&grid, Force::Black, Coord::E4, Coord::E8, ValidationMode::Escape),
            Err(TurnError::KingCapture)
        );
        assert!(is_cell_under_attack(&grid, Coord::E8, Force::White));
        assert!(is_check(&grid, Force::Black));
    }

    #[test]
    fn out_of_bounds_pairs() {
        assert_eq!(coords_from_xy((0, 0), (0, 8)), Err(TurnError::OutOfBounds));
        assert_eq!(coords_from_xy((-1, 0), (0, 1)), Err(TurnError::OutOfBounds));
        assert_eq!(coords_from_xy((4, 6), (4, 4)), Ok((Coord::E2, Coord::E4)));
    }

    #[test]
    fn protected_piece_is_not_attacked_by_own_side() {
        let mut grid = kings_only();
        place(&mut grid, Coord::D1, PieceKind::Queen, Force::White);
        place(&mut grid, Coord::D4, PieceKind::Knight, Force::White);
        assert!(!is_cell_under_attack(&grid, Coord::D4, Force::White));
        assert!(is_cell_under_attack(&grid, Coord::D3, Force::White));
    }

    #[test]
    fn rook_check_and_escape() {
        let mut grid = kings_only();
        place(&mut grid, Coord::E5, PieceKind::Rook, Force::Black);
        assert!(is_check(&grid, Force::White));
        assert!(!is_mate(&mut grid, Force::White));
        assert!(!is_check(&grid, Force::Black));
    }

    #[test]
    fn mate_probe_leaves_grid_intact() {
        let mut grid = kings_only();
        place(&mut grid, Coord::E5, PieceKind::Rook, Force::Black);
        place(&mut grid, Coord::D2, PieceKind::Pawn, Force::White);
        let before = grid.clone();
        is_mate(&mut grid, Force::White);
        is_mate(&mut grid, Force::Black);
        assert_eq!(grid, before);
    }

    #[test]
    fn exposing_king_is_detected() {
        let mut grid = kings_only();
        place(&mut grid, Coord::E2, PieceKind::Bishop, Force::White);
        place(&mut grid, Coord::E6, PieceKind::Rook, Force::Black);
        let before = grid.clone();
        assert!(exposes_own_king(&mut grid, Coord::E2, Coord::D3));
        assert!(!exposes_own_king(&mut grid, Coord::E1, Coord::D1));
        assert_eq!(grid, before);
    }

    #[test]
    #[should_panic(expected = "Internal error")]
    fn missing_king_is_fatal() {
        let grid = Grid::new();
        find_king(&grid, Force::White);
    }
}
