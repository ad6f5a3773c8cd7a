use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::coord::{Col, Coord, SubjectiveRow};
use crate::error::TurnError;
use crate::force::Force;
use crate::grid::Grid;
use crate::internal_error_message;
use crate::movement::Displacement;
use crate::piece::{CastleDirection, PieceKind, PieceOnBoard};
use crate::rules::{self, ValidationMode};
use crate::starter::generate_starting_grid;
use crate::util::sort_two;


#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum GameStatus {
    Active,
    Victory(Force),
}

// Position evaluation reported after every applied move.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveStatus {
    Normal,
    Check(Force),      // force in check
    Checkmate(Force),  // winner
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TurnKind {
    Move,
    Castle(CastleDirection),
    Promotion,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TurnOutcome {
    pub kind: TurnKind,
    pub status: MoveStatus,
    pub capture: Option<PieceOnBoard>,
}

// Authoritative game state. `total_moves` doubles as the turn indicator: white
// moves when it is even, black when it is odd. Use `active_force` to read it.
#[derive(Clone, Debug)]
pub struct Board {
    grid: Grid,
    total_moves: u32,
    status: GameStatus,
}

impl Board {
    pub fn new() -> Board {
        Self::new_from_grid(generate_starting_grid(), 0)
    }

    #[track_caller]
    pub fn new_from_grid(grid: Grid, total_moves: u32) -> Board {
        for force in [Force::White, Force::Black] {
            assert_eq!(grid.count(PieceKind::King, force), 1, "Need exactly one {force} king");
        }
        Board { grid, total_moves, status: GameStatus::Active }
    }

    pub fn grid(&self) -> &Grid { &self.grid }
    pub fn total_moves(&self) -> u32 { self.total_moves }
    pub fn status(&self) -> GameStatus { self.status }
    pub fn active_force(&self) -> Force { Force::to_move_after(self.total_moves) }

    // All 64 cells, row by row from the top-left corner, for rendering.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, Option<PieceOnBoard>)> + '_ {
        Coord::all().map(|pos| (pos, self.grid[pos]))
    }

    pub fn validate_move(
        &self, from: (i8, i8), to: (i8, i8), mode: ValidationMode,
    ) -> Result<Displacement, TurnError> {
        let (from, to) = rules::coords_from_xy(from, to)?;
        rules::validate_move(&self.grid, self.active_force(), from, to, mode)
    }

    pub fn is_cell_under_attack(&self, x: i8, y: i8, attacker: Force) -> bool {
        Coord::from_xy(x, y).is_some_and(|pos| rules::is_cell_under_attack(&self.grid, pos, attacker))
    }

    pub fn is_check(&self, force: Force) -> bool { rules::is_check(&self.grid, force) }

    // Probes every move of `force`; the board is unchanged afterwards.
    pub fn is_mate(&mut self, force: Force) -> bool { rules::is_mate(&mut self.grid, force) }

    pub fn can_piece_move(&self, x: i8, y: i8) -> Result<bool, TurnError> {
        let pos = Coord::from_xy(x, y).ok_or(TurnError::OutOfBounds)?;
        rules::can_piece_move(&self.grid, self.active_force(), pos)
    }

    // Applies a move given as two raw (x, y) pairs: castling, promotion or a plain move.
    pub fn try_turn(&mut self, from: (i8, i8), to: (i8, i8)) -> Result<TurnOutcome, TurnError> {
        let result = self.try_turn_impl(from, to);
        if let Err(err) = result {
            debug!("Rejected {from:?} -> {to:?}: {err}");
        }
        result
    }

    fn try_turn_impl(&mut self, from: (i8, i8), to: (i8, i8)) -> Result<TurnOutcome, TurnError> {
        if self.status != GameStatus::Active {
            return Err(TurnError::GameOver);
        }
        let (from, to) = rules::coords_from_xy(from, to)?;
        let mover = self.active_force();
        let (kind, capture) = if let Some(direction) = self.try_castle(from, to)? {
            (TurnKind::Castle(direction), None)
        } else if let Some(capture) = self.try_promote(from, to)? {
            (TurnKind::Promotion, capture)
        } else {
            (TurnKind::Move, self.make_move(from, to, true)?)
        };
        let status = self.evaluate_after_move(mover);
        Ok(TurnOutcome { kind, status, capture })
    }

    fn evaluate_after_move(&mut self, mover: Force) -> MoveStatus {
        let defender = mover.opponent();
        if !self.is_check(defender) {
            return MoveStatus::Normal;
        }
        if self.is_mate(defender) {
            info!("Checkmate to the {defender} king, {mover} wins");
            self.status = GameStatus::Victory(mover);
            MoveStatus::Checkmate(mover)
        } else {
            info!("Check to the {defender} king");
            MoveStatus::Check(defender)
        }
    }

    // The only relocation primitive. With `validate` the move must pass validation and
    // must not leave the mover's king attacked; without it the caller vouches for legality.
    // Returns the captured piece, if any.
    pub fn make_move(
        &mut self, from: Coord, to: Coord, validate: bool,
    ) -> Result<Option<PieceOnBoard>, TurnError> {
        if validate {
            rules::validate_move(&self.grid, self.active_force(), from, to, ValidationMode::Normal)?;
            if rules::exposes_own_king(&mut self.grid, from, to) {
                return Err(TurnError::UnprotectedKing);
            }
        }
        let capture = self.grid.relocate(from, to);
        let Some(piece) = self.grid[to].as_mut() else {
            panic!("{}", internal_error_message!("piece vanished on {from:?} -> {to:?}"));
        };
        piece.increment_move_count();
        self.total_moves += 1;
        debug!("Moved {:?} {from} -> {to}, capture: {capture:?}", piece.kind);
        Ok(capture)
    }

    // Promotes a pawn leaving the second-to-last rank of its force. Returns `None`
    // if the move is not a promotion, otherwise the captured piece (if any).
    pub fn try_promote(
        &mut self, from: Coord, to: Coord,
    ) -> Result<Option<Option<PieceOnBoard>>, TurnError> {
        let Some(pawn) = self.grid[from] else {
            return Ok(None);
        };
        let pre_promotion_row = SubjectiveRow::from_one_based(7);
        if !pawn.kind.is_promotable() || SubjectiveRow::from_row(from.row, pawn.force) != pre_promotion_row {
            return Ok(None);
        }
        let capture = self.make_move(from, to, true)?;
        self.grid[to] = Some(PieceOnBoard::with_move_count(
            PieceKind::Queen,
            pawn.force,
            pawn.move_count() + 1,
        ));
        info!("{} pawn promoted to queen on {to}", pawn.force);
        Ok(Some(capture))
    }

    // Castling is recognised only through the king's two castling displacements.
    // Returns `None` if the move is not a castling attempt. Besides the castling
    // errors this may return `WrongTurn` (checked first) and `BlockedPath` when a
    // piece stands between the king and the rook, e.g. on the b-file.
    pub fn try_castle(&mut self, from: Coord, to: Coord) -> Result<Option<CastleDirection>, TurnError> {
        let Some(king) = self.grid[from] else {
            return Ok(None);
        };
        let Ok(displacement) = king.get_move(from, to) else {
            return Ok(None);
        };
        if !displacement.must_be_castling {
            return Ok(None);
        }
        let force = king.force;
        let opponent = force.opponent();
        if force != self.active_force() {
            return Err(TurnError::WrongTurn);
        }
        if rules::is_cell_under_attack(&self.grid, from, opponent) {
            return Err(TurnError::CastlingWhileInCheck);
        }
        let sign = displacement.dx.signum();
        for step in 1..=displacement.dx.abs() {
            let pos = from.offset((sign * step, 0)).ok_or(TurnError::OutOfBounds)?;
            if rules::is_cell_under_attack(&self.grid, pos, opponent) || !self.grid.is_free(pos) {
                return Err(TurnError::CastlingPathUnsafe);
            }
        }
        if king.has_moved() {
            return Err(TurnError::KingAlreadyMoved);
        }

        let (direction, rook_col) = if sign > 0 {
            (CastleDirection::HSide, Col::H)
        } else {
            (CastleDirection::ASide, Col::A)
        };
        let rook_from = Coord::new(from.row, rook_col);
        let rook = self.grid[rook_from]
            .filter(|piece| piece.kind == PieceKind::Rook)
            .ok_or(TurnError::InvalidCastlingRook)?;
        if rook.force != force {
            return Err(TurnError::EnemyRook);
        }
        if rook.has_moved() {
            return Err(TurnError::RookAlreadyMoved);
        }
        let (first_col, last_col) = sort_two((from.col, rook_col));
        let rook_passage_free = Col::all()
            .filter(|&col| col > first_col && col < last_col)
            .all(|col| self.grid.is_free(Coord::new(from.row, col)));
        if !rook_passage_free {
            return Err(TurnError::BlockedPath);
        }

        let rook_to = to.offset((-sign, 0)).ok_or(TurnError::OutOfBounds)?;
        self.make_move(from, to, false)?;
        self.make_move(rook_from, rook_to, false)?;
        info!("{force} castled {direction:?}");
        Ok(Some(direction))
    }
}

impl Default for Board {
    fn default() -> Self { Self::new() }
}
