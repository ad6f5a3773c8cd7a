use std::fmt;
use std::ops;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::force::Force;


pub const NUM_ROWS: u8 = 8;
pub const NUM_COLS: u8 = 8;


const fn const_char_sub(a: char, b: char) -> u8 {
    let a_idx = a as u32;
    let b_idx = b as u32;
    assert!(a_idx >= b_idx);
    let diff = a_idx - b_idx;
    assert!(diff <= u8::MAX as u32);
    diff as u8
}


// Row from a force's point of view: row 1 is the force's back rank.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct SubjectiveRow {
    idx: u8,  // 0-based
}

impl SubjectiveRow {
    pub fn from_zero_based(idx: u8) -> Self {
        assert!(idx < NUM_ROWS);
        Self { idx }
    }
    pub fn from_one_based(idx: u8) -> Self {
        assert!(idx >= 1);
        Self::from_zero_based(idx - 1)
    }
    pub fn to_row(self, force: Force) -> Row {
        match force {
            Force::White => Row::from_zero_based(NUM_ROWS - self.idx - 1),
            Force::Black => Row::from_zero_based(self.idx),
        }
    }
    pub fn from_row(row: Row, force: Force) -> Self {
        match force {
            Force::White => Self::from_zero_based(NUM_ROWS - row.idx - 1),
            Force::Black => Self::from_zero_based(row.idx),
        }
    }
}


// Rows are counted from the top of the printed board: row 0 is rank 8.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Row {
    idx: u8,  // 0-based
}

impl Row {
    pub const fn from_zero_based(idx: u8) -> Self {
        assert!(idx < NUM_ROWS);
        Self { idx }
    }
    pub const fn from_algebraic(rank: char) -> Self {
        Self::from_zero_based(const_char_sub('8', rank))
    }
    pub const fn to_zero_based(self) -> u8 { self.idx }
    pub const fn to_algebraic(self) -> char { ('8' as u8 - self.idx) as char }
    pub fn all() -> impl DoubleEndedIterator<Item = Self> + Clone {
        (0..NUM_ROWS).map(Self::from_zero_based)
    }
}

impl ops::Sub for Row {
    type Output = i8;
    fn sub(self, other: Self) -> Self::Output {
        (self.to_zero_based() as i8) - (other.to_zero_based() as i8)
    }
}


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Col {
    idx: u8,  // 0-based
}

impl Col {
    pub const fn from_zero_based(idx: u8) -> Col {
        assert!(idx < NUM_COLS);
        Col { idx }
    }
    pub const fn from_algebraic(file: char) -> Self {
        Self::from_zero_based(const_char_sub(file, 'a'))
    }
    pub const fn to_zero_based(self) -> u8 { self.idx }
    pub const fn to_algebraic(self) -> char { (self.idx + 'a' as u8) as char }
    pub fn all() -> impl DoubleEndedIterator<Item = Self> + Clone {
        (0..NUM_COLS).map(Self::from_zero_based)
    }
}

impl ops::Sub for Col {
    type Output = i8;
    fn sub(self, other: Self) -> Self::Output {
        (self.to_zero_based() as i8) - (other.to_zero_based() as i8)
    }
}


// A cell on the board. `x` is the file (A..H), `y` the row as printed (0 = rank 8).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: Row,
    pub col: Col,
}

impl Coord {
    pub const fn new(row: Row, col: Col) -> Self {
        Self { row, col }
    }
    pub fn from_xy(x: i8, y: i8) -> Option<Self> {
        let col = u8::try_from(x).ok().filter(|&x| x < NUM_COLS)?;
        let row = u8::try_from(y).ok().filter(|&y| y < NUM_ROWS)?;
        Some(Self::new(Row::from_zero_based(row), Col::from_zero_based(col)))
    }
    pub fn x(self) -> i8 { self.col.to_zero_based() as i8 }
    pub fn y(self) -> i8 { self.row.to_zero_based() as i8 }
    pub fn to_xy(self) -> (i8, i8) { (self.x(), self.y()) }
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let (file, rank) = s.chars().collect_tuple()?;
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }
        Some(Self::new(Row::from_algebraic(rank), Col::from_algebraic(file)))
    }
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.col.to_algebraic(), self.row.to_algebraic())
    }
    // Row-major, starting from the top-left cell (a8).
    pub fn all() -> impl Iterator<Item = Coord> {
        Row::all().cartesian_product(Col::all()).map(|(row, col)| Coord { row, col })
    }
    pub fn offset(self, (dx, dy): (i8, i8)) -> Option<Self> {
        Self::from_xy(self.x() + dx, self.y() + dy)
    }
}

// Displacement from `other` to `self` as `(dx, dy)`.
impl ops::Sub for Coord {
    type Output = (i8, i8);
    fn sub(self, other: Self) -> Self::Output {
        (self.col - other.col, self.row - other.row)
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coord({})", self.to_algebraic())
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}


impl Row {
    #![allow(dead_code)]
    pub const _1: Row = Row::from_algebraic('1');
    pub const _2: Row = Row::from_algebraic('2');
    pub const _3: Row = Row::from_algebraic('3');
    pub const _4: Row = Row::from_algebraic('4');
    pub const _5: Row = Row::from_algebraic('5');
    pub const _6: Row = Row::from_algebraic('6');
    pub const _7: Row = Row::from_algebraic('7');
    pub const _8: Row = Row::from_algebraic('8');
}

impl Col {
    #![allow(dead_code)]
    pub const A: Col = Col::from_algebraic('a');
    pub const B: Col = Col::from_algebraic('b');
    pub const C: Col = Col::from_algebraic('c');
    pub const D: Col = Col::from_algebraic('d');
    pub const E: Col = Col::from_algebraic('e');
    pub const F: Col = Col::from_algebraic('f');
    pub const G: Col = Col::from_algebraic('g');
    pub const H: Col = Col::from_algebraic('h');
}

macro_rules! named_squares {
    ($($name:ident: $col:ident $row:ident),* $(,)?) => {
        impl Coord {
            $(pub const $name: Coord = Coord::new(Row::$row, Col::$col);)*
        }
    };
}

named_squares! {
    A1: A _1, A2: A _2, A3: A _3, A4: A _4, A5: A _5, A6: A _6, A7: A _7, A8: A _8,
    B1: B _1, B2: B _2, B3: B _3, B4: B _4, B5: B _5, B6: B _6, B7: B _7, B8: B _8,
    C1: C _1, C2: C _2, C3: C _3, C4: C _4, C5: C _5, C6: C _6, C7: C _7, C8: C _8,
    D1: D _1, D2: D _2, D3: D _3, D4: D _4, D5: D _5, D6: D _6, D7: D _7, D8: D _8,
    E1: E _1, E2: E _2, E3: E _3, E4: E _4, E5: E _5, E6: E _6, E7: E _7, E8: E _8,
    F1: F _1, F2: F _2, F3: F _3, F4: F _4, F5: F _5, F6: F _6, F7: F _7, F8: F _8,
    G1: G _1, G2: G _2, G3: G _3, G4: G _4, G5: G _5, G6: G _6, G7: G _7, G8: G _8,
    H1: H _1, H2: H _2, H3: H _3, H4: H _4, H5: H _5, H6: H _6, H7: H _7, H8: H _8,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printed_rows_start_from_rank_eight() {
        assert_eq!(Coord::A8.to_xy(), (0, 0));
        assert_eq!(Coord::H1.to_xy(), (7, 7));
        assert_eq!(Coord::E2.to_xy(), (4, 6));
        assert_eq!(Coord::from_algebraic("e2"), Some(Coord::E2));
    }

    #[test]
    fn raw_pairs_outside_board_are_rejected() {
        assert_eq!(Coord::from_xy(-1, 0), None);
        assert_eq!(Coord::from_xy(0, 8), None);
        assert_eq!(Coord::from_xy(8, 3), None);
        assert_eq!(Coord::from_xy(3, 4), Some(Coord::D4));
        assert_eq!(Coord::H8.offset((1, 0)), None);
    }

    #[test]
    fn subjective_rows() {
        assert_eq!(SubjectiveRow::from_one_based(1).to_row(Force::White), Row::_1);
        assert_eq!(SubjectiveRow::from_one_based(1).to_row(Force::Black), Row::_8);
        assert_eq!(SubjectiveRow::from_one_based(7).to_row(Force::White), Row::_7);
        assert_eq!(SubjectiveRow::from_row(Row::_2, Force::Black), SubjectiveRow::from_one_based(7));
    }

    #[test]
    fn difference_is_dx_dy() {
        assert_eq!(Coord::E4 - Coord::E2, (0, -2));
        assert_eq!(Coord::G1 - Coord::E1, (2, 0));
    }
}
