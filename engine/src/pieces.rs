//! The catalog of the 21 polyominoes every seat starts with.

use std::str::FromStr;

use serde::Serialize;

use crate::error::EngineError;

/// Each piece in the catalog.
///
/// Variant names use the conventional letter names of the free polyominoes,
/// suffixed with the piece's size where letters repeat (`I3`, `I4`, `I5`).
/// [`Piece::name`] gives the names used in serialized actions.
///
/// The `u8` numeric representation is used as an index into inventories and
/// observations.
#[rustfmt::skip]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[repr(u8)]
pub enum Piece {
    Monomino,
    Domino,
    I3, V3,
    I4, L4, T4, O4, S4,
    I5, L5, Y5, N5, V5, U5, T5, P5, W5, Z5, F5, X5,
}

impl Piece {
    /// Number of pieces in the catalog.
    pub const COUNT: usize = 21;

    /// Array of all pieces, in catalog order.
    #[rustfmt::skip]
    pub const ALL: [Piece; Piece::COUNT] = [
        Piece::Monomino,
        Piece::Domino,
        Piece::I3, Piece::V3,
        Piece::I4, Piece::L4, Piece::T4, Piece::O4, Piece::S4,
        Piece::I5, Piece::L5, Piece::Y5, Piece::N5, Piece::V5, Piece::U5,
        Piece::T5, Piece::P5, Piece::W5, Piece::Z5, Piece::F5, Piece::X5,
    ];

    /// Name of a piece in serialized actions.
    pub fn name(self) -> &'static str {
        NAMES[self as usize]
    }

    /// Offsets of each cell of the piece facing east, relative to the
    /// reference cell.
    ///
    /// The first offset is always `(0, 0)`, the reference cell itself.
    pub fn cells(self) -> &'static [(i8, i8)] {
        CELLS[self as usize]
    }

    /// Number of cells in the piece.
    pub fn size(self) -> usize {
        self.cells().len()
    }

    /// Points scored for placing the piece: one per cell.
    pub fn value(self) -> u32 {
        self.size() as u32
    }

    pub fn from_index(index: usize) -> Option<Piece> {
        Piece::ALL.get(index).copied()
    }
}

impl TryFrom<&str> for Piece {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, ()> {
        match NAMES.iter().position(|&name| name == value) {
            Some(index) => Ok(Piece::ALL[index]),
            None => Err(()),
        }
    }
}

impl FromStr for Piece {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, EngineError> {
        Piece::try_from(s).map_err(|()| EngineError::MalformedAction(s.to_string()))
    }
}

static NAMES: [&str; Piece::COUNT] = [
    "monomino1",
    "domino1",
    "trominoe1",
    "trominoe2",
    "tetrominoes1",
    "tetrominoes2",
    "tetrominoes3",
    "tetrominoes4",
    "tetrominoes5",
    "pentominoe1",
    "pentominoe2",
    "pentominoe3",
    "pentominoe4",
    "pentominoe5",
    "pentominoe6",
    "pentominoe7",
    "pentominoe8",
    "pentominoe9",
    "pentominoe10",
    "pentominoe11",
    "pentominoe12",
];

/// Cell offsets of each piece facing east.
///
/// Indexed by [piece].  `x` increases to the right and `y` increases in the
/// direction of increasing board rows.
///
/// [piece]: Piece
static CELLS: [&[(i8, i8)]; Piece::COUNT] = [
    &[(0, 0)],                                  // monomino
    &[(0, 0), (1, 0)],                          // domino
    &[(0, 0), (1, 0), (2, 0)],                  // I3
    &[(0, 0), (1, 0), (0, 1)],                  // V3
    &[(0, 0), (1, 0), (2, 0), (3, 0)],          // I4
    &[(0, 0), (1, 0), (2, 0), (2, 1)],          // L4
    &[(0, 0), (1, 0), (2, 0), (1, 1)],          // T4
    &[(0, 0), (1, 0), (0, 1), (1, 1)],          // O4
    &[(0, 0), (1, 0), (1, 1), (2, 1)],          // S4
    &[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)],  // I5
    &[(0, 0), (1, 0), (2, 0), (3, 0), (3, 1)],  // L5
    &[(0, 0), (1, 0), (2, 0), (3, 0), (2, 1)],  // Y5
    &[(0, 0), (1, 0), (2, 0), (2, 1), (3, 1)],  // N5
    &[(0, 0), (1, 0), (2, 0), (0, 1), (0, 2)],  // V5
    &[(0, 0), (1, 0), (2, 0), (0, 1), (2, 1)],  // U5
    &[(0, 0), (1, 0), (2, 0), (1, 1), (1, 2)],  // T5
    &[(0, 0), (1, 0), (2, 0), (0, 1), (1, 1)],  // P5
    &[(0, 0), (1, 0), (1, 1), (2, 1), (2, 2)],  // W5
    &[(0, 0), (1, 0), (1, 1), (1, 2), (2, 2)],  // Z5
    &[(0, 0), (1, 0), (-1, 1), (0, 1), (0, 2)], // F5
    &[(0, 0), (-1, 0), (1, 0), (0, -1), (0, 1)], // X5
];
