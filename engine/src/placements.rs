//! Enumerate the cells a piece would cover, and every legal placement.

use smallvec::SmallVec;

use crate::gameplay::{Board, Cell, Color, Orientation};
use crate::inventory::PieceSet;
use crate::movegen::{anchor_candidates, Move};
use crate::pieces::Piece;

/// Cells covered by one placed piece.  No piece has more than five cells.
pub type Footprint = SmallVec<[Cell; 5]>;

/// How a piece is laid over its anchor: an orientation, plus which cell of
/// the piece sits on the anchor.
///
/// `shift` indexes [`Piece::cells`].  Shift 0 puts the reference cell on the
/// anchor.
///
/// This type is `Copy` because it is intended to be cheap to use.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Placement {
    pub orientation: Orientation,
    pub shift: u8,
}

impl Placement {
    pub fn new(orientation: Orientation, shift: u8) -> Placement {
        Placement { orientation, shift }
    }

    /// Every placement of a piece: each orientation with each shift.
    pub fn all(piece: Piece) -> impl Iterator<Item = Placement> {
        Orientation::ALL.into_iter().flat_map(move |orientation| {
            (0..piece.size() as u8).map(move |shift| Placement { orientation, shift })
        })
    }
}

/// Re-base a piece's offsets so that cell number `shift` is the origin.
///
/// Requires `shift < piece.size()`.
pub fn shifted_offsets(piece: Piece, shift: u8) -> SmallVec<[(i8, i8); 5]> {
    let cells = piece.cells();
    let (sx, sy) = cells[shift as usize];

    cells.iter().map(|&(dx, dy)| (dx - sx, dy - sy)).collect()
}

/// Cells covered by a piece with the given placement about `anchor`.
///
/// The shifted cell always lands on `anchor`.  Cells may be out of bounds.
pub fn candidate_cells(piece: Piece, orientation: Orientation, anchor: Cell, shift: u8) -> Footprint {
    shifted_offsets(piece, shift)
        .into_iter()
        .map(|offset| orientation.apply(anchor, offset))
        .collect()
}

/// Check that every cell of a footprint is in bounds, empty, and not
/// edge-adjacent to `color`.
pub fn fits(board: &Board, cells: &[Cell], color: Color) -> bool {
    cells.iter().all(|&cell| board.is_legal_cell(cell, color))
}

/// Iterator over every legal move for one seat.
///
/// Moves come out grouped by piece (catalog order), then anchor, then
/// orientation, then shift.  Nothing is computed until it is asked for, so
/// taking just the first move is cheap.
pub struct Placements<'a> {
    board: &'a Board,
    color: Color,
    pieces: SmallVec<[Piece; 21]>,
    anchors: Vec<Cell>,
    piece: usize,
    anchor: usize,
    variant: usize,
}

impl<'a> Placements<'a> {
    pub fn new(board: &'a Board, color: Color, inventory: PieceSet, round: u32) -> Placements<'a> {
        Placements {
            board,
            color,
            pieces: inventory.iter().collect(),
            anchors: anchor_candidates(board, color, round),
            piece: 0,
            anchor: 0,
            variant: 0,
        }
    }
}

impl<'a> Iterator for Placements<'a> {
    type Item = Move;

    fn next(&mut self) -> Option<Move> {
        loop {
            let piece = *self.pieces.get(self.piece)?;

            let Some(&anchor) = self.anchors.get(self.anchor) else {
                self.piece += 1;
                self.anchor = 0;
                continue;
            };

            let size = piece.size();
            if self.variant >= Orientation::ALL.len() * size {
                self.anchor += 1;
                self.variant = 0;
                continue;
            }

            let placement = Placement {
                orientation: Orientation::ALL[self.variant / size],
                shift: (self.variant % size) as u8,
            };
            self.variant += 1;

            let cells = candidate_cells(piece, placement.orientation, anchor, placement.shift);
            if fits(self.board, &cells, self.color) {
                return Some(Move {
                    piece,
                    anchor,
                    placement,
                });
            }
        }
    }
}
