//! Complete legal-move sets.

use std::collections::BTreeMap;

use ahash::AHashSet;
use serde::Serialize;

use crate::gameplay::{Board, Cell, Color};
use crate::inventory::PieceSet;
use crate::pieces::Piece;
use crate::placements::{candidate_cells, fits, Footprint, Placement, Placements};

/// A fully specified placement: which piece, where, and how.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Move {
    pub piece: Piece,
    pub anchor: Cell,
    pub placement: Placement,
}

/// Every legal move for one seat in one round.
///
/// Grouped by piece, then by anchor.  A piece appears only if it has at least
/// one legal placement, and an anchor only if some placement of the piece fits
/// there.  Iteration order is deterministic.
///
/// Sets are computed fresh for every query and never stored in game state.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ValidMoveSet(BTreeMap<Piece, BTreeMap<Cell, Vec<Placement>>>);

impl Move {
    /// Cells the move covers.
    pub fn cells(&self) -> Footprint {
        candidate_cells(
            self.piece,
            self.placement.orientation,
            self.anchor,
            self.placement.shift,
        )
    }
}

/// Cells where a `color` piece could be anchored.
///
/// In round 0 nothing has been placed, so the empty board corners are the
/// anchors.  Afterwards, every legal cell that touches `color` at a corner is
/// an anchor.
pub fn anchor_candidates(board: &Board, color: Color, round: u32) -> Vec<Cell> {
    if round == 0 {
        Board::CORNERS
            .into_iter()
            .filter(|&corner| board.is_empty(corner))
            .collect()
    } else {
        Board::cells()
            .filter(|&cell| board.is_legal_anchor(cell, color))
            .collect()
    }
}

/// Check a single move without generating the whole set.
///
/// Agrees exactly with membership in [`ValidMoveSet::generate`].
pub fn is_legal_move(board: &Board, color: Color, inventory: PieceSet, round: u32, m: &Move) -> bool {
    if !inventory.contains(m.piece) || m.placement.shift as usize >= m.piece.size() {
        return false;
    }

    let anchored = if round == 0 {
        Board::CORNERS.contains(&m.anchor) && board.is_empty(m.anchor)
    } else {
        board.is_legal_anchor(m.anchor, color)
    };

    anchored && fits(board, &m.cells(), color)
}

/// Check whether any legal move exists.  Stops at the first one found.
pub fn has_any_move(board: &Board, color: Color, inventory: PieceSet, round: u32) -> bool {
    Placements::new(board, color, inventory, round)
        .next()
        .is_some()
}

impl ValidMoveSet {
    /// Search every piece &times; anchor &times; orientation &times; shift.
    pub fn generate(board: &Board, color: Color, inventory: PieceSet, round: u32) -> ValidMoveSet {
        let set: ValidMoveSet = Placements::new(board, color, inventory, round).collect();

        tracing::trace!(
            color = color.name(),
            round,
            pieces = set.0.len(),
            moves = set.len(),
            "generated moves"
        );

        set
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct `(piece, anchor, placement)` moves.
    pub fn len(&self) -> usize {
        self.0
            .values()
            .flat_map(|anchors| anchors.values())
            .map(Vec::len)
            .sum()
    }

    pub fn contains(&self, m: &Move) -> bool {
        self.placements(m.piece, m.anchor).contains(&m.placement)
    }

    /// Pieces with at least one legal move, in catalog order.
    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.0.keys().copied()
    }

    /// Legal anchors for a piece.
    pub fn anchors(&self, piece: Piece) -> impl Iterator<Item = Cell> + '_ {
        self.0.get(&piece).into_iter().flat_map(|a| a.keys().copied())
    }

    /// Legal placements for a piece at an anchor.  Empty if there are none.
    pub fn placements(&self, piece: Piece, anchor: Cell) -> &[Placement] {
        self.0
            .get(&piece)
            .and_then(|anchors| anchors.get(&anchor))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = Move> + '_ {
        self.0.iter().flat_map(|(&piece, anchors)| {
            anchors.iter().flat_map(move |(&anchor, placements)| {
                placements.iter().map(move |&placement| Move {
                    piece,
                    anchor,
                    placement,
                })
            })
        })
    }

    /// The first move in iteration order.
    pub fn first(&self) -> Option<Move> {
        self.iter().next()
    }

    /// Distinct sets of covered cells, per piece.
    ///
    /// Different moves often cover the same cells: a monomino looks the same
    /// in every orientation, and a symmetric piece repeats itself under some
    /// rotations.
    pub fn distinct_footprints(&self) -> AHashSet<(Piece, Vec<Cell>)> {
        self.iter()
            .map(|m| {
                let mut cells = m.cells().into_vec();
                cells.sort_unstable();
                (m.piece, cells)
            })
            .collect()
    }
}

impl FromIterator<Move> for ValidMoveSet {
    fn from_iter<T: IntoIterator<Item = Move>>(iter: T) -> ValidMoveSet {
        let mut set = ValidMoveSet::default();
        set.extend(iter);
        set
    }
}

impl Extend<Move> for ValidMoveSet {
    fn extend<T: IntoIterator<Item = Move>>(&mut self, iter: T) {
        for m in iter {
            let placements = self
                .0
                .entry(m.piece)
                .or_default()
                .entry(m.anchor)
                .or_default();

            if !placements.contains(&m.placement) {
                placements.push(m.placement);
            }
        }
    }
}

/// Serialized as `{piece: {"(x,y)": ["orientationShift", ...]}}`.
impl Serialize for ValidMoveSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(piece, anchors)| {
            let anchors: BTreeMap<String, Vec<String>> = anchors
                .iter()
                .map(|(&(x, y), placements)| {
                    let placements = placements.iter().map(|p| p.to_string()).collect();
                    (format!("({},{})", x, y), placements)
                })
                .collect();
            (piece.name(), anchors)
        }))
    }
}

#[cfg(test)]
mod tests {
    use ahash::AHashSet;

    use crate::gameplay::{Board, Cell, Color, Orientation, SIZE};
    use crate::inventory::PieceSet;
    use crate::movegen::{anchor_candidates, has_any_move, is_legal_move, Move, ValidMoveSet};
    use crate::pieces::Piece;
    use crate::placements::{Placement, Placements};

    /// A mid-game position: each seat has played a few pieces from its
    /// corner.
    fn crowded_board() -> Board {
        let mut board = Board::empty();

        let moves: &[(Color, Piece, Cell, Orientation, u8)] = &[
            (Color::Red, Piece::X5, (1, 1), Orientation::East, 1),
            (Color::Red, Piece::I4, (3, 3), Orientation::East, 0),
            (Color::Blue, Piece::L5, (19, 0), Orientation::Southwest, 0),
            (Color::Blue, Piece::O4, (15, 2), Orientation::South, 0),
            (Color::Green, Piece::W5, (0, 19), Orientation::North, 0),
            (Color::Yellow, Piece::Z5, (19, 19), Orientation::West, 0),
            (Color::Yellow, Piece::Domino, (16, 16), Orientation::West, 0),
        ];

        for &(color, piece, anchor, orientation, shift) in moves {
            let m = Move {
                piece,
                anchor,
                placement: Placement::new(orientation, shift),
            };
            let cells = m.cells();
            assert!(
                cells.iter().all(|&c| board.is_legal_cell(c, color)),
                "setup move {:?} is illegal",
                m
            );
            board.commit(&cells, color);
        }

        board
    }

    /// Check a move against the rules directly, without the generator.
    fn legal_by_hand(board: &Board, color: Color, round: u32, m: &Move) -> bool {
        let cells = m.cells();

        let placeable = cells.iter().all(|&(x, y)| {
            if !(0..SIZE).contains(&x) || !(0..SIZE).contains(&y) {
                return false;
            }
            if board.0[y as usize][x as usize] != Color::None {
                return false;
            }
            [(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)]
                .iter()
                .all(|&(nx, ny)| board.get((nx, ny)) != Some(color))
        });

        let supported = if round == 0 {
            Board::CORNERS.contains(&m.anchor)
        } else {
            let (x, y) = m.anchor;
            [(x - 1, y - 1), (x + 1, y - 1), (x - 1, y + 1), (x + 1, y + 1)]
                .iter()
                .any(|&n| board.get(n) == Some(color))
        };

        placeable && supported
    }

    #[test]
    fn first_round_monomino() {
        let board = Board::empty();
        let inventory: PieceSet = [Piece::Monomino].iter().collect();
        let moves = ValidMoveSet::generate(&board, Color::Red, inventory, 0);

        let anchors: Vec<Cell> = moves.anchors(Piece::Monomino).collect();
        assert_eq!(anchors, [(0, 0), (0, 19), (19, 0), (19, 19)]);
        assert_eq!(moves.len(), 4 * 8 * 1);

        // every orientation of a monomino covers the same cell
        assert_eq!(moves.distinct_footprints().len(), 4);
    }

    #[test]
    fn taken_corners_are_not_anchors() {
        let mut board = Board::empty();
        board.commit(&[(0, 0)], Color::Red);
        board.commit(&[(19, 19)], Color::Blue);

        let anchors = anchor_candidates(&board, Color::Green, 0);
        assert_eq!(anchors, [(19, 0), (0, 19)]);
    }

    #[test]
    fn second_round_anchors() {
        let mut board = Board::empty();
        board.commit(&[(0, 0)], Color::Red);

        let anchors = anchor_candidates(&board, Color::Red, 1);
        assert_eq!(anchors, [(1, 1)]);

        let moves = ValidMoveSet::generate(&board, Color::Red, PieceSet::full(), 1);
        for piece in moves.pieces() {
            let anchors: Vec<Cell> = moves.anchors(piece).collect();
            assert_eq!(anchors, [(1, 1)]);
        }
        assert!(!moves.anchors(Piece::Monomino).any(|a| a == (0, 1) || a == (1, 0)));

        // blue has nothing on the board, so nothing to anchor to
        assert!(anchor_candidates(&board, Color::Blue, 1).is_empty());
        assert!(!has_any_move(&board, Color::Blue, PieceSet::full(), 1));
    }

    #[test]
    fn soundness() {
        let board = crowded_board();

        for color in Color::SEATS {
            let moves = ValidMoveSet::generate(&board, color, PieceSet::full(), 3);
            assert!(!moves.is_empty());

            for m in moves.iter() {
                let cells = m.cells();
                let mut after = board.clone();

                for &cell in &cells {
                    assert!(board.is_empty(cell), "{:?}", m);
                    assert!(!board.has_orthogonal_same_color(cell, color), "{:?}", m);
                }
                assert!(
                    cells
                        .iter()
                        .any(|&cell| board.touches_diagonal_same_color(cell, color)),
                    "{:?}",
                    m
                );

                after.commit(&cells, color);
                assert_eq!(after.count(color), board.count(color) + m.piece.size());
            }
        }
    }

    #[test]
    fn completeness() {
        let board = crowded_board();

        for color in Color::SEATS {
            let moves = ValidMoveSet::generate(&board, color, PieceSet::full(), 3);
            let mut found = 0;

            for piece in Piece::ALL {
                for anchor in Board::cells() {
                    for placement in Placement::all(piece) {
                        let m = Move {
                            piece,
                            anchor,
                            placement,
                        };
                        let by_hand = legal_by_hand(&board, color, 3, &m);

                        assert_eq!(moves.contains(&m), by_hand, "{:?} {:?}", color, m);
                        assert_eq!(
                            is_legal_move(&board, color, PieceSet::full(), 3, &m),
                            by_hand
                        );
                        found += by_hand as usize;
                    }
                }
            }

            assert_eq!(found, moves.len());
        }
    }

    #[test]
    fn completeness_first_round() {
        let mut board = Board::empty();
        board.commit(&[(0, 0), (1, 0)], Color::Red);

        let moves = ValidMoveSet::generate(&board, Color::Blue, PieceSet::full(), 0);
        let mut found = 0;

        for piece in Piece::ALL {
            for anchor in Board::cells() {
                for placement in Placement::all(piece) {
                    let m = Move {
                        piece,
                        anchor,
                        placement,
                    };
                    let by_hand = legal_by_hand(&board, Color::Blue, 0, &m);
                    assert_eq!(moves.contains(&m), by_hand, "{:?}", m);
                    assert_eq!(is_legal_move(&board, Color::Blue, PieceSet::full(), 0, &m), by_hand);
                    found += by_hand as usize;
                }
            }
        }

        assert_eq!(found, moves.len());
        assert!(!moves.anchors(Piece::Monomino).any(|a| a == (0, 0)));
    }

    #[test]
    fn omits_pieces_without_moves() {
        let mut board = Board::empty();

        // red owns (0, 0) and a wall of blue cells boxes in its only anchor
        board.commit(&[(0, 0)], Color::Red);
        board.commit(&[(2, 0), (2, 1), (0, 2), (1, 2), (2, 2)], Color::Blue);

        let moves = ValidMoveSet::generate(&board, Color::Red, PieceSet::full(), 1);
        let pieces: Vec<Piece> = moves.pieces().collect();
        assert_eq!(pieces, [Piece::Monomino]);
        assert_eq!(moves.placements(Piece::Monomino, (1, 1)).len(), 8);
        assert!(moves.placements(Piece::Domino, (1, 1)).is_empty());
    }

    #[test]
    fn agrees_with_has_any_move() {
        let board = crowded_board();

        for color in Color::SEATS {
            for piece in Piece::ALL {
                let inventory: PieceSet = [piece].iter().collect();
                let moves = ValidMoveSet::generate(&board, color, inventory, 3);
                assert_eq!(!moves.is_empty(), has_any_move(&board, color, inventory, 3));
            }
        }
    }

    #[test]
    fn lazy_and_full_agree() {
        let board = crowded_board();
        let lazy: AHashSet<Move> = Placements::new(&board, Color::Green, PieceSet::full(), 2).collect();
        let full = ValidMoveSet::generate(&board, Color::Green, PieceSet::full(), 2);

        assert_eq!(lazy.len(), full.len());
        assert!(full.iter().all(|m| lazy.contains(&m)));
        assert_eq!(full.first(), full.iter().next());
    }

    #[test]
    fn serialized_shape() {
        let board = Board::empty();
        let inventory: PieceSet = [Piece::Monomino].iter().collect();
        let moves = ValidMoveSet::generate(&board, Color::Red, inventory, 0);

        let json = serde_json::to_value(&moves).unwrap();
        let at_origin = &json["monomino1"]["(0,0)"];
        assert_eq!(at_origin.as_array().unwrap().len(), 8);
        assert_eq!(at_origin[0], "east0");
        assert_eq!(at_origin[7], "northwest0");
    }
}
