//! Per-seat piece inventory and score bookkeeping.

use bitvec::prelude::*;
use serde::Serialize;

use crate::gameplay::Color;
use crate::pieces::Piece;

/// Bonus for playing every piece.
pub const ALL_PLAYED_BONUS: u32 = 15;

/// Bonus for playing every piece, with the monomino last.
pub const MONOMINO_LAST_BONUS: u32 = 20;

/// A set of pieces, one bit per [piece index].
///
/// Only the low 21 bits are ever set, so sets are passed by value.
///
/// [piece index]: Piece
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct PieceSet(BitArray<[u32; 1]>);

/// One seat's color, score, and unplayed pieces.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct PlayerInventory {
    pub color: Color,
    pub score: u32,
    pub remaining: PieceSet,
    /// The most recently placed piece, if any.
    pub last_played: Option<Piece>,
}

impl PieceSet {
    pub fn empty() -> PieceSet {
        PieceSet(BitArray::new([0]))
    }

    /// The whole catalog.
    pub fn full() -> PieceSet {
        Piece::ALL.iter().collect()
    }

    pub fn contains(self, piece: Piece) -> bool {
        self.0[piece as usize]
    }

    /// Remove a piece.  Returns whether it was present.
    pub fn remove(&mut self, piece: Piece) -> bool {
        self.0.replace(piece as usize, false)
    }

    pub fn insert(&mut self, piece: Piece) -> bool {
        !self.0.replace(piece as usize, true)
    }

    pub fn len(self) -> usize {
        self.0.count_ones()
    }

    pub fn is_empty(self) -> bool {
        self.0.not_any()
    }

    /// Pieces in the set, in catalog order.
    pub fn iter(self) -> impl Iterator<Item = Piece> {
        Piece::ALL.into_iter().filter(move |&p| self.contains(p))
    }

    /// The raw bitmap.  Bit `i` is set iff `Piece::ALL[i]` is in the set.
    pub fn bits(self) -> u32 {
        self.0.into_inner()[0]
    }
}

impl<P: std::borrow::Borrow<Piece>> FromIterator<P> for PieceSet {
    fn from_iter<T: IntoIterator<Item = P>>(iter: T) -> PieceSet {
        let mut set = PieceSet::empty();
        for piece in iter {
            set.insert(*piece.borrow());
        }
        set
    }
}

impl Serialize for PieceSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter().map(Piece::name))
    }
}

impl PlayerInventory {
    /// A seat at the start of the game: every piece, no points.
    pub fn new(color: Color) -> PlayerInventory {
        PlayerInventory {
            color,
            score: 0,
            remaining: PieceSet::full(),
            last_played: None,
        }
    }

    /// Take a piece out of the inventory and score it.
    ///
    /// Playing the final piece also scores [`MONOMINO_LAST_BONUS`] if that
    /// piece is the monomino, or [`ALL_PLAYED_BONUS`] otherwise.
    ///
    /// Returns `false`, and changes nothing, if the piece was already played.
    pub fn record_play(&mut self, piece: Piece) -> bool {
        if !self.remaining.remove(piece) {
            return false;
        }

        self.score += piece.value();
        self.last_played = Some(piece);

        if self.remaining.is_empty() {
            self.score += match piece {
                Piece::Monomino => MONOMINO_LAST_BONUS,
                _ => ALL_PLAYED_BONUS,
            };
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use crate::gameplay::Color;
    use crate::inventory::{PieceSet, PlayerInventory};
    use crate::pieces::Piece;

    #[test]
    fn full_set() {
        let set = PieceSet::full();
        assert_eq!(set.len(), 21);
        assert_eq!(set.bits(), (1 << 21) - 1);
        assert!(set.iter().eq(Piece::ALL.into_iter()));
    }

    #[test]
    fn remove_once() {
        let mut set = PieceSet::full();
        assert!(set.remove(Piece::T4));
        assert!(!set.remove(Piece::T4));
        assert!(!set.contains(Piece::T4));
        assert_eq!(set.len(), 20);
        assert_eq!(set.bits() & (1 << Piece::T4 as u32), 0);
    }

    #[test]
    fn scores_every_play() {
        let mut player = PlayerInventory::new(Color::Blue);
        let mut expected = 0;

        for piece in [Piece::X5, Piece::Domino, Piece::O4] {
            let before = player.remaining.len();
            assert!(player.record_play(piece));
            expected += piece.value();

            assert_eq!(player.score, expected);
            assert_eq!(player.remaining.len(), before - 1);
            assert_eq!(player.last_played, Some(piece));
        }

        assert!(!player.record_play(Piece::X5));
        assert_eq!(player.score, expected);
    }

    #[test]
    fn bonus_monomino_last() {
        let mut player = PlayerInventory::new(Color::Red);
        player.remaining = [Piece::Monomino].iter().collect();

        assert!(player.record_play(Piece::Monomino));
        assert_eq!(player.score, 1 + 20);
        assert!(player.remaining.is_empty());
    }

    #[test]
    fn bonus_other_last() {
        let mut player = PlayerInventory::new(Color::Red);
        player.remaining = [Piece::Domino].iter().collect();

        assert!(player.record_play(Piece::Domino));
        assert_eq!(player.score, 2 + 15);
    }

    #[test]
    fn bonus_once() {
        let mut player = PlayerInventory::new(Color::Green);

        for piece in Piece::ALL.iter().rev() {
            assert!(player.record_play(*piece));
        }

        // monomino came last
        assert_eq!(player.score, 89 + 20);
        assert!(!player.record_play(Piece::Monomino));
        assert_eq!(player.score, 89 + 20);
    }
}
