//! Move choosers.  The engine never depends on what kind of player is
//! sitting at a seat; drivers hand each seat's agent the legal moves and get
//! one back.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;

use crate::gameplay::Orientation;
use crate::movegen::{Move, ValidMoveSet};
use crate::pieces::Piece;
use crate::placements::Placement;

pub trait Agent {
    /// Choose one of the legal moves.
    ///
    /// Requirements:
    /// - `moves` is not empty.
    /// - The returned move must be in `moves`, unless the agent has quit.
    fn choose_move(&mut self, moves: &ValidMoveSet) -> Move;

    /// Whether the agent has left the game.  Once true, the move it last
    /// returned should be ignored and it should not be asked again.
    fn has_quit(&self) -> bool {
        false
    }
}

/// The first legal move.
///
/// Agents are never asked to choose from an empty set.  If one is, the result
/// is an off-board placement that [`GameState::apply`] rejects.
///
/// [`GameState::apply`]: crate::state::GameState::apply
pub fn first_legal(moves: &ValidMoveSet) -> Move {
    debug_assert!(!moves.is_empty(), "no legal moves to choose from");

    moves.first().unwrap_or(Move {
        piece: Piece::Monomino,
        anchor: (-1, -1),
        placement: Placement::new(Orientation::East, 0),
    })
}

/// Picks a random piece, then a random anchor for it, then a random
/// placement at that anchor.
///
/// Small pieces and big pieces are equally likely, however many placements
/// each has.
#[derive(Clone, Debug)]
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(seed: u64) -> RandomAgent {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn choose_move(&mut self, moves: &ValidMoveSet) -> Move {
        let chosen = moves.pieces().choose(&mut self.rng).and_then(|piece| {
            let anchor = moves.anchors(piece).choose(&mut self.rng)?;
            let placement = moves
                .placements(piece, anchor)
                .iter()
                .copied()
                .choose(&mut self.rng)?;

            Some(Move {
                piece,
                anchor,
                placement,
            })
        });

        chosen.unwrap_or_else(|| first_legal(moves))
    }
}

/// Plays a fixed list of moves in order.
///
/// If the next scripted move is not legal, or the script has run out, the
/// first legal move is played instead and the script is left where it was.
#[derive(Clone, Debug, Default)]
pub struct ScriptedAgent {
    script: VecDeque<Move>,
}

impl ScriptedAgent {
    pub fn new(script: impl IntoIterator<Item = Move>) -> ScriptedAgent {
        ScriptedAgent {
            script: script.into_iter().collect(),
        }
    }

    /// Scripted moves not yet played.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Agent for ScriptedAgent {
    fn choose_move(&mut self, moves: &ValidMoveSet) -> Move {
        if let Some(&next) = self.script.front() {
            if moves.contains(&next) {
                self.script.pop_front();
                return next;
            }
            tracing::warn!(%next, "scripted move is not legal, playing the first legal move");
        }

        first_legal(moves)
    }
}

#[cfg(test)]
mod tests {
    use crate::agent::{first_legal, Agent, RandomAgent, ScriptedAgent};
    use crate::gameplay::{Board, Color, Orientation};
    use crate::inventory::PieceSet;
    use crate::movegen::{Move, ValidMoveSet};
    use crate::pieces::Piece;
    use crate::placements::Placement;

    fn opening_moves() -> ValidMoveSet {
        ValidMoveSet::generate(&Board::empty(), Color::Red, PieceSet::full(), 0)
    }

    #[test]
    fn random_moves_are_legal() {
        let moves = opening_moves();
        let mut agent = RandomAgent::new(7);

        for _ in 0..200 {
            assert!(moves.contains(&agent.choose_move(&moves)));
        }
    }

    #[test]
    fn random_is_seeded() {
        let moves = opening_moves();
        let mut a = RandomAgent::new(42);
        let mut b = RandomAgent::new(42);

        for _ in 0..20 {
            assert_eq!(a.choose_move(&moves), b.choose_move(&moves));
        }
    }

    #[test]
    fn random_covers_pieces() {
        let moves = opening_moves();
        let mut agent = RandomAgent::new(1);

        let played: PieceSet = (0..500).map(|_| agent.choose_move(&moves).piece).collect();
        let available: PieceSet = moves.pieces().collect();

        // the X pentomino has no placement at a corner
        assert_eq!(available.len(), Piece::COUNT - 1);
        assert!(!available.contains(Piece::X5));
        assert_eq!(played, available);
    }

    #[test]
    fn first_legal_move() {
        let moves = opening_moves();
        assert_eq!(first_legal(&moves), moves.first().unwrap());
        assert!(!RandomAgent::new(0).has_quit());
        assert!(!ScriptedAgent::default().has_quit());
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn first_legal_without_moves_is_rejected() {
        use crate::state::GameState;
        use crate::{Action, EngineError};

        let m = first_legal(&ValidMoveSet::default());
        let err = GameState::new().apply(0, &Action::Place(m)).unwrap_err();
        assert!(matches!(err, EngineError::IllegalPlacement(_)));
    }

    #[test]
    fn scripted_follows_script() {
        let moves = opening_moves();
        let first = Move {
            piece: Piece::X5,
            anchor: (0, 0),
            placement: Placement::new(Orientation::East, 0),
        };
        let second = Move {
            piece: Piece::Domino,
            anchor: (19, 19),
            placement: Placement::new(Orientation::West, 0),
        };
        let mut agent = ScriptedAgent::new([second, first]);

        // the X pentomino cannot sit in a corner, so it falls back
        assert!(!moves.contains(&first));
        assert_eq!(agent.choose_move(&moves), second);
        assert_eq!(agent.remaining(), 1);
        assert_eq!(agent.choose_move(&moves), moves.first().unwrap());
        assert_eq!(agent.remaining(), 1);
    }

    #[test]
    fn empty_script_plays_first() {
        let moves = opening_moves();
        let mut agent = ScriptedAgent::default();

        let m = agent.choose_move(&moves);
        assert_eq!(m.piece, Piece::Monomino);
        assert_eq!(m.anchor, (0, 0));
        assert_eq!(m.placement, Placement::new(Orientation::East, 0));
    }
}
