//! Whole-game state and turn transitions.

use tracing::debug;

use crate::action::Action;
use crate::error::EngineError;
use crate::gameplay::{Board, Color};
use crate::inventory::PlayerInventory;
use crate::movegen::{has_any_move, is_legal_move, ValidMoveSet};

/// Number of seats at the table.
pub const SEATS: usize = 4;

/// The board, the round number, and every seat's inventory.
///
/// States are values.  [`GameState::apply`] borrows the current state and
/// returns a new one, so callers can keep old states as history.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GameState {
    pub board: Board,
    /// Number of completed passes around the table.
    pub round: u32,
    /// Inventories, indexed by seat.
    pub players: [PlayerInventory; SEATS],
}

/// Whether the game continues after a transition.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    InProgress,
    /// No seat can place a piece.
    Terminal {
        /// Every seat tied for the highest score.
        winners: Vec<usize>,
        /// The acting seat's rank, 0 for the lowest score.
        reward: usize,
    },
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Transition {
    pub state: GameState,
    pub outcome: Outcome,
}

impl GameState {
    /// An empty board in round 0, with full inventories.
    pub fn new() -> GameState {
        GameState {
            board: Board::empty(),
            round: 0,
            players: Color::SEATS.map(PlayerInventory::new),
        }
    }

    pub fn player(&self, seat: usize) -> Result<&PlayerInventory, EngineError> {
        self.players.get(seat).ok_or(EngineError::NoSuchSeat(seat))
    }

    /// Every legal move for a seat this round.
    pub fn valid_moves(&self, seat: usize) -> Result<ValidMoveSet, EngineError> {
        let player = self.player(seat)?;

        Ok(ValidMoveSet::generate(
            &self.board,
            player.color,
            player.remaining,
            self.round,
        ))
    }

    pub fn has_any_move(&self, seat: usize) -> bool {
        match self.players.get(seat) {
            Some(player) => has_any_move(&self.board, player.color, player.remaining, self.round),
            None => false,
        }
    }

    /// The game is over when no seat has a legal move.
    pub fn is_terminal(&self) -> bool {
        !(0..SEATS).any(|seat| self.has_any_move(seat))
    }

    pub fn scores(&self) -> [u32; SEATS] {
        std::array::from_fn(|seat| self.players[seat].score)
    }

    /// Seats with the highest score, in seat order.  Ties give several
    /// winners.
    pub fn winners(&self) -> Vec<usize> {
        let scores = self.scores();
        let max = scores.iter().copied().max().unwrap_or(0);

        (0..SEATS).filter(|&seat| scores[seat] == max).collect()
    }

    /// Position of a seat when seats are sorted by ascending score.
    ///
    /// Equal scores keep seat order, so tied seats get distinct ranks.
    pub fn rank(&self, seat: usize) -> usize {
        let scores = self.scores();
        let mut order: Vec<usize> = (0..SEATS).collect();
        order.sort_by_key(|&s| scores[s]);

        order.iter().position(|&s| s == seat).unwrap_or(0)
    }

    /// Take one seat's turn and produce the next state.
    ///
    /// A placement must be one of the seat's legal moves this round.  It is
    /// committed to the board and scored.  A pass changes nothing.  After the
    /// last seat acts, the round advances.
    ///
    /// On error, nothing changes: `self` is only borrowed.
    pub fn apply(&self, seat: usize, action: &Action) -> Result<Transition, EngineError> {
        let player = self.player(seat)?;
        let mut next = self.clone();

        match action {
            Action::Place(m) => {
                if !player.remaining.contains(m.piece) {
                    return Err(EngineError::InvalidPiece(m.piece));
                }
                if !is_legal_move(&self.board, player.color, player.remaining, self.round, m) {
                    return Err(EngineError::IllegalPlacement(m.to_string()));
                }

                next.board.commit(&m.cells(), player.color);
                next.players[seat].record_play(m.piece);

                debug!(
                    seat,
                    round = self.round,
                    action = %m,
                    score = next.players[seat].score,
                    "placed"
                );
            }
            Action::Pass => debug!(seat, round = self.round, "passed"),
        }

        if seat == SEATS - 1 {
            next.round += 1;
        }

        let outcome = if next.is_terminal() {
            let winners = next.winners();
            let reward = next.rank(seat);

            debug!(?winners, scores = ?next.scores(), "game over");

            Outcome::Terminal { winners, reward }
        } else {
            Outcome::InProgress
        };

        Ok(Transition {
            state: next,
            outcome,
        })
    }
}

impl Default for GameState {
    fn default() -> GameState {
        GameState::new()
    }
}
