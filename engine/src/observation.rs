//! Game state as seen from one seat, for learning agents.

use serde::Serialize;

use crate::error::EngineError;
use crate::gameplay::SIZE;
use crate::pieces::Piece;
use crate::state::{GameState, SEATS};

/// Everything one seat can observe, relabeled so that the observing seat is
/// always seat 0.
///
/// Seats are relabeled as `(seat - player) mod 4`: the observer is 0, the
/// next seat to act is 1, and so on.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Observation {
    /// Relabeled owner of each cell, `board[y][x]`.  Empty cells are `-1`.
    pub board: [[i8; SIZE as usize]; SIZE as usize],
    /// `pieces[seat][piece]` is 1 if the relabeled seat still holds the piece.
    pub pieces: [[u8; Piece::COUNT]; SEATS],
    /// Scores by relabeled seat.
    pub score: [u32; SEATS],
    /// The observing seat's absolute index.
    pub player: usize,
}

fn relative_seat(player: usize, seat: usize) -> usize {
    (seat + SEATS - player) % SEATS
}

impl Observation {
    /// Observe `state` from `player`'s seat.
    pub fn new(state: &GameState, player: usize) -> Result<Observation, EngineError> {
        if player >= SEATS {
            return Err(EngineError::NoSuchSeat(player));
        }

        let mut board = [[-1; SIZE as usize]; SIZE as usize];
        for (row, cells) in board.iter_mut().zip(state.board.0.iter()) {
            for (value, color) in row.iter_mut().zip(cells.iter()) {
                if let Some(seat) = color.seat() {
                    *value = relative_seat(player, seat) as i8;
                }
            }
        }

        let mut pieces = [[0; Piece::COUNT]; SEATS];
        for (seat, inventory) in state.players.iter().enumerate() {
            let row = &mut pieces[relative_seat(player, seat)];
            for piece in inventory.remaining.iter() {
                row[piece as usize] = 1;
            }
        }

        let mut score = state.scores();
        score.rotate_left(player);

        Ok(Observation {
            board,
            pieces,
            score,
            player,
        })
    }
}
