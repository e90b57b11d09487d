use thiserror::Error;

use crate::pieces::Piece;

/// A rejected request.  The game state is never changed when one of these is
/// returned.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum EngineError {
    /// The piece is not in the seat's remaining inventory.
    #[error("piece {} is not in the inventory", .0.name())]
    InvalidPiece(Piece),

    /// The placement is not among the seat's legal moves this round.
    #[error("illegal placement: {0}")]
    IllegalPlacement(String),

    /// The action text is not a well-formed `piece;(x,y);orientation` triple.
    #[error("malformed action {0:?}")]
    MalformedAction(String),

    #[error("no seat {0}")]
    NoSuchSeat(usize),
}
