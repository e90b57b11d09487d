//! Rules engine for four-seat polyomino placement on a 20&times;20 board.
//!
//! Each seat starts with the same 21 pieces.  A piece may never cover an
//! occupied cell or share an edge with a piece of its own color, and (after
//! the first round, where seats start in the corners) it must touch a piece of
//! its own color at a corner.  The game ends when no seat can place anything.

pub mod action;
pub mod agent;
pub mod error;
pub mod gameplay;
pub mod inventory;
pub mod movegen;
pub mod observation;
pub mod pieces;
pub mod placements;
pub mod state;

pub use action::Action;
pub use error::EngineError;
pub use gameplay::{Board, Cell, Color, Orientation};
pub use movegen::{Move, ValidMoveSet};
pub use pieces::Piece;
pub use placements::Placement;
pub use state::{GameState, Outcome, Transition};
