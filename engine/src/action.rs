//! Text encoding of actions, for clients outside the engine.
//!
//! A placement is written `piece;(x,y);orientationShift`, for example
//! `pentominoe3;(4,7);northwest2`.  Passing is written as the empty string.

use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;
use crate::gameplay::{Cell, Orientation};
use crate::movegen::Move;
use crate::pieces::Piece;
use crate::placements::Placement;

/// One seat's turn: place a piece, or pass because no placement exists.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Action {
    Pass,
    Place(Move),
}

impl From<Move> for Action {
    fn from(m: Move) -> Action {
        Action::Place(m)
    }
}

impl From<Option<Move>> for Action {
    fn from(m: Option<Move>) -> Action {
        m.map_or(Action::Pass, Action::Place)
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.orientation.name(), self.shift)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (x, y) = self.anchor;
        write!(f, "{};({},{});{}", self.piece.name(), x, y, self.placement)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Pass => Ok(()),
            Action::Place(m) => write!(f, "{}", m),
        }
    }
}

impl FromStr for Placement {
    type Err = EngineError;

    /// Parse `orientationShift`, e.g. `northwest2`.  The shift is not checked
    /// against any piece.
    fn from_str(s: &str) -> Result<Placement, EngineError> {
        let malformed = || EngineError::MalformedAction(s.to_string());

        let split = s.find(|c: char| c.is_ascii_digit()).ok_or_else(malformed)?;
        let (name, shift) = s.split_at(split);

        let orientation = Orientation::try_from(name).map_err(|()| malformed())?;
        let shift = shift.parse().map_err(|_| malformed())?;

        Ok(Placement { orientation, shift })
    }
}

fn parse_anchor(s: &str) -> Option<Cell> {
    let inner = s.trim().strip_prefix('(')?.strip_suffix(')')?;
    let (x, y) = inner.split_once(',')?;

    Some((x.trim().parse().ok()?, y.trim().parse().ok()?))
}

impl FromStr for Move {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Move, EngineError> {
        let malformed = || EngineError::MalformedAction(s.to_string());

        let mut parts = s.split(';');
        let (Some(piece), Some(anchor), Some(placement), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed());
        };

        let piece = Piece::try_from(piece.trim()).map_err(|()| malformed())?;
        let anchor = parse_anchor(anchor).ok_or_else(malformed)?;
        let placement: Placement = placement.trim().parse().map_err(|_| malformed())?;

        if placement.shift as usize >= piece.size() {
            return Err(malformed());
        }

        Ok(Move {
            piece,
            anchor,
            placement,
        })
    }
}

impl FromStr for Action {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Action, EngineError> {
        if s.trim().is_empty() {
            Ok(Action::Pass)
        } else {
            s.parse().map(Action::Place)
        }
    }
}
