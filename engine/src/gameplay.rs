//! Board data types and geometry.

use serde::Serialize;

/// Width and height of the (square) board.
pub const SIZE: i8 = 20;

/// A board coordinate, `(x, y)`.
///
/// `x` is the column and `y` is the row.  Coordinates are signed because
/// transformed pieces routinely reach past the edges of the board before they
/// are checked; only cells with 0 &le; `x`, `y` &lt; [`SIZE`] are in bounds.
pub type Cell = (i8, i8);

/// The owner of a cell.
///
/// `None` marks an empty cell.  The other four colors belong to the four
/// seats, in turn order.
///
/// The `u8` numeric representation is used as an index sometimes.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[repr(u8)]
pub enum Color {
    #[default]
    None,
    Red,
    Blue,
    Green,
    Yellow,
}

/// Each of the eight symmetries of the square, applied to a piece about its
/// anchor.
///
/// The first four are pure rotations; the last four are a rotation followed by
/// a reflection.  `East` is the identity: a piece facing east is exactly its
/// catalog shape.
///
/// The `u8` numeric representation is used as an index sometimes.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[repr(u8)]
pub enum Orientation {
    /// No rotation.
    East,
    /// One 90° rotation.
    South,
    /// One 180° rotation.
    West,
    /// One 270° rotation.
    North,
    /// 90° rotation, then the column is mirrored about the anchor.
    Southeast,
    /// No rotation, then the row is mirrored about the anchor.
    Northeast,
    /// 180° rotation, then the row is mirrored about the anchor.
    Southwest,
    /// 270° rotation, then the column is mirrored about the anchor.
    Northwest,
}

/// A 20&times;20 grid of cell owners.
///
/// Cells are stored row-major, so `self.0[y][x]` is the cell at `(x, y)`.
///
/// A cell only ever changes once, from [`Color::None`] to a seat's color.
/// Nothing removes a placed cell.
///
/// Boards are cloned whenever a new game state is derived, so that earlier
/// states stay valid.  A board is small (400 bytes), so this is cheap.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Board(pub [[Color; SIZE as usize]; SIZE as usize]);

impl Color {
    /// Seat colors, in turn order.
    pub const SEATS: [Color; 4] = [Color::Red, Color::Blue, Color::Green, Color::Yellow];

    /// The seat that plays this color, or `None` for an empty cell.
    pub fn seat(self) -> Option<usize> {
        match self {
            Color::None => None,
            color => Some(color as usize - 1),
        }
    }

    pub fn name(self) -> &'static str {
        ["none", "red", "blue", "green", "yellow"][self as usize]
    }
}

impl Orientation {
    /// Array of all orientations.
    pub const ALL: [Orientation; 8] = [
        Orientation::East,
        Orientation::South,
        Orientation::West,
        Orientation::North,
        Orientation::Southeast,
        Orientation::Northeast,
        Orientation::Southwest,
        Orientation::Northwest,
    ];

    /// Lower-case name, as used in serialized actions.
    pub fn name(self) -> &'static str {
        [
            "east",
            "south",
            "west",
            "north",
            "southeast",
            "northeast",
            "southwest",
            "northwest",
        ][self as usize]
    }

    /// Transform an offset relative to the anchor.
    ///
    /// Rotations are by multiples of 90°, so the rotation matrices have only
    /// 0 and &plusmn;1 entries and the result is always exact.  The mirror
    /// applies after the rotation.
    pub fn transform(self, (dx, dy): (i8, i8)) -> (i8, i8) {
        match self {
            Orientation::East => (dx, dy),
            Orientation::South => (-dy, dx),
            Orientation::West => (-dx, -dy),
            Orientation::North => (dy, -dx),
            Orientation::Southeast => (dy, dx),
            Orientation::Northeast => (dx, -dy),
            Orientation::Southwest => (-dx, dy),
            Orientation::Northwest => (-dy, -dx),
        }
    }

    /// Map a piece offset to an absolute cell, transformed about `anchor`.
    ///
    /// The offset `(0, 0)` always lands on `anchor` itself.
    pub fn apply(self, anchor: Cell, offset: (i8, i8)) -> Cell {
        let (dx, dy) = self.transform(offset);
        (anchor.0 + dx, anchor.1 + dy)
    }

    /// The single orientation equivalent to applying `self`, then `then`.
    #[must_use]
    pub fn compose(self, then: Orientation) -> Orientation {
        // A symmetry of the square is determined by where it sends two
        // independent vectors.
        let images = |o: Orientation| (o.transform((1, 0)), o.transform((0, 1)));
        let target = (
            then.transform(self.transform((1, 0))),
            then.transform(self.transform((0, 1))),
        );

        match Orientation::ALL.iter().find(|&&o| images(o) == target) {
            Some(&o) => o,
            None => unreachable!("symmetries of the square are closed"),
        }
    }
}

impl TryFrom<&str> for Orientation {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, ()> {
        Orientation::ALL
            .iter()
            .copied()
            .find(|o| o.name() == value)
            .ok_or(())
    }
}

impl Board {
    /// The four corner cells, where each seat starts.
    pub const CORNERS: [Cell; 4] = [(0, 0), (SIZE - 1, 0), (0, SIZE - 1), (SIZE - 1, SIZE - 1)];

    /// Create an empty board.
    pub fn empty() -> Board {
        Board([[Color::None; SIZE as usize]; SIZE as usize])
    }

    /// The owner of a cell, or `None` if the cell is out of bounds.
    pub fn get(&self, (x, y): Cell) -> Option<Color> {
        if Board::is_in_bounds((x, y)) {
            Some(self.0[y as usize][x as usize])
        } else {
            None
        }
    }

    pub fn is_in_bounds((x, y): Cell) -> bool {
        (0..SIZE).contains(&x) && (0..SIZE).contains(&y)
    }

    /// Check that a cell is in bounds and has no owner.
    pub fn is_empty(&self, cell: Cell) -> bool {
        self.get(cell) == Some(Color::None)
    }

    /// Check whether any of the (up to four) edge neighbors has `color`.
    pub fn has_orthogonal_same_color(&self, (x, y): Cell, color: Color) -> bool {
        [(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)]
            .iter()
            .any(|&n| self.get(n) == Some(color))
    }

    /// Check whether any of the (up to four) corner neighbors has `color`.
    pub fn touches_diagonal_same_color(&self, (x, y): Cell, color: Color) -> bool {
        [(x - 1, y - 1), (x + 1, y - 1), (x - 1, y + 1), (x + 1, y + 1)]
            .iter()
            .any(|&n| self.get(n) == Some(color))
    }

    /// Check whether a single cell of a `color` piece may go here.
    ///
    /// The cell must be empty, and must not share an edge with a cell that
    /// already has `color`.  Other colors may share edges freely.
    ///
    /// Only the board as it stands is considered.  The other cells of the
    /// piece being placed are not on the board yet, so a piece's own cells
    /// never count against each other.
    pub fn is_legal_cell(&self, cell: Cell, color: Color) -> bool {
        self.is_empty(cell) && !self.has_orthogonal_same_color(cell, color)
    }

    /// Check whether a cell can anchor a new `color` piece: it must be a legal
    /// cell that touches an existing `color` cell at a corner.
    pub fn is_legal_anchor(&self, cell: Cell, color: Color) -> bool {
        self.is_legal_cell(cell, color) && self.touches_diagonal_same_color(cell, color)
    }

    /// Fill cells with `color`.
    ///
    /// No legality checks are made; callers must check every cell with
    /// [`is_legal_cell`] first.  In debug mode, each cell is checked to be in
    /// bounds and empty.
    ///
    /// [`is_legal_cell`]: Board::is_legal_cell
    pub fn commit(&mut self, cells: &[Cell], color: Color) {
        for &(x, y) in cells {
            debug_assert!(self.is_empty((x, y)));

            self.0[y as usize][x as usize] = color;
        }
    }

    /// Iterate over every in-bounds cell, row by row.
    pub fn cells() -> impl Iterator<Item = Cell> {
        (0..SIZE).flat_map(|y| (0..SIZE).map(move |x| (x, y)))
    }

    /// Number of cells owned by `color`.
    pub fn count(&self, color: Color) -> usize {
        self.0.iter().flatten().filter(|&&c| c == color).count()
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::empty()
    }
}
