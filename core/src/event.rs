use serde::{Deserialize, Serialize, Serializer};

use crate::*;

/// Input events accepted by [`GameSession::handle`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Input {
    LeftClick { row: Coord, col: Coord },
    RightClick { row: Coord, col: Coord },
    Reset,
    Reconfigure { width: u32, height: u32, mines: u32 },
}

impl Input {
    pub const fn left(coords: Coord2) -> Self {
        Self::LeftClick {
            row: coords.0,
            col: coords.1,
        }
    }

    pub const fn right(coords: Coord2) -> Self {
        Self::RightClick {
            row: coords.0,
            col: coords.1,
        }
    }
}

/// What a revealed cell shows. Serializes as `"mine"` or the adjacent count.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellValue {
    Mine,
    Count(u8),
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        match *self {
            Self::Mine => serializer.serialize_str("mine"),
            Self::Count(count) => serializer.serialize_u8(count),
        }
    }
}

/// A mine listed when the game ends.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ShownMine {
    pub row: Coord,
    pub col: Coord,
    pub correctly_flagged: bool,
}

/// Output for the presentation layer, in the order the changes happened.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Notification {
    CellRevealed {
        row: Coord,
        col: Coord,
        value: CellValue,
    },
    CellFlagged {
        row: Coord,
        col: Coord,
        flagged: bool,
    },
    /// `mines - flags`, may be negative.
    RemainingMineCount { remaining: isize },
    GameStatusChanged { status: GameStatus },
    ElapsedTimeTick { seconds: u32 },
    AllMinesShown { mines: Vec<ShownMine> },
    /// Flags left on cells without a mine when the game ended.
    IncorrectFlagsShown { cells: Vec<Coord2> },
    /// The board was discarded; the grid, counter and clock display start over.
    BoardCleared { width: Coord, height: Coord },
}

impl Notification {
    pub(crate) const fn revealed(coords: Coord2, value: CellValue) -> Self {
        Self::CellRevealed {
            row: coords.0,
            col: coords.1,
            value,
        }
    }

    pub(crate) const fn flagged(coords: Coord2, flagged: bool) -> Self {
        Self::CellFlagged {
            row: coords.0,
            col: coords.1,
            flagged,
        }
    }
}
