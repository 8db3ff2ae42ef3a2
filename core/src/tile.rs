use serde::{Deserialize, Serialize};

/// Player-visible state of a single cell. A cell is never revealed and flagged at once.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Hidden,
    Flagged,
    Revealed,
}

impl CellState {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }
}

/// Read-only view of one cell.
///
/// `adjacent_mines` carries no meaning when `is_mine` is set.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub adjacent_mines: u8,
    pub revealed: bool,
    pub flagged: bool,
}
