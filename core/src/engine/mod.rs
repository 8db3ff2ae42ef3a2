use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

mod flags;
mod reveal;
mod victory;

/// Player-visible board of one generated game.
///
/// Mutating methods push the resulting [`Notification`]s to `out`. Coordinates are expected to be
/// validated by the caller, out-of-range values panic.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayEngine {
    mine_layout: MineLayout,
    board: Array2<CellState>,
    flags_used: CellCount,
}

impl PlayEngine {
    pub fn new(mine_layout: MineLayout) -> Self {
        let size = mine_layout.size();
        Self {
            mine_layout,
            board: Array2::default(size.to_nd_index()),
            flags_used: 0,
        }
    }

    pub fn size(&self) -> Coord2 {
        self.mine_layout.size()
    }

    pub fn mine_layout(&self) -> &MineLayout {
        &self.mine_layout
    }

    pub fn total_mines(&self) -> CellCount {
        self.mine_layout.mine_count()
    }

    pub fn cell_state(&self, coords: Coord2) -> CellState {
        self.board[coords.to_nd_index()]
    }

    pub fn cell(&self, coords: Coord2) -> Cell {
        let state = self.cell_state(coords);
        Cell {
            is_mine: self.mine_layout.contains_mine(coords),
            adjacent_mines: self.mine_layout.adjacent_mine_count(coords),
            revealed: state.is_revealed(),
            flagged: state.is_flagged(),
        }
    }

    pub fn revealed_count(&self) -> usize {
        self.board.iter().filter(|state| state.is_revealed()).count()
    }

    /// Lists every mine, and whether the player had flagged it.
    pub fn shown_mines(&self) -> Vec<ShownMine> {
        self.mine_layout
            .mines()
            .map(|(row, col)| ShownMine {
                row,
                col,
                correctly_flagged: self.cell_state((row, col)).is_flagged(),
            })
            .collect()
    }

    /// Flagged cells that do not hold a mine.
    pub fn incorrect_flags(&self) -> Vec<Coord2> {
        self.board
            .indexed_iter()
            .map(|((row, col), &state)| ((row as Coord, col as Coord), state))
            .filter(|&(coords, state)| state.is_flagged() && !self.mine_layout[coords])
            .map(|(coords, _)| coords)
            .collect()
    }

    fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.mine_layout.iter_neighbors(coords)
    }
}
