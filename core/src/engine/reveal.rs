use std::collections::VecDeque;

use super::*;

impl PlayEngine {
    /// Reveals a hidden cell, flood-filling from cells without adjacent mines.
    ///
    /// With `opening` set, a zero cell only opens its own 3x3 block instead of cascading.
    /// Revealed and flagged cells are left alone.
    pub fn reveal(
        &mut self,
        coords: Coord2,
        opening: bool,
        out: &mut Vec<Notification>,
    ) -> RevealOutcome {
        if !matches!(self.board[coords.to_nd_index()], CellState::Hidden) {
            return RevealOutcome::NoChange;
        }

        if self.mine_layout[coords] {
            self.board[coords.to_nd_index()] = CellState::Revealed;
            log::debug!("Revealed mine at {:?}", coords);
            out.push(Notification::revealed(coords, CellValue::Mine));
            return RevealOutcome::HitMine;
        }

        if self.open_cell(coords, out) == 0 {
            if opening {
                self.open_block(coords, out);
            } else {
                self.flood_from(coords, out);
            }
        }

        if self.is_victory() {
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    fn open_cell(&mut self, coords: Coord2, out: &mut Vec<Notification>) -> u8 {
        let count = self.mine_layout.adjacent_mine_count(coords);
        self.board[coords.to_nd_index()] = CellState::Revealed;
        out.push(Notification::revealed(coords, CellValue::Count(count)));
        log::trace!("Open cell at {:?}, mine count: {}", coords, count);
        count
    }

    fn open_block(&mut self, center: Coord2, out: &mut Vec<Notification>) {
        for pos in iter_block(center, self.size()) {
            if matches!(self.board[pos.to_nd_index()], CellState::Hidden) {
                debug_assert!(!self.mine_layout[pos], "mine next to a zero cell");
                self.open_cell(pos, out);
            }
        }
    }

    fn flood_from(&mut self, start: Coord2, out: &mut Vec<Notification>) {
        let mut to_visit: VecDeque<_> = self.iter_neighbors(start).collect();
        log::trace!(
            "Starting flood-fill from {:?}, initial neighbors: {:?}",
            start,
            to_visit
        );

        while let Some(visit_coords) = to_visit.pop_front() {
            // skip flagged or already opened cells
            if !matches!(self.board[visit_coords.to_nd_index()], CellState::Hidden) {
                continue;
            }

            if self.open_cell(visit_coords, out) == 0 {
                to_visit.extend(
                    self.iter_neighbors(visit_coords)
                        .filter(|&pos| matches!(self.board[pos.to_nd_index()], CellState::Hidden)),
                );
            }
        }
    }
}
