use super::*;

impl PlayEngine {
    /// Flags a hidden cell or unflags a flagged one. Revealed cells are left alone.
    pub fn toggle_flag(&mut self, coords: Coord2, out: &mut Vec<Notification>) -> MarkOutcome {
        use CellState::*;

        let flagged = match self.board[coords.to_nd_index()] {
            Hidden => {
                self.board[coords.to_nd_index()] = Flagged;
                self.flags_used += 1;
                true
            }
            Flagged => {
                self.board[coords.to_nd_index()] = Hidden;
                self.flags_used -= 1;
                false
            }
            Revealed => return MarkOutcome::NoChange,
        };

        log::trace!("Flag at {:?} set to {}", coords, flagged);
        out.push(Notification::flagged(coords, flagged));
        MarkOutcome::Changed
    }

    pub fn flags_used(&self) -> CellCount {
        self.flags_used
    }
}
