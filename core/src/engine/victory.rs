use super::*;

impl PlayEngine {
    /// Won once every safe cell is revealed and no safe cell carries a flag.
    ///
    /// Flags on actual mines do not matter.
    pub fn is_victory(&self) -> bool {
        self.board.indexed_iter().all(|((row, col), &state)| {
            let is_mine = self.mine_layout[(row as Coord, col as Coord)];
            (state.is_revealed() || is_mine) && !(state.is_flagged() && !is_mine)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revealing_every_safe_cell_wins() {
        let mut engine = PlayEngine::new(MineLayout::from_mine_coords((5, 5), &[(0, 0)]).unwrap());
        let mut out = Vec::new();
        let mut outcomes = Vec::new();

        for row in 0..5 {
            for col in 0..5 {
                if (row, col) != (0, 0) {
                    outcomes.push(engine.reveal((row, col), false, &mut out));
                }
            }
        }

        assert!(engine.is_victory());
        assert_eq!(
            outcomes.iter().filter(|&&o| o == RevealOutcome::Won).count(),
            1
        );
    }

    #[test]
    fn wrong_flag_blocks_victory_but_mine_flag_does_not() {
        let mut engine = PlayEngine::new(MineLayout::from_mine_coords((5, 5), &[(0, 0)]).unwrap());
        let mut out = Vec::new();

        engine.toggle_flag((4, 4), &mut out);
        assert_eq!(engine.reveal((2, 2), false, &mut out), RevealOutcome::Revealed);
        assert_eq!(engine.cell_state((4, 4)), CellState::Flagged);
        assert!(!engine.is_victory());

        engine.toggle_flag((4, 4), &mut out);
        assert!(!engine.is_victory());

        engine.toggle_flag((0, 0), &mut out);
        assert_eq!(engine.reveal((4, 4), false, &mut out), RevealOutcome::Won);
        assert!(engine.is_victory());
    }

    #[test]
    fn fresh_board_is_not_won() {
        let engine = PlayEngine::new(MineLayout::from_mine_coords((5, 5), &[(2, 2)]).unwrap());
        assert!(!engine.is_victory());
    }
}
