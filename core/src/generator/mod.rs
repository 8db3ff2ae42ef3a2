use crate::*;
pub use opening::*;

mod opening;

/// Places mines for a new board once the first cell the player acts on is known.
pub trait MinefieldGenerator: core::fmt::Debug {
    fn generate(&mut self, config: &GameConfig, start: Coord2) -> MineLayout;
}

/// Replays a predetermined layout on every game, ignoring the start cell.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedLayout {
    layout: MineLayout,
}

impl FixedLayout {
    pub fn new(layout: MineLayout) -> Self {
        Self { layout }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        MineLayout::from_mine_coords(size, mine_coords).map(Self::new)
    }

    /// A config matching the layout, with the real mine count.
    pub fn game_config(&self) -> GameConfig {
        let (rows, cols) = self.layout.size();
        GameConfig::new_unchecked(cols, rows, self.layout.mine_count())
    }
}

impl MinefieldGenerator for FixedLayout {
    fn generate(&mut self, config: &GameConfig, _start: Coord2) -> MineLayout {
        if self.layout.size() != config.size() {
            log::warn!(
                "Fixed layout is {:?} but the board is {:?}",
                self.layout.size(),
                config.size()
            );
        }
        self.layout.clone()
    }
}
