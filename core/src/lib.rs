use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use event::*;
pub use generator::*;
pub use session::*;
pub use settings::*;
pub use tile::*;
pub use timer::*;
pub use types::*;

mod engine;
mod error;
mod event;
mod generator;
mod session;
mod settings;
mod tile;
mod timer;
mod types;

/// Smallest allowed board side.
pub const MIN_SIDE: Coord = 5;
/// Largest allowed board side.
pub const MAX_SIDE: Coord = 30;
/// Cells of the opening block that stay out of the mine budget.
pub const OPENING_CELLS: CellCount = 9;

/// Validated board dimensions and mine count.
///
/// Only obtainable through [`GameConfig::new`], a [`Preset`] or deserialization, all of which
/// validate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardSettings")]
pub struct GameConfig {
    width: Coord,
    height: Coord,
    mines: CellCount,
}

impl GameConfig {
    pub(crate) const fn new_unchecked(width: Coord, height: Coord, mines: CellCount) -> Self {
        Self {
            width,
            height,
            mines,
        }
    }

    /// Sides must be in `MIN_SIDE..=MAX_SIDE`, mines in `1..=width*height-OPENING_CELLS`.
    pub fn new(width: u32, height: u32, mines: u32) -> Result<Self> {
        let side_range = u32::from(MIN_SIDE)..=u32::from(MAX_SIDE);
        let invalid = GameError::InvalidConfig {
            width,
            height,
            mines,
        };
        if !side_range.contains(&width) || !side_range.contains(&height) {
            return Err(invalid);
        }

        let max_mines = width * height - u32::from(OPENING_CELLS);
        if mines < 1 || mines > max_mines {
            return Err(invalid);
        }

        match (
            Coord::try_from(width),
            Coord::try_from(height),
            CellCount::try_from(mines),
        ) {
            (Ok(width), Ok(height), Ok(mines)) => Ok(Self::new_unchecked(width, height, mines)),
            _ => Err(invalid),
        }
    }

    pub const fn width(&self) -> Coord {
        self.width
    }

    pub const fn height(&self) -> Coord {
        self.height
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    /// Board size as `(rows, cols)`.
    pub const fn size(&self) -> Coord2 {
        (self.height, self.width)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }

    pub const fn max_mines(&self) -> CellCount {
        self.total_cells().saturating_sub(OPENING_CELLS)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.height && coords.1 < self.width {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Preset::Intermediate.config()
    }
}

impl From<Preset> for GameConfig {
    fn from(preset: Preset) -> Self {
        preset.config()
    }
}

/// Standard board presets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    Beginner,
    Intermediate,
    Expert,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Self::Beginner, Self::Intermediate, Self::Expert];

    pub const fn config(self) -> GameConfig {
        match self {
            Self::Beginner => GameConfig::new_unchecked(9, 9, 10),
            Self::Intermediate => GameConfig::new_unchecked(15, 15, 40),
            Self::Expert => GameConfig::new_unchecked(24, 24, 99),
        }
    }
}

/// Mine placement of a generated board together with the adjacent-mine count of every cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    size: Coord2,
    mine_mask: Array2<bool>,
    adjacent: Array2<u8>,
    mine_count: CellCount,
}

impl MineLayout {
    /// `mine_mask` must have shape `size`.
    pub(crate) fn from_mine_mask(size: Coord2, mine_mask: Array2<bool>) -> Self {
        debug_assert_eq!(
            mine_mask.dim(),
            (usize::from(size.0), usize::from(size.1))
        );

        let mut mine_count: CellCount = 0;
        let adjacent = Array2::from_shape_fn(size.to_nd_index(), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            if mine_mask[coords.to_nd_index()] {
                mine_count += 1;
            }
            NeighborIter::new(coords, size)
                .filter(|&pos| mine_mask[pos.to_nd_index()])
                .count() as u8
        });

        Self {
            size,
            mine_mask,
            adjacent,
            mine_count,
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(size, mine_mask))
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.size.0 && coords.1 < self.size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Board size as `(rows, cols)`.
    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    /// Number of mines among the Chebyshev neighbors, also computed for mine cells.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.adjacent[coords.to_nd_index()]
    }

    /// Every mine position in row-major order.
    pub fn mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size)
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_accepts_bounds() {
        assert!(GameConfig::new(5, 5, 1).is_ok());
        assert!(GameConfig::new(5, 5, 16).is_ok());
        assert!(GameConfig::new(30, 30, 891).is_ok());
        assert_eq!(
            GameConfig::new(12, 7, 20),
            Ok(GameConfig::new_unchecked(12, 7, 20))
        );
    }

    #[test]
    fn config_rejects_out_of_range_values() {
        for (width, height, mines) in [
            (4, 9, 10),
            (9, 31, 10),
            (9, 9, 0),
            (9, 9, 73),
            (9, 9, 100),
            (5, 5, 17),
            (300, 300, 10),
        ] {
            assert_eq!(
                GameConfig::new(width, height, mines),
                Err(GameError::InvalidConfig {
                    width,
                    height,
                    mines
                })
            );
        }
    }

    #[test]
    fn presets_are_valid_configs() {
        for preset in Preset::ALL {
            let config = preset.config();
            assert_eq!(
                GameConfig::new(
                    config.width.into(),
                    config.height.into(),
                    config.mines.into()
                ),
                Ok(config)
            );
        }
        assert_eq!(GameConfig::default(), GameConfig::new_unchecked(15, 15, 40));
        assert_eq!(Preset::Expert.config().max_mines(), 567);
    }

    #[test]
    fn deserialized_config_is_validated() {
        let config: GameConfig =
            serde_json::from_str(r#"{"width": 12, "height": 7, "mines": 20}"#).unwrap();
        assert_eq!(config, GameConfig::new_unchecked(12, 7, 20));
        assert_eq!((config.width(), config.height(), config.mines()), (12, 7, 20));

        for text in [
            r#"{"width": 3, "height": 3, "mines": 50}"#,
            r#"{"width": 9, "height": 9, "mines": 0}"#,
            r#"{"width": 31, "height": 9, "mines": 10}"#,
        ] {
            assert!(serde_json::from_str::<GameConfig>(text).is_err(), "{text}");
        }
    }

    #[test]
    fn invalid_config_message_names_allowed_ranges() {
        let err = GameConfig::new(9, 9, 73).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid board 9x9 with 73 mines, sides must be within 5..=30 \
             and mines within 1..=72"
        );
    }

    #[test]
    fn config_size_is_rows_by_cols() {
        let config = GameConfig::new_unchecked(12, 7, 20);
        assert_eq!(config.size(), (7, 12));
        assert_eq!(config.validate_coords((6, 11)), Ok((6, 11)));
        assert_eq!(config.validate_coords((7, 0)), Err(GameError::InvalidCoords));
        assert_eq!(config.validate_coords((0, 12)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn layout_counts_adjacent_mines() {
        let layout = MineLayout::from_mine_coords((3, 4), &[(0, 0), (1, 1), (2, 3)]).unwrap();

        assert_eq!(layout.mine_count(), 3);
        assert_eq!(layout.safe_cell_count(), 9);
        assert_eq!(layout.adjacent_mine_count((0, 1)), 2);
        assert_eq!(layout.adjacent_mine_count((1, 2)), 2);
        assert_eq!(layout.adjacent_mine_count((2, 0)), 1);
        assert_eq!(layout.adjacent_mine_count((0, 3)), 0);
        assert_eq!(layout.mines().collect::<Vec<_>>(), vec![(0, 0), (1, 1), (2, 3)]);
    }

    #[test]
    fn layout_rejects_mines_outside_board() {
        assert_eq!(
            MineLayout::from_mine_coords((5, 5), &[(5, 0)]),
            Err(GameError::InvalidCoords)
        );
    }
}
