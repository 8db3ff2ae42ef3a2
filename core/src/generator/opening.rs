use super::*;
use ndarray::Array2;
use rand::{Rng, SeedableRng, rngs::SmallRng, seq::SliceRandom};
use smallvec::SmallVec;

/// Cells guaranteed mine-free, together with their whole neighborhoods.
pub const SAFE_SET_SIZE: usize = 3;

/// Mines dropped into the opening block before the repair pass.
pub const MAX_ZONE_MINES: usize = 3;

/// The clipped 3x3 block around the first cell acted on, and the cells of it kept safe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Opening {
    pub start: Coord2,
    pub zone: SmallVec<[Coord2; 9]>,
    pub safe_set: SmallVec<[Coord2; SAFE_SET_SIZE]>,
}

impl Opening {
    /// Picks the safe-set: random fully interior cells of the zone when there are enough of them,
    /// otherwise the start cell and the zone cells nearest to it.
    ///
    /// A clipped 3x3 zone has at most one fully interior cell, its center, so in practice the
    /// safe-set always comes from the nearest-cell fallback.
    pub fn plan<R: Rng + ?Sized>(start: Coord2, bounds: Coord2, rng: &mut R) -> Self {
        let zone: SmallVec<[Coord2; 9]> = iter_block(start, bounds).collect();
        let in_zone = move |coords: Coord2| {
            coords.0.abs_diff(start.0) <= 1 && coords.1.abs_diff(start.1) <= 1
        };

        let mut candidates: SmallVec<[Coord2; 9]> = zone
            .iter()
            .copied()
            .filter(|&coords| neighborhood_within(coords, bounds, in_zone))
            .collect();
        if !candidates.contains(&start) {
            candidates.push(start);
        }

        let safe_set = if candidates.len() >= SAFE_SET_SIZE {
            let (picked, _) = candidates.partial_shuffle(rng, SAFE_SET_SIZE);
            let mut safe_set: SmallVec<[Coord2; SAFE_SET_SIZE]> = picked.iter().copied().collect();
            if !safe_set.contains(&start) {
                safe_set[0] = start;
            }
            safe_set
        } else {
            // stable sort keeps row-major order between equally distant cells
            let mut nearest: SmallVec<[Coord2; 9]> =
                zone.iter().copied().filter(|&coords| coords != start).collect();
            nearest.sort_by_key(|&coords| squared_distance(coords, start));
            core::iter::once(start)
                .chain(nearest.into_iter().take(SAFE_SET_SIZE - 1))
                .collect()
        };

        Self {
            start,
            zone,
            safe_set,
        }
    }

    pub fn in_zone(&self, coords: Coord2) -> bool {
        self.zone.contains(&coords)
    }

    /// Whether the cell is part of the safe-set or next to one of its cells.
    pub fn guards(&self, coords: Coord2) -> bool {
        self.safe_set
            .iter()
            .any(|&safe| safe == coords || is_adjacent(safe, coords))
    }
}

/// Generator that keeps the first cell acted on, and a small opening around it, free of mines.
#[derive(Clone, Debug)]
pub struct SafeOpeningGenerator {
    rng: SmallRng,
}

impl SafeOpeningGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Generates a layout and returns it with the opening it was built around.
    ///
    /// Up to [`MAX_ZONE_MINES`] mines go into the zone and the rest outside of it, then every mine
    /// touching the safe-set is removed again without being placed elsewhere. Cells outside the
    /// zone that touch the safe-set are never drawn, so only the zone mines are lost.
    pub fn generate_opening(&mut self, config: &GameConfig, start: Coord2) -> (MineLayout, Opening) {
        let size = config.size();
        let opening = Opening::plan(start, size, &mut self.rng);
        let mut mines: Array2<bool> = Array2::default(size.to_nd_index());

        let mut zone_pool: SmallVec<[Coord2; 9]> = opening
            .zone
            .iter()
            .copied()
            .filter(|coords| !opening.safe_set.contains(coords))
            .collect();
        let zone_mines = zone_pool.len().min(MAX_ZONE_MINES);
        let (picked, _) = zone_pool.partial_shuffle(&mut self.rng, zone_mines);
        for &coords in picked.iter() {
            mines[coords.to_nd_index()] = true;
        }

        let (rows, cols) = size;
        let mut outside: Vec<Coord2> = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .filter(|&coords| !opening.in_zone(coords) && !opening.guards(coords))
            .collect();
        let wanted = usize::from(config.mines).saturating_sub(zone_mines);
        if wanted > outside.len() {
            log::warn!(
                "Minefield too dense, requested {} mines outside the opening but only {} fit",
                wanted,
                outside.len()
            );
        }
        let amount = wanted.min(outside.len());
        let (picked, _) = outside.partial_shuffle(&mut self.rng, amount);
        for &coords in picked.iter() {
            mines[coords.to_nd_index()] = true;
        }

        // repair pass, the removed mines are not compensated
        let mut removed = 0;
        for &safe in &opening.safe_set {
            for pos in NeighborIter::new(safe, size) {
                if mines[pos.to_nd_index()] {
                    mines[pos.to_nd_index()] = false;
                    removed += 1;
                }
            }
        }

        let layout = MineLayout::from_mine_mask(size, mines);
        log::debug!(
            "Generated {:?} board from {:?}, safe-set {:?}, mines requested {} placed {} ({} removed)",
            size,
            start,
            opening.safe_set,
            config.mines,
            layout.mine_count(),
            removed
        );
        (layout, opening)
    }
}

impl Default for SafeOpeningGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl MinefieldGenerator for SafeOpeningGenerator {
    fn generate(&mut self, config: &GameConfig, start: Coord2) -> MineLayout {
        self.generate_opening(config, start).0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_starts(config: &GameConfig) -> [Coord2; 6] {
        let (rows, cols) = config.size();
        [
            (0, 0),
            (0, cols - 1),
            (rows - 1, cols - 1),
            (rows - 1, cols / 2),
            (rows / 2, cols / 2),
            (1, 1),
        ]
    }

    fn brute_force_count(layout: &MineLayout, (row, col): Coord2) -> u8 {
        let (rows, cols) = layout.size();
        let mut count = 0;
        for r in row.saturating_sub(1)..=(row + 1).min(rows - 1) {
            for c in col.saturating_sub(1)..=(col + 1).min(cols - 1) {
                if (r, c) != (row, col) && layout.contains_mine((r, c)) {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn fallback_picks_nearest_cells_in_row_major_order() {
        let mut rng = SmallRng::seed_from_u64(0);

        let center = Opening::plan((2, 2), (5, 5), &mut rng);
        assert_eq!(center.zone.len(), 9);
        assert_eq!(center.safe_set.as_slice(), &[(2, 2), (1, 2), (2, 1)]);

        let corner = Opening::plan((0, 0), (5, 5), &mut rng);
        assert_eq!(corner.zone.as_slice(), &[(0, 0), (0, 1), (1, 0), (1, 1)]);
        assert_eq!(corner.safe_set.as_slice(), &[(0, 0), (0, 1), (1, 0)]);

        let edge = Opening::plan((0, 4), (9, 9), &mut rng);
        assert_eq!(edge.safe_set.as_slice(), &[(0, 4), (0, 3), (0, 5)]);
    }

    #[test]
    fn guards_cover_safe_cells_and_their_neighbors() {
        let mut rng = SmallRng::seed_from_u64(0);
        let opening = Opening::plan((2, 2), (9, 9), &mut rng);

        assert!(opening.guards((2, 2)));
        assert!(opening.guards((0, 1)));
        assert!(opening.guards((3, 0)));
        assert!(!opening.guards((0, 4)));
        assert!(!opening.guards((4, 4)));
    }

    #[test]
    fn opening_and_its_neighborhood_are_mine_free() {
        for preset in Preset::ALL {
            let config = preset.config();
            for seed in 0..16 {
                let mut generator = SafeOpeningGenerator::new(seed);
                for start in sample_starts(&config) {
                    let (layout, opening) = generator.generate_opening(&config, start);

                    assert_eq!(layout.size(), config.size());
                    assert_eq!(opening.safe_set.len(), SAFE_SET_SIZE);
                    assert_eq!(opening.safe_set[0], start);
                    for &safe in &opening.safe_set {
                        assert!(opening.in_zone(safe));
                        assert!(!layout.contains_mine(safe));
                        for pos in NeighborIter::new(safe, layout.size()) {
                            assert!(!layout.contains_mine(pos), "{pos:?} next to {safe:?}");
                        }
                    }
                    for &coords in &opening.zone {
                        assert!(!layout.contains_mine(coords));
                    }
                    assert_eq!(layout.adjacent_mine_count(start), 0);
                }
            }
        }
    }

    #[test]
    fn mine_count_loses_at_most_the_zone_mines() {
        for preset in Preset::ALL {
            let config = preset.config();
            for seed in 0..16 {
                let mut generator = SafeOpeningGenerator::new(seed);
                for start in sample_starts(&config) {
                    let (layout, opening) = generator.generate_opening(&config, start);
                    let zone_mines = (opening.zone.len() - SAFE_SET_SIZE).min(MAX_ZONE_MINES);

                    assert!(layout.mine_count() <= config.mines);
                    assert!(layout.mine_count() >= config.mines - 3);
                    assert_eq!(layout.mine_count(), config.mines - zone_mines as CellCount);
                }
            }
        }
    }

    #[test]
    fn adjacent_counts_match_neighbor_mines() {
        for preset in Preset::ALL {
            let config = preset.config();
            for seed in [1, 7, 42, 1234] {
                let mut generator = SafeOpeningGenerator::new(seed);
                let (rows, cols) = config.size();
                let layout = generator.generate(&config, (rows / 2, cols / 3));
                for row in 0..rows {
                    for col in 0..cols {
                        if !layout.contains_mine((row, col)) {
                            assert_eq!(
                                layout.adjacent_mine_count((row, col)),
                                brute_force_count(&layout, (row, col)),
                                "count at {:?}",
                                (row, col)
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn same_seed_reproduces_layout() {
        let config = Preset::Expert.config();
        let first = SafeOpeningGenerator::new(99).generate(&config, (10, 10));
        let second = SafeOpeningGenerator::new(99).generate(&config, (10, 10));
        assert_eq!(first, second);
    }

    #[test]
    fn dense_board_fills_what_fits() {
        let config = GameConfig::new(5, 5, 16).unwrap();
        let (layout, opening) = SafeOpeningGenerator::new(3).generate_opening(&config, (2, 2));

        // 16 outside cells minus the 6 bordering (1, 2) and (2, 1)
        assert_eq!(layout.mine_count(), 10);
        for &coords in &opening.zone {
            assert!(!layout.contains_mine(coords));
        }
    }
}
