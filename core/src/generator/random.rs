use super::*;

/// Uniform placement without replacement, reproducible from the seed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomMinePlacer {
    seed: u64,
}

impl RandomMinePlacer {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinePlacer for RandomMinePlacer {
    fn place(self, config: BoardConfig) -> Array2<bool> {
        use rand::prelude::*;

        let total = config.total_cells();
        let mut mask: Array2<bool> = Array2::default(config.size().to_nd_index());

        // full boards need no random draws
        if config.mines >= total {
            mask.fill(true);
            return mask;
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut placed: CellCount = 0;
        let mut free = total;
        {
            let cells = mask.as_slice_mut().expect("layout should be standard");
            while placed < config.mines {
                // draw an index into the still-free squares and walk to it
                let mut slot: CellCount = rng.random_range(0..free);
                for cell in cells.iter_mut() {
                    if *cell {
                        continue;
                    }
                    if slot == 0 {
                        *cell = true;
                        placed += 1;
                        free -= 1;
                        break;
                    }
                    slot -= 1;
                }
            }
        }

        let count = mask.iter().filter(|&&cell| cell).count() as CellCount;
        if count != config.mines {
            log::warn!(
                "Generated mine count mismatch, actual: {}, requested: {}",
                count,
                config.mines
            );
        }
        mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_for(config: BoardConfig, seed: u64) -> Array2<bool> {
        RandomMinePlacer::new(seed).place(config)
    }

    #[test]
    fn places_exactly_the_requested_mines() {
        for seed in 0..16 {
            let config = BoardConfig::new(8, 8).unwrap();
            let mask = mask_for(config, seed);
            let placed = mask.iter().filter(|&&cell| cell).count();
            assert_eq!(placed, config.mines as usize);
        }
    }

    #[test]
    fn same_seed_gives_the_same_layout() {
        let config = BoardConfig::new(9, 7).unwrap();
        assert_eq!(mask_for(config, 42), mask_for(config, 42));
        assert_ne!(mask_for(config, 42), mask_for(config, 43));
    }

    #[test]
    fn zero_mines_leaves_the_mask_empty() {
        let config = BoardConfig::with_mines(2, 2, 0).unwrap();
        assert!(mask_for(config, 5).iter().all(|&cell| !cell));
    }

    #[test]
    fn full_board_skips_the_draws() {
        let config = BoardConfig::with_mines(3, 3, 9).unwrap();
        assert!(mask_for(config, 5).iter().all(|&cell| cell));
    }
}
