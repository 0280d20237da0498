//! Plain-text rendering of the sea.
//!
//! One glyph per cell, one grid row per line, glyphs separated by a space.
//! The sea adds a population header above the grid.

use crate::grid::Grid;
use crate::simulation::Sea;
use std::fmt;

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            let line: Vec<String> = self.row(y).iter().map(ToString::to_string).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

impl fmt::Display for Sea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let census = self.census();
        writeln!(f, "Victims: {} predators: {}", census.victims, census.predators)?;
        write!(f, "{}", self.grid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use sea_core::{Cell, Position, SeaConfig};

    #[test]
    fn test_grid_rendering() {
        let mut grid = Grid::new(3, 2);
        grid.place(Position::new(0, 0), Cell::predator(1, 1));
        grid.place(Position::new(2, 0), Cell::victim(1));
        grid.place(Position::new(1, 1), Cell::Obstacle);

        assert_eq!(grid.to_string(), "# ~ o\n~ @ ~\n");
    }

    #[test]
    fn test_sea_rendering_has_population_header() {
        let config = SeaConfig {
            width: 2,
            height: 1,
            predators: 0,
            victims: 1,
            obstacles: 0,
            ..Default::default()
        };
        let mut grid = Grid::new(2, 1);
        grid.place(Position::new(1, 0), Cell::victim(3));
        let sea = Sea::from_grid(config, grid, ChaCha8Rng::seed_from_u64(0)).unwrap();

        assert_eq!(sea.to_string(), "Victims: 1 predators: 0\n~ o\n");
    }

    #[test]
    fn test_rendering_shape_matches_grid() {
        let sea = Sea::with_rng(SeaConfig::default(), ChaCha8Rng::seed_from_u64(11)).unwrap();
        let rendered = sea.to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 7);
        for line in &lines[1..] {
            assert_eq!(line.split(' ').count(), 5);
        }
        let predators = rendered.matches('#').count();
        assert_eq!(predators, 1);
    }
}
