//! 2D grid for the sea.

use rand::seq::SliceRandom;
use rand::Rng;
use sea_core::{Cell, CellKind, Census, Position, Result, SeaConfig};
use serde::{Deserialize, Serialize};

/// A bounded 2D grid, no wraparound.
/// Out-of-bounds reads report an obstacle, writes are no-ops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    cells: Vec<Cell>,
}

impl Grid {
    /// All-water grid
    pub fn new(width: i32, height: i32) -> Self {
        let size = (width.max(0) * height.max(0)) as usize;
        Self {
            width,
            height,
            cells: vec![Cell::Water; size],
        }
    }

    /// Create a grid holding exactly the populations of `config`, placed
    /// uniformly at random.
    pub fn generate<R: Rng + ?Sized>(config: &SeaConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;

        let interval = config.reproduction_interval;
        let mut cells = Vec::with_capacity(config.cell_count());
        cells.extend((0..config.predators).map(|_| Cell::predator(interval, config.starvation_limit)));
        cells.extend((0..config.victims).map(|_| Cell::victim(interval)));
        cells.extend((0..config.obstacles).map(|_| Cell::Obstacle));
        cells.resize(config.cell_count(), Cell::Water);
        cells.shuffle(rng);

        Ok(Self {
            width: config.width,
            height: config.height,
            cells,
        })
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Get cell at position
    pub fn get(&self, pos: Position) -> Cell {
        if self.in_bounds(pos) {
            self.cells[self.pos_to_index(pos)]
        } else {
            Cell::Obstacle
        }
    }

    /// Overwrite the cell at position
    pub fn place(&mut self, pos: Position, cell: Cell) {
        if self.in_bounds(pos) {
            let index = self.pos_to_index(pos);
            self.cells[index] = cell;
        }
    }

    /// Turn the cell at position into water
    pub fn clear(&mut self, pos: Position) {
        self.place(pos, Cell::Water);
    }

    /// Moore neighbors that are inside the grid and not obstacles,
    /// increasing x then increasing y.
    pub fn available_neighbors(&self, pos: Position) -> Vec<Position> {
        pos.moore_neighborhood()
            .filter(|&n| self.in_bounds(n) && self.get(n).is_passable())
            .collect()
    }

    /// Available neighbors holding water, same order.
    pub fn water_neighbors(&self, pos: Position) -> Vec<Position> {
        self.available_neighbors(pos)
            .into_iter()
            .filter(|&n| self.get(n).is_water())
            .collect()
    }

    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|cell| cell.kind() == kind).count()
    }

    pub fn census(&self) -> Census {
        Census::from_kinds(self.cells.iter().map(Cell::kind))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub(crate) fn pos_to_index(&self, pos: Position) -> usize {
        (pos.y * self.width + pos.x) as usize
    }

    /// Get position from index
    pub fn index_to_pos(&self, index: usize) -> Position {
        let x = (index as i32) % self.width;
        let y = (index as i32) / self.width;
        Position::new(x, y)
    }

    /// Iterator over all positions, row-major
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.cells.len()).map(move |i| self.index_to_pos(i))
    }

    /// Iterator over all cells with positions
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (self.index_to_pos(i), cell))
    }

    /// One row of cells
    pub fn row(&self, y: i32) -> &[Cell] {
        let start = (y * self.width) as usize;
        &self.cells[start..start + self.width as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(10, 8);
        assert_eq!(grid.width, 10);
        assert_eq!(grid.height, 8);
        assert_eq!(grid.len(), 80);
        assert_eq!(grid.count(CellKind::Water), 80);
    }

    #[test]
    fn test_out_of_bounds_reads_obstacle() {
        let mut grid = Grid::new(4, 4);
        assert_eq!(grid.get(Position::new(-1, 0)), Cell::Obstacle);
        assert_eq!(grid.get(Position::new(0, 4)), Cell::Obstacle);

        let before = grid.clone();
        grid.place(Position::new(4, 0), Cell::victim(3));
        grid.place(Position::new(0, -1), Cell::victim(3));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_place_and_clear() {
        let mut grid = Grid::new(4, 4);
        let pos = Position::new(2, 3);
        grid.place(pos, Cell::predator(4, 2));
        assert_eq!(grid.get(pos), Cell::predator(4, 2));
        grid.clear(pos);
        assert_eq!(grid.get(pos), Cell::Water);
    }

    #[test]
    fn test_row_major_layout() {
        let mut grid = Grid::new(3, 2);
        grid.place(Position::new(2, 1), Cell::Obstacle);
        assert_eq!(grid.pos_to_index(Position::new(2, 1)), 5);
        assert_eq!(grid.index_to_pos(5), Position::new(2, 1));
        assert_eq!(grid.row(1)[2], Cell::Obstacle);

        let order: Vec<Position> = grid.positions().take(4).collect();
        assert_eq!(
            order,
            vec![
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(2, 0),
                Position::new(0, 1),
            ]
        );
    }

    #[test]
    fn test_neighbors_interior_and_corner() {
        let grid = Grid::new(10, 10);
        assert_eq!(grid.available_neighbors(Position::new(5, 5)).len(), 8);

        let corner = grid.available_neighbors(Position::new(0, 0));
        assert_eq!(
            corner,
            vec![Position::new(0, 1), Position::new(1, 0), Position::new(1, 1)]
        );

        assert_eq!(grid.available_neighbors(Position::new(9, 4)).len(), 5);
    }

    #[test]
    fn test_neighbors_skip_obstacles() {
        let mut grid = Grid::new(3, 3);
        grid.place(Position::new(0, 0), Cell::Obstacle);
        grid.place(Position::new(2, 2), Cell::Obstacle);
        grid.place(Position::new(1, 0), Cell::victim(5));

        let center = Position::new(1, 1);
        let available = grid.available_neighbors(center);
        assert_eq!(available.len(), 6);
        assert!(!available.contains(&Position::new(0, 0)));
        assert!(!available.contains(&center));

        let water = grid.water_neighbors(center);
        assert_eq!(water.len(), 5);
        assert!(!water.contains(&Position::new(1, 0)));
    }

    #[test]
    fn test_boxed_in_has_no_neighbors() {
        let mut grid = Grid::new(2, 2);
        grid.place(Position::new(0, 1), Cell::Obstacle);
        grid.place(Position::new(1, 0), Cell::Obstacle);
        grid.place(Position::new(1, 1), Cell::Obstacle);
        assert!(grid.available_neighbors(Position::new(0, 0)).is_empty());
    }

    #[test]
    fn test_generate_rejects_invalid_config() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let config = SeaConfig {
            width: 2,
            height: 2,
            victims: 4,
            predators: 0,
            obstacles: 0,
            ..Default::default()
        };
        assert!(Grid::generate(&config, &mut rng).is_err());
    }

    #[test]
    fn test_generate_fresh_occupants() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let config = SeaConfig::default();
        let grid = Grid::generate(&config, &mut rng).unwrap();

        for (_, cell) in grid.iter() {
            match cell {
                Cell::Predator(p) => {
                    assert_eq!(p.reproduction_countdown, config.reproduction_interval);
                    assert_eq!(p.starvation_counter, config.starvation_limit);
                }
                Cell::Victim(v) => {
                    assert_eq!(v.reproduction_countdown, config.reproduction_interval);
                }
                Cell::Water | Cell::Obstacle => {}
            }
        }
    }

    proptest! {
        #[test]
        fn prop_generate_exact_counts(
            width in 1i32..12,
            height in 1i32..12,
            predators in 0i32..20,
            victims in 0i32..20,
            obstacles in 0i32..20,
            seed in any::<u64>(),
        ) {
            prop_assume!(width * height > predators + victims + obstacles);
            let config = SeaConfig {
                width,
                height,
                predators,
                victims,
                obstacles,
                ..Default::default()
            };
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let grid = Grid::generate(&config, &mut rng).unwrap();

            let census = grid.census();
            prop_assert_eq!(census.predators, predators as usize);
            prop_assert_eq!(census.victims, victims as usize);
            prop_assert_eq!(census.obstacles, obstacles as usize);
            prop_assert_eq!(census.water, (width * height - predators - victims - obstacles) as usize);
            prop_assert_eq!(grid.len(), (width * height) as usize);
        }
    }
}
