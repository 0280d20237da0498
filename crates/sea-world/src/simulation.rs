//! Simulation engine for running a sea.

use crate::grid::Grid;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sea_core::{Cell, CellKind, Census, Error, Extinction, Position, Result, SeaConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};

/// What a single `Sea::step` did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepOutcome {
    /// Water or obstacle, nothing to update
    Idle,
    /// Creature with no passable neighbor
    Boxed,
    /// No water around, the creature kept its place
    Stayed {
        at: Position,
        offspring: Option<Position>,
    },
    Moved {
        from: Position,
        to: Position,
        offspring: Option<Position>,
    },
    /// Predator ate the victim at `to` and took its cell
    Fed {
        from: Position,
        to: Position,
        offspring: Option<Position>,
    },
    /// Predator starved while moving from `from` towards `to`
    Starved { from: Position, to: Position },
}

impl StepOutcome {
    pub fn offspring(&self) -> Option<Position> {
        match self {
            StepOutcome::Stayed { offspring, .. }
            | StepOutcome::Moved { offspring, .. }
            | StepOutcome::Fed { offspring, .. } => *offspring,
            StepOutcome::Idle | StepOutcome::Boxed | StepOutcome::Starved { .. } => None,
        }
    }
}

/// Tally of one day pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayStats {
    pub day: u64,
    /// Creatures that took a step
    pub stepped: usize,
    pub moves: usize,
    pub feedings: usize,
    pub births: usize,
    pub starvations: usize,
    /// Population at the end of the day
    pub census: Census,
}

impl DayStats {
    fn new(day: u64) -> Self {
        Self {
            day,
            ..Default::default()
        }
    }

    fn record(&mut self, outcome: StepOutcome) {
        if outcome != StepOutcome::Idle {
            self.stepped += 1;
        }
        match outcome {
            StepOutcome::Moved { .. } => self.moves += 1,
            StepOutcome::Fed { .. } => self.feedings += 1,
            StepOutcome::Starved { .. } => self.starvations += 1,
            StepOutcome::Idle | StepOutcome::Boxed | StepOutcome::Stayed { .. } => {}
        }
        if outcome.offspring().is_some() {
            self.births += 1;
        }
    }
}

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    Extinct(Extinction),
    BudgetExhausted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Days actually simulated
    pub days: u64,
    pub outcome: RunOutcome,
    pub census: Census,
    /// Census before the first day followed by one entry per simulated day
    pub history: Vec<Census>,
}

impl RunSummary {
    /// Build from the census history of a run (initial census first).
    pub fn from_history(history: Vec<Census>) -> Self {
        let census = history.last().copied().unwrap_or_default();
        let outcome = census
            .extinction()
            .map_or(RunOutcome::BudgetExhausted, RunOutcome::Extinct);

        Self {
            days: history.len().saturating_sub(1) as u64,
            outcome,
            census,
            history,
        }
    }
}

/// The sea: a grid of cells plus the rules that advance it day by day.
#[derive(Debug, Clone)]
pub struct Sea {
    grid: Grid,
    config: SeaConfig,
    rng: ChaCha8Rng,
    day: u64,
    // Cells entered by a relocated or newborn creature during the current day.
    touched: Vec<bool>,
}

impl Sea {
    pub fn new(config: SeaConfig) -> Result<Self> {
        Self::with_rng(config, ChaCha8Rng::from_entropy())
    }

    pub fn with_rng(config: SeaConfig, mut rng: ChaCha8Rng) -> Result<Self> {
        let grid = Grid::generate(&config, &mut rng)?;
        Self::from_grid(config, grid, rng)
    }

    /// Start from a prepared grid. The population counts of `config` are
    /// not checked against the grid contents, only its dimensions.
    pub fn from_grid(config: SeaConfig, grid: Grid, rng: ChaCha8Rng) -> Result<Self> {
        config.validate()?;
        if grid.width != config.width || grid.height != config.height {
            return Err(Error::Validation(format!(
                "grid is {}x{} but config expects {}x{}",
                grid.width, grid.height, config.width, config.height
            )));
        }

        let touched = vec![false; grid.len()];
        info!(
            event = "sea_created",
            width = config.width,
            height = config.height,
            starvation_limit = config.starvation_limit,
            reproduction_interval = config.reproduction_interval,
            "Sea created"
        );

        Ok(Self {
            grid,
            config,
            rng,
            day: 0,
            touched,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &SeaConfig {
        &self.config
    }

    /// Number of days simulated so far
    pub fn day(&self) -> u64 {
        self.day
    }

    pub fn population(&self, kind: CellKind) -> usize {
        self.grid.count(kind)
    }

    pub fn census(&self) -> Census {
        self.grid.census()
    }

    /// Run the rules for the creature at `pos` once.
    pub fn step(&mut self, pos: Position) -> StepOutcome {
        let cell = self.grid.get(pos);
        if !cell.is_creature() {
            return StepOutcome::Idle;
        }

        let neighbors = self.grid.available_neighbors(pos);
        if neighbors.is_empty() {
            return StepOutcome::Boxed;
        }

        if let Cell::Predator(predator) = cell {
            let prey = neighbors
                .iter()
                .copied()
                .find(|&n| matches!(self.grid.get(n), Cell::Victim(_)));

            if let Some(prey) = prey {
                let fed = predator.fed(self.config.starvation_limit);
                self.relocate(pos, prey, Cell::Predator(fed));
                debug!(
                    event = "predator_fed",
                    day = self.day,
                    from = %pos,
                    to = %prey,
                    "Predator ate a victim"
                );

                let offspring = self.try_give_birth(prey);
                return StepOutcome::Fed {
                    from: pos,
                    to: prey,
                    offspring,
                };
            }
        }

        let Some(&target) = self.grid.water_neighbors(pos).choose(&mut self.rng) else {
            let offspring = self.try_give_birth(pos);
            return StepOutcome::Stayed { at: pos, offspring };
        };

        match cell.after_move() {
            Some(moved) => {
                self.relocate(pos, target, moved);
                trace!(day = self.day, from = %pos, to = %target, kind = %cell.kind(), "Creature moved");

                let offspring = self.try_give_birth(target);
                StepOutcome::Moved {
                    from: pos,
                    to: target,
                    offspring,
                }
            }
            None => {
                self.grid.clear(pos);
                debug!(
                    event = "predator_starved",
                    day = self.day,
                    at = %target,
                    "Predator starved"
                );
                StepOutcome::Starved {
                    from: pos,
                    to: target,
                }
            }
        }
    }

    /// Visit every cell once, row by row. Cells a creature moved or was born
    /// into earlier in the same pass are skipped.
    pub fn advance_one_day(&mut self) -> DayStats {
        self.day += 1;
        self.touched.fill(false);

        let mut stats = DayStats::new(self.day);
        for index in 0..self.grid.len() {
            if self.touched[index] {
                continue;
            }
            let pos = self.grid.index_to_pos(index);
            stats.record(self.step(pos));
        }
        stats.census = self.grid.census();

        debug!(
            event = "day_complete",
            day = self.day,
            predators = stats.census.predators,
            victims = stats.census.victims,
            moves = stats.moves,
            feedings = stats.feedings,
            births = stats.births,
            starvations = stats.starvations,
            "Day complete"
        );

        stats
    }

    pub fn run(&mut self, max_days: u64) -> RunSummary {
        self.run_with(max_days, |_, _| {})
    }

    /// Advance up to `max_days`, stopping after the first day that leaves a
    /// species extinct. `observer` sees the sea after every day.
    #[instrument(skip(self, observer), fields(width = self.config.width, height = self.config.height))]
    pub fn run_with<F>(&mut self, max_days: u64, mut observer: F) -> RunSummary
    where
        F: FnMut(&Sea, &DayStats),
    {
        let initial = self.census();
        info!(
            predators = initial.predators,
            victims = initial.victims,
            "Starting run for up to {} days",
            max_days
        );

        let mut history = vec![initial];
        for _ in 0..max_days {
            let stats = self.advance_one_day();
            history.push(stats.census);
            observer(&*self, &stats);

            if stats.census.extinction().is_some() {
                break;
            }
        }

        let summary = RunSummary::from_history(history);
        info!(
            event = "run_complete",
            days = summary.days,
            outcome = ?summary.outcome,
            predators = summary.census.predators,
            victims = summary.census.victims,
            "Run complete"
        );

        summary
    }

    fn relocate(&mut self, from: Position, to: Position, cell: Cell) {
        self.grid.clear(from);
        self.grid.place(to, cell);
        self.touch(to);
    }

    fn touch(&mut self, pos: Position) {
        if self.grid.in_bounds(pos) {
            let index = self.grid.pos_to_index(pos);
            self.touched[index] = true;
        }
    }

    /// Reproduce if the countdown at `pos` reached zero. The countdown
    /// restarts even when there is no room for the young.
    fn try_give_birth(&mut self, pos: Position) -> Option<Position> {
        let parent = self.grid.get(pos);
        if parent.reproduction_countdown()? > 0 {
            return None;
        }

        let interval = self.config.reproduction_interval;
        let parent = parent.with_countdown(interval);
        self.grid.place(pos, parent);

        let Some(nursery) = self.grid.water_neighbors(pos).first().copied() else {
            trace!(day = self.day, at = %pos, "No room for offspring");
            return None;
        };
        let offspring = parent.offspring(interval)?;
        self.grid.place(nursery, offspring);
        self.touch(nursery);

        debug!(
            event = "birth",
            day = self.day,
            parent = %pos,
            offspring = %nursery,
            kind = %offspring.kind(),
            "Creature reproduced"
        );

        Some(nursery)
    }
}
