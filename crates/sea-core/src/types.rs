//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 2D position in the sea
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn add(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The 8 surrounding positions, increasing x then increasing y.
    /// Bounds are not checked here.
    pub fn moore_neighborhood(&self) -> impl Iterator<Item = Position> + '_ {
        (-1..=1).flat_map(move |dx| {
            (-1..=1)
                .filter(move |&dy| dx != 0 || dy != 0)
                .map(move |dy| self.add(dx, dy))
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Payload-free discriminant of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Water,
    Predator,
    Victim,
    Obstacle,
}

impl CellKind {
    pub fn glyph(&self) -> char {
        match self {
            CellKind::Water => '~',
            CellKind::Predator => '#',
            CellKind::Victim => 'o',
            CellKind::Obstacle => '@',
        }
    }

    pub fn all() -> [CellKind; 4] {
        [
            CellKind::Water,
            CellKind::Predator,
            CellKind::Victim,
            CellKind::Obstacle,
        ]
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellKind::Water => write!(f, "water"),
            CellKind::Predator => write!(f, "predator"),
            CellKind::Victim => write!(f, "victim"),
            CellKind::Obstacle => write!(f, "obstacle"),
        }
    }
}

/// Prey occupant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Victim {
    pub reproduction_countdown: u32,
}

impl Victim {
    pub fn new(reproduction_interval: u32) -> Self {
        Self {
            reproduction_countdown: reproduction_interval,
        }
    }
}

/// Predator occupant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predator {
    pub reproduction_countdown: u32,
    /// Days left before starving, reset on every meal.
    pub starvation_counter: u32,
}

impl Predator {
    pub fn new(reproduction_interval: u32, starvation_counter: u32) -> Self {
        Self {
            reproduction_countdown: reproduction_interval,
            starvation_counter,
        }
    }

    /// State after eating a victim
    pub fn fed(self, starvation_limit: u32) -> Self {
        Self {
            reproduction_countdown: self.reproduction_countdown.saturating_sub(1),
            starvation_counter: starvation_limit,
        }
    }

    pub fn is_starved(&self) -> bool {
        self.starvation_counter < 1
    }
}

/// A single grid cell. Payloads are plain values, so relocating an occupant
/// always copies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Water,
    Obstacle,
    Victim(Victim),
    Predator(Predator),
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Water
    }
}

impl Cell {
    pub fn victim(reproduction_interval: u32) -> Self {
        Cell::Victim(Victim::new(reproduction_interval))
    }

    pub fn predator(reproduction_interval: u32, starvation_counter: u32) -> Self {
        Cell::Predator(Predator::new(reproduction_interval, starvation_counter))
    }

    pub fn kind(&self) -> CellKind {
        match self {
            Cell::Water => CellKind::Water,
            Cell::Obstacle => CellKind::Obstacle,
            Cell::Victim(_) => CellKind::Victim,
            Cell::Predator(_) => CellKind::Predator,
        }
    }

    pub fn is_water(&self) -> bool {
        matches!(self, Cell::Water)
    }

    pub fn is_passable(&self) -> bool {
        !matches!(self, Cell::Obstacle)
    }

    pub fn is_creature(&self) -> bool {
        matches!(self, Cell::Victim(_) | Cell::Predator(_))
    }

    pub fn reproduction_countdown(&self) -> Option<u32> {
        match self {
            Cell::Victim(v) => Some(v.reproduction_countdown),
            Cell::Predator(p) => Some(p.reproduction_countdown),
            Cell::Water | Cell::Obstacle => None,
        }
    }

    /// The occupant after one move without eating, or `None` if it starves
    /// on the way.
    pub fn after_move(self) -> Option<Cell> {
        match self {
            Cell::Victim(v) => Some(Cell::Victim(Victim {
                reproduction_countdown: v.reproduction_countdown.saturating_sub(1),
            })),
            Cell::Predator(p) => {
                let moved = Predator {
                    reproduction_countdown: p.reproduction_countdown.saturating_sub(1),
                    starvation_counter: p.starvation_counter.saturating_sub(1),
                };
                (!moved.is_starved()).then_some(Cell::Predator(moved))
            }
            other => Some(other),
        }
    }

    /// Same occupant with its countdown restarted.
    pub fn with_countdown(self, reproduction_countdown: u32) -> Cell {
        match self {
            Cell::Victim(_) => Cell::Victim(Victim {
                reproduction_countdown,
            }),
            Cell::Predator(p) => Cell::Predator(Predator {
                reproduction_countdown,
                ..p
            }),
            other => other,
        }
    }

    /// Newborn of this occupant. Predator young inherit the parent's
    /// remaining starvation budget.
    pub fn offspring(&self, reproduction_interval: u32) -> Option<Cell> {
        match self {
            Cell::Victim(_) => Some(Cell::victim(reproduction_interval)),
            Cell::Predator(p) => Some(Cell::predator(reproduction_interval, p.starvation_counter)),
            Cell::Water | Cell::Obstacle => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind().glyph())
    }
}
