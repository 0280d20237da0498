//! Population counts over a sea.

use crate::CellKind;
use serde::{Deserialize, Serialize};

/// Number of cells of each kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Census {
    pub water: usize,
    pub predators: usize,
    pub victims: usize,
    pub obstacles: usize,
}

/// Which species died out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Extinction {
    Predators,
    Victims,
    Both,
}

impl Census {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_kinds(kinds: impl IntoIterator<Item = CellKind>) -> Self {
        let mut census = Self::new();
        for kind in kinds {
            census.record(kind);
        }
        census
    }

    pub fn record(&mut self, kind: CellKind) {
        match kind {
            CellKind::Water => self.water += 1,
            CellKind::Predator => self.predators += 1,
            CellKind::Victim => self.victims += 1,
            CellKind::Obstacle => self.obstacles += 1,
        }
    }

    pub fn count(&self, kind: CellKind) -> usize {
        match kind {
            CellKind::Water => self.water,
            CellKind::Predator => self.predators,
            CellKind::Victim => self.victims,
            CellKind::Obstacle => self.obstacles,
        }
    }

    /// Living creatures (predators + victims)
    pub fn occupants(&self) -> usize {
        self.predators + self.victims
    }

    pub fn total(&self) -> usize {
        self.water + self.predators + self.victims + self.obstacles
    }

    pub fn extinction(&self) -> Option<Extinction> {
        match (self.predators == 0, self.victims == 0) {
            (true, true) => Some(Extinction::Both),
            (true, false) => Some(Extinction::Predators),
            (false, true) => Some(Extinction::Victims),
            (false, false) => None,
        }
    }
}
