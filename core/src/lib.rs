#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use analysis::*;
pub use board::*;
pub use cascade::*;
pub use engine::*;
pub use error::*;
pub use event::*;
pub use generator::*;
pub use matching::*;
pub use progress::*;
pub use token::*;
pub use types::*;

mod analysis;
mod board;
mod cascade;
mod engine;
mod error;
mod event;
mod generator;
mod matching;
mod progress;
mod token;
mod types;

/// Rules of a game: board dimensions and the scoring and level policy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square board.
    pub size: Coord,
    /// Number of distinct token colors.
    pub palette: u8,
    pub starting_moves: MoveCount,
    pub first_target: Score,
    /// Added to the target score on each level-up.
    pub target_step: Score,
    /// Moves granted on each level-up.
    pub level_bonus_moves: MoveCount,
    pub points_per_cell: Score,
}

impl GameConfig {
    pub const MIN_SIZE: Coord = 3;
    pub const MIN_PALETTE: u8 = 3;

    pub const fn new_unchecked(size: Coord, palette: u8) -> Self {
        Self {
            size,
            palette,
            starting_moves: 30,
            first_target: 1000,
            target_step: 1000,
            level_bonus_moves: 20,
            points_per_cell: 10,
        }
    }

    pub fn new(size: Coord, palette: u8) -> Self {
        Self::new_unchecked(size, palette).sanitized()
    }

    /// Clamps values that would make the game unplayable.
    ///
    /// With fewer than three colors rejection sampling may never find a match-free board.
    pub fn sanitized(self) -> Self {
        let size = self.size.max(Self::MIN_SIZE);
        let palette = self.palette.max(Self::MIN_PALETTE);
        let points_per_cell = self.points_per_cell.max(1);
        if size != self.size || palette != self.palette || points_per_cell != self.points_per_cell
        {
            log::warn!(
                "Clamped game config, size {} -> {}, palette {} -> {}, points per cell {} -> {}",
                self.size,
                size,
                self.palette,
                palette,
                self.points_per_cell,
                points_per_cell
            );
        }
        Self {
            size,
            palette,
            points_per_cell,
            ..self
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size, self.size)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(8, 6)
    }
}
