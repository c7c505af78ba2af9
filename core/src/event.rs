use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::*;

/// Notifications for a renderer to dramatize.
///
/// None of them are needed to reconstruct the game, a [`Snapshot`] carries the full state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    NewGame,
    Selected(Coord2),
    Swapped {
        from: Coord2,
        to: Coord2,
    },
    /// The swap formed no match and was reverted.
    NoMatch {
        from: Coord2,
        to: Coord2,
    },
    CellsMatched(Vec<Coord2>),
    /// A chained pass, carries the combo count (always above 1).
    ComboTriggered(u32),
    CascadeSettled,
    LevelUp(u32),
    GameOver {
        score: Score,
        level: u32,
    },
    /// The player ended the game early.
    GameEnded {
        score: Score,
        level: u32,
        moves_left: MoveCount,
    },
    HintFound(Coord2, Coord2),
    NoHintAvailable,
}
