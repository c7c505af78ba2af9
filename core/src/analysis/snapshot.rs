use serde::{Deserialize, Serialize};

use crate::*;

/// Owned, read-only copy of everything a renderer draws.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub board: Board,
    pub progress: Progress,
    pub state: EngineState,
    pub selection: Option<Coord2>,
    pub revision: u64,
}

impl Snapshot {
    pub fn from_engine<S: TokenSource>(engine: &MatchEngine<S>) -> Self {
        Self {
            board: engine.board().clone(),
            progress: *engine.progress(),
            state: engine.state(),
            selection: engine.selection(),
            revision: engine.revision(),
        }
    }

    pub fn size(&self) -> Coord {
        self.board.size()
    }

    /// Palette index at `coords`, `None` for an out-of-bounds or empty cell.
    pub fn token_at(&self, coords: Coord2) -> Option<u8> {
        self.board
            .get(coords)
            .ok()
            .and_then(Cell::token)
            .map(Token::index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> MatchEngine<ScriptedTokens> {
        let board = Board::from_rows(
            &[
                [0, 1, 2], //
                [1, 2, 0],
                [2, 0, 1],
            ],
            6,
        )
        .unwrap();
        MatchEngine::from_board(GameConfig::new(3, 6), board, ScriptedTokens::new([3])).unwrap()
    }

    #[test]
    fn snapshot_is_detached_from_engine() {
        let mut engine = engine();
        let snapshot = engine.snapshot();

        engine.tap((1, 1)).unwrap();

        assert_eq!(snapshot.selection, None);
        assert_eq!(engine.snapshot().selection, Some((1, 1)));
        assert!(engine.snapshot().revision > snapshot.revision);
        assert_eq!(snapshot.token_at((0, 2)), Some(2));
        assert_eq!(snapshot.token_at((3, 0)), None);
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let snapshot = engine().snapshot();

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(back, snapshot);
        assert_eq!(back.progress.moves_left, 30);
    }
}
