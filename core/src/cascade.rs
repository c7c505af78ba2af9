use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::*;

/// What a single cascade pass did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassReport {
    /// Cleared positions in row-major order.
    pub matched: Vec<Coord2>,
    /// Combo value after this pass.
    pub combo: u32,
    pub points: Score,
}

/// Runs one detect, score, remove, drop and refill pass.
///
/// Returns `None` once the board is stable, in which case nothing was touched.
pub fn run_pass(
    board: &mut Board,
    source: &mut impl TokenSource,
    progress: &mut Progress,
    points_per_cell: Score,
) -> Option<PassReport> {
    let matched = collect_matches(board);
    if matched.is_empty() {
        return None;
    }

    let points = progress.award_pass(matched.len(), points_per_cell);
    log::debug!(
        "Cascade pass cleared {} cells, combo {}, +{} points",
        matched.len(),
        progress.combo,
        points
    );

    for &coords in &matched {
        board[coords] = Cell::Empty;
    }
    apply_gravity(board);
    refill(board, source);

    Some(PassReport {
        matched,
        combo: progress.combo,
        points,
    })
}

/// Runs passes until one finds nothing, returning every pass that scored.
pub fn resolve(
    board: &mut Board,
    source: &mut impl TokenSource,
    progress: &mut Progress,
    points_per_cell: Score,
) -> Vec<PassReport> {
    let mut passes = Vec::new();
    while let Some(report) = run_pass(board, source, progress, points_per_cell) {
        passes.push(report);
    }
    passes
}

/// Compacts every column downward, keeping the relative order of its tokens.
///
/// Vacated cells end up `Empty` at the top of each column.
pub fn apply_gravity(board: &mut Board) {
    let size = board.size();
    for col in 0..size {
        let mut write_row = size;
        for row in (0..size).rev() {
            let cell = board[(row, col)];
            if cell.is_empty() {
                continue;
            }
            write_row -= 1;
            if write_row != row {
                board[(write_row, col)] = cell;
                board[(row, col)] = Cell::Empty;
                log::trace!("Dropped {:?} from {:?} to {:?}", cell, (row, col), (write_row, col));
            }
        }
    }
}

/// Fills every `Empty` cell with a fresh token, column by column from the top.
///
/// Returns how many cells were filled.
pub fn refill(board: &mut Board, source: &mut impl TokenSource) -> usize {
    let size = board.size();
    let palette = board.palette();
    let mut filled = 0;
    for col in 0..size {
        for row in 0..size {
            if board[(row, col)].is_empty() {
                board[(row, col)] = Cell::Filled(source.next_token(palette));
                filled += 1;
            }
        }
    }
    filled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(index: u8) -> Cell {
        Cell::Filled(Token::new(index))
    }

    #[test]
    fn gravity_keeps_column_order() {
        let mut board = Board::empty(4, 6);
        board[(0, 0)] = token(1);
        board[(2, 0)] = token(2);

        apply_gravity(&mut board);

        assert_eq!(board[(0, 0)], Cell::Empty);
        assert_eq!(board[(1, 0)], Cell::Empty);
        assert_eq!(board[(2, 0)], token(1));
        assert_eq!(board[(3, 0)], token(2));
    }

    #[test]
    fn gravity_then_refill_puts_new_tokens_on_top() {
        let mut board = Board::from_rows(
            &[
                [1, 0, 1, 0], //
                [0, 1, 0, 1],
                [2, 0, 1, 0],
                [0, 1, 0, 1],
            ],
            6,
        )
        .unwrap();
        board[(1, 0)] = Cell::Empty;
        board[(3, 0)] = Cell::Empty;

        apply_gravity(&mut board);
        let filled = refill(&mut board, &mut ScriptedTokens::new([5, 4]));

        assert_eq!(filled, 2);
        assert_eq!(board[(0, 0)], token(5));
        assert_eq!(board[(1, 0)], token(4));
        assert_eq!(board[(2, 0)], token(1));
        assert_eq!(board[(3, 0)], token(2));
        assert!(board.is_full());
    }

    #[test]
    fn stable_board_is_left_untouched() {
        let mut board = Board::from_rows(
            &[
                [0, 1, 2], //
                [1, 2, 0],
                [2, 0, 1],
            ],
            6,
        )
        .unwrap();
        let before = board.clone();
        let config = GameConfig::default();
        let mut progress = Progress::new(&config);

        let pass = run_pass(&mut board, &mut ScriptedTokens::new([3]), &mut progress, 10);

        assert_eq!(pass, None);
        assert_eq!(board, before);
        assert_eq!(progress.combo, 0);
    }

    #[test]
    fn single_token_refills_keep_rematching() {
        let mut board = Board::from_rows(
            &[
                [1u8, 2, 3], //
                [2, 3, 1],
                [0, 0, 0],
            ],
            6,
        )
        .unwrap();
        let config = GameConfig::default();
        let mut progress = Progress::new(&config);
        let mut source = ScriptedTokens::new([4]);

        for pass in 1..=5 {
            let report = run_pass(&mut board, &mut source, &mut progress, 10);
            assert_eq!(report.map(|r| r.combo), Some(pass));
        }
        assert!(has_any_match(&board));
    }

    #[test]
    fn chained_passes_score_with_growing_combo() {
        // Clearing the 0s drops row 2 down next to the 1 in column 3.
        let mut board = Board::from_rows(
            &[
                [3, 4, 5, 2], //
                [4, 5, 2, 3],
                [2, 1, 1, 4],
                [0, 0, 0, 1],
            ],
            6,
        )
        .unwrap();
        let config = GameConfig::default();
        let mut progress = Progress::new(&config);
        progress.begin_swap();
        let mut source = ScriptedTokens::new([0, 3, 4, 1, 0, 5]);

        let passes = resolve(&mut board, &mut source, &mut progress, config.points_per_cell);

        assert_eq!(passes.len(), 2);
        assert_eq!(passes[0].matched, [(3, 0), (3, 1), (3, 2)]);
        assert_eq!((passes[0].combo, passes[0].points), (1, 30));
        assert_eq!(passes[1].matched, [(3, 1), (3, 2), (3, 3)]);
        assert_eq!((passes[1].combo, passes[1].points), (2, 60));
        assert_eq!(progress.score, 90);
        assert_eq!(source.drawn(), 6);
        assert_eq!(
            board,
            Board::from_rows(
                &[
                    [0, 1, 0, 5], //
                    [3, 3, 4, 2],
                    [4, 4, 5, 3],
                    [2, 5, 2, 4],
                ],
                6,
            )
            .unwrap()
        );
    }
}
