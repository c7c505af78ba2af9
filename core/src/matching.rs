use alloc::vec::Vec;

use crate::*;

/// Minimum run length that counts as a match.
pub const MIN_RUN: usize = 3;

/// Whether the cell at `coords` sits in a horizontal or vertical run of at least [`MIN_RUN`].
///
/// Every call rescans from the cell outward, no match state is cached between calls.
pub fn is_part_of_match(board: &Board, coords: Coord2) -> Result<bool> {
    let coords = board.validate_coords(coords)?;
    Ok(cell_in_match(board, coords))
}

/// Unchecked form of [`is_part_of_match`] for coordinates taken from the board itself.
pub(crate) fn cell_in_match(board: &Board, coords: Coord2) -> bool {
    let cell = board[coords];
    if cell.is_empty() {
        return false;
    }

    let horizontal = 1 + run_length(board, coords, (0, -1)) + run_length(board, coords, (0, 1));
    if horizontal >= MIN_RUN {
        return true;
    }

    let vertical = 1 + run_length(board, coords, (-1, 0)) + run_length(board, coords, (1, 0));
    vertical >= MIN_RUN
}

/// Whether any cell on the board is part of a match.
pub fn has_any_match(board: &Board) -> bool {
    board
        .iter_coords()
        .any(|coords| cell_in_match(board, coords))
}

/// Every matched position, in row-major order.
///
/// A cell in both a horizontal and a vertical run appears once.
pub fn collect_matches(board: &Board) -> Vec<Coord2> {
    board
        .iter_coords()
        .filter(|&coords| cell_in_match(board, coords))
        .collect()
}

/// Counts equal cells walking from `coords` in `step` direction, excluding `coords` itself.
fn run_length(board: &Board, coords: Coord2, step: (i8, i8)) -> usize {
    let cell = board[coords];
    let size = board.size();
    let mut count = 0;
    let (mut row, mut col) = coords;

    loop {
        let (Some(next_row), Some(next_col)) =
            (row.checked_add_signed(step.0), col.checked_add_signed(step.1))
        else {
            break;
        };
        if next_row >= size || next_col >= size || !board[(next_row, next_col)].matches(cell) {
            break;
        }
        count += 1;
        row = next_row;
        col = next_col;
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &[[u8; 4]]) -> Board {
        Board::from_rows(rows, 6).unwrap()
    }

    #[test]
    fn detects_horizontal_run() {
        let board = board(&[
            [0, 0, 0, 1], //
            [1, 2, 3, 4],
            [2, 3, 4, 5],
            [3, 4, 5, 0],
        ]);

        assert!(is_part_of_match(&board, (0, 0)).unwrap());
        assert!(is_part_of_match(&board, (0, 1)).unwrap());
        assert!(is_part_of_match(&board, (0, 2)).unwrap());
        assert!(!is_part_of_match(&board, (0, 3)).unwrap());
        assert!(has_any_match(&board));
    }

    #[test]
    fn detects_vertical_run_from_its_middle() {
        let board = board(&[
            [0, 1, 2, 3], //
            [4, 1, 3, 2],
            [3, 1, 2, 4],
            [2, 3, 4, 5],
        ]);

        assert!(is_part_of_match(&board, (1, 1)).unwrap());
        assert_eq!(collect_matches(&board), [(0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn two_in_a_row_is_not_a_match() {
        let board = board(&[
            [0, 0, 1, 1], //
            [1, 1, 0, 0],
            [0, 0, 1, 1],
            [1, 1, 0, 0],
        ]);

        assert!(!has_any_match(&board));
        assert!(collect_matches(&board).is_empty());
    }

    #[test]
    fn crossing_runs_share_one_cell() {
        let board = board(&[
            [1, 0, 2, 3], //
            [0, 0, 0, 4],
            [2, 0, 3, 5],
            [3, 4, 5, 1],
        ]);

        let matched = collect_matches(&board);

        assert_eq!(matched, [(0, 1), (1, 0), (1, 1), (1, 2), (2, 1)]);
    }

    #[test]
    fn out_of_bounds_query_is_an_error() {
        let board = board(&[
            [0, 1, 2, 3], //
            [1, 2, 3, 4],
            [2, 3, 4, 5],
            [3, 4, 5, 0],
        ]);

        assert_eq!(is_part_of_match(&board, (4, 0)), Err(GameError::InvalidCoords));
        assert_eq!(is_part_of_match(&board, (0, 4)), Err(GameError::InvalidCoords));
        assert_eq!(is_part_of_match(&board, (3, 3)), Ok(false));
    }

    #[test]
    fn empty_cells_never_form_runs() {
        let mut board = board(&[
            [0, 1, 2, 3], //
            [1, 2, 3, 4],
            [2, 3, 4, 5],
            [3, 4, 5, 0],
        ]);
        for col in 0..3 {
            board.set((0, col), Cell::Empty).unwrap();
        }

        assert!(!is_part_of_match(&board, (0, 0)).unwrap());
        assert!(!has_any_match(&board));
    }
}
