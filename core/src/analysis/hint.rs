use crate::*;

/// A swap suggestion, first position then the neighbor to swap it with.
pub type Hint = (Coord2, Coord2);

/// Finds the first swap that would form a match.
///
/// Positions are tried in row-major order, and for each one the neighbors right, down, left
/// and up. The board is swapped back after every probe, so it is unchanged on return.
pub fn find_hint(board: &mut Board) -> Option<Hint> {
    for coords in board.iter_coords() {
        for neighbor in board.iter_neighbors(coords) {
            if swap_forms_match(board, coords, neighbor) {
                log::trace!("Hint found: {:?} <-> {:?}", coords, neighbor);
                return Some((coords, neighbor));
            }
        }
    }
    None
}

/// Number of adjacent pairs whose swap would form a match, each pair counted once.
pub fn count_valid_moves(board: &mut Board) -> usize {
    let mut count = 0;
    for coords in board.iter_coords() {
        // right and down cover every unordered pair
        for neighbor in board.iter_neighbors(coords).filter(|&n| n > coords) {
            if swap_forms_match(board, coords, neighbor) {
                count += 1;
            }
        }
    }
    count
}

fn swap_forms_match(board: &mut Board, a: Coord2, b: Coord2) -> bool {
    board.swap_cells(a, b);
    let matched = has_any_match(board);
    board.swap_cells(a, b);
    matched
}
