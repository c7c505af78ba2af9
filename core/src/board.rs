use core::ops::{Index, IndexMut};

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Square grid of cells, the single source of truth for token placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    cells: Array2<Cell>,
    palette: u8,
}

/// Unchecked serialized form, turned into a [`Board`] only if square and within the palette.
#[derive(Deserialize)]
struct RawBoard {
    cells: Array2<Cell>,
    palette: u8,
}

impl TryFrom<RawBoard> for Board {
    type Error = GameError;

    fn try_from(raw: RawBoard) -> Result<Self> {
        let (rows, cols) = raw.cells.dim();
        if rows != cols || rows > usize::from(Coord::MAX) {
            return Err(GameError::InvalidBoardShape);
        }
        let in_palette = raw
            .cells
            .iter()
            .filter_map(|cell| cell.token())
            .all(|token| token.index() < raw.palette);
        if !in_palette {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(Self {
            cells: raw.cells,
            palette: raw.palette,
        })
    }
}

impl Board {
    /// Board of the given side where every cell is `Empty`.
    pub fn empty(size: Coord, palette: u8) -> Self {
        Self {
            cells: Array2::default((size, size).to_nd_index()),
            palette,
        }
    }

    /// Fills every cell from `source`, without any match checks.
    pub fn filled(size: Coord, palette: u8, source: &mut impl TokenSource) -> Self {
        let mut board = Self::empty(size, palette);
        for cell in board.cells.iter_mut() {
            *cell = Cell::Filled(source.next_token(palette));
        }
        board
    }

    /// Creates a fresh board with no match anywhere.
    ///
    /// Cells that take part in a match get redrawn until a sweep finds none.
    pub fn generate(size: Coord, palette: u8, source: &mut impl TokenSource) -> Self {
        let mut board = Self::filled(size, palette, source);
        let mut sweeps = 0u32;

        while has_any_match(&board) {
            sweeps += 1;
            let mut redrawn = 0u32;
            for coords in board.iter_coords() {
                if cell_in_match(&board, coords) {
                    board[coords] = Cell::Filled(source.next_token(palette));
                    redrawn += 1;
                }
            }
            log::trace!("Generation sweep {}, redrew {} cells", sweeps, redrawn);
        }

        log::debug!(
            "Generated {}x{} board with {} colors after {} sweeps",
            size,
            size,
            palette,
            sweeps
        );
        board
    }

    /// Builds a board from literal rows of palette indices.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R], palette: u8) -> Result<Self> {
        let size: Coord = rows
            .len()
            .try_into()
            .map_err(|_| GameError::InvalidBoardShape)?;
        let mut board = Self::empty(size, palette);

        for (row_index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != rows.len() {
                return Err(GameError::InvalidBoardShape);
            }
            for (col_index, &token) in row.iter().enumerate() {
                if token >= palette {
                    return Err(GameError::InvalidBoardShape);
                }
                board.cells[(row_index, col_index)] = Cell::Filled(Token::new(token));
            }
        }

        Ok(board)
    }

    pub fn size(&self) -> Coord {
        self.cells.nrows().try_into().unwrap_or(Coord::MAX)
    }

    pub fn palette(&self) -> u8 {
        self.palette
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size(), self.size())
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn get(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }

    pub fn set(&mut self, coords: Coord2, cell: Cell) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        self[coords] = cell;
        Ok(())
    }

    /// Exchanges the contents of two cells.
    pub fn swap(&mut self, a: Coord2, b: Coord2) -> Result<()> {
        let a = self.validate_coords(a)?;
        let b = self.validate_coords(b)?;
        self.swap_cells(a, b);
        Ok(())
    }

    /// Same as [`swap`](Self::swap) for coordinates already known to be in bounds.
    pub(crate) fn swap_cells(&mut self, a: Coord2, b: Coord2) {
        self.cells.swap(a.to_nd_index(), b.to_nd_index());
    }

    /// Visits every cell in row-major order.
    pub fn for_each_cell(&self, mut visitor: impl FnMut(Coord2, Cell)) {
        for coords in self.iter_coords() {
            visitor(coords, self[coords]);
        }
    }

    /// All coordinates in row-major order.
    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let size = self.size();
        (0..size).flat_map(move |row| (0..size).map(move |col| (row, col)))
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    /// Whether no cell is `Empty`.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    pub fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, (row, col): Coord2) -> &Self::Output {
        &self.cells[(row as usize, col as usize)]
    }
}

impl IndexMut<Coord2> for Board {
    fn index_mut(&mut self, (row, col): Coord2) -> &mut Self::Output {
        &mut self.cells[(row as usize, col as usize)]
    }
}
