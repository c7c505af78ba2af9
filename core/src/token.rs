use serde::{Deserialize, Serialize};

/// One of the palette colors, stored as its palette index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Token(u8);

impl Token {
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    pub const fn index(self) -> u8 {
        self.0
    }
}

/// Content of a single board cell.
///
/// `Empty` only exists between removal and refill inside a cascade pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Filled(Token),
}

impl Cell {
    pub const fn token(self) -> Option<Token> {
        match self {
            Self::Empty => None,
            Self::Filled(token) => Some(token),
        }
    }

    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Whether two cells continue a run. `Empty` never matches, not even another `Empty`.
    pub fn matches(self, other: Cell) -> bool {
        match (self, other) {
            (Self::Filled(a), Self::Filled(b)) => a == b,
            _ => false,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::Empty
    }
}

impl From<Token> for Cell {
    fn from(token: Token) -> Self {
        Self::Filled(token)
    }
}
