use crate::*;
pub use random::*;
pub use scripted::*;

mod random;
mod scripted;

/// Supplies fresh tokens for board creation and cascade refills.
pub trait TokenSource {
    /// Returns a token with an index below `palette`.
    fn next_token(&mut self, palette: u8) -> Token;
}
