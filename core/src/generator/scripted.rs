use alloc::vec::Vec;

use super::*;

/// Replays a fixed token sequence, cycling once it runs out.
///
/// Indices are folded into the requested palette, an empty script yields token 0.
///
/// A script with a single distinct token refills every cleared run with that same token,
/// so a cascade fed by it never settles and `resolve` does not return.
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptedTokens {
    script: Vec<Token>,
    cursor: usize,
}

impl ScriptedTokens {
    pub fn new(script: impl IntoIterator<Item = u8>) -> Self {
        Self {
            script: script.into_iter().map(Token::new).collect(),
            cursor: 0,
        }
    }

    /// Number of tokens handed out so far.
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl TokenSource for ScriptedTokens {
    fn next_token(&mut self, palette: u8) -> Token {
        if self.script.is_empty() {
            return Token::new(0);
        }
        let token = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        Token::new(token.index() % palette.max(1))
    }
}
