use gemswap_core::{Coord, Coord2};
use thiserror::Error;

pub(crate) const HELP: &str = "\
commands:
  <row> <col>   tap a cell (tap two neighbors to swap)
  hint          suggest a swap
  new           start a new game
  end           end the current game
  show          print the board
  quit          leave";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Tap(Coord2),
    Hint,
    NewGame,
    EndGame,
    Show,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub(crate) enum ParseError {
    #[error("Unknown command {0:?}, try \"help\"")]
    Unknown(String),
    #[error("Expected a row and a column, got {0:?}")]
    BadCoords(String),
}

impl Command {
    pub(crate) fn parse(line: &str) -> Result<Self, ParseError> {
        let mut words = line.split_whitespace();
        let Some(first) = words.next() else {
            return Ok(Self::Show);
        };

        let command = match first.to_ascii_lowercase().as_str() {
            "h" | "hint" => Self::Hint,
            "n" | "new" => Self::NewGame,
            "e" | "end" => Self::EndGame,
            "s" | "show" => Self::Show,
            "?" | "help" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            "t" | "tap" => return parse_coords(words.collect::<Vec<_>>().as_slice(), line),
            _ if first.parse::<Coord>().is_ok() => {
                let rest: Vec<_> = core::iter::once(first).chain(words).collect();
                return parse_coords(&rest, line);
            }
            _ => return Err(ParseError::Unknown(first.to_string())),
        };
        Ok(command)
    }
}

fn parse_coords(words: &[&str], line: &str) -> Result<Command, ParseError> {
    let bad = || ParseError::BadCoords(line.trim().to_string());
    let [row, col] = words else {
        return Err(bad());
    };
    let row = row.parse::<Coord>().map_err(|_| bad())?;
    let col = col.parse::<Coord>().map_err(|_| bad())?;
    Ok(Command::Tap((row, col)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_and_prefixed_taps() {
        assert_eq!(Command::parse("3 4"), Ok(Command::Tap((3, 4))));
        assert_eq!(Command::parse("tap 0 7"), Ok(Command::Tap((0, 7))));
        assert_eq!(Command::parse("  T 1   2 "), Ok(Command::Tap((1, 2))));
    }

    #[test]
    fn parses_keywords() {
        assert_eq!(Command::parse("hint"), Ok(Command::Hint));
        assert_eq!(Command::parse("NEW"), Ok(Command::NewGame));
        assert_eq!(Command::parse("end"), Ok(Command::EndGame));
        assert_eq!(Command::parse(""), Ok(Command::Show));
        assert_eq!(Command::parse("q"), Ok(Command::Quit));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(
            Command::parse("jump"),
            Err(ParseError::Unknown("jump".to_string()))
        );
        assert_eq!(
            Command::parse("3"),
            Err(ParseError::BadCoords("3".to_string()))
        );
        assert_eq!(
            Command::parse("tap 1 x"),
            Err(ParseError::BadCoords("tap 1 x".to_string()))
        );
        assert_eq!(
            Command::parse("1 2 3"),
            Err(ParseError::BadCoords("1 2 3".to_string()))
        );
    }
}
