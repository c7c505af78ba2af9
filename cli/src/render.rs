use std::io::{self, Write};

use gemswap_core::{EngineState, GameEvent, Snapshot};

/// Letters standing in for the palette colors.
const GLYPHS: &[u8] = b"RGBYPOCWKM";

pub(crate) struct View {
    json: bool,
}

impl View {
    pub(crate) fn new(json: bool) -> Self {
        Self { json }
    }

    pub(crate) fn snapshot<W: Write>(&self, out: &mut W, snapshot: &Snapshot) -> io::Result<()> {
        if self.json {
            serde_json::to_writer(&mut *out, snapshot)?;
            return writeln!(out);
        }

        let size = snapshot.size();
        write!(out, "   ")?;
        for col in 0..size {
            write!(out, " {col:>2}")?;
        }
        writeln!(out)?;

        for row in 0..size {
            write!(out, "{row:>2} ")?;
            for col in 0..size {
                let glyph = snapshot.token_at((row, col)).map_or('.', glyph);
                if snapshot.selection == Some((row, col)) {
                    write!(out, " [{glyph}")?;
                } else {
                    write!(out, "  {glyph}")?;
                }
            }
            writeln!(out)?;
        }

        let progress = &snapshot.progress;
        writeln!(
            out,
            "score {} / {} ({:.0}%)  moves {}  level {}{}",
            progress.score,
            progress.target_score,
            progress.target_progress() * 100.0,
            progress.moves_left,
            progress.level,
            state_suffix(snapshot.state)
        )
    }

    pub(crate) fn events<W: Write>(&self, out: &mut W, events: Vec<GameEvent>) -> io::Result<()> {
        for event in events {
            if self.json {
                serde_json::to_writer(&mut *out, &event)?;
                writeln!(out)?;
                continue;
            }
            if let Some(message) = describe(&event) {
                writeln!(out, "{message}")?;
            }
        }
        Ok(())
    }
}

pub(crate) fn prompt<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}

fn glyph(index: u8) -> char {
    GLYPHS
        .get(usize::from(index))
        .map_or_else(|| char::from_digit(u32::from(index % 10), 10).unwrap_or('?'), |&g| g as char)
}

fn state_suffix(state: EngineState) -> &'static str {
    match state {
        EngineState::GameOver => "  [game over]",
        EngineState::Ended => "  [ended]",
        _ => "",
    }
}

fn describe(event: &GameEvent) -> Option<String> {
    use GameEvent::*;

    Some(match event {
        NoMatch { .. } => "No match! Try again".to_string(),
        ComboTriggered(combo) => format!("{combo}x COMBO!"),
        LevelUp(level) => format!("Level {level}!"),
        GameOver { score, level } => {
            format!("Game over! Final score: {score}, level reached: {level}. Type \"new\" to play again")
        }
        GameEnded {
            score,
            level,
            moves_left,
        } => format!(
            "Game ended. Final score: {score}, level reached: {level}, with {moves_left} moves remaining"
        ),
        HintFound(a, b) => format!("Hint: swap {} {} with {} {}", a.0, a.1, b.0, b.1),
        NoHintAvailable => "No moves available!".to_string(),
        NewGame => "New game".to_string(),
        Selected(_) | Swapped { .. } | CellsMatched(_) | CascadeSettled => return None,
    })
}
