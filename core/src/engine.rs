use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    Idle,
    AwaitingSecondTap,
    /// A committed swap is being cascaded, new gestures are ignored.
    Resolving,
    /// Out of moves.
    GameOver,
    /// Ended on request of the player.
    Ended,
}

impl EngineState {
    pub const fn is_resolving(self) -> bool {
        matches!(self, Self::Resolving)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::GameOver | Self::Ended)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Idle
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TapOutcome {
    Ignored,
    Selected,
    /// A non-adjacent second tap moved the selection.
    Reselected,
    /// The swap formed no match and was reverted.
    NoMatch,
    /// The swap was committed, the engine is now resolving.
    Swapped,
}

impl TapOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Nothing to resolve.
    Idle,
    Pass {
        cleared: usize,
        combo: u32,
        points: Score,
    },
    /// The board is stable again and progression was evaluated.
    Settled,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HintOutcome {
    Ignored,
    Found(Coord2, Coord2),
    NoneAvailable,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EndOutcome {
    Ended,
    /// Requested mid-cascade, applied once the board settles.
    Deferred,
}

/// A single game: board, progression and the tap state machine.
///
/// All mutation goes through [`tap`](Self::tap), [`step`](Self::step),
/// [`start_new_game`](Self::start_new_game) and [`end_game`](Self::end_game).
/// Renderers read [`snapshot`](Self::snapshot) and drain [`GameEvent`]s.
#[derive(Clone, Debug)]
pub struct MatchEngine<S = RandomTokens> {
    config: GameConfig,
    board: Board,
    source: S,
    progress: Progress,
    state: EngineState,
    selection: Option<Coord2>,
    end_requested: bool,
    events: Vec<GameEvent>,
    revision: u64,
}

impl MatchEngine<RandomTokens> {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self::with_source(config, RandomTokens::new(seed))
    }
}

impl<S: TokenSource> MatchEngine<S> {
    pub fn with_source(config: GameConfig, mut source: S) -> Self {
        let config = config.sanitized();
        let board = Board::generate(config.size, config.palette, &mut source);
        Self::assemble(config, board, source)
    }

    /// Starts from a given resting board, which must be full, match-free and fit `config`.
    pub fn from_board(config: GameConfig, board: Board, source: S) -> Result<Self> {
        let config = config.sanitized();
        if board.size() != config.size
            || board.palette() != config.palette
            || !board.is_full()
            || has_any_match(&board)
        {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(Self::assemble(config, board, source))
    }

    /// Replaces the progression state, e.g. to replay a scenario mid-game.
    pub fn with_progress(mut self, progress: Progress) -> Self {
        self.progress = progress;
        self.revision += 1;
        self
    }

    fn assemble(config: GameConfig, board: Board, source: S) -> Self {
        Self {
            progress: Progress::new(&config),
            config,
            board,
            source,
            state: EngineState::Idle,
            selection: None,
            end_requested: false,
            events: Vec::new(),
            revision: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn selection(&self) -> Option<Coord2> {
        self.selection
    }

    /// Bumped on every change a renderer could observe.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_engine(self)
    }

    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        core::mem::take(&mut self.events)
    }

    /// Single input entry point: first tap selects, an adjacent second tap swaps.
    pub fn tap(&mut self, coords: Coord2) -> Result<TapOutcome> {
        use EngineState::*;

        self.check_not_finished()?;
        if self.state.is_resolving() {
            log::debug!("Ignoring tap at {:?} while resolving", coords);
            return Ok(TapOutcome::Ignored);
        }
        let coords = self.board.validate_coords(coords)?;

        match (self.state, self.selection) {
            (AwaitingSecondTap, Some(selected)) if is_adjacent(selected, coords) => {
                Ok(self.attempt_swap(selected, coords))
            }
            (AwaitingSecondTap, Some(_)) => {
                self.select(coords);
                Ok(TapOutcome::Reselected)
            }
            _ => {
                self.select(coords);
                Ok(TapOutcome::Selected)
            }
        }
    }

    /// Runs one cascade pass of the pending swap.
    ///
    /// Each pass is a point where a renderer may pause to animate.
    pub fn step(&mut self) -> StepOutcome {
        if !self.state.is_resolving() {
            return StepOutcome::Idle;
        }

        let Some(report) = run_pass(
            &mut self.board,
            &mut self.source,
            &mut self.progress,
            self.config.points_per_cell,
        ) else {
            self.settle();
            return StepOutcome::Settled;
        };

        let outcome = StepOutcome::Pass {
            cleared: report.matched.len(),
            combo: report.combo,
            points: report.points,
        };
        self.events.push(GameEvent::CellsMatched(report.matched));
        if report.combo > 1 {
            self.events.push(GameEvent::ComboTriggered(report.combo));
        }
        self.touch();
        outcome
    }

    /// Steps until the board settles, returning how many passes scored.
    pub fn resolve(&mut self) -> usize {
        let mut passes = 0;
        while let StepOutcome::Pass { .. } = self.step() {
            passes += 1;
        }
        passes
    }

    pub fn request_hint(&mut self) -> Result<HintOutcome> {
        self.check_not_finished()?;
        if self.state.is_resolving() {
            return Ok(HintOutcome::Ignored);
        }

        Ok(match find_hint(&mut self.board) {
            Some((a, b)) => {
                self.events.push(GameEvent::HintFound(a, b));
                HintOutcome::Found(a, b)
            }
            None => {
                log::debug!("No valid moves left on the board");
                self.events.push(GameEvent::NoHintAvailable);
                HintOutcome::NoneAvailable
            }
        })
    }

    /// Resets board and progression. Ignored while a cascade is resolving.
    pub fn start_new_game(&mut self) -> bool {
        if self.state.is_resolving() {
            log::warn!("New game requested while resolving, ignored");
            return false;
        }

        self.board = Board::generate(self.config.size, self.config.palette, &mut self.source);
        self.progress = Progress::new(&self.config);
        self.state = EngineState::Idle;
        self.selection = None;
        self.end_requested = false;
        self.events.push(GameEvent::NewGame);
        self.touch();
        true
    }

    pub fn end_game(&mut self) -> Result<EndOutcome> {
        self.check_not_finished()?;

        if self.state.is_resolving() {
            log::debug!("End of game requested while resolving, deferring");
            self.end_requested = true;
            return Ok(EndOutcome::Deferred);
        }

        self.finish_by_player();
        self.touch();
        Ok(EndOutcome::Ended)
    }

    fn select(&mut self, coords: Coord2) {
        self.selection = Some(coords);
        self.state = EngineState::AwaitingSecondTap;
        self.events.push(GameEvent::Selected(coords));
        self.touch();
    }

    fn attempt_swap(&mut self, from: Coord2, to: Coord2) -> TapOutcome {
        self.selection = None;
        self.board.swap_cells(from, to);

        if has_any_match(&self.board) {
            log::debug!("Swap {:?} <-> {:?} matched", from, to);
            self.progress.begin_swap();
            self.state = EngineState::Resolving;
            self.events.push(GameEvent::Swapped { from, to });
            self.touch();
            TapOutcome::Swapped
        } else {
            log::debug!("Swap {:?} <-> {:?} formed no match, reverting", from, to);
            self.board.swap_cells(from, to);
            self.state = EngineState::Idle;
            self.events.push(GameEvent::NoMatch { from, to });
            self.touch();
            TapOutcome::NoMatch
        }
    }

    /// Evaluates level-up, then game-over, then a deferred end request.
    fn settle(&mut self) {
        self.state = EngineState::Idle;
        self.events.push(GameEvent::CascadeSettled);

        if let Some(level) = self.progress.check_level_up(&self.config) {
            log::debug!(
                "Reached level {}, next target {}",
                level,
                self.progress.target_score
            );
            self.events.push(GameEvent::LevelUp(level));
        }

        if self.progress.is_out_of_moves() {
            log::debug!(
                "Out of moves, final score {} at level {}",
                self.progress.score,
                self.progress.level
            );
            self.state = EngineState::GameOver;
            self.end_requested = false;
            self.events.push(GameEvent::GameOver {
                score: self.progress.score,
                level: self.progress.level,
            });
        } else if self.end_requested {
            self.end_requested = false;
            self.finish_by_player();
        }

        self.touch();
    }

    fn finish_by_player(&mut self) {
        self.state = EngineState::Ended;
        self.selection = None;
        self.events.push(GameEvent::GameEnded {
            score: self.progress.score,
            level: self.progress.level,
            moves_left: self.progress.moves_left,
        });
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}
