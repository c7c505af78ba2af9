use serde::{Deserialize, Serialize};

use crate::*;

/// Score, move budget and level bookkeeping for one game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub score: Score,
    pub moves_left: MoveCount,
    pub level: u32,
    pub target_score: Score,
    pub combo: u32,
}

impl Progress {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            score: 0,
            moves_left: config.starting_moves,
            level: 1,
            target_score: config.first_target,
            combo: 0,
        }
    }

    /// Charges one move for a committed swap and starts a fresh combo chain.
    pub fn begin_swap(&mut self) {
        self.moves_left = self.moves_left.saturating_sub(1);
        self.combo = 0;
    }

    /// Records one cascade pass that cleared `cleared` cells, returns the points awarded.
    pub fn award_pass(&mut self, cleared: usize, points_per_cell: Score) -> Score {
        self.combo += 1;
        let cleared = Score::try_from(cleared).unwrap_or(Score::MAX);
        let points = cleared
            .saturating_mul(points_per_cell)
            .saturating_mul(self.combo);
        self.score = self.score.saturating_add(points);
        points
    }

    /// Levels up once when the target is reached, returning the new level.
    pub fn check_level_up(&mut self, config: &GameConfig) -> Option<u32> {
        if self.score < self.target_score {
            return None;
        }
        self.level += 1;
        self.target_score = self.target_score.saturating_add(config.target_step);
        self.moves_left = self.moves_left.saturating_add(config.level_bonus_moves);
        Some(self.level)
    }

    pub fn is_out_of_moves(&self) -> bool {
        self.moves_left <= 0
    }

    /// Fraction of the current target reached, capped at 1.
    pub fn target_progress(&self) -> f32 {
        if self.target_score == 0 {
            return 1.0;
        }
        (self.score as f32 / self.target_score as f32).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chained_passes_multiply_by_combo() {
        let config = GameConfig::default();
        let mut progress = Progress::new(&config);
        progress.begin_swap();

        assert_eq!(progress.award_pass(4, config.points_per_cell), 40);
        assert_eq!(progress.award_pass(3, config.points_per_cell), 60);
        assert_eq!(progress.score, 100);
        assert_eq!(progress.combo, 2);
    }

    #[test]
    fn begin_swap_resets_combo_and_spends_a_move() {
        let config = GameConfig::default();
        let mut progress = Progress::new(&config);
        progress.combo = 3;

        progress.begin_swap();

        assert_eq!(progress.combo, 0);
        assert_eq!(progress.moves_left, config.starting_moves - 1);
    }

    #[test]
    fn level_up_raises_target_and_grants_moves_once() {
        let config = GameConfig::default();
        let mut progress = Progress::new(&config);
        progress.score = 2500;

        assert_eq!(progress.check_level_up(&config), Some(2));
        assert_eq!(progress.target_score, 2000);
        assert_eq!(progress.moves_left, config.starting_moves + 20);
        assert_eq!(progress.level, 2);
    }

    #[test]
    fn huge_move_budgets_saturate() {
        let config = GameConfig {
            starting_moves: MoveCount::MAX,
            level_bonus_moves: MoveCount::MAX,
            first_target: 0,
            ..GameConfig::default()
        };
        let mut progress = Progress::new(&config);
        progress.moves_left = MoveCount::MIN;

        progress.begin_swap();
        assert_eq!(progress.moves_left, MoveCount::MIN);

        progress.moves_left = MoveCount::MAX - 1;
        assert_eq!(progress.check_level_up(&config), Some(2));
        assert_eq!(progress.moves_left, MoveCount::MAX);
    }

    #[test]
    fn below_target_does_not_level() {
        let config = GameConfig::default();
        let mut progress = Progress::new(&config);
        progress.score = 999;

        assert_eq!(progress.check_level_up(&config), None);
        assert_eq!(progress.level, 1);
        assert!(progress.target_progress() > 0.99 && progress.target_progress() < 1.0);
    }
}
