//! Scoring and round transitions
//!
//! Gems raise the score by a growing multiplier; a panel hit resets it. When
//! the round is lost or won the scene changes after a fixed delay.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::time::{Millis, Stopwatch, StopwatchError};

/// What the host should do with the current scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneRequest {
    /// Replay the current level
    Reload,
    /// Move on to the next level
    Advance,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreKeeper {
    pub total_gems: u32,
    pub gems_collected: u32,
    /// Gems collected since the ball last touched a panel
    pub consecutive_gems: u32,
    pub score: u64,
    pub multiplier: f32,
    is_game_over: bool,
    is_game_won: bool,
    /// Times the delay before the scene changes
    timer: Stopwatch,
    points_per_gem: u32,
    multiplier_step: f32,
    restart_delay_ms: Millis,
}

impl ScoreKeeper {
    pub fn new(total_gems: u32, settings: &Settings) -> Self {
        Self {
            total_gems,
            gems_collected: 0,
            consecutive_gems: 0,
            score: 0,
            multiplier: 1.0,
            is_game_over: false,
            is_game_won: false,
            timer: Stopwatch::new(),
            points_per_gem: settings.points_per_gem,
            multiplier_step: settings.multiplier_step,
            restart_delay_ms: settings.restart_delay_ms,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    pub fn is_game_won(&self) -> bool {
        self.is_game_won
    }

    /// Round finished either way
    pub fn is_round_over(&self) -> bool {
        self.is_game_over || self.is_game_won
    }

    /// Score a gem; the last gem wins the round
    pub fn collect_gem(&mut self, now: Millis) {
        if self.is_round_over() {
            return;
        }
        self.gems_collected += 1;
        self.consecutive_gems += 1;
        self.score += (self.points_per_gem as f32 * self.multiplier) as u64;
        self.multiplier += self.multiplier_step;

        if self.gems_collected >= self.total_gems {
            log::info!("All {} gems collected, score {}", self.total_gems, self.score);
            self.is_game_won = true;
            self.begin_transition(now);
        }
    }

    /// Ball touched a panel
    pub fn panel_hit(&mut self) {
        self.multiplier = 1.0;
        self.consecutive_gems = 0;
    }

    /// Ball left the arena. Only the first call counts.
    pub fn game_over(&mut self, now: Millis) {
        if self.is_round_over() {
            return;
        }
        log::info!("Game over, score {}", self.score);
        self.is_game_over = true;
        self.begin_transition(now);
    }

    /// Scene change due this frame, if any
    pub fn poll(&self, now: Millis) -> Option<SceneRequest> {
        if !self.is_round_over() {
            return None;
        }
        match self.timer.has_reached_mark(now) {
            Ok(true) if self.is_game_over => Some(SceneRequest::Reload),
            Ok(true) => Some(SceneRequest::Advance),
            Ok(false) => None,
            Err(StopwatchError::MarkNotSet) => {
                log::warn!("Round over without a transition mark");
                None
            }
        }
    }

    fn begin_transition(&mut self, now: Millis) {
        self.timer.start(now);
        self.timer.set_mark(now, self.restart_delay_ms);
    }
}

/// Position in the level list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub current: usize,
    pub count: usize,
}

impl LevelProgress {
    pub fn new(count: usize) -> Self {
        Self {
            current: 0,
            count: count.max(1),
        }
    }

    /// Next level, wrapping back to the first after the last
    pub fn advance(&mut self) -> usize {
        self.current = if self.current + 1 < self.count {
            self.current + 1
        } else {
            0
        };
        self.current
    }

    pub fn apply(&mut self, request: SceneRequest) -> usize {
        match request {
            SceneRequest::Reload => self.current,
            SceneRequest::Advance => self.advance(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keeper(gems: u32) -> ScoreKeeper {
        ScoreKeeper::new(gems, &Settings::default())
    }

    #[test]
    fn test_multiplier_grows_and_resets() {
        let mut score = keeper(10);
        score.collect_gem(0);
        score.collect_gem(0);
        score.collect_gem(0);
        // 100 + 150 + 200
        assert_eq!(score.score, 450);
        assert_eq!(score.consecutive_gems, 3);

        score.panel_hit();
        assert_eq!(score.multiplier, 1.0);
        assert_eq!(score.consecutive_gems, 0);
        score.collect_gem(0);
        assert_eq!(score.score, 550);
        assert_eq!(score.gems_collected, 4);
    }

    #[test]
    fn test_win_advances_after_delay() {
        let mut score = keeper(2);
        score.collect_gem(1000);
        assert!(!score.is_game_won());
        score.collect_gem(1000);
        assert!(score.is_game_won());

        assert_eq!(score.poll(2999), None);
        assert_eq!(score.poll(3000), Some(SceneRequest::Advance));
    }

    #[test]
    fn test_game_over_reloads_once() {
        let mut score = keeper(5);
        assert_eq!(score.poll(0), None);
        score.game_over(100);
        score.game_over(1500);

        assert_eq!(score.poll(2099), None);
        assert_eq!(score.poll(2100), Some(SceneRequest::Reload));

        // A gem after the round ended changes nothing
        score.collect_gem(2200);
        assert_eq!(score.gems_collected, 0);
    }

    #[test]
    fn test_level_progress_wraps() {
        let mut levels = LevelProgress::new(3);
        assert_eq!(levels.apply(SceneRequest::Reload), 0);
        assert_eq!(levels.apply(SceneRequest::Advance), 1);
        assert_eq!(levels.advance(), 2);
        assert_eq!(levels.advance(), 0);
    }
}
