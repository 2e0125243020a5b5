use std::time::{Duration, Instant};

use crate::game::GameOverReason;

/// Per-process play statistics shown in the footer
pub struct GameMetrics {
    pub session_start: Instant,
    pub elapsed_time: Duration,
    pub games_played: u32,
    pub last_score: Option<u32>,
    pub last_reason: Option<GameOverReason>,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            session_start: Instant::now(),
            elapsed_time: Duration::ZERO,
            games_played: 0,
            last_score: None,
            last_reason: None,
        }
    }

    /// Refresh the session timer; call only while the session is running
    pub fn update(&mut self) {
        self.elapsed_time = self.session_start.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.session_start = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    /// Pausing must not count as play time
    pub fn on_resume(&mut self) {
        let now = Instant::now();
        self.session_start = now.checked_sub(self.elapsed_time).unwrap_or(now);
    }

    pub fn on_game_over(&mut self, final_score: u32, reason: GameOverReason) {
        self.games_played += 1;
        self.last_score = Some(final_score);
        self.last_reason = Some(reason);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_game_over_tracking() {
        let mut metrics = GameMetrics::new();
        assert_eq!(metrics.last_score, None);

        metrics.on_game_over(10, GameOverReason::Wall);
        assert_eq!(metrics.games_played, 1);
        assert_eq!(metrics.last_score, Some(10));

        metrics.on_game_over(5, GameOverReason::SelfCollision);
        assert_eq!(metrics.games_played, 2);
        assert_eq!(metrics.last_score, Some(5));
        assert_eq!(metrics.last_reason, Some(GameOverReason::SelfCollision));
    }

    #[test]
    fn test_game_start_resets_time() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(50));
        metrics.update();

        assert!(metrics.elapsed_time.as_millis() >= 50);

        metrics.on_game_start();
        metrics.update();
        assert!(metrics.elapsed_time.as_millis() < 50);
    }

    #[test]
    fn test_resume_keeps_elapsed_time() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(30);

        metrics.on_resume();
        metrics.update();
        assert_eq!(metrics.elapsed_time.as_secs(), 30);
    }
}
