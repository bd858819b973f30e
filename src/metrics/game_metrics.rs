use std::time::{Duration, Instant};

/// Per-session figures shown in the terminal header
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    pub total_score: u64,
    /// False between game over and the next start, the clock is frozen
    pub is_running: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            total_score: 0,
            is_running: true,
        }
    }

    /// Refresh the clock of the current game
    pub fn update(&mut self) {
        if self.is_running {
            self.elapsed_time = self.start_time.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.is_running = true;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.update();
        self.is_running = false;
        self.games_played += 1;
        self.total_score += u64::from(final_score);
        self.high_score = self.high_score.max(final_score);
    }

    /// Average final score over finished games
    pub fn mean_score(&self) -> f32 {
        if self.games_played == 0 {
            0.0
        } else {
            self.total_score as f32 / self.games_played as f32
        }
    }

    /// Elapsed time of the current game as `mm:ss`
    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
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

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_game_over_tracking() {
        let mut metrics = GameMetrics::new();
        assert_eq!(metrics.mean_score(), 0.0);

        metrics.on_game_over(10);
        metrics.on_game_over(5);
        assert_eq!(metrics.high_score, 10);
        assert_eq!(metrics.games_played, 2);
        assert!((metrics.mean_score() - 7.5).abs() < 1e-6);

        metrics.on_game_over(15);
        assert_eq!(metrics.high_score, 15);
        assert_eq!(metrics.total_score, 30);
    }

    #[test]
    fn test_game_start_resets_clock() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(50));
        metrics.update();
        assert!(metrics.elapsed_time.as_millis() >= 50);

        metrics.on_game_start();
        metrics.update();
        assert!(metrics.elapsed_time.as_millis() < 50);
    }

    #[test]
    fn test_clock_frozen_after_game_over() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(20));
        metrics.on_game_over(3);
        assert!(!metrics.is_running);
        let at_death = metrics.elapsed_time;
        assert!(at_death.as_millis() >= 20);

        // The game-over screen keeps redrawing without moving the clock
        std::thread::sleep(Duration::from_millis(30));
        metrics.update();
        assert_eq!(metrics.elapsed_time, at_death);

        metrics.on_game_start();
        assert!(metrics.is_running);
        metrics.update();
        assert!(metrics.elapsed_time < at_death);
    }
}
