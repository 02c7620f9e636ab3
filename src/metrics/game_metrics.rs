use std::time::{Duration, Instant};

/// Per-process statistics shown alongside the board
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    /// Longest snake seen since the program started
    pub best_length: usize,
    /// Runs started, counting the first one
    pub runs: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            best_length: 0,
            runs: 1,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    /// Note the current length without ending the run
    pub fn observe_length(&mut self, length: usize) {
        self.best_length = self.best_length.max(length);
    }

    /// A run ended at `final_length` (self-collision or restart) and a new
    /// one begins
    pub fn on_run_over(&mut self, final_length: usize) {
        self.observe_length(final_length);
        self.runs += 1;
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
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
