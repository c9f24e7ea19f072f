//! Time management utilities

use std::time::{Duration, Instant};

/// Simple stopwatch for measuring elapsed time
///
/// The scene's frame loop restarts one of these every update to derive the
/// per-frame elapsed time internally.
pub struct Stopwatch {
    start_time: Option<Instant>,
    elapsed: Duration,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    /// Create a new stopped stopwatch
    pub fn new() -> Self {
        Self {
            start_time: None,
            elapsed: Duration::ZERO,
        }
    }

    /// Create a new stopwatch and start it immediately
    pub fn start_new() -> Self {
        let mut stopwatch = Self::new();
        stopwatch.start();
        stopwatch
    }

    /// Start the stopwatch
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Stop the stopwatch and accumulate elapsed time
    pub fn stop(&mut self) {
        if let Some(start) = self.start_time {
            self.elapsed += start.elapsed();
            self.start_time = None;
        }
    }

    /// Restart the stopwatch (reset to zero and start)
    pub fn restart(&mut self) {
        self.start_time = Some(Instant::now());
        self.elapsed = Duration::ZERO;
    }

    /// Get the elapsed time
    pub fn elapsed(&self) -> Duration {
        let current_elapsed = if let Some(start) = self.start_time {
            start.elapsed()
        } else {
            Duration::ZERO
        };
        self.elapsed + current_elapsed
    }

    /// Get the elapsed time in seconds
    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed().as_secs_f32()
    }

    /// Get the elapsed time in microseconds
    pub fn elapsed_micros(&self) -> f32 {
        self.elapsed().as_secs_f32() * 1_000_000.0
    }

    /// Check if the stopwatch is currently running
    pub fn is_running(&self) -> bool {
        self.start_time.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopwatch_accumulates_while_running() {
        let sw = Stopwatch::start_new();
        assert!(sw.is_running());
        assert!(sw.elapsed_micros() >= 0.0);
    }

    #[test]
    fn test_stopwatch_restart_resets_accumulated_time() {
        let mut sw = Stopwatch::start_new();
        sw.stop();
        sw.restart();
        assert!(sw.is_running());
        // elapsed after restart only counts time since restart
        assert!(sw.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_stopped_stopwatch_holds_elapsed() {
        let mut sw = Stopwatch::start_new();
        sw.stop();
        let held = sw.elapsed();
        assert_eq!(sw.elapsed(), held);
    }
}
