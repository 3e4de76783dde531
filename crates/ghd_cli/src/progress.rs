//! Scanline progress reporting.

use std::time::{Duration, Instant};

/// Estimated time left: elapsed * remaining / completed.
///
/// `None` until at least one row has finished.
pub fn eta(elapsed: Duration, rows_completed: u32, rows_remaining: u32) -> Option<Duration> {
    if rows_completed == 0 {
        return None;
    }
    Some(elapsed.mul_f64(f64::from(rows_remaining) / f64::from(rows_completed)))
}

/// Tracks rows rendered so far for the status line.
pub struct Progress {
    start: Instant,
    total_rows: u32,
    completed: u32,
}

impl Progress {
    pub fn new(total_rows: u32) -> Self {
        Self {
            start: Instant::now(),
            total_rows,
            completed: 0,
        }
    }

    pub fn row_done(&mut self) {
        self.completed = (self.completed + 1).min(self.total_rows);
    }

    pub fn remaining(&self) -> u32 {
        self.total_rows - self.completed
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Status line such as `Scanlines remaining: 12, ETA: 3.2s`.
    pub fn status(&self) -> String {
        format_status(self.remaining(), eta(self.elapsed(), self.completed, self.remaining()))
    }
}

fn format_status(remaining: u32, eta: Option<Duration>) -> String {
    match eta {
        Some(eta) => format!("Scanlines remaining: {}, ETA: {:.1}s", remaining, eta.as_secs_f64()),
        None => format!("Scanlines remaining: {}, ETA: --", remaining),
    }
}
