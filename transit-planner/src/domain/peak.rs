//! Rush-hour windows.

use chrono::{Local, Timelike};

/// An inclusive range of clock hours, e.g. 08:00 to 10:59 is `8..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeakWindow {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl PeakWindow {
    pub const fn new(start_hour: u32, end_hour: u32) -> Self {
        Self {
            start_hour,
            end_hour,
        }
    }

    /// Whether `hour` falls inside the window. Both endpoints are included.
    pub fn contains(&self, hour: u32) -> bool {
        hour >= self.start_hour && hour <= self.end_hour
    }
}

/// Morning and evening rush hours.
pub const DEFAULT_PEAK_WINDOWS: [PeakWindow; 2] = [PeakWindow::new(8, 10), PeakWindow::new(17, 19)];

/// Whether `hour` is inside any of the given windows.
pub fn is_peak_hour(windows: &[PeakWindow], hour: u32) -> bool {
    windows.iter().any(|w| w.contains(hour))
}

/// The current local wall-clock hour (0-23).
pub fn current_hour() -> u32 {
    Local::now().hour()
}
