//! Logical session clock.

use serde::{Deserialize, Serialize};

/// Milliseconds since the session began.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct SessionTime(pub u64);

impl SessionTime {
    pub const START: SessionTime = SessionTime(0);

    pub fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// A point `ms` later than this one.
    pub fn plus(&self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }

    /// Advance the clock by `ms`.
    pub fn advance(&mut self, ms: u64) {
        self.0 = self.0.saturating_add(ms);
    }

    /// Milliseconds between `earlier` and this point (zero if `earlier` is later).
    pub fn elapsed_since(&self, earlier: SessionTime) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// This point as a `MM:SS` clock reading.
    pub fn as_clock(&self) -> String {
        format_clock(self.0)
    }
}

/// Format a millisecond span as `MM:SS`.
pub fn format_clock(ms: u64) -> String {
    let total_seconds = ms / 1000;
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance() {
        let mut now = SessionTime::START;
        now.advance(600);
        now.advance(400);
        assert_eq!(now, SessionTime::from_millis(1000));
        assert_eq!(now.plus(500).as_millis(), 1500);
    }

    #[test]
    fn test_elapsed_since() {
        let start = SessionTime::from_millis(2_000);
        let now = SessionTime::from_millis(65_500);
        assert_eq!(now.elapsed_since(start), 63_500);
        assert_eq!(start.elapsed_since(now), 0);
        assert_eq!(now.as_clock(), "01:05");
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(63_500), "01:03");
        assert_eq!(format_clock(600_000), "10:00");
    }
}
