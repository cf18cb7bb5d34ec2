// ABOUTME: Debounced auto-save timer and the transient save status shown in the footer
// All time comes in as an `Instant` argument so tests can drive the clock

use std::time::{Duration, Instant};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(2000);
pub const DEFAULT_STATUS_RESET: Duration = Duration::from_millis(2000);

/// Restartable one-shot timer: every edit pushes the deadline back
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, deadline: None }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record an edit, restarting the quiet period
    pub fn touch(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// True exactly once per quiet period, when the deadline has passed
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    Idle,
    Saving,
    Saved,
    Error(String),
}

impl SaveStatus {
    pub fn label(&self) -> &str {
        match self {
            Self::Idle => "",
            Self::Saving => "Saving...",
            Self::Saved => "Draft saved",
            Self::Error(_) => "Save failed",
        }
    }
}

/// Save status that falls back to Idle a fixed time after Saved or Error
#[derive(Debug, Clone)]
pub struct SaveIndicator {
    status: SaveStatus,
    since: Option<Instant>,
    reset_after: Duration,
}

impl SaveIndicator {
    pub fn new(reset_after: Duration) -> Self {
        Self {
            status: SaveStatus::Idle,
            since: None,
            reset_after,
        }
    }

    pub fn status(&self) -> &SaveStatus {
        &self.status
    }

    pub fn set(&mut self, status: SaveStatus, now: Instant) {
        self.status = status;
        self.since = Some(now);
    }

    pub fn tick(&mut self, now: Instant) {
        let settled = matches!(self.status, SaveStatus::Saved | SaveStatus::Error(_));
        if let (true, Some(since)) = (settled, self.since) {
            if now.duration_since(since) >= self.reset_after {
                self.status = SaveStatus::Idle;
                self.since = None;
            }
        }
    }
}

impl Default for SaveIndicator {
    fn default() -> Self {
        Self::new(DEFAULT_STATUS_RESET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debounce_fires_once_after_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(2000));

        debouncer.touch(start);
        debouncer.touch(start + Duration::from_millis(1500));

        assert!(!debouncer.fire(start + Duration::from_millis(2000)));
        assert!(debouncer.fire(start + Duration::from_millis(3500)));
        assert!(!debouncer.fire(start + Duration::from_millis(9000)));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_indicator_resets_saved_and_error_only() {
        let start = Instant::now();
        let mut indicator = SaveIndicator::new(Duration::from_secs(2));

        indicator.set(SaveStatus::Saving, start);
        indicator.tick(start + Duration::from_secs(10));
        assert_eq!(indicator.status(), &SaveStatus::Saving);

        indicator.set(SaveStatus::Error("disk full".into()), start);
        indicator.tick(start + Duration::from_secs(1));
        assert_eq!(indicator.status().label(), "Save failed");
        indicator.tick(start + Duration::from_secs(2));
        assert_eq!(indicator.status(), &SaveStatus::Idle);
    }
}
