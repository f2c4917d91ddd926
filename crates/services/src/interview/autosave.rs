use chrono::{DateTime, Duration, Utc};

/// Seconds between autosave attempts while an interview is open.
pub const AUTOSAVE_INTERVAL_SECS: i64 = 30;

/// Recurring autosave schedule driven by an external clock.
///
/// The timer never reads the wall clock itself; callers pass `now` from the
/// services `Clock`, so tests fast-forward by advancing a fixed clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutosaveTimer {
    interval: Duration,
    next_due: Option<DateTime<Utc>>,
}

impl Default for AutosaveTimer {
    fn default() -> Self {
        Self::new(Duration::seconds(AUTOSAVE_INTERVAL_SECS))
    }
}

impl AutosaveTimer {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// (Re)start the countdown from `now`. The interactive loop arms once at startup
    /// and polls after every command.
    pub fn arm(&mut self, now: DateTime<Utc>) {
        self.next_due = Some(now + self.interval);
    }

    /// Stop the schedule, e.g. when the session view is torn down.
    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    #[must_use]
    pub fn next_due(&self) -> Option<DateTime<Utc>> {
        self.next_due
    }

    /// Returns true once per elapsed interval; the next deadline is counted from `now`.
    pub fn poll(&mut self, now: DateTime<Utc>) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scorecard_core::time::fixed_clock;

    #[test]
    fn fires_after_interval_and_rearms() {
        let mut clock = fixed_clock();
        let mut timer = AutosaveTimer::default();
        assert!(!timer.poll(clock.now()), "unarmed timer never fires");

        timer.arm(clock.now());
        clock.advance(Duration::seconds(29));
        assert!(!timer.poll(clock.now()));

        clock.advance(Duration::seconds(1));
        assert!(timer.poll(clock.now()));
        assert!(!timer.poll(clock.now()), "fires once per interval");

        clock.advance(Duration::seconds(30));
        assert!(timer.poll(clock.now()));
    }

    #[test]
    fn rearming_pushes_deadline_back() {
        let mut clock = fixed_clock();
        let mut timer = AutosaveTimer::default();
        timer.arm(clock.now());

        clock.advance(Duration::seconds(20));
        timer.arm(clock.now());
        clock.advance(Duration::seconds(20));
        assert!(!timer.poll(clock.now()));

        clock.advance(Duration::seconds(10));
        assert!(timer.poll(clock.now()));
    }

    #[test]
    fn cancel_stops_schedule() {
        let mut clock = fixed_clock();
        let mut timer = AutosaveTimer::new(Duration::seconds(5));
        timer.arm(clock.now());
        timer.cancel();
        clock.advance(Duration::minutes(5));
        assert!(!timer.poll(clock.now()));
        assert!(!timer.is_armed());
    }
}
