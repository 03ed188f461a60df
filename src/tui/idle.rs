//! Idle session tracking.
//!
//! Elapsed time comes from a [`Clock`] so tests can drive it by hand; the
//! periodic check itself is an ordinary `Msg::IdleCheck` timer.

use super::messages::Msg;
use super::runtime::Cmd;
use super::style::paint;
use super::text;
use super::theme::Theme;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tracing::info;

pub trait Clock: Send {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub struct IdleTracker {
    timeout: Duration,
    warning_window: Duration,
    check_interval: Duration,
    clock: Box<dyn Clock>,
    last_activity: Instant,
    /// Remaining time while the warning is up.
    warning: Option<Duration>,
}

impl IdleTracker {
    /// A zero `timeout` disables tracking entirely.
    pub fn new(
        timeout: Duration,
        warning_window: Duration,
        check_interval: Duration,
        clock: Box<dyn Clock>,
    ) -> Self {
        let last_activity = clock.now();
        Self {
            timeout,
            warning_window,
            check_interval,
            clock,
            last_activity,
            warning: None,
        }
    }

    pub fn disabled() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO, Duration::ZERO, Box::new(SystemClock))
    }

    pub fn enabled(&self) -> bool {
        !self.timeout.is_zero()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// First periodic check, or nothing when disabled.
    pub fn start(&self) -> Cmd {
        if !self.enabled() {
            return Cmd::none();
        }
        Cmd::after(self.check_interval, Msg::IdleCheck)
    }

    /// Record user activity and drop any warning.
    pub fn reset(&mut self) {
        if self.enabled() {
            self.last_activity = self.clock.now();
            self.warning = None;
        }
    }

    /// Compare idle time with the timeout: quit once it is reached, raise
    /// the warning inside the warning window, and schedule the next check.
    pub fn check(&mut self) -> Cmd {
        if !self.enabled() {
            return Cmd::none();
        }
        let elapsed = self.clock.now().saturating_duration_since(self.last_activity);
        if elapsed >= self.timeout {
            info!(idle_secs = elapsed.as_secs(), "idle timeout reached, ending session");
            return Cmd::Quit;
        }
        let remaining = self.timeout - elapsed;
        if remaining <= self.warning_window {
            self.warning = Some(remaining);
        }
        Cmd::after(self.check_interval, Msg::IdleCheck)
    }

    pub fn warning(&self) -> Option<Duration> {
        self.warning
    }

    pub fn warning_visible(&self) -> bool {
        self.warning.is_some()
    }

    /// The warning banner centered in `width` columns, if it is up.
    pub fn view(&self, theme: &Theme, width: usize) -> Option<String> {
        let remaining = self.warning?;
        let message = format!(
            " Idle timeout in {}s — press any key to stay connected ",
            remaining.as_secs()
        );
        let banner = paint(theme.badge(), &message);
        if width == 0 {
            return Some(banner);
        }
        Some(text::center(&banner, width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker(clock: &ManualClock, timeout_secs: u64) -> IdleTracker {
        IdleTracker::new(
            Duration::from_secs(timeout_secs),
            Duration::from_secs(60),
            Duration::from_secs(10),
            Box::new(clock.clone()),
        )
    }

    #[test]
    fn zero_timeout_is_inert() {
        let clock = ManualClock::new();
        let mut idle = tracker(&clock, 0);
        assert!(idle.start().is_none());
        clock.advance(Duration::from_secs(100_000));
        assert!(idle.check().is_none());
        assert!(!idle.warning_visible());
    }

    #[test]
    fn warns_inside_window() {
        let clock = ManualClock::new();
        let mut idle = tracker(&clock, 300);
        assert_eq!(idle.start(), Cmd::after(Duration::from_secs(10), Msg::IdleCheck));

        clock.advance(Duration::from_secs(200));
        assert_eq!(idle.check(), Cmd::after(Duration::from_secs(10), Msg::IdleCheck));
        assert!(!idle.warning_visible());

        clock.advance(Duration::from_secs(70));
        idle.check();
        assert_eq!(idle.warning(), Some(Duration::from_secs(30)));
        let banner = idle.view(&Theme::dark(), 80).unwrap_or_default();
        assert!(text::strip_ansi(&banner).contains("Idle timeout in 30s"));
        assert_eq!(text::width(&banner), 80);
    }

    #[test]
    fn activity_clears_warning() {
        let clock = ManualClock::new();
        let mut idle = tracker(&clock, 300);
        clock.advance(Duration::from_secs(290));
        idle.check();
        assert!(idle.warning_visible());
        idle.reset();
        assert!(!idle.warning_visible());
        clock.advance(Duration::from_secs(290));
        assert!(!idle.check().is_quit());
    }

    #[test]
    fn quits_at_timeout() {
        let clock = ManualClock::new();
        let mut idle = tracker(&clock, 300);
        clock.advance(Duration::from_secs(300));
        assert_eq!(idle.check(), Cmd::Quit);
    }
}
