//! Tick-driven animators.
//!
//! Every animator owns an [`AnimId`](super::messages::AnimId), re-arms itself
//! by returning a `Cmd::After` carrying `Msg::Tick(id)`, and ignores ticks
//! with any other id or while it is inactive. Stopping is simply not asking
//! for another tick.

mod cursor;
mod glitch;
mod gradient;
mod shimmer;
mod tab_glow;
mod transition;
mod typewriter;

pub use cursor::{Cursor, CURSOR_GLYPH};
pub use glitch::{Glitch, GLITCH_GLYPHS};
pub use gradient::{gradient_text, GradientAnim};
pub use shimmer::{fbm_noise, lattice_hash, smooth_noise_3d, smooth_threshold, Shimmer, EMPTY_BRAILLE};
pub use tab_glow::TabGlow;
pub use transition::{shift_line, Direction, Transition};
pub use typewriter::Typewriter;

use std::time::Duration;

/// Every tuned interval in the engine. Cosmetic only; the defaults are the
/// values the UI was designed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// Frame interval for shimmer, tab glow and transitions.
    pub frame: Duration,
    pub cursor_blink: Duration,
    pub typewriter: Duration,
    pub gradient: Duration,
    pub intro_line: Duration,
    /// Pause before the last intro line.
    pub intro_final: Duration,
    /// Pause after the last intro line before the intro ends.
    pub intro_hold: Duration,
    pub reveal: Duration,
    pub idle_check: Duration,
    /// How long before the idle timeout the warning appears.
    pub idle_warning: Duration,
    pub copy_feedback: Duration,
    pub tab_glow: Duration,
    pub glitch: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            frame: Duration::from_millis(16),
            cursor_blink: Duration::from_millis(530),
            typewriter: Duration::from_millis(50),
            gradient: Duration::from_millis(50),
            intro_line: Duration::from_millis(150),
            intro_final: Duration::from_millis(600),
            intro_hold: Duration::from_millis(1200),
            reveal: Duration::from_millis(120),
            idle_check: Duration::from_secs(10),
            idle_warning: Duration::from_secs(60),
            copy_feedback: Duration::from_secs(2),
            tab_glow: Duration::from_millis(600),
            glitch: Duration::from_millis(40),
        }
    }
}

/// Cubic ease-in-out over `[0, 1]`.
pub fn ease_in_out(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

/// Hermite smoothstep over `[0, 1]`, clamping its input.
pub fn smoothstep(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_endpoints_and_midpoint() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert!((ease_in_out(0.5) - 0.5).abs() < 1e-12);
        assert!(ease_in_out(0.25) < 0.25);
        assert!(ease_in_out(0.75) > 0.75);
    }

    #[test]
    fn smoothstep_clamps() {
        assert_eq!(smoothstep(-1.0), 0.0);
        assert_eq!(smoothstep(2.0), 1.0);
        assert_eq!(smoothstep(0.5), 0.5);
    }

    #[test]
    fn default_timings() {
        let t = Timings::default();
        assert_eq!(t.frame, Duration::from_millis(16));
        assert_eq!(t.cursor_blink, Duration::from_millis(530));
        assert!(t.idle_warning > t.idle_check);
    }
}
