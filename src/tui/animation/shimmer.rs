//! Noise-driven brightness shimmer for text blocks.
//!
//! Brightness comes from a time-evolving 3D value-noise field sampled per
//! cell. Three layers at different scales (medium blobs, a broad slow wash,
//! fine speckles) each drift sideways per row with their own sum of
//! incommensurate sinusoids, so rows speed up, pause and occasionally
//! reverse. A slow global breath scales the result.

use crate::tui::color::{grey, Rgb};
use crate::tui::messages::{AnimId, Msg};
use crate::tui::runtime::Cmd;
use crate::tui::style::{fg, paint};
use crate::tui::theme::Theme;
use ratatui::style::Color;
use std::time::Duration;

/// The blank Braille cell. It has no dots to light, so it is passed through
/// unstyled.
pub const EMPTY_BRAILLE: char = '\u{2800}';

/// Below this boost a cell is drawn in the base grey.
const MIN_BOOST: f64 = 0.005;

#[derive(Debug, Clone)]
pub struct Shimmer {
    id: AnimId,
    active: bool,
    frame: u64,
    interval: Duration,
    /// OkLab lightness of the resting grey.
    base_l: f64,
    /// OkLab lightness at full boost.
    peak_l: f64,
}

impl Shimmer {
    pub fn new(theme: &Theme) -> Self {
        let mut shimmer = Self {
            id: AnimId::next(),
            active: false,
            frame: 0,
            interval: Duration::from_millis(16),
            base_l: 0.5,
            peak_l: 0.5,
        };
        shimmer.set_theme(theme);
        shimmer
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn id(&self) -> AnimId {
        self.id
    }

    /// Restart from frame zero.
    pub fn start(&mut self) -> Cmd {
        self.active = true;
        self.frame = 0;
        self.tick()
    }

    pub fn stop(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn update(&mut self, msg: &Msg) -> Cmd {
        if !self.active || *msg != Msg::Tick(self.id) {
            return Cmd::none();
        }
        self.frame += 1;
        self.tick()
    }

    /// Base and peak greys follow the muted and foreground colors. A
    /// non-RGB theme color leaves the old value in place.
    pub fn set_theme(&mut self, theme: &Theme) {
        if let Some(l) = lightness(theme.colors.muted) {
            self.base_l = l;
        }
        if let Some(l) = lightness(theme.colors.fg) {
            self.peak_l = l;
        }
    }

    /// Style every glyph of `text` by its brightness. `text_width` is the
    /// widest line in columns; zero returns the text untouched.
    pub fn render(&self, text: &str, text_width: usize) -> String {
        if text_width == 0 {
            return text.to_string();
        }

        let base = fg(grey(self.base_l).to_color());
        let mut out = String::with_capacity(text.len() * 4);
        for (row, line) in text.split('\n').enumerate() {
            if row > 0 {
                out.push('\n');
            }
            let mut buf = [0u8; 4];
            for (col, ch) in line.chars().enumerate() {
                let glyph = ch.encode_utf8(&mut buf);
                if ch == EMPTY_BRAILLE {
                    out.push_str(glyph);
                    continue;
                }
                let boost = self.brightness_at(row, col, text_width);
                let style = if boost > MIN_BOOST {
                    let l = self.base_l + (self.peak_l - self.base_l) * boost;
                    fg(grey(l).to_color())
                } else {
                    base
                };
                out.push_str(&paint(style, glyph));
            }
        }
        out
    }

    /// Brightness boost in `[0, 1]` for one cell at the current frame.
    pub fn brightness_at(&self, row: usize, col: usize, text_width: usize) -> f64 {
        if text_width == 0 {
            return 0.0;
        }
        let t = self.frame as f64;
        let r = row as f64;
        let c = col as f64;

        let drift = 3.0 * (t * 0.006 + r * 0.41).sin()
            + 2.0 * (t * 0.011 + r * 0.67).sin()
            + 1.5 * (t * 0.003 + r * 0.23).sin()
            + 1.0 * (t * 0.017 + r * 1.1).sin();
        let n1 = fbm_noise((c + drift) * 0.14, r * 0.22, t * 0.004);
        let b1 = smooth_threshold(n1, 0.52, 0.18);

        let drift2 = 2.0 * (t * 0.004 + r * 0.3).sin() + 1.5 * (t * 0.009 + r * 0.55).sin();
        let n2 = fbm_noise((c + drift2) * 0.07, r * 0.1, t * 0.002 + 80.0);
        let b2 = smooth_threshold(n2, 0.5, 0.25) * 0.35;

        let drift3 = 2.5 * (t * 0.014 + r * 0.8).sin() + 1.0 * (t * 0.008 + r * 0.35).sin();
        let n3 = fbm_noise((c + drift3) * 0.25, r * 0.35, t * 0.006 + 160.0);
        let b3 = smooth_threshold(n3, 0.58, 0.12) * 0.3;

        let breath = 0.7 + 0.3 * (t * 0.010).sin();
        ((b1 + b2 + b3) * breath).min(1.0)
    }

    fn tick(&self) -> Cmd {
        Cmd::after(self.interval, Msg::Tick(self.id))
    }
}

fn lightness(color: Color) -> Option<f64> {
    Rgb::from_color(color).map(|rgb| rgb.to_oklab().l)
}

/// Soft step: 0 below `center - radius`, 1 above `center + radius`,
/// smoothstep between.
pub fn smooth_threshold(value: f64, center: f64, radius: f64) -> f64 {
    let low = center - radius;
    let high = center + radius;
    if value <= low {
        return 0.0;
    }
    if value >= high {
        return 1.0;
    }
    let t = (value - low) / (high - low);
    t * t * (3.0 - 2.0 * t)
}

/// Three octaves of [`smooth_noise_3d`], normalized to roughly `[0, 1]`.
pub fn fbm_noise(x: f64, y: f64, z: f64) -> f64 {
    let mut value = 0.0;
    let mut amp = 0.5;
    let mut freq = 1.0;
    for _ in 0..3 {
        value += amp * smooth_noise_3d(x * freq, y * freq, z * freq);
        freq *= 2.0;
        amp *= 0.5;
    }
    value + 0.5
}

/// Trilinear value noise in roughly `[-0.5, 0.5]`.
pub fn smooth_noise_3d(x: f64, y: f64, z: f64) -> f64 {
    let (ix, iy, iz) = (x.floor() as i64, y.floor() as i64, z.floor() as i64);
    let fx = fade(x - x.floor());
    let fy = fade(y - y.floor());
    let fz = fade(z - z.floor());

    let x0 = lerp(lattice_hash(ix, iy, iz), lattice_hash(ix + 1, iy, iz), fx);
    let x1 = lerp(lattice_hash(ix, iy + 1, iz), lattice_hash(ix + 1, iy + 1, iz), fx);
    let x2 = lerp(lattice_hash(ix, iy, iz + 1), lattice_hash(ix + 1, iy, iz + 1), fx);
    let x3 = lerp(lattice_hash(ix, iy + 1, iz + 1), lattice_hash(ix + 1, iy + 1, iz + 1), fx);

    lerp(lerp(x0, x1, fy), lerp(x2, x3, fy), fz)
}

/// Deterministic pseudo-random value in `[-0.5, 0.5)` for a lattice point.
pub fn lattice_hash(x: i64, y: i64, z: i64) -> f64 {
    let mixed = x
        .wrapping_mul(374_761_393)
        .wrapping_add(y.wrapping_mul(668_265_263))
        .wrapping_add(z.wrapping_mul(1_440_670_441));
    let mut h = (mixed as u32) ^ 0x27d4_eb2d;
    h = (h ^ (h >> 13)).wrapping_mul(1_274_126_177);
    h ^= h >> 16;
    f64::from(h & 0x7fff_ffff) / 2_147_483_648.0 - 0.5
}

fn fade(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::text;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn lattice_hash_is_pure_and_bounded(x in any::<i32>(), y in any::<i32>(), z in any::<i32>()) {
            let (x, y, z) = (i64::from(x), i64::from(y), i64::from(z));
            let a = lattice_hash(x, y, z);
            prop_assert_eq!(a, lattice_hash(x, y, z));
            prop_assert!((-0.5..0.5).contains(&a));
        }

        #[test]
        fn brightness_stays_in_unit_range(frame in 0u64..5000, row in 0usize..40, col in 0usize..120) {
            let mut shimmer = Shimmer::new(&Theme::dark());
            shimmer.frame = frame;
            let b = shimmer.brightness_at(row, col, 120);
            prop_assert!((0.0..=1.0).contains(&b));
        }
    }

    #[test]
    fn hash_varies_between_points() {
        assert_ne!(lattice_hash(0, 0, 0), lattice_hash(1, 0, 0));
        assert_ne!(lattice_hash(0, 1, 0), lattice_hash(0, 0, 1));
    }

    #[test]
    fn threshold_edges() {
        assert_eq!(smooth_threshold(0.1, 0.5, 0.2), 0.0);
        assert_eq!(smooth_threshold(0.9, 0.5, 0.2), 1.0);
        assert!((smooth_threshold(0.5, 0.5, 0.2) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn inert_until_started() {
        let mut shimmer = Shimmer::new(&Theme::dark());
        assert!(shimmer.update(&Msg::Tick(shimmer.id())).is_none());
        assert_eq!(shimmer.frame(), 0);

        shimmer.start();
        shimmer.update(&Msg::Tick(shimmer.id()));
        shimmer.update(&Msg::Tick(AnimId::next()));
        assert_eq!(shimmer.frame(), 1);

        shimmer.stop();
        assert!(shimmer.update(&Msg::Tick(shimmer.id())).is_none());
    }

    #[test]
    fn render_keeps_layout() {
        let shimmer = Shimmer::new(&Theme::dark());
        let art = "⣿⣿\u{2800}⣿\n⠀⣶⣶⣶";
        let out = shimmer.render(art, 4);
        assert_eq!(text::strip_ansi(&out), art);
        assert_eq!(out.split('\n').count(), 2);
    }

    #[test]
    fn empty_braille_is_unstyled() {
        let shimmer = Shimmer::new(&Theme::dark());
        assert_eq!(shimmer.render("\u{2800}\u{2800}", 2), "\u{2800}\u{2800}");
    }

    #[test]
    fn output_is_achromatic() {
        let shimmer = Shimmer::new(&Theme::dark());
        let out = shimmer.render("abcdefgh", 8);
        // Every foreground is emitted as 38;2;v;v;v.
        for part in out.split("38;2;").skip(1) {
            let rgb: Vec<&str> = part.split(|c| c == ';' || c == 'm').take(3).collect();
            assert_eq!(rgb[0], rgb[1]);
            assert_eq!(rgb[1], rgb[2]);
        }
    }

    #[test]
    fn zero_width_passes_through() {
        let shimmer = Shimmer::new(&Theme::dark());
        assert_eq!(shimmer.render("abc", 0), "abc");
        assert_eq!(shimmer.brightness_at(0, 0, 0), 0.0);
    }
}
