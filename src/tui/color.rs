//! Color math for the animators.
//!
//! Blending happens in OkLab so that sweeps between two colors stay
//! perceptually even, and greys built from an OkLab lightness are exactly
//! achromatic. Lightness boosts for the tab glow work in HSL.

use ratatui::style::Color;

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `#rgb`. Anything else is `None`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match digits.len() {
            6 => {
                let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
                let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
                let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
                Some(Self::new(r, g, b))
            }
            3 => {
                let nibble = |i: usize| u8::from_str_radix(&digits[i..=i], 16).ok().map(|v| v * 17);
                Some(Self::new(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            _ => None,
        }
    }

    /// Only truecolor values carry enough information to blend; named and
    /// indexed colors yield `None` and the caller falls back to plain output.
    pub fn from_color(color: Color) -> Option<Self> {
        match color {
            Color::Rgb(r, g, b) => Some(Self::new(r, g, b)),
            _ => None,
        }
    }

    pub fn to_color(self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_oklab(self) -> OkLab {
        let r = srgb_to_linear(f64::from(self.r) / 255.0);
        let g = srgb_to_linear(f64::from(self.g) / 255.0);
        let b = srgb_to_linear(f64::from(self.b) / 255.0);

        let l = 0.412_221_47 * r + 0.536_332_55 * g + 0.051_445_99 * b;
        let m = 0.211_903_50 * r + 0.680_699_55 * g + 0.107_396_96 * b;
        let s = 0.088_302_46 * r + 0.281_718_84 * g + 0.629_978_70 * b;

        let l_ = l.cbrt();
        let m_ = m.cbrt();
        let s_ = s.cbrt();

        OkLab {
            l: 0.210_454_26 * l_ + 0.793_617_78 * m_ - 0.004_072_05 * s_,
            a: 1.977_998_49 * l_ - 2.428_592_05 * m_ + 0.450_593_56 * s_,
            b: 0.025_904_04 * l_ + 0.782_771_77 * m_ - 0.808_675_77 * s_,
        }
    }

    pub fn from_oklab(lab: OkLab) -> Self {
        let l_ = lab.l + 0.396_337_78 * lab.a + 0.215_803_76 * lab.b;
        let m_ = lab.l - 0.105_561_35 * lab.a - 0.063_854_17 * lab.b;
        let s_ = lab.l - 0.089_484_18 * lab.a - 1.291_485_48 * lab.b;

        let l = l_ * l_ * l_;
        let m = m_ * m_ * m_;
        let s = s_ * s_ * s_;

        let r = 4.076_741_66 * l - 3.307_711_59 * m + 0.230_969_94 * s;
        let g = -1.268_438_00 * l + 2.609_757_40 * m - 0.341_319_38 * s;
        let b = -0.004_196_09 * l - 0.703_418_61 * m + 1.707_614_70 * s;

        Self::new(to_channel(r), to_channel(g), to_channel(b))
    }

    /// Blend towards `other` in OkLab. `t` is clamped to `[0, 1]`.
    pub fn lerp_oklab(self, other: Self, t: f64) -> Self {
        Self::from_oklab(self.to_oklab().lerp(other.to_oklab(), t))
    }

    /// Hue in degrees, saturation and lightness in `[0, 1]`.
    pub fn to_hsl(self) -> (f64, f64, f64) {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if (max - min).abs() < f64::EPSILON {
            return (0.0, 0.0, l);
        }

        let d = max - min;
        let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
        let h = if (max - r).abs() < f64::EPSILON {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if (max - g).abs() < f64::EPSILON {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        (h * 60.0, s, l)
    }

    pub fn from_hsl(h: f64, s: f64, l: f64) -> Self {
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);
        if s == 0.0 {
            let v = (l * 255.0).round() as u8;
            return Self::new(v, v, v);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        let h = h.rem_euclid(360.0) / 360.0;
        let channel = |mut t: f64| {
            if t < 0.0 {
                t += 1.0;
            }
            if t > 1.0 {
                t -= 1.0;
            }
            let v = if t < 1.0 / 6.0 {
                p + (q - p) * 6.0 * t
            } else if t < 0.5 {
                q
            } else if t < 2.0 / 3.0 {
                p + (q - p) * (2.0 / 3.0 - t) * 6.0
            } else {
                p
            };
            (v * 255.0).round() as u8
        };
        Self::new(channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0))
    }

    /// Raise HSL lightness by `amount`, capped at white.
    pub fn lighten(self, amount: f64) -> Self {
        let (h, s, l) = self.to_hsl();
        Self::from_hsl(h, s, (l + amount).min(1.0))
    }
}

/// A color in Björn Ottosson's OkLab space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OkLab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl OkLab {
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            l: self.l + (other.l - self.l) * t,
            a: self.a + (other.a - self.a) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }
}

/// A pure grey for an OkLab lightness.
///
/// With `a = b = 0` all three cone responses are equal, so one channel is
/// computed and copied to the others; rounding can never introduce a tint.
pub fn grey(lightness: f64) -> Rgb {
    let l = lightness.clamp(0.0, 1.0);
    let v = to_channel(l * l * l);
    Rgb::new(v, v, v)
}

fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f64) -> f64 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

fn to_channel(linear: f64) -> u8 {
    (linear_to_srgb(linear.clamp(0.0, 1.0)) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_forms() {
        assert_eq!(Rgb::from_hex("#e8536d"), Some(Rgb::new(0xe8, 0x53, 0x6d)));
        assert_eq!(Rgb::from_hex("#fff"), Some(Rgb::new(255, 255, 255)));
        assert_eq!(Rgb::from_hex("e8536d"), None);
        assert_eq!(Rgb::from_hex("#zzzzzz"), None);
        assert_eq!(Rgb::from_hex("#12345"), None);
    }

    #[test]
    fn named_colors_cannot_blend() {
        assert_eq!(Rgb::from_color(Color::Red), None);
        assert_eq!(Rgb::from_color(Color::Rgb(1, 2, 3)), Some(Rgb::new(1, 2, 3)));
    }

    #[test]
    fn oklab_round_trip_is_close() {
        for hex in ["#0d0d0d", "#c8c0b8", "#e8536d", "#555250", "#f5f2ed"] {
            let c = Rgb::from_hex(hex).unwrap();
            let back = Rgb::from_oklab(c.to_oklab());
            assert!((i16::from(c.r) - i16::from(back.r)).abs() <= 1, "{hex}");
            assert!((i16::from(c.g) - i16::from(back.g)).abs() <= 1, "{hex}");
            assert!((i16::from(c.b) - i16::from(back.b)).abs() <= 1, "{hex}");
        }
    }

    #[test]
    fn lerp_endpoints() {
        let a = Rgb::new(232, 83, 109);
        let b = Rgb::new(200, 192, 184);
        assert_eq!(a.lerp_oklab(b, 0.0).to_hex(), Rgb::from_oklab(a.to_oklab()).to_hex());
        assert_eq!(a.lerp_oklab(b, 5.0), a.lerp_oklab(b, 1.0));
    }

    #[test]
    fn grey_is_achromatic() {
        for i in 0..=100 {
            let g = grey(f64::from(i) / 100.0);
            assert_eq!(g.r, g.g);
            assert_eq!(g.g, g.b);
        }
        assert_eq!(grey(0.0), Rgb::new(0, 0, 0));
        assert_eq!(grey(1.0), Rgb::new(255, 255, 255));
    }

    #[test]
    fn hsl_round_trip() {
        let c = Rgb::new(232, 83, 109);
        let (h, s, l) = c.to_hsl();
        let back = Rgb::from_hsl(h, s, l);
        assert!((i16::from(c.r) - i16::from(back.r)).abs() <= 1);
        assert!((i16::from(c.g) - i16::from(back.g)).abs() <= 1);
        assert!((i16::from(c.b) - i16::from(back.b)).abs() <= 1);
    }

    #[test]
    fn lighten_caps_at_white() {
        let c = Rgb::new(232, 83, 109);
        let lighter = c.lighten(0.2);
        assert!(lighter.to_hsl().2 > c.to_hsl().2);
        assert_eq!(c.lighten(5.0), Rgb::new(255, 255, 255));
    }
}
