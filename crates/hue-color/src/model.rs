//! Color values: the tagged [`Color`] plus its RGB, HSL and OKLCH parts.
//!
//! Every color projects to 24-bit RGB and to a terminal [`CellColor`].
//! Conversions here are total; only parsing text can fail (see `decode`).

use std::fmt;

use hue_term::ansi;
use hue_term::color::CellColor;

use crate::oklab;
use crate::palette::{self, BasicColor};

// ─── Rgb ─────────────────────────────────────────────────────────────────────

/// A 24-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as fractions in `0..=1`.
    #[must_use]
    pub fn to_unit(self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }

    /// Quantize fractional channels, clamping each to `0..=1` first.
    #[must_use]
    pub fn from_unit(r: f64, g: f64, b: f64) -> Self {
        Self::new(unit_to_u8(r), unit_to_u8(g), unit_to_u8(b))
    }

    /// `#rrggbb`.
    #[must_use]
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Hue in degrees `[0, 360)`, saturation and lightness in `0..=1`.
    #[must_use]
    pub fn to_hsl_unit(self) -> (f64, f64, f64) {
        let (r, g, b) = self.to_unit();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        let d = max - min;
        if d < f64::EPSILON {
            return (0.0, 0.0, l);
        }
        let s = d / (1.0 - (2.0f64.mul_add(l, -1.0)).abs());
        let h = if (max - r).abs() < f64::EPSILON {
            ((g - b) / d).rem_euclid(6.0)
        } else if (max - g).abs() < f64::EPSILON {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        (oklab::normalize_hue(h * 60.0), s.min(1.0), l)
    }

    /// Fixed-point HSL, rounded to the nearest step.
    #[must_use]
    pub fn to_hsl(self) -> Hsl {
        let (h, s, l) = self.to_hsl_unit();
        let hue = (h * f64::from(Hsl::HUE_STEPS) / 360.0).round() as u16 % Hsl::HUE_STEPS;
        Hsl::new(
            hue,
            (s * 255.0).round() as u8,
            (l * f64::from(Hsl::MAX_L)).round() as u16,
        )
    }

    /// Oklab coordinates.
    #[must_use]
    pub fn to_oklab(self) -> (f64, f64, f64) {
        let (r, g, b) = self.to_unit();
        oklab::srgb_to_oklab(r, g, b)
    }

    /// OKLCH coordinates.
    #[must_use]
    pub fn to_oklch(self) -> Oklch {
        let (r, g, b) = self.to_unit();
        let (l, c, h) = oklab::srgb_to_oklch(r, g, b);
        Oklch::new(l, c, h)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RGB({}, {}, {})", self.r, self.g, self.b)
    }
}

#[inline]
fn unit_to_u8(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

// ─── Hsl ─────────────────────────────────────────────────────────────────────

/// Fixed-point HSL: 12-bit hue, 8-bit saturation, 10-bit lightness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hsl {
    /// Hue, `0..4096` for one turn.
    pub h: u16,
    /// Saturation, `0..=255`.
    pub s: u8,
    /// Lightness, `0..=1023`.
    pub l: u16,
}

impl Hsl {
    /// Hue steps in one full turn.
    pub const HUE_STEPS: u16 = 4096;
    /// Largest hue value.
    pub const MAX_H: u16 = Self::HUE_STEPS - 1;
    /// Largest lightness value.
    pub const MAX_L: u16 = 1023;

    /// Build from raw fields, clamping each into its range.
    #[must_use]
    pub fn new(h: u16, s: u8, l: u16) -> Self {
        Self {
            h: h.min(Self::MAX_H),
            s,
            l: l.min(Self::MAX_L),
        }
    }

    /// Hue in degrees, saturation and lightness in `0..=1`.
    #[must_use]
    pub fn to_unit(self) -> (f64, f64, f64) {
        (
            f64::from(self.h) * 360.0 / f64::from(Self::HUE_STEPS),
            f64::from(self.s) / 255.0,
            f64::from(self.l) / f64::from(Self::MAX_L),
        )
    }

    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        let (h, s, l) = self.to_unit();
        hsl_unit_to_rgb(h, s, l)
    }
}

/// Standard HSL → RGB with hue in degrees.
#[must_use]
pub fn hsl_unit_to_rgb(h: f64, s: f64, l: f64) -> Rgb {
    let c = (1.0 - 2.0f64.mul_add(l, -1.0).abs()) * s;
    let hp = oklab::normalize_hue(h) / 60.0;
    let x = c * (1.0 - (hp.rem_euclid(2.0) - 1.0).abs());
    let (r, g, b) = match hp as u8 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    Rgb::from_unit(r + m, g + m, b + m)
}

// ─── Oklch ───────────────────────────────────────────────────────────────────

/// OKLCH: lightness `0..=1`, chroma (0.4 is CSS 100%), hue in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklch {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

impl Oklch {
    /// Chroma that CSS calls 100%.
    pub const MAX_C: f64 = 0.4;

    #[must_use]
    pub const fn new(l: f64, c: f64, h: f64) -> Self {
        Self { l, c, h }
    }

    /// sRGB with a per-channel clamp for out-of-gamut values.
    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        let (r, g, b) = oklab::oklch_to_srgb(self.l, self.c, self.h);
        Rgb::from_unit(r, g, b)
    }
}

// ─── Color ───────────────────────────────────────────────────────────────────

/// A color in exactly one representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Color {
    /// One of the named terminal slots.
    Basic(BasicColor),
    /// A 256-color palette index.
    Indexed(u8),
    /// 24-bit RGB.
    Rgb(Rgb),
    /// Fixed-point HSL.
    Hsl(Hsl),
    /// OKLCH.
    Oklch(Oklch),
    /// Parsed from free-form text, keeping the text it came from.
    Decoded { text: String, rgb: Rgb },
}

impl Color {
    /// Project to 24-bit RGB.
    #[must_use]
    pub fn to_rgb(&self) -> Rgb {
        match self {
            Self::Basic(c) => c.rgb(),
            Self::Indexed(idx) => palette::ansi256_to_rgb(*idx),
            Self::Rgb(rgb) | Self::Decoded { rgb, .. } => *rgb,
            Self::Hsl(hsl) => hsl.to_rgb(),
            Self::Oklch(oklch) => oklch.to_rgb(),
        }
    }

    /// Primary textual form: the name of a basic color, `#rrggbb` otherwise.
    ///
    /// This is what a plain click copies and what decodes back to the same
    /// color.
    #[must_use]
    pub fn canonical(&self) -> String {
        match self {
            Self::Basic(c) => c.name().to_owned(),
            other => other.to_rgb().hex(),
        }
    }

    /// Human-readable form tagged with the representation.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Basic(c) => c.name().to_owned(),
            Self::Indexed(idx) => format!("Ansi256({idx})"),
            Self::Rgb(rgb) => rgb.to_string(),
            Self::Hsl(hsl) => format!("HSL({:#05X}, {:#04X}, {:#05X})", hsl.h, hsl.s, hsl.l),
            Self::Oklch(o) => format!("OKLCH({:.3}, {:.3}, {:.1})", o.l, o.c, o.h),
            Self::Decoded { text, .. } => text.clone(),
        }
    }

    /// Terminal color for a background run.
    ///
    /// Basic and indexed colors keep their palette code; everything else is
    /// 24-bit when `true_color`, or the nearest 256-color index.
    #[must_use]
    pub fn to_cell_color(&self, true_color: bool) -> CellColor {
        match self {
            Self::Basic(c) => CellColor::Ansi256(c.palette_index()),
            Self::Indexed(idx) => CellColor::Ansi256(*idx),
            other => {
                let rgb = other.to_rgb();
                if true_color {
                    CellColor::Rgb(rgb.r, rgb.g, rgb.b)
                } else {
                    CellColor::Ansi256(palette::nearest_ansi256(rgb))
                }
            }
        }
    }

    /// Background escape sequence, for swatches embedded in text.
    #[must_use]
    pub fn swatch(&self, true_color: bool) -> String {
        ansi::bg_string(self.to_cell_color(true_color))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self::Rgb(rgb)
    }
}

impl From<Hsl> for Color {
    fn from(hsl: Hsl) -> Self {
        Self::Hsl(hsl)
    }
}

impl From<Oklch> for Color {
    fn from(oklch: Oklch) -> Self {
        Self::Oklch(oklch)
    }
}

impl From<BasicColor> for Color {
    fn from(c: BasicColor) -> Self {
        Self::Basic(c)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
