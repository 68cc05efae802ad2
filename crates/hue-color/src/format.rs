//! CSS-style text for colors: `hsl(H S% L%)` and `oklch(L% C H)`.
//!
//! `rounding` is the number of fractional digits kept per field. Negative
//! means full precision (the shortest representation that round-trips).
//! Trailing zeros are never printed.

use crate::model::{Color, Oklch};

/// `hsl(H S% L%)` for `color`.
///
/// HSL colors print their exact fixed-point values; every other color goes
/// through its RGB projection.
#[must_use]
pub fn web_hsl(color: &Color, rounding: i32) -> String {
    let (h, s, l) = match color {
        Color::Hsl(hsl) => hsl.to_unit(),
        other => other.to_rgb().to_hsl_unit(),
    };
    format!(
        "hsl({} {}% {}%)",
        round_to(h, rounding),
        round_to(s * 100.0, rounding),
        round_to(l * 100.0, rounding)
    )
}

/// `oklch(L% C H)` for `color`.
///
/// OKLCH colors print their exact values; every other color goes through
/// its RGB projection.
#[must_use]
pub fn web_oklch(color: &Color, rounding: i32) -> String {
    let Oklch { l, c, h } = match color {
        Color::Oklch(oklch) => *oklch,
        other => other.to_rgb().to_oklch(),
    };
    format!(
        "oklch({}% {} {})",
        round_to(l * 100.0, rounding),
        round_to(c, rounding),
        round_to(h, rounding)
    )
}

/// Fractional digits an `f64` can still resolve; past this, rounding is a
/// no-op and the scale factor would overflow.
const MAX_DIGITS: i32 = 15;

/// Round to `digits` fractional digits (none when negative or beyond
/// [`MAX_DIGITS`]). Never `-0`.
fn round_to(value: f64, digits: i32) -> f64 {
    let rounded = if !(0..=MAX_DIGITS).contains(&digits) {
        value
    } else {
        let scale = 10f64.powi(digits);
        (value * scale).round() / scale
    };
    // Adding +0.0 turns -0.0 into 0.0 and leaves everything else alone.
    rounded + 0.0
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Hsl, Rgb};
    use crate::palette::BasicColor;
    use pretty_assertions::assert_eq;

    #[test]
    fn hsl_exact_fixed_point() {
        let color = Color::Hsl(Hsl::new(2048, 255, 0));
        assert_eq!(web_hsl(&color, -1), "hsl(180 100% 0%)");
    }

    #[test]
    fn hsl_from_rgb_rounded() {
        let color = Color::Rgb(Rgb::new(255, 0, 0));
        assert_eq!(web_hsl(&color, 2), "hsl(0 100% 50%)");
        let teal = Color::Rgb(Rgb::new(0, 128, 128));
        assert_eq!(web_hsl(&teal, 1), "hsl(180 100% 25.1%)");
    }

    #[test]
    fn zero_digits_prints_integers() {
        let color = Color::Rgb(Rgb::new(0, 128, 128));
        assert_eq!(web_hsl(&color, 0), "hsl(180 100% 25%)");
    }

    #[test]
    fn oklch_exact_values() {
        let color = Color::Oklch(Oklch::new(0.5, 0.1, 200.0));
        assert_eq!(web_oklch(&color, -1), "oklch(50% 0.1 200)");
    }

    #[test]
    fn oklch_from_rgb_rounded() {
        let red = Color::Basic(BasicColor::BrightRed);
        assert_eq!(web_oklch(&red, 2), "oklch(62.8% 0.26 29.23)");
        assert_eq!(web_oklch(&red, 1), "oklch(62.8% 0.3 29.2)");
    }

    #[test]
    fn achromatic_has_no_negative_zero() {
        let black = Color::Rgb(Rgb::new(0, 0, 0));
        assert_eq!(web_oklch(&black, 3), "oklch(0% 0 0)");
        assert_eq!(web_hsl(&black, 3), "hsl(0 0% 0%)");
    }

    #[test]
    fn huge_rounding_is_full_precision() {
        let red = Color::Rgb(Rgb::new(255, 0, 0));
        for digits in [16, 308, 400, i32::MAX] {
            assert_eq!(web_hsl(&red, digits), web_hsl(&red, -1));
            assert_eq!(web_oklch(&red, digits), web_oklch(&red, -1));
        }
        assert!(!web_oklch(&red, 400).contains("inf"));
        assert!(!web_hsl(&Color::Rgb(Rgb::new(0, 0, 0)), 400).contains("NaN"));
    }

    #[test]
    fn max_digits_stays_finite() {
        let color = Color::Rgb(Rgb::new(12, 34, 56));
        let text = web_oklch(&color, MAX_DIGITS);
        assert!(!text.contains("inf") && !text.contains("NaN"), "{text}");
    }

    #[test]
    fn formatting_is_stable() {
        let color = Color::Rgb(Rgb::new(12, 34, 56));
        assert_eq!(web_hsl(&color, -1), web_hsl(&color, -1));
        assert_eq!(web_oklch(&color, 4), web_oklch(&color, 4));
    }
}
