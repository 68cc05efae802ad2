//! Parsing colors from text.
//!
//! Accepted forms:
//!
//! | Form                                   | Result              |
//! |----------------------------------------|---------------------|
//! | `red`, `Bright Red`, `dark_gray`       | `Color::Basic`      |
//! | `256:196`, `color256(196)`             | `Color::Indexed`    |
//! | `#f00`, `#ff0000`, `ff0000`            | `Color::Decoded`    |
//! | `rgb(255, 0, 0)`, `rgb(100% 0% 0%)`    | `Color::Decoded`    |
//! | `hsl(0, 100%, 50%)`, `hsl(0deg 100% 50%)` | `Color::Decoded` |
//! | `oklch(0.628 0.258 29.2)`, `oklch(62.8% 64% 29.2deg)` | `Color::Decoded` |
//!
//! Function names are case-insensitive and arguments may be separated by
//! commas, whitespace, or both.

use std::error::Error;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::model::{Color, Oklch, Rgb, hsl_unit_to_rgb};
use crate::oklab;
use crate::palette::BasicColor;

static HEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:#([0-9a-fA-F]{3})|#?([0-9a-fA-F]{6}))$").expect("valid regex")
});

static PALETTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i)(?:256:\s*(\d+)|color256\(\s*(\d+)\s*\))$").expect("valid regex")
});

static FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i)(rgb|hsl|oklch)\(\s*([^()]*?)\s*\)$").expect("valid regex")
});

static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i)([+-]?(?:\d+(?:\.\d*)?|\.\d+))(%|deg)?$").expect("valid regex")
});

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Why a string is not a color.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// Nothing but whitespace.
    Empty,
    /// Not any accepted form.
    Unrecognized,
    /// Well-formed, but a component is outside its domain.
    OutOfRange { component: &'static str, value: f64 },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("empty color string"),
            Self::Unrecognized => f.write_str("unrecognized color syntax"),
            Self::OutOfRange { component, value } => {
                write!(f, "{component} out of range: {value}")
            }
        }
    }
}

impl Error for DecodeError {}

// ─── Decoding ────────────────────────────────────────────────────────────────

/// Parse `text` as a color.
///
/// Basic names and palette indices keep their palette identity; every other
/// form resolves to RGB and remembers the (trimmed) input text.
///
/// # Errors
///
/// [`DecodeError::Empty`] for blank input, [`DecodeError::OutOfRange`] when
/// a numeric component is outside its domain, and
/// [`DecodeError::Unrecognized`] otherwise.
pub fn decode_color(text: &str) -> Result<Color, DecodeError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DecodeError::Empty);
    }

    if let Some(basic) = BasicColor::from_name(text) {
        return Ok(Color::Basic(basic));
    }

    if let Some(caps) = PALETTE.captures(text) {
        let digits = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
        return digits
            .parse::<u8>()
            .map(Color::Indexed)
            .map_err(|_| DecodeError::OutOfRange {
                component: "palette index",
                value: digits.parse().unwrap_or(f64::INFINITY),
            });
    }

    let rgb = if let Some(caps) = HEX.captures(text) {
        parse_hex(caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str()))?
    } else if let Some(caps) = FUNCTION.captures(text) {
        let args = split_args(&caps[2])?;
        match caps[1].to_ascii_lowercase().as_str() {
            "rgb" => parse_rgb(&args)?,
            "hsl" => parse_hsl(&args)?,
            _ => parse_oklch(&args)?,
        }
    } else {
        return Err(DecodeError::Unrecognized);
    };

    Ok(Color::Decoded {
        text: text.to_owned(),
        rgb,
    })
}

fn parse_hex(digits: &str) -> Result<Rgb, DecodeError> {
    let value = u32::from_str_radix(digits, 16).map_err(|_| DecodeError::Unrecognized)?;
    let rgb = if digits.len() == 3 {
        let nibble = |shift: u32| ((value >> shift) & 0xf) as u8 * 0x11;
        Rgb::new(nibble(8), nibble(4), nibble(0))
    } else {
        Rgb::new((value >> 16) as u8, (value >> 8) as u8, value as u8)
    };
    Ok(rgb)
}

// ─── Functional Forms ────────────────────────────────────────────────────────

/// A numeric argument with its unit suffix.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Arg {
    Number(f64),
    Percent(f64),
    Degrees(f64),
}

fn split_args(body: &str) -> Result<[Arg; 3], DecodeError> {
    let args: Vec<Arg> = body
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(parse_arg)
        .collect::<Result<_, _>>()?;
    args.try_into().map_err(|_| DecodeError::Unrecognized)
}

fn parse_arg(token: &str) -> Result<Arg, DecodeError> {
    let caps = NUMBER.captures(token).ok_or(DecodeError::Unrecognized)?;
    let value: f64 = caps[1].parse().map_err(|_| DecodeError::Unrecognized)?;
    Ok(match caps.get(2).map(|m| m.as_str().to_ascii_lowercase()) {
        Some(unit) if unit == "%" => Arg::Percent(value),
        Some(_) => Arg::Degrees(value),
        None => Arg::Number(value),
    })
}

fn in_range(component: &'static str, value: f64, max: f64) -> Result<f64, DecodeError> {
    if (0.0..=max).contains(&value) {
        Ok(value)
    } else {
        Err(DecodeError::OutOfRange { component, value })
    }
}

/// `rgb(r g b)`: each channel `0..=255` or `0%..=100%`.
fn parse_rgb(args: &[Arg; 3]) -> Result<Rgb, DecodeError> {
    let mut channels = [0.0; 3];
    for (slot, (arg, name)) in channels.iter_mut().zip(args.iter().zip(["red", "green", "blue"])) {
        *slot = match *arg {
            Arg::Number(v) => in_range(name, v, 255.0)? / 255.0,
            Arg::Percent(p) => in_range(name, p, 100.0)? / 100.0,
            Arg::Degrees(_) => return Err(DecodeError::Unrecognized),
        };
    }
    Ok(Rgb::from_unit(channels[0], channels[1], channels[2]))
}

/// `hsl(h s% l%)`: hue in degrees (any value, wrapped), saturation and
/// lightness as percentages (the `%` may be omitted).
fn parse_hsl(args: &[Arg; 3]) -> Result<Rgb, DecodeError> {
    let h = match args[0] {
        Arg::Number(v) | Arg::Degrees(v) => oklab::normalize_hue(v),
        Arg::Percent(_) => return Err(DecodeError::Unrecognized),
    };
    let percent = |arg: Arg, name: &'static str| match arg {
        Arg::Number(v) | Arg::Percent(v) => in_range(name, v, 100.0).map(|v| v / 100.0),
        Arg::Degrees(_) => Err(DecodeError::Unrecognized),
    };
    let s = percent(args[1], "saturation")?;
    let l = percent(args[2], "lightness")?;
    Ok(hsl_unit_to_rgb(h, s, l))
}

/// `oklch(l c h)`: lightness as a fraction or percentage, chroma as a number
/// or a percentage of 0.4, hue in degrees (wrapped).
fn parse_oklch(args: &[Arg; 3]) -> Result<Rgb, DecodeError> {
    let l = match args[0] {
        Arg::Number(v) => in_range("lightness", v, 1.0)?,
        Arg::Percent(p) => in_range("lightness", p, 100.0)? / 100.0,
        Arg::Degrees(_) => return Err(DecodeError::Unrecognized),
    };
    let c = match args[1] {
        Arg::Number(v) => in_range("chroma", v, f64::MAX)?,
        Arg::Percent(p) => in_range("chroma", p, f64::MAX)? / 100.0 * Oklch::MAX_C,
        Arg::Degrees(_) => return Err(DecodeError::Unrecognized),
    };
    let h = match args[2] {
        Arg::Number(v) | Arg::Degrees(v) => oklab::normalize_hue(v),
        Arg::Percent(_) => return Err(DecodeError::Unrecognized),
    };
    Ok(Oklch::new(l, c, h).to_rgb())
}

// ─── Tests ───────────────────────────────────────────────────────────────────
