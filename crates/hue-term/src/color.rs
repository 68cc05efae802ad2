// SPDX-License-Identifier: MIT
//
// Terminal-level color: what actually goes into an SGR sequence.
//
// The rich color model (RGB, HSL, OKLCH, palettes, decoding) lives in
// `hue-color`. This type is the narrow waist between that model and the
// escape sequence writers: a 24-bit value or a palette index.

use std::fmt;

/// Compact color for escape sequence output.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellColor {
    /// 24-bit `TrueColor`.
    Rgb(u8, u8, u8),

    /// ANSI 256-color palette index. Indices 0–15 are emitted with the
    /// compact 30–37/90–97 (or 40–47/100–107) codes.
    Ansi256(u8),
}

impl fmt::Debug for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
            Self::Ansi256(idx) => write!(f, "ansi({idx})"),
        }
    }
}

impl fmt::Display for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_formats_hex() {
        assert_eq!(format!("{:?}", CellColor::Rgb(255, 128, 0)), "#ff8000");
    }

    #[test]
    fn display_matches_debug() {
        assert_eq!(CellColor::Ansi256(214).to_string(), "ansi(214)");
    }
}
