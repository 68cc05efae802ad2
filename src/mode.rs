// SPDX-License-Identifier: MIT
//
// Explorer modes and the RGB component selector.
//
// Both enums are cyclic: stepping past the last variant wraps to the first
// and stepping back from the first wraps to the last.

use std::fmt;

// ─── Mode ────────────────────────────────────────────────────────────────────

/// Which color grid is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// The 16 named terminal colors plus Orange.
    #[default]
    Basic16,
    /// The full 256-color palette.
    Indexed256,
    /// Hue × saturation plane at a fixed lightness.
    Hsl,
    /// Hue × chroma plane at a fixed OKLCH lightness.
    Oklch,
    /// Two RGB channels across the screen, the third fixed.
    Rgb,
}

impl Mode {
    /// Every mode in cycling order.
    pub const ALL: [Self; 5] = [
        Self::Basic16,
        Self::Indexed256,
        Self::Hsl,
        Self::Oklch,
        Self::Rgb,
    ];

    /// Position in [`Mode::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The following mode, wrapping.
    #[must_use]
    pub const fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// The preceding mode, wrapping.
    #[must_use]
    pub const fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Short name for logs.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Basic16 => "BASIC16",
            Self::Indexed256 => "INDEXED256",
            Self::Hsl => "HSL",
            Self::Oklch => "OKLCH",
            Self::Rgb => "RGB",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ─── Component ──────────────────────────────────────────────────────────────

/// The RGB channel held fixed (at the step value) in RGB mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Component {
    #[default]
    Red,
    Green,
    Blue,
}

impl Component {
    /// The following component, wrapping Blue → Red.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Red => Self::Green,
            Self::Green => Self::Blue,
            Self::Blue => Self::Red,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Green => "Green",
            Self::Blue => "Blue",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ── Mode ──────────────────────────────────────────────────────────────

    #[test]
    fn next_cycles_through_every_mode() {
        let mut mode = Mode::Basic16;
        let mut seen = Vec::new();
        for _ in 0..Mode::ALL.len() {
            seen.push(mode);
            mode = mode.next();
        }
        assert_eq!(seen, Mode::ALL.to_vec());
        assert_eq!(mode, Mode::Basic16);
    }

    #[test]
    fn prev_from_first_wraps_to_last() {
        assert_eq!(Mode::Basic16.prev(), Mode::Rgb);
        assert_eq!(Mode::Rgb.next(), Mode::Basic16);
    }

    #[test]
    fn prev_undoes_next() {
        for mode in Mode::ALL {
            assert_eq!(mode.next().prev(), mode);
        }
    }

    #[test]
    fn index_matches_table_order() {
        for (i, mode) in Mode::ALL.into_iter().enumerate() {
            assert_eq!(mode.index(), i);
        }
    }

    // ── Component ─────────────────────────────────────────────────────────

    #[test]
    fn component_cycles() {
        assert_eq!(Component::Red.next(), Component::Green);
        assert_eq!(Component::Green.next(), Component::Blue);
        assert_eq!(Component::Blue.next(), Component::Red);
    }

    #[test]
    fn component_names() {
        assert_eq!(Component::Green.to_string(), "Green");
    }
}
