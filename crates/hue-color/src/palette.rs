//! Terminal palettes: the 16 named slots, the 256-color index space, and
//! perceptual nearest-color search.

use std::fmt;
use std::sync::OnceLock;

use crate::model::Rgb;
use crate::oklab;

// ─── Basic Colors ────────────────────────────────────────────────────────────

/// The 16 named terminal colors plus the extra named slot `Orange`.
///
/// Discriminants are the ANSI palette indices; `Orange` has none of its own
/// and lives at 256-color index 214.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasicColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    Gray,
    DarkGray,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    White,
    Orange,
}

/// Palette index of [`BasicColor::Orange`].
pub const ORANGE_INDEX: u8 = 214;

impl BasicColor {
    /// The 16 ANSI slots in palette order (Orange excluded).
    pub const ANSI: [Self; 16] = [
        Self::Black,
        Self::Red,
        Self::Green,
        Self::Yellow,
        Self::Blue,
        Self::Magenta,
        Self::Cyan,
        Self::Gray,
        Self::DarkGray,
        Self::BrightRed,
        Self::BrightGreen,
        Self::BrightYellow,
        Self::BrightBlue,
        Self::BrightMagenta,
        Self::BrightCyan,
        Self::White,
    ];

    /// Display name, e.g. `BrightRed`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Black => "Black",
            Self::Red => "Red",
            Self::Green => "Green",
            Self::Yellow => "Yellow",
            Self::Blue => "Blue",
            Self::Magenta => "Magenta",
            Self::Cyan => "Cyan",
            Self::Gray => "Gray",
            Self::DarkGray => "DarkGray",
            Self::BrightRed => "BrightRed",
            Self::BrightGreen => "BrightGreen",
            Self::BrightYellow => "BrightYellow",
            Self::BrightBlue => "BrightBlue",
            Self::BrightMagenta => "BrightMagenta",
            Self::BrightCyan => "BrightCyan",
            Self::White => "White",
            Self::Orange => "Orange",
        }
    }

    /// 256-color palette index this slot is drawn with.
    #[must_use]
    pub const fn palette_index(self) -> u8 {
        match self {
            Self::Orange => ORANGE_INDEX,
            other => other as u8,
        }
    }

    /// Look up a name, ignoring case, spaces, `_` and `-`.
    ///
    /// `grey` spellings are accepted for the gray slots.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();
        let key = key.replace("grey", "gray");
        Self::ANSI
            .into_iter()
            .chain([Self::Orange])
            .find(|c| c.name().eq_ignore_ascii_case(&key))
    }

    /// RGB the slot is displayed as (xterm defaults for the 16 slots).
    #[must_use]
    pub fn rgb(self) -> Rgb {
        ansi256_to_rgb(self.palette_index())
    }
}

impl fmt::Display for BasicColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── 256-Color Palette ──────────────────────────────────────────────────────

/// xterm's default RGB for the 16 ANSI slots.
const XTERM_16: [(u8, u8, u8); 16] = [
    (0, 0, 0),
    (205, 0, 0),
    (0, 205, 0),
    (205, 205, 0),
    (0, 0, 238),
    (205, 0, 205),
    (0, 205, 205),
    (229, 229, 229),
    (127, 127, 127),
    (255, 0, 0),
    (0, 255, 0),
    (255, 255, 0),
    (92, 92, 255),
    (255, 0, 255),
    (0, 255, 255),
    (255, 255, 255),
];

/// Channel levels of the 6×6×6 cube.
const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

/// RGB of a 256-color palette index.
///
/// 0–15 use xterm defaults, 16–231 the 6×6×6 cube, 232–255 the gray ramp
/// (8, 18, …, 238).
#[must_use]
pub fn ansi256_to_rgb(idx: u8) -> Rgb {
    match idx {
        0..=15 => {
            let (r, g, b) = XTERM_16[usize::from(idx)];
            Rgb::new(r, g, b)
        }
        16..=231 => {
            let i = usize::from(idx - 16);
            Rgb::new(CUBE_LEVELS[i / 36], CUBE_LEVELS[(i / 6) % 6], CUBE_LEVELS[i % 6])
        }
        232..=255 => {
            let v = 8 + (idx - 232) * 10;
            Rgb::new(v, v, v)
        }
    }
}

/// Nearest palette index (16–255) to `rgb` by Oklab distance.
///
/// Indices 0–15 are skipped: their actual RGB depends on the terminal's
/// theme, the cube and gray ramp do not.
#[must_use]
pub fn nearest_ansi256(rgb: Rgb) -> u8 {
    let target = rgb.to_oklab();
    let table = oklab_table();
    let mut best = 16_u8;
    let mut best_dist = f64::INFINITY;
    for (idx, lab) in (16..=255_u8).zip(table.iter()) {
        let dl = lab.0 - target.0;
        let da = lab.1 - target.1;
        let db = lab.2 - target.2;
        let dist = db.mul_add(db, dl.mul_add(dl, da * da));
        if dist < best_dist {
            best_dist = dist;
            best = idx;
        }
    }
    best
}

/// Oklab coordinates of palette indices 16–255, computed once.
fn oklab_table() -> &'static [(f64, f64, f64); 240] {
    static TABLE: OnceLock<[(f64, f64, f64); 240]> = OnceLock::new();
    TABLE.get_or_init(|| {
        std::array::from_fn(|i| {
            let idx = u8::try_from(i + 16).unwrap_or(u8::MAX);
            let rgb = ansi256_to_rgb(idx);
            oklab::srgb_to_oklab(
                f64::from(rgb.r) / 255.0,
                f64::from(rgb.g) / 255.0,
                f64::from(rgb.b) / 255.0,
            )
        })
    })
}

// ─── Tests ───────────────────────────────────────────────────────────────────
