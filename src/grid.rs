// SPDX-License-Identifier: MIT
//
// Grid mapper — which color sits at each screen cell, per mode.
//
// Coordinates are 1-based `(col, row)`, matching mouse reports:
//
//   ┌──────────────────────────────┐
//   │ title / status               │  ← row 1
//   ├──────────────────────────────┤
//   │ color grid                   │  ← rows 2 ..= h-1  (available = h-2)
//   ├──────────────────────────────┤
//   │ legend                       │  ← row h, never a grid cell
//   └──────────────────────────────┘
//
// Each mode is a `Strategy` in a table indexed by `Mode`. Every function in
// a strategy is pure: the same params and size give the same answer.

// Grid math quantizes ratios into 8/12-bit channels.
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use hue_color::{BasicColor, Color, Hsl, Oklch, Rgb};
use hue_term::terminal::Size;

use crate::mode::{Component, Mode};

/// The parameters a frame is generated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    pub mode: Mode,
    pub step: u8,
    pub component: Component,
}

/// Fixed text drawn on the grid (headings, names).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub col: u16,
    pub row: u16,
    pub text: String,
}

/// How one mode draws.
pub struct Strategy {
    /// Title row text.
    pub title: &'static str,
    /// Color at a cell, `None` for cells that hold no color.
    pub color_at: fn(&Params, u16, u16, Size) -> Option<Color>,
    /// Bottom row text.
    pub legend: fn(&Params) -> String,
    /// Fixed text drawn over the grid area.
    pub labels: fn(Size) -> Vec<Label>,
}

/// Strategies indexed by [`Mode::index`].
static STRATEGIES: [Strategy; 5] = [
    Strategy {
        title: "16 Basic Colors",
        color_at: basic16_at,
        legend: help_legend,
        labels: basic16_labels,
    },
    Strategy {
        title: "256 colors",
        color_at: indexed256_at,
        legend: help_legend,
        labels: indexed256_labels,
    },
    Strategy {
        title: "HSL colors",
        color_at: hsl_at,
        legend: hsl_legend,
        labels: no_labels,
    },
    Strategy {
        title: "OKLCH colors",
        color_at: oklch_at,
        legend: oklch_legend,
        labels: no_labels,
    },
    Strategy {
        title: "RGB colors",
        color_at: rgb_at,
        legend: rgb_legend,
        labels: no_labels,
    },
];

/// The strategy for `mode`.
#[must_use]
pub fn strategy(mode: Mode) -> &'static Strategy {
    &STRATEGIES[mode.index()]
}

/// Whether `row` is inside the grid rows for a screen of `size`.
const fn in_grid(row: u16, size: Size) -> bool {
    row >= 2 && row < size.rows
}

/// Rows available to the grid.
const fn available(size: Size) -> u16 {
    size.rows.saturating_sub(2)
}

// ─── Basic16 ─────────────────────────────────────────────────────────────────

/// First row of the 16 named colors.
const BASIC_FIRST_ROW: u16 = 3;
/// Row of the "Extra named color" heading.
const EXTRA_LABEL_ROW: u16 = 20;
/// Row of the Orange swatch.
const ORANGE_ROW: u16 = 21;
/// Columns of each swatch.
const SWATCH_COLS: std::ops::RangeInclusive<u16> = 18..=20;

fn basic16_slot(row: u16) -> Option<BasicColor> {
    match row {
        BASIC_FIRST_ROW..=18 => Some(BasicColor::ANSI[usize::from(row - BASIC_FIRST_ROW)]),
        ORANGE_ROW => Some(BasicColor::Orange),
        _ => None,
    }
}

fn basic16_at(_: &Params, col: u16, row: u16, size: Size) -> Option<Color> {
    if !SWATCH_COLS.contains(&col) || !in_grid(row, size) {
        return None;
    }
    basic16_slot(row).map(Color::Basic)
}

fn basic16_labels(_: Size) -> Vec<Label> {
    let names = (BASIC_FIRST_ROW..=18).chain([ORANGE_ROW]).filter_map(|row| {
        basic16_slot(row).map(|c| Label {
            col: 1,
            row,
            text: format!("{:>15}: ", c.name()),
        })
    });
    names
        .chain([Label {
            col: 2,
            row: EXTRA_LABEL_ROW,
            text: "Extra named color".into(),
        }])
        .collect()
}

// ─── Indexed256 ─────────────────────────────────────────────────────────────

const INDEXED_BASIC_ROW: u16 = 5;
const INDEXED_CUBE_ROW: u16 = 9;
const INDEXED_GRAY_ROW: u16 = 18;
const CUBE_ROW_LEN: u16 = 36;
/// Column of the first swatch on each row.
const INDEXED_FIRST_COL: u16 = 2;

fn indexed256_at(_: &Params, col: u16, row: u16, size: Size) -> Option<Color> {
    if col < INDEXED_FIRST_COL || !in_grid(row, size) {
        return None;
    }
    let slot = (col - INDEXED_FIRST_COL) / 2;
    let idx = match row {
        INDEXED_BASIC_ROW if slot < 16 => slot,
        r if (INDEXED_CUBE_ROW..INDEXED_CUBE_ROW + 6).contains(&r) && slot < CUBE_ROW_LEN => {
            16 + (r - INDEXED_CUBE_ROW) * CUBE_ROW_LEN + slot
        }
        INDEXED_GRAY_ROW if slot < 24 => 232 + slot,
        _ => return None,
    };
    u8::try_from(idx).ok().map(Color::Indexed)
}

fn indexed256_labels(_: Size) -> Vec<Label> {
    [(3, "16 basic colors"), (7, "216 cube"), (16, "Grayscale")]
        .into_iter()
        .map(|(row, text)| Label {
            col: 2,
            row,
            text: text.into(),
        })
        .collect()
}

// ─── HSL ─────────────────────────────────────────────────────────────────────

/// Extra rows of headroom folded into the saturation ramp so the first grid
/// row is not washed-out gray.
const SAT_OFFSET: f64 = 8.0;

fn hsl_lightness(params: &Params) -> u16 {
    u16::from(params.step) * 4
}

fn hsl_at(params: &Params, col: u16, row: u16, size: Size) -> Option<Color> {
    if col == 0 || col > size.cols || !in_grid(row, size) {
        return None;
    }
    let hue = (4095.0 * f64::from(col - 1) / f64::from(size.cols)).round() as u16;
    let sat = (255.0 * (f64::from(row - 1) + SAT_OFFSET) / (f64::from(available(size)) + SAT_OFFSET))
        .round() as u8;
    Some(Color::Hsl(Hsl::new(hue, sat, hsl_lightness(params))))
}

fn hsl_legend(params: &Params) -> String {
    format!(
        "Color: Lightness={} x{:X} ↑ to increase ↓ to decrease (shift for precise steps) ",
        hsl_lightness(params),
        params.step
    )
}

// ─── OKLCH ──────────────────────────────────────────────────────────────────

fn oklch_lightness(params: &Params) -> f64 {
    f64::from(params.step) / 255.0
}

fn oklch_at(params: &Params, col: u16, row: u16, size: Size) -> Option<Color> {
    if col == 0 || col > size.cols || !in_grid(row, size) {
        return None;
    }
    let c = Oklch::MAX_C * f64::from(row - 1) / f64::from(available(size));
    let h = 360.0 * f64::from(col - 1) / f64::from(size.cols);
    Some(Color::Oklch(Oklch::new(oklch_lightness(params), c, h)))
}

fn oklch_legend(params: &Params) -> String {
    format!(
        "Color: L={:.3} x{:X} ↑ to increase ↓ to decrease (shift for precise steps) ",
        oklch_lightness(params),
        params.step
    )
}

// ─── RGB ─────────────────────────────────────────────────────────────────────

fn rgb_at(params: &Params, col: u16, row: u16, size: Size) -> Option<Color> {
    if col == 0 || col > size.cols || !in_grid(row, size) {
        return None;
    }
    let x = channel(col - 1, size.cols.saturating_sub(1));
    let y = channel(row - 2, available(size).saturating_sub(1));
    let z = params.step;
    let rgb = match params.component {
        Component::Red => Rgb::new(z, x, y),
        Component::Green => Rgb::new(x, z, y),
        Component::Blue => Rgb::new(y, x, z),
    };
    Some(Color::Rgb(rgb))
}

/// `255 · pos / span` in integers, with the span floored at 1.
fn channel(pos: u16, span: u16) -> u8 {
    let value = 255 * u32::from(pos) / u32::from(span.max(1));
    u8::try_from(value).unwrap_or(u8::MAX)
}

fn rgb_legend(params: &Params) -> String {
    format!(
        "Color: {}={} x{:X} ↑ to increase ↓ to decrease (shift for precise steps), space for next component ",
        params.component, params.step, params.step
    )
}

// ─── Shared ──────────────────────────────────────────────────────────────────

fn help_legend(_: &Params) -> String {
    "Use space and arrows to navigate, mouse to see and select colors, \
     click to copy to clipboard and save (Q to exit) "
        .into()
}

const fn no_labels(_: Size) -> Vec<Label> {
    Vec::new()
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SIZE: Size = Size { cols: 100, rows: 50 };

    fn params(mode: Mode) -> Params {
        Params {
            mode,
            step: 50,
            component: Component::Red,
        }
    }

    fn at(p: &Params, col: u16, row: u16) -> Option<Color> {
        (strategy(p.mode).color_at)(p, col, row, SIZE)
    }

    // ── Table ─────────────────────────────────────────────────────────────

    #[test]
    fn titles_follow_mode_order() {
        let titles: Vec<_> = Mode::ALL.into_iter().map(|m| strategy(m).title).collect();
        assert_eq!(
            titles,
            ["16 Basic Colors", "256 colors", "HSL colors", "OKLCH colors", "RGB colors"]
        );
    }

    #[test]
    fn title_and_legend_rows_hold_no_color() {
        for mode in Mode::ALL {
            let p = params(mode);
            for col in 1..=SIZE.cols {
                assert_eq!(at(&p, col, 1), None);
                assert_eq!(at(&p, col, SIZE.rows), None);
            }
        }
    }

    #[test]
    fn color_at_is_pure() {
        for mode in Mode::ALL {
            let p = params(mode);
            for (col, row) in [(1, 2), (19, 5), (40, 10), (100, 49)] {
                assert_eq!(at(&p, col, row), at(&p, col, row));
            }
        }
    }

    // ── Basic16 ───────────────────────────────────────────────────────────

    #[test]
    fn basic16_rows() {
        let p = params(Mode::Basic16);
        assert_eq!(at(&p, 18, 3), Some(Color::Basic(BasicColor::Black)));
        assert_eq!(at(&p, 20, 10), Some(Color::Basic(BasicColor::Gray)));
        assert_eq!(at(&p, 19, 11), Some(Color::Basic(BasicColor::DarkGray)));
        assert_eq!(at(&p, 18, 18), Some(Color::Basic(BasicColor::White)));
        assert_eq!(at(&p, 18, 21), Some(Color::Basic(BasicColor::Orange)));
        assert_eq!(at(&p, 17, 3), None);
        assert_eq!(at(&p, 21, 3), None);
        assert_eq!(at(&p, 18, 19), None);
        assert_eq!(at(&p, 18, 20), None);
    }

    #[test]
    fn basic16_labels_right_align_names() {
        let labels = basic16_labels(SIZE);
        assert_eq!(labels[0].text, "          Black: ");
        assert_eq!(labels[0].text.len(), 17);
        assert!(labels.iter().any(|l| l.row == 20 && l.text == "Extra named color"));
        assert!(labels.iter().any(|l| l.row == 21 && l.text.ends_with("Orange: ")));
    }

    // ── Indexed256 ────────────────────────────────────────────────────────

    /// Screen position of the left cell of palette index `idx`; each index
    /// occupies that column and the next.
    fn indexed_position(idx: u8) -> (u16, u16) {
        let idx = u16::from(idx);
        let (slot, row) = match idx {
            0..=15 => (idx, INDEXED_BASIC_ROW),
            16..=231 => ((idx - 16) % CUBE_ROW_LEN, INDEXED_CUBE_ROW + (idx - 16) / CUBE_ROW_LEN),
            _ => (idx - 232, INDEXED_GRAY_ROW),
        };
        (INDEXED_FIRST_COL + 2 * slot, row)
    }

    #[test]
    fn indexed_positions() {
        assert_eq!(indexed_position(0), (2, 5));
        assert_eq!(indexed_position(15), (32, 5));
        assert_eq!(indexed_position(16), (2, 9));
        assert_eq!(indexed_position(51), (72, 9));
        assert_eq!(indexed_position(52), (2, 10));
        assert_eq!(indexed_position(231), (72, 14));
        assert_eq!(indexed_position(232), (2, 18));
        assert_eq!(indexed_position(255), (48, 18));
    }

    #[test]
    fn indexed_layout_is_exact_inverse() {
        let p = params(Mode::Indexed256);
        for idx in 0..=255_u8 {
            let (col, row) = indexed_position(idx);
            assert_eq!(at(&p, col, row), Some(Color::Indexed(idx)));
            assert_eq!(at(&p, col + 1, row), Some(Color::Indexed(idx)));
        }
    }

    #[test]
    fn indexed_gaps_are_empty() {
        let p = params(Mode::Indexed256);
        assert_eq!(at(&p, 1, 5), None);
        assert_eq!(at(&p, 34, 5), None);
        assert_eq!(at(&p, 2, 7), None);
        assert_eq!(at(&p, 74, 9), None);
        assert_eq!(at(&p, 50, 18), None);
    }

    // ── HSL / OKLCH ───────────────────────────────────────────────────────

    #[test]
    fn hsl_mapping() {
        let p = params(Mode::Hsl);
        let Some(Color::Hsl(hsl)) = at(&p, 1, 2) else {
            panic!("expected HSL color");
        };
        assert_eq!(hsl.h, 0);
        assert_eq!(hsl.l, 200);
        // 255·(1+8)/(48+8) = 40.98
        assert_eq!(hsl.s, 41);

        let Some(Color::Hsl(hsl)) = at(&p, 51, 49) else {
            panic!("expected HSL color");
        };
        assert_eq!(hsl.h, 2048);
        assert_eq!(hsl.s, 255);
    }

    #[test]
    fn oklch_mapping() {
        let p = params(Mode::Oklch);
        let Some(Color::Oklch(o)) = at(&p, 51, 26) else {
            panic!("expected OKLCH color");
        };
        assert!((o.l - 50.0 / 255.0).abs() < 1e-12);
        assert!((o.c - 0.4 * 25.0 / 48.0).abs() < 1e-12);
        assert!((o.h - 180.0).abs() < 1e-12);
    }

    #[test]
    fn legends_show_step() {
        let p = params(Mode::Hsl);
        assert!(hsl_legend(&p).starts_with("Color: Lightness=200 x32 ↑"));
        assert!(oklch_legend(&p).starts_with("Color: L=0.196 x32"));
        assert!(rgb_legend(&p).starts_with("Color: Red=50 x32"));
    }

    // ── RGB ───────────────────────────────────────────────────────────────

    #[test]
    fn rgb_component_permutation() {
        let mut p = params(Mode::Rgb);
        // x = 255·9/99 = 23, y = 255·18/47 = 97, z = 50
        assert_eq!(at(&p, 10, 20), Some(Color::Rgb(Rgb::new(50, 23, 97))));
        p.component = Component::Green;
        assert_eq!(at(&p, 10, 20), Some(Color::Rgb(Rgb::new(23, 50, 97))));
        p.component = Component::Blue;
        assert_eq!(at(&p, 10, 20), Some(Color::Rgb(Rgb::new(97, 23, 50))));
    }

    #[test]
    fn rgb_corners_reach_full_range() {
        let p = params(Mode::Rgb);
        assert_eq!(at(&p, 1, 2), Some(Color::Rgb(Rgb::new(50, 0, 0))));
        assert_eq!(at(&p, 100, 49), Some(Color::Rgb(Rgb::new(50, 255, 255))));
    }

    #[test]
    fn tiny_screens_do_not_divide_by_zero() {
        let tiny = Size { cols: 1, rows: 3 };
        let p = params(Mode::Rgb);
        assert_eq!(rgb_at(&p, 1, 2, tiny), Some(Color::Rgb(Rgb::new(50, 0, 0))));
        assert!(hsl_at(&p, 1, 2, tiny).is_some());
        assert_eq!(rgb_at(&p, 1, 2, Size { cols: 1, rows: 2 }), None);
    }
}
