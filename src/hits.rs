// SPDX-License-Identifier: MIT
//
// Hit table — the color under every screen cell of the current frame.
//
// A dense row-major `Vec<Option<Color>>`, one slot per cell, tagged with the
// generation it was built for. Repaints with an unchanged generation reuse
// it as-is; a changed generation clears and refills it in place, keeping the
// allocation. Painting reads from the table, so what is on screen and what
// the pointer resolves to can never disagree.

use hue_color::Color;
use hue_term::surface::Surface;
use hue_term::terminal::Size;

use crate::grid::{Params, Strategy};
use crate::mode::{Component, Mode};

/// Everything a frame's colors depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation {
    pub mode: Mode,
    pub step: u8,
    pub component: Component,
    pub size: Size,
}

impl Generation {
    #[must_use]
    pub const fn new(params: Params, size: Size) -> Self {
        Self {
            mode: params.mode,
            step: params.step,
            component: params.component,
            size,
        }
    }
}

/// Dense `(col, row) → Color` map for one frame.
#[derive(Debug, Default)]
pub struct HitTable {
    generation: Option<Generation>,
    cols: u16,
    rows: u16,
    cells: Vec<Option<Color>>,
}

impl HitTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the table match `params` on a screen of `size`.
    ///
    /// Returns `true` when it had to be rebuilt.
    pub fn ensure(&mut self, strategy: &Strategy, params: Params, size: Size) -> bool {
        let generation = Generation::new(params, size);
        if self.generation == Some(generation) {
            return false;
        }

        self.cols = size.cols;
        self.rows = size.rows;
        self.cells.clear();
        self.cells.reserve(usize::try_from(size.area()).unwrap_or(0));
        for row in 1..=size.rows {
            for col in 1..=size.cols {
                self.cells.push((strategy.color_at)(&params, col, row, size));
            }
        }
        self.generation = Some(generation);
        true
    }

    /// Color at the 1-based `(col, row)`, if any.
    #[must_use]
    pub fn get(&self, col: u16, row: u16) -> Option<&Color> {
        self.index(col, row)
            .and_then(|i| self.cells.get(i))
            .and_then(Option::as_ref)
    }

    fn index(&self, col: u16, row: u16) -> Option<usize> {
        if col == 0 || row == 0 || col > self.cols || row > self.rows {
            return None;
        }
        Some(usize::from(row - 1) * usize::from(self.cols) + usize::from(col - 1))
    }

    /// Runs of equal color on `row`: `(first col, length, color)`.
    pub fn runs(&self, row: u16) -> impl Iterator<Item = (u16, u16, &Color)> + '_ {
        let line = self
            .index(1, row)
            .and_then(|start| self.cells.get(start..start + usize::from(self.cols)))
            .unwrap_or(&[]);

        let mut col = 0_usize;
        std::iter::from_fn(move || {
            while col < line.len() && line[col].is_none() {
                col += 1;
            }
            let color = line.get(col)?.as_ref()?;
            let first = col;
            while col < line.len() && line[col].as_ref() == Some(color) {
                col += 1;
            }
            let first_col = u16::try_from(first + 1).unwrap_or(u16::MAX);
            let len = u16::try_from(col - first).unwrap_or(u16::MAX);
            Some((first_col, len, color))
        })
    }

    /// Paint every colored cell as background runs.
    pub fn paint(&self, surface: &mut Surface, true_color: bool) {
        for row in 1..=self.rows {
            for (col, len, color) in self.runs(row) {
                surface.fill(col, row, len, color.to_cell_color(true_color));
            }
        }
        surface.reset();
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
