// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Downline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Downline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

pub const WIRE_HORIZONTAL: char = '─';
pub const WIRE_VERTICAL: char = '│';

/// Directions a connector cell reaches out to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Wires(u8);

impl Wires {
    const LEFT: Self = Self(0b0001);
    const RIGHT: Self = Self(0b0010);
    const UP: Self = Self(0b0100);
    const DOWN: Self = Self(0b1000);
    const HORIZONTAL: Self = Self(Self::LEFT.0 | Self::RIGHT.0);
    const VERTICAL: Self = Self(Self::UP.0 | Self::DOWN.0);

    fn has(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    fn with(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    fn glyph(self) -> char {
        let (l, r, u, d) = (
            self.has(Self::LEFT),
            self.has(Self::RIGHT),
            self.has(Self::UP),
            self.has(Self::DOWN),
        );
        match (l, r, u, d) {
            (true, true, true, true) => '┼',
            (true, true, true, false) => '┴',
            (true, true, false, true) => '┬',
            (false, true, true, true) => '├',
            (true, false, true, true) => '┤',
            (false, true, false, true) => '┌',
            (true, false, false, true) => '┐',
            (false, true, true, false) => '└',
            (true, false, true, false) => '┘',
            (false, false, true, _) | (false, false, _, true) => WIRE_VERTICAL,
            _ => WIRE_HORIZONTAL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Glyph(char),
    Wire(Wires),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CanvasError {
    #[error("canvas area overflow: {width}*{height}")]
    AreaOverflow { width: usize, height: usize },
    #[error("out of bounds: ({x},{y}) for {width}x{height} canvas")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}

/// A fixed-size grid of text glyphs and connector wires.
///
/// Glyphs overwrite whatever was there. Wires accumulate: a horizontal and a vertical wire drawn
/// through the same cell become a junction, and each wire cell is rendered from the neighbours it
/// actually connects to, so a line that stops at a bus becomes a tee or a corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Result<Self, CanvasError> {
        let len = width
            .checked_mul(height)
            .ok_or(CanvasError::AreaOverflow { width, height })?;
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Glyph(' '); len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Result<char, CanvasError> {
        let idx = self.index_of(x, y)?;
        Ok(match self.cells[idx] {
            Cell::Glyph(ch) => ch,
            Cell::Wire(wires) => self.connected(x, y, wires).glyph(),
        })
    }

    pub fn put(&mut self, x: usize, y: usize, ch: char) -> Result<(), CanvasError> {
        let idx = self.index_of(x, y)?;
        self.cells[idx] = Cell::Glyph(ch);
        Ok(())
    }

    /// Writes `text` starting at `(x, y)`, clipped at the right edge.
    pub fn put_str(&mut self, x: usize, y: usize, text: &str) -> Result<(), CanvasError> {
        self.index_of(x.min(self.width.saturating_sub(1)), y)?;
        for (offset, ch) in text.chars().enumerate() {
            if x + offset >= self.width {
                break;
            }
            self.put(x + offset, y, ch)?;
        }
        Ok(())
    }

    pub fn hline(&mut self, x0: usize, x1: usize, y: usize) -> Result<(), CanvasError> {
        let (from, to) = (x0.min(x1), x0.max(x1));
        self.index_of(from, y)?;
        self.index_of(to, y)?;
        for x in from..=to {
            self.wire(x, y, Wires::HORIZONTAL)?;
        }
        Ok(())
    }

    pub fn vline(&mut self, x: usize, y0: usize, y1: usize) -> Result<(), CanvasError> {
        let (from, to) = (y0.min(y1), y0.max(y1));
        self.index_of(x, from)?;
        self.index_of(x, to)?;
        for y in from..=to {
            self.wire(x, y, Wires::VERTICAL)?;
        }
        Ok(())
    }

    /// Rows with trailing blanks removed; trailing empty rows are dropped.
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines = (0..self.height)
            .map(|y| {
                let row = (0..self.width)
                    .map(|x| self.get(x, y).unwrap_or(' '))
                    .collect::<String>();
                row.trim_end_matches(' ').to_owned()
            })
            .collect::<Vec<_>>();
        while lines.last().is_some_and(String::is_empty) {
            lines.pop();
        }
        lines
    }

    fn wire(&mut self, x: usize, y: usize, wires: Wires) -> Result<(), CanvasError> {
        let idx = self.index_of(x, y)?;
        self.cells[idx] = match self.cells[idx] {
            Cell::Wire(existing) => Cell::Wire(existing.with(wires)),
            Cell::Glyph(_) => Cell::Wire(wires),
        };
        Ok(())
    }

    fn wires_at(&self, x: usize, y: usize) -> Wires {
        match self.index_of(x, y).map(|idx| self.cells[idx]) {
            Ok(Cell::Wire(wires)) => wires,
            _ => Wires::default(),
        }
    }

    fn connected(&self, x: usize, y: usize, wires: Wires) -> Wires {
        let mut out = Wires::default();
        if wires.has(Wires::LEFT) && x > 0 && self.wires_at(x - 1, y).has(Wires::RIGHT) {
            out = out.with(Wires::LEFT);
        }
        if wires.has(Wires::RIGHT) && self.wires_at(x + 1, y).has(Wires::LEFT) {
            out = out.with(Wires::RIGHT);
        }
        if wires.has(Wires::UP) && y > 0 && self.wires_at(x, y - 1).has(Wires::DOWN) {
            out = out.with(Wires::UP);
        }
        if wires.has(Wires::DOWN) && self.wires_at(x, y + 1).has(Wires::UP) {
            out = out.with(Wires::DOWN);
        }
        if out == Wires::default() {
            wires
        } else {
            out
        }
    }

    fn index_of(&self, x: usize, y: usize) -> Result<usize, CanvasError> {
        if x >= self.width || y >= self.height {
            return Err(CanvasError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y * self.width + x)
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use std::fmt::Write as _;

        for y in 0..self.height {
            if y > 0 {
                f.write_char('\n')?;
            }
            for x in 0..self.width {
                f.write_char(self.get(x, y).map_err(|_| fmt::Error)?)?;
            }
        }
        Ok(())
    }
}
