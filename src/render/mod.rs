// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Downline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Downline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Rendering for member trees.
//!
//! Renderers produce Unicode text plus a per-node index of cell spans that the TUI uses for
//! styling, hit testing and centering.

mod canvas;
pub mod tree;

pub use canvas::{Canvas, CanvasError};
pub use tree::{render_tree, HitArea, NodeSpans, TreeRender};

/// A contiguous span of cells within a single rendered line.
///
/// Coordinates are `(y, x0, x1)` in character-cell indices, inclusive.
pub type LineSpan = (usize, usize, usize);
