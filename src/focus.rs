// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Downline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Downline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Centering the viewport on a rendered node.

use crate::model::MemberId;

/// A cell in render coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CellPoint {
    pub x: usize,
    pub y: usize,
}

/// Looks up where a node was drawn by the last completed layout.
pub trait NodeLocator {
    fn locate(&self, id: &MemberId) -> Option<CellPoint>;
}

/// The visible window onto the rendered tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub pan_x: i32,
    pub pan_y: i32,
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    /// The pan that puts `id` in the middle of the viewport.
    ///
    /// Returns `None` when the node is not rendered or the viewport has no area; callers leave the
    /// view untouched in that case.
    pub fn centered_on(&self, locator: &impl NodeLocator, id: &MemberId) -> Option<(i32, i32)> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let point = locator.locate(id)?;
        let x = i32::try_from(point.x).ok()?;
        let y = i32::try_from(point.y).ok()?;

        // Offset of the node from the viewport center, applied to the current pan.
        let dx = (x - self.pan_x) - i32::from(self.width / 2);
        let dy = (y - self.pan_y) - i32::from(self.height / 2);
        Some((self.pan_x + dx, self.pan_y + dy))
    }
}
