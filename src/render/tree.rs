// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Downline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Downline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use super::{Canvas, CanvasError, LineSpan};
use crate::focus::{CellPoint, NodeLocator};
use crate::layout::{TreeLayout, ANCHOR_OFFSET, LABEL_OFFSET, NODE_HEIGHT};
use crate::model::MemberId;

/// Cells belonging to one rendered node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSpans {
    /// The `(X)` glyph.
    pub circle: LineSpan,
    /// One span per label row.
    pub label: Vec<LineSpan>,
    /// Center of the whole node block.
    pub center: CellPoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitArea {
    Circle,
    Label,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TreeRender {
    lines: Vec<String>,
    width: usize,
    height: usize,
    nodes: BTreeMap<MemberId, NodeSpans>,
}

impl TreeRender {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn nodes(&self) -> &BTreeMap<MemberId, NodeSpans> {
        &self.nodes
    }

    pub fn spans(&self, id: &MemberId) -> Option<&NodeSpans> {
        self.nodes.get(id)
    }

    /// Finds the node part under the cell `(x, y)` in render coordinates.
    pub fn hit_test(&self, x: usize, y: usize) -> Option<(&MemberId, HitArea)> {
        let within = |&(row, x0, x1): &LineSpan| row == y && (x0..=x1).contains(&x);
        self.nodes.iter().find_map(|(id, spans)| {
            if within(&spans.circle) {
                Some((id, HitArea::Circle))
            } else if spans.label.iter().any(within) {
                Some((id, HitArea::Label))
            } else {
                None
            }
        })
    }
}

impl NodeLocator for TreeRender {
    fn locate(&self, id: &MemberId) -> Option<CellPoint> {
        self.nodes.get(id).map(|spans| spans.center)
    }
}

/// Draws nodes and elbow connectors for a computed layout.
pub fn render_tree(layout: &TreeLayout) -> Result<TreeRender, CanvasError> {
    if layout.is_empty() {
        return Ok(TreeRender::default());
    }

    let mut canvas = Canvas::new(layout.width(), layout.height())?;
    let gap = layout.row_step().saturating_sub(NODE_HEIGHT);

    // Connectors first; node glyphs are written over them.
    if gap > 0 {
        for parent in layout.placements() {
            let children = parent
                .children()
                .iter()
                .filter_map(|id| layout.placement(id))
                .collect::<Vec<_>>();
            let Some(first) = children.first() else {
                continue;
            };

            let bus_y = parent.y() + NODE_HEIGHT + gap / 2;
            canvas.vline(parent.anchor_x(), parent.y() + 1, bus_y)?;

            let (min_x, max_x) = children.iter().fold(
                (first.anchor_x(), first.anchor_x()),
                |(lo, hi), child| (lo.min(child.anchor_x()), hi.max(child.anchor_x())),
            );
            if min_x != max_x {
                canvas.hline(min_x, max_x, bus_y)?;
            }
            for child in &children {
                canvas.vline(child.anchor_x(), bus_y, child.y() - 1)?;
            }
        }
    }

    let mut nodes = BTreeMap::new();
    for placement in layout.placements() {
        let (x, y) = (placement.x(), placement.y());
        canvas.put_str(x, y, &format!("({})", placement.initial()))?;
        if placement.is_folded() {
            canvas.put(placement.anchor_x(), y + 1, '+')?;
        }

        let label_x = x + LABEL_OFFSET;
        let label_width = placement.width().saturating_sub(LABEL_OFFSET);
        let mut label = Vec::with_capacity(placement.lines().len());
        for (row, line) in placement.lines().iter().enumerate() {
            canvas.put_str(label_x, y + row, line)?;
            if label_width > 0 {
                label.push((y + row, label_x, label_x + label_width - 1));
            }
        }

        nodes.insert(
            placement.id().clone(),
            NodeSpans {
                circle: (y, x, x + 2),
                label,
                center: CellPoint {
                    x: x + placement.width().max(ANCHOR_OFFSET * 2 + 1) / 2,
                    y: y + NODE_HEIGHT / 2,
                },
            },
        );
    }

    log::debug!(
        "rendered {} nodes into {}x{} cells",
        nodes.len(),
        canvas.width(),
        canvas.height()
    );

    Ok(TreeRender {
        lines: canvas.to_lines(),
        width: canvas.width(),
        height: canvas.height(),
        nodes,
    })
}
