// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Downline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Downline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Top-down tidy layout for member forests in character cells.
//!
//! Every node occupies a fixed block of [`NODE_HEIGHT`] rows: the circle `(X)` in the first three
//! columns and the label lines starting at [`LABEL_OFFSET`]. Subtrees are laid out bottom-up and
//! pushed apart using per-depth contours (leftmost/rightmost occupied cell relative to the
//! subtree anchor), then each parent is centered over its first and last child.

use std::collections::{BTreeMap, BTreeSet};

use crate::model::{MemberId, TreeNode};

/// Rows occupied by a node block.
pub const NODE_HEIGHT: usize = 3;
/// Column of the label block relative to the node's left edge.
pub const LABEL_OFFSET: usize = 4;
/// Column of the circle's center (the connector anchor) relative to the node's left edge.
pub const ANCHOR_OFFSET: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeLayoutConfig {
    /// Blank cells between adjacent siblings.
    pub sibling_gap: usize,
    /// Blank cells between cousins (nodes of the same depth under different parents).
    pub subtree_gap: usize,
    /// Blank cells between neighbouring root trees.
    pub root_gap: usize,
    /// Blank rows between a parent block and its children.
    pub level_gap: usize,
    /// Maximum label width in cells; longer lines are truncated with an ellipsis.
    pub max_label_width: usize,
}

impl Default for TreeLayoutConfig {
    fn default() -> Self {
        Self {
            sibling_gap: 4,
            subtree_gap: 5,
            root_gap: 6,
            level_gap: 3,
            max_label_width: 24,
        }
    }
}

impl TreeLayoutConfig {
    /// Vertical distance between the top rows of two consecutive depths.
    pub fn row_step(&self) -> usize {
        NODE_HEIGHT + self.level_gap
    }
}

/// Final cell position of one visible node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodePlacement {
    id: MemberId,
    x: usize,
    y: usize,
    depth: usize,
    width: usize,
    initial: char,
    lines: Vec<String>,
    folded: bool,
    children: Vec<MemberId>,
}

impl NodePlacement {
    pub fn id(&self) -> &MemberId {
        &self.id
    }

    /// Left edge of the node block.
    pub fn x(&self) -> usize {
        self.x
    }

    /// Top row of the node block.
    pub fn y(&self) -> usize {
        self.y
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Total block width (circle, spacer and label).
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn anchor_x(&self) -> usize {
        self.x + ANCHOR_OFFSET
    }

    pub fn initial(&self) -> char {
        self.initial
    }

    /// Label lines, already truncated.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// `true` when the node has children that are hidden because it is collapsed.
    pub fn is_folded(&self) -> bool {
        self.folded
    }

    /// Visible children in display order.
    pub fn children(&self) -> &[MemberId] {
        &self.children
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TreeLayout {
    placements: Vec<NodePlacement>,
    index: BTreeMap<MemberId, usize>,
    width: usize,
    height: usize,
    row_step: usize,
}

impl TreeLayout {
    /// Visible nodes in pre-order.
    pub fn placements(&self) -> &[NodePlacement] {
        &self.placements
    }

    pub fn placement(&self, id: &MemberId) -> Option<&NodePlacement> {
        self.index.get(id).map(|&idx| &self.placements[idx])
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn row_step(&self) -> usize {
        self.row_step
    }
}

/// Per relative depth: leftmost and rightmost occupied cell, relative to the subtree anchor.
type Contour = Vec<(i64, i64)>;

struct Slot<'a> {
    node: &'a TreeNode,
    depth: usize,
    rel: i64,
    lines: Vec<String>,
    width: usize,
    folded: bool,
    children: Vec<usize>,
}

struct Builder<'a, 'c> {
    config: &'c TreeLayoutConfig,
    collapsed: &'c BTreeSet<MemberId>,
    slots: Vec<Slot<'a>>,
}

impl<'a> Builder<'a, '_> {
    fn place(&mut self, node: &'a TreeNode, depth: usize) -> (usize, Contour) {
        let lines = label_lines(node, self.config.max_label_width);
        let width = node_width(&lines);
        let expanded = node.has_children() && !self.collapsed.contains(&node.id);
        let slot = self.slots.len();
        self.slots.push(Slot {
            node,
            depth,
            rel: 0,
            lines,
            width,
            folded: node.has_children() && !expanded,
            children: Vec::new(),
        });

        let own = (-(ANCHOR_OFFSET as i64), width as i64 - 1 - ANCHOR_OFFSET as i64);
        if !expanded {
            return (slot, vec![own]);
        }

        let mut merged = Contour::new();
        let mut offsets = Vec::<(usize, i64)>::with_capacity(node.children.len());
        for child in &node.children {
            let (child_slot, contour) = self.place(child, depth + 1);
            let shift = if merged.is_empty() {
                0
            } else {
                separation(&merged, &contour, self.config.sibling_gap, self.config.subtree_gap)
            };
            merge_contour(&mut merged, &contour, shift);
            offsets.push((child_slot, shift));
        }

        let first = offsets.first().map_or(0, |&(_, shift)| shift);
        let last = offsets.last().map_or(0, |&(_, shift)| shift);
        let center = (first + last).div_euclid(2);

        for (child_slot, shift) in offsets {
            self.slots[child_slot].rel = shift - center;
            self.slots[slot].children.push(child_slot);
        }

        let mut contour = Vec::with_capacity(merged.len() + 1);
        contour.push(own);
        contour.extend(merged.into_iter().map(|(left, right)| (left - center, right - center)));
        (slot, contour)
    }
}

/// Smallest shift of `next` so that it clears `placed` at every shared depth.
fn separation(placed: &Contour, next: &Contour, sibling_gap: usize, subtree_gap: usize) -> i64 {
    placed
        .iter()
        .zip(next.iter())
        .enumerate()
        .map(|(depth, (&(_, right), &(left, _)))| {
            let gap = if depth == 0 { sibling_gap } else { subtree_gap } as i64;
            right + gap + 1 - left
        })
        .max()
        .unwrap_or(0)
}

fn merge_contour(merged: &mut Contour, contour: &Contour, shift: i64) {
    for (depth, &(left, right)) in contour.iter().enumerate() {
        let (left, right) = (left + shift, right + shift);
        match merged.get_mut(depth) {
            Some(extent) => {
                extent.0 = extent.0.min(left);
                extent.1 = extent.1.max(right);
            }
            None => merged.push((left, right)),
        }
    }
}

/// Lays out `forest` left to right. Children of ids in `collapsed` are hidden.
pub fn layout_forest(
    forest: &[TreeNode],
    collapsed: &BTreeSet<MemberId>,
    config: &TreeLayoutConfig,
) -> TreeLayout {
    let mut builder = Builder {
        config,
        collapsed,
        slots: Vec::new(),
    };

    let mut roots = Vec::<(usize, i64)>::with_capacity(forest.len());
    let mut merged = Contour::new();
    for root in forest {
        let (slot, contour) = builder.place(root, 0);
        let shift = if merged.is_empty() {
            0
        } else {
            separation(&merged, &contour, config.root_gap, config.root_gap)
        };
        merge_contour(&mut merged, &contour, shift);
        roots.push((slot, shift));
    }

    let slots = builder.slots;
    if slots.is_empty() {
        return TreeLayout {
            row_step: config.row_step(),
            ..TreeLayout::default()
        };
    }

    let mut anchors = vec![0_i64; slots.len()];
    let mut stack = roots;
    while let Some((slot, anchor)) = stack.pop() {
        anchors[slot] = anchor;
        for &child in &slots[slot].children {
            stack.push((child, anchor + slots[child].rel));
        }
    }

    let min_x = anchors
        .iter()
        .map(|&anchor| anchor - ANCHOR_OFFSET as i64)
        .min()
        .unwrap_or(0);

    let row_step = config.row_step();
    let mut placements = Vec::with_capacity(slots.len());
    let mut index = BTreeMap::new();
    let mut width = 0;
    let mut height = 0;
    for (slot, &anchor) in slots.iter().zip(&anchors) {
        let x = (anchor - ANCHOR_OFFSET as i64 - min_x) as usize;
        let y = slot.depth * row_step;
        width = width.max(x + slot.width);
        height = height.max(y + NODE_HEIGHT);
        index.insert(slot.node.id.clone(), placements.len());
        placements.push(NodePlacement {
            id: slot.node.id.clone(),
            x,
            y,
            depth: slot.depth,
            width: slot.width,
            initial: slot.node.initial(),
            lines: slot.lines.clone(),
            folded: slot.folded,
            children: slot
                .children
                .iter()
                .map(|&child| slots[child].node.id.clone())
                .collect(),
        });
    }

    TreeLayout {
        placements,
        index,
        width,
        height,
        row_step,
    }
}

/// Name, then `email: …` and `phone: …` when present.
fn label_lines(node: &TreeNode, max_width: usize) -> Vec<String> {
    let mut lines = vec![truncate(&node.name, max_width)];
    if !node.email().is_empty() {
        lines.push(truncate(&format!("email: {}", node.email()), max_width));
    }
    if !node.phone().is_empty() {
        lines.push(truncate(&format!("phone: {}", node.phone()), max_width));
    }
    lines
}

fn node_width(lines: &[String]) -> usize {
    let label = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);
    if label == 0 {
        LABEL_OFFSET - 1
    } else {
        LABEL_OFFSET + label
    }
}

pub(crate) fn truncate(text: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }
    if text.chars().count() <= max_len {
        return text.to_owned();
    }
    if max_len == 1 {
        return "…".to_owned();
    }
    let mut out: String = text.chars().take(max_len - 1).collect();
    out.push('…');
    out
}
