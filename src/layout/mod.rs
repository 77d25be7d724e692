// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Downline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Downline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Layout of member forests.
//!
//! This module computes node placement in character cells; connectors are routed by the renderer.

pub mod tree;

pub use tree::{
    layout_forest, NodePlacement, TreeLayout, TreeLayoutConfig, ANCHOR_OFFSET, LABEL_OFFSET,
    NODE_HEIGHT,
};
