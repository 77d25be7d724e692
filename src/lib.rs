// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Downline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Downline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Downline: a terminal viewer and editor for MLM member trees served over a REST API.
//!
//! The crate is layered bottom-up: [`model`] and [`api`] describe the data and the wire,
//! [`layout`] and [`render`] turn a forest into positioned text, [`controller`] owns the
//! interaction state, and [`tui`] is the interactive shell around it.

pub mod api;
pub mod config;
pub mod controller;
pub mod dispatch;
pub mod focus;
pub mod layout;
pub mod model;
pub mod render;
pub mod tui;
