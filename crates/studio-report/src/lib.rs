// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Terminal rendering of JavaScript Studio build reports.
//!
//! This crate provides functionality for:
//! - Highlighting the span a diagnostic points at
//! - Parsing and remapping stack frames, dropping bundler internals
//! - Grouping diagnostics by origin file in first-seen order
//! - Drawing the evaluated call tree
//! - Rendering a whole report and deciding the exit outcome

pub mod error;
pub mod frame;
pub mod group;
pub mod highlight;
pub mod render;
pub mod tree;

pub use error::{RenderError, Result};
pub use frame::{parse_frame, ParsedFrame, RenderedFrame, StackFrameResolver};
pub use group::{group_by_file, origin_file, FileGroup, UNKNOWN_ORIGIN};
pub use highlight::{gutter, highlight, span_columns, split_span};
pub use render::{Outcome, ReportRenderer};
pub use tree::{parse_node_loc, CallTreeRenderer};
