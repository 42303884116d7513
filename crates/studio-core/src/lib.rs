// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for the JavaScript Studio CLI.
//!
//! This crate provides the wire types shared by the transport, polling and
//! rendering crates:
//! - Build statuses with their labels and liveness timeouts
//! - The terminal build report with its diagnostics
//! - The evaluated call tree
//! - Upload job references

pub mod job;
pub mod report;
pub mod status;
pub mod tree;

pub use job::{JobRef, UploadTarget};
pub use report::{
	BuildReport, Diagnostic, DiagnosticStatus, ErrorSets, ExceptionSets, Location, Occurrence,
	Position,
};
pub use status::BuildStatus;
pub use tree::{Completion, NodeKind, TreeNode};
