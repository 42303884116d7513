// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Source map support for the JavaScript Studio CLI.
//!
//! This crate provides functionality for:
//! - Finding the source map of a bundle (inline data URL or `.map` file)
//! - Parsing source maps (v3) and decoding their VLQ mappings
//! - Mapping generated positions back to original files, with a stdin
//!   fallback when no map exists
//!
//! # Example
//!
//! ```
//! use studio_core::Position;
//! use studio_sourcemap::{PositionMapper, SourceMap};
//!
//! let map = SourceMap::from_json(r#"{
//!     "version": 3,
//!     "sources": ["src/app.js"],
//!     "names": [],
//!     "mappings": "AAAA"
//! }"#).unwrap();
//!
//! let mapper = PositionMapper::new(Some(&map));
//! let original = mapper.resolve(Position::new(1, 0));
//! assert_eq!(original.file.as_deref(), Some("src/app.js"));
//! ```

pub mod comment;
pub mod error;
pub mod mapper;
pub mod sourcemap;
pub mod vlq;

pub use comment::{extract, strip_comments, ExtractedSource};
pub use error::{Result, SourceMapError};
pub use mapper::{MappedPosition, PositionMapper, STDIN_SOURCE};
pub use sourcemap::{OriginalPosition, SourceMap};
pub use vlq::{decode_segment, MappingTable, Segment};
