// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration for the JavaScript Studio CLI.
//!
//! Settings come from the first `key=value` file found in the lookup order
//! of [`candidate_files`], with `STUDIO_TOKEN` overriding the file's token.

mod config;
mod error;
mod paths;
mod values;

pub use config::{StudioConfig, DEFAULT_API, TOKEN_ENV};
pub use error::{ConfigError, Result};
pub use paths::{candidate_files, default_candidates, load_first};
pub use values::{parse_values, ConfigValues};
