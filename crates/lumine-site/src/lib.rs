// Copyright (c) 2026 - present LumineDroid Team
// SPDX-License-Identifier: MIT

//! lumine-site library
//!
//! This module exports the data access layer of the lumine-site CLI: document
//! fetching, multi-branch changelog aggregation, changelog view state and the
//! page handlers, for use in integration tests and as a library.

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod endpoints;
pub mod fetch;
pub mod handlers;
pub mod render;
pub mod view;

pub use aggregate::{aggregate, aggregate_texts};
pub use endpoints::Endpoints;
pub use fetch::{FetchError, HttpSource, TextSource};
pub use view::{ChangelogView, LoadState, LoadTicket};
