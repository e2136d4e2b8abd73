// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and ranking: how search results get their numbers and their order.
//!
//! `core` holds the relevance math and its constants; `ranking` holds the one
//! comparator every ordered output goes through.

pub mod core;
pub mod ranking;

pub use self::core::*;
pub use self::ranking::{compare_keys, compare_results, rank};
