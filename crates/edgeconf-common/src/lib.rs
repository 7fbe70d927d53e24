//! # edgeconf-common
//!
//! Shared types, error definitions, configuration sources, and constants
//! used across the edgeconf workspace.
//!
//! This crate is the leaf of the dependency graph. It depends on no other
//! internal crate and provides the primitives the overlay and provider
//! crates build upon.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod config;
pub mod constants;
pub mod error;
pub mod source;
pub mod types;
