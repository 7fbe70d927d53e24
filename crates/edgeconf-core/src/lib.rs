//! Container creation spec model and platform overlays for edgeconf.
//!
//! A base [`spec::CreateSpec`] is cloned with [`clone::clone_or_default`]
//! and then adjusted in place by each [`overlay::SpecOverlay`].

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod clone;
pub mod endpoint;
pub mod overlay;
pub mod spec;
