//! Combined configuration providers for edgeconf.
//!
//! [`docker::DockerConfigProvider`] turns a module descriptor into its
//! unmodified [`combined::CombinedConfig`]. [`overlay::OverlayConfigProvider`]
//! wraps any provider and applies the platform overlays to a private copy of
//! the creation spec.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod combined;
pub mod docker;
pub mod image;
pub mod module;
pub mod overlay;
