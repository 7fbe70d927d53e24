//! Orchestrator that applies platform overlays on top of a base provider.
//!
//! The base provider's spec is never mutated: overlays run on a private
//! copy and the result is packaged into a fresh [`CombinedConfig`] carrying
//! the base image and credentials unchanged.

use std::sync::Arc;

use edgeconf_common::config::OverlaySettings;
use edgeconf_common::error::Result;
use edgeconf_common::source::ConfigSource;
use edgeconf_core::clone::clone_or_default;
use edgeconf_core::overlay::{NetworkAliasOverlay, SocketMountOverlay, SpecOverlay};

use crate::combined::{CombinedConfig, CombinedConfigProvider};
use crate::module::{Module, RuntimeInfo};

/// Wraps a base provider and adjusts its creation specs for the platform.
pub struct OverlayConfigProvider<B> {
    base: B,
    overlays: Vec<Box<dyn SpecOverlay>>,
}

impl<B: CombinedConfigProvider> OverlayConfigProvider<B> {
    /// Creates a provider applying the socket-mount overlay followed by the
    /// network-alias overlay.
    #[must_use]
    pub fn new(base: B, source: Arc<dyn ConfigSource>, settings: OverlaySettings) -> Self {
        let overlays: Vec<Box<dyn SpecOverlay>> = vec![
            Box::new(SocketMountOverlay::new(Arc::clone(&source), settings.clone())),
            Box::new(NetworkAliasOverlay::new(source, settings)),
        ];
        Self::with_overlays(base, overlays)
    }

    /// Creates a provider applying `overlays` in the given order.
    #[must_use]
    pub fn with_overlays(base: B, overlays: Vec<Box<dyn SpecOverlay>>) -> Self {
        Self { base, overlays }
    }

    /// Names of the installed overlays, in application order.
    pub fn overlay_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.overlays.iter().map(|o| o.name())
    }
}

impl<B: CombinedConfigProvider> CombinedConfigProvider for OverlayConfigProvider<B> {
    fn combined_config(&self, module: &Module, runtime: &RuntimeInfo) -> Result<CombinedConfig> {
        let base = self.base.combined_config(module, runtime)?;

        let mut spec = clone_or_default(base.create_options());
        for overlay in &self.overlays {
            overlay.apply(&module.name, &mut spec)?;
            tracing::trace!(module = %module.name, overlay = overlay.name(), "overlay applied");
        }

        tracing::info!(
            module = %module.name,
            binds = spec.binds().len(),
            networks = spec.endpoints_config().map_or(0, std::collections::BTreeMap::len),
            "combined config ready"
        );
        Ok(CombinedConfig::new(
            base.image().to_string(),
            Some(spec),
            base.auth_config().cloned(),
        ))
    }
}

impl<B: std::fmt::Debug> std::fmt::Debug for OverlayConfigProvider<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayConfigProvider")
            .field("base", &self.base)
            .field(
                "overlays",
                &self.overlays.iter().map(|o| o.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
