//! Attaches module containers to the configured network.
//!
//! Runs only when the spec carries no endpoint configuration of its own.
//! The hub module additionally answers to the device hostname so that
//! downstream devices can reach it by that name.

use std::collections::BTreeMap;
use std::sync::Arc;

use edgeconf_common::config::OverlaySettings;
use edgeconf_common::constants::{EDGE_DEVICE_HOSTNAME_KEY, NETWORK_ID_KEY};
use edgeconf_common::error::Result;
use edgeconf_common::source::ConfigSource;
use edgeconf_common::types::ModuleRole;

use super::SpecOverlay;
use crate::spec::{CreateSpec, EndpointSettings};

/// Injects a single-network endpoint configuration.
pub struct NetworkAliasOverlay {
    source: Arc<dyn ConfigSource>,
    settings: OverlaySettings,
}

impl NetworkAliasOverlay {
    /// Creates the overlay over the given configuration.
    #[must_use]
    pub fn new(source: Arc<dyn ConfigSource>, settings: OverlaySettings) -> Self {
        Self { source, settings }
    }
}

impl SpecOverlay for NetworkAliasOverlay {
    fn name(&self) -> &'static str {
        "network-alias"
    }

    fn apply(&self, module_name: &str, spec: &mut CreateSpec) -> Result<()> {
        if spec.endpoints_config().is_some() {
            tracing::debug!(module = module_name, "endpoint config present, leaving it");
            return Ok(());
        }

        let Some(network_id) = self.source.get_non_blank(NETWORK_ID_KEY) else {
            return Ok(());
        };

        let mut aliases = Vec::new();
        if self.settings.reserved.has_role(module_name, ModuleRole::Hub) {
            if let Some(hostname) = self.source.get_non_blank(EDGE_DEVICE_HOSTNAME_KEY) {
                aliases.push(hostname);
            }
        }

        tracing::debug!(
            module = module_name,
            network = %network_id,
            aliases = ?aliases,
            "joining network"
        );
        let endpoints = BTreeMap::from([(network_id, EndpointSettings::with_aliases(aliases))]);
        spec.set_endpoints_config(endpoints);
        Ok(())
    }
}

impl std::fmt::Debug for NetworkAliasOverlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkAliasOverlay")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
