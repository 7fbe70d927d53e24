//! Overlay settings selected once at process startup.

use serde::{Deserialize, Serialize};

use crate::constants::UNIX_SCHEME;
use crate::types::{BindPathPolicy, ReservedModules};

/// Settings shared by every overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlaySettings {
    /// Names of the privileged modules.
    pub reserved: ReservedModules,
    /// How socket paths become bind mount sources.
    pub bind_path_policy: BindPathPolicy,
    /// URI scheme treated as a local socket transport.
    pub local_scheme: String,
}

impl OverlaySettings {
    /// Returns whether `scheme` denotes the local socket transport.
    #[must_use]
    pub fn is_local_scheme(&self, scheme: &str) -> bool {
        scheme.eq_ignore_ascii_case(&self.local_scheme)
    }
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            reserved: ReservedModules::default(),
            bind_path_policy: BindPathPolicy::detect(),
            local_scheme: UNIX_SCHEME.to_string(),
        }
    }
}
