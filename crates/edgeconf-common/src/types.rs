//! Domain primitive types used across the edgeconf workspace.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{EDGE_AGENT_MODULE_NAME, EDGE_HUB_MODULE_NAME};
use crate::error::EdgeconfError;

/// Registry credentials in the container runtime's wire format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Registry user name.
    #[serde(default)]
    pub username: String,
    /// Registry password or token.
    #[serde(default)]
    pub password: String,
    /// Registry address, e.g. `myregistry.azurecr.io`.
    #[serde(rename = "serveraddress", default)]
    pub server_address: String,
}

impl AuthConfig {
    /// Creates credentials for the given registry address.
    #[must_use]
    pub fn new(
        server_address: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            server_address: server_address.into(),
        }
    }
}

/// Privileged role a module can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleRole {
    /// Network hub, reachable under the device hostname.
    Hub,
    /// Agent, allowed to reach the management endpoint.
    Agent,
}

impl fmt::Display for ModuleRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hub => write!(f, "hub"),
            Self::Agent => write!(f, "agent"),
        }
    }
}

/// Names reserved for the privileged modules.
///
/// Names are matched ASCII case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReservedModules {
    /// Name of the hub module.
    pub hub: String,
    /// Name of the agent module.
    pub agent: String,
}

impl ReservedModules {
    /// Returns the role held by the module with the given name, if any.
    #[must_use]
    pub fn role_of(&self, module_name: &str) -> Option<ModuleRole> {
        if module_name.eq_ignore_ascii_case(&self.hub) {
            Some(ModuleRole::Hub)
        } else if module_name.eq_ignore_ascii_case(&self.agent) {
            Some(ModuleRole::Agent)
        } else {
            None
        }
    }

    /// Returns whether the module with the given name holds `role`.
    #[must_use]
    pub fn has_role(&self, module_name: &str, role: ModuleRole) -> bool {
        self.role_of(module_name) == Some(role)
    }
}

impl Default for ReservedModules {
    fn default() -> Self {
        Self {
            hub: EDGE_HUB_MODULE_NAME.to_string(),
            agent: EDGE_AGENT_MODULE_NAME.to_string(),
        }
    }
}

/// How the host path of a socket endpoint is turned into a bind mount source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindPathPolicy {
    /// Bind the socket file itself.
    Unix,
    /// Bind the directory containing the socket file. Windows hosts cannot
    /// bind-mount a single socket file.
    Windows,
}

impl BindPathPolicy {
    /// Returns the policy matching the compilation target.
    #[must_use]
    pub const fn detect() -> Self {
        if cfg!(windows) { Self::Windows } else { Self::Unix }
    }
}

impl Default for BindPathPolicy {
    fn default() -> Self {
        Self::detect()
    }
}

impl fmt::Display for BindPathPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unix => write!(f, "unix"),
            Self::Windows => write!(f, "windows"),
        }
    }
}

impl FromStr for BindPathPolicy {
    type Err = EdgeconfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unix" | "linux" => Ok(Self::Unix),
            "windows" => Ok(Self::Windows),
            other => Err(EdgeconfError::config(format!(
                "unknown bind path policy: {other}"
            ))),
        }
    }
}
