//! Runtime-agnostic container creation specification.
//!
//! Only the fields the overlays touch are modelled. Every other field is
//! kept verbatim in an `extra` map at the level it was found, so a spec
//! survives a parse/serialize cycle unchanged. Field names follow the
//! container runtime's creation request (`HostConfig.Binds`,
//! `NetworkingConfig.EndpointsConfig`, ...).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Parameters for creating a container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateSpec {
    /// Host-side configuration (mounts, ports, resources).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_config: Option<HostConfig>,
    /// Network attachment configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub networking_config: Option<NetworkingConfig>,
    /// Fields not modelled here.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Host-side container configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HostConfig {
    /// Bind mounts as `source:dest[:options]` strings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binds: Option<Vec<String>>,
    /// Fields not modelled here.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Network attachment configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NetworkingConfig {
    /// Endpoint settings keyed by network identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoints_config: Option<BTreeMap<String, EndpointSettings>>,
    /// Fields not modelled here.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Settings for one network endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EndpointSettings {
    /// Extra hostnames the container answers to on this network.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub aliases: Vec<String>,
    /// Fields not modelled here.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl EndpointSettings {
    /// Creates settings carrying only the given aliases.
    #[must_use]
    pub fn with_aliases(aliases: Vec<String>) -> Self {
        Self {
            aliases,
            extra: Map::new(),
        }
    }
}

impl CreateSpec {
    /// Returns the bind list, if any.
    #[must_use]
    pub fn binds(&self) -> &[String] {
        self.host_config
            .as_ref()
            .and_then(|h| h.binds.as_deref())
            .unwrap_or_default()
    }

    /// Appends a bind entry, creating the host config and bind list if
    /// absent.
    pub fn push_bind(&mut self, entry: String) {
        self.host_config
            .get_or_insert_with(HostConfig::default)
            .binds
            .get_or_insert_with(Vec::new)
            .push(entry);
    }

    /// Returns the endpoint map, if one has been configured.
    #[must_use]
    pub fn endpoints_config(&self) -> Option<&BTreeMap<String, EndpointSettings>> {
        self.networking_config
            .as_ref()
            .and_then(|n| n.endpoints_config.as_ref())
    }

    /// Replaces the endpoint map, creating the networking config if absent.
    pub fn set_endpoints_config(&mut self, endpoints: BTreeMap<String, EndpointSettings>) {
        self.networking_config
            .get_or_insert_with(NetworkingConfig::default)
            .endpoints_config = Some(endpoints);
    }
}
