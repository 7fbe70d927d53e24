//! Module descriptors and deployment-scoped runtime information.

use std::collections::BTreeMap;
use std::path::Path;

use edgeconf_common::error::{EdgeconfError, Result};
use edgeconf_common::types::AuthConfig;
use edgeconf_core::spec::CreateSpec;
use serde::{Deserialize, Deserializer, Serialize};

/// A deployable module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    /// Module name, unique within a deployment.
    pub name: String,
    /// Container settings.
    #[serde(alias = "settings")]
    pub config: DockerConfig,
}

impl Module {
    /// Creates a module with the given name and settings.
    #[must_use]
    pub fn new(name: impl Into<String>, config: DockerConfig) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }

    /// Loads a module descriptor from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| EdgeconfError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Container settings declared for a module.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DockerConfig {
    /// Image reference.
    pub image: String,
    /// Base creation options.
    ///
    /// Deployment manifests carry these as a JSON-encoded string; a plain
    /// object is accepted too.
    #[serde(
        default,
        deserialize_with = "deserialize_create_options",
        skip_serializing_if = "Option::is_none"
    )]
    pub create_options: Option<CreateSpec>,
}

impl DockerConfig {
    /// Creates settings for `image` with optional creation options.
    #[must_use]
    pub fn new(image: impl Into<String>, create_options: Option<CreateSpec>) -> Self {
        Self {
            image: image.into(),
            create_options,
        }
    }
}

fn deserialize_create_options<'de, D>(deserializer: D) -> std::result::Result<Option<CreateSpec>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(s) if s.trim().is_empty() => Ok(None),
        serde_json::Value::String(s) => serde_json::from_str(&s).map(Some).map_err(D::Error::custom),
        value => serde_json::from_value(value).map(Some).map_err(D::Error::custom),
    }
}

/// Credentials for one container registry, as declared in a deployment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryCredentials {
    /// Registry address.
    pub address: String,
    /// User name.
    pub username: String,
    /// Password or token.
    pub password: String,
}

impl From<&RegistryCredentials> for AuthConfig {
    fn from(creds: &RegistryCredentials) -> Self {
        Self::new(&creds.address, &creds.username, &creds.password)
    }
}

/// Deployment-scoped runtime information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeInfo {
    /// Registry credentials keyed by a deployment-local name.
    #[serde(default)]
    pub registry_credentials: BTreeMap<String, RegistryCredentials>,
}

impl RuntimeInfo {
    /// Loads runtime information from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| EdgeconfError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Deployment credentials as runtime auth configs.
    #[must_use]
    pub fn auth_configs(&self) -> Vec<AuthConfig> {
        self.registry_credentials.values().map(AuthConfig::from).collect()
    }
}
