//! Named configuration value sources.
//!
//! Overlays read endpoint URIs, the network identifier, and the device
//! hostname through [`ConfigSource`]. Sources are read-only once built and
//! safe to share between threads.
//!
//! [`FigmentConfigSource`] layers a JSON configuration file over the
//! process environment. Values from the file win.

use std::collections::BTreeMap;
use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Json};

use crate::config::OverlaySettings;
use crate::constants::{ENV_KEYS, OVERLAY_SETTINGS_KEY};
use crate::error::{EdgeconfError, Result};

/// Resolves named configuration values.
pub trait ConfigSource: Send + Sync {
    /// Returns the raw value for `key`, if present.
    fn get(&self, key: &str) -> Option<String>;

    /// Returns the value for `key`, treating blank values as absent.
    fn get_non_blank(&self, key: &str) -> Option<String> {
        self.get(key).filter(|v| !v.trim().is_empty())
    }

    /// Returns the value for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`EdgeconfError::MissingConfig`] if the key is absent or blank.
    fn require(&self, key: &str) -> Result<String> {
        self.get_non_blank(key)
            .ok_or_else(|| EdgeconfError::MissingConfig {
                key: key.to_string(),
            })
    }
}

impl<T: ConfigSource + ?Sized> ConfigSource for Box<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

impl<T: ConfigSource + ?Sized> ConfigSource for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

/// Configuration resolved from a [`Figment`].
#[derive(Debug, Clone)]
pub struct FigmentConfigSource {
    figment: Figment,
}

impl FigmentConfigSource {
    /// Wraps an already assembled figment.
    #[must_use]
    pub const fn new(figment: Figment) -> Self {
        Self { figment }
    }

    /// Loads the optional JSON file `config_file` layered over the process
    /// environment (when `use_env` is set).
    ///
    /// Only the variables in [`ENV_KEYS`] are read from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `config_file` does not exist.
    pub fn load(config_file: Option<&Path>, use_env: bool) -> Result<Self> {
        let env = use_env.then(|| Env::raw().lowercase(false).only(&ENV_KEYS));
        Self::layered(config_file, env)
    }

    fn layered(config_file: Option<&Path>, env: Option<impl figment::Provider>) -> Result<Self> {
        let mut figment = Figment::new();
        if let Some(env) = env {
            figment = figment.merge(env);
        }
        if let Some(path) = config_file {
            if !path.exists() {
                return Err(EdgeconfError::Io {
                    path: path.to_path_buf(),
                    source: std::io::ErrorKind::NotFound.into(),
                });
            }
            tracing::debug!(path = %path.display(), "loading configuration file");
            figment = figment.merge(Json::file(path));
        }
        Ok(Self { figment })
    }

    /// The underlying figment.
    #[must_use]
    pub const fn figment(&self) -> &Figment {
        &self.figment
    }

    /// Overlay settings from the `overlay` section, or defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the section is present but malformed.
    pub fn overlay_settings(&self) -> Result<OverlaySettings> {
        if !self.figment.contains(OVERLAY_SETTINGS_KEY) {
            return Ok(OverlaySettings::default());
        }
        self.figment
            .extract_inner(OVERLAY_SETTINGS_KEY)
            .map_err(|err| EdgeconfError::config(format!("invalid overlay settings: {err}")))
    }
}

impl ConfigSource for FigmentConfigSource {
    fn get(&self, key: &str) -> Option<String> {
        // Environment values are parsed leniently, so `NetworkId=42` arrives
        // as a number. Scalars are handed out as text.
        match self.figment.extract_inner::<serde_json::Value>(key).ok()? {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Number(n) => Some(n.to_string()),
            serde_json::Value::Bool(b) => Some(b.to_string()),
            serde_json::Value::Null
            | serde_json::Value::Array(_)
            | serde_json::Value::Object(_) => None,
        }
    }
}

/// In-memory configuration backed by an ordered map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapConfigSource {
    values: BTreeMap<String, String>,
}

impl MapConfigSource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, returning the updated source.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.values.insert(key.into(), value.into());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapConfigSource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl ConfigSource for MapConfigSource {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use figment::providers::Serialized;

    use super::*;
    use crate::types::BindPathPolicy;

    fn env(pairs: &[(&str, &str)]) -> Serialized<BTreeMap<String, String>> {
        Serialized::defaults(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    fn config_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    #[test]
    fn require_reports_missing_key() {
        let source = MapConfigSource::new();
        let err = source.require("IOTEDGE_WORKLOADURI").unwrap_err();
        assert!(matches!(err, EdgeconfError::MissingConfig { ref key } if key == "IOTEDGE_WORKLOADURI"));
    }

    #[test]
    fn blank_values_are_absent_for_non_blank_lookup() {
        let source = MapConfigSource::new().with("NetworkId", "   ");
        assert_eq!(source.get("NetworkId").as_deref(), Some("   "));
        assert!(source.get_non_blank("NetworkId").is_none());
        assert!(source.require("NetworkId").is_err());
    }

    #[test]
    fn file_values_win_over_environment() {
        let file = config_file(r#"{"NetworkId": "from-file"}"#);
        let source = FigmentConfigSource::layered(
            Some(file.path()),
            Some(env(&[
                ("NetworkId", "from-env"),
                ("EdgeDeviceHostName", "edgedevice1"),
            ])),
        )
        .unwrap();
        assert_eq!(source.get("NetworkId").as_deref(), Some("from-file"));
        assert_eq!(
            source.get("EdgeDeviceHostName").as_deref(),
            Some("edgedevice1")
        );
        assert!(source.get("Missing").is_none());
    }

    #[test]
    fn scalar_file_values_read_as_text() {
        let file = config_file(r#"{"A": 3, "B": true, "C": null, "D": {"x": 1}}"#);
        let source = FigmentConfigSource::load(Some(file.path()), false).unwrap();
        assert_eq!(source.get("A").as_deref(), Some("3"));
        assert_eq!(source.get("B").as_deref(), Some("true"));
        assert!(source.get("C").is_none());
        assert!(source.get("D").is_none());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FigmentConfigSource::load(Some(&dir.path().join("absent.json")), false)
            .unwrap_err();
        assert!(matches!(err, EdgeconfError::Io { .. }));
    }

    #[test]
    fn without_file_or_env_nothing_resolves() {
        let source = FigmentConfigSource::load(None, false).unwrap();
        assert!(source.get("IOTEDGE_WORKLOADURI").is_none());
        assert_eq!(source.overlay_settings().unwrap(), OverlaySettings::default());
    }

    #[test]
    fn process_environment_loads_without_error() {
        let source = FigmentConfigSource::load(None, true).unwrap();
        assert!(source.get("PATH").is_none());
    }

    #[test]
    fn overlay_settings_come_from_file_section() {
        let file = config_file(
            r#"{"overlay": {"reserved": {"hub": "gateway"}, "bind_path_policy": "windows"}}"#,
        );
        let source = FigmentConfigSource::load(Some(file.path()), false).unwrap();
        let settings = source.overlay_settings().unwrap();
        assert_eq!(settings.reserved.hub, "gateway");
        assert_eq!(settings.reserved.agent, "edgeAgent");
        assert_eq!(settings.bind_path_policy, BindPathPolicy::Windows);
    }

    #[test]
    fn malformed_overlay_section_is_config_error() {
        let file = config_file(r#"{"overlay": {"bind_path_policy": "plan9"}}"#);
        let source = FigmentConfigSource::load(Some(file.path()), false).unwrap();
        assert!(matches!(
            source.overlay_settings().unwrap_err(),
            EdgeconfError::Config { .. }
        ));
    }
}
