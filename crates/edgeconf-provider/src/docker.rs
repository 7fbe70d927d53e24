//! Base provider: module settings plus registry credentials, no overlays.

use edgeconf_common::error::{EdgeconfError, Result};
use edgeconf_common::types::AuthConfig;

use crate::combined::{CombinedConfig, CombinedConfigProvider};
use crate::image::find_auth_config;
use crate::module::{Module, RuntimeInfo};

/// Builds combined configurations straight from module settings.
#[derive(Debug, Clone, Default)]
pub struct DockerConfigProvider {
    auth_configs: Vec<AuthConfig>,
}

impl DockerConfigProvider {
    /// Creates a provider with process-level registry credentials, used when
    /// the deployment declares none for an image's registry.
    #[must_use]
    pub const fn new(auth_configs: Vec<AuthConfig>) -> Self {
        Self { auth_configs }
    }
}

impl CombinedConfigProvider for DockerConfigProvider {
    fn combined_config(&self, module: &Module, runtime: &RuntimeInfo) -> Result<CombinedConfig> {
        if module.name.trim().is_empty() {
            return Err(EdgeconfError::InvalidModule {
                name: module.name.clone(),
                message: "module name is empty".into(),
            });
        }
        let image = &module.config.image;
        if image.trim().is_empty() {
            return Err(EdgeconfError::InvalidModule {
                name: module.name.clone(),
                message: "image is empty".into(),
            });
        }

        let deployment_auths = runtime.auth_configs();
        let auth = find_auth_config(&deployment_auths, image)
            .or_else(|| find_auth_config(&self.auth_configs, image))
            .cloned();
        tracing::debug!(
            module = %module.name,
            image = %image,
            authenticated = auth.is_some(),
            "resolved base config"
        );

        Ok(CombinedConfig::new(
            image.clone(),
            module.config.create_options.clone(),
            auth,
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::module::{DockerConfig, RegistryCredentials};

    fn runtime_with(address: &str, username: &str) -> RuntimeInfo {
        RuntimeInfo {
            registry_credentials: BTreeMap::from([(
                "r1".to_string(),
                RegistryCredentials {
                    address: address.into(),
                    username: username.into(),
                    password: "pw".into(),
                },
            )]),
        }
    }

    #[test]
    fn passes_image_and_create_options_through() {
        let mut spec = edgeconf_core::spec::CreateSpec::default();
        spec.push_bind("/data:/data".into());
        let module = Module::new("sensor", DockerConfig::new("busybox", Some(spec.clone())));

        let combined = DockerConfigProvider::default()
            .combined_config(&module, &RuntimeInfo::default())
            .unwrap();
        assert_eq!(combined.image(), "busybox");
        assert_eq!(combined.create_options(), Some(&spec));
        assert!(combined.auth_config().is_none());
    }

    #[test]
    fn absent_create_options_stay_absent() {
        let module = Module::new("sensor", DockerConfig::new("busybox", None));
        let combined = DockerConfigProvider::default()
            .combined_config(&module, &RuntimeInfo::default())
            .unwrap();
        assert!(combined.create_options().is_none());
    }

    #[test]
    fn deployment_credentials_win_over_process_credentials() {
        let provider = DockerConfigProvider::new(vec![AuthConfig::new("me.azurecr.io", "env", "pw")]);
        let module = Module::new("sensor", DockerConfig::new("me.azurecr.io/sensor:1", None));

        let combined = provider
            .combined_config(&module, &runtime_with("me.azurecr.io", "deploy"))
            .unwrap();
        assert_eq!(combined.auth_config().unwrap().username, "deploy");

        let combined = provider
            .combined_config(&module, &runtime_with("other.io", "deploy"))
            .unwrap();
        assert_eq!(combined.auth_config().unwrap().username, "env");
    }

    #[test]
    fn blank_image_is_rejected() {
        let module = Module::new("sensor", DockerConfig::new(" ", None));
        let err = DockerConfigProvider::default()
            .combined_config(&module, &RuntimeInfo::default())
            .unwrap_err();
        assert!(matches!(err, EdgeconfError::InvalidModule { .. }));
    }

    #[test]
    fn blank_name_is_rejected() {
        let module = Module::new("", DockerConfig::new("busybox", None));
        assert!(
            DockerConfigProvider::default()
                .combined_config(&module, &RuntimeInfo::default())
                .is_err()
        );
    }
}
