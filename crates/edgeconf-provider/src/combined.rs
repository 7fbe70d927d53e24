//! Combined module configuration and the provider abstraction.

use edgeconf_common::error::Result;
use edgeconf_common::types::AuthConfig;
use edgeconf_core::spec::CreateSpec;
use serde::{Deserialize, Serialize};

use crate::module::{Module, RuntimeInfo};

/// Everything the container runtime needs to create a module's container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedConfig {
    image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    create_options: Option<CreateSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    auth_config: Option<AuthConfig>,
}

impl CombinedConfig {
    /// Creates a combined configuration.
    #[must_use]
    pub const fn new(
        image: String,
        create_options: Option<CreateSpec>,
        auth_config: Option<AuthConfig>,
    ) -> Self {
        Self {
            image,
            create_options,
            auth_config,
        }
    }

    /// Image reference.
    #[must_use]
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Container creation spec, if the module declared one.
    #[must_use]
    pub const fn create_options(&self) -> Option<&CreateSpec> {
        self.create_options.as_ref()
    }

    /// Registry credentials for the image, if any.
    #[must_use]
    pub const fn auth_config(&self) -> Option<&AuthConfig> {
        self.auth_config.as_ref()
    }
}

/// Produces the combined configuration for a module.
pub trait CombinedConfigProvider: Send + Sync {
    /// Returns the combined configuration for `module`.
    ///
    /// # Errors
    ///
    /// Returns an error if the module is invalid or configuration needed to
    /// build its spec is missing or malformed.
    fn combined_config(&self, module: &Module, runtime: &RuntimeInfo) -> Result<CombinedConfig>;
}

impl<T: CombinedConfigProvider + ?Sized> CombinedConfigProvider for Box<T> {
    fn combined_config(&self, module: &Module, runtime: &RuntimeInfo) -> Result<CombinedConfig> {
        (**self).combined_config(module, runtime)
    }
}
