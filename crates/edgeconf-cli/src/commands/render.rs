//! `edgeconf render` — Render the combined container config of a module.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use edgeconf_common::constants::{
    REGISTRY_ADDRESS_KEY, REGISTRY_PASSWORD_KEY, REGISTRY_USERNAME_KEY,
};
use edgeconf_common::source::ConfigSource;
use edgeconf_common::types::AuthConfig;
use edgeconf_provider::combined::CombinedConfigProvider;
use edgeconf_provider::docker::DockerConfigProvider;
use edgeconf_provider::module::{Module, RuntimeInfo};
use edgeconf_provider::overlay::OverlayConfigProvider;

use super::ConfigArgs;

/// Arguments for the `render` command.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Path to the module manifest (JSON with `name` and `settings`).
    pub module: PathBuf,

    /// JSON file with deployment runtime info (registry credentials).
    #[arg(long, short = 'r')]
    pub runtime: Option<PathBuf>,

    /// Write output to a file instead of stdout.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Device configuration options.
    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Executes the `render` command.
///
/// # Errors
///
/// Returns an error if an input file cannot be loaded or the module's
/// configuration cannot be built.
pub fn execute(args: &RenderArgs) -> anyhow::Result<()> {
    let module = Module::from_json_file(&args.module)
        .with_context(|| format!("loading module manifest {}", args.module.display()))?;
    let runtime = match &args.runtime {
        Some(path) => RuntimeInfo::from_json_file(path)
            .with_context(|| format!("loading runtime info {}", path.display()))?,
        None => RuntimeInfo::default(),
    };

    let source = Arc::new(args.config.source()?);
    let settings = args.config.settings(&source)?;
    tracing::info!(
        module = %module.name,
        policy = %settings.bind_path_policy,
        "rendering combined config"
    );

    let auth_configs = process_auth_configs(source.as_ref());
    let provider =
        OverlayConfigProvider::new(DockerConfigProvider::new(auth_configs), source, settings);
    let combined = provider
        .combined_config(&module, &runtime)
        .with_context(|| format!("building config for module {}", module.name))?;

    crate::output::write_json(&combined, args.output.as_deref())
}

/// Process-level registry credentials, if all three keys are set.
fn process_auth_configs(source: &dyn ConfigSource) -> Vec<AuthConfig> {
    let address = source.get_non_blank(REGISTRY_ADDRESS_KEY);
    let username = source.get_non_blank(REGISTRY_USERNAME_KEY);
    let password = source.get(REGISTRY_PASSWORD_KEY);
    match (address, username, password) {
        (Some(address), Some(username), Some(password)) => {
            vec![AuthConfig::new(address, username, password)]
        }
        _ => Vec::new(),
    }
}
