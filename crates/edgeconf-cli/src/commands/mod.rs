//! CLI command definitions and dispatch.

pub mod render;
pub mod settings;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use edgeconf_common::config::OverlaySettings;
use edgeconf_common::source::FigmentConfigSource;
use edgeconf_common::types::BindPathPolicy;

/// edgeconf — platform overlays for module container configs.
#[derive(Parser, Debug)]
#[command(name = "edgeconf", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Log output format (logs go to stderr; filter with `RUST_LOG`).
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Log formatter selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per event.
    Json,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render the combined container config of a module manifest.
    Render(render::RenderArgs),
    /// Show effective overlay settings and resolved configuration values.
    Settings(settings::SettingsArgs),
}

/// Options shared by every command that reads device configuration.
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// JSON file of configuration values; takes precedence over the environment.
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Ignore configuration values from the process environment.
    #[arg(long)]
    pub no_env: bool,

    /// Bind path convention (defaults to the host platform).
    #[arg(long)]
    pub platform: Option<BindPathPolicy>,

    /// Name of the module that receives the device hostname alias.
    #[arg(long)]
    pub hub_module: Option<String>,

    /// Name of the module that receives the management socket mount.
    #[arg(long)]
    pub agent_module: Option<String>,
}

impl ConfigArgs {
    /// Loads the layered configuration: file first, then environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be loaded.
    pub fn source(&self) -> anyhow::Result<FigmentConfigSource> {
        FigmentConfigSource::load(self.config.as_deref(), !self.no_env).with_context(|| {
            self.config.as_ref().map_or_else(
                || "loading configuration".to_string(),
                |path| format!("loading configuration from {}", path.display()),
            )
        })
    }

    /// Overlay settings from `source` with command-line overrides applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file's overlay section is
    /// malformed.
    pub fn settings(&self, source: &FigmentConfigSource) -> anyhow::Result<OverlaySettings> {
        let mut settings = source.overlay_settings()?;
        if let Some(policy) = self.platform {
            settings.bind_path_policy = policy;
        }
        if let Some(hub) = &self.hub_module {
            settings.reserved.hub.clone_from(hub);
        }
        if let Some(agent) = &self.agent_module {
            settings.reserved.agent.clone_from(agent);
        }
        Ok(settings)
    }
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Render(args) => render::execute(&args),
        Command::Settings(args) => settings::execute(&args),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use edgeconf_common::source::ConfigSource;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn overrides_apply_to_settings() {
        let cli = Cli::parse_from([
            "edgeconf",
            "settings",
            "--no-env",
            "--platform",
            "windows",
            "--hub-module",
            "gateway",
        ]);
        let Command::Settings(args) = cli.command else {
            panic!("expected settings command");
        };
        let source = args.config.source().unwrap();
        let settings = args.config.settings(&source).unwrap();
        assert_eq!(settings.bind_path_policy, BindPathPolicy::Windows);
        assert_eq!(settings.reserved.hub, "gateway");
        assert_eq!(settings.reserved.agent, "edgeAgent");
    }

    #[test]
    fn config_file_values_and_settings_are_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"NetworkId": "from-file", "overlay": {"reserved": {"agent": "supervisor"}}}"#,
        )
        .unwrap();
        let args = ConfigArgs {
            config: Some(path),
            no_env: true,
            platform: None,
            hub_module: Some("gateway".into()),
            agent_module: None,
        };
        let source = args.source().unwrap();
        assert_eq!(source.get("NetworkId").as_deref(), Some("from-file"));
        let settings = args.settings(&source).unwrap();
        assert_eq!(settings.reserved.agent, "supervisor");
        assert_eq!(settings.reserved.hub, "gateway");
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let args = ConfigArgs {
            config: Some(PathBuf::from("/nonexistent/edgeconf.json")),
            no_env: true,
            platform: None,
            hub_module: None,
            agent_module: None,
        };
        assert!(args.source().is_err());
    }
}
