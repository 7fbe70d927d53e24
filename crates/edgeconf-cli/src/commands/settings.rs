//! `edgeconf settings` — Show effective overlay settings.

use std::collections::BTreeMap;

use clap::Args;
use edgeconf_common::constants::OVERLAY_KEYS;
use edgeconf_common::source::ConfigSource;
use serde::Serialize;

use super::ConfigArgs;

/// Arguments for the `settings` command.
#[derive(Args, Debug)]
pub struct SettingsArgs {
    /// Print as JSON instead of a table.
    #[arg(long)]
    pub json: bool,

    /// Device configuration options.
    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Debug, Serialize)]
struct Report {
    hub_module: String,
    agent_module: String,
    bind_path_policy: String,
    local_scheme: String,
    values: BTreeMap<&'static str, Option<String>>,
}

impl Report {
    fn rows(&self) -> Vec<(&str, String)> {
        let mut rows = vec![
            ("hub module", self.hub_module.clone()),
            ("agent module", self.agent_module.clone()),
            ("bind path policy", self.bind_path_policy.clone()),
            ("local scheme", self.local_scheme.clone()),
        ];
        for (key, value) in &self.values {
            rows.push((*key, value.clone().unwrap_or_else(|| "<unset>".into())));
        }
        rows
    }
}

fn build_report(args: &SettingsArgs) -> anyhow::Result<Report> {
    let source = args.config.source()?;
    let settings = args.config.settings(&source)?;

    Ok(Report {
        hub_module: settings.reserved.hub,
        agent_module: settings.reserved.agent,
        bind_path_policy: settings.bind_path_policy.to_string(),
        local_scheme: settings.local_scheme,
        values: OVERLAY_KEYS.iter().map(|&key| (key, source.get(key))).collect(),
    })
}

/// Executes the `settings` command.
///
/// # Errors
///
/// Returns an error if the configuration file cannot be loaded.
pub fn execute(args: &SettingsArgs) -> anyhow::Result<()> {
    let report = build_report(args)?;
    if args.json {
        return crate::output::write_json(&report, None);
    }
    print!("{}", crate::output::format_table(&report.rows()));
    Ok(())
}
