//! Configuration command implementations

use anyhow::Result;
use clap::{Subcommand, ValueEnum};
use serde_json::json;

use super::Context;
use crate::config::ForkJoinConfig;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the merged configuration
    Show {
        /// Output format
        #[arg(long, value_enum, default_value_t = ConfigFormat::Toml)]
        format: ConfigFormat,
    },
    /// Check that the merged configuration is valid
    Validate,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

/// Execute config commands
pub fn execute(cmd: ConfigCommands, ctx: &Context<'_>) -> Result<()> {
    match cmd {
        ConfigCommands::Show { format } => show(format, ctx),
        ConfigCommands::Validate => validate(ctx),
    }
}

fn show(format: ConfigFormat, ctx: &Context<'_>) -> Result<()> {
    let settings = ctx.settings(json!({}))?;
    let rendered = match format {
        ConfigFormat::Toml => toml::to_string_pretty(&settings)?,
        ConfigFormat::Json => serde_json::to_string_pretty(&settings)?,
    };
    ctx.output.raw(rendered.trim_end());
    Ok(())
}

fn validate(ctx: &Context<'_>) -> Result<()> {
    let output = ctx.output;
    output.header("Validating configuration");

    let settings = ctx.settings(json!({}))?;
    output.success("Configuration is valid");
    output.table_row("Pool workers", &settings.pool.resolve_workers().to_string());
    output.table_row("Sum threshold", &settings.sum.threshold.to_string());
    output.table_row("Word min split", &settings.word_count.min_split.to_string());

    // Sections come back untyped so unknown keys are visible
    let full = ForkJoinConfig::load(ctx.config_path, None::<()>)?.get_full_config()?;
    if let Some(sections) = full.as_object() {
        let known = ["pool", "sum", "word_count", "bench"];
        for key in sections.keys().filter(|k| !known.contains(&k.as_str())) {
            output.warning(&format!("Unknown configuration section: {key}"));
        }
    }
    Ok(())
}
