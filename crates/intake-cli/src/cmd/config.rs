use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use intake_core::config::{Config, WarnLevel};
use intake_core::paths;
use std::path::Path;

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Write intake.yaml with the default settings
    Init {
        /// Replace an existing intake.yaml
        #[arg(long)]
        force: bool,
    },

    /// Show the effective configuration and resolved paths
    Show,

    /// Validate the config for common mistakes
    Validate,
}

pub fn run(root: &Path, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Init { force } => init(root, force, json),
        ConfigSubcommand::Show => show(root, &load(root)?, json),
        ConfigSubcommand::Validate => validate(root, &load(root)?, json),
    }
}

fn load(root: &Path) -> anyhow::Result<Config> {
    Config::load(root).context("failed to load intake.yaml")
}

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

fn init(root: &Path, force: bool, json: bool) -> anyhow::Result<()> {
    let path = paths::config_path(root);
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }

    let config = Config::default();
    config
        .save(root)
        .with_context(|| format!("failed to write {}", path.display()))?;

    if json {
        return print_json(&config);
    }
    println!("Wrote {}", path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

fn show(root: &Path, config: &Config, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(config);
    }

    let source = paths::config_path(root);
    if source.exists() {
        println!("Config: {}", source.display());
    } else {
        println!("Config: (defaults, no {} in {})", paths::CONFIG_FILE, root.display());
    }

    let mut rows = vec![
        vec!["clients_dir".to_string(), config.clients_dir(root).display().to_string()],
        vec!["reports_dir".to_string(), config.reports_dir(root).display().to_string()],
        vec!["export_file".to_string(), config.export_path(root).display().to_string()],
        vec!["summary_file".to_string(), config.summary_path(root).display().to_string()],
    ];
    rows.push(vec![
        "template".to_string(),
        config
            .template_path(root)
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(built-in)".to_string()),
    ]);
    print_table(&["KEY", "VALUE"], rows);
    Ok(())
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

fn validate(root: &Path, config: &Config, json: bool) -> anyhow::Result<()> {
    let warnings = config.validate(root);
    let errors = warnings
        .iter()
        .filter(|w| w.level == WarnLevel::Error)
        .count();

    if json {
        print_json(&warnings)?;
    } else if warnings.is_empty() {
        println!("Config OK.");
    } else {
        for w in &warnings {
            let tag = match w.level {
                WarnLevel::Error => "error",
                WarnLevel::Warning => "warning",
            };
            println!("{tag}: {}", w.message);
        }
    }

    if errors > 0 {
        anyhow::bail!("config has {errors} error(s)");
    }
    Ok(())
}
