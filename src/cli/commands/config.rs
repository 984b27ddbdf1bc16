//! `bailey config` command - configuration inspection

use clap::Subcommand;
use console::style;
use miette::Result;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::helpers::{is_machine_format, print_serialized, resolve_format};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::config::LOCAL_CONFIG_FILE;
use crate::core::{Config, MixInputs};

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration and resulting input defaults
    Show,

    /// Show paths to configuration files
    Path,
}

pub fn run(cmd: ConfigCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommands::Show => run_show(global),
        ConfigCommands::Path => run_path(global),
    }
}

#[derive(Serialize)]
struct EffectiveConfig {
    config: Config,
    input_defaults: MixInputs,
}

fn run_show(global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let input_defaults = config.mix_defaults()?;
    let format = resolve_format(global, &config);

    let effective = EffectiveConfig {
        config,
        input_defaults,
    };

    if is_machine_format(format) {
        return print_serialized(&effective, format);
    }

    let yaml = serde_yml::to_string(&effective)
        .map_err(|e| miette::miette!("YAML serialization failed: {}", e))?;
    if format == OutputFormat::Md {
        println!("```yaml\n{}```", yaml);
    } else {
        print!("{}", yaml);
    }
    Ok(())
}

#[derive(Serialize)]
struct ConfigPaths {
    global: Option<PathBuf>,
    local: Option<PathBuf>,
}

fn run_path(global: &GlobalOpts) -> Result<()> {
    let paths = ConfigPaths {
        global: Config::global_config_path(),
        local: std::env::current_dir()
            .ok()
            .map(|dir| dir.join(LOCAL_CONFIG_FILE)),
    };

    let format = resolve_format(global, &Config::load());
    if is_machine_format(format) {
        return print_serialized(&paths, format);
    }

    for (label, path) in [("Global", &paths.global), ("Local", &paths.local)] {
        match path {
            Some(path) => {
                let marker = if path.exists() {
                    style("(exists)").green()
                } else {
                    style("(not found)").dim()
                };
                println!("{:<7} {} {}", label, path.display(), marker);
            }
            None => println!("{:<7} {}", label, style("(unavailable)").dim()),
        }
    }
    Ok(())
}
