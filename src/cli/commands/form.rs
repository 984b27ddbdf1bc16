//! `bailey form` command - interactive blend entry
//!
//! Prompts for each input in turn with the configured defaults prefilled,
//! then evaluates the blend exactly like `bailey calc`.

use console::{style, Term};
use dialoguer::{theme::ColorfulTheme, Input, Select};
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::commands::calc::evaluate_and_report;
use crate::cli::GlobalOpts;
use crate::core::inputs::{check_cacuw, check_percent, check_positive, MixInputs, Nmps, Passing};
use crate::core::Config;

#[derive(clap::Args, Debug)]
pub struct FormArgs {
    /// Also write the gradation curve to this SVG file
    #[arg(long)]
    pub plot: Option<PathBuf>,

    /// Exit with an error when any ratio is outside its band or undefined
    #[arg(long)]
    pub strict: bool,
}

pub fn run(args: FormArgs, global: &GlobalOpts) -> Result<()> {
    if !Term::stderr().is_term() {
        return Err(miette::miette!(
            help = "pass the values as flags with `bailey calc` instead",
            "`bailey form` needs an interactive terminal"
        ));
    }

    let config = Config::load();
    let defaults = config.mix_defaults()?;
    let inputs = prompt_inputs(&defaults)?;

    println!();
    evaluate_and_report(&inputs, &config, global, args.plot.as_deref(), args.strict)
}

fn prompt_inputs(defaults: &MixInputs) -> Result<MixInputs> {
    let theme = ColorfulTheme::default();

    println!();
    println!("{} Mix inputs", style("◆").cyan());
    println!("{}", style("─".repeat(50)).dim());

    let sizes: Vec<String> = Nmps::ALL.iter().map(|n| format!("{} mm", n)).collect();
    let default_index = Nmps::ALL
        .iter()
        .position(|n| *n == defaults.nmps)
        .unwrap_or(0);
    let nmps_index = Select::with_theme(&theme)
        .with_prompt("Nominal maximum particle size (NMPS)")
        .items(&sizes)
        .default(default_index)
        .interact()
        .into_diagnostic()?;

    let loose_unit_weight: f64 = Input::with_theme(&theme)
        .with_prompt("Loose unit weight of coarse aggregate (LUW, kg/m³)")
        .default(defaults.loose_unit_weight)
        .validate_with(|v: &f64| check_positive("luw", *v).map(|_| ()).map_err(|e| e.to_string()))
        .interact_text()
        .into_diagnostic()?;

    let cacuw_percent: u8 = Input::with_theme(&theme)
        .with_prompt("Chosen CACUW (%)")
        .default(defaults.cacuw_percent)
        .validate_with(|v: &u8| check_cacuw(*v).map(|_| ()).map_err(|e| e.to_string()))
        .interact_text()
        .into_diagnostic()?;

    println!();
    println!("{} Percent passing after blending", style("◆").cyan());

    let hs = prompt_percent(&theme, "% Passing HS", "hs", defaults.passing.hs)?;
    let pcs = prompt_percent(&theme, "% Passing PCS", "pcs", defaults.passing.pcs)?;
    let scs = prompt_percent(&theme, "% Passing SCS", "scs", defaults.passing.scs)?;
    let tcs = prompt_percent(&theme, "% Passing TCS", "tcs", defaults.passing.tcs)?;

    Ok(MixInputs {
        nmps: Nmps::ALL[nmps_index],
        loose_unit_weight,
        cacuw_percent,
        passing: Passing::new(hs, pcs, scs, tcs),
    })
}

fn prompt_percent(theme: &ColorfulTheme, prompt: &str, field: &str, default: f64) -> Result<f64> {
    Input::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .validate_with(|v: &f64| check_percent(field, *v).map(|_| ()).map_err(|e| e.to_string()))
        .interact_text()
        .into_diagnostic()
}
