//! `bailey calc` command - evaluate a blend

use console::style;
use miette::Result;
use std::path::{Path, PathBuf};

use crate::cli::args::MixArgs;
use crate::cli::helpers::{is_machine_format, plot_options, resolve_format};
use crate::cli::report::print_evaluation;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{compute, Config, Evaluation, MixInputs};
use crate::plot;

#[derive(clap::Args, Debug)]
pub struct CalcArgs {
    #[command(flatten)]
    pub mix: MixArgs,

    /// Also write the gradation curve to this SVG file
    #[arg(long)]
    pub plot: Option<PathBuf>,

    /// Exit with an error when any ratio is outside its band or undefined
    #[arg(long)]
    pub strict: bool,
}

pub fn run(args: CalcArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let inputs = args.mix.resolve(config.mix_defaults()?);
    inputs.validate()?;

    evaluate_and_report(&inputs, &config, global, args.plot.as_deref(), args.strict)
}

/// Shared tail of `calc` and `form`: evaluate, print, plot, enforce `--strict`
pub fn evaluate_and_report(
    inputs: &MixInputs,
    config: &Config,
    global: &GlobalOpts,
    plot_path: Option<&Path>,
    strict: bool,
) -> Result<()> {
    let format = resolve_format(global, config);
    let eval = compute(inputs);
    print_evaluation(&eval, format, global.quiet)?;

    if let Some(path) = plot_path {
        plot::write_svg(&eval.curve, &plot_options(config), path)?;
        report_plot_written(path, format, global.quiet);
    }

    if strict {
        check_strict(&eval)?;
    }

    Ok(())
}

/// Confirm a written plot without polluting machine-readable stdout
pub fn report_plot_written(path: &Path, format: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    let line = format!(
        "{} Gradation plot written to {}",
        style("✓").green(),
        style(path.display()).cyan()
    );
    if is_machine_format(format) {
        eprintln!("{}", line);
    } else {
        println!();
        println!("{}", line);
    }
}

fn check_strict(eval: &Evaluation) -> Result<()> {
    let failing: Vec<&str> = eval
        .verdicts
        .iter()
        .filter(|v| !v.within_band())
        .map(|v| v.ratio.label())
        .collect();

    if failing.is_empty() {
        return Ok(());
    }

    Err(miette::miette!(
        code = "bailey::calc::strict",
        help = "run without --strict to report without failing",
        "{} ratio(s) outside the acceptance band: {}",
        failing.len(),
        failing.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Passing;

    #[test]
    fn test_strict_passes_in_band_blend() {
        let inputs = MixInputs {
            passing: Passing::new(60.0, 36.0, 15.0, 6.0),
            ..MixInputs::default()
        };
        assert!(check_strict(&compute(&inputs)).is_ok());
    }

    #[test]
    fn test_strict_lists_failing_ratios() {
        let err = check_strict(&compute(&MixInputs::default())).unwrap_err();
        assert!(err.to_string().contains("1 ratio(s)"));
        assert!(err.to_string().contains("CA"));
    }

    #[test]
    fn test_strict_counts_undefined_ratio() {
        let inputs = MixInputs {
            passing: Passing::new(100.0, 42.0, 18.0, 8.0),
            ..MixInputs::default()
        };
        let err = check_strict(&compute(&inputs)).unwrap_err();
        assert!(err.to_string().contains("CA"));
    }
}
