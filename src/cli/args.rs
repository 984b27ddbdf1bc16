//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    calc::CalcArgs, completions::CompletionsArgs, config::ConfigCommands, form::FormArgs,
    plot::PlotArgs, sieves::SievesArgs,
};
use crate::core::inputs::{check_percent, check_positive, MixInputs, Nmps, CACUW_MAX, CACUW_MIN};

#[derive(Parser)]
#[command(name = "bailey")]
#[command(author, version, about = "Bailey Method aggregate gradation calculator")]
#[command(long_about = "Computes control sieves and the CA, FAc and FAf ratios of an asphalt aggregate blend with the Bailey Method, checks them against the acceptance bands, and plots the gradation curve.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug logging)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate a blend: control sieves, Bailey ratios, advisories
    Calc(CalcArgs),

    /// Enter the blend interactively, then evaluate it
    Form(FormArgs),

    /// Show control sieve sizes for one or all NMPS values
    Sieves(SievesArgs),

    /// Write the gradation curve of a blend to an SVG file
    Plot(PlotArgs),

    /// Show configuration and config file locations
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Configured default, otherwise text
    #[default]
    Auto,
    /// Human-readable report
    Text,
    /// JSON format (for programming)
    Json,
    /// YAML format (full fidelity)
    Yaml,
    /// Markdown report
    Md,
}

/// Blend inputs shared by the evaluating commands
///
/// Every flag is optional; unset flags take the configured or built-in default.
#[derive(clap::Args, Clone, Debug, Default)]
pub struct MixArgs {
    /// Nominal maximum particle size in mm (19.0, 12.5 or 9.5)
    #[arg(long)]
    pub nmps: Option<Nmps>,

    /// Loose unit weight of the coarse aggregate (kg/m³)
    #[arg(long, value_parser = parse_positive, allow_negative_numbers = true)]
    pub luw: Option<f64>,

    /// Chosen percentage of the loose unit weight (CACUW %, 60-105)
    #[arg(long, value_parser = clap::value_parser!(u8).range(CACUW_MIN as i64..=CACUW_MAX as i64))]
    pub cacuw: Option<u8>,

    /// % passing the half sieve (HS)
    #[arg(long, value_parser = parse_percent, allow_negative_numbers = true)]
    pub hs: Option<f64>,

    /// % passing the primary control sieve (PCS)
    #[arg(long, value_parser = parse_percent, allow_negative_numbers = true)]
    pub pcs: Option<f64>,

    /// % passing the secondary control sieve (SCS)
    #[arg(long, value_parser = parse_percent, allow_negative_numbers = true)]
    pub scs: Option<f64>,

    /// % passing the tertiary control sieve (TCS)
    #[arg(long, value_parser = parse_percent, allow_negative_numbers = true)]
    pub tcs: Option<f64>,
}

impl MixArgs {
    /// Apply the given flags on top of `defaults`
    pub fn resolve(&self, defaults: MixInputs) -> MixInputs {
        let mut inputs = defaults;
        if let Some(nmps) = self.nmps {
            inputs.nmps = nmps;
        }
        if let Some(luw) = self.luw {
            inputs.loose_unit_weight = luw;
        }
        if let Some(cacuw) = self.cacuw {
            inputs.cacuw_percent = cacuw;
        }
        if let Some(hs) = self.hs {
            inputs.passing.hs = hs;
        }
        if let Some(pcs) = self.pcs {
            inputs.passing.pcs = pcs;
        }
        if let Some(scs) = self.scs {
            inputs.passing.scs = scs;
        }
        if let Some(tcs) = self.tcs {
            inputs.passing.tcs = tcs;
        }
        inputs
    }
}

fn parse_percent(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("'{}' is not a number", s))?;
    check_percent("value", value)
        .map_err(|_| format!("{} is outside the 0-100 percent range", value))
}

fn parse_positive(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("'{}' is not a number", s))?;
    check_positive("value", value).map_err(|_| format!("{} must be greater than zero", value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_mix_args_resolve() {
        let cli = Cli::try_parse_from(["bailey", "calc", "--nmps", "12.5", "--hs", "70", "--cacuw", "95"])
            .unwrap();
        let Commands::Calc(args) = cli.command else {
            panic!("expected calc");
        };
        let inputs = args.mix.resolve(MixInputs::default());
        assert_eq!(inputs.nmps, Nmps::Mm12_5);
        assert_eq!(inputs.passing.hs, 70.0);
        assert_eq!(inputs.passing.pcs, 42.0);
        assert_eq!(inputs.cacuw_percent, 95);
        assert_eq!(inputs.loose_unit_weight, 1550.0);
    }

    #[test]
    fn test_out_of_range_flags_rejected() {
        assert!(Cli::try_parse_from(["bailey", "calc", "--hs", "101"]).is_err());
        assert!(Cli::try_parse_from(["bailey", "calc", "--tcs", "-1"]).is_err());
        assert!(Cli::try_parse_from(["bailey", "calc", "--cacuw", "59"]).is_err());
        assert!(Cli::try_parse_from(["bailey", "calc", "--cacuw", "106"]).is_err());
        assert!(Cli::try_parse_from(["bailey", "calc", "--luw", "0"]).is_err());
        assert!(Cli::try_parse_from(["bailey", "calc", "--nmps", "25"]).is_err());
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_percent("0").unwrap(), 0.0);
        assert_eq!(parse_percent("100").unwrap(), 100.0);
        assert!(parse_percent("abc").unwrap_err().contains("not a number"));
        assert!(parse_positive("-3").unwrap_err().contains("greater than zero"));
    }
}
