//! `bailey plot` command - write the gradation curve only

use miette::Result;
use std::path::PathBuf;

use crate::cli::args::MixArgs;
use crate::cli::commands::calc::report_plot_written;
use crate::cli::helpers::{plot_options, resolve_format};
use crate::cli::GlobalOpts;
use crate::core::{compute, Config};
use crate::plot;

#[derive(clap::Args, Debug)]
pub struct PlotArgs {
    #[command(flatten)]
    pub mix: MixArgs,

    /// Output SVG file
    #[arg(long, short = 'o')]
    pub output: PathBuf,

    /// Image width in pixels (overrides config)
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels (overrides config)
    #[arg(long)]
    pub height: Option<u32>,
}

pub fn run(args: PlotArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let inputs = args.mix.resolve(config.mix_defaults()?);
    inputs.validate()?;

    let mut options = plot_options(&config);
    if let Some(width) = args.width {
        options.width = width;
    }
    if let Some(height) = args.height {
        options.height = height;
    }

    let eval = compute(&inputs);
    plot::write_svg(&eval.curve, &options, &args.output)?;
    report_plot_written(&args.output, resolve_format(global, &config), global.quiet);

    Ok(())
}
