//! `bailey sieves` command - control sieve sizes per NMPS

use console::style;
use miette::Result;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{is_machine_format, print_serialized, resolve_format};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, ControlSieves, Nmps};

#[derive(clap::Args, Debug)]
pub struct SievesArgs {
    /// Only this NMPS in mm (default: all supported sizes)
    #[arg(long)]
    pub nmps: Option<Nmps>,
}

pub fn run(args: SievesArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let format = resolve_format(global, &config);

    let sizes: Vec<Nmps> = match args.nmps {
        Some(nmps) => vec![nmps],
        None => Nmps::ALL.to_vec(),
    };
    let sieves: Vec<ControlSieves> = sizes.iter().map(|n| ControlSieves::for_nmps(*n)).collect();

    if is_machine_format(format) {
        return print_serialized(&sieves, format);
    }

    let mut builder = Builder::default();
    builder.push_record(["NMPS", "HS", "PCS", "SCS", "TCS"]);
    for s in &sieves {
        builder.push_record([
            format!("{:.1}", s.nmps),
            format!("{:.2}", s.hs),
            format!("{:.2}", s.pcs),
            format!("{:.2}", s.scs),
            format!("{:.2}", s.tcs),
        ]);
    }

    let mut table = builder.build();
    match format {
        OutputFormat::Md => {
            println!("{}", table.with(Style::markdown()));
        }
        _ => {
            if !global.quiet {
                println!("{} (mm)", style("Control sieves").bold());
            }
            println!("{}", table.with(Style::rounded()));
        }
    }

    Ok(())
}
