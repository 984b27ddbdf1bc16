//! Evaluation report rendering (text and Markdown)

use console::style;
use miette::Result;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{format_verdict, is_machine_format, print_serialized, styled_verdict};
use crate::cli::OutputFormat;
use crate::core::advisory::{Advisory, Level, ADVISORY_RULES};
use crate::core::{ControlSieves, Evaluation};

const SOURCE_NOTE: &str = "Based on Jebur & Abedali (2020), Mustansiriyah University";

/// Print an evaluation in the requested format
pub fn print_evaluation(eval: &Evaluation, format: OutputFormat, quiet: bool) -> Result<()> {
    if is_machine_format(format) {
        return print_serialized(eval, format);
    }

    match format {
        OutputFormat::Md => print!("{}", render_markdown(eval)),
        _ => print_text(eval, quiet),
    }
    Ok(())
}

/// Control sieve table rows (PCS, HS, SCS, TCS)
pub fn sieve_rows(sieves: &ControlSieves) -> [(&'static str, f64); 4] {
    [
        ("PCS", sieves.pcs),
        ("HS", sieves.hs),
        ("SCS", sieves.scs),
        ("TCS", sieves.tcs),
    ]
}

fn sieve_table(sieves: &ControlSieves) -> Builder {
    let mut builder = Builder::default();
    builder.push_record(["Sieve", "Size (mm)"]);
    for (name, size) in sieve_rows(sieves) {
        builder.push_record([name.to_string(), format!("{:.2}", size)]);
    }
    builder
}

/// Advisory rule conditions in evaluation order, e.g. "== 100, < 90, > 95"
fn rule_conditions() -> String {
    ADVISORY_RULES
        .iter()
        .map(|rule| rule.condition)
        .collect::<Vec<_>>()
        .join(", ")
}

fn advisory_marker(advisory: Advisory) -> console::StyledObject<&'static str> {
    match advisory.level() {
        Level::Success => style("✓").green(),
        Level::Info => style("ℹ").cyan(),
        Level::Warning | Level::Error => style("!").yellow(),
    }
}

fn print_text(eval: &Evaluation, quiet: bool) {
    let inputs = &eval.inputs;

    if !quiet {
        println!("{}", style("Bailey Method Gradation Analysis").bold());
        println!("{}", style(SOURCE_NOTE).dim());
        println!("{}", style("─".repeat(50)).dim());
        println!();
        println!(
            "   NMPS: {} mm   LUW: {} kg/m³   CACUW: {}% (CUW {:.1} kg/m³)",
            style(inputs.nmps).cyan(),
            inputs.loose_unit_weight,
            inputs.cacuw_percent,
            eval.chosen_unit_weight
        );
        println!(
            "   % Passing  HS: {}  PCS: {}  SCS: {}  TCS: {}",
            inputs.passing.hs, inputs.passing.pcs, inputs.passing.scs, inputs.passing.tcs
        );
        println!();
        println!("{}", style("Control Sieves").bold());
        println!("{}", sieve_table(&eval.sieves).build().with(Style::rounded()));
        println!();
        println!("{}", style("Bailey Ratios").bold());
    } else {
        for (name, size) in sieve_rows(&eval.sieves) {
            println!("{}: {:.2} mm", name, size);
        }
    }

    for verdict in eval.verdicts.iter() {
        println!(
            "   {:<4}({}): {}",
            verdict.ratio.label(),
            verdict.band,
            styled_verdict(verdict)
        );
    }

    let has_messages = eval.advisory.is_some() || eval.advisory_gap || !eval.warnings.is_empty();
    if !quiet && has_messages {
        println!();
        println!("{}", style("Analysis").bold());
    }

    match eval.advisory {
        Some(advisory) => println!("   {} {}", advisory_marker(advisory), advisory),
        None if !quiet => println!(
            "   {} No advisory rule covers CACUW {}% (rules: {})",
            style("·").dim(),
            inputs.cacuw_percent,
            rule_conditions()
        ),
        None => {}
    }

    for warning in &eval.warnings {
        println!("   {} Warning: {}", style("⚠").red().bold(), warning);
    }
}

/// Render an evaluation as a Markdown document
pub fn render_markdown(eval: &Evaluation) -> String {
    let inputs = &eval.inputs;
    let mut output = String::new();

    output.push_str("# Bailey Method Gradation Analysis\n\n");
    output.push_str(&format!("_{}_\n\n", SOURCE_NOTE));

    output.push_str("## Inputs\n\n");
    let mut builder = Builder::default();
    builder.push_record(["Parameter", "Value"]);
    builder.push_record(["NMPS (mm)".to_string(), inputs.nmps.to_string()]);
    builder.push_record(["LUW (kg/m³)".to_string(), inputs.loose_unit_weight.to_string()]);
    builder.push_record(["CACUW (%)".to_string(), inputs.cacuw_percent.to_string()]);
    builder.push_record(["CUW (kg/m³)".to_string(), format!("{:.1}", eval.chosen_unit_weight)]);
    for (name, value) in inputs.passing.named() {
        builder.push_record([format!("% Passing {}", name.to_uppercase()), value.to_string()]);
    }
    output.push_str(&builder.build().with(Style::markdown()).to_string());

    output.push_str("\n\n## Control Sieves\n\n");
    output.push_str(&sieve_table(&eval.sieves).build().with(Style::markdown()).to_string());

    output.push_str("\n\n## Bailey Ratios\n\n");
    let mut builder = Builder::default();
    builder.push_record(["Ratio", "Band", "Result"]);
    for verdict in eval.verdicts.iter() {
        builder.push_record([
            verdict.ratio.label().to_string(),
            verdict.band.to_string(),
            format_verdict(verdict),
        ]);
    }
    output.push_str(&builder.build().with(Style::markdown()).to_string());

    output.push_str("\n\n## Analysis\n\n");
    match eval.advisory {
        Some(advisory) => output.push_str(&format!("- {}\n", advisory)),
        None => output.push_str(&format!(
            "- No advisory rule covers CACUW {}%\n",
            inputs.cacuw_percent
        )),
    }
    for warning in &eval.warnings {
        output.push_str(&format!("- **Warning:** {}\n", warning));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{compute, MixInputs, Passing};

    #[test]
    fn test_markdown_report() {
        let md = render_markdown(&compute(&MixInputs::default()));
        assert!(md.starts_with("# Bailey Method Gradation Analysis"));
        assert!(md.contains("| PCS"));
        assert!(md.contains("4.18"));
        assert!(md.contains("✗ 0.657 (out of bounds)"));
        assert!(md.contains("best packing"));
        assert!(md.contains("**Warning:**"));
    }

    #[test]
    fn test_markdown_gap_and_undefined() {
        let inputs = MixInputs {
            cacuw_percent: 92,
            passing: Passing::new(100.0, 42.0, 18.0, 8.0),
            ..MixInputs::default()
        };
        let md = render_markdown(&compute(&inputs));
        assert!(md.contains("No advisory rule covers CACUW 92%"));
        assert!(md.contains("undefined (division by zero)"));
        assert!(!md.contains("**Warning:**"));
    }

    #[test]
    fn test_rule_conditions() {
        assert_eq!(rule_conditions(), "== 100, < 90, > 95");
    }

    #[test]
    fn test_sieve_rows_order() {
        let rows = sieve_rows(&ControlSieves::for_nmps(crate::core::Nmps::Mm19));
        let names: Vec<_> = rows.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, ["PCS", "HS", "SCS", "TCS"]);
    }
}
