//! Shared helper functions for CLI commands

use clap::ValueEnum;
use console::{style, StyledObject};
use miette::Result;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::gradation::{RatioOutcome, RatioVerdict};
use crate::core::Config;
use crate::plot::PlotOptions;

/// Resolve `auto` against the configured default format
///
/// An unknown configured format falls back to text.
pub fn resolve_format(global: &GlobalOpts, config: &Config) -> OutputFormat {
    if global.format != OutputFormat::Auto {
        return global.format;
    }

    match config.default_format.as_deref() {
        Some(name) => match OutputFormat::from_str(name, true) {
            Ok(OutputFormat::Auto) | Err(_) => {
                tracing::warn!(format = name, "unknown default_format, using text");
                OutputFormat::Text
            }
            Ok(format) => format,
        },
        None => OutputFormat::Text,
    }
}

/// True for formats meant for other programs
pub fn is_machine_format(format: OutputFormat) -> bool {
    matches!(format, OutputFormat::Json | OutputFormat::Yaml)
}

/// Plot options from config
pub fn plot_options(config: &Config) -> PlotOptions {
    let (width, height) = config.plot_size();
    PlotOptions::with_size(width, height)
}

/// Value and verdict of a ratio, e.g. "✓ 0.429 (acceptable)"
pub fn format_verdict(verdict: &RatioVerdict) -> String {
    match verdict.outcome {
        RatioOutcome::Value { value, within: true } => format!("✓ {:.3} (acceptable)", value),
        RatioOutcome::Value { value, within: false } => format!("✗ {:.3} (out of bounds)", value),
        RatioOutcome::Undefined { .. } => "✗ undefined (division by zero)".to_string(),
    }
}

/// Coloured version of [`format_verdict`]
pub fn styled_verdict(verdict: &RatioVerdict) -> StyledObject<String> {
    let text = format_verdict(verdict);
    if verdict.within_band() {
        style(text).green()
    } else {
        style(text).red()
    }
}

/// Serialize a value to stdout as JSON or YAML
pub fn print_serialized<T: serde::Serialize>(value: &T, format: OutputFormat) -> Result<()> {
    let text = match format {
        OutputFormat::Yaml => serde_yml::to_string(value)
            .map_err(|e| miette::miette!("YAML serialization failed: {}", e))?,
        _ => serde_json::to_string_pretty(value)
            .map_err(|e| miette::miette!("JSON serialization failed: {}", e))?,
    };
    println!("{}", text.trim_end());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gradation::Ratio;
    use crate::core::inputs::Passing;

    fn global(format: OutputFormat) -> GlobalOpts {
        GlobalOpts {
            format,
            quiet: false,
            verbose: false,
        }
    }

    #[test]
    fn test_resolve_format() {
        let mut config = Config::default();
        assert_eq!(resolve_format(&global(OutputFormat::Auto), &config), OutputFormat::Text);

        config.default_format = Some("JSON".to_string());
        assert_eq!(resolve_format(&global(OutputFormat::Auto), &config), OutputFormat::Json);
        // An explicit flag wins over config
        assert_eq!(resolve_format(&global(OutputFormat::Md), &config), OutputFormat::Md);

        config.default_format = Some("xml".to_string());
        assert_eq!(resolve_format(&global(OutputFormat::Auto), &config), OutputFormat::Text);
    }

    #[test]
    fn test_format_verdict() {
        let passing = Passing::default();
        let ca = RatioVerdict::evaluate(Ratio::Ca, &passing);
        let fac = RatioVerdict::evaluate(Ratio::Fac, &passing);
        assert_eq!(format_verdict(&ca), "✗ 0.657 (out of bounds)");
        assert_eq!(format_verdict(&fac), "✓ 0.429 (acceptable)");

        let undefined = RatioVerdict::evaluate(Ratio::Ca, &Passing::new(100.0, 42.0, 18.0, 8.0));
        assert_eq!(format_verdict(&undefined), "✗ undefined (division by zero)");
    }

    #[test]
    fn test_plot_options_from_config() {
        let mut config = Config::default();
        config.plot.width = Some(1200);
        let options = plot_options(&config);
        assert_eq!((options.width, options.height), (1200, 600));
    }
}
