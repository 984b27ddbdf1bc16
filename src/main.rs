use bailey::cli::{Cli, Commands, GlobalOpts};
use clap::Parser;
use miette::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    init_tracing(&global);

    match cli.command {
        Commands::Calc(args) => bailey::cli::commands::calc::run(args, &global),
        Commands::Form(args) => bailey::cli::commands::form::run(args, &global),
        Commands::Sieves(args) => bailey::cli::commands::sieves::run(args, &global),
        Commands::Plot(args) => bailey::cli::commands::plot::run(args, &global),
        Commands::Config(cmd) => bailey::cli::commands::config::run(cmd, &global),
        Commands::Completions(args) => bailey::cli::commands::completions::run(args),
    }
}

/// Logs go to stderr; RUST_LOG overrides the level picked from the flags
fn init_tracing(global: &GlobalOpts) {
    let level = if global.verbose {
        "debug"
    } else if global.quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
