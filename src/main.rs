use anyhow::{Context, Result};
use clap::Parser;
use kpiboard::cli::{Cli, Commands};
use kpiboard::commands::{check_snapshot, handle_render, init_config, RenderConfig};
use kpiboard::observability::{init_tracing, install_panic_hook};

fn main() -> Result<()> {
    install_panic_hook();
    let cli = Cli::parse();
    init_tracing(cli.command.verbosity());

    match cli.command {
        Commands::Render {
            data,
            format,
            output,
            sections,
            config,
            threshold_preset,
            plain,
            verbosity: _,
        } => {
            let options = RenderConfig {
                data,
                format,
                output,
                sections,
                config,
                threshold_preset,
                plain,
            };
            handle_render(options).context("Failed to render dashboard")?;
        }
        Commands::Init { force } => {
            let path = init_config(force)?;
            println!("Created {} configuration file", path.display());
        }
        Commands::Check { data, verbosity: _ } => handle_check(data.as_deref())?,
    }

    Ok(())
}

// Prints every violation; a dirty snapshot exits with status 1
fn handle_check(data: Option<&std::path::Path>) -> Result<()> {
    let report = check_snapshot(data).context("Failed to load snapshot")?;

    if report.is_clean() {
        println!("{}: OK", report.source);
        return Ok(());
    }

    eprintln!(
        "{}: {} violation(s)",
        report.source,
        report.violations.len()
    );
    for violation in &report.violations {
        eprintln!("  - {violation}");
    }
    std::process::exit(1);
}
