use clap::Parser;
use tracing_subscriber::EnvFilter;

use staple_autobreak::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("staple_autobreak=debug,info")
    } else {
        EnvFilter::new("staple_autobreak=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Classify(args) => {
            cli::classify::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Autobreak(args) => {
            cli::autobreak::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Slide(args) => {
            cli::slide::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Mirror(args) => {
            cli::mirror::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Recolor(args) => {
            cli::recolor::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
