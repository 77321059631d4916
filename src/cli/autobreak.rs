//! Autobreak command - reconnect staples, then split them where fragments hybridize best.

use std::path::PathBuf;

use clap::Args;

use crate::autobreak::pipeline::{run as run_pipeline, Mode};
use crate::autobreak::policy::ExponentialDecay;
use crate::cli::classify::print_pass;
use crate::cli::{OutputFormat, SettingsArgs};
use crate::parsing::cadnano::parse_design_file;
use crate::report::OutputFiles;

#[derive(Args)]
pub struct AutobreakArgs {
    /// Input cadnano2 design (JSON)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Directory for the output design and reports
    #[arg(short = 'O', long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Only merge adjacent staples, do not break them again
    #[arg(long, alias = "connect")]
    pub reconnect_only: bool,

    /// Also write the reconnected design and its reports (`*_autoconnect.*`)
    #[arg(long)]
    pub keep_intermediate: bool,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

/// Execute the autobreak command
///
/// # Errors
///
/// Returns an error if the settings are invalid, the design cannot be read, or
/// an output file cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: AutobreakArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let settings = args.settings.resolve()?;
    let mut graph = parse_design_file(&args.input)?;

    let mode = if args.reconnect_only {
        Mode::ReconnectOnly
    } else {
        Mode::Full
    };
    let report = run_pipeline(
        &mut graph,
        &settings,
        mode,
        &ExponentialDecay,
        args.keep_intermediate,
    );

    std::fs::create_dir_all(&args.output_dir)?;
    if let Some((connected, pass)) = &report.intermediate {
        OutputFiles::in_dir(&args.output_dir, "_autoconnect").write(
            connected,
            pass,
            settings.extension_length,
        )?;
    }
    OutputFiles::in_dir(&args.output_dir, "").write(
        &graph,
        &report.result,
        settings.extension_length,
    )?;

    if verbose {
        if let Some(reconnect) = &report.reconnect {
            eprintln!(
                "Reconnected {} strands ({} cycles, {} pinned, {} unmarked rejected)",
                reconnect.merged,
                reconnect.rejected_cycle,
                reconnect.rejected_pinned,
                reconnect.unmarked
            );
        }
        if let Some(stats) = &report.autobreak {
            eprintln!(
                "Broke {} of {} strands with {} cuts; {} need manual editing",
                stats.broken, stats.searched, stats.breaks, stats.exhausted
            );
        }
    }

    let distance = report.autobreak.map(|s| s.crossover_distance);
    print_pass(&report.result, &settings, distance, format)?;
    Ok(())
}
