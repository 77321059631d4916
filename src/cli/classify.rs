//! Classify command - color staples by hybridization quality.
//!
//! Writes `output.json`, `domain_report.csv` and `crossover_report.csv` to the
//! output directory without changing any staple routing.

use std::path::PathBuf;

use clap::Args;

use crate::autobreak::pipeline::{classify_all, PassResult};
use crate::cli::{OutputFormat, SettingsArgs};
use crate::core::settings::BreakSettings;
use crate::parsing::cadnano::parse_design_file;
use crate::report::OutputFiles;

#[derive(Args)]
pub struct ClassifyArgs {
    /// Input cadnano2 design (JSON)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Directory for the output design and reports
    #[arg(short = 'O', long, default_value = ".")]
    pub output_dir: PathBuf,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

/// Execute the classify command
///
/// # Errors
///
/// Returns an error if the settings are invalid, the design cannot be read, or
/// an output file cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ClassifyArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let settings = args.settings.resolve()?;
    let mut graph = parse_design_file(&args.input)?;

    if verbose {
        eprintln!(
            "Loaded {} helices of {} positions from {}",
            graph.len(),
            graph.helices.first().map_or(0, |h| h.len()),
            args.input.display()
        );
    }

    let pass = classify_all(&mut graph, &settings);
    std::fs::create_dir_all(&args.output_dir)?;
    OutputFiles::in_dir(&args.output_dir, "").write(&graph, &pass, settings.extension_length)?;

    print_pass(&pass, &settings, None, format)?;
    Ok(())
}

/// Print the option echo and category counts of a finished pass.
///
/// `distance` overrides the configured crossover distance in the echo when the
/// lattice changed it.
pub(crate) fn print_pass(
    pass: &PassResult,
    settings: &BreakSettings,
    distance: Option<usize>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let distance = distance.unwrap_or(settings.crossover_distance);
    let summary = &pass.summary;

    match format {
        OutputFormat::Text => {
            println!(
                "Options: min_length: {}, max_length: {}, optimal_seed_len: {}, acceptable_seed_len: {}, distance: {}, penalty_rate: {}, filter: {}, limit: {}",
                settings.min_length,
                settings.max_length,
                settings.optimal_seed_len,
                settings.acceptable_seed_len,
                distance,
                settings.penalty_rate,
                settings.beam_filter,
                settings.beam_limit
            );
            if summary.total() > 0 {
                println!("Total strands: {}", summary.total());
                println!("Acceptable strands: {}", summary.acceptable);
                println!("Optimal strands: {}", summary.optimal);
                println!("Weak strands: {}", summary.weak);
                println!("Short strands: {}", summary.too_short);
                println!("Long strands: {}", summary.too_long);
                println!("Fixed strands (excluded from total): {}", summary.fixed);
                println!(
                    "Optimal strand percentage: {:.2}%",
                    summary.optimal_percent()
                );
                println!(
                    "Optimal and acceptable strand percentage: {:.2}%",
                    summary.good_percent()
                );
            }
            if pass.failures > 0 {
                println!("Strands that could not be traced: {}", pass.failures);
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "settings": settings,
                "effective_distance": distance,
                "summary": summary,
                "optimal_percent": summary.optimal_percent(),
                "good_percent": summary.good_percent(),
                "trace_failures": pass.failures,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("total\toptimal\tacceptable\tweak\tshort\tlong\tfixed\toptimal_pct\tgood_pct");
            println!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{:.2}\t{:.2}",
                summary.total(),
                summary.optimal,
                summary.acceptable,
                summary.weak,
                summary.too_short,
                summary.too_long,
                summary.fixed,
                summary.optimal_percent(),
                summary.good_percent()
            );
        }
    }
    Ok(())
}
