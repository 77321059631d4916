use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::parsing::cadnano::{parse_design_file, write_design_file};
use crate::transform::slide::slide;

#[derive(Args)]
pub struct SlideArgs {
    /// Input cadnano2 design (JSON)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Positions to shift right, negative for left; a multiple of 21 or 32,
    /// 0 for one lattice period
    #[arg(allow_negative_numbers = true, default_value = "0")]
    pub amount: i64,

    /// Output design
    #[arg(short, long, default_value = "output.json")]
    pub output: PathBuf,
}

/// Execute the slide command
///
/// # Errors
///
/// Returns an error if the design cannot be read or written, or the slide is invalid.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: SlideArgs, format: OutputFormat, _verbose: bool) -> anyhow::Result<()> {
    let mut graph = parse_design_file(&args.input)?;
    let applied = slide(&mut graph, args.amount)?;
    write_design_file(&args.output, &graph)?;

    let length = graph.helices.first().map_or(0, |h| h.len());
    match format {
        OutputFormat::Text => println!(
            "Slid {} helices by {applied}; new length {length}, written to {}",
            graph.len(),
            args.output.display()
        ),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "slide": applied,
                "helices": graph.len(),
                "length": length,
                "output": args.output.display().to_string(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("slide\thelices\tlength");
            println!("{applied}\t{}\t{length}", graph.len());
        }
    }
    Ok(())
}
