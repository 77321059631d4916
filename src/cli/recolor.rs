use std::path::PathBuf;

use anyhow::{anyhow, bail};
use clap::Args;

use crate::cli::OutputFormat;
use crate::core::types::Color;
use crate::parsing::cadnano::{parse_design_file, write_design_file};
use crate::transform::recolor::{recolor, Recolor};

#[derive(Args)]
pub struct RecolorArgs {
    /// Input cadnano2 design (JSON)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Only recolor markers of this color (hex, e.g. `#ff0000`); needs --to
    #[arg(long, requires = "to")]
    pub from: Option<String>,

    /// New color for markers matching --from (hex)
    #[arg(long, requires = "from")]
    pub to: Option<String>,

    /// Output design
    #[arg(short, long, default_value = "output.json")]
    pub output: PathBuf,
}

fn parse_color(text: &str) -> anyhow::Result<Color> {
    Color::from_hex(text).ok_or_else(|| anyhow!("Invalid hex color: {text}"))
}

/// Execute the recolor command
///
/// # Errors
///
/// Returns an error if a color is not valid hex or the design cannot be read or written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: RecolorArgs, format: OutputFormat, _verbose: bool) -> anyhow::Result<()> {
    let mode = match (&args.from, &args.to) {
        (Some(from), Some(to)) => Recolor::Replace {
            from: parse_color(from)?,
            to: parse_color(to)?,
        },
        (None, None) => Recolor::Random,
        _ => bail!("--from and --to must be given together"),
    };

    let mut graph = parse_design_file(&args.input)?;
    let changed = recolor(&mut graph, mode, &mut rand::thread_rng());
    write_design_file(&args.output, &graph)?;

    match format {
        OutputFormat::Text => println!(
            "Recolored {changed} staples, written to {}",
            args.output.display()
        ),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "recolored": changed,
                "output": args.output.display().to_string(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("recolored");
            println!("{changed}");
        }
    }
    Ok(())
}
