use std::path::{Path, PathBuf};

use clap::Args;

use crate::cli::OutputFormat;
use crate::parsing::cadnano::{parse_design_file, write_design_file};
use crate::transform::mirror::mirror;

#[derive(Args)]
pub struct MirrorArgs {
    /// Input cadnano2 design (JSON)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output design (default: `<input>_modified.json`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "design".into(), |s| s.to_string_lossy());
    input.with_file_name(format!("{stem}_modified.json"))
}

/// Execute the mirror command
///
/// # Errors
///
/// Returns an error if the design cannot be read or written, or has no
/// symmetric helix layout.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: MirrorArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let mut graph = parse_design_file(&args.input)?;
    let summary = mirror(&mut graph)?;
    let output = args.output.clone().unwrap_or_else(|| default_output(&args.input));
    write_design_file(&output, &graph)?;

    match format {
        OutputFormat::Text => {
            if verbose {
                for (helix, partner) in &summary.partners {
                    println!("Helix {helix} <- copy of helix {partner}");
                }
            }
            println!(
                "Mirrored {} helices: length {} -> {}, written to {}",
                graph.len(),
                summary.original_len,
                summary.new_len,
                output.display()
            );
        }
        OutputFormat::Json => {
            let partners: Vec<[i64; 2]> = summary
                .partners
                .iter()
                .map(|(helix, partner)| [helix.0, partner.0])
                .collect();
            let json = serde_json::json!({
                "partners": partners,
                "original_length": summary.original_len,
                "new_length": summary.new_len,
                "output": output.display().to_string(),
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Tsv => {
            println!("helix\tpartner");
            for (helix, partner) in &summary.partners {
                println!("{helix}\t{partner}");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_name() {
        assert_eq!(
            default_output(Path::new("designs/box.json")),
            PathBuf::from("designs/box_modified.json")
        );
    }
}
