//! Command-line interface for staple-autobreak.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **classify**: color every staple by hybridization quality, no edits
//! - **autobreak**: reconnect staples, then break them at their best positions
//! - **slide**: shift the whole design by whole lattice periods
//! - **mirror**: append the row-mirrored copy of the design
//! - **recolor**: randomize or replace staple colors
//!
//! ## Usage
//!
//! ```text
//! # Classify only, reports in the current directory
//! staple-autobreak classify design.json
//!
//! # Autobreak with a longer maximum and keep the reconnected design
//! staple-autobreak autobreak design.json --max 60 --keep-intermediate -O out/
//!
//! # Machine-readable summary
//! staple-autobreak autobreak design.json --format json
//!
//! # Shift everything one honeycomb period to the left
//! staple-autobreak slide design.json -- -21
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::core::settings::BreakSettings;

pub mod autobreak;
pub mod classify;
pub mod mirror;
pub mod recolor;
pub mod slide;

#[derive(Parser)]
#[command(name = "staple-autobreak")]
#[command(version)]
#[command(about = "Classify and automatically break staple strands in cadnano2 designs")]
#[command(
    long_about = "staple-autobreak traces every staple strand of a cadnano2 design, colors it by how well it hybridizes, and splits long staples where the fragments hybridize best.\n\nColors:\n- blue: optimal seed\n- cyan: acceptable seed\n- red: weak\n- yellow: too short\n- magenta: too long\n- white: pinned, never edited\n- green: start of a freshly broken strand"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Color staples by hybridization quality without editing them
    Classify(classify::ClassifyArgs),

    /// Reconnect and automatically break staples
    Autobreak(autobreak::AutobreakArgs),

    /// Shift every helix by whole lattice periods
    Slide(slide::SlideArgs),

    /// Append the row-mirrored copy of the design
    Mirror(mirror::MirrorArgs),

    /// Randomize or replace staple colors
    Recolor(recolor::RecolorArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Length and seed thresholds shared by `classify` and `autobreak`
#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// JSON file with settings; flags below override its values
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Minimum staple length, not counting single-stranded ends (default 18)
    #[arg(long)]
    pub min: Option<usize>,

    /// Maximum staple length (default 80)
    #[arg(long)]
    pub max: Option<usize>,

    /// Continuous hybridization for an optimal staple (default 14)
    #[arg(long)]
    pub optimal: Option<usize>,

    /// Continuous hybridization for an acceptable staple (default 12)
    #[arg(long)]
    pub acceptable: Option<usize>,

    /// Score factor for an acceptable seed relative to an optimal one (default 0.3)
    #[arg(long)]
    pub penalty: Option<f64>,

    /// Beam size above which break candidates get filtered (default 5000)
    #[arg(long)]
    pub limit: Option<usize>,

    /// Break candidates kept when filtering (default 100)
    #[arg(long)]
    pub filter: Option<usize>,

    /// Distance between a break and a staple crossover (default 3)
    #[arg(long)]
    pub distance: Option<usize>,

    /// Filler bases reported for pinned staples (default 0)
    #[arg(long)]
    pub extension: Option<usize>,
}

impl SettingsArgs {
    /// Defaults, then the settings file, then flags; validated
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file cannot be loaded or the result is invalid.
    pub fn resolve(&self) -> anyhow::Result<BreakSettings> {
        let mut settings = match &self.settings {
            Some(path) => BreakSettings::load_from_file(path)?,
            None => BreakSettings::default(),
        };

        let overrides = [
            (self.min, &mut settings.min_length),
            (self.max, &mut settings.max_length),
            (self.optimal, &mut settings.optimal_seed_len),
            (self.acceptable, &mut settings.acceptable_seed_len),
            (self.limit, &mut settings.beam_limit),
            (self.filter, &mut settings.beam_filter),
            (self.distance, &mut settings.crossover_distance),
            (self.extension, &mut settings.extension_length),
        ];
        for (value, field) in overrides {
            if let Some(value) = value {
                *field = value;
            }
        }
        if let Some(penalty) = self.penalty {
            settings.penalty_rate = penalty;
        }

        settings.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::ConfigError;

    #[test]
    fn test_flags_override_defaults() {
        let args = SettingsArgs {
            max: Some(60),
            penalty: Some(0.5),
            ..Default::default()
        };
        let settings = args.resolve().unwrap();
        assert_eq!(settings.max_length, 60);
        assert_eq!(settings.min_length, 18);
        assert!((settings.penalty_rate - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_flags_override_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"min_length": 20, "max_length": 50}"#).unwrap();

        let args = SettingsArgs {
            settings: Some(path),
            max: Some(45),
            ..Default::default()
        };
        let settings = args.resolve().unwrap();
        assert_eq!(settings.min_length, 20);
        assert_eq!(settings.max_length, 45);
        assert_eq!(settings.beam_limit, 5000);
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let args = SettingsArgs {
            min: Some(90),
            ..Default::default()
        };
        let err = args.resolve().unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::MinExceedsMax { min: 90, max: 80 })
        );
    }
}
