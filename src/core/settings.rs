use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("max length {max} should be larger than min length {min}")]
    MinExceedsMax { min: usize, max: usize },

    #[error(
        "optimal seeding length {optimal} should be larger than acceptable seed length {acceptable}"
    )]
    OptimalBelowAcceptable { optimal: usize, acceptable: usize },

    #[error("penalty rate {0} must lie between 0 and 1")]
    PenaltyOutOfRange(f64),

    #[error("{0} must be at least 1")]
    ZeroLength(&'static str),

    #[error("beam filter must be between 1 and the beam limit ({limit}), got {filter}")]
    EmptyBeam { limit: usize, filter: usize },
}

/// Length and hybridization thresholds shared by tracing, classification and search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakSettings {
    /// Minimum strand length, not counting single-stranded overhangs
    pub min_length: usize,

    /// Maximum strand length
    pub max_length: usize,

    /// Continuous hybridization needed for an optimal strand
    pub optimal_seed_len: usize,

    /// Continuous hybridization needed for an acceptable strand
    pub acceptable_seed_len: usize,

    /// Score factor for fragments whose best seed is only acceptable (0-1)
    pub penalty_rate: f64,

    /// Number of beam states above which the beam gets filtered
    pub beam_limit: usize,

    /// Number of states kept when filtering
    pub beam_filter: usize,

    /// Minimum distance between a break and a staple crossover
    pub crossover_distance: usize,

    /// Filler added to pinned strands in the domain report
    pub extension_length: usize,
}

impl Default for BreakSettings {
    fn default() -> Self {
        Self {
            min_length: 18,
            max_length: 80,
            optimal_seed_len: 14,
            acceptable_seed_len: 12,
            penalty_rate: 0.3,
            beam_limit: 5000,
            beam_filter: 100,
            crossover_distance: 3,
            extension_length: 0,
        }
    }
}

impl BreakSettings {
    /// Load settings from a JSON file; missing fields take their defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Reject combinations that make classification or search meaningless
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_length == 0 {
            return Err(ConfigError::ZeroLength("min length"));
        }
        if self.acceptable_seed_len == 0 {
            return Err(ConfigError::ZeroLength("acceptable seed length"));
        }
        if self.min_length > self.max_length {
            return Err(ConfigError::MinExceedsMax {
                min: self.min_length,
                max: self.max_length,
            });
        }
        if self.optimal_seed_len < self.acceptable_seed_len {
            return Err(ConfigError::OptimalBelowAcceptable {
                optimal: self.optimal_seed_len,
                acceptable: self.acceptable_seed_len,
            });
        }
        if !(0.0..=1.0).contains(&self.penalty_rate) {
            return Err(ConfigError::PenaltyOutOfRange(self.penalty_rate));
        }
        if self.beam_filter == 0 || self.beam_filter > self.beam_limit {
            return Err(ConfigError::EmptyBeam {
                limit: self.beam_limit,
                filter: self.beam_filter,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(BreakSettings::default().validate().is_ok());
    }

    #[test]
    fn test_min_exceeds_max() {
        let settings = BreakSettings {
            min_length: 50,
            max_length: 40,
            ..Default::default()
        };
        assert_eq!(
            settings.validate(),
            Err(ConfigError::MinExceedsMax { min: 50, max: 40 })
        );
    }

    #[test]
    fn test_optimal_below_acceptable() {
        let settings = BreakSettings {
            optimal_seed_len: 10,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::OptimalBelowAcceptable { .. })
        ));
    }

    #[test]
    fn test_penalty_and_beam() {
        let settings = BreakSettings {
            penalty_rate: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::PenaltyOutOfRange(_))
        ));

        let settings = BreakSettings {
            beam_filter: 0,
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(ConfigError::EmptyBeam { .. })));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: BreakSettings =
            serde_json::from_str(r#"{"max_length": 60, "penalty_rate": 0.5}"#).unwrap();
        assert_eq!(settings.max_length, 60);
        assert_eq!(settings.min_length, 18);
        assert!((settings.penalty_rate - 0.5).abs() < f64::EPSILON);
    }
}
