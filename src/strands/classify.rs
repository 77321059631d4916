use serde::Serialize;

use crate::core::settings::BreakSettings;
use crate::core::types::Color;
use crate::strands::trace::StrandTrace;

/// Count to f64 for percentages; strand counts are far below the mantissa limit
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Hybridization quality of a staple strand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Pinned by the operator, never recolored
    Fixed,
    /// Core length below the minimum
    TooShort,
    /// Total length above the maximum
    TooLong,
    /// Has a seed of optimal length
    Optimal,
    /// Has a seed of acceptable length
    Acceptable,
    /// No domain long enough to nucleate
    Weak,
}

impl Category {
    /// Display color written back to `stap_colors`
    #[must_use]
    pub fn color(self) -> Color {
        match self {
            Self::Fixed => Color::PINNED,
            Self::TooShort => Color::TOO_SHORT,
            Self::TooLong => Color::TOO_LONG,
            Self::Optimal => Color::OPTIMAL,
            Self::Acceptable => Color::ACCEPTABLE,
            Self::Weak => Color::WEAK,
        }
    }

    /// The strand hybridizes well enough that its short inner domains do not matter
    #[must_use]
    pub fn is_good(self) -> bool {
        matches!(self, Self::Optimal | Self::Acceptable)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Fixed => "fixed",
            Self::TooShort => "short",
            Self::TooLong => "long",
            Self::Optimal => "optimal",
            Self::Acceptable => "acceptable",
            Self::Weak => "weak",
        };
        write!(f, "{name}")
    }
}

/// Classify a strand; the first matching rule wins
#[must_use]
pub fn classify(
    pinned: bool,
    core_len: usize,
    total_len: usize,
    max_run: usize,
    settings: &BreakSettings,
) -> Category {
    if pinned {
        Category::Fixed
    } else if core_len < settings.min_length {
        Category::TooShort
    } else if total_len > settings.max_length {
        Category::TooLong
    } else if max_run >= settings.optimal_seed_len.saturating_sub(1) {
        Category::Optimal
    } else if max_run >= settings.acceptable_seed_len.saturating_sub(1) {
        Category::Acceptable
    } else {
        Category::Weak
    }
}

/// Classify a traced strand
#[must_use]
pub fn classify_trace(trace: &StrandTrace, pinned: bool, settings: &BreakSettings) -> Category {
    classify(
        pinned,
        trace.core_len,
        trace.total_len,
        trace.max_run,
        settings,
    )
}

/// Per-category strand counts for one classification pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassificationSummary {
    pub optimal: usize,
    pub acceptable: usize,
    pub weak: usize,
    pub too_short: usize,
    pub too_long: usize,
    pub fixed: usize,
}

impl ClassificationSummary {
    pub fn record(&mut self, category: Category) {
        match category {
            Category::Fixed => self.fixed += 1,
            Category::TooShort => self.too_short += 1,
            Category::TooLong => self.too_long += 1,
            Category::Optimal => self.optimal += 1,
            Category::Acceptable => self.acceptable += 1,
            Category::Weak => self.weak += 1,
        }
    }

    /// Number of classified strands; pinned strands are not counted
    #[must_use]
    pub fn total(&self) -> usize {
        self.optimal + self.acceptable + self.weak + self.too_short + self.too_long
    }

    /// Percentage of optimal strands, 0 when nothing was classified
    #[must_use]
    pub fn optimal_percent(&self) -> f64 {
        self.percent(self.optimal)
    }

    /// Percentage of optimal or acceptable strands
    #[must_use]
    pub fn good_percent(&self) -> f64 {
        self.percent(self.optimal + self.acceptable)
    }

    fn percent(&self, count: usize) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            count_to_f64(count) / count_to_f64(total) * 100.0
        }
    }
}
