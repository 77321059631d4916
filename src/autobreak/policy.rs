//! Beam size policies.
//!
//! The search keeps at most `filter` states once a generation grows past
//! `limit`. How large those two numbers are for a given strand is a policy
//! decision, kept behind [`BeamPolicy`] so alternative heuristics can be tried.

use crate::core::settings::BreakSettings;
use crate::strands::trace::Symbol;

/// Beam bounds for one search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeamBounds {
    /// Generation size above which the beam is filtered
    pub limit: usize,
    /// States kept after filtering
    pub filter: usize,
}

pub trait BeamPolicy {
    fn bounds(&self, symbols: &[Symbol], settings: &BreakSettings) -> BeamBounds;
}

/// Use `beam_limit` and `beam_filter` from the settings as they are
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedBeam;

impl BeamPolicy for FixedBeam {
    fn bounds(&self, _symbols: &[Symbol], settings: &BreakSettings) -> BeamBounds {
        BeamBounds {
            limit: settings.beam_limit.max(1),
            filter: settings.beam_filter.clamp(1, settings.beam_limit.max(1)),
        }
    }
}

/// Shrink the beam exponentially once domains are longer than the acceptable seed.
///
/// Long domains leave many equally good cut positions, so the state count grows
/// quickly without improving the best plan. Both bounds are scaled by
/// `exp(-(avg - acceptable) / acceptable)` and never drop below 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExponentialDecay;

impl BeamPolicy for ExponentialDecay {
    #[allow(clippy::cast_precision_loss)]
    fn bounds(&self, symbols: &[Symbol], settings: &BreakSettings) -> BeamBounds {
        let base = FixedBeam.bounds(symbols, settings);
        let acceptable = settings.acceptable_seed_len.max(1) as f64;
        let Some(avg) = average_domain_length(symbols) else {
            return base;
        };
        if avg <= acceptable {
            return base;
        }

        let scale = (-(avg - acceptable) / acceptable).exp();
        let limit = scale_bound(base.limit, scale);
        BeamBounds {
            limit,
            filter: scale_bound(base.filter, scale).min(limit),
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn scale_bound(bound: usize, scale: f64) -> usize {
    ((bound as f64 * scale).round() as usize).max(1)
}

/// Mean number of paired bases per domain, `None` when nothing is paired
#[must_use]
pub fn average_domain_length(symbols: &[Symbol]) -> Option<f64> {
    let mut paired = 0usize;
    let mut domains = 0usize;
    let mut last: Option<u32> = None;

    for symbol in symbols {
        if let Some(domain) = symbol.domain() {
            paired += 1;
            if last != Some(domain) {
                domains += 1;
            }
            last = Some(domain);
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let average = (domains > 0).then(|| paired as f64 / domains as f64);
    average
}
