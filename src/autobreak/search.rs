//! Breakpoint search.
//!
//! A strand is split by choosing cut positions along its domain string. The
//! search is a breadth-first beam over partial partitions: every state knows the
//! cuts made so far, their accumulated score and where the unsplit remainder
//! starts. Each generation extends every state by one more cut; states that
//! cannot be cut any further are finished and compete for the best total score.

use tracing::debug;

use crate::autobreak::policy::{BeamPolicy, ExponentialDecay};
use crate::autobreak::scoring::fragment_score;
use crate::core::settings::BreakSettings;
use crate::strands::trace::{core_len, Symbol};

/// Fragment lengths chosen for one strand, counted from its first base.
///
/// The final fragment (whatever remains after the last cut) is implied and not
/// stored, so an empty plan means "leave the strand as it is".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreakPlan {
    pub fragments: Vec<usize>,
}

impl BreakPlan {
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Number of cuts
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Cut positions measured from the strand's first base
    pub fn offsets(&self) -> Vec<usize> {
        self.fragments
            .iter()
            .scan(0, |acc, &len| {
                *acc += len;
                Some(*acc)
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
struct BeamState {
    cuts: Vec<usize>,
    score: f64,
    start: usize,
}

/// Search with the default [`ExponentialDecay`] beam policy
#[must_use]
pub fn search(symbols: &[Symbol], settings: &BreakSettings) -> BreakPlan {
    search_with_policy(symbols, settings, &ExponentialDecay)
}

/// Find the best-scoring way to split `symbols`; empty when no valid split exists
#[must_use]
pub fn search_with_policy(
    symbols: &[Symbol],
    settings: &BreakSettings,
    policy: &dyn BeamPolicy,
) -> BreakPlan {
    if symbols.is_empty() {
        return BreakPlan::default();
    }

    let bounds = policy.bounds(symbols, settings);
    let mut frontier = vec![BeamState::default()];
    let mut best: Option<(f64, Vec<usize>)> = None;
    let mut generation = 0usize;

    while !frontier.is_empty() {
        let mut next = Vec::new();

        for state in frontier {
            let children = expand(symbols, &state, settings);
            if children.is_empty() {
                if let Some(total) = finish(symbols, &state, settings) {
                    if best.as_ref().map_or(true, |(score, _)| total > *score) {
                        best = Some((total, state.cuts));
                    }
                }
            } else {
                next.extend(children);
            }
        }

        if next.len() > bounds.limit {
            // Stable sort: equal scores keep generation order
            next.sort_by(|a, b| b.score.total_cmp(&a.score));
            next.truncate(bounds.filter);
        }

        generation += 1;
        debug!(
            generation,
            states = next.len(),
            limit = bounds.limit,
            "beam generation"
        );
        frontier = next;
    }

    best.map(|(_, fragments)| BreakPlan { fragments })
        .unwrap_or_default()
}

/// Every valid next cut of `state`
fn expand(symbols: &[Symbol], state: &BeamState, settings: &BreakSettings) -> Vec<BeamState> {
    let remaining = symbols.len() - state.start;
    if remaining <= settings.min_length {
        return Vec::new();
    }
    let longest = settings.max_length.min(remaining - 1);

    (settings.min_length..=longest)
        .filter_map(|len| {
            let cut = state.start + len;
            if !is_valid_cut(symbols, state.start, cut, settings) {
                return None;
            }
            let score = fragment_score(&symbols[state.start..cut], settings);
            if score <= 0.0 {
                return None;
            }
            let mut cuts = state.cuts.clone();
            cuts.push(len);
            Some(BeamState {
                cuts,
                score: state.score + score,
                start: cut,
            })
        })
        .collect()
}

/// A cut between `cut - 1` and `cut` keeps `crossover_distance` paired bases of one
/// domain on each side and leaves both pieces long enough
fn is_valid_cut(symbols: &[Symbol], start: usize, cut: usize, settings: &BreakSettings) -> bool {
    let distance = settings.crossover_distance;
    if distance > 0 {
        let Some(left) = cut.checked_sub(distance) else {
            return false;
        };
        let right = cut + distance - 1;
        if left < start || right >= symbols.len() {
            return false;
        }
        if !symbols[left].same_domain(symbols[right]) {
            return false;
        }
    }

    if !symbols[cut - 1].is_paired() || !symbols[cut].is_paired() {
        return false;
    }

    core_len(&symbols[start..cut]) >= settings.min_length
        && core_len(&symbols[cut..]) >= settings.min_length
}

/// Total score of a finished state, `None` when its remainder is too long to keep.
///
/// Only the cut fragments count; the remainder is never scored.
fn finish(symbols: &[Symbol], state: &BeamState, settings: &BreakSettings) -> Option<f64> {
    let leftover = symbols.len() - state.start;
    (leftover <= settings.max_length).then_some(state.score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autobreak::policy::FixedBeam;
    use crate::strands::trace::DomainString;

    fn symbols(text: &str) -> Vec<Symbol> {
        DomainString::parse(text).unwrap().0
    }

    fn settings() -> BreakSettings {
        BreakSettings {
            min_length: 18,
            max_length: 40,
            crossover_distance: 1,
            ..Default::default()
        }
    }

    #[test]
    fn test_cut_next_to_seed() {
        let text = format!("{}{}{}", "a".repeat(14), "Y".repeat(14), "b".repeat(20));
        let plan = search(&symbols(&text), &settings());

        let offsets = plan.offsets();
        assert!(!offsets.is_empty());
        // At least one cut strictly inside the lowercase run after the seed
        assert!(offsets.iter().any(|&o| o > 28 && o < 48));
        // No cut between two seed bases
        assert!(offsets.iter().all(|&o| !(15..28).contains(&o)));
        assert_eq!(offsets, vec![29]);
    }

    #[test]
    fn test_short_strand_needs_no_plan() {
        let text = format!("{}{}", "A".repeat(14), "b".repeat(10));
        let plan = search(&symbols(&text), &settings());
        assert!(plan.is_empty());
    }

    #[test]
    fn test_unsplittable_strand_gives_empty_plan() {
        // 60 bases without any seed: every prefix scores 0
        let plan = search(&symbols(&"a".repeat(60)), &settings());
        assert!(plan.is_empty());
    }

    #[test]
    fn test_cuts_keep_distance_from_crossovers() {
        let s = BreakSettings {
            crossover_distance: 3,
            ..settings()
        };
        let text = format!(
            "{}{}{}",
            "A".repeat(20),
            "b".repeat(10),
            "C".repeat(20)
        );
        let syms = symbols(&text);
        let plan = search(&syms, &s);
        assert!(!plan.is_empty());
        for offset in plan.offsets() {
            for i in offset - 3..offset + 3 {
                assert!(syms[i].same_domain(syms[offset]), "cut {offset} too close to a crossover");
            }
        }
    }

    #[test]
    fn test_never_cuts_single_stranded_bases() {
        let text = format!("{}{}{}", "A".repeat(20), "^".repeat(4), "B".repeat(20));
        let s = BreakSettings {
            crossover_distance: 0,
            ..settings()
        };
        let syms = symbols(&text);
        let plan = search(&syms, &s);
        for offset in plan.offsets() {
            assert!(syms[offset - 1].is_paired() && syms[offset].is_paired());
        }
    }

    #[test]
    fn test_long_strand_fragments_respect_lengths() {
        let text = "A".repeat(16)
            + &"b".repeat(7)
            + &"C".repeat(16)
            + &"d".repeat(7)
            + &"E".repeat(16)
            + &"f".repeat(7)
            + &"G".repeat(16);
        let syms = symbols(&text);
        let s = BreakSettings {
            crossover_distance: 2,
            ..settings()
        };
        let plan = search(&syms, &s);
        assert!(!plan.is_empty());

        let mut bounds = vec![0];
        bounds.extend(plan.offsets());
        bounds.push(syms.len());
        for pair in bounds.windows(2) {
            let len = pair[1] - pair[0];
            assert!(len >= s.min_length && len <= s.max_length, "fragment of {len}");
        }
        for pair in bounds.windows(2).take(bounds.len() - 2) {
            assert!(fragment_score(&syms[pair[0]..pair[1]], &s) > 0.0);
        }
    }

    #[test]
    fn test_tiny_beam_still_finds_a_plan() {
        let text = format!("{}{}{}", "a".repeat(14), "Y".repeat(14), "b".repeat(20));
        let s = BreakSettings {
            beam_limit: 1,
            beam_filter: 1,
            ..settings()
        };
        let plan = search_with_policy(&symbols(&text), &s, &FixedBeam);
        assert!(!plan.is_empty());
    }

    #[test]
    fn test_remainder_does_not_add_to_score() {
        // Cutting at 18 leaves the only optimal seed in the remainder; cutting at
        // 20 gives a shorter remainder that would score higher if it counted
        let text = "A".repeat(12) + &"b".repeat(8) + &"C".repeat(14) + &"d".repeat(16);
        let s = BreakSettings {
            crossover_distance: 0,
            ..settings()
        };
        let plan = search(&symbols(&text), &s);
        assert_eq!(plan.offsets(), vec![18]);
    }

    #[test]
    fn test_beam_keeps_best_scoring_states() {
        // Short first fragments score best, but only a cut at 24 or later leaves a
        // remainder short enough to finish
        let syms = symbols(&("A".repeat(14) + &"b".repeat(50)));
        let unfiltered = BreakSettings {
            crossover_distance: 0,
            ..settings()
        };
        let beam = |filter| BreakSettings {
            beam_limit: 10,
            beam_filter: filter,
            ..unfiltered.clone()
        };

        let full = search_with_policy(&syms, &unfiltered, &FixedBeam);
        assert_eq!(full.offsets(), vec![24]);

        // Seven states: cuts at 18..=24
        let kept = search_with_policy(&syms, &beam(7), &FixedBeam);
        assert_eq!(kept.offsets(), vec![24]);

        // Six states: cuts at 18..=23, none of which can finish
        let pruned = search_with_policy(&syms, &beam(6), &FixedBeam);
        assert!(pruned.is_empty());
    }

    #[test]
    fn test_offsets_are_cumulative() {
        let plan = BreakPlan {
            fragments: vec![20, 25, 18],
        };
        assert_eq!(plan.offsets(), vec![20, 45, 63]);
        assert_eq!(plan.len(), 3);
    }
}
