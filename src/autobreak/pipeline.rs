//! One full run over a design: reconnect, classify, search, break, reclassify.

use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::autobreak::mutate::{apply_plan, reconnect_all, ReconnectReport};
use crate::autobreak::policy::BeamPolicy;
use crate::autobreak::search::search_with_policy;
use crate::core::design::DesignGraph;
use crate::core::settings::BreakSettings;
use crate::core::types::{Color, HelixId};
use crate::strands::classify::{classify_trace, Category, ClassificationSummary};
use crate::strands::topology::Lattice;
use crate::strands::trace::{trace_strand, StrandTrace};

/// A traced and classified strand
#[derive(Debug, Clone)]
pub struct StrandRecord {
    pub trace: StrandTrace,
    pub category: Category,
    pub pinned: bool,
}

/// Result of classifying every strand of a design once
#[derive(Debug, Clone, Default)]
pub struct PassResult {
    pub strands: Vec<StrandRecord>,
    pub summary: ClassificationSummary,
    /// Short domains per helix, counted on strands that are neither optimal nor acceptable
    pub short_domains: HashMap<HelixId, usize>,
    /// Strands that could not be traced
    pub failures: usize,
}

/// Trace and classify every strand, writing category colors back to the markers.
///
/// Pinned strands keep their color. Strands that fail to trace are logged and skipped.
pub fn classify_all(graph: &mut DesignGraph, settings: &BreakSettings) -> PassResult {
    let mut result = PassResult::default();

    for start in graph.strand_starts() {
        let pinned = graph.color_at(start).is_some_and(Color::is_pinned);
        let mut trace = match trace_strand(graph, start, settings) {
            Ok(trace) => trace,
            Err(err) => {
                warn!(%start, "skipping strand: {err}");
                result.failures += 1;
                continue;
            }
        };

        let category = classify_trace(&trace, pinned, settings);
        result.summary.record(category);

        if !pinned {
            if let Some(helix) = graph.helix_mut(start.helix) {
                helix.set_marker(start.pos, category.color());
            }
        }

        if category.is_good() {
            trace.short_domains.clear();
        } else {
            for helix in &trace.short_domains {
                *result.short_domains.entry(*helix).or_default() += 1;
            }
        }

        result.strands.push(StrandRecord {
            trace,
            category,
            pinned,
        });
    }

    result
}

/// Counts from one [`autobreak`] pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AutobreakStats {
    /// Strands handed to the search
    pub searched: usize,
    /// Strands split at least once
    pub broken: usize,
    /// Total number of cuts applied
    pub breaks: usize,
    pub pinned: usize,
    /// Over-long strands for which no plan was found
    pub exhausted: usize,
    pub failures: usize,
    /// Crossover distance actually used for this lattice
    pub crossover_distance: usize,
}

/// Search and apply a break plan for every unpinned strand
pub fn autobreak(
    graph: &mut DesignGraph,
    settings: &BreakSettings,
    policy: &dyn BeamPolicy,
) -> AutobreakStats {
    let lattice = Lattice::detect(graph);
    let settings = BreakSettings {
        crossover_distance: lattice.effective_crossover_distance(settings.crossover_distance),
        ..settings.clone()
    };
    let mut stats = AutobreakStats {
        crossover_distance: settings.crossover_distance,
        ..AutobreakStats::default()
    };
    debug!(?lattice, distance = stats.crossover_distance, "autobreak lattice");

    for start in graph.strand_starts() {
        if graph.color_at(start).is_some_and(Color::is_pinned) {
            stats.pinned += 1;
            continue;
        }
        let trace = match trace_strand(graph, start, &settings) {
            Ok(trace) => trace,
            Err(err) => {
                warn!(%start, "skipping strand: {err}");
                stats.failures += 1;
                continue;
            }
        };

        stats.searched += 1;
        let plan = search_with_policy(trace.domains.symbols(), &settings, policy);
        if plan.is_empty() {
            if trace.total_len > settings.max_length {
                warn!(
                    %start,
                    domains = %trace.domains,
                    "no break pattern found, strand needs manual editing"
                );
                stats.exhausted += 1;
            }
            continue;
        }

        match apply_plan(graph, start, &plan) {
            Ok(starts) if !starts.is_empty() => {
                stats.broken += 1;
                stats.breaks += starts.len();
            }
            Ok(_) => {}
            Err(err) => {
                warn!(%start, "break failed: {err}");
                stats.failures += 1;
            }
        }
    }

    stats
}

/// How much of the pipeline to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Classify and recolor only
    Manual,
    /// Merge adjacent strands, then classify
    ReconnectOnly,
    /// Merge, then break every strand at its best positions
    Full,
}

/// Everything one [`run`] produced
#[derive(Debug, Clone)]
pub struct RunReport {
    pub mode: Mode,
    pub reconnect: Option<ReconnectReport>,
    /// The reconnected design and its classification, before any break
    pub intermediate: Option<(DesignGraph, PassResult)>,
    pub autobreak: Option<AutobreakStats>,
    /// Classification of the design as it is written out
    pub result: PassResult,
}

/// Run the pipeline on `graph` in place.
///
/// With `keep_intermediate` the reconnected design is cloned before the breaks
/// are applied so it can be written out as well.
pub fn run(
    graph: &mut DesignGraph,
    settings: &BreakSettings,
    mode: Mode,
    policy: &dyn BeamPolicy,
    keep_intermediate: bool,
) -> RunReport {
    if mode == Mode::Manual {
        let result = classify_all(graph, settings);
        return RunReport {
            mode,
            reconnect: None,
            intermediate: None,
            autobreak: None,
            result,
        };
    }

    let reconnect = reconnect_all(graph);
    info!(
        merged = reconnect.merged,
        rejected = reconnect.rejected(),
        "reconnected strands"
    );
    let connected = classify_all(graph, settings);

    if mode == Mode::ReconnectOnly {
        return RunReport {
            mode,
            reconnect: Some(reconnect),
            intermediate: None,
            autobreak: None,
            result: connected,
        };
    }

    let intermediate = keep_intermediate.then(|| (graph.clone(), connected));
    let stats = autobreak(graph, settings, policy);
    info!(
        broken = stats.broken,
        breaks = stats.breaks,
        exhausted = stats.exhausted,
        "autobreak finished"
    );
    let result = classify_all(graph, settings);

    RunReport {
        mode,
        reconnect: Some(reconnect),
        intermediate,
        autobreak: Some(stats),
        result,
    }
}
