//! In-place edits of staple routing: splitting a strand and merging strands
//! that end right next to another strand's start.

use serde::Serialize;
use tracing::{debug, warn};

use crate::autobreak::search::BreakPlan;
use crate::core::design::DesignGraph;
use crate::core::types::{BasePos, Color};
use crate::strands::trace::{walk_to_end, TraceError};

/// What [`break_at`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakOutcome {
    /// The strand was split; the second fragment starts at `new_start`
    Split { new_start: BasePos },
    /// The strand carries the pinned marker and was left alone
    Pinned,
    /// The offset is 0 or not inside the strand
    OutOfRange,
}

fn is_pinned(graph: &DesignGraph, at: BasePos) -> bool {
    graph.color_at(at).is_some_and(Color::is_pinned)
}

/// Split the strand starting at `start` so the first fragment keeps `offset` bases
///
/// # Errors
///
/// Returns `TraceError::EmptyStart` if `start` holds no staple and
/// `TraceError::DanglingLink` if the walk reaches a base that does not exist.
pub fn break_at(
    graph: &mut DesignGraph,
    start: BasePos,
    offset: usize,
) -> Result<BreakOutcome, TraceError> {
    let first = graph
        .staple(start)
        .ok_or(TraceError::DanglingLink(start))?;
    if first.is_empty() {
        return Err(TraceError::EmptyStart(start));
    }
    if is_pinned(graph, start) {
        return Ok(BreakOutcome::Pinned);
    }
    if offset == 0 {
        return Ok(BreakOutcome::OutOfRange);
    }

    let mut last = start;
    for _ in 1..offset {
        match graph.staple(last).and_then(|l| l.next) {
            Some(next) => last = next,
            None => return Ok(BreakOutcome::OutOfRange),
        }
    }
    let Some(new_start) = graph.staple(last).and_then(|l| l.next) else {
        return Ok(BreakOutcome::OutOfRange);
    };

    graph
        .staple_mut(new_start)
        .ok_or(TraceError::DanglingLink(new_start))?
        .prev = None;
    graph
        .staple_mut(last)
        .ok_or(TraceError::DanglingLink(last))?
        .next = None;
    if let Some(helix) = graph.helix_mut(new_start.helix) {
        helix.set_marker(new_start.pos, Color::BROKEN);
    }

    debug!(%start, %new_start, offset, "split strand");
    Ok(BreakOutcome::Split { new_start })
}

/// Apply every cut of `plan` to the strand at `start`, returning the new strand starts
///
/// # Errors
///
/// Propagates the first [`break_at`] error.
pub fn apply_plan(
    graph: &mut DesignGraph,
    start: BasePos,
    plan: &BreakPlan,
) -> Result<Vec<BasePos>, TraceError> {
    let mut starts = Vec::with_capacity(plan.len());
    let mut current = start;

    for &len in &plan.fragments {
        match break_at(graph, current, len)? {
            BreakOutcome::Split { new_start } => {
                starts.push(new_start);
                current = new_start;
            }
            BreakOutcome::Pinned => break,
            BreakOutcome::OutOfRange => {
                warn!(%current, len, "break outside strand, plan abandoned");
                break;
            }
        }
    }
    Ok(starts)
}

/// Counts from one [`reconnect_all`] pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconnectReport {
    pub merged: usize,
    /// The neighbor was the strand's own start
    pub rejected_cycle: usize,
    /// One of the two strands is pinned
    pub rejected_pinned: usize,
    /// The neighbor starts a strand but carries no marker
    pub unmarked: usize,
    /// Strands that could not be walked
    pub failed: usize,
}

impl ReconnectReport {
    #[must_use]
    pub fn rejected(&self) -> usize {
        self.rejected_cycle + self.rejected_pinned + self.unmarked
    }
}

/// Staple direction at a strand end: the delta of the incoming link when it
/// stays on the helix, otherwise the cadnano polarity (even helices run toward
/// lower positions)
fn direction_at(graph: &DesignGraph, end: BasePos) -> isize {
    match graph.staple(end).and_then(|l| l.prev) {
        Some(prev) if prev.helix == end.helix && prev.pos != end.pos => {
            if end.pos > prev.pos {
                1
            } else {
                -1
            }
        }
        _ => {
            if end.helix.0.rem_euclid(2) == 0 {
                -1
            } else {
                1
            }
        }
    }
}

/// The base after `end` in staple direction, if it begins another strand
fn following_start(graph: &DesignGraph, end: BasePos) -> Option<BasePos> {
    let pos = end.pos.checked_add_signed(direction_at(graph, end))?;
    let candidate = BasePos::new(end.helix, pos);
    let scaffold = graph.scaffold(candidate)?;
    let staple = graph.staple(candidate)?;
    (!scaffold.is_empty() && !staple.is_empty() && staple.prev.is_none()).then_some(candidate)
}

/// Merge every strand with the strand that starts right after its end.
///
/// Each strand keeps absorbing its follower until it runs into a gap, a pinned
/// strand or itself, so running this twice merges nothing the second time.
pub fn reconnect_all(graph: &mut DesignGraph) -> ReconnectReport {
    let mut report = ReconnectReport::default();

    for start in graph.strand_starts() {
        loop {
            // Absorbed earlier in this pass
            if graph.color_at(start).is_none() {
                break;
            }
            let end = match walk_to_end(graph, start) {
                Ok((end, _)) => end,
                Err(err) => {
                    warn!(%start, "cannot reconnect strand: {err}");
                    report.failed += 1;
                    break;
                }
            };
            let Some(neighbor) = following_start(graph, end) else {
                break;
            };

            if neighbor == start {
                debug!(%start, "reconnect would close a cycle");
                report.rejected_cycle += 1;
                break;
            }
            if is_pinned(graph, start) || is_pinned(graph, neighbor) {
                report.rejected_pinned += 1;
                break;
            }
            if graph.color_at(neighbor).is_none() {
                warn!(%neighbor, "strand start without a color marker");
                report.unmarked += 1;
                break;
            }

            if let Some(link) = graph.staple_mut(end) {
                link.next = Some(neighbor);
            }
            if let Some(link) = graph.staple_mut(neighbor) {
                link.prev = Some(end);
            }
            if let Some(helix) = graph.helix_mut(neighbor.helix) {
                helix.remove_marker(neighbor.pos);
            }
            debug!(%start, %neighbor, "merged strands");
            report.merged += 1;
        }
    }

    report
}
