//! Lattice adjacency between helices and crossover density per neighboring pair.
//!
//! Neighbors are always computed from the current graph: breaking or merging
//! strands can empty a helix, and empty helices are never neighbors.

use serde::Serialize;
use std::collections::HashMap;

use crate::core::design::DesignGraph;
use crate::core::helix::Helix;
use crate::core::types::{HelixId, HelixIndex, Link};

/// Helix lengths of honeycomb designs are multiples of this period
pub const HONEYCOMB_PERIOD: usize = 21;

/// Helix lengths of square designs are multiples of this period
pub const SQUARE_PERIOD: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LatticeKind {
    Honeycomb,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Lattice {
    pub kind: LatticeKind,
    /// Every helix sits on one row or one column with the first helix
    pub single_layer: bool,
}

impl Lattice {
    /// Infer the lattice from helix length and layout
    #[must_use]
    pub fn detect(graph: &DesignGraph) -> Self {
        let len = graph.helices.first().map_or(0, Helix::len);
        let kind = if len % HONEYCOMB_PERIOD == 0 {
            LatticeKind::Honeycomb
        } else {
            LatticeKind::Square
        };

        let origin = graph.helices.iter().map(|h| (h.row, h.col)).min();
        let single_layer = origin.map_or(true, |(row, col)| {
            graph.helices.iter().all(|h| h.row == row || h.col == col)
        });

        Self { kind, single_layer }
    }

    /// Lattice cells adjacent to `(row, col)`
    #[must_use]
    pub fn neighbor_cells(self, row: i64, col: i64) -> Vec<(i64, i64)> {
        match self.kind {
            LatticeKind::Honeycomb => {
                let vertical = if (row + col).rem_euclid(2) == 0 {
                    row - 1
                } else {
                    row + 1
                };
                vec![(row, col - 1), (row, col + 1), (vertical, col)]
            }
            LatticeKind::Square => vec![
                (row, col - 1),
                (row, col + 1),
                (row - 1, col),
                (row + 1, col),
            ],
        }
    }

    /// Minimum distance kept between a break and a crossover on this lattice.
    ///
    /// Square lattices always use 4, and single-layer designs add another 4.
    #[must_use]
    pub fn effective_crossover_distance(self, distance: usize) -> usize {
        let base = match self.kind {
            LatticeKind::Honeycomb => distance,
            LatticeKind::Square => 4,
        };
        base + if self.single_layer { 4 } else { 0 }
    }
}

/// Non-empty helices adjacent to the helix at `index`
#[must_use]
pub fn neighbors(graph: &DesignGraph, index: HelixIndex) -> Vec<HelixIndex> {
    neighbors_on(graph, index, Lattice::detect(graph))
}

/// Same as [`neighbors`] with an already detected lattice
#[must_use]
pub fn neighbors_on(graph: &DesignGraph, index: HelixIndex, lattice: Lattice) -> Vec<HelixIndex> {
    let Some(helix) = graph.helix_at(index) else {
        return Vec::new();
    };
    lattice
        .neighbor_cells(helix.row, helix.col)
        .into_iter()
        .filter_map(|(row, col)| graph.index_at_cell(row, col))
        .filter(|&i| i != index && graph.helix_at(i).is_some_and(|h| !h.is_empty()))
        .collect()
}

/// Crossover statistics for one pair of neighboring helices
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairDensity {
    pub first: HelixId,
    pub second: HelixId,
    pub scaffold_crossovers: usize,
    pub staple_crossovers: usize,
    /// Positions filled on both helices
    pub filled_length: usize,
    /// Short domains recorded on either helix
    pub short_domains: usize,
}

impl PairDensity {
    #[must_use]
    pub fn total_crossovers(&self) -> usize {
        self.scaffold_crossovers + self.staple_crossovers
    }

    #[must_use]
    pub fn pair_id(&self) -> String {
        format!("{}-{}", self.first, self.second)
    }
}

/// Count links whose `next` side leaves `from` for helix `to`
fn crossovers_between(from: &Helix, to: HelixId) -> (usize, usize) {
    let count = |links: &[Link]| {
        links
            .iter()
            .filter(|l| l.next.is_some_and(|n| n.helix == to))
            .count()
    };
    (count(&from.scaffold), count(&from.staple))
}

/// One row per unordered pair of neighboring, non-empty helices, in helix order
#[must_use]
#[allow(clippy::implicit_hasher)]
pub fn crossover_density(
    graph: &DesignGraph,
    short_domains: &HashMap<HelixId, usize>,
) -> Vec<PairDensity> {
    let lattice = Lattice::detect(graph);
    let mut rows = Vec::new();

    for (i, helix) in graph.helices.iter().enumerate() {
        if helix.is_empty() {
            continue;
        }
        for j in neighbors_on(graph, HelixIndex(i), lattice) {
            if j.0 <= i {
                continue;
            }
            let Some(other) = graph.helix_at(j) else {
                continue;
            };
            let (scaf_ab, stap_ab) = crossovers_between(helix, other.id);
            let (scaf_ba, stap_ba) = crossovers_between(other, helix.id);
            let filled_length = (0..helix.len().min(other.len()))
                .filter(|&pos| helix.is_filled(pos) && other.is_filled(pos))
                .count();
            let short = short_domains.get(&helix.id).copied().unwrap_or(0)
                + short_domains.get(&other.id).copied().unwrap_or(0);

            rows.push(PairDensity {
                first: helix.id,
                second: other.id,
                scaffold_crossovers: scaf_ab + scaf_ba,
                staple_crossovers: stap_ab + stap_ba,
                filled_length,
                short_domains: short,
            });
        }
    }

    rows
}
