use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::core::helix::Helix;
use crate::core::types::{BasePos, Color, HelixId, HelixIndex, Link};

/// A whole design: helices in file order plus the id <-> index lookup
#[derive(Debug, Clone, PartialEq)]
pub struct DesignGraph {
    /// Design name (`name` field)
    pub name: String,

    /// All helices, in file order
    pub helices: Vec<Helix>,

    /// Top-level fields other than `name` and `vstrands`
    pub extra: Map<String, Value>,

    /// Index: helix id -> position in `helices`
    id_to_index: HashMap<HelixId, HelixIndex>,
}

impl DesignGraph {
    #[must_use]
    pub fn new(name: impl Into<String>, helices: Vec<Helix>) -> Self {
        let mut graph = Self {
            name: name.into(),
            helices,
            extra: Map::new(),
            id_to_index: HashMap::new(),
        };
        graph.rebuild_index();
        graph
    }

    /// Recompute the id lookup after helices were added, removed or renumbered
    pub fn rebuild_index(&mut self) {
        self.id_to_index = self
            .helices
            .iter()
            .enumerate()
            .map(|(i, h)| (h.id, HelixIndex(i)))
            .collect();
    }

    pub fn index_of(&self, id: HelixId) -> Option<HelixIndex> {
        self.id_to_index.get(&id).copied()
    }

    pub fn id_of(&self, index: HelixIndex) -> Option<HelixId> {
        self.helices.get(index.0).map(|h| h.id)
    }

    pub fn helix(&self, id: HelixId) -> Option<&Helix> {
        self.index_of(id).map(|i| &self.helices[i.0])
    }

    pub fn helix_mut(&mut self, id: HelixId) -> Option<&mut Helix> {
        let i = self.index_of(id)?;
        Some(&mut self.helices[i.0])
    }

    pub fn helix_at(&self, index: HelixIndex) -> Option<&Helix> {
        self.helices.get(index.0)
    }

    pub fn len(&self) -> usize {
        self.helices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.helices.is_empty()
    }

    /// Total number of base slots over all helices; bounds any strand walk
    pub fn base_count(&self) -> usize {
        self.helices.iter().map(Helix::len).sum()
    }

    pub fn staple(&self, at: BasePos) -> Option<Link> {
        self.helix(at.helix)?.staple.get(at.pos).copied()
    }

    pub fn scaffold(&self, at: BasePos) -> Option<Link> {
        self.helix(at.helix)?.scaffold.get(at.pos).copied()
    }

    /// Mutable access to the staple link at `at`
    pub fn staple_mut(&mut self, at: BasePos) -> Option<&mut Link> {
        self.helix_mut(at.helix)?.staple.get_mut(at.pos)
    }

    /// Color marker at `at`, if a strand starts there
    pub fn color_at(&self, at: BasePos) -> Option<Color> {
        self.helix(at.helix)?.color_at(at.pos)
    }

    /// Every strand start recorded in `staple_colors`, helix by helix
    pub fn strand_starts(&self) -> Vec<BasePos> {
        self.helices
            .iter()
            .flat_map(|h| {
                h.staple_colors
                    .iter()
                    .map(move |m| BasePos::new(h.id, m.pos))
            })
            .collect()
    }

    /// Find the helix at a lattice cell
    pub fn index_at_cell(&self, row: i64, col: i64) -> Option<HelixIndex> {
        self.helices
            .iter()
            .position(|h| h.row == row && h.col == col)
            .map(HelixIndex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_index_lookup() {
        let graph = DesignGraph::new(
            "t",
            vec![
                Helix::new(HelixId(5), 0, 0, 21),
                Helix::new(HelixId(2), 0, 1, 21),
            ],
        );
        assert_eq!(graph.index_of(HelixId(2)), Some(HelixIndex(1)));
        assert_eq!(graph.id_of(HelixIndex(0)), Some(HelixId(5)));
        assert_eq!(graph.index_of(HelixId(9)), None);
        assert_eq!(graph.base_count(), 42);
        assert_eq!(graph.index_at_cell(0, 1), Some(HelixIndex(1)));
    }

    #[test]
    fn test_strand_starts() {
        let mut a = Helix::new(HelixId(0), 0, 0, 21);
        a.set_marker(3, Color::WEAK);
        a.set_marker(12, Color::WEAK);
        let mut b = Helix::new(HelixId(1), 0, 1, 21);
        b.set_marker(7, Color::WEAK);
        let graph = DesignGraph::new("t", vec![a, b]);
        assert_eq!(
            graph.strand_starts(),
            vec![
                BasePos::new(HelixId(0), 3),
                BasePos::new(HelixId(0), 12),
                BasePos::new(HelixId(1), 7),
            ]
        );
    }
}
