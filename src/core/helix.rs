use serde_json::{Map, Value};

use crate::core::types::{Color, ColorMarker, HelixId, Link};

/// One routed double-helix track of the design
#[derive(Debug, Clone, PartialEq)]
pub struct Helix {
    /// Stable id (`num`)
    pub id: HelixId,

    /// Lattice row
    pub row: i64,

    /// Lattice column
    pub col: i64,

    /// Scaffold connectivity, one entry per base position
    pub scaffold: Vec<Link>,

    /// Staple connectivity, one entry per base position
    pub staple: Vec<Link>,

    /// Insertions (`loop` in cadnano files)
    pub loopout: Vec<i64>,

    /// Deletions
    pub skip: Vec<i64>,

    /// One marker per staple strand starting on this helix, sorted by position
    pub staple_colors: Vec<ColorMarker>,

    /// Fields this crate does not interpret (`scafLoop`, `stapLoop`, ...)
    pub extra: Map<String, Value>,
}

impl Helix {
    /// Create an unfilled helix of `len` positions
    pub fn new(id: HelixId, row: i64, col: i64, len: usize) -> Self {
        Self {
            id,
            row,
            col,
            scaffold: vec![Link::EMPTY; len],
            staple: vec![Link::EMPTY; len],
            loopout: vec![0; len],
            skip: vec![0; len],
            staple_colors: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Number of base positions
    pub fn len(&self) -> usize {
        self.scaffold.len()
    }

    pub fn is_filled(&self, pos: usize) -> bool {
        self.scaffold.get(pos).is_some_and(|l| !l.is_empty())
            || self.staple.get(pos).is_some_and(|l| !l.is_empty())
    }

    /// True when no base of this helix carries a scaffold or staple
    pub fn is_empty(&self) -> bool {
        (0..self.len()).all(|pos| !self.is_filled(pos))
    }

    pub fn filled_count(&self) -> usize {
        (0..self.len()).filter(|&pos| self.is_filled(pos)).count()
    }

    pub fn marker_at(&self, pos: usize) -> Option<&ColorMarker> {
        self.staple_colors.iter().find(|m| m.pos == pos)
    }

    pub fn color_at(&self, pos: usize) -> Option<Color> {
        self.marker_at(pos).map(|m| m.color)
    }

    /// Insert (or overwrite) the marker at `pos`, keeping markers sorted
    pub fn set_marker(&mut self, pos: usize, color: Color) {
        match self.staple_colors.binary_search_by_key(&pos, |m| m.pos) {
            Ok(i) => self.staple_colors[i].color = color,
            Err(i) => self.staple_colors.insert(i, ColorMarker { pos, color }),
        }
    }

    /// Remove the marker at `pos`, returning its color
    pub fn remove_marker(&mut self, pos: usize) -> Option<Color> {
        let i = self.staple_colors.iter().position(|m| m.pos == pos)?;
        Some(self.staple_colors.remove(i).color)
    }

    /// Append `len` unfilled positions at the end of every per-base array
    pub fn pad_right(&mut self, len: usize) {
        self.scaffold.extend(std::iter::repeat(Link::EMPTY).take(len));
        self.staple.extend(std::iter::repeat(Link::EMPTY).take(len));
        self.loopout.extend(std::iter::repeat(0).take(len));
        self.skip.extend(std::iter::repeat(0).take(len));
    }
}
