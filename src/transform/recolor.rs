use rand::Rng;

use crate::core::design::DesignGraph;
use crate::core::types::Color;

/// How [`recolor`] picks new marker colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recolor {
    /// A random 24-bit color for every marker
    Random,
    /// Markers of color `from` become `to`; all others stay
    Replace { from: Color, to: Color },
}

/// Recolor the staple markers of every helix; returns how many markers changed
pub fn recolor<R: Rng + ?Sized>(graph: &mut DesignGraph, mode: Recolor, rng: &mut R) -> usize {
    let mut changed = 0;
    for marker in graph.helices.iter_mut().flat_map(|h| h.staple_colors.iter_mut()) {
        match mode {
            Recolor::Random => {
                marker.color = Color(rng.gen_range(0..0xFF_FF_FF));
                changed += 1;
            }
            Recolor::Replace { from, to } if marker.color == from => {
                marker.color = to;
                changed += 1;
            }
            Recolor::Replace { .. } => {}
        }
    }
    changed
}
