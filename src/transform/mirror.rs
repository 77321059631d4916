use serde_json::Value;
use std::collections::HashMap;

use crate::core::design::DesignGraph;
use crate::core::helix::Helix;
use crate::core::types::{BasePos, HelixId, Link};
use crate::parsing::cadnano::FormatError;
use crate::strands::topology::{HONEYCOMB_PERIOD, SQUARE_PERIOD};

/// Empty positions inserted before the mirrored copy on honeycomb designs,
/// so the copy starts on the same crossover phase
const HONEYCOMB_PHASE: usize = 7;

/// Per-helix lists that are concatenated with the partner's list
const LOOP_FIELDS: [&str; 2] = ["scafLoop", "stapLoop"];

/// What [`mirror`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorSummary {
    /// Each helix and the row-mirrored helix whose copy was appended to it
    pub partners: Vec<(HelixId, HelixId)>,
    pub original_len: usize,
    pub new_len: usize,
}

/// Pair every helix with the helix at the mirrored row in the same column
///
/// # Errors
///
/// Returns `FormatError::NoHelices`, `FormatError::UnevenHelixCount`, or
/// `FormatError::NotSymmetric` naming the first helix without a partner.
pub fn mirror_partners(graph: &DesignGraph) -> Result<HashMap<HelixId, HelixId>, FormatError> {
    if graph.is_empty() {
        return Err(FormatError::NoHelices);
    }
    if graph.len() % 2 != 0 {
        return Err(FormatError::UnevenHelixCount(graph.len()));
    }

    let min_row = graph.helices.iter().map(|h| h.row).min().unwrap_or(0);
    let max_row = graph.helices.iter().map(|h| h.row).max().unwrap_or(0);

    graph
        .helices
        .iter()
        .map(|helix| {
            let row = min_row + max_row - helix.row;
            graph
                .index_at_cell(row, helix.col)
                .and_then(|i| graph.id_of(i))
                .map(|partner| (helix.id, partner))
                .ok_or(FormatError::NotSymmetric(helix.id.0))
        })
        .collect()
}

/// Mirror `link` into the appended half: helices map to their partners and
/// positions reflect around the end of the original design
fn mirror_link(
    link: Link,
    partners: &HashMap<HelixId, HelixId>,
    reflect: usize,
) -> Result<Link, FormatError> {
    let side = |side: Option<BasePos>| -> Result<Option<BasePos>, FormatError> {
        side.map(|base| {
            let helix = partners
                .get(&base.helix)
                .copied()
                .ok_or(FormatError::UnknownHelix(base.helix.0))?;
            let pos = reflect
                .checked_sub(base.pos)
                .ok_or(FormatError::LinkOutOfRange {
                    helix: base.helix.0,
                    pos: base.pos,
                })?;
            Ok(BasePos::new(helix, pos))
        })
        .transpose()
    };
    Ok(Link {
        prev: side(link.prev)?,
        next: side(link.next)?,
    })
}

fn append_reversed(
    target: &mut Helix,
    source: &Helix,
    partners: &HashMap<HelixId, HelixId>,
    reflect: usize,
) -> Result<(), FormatError> {
    for link in source.scaffold.iter().rev() {
        target.scaffold.push(mirror_link(*link, partners, reflect)?);
    }
    for link in source.staple.iter().rev() {
        target.staple.push(mirror_link(*link, partners, reflect)?);
    }
    target.loopout.extend(source.loopout.iter().rev());
    target.skip.extend(source.skip.iter().rev());

    for marker in &source.staple_colors {
        target.set_marker(reflect - marker.pos, marker.color);
    }

    for field in LOOP_FIELDS {
        if let (Some(Value::Array(own)), Some(Value::Array(theirs))) =
            (target.extra.get(field).cloned(), source.extra.get(field))
        {
            let mut joined = own;
            joined.extend(theirs.iter().cloned());
            target.extra.insert(field.to_string(), Value::Array(joined));
        }
    }
    Ok(())
}

/// Append to every helix the reversed copy of its row-mirrored partner.
///
/// Position `p` of the partner lands at `2L + phase - p - 1`, where `L` is the
/// original length and `phase` is 7 on honeycomb designs (0 otherwise).
/// Honeycomb designs are padded with another 14 positions at the end so the
/// final length stays a multiple of 21.
///
/// # Errors
///
/// See [`mirror_partners`]; `FormatError::AmbiguousLattice` when the helix
/// length fits both lattice periods; also `FormatError::UnknownHelix` or
/// `FormatError::LinkOutOfRange` when a link points outside the design. The
/// graph is unchanged on error.
pub fn mirror(graph: &mut DesignGraph) -> Result<MirrorSummary, FormatError> {
    let partners = mirror_partners(graph)?;
    let original_len = graph.helices.first().map_or(0, Helix::len);
    let honeycomb = original_len % HONEYCOMB_PERIOD == 0;
    if honeycomb && original_len % SQUARE_PERIOD == 0 {
        return Err(FormatError::AmbiguousLattice(original_len));
    }
    let phase = if honeycomb {
        HONEYCOMB_PHASE
    } else {
        0
    };
    let reflect = 2 * original_len + phase - 1;

    let mut mirrored = graph.helices.clone();
    for helix in &mut mirrored {
        let partner_id = partners
            .get(&helix.id)
            .copied()
            .ok_or(FormatError::NotSymmetric(helix.id.0))?;
        let source = graph
            .helix(partner_id)
            .ok_or(FormatError::UnknownHelix(partner_id.0))?;

        helix.pad_right(phase);
        append_reversed(helix, source, &partners, reflect)?;
        if phase > 0 {
            helix.pad_right(HONEYCOMB_PERIOD - phase);
        }
    }

    let mut pairs: Vec<(HelixId, HelixId)> = partners.into_iter().collect();
    pairs.sort();
    let new_len = mirrored.first().map_or(0, Helix::len);
    graph.helices = mirrored;

    Ok(MirrorSummary {
        partners: pairs,
        original_len,
        new_len,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Color;
    use crate::strands::trace::fixtures::{lay_staple, paired_helices, run};

    /// Helix 0 on row 0 and helix 1 on row 1, same column
    fn stacked() -> DesignGraph {
        let mut graph = paired_helices(2, 21);
        graph.helix_mut(HelixId(1)).unwrap().row = 1;
        graph.helix_mut(HelixId(1)).unwrap().col = 0;
        let mut bases = run(0, 2, 8);
        bases.extend(run(1, 7, 2));
        lay_staple(&mut graph, &bases, Color::WEAK);
        graph
    }

    #[test]
    fn test_partners() {
        let graph = stacked();
        let partners = mirror_partners(&graph).unwrap();
        assert_eq!(partners[&HelixId(0)], HelixId(1));
        assert_eq!(partners[&HelixId(1)], HelixId(0));
    }

    #[test]
    fn test_rejects_odd_and_asymmetric_layouts() {
        let graph = paired_helices(3, 21);
        assert!(matches!(
            mirror_partners(&graph),
            Err(FormatError::UnevenHelixCount(3))
        ));

        // Two helices side by side on one row mirror onto themselves; move one off
        let mut graph = paired_helices(2, 21);
        graph.helix_mut(HelixId(1)).unwrap().row = 1;
        assert!(matches!(
            mirror_partners(&graph),
            Err(FormatError::NotSymmetric(0))
        ));
    }

    #[test]
    fn test_mirror_honeycomb() {
        let mut graph = stacked();
        let summary = mirror(&mut graph).unwrap();
        assert_eq!(summary.original_len, 21);
        assert_eq!(summary.new_len, 63);
        assert!(graph.helices.iter().all(|h| h.len() == 63 && h.skip.len() == 63));

        // reflect = 2 * 21 + 7 - 1 = 48; helix 1 has no marker to copy onto helix 0
        let helix0 = graph.helix(HelixId(0)).unwrap();
        assert_eq!(helix0.color_at(2), Some(Color::WEAK));
        assert_eq!(helix0.color_at(41), None);
        let helix1 = graph.helix(HelixId(1)).unwrap();
        // helix 0 start at 2 lands on helix 1 at 46
        assert_eq!(helix1.color_at(46), Some(Color::WEAK));

        // helix 0 base 7 linked to helix 1 base 7; the copy links helix 1 base 41 to helix 0 base 41
        assert_eq!(
            graph.staple(BasePos::new(HelixId(1), 41)).unwrap().next,
            Some(BasePos::new(HelixId(0), 41))
        );
        // Padding before and after the copy stays empty
        assert!(!graph.helices[0].is_filled(21));
        assert!(!graph.helices[0].is_filled(27));
        assert!(!graph.helices[0].is_filled(49));
        assert!(graph.helices[0].is_filled(28));
    }

    #[test]
    fn test_rejects_length_of_both_periods() {
        // 672 = 32 * 21
        let mut graph = paired_helices(2, 672);
        graph.helix_mut(HelixId(1)).unwrap().row = 1;
        graph.helix_mut(HelixId(1)).unwrap().col = 0;
        let before = graph.clone();

        let err = mirror(&mut graph).unwrap_err();
        assert!(matches!(err, FormatError::AmbiguousLattice(672)));
        assert_eq!(graph, before);
    }

    #[test]
    fn test_loop_fields_are_joined() {
        let mut graph = stacked();
        for helix in &mut graph.helices {
            helix
                .extra
                .insert("scafLoop".to_string(), serde_json::json!([helix.id.0]));
        }
        mirror(&mut graph).unwrap();
        assert_eq!(
            graph.helices[0].extra["scafLoop"],
            serde_json::json!([0, 1])
        );
    }
}
