use crate::core::design::DesignGraph;
use crate::core::helix::Helix;
use crate::core::types::{BasePos, Link};
use crate::parsing::cadnano::FormatError;
use crate::strands::topology::{HONEYCOMB_PERIOD, SQUARE_PERIOD};

/// Turn a requested slide into the amount actually applied.
///
/// 0 means one lattice period; anything else must be a multiple of 21 or 32.
///
/// # Errors
///
/// Returns `FormatError::BadSlide` when the amount is not a multiple of either
/// period, or when 0 is requested for a design whose length matches neither.
pub fn resolve_slide(graph: &DesignGraph, requested: i64) -> Result<i64, FormatError> {
    if requested == 0 {
        let len = graph.helices.first().map_or(0, Helix::len);
        return if len % HONEYCOMB_PERIOD == 0 {
            Ok(HONEYCOMB_PERIOD as i64)
        } else if len % SQUARE_PERIOD == 0 {
            Ok(SQUARE_PERIOD as i64)
        } else {
            Err(FormatError::BadSlide(format!(
                "helix length {len} is not a multiple of {HONEYCOMB_PERIOD} or {SQUARE_PERIOD}"
            )))
        };
    }
    if requested % HONEYCOMB_PERIOD as i64 != 0 && requested % SQUARE_PERIOD as i64 != 0 {
        return Err(FormatError::BadSlide(format!(
            "{requested} is not a multiple of {HONEYCOMB_PERIOD} or {SQUARE_PERIOD}"
        )));
    }
    Ok(requested)
}

/// The first `count` positions hold nothing at all
fn left_is_empty(helix: &Helix, count: usize) -> bool {
    count <= helix.len()
        && (0..count).all(|pos| {
            !helix.is_filled(pos) && helix.loopout[pos] == 0 && helix.skip[pos] == 0
        })
}

fn shift_base(base: BasePos, delta: i64) -> Option<BasePos> {
    let pos = i64::try_from(base.pos).ok()? + delta;
    Some(BasePos::new(base.helix, usize::try_from(pos).ok()?))
}

fn shift_link(link: Link, delta: i64) -> Option<Link> {
    let side = |side: Option<BasePos>| match side {
        None => Some(None),
        Some(base) => shift_base(base, delta).map(Some),
    };
    Some(Link {
        prev: side(link.prev)?,
        next: side(link.next)?,
    })
}

fn slide_helix(helix: &Helix, amount: i64) -> Option<Helix> {
    let mut moved = helix.clone();
    let shift_all = |links: &[Link]| -> Option<Vec<Link>> {
        links.iter().map(|&l| shift_link(l, amount)).collect()
    };

    if amount >= 0 {
        let pad = usize::try_from(amount).ok()?;
        let pad_links = std::iter::repeat(Link::EMPTY).take(pad);
        moved.scaffold = pad_links.clone().chain(shift_all(&helix.scaffold)?).collect();
        moved.staple = pad_links.chain(shift_all(&helix.staple)?).collect();
        moved.loopout = std::iter::repeat(0).take(pad).chain(helix.loopout.iter().copied()).collect();
        moved.skip = std::iter::repeat(0).take(pad).chain(helix.skip.iter().copied()).collect();
    } else {
        let cut = usize::try_from(-amount).ok()?;
        moved.scaffold = shift_all(&helix.scaffold[cut..])?;
        moved.staple = shift_all(&helix.staple[cut..])?;
        moved.loopout = helix.loopout[cut..].to_vec();
        moved.skip = helix.skip[cut..].to_vec();
    }

    for marker in &mut moved.staple_colors {
        marker.pos = usize::try_from(i64::try_from(marker.pos).ok()? + amount).ok()?;
    }
    Some(moved)
}

/// Shift every helix by `requested` positions (see [`resolve_slide`]); returns the
/// amount applied.
///
/// A positive amount prepends empty positions. A negative amount removes the
/// first positions, which must be empty on every helix. The graph is only
/// changed when the whole slide succeeds.
///
/// # Errors
///
/// Returns `FormatError::BadSlide` for an invalid amount, or when a left slide
/// would drop filled positions.
pub fn slide(graph: &mut DesignGraph, requested: i64) -> Result<i64, FormatError> {
    let amount = resolve_slide(graph, requested)?;

    if amount < 0 {
        let count = usize::try_from(-amount).unwrap_or(usize::MAX);
        if let Some(helix) = graph.helices.iter().find(|h| !left_is_empty(h, count)) {
            return Err(FormatError::BadSlide(format!(
                "the first {count} positions of helix {} are not empty",
                helix.id
            )));
        }
    }

    let moved = graph
        .helices
        .iter()
        .map(|h| {
            slide_helix(h, amount).ok_or_else(|| {
                FormatError::BadSlide(format!("helix {} links outside the slid range", h.id))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    graph.helices = moved;
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Color, HelixId};
    use crate::strands::trace::fixtures::{lay_staple, paired_helices, run};

    fn design() -> DesignGraph {
        let mut graph = paired_helices(2, 42);
        for helix in &mut graph.helices {
            helix.scaffold = vec![Link::EMPTY; 42];
        }
        let mut bases = run(0, 25, 35);
        bases.extend(run(1, 34, 25));
        lay_staple(&mut graph, &bases, Color::WEAK);
        graph
    }

    #[test]
    fn test_resolve_slide() {
        let graph = design();
        assert_eq!(resolve_slide(&graph, 0).unwrap(), 21);
        assert_eq!(resolve_slide(&graph, 64).unwrap(), 64);
        assert_eq!(resolve_slide(&graph, -42).unwrap(), -42);
        assert!(matches!(resolve_slide(&graph, 10), Err(FormatError::BadSlide(_))));
    }

    #[test]
    fn test_slide_right() {
        let mut graph = design();
        assert_eq!(slide(&mut graph, 0).unwrap(), 21);

        let helix = graph.helix(HelixId(0)).unwrap();
        assert_eq!(helix.len(), 63);
        assert_eq!(helix.loopout.len(), 63);
        assert_eq!(helix.color_at(46), Some(Color::WEAK));
        assert_eq!(
            graph.staple(BasePos::new(HelixId(0), 55)).unwrap().next,
            Some(BasePos::new(HelixId(1), 55))
        );
        assert!(graph.staple(BasePos::new(HelixId(0), 25)).unwrap().is_empty());
    }

    #[test]
    fn test_slide_left_needs_empty_space() {
        let mut graph = design();
        assert_eq!(slide(&mut graph, -21).unwrap(), -21);
        assert_eq!(graph.helices[0].len(), 21);
        assert_eq!(graph.helices[0].color_at(4), Some(Color::WEAK));
        assert_eq!(
            graph.staple(BasePos::new(HelixId(1), 13)).unwrap().next,
            Some(BasePos::new(HelixId(1), 12))
        );

        let before = graph.clone();
        let err = slide(&mut graph, -21).unwrap_err();
        assert!(matches!(err, FormatError::BadSlide(_)));
        assert_eq!(graph, before);
    }
}
