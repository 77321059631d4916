use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use crate::core::design::DesignGraph;
use crate::core::helix::Helix;
use crate::core::types::{Color, ColorMarker, HelixId, Link};

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid design JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No helices found in the design")]
    NoHelices,

    #[error("Helix {0} appears more than once")]
    DuplicateHelix(i64),

    #[error("Helix {helix}: {field} has {found} positions, expected {expected}")]
    LengthMismatch {
        helix: i64,
        field: &'static str,
        found: usize,
        expected: usize,
    },

    #[error("Helix {helix}: invalid staple color entry [{pos}, {color}]")]
    BadColor { helix: i64, pos: i64, color: i64 },

    #[error("The design does not have an even number of helices ({0})")]
    UnevenHelixCount(usize),

    #[error("Helix {0} has no horizontally symmetric partner")]
    NotSymmetric(i64),

    #[error("Helix length {0} is a multiple of both 21 and 32, the lattice is ambiguous")]
    AmbiguousLattice(usize),

    #[error("Invalid slide: {0}")]
    BadSlide(String),

    #[error("A link references helix {0}, which is not in the design")]
    UnknownHelix(i64),

    #[error("A link references position {pos} of helix {helix}, past the end of the helix")]
    LinkOutOfRange { helix: i64, pos: usize },
}

/// Top-level cadnano2 document
#[derive(Debug, Serialize, Deserialize)]
struct RawDesign {
    #[serde(default)]
    name: String,
    vstrands: Vec<RawVStrand>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// One `vstrands` entry as stored on disk
#[derive(Debug, Serialize, Deserialize)]
struct RawVStrand {
    num: i64,
    row: i64,
    col: i64,
    scaf: Vec<[i64; 4]>,
    stap: Vec<[i64; 4]>,
    #[serde(rename = "loop", default)]
    loopout: Vec<i64>,
    #[serde(default)]
    skip: Vec<i64>,
    #[serde(default)]
    stap_colors: Vec<[i64; 2]>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Parse a cadnano2 JSON file
///
/// # Errors
///
/// Returns `FormatError::Io` if the file cannot be read, `FormatError::Json` if it
/// is not a cadnano document, or a structural error from [`parse_design_text`].
pub fn parse_design_file(path: &Path) -> Result<DesignGraph, FormatError> {
    let content = std::fs::read_to_string(path)?;
    parse_design_text(&content)
}

/// Parse cadnano2 JSON text into a [`DesignGraph`]
///
/// # Errors
///
/// Returns `FormatError::NoHelices` for an empty `vstrands` list,
/// `FormatError::DuplicateHelix` when two helices share a `num`,
/// `FormatError::LengthMismatch` when per-base arrays disagree in length, or
/// `FormatError::BadColor` for a color marker outside the helix or the 24-bit range.
pub fn parse_design_text(text: &str) -> Result<DesignGraph, FormatError> {
    let raw: RawDesign = serde_json::from_str(text)?;

    if raw.vstrands.is_empty() {
        return Err(FormatError::NoHelices);
    }

    let expected = raw.vstrands[0].scaf.len();
    let mut seen = HashSet::new();
    let mut helices = Vec::with_capacity(raw.vstrands.len());

    for vstrand in raw.vstrands {
        if !seen.insert(vstrand.num) {
            return Err(FormatError::DuplicateHelix(vstrand.num));
        }
        helices.push(helix_from_raw(vstrand, expected)?);
    }

    let mut graph = DesignGraph::new(raw.name, helices);
    graph.extra = raw.extra;
    Ok(graph)
}

fn helix_from_raw(raw: RawVStrand, expected: usize) -> Result<Helix, FormatError> {
    let check = |field: &'static str, found: usize| {
        if found == expected {
            Ok(())
        } else {
            Err(FormatError::LengthMismatch {
                helix: raw.num,
                field,
                found,
                expected,
            })
        }
    };
    check("scaf", raw.scaf.len())?;
    check("stap", raw.stap.len())?;

    // Older files omit loop/skip entirely
    let loopout = if raw.loopout.is_empty() {
        vec![0; expected]
    } else {
        check("loop", raw.loopout.len())?;
        raw.loopout.clone()
    };
    let skip = if raw.skip.is_empty() {
        vec![0; expected]
    } else {
        check("skip", raw.skip.len())?;
        raw.skip.clone()
    };

    let mut staple_colors = Vec::with_capacity(raw.stap_colors.len());
    for &[pos, color] in &raw.stap_colors {
        let bad = || FormatError::BadColor {
            helix: raw.num,
            pos,
            color,
        };
        let pos = usize::try_from(pos).map_err(|_| bad())?;
        let color = u32::try_from(color).map_err(|_| bad())?;
        if pos >= expected || color > 0xFF_FF_FF {
            return Err(bad());
        }
        staple_colors.push(ColorMarker {
            pos,
            color: Color(color),
        });
    }
    staple_colors.sort_by_key(|m| m.pos);

    Ok(Helix {
        id: HelixId(raw.num),
        row: raw.row,
        col: raw.col,
        scaffold: raw.scaf.into_iter().map(Link::from_tuple).collect(),
        staple: raw.stap.into_iter().map(Link::from_tuple).collect(),
        loopout,
        skip,
        staple_colors,
        extra: raw.extra,
    })
}

fn helix_to_raw(helix: &Helix) -> RawVStrand {
    RawVStrand {
        num: helix.id.0,
        row: helix.row,
        col: helix.col,
        scaf: helix.scaffold.iter().map(|l| l.to_tuple()).collect(),
        stap: helix.staple.iter().map(|l| l.to_tuple()).collect(),
        loopout: helix.loopout.clone(),
        skip: helix.skip.clone(),
        stap_colors: helix
            .staple_colors
            .iter()
            .map(|m| [m.pos as i64, i64::from(m.color.0)])
            .collect(),
        extra: helix.extra.clone(),
    }
}

/// Serialize a design back to cadnano2 JSON
///
/// # Errors
///
/// Returns `FormatError::Json` if serialization fails.
pub fn design_to_json(graph: &DesignGraph) -> Result<String, FormatError> {
    let raw = RawDesign {
        name: graph.name.clone(),
        vstrands: graph.helices.iter().map(helix_to_raw).collect(),
        extra: graph.extra.clone(),
    };
    Ok(serde_json::to_string(&raw)?)
}

/// Write a design to a cadnano2 JSON file
///
/// # Errors
///
/// Returns `FormatError::Io` if the file cannot be written.
pub fn write_design_file(path: &Path, graph: &DesignGraph) -> Result<(), FormatError> {
    std::fs::write(path, design_to_json(graph)?)?;
    Ok(())
}
