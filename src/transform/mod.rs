//! Whole-design edits that do not depend on strand analysis.
//!
//! - [`slide`]: shift every helix by whole lattice periods
//! - [`mirror`]: append the row-mirrored copy of the design to itself
//! - [`recolor`]: randomize or replace staple marker colors

pub mod mirror;
pub mod recolor;
pub mod slide;
