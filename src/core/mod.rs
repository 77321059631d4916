//! Core data types for cadnano2 routing graphs.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`DesignGraph`](design::DesignGraph): all helices of a design plus the id <-> index lookup
//! - [`Helix`](helix::Helix): one helix with its per-base scaffold/staple links and color markers
//! - [`HelixId`](types::HelixId), [`HelixIndex`](types::HelixIndex), [`BasePos`](types::BasePos), [`Link`](types::Link): addressing
//! - [`Color`](types::Color): 24-bit colors, including the reserved category colors
//! - [`BreakSettings`](settings::BreakSettings): thresholds for classification and autobreak
//!
//! ## Helix ids and indices
//!
//! Links inside a cadnano file reference helices by their `num`, which is assigned
//! by the design tool and need not match the helix's position in the file:
//!
//! | Field | Type | Meaning |
//! |-------|------|---------|
//! | `num` | [`HelixId`](types::HelixId) | stable id used by every link tuple |
//! | list position | [`HelixIndex`](types::HelixIndex) | storage slot in `DesignGraph::helices` |

pub mod design;
pub mod helix;
pub mod settings;
pub mod types;
