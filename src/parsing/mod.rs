//! Reading and writing cadnano2 design files.
//!
//! A cadnano2 design is a JSON object with a `vstrands` list. Each entry is one
//! helix:
//!
//! | Field | Description | Interpreted |
//! |-------|-------------|-------------|
//! | `num` | Stable helix id referenced by links | Yes |
//! | `row`, `col` | Lattice cell | Yes |
//! | `scaf`, `stap` | Per-base `[prevHelix, prevPos, nextHelix, nextPos]`, `-1` = none | Yes |
//! | `loop`, `skip` | Per-base insertions and deletions | Carried |
//! | `stap_colors` | `[startPos, color]` per staple strand | Yes |
//! | anything else | e.g. `scafLoop`, `stapLoop` | Preserved verbatim |
//!
//! ## Example
//!
//! ```rust,no_run
//! use staple_autobreak::parsing::cadnano::{parse_design_file, write_design_file};
//! use std::path::Path;
//!
//! let graph = parse_design_file(Path::new("design.json")).unwrap();
//! write_design_file(Path::new("copy.json"), &graph).unwrap();
//! ```

pub mod cadnano;
