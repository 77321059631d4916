//! # staple-autobreak
//!
//! A library for classifying and automatically breaking staple strands in
//! cadnano2 DNA-origami designs.
//!
//! Staples hybridize to the scaffold through domains: runs of paired bases on one
//! helix between two crossovers. A staple binds reliably when at least one domain
//! is long enough to nucleate hybridization (a *seed*), and staples that are too
//! long are hard to synthesize. `staple-autobreak` traces every staple, colors it
//! by quality and splits long staples where the resulting fragments score best.
//!
//! ## Features
//!
//! - **Domain tracing**: each staple becomes a domain string such as `aaBBBBBBBBBBBBBBcc^^`
//! - **Classification**: optimal, acceptable, weak, too short, too long or pinned
//! - **Autobreak**: beam search over cut positions that keep every fragment seeded
//! - **Reconnection**: merge staples that end right next to another staple
//! - **Reports**: per-strand domain CSV and per-helix-pair crossover CSV
//! - **Lattice utilities**: slide, mirror and recolor whole designs
//!
//! ## Example
//!
//! ```rust,no_run
//! use staple_autobreak::{classify_all, parse_design_file, BreakSettings};
//! use std::path::Path;
//!
//! let mut graph = parse_design_file(Path::new("design.json")).unwrap();
//! let pass = classify_all(&mut graph, &BreakSettings::default());
//!
//! for strand in &pass.strands {
//!     println!("{} {} {}", strand.trace.start, strand.category, strand.trace.domains);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: helices, links, the design graph and settings
//! - [`parsing`]: cadnano2 JSON reading and writing
//! - [`strands`]: tracing, classification and lattice topology
//! - [`autobreak`]: search, graph mutation and the full pipeline
//! - [`report`]: CSV report writers
//! - [`transform`]: slide, mirror and recolor
//! - [`cli`]: Command-line interface implementation

pub mod autobreak;
pub mod cli;
pub mod core;
pub mod parsing;
pub mod report;
pub mod strands;
pub mod transform;

// Re-export commonly used types for convenience
pub use autobreak::pipeline::{classify_all, run, Mode, PassResult, RunReport};
pub use autobreak::search::{search, BreakPlan};
pub use core::design::DesignGraph;
pub use core::settings::BreakSettings;
pub use core::types::*;
pub use parsing::cadnano::{parse_design_file, write_design_file};
pub use strands::classify::Category;
pub use strands::trace::{trace_strand, StrandTrace};
