//! Automatic staple breaking.
//!
//! Long staples are split where the resulting fragments hybridize best:
//!
//! 1. [`mutate::reconnect_all`] joins strands that end right next to another strand
//! 2. [`pipeline::classify_all`] traces and colors every strand
//! 3. [`search::search`] finds the best cut positions along each strand's domains
//! 4. [`mutate::apply_plan`] performs the cuts, marking every new start green
//! 5. the design is classified again
//!
//! ## Scoring
//!
//! Every fragment scores `seed * length`, where `seed` is 1 for a fragment
//! holding an optimal seed, the penalty rate for an acceptable one and 0
//! otherwise, and `length` falls linearly from 2 at the minimum length to 1 at
//! the maximum. The search maximizes the sum over all fragments.
//!
//! ## Example
//!
//! ```rust,no_run
//! use staple_autobreak::autobreak::pipeline::{run, Mode};
//! use staple_autobreak::autobreak::policy::ExponentialDecay;
//! use staple_autobreak::core::settings::BreakSettings;
//! use staple_autobreak::parsing::cadnano::{parse_design_file, write_design_file};
//! use std::path::Path;
//!
//! let mut graph = parse_design_file(Path::new("design.json")).unwrap();
//! let report = run(&mut graph, &BreakSettings::default(), Mode::Full, &ExponentialDecay, false);
//! println!("{:.1}% optimal", report.result.summary.optimal_percent());
//! write_design_file(Path::new("design_autobreak.json"), &graph).unwrap();
//! ```

pub mod mutate;
pub mod pipeline;
pub mod policy;
pub mod scoring;
pub mod search;
