//! Per-strand analysis of staple routing.
//!
//! - [`trace`]: walk one staple and describe it as a string of domains
//! - [`classify`]: turn a trace into a [`Category`](classify::Category) and its display color
//! - [`topology`]: lattice detection, helix neighbors and crossover density
//!
//! ## Domain strings
//!
//! A trace is shown as one character per base:
//!
//! | Symbol | Meaning |
//! |--------|---------|
//! | `a`..`z` | paired base; each new domain takes the next letter, wrapping after `z` |
//! | `A`..`Z` | paired base of a seed domain (long enough to nucleate hybridization) |
//! | `^` | single-stranded base |

pub mod classify;
pub mod topology;
pub mod trace;
