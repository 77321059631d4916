//! Staple domain tracing.
//!
//! A staple is walked from its first base along the staple `next` links. Every
//! visited base contributes one [`Symbol`]: either a base paired with the
//! scaffold (tagged with the domain it belongs to) or an unpaired, single-stranded
//! base. A domain is a run of paired bases on one helix between two crossovers.

use thiserror::Error;

use crate::core::design::DesignGraph;
use crate::core::settings::BreakSettings;
use crate::core::types::{BasePos, HelixId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TraceError {
    #[error("Link points to missing base {0}")]
    DanglingLink(BasePos),

    #[error("Strand starting at {start} did not terminate within {steps} steps")]
    StepLimit { start: BasePos, steps: usize },

    #[error("No staple at strand start {0}")]
    EmptyStart(BasePos),

    #[error("Invalid domain symbol '{0}'")]
    InvalidSymbol(char),
}

/// One base of a traced strand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    /// Base paired with the scaffold; `seed` marks domains long enough to nucleate
    Paired { domain: u32, seed: bool },
    /// Single-stranded base
    Unpaired,
}

impl Symbol {
    pub fn is_paired(self) -> bool {
        matches!(self, Symbol::Paired { .. })
    }

    pub fn is_seed(self) -> bool {
        matches!(self, Symbol::Paired { seed: true, .. })
    }

    pub fn domain(self) -> Option<u32> {
        match self {
            Symbol::Paired { domain, .. } => Some(domain),
            Symbol::Unpaired => None,
        }
    }

    /// Both symbols are paired bases of the same domain
    pub fn same_domain(self, other: Symbol) -> bool {
        matches!((self.domain(), other.domain()), (Some(a), Some(b)) if a == b)
    }

    pub fn to_char(self) -> char {
        match self {
            Symbol::Paired { domain, seed } => {
                let letter = char::from(b'a' + (domain % 26) as u8);
                if seed {
                    letter.to_ascii_uppercase()
                } else {
                    letter
                }
            }
            Symbol::Unpaired => '^',
        }
    }
}

/// The symbolic domain composition of one strand
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DomainString(pub Vec<Symbol>);

impl DomainString {
    /// Parse the display form back into symbols.
    ///
    /// A change of letter (ignoring case) starts a new domain, uppercase letters
    /// are seeds and `^` is a single-stranded base. Single-stranded bases do not
    /// end a domain, so `aa^^aa` is one domain.
    ///
    /// # Errors
    ///
    /// Returns `TraceError::InvalidSymbol` for any other character.
    pub fn parse(text: &str) -> Result<Self, TraceError> {
        let mut symbols = Vec::with_capacity(text.len());
        let mut domain = 0u32;
        let mut last: Option<char> = None;

        for c in text.chars() {
            if c == '^' {
                symbols.push(Symbol::Unpaired);
                continue;
            }
            if !c.is_ascii_alphabetic() {
                return Err(TraceError::InvalidSymbol(c));
            }
            let lower = c.to_ascii_lowercase();
            if last.is_some_and(|prev| prev != lower) {
                domain += 1;
            }
            last = Some(lower);
            symbols.push(Symbol::Paired {
                domain,
                seed: c.is_ascii_uppercase(),
            });
        }
        Ok(Self(symbols))
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Length without leading and trailing single-stranded bases
    pub fn core_len(&self) -> usize {
        core_len(&self.0)
    }
}

impl std::fmt::Display for DomainString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for symbol in &self.0 {
            write!(f, "{}", symbol.to_char())?;
        }
        Ok(())
    }
}

/// Length of `symbols` without single-stranded overhangs on either end
pub fn core_len(symbols: &[Symbol]) -> usize {
    let Some(first) = symbols.iter().position(|s| s.is_paired()) else {
        return 0;
    };
    let last = symbols.iter().rposition(|s| s.is_paired()).unwrap_or(first);
    last - first + 1
}

/// Result of walking one staple strand
#[derive(Debug, Clone, PartialEq)]
pub struct StrandTrace {
    /// First base (where the color marker sits)
    pub start: BasePos,

    /// Last base (staple `next` is empty)
    pub end: BasePos,

    pub domains: DomainString,

    /// Longest continuous hybridized run
    pub max_run: usize,

    pub total_len: usize,

    /// `total_len` without single-stranded overhangs
    pub core_len: usize,

    /// Helix of every domain shorter than the acceptable seed (but longer than one base)
    pub short_domains: Vec<HelixId>,
}

impl StrandTrace {
    /// Domain string as written to reports; pinned strands get `extension` filler bases
    pub fn report_string(&self, pinned: bool, extension: usize) -> String {
        let mut text = self.domains.to_string();
        if pinned {
            text.push_str(&"^".repeat(extension));
        }
        text
    }
}

/// Accumulates the current run while walking
struct RunState {
    domain: u32,
    run: usize,
    max_run: usize,
    seed_threshold: usize,
    acceptable: usize,
    short_domains: Vec<HelixId>,
}

impl RunState {
    fn close(&mut self, symbols: &mut [Symbol], helix: HelixId) {
        if self.run == 0 {
            return;
        }
        if self.run >= self.seed_threshold {
            let from = symbols.len() - self.run;
            for symbol in &mut symbols[from..] {
                if let Symbol::Paired { seed, .. } = symbol {
                    *seed = true;
                }
            }
        }
        if self.run > 1 && self.run < self.acceptable {
            self.short_domains.push(helix);
        }
        self.max_run = self.max_run.max(self.run);
        self.domain += 1;
        self.run = 0;
    }

    /// A single-stranded base ends the continuous run but not the domain
    fn interrupt(&mut self) {
        self.max_run = self.max_run.max(self.run);
        self.run = 0;
    }
}

/// Walk the staple strand that starts at `start`
///
/// # Errors
///
/// Returns `TraceError::EmptyStart` if no staple passes through `start`,
/// `TraceError::DanglingLink` if a link references a helix or position that does
/// not exist, or `TraceError::StepLimit` if the walk visits more bases than the
/// design holds (a cyclic or corrupt strand).
pub fn trace_strand(
    graph: &DesignGraph,
    start: BasePos,
    settings: &BreakSettings,
) -> Result<StrandTrace, TraceError> {
    let first = graph
        .staple(start)
        .ok_or(TraceError::DanglingLink(start))?;
    if first.is_empty() {
        return Err(TraceError::EmptyStart(start));
    }

    let limit = graph.base_count();
    let mut symbols: Vec<Symbol> = Vec::new();
    let mut state = RunState {
        domain: 0,
        run: 0,
        max_run: 0,
        seed_threshold: settings.acceptable_seed_len.saturating_sub(1),
        acceptable: settings.acceptable_seed_len,
        short_domains: Vec::new(),
    };
    let mut current = start;

    loop {
        if symbols.len() >= limit {
            return Err(TraceError::StepLimit {
                start,
                steps: symbols.len(),
            });
        }
        let staple = graph
            .staple(current)
            .ok_or(TraceError::DanglingLink(current))?;
        let scaffold = graph
            .scaffold(current)
            .ok_or(TraceError::DanglingLink(current))?;

        let on_helix = |b: Option<BasePos>| b.is_some_and(|b| b.helix == current.helix);

        if scaffold.is_empty() {
            state.interrupt();
            symbols.push(Symbol::Unpaired);
        } else if on_helix(staple.next) && on_helix(scaffold.prev) {
            state.run += 1;
            symbols.push(Symbol::Paired {
                domain: state.domain,
                seed: false,
            });
        } else {
            // Crossover or terminus: this base is the last of its domain
            state.run += 1;
            symbols.push(Symbol::Paired {
                domain: state.domain,
                seed: false,
            });
            state.close(&mut symbols, current.helix);
        }

        match staple.next {
            Some(next) => current = next,
            None => break,
        }
    }
    state.close(&mut symbols, current.helix);

    let core = core_len(&symbols);
    Ok(StrandTrace {
        start,
        end: current,
        total_len: symbols.len(),
        core_len: core,
        max_run: state.max_run,
        short_domains: state.short_domains,
        domains: DomainString(symbols),
    })
}

/// Follow staple `next` links from `start` and return the last base together
/// with the number of bases visited
///
/// # Errors
///
/// Same failure modes as [`trace_strand`].
pub fn walk_to_end(graph: &DesignGraph, start: BasePos) -> Result<(BasePos, usize), TraceError> {
    let limit = graph.base_count();
    let mut current = start;
    let mut steps = 0usize;

    loop {
        let staple = graph
            .staple(current)
            .ok_or(TraceError::DanglingLink(current))?;
        if steps == 0 && staple.is_empty() {
            return Err(TraceError::EmptyStart(start));
        }
        steps += 1;
        if steps > limit {
            return Err(TraceError::StepLimit { start, steps });
        }
        match staple.next {
            Some(next) => current = next,
            None => return Ok((current, steps)),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Small hand-built designs shared by the tests of several modules.

    use crate::core::design::DesignGraph;
    use crate::core::helix::Helix;
    use crate::core::types::{BasePos, Color, HelixId, Link};

    /// Helices `0..count` on one honeycomb row, each `len` bases, scaffold paired
    /// along the whole helix
    pub fn paired_helices(count: usize, len: usize) -> DesignGraph {
        let helices = (0..count)
            .map(|i| {
                let id = HelixId(i as i64);
                let mut helix = Helix::new(id, 0, i as i64, len);
                for pos in 0..len {
                    helix.scaffold[pos] = Link {
                        prev: (pos > 0).then(|| BasePos::new(id, pos - 1)),
                        next: (pos + 1 < len).then(|| BasePos::new(id, pos + 1)),
                    };
                }
                helix
            })
            .collect();
        DesignGraph::new("fixture", helices)
    }

    /// Lay a staple through `bases` in order and put a marker of `color` on its first base
    pub fn lay_staple(graph: &mut DesignGraph, bases: &[BasePos], color: Color) {
        for (i, &base) in bases.iter().enumerate() {
            let link = graph.staple_mut(base).unwrap();
            link.prev = (i > 0).then(|| bases[i - 1]);
            link.next = bases.get(i + 1).copied();
        }
        let first = bases[0];
        graph
            .helix_mut(first.helix)
            .unwrap()
            .set_marker(first.pos, color);
    }

    /// Bases `from..to` (exclusive) on one helix, in increasing or decreasing order
    pub fn run(helix: i64, from: usize, to: usize) -> Vec<BasePos> {
        if from <= to {
            (from..to).map(|p| BasePos::new(HelixId(helix), p)).collect()
        } else {
            (to + 1..=from)
                .rev()
                .map(|p| BasePos::new(HelixId(helix), p))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{lay_staple, paired_helices, run};
    use super::*;
    use crate::core::types::{Color, Link};

    fn settings() -> BreakSettings {
        BreakSettings::default()
    }

    #[test]
    fn test_single_domain_strand() {
        let mut graph = paired_helices(1, 42);
        let bases = run(0, 5, 25);
        lay_staple(&mut graph, &bases, Color::WEAK);

        let trace = trace_strand(&graph, bases[0], &settings()).unwrap();
        assert_eq!(trace.total_len, 20);
        assert_eq!(trace.max_run, 20);
        assert_eq!(trace.core_len, 20);
        assert_eq!(trace.end, BasePos::new(HelixId(0), 24));
        assert_eq!(trace.domains.to_string(), "A".repeat(20));
    }

    #[test]
    fn test_short_single_domain_is_not_seed() {
        let mut graph = paired_helices(1, 42);
        let bases = run(0, 1, 9);
        lay_staple(&mut graph, &bases, Color::WEAK);

        let trace = trace_strand(&graph, bases[0], &settings()).unwrap();
        assert_eq!(trace.domains.to_string(), "aaaaaaaa");
        assert_eq!(trace.max_run, 8);
        assert_eq!(trace.short_domains, vec![HelixId(0)]);
    }

    #[test]
    fn test_crossover_splits_domains() {
        let mut graph = paired_helices(2, 42);
        // 14 bases on helix 0 going up, then 6 bases on helix 1 going down
        let mut bases = run(0, 10, 24);
        bases.extend(run(1, 23, 17));
        lay_staple(&mut graph, &bases, Color::WEAK);

        let trace = trace_strand(&graph, bases[0], &settings()).unwrap();
        assert_eq!(trace.domains.to_string(), format!("{}bbbbbb", "A".repeat(14)));
        assert_eq!(trace.max_run, 14);
        assert_eq!(trace.total_len, 20);
        assert_eq!(trace.short_domains, vec![HelixId(1)]);
    }

    #[test]
    fn test_single_stranded_overhang() {
        let mut graph = paired_helices(1, 42);
        let bases = run(0, 1, 21);
        lay_staple(&mut graph, &bases, Color::WEAK);
        // Unpair the last three bases
        let helix = graph.helix_mut(HelixId(0)).unwrap();
        for pos in 18..21 {
            helix.scaffold[pos] = Link::EMPTY;
        }
        helix.scaffold[17].next = None;

        let trace = trace_strand(&graph, bases[0], &settings()).unwrap();
        // The run never reaches a crossover, so it is not marked as a seed
        assert_eq!(trace.domains.to_string(), format!("{}^^^", "a".repeat(17)));
        assert_eq!(trace.max_run, 17);
        assert_eq!(trace.total_len, 20);
        assert_eq!(trace.core_len, 17);
        assert!(trace.core_len <= trace.total_len);
        assert_eq!(trace.total_len, trace.domains.to_string().len());
    }

    #[test]
    fn test_single_stranded_gap_keeps_domain() {
        let mut graph = paired_helices(1, 42);
        let bases = run(0, 1, 13);
        lay_staple(&mut graph, &bases, Color::WEAK);
        let helix = graph.helix_mut(HelixId(0)).unwrap();
        helix.scaffold[6] = Link::EMPTY;
        helix.scaffold[7] = Link::EMPTY;

        let trace = trace_strand(&graph, bases[0], &settings()).unwrap();
        assert_eq!(trace.domains.to_string(), "aaaaa^^aaaaa");
        assert_eq!(trace.max_run, 5);
        assert_eq!(trace.core_len, 12);
        assert_eq!(trace.short_domains, vec![HelixId(0)]);
        assert_eq!(DomainString::parse("aaaaa^^aaaaa").unwrap(), trace.domains);
    }

    #[test]
    fn test_seed_after_gap_covers_only_continuous_bases() {
        let mut graph = paired_helices(1, 42);
        let bases = run(0, 1, 19);
        lay_staple(&mut graph, &bases, Color::WEAK);
        let helix = graph.helix_mut(HelixId(0)).unwrap();
        helix.scaffold[3] = Link::EMPTY;

        let trace = trace_strand(&graph, bases[0], &settings()).unwrap();
        assert_eq!(trace.domains.to_string(), format!("aa^{}", "A".repeat(15)));
        assert_eq!(trace.max_run, 15);
    }

    #[test]
    fn test_cyclic_strand_hits_step_limit() {
        let mut graph = paired_helices(1, 21);
        let bases = run(0, 0, 5);
        lay_staple(&mut graph, &bases, Color::WEAK);
        // Close the loop
        graph.staple_mut(bases[4]).unwrap().next = Some(bases[0]);
        graph.staple_mut(bases[0]).unwrap().prev = Some(bases[4]);

        let err = trace_strand(&graph, bases[0], &settings()).unwrap_err();
        assert!(matches!(err, TraceError::StepLimit { .. }));
    }

    #[test]
    fn test_dangling_link() {
        let mut graph = paired_helices(1, 21);
        let bases = run(0, 0, 5);
        lay_staple(&mut graph, &bases, Color::WEAK);
        graph.staple_mut(bases[4]).unwrap().next = Some(BasePos::new(HelixId(99), 0));

        let err = trace_strand(&graph, bases[0], &settings()).unwrap_err();
        assert_eq!(err, TraceError::DanglingLink(BasePos::new(HelixId(99), 0)));
    }

    #[test]
    fn test_empty_start() {
        let graph = paired_helices(1, 21);
        let start = BasePos::new(HelixId(0), 3);
        assert_eq!(
            trace_strand(&graph, start, &settings()).unwrap_err(),
            TraceError::EmptyStart(start)
        );
    }

    #[test]
    fn test_parse_domain_string() {
        let parsed = DomainString::parse("^aaBBBa^c").unwrap();
        let domains: Vec<Option<u32>> = parsed.symbols().iter().map(|s| s.domain()).collect();
        assert_eq!(
            domains,
            vec![None, Some(0), Some(0), Some(1), Some(1), Some(1), Some(2), None, Some(3)]
        );
        assert!(parsed.symbols()[3].is_seed());
        assert_eq!(parsed.core_len(), 8);
        assert_eq!(parsed.to_string(), "^aaBBBc^d");

        let gapped = DomainString::parse("aa^^AA").unwrap();
        assert!(gapped.symbols().iter().filter_map(|s| s.domain()).all(|d| d == 0));
        assert_eq!(gapped.to_string(), "aa^^AA");
        assert_eq!(
            DomainString::parse("ab1").unwrap_err(),
            TraceError::InvalidSymbol('1')
        );
    }

    #[test]
    fn test_walk_to_end() {
        let mut graph = paired_helices(2, 42);
        let mut bases = run(0, 10, 24);
        bases.extend(run(1, 23, 17));
        lay_staple(&mut graph, &bases, Color::WEAK);

        let (end, steps) = walk_to_end(&graph, bases[0]).unwrap();
        assert_eq!(end, BasePos::new(HelixId(1), 18));
        assert_eq!(steps, 20);
        assert!(matches!(
            walk_to_end(&graph, BasePos::new(HelixId(0), 30)),
            Err(TraceError::EmptyStart(_))
        ));
    }

    #[test]
    fn test_report_string_extension() {
        let mut graph = paired_helices(1, 42);
        let bases = run(0, 1, 5);
        lay_staple(&mut graph, &bases, Color::PINNED);
        let trace = trace_strand(&graph, bases[0], &settings()).unwrap();
        assert_eq!(trace.report_string(true, 3), "aaaa^^^");
        assert_eq!(trace.report_string(false, 3), "aaaa");
    }
}
