use crate::core::settings::BreakSettings;
use crate::strands::trace::Symbol;

/// Safely convert usize to f64 for length ratios
#[inline]
fn len_to_f64(len: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        len as f64
    }
}

/// Longest run of consecutive seed bases belonging to one domain
#[must_use]
pub fn longest_seed_run(symbols: &[Symbol]) -> usize {
    let mut best = 0;
    let mut run = 0;
    let mut previous: Option<Symbol> = None;

    for &symbol in symbols {
        if symbol.is_seed() {
            run = match previous {
                Some(p) if p.is_seed() && p.same_domain(symbol) => run + 1,
                _ => 1,
            };
            best = best.max(run);
        } else {
            run = 0;
        }
        previous = Some(symbol);
    }
    best
}

/// 1 for an optimal seed, the penalty rate for an acceptable one, 0 otherwise
#[must_use]
pub fn seed_factor(symbols: &[Symbol], settings: &BreakSettings) -> f64 {
    let seed = longest_seed_run(symbols);
    if seed >= settings.optimal_seed_len {
        1.0
    } else if seed >= settings.acceptable_seed_len {
        settings.penalty_rate
    } else {
        0.0
    }
}

/// Rewards short fragments: 2 at `min_length`, 1 at `max_length`
#[must_use]
pub fn length_factor(len: usize, settings: &BreakSettings) -> f64 {
    if settings.max_length <= settings.min_length {
        return 1.0;
    }
    let span = len_to_f64(settings.max_length - settings.min_length);
    let excess = len_to_f64(len) - len_to_f64(settings.min_length);
    (2.0 - excess / span).max(0.0)
}

/// Score of one fragment; 0 means the fragment cannot stand on its own
#[must_use]
pub fn fragment_score(symbols: &[Symbol], settings: &BreakSettings) -> f64 {
    let seed = seed_factor(symbols, settings);
    if seed <= 0.0 {
        return 0.0;
    }
    seed * length_factor(symbols.len(), settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strands::trace::DomainString;

    fn symbols(text: &str) -> Vec<Symbol> {
        DomainString::parse(text).unwrap().0
    }

    fn settings() -> BreakSettings {
        BreakSettings {
            min_length: 18,
            max_length: 40,
            ..Default::default()
        }
    }

    #[test]
    fn test_longest_seed_run() {
        assert_eq!(longest_seed_run(&symbols("aaBBBBcDD")), 4);
        assert_eq!(longest_seed_run(&symbols("abc")), 0);
        // Adjacent seeds of different domains do not join
        assert_eq!(longest_seed_run(&symbols("AAABBB")), 3);
    }

    #[test]
    fn test_seed_factor() {
        let s = settings();
        assert!((seed_factor(&symbols(&"A".repeat(14)), &s) - 1.0).abs() < 1e-9);
        assert!((seed_factor(&symbols(&"A".repeat(12)), &s) - 0.3).abs() < 1e-9);
        assert!(seed_factor(&symbols(&"A".repeat(11)), &s).abs() < 1e-9);
    }

    #[test]
    fn test_length_factor() {
        let s = settings();
        assert!((length_factor(18, &s) - 2.0).abs() < 1e-9);
        assert!((length_factor(40, &s) - 1.0).abs() < 1e-9);
        assert!((length_factor(29, &s) - 1.5).abs() < 1e-9);

        let flat = BreakSettings {
            min_length: 20,
            max_length: 20,
            ..Default::default()
        };
        assert!((length_factor(20, &flat) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_fragment_score_prefers_short_fragments() {
        let s = settings();
        let short = symbols(&format!("{}bbbb", "A".repeat(14)));
        let long = symbols(&format!("{}{}", "A".repeat(14), "b".repeat(20)));
        assert!(fragment_score(&short, &s) > fragment_score(&long, &s));
        assert!(fragment_score(&symbols(&"a".repeat(30)), &s).abs() < 1e-9);
    }
}
