//! Property-based tests for query resolution

use super::*;
use proptest::prelude::*;

/// Position of the first entry with any keyword inside `query`
fn first_entry_with_keyword_hit(query: &str) -> Option<usize> {
    let normalized = query.to_lowercase();
    KNOWLEDGE_BASE
        .iter()
        .position(|entry| entry.keywords.iter().any(|k| normalized.contains(k)))
}

fn arb_keyword() -> impl Strategy<Value = &'static str> {
    let all: Vec<&'static str> = KNOWLEDGE_BASE
        .iter()
        .flat_map(|entry| entry.keywords.iter().copied())
        .collect();
    proptest::sample::select(all)
}

/// Text that cannot contain any keyword: digits and punctuation only
fn arb_unmatched_query() -> impl Strategy<Value = String> {
    "[0-9 ?!.,]{0,40}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_resolve_is_deterministic(query in ".{0,80}") {
        prop_assert_eq!(resolve(&query), resolve(&query));
    }

    #[test]
    fn prop_embedded_keyword_resolves_to_earliest_entry(
        prefix in "[0-9 ]{0,10}",
        keyword in arb_keyword(),
        suffix in "[0-9 ]{0,10}",
        shout in any::<bool>(),
    ) {
        let keyword = if shout { keyword.to_uppercase() } else { keyword.to_string() };
        let query = format!("{prefix}{keyword}{suffix}");

        let expected = first_entry_with_keyword_hit(&query);
        prop_assert!(expected.is_some());
        let entry = &KNOWLEDGE_BASE[expected.unwrap_or_default()];

        let resolution = resolve(&query);
        prop_assert_eq!(resolution.content.as_str(), entry.response);
        prop_assert_eq!(resolution.sources, entry.sources);
    }

    #[test]
    fn prop_no_keyword_means_fallback(query in arb_unmatched_query()) {
        prop_assert_eq!(resolve(&query), Resolution::fallback());
    }

    #[test]
    fn prop_resolution_always_has_sources(query in ".{0,80}") {
        let resolution = resolve(&query);
        prop_assert!(!resolution.content.is_empty());
        prop_assert!(!resolution.sources.is_empty());
    }
}
