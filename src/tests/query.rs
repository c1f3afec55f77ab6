use super::{extract_snippet, search, Query, SearchLimits};
use crate::section::Section;

fn section(id: &str, body: &str) -> Section {
    Section {
        id: id.to_string(),
        title: id.to_uppercase(),
        body_text: body.to_string(),
    }
}

#[test]
fn test_short_queries_return_nothing() {
    let sections = vec![section("a", "a b c")];
    let limits = SearchLimits::default();

    assert!(search(&Query::new(""), &sections, &limits).is_empty());
    assert!(search(&Query::new("a"), &sections, &limits).is_empty());
    assert!(
        search(&Query::new("  b  "), &sections, &limits).is_empty(),
        "Length is measured after trimming"
    );
}

#[test]
fn test_match_is_case_insensitive() {
    let sections = vec![section("install", "Run CARGO INSTALL to begin")];

    let results = search(&Query::new("Cargo"), &sections, &SearchLimits::default());

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].section_id, "install");
    assert_eq!(results[0].title, "INSTALL");
}

#[test]
fn test_results_capped_at_five_in_document_order() {
    let sections: Vec<Section> = (0..7)
        .map(|i| section(&format!("s{i}"), "the search function"))
        .collect();

    let results = search(&Query::new("search"), &sections, &SearchLimits::default());

    let ids: Vec<&str> = results.iter().map(|r| r.section_id.as_str()).collect();
    assert_eq!(ids, ["s0", "s1", "s2", "s3", "s4"]);
}

#[test]
fn test_non_matching_sections_are_skipped() {
    let sections = vec![
        section("a", "nothing here"),
        section("b", "config file"),
        section("c", "more config"),
    ];

    let results = search(&Query::new("config"), &sections, &SearchLimits::default());

    let ids: Vec<&str> = results.iter().map(|r| r.section_id.as_str()).collect();
    assert_eq!(ids, ["b", "c"]);
}

#[test]
fn test_snippet_spans_radius_around_match() {
    let text = format!("{}needle{}", "a".repeat(80), "b".repeat(80));

    let snippet = extract_snippet(&text, "needle", 50);

    assert_eq!(snippet, format!("{}needle{}", "a".repeat(50), "b".repeat(50)));
}

#[test]
fn test_snippet_clamps_at_text_edges() {
    let snippet = extract_snippet("needle at the start", "needle", 50);

    assert_eq!(snippet, "needle at the start");
}

#[test]
fn test_snippet_is_trimmed_and_bounded() {
    let text = format!("   {}   ", "word ".repeat(60));

    let snippet = extract_snippet(&text, "WORD", 50);

    assert!(snippet.to_lowercase().contains("word"));
    assert!(snippet.chars().count() <= 50 * 2 + 4);
    assert_eq!(snippet, snippet.trim());
}

#[test]
fn test_snippet_keeps_original_case() {
    let snippet = extract_snippet("Use the Search Function", "search", 3);

    assert_eq!(snippet, "he Search Fu");
}

#[test]
fn test_snippet_handles_multibyte_text() {
    let snippet = extract_snippet("Größe der Ausgabe ändern", "ausgabe", 4);

    assert_eq!(snippet, "der Ausgabe änd");
}

#[test]
fn test_snippet_agrees_with_search_on_final_sigma() {
    let sections = vec![section("greek", "ΤΟ ΟΔΟΣ ΜΑΣ")];
    let found = search(&Query::new("οδος"), &sections, &SearchLimits::default());

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].snippet, "ΤΟ ΟΔΟΣ ΜΑΣ");
    assert_eq!(extract_snippet("ΤΟ ΟΔΟΣ ΜΑΣ", "οδος", 3), "ΤΟ ΟΔΟΣ ΜΑ");
}

#[test]
fn test_snippet_empty_when_no_match() {
    assert_eq!(extract_snippet("abc", "xyz", 50), "");
}

#[test]
fn test_limits_follow_config() {
    let mut cfg = crate::config::Config::defaults();
    cfg.max_results = 1;
    cfg.min_query_len = 4;
    let sections = vec![section("a", "abc abcd"), section("b", "abcd")];
    let limits = SearchLimits::from(&cfg);

    assert!(search(&Query::new("abc"), &sections, &limits).is_empty());
    assert_eq!(search(&Query::new("abcd"), &sections, &limits).len(), 1);
}
