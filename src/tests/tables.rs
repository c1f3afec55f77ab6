use super::{compare_cells, is_date, is_numeric, parse_date, Table};
use rstest::rstest;
use std::cmp::Ordering;

fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
    Table {
        headers: headers.iter().map(|h| (*h).to_string()).collect(),
        rows: rows
            .iter()
            .map(|row| row.iter().map(|c| (*c).to_string()).collect())
            .collect(),
    }
}

#[test]
fn test_date_column_sorts_chronologically() {
    let mut t = table(
        &["Release", "Date"],
        &[
            &["b", "2024-03-15"],
            &["a", "2023-01-10"],
            &["c", "2024-12-01"],
        ],
    );

    assert!(t.is_sortable_column(1), "Date column should be sortable");
    t.sort_by_column(1);

    let dates: Vec<&str> = t.rows.iter().map(|r| r[1].as_str()).collect();
    assert_eq!(dates, ["2023-01-10", "2024-03-15", "2024-12-01"]);
}

#[test]
fn test_numeric_column_sorts_by_value_not_text() {
    let mut t = table(&["Size"], &[&["100"], &["9"], &["25.5"], &["-3"]]);

    t.sort_by_column(0);

    let sizes: Vec<&str> = t.rows.iter().map(|r| r[0].as_str()).collect();
    assert_eq!(sizes, ["-3", "9", "25.5", "100"]);
}

#[test]
fn test_text_column_is_not_offered_for_sorting() {
    let t = table(
        &["Name", "Count"],
        &[&["alpha", "1"], &["beta", "2"], &["gamma", "x"]],
    );

    assert!(!t.is_sortable_column(0), "Text column should not sort");
    assert!(t.is_sortable_column(1), "Two of three numbers is a majority");
    assert_eq!(t.sortable_columns(), vec![1]);
}

#[test]
fn test_exact_half_is_not_a_majority() {
    let t = table(&["Mixed"], &[&["1"], &["x"]]);

    assert!(!t.is_sortable_column(0));
}

#[test]
fn test_single_row_table_is_never_sortable() {
    let t = table(&["Count"], &[&["7"]]);

    assert!(t.sortable_columns().is_empty());
}

#[test]
fn test_sort_is_stable_for_equal_keys() {
    let mut t = table(
        &["Name", "Rank"],
        &[&["first", "2"], &["second", "1"], &["third", "2"]],
    );

    t.sort_by_column(1);

    let names: Vec<&str> = t.rows.iter().map(|r| r[0].as_str()).collect();
    assert_eq!(names, ["second", "first", "third"]);
}

#[test]
fn test_short_rows_sort_as_empty_cells() {
    let mut t = table(&["A", "B"], &[&["x", "3"], &["y"], &["z", "1"]]);

    t.sort_by_column(1);

    let names: Vec<&str> = t.rows.iter().map(|r| r[0].as_str()).collect();
    assert_eq!(names, ["z", "x", "y"], "Missing cells sort as text after numbers");
}

#[test]
fn test_labels_skip_blank_headers() {
    let t = table(&["Name", "  ", "Value "], &[&["a", "b", "c", "d"]]);

    assert_eq!(t.label(0), Some("Name"));
    assert_eq!(t.label(1), None);
    assert_eq!(t.label(2), Some("Value"));
    assert_eq!(t.label(3), None, "Cells past the header carry no label");
    assert_eq!(t.column_count(), 4);
}

#[rstest]
#[case("2024-03-15")]
#[case("2024/03/15")]
#[case("03/15/2024")]
#[case("March 15, 2024")]
#[case("15 Mar 2024")]
#[case("2024-03-15T10:30:00Z")]
#[case("2024-03-15 10:30:00")]
#[case("Fri, 15 Mar 2024 10:30:00 +0000")]
fn test_recognised_date_spellings(#[case] text: &str) {
    assert!(is_date(text), "{text} should parse as a date");
}

#[rstest]
#[case("")]
#[case("soon")]
#[case("2024-13-45")]
fn test_rejected_date_spellings(#[case] text: &str) {
    assert!(parse_date(text).is_none(), "{text} should not parse as a date");
}

#[test]
fn test_numbers_must_be_finite() {
    assert!(is_numeric(" 42 "));
    assert!(is_numeric("1e3"));
    assert!(!is_numeric("inf"));
    assert!(!is_numeric("NaN"));
    assert!(!is_numeric("12px"));
}

#[test]
fn test_mixed_kinds_have_a_total_order() {
    assert_eq!(compare_cells("5", "2024-01-01"), Ordering::Less);
    assert_eq!(compare_cells("2024-01-01", "apple"), Ordering::Less);
    assert_eq!(compare_cells("apple", "5"), Ordering::Greater);
    assert_eq!(compare_cells("Apple", "banana"), Ordering::Less, "Text compares without case");
}
