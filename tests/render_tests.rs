use lacuna::model::{Deck, Diagnostic, Severity};
use lacuna::render::{render_deck_json, render_diagnostics_json, render_diagnostics_text};
use lacuna::parser::Driver;

fn fields(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

#[test]
fn empty_deck_has_all_four_collections() {
    let deck = Deck::default();
    let json = render_deck_json(&deck).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 4);
    assert!(object["categories"].as_array().unwrap().is_empty());
    assert!(object["groups"].as_array().unwrap().is_empty());
    assert!(object["pair_groups"].as_array().unwrap().is_empty());
    assert!(object["chapters"].as_array().unwrap().is_empty());
}

#[test]
fn deck_json_round_trips_a_category() {
    let mut driver = Driver::new();
    driver.begin_file();
    for line in [
        &["# Selectables"][..],
        &["## Color"],
        &[">name", "hex"],
        &["red", "#f00"],
    ] {
        driver.feed_line(fields(line));
    }
    driver.end_of_file();

    let json = render_deck_json(driver.deck()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let category = &value["categories"][0];
    assert_eq!(category["name"], "Color");
    assert_eq!(category["variant_names"][0], "name");
    assert_eq!(category["num_variants"], 2);
    assert_eq!(category["selectables"][0]["variants"][1], "#f00");
}

#[test]
fn diagnostics_text_matches_issue_format() {
    let diagnostics = vec![
        Diagnostic {
            line: 3,
            severity: Severity::Issue,
            message: "No selectable 'blue' under column 'name' found in selectable subgroup 'Color'".to_string(),
        },
        Diagnostic {
            line: 5,
            severity: Severity::Info,
            message: "Extended group 'warm'".to_string(),
        },
    ];

    let text = render_diagnostics_text(&diagnostics, false);
    assert_eq!(
        text,
        "ISSUES:\n(3, \"No selectable 'blue' under column 'name' found in selectable subgroup 'Color'\")\n"
    );
}

#[test]
fn diagnostics_text_is_empty_for_infos_only() {
    // No issue-severity diagnostic is present, so the `ISSUES:` header
    // itself must not appear — an all-info diagnostic list is a clean file.
    let diagnostics = vec![Diagnostic {
        line: 5,
        severity: Severity::Info,
        message: "Extended group 'warm'".to_string(),
    }];

    let text = render_diagnostics_text(&diagnostics, true);
    assert_eq!(text, "");

    let text_without = render_diagnostics_text(&diagnostics, false);
    assert_eq!(text_without, "");
}

#[test]
fn diagnostics_text_includes_infos_when_requested() {
    let diagnostics = vec![
        Diagnostic {
            line: 2,
            severity: Severity::Issue,
            message: "Bad header 'Nonsense'".to_string(),
        },
        Diagnostic {
            line: 5,
            severity: Severity::Info,
            message: "Extended group 'warm'".to_string(),
        },
    ];

    let text = render_diagnostics_text(&diagnostics, true);
    assert_eq!(
        text,
        "ISSUES:\n(2, \"Bad header 'Nonsense'\")\n(5, \"Extended group 'warm'\")\n"
    );

    let text_without = render_diagnostics_text(&diagnostics, false);
    assert_eq!(text_without, "ISSUES:\n(2, \"Bad header 'Nonsense'\")\n");
}

#[test]
fn diagnostics_text_empty_for_no_diagnostics() {
    assert_eq!(render_diagnostics_text(&[], false), "");
}

#[test]
fn diagnostics_json_serializes_severity_lowercase() {
    let diagnostics = vec![Diagnostic {
        line: 1,
        severity: Severity::Issue,
        message: "Bad header 'Nonsense'".to_string(),
    }];
    let json = render_diagnostics_json(&diagnostics).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value[0]["severity"], "issue");
    assert_eq!(value[0]["line"], 1);
}
