use lacuna::model::Severity;
use lacuna::parser::Driver;

fn fields(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

fn feed(driver: &mut Driver, lines: &[&[&str]]) {
    driver.begin_file();
    for line in lines {
        driver.feed_line(fields(line));
    }
    driver.end_of_file();
}

#[test]
fn minimal_round_trip() {
    let mut driver = Driver::new();
    feed(
        &mut driver,
        &[
            &["# Selectables"],
            &["## Color"],
            &[">name", "hex"],
            &["red", "#f00"],
            &["green", "#0f0"],
        ],
    );

    let deck = driver.deck();
    assert_eq!(deck.categories.len(), 1);
    let color = &deck.categories[0];
    assert_eq!(color.name, "Color");
    assert_eq!(color.variant_names, vec!["name", "hex"]);
    assert_eq!(color.num_variants, 2);
    assert_eq!(color.selectables.len(), 2);
    assert_eq!(color.selectables[0].variants, vec!["red", "#f00"]);
}

#[test]
fn group_with_missing_key() {
    let mut driver = Driver::new();
    feed(
        &mut driver,
        &[
            &["# Selectables"],
            &["## Color"],
            &[">name", "hex"],
            &["red", "#f00"],
            &["# Groups"],
            &["warm", "Color", "name", "{red,blue}"],
        ],
    );

    let deck = driver.deck();
    assert_eq!(deck.groups.len(), 1);
    assert_eq!(deck.groups[0].keys, vec!["red", "blue"]);

    let has_issue = driver.diagnostics().iter().any(|d| {
        d.severity == Severity::Issue
            && d.message == "No selectable 'blue' under column 'name' found in selectable subgroup 'Color'"
    });
    assert!(has_issue);
}

#[test]
fn group_extension_is_additive() {
    let mut driver = Driver::new();
    feed(
        &mut driver,
        &[
            &["# Selectables"],
            &["## Color"],
            &[">name", "hex"],
            &["red", "#f00"],
            &["green", "#0f0"],
            &["# Groups"],
            &["warm", "Color", "name", "{red}"],
            &["warm", "Color", "name", "{green}"],
        ],
    );

    let deck = driver.deck();
    assert_eq!(deck.groups.len(), 1);
    assert_eq!(deck.groups[0].keys, vec!["red", "green"]);

    let info_count = driver
        .diagnostics()
        .iter()
        .filter(|d| d.severity == Severity::Info && d.message.starts_with("Extended group"))
        .count();
    assert_eq!(info_count, 1);
}

#[test]
fn pair_group_column_consistency() {
    let mut driver = Driver::new();
    feed(
        &mut driver,
        &[
            &["# Selectables"],
            &["## Color"],
            &[">name"],
            &["red"],
            &["## Shape"],
            &[">name"],
            &["square"],
            &["# Groups"],
            &["warm", "Color", "name", "{red}"],
            &["shapes", "Shape", "name", "{square}"],
            &["# PairGroups"],
            &["## Combo"],
            &[">left=group", "right=group"],
            &["warm", "shapes"],
            &["shapes", "warm"],
        ],
    );

    let deck = driver.deck();
    assert_eq!(deck.pair_groups.len(), 1);
    let combo = &deck.pair_groups[0];
    assert_eq!(combo.subgroup_checking[0], Some("Color".to_string()));
    // Both rows are retained even though the second logs a consistency
    // issue: only a missing group name drops a row outright.
    assert_eq!(combo.pairs.len(), 2);

    let has_issue = driver.diagnostics().iter().any(|d| {
        d.severity == Severity::Issue
            && d.message
                == "Group's subgroup 'Shape' must match subgroups in other groups of this column (Color)"
    });
    assert!(has_issue);
}

#[test]
fn forced_first_side_rotation() {
    let mut driver = Driver::new();
    feed(
        &mut driver,
        &[
            &["# Templates"],
            &["## Deck"],
            &[">front", "^back", "example"],
            &["{"],
            &["A"],
            &["B"],
            &["C"],
            &["}"],
        ],
    );

    let deck = driver.deck();
    assert_eq!(deck.chapters.len(), 1);
    let chapter = &deck.chapters[0];
    assert_eq!(chapter.column_variants, vec!["back", "front", "example"]);
    assert_eq!(chapter.forced_first_side, 1);
    assert_eq!(chapter.templates.len(), 1);
    assert_eq!(chapter.templates[0].sides, vec!["B", "A", "C"]);
}

#[test]
fn unterminated_card_is_dropped_not_carried_half_filled() {
    // No closing `}` before a new chapter subheader: the open card must not
    // be carried into the Deck with fewer sides than `column_variants` and
    // no diagnostic to explain the mismatch.
    let mut driver = Driver::new();
    feed(
        &mut driver,
        &[
            &["# Templates"],
            &["## Deck"],
            &[">front", "back"],
            &["{"],
            &["A"],
            &["## Other"],
            &[">front", "back"],
        ],
    );

    let deck = driver.deck();
    assert_eq!(deck.chapters.len(), 2);
    assert!(deck.chapters[0].templates.is_empty());
}

#[test]
fn closed_card_with_wrong_side_count_is_still_appended_with_issue() {
    let mut driver = Driver::new();
    feed(
        &mut driver,
        &[
            &["# Templates"],
            &["## Deck"],
            &[">front", "back"],
            &["{"],
            &["A"],
            &["}"],
        ],
    );

    let deck = driver.deck();
    assert_eq!(deck.chapters[0].templates.len(), 1);
    assert_eq!(deck.chapters[0].templates[0].sides, vec!["A"]);
    let has_issue = driver.diagnostics().iter().any(|d| {
        d.severity == Severity::Issue
            && d.message == "Number of card sides [1] does not match header [2]"
    });
    assert!(has_issue);
}

#[test]
fn overlong_pair_row_is_not_appended() {
    let mut driver = Driver::new();
    feed(
        &mut driver,
        &[
            &["# Selectables"],
            &["## Color"],
            &[">name"],
            &["red"],
            &["# Groups"],
            &["warm", "Color", "name", "{red}"],
            &["# PairGroups"],
            &["## Combo"],
            &[">left=group"],
            &["warm", "warm"],
        ],
    );

    let deck = driver.deck();
    let combo = &deck.pair_groups[0];
    assert!(combo.pairs.is_empty());
    let has_issue = driver.diagnostics().iter().any(|d| {
        d.severity == Severity::Issue
            && d.message == "Number of pair columns [2] does not match header [1]"
    });
    assert!(has_issue);
}

#[test]
fn blank_lines_keep_diagnostic_line_numbers_accurate() {
    let mut driver = Driver::new();
    driver.begin_file();
    // Line 1: section header. Line 2: blank. Line 3: the bad group row.
    driver.feed_line(fields(&["# Groups"]));
    driver.feed_line(Vec::new());
    driver.feed_line(fields(&["warm", "Color", "name", "{red}"]));
    driver.end_of_file();

    let issue = driver
        .diagnostics()
        .iter()
        .find(|d| d.message == "No selectable subgroup 'Color' found for group")
        .expect("expected issue");
    assert_eq!(issue.line, 3);
}

#[test]
fn category_finalizes_on_direct_jump_to_templates() {
    // No `# Groups` or `# PairGroups` header appears between Selectables and
    // Templates, so the in-flight Category must still be flushed when the
    // section changes (finalization keys off the section being left, not
    // the one being entered).
    let mut driver = Driver::new();
    feed(
        &mut driver,
        &[
            &["# Selectables"],
            &["## Color"],
            &[">name", "hex"],
            &["red", "#f00"],
            &["# Templates"],
        ],
    );

    let deck = driver.deck();
    assert_eq!(deck.categories.len(), 1);
    assert_eq!(deck.categories[0].name, "Color");
}

#[test]
fn placeholder_resolves_default_variant_per_side() {
    let mut driver = Driver::new();
    feed(
        &mut driver,
        &[
            &["# Selectables"],
            &["## Verb"],
            &[">english", "japanese"],
            &["see", "miru"],
            &["# Groups"],
            &["verb", "Verb", "english", "{see}"],
            &["# Templates"],
            &["## Deck"],
            &[">~english", "japanese"],
            &["{"],
            &["I saw [verb]"],
            &["I saw [verb]"],
            &["}"],
        ],
    );

    let deck = driver.deck();
    let chapter = &deck.chapters[0];
    // The leading '~' sentinel is stripped only when computing the
    // governing default variant for a side, not from the stored label.
    assert_eq!(chapter.column_variants, vec!["~english", "japanese"]);
    assert_eq!(chapter.templates[0].sides.len(), 2);
    assert!(!driver.has_issues());
}
