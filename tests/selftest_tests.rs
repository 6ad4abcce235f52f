use lacuna::selftest::run_selftest;
use std::fs;

#[test]
fn selftest_continues_on_runtime_failure() {
    let temp_dir = std::env::temp_dir().join("lacuna_selftest_test_continues");
    let _ = fs::remove_dir_all(&temp_dir);
    fs::create_dir_all(&temp_dir).unwrap();

    fs::write(
        temp_dir.join("good.txt"),
        "# Selectables\n## Color\n>name\nred\n",
    )
    .unwrap();
    fs::write(temp_dir.join("bad.txt"), [0xff, 0xfe, 0xfd]).unwrap();

    let summary = run_selftest(temp_dir.to_str().unwrap(), "*.txt").unwrap();

    assert_eq!(summary.total_files, 2);
    assert_eq!(summary.runtime_failures, 1);

    let _ = fs::remove_dir_all(&temp_dir);
}

#[test]
fn selftest_counts_issues_and_infos() {
    let temp_dir = std::env::temp_dir().join("lacuna_selftest_test_counts");
    let _ = fs::remove_dir_all(&temp_dir);
    fs::create_dir_all(&temp_dir).unwrap();

    fs::write(
        temp_dir.join("deck.txt"),
        "# Selectables\n\
         ## Color\n\
         >name\n\
         red\n\
         # Groups\n\
         warm;Color;name;{red,blue}\n",
    )
    .unwrap();

    let summary = run_selftest(temp_dir.to_str().unwrap(), "*.txt").unwrap();

    assert_eq!(summary.total_files, 1);
    assert_eq!(summary.runtime_failures, 0);
    assert!(summary.total_issues >= 1);
    assert_eq!(summary.worst_files.len(), 1);
    assert!(summary.worst_files[0].issues >= 1);

    let _ = fs::remove_dir_all(&temp_dir);
}

#[test]
fn selftest_missing_fixtures_path_errors() {
    let result = run_selftest("/nonexistent/lacuna/fixtures/path", "*.txt");
    assert!(result.is_err());
}

#[test]
fn selftest_single_file_target() {
    let temp_dir = std::env::temp_dir().join("lacuna_selftest_test_single");
    let _ = fs::remove_dir_all(&temp_dir);
    fs::create_dir_all(&temp_dir).unwrap();
    let file_path = temp_dir.join("only.txt");
    fs::write(&file_path, "# Selectables\n## Color\n>name\nred\n").unwrap();

    let summary = run_selftest(file_path.to_str().unwrap(), "*.txt").unwrap();
    assert_eq!(summary.total_files, 1);
    assert_eq!(summary.runtime_failures, 0);

    let _ = fs::remove_dir_all(&temp_dir);
}
