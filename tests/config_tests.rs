use lacuna::config::Config;
use std::io::Write;

fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

#[test]
fn parse_config_ok() {
    let toml_str = r#"
debug = true
list_infos = true
glob_default = "*.deck"
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert!(config.debug);
    assert!(config.list_infos);
    assert_eq!(config.glob_default, "*.deck");
}

#[test]
fn default_config_has_default_glob() {
    let config = Config::default();
    assert!(!config.debug);
    assert!(!config.list_infos);
    assert_eq!(config.glob_default, "*.txt");
}

#[test]
fn partial_config_fills_defaults() {
    let config: Config = toml::from_str("debug = true\n").unwrap();
    assert!(config.debug);
    assert!(!config.list_infos);
    assert_eq!(config.glob_default, "*.txt");
}

#[test]
fn load_missing_file_yields_default() {
    let path = std::env::temp_dir().join("lacuna_config_tests_missing_should_not_exist.toml");
    let _ = std::fs::remove_file(&path);
    let config = Config::load(Some(&path)).unwrap();
    assert!(!config.debug);
    assert_eq!(config.glob_default, "*.txt");
}

#[test]
fn load_invalid_config_is_hard_error() {
    let path = write_temp(
        "lacuna_config_tests_invalid.toml",
        "glob_default = 7\n",
    );
    let result = Config::load(Some(&path));
    assert!(result.is_err());
    let _ = std::fs::remove_file(&path);
}

#[test]
fn load_valid_config_round_trips() {
    let path = write_temp(
        "lacuna_config_tests_valid.toml",
        "debug = true\nlist_infos = false\nglob_default = \"*.lacuna\"\n",
    );
    let config = Config::load(Some(&path)).unwrap();
    assert!(config.debug);
    assert!(!config.list_infos);
    assert_eq!(config.glob_default, "*.lacuna");
    let _ = std::fs::remove_file(&path);
}
