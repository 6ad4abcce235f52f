//! Operational configuration (SPEC_FULL.md §2). The recognized section and
//! subheader vocabulary is fixed by the grammar and is not configurable;
//! only CLI-default knobs live here.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Print the raw diagnostic underlying an internal fault, in addition
    /// to the single logged issue, when the dispatcher's fault boundary
    /// fires.
    #[serde(default)]
    pub debug: bool,
    /// Print accumulated info-severity diagnostics alongside issues.
    #[serde(default)]
    pub list_infos: bool,
    /// Default glob pattern used by `batch` and `selftest` when `--glob`
    /// is not given.
    #[serde(default = "default_glob")]
    pub glob_default: String,
}

fn default_glob() -> String {
    "*.txt".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            list_infos: false,
            glob_default: default_glob(),
        }
    }
}

impl Config {
    /// Load from `path`, or `lacuna.toml` in the working directory if
    /// `path` is `None`. A missing file yields the default config; a
    /// present-but-invalid file is a hard error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let candidate = match path {
            Some(p) => PathBuf::from(p),
            None => PathBuf::from("lacuna.toml"),
        };
        if !candidate.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&candidate).map_err(|source| ConfigError::Read {
            path: candidate.clone(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: candidate,
            source,
        })
    }

    pub fn default_template() -> String {
        r#"# lacuna config template

# Print the underlying fault string when the dispatcher's fault boundary
# fires, in addition to the single logged issue.
debug = false

# Print accumulated info-severity diagnostics alongside issues.
list_infos = false

# Default glob pattern for `batch` and `selftest` when --glob is omitted.
glob_default = "*.txt"
"#
        .to_string()
    }
}
