// Configuration module: everything the run needs from the environment is
// read once here and handed to the sync loop as a plain `Config` value.

use secrecy::SecretString;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable holding the GitHub token used for every request.
pub const TOKEN_VAR: &str = "GIST_TOKEN";

/// Directory, relative to the repository root, that holds one folder per
/// example.
pub const EXAMPLES_DIR: &str = "docs_site/static/examples";

/// Name of the file inside each example folder, and the file key inside the
/// gist that receives its content.
pub const GIST_FILENAME: &str = "main.dart";

/// Binds an example name to the environment variable carrying its gist id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemSpec {
    pub name: &'static str,
    pub env_var: &'static str,
}

/// The examples pushed on every run, in processing order.
pub const ITEMS: &[ItemSpec] = &[
    ItemSpec {
        name: "counter",
        env_var: "COUNTER_GIST_ID",
    },
    ItemSpec {
        name: "hydrated",
        env_var: "HYDRATED_GIST_ID",
    },
    ItemSpec {
        name: "undoredo",
        env_var: "UNDOREDO_GIST_ID",
    },
];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{var} environment variable is missing.")]
    MissingToken { var: &'static str },
}

/// One example to sync: its name and the gist id configured for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    pub gist_id: Option<String>,
}

impl Item {
    pub fn new(name: impl Into<String>, gist_id: Option<String>) -> Self {
        Item {
            name: name.into(),
            gist_id,
        }
    }

    /// Path of the example source below `root`:
    /// `<root>/docs_site/static/examples/<name>/main.dart`.
    pub fn file_path(&self, root: &Path) -> PathBuf {
        root.join(EXAMPLES_DIR).join(&self.name).join(GIST_FILENAME)
    }
}

/// Everything a run needs. Built once at startup.
#[derive(Debug)]
pub struct Config {
    pub token: SecretString,
    pub items: Vec<Item>,
}

impl Config {
    pub fn new(token: impl Into<String>, items: Vec<Item>) -> Self {
        let token: String = token.into();
        Config {
            token: SecretString::new(token.into()),
            items,
        }
    }

    /// Read the token and the gist id of every entry in [`ITEMS`] from the
    /// process environment. Fails only when the token is absent; a missing
    /// gist id leaves that item's `gist_id` as `None`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let token =
            env_var_or_none(TOKEN_VAR).ok_or(ConfigError::MissingToken { var: TOKEN_VAR })?;
        let items = ITEMS
            .iter()
            .map(|spec| Item::new(spec.name, env_var_or_none(spec.env_var)))
            .collect();
        Ok(Config::new(token, items))
    }
}

/// Read an environment variable, returning None if unset, empty, or
/// whitespace-only. Present values are trimmed.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
