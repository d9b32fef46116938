// Config store: a flat JSON object kept in a single file, by default
// `~/.config.json`. Values are read into memory at startup, mutated in
// memory and written back as a whole.

use crate::error::{CredentialError, CredentialResult};
use serde_json::{Map, Value};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// File name used under the home directory when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = ".config.json";

/// `<home>/.config.json`, or an error when no home directory is known.
pub fn default_config_path() -> CredentialResult<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_CONFIG_FILE))
        .ok_or(CredentialError::MissingEnvironment("HOME"))
}

/// Pick the config path: an explicit `--token-file` wins over the default.
pub fn resolve_config_path(token_file: Option<PathBuf>) -> CredentialResult<PathBuf> {
    match token_file {
        Some(path) => Ok(path),
        None => default_config_path(),
    }
}

/// Key-value document backed by a JSON file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl ConfigStore {
    /// Create a store for `path`. Nothing is read until `load` is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ConfigStore {
            path: path.into(),
            values: Map::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create an empty file when none exists. Returns true if it was created.
    pub fn ensure_exists(&self) -> CredentialResult<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        tracing::info!(path = %self.path.display(), "config file not found, creating it");
        let write_err = |source: io::Error| CredentialError::ConfigWrite {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = non_empty_parent(&self.path) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::File::create(&self.path).map_err(write_err)?;
        Ok(true)
    }

    /// Read the file into memory.
    ///
    /// An empty file is an empty document. On any read or parse failure the
    /// in-memory state is reset to empty and `ConfigRead` is returned; the
    /// store stays usable so the caller can decide to carry on.
    pub fn load(&mut self) -> CredentialResult<()> {
        self.values.clear();

        let content = fs::read_to_string(&self.path).map_err(|e| CredentialError::ConfigRead {
            path: self.path.clone(),
            source: Box::new(e),
        })?;
        if content.trim().is_empty() {
            return Ok(());
        }

        let parsed: Value =
            serde_json::from_str(&content).map_err(|e| CredentialError::ConfigRead {
                path: self.path.clone(),
                source: Box::new(e),
            })?;
        match parsed {
            Value::Object(map) => {
                tracing::debug!(keys = map.len(), "loaded config file");
                self.values = map;
                Ok(())
            }
            other => Err(CredentialError::ConfigRead {
                path: self.path.clone(),
                source: format!("expected a JSON object, found {}", json_kind(&other)).into(),
            }),
        }
    }

    /// Value for `key`, or an empty string when the key is absent.
    pub fn get(&self, key: &str) -> String {
        match self.values.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(v @ (Value::Number(_) | Value::Bool(_))) => v.to_string(),
            _ => String::new(),
        }
    }

    /// In-memory only; call `write` to persist.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values
            .insert(key.to_string(), Value::String(value.into()));
    }

    /// Replace the file with the in-memory document.
    ///
    /// The new content goes to a temp file in the same directory which is
    /// then renamed over the target, so readers never see a partial file.
    pub fn write(&self) -> CredentialResult<()> {
        let write_err = |source: io::Error| CredentialError::ConfigWrite {
            path: self.path.clone(),
            source,
        };

        let mut content = serde_json::to_string_pretty(&self.values)
            .map_err(io::Error::from)
            .map_err(write_err)?;
        content.push('\n');
        let dir = non_empty_parent(&self.path).unwrap_or_else(|| Path::new("."));

        let mut temp_file = NamedTempFile::new_in(dir).map_err(write_err)?;
        temp_file.write_all(content.as_bytes()).map_err(write_err)?;
        temp_file.flush().map_err(write_err)?;
        temp_file
            .persist(&self.path)
            .map_err(|e| write_err(e.error))?;

        tracing::debug!(path = %self.path.display(), "config file written");
        Ok(())
    }
}

fn non_empty_parent(path: &Path) -> Option<&Path> {
    path.parent().filter(|p| !p.as_os_str().is_empty())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
