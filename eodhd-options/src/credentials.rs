//! Per-user persistence of the API key.
//!
//! The key lives in a small JSON object (`{"api_key": "..."}`) inside a
//! private config directory. On Unix the directory is restricted to 0700 and
//! the file to 0600.

use std::fs;
use std::path::{Path, PathBuf};

use eodhd_core::EodhdError;
use serde_json::{Map, Value};

const APP_DIR: &str = "eodhd_options";
const CONFIG_FILE: &str = "config.json";
const API_KEY_FIELD: &str = "api_key";

#[cfg(unix)]
const DIR_MODE: u32 = 0o700;
#[cfg(unix)]
const FILE_MODE: u32 = 0o600;

/// Handle on the config directory that stores the API key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialStore {
    dir: PathBuf,
    file: PathBuf,
}

impl CredentialStore {
    /// Platform default location.
    ///
    /// `%APPDATA%\eodhd_options` on Windows (home directory if `APPDATA` is
    /// unavailable), `~/.config/eodhd_options` everywhere else.
    ///
    /// # Errors
    /// Returns `Config` if no home directory can be determined.
    pub fn default_dir() -> Result<PathBuf, EodhdError> {
        #[cfg(windows)]
        let base = dirs::config_dir().or_else(dirs::home_dir);
        #[cfg(not(windows))]
        let base = dirs::home_dir().map(|h| h.join(".config"));

        base.map(|b| b.join(APP_DIR))
            .ok_or_else(|| EodhdError::config("could not determine the user's home directory"))
    }

    /// Open (and create if needed) a store rooted at `dir`.
    ///
    /// # Errors
    /// Returns `Io` if the directory cannot be created or its permissions set.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, EodhdError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| EodhdError::io(&dir, e))?;
        #[cfg(unix)]
        set_mode(&dir, DIR_MODE)?;
        let file = dir.join(CONFIG_FILE);
        Ok(Self { dir, file })
    }

    /// Open the store at [`default_dir`](Self::default_dir).
    ///
    /// # Errors
    /// See [`default_dir`](Self::default_dir) and [`open`](Self::open).
    pub fn open_default() -> Result<Self, EodhdError> {
        Self::open(Self::default_dir()?)
    }

    /// Config directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Config file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file
    }

    /// Persist `key`, replacing any stored key. Other fields already present in
    /// the config object are kept; a missing or corrupt file starts fresh.
    ///
    /// # Errors
    /// `InvalidArg` for an empty key, `Io` if the file cannot be written.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "eodhd_options::credentials",
            skip(self, key),
            fields(path = %self.file.display()),
        )
    )]
    pub fn save(&self, key: &str) -> Result<(), EodhdError> {
        if key.is_empty() {
            return Err(EodhdError::invalid_arg("API key must not be empty"));
        }
        let mut doc = self.read_object().unwrap_or_default();
        doc.insert(API_KEY_FIELD.to_string(), Value::String(key.to_string()));
        let body = serde_json::to_vec(&Value::Object(doc))
            .map_err(|e| EodhdError::data(format!("serializing config: {e}")))?;
        write_private(&self.file, &body)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "eodhd_options::credentials", "api key saved");
        Ok(())
    }

    /// Stored key, or `None` if the file is missing, unreadable, not a JSON
    /// object, or has no non-empty `api_key` string.
    #[must_use]
    pub fn load(&self) -> Option<String> {
        self.read_object()?
            .remove(API_KEY_FIELD)
            .and_then(|v| match v {
                Value::String(s) if !s.is_empty() => Some(s),
                _ => None,
            })
    }

    fn read_object(&self) -> Option<Map<String, Value>> {
        let raw = fs::read_to_string(&self.file).ok()?;
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(m)) => Some(m),
            _ => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    target: "eodhd_options::credentials",
                    path = %self.file.display(),
                    "config file is not a JSON object; ignoring it"
                );
                None
            }
        }
    }
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<(), EodhdError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode)).map_err(|e| EodhdError::io(path, e))
}

#[cfg(unix)]
fn write_private(path: &Path, body: &[u8]) -> Result<(), EodhdError> {
    use std::io::Write;
    use std::os::unix::fs::OpenOptionsExt;

    let mut f = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(FILE_MODE)
        .open(path)
        .map_err(|e| EodhdError::io(path, e))?;
    f.write_all(body).map_err(|e| EodhdError::io(path, e))?;
    // `mode` only applies on creation; tighten a pre-existing file too.
    set_mode(path, FILE_MODE)
}

#[cfg(not(unix))]
fn write_private(path: &Path, body: &[u8]) -> Result<(), EodhdError> {
    fs::write(path, body).map_err(|e| EodhdError::io(path, e))
}
