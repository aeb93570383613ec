//! On-disk credentials and usage state.
//!
//! Credentials are resolved from three sources, first match wins:
//! environment variables, the legacy `credentials.json`, then the canonical
//! `config.toml`. Only the TOML file is ever written.

use crate::error::ConfigError;
use crate::types::{Credentials, UsageState, DEFAULT_AGENT_NAME};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const API_KEY_ENV: &str = "MOLTBOOK_API_KEY";
pub const AGENT_NAME_ENV: &str = "MOLTBOOK_AGENT_NAME";

const CREDENTIALS_FILE: &str = "config.toml";
const LEGACY_CREDENTIALS_FILE: &str = "credentials.json";
const STATE_FILE: &str = "state.toml";

const PRIVATE_DIR_MODE: u32 = 0o700;
const PRIVATE_FILE_MODE: u32 = 0o600;
const PUBLIC_FILE_MODE: u32 = 0o644;

/// Snapshot of the credential environment variables.
#[derive(Debug, Clone, Default)]
pub struct EnvCredentials {
    pub api_key: Option<String>,
    pub agent_name: Option<String>,
}

impl EnvCredentials {
    pub fn from_process() -> Self {
        Self {
            api_key: std::env::var(API_KEY_ENV).ok(),
            agent_name: std::env::var(AGENT_NAME_ENV).ok(),
        }
    }
}

type CredentialAttempt =
    fn(&ConfigStore, &EnvCredentials) -> Result<Option<Credentials>, ConfigError>;

const RESOLUTION_ORDER: [(&str, CredentialAttempt); 3] = [
    ("environment", ConfigStore::credentials_from_env),
    ("legacy JSON file", ConfigStore::credentials_from_legacy_json),
    ("TOML file", ConfigStore::credentials_from_toml),
];

/// `$HOME/.config/moltbook`
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::HomeDirectoryUnavailable)?;
    Ok(home.join(".config").join("moltbook"))
}

#[derive(Debug, Clone)]
pub struct ConfigStore {
    config_dir: PathBuf,
}

impl ConfigStore {
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    pub fn from_home() -> Result<Self, ConfigError> {
        Ok(Self::new(default_config_dir()?))
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn credentials_path(&self) -> PathBuf {
        self.config_dir.join(CREDENTIALS_FILE)
    }

    pub fn legacy_credentials_path(&self) -> PathBuf {
        self.config_dir.join(LEGACY_CREDENTIALS_FILE)
    }

    pub fn state_path(&self) -> PathBuf {
        self.config_dir.join(STATE_FILE)
    }

    pub fn resolve_credentials(&self, env: &EnvCredentials) -> Result<Credentials, ConfigError> {
        for (source, attempt) in RESOLUTION_ORDER {
            if let Some(credentials) = attempt(self, env)? {
                debug!("Resolved credentials from {}", source);
                return Ok(credentials);
            }
        }
        Err(ConfigError::NotConfigured)
    }

    fn credentials_from_env(&self, env: &EnvCredentials) -> Result<Option<Credentials>, ConfigError> {
        let api_key = match env.api_key.as_deref() {
            Some(key) if !key.is_empty() => key,
            _ => return Ok(None),
        };
        let agent_name = match env.agent_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => DEFAULT_AGENT_NAME,
        };
        Ok(Some(Credentials::new(api_key, agent_name)))
    }

    // Unreadable or malformed legacy files fall through to the TOML file.
    fn credentials_from_legacy_json(
        &self,
        _env: &EnvCredentials,
    ) -> Result<Option<Credentials>, ConfigError> {
        let path = self.legacy_credentials_path();
        let Ok(data) = fs::read_to_string(&path) else {
            return Ok(None);
        };
        match serde_json::from_str::<Credentials>(&data) {
            Ok(credentials) => Ok(Some(credentials)),
            Err(e) => {
                debug!("Ignoring unparseable {}: {}", path.display(), e);
                Ok(None)
            }
        }
    }

    fn credentials_from_toml(
        &self,
        _env: &EnvCredentials,
    ) -> Result<Option<Credentials>, ConfigError> {
        let path = self.credentials_path();
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(load_failed(&path, e)),
        };
        toml::from_str(&data)
            .map(Some)
            .map_err(|e| load_failed(&path, e))
    }

    pub fn save_credentials(&self, credentials: &Credentials) -> Result<(), ConfigError> {
        self.ensure_config_dir()?;
        let contents = encode_toml(credentials)?;
        let path = self.credentials_path();
        write_file(&path, contents.as_bytes(), PRIVATE_FILE_MODE)?;
        info!("Saved credentials to {}", path.display());
        Ok(())
    }

    /// Missing file yields the zero state; only a malformed file is an error.
    pub fn load_state(&self) -> Result<UsageState, ConfigError> {
        let path = self.state_path();
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No state file at {}, starting fresh", path.display());
                return Ok(UsageState::default());
            }
            Err(e) => return Err(load_failed(&path, e)),
        };
        toml::from_str(&data).map_err(|e| load_failed(&path, e))
    }

    pub fn save_state(&self, state: &UsageState) -> Result<(), ConfigError> {
        self.ensure_config_dir()?;
        let contents = encode_toml(state)?;
        let path = self.state_path();
        write_file(&path, contents.as_bytes(), PUBLIC_FILE_MODE)?;
        debug!("Saved state to {}", path.display());
        Ok(())
    }

    fn ensure_config_dir(&self) -> Result<(), ConfigError> {
        create_private_dir(&self.config_dir).map_err(|source| ConfigError::WriteFailed {
            path: self.config_dir.display().to_string(),
            source,
        })
    }
}

/// Writes shell-style `KEY=value` lines, readable by the owner only.
pub fn write_env_file(path: &Path, credentials: &Credentials) -> Result<(), ConfigError> {
    let contents = format!(
        "{}={}\n{}={}\n",
        API_KEY_ENV, credentials.api_key, AGENT_NAME_ENV, credentials.agent_name
    );
    write_file(path, contents.as_bytes(), PRIVATE_FILE_MODE)
}

fn load_failed(path: &Path, reason: impl std::fmt::Display) -> ConfigError {
    ConfigError::LoadFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

fn encode_toml<T: serde::Serialize>(value: &T) -> Result<String, ConfigError> {
    toml::to_string(value).map_err(|e| ConfigError::Encode {
        details: e.to_string(),
    })
}

#[cfg(unix)]
fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new()
        .recursive(true)
        .mode(PRIVATE_DIR_MODE)
        .create(dir)
}

#[cfg(not(unix))]
fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dir)
}

fn write_file(path: &Path, contents: &[u8], mode: u32) -> Result<(), ConfigError> {
    write_with_mode(path, contents, mode).map_err(|source| ConfigError::WriteFailed {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(unix)]
fn write_with_mode(path: &Path, contents: &[u8], mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(mode)
        .open(path)?;
    file.write_all(contents)?;
    // `mode` only applies on creation; tighten files that already existed.
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn write_with_mode(path: &Path, contents: &[u8], _mode: u32) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(contents)
}
