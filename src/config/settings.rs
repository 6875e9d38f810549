use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::compose::options::{self, DeliveryOptions, OptionsPatch};
use crate::error::{AppError, AppResult};

const DEFAULT_SERVER: &str = "smtp.gmail.com";
const DEFAULT_PORT: u16 = 587;
const DEFAULT_TIMEOUT_SECS: u64 = 600;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub sender_name: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Profile-level overrides layered over the built-in delivery defaults.
    #[serde(default)]
    pub defaults: OptionsPatch,
}

impl Settings {
    pub fn server(&self) -> &str {
        self.server.as_deref().unwrap_or(DEFAULT_SERVER)
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn address(&self) -> AppResult<&str> {
        self.address.as_deref().ok_or_else(|| {
            AppError::Config(
                "missing sender address in profile settings. add it to your profile json"
                    .to_string(),
            )
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn delivery_defaults(&self) -> DeliveryOptions {
        options::resolve(&DeliveryOptions::default(), Some(&self.defaults))
    }

    /// From-header value: `Name <address>` when a display name is configured,
    /// otherwise the bare address.
    pub fn from_header(&self) -> AppResult<String> {
        let address = sanitize_header_value(self.address()?);
        let name = self
            .sender_name
            .as_deref()
            .map(sanitize_header_value)
            .filter(|value| !value.is_empty());

        Ok(match name {
            Some(name) => format!("{name} <{address}>"),
            None => address,
        })
    }
}

fn sanitize_header_value(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|value| *value != '\r' && *value != '\n' && *value != '"')
        .collect()
}

pub fn load(path: PathBuf) -> AppResult<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }

    let raw = fs::read_to_string(path)?;
    let settings = serde_json::from_str(&raw)?;
    Ok(settings)
}

pub fn save(path: PathBuf, settings: &Settings) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let payload = serde_json::to_string_pretty(settings)?;
    fs::write(&path, payload)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let mut perms = fs::metadata(&path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(&path, perms)?;
    }

    Ok(())
}
