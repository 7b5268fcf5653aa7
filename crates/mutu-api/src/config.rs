//! Startup configuration, read once from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::AppError;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Content Document to serve (`.json`, `.yaml` or `.yml`).
    pub content_path: PathBuf,
    /// Directory for the JSON file store. `None` keeps state in memory.
    pub state_dir: Option<PathBuf>,
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Reads `MUTU_CONTENT_PATH`, `MUTU_STATE_DIR`, `HOST` and `PORT`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the content path is missing or the port
    /// does not parse.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`Config::from_env`] with an injectable variable source.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the content path is missing or the port
    /// does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let content_path = lookup("MUTU_CONTENT_PATH")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .ok_or_else(|| {
                AppError::Config("MUTU_CONTENT_PATH environment variable must be set".to_owned())
            })?;
        let state_dir = lookup("MUTU_STATE_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_owned());
        let port: u16 = lookup("PORT")
            .unwrap_or_else(|| "3000".to_owned())
            .parse()
            .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?;
        Ok(Self {
            content_path,
            state_dir,
            host,
            port,
        })
    }

    /// The socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` for an unparsable `HOST:PORT`.
    pub fn bind_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}
