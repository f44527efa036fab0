//! Validation service turning a raw record into a [`ValidatedConfig`].

use std::fs;
use std::path::{Path, PathBuf};

use validator::Validate;

use crate::domain::{BaseDir, Port, TlsPair, ValidatedConfig};
use crate::models::config::ServerConfig;
use crate::services::{ValidationError, ValidationResult, tls};

/// Service validating a configuration record against the filesystem.
#[derive(Clone, Debug)]
pub struct ConfigValidator {
    root: PathBuf,
}

impl ConfigValidator {
    /// `root` anchors relative paths from the record. In production this is
    /// the process working directory.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn resolve(&self, value: &str) -> PathBuf {
        let path = Path::new(value);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn check_base_dir(&self, raw: &str) -> ValidationResult<BaseDir> {
        let path = self.resolve(raw);

        let metadata = fs::metadata(&path).map_err(ValidationError::BaseDirUnreadable)?;
        if !metadata.is_dir() {
            return Err(ValidationError::BaseDirNotADirectory);
        }
        // Listing the directory proves it is actually readable.
        fs::read_dir(&path).map_err(ValidationError::BaseDirUnreadable)?;

        let canonical = path
            .canonicalize()
            .map_err(ValidationError::BaseDirUnreadable)?;
        BaseDir::try_new(canonical).map_err(|e| ValidationError::Field(e.to_string()))
    }

    fn check_tls(&self, key: &str, cert: &str) -> ValidationResult<TlsPair> {
        let key_path = self.resolve(key);
        let cert_path = self.resolve(cert);

        let chain = tls::load_cert_chain(&cert_path)?;
        let key_der = tls::load_private_key(&key_path)?;
        tls::check_pair(&chain, &key_der)?;

        TlsPair::try_new(key_path, cert_path).map_err(|e| ValidationError::Field(e.to_string()))
    }

    /// Validate the record and produce the immutable hand-off configuration.
    pub fn validate(&self, config: &ServerConfig) -> ValidationResult<ValidatedConfig> {
        config
            .validate()
            .map_err(|e| ValidationError::Field(e.to_string()))?;

        let port = Port::try_new(config.port).map_err(|e| ValidationError::Field(e.to_string()))?;
        let base_dir = self.check_base_dir(&config.server.base_dir)?;
        let tls = self.check_tls(&config.server.https.key, &config.server.https.cert)?;

        Ok(ValidatedConfig::new(port, config.open, base_dir, tls))
    }
}
