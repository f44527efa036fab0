//! Strongly-typed domain structures for the validated configuration.
use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Port the development server binds (never zero).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Port(u16);

impl Port {
    pub fn try_new(value: u16) -> Result<Self, TypeConstraintError> {
        if value == 0 {
            return Err(TypeConstraintError::ZeroPort);
        }

        Ok(Self(value))
    }

    pub fn value(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Root directory static files are served from. Assumed canonical.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BaseDir(PathBuf);

impl BaseDir {
    pub fn try_new(path: PathBuf) -> Result<Self, TypeConstraintError> {
        if path.as_os_str().is_empty() {
            return Err(TypeConstraintError::EmptyPath);
        }

        Ok(Self(path))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl From<BaseDir> for PathBuf {
    fn from(value: BaseDir) -> Self {
        value.0
    }
}

/// Paths to the PEM private key and certificate terminating HTTPS.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TlsPair {
    key: PathBuf,
    cert: PathBuf,
}

impl TlsPair {
    pub fn try_new(key: PathBuf, cert: PathBuf) -> Result<Self, TypeConstraintError> {
        if key.as_os_str().is_empty() || cert.as_os_str().is_empty() {
            return Err(TypeConstraintError::EmptyPath);
        }

        Ok(Self { key, cert })
    }

    pub fn key(&self) -> &Path {
        &self.key
    }

    pub fn cert(&self) -> &Path {
        &self.cert
    }
}

/// Immutable configuration handed to the external dev server.
///
/// Built once at startup by the validation service and never mutated.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ValidatedConfig {
    port: Port,
    open: bool,
    base_dir: BaseDir,
    tls: TlsPair,
}

impl ValidatedConfig {
    pub fn new(port: Port, open: bool, base_dir: BaseDir, tls: TlsPair) -> Self {
        Self {
            port,
            open,
            base_dir,
            tls,
        }
    }

    pub fn port(&self) -> Port {
        self.port
    }

    pub fn open(&self) -> bool {
        self.open
    }

    pub fn base_dir(&self) -> &BaseDir {
        &self.base_dir
    }

    pub fn tls(&self) -> &TlsPair {
        &self.tls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_rejects_zero() {
        assert!(Port::try_new(0).is_err());
        assert_eq!(Port::try_new(3000).unwrap().value(), 3000);
    }

    #[test]
    fn port_displays_value() {
        let port = Port::try_new(8443).unwrap();
        assert_eq!(port.to_string(), "8443");
    }

    #[test]
    fn base_dir_rejects_empty() {
        assert!(BaseDir::try_new(PathBuf::new()).is_err());
        assert!(BaseDir::try_new(PathBuf::from("/srv/www")).is_ok());
    }

    #[test]
    fn tls_pair_rejects_empty_members() {
        assert!(TlsPair::try_new(PathBuf::new(), PathBuf::from("cert.crt")).is_err());
        assert!(TlsPair::try_new(PathBuf::from("cert.key"), PathBuf::new()).is_err());

        let pair = TlsPair::try_new(PathBuf::from("cert.key"), PathBuf::from("cert.crt")).unwrap();
        assert_eq!(pair.key(), Path::new("cert.key"));
        assert_eq!(pair.cert(), Path::new("cert.crt"));
    }
}

#[derive(Debug, Error)]
pub enum TypeConstraintError {
    #[error("port must be nonzero")]
    ZeroPort,
    #[error("path must not be empty")]
    EmptyPath,
}
