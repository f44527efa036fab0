//! Configuration model loaded from external sources.

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, Validate)]
/// Dev-server configuration record in the shape the serving tool consumes.
pub struct ServerConfig {
    /// Port the server binds. Zero is rejected at validation time.
    #[validate(range(min = 1))]
    pub port: u16,
    /// Whether the server should auto-launch a browser after startup.
    pub open: bool,
    #[validate(nested)]
    pub server: StaticServer,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, Validate)]
/// Static file serving section.
pub struct StaticServer {
    /// Root directory static files are served from. Accepts the legacy
    /// camelCase spelling `baseDir` on input.
    #[serde(alias = "baseDir")]
    #[validate(length(min = 1))]
    pub base_dir: String,
    #[validate(nested)]
    pub https: HttpsConfig,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, Validate)]
/// Paths to the PEM certificate/key pair terminating HTTPS.
pub struct HttpsConfig {
    #[validate(length(min = 1))]
    pub key: String,
    #[validate(length(min = 1))]
    pub cert: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            open: true,
            server: StaticServer::default(),
        }
    }
}

impl Default for StaticServer {
    fn default() -> Self {
        Self {
            base_dir: "./".to_string(),
            https: HttpsConfig::default(),
        }
    }
}

impl Default for HttpsConfig {
    fn default() -> Self {
        Self {
            key: "./cert.key".to_string(),
            cert: "./cert.crt".to_string(),
        }
    }
}
