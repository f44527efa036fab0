use serde::Serialize;

use crate::domain::ValidatedConfig;

/// Serializable record in the shape the external dev server consumes.
#[derive(Clone, Debug, Serialize)]
pub struct ResolvedConfigDto {
    pub port: u16,
    pub open: bool,
    pub server: ResolvedStaticDto,
}

#[derive(Clone, Debug, Serialize)]
pub struct ResolvedStaticDto {
    pub base_dir: String,
    pub https: ResolvedHttpsDto,
}

#[derive(Clone, Debug, Serialize)]
pub struct ResolvedHttpsDto {
    pub key: String,
    pub cert: String,
}

impl From<&ValidatedConfig> for ResolvedConfigDto {
    fn from(config: &ValidatedConfig) -> Self {
        Self {
            port: config.port().value(),
            open: config.open(),
            server: ResolvedStaticDto {
                base_dir: config.base_dir().as_path().to_string_lossy().to_string(),
                https: ResolvedHttpsDto {
                    key: config.tls().key().to_string_lossy().to_string(),
                    cert: config.tls().cert().to_string_lossy().to_string(),
                },
            },
        }
    }
}
