//! 환경 변수와 TOML 파일에서 읽는 런타임 설정입니다.
//!
//! `PROXY_CONFIG_FILE`이 지정되면 해당 TOML 파일을, 아니면 `PROXY_*`
//! 환경 변수를 읽습니다. 두 경로 모두 로드 직후 검증을 거칩니다.

use std::{env, fs, path::Path};
use serde::Deserialize;

pub mod controller;
mod error;
pub mod logging;
mod server;

pub use controller::{ControllerSettings, RetrySettings};
pub use error::SettingsError;
pub use logging::LogSettings;
pub use server::ServerSettings;

pub type Result<T> = std::result::Result<T, SettingsError>;
pub use server::parse_env_var;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    // 서버 설정
    #[serde(default)]
    pub server: ServerSettings,

    // 로깅 설정
    #[serde(default)]
    pub logging: LogSettings,

    // 컨트롤 플레인 설정
    #[serde(default)]
    pub controller: ControllerSettings,
}

impl Settings {
    pub async fn load() -> Result<Self> {
        if let Ok(config_path) = env::var("PROXY_CONFIG_FILE") {
            Self::from_toml_file(&config_path).await
        } else {
            Self::from_env().await
        }
    }

    pub async fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).map_err(|e| SettingsError::FileError {
            path: path.as_ref().to_string_lossy().to_string(),
            error: e,
        })?;

        let settings: Self = toml::from_str(&content)
            .map_err(|e| SettingsError::ParseError { source: e })?;

        settings.validate()?;
        Ok(settings)
    }

    pub async fn from_env() -> Result<Self> {
        let settings = Self {
            server: ServerSettings::from_env()?,
            logging: LogSettings::from_env()?,
            controller: ControllerSettings::from_env()?,
        };

        // 설정 생성 시점에 바로 검증
        settings.validate()?;
        Ok(settings)
    }

    /// 설정 유효성 검증
    pub fn validate(&self) -> Result<()> {
        self.server.validate()?;
        self.controller.validate()?;
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            logging: LogSettings::default(),
            controller: ControllerSettings::default(),
        }
    }
}
