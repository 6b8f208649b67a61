use serde::Deserialize;
use std::env;

use crate::resources::ResourceKey;

use super::{server::parse_env_var, SettingsError};

/// 컨트롤 플레인 설정입니다.
///
/// 컨트롤러 식별자, 백엔드 주소를 만들 때 붙는 클러스터 도메인,
/// 게이트웨이 주소로 보고할 인그레스 Service 위치를 담습니다.
#[derive(Clone, Debug, Deserialize)]
pub struct ControllerSettings {
    /// 이 프로세스가 담당하는 컨트롤러 이름 (GatewayClass의 controllerName과 비교)
    #[serde(default = "default_controller_name")]
    pub controller_name: String,

    /// 백엔드 호스트에 붙는 클러스터 도메인 접미사
    #[serde(default = "default_cluster_domain")]
    pub cluster_domain: String,

    /// 인그레스 Service 이름
    #[serde(default = "default_ingress_service")]
    pub ingress_service: String,

    /// 인그레스 Service 네임스페이스
    #[serde(default = "default_ingress_namespace")]
    pub ingress_namespace: String,

    /// 리소스 매니페스트 디렉토리. 없으면 빈 스토어로 시작한다.
    #[serde(default)]
    pub manifest_dir: Option<String>,

    /// Gateway 재큐 간격 (초)
    #[serde(default = "default_requeue_interval")]
    pub requeue_interval: u64,

    /// 일시적 스토어 오류 재시도 설정
    #[serde(default)]
    pub retry: RetrySettings,
}

/// 리컨실 재시도 설정입니다.
#[derive(Clone, Debug, Deserialize)]
pub struct RetrySettings {
    /// 최대 시도 횟수
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// 재시도 간격 (초)
    #[serde(default = "default_retry_interval")]
    pub interval: u64,
}

fn default_controller_name() -> String {
    "gateway.proxy.rs/controller".to_string()
}

fn default_cluster_domain() -> String {
    "svc.cluster.local".to_string()
}

fn default_ingress_service() -> String {
    "gateway-proxy".to_string()
}

fn default_ingress_namespace() -> String {
    "default".to_string()
}

fn default_requeue_interval() -> u64 { 10 }

fn default_max_attempts() -> u32 { 3 }

fn default_retry_interval() -> u64 { 1 }

impl ControllerSettings {
    pub fn from_env() -> Result<Self, SettingsError> {
        let settings = Self {
            controller_name: env::var("PROXY_CONTROLLER_NAME")
                .unwrap_or_else(|_| default_controller_name()),
            cluster_domain: env::var("PROXY_CLUSTER_DOMAIN")
                .unwrap_or_else(|_| default_cluster_domain()),
            ingress_service: env::var("PROXY_INGRESS_SERVICE")
                .unwrap_or_else(|_| default_ingress_service()),
            ingress_namespace: env::var("PROXY_INGRESS_NAMESPACE")
                .unwrap_or_else(|_| default_ingress_namespace()),
            manifest_dir: env::var("PROXY_MANIFEST_DIR").ok(),
            requeue_interval: parse_env_var("PROXY_REQUEUE_INTERVAL_SECS", default_requeue_interval)?,
            retry: RetrySettings {
                max_attempts: parse_env_var("PROXY_RETRY_COUNT", default_max_attempts)?,
                interval: parse_env_var("PROXY_RETRY_INTERVAL_SECS", default_retry_interval)?,
            },
        };

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.controller_name.trim().is_empty() {
            return Err(SettingsError::InvalidConfig(
                "컨트롤러 이름은 비울 수 없습니다".to_string(),
            ));
        }

        // GatewayClass controllerName은 "도메인/경로" 형식을 따른다.
        if !self.controller_name.contains('/') {
            return Err(SettingsError::EnvVarInvalid {
                var_name: "PROXY_CONTROLLER_NAME".to_string(),
                value: self.controller_name.clone(),
                reason: "컨트롤러 이름은 도메인/경로 형식이어야 합니다".to_string(),
            });
        }

        if self.cluster_domain.trim().is_empty() {
            return Err(SettingsError::InvalidConfig(
                "클러스터 도메인은 비울 수 없습니다".to_string(),
            ));
        }

        if self.ingress_service.trim().is_empty() || self.ingress_namespace.trim().is_empty() {
            return Err(SettingsError::InvalidConfig(
                "인그레스 Service 이름과 네임스페이스는 비울 수 없습니다".to_string(),
            ));
        }

        if self.retry.max_attempts == 0 {
            return Err(SettingsError::EnvVarInvalid {
                var_name: "PROXY_RETRY_COUNT".to_string(),
                value: "0".to_string(),
                reason: "재시도 횟수는 1 이상이어야 합니다".to_string(),
            });
        }

        Ok(())
    }

    /// 인그레스 Service의 리소스 키를 돌려줍니다.
    pub fn ingress_service_key(&self) -> ResourceKey {
        ResourceKey::namespaced(&self.ingress_namespace, &self.ingress_service)
    }
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            controller_name: default_controller_name(),
            cluster_domain: default_cluster_domain(),
            ingress_service: default_ingress_service(),
            ingress_namespace: default_ingress_namespace(),
            manifest_dir: None,
            requeue_interval: default_requeue_interval(),
            retry: RetrySettings::default(),
        }
    }
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            interval: default_retry_interval(),
        }
    }
}
