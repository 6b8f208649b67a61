use std::fmt;

use async_trait::async_trait;

use crate::resources::gateway::{Gateway, GatewayClass, GatewayClassStatus, GatewayStatus};
use crate::resources::route::{HttpRoute, HttpRouteStatus};

/// 네임스페이스와 이름으로 리소스를 식별하는 키입니다.
/// 클러스터 범위 리소스는 네임스페이스가 없습니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceKey {
    pub namespace: Option<String>,
    pub name: String,
}

impl ResourceKey {
    pub fn cluster(name: impl Into<String>) -> Self {
        ResourceKey { namespace: None, name: name.into() }
    }

    pub fn namespaced(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        ResourceKey {
            namespace: Some(namespace.into()),
            name: name.into(),
        }
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(namespace) => write!(f, "{}/{}", namespace, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// 이벤트와 디스패치에 쓰이는 리소스 종류입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    GatewayClass,
    Gateway,
    HttpRoute,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::GatewayClass => write!(f, "GatewayClass"),
            ResourceKind::Gateway => write!(f, "Gateway"),
            ResourceKind::HttpRoute => write!(f, "HTTPRoute"),
        }
    }
}

/// 리소스 변경 알림입니다. 변경 내용은 싣지 않고 대상 키만 전달하며,
/// 리컨실러가 스토어에서 최신 상태를 다시 조회합니다.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceEvent {
    pub kind: ResourceKind,
    pub key: ResourceKey,
}

/// 스토어 접근 에러를 표현하는 열거형입니다.
#[derive(Debug)]
pub enum StoreError {
    /// 쓰기 대상 리소스가 없음
    NotFound {
        kind: &'static str,
        key: String,
    },
    /// 입출력 실패 (일시적일 수 있음)
    Io {
        reason: String,
    },
    /// 매니페스트 형식 오류
    Invalid {
        reason: String,
    },
    /// 파일 감시 실패
    Watch {
        reason: String,
    },
}

impl StoreError {
    /// 재시도할 가치가 있는 에러인지 판단합니다.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Io { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound { kind, key } =>
                write!(f, "{} {}을(를) 찾을 수 없음", kind, key),
            StoreError::Io { reason } =>
                write!(f, "스토어 입출력 실패: {}", reason),
            StoreError::Invalid { reason } =>
                write!(f, "잘못된 매니페스트: {}", reason),
            StoreError::Watch { reason } =>
                write!(f, "매니페스트 감시 실패: {}", reason),
        }
    }
}

impl std::error::Error for StoreError {}

/// 리소스 조회와 상태 기록을 담당하는 스토어 추상화입니다.
///
/// 조회는 부재를 `Ok(None)`으로 돌려주고, `NotFound`는 사라진 리소스에
/// 대한 상태 쓰기에만 사용합니다. 상태 갱신은 전체 교체 방식입니다.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    async fn get_gateway_class(&self, name: &str) -> Result<Option<GatewayClass>, StoreError>;

    async fn get_gateway(&self, key: &ResourceKey) -> Result<Option<Gateway>, StoreError>;

    async fn get_http_route(&self, key: &ResourceKey) -> Result<Option<HttpRoute>, StoreError>;

    /// 모든 HTTPRoute를 네임스페이스, 이름 순으로 정렬해 반환합니다.
    async fn list_http_routes(&self) -> Result<Vec<HttpRoute>, StoreError>;

    async fn update_class_status(
        &self,
        name: &str,
        status: GatewayClassStatus,
    ) -> Result<(), StoreError>;

    async fn update_gateway_status(
        &self,
        key: &ResourceKey,
        status: GatewayStatus,
    ) -> Result<(), StoreError>;

    async fn update_route_status(
        &self,
        key: &ResourceKey,
        status: HttpRouteStatus,
    ) -> Result<(), StoreError>;

    /// 지정한 Service의 프로비저닝된 로드밸런서 주소를 조회합니다.
    /// 서비스가 없거나 주소가 아직 없으면 `Ok(None)`입니다.
    async fn service_ingress_address(
        &self,
        key: &ResourceKey,
    ) -> Result<Option<String>, StoreError>;
}
