//! Gateway API 리소스 모델과 리소스 스토어 추상화를 제공하는 모듈입니다.

use serde::{Deserialize, Serialize};

mod condition;
mod gateway;
mod memory;
mod route;
mod service;
mod store;
mod validator;
mod watcher;

pub use condition::{
    Condition, ConditionStatus, CONDITION_ACCEPTED, CONDITION_PROGRAMMED,
    CONDITION_RESOLVED_REFS, REASON_ACCEPTED, REASON_PROGRAMMED, REASON_RESOLVED_REFS,
    REASON_UNSUPPORTED_VALUE,
};
pub use gateway::{
    Gateway, GatewayAddress, GatewayClass, GatewayClassSpec, GatewayClassStatus, GatewaySpec,
    GatewayStatus,
};
pub use memory::{Manifest, MemoryStore};
pub use route::{
    BackendRef, HeaderMatchType, HttpHeaderMatch, HttpPathMatch, HttpRoute, HttpRouteMatch,
    HttpRouteRule, HttpRouteSpec, HttpRouteStatus, ParentRef, PathMatchType, RouteParentStatus,
};
pub use service::{LoadBalancerIngress, LoadBalancerStatus, Service, ServiceStatus};
pub use store::{ResourceEvent, ResourceKey, ResourceKind, ResourceStore, StoreError};
pub use watcher::{ManifestEvent, ManifestWatcher};

/// 리소스 메타데이터입니다. 클러스터 범위 리소스는 네임스페이스를 생략합니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectMeta {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// spec이 바뀔 때마다 증가하는 세대 번호
    #[serde(default)]
    pub generation: i64,
}

impl ObjectMeta {
    pub fn key(&self) -> ResourceKey {
        ResourceKey {
            namespace: self.namespace.clone(),
            name: self.name.clone(),
        }
    }
}
