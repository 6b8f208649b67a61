use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::{mpsc, RwLock};
use tracing::{debug, info, warn};

use crate::resources::gateway::{Gateway, GatewayClass, GatewayClassStatus, GatewayStatus};
use crate::resources::route::{HttpRoute, HttpRouteStatus};
use crate::resources::service::Service;
use crate::resources::store::{
    ResourceEvent, ResourceKey, ResourceKind, ResourceStore, StoreError,
};
use crate::resources::validator::ManifestValidator;

/// 매니페스트 파일에 담길 수 있는 리소스입니다. `kind` 필드로 구분합니다.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind")]
pub enum Manifest {
    GatewayClass(GatewayClass),
    Gateway(Gateway),
    #[serde(rename = "HTTPRoute")]
    HttpRoute(HttpRoute),
    Service(Service),
}

#[derive(Default)]
struct StoreState {
    classes: HashMap<String, GatewayClass>,
    gateways: HashMap<ResourceKey, Gateway>,
    routes: HashMap<ResourceKey, HttpRoute>,
    services: HashMap<ResourceKey, Service>,
}

impl StoreState {
    fn insert(&mut self, manifest: Manifest) {
        match manifest {
            Manifest::GatewayClass(class) => {
                self.classes.insert(class.metadata.name.clone(), class);
            }
            Manifest::Gateway(gateway) => {
                self.gateways.insert(gateway.metadata.key(), gateway);
            }
            Manifest::HttpRoute(route) => {
                self.routes.insert(route.metadata.key(), route);
            }
            Manifest::Service(service) => {
                self.services.insert(service.metadata.key(), service);
            }
        }
    }

    fn upsert_class(&mut self, mut class: GatewayClass) -> Option<ResourceEvent> {
        let name = class.metadata.name.clone();
        if let Some(old) = self.classes.get(&name) {
            if old.metadata == class.metadata && old.spec == class.spec {
                return None;
            }
            // spec 변경 시에도 기록된 상태는 보존
            class.status = old.status.clone();
        }
        self.classes.insert(name.clone(), class);
        Some(ResourceEvent {
            kind: ResourceKind::GatewayClass,
            key: ResourceKey::cluster(name),
        })
    }

    fn upsert_gateway(&mut self, mut gateway: Gateway) -> Option<ResourceEvent> {
        let key = gateway.metadata.key();
        if let Some(old) = self.gateways.get(&key) {
            if old.metadata == gateway.metadata && old.spec == gateway.spec {
                return None;
            }
            gateway.status = old.status.clone();
        }
        self.gateways.insert(key.clone(), gateway);
        Some(ResourceEvent { kind: ResourceKind::Gateway, key })
    }

    fn upsert_route(&mut self, mut route: HttpRoute) -> Option<ResourceEvent> {
        let key = route.metadata.key();
        if let Some(old) = self.routes.get(&key) {
            if old.metadata == route.metadata && old.spec == route.spec {
                return None;
            }
            route.status = old.status.clone();
        }
        self.routes.insert(key.clone(), route);
        Some(ResourceEvent { kind: ResourceKind::HttpRoute, key })
    }
}

/// 매니페스트 파일로 채워지는 프로세스 내장 리소스 스토어입니다.
///
/// spec 변경과 리소스 추가/제거는 구독자에게 이벤트로 알리고, 상태 쓰기는
/// 이벤트를 내지 않습니다. 상태 쓰기가 다시 리컨실을 깨우면 전이 시각 탓에
/// 루프가 끝나지 않기 때문입니다.
pub struct MemoryStore {
    state: RwLock<StoreState>,
    events: RwLock<Option<mpsc::Sender<ResourceEvent>>>,
    validator: ManifestValidator,
}

impl MemoryStore {
    pub fn new() -> Result<Self, StoreError> {
        Ok(MemoryStore {
            state: RwLock::new(StoreState::default()),
            events: RwLock::new(None),
            validator: ManifestValidator::new()?,
        })
    }

    /// 이벤트 수신자를 등록합니다.
    ///
    /// 등록 시점에 이미 저장돼 있던 리소스들의 이벤트를 먼저 흘려보내므로
    /// 수신 측은 초기 동기화를 따로 할 필요가 없습니다.
    pub async fn subscribe(&self) -> mpsc::Receiver<ResourceEvent> {
        let (tx, rx) = mpsc::channel(32);

        let initial = {
            let state = self.state.read().await;
            let mut events = Vec::new();
            for name in state.classes.keys() {
                events.push(ResourceEvent {
                    kind: ResourceKind::GatewayClass,
                    key: ResourceKey::cluster(name.clone()),
                });
            }
            for key in state.gateways.keys() {
                events.push(ResourceEvent { kind: ResourceKind::Gateway, key: key.clone() });
            }
            for key in state.routes.keys() {
                events.push(ResourceEvent { kind: ResourceKind::HttpRoute, key: key.clone() });
            }
            events
        };

        *self.events.write().await = Some(tx.clone());

        // 수신자가 소비를 시작하기 전이므로 초기 이벤트는 별도 태스크에서 전송
        tokio::spawn(async move {
            for event in initial {
                if tx.send(event).await.is_err() {
                    break;
                }
            }
        });

        rx
    }

    /// 매니페스트 하나를 적용하고 변경이 있으면 이벤트를 발행합니다.
    pub async fn apply(&self, manifest: Manifest) {
        let event = {
            let mut state = self.state.write().await;
            match manifest {
                Manifest::GatewayClass(class) => state.upsert_class(class),
                Manifest::Gateway(gateway) => state.upsert_gateway(gateway),
                Manifest::HttpRoute(route) => state.upsert_route(route),
                Manifest::Service(service) => {
                    // Service는 주소 조회 전용이라 이벤트를 내지 않음
                    state.services.insert(service.metadata.key(), service);
                    None
                }
            }
        };
        if let Some(event) = event {
            self.notify(vec![event]).await;
        }
    }

    /// 리소스 하나를 제거하고 이벤트를 발행합니다.
    pub async fn remove(&self, kind: ResourceKind, key: &ResourceKey) {
        let removed = {
            let mut state = self.state.write().await;
            match kind {
                ResourceKind::GatewayClass => state.classes.remove(&key.name).is_some(),
                ResourceKind::Gateway => state.gateways.remove(key).is_some(),
                ResourceKind::HttpRoute => state.routes.remove(key).is_some(),
            }
        };
        if removed {
            self.notify(vec![ResourceEvent { kind, key: key.clone() }]).await;
        }
    }

    /// 매니페스트 디렉토리 전체를 다시 읽어 스토어 내용을 맞춥니다.
    ///
    /// 디렉토리에서 사라진 리소스는 제거되고, 새로 등장하거나 spec이 바뀐
    /// 리소스만 이벤트를 냅니다. spec이 그대로면 기록된 상태를 보존합니다.
    pub async fn sync_dir(&self, dir: &Path) -> Result<(), StoreError> {
        let mut entries = tokio::fs::read_dir(dir).await.map_err(|e| StoreError::Io {
            reason: format!("{} 읽기 실패: {}", dir.display(), e),
        })?;

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| StoreError::Io {
            reason: format!("{} 항목 읽기 실패: {}", dir.display(), e),
        })? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
                files.push(path);
            }
        }
        // 파일 이름 순으로 적용해 중복 키의 승자를 고정
        files.sort();

        let mut incoming = StoreState::default();
        for path in &files {
            let text = tokio::fs::read_to_string(path).await.map_err(|e| StoreError::Io {
                reason: format!("{} 읽기 실패: {}", path.display(), e),
            })?;
            let documents = self.validator.validate(&text).map_err(|errors| {
                let detail = errors.iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ");
                StoreError::Invalid { reason: format!("{}: {}", path.display(), detail) }
            })?;
            for document in documents {
                let manifest: Manifest = serde_json::from_value(document)
                    .map_err(|e| StoreError::Invalid {
                        reason: format!("{}: {}", path.display(), e),
                    })?;
                incoming.insert(manifest);
            }
        }

        let events = self.replace_all(incoming).await;
        info!(files = files.len(), events = events.len(), "매니페스트 디렉토리 동기화 완료");
        self.notify(events).await;
        Ok(())
    }

    async fn replace_all(&self, incoming: StoreState) -> Vec<ResourceEvent> {
        let mut state = self.state.write().await;
        let mut events = Vec::new();

        let removed_classes: Vec<String> = state.classes.keys()
            .filter(|name| !incoming.classes.contains_key(*name))
            .cloned()
            .collect();
        for name in removed_classes {
            state.classes.remove(&name);
            events.push(ResourceEvent {
                kind: ResourceKind::GatewayClass,
                key: ResourceKey::cluster(name),
            });
        }

        let removed_gateways: Vec<ResourceKey> = state.gateways.keys()
            .filter(|key| !incoming.gateways.contains_key(*key))
            .cloned()
            .collect();
        for key in removed_gateways {
            state.gateways.remove(&key);
            events.push(ResourceEvent { kind: ResourceKind::Gateway, key });
        }

        let removed_routes: Vec<ResourceKey> = state.routes.keys()
            .filter(|key| !incoming.routes.contains_key(*key))
            .cloned()
            .collect();
        for key in removed_routes {
            state.routes.remove(&key);
            events.push(ResourceEvent { kind: ResourceKind::HttpRoute, key });
        }

        for class in incoming.classes.into_values() {
            events.extend(state.upsert_class(class));
        }
        for gateway in incoming.gateways.into_values() {
            events.extend(state.upsert_gateway(gateway));
        }
        for route in incoming.routes.into_values() {
            events.extend(state.upsert_route(route));
        }
        state.services = incoming.services;

        events
    }

    async fn notify(&self, events: Vec<ResourceEvent>) {
        if events.is_empty() {
            return;
        }
        let sender = self.events.read().await.clone();
        if let Some(tx) = sender {
            for event in events {
                debug!(kind = %event.kind, key = %event.key, "리소스 이벤트 발행");
                if tx.send(event).await.is_err() {
                    warn!("이벤트 수신자가 닫혀 남은 알림을 건너뜀");
                    break;
                }
            }
        }
    }
}

#[async_trait]
impl ResourceStore for MemoryStore {
    async fn get_gateway_class(&self, name: &str) -> Result<Option<GatewayClass>, StoreError> {
        Ok(self.state.read().await.classes.get(name).cloned())
    }

    async fn get_gateway(&self, key: &ResourceKey) -> Result<Option<Gateway>, StoreError> {
        Ok(self.state.read().await.gateways.get(key).cloned())
    }

    async fn get_http_route(&self, key: &ResourceKey) -> Result<Option<HttpRoute>, StoreError> {
        Ok(self.state.read().await.routes.get(key).cloned())
    }

    async fn list_http_routes(&self) -> Result<Vec<HttpRoute>, StoreError> {
        let mut routes: Vec<HttpRoute> =
            self.state.read().await.routes.values().cloned().collect();
        routes.sort_by(|a, b| {
            (&a.metadata.namespace, &a.metadata.name)
                .cmp(&(&b.metadata.namespace, &b.metadata.name))
        });
        Ok(routes)
    }

    async fn update_class_status(
        &self,
        name: &str,
        status: GatewayClassStatus,
    ) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        match state.classes.get_mut(name) {
            Some(class) => {
                class.status = status;
                Ok(())
            }
            None => Err(StoreError::NotFound { kind: "GatewayClass", key: name.to_string() }),
        }
    }

    async fn update_gateway_status(
        &self,
        key: &ResourceKey,
        status: GatewayStatus,
    ) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        match state.gateways.get_mut(key) {
            Some(gateway) => {
                gateway.status = status;
                Ok(())
            }
            None => Err(StoreError::NotFound { kind: "Gateway", key: key.to_string() }),
        }
    }

    async fn update_route_status(
        &self,
        key: &ResourceKey,
        status: HttpRouteStatus,
    ) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        match state.routes.get_mut(key) {
            Some(route) => {
                route.status = status;
                Ok(())
            }
            None => Err(StoreError::NotFound { kind: "HTTPRoute", key: key.to_string() }),
        }
    }

    async fn service_ingress_address(
        &self,
        key: &ResourceKey,
    ) -> Result<Option<String>, StoreError> {
        Ok(self.state.read().await.services.get(key)
            .and_then(|service| service.ingress_ip().map(str::to_string)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route_manifest(namespace: &str, name: &str, hostname: &str) -> serde_json::Value {
        serde_json::json!({
            "apiVersion": "gateway.networking.k8s.io/v1",
            "kind": "HTTPRoute",
            "metadata": {"namespace": namespace, "name": name, "generation": 1},
            "spec": {
                "parentRefs": [{"name": "gw"}],
                "hostnames": [hostname],
                "rules": [{
                    "matches": [{"path": {"type": "PathPrefix", "value": "/"}}],
                    "backendRefs": [{"name": "svc", "port": 80}]
                }]
            }
        })
    }

    #[test]
    fn test_manifest_deserialization() {
        let manifest: Manifest = serde_json::from_value(route_manifest("default", "web", "example.com"))
            .expect("매니페스트 파싱 실패");

        match manifest {
            Manifest::HttpRoute(route) => {
                assert_eq!(route.metadata.name, "web");
                assert_eq!(route.spec.hostnames, vec!["example.com"]);
                assert_eq!(route.spec.rules[0].backend_refs[0].port, Some(80));
            }
            other => panic!("HTTPRoute가 아님: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_subscribe_sends_initial_events() {
        let store = MemoryStore::new().expect("스토어 생성 실패");
        let manifest: Manifest = serde_json::from_value(route_manifest("default", "web", "example.com")).unwrap();
        store.apply(manifest).await;

        let mut rx = store.subscribe().await;
        let event = rx.recv().await.expect("초기 이벤트를 받지 못함");
        assert_eq!(event.kind, ResourceKind::HttpRoute);
        assert_eq!(event.key, ResourceKey::namespaced("default", "web"));
    }

    #[tokio::test]
    async fn test_sync_dir_applies_and_removes() {
        let dir = tempfile::tempdir().expect("임시 디렉토리 생성 실패");
        let store = MemoryStore::new().expect("스토어 생성 실패");

        let path = dir.path().join("routes.json");
        let body = serde_json::json!([
            route_manifest("default", "web", "example.com"),
            route_manifest("default", "api", "api.example.com"),
        ]);
        std::fs::write(&path, serde_json::to_string_pretty(&body).unwrap()).unwrap();

        store.sync_dir(dir.path()).await.expect("동기화 실패");
        assert_eq!(store.list_http_routes().await.unwrap().len(), 2);

        // 파일에서 하나를 제거하면 스토어에서도 제거
        let body = serde_json::json!([route_manifest("default", "web", "example.com")]);
        std::fs::write(&path, serde_json::to_string_pretty(&body).unwrap()).unwrap();

        store.sync_dir(dir.path()).await.expect("재동기화 실패");
        let routes = store.list_http_routes().await.unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].metadata.name, "web");
    }

    #[tokio::test]
    async fn test_sync_dir_rejects_invalid_manifest() {
        let dir = tempfile::tempdir().expect("임시 디렉토리 생성 실패");
        let store = MemoryStore::new().expect("스토어 생성 실패");

        // kind 없는 문서는 스키마 검증에서 걸러짐
        std::fs::write(dir.path().join("bad.json"), r#"{"metadata": {"name": "x"}}"#).unwrap();

        let result = store.sync_dir(dir.path()).await;
        assert!(matches!(result, Err(StoreError::Invalid { .. })), "Invalid 에러가 아님: {:?}", result);
    }

    #[tokio::test]
    async fn test_status_preserved_when_spec_unchanged() {
        let store = MemoryStore::new().expect("스토어 생성 실패");
        let manifest: Manifest = serde_json::from_value(route_manifest("default", "web", "example.com")).unwrap();
        store.apply(manifest.clone()).await;

        let key = ResourceKey::namespaced("default", "web");
        let mut status = HttpRouteStatus::default();
        status.parents.push(crate::resources::route::RouteParentStatus {
            parent_ref: crate::resources::route::ParentRef { name: "gw".to_string() },
            conditions: vec![],
        });
        store.update_route_status(&key, status).await.unwrap();

        // 같은 spec을 다시 적용해도 상태는 남는다
        store.apply(manifest).await;
        let route = store.get_http_route(&key).await.unwrap().expect("라우트가 사라짐");
        assert_eq!(route.status.parents.len(), 1);
    }
}
