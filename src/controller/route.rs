use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::controller::{Reconcile, ReconcileOutcome};
use crate::resources::{
    HeaderMatchType, HttpRoute, HttpRouteMatch, HttpRouteRule, HttpRouteStatus, PathMatchType,
    ResourceKey, ResourceStore, RouteParentStatus, StoreError, CONDITION_ACCEPTED,
    CONDITION_RESOLVED_REFS, REASON_ACCEPTED, REASON_RESOLVED_REFS, REASON_UNSUPPORTED_VALUE,
};
use crate::resources::{Condition, ConditionStatus};
use crate::routing::{
    Backend, CompiledRoute, HeaderMatch, PathMatch, RouteMatch, RouteRule, RouteTable,
    RoutingError, SharedRouteTable,
};

/// HTTPRoute 검증, 상태 보고, 라우팅 테이블 재구축을 담당하는 리컨실러입니다.
///
/// 검증을 통과한 라우트만 수락되고, 수락된 라우트 전체가 새 테이블로
/// 컴파일되어 통째로 교체됩니다. 검증에 실패한 이벤트는 상태만 기록하고
/// 테이블은 그대로 둡니다.
pub struct RouteReconciler {
    store: Arc<dyn ResourceStore>,
    router: Arc<SharedRouteTable>,
    cluster_domain: String,
}

impl RouteReconciler {
    pub fn new(
        store: Arc<dyn ResourceStore>,
        router: Arc<SharedRouteTable>,
        cluster_domain: impl Into<String>,
    ) -> Self {
        Self {
            store,
            router,
            cluster_domain: cluster_domain.into(),
        }
    }

    /// 라우트의 모든 정규식 헤더 매칭을 컴파일해 봅니다.
    /// 하나라도 실패하면 리소스 전체가 무효입니다.
    fn validate_route(route: &HttpRoute) -> Result<(), RoutingError> {
        for rule in &route.spec.rules {
            for route_match in &rule.matches {
                for header in &route_match.headers {
                    if header.match_type == HeaderMatchType::RegularExpression {
                        HeaderMatch::pattern(header.name.as_str(), header.value.as_str())?;
                    }
                }
            }
        }
        Ok(())
    }

    /// 모든 parentRef에 같은 내용의 수락 상태를 만듭니다.
    fn attachment_status(
        route: &HttpRoute,
        validation: &Result<(), RoutingError>,
    ) -> HttpRouteStatus {
        let generation = route.metadata.generation;
        let accepted = match validation {
            Ok(()) => Condition::new(
                CONDITION_ACCEPTED,
                ConditionStatus::True,
                REASON_ACCEPTED,
                "Route accepted",
                generation,
            ),
            Err(error) => Condition::new(
                CONDITION_ACCEPTED,
                ConditionStatus::False,
                REASON_UNSUPPORTED_VALUE,
                &format!("invalid route: {}", error),
                generation,
            ),
        };
        let resolved = Condition::new(
            CONDITION_RESOLVED_REFS,
            ConditionStatus::True,
            REASON_RESOLVED_REFS,
            "All references resolved",
            generation,
        );

        HttpRouteStatus {
            parents: route.spec.parent_refs.iter()
                .map(|parent| RouteParentStatus {
                    parent_ref: parent.clone(),
                    conditions: vec![accepted.clone(), resolved.clone()],
                })
                .collect(),
        }
    }

    /// 수락된 라우트 전체를 컴파일해 새 테이블로 교체합니다.
    async fn rebuild_table(&self) -> Result<(), StoreError> {
        let routes = self.store.list_http_routes().await?;
        let compiled: Vec<CompiledRoute> = routes.iter()
            .filter(|route| route.is_accepted())
            .map(|route| self.compile_route(route))
            .collect();

        let table = RouteTable::from_routes(compiled);
        let count = table.len();
        self.router.replace(table);
        info!(routes = count, "라우팅 테이블 갱신");
        Ok(())
    }

    /// 수락된 라우트 하나를 테이블 항목으로 컴파일합니다.
    ///
    /// 수락 시점에 이미 검증된 라우트이므로, 지금 컴파일에 실패하는 절은
    /// 경고만 남기고 건너뜁니다.
    fn compile_route(&self, route: &HttpRoute) -> CompiledRoute {
        let namespace = route.metadata.namespace.clone().unwrap_or_default();

        let mut rules = Vec::new();
        for rule in &route.spec.rules {
            let backend = match self.resolve_backend(rule, &namespace) {
                Some(backend) => backend,
                None => {
                    warn!(
                        route = %route.metadata.key(),
                        "규칙에 사용할 수 있는 backendRef가 없어 제외"
                    );
                    continue;
                }
            };

            let mut matches = Vec::new();
            for route_match in &rule.matches {
                match compile_match(route_match) {
                    Ok(compiled_match) => matches.push(compiled_match),
                    Err(error) => {
                        warn!(
                            route = %route.metadata.key(),
                            error = %error,
                            "매칭 절 컴파일 실패, 건너뜀"
                        );
                    }
                }
            }

            rules.push(RouteRule { matches, backend });
        }

        CompiledRoute {
            namespace,
            name: route.metadata.name.clone(),
            hostnames: route.spec.hostnames.clone(),
            rules,
        }
    }

    /// kind가 Service(또는 생략)이고 포트가 있는 첫 backendRef를
    /// 클러스터 내부 DNS 주소로 바꿉니다.
    fn resolve_backend(&self, rule: &HttpRouteRule, namespace: &str) -> Option<Backend> {
        rule.backend_refs.iter().find_map(|backend_ref| {
            let service_kind = backend_ref.kind.as_deref()
                .map(|kind| kind == "Service")
                .unwrap_or(true);
            if !service_kind {
                return None;
            }
            let port = backend_ref.port?;
            let host = format!("{}.{}.{}", backend_ref.name, namespace, self.cluster_domain);
            Some(Backend::new(host, port))
        })
    }
}

fn compile_match(route_match: &HttpRouteMatch) -> Result<RouteMatch, RoutingError> {
    let path = route_match.path.as_ref().map(|path| match path.match_type {
        PathMatchType::Exact => PathMatch::exact(path.value.as_str()),
        PathMatchType::PathPrefix => PathMatch::prefix(path.value.as_str()),
    });

    let mut headers = Vec::new();
    for header in &route_match.headers {
        let compiled = match header.match_type {
            HeaderMatchType::Exact => HeaderMatch::exact(header.name.as_str(), header.value.as_str()),
            HeaderMatchType::RegularExpression => {
                HeaderMatch::pattern(header.name.as_str(), header.value.as_str())?
            }
        };
        headers.push(compiled);
    }

    Ok(RouteMatch { path, headers })
}

#[async_trait]
impl Reconcile for RouteReconciler {
    async fn reconcile(&self, key: &ResourceKey) -> Result<ReconcileOutcome, StoreError> {
        let route = match self.store.get_http_route(key).await? {
            Some(route) => route,
            None => {
                // 삭제된 라우트가 테이블에서도 빠지도록 재구축만 수행
                debug!(route = %key, "HTTPRoute 삭제 감지, 테이블 재구축");
                self.rebuild_table().await?;
                return Ok(ReconcileOutcome::Done);
            }
        };

        let validation = Self::validate_route(&route);
        let status = Self::attachment_status(&route, &validation);
        self.store.update_route_status(key, status).await?;

        if let Err(error) = validation {
            warn!(route = %key, error = %error, "HTTPRoute 검증 실패, 수락 거부");
            // 무효 라우트 이벤트에서는 테이블을 다시 만들지 않음
            return Ok(ReconcileOutcome::Done);
        }

        self.rebuild_table().await?;
        Ok(ReconcileOutcome::Done)
    }
}
