use std::fmt;

use tracing::debug;

use crate::routing::matcher::{MatchPrecedence, RouteMatch};
use crate::routing::request::RequestInfo;

/// 요청이 전달될 백엔드 서비스입니다.
///
/// 호스트는 클러스터 내부 DNS 이름 전체(`<서비스>.<네임스페이스>.<도메인>`)입니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backend {
    pub host: String,
    pub port: u16,
}

impl Backend {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Backend { host: host.into(), port }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// 매칭 절 목록과 대상 백엔드를 묶은 규칙입니다.
/// 절이 하나도 없는 규칙은 모든 요청과 매칭되는 후보로 취급합니다.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRule {
    pub matches: Vec<RouteMatch>,
    pub backend: Backend,
}

/// 수락된 HTTPRoute 하나를 컴파일한 결과입니다.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledRoute {
    pub namespace: String,
    pub name: String,
    pub hostnames: Vec<String>,
    pub rules: Vec<RouteRule>,
}

impl CompiledRoute {
    /// 호스트 이름 필터를 검사합니다. 목록이 비어 있거나 `*`를 포함하면
    /// 모든 호스트를 허용합니다.
    pub fn matches_host(&self, host: &str) -> bool {
        self.hostnames.is_empty()
            || self.hostnames.iter().any(|h| h == "*" || h == host)
    }
}

/// 컴파일된 라우트 전체를 담는 불변 테이블입니다.
///
/// 생성 이후 변경되지 않으며, 갱신은 새 테이블을 만들어
/// [`SharedRouteTable`](crate::routing::SharedRouteTable)로 통째로 교체하는
/// 방식으로만 이루어집니다.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RouteTable {
    routes: Vec<CompiledRoute>,
}

impl RouteTable {
    pub fn new() -> Self {
        RouteTable { routes: Vec::new() }
    }

    pub fn from_routes(routes: Vec<CompiledRoute>) -> Self {
        RouteTable { routes }
    }

    pub fn routes(&self) -> &[CompiledRoute] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// 요청과 가장 우선순위가 높은 매칭 절을 찾아 해당 백엔드를 반환합니다.
    ///
    /// 호스트 필터를 통과한 라우트의 모든 규칙을 테이블 순서대로 검사하며,
    /// 우선순위가 엄격하게 높은 절만 현재 후보를 대체하므로 동점일 때는
    /// 먼저 나온 절이 유지됩니다.
    pub fn resolve(&self, request: &RequestInfo) -> Option<&Backend> {
        debug!(host = %request.host, path = %request.path, "라우트 해석 시작");

        let mut best: Option<(MatchPrecedence, &Backend)> = None;
        for route in &self.routes {
            if !route.matches_host(&request.host) {
                continue;
            }
            for rule in &route.rules {
                if rule.matches.is_empty() {
                    // 조건 없는 규칙은 다른 후보가 없을 때만 선택
                    if best.is_none() {
                        best = Some((MatchPrecedence::universal(), &rule.backend));
                    }
                    continue;
                }
                for clause in &rule.matches {
                    if !clause.matches(request) {
                        continue;
                    }
                    let precedence = clause.precedence();
                    let better = match &best {
                        Some((current, _)) => precedence > *current,
                        None => true,
                    };
                    if better {
                        best = Some((precedence, &rule.backend));
                    }
                }
            }
        }

        best.map(|(_, backend)| backend)
    }
}
