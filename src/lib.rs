//! Gateway API Proxy는 Gateway API 리소스로 구성하는 HTTP 리버스 프록시입니다.
//!
//! # 주요 기능
//!
//! - GatewayClass / Gateway / HTTPRoute 리소스 검증과 상태 보고
//! - 수락된 라우트만으로 만드는 불변 라우팅 테이블
//! - 호스트 필터링과 경로/헤더 우선순위 매칭
//! - HTTP/1.1 리버스 프록시 전달
//!
//! # 예제
//!
//! ```
//! use gateway_api_proxy::routing::{
//!     Backend, CompiledRoute, PathMatch, RequestInfo, RouteMatch, RouteRule, RouteTable,
//! };
//!
//! let route = CompiledRoute {
//!     namespace: "default".to_string(),
//!     name: "api-route".to_string(),
//!     hostnames: vec!["example.com".to_string()],
//!     rules: vec![RouteRule {
//!         matches: vec![RouteMatch {
//!             path: Some(PathMatch::prefix("/api")),
//!             headers: Vec::new(),
//!         }],
//!         backend: Backend::new("api.default.svc.cluster.local", 8080),
//!     }],
//! };
//!
//! let table = RouteTable::from_routes(vec![route]);
//!
//! let request = RequestInfo::new("example.com", "/api/users");
//! let backend = table.resolve(&request).unwrap();
//! assert_eq!(backend.to_string(), "api.default.svc.cluster.local:8080");
//! ```
//!
//! # 테이블 교체
//!
//! 라우팅 테이블은 수정하지 않고 새로 만들어 통째로 교체합니다.
//! 진행 중인 요청은 교체 전 스냅샷을 계속 사용합니다.
//!
//! ```
//! use gateway_api_proxy::routing::{CompiledRoute, RouteTable, SharedRouteTable};
//!
//! let shared = SharedRouteTable::new();
//! let before = shared.snapshot();
//!
//! let route = CompiledRoute {
//!     namespace: "default".to_string(),
//!     name: "api-route".to_string(),
//!     hostnames: Vec::new(),
//!     rules: Vec::new(),
//! };
//! shared.replace(RouteTable::from_routes(vec![route]));
//!
//! // 교체 전에 뜬 스냅샷은 영향을 받지 않는다
//! assert!(before.is_empty());
//! assert_eq!(shared.snapshot().len(), 1);
//! ```

pub mod controller;
pub mod logging;
pub mod proxy;
pub mod resources;
pub mod routing;
pub mod server;
pub mod settings;
