//! 요청 매칭과 백엔드 해석을 담당하는 라우팅 핵심 모듈입니다.

mod error;
mod matcher;
mod request;
mod router;
mod table;

pub use error::RoutingError;
pub use matcher::{HeaderMatch, HeaderMatchKind, MatchPrecedence, PathMatch, PathMatchKind, RouteMatch};
pub use request::{normalize_host, RequestInfo};
pub use router::SharedRouteTable;
pub use table::{Backend, CompiledRoute, RouteRule, RouteTable};
