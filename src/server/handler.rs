use std::sync::Arc;
use hyper::{Request, Response, StatusCode};
use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use tracing::{error, warn};

use crate::proxy::{self, ProxyClient};
use crate::routing::{RequestInfo, RoutingError, SharedRouteTable};

pub struct RequestHandler {
    router: Arc<SharedRouteTable>,
    client: ProxyClient,
}

impl RequestHandler {
    pub fn new(router: Arc<SharedRouteTable>) -> Self {
        Self {
            router,
            client: ProxyClient::new(),
        }
    }

    pub async fn handle_request(
        &self,
        req: Request<Incoming>,
    ) -> Result<Response<Full<Bytes>>, std::convert::Infallible> {
        // 1. 요청 파싱 (호스트 헤더 필수)
        let info = match RequestInfo::from_request(&req) {
            Ok(info) => info,
            Err(e) => {
                warn!(error = %e, "요청 파싱 실패");
                return Ok(self.create_routing_error_response(e));
            }
        };

        // 2. 현재 라우팅 테이블 스냅샷에서 백엔드 해석.
        //    같은 요청 안에서는 테이블 교체의 영향을 받지 않는다.
        let table = self.router.snapshot();
        let backend = match table.resolve(&info) {
            Some(backend) => backend,
            None => {
                let e = RoutingError::RouteNotFound {
                    host: info.host.clone(),
                    path: info.path.clone(),
                };
                warn!(error = %e, "매칭되는 라우트 없음");
                return Ok(self.create_routing_error_response(e));
            }
        };

        // 3. 프록시 전달
        Ok(proxy::forward(&self.client, backend, req).await)
    }

    fn create_routing_error_response(&self, error: RoutingError) -> Response<Full<Bytes>> {
        let status = match error {
            RoutingError::MissingHost
            | RoutingError::InvalidHost { .. }
            | RoutingError::InvalidHeaderPattern { .. } => StatusCode::BAD_REQUEST,
            RoutingError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
        };

        Response::builder()
            .status(status)
            .body(Full::new(Bytes::from(format!("Error: {}", error))))
            .unwrap_or_else(|e| {
                error!(error = %e, "에러 응답 생성 실패");
                Response::new(Full::new(Bytes::from("Internal Server Error")))
            })
    }

    pub async fn handle_connection<I>(&self, io: I) -> std::result::Result<(), Box<dyn std::error::Error>>
    where
        I: hyper::rt::Read + hyper::rt::Write + Send + Unpin + 'static,
    {
        http1::Builder::new()
            .serve_connection(
                io,
                service_fn(|req| self.handle_request(req)),
            )
            .await
            .map_err(|e| e.into())
    }
}
