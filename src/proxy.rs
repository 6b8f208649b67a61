use hyper::{Request, Response, StatusCode, Uri};
use hyper::body::{Bytes, Incoming};
use http_body_util::{BodyExt, Full};
use hyper_util::client::legacy;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use uuid::Uuid;
use std::time::Instant;
use tracing::info;

use crate::logging::{log_request, RequestLog};
use crate::routing::Backend;

/// 백엔드로 요청을 전달하는 HTTP 클라이언트입니다.
#[derive(Clone)]
pub struct ProxyClient {
    client: legacy::Client<HttpConnector, Incoming>,
}

impl ProxyClient {
    pub fn new() -> Self {
        let connector = HttpConnector::new();
        let client = legacy::Client::builder(TokioExecutor::new())
            .build::<_, Incoming>(connector);

        Self { client }
    }
}

impl Default for ProxyClient {
    fn default() -> Self {
        Self::new()
    }
}

/// 요청을 백엔드로 전달하고 버퍼링된 응답을 돌려줍니다.
///
/// 업스트림 오류는 502, 요청 구성 오류는 400으로 바꾸고
/// 항상 접근 로그 한 줄을 남깁니다.
pub async fn forward(
    client: &ProxyClient,
    backend: &Backend,
    req: Request<Incoming>,
) -> Response<Full<Bytes>> {
    let request_id = Uuid::new_v4().to_string();
    let start_time = Instant::now();
    let mut log = RequestLog::new(request_id);
    log.with_request(&req);
    log.with_backend(backend);

    info!(backend = %backend, "백엔드로 요청 전달");

    let response = match build_proxied_request(backend, req) {
        Ok(proxied_req) => {
            match client.client.request(proxied_req).await {
                Ok(res) => {
                    let (parts, body) = res.into_parts();
                    match body.collect().await {
                        Ok(collected) => {
                            Response::from_parts(parts, Full::new(collected.to_bytes()))
                        }
                        Err(e) => {
                            log.with_error(&e);
                            build_error_response(
                                StatusCode::BAD_GATEWAY,
                                format!("Failed to collect response body: {}", e),
                            )
                        }
                    }
                }
                Err(e) => {
                    log.with_error(&e);
                    build_error_response(
                        StatusCode::BAD_GATEWAY,
                        format!("Backend request failed: {}", e),
                    )
                }
            }
        }
        Err(e) => {
            log.with_error(&e);
            build_error_response(
                StatusCode::BAD_REQUEST,
                format!("Failed to build request: {}", e),
            )
        }
    };

    log.with_response(response.status());
    log.duration_ms = start_time.elapsed().as_millis() as u64;
    log_request(&log);

    response
}

// 메서드, 헤더, 쿼리 문자열은 그대로 두고 대상 URI만 백엔드로 바꾼다.
// Host 헤더도 원본을 유지한다 (백엔드 가상 호스트 라우팅용).
fn build_proxied_request(
    backend: &Backend,
    req: Request<Incoming>,
) -> Result<Request<Incoming>, hyper::http::Error> {
    let path_and_query = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    let uri: Uri = format!("http://{}{}", backend, path_and_query).parse()?;

    let (mut parts, body) = req.into_parts();
    parts.uri = uri;
    Ok(Request::from_parts(parts, body))
}

fn build_error_response(status: StatusCode, message: String) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .body(Full::new(Bytes::from(message)))
        .unwrap()
}
