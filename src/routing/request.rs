use std::collections::HashMap;

use hyper::header::HOST;
use hyper::Request;

use crate::routing::error::RoutingError;

/// HTTP 요청에서 라우팅 판단에 필요한 사실만 추출한 구조체입니다.
///
/// 호스트는 포트를 제거하고 소문자로 정규화하며, 헤더 이름도 소문자로
/// 저장되므로 매칭 단계에서는 단순 비교만 수행합니다. 같은 이름의 헤더가
/// 여러 번 나타나면 첫 번째 값을 사용합니다.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestInfo {
    pub host: String,
    pub path: String,
    pub headers: HashMap<String, String>,
}

impl RequestInfo {
    pub fn new(host: impl Into<String>, path: impl Into<String>) -> Self {
        RequestInfo {
            host: host.into(),
            path: path.into(),
            headers: HashMap::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.entry(name.to_ascii_lowercase())
            .or_insert_with(|| value.to_string());
        self
    }

    /// hyper 요청에서 호스트, 경로, 헤더를 추출합니다.
    ///
    /// Host 헤더가 없거나 비어 있으면 에러를 반환합니다.
    pub fn from_request<B>(req: &Request<B>) -> Result<Self, RoutingError> {
        let host_value = req.headers()
            .get(HOST)
            .ok_or(RoutingError::MissingHost)?
            .to_str()
            .map_err(|_| RoutingError::InvalidHost {
                host: String::new(),
                reason: "ASCII가 아닌 Host 헤더 값".to_string(),
            })?;
        let host = normalize_host(host_value)?;

        let mut headers = HashMap::new();
        for (name, value) in req.headers() {
            if let Ok(value) = value.to_str() {
                headers.entry(name.as_str().to_string())
                    .or_insert_with(|| value.to_string());
            }
        }

        Ok(RequestInfo {
            host,
            path: req.uri().path().to_string(),
            headers,
        })
    }

    /// 헤더 이름으로 값을 조회합니다. 이름 비교는 대소문자를 구분하지 않습니다.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }
}

/// Host 헤더 값을 매칭용 호스트 이름으로 정규화합니다.
///
/// 포트 부분은 제거하고 소문자로 변환합니다.
///
/// # 예제
///
/// ```
/// use gateway_api_proxy::routing::normalize_host;
///
/// assert_eq!(normalize_host("Example.COM:8080").unwrap(), "example.com");
/// assert_eq!(normalize_host("localhost").unwrap(), "localhost");
/// ```
pub fn normalize_host(value: &str) -> Result<String, RoutingError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RoutingError::MissingHost);
    }

    let host = if let Some(rest) = trimmed.strip_prefix('[') {
        // IPv6 리터럴은 대괄호 안쪽이 호스트
        match rest.split_once(']') {
            Some((inner, _)) if !inner.is_empty() => inner,
            _ => return Err(RoutingError::InvalidHost {
                host: trimmed.to_string(),
                reason: "잘못된 IPv6 호스트 형식".to_string(),
            }),
        }
    } else {
        match trimmed.split_once(':') {
            Some((name, port)) => {
                if name.is_empty() || port.parse::<u16>().is_err() {
                    return Err(RoutingError::InvalidHost {
                        host: trimmed.to_string(),
                        reason: "유효하지 않은 포트".to_string(),
                    });
                }
                name
            }
            None => trimmed,
        }
    };

    Ok(host.to_ascii_lowercase())
}
