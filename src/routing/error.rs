use std::fmt;

/// 라우팅 관련 에러를 표현하는 열거형입니다.
#[derive(Debug, PartialEq)]
pub enum RoutingError {
    /// 유효하지 않은 호스트 이름
    InvalidHost {
        host: String,
        reason: String,
    },
    /// Host 헤더 누락
    MissingHost,
    /// 잘못된 헤더 매칭 패턴 (정규식 컴파일 실패)
    InvalidHeaderPattern {
        header: String,
        pattern: String,
        reason: String,
    },
    /// 요청과 일치하는 라우트 없음
    RouteNotFound {
        host: String,
        path: String,
    },
}

impl fmt::Display for RoutingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutingError::InvalidHost { host, reason } =>
                write!(f, "유효하지 않은 호스트 {}: {}", host, reason),
            RoutingError::MissingHost =>
                write!(f, "Host 헤더가 누락됨"),
            RoutingError::InvalidHeaderPattern { header, pattern, reason } =>
                write!(f, "{} 헤더의 잘못된 매칭 패턴 {}: {}", header, pattern, reason),
            RoutingError::RouteNotFound { host, path } =>
                write!(f, "호스트 {}와 경로 {}에 대한 라우트 없음", host, path),
        }
    }
}

impl std::error::Error for RoutingError {}
