use regex_lite as regex;
use crate::routing::error::RoutingError;
use crate::routing::request::RequestInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathMatchKind {
    Exact,
    Prefix,
}

/// 컴파일된 경로 매칭 조건입니다.
#[derive(Debug, Clone, PartialEq)]
pub struct PathMatch {
    pub kind: PathMatchKind,
    pub value: String,
}

impl PathMatch {
    pub fn exact(value: impl Into<String>) -> Self {
        PathMatch { kind: PathMatchKind::Exact, value: value.into() }
    }

    pub fn prefix(value: impl Into<String>) -> Self {
        PathMatch { kind: PathMatchKind::Prefix, value: value.into() }
    }

    pub fn matches(&self, path: &str) -> bool {
        match self.kind {
            PathMatchKind::Exact => self.value == path,
            PathMatchKind::Prefix => {
                // 설정 값의 trailing slash는 무시하고 세그먼트 경계에서만 매칭
                let prefix = if self.value.len() > 1 {
                    self.value.trim_end_matches('/')
                } else {
                    self.value.as_str()
                };
                if prefix == "/" {
                    return true;
                }
                path == prefix
                    || (path.starts_with(prefix)
                        && path.as_bytes().get(prefix.len()) == Some(&b'/'))
            }
        }
    }

    fn kind_weight(&self) -> u8 {
        match self.kind {
            PathMatchKind::Exact => 3,
            PathMatchKind::Prefix => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderMatchKind {
    Exact,
    Regex,
}

/// 컴파일된 헤더 매칭 조건입니다. Regex 종류는 생성 시점에 패턴을 컴파일합니다.
#[derive(Debug, Clone)]
pub struct HeaderMatch {
    pub kind: HeaderMatchKind,
    pub name: String,
    pub value: String,
    regex: Option<regex::Regex>,
}

impl HeaderMatch {
    pub fn exact(name: impl Into<String>, value: impl Into<String>) -> Self {
        HeaderMatch {
            kind: HeaderMatchKind::Exact,
            name: name.into(),
            value: value.into(),
            regex: None,
        }
    }

    pub fn pattern(name: impl Into<String>, pattern: impl Into<String>) -> Result<Self, RoutingError> {
        let name = name.into();
        let pattern = pattern.into();
        let re = regex::Regex::new(&pattern)
            .map_err(|e| RoutingError::InvalidHeaderPattern {
                header: name.clone(),
                pattern: pattern.clone(),
                reason: e.to_string(),
            })?;
        Ok(HeaderMatch {
            kind: HeaderMatchKind::Regex,
            name,
            value: pattern,
            regex: Some(re),
        })
    }

    /// 요청 헤더 맵에서 이름이 일치하는 헤더를 찾아 값을 검사합니다.
    /// 헤더 이름 비교는 대소문자를 구분하지 않습니다.
    pub fn matches(&self, request: &RequestInfo) -> bool {
        let actual = match request.header(&self.name) {
            Some(value) => value,
            None => return false,
        };
        match self.kind {
            HeaderMatchKind::Exact => actual == self.value,
            HeaderMatchKind::Regex => self.regex.as_ref()
                .map(|r| r.is_match(actual))
                .unwrap_or(false),
        }
    }
}

impl PartialEq for HeaderMatch {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.name == other.name && self.value == other.value
    }
}

/// 매칭 우선순위 키입니다. 필드 순서대로 사전식 비교되므로
/// 경로 종류, 경로 길이, 헤더 개수 순으로 우위가 결정됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MatchPrecedence {
    path_kind: u8,
    path_len: usize,
    header_count: usize,
}

impl MatchPrecedence {
    /// 조건이 전혀 없는 절에 해당하는 최저 우선순위입니다.
    pub fn universal() -> Self {
        MatchPrecedence { path_kind: 1, path_len: 0, header_count: 0 }
    }
}

/// 하나의 매칭 절입니다. 경로 조건과 헤더 조건을 모두 만족해야 매칭됩니다.
/// 조건이 하나도 없는 절은 모든 요청과 매칭됩니다.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch {
    pub path: Option<PathMatch>,
    pub headers: Vec<HeaderMatch>,
}

impl RouteMatch {
    pub fn matches(&self, request: &RequestInfo) -> bool {
        if let Some(path) = &self.path {
            if !path.matches(&request.path) {
                return false;
            }
        }
        self.headers.iter().all(|h| h.matches(request))
    }

    pub fn precedence(&self) -> MatchPrecedence {
        MatchPrecedence {
            path_kind: self.path.as_ref().map(|p| p.kind_weight()).unwrap_or(1),
            path_len: self.path.as_ref().map(|p| p.value.len()).unwrap_or(0),
            header_count: self.headers.len(),
        }
    }
}
