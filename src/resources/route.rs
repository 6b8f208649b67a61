use serde::{Deserialize, Serialize};

use crate::resources::condition::{Condition, CONDITION_ACCEPTED};
use crate::resources::ObjectMeta;

/// 네임스페이스 범위의 HTTPRoute 리소스입니다.
///
/// 라우팅 규칙의 선언이며, 라우트 리컨실러가 검증을 거쳐 수락한 경우에만
/// 라우팅 테이블로 컴파일됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpRoute {
    pub metadata: ObjectMeta,
    pub spec: HttpRouteSpec,

    #[serde(default)]
    pub status: HttpRouteStatus,
}

impl HttpRoute {
    /// 어느 한 부모에게라도 수락된 라우트인지 검사합니다.
    pub fn is_accepted(&self) -> bool {
        self.status.parents.iter()
            .any(|parent| parent.conditions.iter().any(|c| c.is_true(CONDITION_ACCEPTED)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRouteSpec {
    /// 이 라우트를 붙일 부모 Gateway 목록
    #[serde(default)]
    pub parent_refs: Vec<ParentRef>,

    /// 라우트가 적용될 호스트 이름 목록. 비어 있으면 모든 호스트에 적용됩니다.
    #[serde(default)]
    pub hostnames: Vec<String>,

    #[serde(default)]
    pub rules: Vec<HttpRouteRule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentRef {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRouteRule {
    /// 매칭 절 목록. 비어 있으면 모든 요청과 매칭됩니다.
    #[serde(default)]
    pub matches: Vec<HttpRouteMatch>,

    #[serde(default)]
    pub backend_refs: Vec<BackendRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HttpRouteMatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<HttpPathMatch>,

    #[serde(default)]
    pub headers: Vec<HttpHeaderMatch>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpPathMatch {
    /// 생략하면 PathPrefix로 취급합니다.
    #[serde(rename = "type", default)]
    pub match_type: PathMatchType,

    /// 생략하면 `/`로 취급합니다.
    #[serde(default = "default_path_value")]
    pub value: String,
}

fn default_path_value() -> String {
    "/".to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathMatchType {
    Exact,
    #[default]
    PathPrefix,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpHeaderMatch {
    /// 생략하면 Exact로 취급합니다.
    #[serde(rename = "type", default)]
    pub match_type: HeaderMatchType,

    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeaderMatchType {
    #[default]
    Exact,
    RegularExpression,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendRef {
    /// 생략하면 Service로 취급합니다.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HttpRouteStatus {
    /// 부모별 수락 상태 목록
    #[serde(default)]
    pub parents: Vec<RouteParentStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteParentStatus {
    pub parent_ref: ParentRef,

    #[serde(default)]
    pub conditions: Vec<Condition>,
}
