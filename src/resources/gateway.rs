use serde::{Deserialize, Serialize};

use crate::resources::condition::Condition;
use crate::resources::ObjectMeta;

/// 클러스터 범위의 GatewayClass 리소스입니다.
///
/// `spec.controllerName`이 이 프로세스의 컨트롤러 이름과 일치하는 클래스만
/// 이 컨트롤러가 관리합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayClass {
    pub metadata: ObjectMeta,
    pub spec: GatewayClassSpec,

    #[serde(default)]
    pub status: GatewayClassStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayClassSpec {
    /// 이 클래스를 관리할 컨트롤러의 식별자
    pub controller_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GatewayClassStatus {
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

/// 네임스페이스 범위의 Gateway 리소스입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gateway {
    pub metadata: ObjectMeta,
    pub spec: GatewaySpec,

    #[serde(default)]
    pub status: GatewayStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewaySpec {
    /// 소속 GatewayClass의 이름
    pub gateway_class_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GatewayStatus {
    #[serde(default)]
    pub conditions: Vec<Condition>,

    /// 게이트웨이에 할당된 주소 목록
    #[serde(default)]
    pub addresses: Vec<GatewayAddress>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayAddress {
    #[serde(rename = "type")]
    pub address_type: String,
    pub value: String,
}

impl GatewayAddress {
    /// IP 주소 타입의 주소를 만듭니다.
    pub fn ip(value: impl Into<String>) -> Self {
        GatewayAddress {
            address_type: "IPAddress".to_string(),
            value: value.into(),
        }
    }
}
