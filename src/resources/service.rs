use serde::{Deserialize, Serialize};

use crate::resources::ObjectMeta;

/// 로드밸런서 주소 조회에 필요한 최소한의 Service 리소스입니다.
///
/// 게이트웨이 리컨실러가 프록시 자신의 외부 주소를 알아내기 위해서만
/// 사용하므로 spec은 싣지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub metadata: ObjectMeta,

    #[serde(default)]
    pub status: ServiceStatus,
}

impl Service {
    /// 프로비저닝된 첫 번째 로드밸런서 IP를 반환합니다.
    pub fn ingress_ip(&self) -> Option<&str> {
        self.status.load_balancer.ingress.iter().find_map(|i| i.ip.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatus {
    #[serde(default)]
    pub load_balancer: LoadBalancerStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerStatus {
    #[serde(default)]
    pub ingress: Vec<LoadBalancerIngress>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerIngress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
}
