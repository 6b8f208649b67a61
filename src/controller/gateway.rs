use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::controller::{Reconcile, ReconcileOutcome};
use crate::resources::{
    Condition, ConditionStatus, GatewayAddress, GatewayStatus, ResourceKey, ResourceStore,
    StoreError, CONDITION_ACCEPTED, CONDITION_PROGRAMMED, REASON_ACCEPTED, REASON_PROGRAMMED,
};

/// Gateway 프로그래밍을 담당하는 리컨실러입니다.
///
/// 이 컨트롤러가 관리하는 클래스에 속한 게이트웨이만 다루며, 프록시의
/// 인그레스 Service에 로드밸런서 주소가 잡힌 다음에야 Programmed와
/// Accepted를 기록합니다. 주소가 아직 없으면 상태를 쓰지 않고 재큐합니다.
pub struct GatewayReconciler {
    store: Arc<dyn ResourceStore>,
    controller_name: String,
    ingress_service: ResourceKey,
}

impl GatewayReconciler {
    pub fn new(
        store: Arc<dyn ResourceStore>,
        controller_name: impl Into<String>,
        ingress_service: ResourceKey,
    ) -> Self {
        Self {
            store,
            controller_name: controller_name.into(),
            ingress_service,
        }
    }
}

#[async_trait]
impl Reconcile for GatewayReconciler {
    async fn reconcile(&self, key: &ResourceKey) -> Result<ReconcileOutcome, StoreError> {
        let gateway = match self.store.get_gateway(key).await? {
            Some(gateway) => gateway,
            None => {
                debug!(gateway = %key, "Gateway가 이미 삭제되어 무시");
                return Ok(ReconcileOutcome::Done);
            }
        };

        let class = match self.store.get_gateway_class(&gateway.spec.gateway_class_name).await? {
            Some(class) => class,
            None => {
                debug!(
                    gateway = %key,
                    class = %gateway.spec.gateway_class_name,
                    "참조된 GatewayClass가 없어 무시"
                );
                return Ok(ReconcileOutcome::Done);
            }
        };

        if class.spec.controller_name != self.controller_name {
            debug!(
                gateway = %key,
                controller = %class.spec.controller_name,
                "다른 컨트롤러가 관리하는 Gateway"
            );
            return Ok(ReconcileOutcome::Done);
        }

        let address = match self.store.service_ingress_address(&self.ingress_service).await? {
            Some(address) => address,
            None => {
                // 주소가 잡힐 때까지 상태를 바꾸지 않고 기다림
                info!(
                    gateway = %key,
                    service = %self.ingress_service,
                    "인그레스 주소가 아직 프로비저닝되지 않아 재큐"
                );
                return Ok(ReconcileOutcome::Requeue);
            }
        };

        let generation = gateway.metadata.generation;
        let status = GatewayStatus {
            conditions: vec![
                Condition::new(
                    CONDITION_PROGRAMMED,
                    ConditionStatus::True,
                    REASON_PROGRAMMED,
                    "Gateway programmed",
                    generation,
                ),
                Condition::new(
                    CONDITION_ACCEPTED,
                    ConditionStatus::True,
                    REASON_ACCEPTED,
                    "Gateway accepted",
                    generation,
                ),
            ],
            addresses: vec![GatewayAddress::ip(address.clone())],
        };
        self.store.update_gateway_status(key, status).await?;

        info!(gateway = %key, address = %address, "Gateway 프로그래밍 완료");
        Ok(ReconcileOutcome::Done)
    }
}
