use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::controller::{Reconcile, ReconcileOutcome};
use crate::resources::{
    Condition, ConditionStatus, GatewayClassStatus, ResourceKey, ResourceStore, StoreError,
    CONDITION_ACCEPTED, REASON_ACCEPTED,
};

/// GatewayClass 수락을 담당하는 리컨실러입니다.
///
/// controllerName이 이 프로세스의 컨트롤러 이름과 일치하는 클래스에만
/// Accepted 조건을 기록하고, 다른 컨트롤러 소유의 클래스는 건드리지 않습니다.
pub struct ClassReconciler {
    store: Arc<dyn ResourceStore>,
    controller_name: String,
}

impl ClassReconciler {
    pub fn new(store: Arc<dyn ResourceStore>, controller_name: impl Into<String>) -> Self {
        Self {
            store,
            controller_name: controller_name.into(),
        }
    }
}

#[async_trait]
impl Reconcile for ClassReconciler {
    async fn reconcile(&self, key: &ResourceKey) -> Result<ReconcileOutcome, StoreError> {
        let class = match self.store.get_gateway_class(&key.name).await? {
            Some(class) => class,
            None => {
                debug!(class = %key.name, "GatewayClass가 이미 삭제되어 무시");
                return Ok(ReconcileOutcome::Done);
            }
        };

        if class.spec.controller_name != self.controller_name {
            debug!(
                class = %key.name,
                controller = %class.spec.controller_name,
                "다른 컨트롤러가 관리하는 GatewayClass"
            );
            return Ok(ReconcileOutcome::Done);
        }

        let status = GatewayClassStatus {
            conditions: vec![Condition::new(
                CONDITION_ACCEPTED,
                ConditionStatus::True,
                REASON_ACCEPTED,
                "GatewayClass accepted",
                class.metadata.generation,
            )],
        };
        self.store.update_class_status(&key.name, status).await?;

        info!(class = %key.name, "GatewayClass 수락");
        Ok(ReconcileOutcome::Done)
    }
}
