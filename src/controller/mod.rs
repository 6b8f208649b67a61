//! 리소스 이벤트를 처리해 수락 상태를 보고하고 라우팅 테이블을 갱신하는
//! 컨트롤 플레인 모듈입니다.

use async_trait::async_trait;

use crate::resources::{ResourceKey, StoreError};

mod class;
mod gateway;
mod retry;
mod route;

pub use class::ClassReconciler;
pub use gateway::GatewayReconciler;
pub use retry::{with_retry, ReconcileRetry, RetryPolicy, RetryableOperation};
pub use route::RouteReconciler;

/// 리컨실 한 번의 결과입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// 처리 완료
    Done,
    /// 의존 대상이 아직 준비되지 않음. 에러 없이 잠시 후 같은 키로 재시도
    Requeue,
}

/// 리소스 종류별 리컨실러가 구현하는 공통 계약입니다.
///
/// 이벤트에서 키만 받아 스토어에서 최신 상태를 조회하며, 조회 시점에
/// 리소스가 없으면 에러가 아니라 정상 완료로 처리합니다. 같은 키를 몇 번을
/// 다시 처리해도 결과가 같아야 합니다.
#[async_trait]
pub trait Reconcile: Send + Sync {
    async fn reconcile(&self, key: &ResourceKey) -> Result<ReconcileOutcome, StoreError>;
}
