use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::controller::{
    with_retry, ClassReconciler, GatewayReconciler, Reconcile, ReconcileOutcome,
    ReconcileRetry, RetryPolicy, RouteReconciler,
};
use crate::resources::{ManifestWatcher, MemoryStore, ResourceEvent, ResourceKind};
use crate::routing::SharedRouteTable;
use crate::settings::Settings;
use super::handler::RequestHandler;
use super::listener::ServerListener;
use super::Result;

/// 컨트롤 플레인과 데이터 플레인을 묶어서 구동하는 매니저입니다.
///
/// 시작 순서:
/// 1. 스토어 이벤트를 리컨실 채널로 전달하는 태스크
/// 2. 리소스 종류별 리컨실러에 이벤트를 배분하는 직렬 리컨실 루프
/// 3. 매니페스트 디렉토리 초기 동기화와 파일 감시
/// 4. HTTP 리스너
pub struct ServerManager {
    pub config: Settings,
    pub store: Arc<MemoryStore>,
    pub router: Arc<SharedRouteTable>,
    class_reconciler: ClassReconciler,
    gateway_reconciler: GatewayReconciler,
    route_reconciler: RouteReconciler,
    retry_policy: RetryPolicy,
}

impl ServerManager {
    pub fn new(config: Settings, store: Arc<MemoryStore>, router: Arc<SharedRouteTable>) -> Self {
        let class_reconciler = ClassReconciler::new(
            store.clone(),
            config.controller.controller_name.clone(),
        );
        let gateway_reconciler = GatewayReconciler::new(
            store.clone(),
            config.controller.controller_name.clone(),
            config.controller.ingress_service_key(),
        );
        let route_reconciler = RouteReconciler::new(
            store.clone(),
            router.clone(),
            config.controller.cluster_domain.clone(),
        );
        let retry_policy = RetryPolicy::from(&config.controller.retry);

        Self {
            config,
            store,
            router,
            class_reconciler,
            gateway_reconciler,
            route_reconciler,
            retry_policy,
        }
    }

    /// 빈 스토어와 빈 라우팅 테이블로 매니저를 만듭니다.
    pub fn with_defaults(config: Settings) -> Result<Self> {
        let store = Arc::new(MemoryStore::new()?);
        let router = Arc::new(SharedRouteTable::new());
        Ok(Self::new(config, store, router))
    }

    /// 서버 실행
    pub async fn start(self) -> Result<()> {
        let Self {
            config,
            store,
            router,
            class_reconciler,
            gateway_reconciler,
            route_reconciler,
            retry_policy,
        } = self;

        // 리컨실 이벤트 채널. 스토어 이벤트와 재큐 이벤트가 모두 모인다.
        let (event_tx, mut event_rx) = mpsc::channel::<ResourceEvent>(32);

        // 스토어 이벤트 전달 태스크
        let mut store_rx = store.subscribe().await;
        {
            let event_tx = event_tx.clone();
            tokio::spawn(async move {
                while let Some(event) = store_rx.recv().await {
                    if event_tx.send(event).await.is_err() {
                        break;
                    }
                }
                warn!("리소스 이벤트 스트림 종료");
            });
        }

        // 직렬 리컨실 루프
        let requeue_interval = Duration::from_secs(config.controller.requeue_interval);
        {
            let event_tx = event_tx.clone();
            tokio::spawn(async move {
                while let Some(event) = event_rx.recv().await {
                    debug!(kind = %event.kind, key = %event.key, "리소스 이벤트 처리");

                    let reconciler: &dyn Reconcile = match event.kind {
                        ResourceKind::GatewayClass => &class_reconciler,
                        ResourceKind::Gateway => &gateway_reconciler,
                        ResourceKind::HttpRoute => &route_reconciler,
                    };

                    let operation = ReconcileRetry {
                        reconciler,
                        key: &event.key,
                    };

                    match with_retry(operation, retry_policy.clone()).await {
                        Ok(ReconcileOutcome::Done) => {}
                        Ok(ReconcileOutcome::Requeue) => {
                            debug!(key = %event.key, "리컨실 재큐 예약");
                            let event_tx = event_tx.clone();
                            let requeued = event.clone();
                            tokio::spawn(async move {
                                tokio::time::sleep(requeue_interval).await;
                                let _ = event_tx.send(requeued).await;
                            });
                        }
                        Err(e) => {
                            error!(key = %event.key, error = %e, "리컨실 실패");
                        }
                    }
                }
            });
        }

        // 매니페스트 디렉토리 동기화와 파일 감시
        if let Some(dir) = config.controller.manifest_dir.as_deref() {
            let dir = Path::new(dir).to_path_buf();
            store.sync_dir(&dir).await?;

            let mut watcher = ManifestWatcher::new();
            watcher.add_path(&dir);
            watcher.start()?;

            info!(dir = %dir.display(), "매니페스트 디렉토리 감시 시작");

            let store = store.clone();
            tokio::spawn(async move {
                let mut watcher = watcher;
                while let Some(event) = watcher.watch().await {
                    debug!(event = ?event, "매니페스트 변경 감지");
                    if let Err(e) = store.sync_dir(&dir).await {
                        error!(error = %e, "매니페스트 재동기화 실패");
                    }
                }
            });
        }

        // 데이터 플레인 리스너
        let listener = ServerListener::new(&config.server).await?;
        let handler = Arc::new(RequestHandler::new(router));

        listener.run(handler).await
    }
}
