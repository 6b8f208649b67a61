use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::debug;

use crate::routing::table::RouteTable;

/// 데이터 플레인과 컨트롤 플레인이 공유하는 라우팅 테이블 핸들입니다.
///
/// 읽기는 잠금 없이 현재 테이블의 스냅샷을 얻고, 갱신은 완성된 테이블을
/// 원자적으로 교체합니다. 요청 하나를 처리하는 동안에는 스냅샷을 한 번만
/// 떠서 일관된 테이블을 보게 합니다.
pub struct SharedRouteTable {
    inner: ArcSwap<RouteTable>,
}

impl SharedRouteTable {
    pub fn new() -> Self {
        SharedRouteTable {
            inner: ArcSwap::from_pointee(RouteTable::new()),
        }
    }

    /// 현재 테이블의 스냅샷을 반환합니다.
    pub fn snapshot(&self) -> Arc<RouteTable> {
        self.inner.load_full()
    }

    /// 완성된 새 테이블로 통째로 교체합니다.
    pub fn replace(&self, table: RouteTable) {
        debug!(routes = table.len(), "라우팅 테이블 교체");
        self.inner.store(Arc::new(table));
    }
}

impl Default for SharedRouteTable {
    fn default() -> Self {
        Self::new()
    }
}
