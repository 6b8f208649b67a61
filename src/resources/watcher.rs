use std::path::PathBuf;

use notify::{Event, RecommendedWatcher, RecursiveMode, Result as NotifyResult, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::resources::store::StoreError;

/// 매니페스트 파일 변경 이벤트 타입
#[derive(Debug, PartialEq, Clone)]
pub enum ManifestEvent {
    /// 파일이 수정됨
    Modified(PathBuf),
    /// 파일이 생성됨
    Created(PathBuf),
    /// 파일이 삭제됨
    Removed(PathBuf),
}

/// 매니페스트 디렉토리 감시자
///
/// 어떤 변경이든 수신 측에서는 디렉토리 전체 재동기화로 처리하므로
/// 이벤트 종류는 로그 용도로만 구분합니다.
pub struct ManifestWatcher {
    /// 감시할 디렉토리 경로 목록
    paths: Vec<PathBuf>,
    /// 이벤트 송신자
    event_tx: mpsc::Sender<ManifestEvent>,
    /// 이벤트 수신자
    event_rx: mpsc::Receiver<ManifestEvent>,
    /// 파일 시스템 감시자
    watcher: Option<RecommendedWatcher>,
}

impl ManifestWatcher {
    pub fn new() -> Self {
        let (event_tx, event_rx) = mpsc::channel(32);
        Self {
            paths: Vec::new(),
            event_tx,
            event_rx,
            watcher: None,
        }
    }

    /// 감시할 경로 추가
    pub fn add_path<P: Into<PathBuf>>(&mut self, path: P) {
        self.paths.push(path.into());
    }

    /// 테스트용 이벤트 송신자 반환
    #[cfg(test)]
    pub fn get_sender(&self) -> mpsc::Sender<ManifestEvent> {
        self.event_tx.clone()
    }

    /// 감시 시작
    pub fn start(&mut self) -> Result<(), StoreError> {
        let event_tx = self.event_tx.clone();

        // notify의 이벤트를 ManifestEvent로 변환하여 채널로 전송하는 핸들러
        let mut watcher: RecommendedWatcher =
            notify::recommended_watcher(move |res: NotifyResult<Event>| {
                match res {
                    Ok(event) => {
                        use notify::EventKind::*;

                        for path in event.paths {
                            match event.kind {
                                Modify(_) => {
                                    debug!("매니페스트 수정됨: {}", path.display());
                                    let _ = event_tx.blocking_send(ManifestEvent::Modified(path));
                                }
                                Create(_) => {
                                    debug!("매니페스트 생성됨: {}", path.display());
                                    let _ = event_tx.blocking_send(ManifestEvent::Created(path));
                                }
                                Remove(_) => {
                                    debug!("매니페스트 삭제됨: {}", path.display());
                                    let _ = event_tx.blocking_send(ManifestEvent::Removed(path));
                                }
                                _ => {}
                            }
                        }
                    }
                    Err(e) => error!("감시 오류: {}", e),
                }
            })
            .map_err(|e| StoreError::Watch { reason: e.to_string() })?;

        // 모든 경로에 대해 감시 설정
        for path in &self.paths {
            debug!("경로 감시 시작: {}", path.display());
            watcher
                .watch(path, RecursiveMode::Recursive)
                .map_err(|e| StoreError::Watch { reason: e.to_string() })?;
        }

        self.watcher = Some(watcher);
        Ok(())
    }

    /// 이벤트 수신 대기
    pub async fn watch(&mut self) -> Option<ManifestEvent> {
        self.event_rx.recv().await
    }
}

impl Default for ManifestWatcher {
    fn default() -> Self {
        Self::new()
    }
}
