use gateway_api_proxy::logging::init_logging;
use gateway_api_proxy::server::ServerManager;
use gateway_api_proxy::settings::Settings;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let settings = match Settings::load().await {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("설정 로드 실패: {}", e);
            std::process::exit(1);
        }
    };

    // 파일 로깅을 쓰면 가드를 프로세스 종료까지 잡고 있어야 한다
    let _guard = init_logging(&settings.logging);

    info!(
        http_port = settings.server.http_port,
        controller = %settings.controller.controller_name,
        "게이트웨이 프록시 시작"
    );

    let manager = match ServerManager::with_defaults(settings) {
        Ok(manager) => manager,
        Err(e) => {
            error!(error = %e, "서버 초기화 실패");
            std::process::exit(1);
        }
    };

    if let Err(e) = manager.start().await {
        error!(error = %e, "서버 실행 실패");
        std::process::exit(1);
    }
}
