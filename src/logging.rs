use tracing::{error, info, warn, Level, span};
use tracing_subscriber::EnvFilter;
use tracing_appender::non_blocking::WorkerGuard;

use crate::routing::Backend;
use crate::settings::logging::{LogFormat, LogOutput, LogSettings};

/// 로깅 서브시스템을 초기화합니다.
///
/// 파일 출력을 사용하면 백그라운드 기록 스레드를 붙잡는 가드를
/// 돌려주므로, 호출자는 프로세스가 끝날 때까지 가드를 유지해야 합니다.
pub fn init_logging(settings: &LogSettings) -> Option<WorkerGuard> {
    let filter = EnvFilter::from_default_env()
        .add_directive(Level::INFO.into())
        .add_directive(format!("gateway_api_proxy={}", settings.level).parse().unwrap());

    match (&settings.format, &settings.output) {
        (LogFormat::Text, LogOutput::Stdout) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .init();
            None
        }
        (LogFormat::Json, LogOutput::Stdout) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .json()
                .init();
            None
        }
        (format, LogOutput::File(path)) => {
            let appender = tracing_appender::rolling::daily(path, "gateway-api-proxy.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let builder = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true);
            match format {
                LogFormat::Json => builder.json().init(),
                LogFormat::Text => builder.init(),
            }
            Some(guard)
        }
    }
}

#[derive(Debug)]
pub struct RequestLog {
    pub request_id: String,
    pub method: String,
    pub path: String,
    pub host: String,
    pub status_code: u16,
    pub duration_ms: u64,
    pub backend_address: Option<String>,
    pub error: Option<String>,
}

impl RequestLog {
    pub fn new(request_id: String) -> Self {
        Self {
            request_id,
            method: String::new(),
            path: String::new(),
            host: String::new(),
            status_code: 0,
            duration_ms: 0,
            backend_address: None,
            error: None,
        }
    }

    pub fn with_request<B>(&mut self, req: &hyper::Request<B>) {
        self.method = req.method().to_string();
        self.path = req.uri().path().to_string();
        if let Some(host) = req.headers().get(hyper::header::HOST) {
            self.host = host.to_str().unwrap_or_default().to_string();
        }
    }

    pub fn with_response(&mut self, status: hyper::StatusCode) {
        self.status_code = status.as_u16();
    }

    pub fn with_backend(&mut self, backend: &Backend) {
        self.backend_address = Some(backend.to_string());
    }

    pub fn with_error(&mut self, error: impl std::fmt::Display) {
        self.error = Some(error.to_string());
    }
}

pub fn log_request(log: &RequestLog) {
    let level = if log.error.is_some() || log.status_code >= 500 {
        Level::ERROR
    } else if log.status_code >= 400 {
        Level::WARN
    } else {
        Level::INFO
    };

    macro_rules! request_span {
        ($level:expr) => {
            span!(
                $level,
                "request",
                request_id = %log.request_id,
                method = %log.method,
                path = %log.path,
                host = %log.host,
                status = %log.status_code,
                duration_ms = %log.duration_ms
            )
        };
    }
    let span = match level {
        Level::ERROR => request_span!(Level::ERROR),
        Level::WARN => request_span!(Level::WARN),
        _ => request_span!(Level::INFO),
    };
    let _enter = span.enter();

    match level {
        Level::ERROR => error!(
            backend = ?log.backend_address,
            error = ?log.error,
            "Request failed"
        ),
        Level::WARN => warn!(
            backend = ?log.backend_address,
            "Request completed with warning"
        ),
        _ => info!(
            backend = ?log.backend_address,
            "Request completed successfully"
        ),
    }
}
