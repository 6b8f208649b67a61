use gateway_api_proxy::settings::Settings;
use std::sync::Once;

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;  // 테스트 격리를 위해 추가

    static INIT: Once = Once::new();

    fn setup() {
        INIT.call_once(|| {
            cleanup_env();
        });
    }

    fn teardown() {
        cleanup_env();
    }

    // 테스트 전후 환경변수 초기화를 위한 헬퍼 함수
    fn cleanup_env() {
        std::env::remove_var("PROXY_HTTP_PORT");
        std::env::remove_var("PROXY_LOG_LEVEL");
        std::env::remove_var("PROXY_LOG_FORMAT");
        std::env::remove_var("PROXY_LOG_OUTPUT");
        std::env::remove_var("PROXY_CONTROLLER_NAME");
        std::env::remove_var("PROXY_CLUSTER_DOMAIN");
        std::env::remove_var("PROXY_INGRESS_SERVICE");
        std::env::remove_var("PROXY_INGRESS_NAMESPACE");
        std::env::remove_var("PROXY_MANIFEST_DIR");
        std::env::remove_var("PROXY_REQUEUE_INTERVAL_SECS");
        std::env::remove_var("PROXY_RETRY_COUNT");
        std::env::remove_var("PROXY_RETRY_INTERVAL_SECS");
        std::env::remove_var("PROXY_CONFIG_FILE");
    }

    // 테스트용 임시 TOML 파일 생성 헬퍼
    fn create_test_toml(content: &str) -> (String, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("test_config.toml");
        std::fs::write(&file_path, content).unwrap();
        (file_path.to_str().unwrap().to_string(), dir)
    }

    #[tokio::test]
    #[serial]
    async fn test_settings_validation() {
        setup();

        // 1. 잘못된 포트 번호
        std::env::set_var("PROXY_HTTP_PORT", "99999");
        let result = Settings::from_env().await;
        assert!(result.is_err());
        teardown();

        // 2. 잘못된 로그 레벨
        std::env::set_var("PROXY_LOG_LEVEL", "invalid_level");
        let result = Settings::from_env().await;
        assert!(result.is_err());
        teardown();

        // 3. 도메인/경로 형식이 아닌 컨트롤러 이름
        std::env::set_var("PROXY_CONTROLLER_NAME", "no-slash-controller");
        let result = Settings::from_env().await;
        assert!(result.is_err());
        teardown();

        // 4. 재시도 횟수 0
        std::env::set_var("PROXY_RETRY_COUNT", "0");
        let result = Settings::from_env().await;
        assert!(result.is_err());
        teardown();
    }

    #[tokio::test]
    #[serial]
    async fn test_settings_defaults() {
        setup();

        let settings = Settings::from_env().await.unwrap();

        assert_eq!(settings.server.http_port, 8000);
        assert_eq!(settings.logging.level, tracing::Level::INFO);
        assert_eq!(settings.controller.controller_name, "gateway.proxy.rs/controller");
        assert_eq!(settings.controller.cluster_domain, "svc.cluster.local");
        assert_eq!(settings.controller.ingress_service, "gateway-proxy");
        assert_eq!(settings.controller.ingress_namespace, "default");
        assert!(settings.controller.manifest_dir.is_none());
        assert_eq!(settings.controller.requeue_interval, 10);
        assert_eq!(settings.controller.retry.max_attempts, 3);
        assert_eq!(settings.controller.retry.interval, 1);
        teardown();
    }

    #[tokio::test]
    #[serial]
    async fn test_settings_from_toml() {
        setup();

        let toml_content = r#"
            [server]
            http_port = 9090

            [logging]
            format = "json"
            level = "debug"

            [controller]
            controller_name = "example.com/test-controller"
            cluster_domain = "svc.test.local"
            manifest_dir = "/etc/gateway/manifests"

            [controller.retry]
            max_attempts = 5
            interval = 2
        "#;

        let (file_path, _temp_dir) = create_test_toml(toml_content);
        let settings = Settings::from_toml_file(&file_path).await.unwrap();

        assert_eq!(settings.server.http_port, 9090);
        assert_eq!(settings.logging.level, tracing::Level::DEBUG);
        assert_eq!(settings.controller.controller_name, "example.com/test-controller");
        assert_eq!(settings.controller.cluster_domain, "svc.test.local");
        assert_eq!(
            settings.controller.manifest_dir.as_deref(),
            Some("/etc/gateway/manifests")
        );
        assert_eq!(settings.controller.retry.max_attempts, 5);
        teardown();
    }

    #[tokio::test]
    #[serial]
    async fn test_settings_from_env() {
        setup();

        // 환경변수 설정
        std::env::set_var("PROXY_HTTP_PORT", "9090");
        std::env::set_var("PROXY_LOG_LEVEL", "debug");
        std::env::set_var("PROXY_CONTROLLER_NAME", "example.com/test-controller");
        std::env::set_var("PROXY_CLUSTER_DOMAIN", "svc.test.local");
        std::env::set_var("PROXY_INGRESS_SERVICE", "edge-proxy");
        std::env::set_var("PROXY_INGRESS_NAMESPACE", "edge");
        std::env::set_var("PROXY_MANIFEST_DIR", "/etc/gateway/manifests");
        std::env::set_var("PROXY_REQUEUE_INTERVAL_SECS", "3");
        std::env::set_var("PROXY_RETRY_COUNT", "5");
        std::env::set_var("PROXY_RETRY_INTERVAL_SECS", "2");

        // 설정 로드 및 검증
        let settings = Settings::from_env().await.unwrap();

        // 설정값 검증
        assert_eq!(settings.server.http_port, 9090);
        assert_eq!(settings.logging.level, tracing::Level::DEBUG);
        assert_eq!(settings.controller.controller_name, "example.com/test-controller");
        assert_eq!(settings.controller.cluster_domain, "svc.test.local");
        assert_eq!(settings.controller.ingress_service_key().to_string(), "edge/edge-proxy");
        assert_eq!(settings.controller.manifest_dir.as_deref(), Some("/etc/gateway/manifests"));
        assert_eq!(settings.controller.requeue_interval, 3);
        assert_eq!(settings.controller.retry.max_attempts, 5);
        assert_eq!(settings.controller.retry.interval, 2);

        teardown();
    }

    #[tokio::test]
    #[serial]
    async fn test_settings_edge_cases() {
        setup();

        // 1. 포트 번호 0 케이스
        std::env::set_var("PROXY_HTTP_PORT", "0");
        let result = Settings::from_env().await;
        assert!(result.is_err(), "포트 0은 허용되지 않아야 함");

        // 2. 숫자가 아닌 포트 케이스
        teardown();
        std::env::set_var("PROXY_HTTP_PORT", "not-a-port");
        let result = Settings::from_env().await;
        assert!(result.is_err(), "숫자가 아닌 포트는 허용되지 않아야 함");

        // 3. 빈 컨트롤러 이름 케이스
        teardown();
        std::env::set_var("PROXY_CONTROLLER_NAME", "");
        let result = Settings::from_env().await;
        assert!(result.is_err(), "빈 컨트롤러 이름은 허용되지 않아야 함");

        // 4. 숫자가 아닌 재큐 간격 케이스
        teardown();
        std::env::set_var("PROXY_REQUEUE_INTERVAL_SECS", "soon");
        let result = Settings::from_env().await;
        assert!(result.is_err(), "숫자가 아닌 간격은 허용되지 않아야 함");

        teardown();
    }

    #[tokio::test]
    #[serial]
    async fn test_config_file_takes_precedence() {
        setup();

        let toml_content = r#"
            [server]
            http_port = 7070
        "#;
        let (file_path, _temp_dir) = create_test_toml(toml_content);

        // 환경 변수보다 설정 파일이 우선한다
        std::env::set_var("PROXY_CONFIG_FILE", &file_path);
        std::env::set_var("PROXY_HTTP_PORT", "9090");

        let settings = Settings::load().await.unwrap();
        assert_eq!(settings.server.http_port, 7070);

        teardown();
    }
}
