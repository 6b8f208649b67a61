use gateway_api_proxy::routing::{
    Backend, CompiledRoute, HeaderMatch, PathMatch, RequestInfo, RouteMatch, RouteRule,
    RouteTable, SharedRouteTable,
};

fn route(name: &str, hostnames: Vec<&str>, rules: Vec<RouteRule>) -> CompiledRoute {
    CompiledRoute {
        namespace: "default".to_string(),
        name: name.to_string(),
        hostnames: hostnames.into_iter().map(String::from).collect(),
        rules,
    }
}

fn path_rule(path: PathMatch, backend_host: &str) -> RouteRule {
    RouteRule {
        matches: vec![RouteMatch {
            path: Some(path),
            headers: Vec::new(),
        }],
        backend: Backend::new(backend_host, 8080),
    }
}

fn resolved_host(table: &RouteTable, request: &RequestInfo) -> Option<String> {
    table.resolve(request).map(|b| b.host.clone())
}

#[test]
fn test_hostname_filtering() {
    let table = RouteTable::from_routes(vec![
        route("exact-host", vec!["example.com"], vec![path_rule(PathMatch::prefix("/"), "exact-backend")]),
        route("any-host", vec!["*"], vec![path_rule(PathMatch::prefix("/wild"), "wild-backend")]),
    ]);

    // 호스트가 일치하는 라우트만 후보가 된다
    let request = RequestInfo::new("example.com", "/");
    assert_eq!(resolved_host(&table, &request), Some("exact-backend".to_string()));

    // "*"는 모든 호스트와 매칭된다
    let request = RequestInfo::new("other.com", "/wild/path");
    assert_eq!(resolved_host(&table, &request), Some("wild-backend".to_string()));

    // 어느 라우트와도 매칭되지 않는 호스트
    let request = RequestInfo::new("other.com", "/none");
    assert_eq!(table.resolve(&request), None);
}

#[test]
fn test_empty_hostnames_match_any_host() {
    let table = RouteTable::from_routes(vec![route(
        "no-hostnames",
        vec![],
        vec![path_rule(PathMatch::prefix("/"), "backend")],
    )]);

    for host in ["a.com", "b.example.com", "localhost"] {
        let request = RequestInfo::new(host, "/");
        assert_eq!(
            resolved_host(&table, &request),
            Some("backend".to_string()),
            "호스트 '{}'는 호스트 목록이 빈 라우트와 매칭되어야 함",
            host
        );
    }
}

#[test]
fn test_most_specific_match_wins() {
    let table = RouteTable::from_routes(vec![route(
        "api-route",
        vec!["example.com"],
        vec![
            path_rule(PathMatch::prefix("/"), "root-backend"),
            path_rule(PathMatch::prefix("/foo"), "prefix-backend"),
            path_rule(PathMatch::exact("/foo"), "exact-backend"),
        ],
    )]);

    let cases = vec![
        // (경로, 예상 백엔드)
        ("/foo", "exact-backend"),
        ("/foo/bar", "prefix-backend"),
        ("/other", "root-backend"),
        // Exact /foo는 /foot과 매칭되지 않고, /foo 접두사도 경계가 맞지 않는다
        ("/foot", "root-backend"),
    ];

    for (path, expected) in cases {
        let request = RequestInfo::new("example.com", path);
        assert_eq!(
            resolved_host(&table, &request),
            Some(expected.to_string()),
            "경로 '{}'는 '{}'로 가야 함",
            path,
            expected
        );
    }
}

#[test]
fn test_header_count_breaks_path_ties() {
    let plain = RouteRule {
        matches: vec![RouteMatch {
            path: Some(PathMatch::prefix("/api")),
            headers: Vec::new(),
        }],
        backend: Backend::new("plain-backend", 8080),
    };
    let with_header = RouteRule {
        matches: vec![RouteMatch {
            path: Some(PathMatch::prefix("/api")),
            headers: vec![HeaderMatch::exact("x-env", "prod")],
        }],
        backend: Backend::new("header-backend", 8080),
    };

    let table = RouteTable::from_routes(vec![route(
        "api-route",
        vec!["example.com"],
        vec![plain, with_header],
    )]);

    let with = RequestInfo::new("example.com", "/api/users").with_header("x-env", "prod");
    assert_eq!(resolved_host(&table, &with), Some("header-backend".to_string()));

    let without = RequestInfo::new("example.com", "/api/users");
    assert_eq!(resolved_host(&table, &without), Some("plain-backend".to_string()));
}

#[test]
fn test_first_rule_wins_on_equal_precedence() {
    let table = RouteTable::from_routes(vec![route(
        "dup-route",
        vec!["example.com"],
        vec![
            path_rule(PathMatch::prefix("/api"), "first-backend"),
            path_rule(PathMatch::prefix("/api"), "second-backend"),
        ],
    )]);

    let request = RequestInfo::new("example.com", "/api");
    assert_eq!(
        resolved_host(&table, &request),
        Some("first-backend".to_string()),
        "우선순위가 같으면 먼저 나온 규칙이 이겨야 함"
    );
}

#[test]
fn test_first_route_wins_across_routes() {
    let table = RouteTable::from_routes(vec![
        route("route-a", vec!["example.com"], vec![path_rule(PathMatch::prefix("/api"), "a-backend")]),
        route("route-b", vec!["example.com"], vec![path_rule(PathMatch::prefix("/api"), "b-backend")]),
    ]);

    let request = RequestInfo::new("example.com", "/api");
    assert_eq!(resolved_host(&table, &request), Some("a-backend".to_string()));
}

#[test]
fn test_universal_rule_is_fallback_only() {
    let universal = RouteRule {
        matches: Vec::new(),
        backend: Backend::new("fallback-backend", 8080),
    };
    let api = path_rule(PathMatch::prefix("/api"), "api-backend");

    // 규칙 순서와 무관하게 같은 결과가 나와야 한다
    let orderings = vec![
        vec![universal.clone(), api.clone()],
        vec![api, universal],
    ];

    for rules in orderings {
        let table = RouteTable::from_routes(vec![route("fallback-route", vec!["example.com"], rules)]);

        let api_request = RequestInfo::new("example.com", "/api/users");
        assert_eq!(
            resolved_host(&table, &api_request),
            Some("api-backend".to_string()),
            "매칭되는 규칙이 있으면 범용 규칙은 무시되어야 함"
        );

        let other_request = RequestInfo::new("example.com", "/other");
        assert_eq!(
            resolved_host(&table, &other_request),
            Some("fallback-backend".to_string()),
            "아무 규칙도 매칭되지 않을 때만 범용 규칙을 쓴다"
        );
    }
}

#[test]
fn test_empty_table_resolves_nothing() {
    let table = RouteTable::new();
    assert!(table.is_empty());
    assert_eq!(table.resolve(&RequestInfo::new("example.com", "/")), None);
}

#[test]
fn test_shared_table_replacement_keeps_old_snapshot() {
    let shared = SharedRouteTable::new();
    let before = shared.snapshot();
    assert!(before.is_empty());

    let table = RouteTable::from_routes(vec![route(
        "new-route",
        vec!["example.com"],
        vec![path_rule(PathMatch::prefix("/"), "backend")],
    )]);
    shared.replace(table);

    // 교체 전에 떠 둔 스냅샷은 그대로다
    assert!(before.is_empty());

    // 새 스냅샷은 교체된 테이블을 본다
    let after = shared.snapshot();
    assert_eq!(after.len(), 1);
    let request = RequestInfo::new("example.com", "/any");
    assert_eq!(resolved_host(&after, &request), Some("backend".to_string()));
}
