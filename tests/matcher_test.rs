use gateway_api_proxy::routing::{
    HeaderMatch, MatchPrecedence, PathMatch, PathMatchKind, RequestInfo, RouteMatch,
};

#[test]
fn test_exact_path_matching() {
    let test_cases = vec![
        // (패턴, 테스트 경로, 예상 결과)
        ("/foo", "/foo", true),
        ("/foo", "/foo/", false),
        ("/foo", "/foo/bar", false),
        ("/foo", "/foobar", false),
        ("/foo", "/FOO", false),
        ("/", "/", true),
        ("/", "/foo", false),
    ];

    for (pattern, path, expected) in test_cases {
        let matcher = PathMatch::exact(pattern);
        assert_eq!(matcher.kind, PathMatchKind::Exact);
        assert_eq!(
            matcher.matches(path),
            expected,
            "패턴: '{}', 경로: '{}', 예상 결과: {}",
            pattern,
            path,
            expected
        );
    }
}

#[test]
fn test_prefix_path_matching() {
    let test_cases = vec![
        // (패턴, 테스트 경로, 예상 결과)
        ("/foo", "/foo", true),
        ("/foo", "/foo/", true),
        ("/foo", "/foo/bar", true),
        ("/foo", "/foo/bar/baz", true),
        // 경로 조각 경계를 지켜야 한다
        ("/foo", "/foobar", false),
        ("/foo", "/foot", false),
        ("/foo", "/fo", false),
        // 루트 접두사는 모든 경로와 매칭된다
        ("/", "/", true),
        ("/", "/anything", true),
        ("/", "/a/b/c", true),
    ];

    for (pattern, path, expected) in test_cases {
        let matcher = PathMatch::prefix(pattern);
        assert_eq!(matcher.kind, PathMatchKind::Prefix);
        assert_eq!(
            matcher.matches(path),
            expected,
            "패턴: '{}', 경로: '{}', 예상 결과: {}",
            pattern,
            path,
            expected
        );
    }
}

#[test]
fn test_prefix_trailing_slash_normalized() {
    // 접두사 끝의 슬래시는 있으나 없으나 동일하게 처리되어야 함
    let matcher = PathMatch::prefix("/api/");

    assert!(matcher.matches("/api"));
    assert!(matcher.matches("/api/"));
    assert!(matcher.matches("/api/users"));
    assert!(!matcher.matches("/apis"));
}

#[test]
fn test_header_exact_matching() {
    let request = RequestInfo::new("example.com", "/").with_header("x-env", "prod");

    // 헤더 이름은 대소문자를 구분하지 않는다
    assert!(HeaderMatch::exact("x-env", "prod").matches(&request));
    assert!(HeaderMatch::exact("X-Env", "prod").matches(&request));

    // 값은 대소문자를 구분한다
    assert!(!HeaderMatch::exact("x-env", "Prod").matches(&request));
    assert!(!HeaderMatch::exact("x-other", "prod").matches(&request));
}

#[test]
fn test_header_regex_matching() {
    let test_cases = vec![
        // (패턴, 헤더 값, 예상 결과)
        ("^v[0-9]+$", "v1", true),
        ("^v[0-9]+$", "v12", true),
        ("^v[0-9]+$", "va", false),
        ("^v[0-9]+$", "v1-beta", false),
        // 앵커가 없으면 부분 일치를 허용한다
        ("beta", "my-beta-build", true),
        ("beta", "stable", false),
    ];

    for (pattern, value, expected) in test_cases {
        let matcher = HeaderMatch::pattern("x-version", pattern)
            .unwrap_or_else(|e| panic!("패턴 '{}' 컴파일 실패: {}", pattern, e));
        let request = RequestInfo::new("example.com", "/").with_header("x-version", value);

        assert_eq!(
            matcher.matches(&request),
            expected,
            "패턴: '{}', 값: '{}', 예상 결과: {}",
            pattern,
            value,
            expected
        );
    }
}

#[test]
fn test_invalid_header_pattern_rejected() {
    let result = HeaderMatch::pattern("x-version", "[invalid");
    assert!(result.is_err(), "잘못된 정규식은 실패해야 함");
}

#[test]
fn test_header_regex_missing_header_never_matches() {
    let matcher = HeaderMatch::pattern("x-version", ".*").unwrap();
    let request = RequestInfo::new("example.com", "/");

    // 패턴이 무엇이든 헤더 자체가 없으면 매칭되지 않는다
    assert!(!matcher.matches(&request));
}

#[test]
fn test_route_match_requires_all_conditions() {
    let route_match = RouteMatch {
        path: Some(PathMatch::prefix("/api")),
        headers: vec![
            HeaderMatch::exact("x-env", "prod"),
            HeaderMatch::exact("x-region", "kr"),
        ],
    };

    let full = RequestInfo::new("example.com", "/api/users")
        .with_header("x-env", "prod")
        .with_header("x-region", "kr");
    assert!(route_match.matches(&full));

    let missing_header = RequestInfo::new("example.com", "/api/users")
        .with_header("x-env", "prod");
    assert!(!route_match.matches(&missing_header), "헤더 하나만 빠져도 실패해야 함");

    let wrong_path = RequestInfo::new("example.com", "/admin")
        .with_header("x-env", "prod")
        .with_header("x-region", "kr");
    assert!(!route_match.matches(&wrong_path));
}

#[test]
fn test_empty_clause_matches_everything() {
    let route_match = RouteMatch {
        path: None,
        headers: Vec::new(),
    };

    assert!(route_match.matches(&RequestInfo::new("example.com", "/")));
    assert!(route_match.matches(&RequestInfo::new("other.com", "/deep/path")));
    assert_eq!(route_match.precedence(), MatchPrecedence::universal());
}

#[test]
fn test_precedence_ordering() {
    let exact = RouteMatch {
        path: Some(PathMatch::exact("/foo")),
        headers: Vec::new(),
    };
    let long_prefix = RouteMatch {
        path: Some(PathMatch::prefix("/foo/bar/baz")),
        headers: Vec::new(),
    };
    let short_prefix = RouteMatch {
        path: Some(PathMatch::prefix("/foo")),
        headers: Vec::new(),
    };
    let short_prefix_with_headers = RouteMatch {
        path: Some(PathMatch::prefix("/foo")),
        headers: vec![HeaderMatch::exact("x-env", "prod")],
    };

    // 경로 종류가 길이보다 우선한다
    assert!(exact.precedence() > long_prefix.precedence());

    // 같은 종류면 긴 경로가 우선한다
    assert!(long_prefix.precedence() > short_prefix.precedence());

    // 경로가 같으면 헤더 개수가 많은 쪽이 우선한다
    assert!(short_prefix_with_headers.precedence() > short_prefix.precedence());

    // 경로 종류는 헤더 개수보다 우선한다
    let prefix_many_headers = RouteMatch {
        path: Some(PathMatch::prefix("/very/long/prefix")),
        headers: vec![
            HeaderMatch::exact("a", "1"),
            HeaderMatch::exact("b", "2"),
            HeaderMatch::exact("c", "3"),
        ],
    };
    assert!(exact.precedence() > prefix_many_headers.precedence());
}
