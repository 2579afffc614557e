use super::*;

#[test]
fn secure_origin_uses_wss() {
    let origin = Origin::parse("https://viewer.example.com").unwrap();
    assert!(origin.is_secure());
    assert_eq!(origin.stream_url("abc"), "wss://viewer.example.com/stream/ws?token=abc");
}

#[test]
fn insecure_origin_uses_ws() {
    let origin = Origin::parse("http://127.0.0.1:8000").unwrap();
    assert!(!origin.is_secure());
    assert_eq!(origin.stream_url("abc"), "ws://127.0.0.1:8000/stream/ws?token=abc");
}

#[test]
fn host_keeps_port_and_drops_path() {
    let origin = Origin::parse("http://localhost:5173/index.html?x=1").unwrap();
    assert_eq!(origin.host(), "localhost:5173");
    assert_eq!(origin.http_url(TOKEN_PATH), "http://localhost:5173/auth/token");
}

#[test]
fn trailing_slash_is_ignored() {
    let origin = Origin::parse("https://example.com/").unwrap();
    assert_eq!(origin.http_url(HEALTH_PATH), "https://example.com/health");
}

#[test]
fn token_is_percent_encoded() {
    let origin = Origin::parse("http://h").unwrap();
    assert_eq!(origin.stream_url("a b&c=d/é"), "ws://h/stream/ws?token=a%20b%26c%3Dd%2F%C3%A9");
}

#[test]
fn jwt_shaped_token_passes_through_unchanged() {
    let origin = Origin::parse("http://h").unwrap();
    let token = "eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiJ4In0.c2ln-_";
    assert_eq!(origin.stream_url(token), format!("ws://h/stream/ws?token={token}"));
}

#[test]
fn rejects_other_schemes() {
    assert!(matches!(Origin::parse("ws://h"), Err(ClientError::InvalidBaseUrl(_))));
    assert!(matches!(Origin::parse("h:8000"), Err(ClientError::InvalidBaseUrl(_))));
}

#[test]
fn rejects_empty_host() {
    assert!(matches!(Origin::parse("http://"), Err(ClientError::InvalidBaseUrl(_))));
    assert!(matches!(Origin::parse("https:///path"), Err(ClientError::InvalidBaseUrl(_))));
}
