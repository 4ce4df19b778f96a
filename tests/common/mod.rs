use base64ct::{Base64UrlUnpadded, Encoding};
use serde_json::{json, Value};
use time::{Duration, OffsetDateTime};
use tourbook::api::ApiClient;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub fn token(subject: &str, role: &str, expires_at: OffsetDateTime) -> String {
    encode(json!({
        "sub": subject,
        "role": role,
        "iat": (expires_at - Duration::hours(1)).unix_timestamp(),
        "exp": expires_at.unix_timestamp(),
    }))
}

pub fn encode(payload: Value) -> String {
    format!(
        "{}.{}.c2lnbmF0dXJl",
        Base64UrlUnpadded::encode_string(br#"{"alg":"HS256","typ":"JWT"}"#),
        Base64UrlUnpadded::encode_string(payload.to_string().as_bytes()),
    )
}

pub fn in_an_hour() -> OffsetDateTime {
    // whole seconds, as they survive the token
    OffsetDateTime::from_unix_timestamp(
        (OffsetDateTime::now_utc() + Duration::hours(1)).unix_timestamp(),
    ).unwrap()
}

pub fn api(server: &MockServer) -> ApiClient {
    ApiClient::new(&format!("{}/api", server.uri()), None).unwrap()
}

pub async fn accept_login(server: &MockServer, username: &str, password: &str, token: &str) {
    Mock::given(method("POST"))
        .and(path("/api/auth/authenticate"))
        .and(body_json(json!({"username": username, "password": password})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "firstname": "Test",
            "lastname": "User",
            "token": token,
        })))
        .mount(server)
        .await;
}
