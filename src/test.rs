use base64ct::{Base64UrlUnpadded, Encoding};
use josekit::jws::{JwsHeader, HS256};
use josekit::jwt::{self, JwtPayload};
use serde_json::Value;

const TEST_SIGNING_KEY: &[u8] =
    b"0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

#[macro_export]
macro_rules! assert_json_eq {
    ($value:expr, $json_string:expr$(,)?) => {
        match ($value, $json_string) {
            (ref value, ref json_string) => {
                use $crate::test::Infer;
                let json_left = serde_json::to_value(value)
                    .unwrap_or_else(|e|
                        panic!("failed to serialize \"{:?}\": {e}", value)
                    );
                let deserialized_right = value.same_inferred_type(
                    serde_json
                        ::from_str(json_string.as_ref())
                        .unwrap_or_else(|e|
                            panic!("failed to deserialize \"{:?}\": {e}", json_string)
                        ),
                );
                let json_right = serde_json::to_value(deserialized_right)
                    .unwrap_or_else(|e|
                        panic!("failed to reserialize \"{:?}\": {e}", json_string)
                    );
                if json_left != json_right {
                    panic!(
                        r#"assertion `left == right` failed
       left: {:?}
  json_left: {:?}
      right: {:?}
 json_right: {:?}"#,
                        value,
                        json_left,
                        json_string,
                        json_right,
                    )
                }
            }
        }
    };
}

#[doc(hidden)]
pub trait Infer: Sized {
    type T;
    fn same_inferred_type(&self, value: Self) -> Self {
        value
    }
}
impl<T> Infer for T {
    type T = T;
}

/// Signed HS256 token, the way the backend issues them.
pub fn sign_token(claims: Value) -> String {
    let claims = claims.as_object()
        .cloned()
        .expect("claims must be a json object");
    let payload = JwtPayload::from_map(claims).expect("invalid claims");
    let signer = HS256.signer_from_bytes(TEST_SIGNING_KEY).expect("invalid key");
    jwt::encode_with_signer(&payload, &JwsHeader::new(), &signer)
        .expect("token signing failed")
}

/// Token assembled by hand, with an arbitrary signature segment.
pub fn encode_unsigned_token(header: Value, payload: Value, signature: &str) -> String {
    format!(
        "{}.{}.{}",
        Base64UrlUnpadded::encode_string(header.to_string().as_bytes()),
        Base64UrlUnpadded::encode_string(payload.to_string().as_bytes()),
        signature,
    )
}

/// Session store that is always ready and never changes.
pub struct FixedSessionStore {
    token: Option<String>,
}

impl FixedSessionStore {
    pub fn with_token(token: impl Into<String>) -> Self {
        FixedSessionStore { token: Some(token.into()) }
    }

    pub fn logged_out() -> Self {
        FixedSessionStore { token: None }
    }
}

#[async_trait::async_trait]
impl crate::session_store::SessionStore for FixedSessionStore {
    async fn restore(&self) {}

    async fn login(
        &self,
        _credentials: &crate::authenticator::Credentials,
    ) -> Result<Option<crate::role::Role>, crate::session_store::SessionError> {
        unimplemented!("fixed session")
    }

    async fn logout(&self) -> Result<(), crate::session_store::SessionError> {
        unimplemented!("fixed session")
    }

    async fn session(&self) -> crate::session_store::Session {
        crate::session_store::Session::new(self.token.clone(), None, false)
    }

    async fn wait_ready(&self) {}
}
