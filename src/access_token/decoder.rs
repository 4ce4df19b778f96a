use std::str::FromStr;
use base64ct::{Base64UrlUnpadded, Encoding};
use josekit::jwt::JwtPayload;
use log::{debug, trace};
use serde_json::{Map, Value};
use time::OffsetDateTime;
use crate::access_token::data::{AccessTokenClaims, AccessTokenData};
use crate::lib_constants::ROLE_CLAIM_NAME;
use crate::role::{Role, RoleParseError};
use crate::username_string::UsernameString;

mod errors;

pub use errors::AccessTokenDecoderError;

/// Reads claims out of compact JWS access tokens.
///
/// There is intentionally no verifier in here and no way to pass a key:
/// signature checks belong to the backend that issued the token.
#[derive(Clone, Copy, Debug, Default)]
pub struct AccessTokenDecoder;

impl AccessTokenDecoder {
    pub fn new() -> Self {
        AccessTokenDecoder
    }

    /// Decode the payload of [token] into optional claims.
    ///
    /// # Errors
    /// The token is not three dot-separated segments, the payload segment
    /// is not base64url JSON, a registered claim has the wrong type, or a
    /// timestamp claim does not fit a calendar date.
    pub fn decode_claims(
        &self,
        token: impl AsRef<str>,
    ) -> Result<AccessTokenClaims, AccessTokenDecoderError> {
        let payload = payload_segment(token.as_ref())?;
        let payload = Base64UrlUnpadded::decode_vec(payload.trim_end_matches('='))?;
        let payload: Map<String, Value> = serde_json::from_slice(&payload)?;
        let payload = JwtPayload::from_map(payload)?;
        trace!("decoded access token payload: {payload:?}");
        let role = payload.claim(ROLE_CLAIM_NAME)
            .map(|v| match v {
                Value::String(s) => Role::from_str(s),
                other => Err(RoleParseError(other.to_string())),
            })
            .transpose()?;
        Ok(
            AccessTokenClaims {
                subject: payload.subject().map(str::to_owned),
                role,
                issued_at: timestamp_claim(&payload, "iat")?,
                expires_at: timestamp_claim(&payload, "exp")?,
                issuer: payload.issuer().map(str::to_owned),
            }
        )
    }

    /// Decode the identity carried by [token].
    ///
    /// # Errors
    /// Everything [Self::decode_claims] rejects, plus a token lacking any of
    /// subject, role or expiry. Callers get all three or nothing.
    pub fn decode_token(
        &self,
        token: impl AsRef<str>,
    ) -> Result<AccessTokenData, AccessTokenDecoderError> {
        let claims = self.decode_claims(token)?;
        let subject = claims.subject
            .as_deref()
            .map(UsernameString::from_str)
            .transpose()?
            .ok_or_else(|| missing_field("subject"))?;
        let role = claims.role
            .ok_or_else(|| missing_field(ROLE_CLAIM_NAME))?;
        let expires_at = claims.expires_at
            .ok_or_else(|| missing_field("expires_at"))?;
        Ok(
            AccessTokenData {
                subject,
                role,
                expires_at,
                issued_at: claims.issued_at,
                issuer: claims.issuer,
            }
        )
    }
}

fn payload_segment(token: &str) -> Result<&str, AccessTokenDecoderError> {
    let mut segments = token.split('.');
    match (segments.next(), segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(payload), Some(_), None) => Ok(payload),
        _ => Err(AccessTokenDecoderError::Structure),
    }
}

fn timestamp_claim(
    payload: &JwtPayload,
    claim: &'static str,
) -> Result<Option<OffsetDateTime>, AccessTokenDecoderError> {
    payload.claim(claim)
        .map(|value| {
            value.as_u64()
                .and_then(|secs| i64::try_from(secs).ok())
                .and_then(|secs| OffsetDateTime::from_unix_timestamp(secs).ok())
                .ok_or(AccessTokenDecoderError::TimestampOutOfRange { claim })
        })
        .transpose()
}

fn missing_field(part: &'static str) -> AccessTokenDecoderError {
    debug!("missing field {part} in access token");
    AccessTokenDecoderError::PayloadMissing { part }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::Duration;
    use crate::test::{encode_unsigned_token, sign_token};
    use super::*;

    fn in_an_hour() -> i64 {
        (OffsetDateTime::now_utc() + Duration::hours(1)).unix_timestamp()
    }

    #[test]
    fn decode_full_identity() {
        let exp = in_an_hour();
        let token = sign_token(json!({
            "sub": "alice",
            "role": "CUSTOMER",
            "iat": exp - 3600,
            "exp": exp,
            "iss": "self",
        }));
        let data = AccessTokenDecoder::new().decode_token(&token)
            .expect("token should decode");
        assert_eq!(&*data.subject, "alice");
        assert_eq!(data.role, Role::Customer);
        assert_eq!(data.expires_at.unix_timestamp(), exp);
        assert_eq!(data.issued_at.map(|t| t.unix_timestamp()), Some(exp - 3600));
        assert_eq!(data.issuer.as_deref(), Some("self"));
    }

    #[test]
    fn signature_is_not_checked() {
        let token = encode_unsigned_token(
            json!({"alg": "HS256", "typ": "JWT"}),
            json!({"sub": "bob", "role": "GUIDE", "exp": in_an_hour()}),
            "definitely-not-a-signature",
        );
        let data = AccessTokenDecoder::new().decode_token(&token)
            .expect("token should decode without verification");
        assert_eq!(data.role, Role::Guide);
    }

    #[test]
    fn padded_payload_accepted() {
        let token = encode_unsigned_token(
            json!({"alg": "none"}),
            json!({"sub": "bob", "role": "GUIDE", "exp": in_an_hour()}),
            "",
        );
        let mut segments: Vec<String> = token.split('.').map(str::to_owned).collect();
        while segments[1].len() % 4 != 0 {
            segments[1].push('=');
        }
        AccessTokenDecoder::new().decode_token(segments.join("."))
            .expect("padding should be tolerated");
    }

    #[test]
    fn claims_are_all_optional() {
        let token = encode_unsigned_token(json!({"alg": "none"}), json!({}), "");
        let claims = AccessTokenDecoder::new().decode_claims(&token)
            .expect("empty payload is well-formed");
        assert_eq!(claims, AccessTokenClaims::default());
    }

    #[test]
    fn missing_role_is_all_or_nothing() {
        let token = encode_unsigned_token(
            json!({"alg": "none"}),
            json!({"sub": "alice", "exp": in_an_hour()}),
            "",
        );
        let decoder = AccessTokenDecoder::new();
        let claims = decoder.decode_claims(&token).unwrap();
        assert_eq!(claims.subject.as_deref(), Some("alice"));
        let err = decoder.decode_token(&token).expect_err("should fail");
        assert!(
            matches!(err, AccessTokenDecoderError::PayloadMissing { part: "role" }),
            "wrong error type: {err:#?}",
        );
    }

    #[test]
    fn missing_expiry_rejected() {
        let token = encode_unsigned_token(
            json!({"alg": "none"}),
            json!({"sub": "alice", "role": "ADMIN"}),
            "",
        );
        let err = AccessTokenDecoder::new().decode_token(&token).expect_err("should fail");
        assert!(
            matches!(err, AccessTokenDecoderError::PayloadMissing { part: "expires_at" }),
            "wrong error type: {err:#?}",
        );
    }

    #[test]
    fn not_a_token() {
        let err = AccessTokenDecoder::new().decode_claims("not-a-token")
            .expect_err("should fail");
        assert!(matches!(err, AccessTokenDecoderError::Structure), "wrong error type: {err:#?}");
    }

    #[test]
    fn too_many_segments() {
        let err = AccessTokenDecoder::new().decode_claims("a.b.c.d")
            .expect_err("should fail");
        assert!(matches!(err, AccessTokenDecoderError::Structure), "wrong error type: {err:#?}");
    }

    #[test]
    fn two_segments_rejected() {
        let err = AccessTokenDecoder::new().decode_claims("a.b")
            .expect_err("should fail");
        assert!(matches!(err, AccessTokenDecoderError::Structure), "wrong error type: {err:#?}");
    }

    #[test]
    fn payload_not_base64() {
        let err = AccessTokenDecoder::new().decode_claims("eyJhbGciOiJub25lIn0.!!!.sig")
            .expect_err("should fail");
        assert!(matches!(err, AccessTokenDecoderError::Base64(_)), "wrong error type: {err:#?}");
    }

    #[test]
    fn payload_not_json() {
        let payload = Base64UrlUnpadded::encode_string(b"hello");
        let err = AccessTokenDecoder::new().decode_claims(format!("e30.{payload}.sig"))
            .expect_err("should fail");
        assert!(matches!(err, AccessTokenDecoderError::PayloadParse(_)), "wrong error type: {err:#?}");
    }

    #[test]
    fn unknown_role_rejected() {
        let token = encode_unsigned_token(
            json!({"alg": "none"}),
            json!({"sub": "alice", "role": "SUPERUSER", "exp": in_an_hour()}),
            "",
        );
        let err = AccessTokenDecoder::new().decode_claims(&token).expect_err("should fail");
        assert!(matches!(err, AccessTokenDecoderError::InvalidRole(_)), "wrong error type: {err:#?}");
    }

    #[test]
    fn mistyped_expiry_rejected() {
        let token = encode_unsigned_token(
            json!({"alg": "none"}),
            json!({"sub": "alice", "role": "ADMIN", "exp": "tomorrow"}),
            "",
        );
        let err = AccessTokenDecoder::new().decode_claims(&token).expect_err("should fail");
        assert!(matches!(err, AccessTokenDecoderError::Claims(_)), "wrong error type: {err:#?}");
    }

    #[test]
    fn blank_subject_rejected() {
        let token = encode_unsigned_token(
            json!({"alg": "none"}),
            json!({"sub": " ", "role": "ADMIN", "exp": in_an_hour()}),
            "",
        );
        let err = AccessTokenDecoder::new().decode_token(&token).expect_err("should fail");
        assert!(matches!(err, AccessTokenDecoderError::InvalidSubject(_)), "wrong error type: {err:#?}");
    }

    #[test]
    fn far_future_expiry_rejected() {
        for exp in [json!(u64::MAX), json!(100_000_000_000_000_u64)] {
            let token = encode_unsigned_token(
                json!({"alg": "none"}),
                json!({"sub": "alice", "role": "ADMIN", "exp": exp}),
                "",
            );
            let err = AccessTokenDecoder::new().decode_token(&token).expect_err("should fail");
            assert!(
                matches!(err, AccessTokenDecoderError::TimestampOutOfRange { claim: "exp" }),
                "wrong error type: {err:#?}",
            );
        }
    }

    #[test]
    fn far_future_issued_at_rejected() {
        let token = encode_unsigned_token(
            json!({"alg": "none"}),
            json!({"sub": "alice", "role": "ADMIN", "iat": u64::MAX, "exp": in_an_hour()}),
            "",
        );
        let err = AccessTokenDecoder::new().decode_claims(&token).expect_err("should fail");
        assert!(
            matches!(err, AccessTokenDecoderError::TimestampOutOfRange { claim: "iat" }),
            "wrong error type: {err:#?}",
        );
    }
}
