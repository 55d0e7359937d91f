use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::VdsClientError as Error;

#[derive(Deserialize)]
struct Claims {
    exp: Option<f64>,
    nbf: Option<f64>,
}

/// Reads the expiry instant embedded in a bearer token, without verifying
/// the signature. The tokens come straight from the gateway that minted
/// them, so the client only needs the timestamps, not proof of origin.
///
/// The gateway omits `exp` on some tokens and only stamps `nbf`. A
/// not-before instant is an odd renewal anchor (it bounds the token from
/// below, not above), but it is what the issuer actually sends, so it is
/// kept as the second-choice claim rather than rejected.
pub fn expiry_of(token: &str) -> Result<DateTime<Utc>, Error> {
    let mut segments = token.split('.');
    let payload = match (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) {
        (Some(_), Some(payload), Some(_), None) => payload,
        _ => {
            return Err(Error::MalformedToken(
                "token does not have three segments".into(),
            ))
        }
    };

    let raw = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| Error::MalformedToken(format!("payload is not base64url: {e}")))?;
    let claims: Claims = serde_json::from_slice(&raw)
        .map_err(|e| Error::MalformedToken(format!("payload is not a claims object: {e}")))?;

    let seconds = claims
        .exp
        .or(claims.nbf)
        .ok_or_else(|| Error::MalformedToken("neither exp nor nbf claim present".into()))?;
    instant_from(seconds).ok_or_else(|| Error::MalformedToken("claim is out of range".into()))
}

fn instant_from(seconds: f64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(seconds.trunc() as i64, (seconds.fract() * 1e9) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn token_with(claims: serde_json::Value) -> String {
        let header =
            URL_SAFE_NO_PAD.encode(serde_json::to_vec(&json!({"alg": "HS256", "typ": "JWT"})).unwrap());
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());
        format!("{header}.{payload}.signature")
    }

    #[test]
    fn reads_expiration_claim() {
        let token = token_with(json!({"exp": 1_900_000_000, "nbf": 1_800_000_000}));
        assert_eq!(expiry_of(&token).unwrap().timestamp(), 1_900_000_000);
    }

    #[test]
    fn falls_back_to_not_before() {
        let token = token_with(json!({"nbf": 1_800_000_000, "sub": "agency"}));
        assert_eq!(expiry_of(&token).unwrap().timestamp(), 1_800_000_000);
    }

    #[test]
    fn rejects_token_without_timestamps() {
        let token = token_with(json!({"sub": "agency"}));
        assert!(matches!(
            expiry_of(&token),
            Err(Error::MalformedToken(_))
        ));
    }

    #[test]
    fn rejects_non_jwt_input() {
        for garbage in ["", "not-a-token", "one.two", "a.b.c.d"] {
            assert!(matches!(
                expiry_of(garbage),
                Err(Error::MalformedToken(_))
            ));
        }
    }

    #[test]
    fn rejects_undecodable_payload() {
        assert!(matches!(
            expiry_of("header.!!!not-base64url!!!.signature"),
            Err(Error::MalformedToken(_))
        ));
    }
}
