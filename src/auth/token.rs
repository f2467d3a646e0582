use base64::Engine;
use serde::Serialize;
use serde_json::Value;
use crate::error::{ClaimError, Result};

/// Member identity carried in the bearer token's claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub member_id: i64,
    pub company_id: String,
    pub display_name: String,
}

/// Decode the identity claims from a JWT bearer token.
///
/// Only the payload segment is base64url-decoded. The signature is NOT
/// verified: the token is trusted as issued by the provider, and the decoded
/// fields are used purely to fill in the member id on outgoing claims. The
/// provider remains the party that actually validates the token.
pub fn decode_identity(token: &str) -> Result<Identity> {
    let payload = token
        .trim()
        .split('.')
        .nth(1)
        .filter(|segment| !segment.is_empty())
        .ok_or_else(|| ClaimError::InvalidCredential("missing payload segment".to_string()))?;

    let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| ClaimError::InvalidCredential(format!("payload is not base64url: {}", e)))?;

    let claims: Value = serde_json::from_slice(&bytes)
        .map_err(|e| ClaimError::InvalidCredential(format!("payload is not JSON: {}", e)))?;

    let member_id = match claims.get("member_id") {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
    .ok_or_else(|| ClaimError::InvalidCredential("'member_id' missing or not an integer".to_string()))?;

    let company_id = match claims.get("tpacompany_id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => {
            return Err(ClaimError::InvalidCredential("'tpacompany_id' missing".to_string()))
        }
        Some(other) => other.to_string(),
    };

    let display_name = claims
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| ClaimError::InvalidCredential("'name' missing".to_string()))?
        .to_string();

    Ok(Identity {
        member_id,
        company_id,
        display_name,
    })
}

#[cfg(test)]
pub(crate) fn make_token(claims: &Value) -> String {
    let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
    format!(
        "{}.{}.{}",
        engine.encode(br#"{"alg":"HS256","typ":"JWT"}"#),
        engine.encode(claims.to_string()),
        engine.encode(b"signature"),
    )
}
