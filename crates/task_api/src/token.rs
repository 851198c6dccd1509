use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;

/// Extract the user id claim from a JWT-shaped bearer token.
///
/// Login responses from some backend revisions omit an explicit user id and
/// carry it only as the token's `sub` (or `user_id`/`id`) claim. The payload
/// segment is decoded without signature verification; the token is opaque to
/// this client and the backend remains the authority on its validity.
#[must_use]
pub fn user_id_from_token(token: &str) -> Option<String> {
    let mut parts = token.split('.');
    let _header = parts.next()?;
    let payload_segment = parts.next()?;
    let _signature = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    let decoded = decode_jwt_segment(payload_segment)?;
    let claims = serde_json::from_slice::<TokenClaims>(&decoded).ok()?;

    claims
        .sub
        .as_deref()
        .or(claims.user_id.as_deref())
        .or(claims.id.as_deref())
        .and_then(sanitize_nonempty)
}

fn decode_jwt_segment(segment: &str) -> Option<Vec<u8>> {
    general_purpose::URL_SAFE_NO_PAD
        .decode(segment)
        .or_else(|_| general_purpose::URL_SAFE.decode(segment))
        .ok()
}

fn sanitize_nonempty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

#[derive(Debug, Deserialize)]
struct TokenClaims {
    #[serde(default)]
    sub: Option<String>,
    #[serde(default)]
    user_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
}
