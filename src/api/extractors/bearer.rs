use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, StatusCode},
};

/// Bearer token from the Authorization header, if present. The token is not
/// verified locally; it is forwarded to the identity provider, which owns
/// the account. Handlers pass it down as an explicit argument.
pub struct MaybeBearer(pub Option<String>);

impl<S> FromRequestParts<S> for MaybeBearer
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(|token| token.to_string());

        Ok(MaybeBearer(token))
    }
}
