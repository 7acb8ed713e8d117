// Request identity extraction
//
// Authentication itself lives in the fronting proxy; by the time a
// request reaches this service the proxy has verified the session and
// installed the caller's id in a trusted header. A missing or
// malformed header means no valid session, and no operation runs.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::error::LedgerError;

/// Header installed by the auth proxy with the verified user id
pub const USER_ID_HEADER: &str = "x-user-id";

/// Authenticated caller identity, passed explicitly into every core
/// operation
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = LedgerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or(LedgerError::Unauthenticated)?;

        let user_id = Uuid::parse_str(raw).map_err(|_| LedgerError::Unauthenticated)?;

        Ok(AuthUser(user_id))
    }
}
