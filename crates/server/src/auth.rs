use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::headers::authorization::Basic;
use axum_extra::headers::{Authorization, HeaderMapExt};
use subtle::ConstantTimeEq;
use tracing::debug;

use service::CatalogRepository;

use crate::errors::JsonApiError;

#[derive(Clone)]
pub struct ServerAuthConfig {
    pub admin_password: String,
}

impl ServerAuthConfig {
    /// Constant-time check of `candidate` against the configured password.
    pub fn password_matches(&self, candidate: &str) -> bool {
        candidate.as_bytes().ct_eq(self.admin_password.as_bytes()).into()
    }
}

#[derive(Clone)]
pub struct ServerState {
    pub catalog: Arc<dyn CatalogRepository>,
    pub auth: ServerAuthConfig,
}

/// Middleware: require HTTP Basic credentials whose password matches the admin
/// secret. The username is ignored.
pub async fn require_basic_auth(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let creds = match req.headers().typed_get::<Authorization<Basic>>() {
        Some(Authorization(basic)) => basic,
        None => {
            debug!(path = %req.uri().path(), "missing or malformed basic credentials");
            return Err(JsonApiError::unauthorized());
        }
    };

    if !state.auth.password_matches(creds.password()) {
        debug!(path = %req.uri().path(), "rejected basic credentials");
        return Err(JsonApiError::unauthorized());
    }

    Ok(next.run(req).await)
}
