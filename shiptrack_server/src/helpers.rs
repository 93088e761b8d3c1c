use actix_web::{http::header::AUTHORIZATION, HttpRequest};
use log::*;

use crate::{data_objects::CronSecret, errors::ServerError};

/// Checks the request's `Authorization: Bearer <token>` header against the configured secret.
///
/// An unset secret never matches, so a misconfigured server refuses everything rather than nothing.
pub fn check_bearer_token(req: &HttpRequest, secret: &CronSecret) -> Result<(), ServerError> {
    if secret.0.is_empty() {
        error!("💻️ No cron secret has been configured. Refusing request to {}", req.path());
        return Err(ServerError::Unauthorized);
    }
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim);
    match token {
        Some(token) if secret.0.matches(token) => Ok(()),
        Some(_) => {
            warn!("💻️ Invalid bearer token presented for {}", req.path());
            Err(ServerError::Unauthorized)
        },
        None => {
            debug!("💻️ No bearer token presented for {}", req.path());
            Err(ServerError::Unauthorized)
        },
    }
}
