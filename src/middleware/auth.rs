use crate::services::token_service::{self, Claims};
use crate::utils::AppError;
use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::HeaderMap,
    Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

/// Verifies the Bearer credential and yields the decoded claims. Signature
/// and expiry are checked before any identity is derived; a missing or bad
/// token never passes through as a null identity.
pub fn claims_from_headers(headers: &HeaderMap) -> Result<Claims, AppError> {
    let header_value = headers
        .get("Authorization")
        .ok_or_else(|| AppError::Unauthorized("Missing authorization token".to_string()))?;

    let header_str = header_value
        .to_str()
        .map_err(|_| AppError::Unauthorized("Invalid authorization header".to_string()))?;

    let token = header_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Invalid token format".to_string()))?;

    token_service::verify_token(token).map_err(AppError::Unauthorized)
}

pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match claims_from_headers(req.headers()) {
            Ok(claims) => {
                // Downstream handlers read the verified identity via
                // web::ReqData<Claims>.
                req.extensions_mut().insert(claims);

                let fut = self.service.call(req);
                Box::pin(async move {
                    let res = fut.await?;
                    Ok(res)
                })
            }
            Err(e) => {
                log::warn!("❌ Rejected request to {}: {}", req.path(), e);
                Box::pin(async move { Err(actix_web::error::ErrorUnauthorized(e.to_string())) })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header::{HeaderName, HeaderValue};

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("authorization"),
            HeaderValue::from_str(value).unwrap(),
        );
        headers
    }

    #[test]
    fn test_missing_header_rejected() {
        let headers = HeaderMap::new();
        assert!(matches!(
            claims_from_headers(&headers),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_non_bearer_scheme_rejected() {
        let headers = headers_with_auth("Basic dXNlcjpwYXNz");
        assert!(matches!(
            claims_from_headers(&headers),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_valid_bearer_token_attaches_identity() {
        let _guard = token_service::ENV_LOCK
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        std::env::set_var("ACCESS_TOKEN_SECRET", "unit-test-secret");
        let token = token_service::sign_token("carol@example.com", None).unwrap();

        let headers = headers_with_auth(&format!("Bearer {}", token));
        let claims = claims_from_headers(&headers).unwrap();
        assert_eq!(claims.email, "carol@example.com");
    }
}
