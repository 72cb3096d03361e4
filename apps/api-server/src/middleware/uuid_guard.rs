//! Path id guard - rejects malformed `{id}` segments before the handler runs.

use actix_web::{
    Error, ResponseError,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use regex::Regex;
use std::future::{Future, Ready, ready};
use std::pin::Pin;
use std::sync::LazyLock;

use super::error::AppError;

static UUID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
        .expect("UUID pattern is valid")
});

/// Canonical hyphenated UUID, any case.
pub fn is_uuid(value: &str) -> bool {
    UUID_RE.is_match(value)
}

/// Middleware factory checking the named path parameter.
pub struct UuidGuard {
    param: &'static str,
}

impl UuidGuard {
    pub fn new(param: &'static str) -> Self {
        Self { param }
    }
}

impl<S, B> Transform<S, ServiceRequest> for UuidGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = UuidGuardService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(UuidGuardService {
            service,
            param: self.param,
        }))
    }
}

pub struct UuidGuardService<S> {
    service: S,
    param: &'static str,
}

impl<S, B> Service<ServiceRequest> for UuidGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let valid = req.match_info().get(self.param).is_some_and(is_uuid);

        if !valid {
            tracing::debug!(path = %req.path(), "Rejected malformed id");

            let response = AppError::InvalidId.error_response();
            let (http_req, _payload) = req.into_parts();
            let srv_response = ServiceResponse::new(http_req, response);

            return Box::pin(async move { Ok(srv_response.map_into_right_body()) });
        }

        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            Ok(res.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_uuid() {
        assert!(is_uuid("4f9c2a8e-1b7d-4c3e-9a5f-0d6e8b2c1a7f"));
        assert!(is_uuid("4F9C2A8E-1B7D-4C3E-9A5F-0D6E8B2C1A7F"));
        assert!(!is_uuid("not-a-uuid"));
        assert!(!is_uuid("4f9c2a8e1b7d4c3e9a5f0d6e8b2c1a7f"));
        assert!(!is_uuid("{4f9c2a8e-1b7d-4c3e-9a5f-0d6e8b2c1a7f}"));
        assert!(!is_uuid("4f9c2a8e-1b7d-4c3e-9a5f-0d6e8b2c1a7g"));
    }
}
