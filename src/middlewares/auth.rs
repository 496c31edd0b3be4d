use crate::error::AppError;
use actix_web::http::Method;
use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};

// Paths reachable without the service credential.
struct PublicPaths {
    exact_paths: Vec<&'static str>,
    prefix_paths: Vec<&'static str>,
}

impl PublicPaths {
    fn new() -> Self {
        Self {
            exact_paths: vec![
                "/health",
                "/swagger-ui",
                "/swagger-ui/",
                "/api-docs/openapi.json",
            ],
            prefix_paths: vec!["/swagger-ui/", "/api-docs/"],
        }
    }

    fn is_public_path(&self, path: &str) -> bool {
        if self.exact_paths.contains(&path) {
            return true;
        }
        self.prefix_paths
            .iter()
            .any(|&prefix| path.starts_with(prefix))
    }
}

/// Guards the job endpoints with the privileged service credential.
///
/// The jobs are invoked by an external scheduler, not by end users, so this is
/// a plain bearer comparison against the configured key rather than a token
/// verification.
pub struct JobAuthMiddleware {
    service_key: String,
}

impl JobAuthMiddleware {
    pub fn new(service_key: String) -> Self {
        Self { service_key }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JobAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JobAuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JobAuthMiddlewareService {
            service,
            service_key: self.service_key.clone(),
            public_paths: PublicPaths::new(),
        }))
    }
}

pub struct JobAuthMiddlewareService<S> {
    service: S,
    service_key: String,
    public_paths: PublicPaths,
}

impl<S, B> Service<ServiceRequest> for JobAuthMiddlewareService<S>
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
        // Let CORS preflights through.
        if req.method() == Method::OPTIONS {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        if self.public_paths.is_public_path(req.path()) {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        let token = req
            .headers()
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "));

        match token {
            Some(token) if !self.service_key.is_empty() && token == self.service_key => {
                let fut = self.service.call(req);
                Box::pin(fut)
            }
            Some(_) => {
                let error = AppError::AuthError("Invalid service key".to_string());
                Box::pin(async move { Err(error.into()) })
            }
            None => {
                let error = AppError::AuthError("Missing service key".to_string());
                Box::pin(async move { Err(error.into()) })
            }
        }
    }
}
