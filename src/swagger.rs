use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::{NotificationKind, PayFrequency, SubscriptionFrequency};
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health,
        handlers::jobs::run_subscription_reminders,
        handlers::jobs::run_payday_reminders,
        handlers::jobs::run_cleanup,
    ),
    components(
        schemas(
            JobRunResponse,
            CleanupResponse,
            ReminderMetadata,
            NotificationKind,
            SubscriptionFrequency,
            PayFrequency,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "jobs", description = "Scheduled notification jobs"),
        (name = "health", description = "Liveness probe")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );
}
