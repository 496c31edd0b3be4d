use crate::models::{CleanupResponse, JobRunResponse};
use crate::services::{
    NotificationCleanupService, PaydayReminderService, SubscriptionReminderService,
};
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    post,
    path = "/jobs/subscription-reminders",
    tag = "jobs",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Reminders emitted", body = JobRunResponse),
        (status = 401, description = "Missing or invalid service key"),
        (status = 500, description = "Fetch or database failure")
    )
)]
pub async fn run_subscription_reminders(
    service: web::Data<SubscriptionReminderService>,
) -> Result<HttpResponse> {
    match service.run().await {
        Ok(n) => Ok(HttpResponse::Ok().json(JobRunResponse::new(
            "Subscription reminders processed",
            n,
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/jobs/payday-reminders",
    tag = "jobs",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Payday notifications emitted", body = JobRunResponse),
        (status = 401, description = "Missing or invalid service key"),
        (status = 500, description = "Fetch or database failure")
    )
)]
pub async fn run_payday_reminders(
    service: web::Data<PaydayReminderService>,
) -> Result<HttpResponse> {
    match service.run().await {
        Ok(n) => Ok(HttpResponse::Ok().json(JobRunResponse::new("Payday reminders processed", n))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/jobs/cleanup",
    tag = "jobs",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Old notifications removed", body = CleanupResponse),
        (status = 401, description = "Missing or invalid service key"),
        (status = 500, description = "Database failure")
    )
)]
pub async fn run_cleanup(service: web::Data<NotificationCleanupService>) -> Result<HttpResponse> {
    match service.run().await {
        Ok(n) => Ok(HttpResponse::Ok().json(CleanupResponse::new("Old notifications removed", n))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn jobs_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/jobs")
            .route(
                "/subscription-reminders",
                web::post().to(run_subscription_reminders),
            )
            .route("/payday-reminders", web::post().to(run_payday_reminders))
            .route("/cleanup", web::post().to(run_cleanup)),
    );
}
