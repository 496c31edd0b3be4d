use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter

use paytrack_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    handlers,
    middlewares::{JobAuthMiddleware, create_cors},
    services::{NotificationCleanupService, PaydayReminderService, SubscriptionReminderService},
    swagger::swagger_config,
    tasks,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    let config = Config::from_toml().expect("Failed to load configuration file");

    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    let subscription_reminder_service = SubscriptionReminderService::new(pool.clone());
    let payday_reminder_service = PaydayReminderService::new(pool.clone());
    let cleanup_service = NotificationCleanupService::new(pool.clone(), config.jobs.retention_days);

    if config.jobs.spawn_tasks {
        tasks::spawn_all(
            subscription_reminder_service.clone(),
            payday_reminder_service.clone(),
            cleanup_service.clone(),
        );
    }

    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    let service_key = config.jobs.service_key.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .wrap(JobAuthMiddleware::new(service_key.clone()))
            .app_data(web::Data::new(subscription_reminder_service.clone()))
            .app_data(web::Data::new(payday_reminder_service.clone()))
            .app_data(web::Data::new(cleanup_service.clone()))
            .configure(swagger_config)
            .configure(handlers::health_config)
            .configure(handlers::jobs_config)
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
