//! DataPulse API server binary.
//!
//! Wires the MySQL repositories, the bounded Argon2 hasher, the audit
//! sink, and the retention sweep around the session service, then serves
//! the auth endpoints.

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use dp_api::app::{configure, not_found};
use dp_api::routes::auth::AppState;
use dp_core::services::audit::AuditSink;
use dp_core::services::crypto::SecretHasher;
use dp_core::services::token::{
    SessionService, TokenCleanupConfig, TokenCleanupService, TokenServiceConfig,
};
use dp_infra::{
    create_pool, MySqlCredentialVerifier, MySqlSecurityEventRepository, MySqlTokenRepository,
};
use dp_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if config.auth.jwt.is_using_default_secret() {
        tracing::warn!("JWT_SECRET is the development default; set a real secret in production");
    }

    let pool = create_pool(&config.database).await?;
    let repository = Arc::new(MySqlTokenRepository::new(pool.clone()));
    let audit = AuditSink::spawn(
        Arc::new(MySqlSecurityEventRepository::new(pool.clone())),
        256,
    );
    let hasher = SecretHasher::new(&config.auth.hashing)?;

    let sessions = Arc::new(SessionService::new(
        Arc::clone(&repository),
        hasher.clone(),
        TokenServiceConfig::from(&config.auth.jwt),
        audit,
    ));
    let issuer = sessions.issuer();
    let verifier = Arc::new(MySqlCredentialVerifier::new(pool, hasher));

    Arc::new(TokenCleanupService::new(
        Arc::clone(&repository),
        TokenCleanupConfig::default(),
    ))
    .start_background_task();

    let state = web::Data::new(AppState { sessions, verifier });
    let bind_address = config.server.bind_address();
    tracing::info!("starting server on {bind_address}");

    let workers = config.server.workers;
    let mut server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(state.clone())
            .app_data(web::Data::new(issuer.clone()))
            .wrap(TracingLogger::default())
            .wrap(cors)
            .configure(configure::<MySqlTokenRepository, MySqlCredentialVerifier>)
            .default_service(web::route().to(not_found))
    })
    .bind(&bind_address)
    .with_context(|| format!("failed to bind {bind_address}"))?;

    if workers > 0 {
        server = server.workers(workers);
    }

    server.run().await?;
    Ok(())
}
