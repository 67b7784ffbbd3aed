//! Application builder and startup.
//!
//! Assembles routes, middleware and state into an Axum router, seeds the
//! database, and runs the HTTP listener.

use crate::{
    docs,
    middleware::{
        authenticate, authorize, https_redirect, logging_middleware, request_id_middleware,
    },
    routes,
    state::AppState,
};
use anyhow::Context;
use axum::{middleware, Router};
use ebookstore_common::config::AppConfig;
use ebookstore_infrastructure::{Database, DatabaseConfig, DatabaseSeeder, DbInitializer, SeedOutcome};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{error, info, warn};

/// Build the router for `state`.
///
/// Pipeline order, outermost first: tracing, request id, request logging,
/// timeout, HTTPS redirection, authentication, authorization, routes.
pub fn build_router(state: AppState) -> Router {
    let mut app = Router::new()
        .merge(routes::health::routes())
        .merge(routes::api_routes());

    if state.config.environment.is_development() {
        app = app.merge(docs::swagger_routes());
    }

    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(middleware::from_fn(request_id_middleware))
            .layer(middleware::from_fn(logging_middleware))
            .layer(TimeoutLayer::new(state.config.request_timeout()))
            .layer(middleware::from_fn_with_state(state.clone(), https_redirect))
            .layer(middleware::from_fn_with_state(state.clone(), authenticate))
            .layer(middleware::from_fn_with_state(state.clone(), authorize)),
    )
    .with_state(state)
}

/// Run `seeder` once. Failures are logged and never abort startup.
pub async fn seed_database(seeder: &dyn DatabaseSeeder, database: &Database) -> SeedOutcome {
    match seeder.seed(database).await {
        Ok(outcome) => {
            info!(?outcome, "Database seeding finished");
            outcome
        }
        Err(err) => {
            error!(error = ?err, "Database seeding failed.");
            SeedOutcome::Failed(format!("{:#}", err))
        }
    }
}

/// A configured, seeded server bound to its listener
pub struct Application {
    listener: TcpListener,
    router: Router,
    seed: SeedOutcome,
}

impl Application {
    /// Validate configuration, wire state, seed, and bind the listener
    pub async fn build(config: AppConfig) -> anyhow::Result<Self> {
        Self::build_with_seeder(config, &DbInitializer).await
    }

    pub async fn build_with_seeder(
        config: AppConfig,
        seeder: &dyn DatabaseSeeder,
    ) -> anyhow::Result<Self> {
        config.validate().context("Invalid configuration")?;

        let database = Database::connect(
            &config.connection_strings.default_connection,
            &DatabaseConfig::from_app_config(&config),
        )
        .context("Failed to create the database context")?;

        let state = AppState::new(config, database.clone())?;

        if state.config.server.https_port.is_none() {
            warn!("server.https_port is not set; HTTPS redirection is disabled");
        }
        if state.config.environment.is_development() {
            info!(path = docs::SWAGGER_UI_PATH, "Swagger UI enabled");
        }

        let seed = seed_database(seeder, &database).await;

        let address = state.config.server_address();
        let listener = TcpListener::bind(&address)
            .await
            .with_context(|| format!("Failed to bind {}", address))?;

        Ok(Self {
            listener,
            router: build_router(state),
            seed,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Outcome of the startup seeding run
    pub fn seed_outcome(&self) -> &SeedOutcome {
        &self.seed
    }

    /// Router served by this application
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve until Ctrl-C or SIGTERM
    pub async fn run(self) -> anyhow::Result<()> {
        info!(address = %self.listener.local_addr()?, "Listening");

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Server error")?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
