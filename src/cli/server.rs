use std::sync::Arc;

use anyhow::Result;
use axum::http::HeaderValue;
use mealplanner::{AppState, config::Config};
use mealplanner_ai::GeminiClient;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

pub async fn migrate(config: Config) -> Result<()> {
    tracing::info!("Running database migrations...");

    let pool = mealplanner::db::create_pool(&config.database.url, 1).await?;
    mealplanner_db::migrate(&pool).await?;
    pool.close().await;

    tracing::info!("Migrations completed successfully");

    Ok(())
}

/// Create the configured root admin unless the email is already taken
async fn bootstrap_root(config: &Config, command: &mealplanner_user::Command) -> Result<()> {
    let Some(root) = &config.root else {
        return Ok(());
    };

    if mealplanner_user::find_by_email(&command.0, &root.email)
        .await?
        .is_some()
    {
        return Ok(());
    }

    let id = command
        .register_with_role(
            mealplanner_user::RegisterInput {
                name: root.name.to_owned(),
                email: root.email.to_owned(),
                password: root.password.to_owned(),
            },
            mealplanner_user::Role::Admin,
        )
        .await?;

    tracing::info!(user_id = %id, email = %root.email, "root admin created");

    Ok(())
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    if origins.is_empty() {
        return Ok(CorsLayer::permissive());
    }

    let origins = origins
        .iter()
        .map(|origin| HeaderValue::from_str(origin))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any))
}

pub async fn serve(
    config: Config,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<()> {
    tracing::info!("Starting mealplanner server...");

    // Use CLI overrides if provided, otherwise use config
    let host = host_override.unwrap_or(config.server.host.to_owned());
    let port = port_override.unwrap_or(config.server.port);

    let pool =
        mealplanner::db::create_pool(&config.database.url, config.database.max_connections)
            .await?;
    mealplanner_db::migrate(&pool).await?;

    let user_command = mealplanner_user::Command(pool.clone());
    bootstrap_root(&config, &user_command).await?;

    let client = GeminiClient::new(config.ai.client_options())?;
    if !client.is_configured() {
        tracing::warn!("No AI api key configured, generation will use fallbacks");
    }

    let cors = cors_layer(&config.server.cors_origins)?;
    let state = AppState::new(config, pool.clone(), Arc::new(client));

    let app = mealplanner::router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Closing database pool...");
    pool.close().await;
    tracing::info!("Graceful shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal");
        },
    }

    tracing::info!("Starting graceful shutdown...");
}
