use std::{future::Future, io};

use tokio::{self, net::TcpListener};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod model;
mod store;

use api::Application;
use config::DatabaseConfig;
use store::mysql::MysqlStore;

const BIND_ADDRESS: &str = "0.0.0.0:5000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let database = DatabaseConfig::from_env();
    let request_timeout = config::request_timeout(|key| std::env::var(key).ok());
    info!(
        user = %database.user,
        host = %database.host,
        database = %database.name,
        "connecting to database"
    );

    let store = MysqlStore::new(database.url())?;
    // Nothing is bound until the table is known to exist.
    let app = match api::initialise(Application {
        store,
        request_timeout,
    })
    .await
    {
        Ok(app) => app,
        Err(err) => {
            error!(error = %err, "could not initialise the message table");
            return Err(err.into());
        }
    };

    let listener = TcpListener::bind(BIND_ADDRESS).await?;
    info!(address = BIND_ADDRESS, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = on_signal("Ctrl-C", tokio::signal::ctrl_c());

    #[cfg(unix)]
    let terminate = on_signal("SIGTERM", async {
        use tokio::signal::unix::{signal, SignalKind};
        signal(SignalKind::terminate())?.recv().await;
        Ok::<_, io::Error>(())
    });

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("shutting down");
}

/// Resolves once `signal` fires. A handler that could not be installed never
/// resolves, so it cannot trigger a shutdown by itself.
async fn on_signal(name: &str, signal: impl Future<Output = io::Result<()>>) {
    if let Err(err) = signal.await {
        warn!(error = %err, signal = name, "failed to install signal handler");
        std::future::pending::<()>().await;
    }
}
