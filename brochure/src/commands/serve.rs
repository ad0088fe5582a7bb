use brochure_config::Config;
use tracing::{error, info};

use crate::environment;

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let server = environment::rest_server(&config)?;

    info!(
        environment = ?config.environment,
        allowed_origin = %config.http.allowed_origin,
        "Starting http server on {}:{}",
        config.http.host,
        config.http.port
    );
    server
        .serve(config.http.host, config.http.port, shutdown_signal())
        .await?;
    info!("Http server stopped");

    Ok(())
}

/// Resolves once the process receives SIGINT or SIGTERM.
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for SIGINT: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(err) => {
                error!("Failed to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => info!("SIGINT received, shutting down gracefully"),
        () = terminate => info!("SIGTERM received, shutting down gracefully"),
    }
}
