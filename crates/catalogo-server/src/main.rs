use catalogo_server::{build_router, open_store, AppState, Config};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    // Store failures are logged inside open_store and never stop startup.
    let store = open_store(config.store_dir.as_deref());
    let state = AppState::new(store, config.index_file.clone());
    let app = build_router(state, &config.datasets, &config.cors_origins)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    match &config.tls {
        Some(tls) => {
            let rustls =
                axum_server::tls_rustls::RustlsConfig::from_pem_file(&tls.cert, &tls.key).await?;
            info!("https listening on {}", addr);
            axum_server::bind_rustls(addr, rustls)
                .serve(app.into_make_service())
                .await?;
        }
        None => {
            info!("http listening on {}", addr);
            axum_server::bind(addr)
                .serve(app.into_make_service())
                .await?;
        }
    }
    Ok(())
}
