use crate::api::routes;
use crate::config::SharedConfig;
use crate::error::Error;
use crate::record_store::DynRecordStore;
use crate::tls;
use axum::Router;
use std::net::SocketAddr;

#[derive(Clone)]
pub(super) struct AppState {
    pub config: SharedConfig,
    pub record_store: DynRecordStore,
}

/// Build the API router. Split out from [`new`] so tests can drive the exact
/// route/middleware stack without a listener.
pub fn router(config: SharedConfig, record_store: DynRecordStore) -> Router {
    routes::new(AppState {
        config,
        record_store,
    })
}

/// Serve the API until the listener stops.
///
/// `config.insecure` selects plaintext HTTP; otherwise the listener runs TLS
/// with certificate material loaded from the configured paths, or generated
/// self-signed for `config.api_domain` when no paths are set. This is the
/// only place the transport branches; handlers never see it.
///
/// # Errors
///
/// Returns [`Error::ApiStopped`] or [`Error::IO`] when serving fails, and
/// [`Error::Tls`] when certificate material can't be produced.
pub async fn new(config: SharedConfig, record_store: DynRecordStore) -> Result<(), Error> {
    let app = router(config.clone(), record_store)
        .into_make_service_with_connect_info::<SocketAddr>();

    if config.insecure {
        tracing::info!("API listening at http://{}", config.api_bind_addr);
        axum::Server::bind(&config.api_bind_addr).serve(app).await?;
        return Ok(());
    }

    let tls_config = match (&config.api_cert_path, &config.api_key_path) {
        (Some(cert_path), Some(key_path)) => tls::load(cert_path, key_path).await?,
        _ => tls::generate(&config.api_domain).await?,
    };

    tracing::info!("API listening at https://{}", config.api_bind_addr);
    axum_server::bind_rustls(config.api_bind_addr, tls_config)
        .serve(app)
        .await?;
    Ok(())
}
