use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::sync::Mutex;

use crate::{
    api,
    error::{Error, Result},
    types::PkceToken,
};

/// Serves the OAuth callback on `addr` until the task is aborted.
pub async fn start_api_server(addr: &str, state: Arc<Mutex<Option<PkceToken>>>) -> Result<()> {
    let app = Router::new().route("/callback", get(api::callback).layer(Extension(state)));

    let addr = SocketAddr::from_str(addr).map_err(|e| {
        Error::Configuration(format!("Failed to parse server address {}: {}", addr, e))
    })?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
