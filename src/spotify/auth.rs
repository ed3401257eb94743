use std::{sync::Arc, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{
    config,
    error::{Error, Result},
    server::start_api_server,
    types::{PkceToken, Token},
    utils, warning,
};

/// How long the callback server waits for the user to finish in the browser.
const CALLBACK_TIMEOUT: Duration = Duration::from_secs(120);

/// Runs the OAuth 2.0 PKCE flow and returns the issued token.
///
/// 1. Generates the code verifier and its S256 challenge
/// 2. Starts the local callback server on `SERVER_ADDRESS`
/// 3. Opens the authorization URL in the default browser (or prints it)
/// 4. Waits for the callback to exchange the code for a token
///
/// The token lives for the duration of the run only.
///
/// # Errors
///
/// [`Error::Configuration`] when the client id, redirect URI or server
/// address are missing, [`Error::Auth`] when the user does not complete the
/// flow in time or the exchange fails.
pub async fn authorize_pkce() -> Result<Token> {
    let client_id = config::spotify_client_id()?;
    let redirect_uri = config::spotify_redirect_uri()?;
    let server_addr = config::server_addr()?;

    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    let shared_state: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(Some(PkceToken {
        code_verifier,
        token: None,
    })));

    let server_state = Arc::clone(&shared_state);
    let server = tokio::spawn(async move {
        if let Err(e) = start_api_server(&server_addr, server_state).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    let auth_url = utils::build_authorize_url(
        &config::spotify_apiauth_url(),
        &client_id,
        &redirect_uri,
        &code_challenge,
        &config::spotify_scope(),
    );

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let token = wait_for_token(shared_state).await;
    server.abort();

    token.ok_or_else(|| Error::Auth("authorization failed or timed out".to_string()))
}

async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<Token> {
    use std::time::Instant;

    let pb = ProgressBar::new_spinner();
    pb.set_message("Waiting for authorization in the browser...");
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let start = Instant::now();
    while start.elapsed() < CALLBACK_TIMEOUT {
        let lock = shared_state.lock().await;
        if let Some(token) = lock.as_ref().and_then(|pkce| pkce.token.clone()) {
            pb.finish_and_clear();
            return Some(token);
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    pb.finish_and_clear();
    None
}

/// Exchanges an authorization code plus the PKCE verifier for a token.
///
/// # Errors
///
/// [`Error::Auth`] when the token endpoint rejects the exchange or answers
/// without an access token.
pub async fn exchange_code_pkce(code: &str, verifier: &str) -> Result<Token> {
    let client_id = config::spotify_client_id()?;
    let redirect_uri = config::spotify_redirect_uri()?;

    let client = Client::new();
    let res = client
        .post(config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", redirect_uri.as_str()),
        ])
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| Error::Auth(e.to_string()))?;

    let json: Value = res.json().await.map_err(|e| Error::Auth(e.to_string()))?;
    token_from_response(&json)
}

/// Reads the bearer token out of a token endpoint response.
pub fn token_from_response(json: &Value) -> Result<Token> {
    let access_token = json["access_token"]
        .as_str()
        .filter(|token| !token.is_empty())
        .ok_or_else(|| Error::Auth("token response has no access_token".to_string()))?;

    Ok(Token {
        access_token: access_token.to_string(),
    })
}
