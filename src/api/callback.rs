use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::{
    spotify::auth::exchange_code_pkce,
    types::{PkceToken, Token},
    warning,
};

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<Arc<Mutex<Option<PkceToken>>>>,
) -> Html<&'static str> {
    if let Some(error) = params.get("error") {
        warning!("Authorization was denied: {}", error);
        return Html("<h4>Authorization denied.</h4>");
    }

    let Some(code) = params.get("code") else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    let verifier = match shared_state.lock().await.as_ref() {
        Some(pkce_state) => pkce_state.code_verifier.clone(),
        None => return Html("<h4>Missing PKCE code verifier.</h4>"),
    };

    // The lock is released while the exchange is in flight.
    match exchange_code_pkce(code, &verifier).await {
        Ok(token) => {
            store_token(&shared_state, token).await;
            Html("<h2>Authorization successful.</h2><p>You can close this window.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            Html("<h4>Login failed.</h4>")
        }
    }
}

/// Hands an exchanged token to the waiting authorization flow.
pub async fn store_token(shared_state: &Mutex<Option<PkceToken>>, token: Token) {
    if let Some(pkce_state) = shared_state.lock().await.as_mut() {
        pkce_state.token = Some(token);
    }
}
