use crate::{error, remote::RemoteCollection, spotify::SpotifyClient, success};

/// Runs the authorization flow once to check the setup.
pub async fn auth() {
    let client = SpotifyClient::new();
    match client.authorize().await {
        Ok(user) => success!("Authorized as: {} ({})", user.name(), user.id),
        Err(e) => error!("{}", e),
    }
}
