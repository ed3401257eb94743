//! # API Module
//!
//! HTTP endpoint of the short-lived local server that completes the OAuth
//! 2.0 PKCE flow.
//!
//! - [`callback`] - receives the authorization code from Spotify's
//!   authorization server and exchanges it, together with the stored code
//!   verifier, for an access token.
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use plistkit::api::callback;
//!
//! let app = Router::new().route("/callback", get(callback));
//! ```

mod callback;

pub use callback::{callback, store_token};
