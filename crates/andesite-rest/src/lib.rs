//! REST client for Andesite audio nodes
//!
//! One [`RestClient`] is created per node connection. It sends `User-Id` and,
//! when configured, `Authorization` on every request, applies the node timeout
//! and counts the requests that completed successfully. A reconnect builds a
//! new client, so the count starts again at zero.
//!
//! # Example
//!
//! ```no_run
//! use andesite_rest::{NodeOptions, RequestConfig, Response, RestClient};
//! use serde_json::{json, Value};
//!
//! async fn example() -> Response<Value> {
//!     let options = NodeOptions::new("localhost", 5000, "1234").with_authorization("secret");
//!     let client = RestClient::new(&options)?;
//!
//!     let _stats: Value = client.get("/stats", None).await?;
//!
//!     let config = RequestConfig::new().query("identifier", "ytsearch:lofi");
//!     let _tracks: Value = client.get("/loadtracks", Some(&config)).await?;
//!
//!     client
//!         .post("/player/1/play", Some(&json!({ "track": "..." })), None)
//!         .await
//! }
//! ```

mod client;
mod env_vars;
mod error;
mod options;
mod request;
mod response;

pub use client::RestClient;
pub use env_vars::{
    ENV_AUTHORIZATION, ENV_HOST, ENV_PORT, ENV_REST_TIMEOUT_MS, ENV_STATUS_POLICY, ENV_USER_ID,
};
pub use error::HttpError;
pub use options::{NodeOptions, StatusPolicy, DEFAULT_REST_TIMEOUT};
pub use request::RequestConfig;
pub use reqwest::Method;
pub use response::{RawResponse, Response};
