//! Node option environment variables

use std::env;

use crate::options::{NodeOptions, StatusPolicy};

/// Overrides [`NodeOptions::host`]
pub const ENV_HOST: &str = "ANDESITE_HOST";
/// Overrides [`NodeOptions::port`]
pub const ENV_PORT: &str = "ANDESITE_PORT";
/// Overrides [`NodeOptions::user_id`]
pub const ENV_USER_ID: &str = "ANDESITE_USER_ID";
/// Overrides [`NodeOptions::authorization`]
pub const ENV_AUTHORIZATION: &str = "ANDESITE_AUTHORIZATION";
/// Overrides [`NodeOptions::rest_timeout_ms`]
pub const ENV_REST_TIMEOUT_MS: &str = "ANDESITE_REST_TIMEOUT_MS";
/// Overrides [`NodeOptions::status_policy`]
pub const ENV_STATUS_POLICY: &str = "ANDESITE_STATUS_POLICY";

impl NodeOptions {
    /// Override options from `ANDESITE_*` environment variables
    ///
    /// Values that fail to parse are ignored.
    pub fn from_env(mut self) -> Self {
        if let Ok(host) = env::var(ENV_HOST) {
            self.host = host;
        }

        if let Ok(port_str) = env::var(ENV_PORT) {
            if let Ok(port) = port_str.parse() {
                self.port = port;
            }
        }

        if let Ok(user_id) = env::var(ENV_USER_ID) {
            self.user_id = user_id;
        }

        if let Ok(authorization) = env::var(ENV_AUTHORIZATION) {
            self.authorization = Some(authorization);
        }

        if let Ok(timeout_str) = env::var(ENV_REST_TIMEOUT_MS) {
            if let Ok(timeout) = timeout_str.parse::<u64>() {
                self.rest_timeout_ms = Some(timeout);
            }
        }

        if let Ok(policy_str) = env::var(ENV_STATUS_POLICY) {
            match policy_str.parse::<StatusPolicy>() {
                Ok(policy) => self.status_policy = policy,
                Err(err) => tracing::warn!("Ignoring {}: {}", ENV_STATUS_POLICY, err),
            }
        }

        self
    }
}
