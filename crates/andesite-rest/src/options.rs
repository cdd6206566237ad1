//! Node connection options

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use config::{Config, File};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::HttpError;
use crate::response::Response;

/// Timeout applied when none (or zero) is configured
pub const DEFAULT_REST_TIMEOUT: Duration = Duration::from_millis(20_000);

/// How responses with a non-2xx status are treated
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StatusPolicy {
    /// Non-2xx responses fail with [`HttpError::Status`] and are not counted
    #[default]
    Reject,
    /// Every response the node sends back is a success
    Resolve,
}

impl FromStr for StatusPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reject" => Ok(StatusPolicy::Reject),
            "resolve" => Ok(StatusPolicy::Resolve),
            _ => Err(format!("Unknown status policy: {}", s)),
        }
    }
}

/// Everything needed to talk to one node
///
/// The owner of the node connection builds this and hands it to
/// [`crate::RestClient::new`]; the client keeps no reference back to it.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeOptions {
    /// Node host name or address
    pub host: String,
    /// Node REST port
    pub port: u16,
    /// Sent as `User-Id` on every request
    pub user_id: String,
    /// Sent as `Authorization` on every request when set
    pub authorization: Option<String>,
    /// Request timeout in milliseconds; `None` or `0` means [`DEFAULT_REST_TIMEOUT`]
    pub rest_timeout_ms: Option<u64>,
    /// Non-2xx handling
    #[serde(default)]
    pub status_policy: StatusPolicy,
}

impl Default for NodeOptions {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5000,
            user_id: String::new(),
            authorization: None,
            rest_timeout_ms: None,
            status_policy: StatusPolicy::default(),
        }
    }
}

impl std::fmt::Debug for NodeOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeOptions")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user_id", &self.user_id)
            .field(
                "authorization",
                &self.authorization.as_ref().map(|_| "<redacted>"),
            )
            .field("rest_timeout_ms", &self.rest_timeout_ms)
            .field("status_policy", &self.status_policy)
            .finish()
    }
}

impl NodeOptions {
    /// Create options for a node without credentials
    pub fn new(host: impl Into<String>, port: u16, user_id: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            user_id: user_id.into(),
            ..Default::default()
        }
    }

    /// Set the `Authorization` credential
    pub fn with_authorization(mut self, authorization: impl Into<String>) -> Self {
        self.authorization = Some(authorization.into());
        self
    }

    /// Set the request timeout
    pub fn with_rest_timeout(mut self, timeout: Duration) -> Self {
        self.rest_timeout_ms = Some(timeout.as_millis().try_into().unwrap_or(u64::MAX));
        self
    }

    /// Set the non-2xx policy
    pub fn with_status_policy(mut self, status_policy: StatusPolicy) -> Self {
        self.status_policy = status_policy;
        self
    }

    /// Effective request timeout
    pub fn rest_timeout(&self) -> Duration {
        match self.rest_timeout_ms {
            Some(ms) if ms > 0 => Duration::from_millis(ms),
            _ => DEFAULT_REST_TIMEOUT,
        }
    }

    /// `http://{host}:{port}` for this node
    pub fn base_url(&self) -> Response<Url> {
        let host = self.host.trim();
        if host.is_empty() {
            return Err(HttpError::InvalidConfig("Node host is empty".to_string()));
        }

        let host = if host.contains(':') && !host.starts_with('[') {
            format!("[{}]", host)
        } else {
            host.to_string()
        };

        Url::parse(&format!("http://{}:{}", host, self.port)).map_err(|e| {
            HttpError::InvalidConfig(format!("Invalid node address {}: {}", self.host, e))
        })
    }

    /// Load options from a file layered over the defaults
    pub fn from_file<P>(path: P) -> Response<Self>
    where
        P: AsRef<Path>,
    {
        let default = Self::default();
        let config = Config::builder()
            .add_source(Config::try_from(&default)?)
            .add_source(File::from(path.as_ref()))
            .build()?;

        let options: NodeOptions = config.try_deserialize()?;
        tracing::debug!(host = %options.host, port = options.port, "Loaded node options");
        Ok(options)
    }
}
