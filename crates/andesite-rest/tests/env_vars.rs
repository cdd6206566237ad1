//! Environment overrides for node options
//!
//! Kept in its own test binary: it mutates the process environment, which
//! must not race with other tests reading it (reqwest reads `*_PROXY`).

use std::env;

use andesite_rest::{
    NodeOptions, StatusPolicy, ENV_AUTHORIZATION, ENV_HOST, ENV_PORT, ENV_REST_TIMEOUT_MS,
    ENV_STATUS_POLICY, ENV_USER_ID,
};

#[test]
fn test_from_env_overrides() {
    env::set_var(ENV_HOST, "10.0.0.2");
    env::set_var(ENV_PORT, "not-a-port");
    env::set_var(ENV_USER_ID, "42");
    env::set_var(ENV_AUTHORIZATION, "youshallnotpass");
    env::set_var(ENV_REST_TIMEOUT_MS, "1500");
    env::set_var(ENV_STATUS_POLICY, "resolve");

    let options = NodeOptions::new("localhost", 5000, "abc").from_env();

    for key in [
        ENV_HOST,
        ENV_PORT,
        ENV_USER_ID,
        ENV_AUTHORIZATION,
        ENV_REST_TIMEOUT_MS,
        ENV_STATUS_POLICY,
    ] {
        env::remove_var(key);
    }

    assert_eq!(options.host, "10.0.0.2");
    assert_eq!(options.port, 5000);
    assert_eq!(options.user_id, "42");
    assert_eq!(options.authorization.as_deref(), Some("youshallnotpass"));
    assert_eq!(options.rest_timeout_ms, Some(1500));
    assert_eq!(options.status_policy, StatusPolicy::Resolve);
}
